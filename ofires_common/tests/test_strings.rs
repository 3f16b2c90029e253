/*
 * Copyright © 2024, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use ofires_common::strings::{normalize, ratio, partial_ratio, similarity, best_match};

#[test]
fn test_ratio() {
    assert_eq!( ratio( "kitten", "sitting"), 62);
    assert_eq!( ratio( "dixie", "dixie"), 100);
    assert_eq!( ratio( "", "abc"), 0);
    assert_eq!( partial_ratio( "dixie", "dixie fire"), 100);
    assert_eq!( partial_ratio( "dixie fire", "dixie"), 100);
}

#[test]
fn test_similarity() {
    assert_eq!( normalize("  Mosquito-Fire "), "mosquito fire");
    assert_eq!( similarity( "MOSQUITO FIRE", "Mosquito Fire"), 100);
    assert!( similarity( "Dixie", "Caldor") < 50);
    assert_eq!( similarity( "", "Caldor"), 0);
}

#[test]
fn test_similarity_of_incident_suffix() {
    assert_eq!( similarity( "Dixie", "Dixie Fire"), 90);
    assert_eq!( similarity( "CALDOR", "Caldor Fire"), 90);
    assert_eq!( similarity( "Creek", "Creek Fire"), 90);
    assert_eq!( similarity( "Fire Creek", "Creek Fire"), 95); // token order
    assert!( similarity( "Dixie Fire", "Creek Fire") < 90);
}

#[test]
fn test_best_match() {
    let choices = vec!["Dixie Fire", "Caldor Fire", "Mosquito Fire"];

    let m = best_match( "DIXIE FIRE", choices.iter().copied(), 90);
    println!("match: {m:?}");
    assert_eq!( m, Some(("Dixie Fire", 100)));

    assert_eq!( best_match( "Caldor", choices.iter().copied(), 90), Some(("Caldor Fire", 90)));
    assert!( best_match( "Bootleg", choices.iter().copied(), 90).is_none());
}
