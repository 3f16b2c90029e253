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

use std::{fs,path::PathBuf};
use serde::Deserialize;
use ofires_build::{load_config_path, find_config_file, OfiresBuildError};

#[derive(Deserialize,Debug)]
struct TestConfig {
    name: String,
    max_concurrent: usize,
}

#[test]
fn test_load_config_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.ron");
    fs::write( &path, r#"TestConfig( name: "project-stats", max_concurrent: 4 )"#).unwrap();

    let config: TestConfig = load_config_path( &path).unwrap();
    println!("{config:?}");
    assert_eq!( config.name, "project-stats");
    assert_eq!( config.max_concurrent, 4);
}

#[test]
fn test_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.ron");
    fs::write( &path, r#"TestConfig( name: 42 )"#).unwrap();

    let res: Result<TestConfig,OfiresBuildError> = load_config_path( &path);
    assert!( res.is_err());
}

#[test]
fn test_find_config_in_home() {
    let dir = tempfile::tempdir().unwrap();
    let crate_dir = dir.path().join("configs").join("some_crate");
    fs::create_dir_all( &crate_dir).unwrap();
    fs::write( crate_dir.join("found.ron"), "()").unwrap();

    unsafe { std::env::set_var( ofires_build::HOME_ENV, dir.path()); }

    let path = find_config_file( &None, "some_crate", "found.ron");
    println!("found config: {path:?}");
    assert_eq!( path, Some( crate_dir.join("found.ron")));
    assert!( find_config_file( &None, "some_crate", "missing.ron").is_none());
}
