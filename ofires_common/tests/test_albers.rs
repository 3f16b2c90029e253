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

use geo::{Area, Coord, LineString, MultiPolygon, Polygon};
use ofires_common::albers::{AlbersEqualArea, GRS80_A, GRS80_RF};

// run with "cargo test test_albers -- --nocapture"

#[test]
fn test_albers_origin() {
    let proj = AlbersEqualArea::conus();
    let (x,y) = proj.forward( -96.0, 23.0);
    println!("origin: {x}, {y}");
    assert!( x.abs() < 1e-6);
    assert!( y.abs() < 1e-6);
}

#[test]
fn test_albers_round_trip() {
    let proj = AlbersEqualArea::conus();
    for (lon,lat) in [(-122.4, 37.8), (-70.1, 44.5), (-150.0, 61.2), (-81.7, 24.6), (-96.0, 49.0)] {
        let (x,y) = proj.forward( lon, lat);
        let (lon1,lat1) = proj.inverse( x, y);
        println!("({lon},{lat}) -> ({x:.1},{y:.1}) -> ({lon1},{lat1})");
        assert!( (lon - lon1).abs() < 1e-8);
        assert!( (lat - lat1).abs() < 1e-8);
    }
}

#[test]
fn test_albers_orientation() {
    let proj = AlbersEqualArea::conus();
    let (x_w,_) = proj.forward( -120.0, 40.0);
    let (x_e,_) = proj.forward( -75.0, 40.0);
    let (_,y_s) = proj.forward( -96.0, 30.0);
    let (_,y_n) = proj.forward( -96.0, 45.0);
    assert!( x_w < 0.0 && x_e > 0.0);
    assert!( y_n > y_s);
}

// area of a lat/lon quadrangle on the ellipsoid (authalic latitude formula)
fn quadrangle_area (lon0: f64, lat0: f64, lon1: f64, lat1: f64)->f64 {
    let f = 1.0 / GRS80_RF;
    let e2 = f * (2.0 - f);
    let e = e2.sqrt();
    let q = |lat: f64| {
        let s = lat.to_radians().sin();
        let es = e * s;
        (1.0 - e2) * (s / (1.0 - es*es) - (1.0 / (2.0*e)) * ((1.0 - es)/(1.0 + es)).ln())
    };
    GRS80_A * GRS80_A * (lon1 - lon0).to_radians() * (q(lat1) - q(lat0)) / 2.0
}

#[test]
fn test_albers_equal_area() {
    let proj = AlbersEqualArea::conus();
    let (lon0,lat0,lon1,lat1) = (-121.0, 39.0, -120.0, 40.0);

    // densify along parallels since those are arcs in the projection
    let n = 200;
    let mut coords: Vec<Coord<f64>> = Vec::new();
    for i in 0..=n { coords.push( Coord{ x: lon0 + (lon1-lon0) * i as f64 / n as f64, y: lat0 }) }
    for i in 0..=n { coords.push( Coord{ x: lon1 - (lon1-lon0) * i as f64 / n as f64, y: lat1 }) }
    coords.push( Coord{ x: lon0, y: lat0 });

    let mp = MultiPolygon::new( vec![ Polygon::new( LineString::new(coords), vec![]) ]);
    let projected = proj.project_multi_polygon( &mp);

    let area = projected.unsigned_area();
    let expected = quadrangle_area( lon0, lat0, lon1, lat1);
    let rel_err = (area - expected).abs() / expected;
    println!("projected area: {area:.0} m², expected: {expected:.0} m², rel error: {rel_err:e}");
    assert!( rel_err < 1e-4);
}
