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
#![allow(non_snake_case)]

//! Albers equal-area conic projection on an ellipsoid (Snyder, "Map Projections - A Working Manual", pp. 101-102).
//! All area computations of project and fire geometries are done in this projection.

use geo::{Coord, MapCoords, MultiPolygon, Point};
use serde::{Serialize,Deserialize};

/// GRS80 semi major axis in meters
pub const GRS80_A: f64 = 6378137.0;
/// GRS80 inverse flattening
pub const GRS80_RF: f64 = 298.257222101;

const MAX_ITER: usize = 20;
const EPS: f64 = 1e-12;

/// projection parameters in degrees
#[derive(Debug,Clone,Copy,Serialize,Deserialize,PartialEq)]
pub struct AlbersParams {
    pub lat_0: f64,
    pub lon_0: f64,
    pub lat_1: f64,
    pub lat_2: f64,
}

/// "NAD83 / Conus Albers" (EPSG:5070)
pub const CONUS_ALBERS: AlbersParams = AlbersParams { lat_0: 23.0, lon_0: -96.0, lat_1: 29.5, lat_2: 45.5 };

#[derive(Debug,Clone)]
pub struct AlbersEqualArea {
    a: f64,
    e: f64,
    e2: f64,
    λ0: f64,
    n: f64,
    C: f64,
    ρ0: f64,
}

impl AlbersEqualArea {
    pub fn new (params: &AlbersParams, a: f64, rf: f64)->Self {
        let f = 1.0 / rf;
        let e2 = f * (2.0 - f);
        let e = e2.sqrt();

        let φ0 = params.lat_0.to_radians();
        let φ1 = params.lat_1.to_radians();
        let φ2 = params.lat_2.to_radians();

        let m1 = m( φ1, e2);
        let m2 = m( φ2, e2);
        let q0 = q( φ0.sin(), e, e2);
        let q1 = q( φ1.sin(), e, e2);
        let q2 = q( φ2.sin(), e, e2);

        let n = if (φ1 - φ2).abs() < EPS { φ1.sin() } else { (m1*m1 - m2*m2) / (q2 - q1) };
        let C = m1*m1 + n*q1;
        let ρ0 = a * (C - n*q0).sqrt() / n;

        AlbersEqualArea { a, e, e2, λ0: params.lon_0.to_radians(), n, C, ρ0 }
    }

    pub fn conus ()->Self {
        Self::new( &CONUS_ALBERS, GRS80_A, GRS80_RF)
    }

    /// geographic (lon,lat in degrees) to projected (x,y in meters)
    pub fn forward (&self, lon: f64, lat: f64)->(f64,f64) {
        let q = q( lat.to_radians().sin(), self.e, self.e2);
        let ρ = self.a * (self.C - self.n*q).max(0.0).sqrt() / self.n;
        let θ = self.n * normalize_lon( lon.to_radians() - self.λ0);

        ( ρ * θ.sin(), self.ρ0 - ρ * θ.cos() )
    }

    /// projected (x,y in meters) to geographic (lon,lat in degrees)
    pub fn inverse (&self, x: f64, y: f64)->(f64,f64) {
        let dy = self.ρ0 - y;
        let ρ = (x*x + dy*dy).sqrt();
        let θ = if self.n < 0.0 { (-x).atan2(-dy) } else { x.atan2(dy) };
        let q = (self.C - (ρ*ρ * self.n*self.n) / (self.a*self.a)) / self.n;

        let λ = self.λ0 + θ / self.n;
        ( λ.to_degrees(), self.latitude_of_q(q).to_degrees() )
    }

    fn latitude_of_q (&self, q: f64)->f64 {
        let e = self.e;
        let e2 = self.e2;

        // q at the poles
        let q_p = 1.0 - ((1.0 - e2) / (2.0*e)) * ((1.0 - e) / (1.0 + e)).ln();
        if (q.abs() - q_p.abs()).abs() < EPS { return q.signum() * std::f64::consts::FRAC_PI_2 }

        let mut φ = (q / 2.0).clamp(-1.0, 1.0).asin();
        for _ in 0..MAX_ITER {
            let sin_φ = φ.sin();
            let cos_φ = φ.cos();
            let es2 = e2 * sin_φ * sin_φ;
            let dφ = ((1.0 - es2) * (1.0 - es2) / (2.0 * cos_φ)) *
                ( q / (1.0 - e2) - sin_φ / (1.0 - es2) + (1.0 / (2.0*e)) * ((1.0 - e*sin_φ) / (1.0 + e*sin_φ)).ln() );
            φ += dφ;
            if dφ.abs() < EPS { break }
        }
        φ
    }

    pub fn project_multi_polygon (&self, mp: &MultiPolygon<f64>)->MultiPolygon<f64> {
        mp.map_coords( |c| { let (x,y) = self.forward( c.x, c.y); Coord{x,y} })
    }

    pub fn unproject_multi_polygon (&self, mp: &MultiPolygon<f64>)->MultiPolygon<f64> {
        mp.map_coords( |c| { let (x,y) = self.inverse( c.x, c.y); Coord{x,y} })
    }

    pub fn project_point (&self, p: &Point<f64>)->Point<f64> {
        let (x,y) = self.forward( p.x(), p.y());
        Point::new(x,y)
    }

    pub fn unproject_point (&self, p: &Point<f64>)->Point<f64> {
        let (lon,lat) = self.inverse( p.x(), p.y());
        Point::new(lon,lat)
    }
}

fn m (φ: f64, e2: f64)->f64 {
    let sin_φ = φ.sin();
    φ.cos() / (1.0 - e2 * sin_φ * sin_φ).sqrt()
}

fn q (sin_φ: f64, e: f64, e2: f64)->f64 {
    let es = e * sin_φ;
    (1.0 - e2) * ( sin_φ / (1.0 - es*es) - (1.0 / (2.0*e)) * ((1.0 - es) / (1.0 + es)).ln() )
}

fn normalize_lon (λ: f64)->f64 {
    use std::f64::consts::PI;
    let mut λ = λ;
    while λ > PI { λ -= 2.0*PI }
    while λ < -PI { λ += 2.0*PI }
    λ
}
