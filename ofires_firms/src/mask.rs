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

//! restricting detections to a region given as country polygons

use geo::{BoundingRect, Intersects, MultiPolygon, Point, Rect};
use geojson::FeatureCollection;
use reqwest::Client;
use tracing::info;

use ofires_common::{features::{feature_multi_polygon, parse_feature_collection, str_property}, net::get_response};
use crate::{FirePoint, errors::{Result, mask_error}};

#[derive(Debug,Clone)]
pub struct RegionMask {
    polygons: Vec<(Rect<f64>,MultiPolygon<f64>)>,
}

impl RegionMask {
    pub fn new (polygons: Vec<MultiPolygon<f64>>)->Result<Self> {
        let polygons: Vec<(Rect<f64>,MultiPolygon<f64>)> = polygons.into_iter()
            .filter_map( |mp| mp.bounding_rect().map( |r| (r,mp)))
            .collect();
        if polygons.is_empty() { return Err( mask_error("no region polygons")) }
        Ok( RegionMask { polygons } )
    }

    /// region made of all features with a `property` == `value` (e.g. "SOVEREIGNT" == "United States of America")
    pub fn from_features (fc: &FeatureCollection, property: &str, value: &str)->Result<Self> {
        let polygons: Vec<MultiPolygon<f64>> = fc.features.iter()
            .filter( |f| str_property( f, &[property]).as_deref() == Some(value))
            .filter_map( |f| feature_multi_polygon(f))
            .collect();
        if polygons.is_empty() { return Err( mask_error( format!("no features with {property} = {value}"))) }
        RegionMask::new( polygons)
    }

    /// points on the region boundary are considered to be inside
    pub fn contains (&self, lon: f64, lat: f64)->bool {
        let p = Point::new( lon, lat);
        self.polygons.iter().any( |(r,mp)| r.intersects(&p) && mp.intersects(&p))
    }
}

pub async fn fetch_region_mask (client: &Client, url: &str, property: &str, value: &str)->Result<RegionMask> {
    let data = get_response( client, url, &[]).await?.bytes().await.map_err( |e| mask_error(e))?;
    let fc = parse_feature_collection( &data)?;
    info!("loaded {} region features from {}", fc.features.len(), url);
    RegionMask::from_features( &fc, property, value)
}

pub fn mask_points (points: Vec<FirePoint>, mask: &RegionMask)->Vec<FirePoint> {
    points.into_iter().filter( |p| mask.contains( p.longitude, p.latitude)).collect()
}
