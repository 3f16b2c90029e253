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

//! burned area of projects by fire perimeters

use std::collections::BTreeMap;
use chrono::{DateTime, NaiveDate, Utc};
use geo::{Area, BooleanOps, BoundingRect, Centroid, ConvexHull, Intersects, MultiPolygon, Polygon, Rect};
use serde::{Serialize,Deserialize};
use tracing::debug;

use ofires_common::{albers::AlbersEqualArea, datetime, store::join_key};
use ofires_nifc::{FirePerimeter, union_perimeters};
use crate::ProjectGeometry;

pub const STATE_NAME: &'static str = "project-fires";

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct FireMetadata {
    pub name: String,
    #[serde(serialize_with="datetime::ser_short_rfc3339_option", deserialize_with="datetime::de_flexible_datetime_option", default)]
    pub start_date: Option<DateTime<Utc>>,
    /// lon/lat
    pub centroid: [f64;2],
    /// lon/lat of the northern-most convex hull vertex
    pub label_coords: [f64;2],
    /// InciWeb page, if any
    pub url: Option<String>,
}

/// the fires burning into a project, keyed by IRWIN id
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct ProjectFires {
    pub opr_id: String,
    /// square meters
    pub burned_area: f64,
    /// burned_area / project area, rounded to 3 decimals
    pub burned_fraction: f64,
    pub fires: BTreeMap<String,FireMetadata>,
}

#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct ProjectFireState {
    pub name: String,
    pub created_at: String,
    pub overlapping_fires: Vec<ProjectFires>,
}

impl ProjectFireState {
    pub fn new (created_at: &DateTime<Utc>, overlapping_fires: Vec<ProjectFires>)->Self {
        ProjectFireState {
            name: STATE_NAME.to_string(),
            created_at: created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            overlapping_fires
        }
    }
}

/// keys the state is written to. Without `as_of` this is the live state which also goes to `state_now.json`
pub fn state_keys (prefix: &str, as_of: Option<NaiveDate>, now: &DateTime<Utc>)->Vec<String> {
    let names = match as_of {
        Some(date) => vec![ date.format("%Y-%m-%d").to_string() ],
        None => vec![ "now".to_string(), datetime::date_string( now) ]
    };
    names.iter().map( |n| join_key( prefix, &format!("state_{n}.json"))).collect()
}

/// projected convex hulls of projects
pub fn project_hulls (projects: &[ProjectGeometry])->Vec<(String,Polygon<f64>)> {
    projects.iter().map( |p| (p.opr_id.clone(), p.convex_hull())).collect()
}

/// ids of projects whose hull intersects any perimeter. This only narrows down the projects for which
/// [`summarize_project_fires`] has to be computed, it does not change results
pub fn candidate_opr_ids (perimeters: &[FirePerimeter], hulls: &[(String,Polygon<f64>)])->Vec<String> {
    let perimeter_rects: Vec<Option<Rect<f64>>> = perimeters.iter().map( |p| p.projected.bounding_rect()).collect();

    let mut ids: Vec<String> = hulls.iter().filter( |(_,hull)| {
        let Some(hull_rect) = hull.bounding_rect() else { return false };
        perimeters.iter().zip( perimeter_rects.iter()).any( |(p,r)| {
            r.map( |r| r.intersects( &hull_rect)).unwrap_or(false) && hull.intersects( &p.projected)
        })
    }).map( |(id,_)| id.clone()).collect();

    ids.sort();
    ids.dedup();
    ids
}

fn intersecting_perimeters<'a> (project: &MultiPolygon<f64>, perimeters: &'a [FirePerimeter])->Vec<&'a FirePerimeter> {
    let Some(project_rect) = project.bounding_rect() else { return Vec::new() };
    perimeters.iter().filter( |p| {
        p.projected.bounding_rect().map( |r| r.intersects( &project_rect)).unwrap_or(false) && p.projected.intersects( project)
    }).collect()
}

#[inline]
fn round3 (x: f64)->f64 {
    (x * 1000.0).round() / 1000.0
}

/// overlap of a project with the given perimeters. Intersecting perimeters are unioned before the
/// intersection with the project is computed so that overlapping fires are not counted twice.
/// Returns None if no perimeter intersects the project
pub fn summarize_project_fires (project: &ProjectGeometry, perimeters: &[FirePerimeter], albers: &AlbersEqualArea)->Option<ProjectFires> {
    let project_fires = intersecting_perimeters( &project.projected, perimeters);
    if project_fires.is_empty() { return None }

    let fire_geom = union_perimeters( project_fires.iter().copied());
    let burned_area = project.projected.intersection( &fire_geom).unsigned_area();
    let project_area = project.area();
    let burned_fraction = if project_area > 0.0 { round3( (burned_area / project_area).clamp( 0.0, 1.0)) } else { 0.0 };

    let fires: BTreeMap<String,FireMetadata> = project_fires.iter()
        .map( |p| (p.irwin_id.clone(), fire_metadata( p, albers)))
        .collect();

    debug!("{}: {} fires, burned area {:.0} m² ({})", project.opr_id, fires.len(), burned_area, burned_fraction);
    Some( ProjectFires { opr_id: project.opr_id.clone(), burned_area, burned_fraction, fires } )
}

pub fn fire_metadata (perimeter: &FirePerimeter, albers: &AlbersEqualArea)->FireMetadata {
    let centroid = perimeter.projected.centroid()
        .map( |c| { let p = albers.unproject_point( &c); [p.x(), p.y()] })
        .unwrap_or_default();
    let label_coords = northern_corner( &perimeter.projected.convex_hull())
        .map( |(x,y)| { let (lon,lat) = albers.inverse( x, y); [lon,lat] })
        .unwrap_or( centroid);

    FireMetadata {
        name: perimeter.name.clone(),
        start_date: perimeter.start_date,
        centroid,
        label_coords,
        url: None
    }
}

/// vertex of the exterior ring with the largest y coordinate
pub fn northern_corner (poly: &Polygon<f64>)->Option<(f64,f64)> {
    poly.exterior().coords()
        .max_by( |a,b| a.y.total_cmp( &b.y))
        .map( |c| (c.x, c.y))
}
