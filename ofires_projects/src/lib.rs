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

//! offset project geometries.
//!
//! Each project boundary is stored as a GeoJSON object `<raw_prefix>/<opr_id>.json` in geographic
//! coordinates. We keep geometries in both geographic and CONUS Albers coordinates, all area and
//! distance computations use the projected one.

use std::collections::BTreeMap;
use futures::{stream, StreamExt, TryStreamExt};
use geo::{Area, BoundingRect, Buffer, Centroid, ConvexHull, Intersects, MultiPolygon, Point, Polygon, Rect};
use geojson::{FeatureCollection, JsonObject, JsonValue};
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use ofires_common::{
    albers::AlbersEqualArea,
    features::{feature, feature_collection, feature_multi_polygon, multi_polygon_value, parse_feature_collection, str_property},
    store::{self, ObjectStore, join_key, key_stem}
};

pub mod errors;
pub use errors::*;

mod overlap;
pub use overlap::*;

mod inciweb;
pub use inciweb::*;

mod display;
pub use display::*;

ofires_build::define_load_config!{}

pub const SQ_METERS_PER_ACRE: f64 = 4046.86;

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct ProjectsConfig {
    /// prefix of the per-project GeoJSON objects
    pub raw_prefix: String,
    /// optional prefix of simplified per-project geometries used for display products
    pub simplified_prefix: Option<String>,
    /// key of the combined collection of all projects
    pub combined_key: String,
    /// buffer distance in meters for display and tile geometries
    pub buffer_distance: f64,
    pub max_concurrent: usize,
    /// URL or store key of the InciWeb incident index (name -> path)
    pub inciweb_index: Option<String>,
    pub display: DisplayConfig,
}

impl ProjectsConfig {
    pub fn display_prefix (&self)->&str {
        self.simplified_prefix.as_deref().unwrap_or( &self.raw_prefix)
    }
}

/* #region project geometry *********************************************************************/

#[derive(Debug,Clone)]
pub struct ProjectGeometry {
    pub opr_id: String,
    /// lon/lat
    pub geometry: MultiPolygon<f64>,
    /// CONUS Albers (meters)
    pub projected: MultiPolygon<f64>,
}

impl ProjectGeometry {
    pub fn new (opr_id: impl ToString, geometry: MultiPolygon<f64>, albers: &AlbersEqualArea)->Self {
        let projected = albers.project_multi_polygon( &geometry);
        ProjectGeometry { opr_id: opr_id.to_string(), geometry, projected }
    }

    /// combine all polygons of the collection into the project geometry
    pub fn from_feature_collection (opr_id: &str, fc: &FeatureCollection, albers: &AlbersEqualArea)->Result<Self> {
        let polygons: Vec<Polygon<f64>> = fc.features.iter()
            .filter_map( |f| feature_multi_polygon(f))
            .flat_map( |mp| mp.0.into_iter())
            .collect();
        if polygons.is_empty() {
            Err( geometry_error( format!("no polygons for project {opr_id}")))
        } else {
            Ok( ProjectGeometry::new( opr_id, MultiPolygon::new(polygons), albers) )
        }
    }

    /// area in square meters
    pub fn area (&self)->f64 {
        self.projected.unsigned_area()
    }

    pub fn area_acres (&self)->i64 {
        (self.area() / SQ_METERS_PER_ACRE).round() as i64
    }

    /// projected convex hull
    pub fn convex_hull (&self)->Polygon<f64> {
        self.projected.convex_hull()
    }

    /// projected geometry grown by `distance` meters
    pub fn buffered (&self, distance: f64)->MultiPolygon<f64> {
        if distance > 0.0 { self.projected.buffer( distance) } else { self.projected.clone() }
    }

    /// lon/lat of the centroid of the buffered geometry
    pub fn display_centroid (&self, distance: f64, albers: &AlbersEqualArea)->Option<[f64;2]> {
        let c = self.buffered( distance).centroid()?;
        let p = albers.unproject_point( &c);
        Some( [p.x(), p.y()] )
    }
}

/* #endregion project geometry */

/* #region store access *************************************************************************/

/// ids of all projects that have a raw geometry object (`<prefix>/*json`)
pub async fn list_all_opr_ids (store: &dyn ObjectStore, prefix: &str)->Result<Vec<String>> {
    let keys = store::glob( store, &join_key( prefix, "*json")).await?;
    Ok( keys.iter().map( |k| key_stem(k).to_string()).collect() )
}

pub async fn load_project_geometry (store: &dyn ObjectStore, prefix: &str, opr_id: &str, albers: &AlbersEqualArea)->Result<ProjectGeometry> {
    let data = store.get( &join_key( prefix, &format!("{opr_id}.json"))).await?;
    let fc = parse_feature_collection( &data)?;
    ProjectGeometry::from_feature_collection( opr_id, &fc, albers)
}

/// load the given projects with at most `max_concurrent` pending store requests. The result is sorted by opr_id
pub async fn load_project_geometries (store: &dyn ObjectStore, prefix: &str, opr_ids: &[String], max_concurrent: usize, albers: &AlbersEqualArea)->Result<Vec<ProjectGeometry>> {
    let mut projects: Vec<ProjectGeometry> = stream::iter( opr_ids.iter())
        .map( |id| load_project_geometry( store, prefix, id, albers))
        .buffer_unordered( max_concurrent.max(1))
        .try_collect()
        .await?;
    projects.sort_by( |a,b| a.opr_id.cmp( &b.opr_id));
    debug!("loaded {} project geometries from {}", projects.len(), prefix);
    Ok(projects)
}

/// all projects from the combined collection (features with an `opr_id` property)
pub async fn load_all_project_geometries (store: &dyn ObjectStore, combined_key: &str, albers: &AlbersEqualArea)->Result<Vec<ProjectGeometry>> {
    let data = store.get( combined_key).await?;
    let fc = parse_feature_collection( &data)?;

    let mut projects: Vec<ProjectGeometry> = Vec::with_capacity( fc.features.len());
    for f in &fc.features {
        match (str_property( f, &["opr_id"]), feature_multi_polygon(f)) {
            (Some(opr_id), Some(mp)) => projects.push( ProjectGeometry::new( opr_id, mp, albers)),
            _ => warn!("ignoring combined geometry feature without opr_id or polygons")
        }
    }
    info!("loaded {} projects from {}", projects.len(), combined_key);
    Ok(projects)
}

/// GeoJSON collection with an `opr_id` property per project. If `buffer_distance` is > 0 the buffered geometries are used
pub fn projects_feature_collection (projects: &[ProjectGeometry], buffer_distance: f64, albers: &AlbersEqualArea)->FeatureCollection {
    let features = projects.iter().map( |p| {
        let geometry = if buffer_distance > 0.0 {
            albers.unproject_multi_polygon( &p.buffered( buffer_distance))
        } else {
            p.geometry.clone()
        };
        let mut props = JsonObject::new();
        props.insert( "opr_id".to_string(), JsonValue::from( p.opr_id.clone()));
        feature( multi_polygon_value( &geometry), props)
    }).collect();
    feature_collection( features)
}

/// combine all raw project geometries into a single collection stored at `config.combined_key`. Returns the number of projects
pub async fn package_geometries (store: &dyn ObjectStore, config: &ProjectsConfig, albers: &AlbersEqualArea)->Result<usize> {
    let opr_ids = list_all_opr_ids( store, &config.raw_prefix).await?;
    let projects = load_project_geometries( store, &config.raw_prefix, &opr_ids, config.max_concurrent, albers).await?;
    let fc = projects_feature_collection( &projects, 0.0, albers);

    store.put( &config.combined_key, serde_json::to_vec( &fc)?).await?;
    info!("packaged {} project geometries into {}", projects.len(), config.combined_key);
    Ok( projects.len() )
}

/* #endregion store access */

/* #region active fires *************************************************************************/

/// number of active fire points (lon/lat) within each project. Projects without points are not included
pub fn active_fire_counts (projects: &[ProjectGeometry], points: &[Point<f64>])->BTreeMap<String,usize> {
    let mut counts: BTreeMap<String,usize> = BTreeMap::new();
    for project in projects {
        let Some(bbox) = project.geometry.bounding_rect() else { continue };
        let n = points.iter().filter( |p| bbox.intersects(*p) && project.geometry.intersects(*p)).count();
        if n > 0 {
            *counts.entry( project.opr_id.clone()).or_insert(0) += n;
        }
    }
    counts
}

/* #endregion active fires */
