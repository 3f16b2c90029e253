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

//! tile set publishing for fire perimeters, projects and FIRMS detections

use chrono::NaiveDate;
use geojson::FeatureCollection;
use reqwest::Client;
use tracing::{info,warn};

use ofires_common::{albers::AlbersEqualArea, store::ObjectStore};
use ofires_firms::{FirePoint, FirmsConfig, RegionMask, fetch_firms_points, fetch_region_mask, filter_points, mask_points, points_feature_collection};
use ofires_nifc::{load_nifc_asof, perimeters_feature_collection};
use ofires_projects::{ProjectsConfig, list_all_opr_ids, load_project_geometries, projects_feature_collection};
use ofires_tiles::{TilesConfig, publish_tiles};
use crate::errors::Result;

/* #region fire perimeters **********************************************************************/

pub async fn fire_tiles_input (store: &dyn ObjectStore, nifc_bucket: &str, as_of: Option<NaiveDate>, albers: &AlbersEqualArea)->Result<FeatureCollection> {
    let perimeters = load_nifc_asof( store, nifc_bucket, as_of, albers).await?;
    Ok( perimeters_feature_collection( &perimeters) )
}

pub async fn make_fire_tiles (store: &dyn ObjectStore, tiles: &TilesConfig, nifc_bucket: &str, as_of: Option<NaiveDate>, stem: &str, albers: &AlbersEqualArea)->Result<usize> {
    let fc = fire_tiles_input( store, nifc_bucket, as_of, albers).await?;
    Ok( publish_tiles( tiles, store, &fc, stem, false).await? )
}

/* #endregion fire perimeters */

/* #region projects *****************************************************************************/

/// buffered (display) geometries of all projects
pub async fn project_tiles_input (store: &dyn ObjectStore, projects: &ProjectsConfig, albers: &AlbersEqualArea)->Result<FeatureCollection> {
    let prefix = projects.display_prefix();
    let opr_ids = list_all_opr_ids( store, prefix).await?;
    let geoms = load_project_geometries( store, prefix, &opr_ids, projects.max_concurrent, albers).await?;
    Ok( projects_feature_collection( &geoms, projects.buffer_distance, albers) )
}

pub async fn make_project_tiles (store: &dyn ObjectStore, tiles: &TilesConfig, projects: &ProjectsConfig, stem: &str, albers: &AlbersEqualArea)->Result<usize> {
    let fc = project_tiles_input( store, projects, albers).await?;
    Ok( publish_tiles( tiles, store, &fc, stem, false).await? )
}

/* #endregion projects */

/* #region FIRMS ********************************************************************************/

/// confidence filtered detections of all configured sources
pub async fn fetch_filtered_firms_points (client: &Client, firms: &FirmsConfig)->Result<Vec<FirePoint>> {
    let map_key = firms.map_key()?;
    let mut points: Vec<FirePoint> = Vec::new();

    for query in firms.queries()? {
        let source_points = fetch_firms_points( client, &firms.server, &map_key, &query).await?;
        points.extend( filter_points( source_points, &firms.confidence));
    }
    Ok(points)
}

pub fn firms_tiles_input (points: Vec<FirePoint>, mask: &RegionMask)->FeatureCollection {
    let n = points.len();
    let masked = mask_points( points, mask);
    info!("{} of {} detections within region", masked.len(), n);
    points_feature_collection( &masked)
}

/// the FIRMS tile set only holds current detections, hence we replace the previous one
pub async fn make_firms_tiles (client: &Client, store: &dyn ObjectStore, tiles: &TilesConfig, firms: &FirmsConfig, stem: &str)->Result<usize> {
    let points = fetch_filtered_firms_points( client, firms).await?;
    let mask = fetch_region_mask( client, &firms.mask_url, &firms.mask_property, &firms.mask_value).await?;
    let fc = firms_tiles_input( points, &mask);
    Ok( publish_tiles( tiles, store, &fc, stem, true).await? )
}

/* #endregion FIRMS */
