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

//! wildfire perimeters from the NIFC (WFIGS) interagency perimeter feature service.
//!
//! The service only returns a limited number of features per request, hence we first ask for the
//! record count and then page through the results. Retrieved perimeters are stored as timestamped
//! GeoJSON snapshots so that later workflows can pick the latest snapshot as of a given date.

use chrono::{DateTime, NaiveDate, Utc};
use geo::{BooleanOps, MultiPolygon};
use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{debug,info,warn};

use ofires_common::{
    albers::AlbersEqualArea, datetime,
    features::{feature, feature_collection, feature_multi_polygon, multi_polygon_value, parse_feature_collection, property, str_property},
    net::{get_json, get_response, OfiresNetError},
    store::{self, ObjectStore, join_key}
};

pub mod errors;
pub use errors::*;

ofires_build::define_load_config!{}

pub const SNAPSHOT_SUFFIX: &'static str = "_raw_nifc_perimeters.geojson";

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct NifcConfig {
    /// ArcGIS feature service query URL
    pub endpoint: String,
    /// max number of features per page
    pub request_size: usize,
    /// bucket prefix for snapshots
    pub upload_to: String,
}

/* #region paginated retrieval ******************************************************************/

pub fn count_query_params ()->Vec<(&'static str,String)> {
    vec![
        ("where", "OBJECTID >0".to_string()),
        ("returnCountOnly", "true".to_string()),
        ("f", "pjson".to_string()),
    ]
}

/// result offsets of all pages for a total of `count` records: 1, 1+n, 1+2n, .. < count
/// NOTE - `resultOffset` is 0-based, so the record at offset 0 is never requested (and count==1 yields no pages)
pub fn page_offsets (count: usize, request_size: usize)->Vec<usize> {
    (1..count).step_by( request_size.max(1)).collect()
}

pub fn page_query_params (offset: usize, request_size: usize)->Vec<(&'static str,String)> {
    vec![
        ("f", "geojson".to_string()),
        ("where", "OBJECTID > 0".to_string()),
        ("resultRecordCount", request_size.to_string()),
        ("returnGeometry", "true".to_string()),
        ("outFields", "*".to_string()),
        ("resultOffset", offset.to_string()),
    ]
}

#[derive(Deserialize,Debug)]
struct CountResponse {
    count: Option<usize>,
}

pub async fn fetch_count (client: &Client, config: &NifcConfig)->Result<usize> {
    let resp: CountResponse = get_json( client, &config.endpoint, &count_query_params()).await?;
    resp.count.ok_or_else( || response_error("count query without 'count' field"))
}

async fn fetch_page (client: &Client, config: &NifcConfig, offset: usize)->Result<Vec<Feature>> {
    let query = page_query_params( offset, config.request_size);
    let data = get_response( client, &config.endpoint, &query).await?
        .bytes().await
        .map_err( OfiresNetError::from)?;
    let fc = parse_feature_collection( &data)?;
    debug!("page at offset {} has {} features", offset, fc.features.len());
    Ok( fc.features )
}

/// retrieve all perimeter features of the service as one collection
pub async fn fetch_perimeter_features (client: &Client, config: &NifcConfig)->Result<FeatureCollection> {
    let count = fetch_count( client, config).await?;
    let offsets = page_offsets( count, config.request_size);
    info!("retrieving {} NIFC perimeters in {} pages", count, offsets.len());

    let mut features: Vec<Feature> = Vec::with_capacity( count);
    for offset in offsets {
        features.extend( fetch_page( client, config, offset).await?);
    }
    Ok( feature_collection( features) )
}

/* #endregion paginated retrieval */

/* #region snapshots ****************************************************************************/

pub fn snapshot_key (upload_to: &str, timestamp: &DateTime<Utc>)->String {
    join_key( upload_to, &format!("{}{}", datetime::snapshot_timestamp( timestamp), SNAPSHOT_SUFFIX))
}

/// store perimeter collection as a new snapshot and return its key
pub async fn save_snapshot (store: &dyn ObjectStore, upload_to: &str, fc: &FeatureCollection)->Result<String> {
    let key = snapshot_key( upload_to, &datetime::utc_now());
    let data = serde_json::to_vec( fc)?;
    store.put( &key, data).await?;
    info!("saved {} perimeters to {}/{}", fc.features.len(), store.location(), key);
    Ok(key)
}

/// key of the latest snapshot in `bucket`, optionally restricted to snapshots taken on the `as_of` date
pub async fn get_nifc_key (store: &dyn ObjectStore, bucket: &str, as_of: Option<NaiveDate>)->Result<String> {
    let pattern = match as_of {
        Some(date) => join_key( bucket, &format!("{}*", date.format("%Y-%m-%d"))),
        None => join_key( bucket, "*")
    };

    let keys = store::glob( store, &pattern).await?;
    match keys.last() {
        Some(key) => Ok( key.clone() ),
        None => Err( OfiresNifcError::NotFoundError( format!("No NIFC perimeters in {bucket} for that date")))
    }
}

pub async fn load_nifc_features (store: &dyn ObjectStore, bucket: &str, as_of: Option<NaiveDate>)->Result<FeatureCollection> {
    let key = get_nifc_key( store, bucket, as_of).await?;
    let data = store.get( &key).await?;
    let fc = parse_feature_collection( &data)?;
    info!("loaded {} perimeter features from {}", fc.features.len(), key);
    Ok(fc)
}

pub async fn load_nifc_asof (store: &dyn ObjectStore, bucket: &str, as_of: Option<NaiveDate>, albers: &AlbersEqualArea)->Result<Vec<FirePerimeter>> {
    let fc = load_nifc_features( store, bucket, as_of).await?;
    Ok( perimeters_from_features( &fc, albers) )
}

/* #endregion snapshots */

/* #region perimeters ***************************************************************************/

/// a wildfire perimeter in geographic (lon/lat) and projected (CONUS Albers) coordinates
#[derive(Debug,Clone)]
pub struct FirePerimeter {
    pub irwin_id: String,
    pub name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub geometry: MultiPolygon<f64>,
    pub projected: MultiPolygon<f64>,
}

impl FirePerimeter {
    pub fn new (irwin_id: impl ToString, name: impl ToString, start_date: Option<DateTime<Utc>>, geometry: MultiPolygon<f64>, albers: &AlbersEqualArea)->Self {
        let projected = albers.project_multi_polygon( &geometry);
        FirePerimeter { irwin_id: irwin_id.to_string(), name: name.to_string(), start_date, geometry, projected }
    }

    /// None if the feature has no polygon geometry or no IRWIN id
    pub fn from_feature (f: &Feature, albers: &AlbersEqualArea)->Option<Self> {
        let geometry = feature_multi_polygon( f)?;
        let irwin_id = str_property( f, &["poly_IRWINID", "attr_IrwinID"])?;
        let name = str_property( f, &["poly_IncidentName", "attr_IncidentName"]).unwrap_or_default();
        let start_date = match property( f, &["attr_FireDiscoveryDateTime"]) {
            Some(JsonValue::Number(n)) => n.as_i64().and_then( datetime::from_epoch_millis),
            Some(JsonValue::String(s)) => datetime::parse_as_of( s),
            _ => None
        };
        Some( FirePerimeter::new( irwin_id, name, start_date, geometry, albers) )
    }
}

pub fn perimeters_from_features (fc: &FeatureCollection, albers: &AlbersEqualArea)->Vec<FirePerimeter> {
    let perimeters: Vec<FirePerimeter> = fc.features.iter().filter_map( |f| FirePerimeter::from_feature( f, albers)).collect();
    let n_skipped = fc.features.len() - perimeters.len();
    if n_skipped > 0 {
        warn!("skipped {} perimeter features without polygon geometry or IRWIN id", n_skipped);
    }
    perimeters
}

/// union of the projected perimeter geometries. Overlapping perimeters are only counted once
pub fn union_perimeters<'a,I> (perimeters: I)->MultiPolygon<f64> where I: IntoIterator<Item=&'a FirePerimeter> {
    perimeters.into_iter().fold( MultiPolygon::new( Vec::new()), |acc, p| acc.union( &p.projected))
}

/// GeoJSON collection of perimeters with geographic coordinates, as input for tile generation
pub fn perimeters_feature_collection (perimeters: &[FirePerimeter])->FeatureCollection {
    let features = perimeters.iter().map( |p| {
        let mut props = JsonObject::new();
        props.insert( "poly_IRWINID".to_string(), JsonValue::from( p.irwin_id.clone()));
        props.insert( "poly_IncidentName".to_string(), JsonValue::from( p.name.clone()));
        feature( multi_polygon_value( &p.geometry), props)
    }).collect();
    feature_collection( features)
}

/* #endregion perimeters */
