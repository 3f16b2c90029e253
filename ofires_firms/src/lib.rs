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

//! retrieval and processing of near-real-time fire detections from NASA FIRMS (VIIRS and MODIS)

use std::{env, fmt, path::{Path,PathBuf}, str::FromStr};
use chrono::{DateTime, NaiveDate, Utc};
use geo::Point;
use geojson::{FeatureCollection, JsonObject, JsonValue};
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::{debug,info};

use ofires_common::{BoundingBox, datetime, features::{feature, feature_collection, point_value}, fs::write_file_atomic, net::get_text};

pub mod errors;
pub use errors::*;

mod confidence;
pub use confidence::*;

mod mask;
pub use mask::*;

ofires_build::define_load_config!{}

pub const MAP_KEY_ENV: &'static str = "FIRMS_MAP_KEY";

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct FirmsConfig {
    pub server: String,
    /// if not set we use the FIRMS_MAP_KEY env var
    pub map_key: Option<String>,
    pub region: BoundingBox,
    pub day_range: u32,
    pub sources: Vec<FirmsSource>,
    #[serde(default)]
    pub confidence: ConfidenceThreshold,
    /// GeoJSON with country polygons (Natural Earth admin 0)
    pub mask_url: String,
    pub mask_property: String,
    pub mask_value: String,
    /// 24h active fire CSV used for project monitoring
    pub active_fire_url: String,
}

impl FirmsConfig {
    pub fn map_key (&self)->Result<String> {
        if let Some(key) = &self.map_key {
            if !key.is_empty() { return Ok(key.clone()) }
        }
        env::var(MAP_KEY_ENV).map_err( |_| OfiresFirmsError::MissingMapKeyError)
    }

    pub fn queries (&self)->Result<Vec<FirmsQuery>> {
        self.sources.iter().map( |src| FirmsQuery::new( *src, self.region, self.day_range)).collect()
    }
}

/* #region sources and queries ******************************************************************/

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from="String", into="String")]
pub enum FirmsSource {
    ViirsNoaa20Nrt,
    ModisNrt,
    ViirsSnppNrt,
}

impl FirmsSource {
    pub const ALL: [FirmsSource;3] = [FirmsSource::ViirsNoaa20Nrt, FirmsSource::ModisNrt, FirmsSource::ViirsSnppNrt];

    pub fn as_str (&self)->&'static str {
        match self {
            FirmsSource::ViirsNoaa20Nrt => "VIIRS_NOAA20_NRT",
            FirmsSource::ModisNrt => "MODIS_NRT",
            FirmsSource::ViirsSnppNrt => "VIIRS_SNPP_NRT",
        }
    }
}

impl FromStr for FirmsSource {
    type Err = OfiresFirmsError;

    fn from_str (s: &str)->Result<Self> {
        match FirmsSource::ALL.iter().find( |src| src.as_str() == s) {
            Some(src) => Ok(*src),
            None => {
                let valid = FirmsSource::ALL.iter().map( |src| src.as_str()).collect::<Vec<&str>>().join(", ");
                Err( OfiresFirmsError::InvalidSourceError( s.to_string(), valid))
            }
        }
    }
}

impl TryFrom<String> for FirmsSource {
    type Error = OfiresFirmsError;
    fn try_from (s: String)->Result<Self> { s.parse() }
}

impl From<FirmsSource> for String {
    fn from (src: FirmsSource)->String { src.as_str().to_string() }
}

impl fmt::Display for FirmsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!( f, "{}", self.as_str())
    }
}

pub const MAX_DAY_RANGE: u32 = 10;

/// a FIRMS area query
#[derive(Debug,Clone,PartialEq)]
pub struct FirmsQuery {
    pub source: FirmsSource,
    pub bounds: BoundingBox,
    pub day_range: u32,
}

impl FirmsQuery {
    pub fn new (source: FirmsSource, bounds: BoundingBox, day_range: u32)->Result<Self> {
        if day_range == 0 || day_range > MAX_DAY_RANGE {
            return Err( invalid_query( format!("day range {day_range} not in [1..{MAX_DAY_RANGE}]")))
        }
        if bounds.west >= bounds.east || bounds.south >= bounds.north {
            return Err( invalid_query( format!("empty bounds {:?}", bounds)))
        }
        Ok( FirmsQuery { source, bounds, day_range } )
    }

    /// `{server}/usfs/api/area/csv/{map_key}/{source}/{w},{s},{e},{n}/{day_range}/`
    pub fn url (&self, server: &str, map_key: &str)->String {
        format!("{}/usfs/api/area/csv/{}/{}/{}/{}/", server.trim_end_matches('/'), map_key, self.source, self.bounds.to_query_string(), self.day_range)
    }
}

/* #endregion sources and queries */

/* #region fire points **************************************************************************/

/// a single FIRMS detection. Field names follow the CSV columns of VIIRS products, MODIS columns are aliased
#[derive(Serialize,Deserialize,Debug,Clone)]
pub struct FirePoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(alias="brightness", default)] pub bright_ti4: Option<f64>,
    #[serde(default)] pub scan: Option<f64>,
    #[serde(default)] pub track: Option<f64>,
    pub acq_date: NaiveDate,
    pub acq_time: u32, // hhmm
    #[serde(default)] pub satellite: String,
    #[serde(default)] pub instrument: String,
    pub confidence: Confidence,
    #[serde(default)] pub version: Option<String>,
    #[serde(alias="bright_t31", default)] pub bright_ti5: Option<f64>,
    pub frp: f64,
    #[serde(default)] pub daynight: Option<String>,

    #[serde(skip)] pub source: Option<FirmsSource>,
}

impl FirePoint {
    pub fn acq_datetime (&self)->Option<DateTime<Utc>> {
        datetime::parse_acq_datetime( &self.acq_date.format("%Y-%m-%d").to_string(), self.acq_time)
    }

    pub fn point (&self)->Point<f64> {
        Point::new( self.longitude, self.latitude)
    }
}

/// parse FIRMS CSV data. Each point is tagged with the given source
pub fn parse_firms_csv (data: &[u8], source: Option<FirmsSource>)->Result<Vec<FirePoint>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
    let mut points: Vec<FirePoint> = Vec::new();
    for result in rdr.deserialize() {
        let mut p: FirePoint = result?;
        p.source = source;
        points.push(p);
    }
    Ok(points)
}

pub fn read_firms_csv (path: impl AsRef<Path>, source: Option<FirmsSource>)->Result<Vec<FirePoint>> {
    let data = std::fs::read( path)?;
    parse_firms_csv( &data, source)
}

/// retrieve the detections for the given query
pub async fn fetch_firms_points (client: &Client, server: &str, map_key: &str, query: &FirmsQuery)->Result<Vec<FirePoint>> {
    let text = get_text( client, &query.url(server, map_key), &[]).await?;
    let points = parse_firms_csv( text.as_bytes(), Some(query.source))?;
    info!("retrieved {} {} detections", points.len(), query.source);
    Ok(points)
}

/// download raw CSV for the given query into `dir` and return its path. The file only becomes visible once it is complete
pub async fn download_firms_csv (client: &Client, server: &str, map_key: &str, query: &FirmsQuery, dir: impl AsRef<Path>)->Result<PathBuf> {
    let text = get_text( client, &query.url(server, map_key), &[]).await?;
    let path = dir.as_ref().join( format!("{}_{}.csv", query.source, Utc::now().format("%Y-%m-%d_%H-%M-%S")));
    write_file_atomic( &path, text.as_bytes())?;
    Ok(path)
}

pub fn filter_points (points: Vec<FirePoint>, threshold: &ConfidenceThreshold)->Vec<FirePoint> {
    let n = points.len();
    let filtered: Vec<FirePoint> = points.into_iter().filter( |p| threshold.accepts( &p.confidence)).collect();
    debug!("confidence filter kept {} of {} points", filtered.len(), n);
    filtered
}

/// GeoJSON point features with the `frp` property, as input for tile generation
pub fn points_feature_collection (points: &[FirePoint])->FeatureCollection {
    let features = points.iter().map( |p| {
        let mut props = JsonObject::new();
        props.insert( "frp".to_string(), JsonValue::from( p.frp));
        feature( point_value( &p.point()), props)
    }).collect();
    feature_collection( features)
}

/* #endregion fire points */

/* #region active fires *************************************************************************/

#[derive(Deserialize,Debug)]
struct ActiveFireRecord {
    latitude: f64,
    longitude: f64,
}

/// locations (lon,lat) of the detections in a plain FIRMS active fire CSV
pub fn parse_active_fires (data: &[u8])->Result<Vec<Point<f64>>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
    let mut points: Vec<Point<f64>> = Vec::new();
    for result in rdr.deserialize() {
        let rec: ActiveFireRecord = result?;
        points.push( Point::new( rec.longitude, rec.latitude));
    }
    Ok(points)
}

pub async fn fetch_active_fires (client: &Client, url: &str)->Result<Vec<Point<f64>>> {
    let text = get_text( client, url, &[]).await?;
    let points = parse_active_fires( text.as_bytes())?;
    info!("retrieved {} active fire detections", points.len());
    Ok(points)
}

/* #endregion active fires */
