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

//! display records for the project map (name, issued credits, area, centroid and location)

use std::collections::{BTreeMap,HashSet};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize,Deserialize};
use tracing::debug;

use ofires_common::{datetime::secs, net::get_json_with_retry};
use crate::{ProjectGeometry, errors::{Result, location_error}};

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct DisplayConfig {
    /// store key of the JSON list of `{arb_id,name}` display names
    pub display_names: String,
    /// store key of the issuance CSV (`arb_id,opr_id,allocation`)
    pub issuance: String,
    /// early action projects are not shown
    pub early_action_ids: Vec<String>,
    pub geocoder_url: String,
    pub geocoder_retries: usize,
    /// seconds
    pub geocoder_retry_delay: u64,
    pub output_key: String,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DisplayName {
    pub arb_id: String,
    pub name: String,
}

pub fn parse_display_names (data: &[u8])->Result<Vec<DisplayName>> {
    Ok( serde_json::from_slice( data)? )
}

#[derive(Deserialize,Debug)]
struct IssuanceRecord {
    arb_id: String,
    opr_id: String,
    #[serde(default)]
    allocation: Option<f64>,
}

/// issued credits (ARBOCs) per ARB id and the ARB id -> OPR id map
#[derive(Debug,Clone,Default)]
pub struct IssuanceTable {
    pub arbocs: BTreeMap<String,f64>,
    pub opr_ids: BTreeMap<String,String>,
}

impl IssuanceTable {
    pub fn arbocs_to_date (&self, arb_id: &str)->Option<i64> {
        self.arbocs.get( arb_id).map( |a| *a as i64)
    }

    pub fn opr_id (&self, arb_id: &str)->Option<&str> {
        self.opr_ids.get( arb_id).map( |s| s.as_str())
    }
}

/// allocations are summed per ARB id. Rows without allocation still contribute their id mapping
pub fn parse_issuance (data: &[u8])->Result<IssuanceTable> {
    let mut table = IssuanceTable::default();
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
    for result in rdr.deserialize() {
        let rec: IssuanceRecord = result?;
        *table.arbocs.entry( rec.arb_id.clone()).or_insert(0.0) += rec.allocation.unwrap_or(0.0);
        table.opr_ids.insert( rec.arb_id, rec.opr_id);
    }
    Ok(table)
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct DisplayRecord {
    pub id: String,
    pub opr_id: String,
    pub name: String,
    pub arbocs: i64,
    /// acres
    pub area: i64,
    /// lon/lat
    pub shape_centroid: [f64;2],
    pub location: String,
}

impl DisplayRecord {
    pub fn new (project: &ProjectGeometry, name: impl ToString, arbocs: i64, shape_centroid: [f64;2], location: impl ToString)->Self {
        DisplayRecord {
            id: project.opr_id.clone(),
            opr_id: project.opr_id.clone(),
            name: name.to_string(),
            arbocs,
            area: project.area_acres(),
            shape_centroid,
            location: location.to_string(),
        }
    }
}

pub fn exclude_early_action (records: Vec<DisplayRecord>, early_action_ids: &[String])->Vec<DisplayRecord> {
    let excluded: HashSet<&str> = early_action_ids.iter().map( |s| s.as_str()).collect();
    records.into_iter().filter( |r| !excluded.contains( r.opr_id.as_str())).collect()
}

/* #region location names ***********************************************************************/

#[derive(Deserialize,Debug)]
struct GeocoderResponse {
    result: GeocoderResult,
}

#[derive(Deserialize,Debug)]
struct GeocoderResult {
    geographies: Geographies,
}

#[derive(Deserialize,Debug)]
struct Geographies {
    #[serde(rename="Counties", default)]
    counties: Vec<NamedGeography>,
    #[serde(rename="States", default)]
    states: Vec<NamedGeography>,
}

#[derive(Deserialize,Debug)]
struct NamedGeography {
    #[serde(rename="NAME")]
    name: String,
}

pub fn geocoder_query (lon: f64, lat: f64)->Vec<(&'static str,String)> {
    vec![
        ("x", lon.to_string()),
        ("y", lat.to_string()),
        ("benchmark", "Public_AR_Current".to_string()),
        ("vintage", "Current_Current".to_string()),
        ("format", "json".to_string()),
    ]
}

/// "<county>, <state abbreviation>" from a census geocoder JSON response
pub fn parse_location_name (data: &[u8])->Result<String> {
    let resp: GeocoderResponse = serde_json::from_slice( data)?;
    location_of( &resp)
}

fn location_of (resp: &GeocoderResponse)->Result<String> {
    let geo = &resp.result.geographies;
    let county = geo.counties.first().ok_or_else( || location_error("no county"))?;
    let state = geo.states.first().ok_or_else( || location_error("no state"))?;
    let abbrev = state_abbrev( &state.name).ok_or_else( || location_error( format!("unknown state {}", state.name)))?;
    Ok( format!("{}, {}", county.name, abbrev) )
}

/// reverse geocoding of project centroids
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn location_name (&self, lon: f64, lat: f64)->Result<String>;
}

/// US Census Bureau geocoder, retried `geocoder_retries` times
pub struct CensusGeocoder {
    client: Client,
    url: String,
    retries: usize,
    retry_delay: u64,
}

impl CensusGeocoder {
    pub fn new (client: Client, config: &DisplayConfig)->Self {
        CensusGeocoder { client, url: config.geocoder_url.clone(), retries: config.geocoder_retries, retry_delay: config.geocoder_retry_delay }
    }
}

#[async_trait]
impl LocationLookup for CensusGeocoder {
    async fn location_name (&self, lon: f64, lat: f64)->Result<String> {
        let resp: GeocoderResponse = get_json_with_retry( &self.client, &self.url, &geocoder_query( lon, lat), self.retries, secs( self.retry_delay)).await?;
        let name = location_of( &resp)?;
        debug!("location of {},{}: {}", lon, lat, name);
        Ok(name)
    }
}

pub fn state_abbrev (name: &str)->Option<&'static str> {
    let abbrev = match name {
        "Alabama" => "AL",
        "Alaska" => "AK",
        "American Samoa" => "AS",
        "Arizona" => "AZ",
        "Arkansas" => "AR",
        "California" => "CA",
        "Colorado" => "CO",
        "Connecticut" => "CT",
        "Delaware" => "DE",
        "District of Columbia" => "DC",
        "Florida" => "FL",
        "Georgia" => "GA",
        "Guam" => "GU",
        "Hawaii" => "HI",
        "Idaho" => "ID",
        "Illinois" => "IL",
        "Indiana" => "IN",
        "Iowa" => "IA",
        "Kansas" => "KS",
        "Kentucky" => "KY",
        "Louisiana" => "LA",
        "Maine" => "ME",
        "Maryland" => "MD",
        "Massachusetts" => "MA",
        "Michigan" => "MI",
        "Minnesota" => "MN",
        "Mississippi" => "MS",
        "Missouri" => "MO",
        "Montana" => "MT",
        "Nebraska" => "NE",
        "Nevada" => "NV",
        "New Hampshire" => "NH",
        "New Jersey" => "NJ",
        "New Mexico" => "NM",
        "New York" => "NY",
        "North Carolina" => "NC",
        "North Dakota" => "ND",
        "Northern Mariana Islands" => "MP",
        "Ohio" => "OH",
        "Oklahoma" => "OK",
        "Oregon" => "OR",
        "Pennsylvania" => "PA",
        "Puerto Rico" => "PR",
        "Rhode Island" => "RI",
        "South Carolina" => "SC",
        "South Dakota" => "SD",
        "Tennessee" => "TN",
        "Texas" => "TX",
        "Utah" => "UT",
        "Vermont" => "VT",
        "Virgin Islands" => "VI",
        "Virginia" => "VA",
        "Washington" => "WA",
        "West Virginia" => "WV",
        "Wisconsin" => "WI",
        "Wyoming" => "WY",
        _ => return None
    };
    Some(abbrev)
}

/* #endregion location names */
