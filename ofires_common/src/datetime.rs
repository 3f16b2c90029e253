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

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Serializer,Deserialize,Deserializer};
use std::time::Duration;

#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }

#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

pub fn from_epoch_millis (millis: i64)->Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}

/// the date part we use in snapshot and state file names ("2024-08-21")
pub fn date_string (dt: &DateTime<Utc>)->String {
    dt.format("%Y-%m-%d").to_string()
}

/// timestamp used as prefix of snapshot object names. It sorts lexically in time order and starts with
/// the [`date_string`] so that snapshots of a given day can be selected by prefix
pub fn snapshot_timestamp (dt: &DateTime<Utc>)->String {
    dt.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

pub fn parse_date (s: &str)->Option<NaiveDate> {
    NaiveDate::parse_from_str( s.trim(), "%Y-%m-%d").ok()
}

/// parse either a plain date ("2024-08-21", interpreted as start of the UTC day) or a RFC3339 date time
pub fn parse_as_of (s: &str)->Option<DateTime<Utc>> {
    if let Some(nd) = parse_date(s) {
        Some( nd.and_time( NaiveTime::MIN).and_utc())
    } else {
        DateTime::parse_from_rfc3339( s.trim()).ok().map( |dt| dt.to_utc())
    }
}

/// FIRMS acquisition date and "hhmm" time
pub fn parse_acq_datetime (date: &str, hhmm: u32)->Option<DateTime<Utc>> {
    let nd = parse_date(date)?;
    let nt = NaiveTime::from_hms_opt( hhmm / 100, hhmm % 100, 0)?;
    Some( nd.and_time(nt).and_utc())
}

//--- serde support

pub fn ser_short_rfc3339_option<S: Serializer> (opt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>  {
    match opt {
        Some(dt) => s.serialize_str( &dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        None => s.serialize_none()
    }
}

/// accepts epoch millis (as ArcGIS services report dates), date time strings or null
pub fn de_flexible_datetime_option <'a,D>(deserializer: D) -> Result<Option<DateTime<Utc>>,D::Error> where D: Deserializer<'a> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr { Millis(i64), Text(String) }

    Ok( match Option::<Repr>::deserialize(deserializer)? {
        Some(Repr::Millis(millis)) => from_epoch_millis(millis),
        Some(Repr::Text(s)) => parse_as_of(&s),
        None => None
    })
}
