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

//! detection confidence. VIIRS products report a level (l/n/h), MODIS products a percentage

use std::{fmt, str::FromStr};
use serde::{Serialize,Deserialize};

#[derive(Debug,Clone,Copy,PartialEq,Eq,PartialOrd,Ord,Hash,Serialize,Deserialize)]
pub enum ConfidenceLevel {
    Low,
    Nominal,
    High
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
#[serde(try_from="String", into="String")]
pub enum Confidence {
    Level(ConfidenceLevel),
    Percent(u8),
}

impl FromStr for Confidence {
    type Err = String;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "l" | "low" => Ok( Confidence::Level(ConfidenceLevel::Low)),
            "n" | "nominal" => Ok( Confidence::Level(ConfidenceLevel::Nominal)),
            "h" | "high" => Ok( Confidence::Level(ConfidenceLevel::High)),
            other => match other.parse::<u8>() {
                Ok(p) if p <= 100 => Ok( Confidence::Percent(p)),
                _ => Err( format!("invalid confidence value '{s}'"))
            }
        }
    }
}

impl TryFrom<String> for Confidence {
    type Error = String;
    fn try_from (s: String)->Result<Self,Self::Error> { s.parse() }
}

impl From<Confidence> for String {
    fn from (c: Confidence)->String { c.to_string() }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Level(ConfidenceLevel::Low) => write!(f, "l"),
            Confidence::Level(ConfidenceLevel::Nominal) => write!(f, "n"),
            Confidence::Level(ConfidenceLevel::High) => write!(f, "h"),
            Confidence::Percent(p) => write!(f, "{p}")
        }
    }
}

/// minimum confidence a detection needs to be retained. Raising either field can only reject more
/// detections, i.e. filtering is monotonic in both
#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct ConfidenceThreshold {
    /// percent confidences have to be strictly greater than this
    pub above_percent: u8,
    /// level confidences have to be at least this
    pub min_level: ConfidenceLevel,
}

impl ConfidenceThreshold {
    pub fn accepts (&self, c: &Confidence)->bool {
        match c {
            Confidence::Level(level) => *level >= self.min_level,
            Confidence::Percent(p) => *p > self.above_percent
        }
    }

    /// true if every detection rejected by `other` is also rejected by self
    pub fn is_at_least_as_strict (&self, other: &ConfidenceThreshold)->bool {
        self.above_percent >= other.above_percent && self.min_level >= other.min_level
    }
}

impl Default for ConfidenceThreshold {
    /// drop MODIS detections at or below 35% and VIIRS detections flagged as low confidence
    fn default()->Self {
        ConfidenceThreshold { above_percent: 35, min_level: ConfidenceLevel::Nominal }
    }
}
