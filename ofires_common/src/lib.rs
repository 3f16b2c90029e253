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
#![allow(unused,uncommon_codepoints)]

use serde::{Serialize,Deserialize};
use tracing_subscriber::EnvFilter;

pub mod macros;
pub mod fs;
pub mod datetime;
pub mod strings;
pub mod net;
pub mod slack;
pub mod process;
pub mod store;
pub mod albers;
pub mod features;

#[cfg(feature="s3")]
pub mod s3;

// a global fn that can be used with serde(skip_serializing_if="ofires_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// install the global tracing subscriber for binaries. Filtering is controlled by `RUST_LOG`
/// and defaults to `info`. Calling this more than once is a no-op
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter( filter)
        .with_target(false)
        .try_init();
}

/// geographic bounding box in decimal degrees
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox{ west, south, east, north }
    }

    /// the "w,s,e,n" form used by area queries of web services
    pub fn to_query_string (&self)->String {
        format!("{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}
