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

//! the monitoring workflows. Each workflow is a plain async function over an object store and the
//! configs of the crates it uses, the binaries in `src/bin` only load configs and call them

use serde::{Serialize,Deserialize};

use ofires_common::store::StoreConfig;

pub mod errors;
pub use errors::*;

pub mod alert;
pub use alert::*;

mod perimeters;
pub use perimeters::*;

mod project_stats;
pub use project_stats::*;

mod active_fires;
pub use active_fires::*;

mod tiles;
pub use tiles::*;

mod display_data;
pub use display_data::*;

ofires_build::define_load_config!{}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct MonitorConfig {
    pub store: StoreConfig,
    /// prefix of project fire state objects
    pub state_prefix: String,
    pub tile_stems: TileStems,
    #[serde(default)]
    pub alerts: AlertConfig,
}

/// names of the published tile sets below the tile bucket
#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct TileStems {
    pub nifc: String,
    pub projects: String,
    pub firms: String,
}
