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

//! compute burned area and fraction of all projects overlapping NIFC perimeters and store the project fire state

use reqwest::Client;
use anyhow::{anyhow, Result};
use tracing::{info,warn};

use ofires_common::{define_cli, check_cli, init_tracing, albers::AlbersEqualArea, datetime::parse_date, store::open_store};
use ofires_nifc::NifcConfig;
use ofires_projects::{InciwebIndex, ProjectsConfig};
use ofires_monitor::{load_config, MonitorConfig, calculate_project_stats};

define_cli! { ARGS [about="calculate burned area statistics of projects"] =
    config: String [help="filename of MonitorConfig", long, default_value="monitor.ron"],
    nifc_config: String [help="filename of NifcConfig", long, default_value="nifc.ron"],
    projects_config: String [help="filename of ProjectsConfig", long, default_value="projects.ron"],
    as_of: Option<String> [help="use the latest NIFC snapshot of this date (YYYY-MM-DD)", long]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: MonitorConfig = load_config( &ARGS.config)?;
    let nifc: NifcConfig = ofires_nifc::load_config( &ARGS.nifc_config)?;
    let projects: ProjectsConfig = ofires_projects::load_config( &ARGS.projects_config)?;
    let as_of = ARGS.as_of.as_deref().map( |s| parse_date(s).ok_or_else( || anyhow!("invalid as_of date {s}"))).transpose()?;

    let store = open_store( &config.store).await?;
    let client = Client::new();

    let inciweb = match &projects.inciweb_index {
        Some(location) => match InciwebIndex::load( &client, store.as_ref(), location).await {
            Ok(index) => index,
            Err(e) => { warn!("InciWeb index not available: {e}"); InciwebIndex::default() }
        }
        None => InciwebIndex::default()
    };

    let state = calculate_project_stats( store.as_ref(), &projects, &nifc.upload_to, &config.state_prefix, as_of, &inciweb, &AlbersEqualArea::conus()).await?;
    for pf in &state.overlapping_fires {
        info!("{}: {:.1}% burned by {} fire(s)", pf.opr_id, pf.burned_fraction * 100.0, pf.fires.len());
    }
    Ok(())
}
