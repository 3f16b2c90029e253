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

//! alert about active fire detections within project boundaries

use reqwest::Client;
use anyhow::Result;

use ofires_common::{define_cli, check_cli, init_tracing, albers::AlbersEqualArea, store::open_store};
use ofires_firms::{FirmsConfig, fetch_active_fires};
use ofires_projects::ProjectsConfig;
use ofires_monitor::{load_config, MonitorConfig, create_messengers, monitor_project_fires};

define_cli! { ARGS [about="send alerts for active fires in projects"] =
    config: String [help="filename of MonitorConfig", long, default_value="monitor.ron"],
    firms_config: String [help="filename of FirmsConfig", long, default_value="firms.ron"],
    projects_config: String [help="filename of ProjectsConfig", long, default_value="projects.ron"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: MonitorConfig = load_config( &ARGS.config)?;
    let firms: FirmsConfig = ofires_firms::load_config( &ARGS.firms_config)?;
    let projects: ProjectsConfig = ofires_projects::load_config( &ARGS.projects_config)?;

    let store = open_store( &config.store).await?;
    let client = Client::new();
    let messengers = create_messengers( &config.alerts, &client);

    let points = fetch_active_fires( &client, &firms.active_fire_url).await?;
    monitor_project_fires( store.as_ref(), &projects, &points, &AlbersEqualArea::conus(), &messengers).await?;
    Ok(())
}
