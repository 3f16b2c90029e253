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

//! publish vector tiles of the (buffered) project boundaries

use anyhow::Result;

use ofires_common::{define_cli, check_cli, init_tracing, albers::AlbersEqualArea, store::open_store};
use ofires_projects::ProjectsConfig;
use ofires_tiles::TilesConfig;
use ofires_monitor::{load_config, MonitorConfig, make_project_tiles};

define_cli! { ARGS [about="make project tiles"] =
    config: String [help="filename of MonitorConfig", long, default_value="monitor.ron"],
    projects_config: String [help="filename of ProjectsConfig", long, default_value="projects.ron"],
    tiles_config: String [help="filename of TilesConfig", long, default_value="tiles.ron"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: MonitorConfig = load_config( &ARGS.config)?;
    let projects: ProjectsConfig = ofires_projects::load_config( &ARGS.projects_config)?;
    let tiles: TilesConfig = ofires_tiles::load_config( &ARGS.tiles_config)?;

    let store = open_store( &config.store).await?;
    make_project_tiles( store.as_ref(), &tiles, &projects, &config.tile_stems.projects, &AlbersEqualArea::conus()).await?;
    Ok(())
}
