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

//! publish vector tiles of the NIFC perimeters

use anyhow::{anyhow, Result};

use ofires_common::{define_cli, check_cli, init_tracing, albers::AlbersEqualArea, datetime::parse_date, store::open_store};
use ofires_nifc::NifcConfig;
use ofires_tiles::TilesConfig;
use ofires_monitor::{load_config, MonitorConfig, make_fire_tiles};

define_cli! { ARGS [about="make NIFC perimeter tiles"] =
    config: String [help="filename of MonitorConfig", long, default_value="monitor.ron"],
    nifc_config: String [help="filename of NifcConfig", long, default_value="nifc.ron"],
    tiles_config: String [help="filename of TilesConfig", long, default_value="tiles.ron"],
    stem: Option<String> [help="name of the tile set (default from MonitorConfig)", long],
    as_of: Option<String> [help="use the latest NIFC snapshot of this date (YYYY-MM-DD)", long]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: MonitorConfig = load_config( &ARGS.config)?;
    let nifc: NifcConfig = ofires_nifc::load_config( &ARGS.nifc_config)?;
    let tiles: TilesConfig = ofires_tiles::load_config( &ARGS.tiles_config)?;
    let stem = ARGS.stem.clone().unwrap_or( config.tile_stems.nifc.clone());
    let as_of = ARGS.as_of.as_deref().map( |s| parse_date(s).ok_or_else( || anyhow!("invalid as_of date {s}"))).transpose()?;

    let store = open_store( &config.store).await?;
    make_fire_tiles( store.as_ref(), &tiles, &nifc.upload_to, as_of, &stem, &AlbersEqualArea::conus()).await?;
    Ok(())
}
