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

//! download the current NIFC perimeters into a snapshot below the crate data dir and report the latest snapshot

use reqwest::Client;
use anyhow::Result;
use tracing::info;

use ofires_build::pkg_data_dir;
use ofires_common::{define_cli, check_cli, init_tracing, albers::AlbersEqualArea, store::LocalStore};
use ofires_nifc::{load_config, NifcConfig, fetch_perimeter_features, save_snapshot, load_nifc_asof};

define_cli! { ARGS [about="NIFC perimeter download tool"] =
    config: String [help="filename of NifcConfig", long, default_value="nifc.ron"],
    dry_run: bool [help="only report the record count", long]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: NifcConfig = load_config( &ARGS.config)?;
    let client = Client::new();

    if ARGS.dry_run {
        let count = ofires_nifc::fetch_count( &client, &config).await?;
        info!("{} perimeters available from {}", count, config.endpoint);
        return Ok(())
    }

    let store = LocalStore::new( pkg_data_dir!()?)?;
    let fc = fetch_perimeter_features( &client, &config).await?;
    let key = save_snapshot( &store, "", &fc).await?;

    let perimeters = load_nifc_asof( &store, "", None, &AlbersEqualArea::conus()).await?;
    info!("latest snapshot {} has {} usable perimeters", key, perimeters.len());

    Ok(())
}
