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

//! store a new snapshot of all current NIFC fire perimeters

use reqwest::Client;
use anyhow::Result;

use ofires_common::{define_cli, check_cli, init_tracing, store::open_store};
use ofires_nifc::NifcConfig;
use ofires_monitor::{load_config, MonitorConfig, download_nifc_perimeters};

define_cli! { ARGS [about="download NIFC perimeters into the object store"] =
    config: String [help="filename of MonitorConfig", long, default_value="monitor.ron"],
    nifc_config: String [help="filename of NifcConfig", long, default_value="nifc.ron"]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: MonitorConfig = load_config( &ARGS.config)?;
    let nifc: NifcConfig = ofires_nifc::load_config( &ARGS.nifc_config)?;
    let store = open_store( &config.store).await?;

    download_nifc_perimeters( &Client::new(), store.as_ref(), &nifc).await?;
    Ok(())
}
