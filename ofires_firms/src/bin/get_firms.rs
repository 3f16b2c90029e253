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

//! download raw FIRMS CSV files for the configured (or explicitly given) sources into the crate data dir

use reqwest::Client;
use anyhow::Result;
use tracing::info;

use ofires_build::pkg_data_dir;
use ofires_common::{define_cli, check_cli, init_tracing, fs::ensure_writable_dir};
use ofires_firms::{load_config, FirmsConfig, FirmsQuery, FirmsSource, download_firms_csv, read_firms_csv, filter_points};

define_cli! { ARGS [about="FIRMS fire detection download tool"] =
    config: String [help="filename of FirmsConfig", long, default_value="firms.ron"],
    source: Option<String> [help="FIRMS source (VIIRS_NOAA20_NRT, MODIS_NRT, VIIRS_SNPP_NRT)", long]
}

#[tokio::main]
async fn main()->Result<()> {
    check_cli!(ARGS);
    ofires_build::set_bin_context!();
    init_tracing();

    let config: FirmsConfig = load_config( &ARGS.config)?;
    let map_key = config.map_key()?;
    let sources: Vec<FirmsSource> = match &ARGS.source {
        Some(s) => vec![ s.parse()? ],
        None => config.sources.clone()
    };

    let data_dir = pkg_data_dir!()?;
    ensure_writable_dir( &data_dir)?;
    let client = Client::new();

    for source in sources {
        let query = FirmsQuery::new( source, config.region, config.day_range)?;
        let path = download_firms_csv( &client, &config.server, &map_key, &query, &data_dir).await?;
        let points = read_firms_csv( &path, Some(source))?;
        let n_retained = filter_points( points.clone(), &config.confidence).len();
        info!("{}: {} detections ({} above confidence threshold) in {:?}", source, points.len(), n_retained, path);
    }

    Ok(())
}
