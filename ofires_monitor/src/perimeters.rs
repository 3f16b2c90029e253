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

use reqwest::Client;
use tracing::info;

use ofires_common::store::ObjectStore;
use ofires_nifc::{NifcConfig, fetch_perimeter_features, save_snapshot};
use crate::errors::Result;

/// count -> paginate -> fetch -> save snapshot. Returns the key of the new snapshot
pub async fn download_nifc_perimeters (client: &Client, store: &dyn ObjectStore, config: &NifcConfig)->Result<String> {
    let fc = fetch_perimeter_features( client, config).await?;
    let key = save_snapshot( store, &config.upload_to, &fc).await?;
    info!("NIFC snapshot {} saved", key);
    Ok(key)
}
