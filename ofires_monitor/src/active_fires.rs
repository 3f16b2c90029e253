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

use std::collections::BTreeMap;
use geo::Point;
use tracing::info;

use ofires_common::{albers::AlbersEqualArea, store::ObjectStore};
use ofires_projects::{ProjectsConfig, active_fire_counts, load_all_project_geometries};
use crate::{AlertMessenger, errors::Result, send_alerts};

pub fn active_fire_messages (counts: &BTreeMap<String,usize>)->Vec<String> {
    counts.iter().map( |(opr_id,n)| format!("{opr_id} has {n} active fire pixel(s)")).collect()
}

/// alert about projects that contain any of the given active fire points (lon/lat). Returns the sent messages
pub async fn monitor_project_fires (store: &dyn ObjectStore, projects: &ProjectsConfig, points: &[Point<f64>],
                                    albers: &AlbersEqualArea, messengers: &[Box<dyn AlertMessenger>])->Result<Vec<String>>
{
    let all_projects = load_all_project_geometries( store, &projects.combined_key, albers).await?;
    let counts = active_fire_counts( &all_projects, points);

    if counts.is_empty() {
        info!("no active fires within {} projects", all_projects.len());
        return Ok( Vec::new() )
    }

    let msgs = active_fire_messages( &counts);
    send_alerts( messengers, &msgs).await?;
    Ok(msgs)
}
