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

//! burned area statistics of all projects that overlap with current fire perimeters

use chrono::{DateTime, NaiveDate, Utc};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::info;

use ofires_common::{albers::AlbersEqualArea, datetime::utc_now, store::{ObjectStore, put_json}};
use ofires_nifc::{FirePerimeter, load_nifc_asof};
use ofires_projects::{
    InciwebIndex, ProjectFireState, ProjectFires, ProjectsConfig,
    candidate_opr_ids, load_all_project_geometries, load_project_geometry, project_hulls, state_keys, summarize_project_fires
};
use crate::errors::Result;

async fn summarize_candidate (store: &dyn ObjectStore, prefix: &str, opr_id: &str, perimeters: &[FirePerimeter], albers: &AlbersEqualArea)->Result<Option<ProjectFires>> {
    let project = load_project_geometry( store, prefix, opr_id, albers).await?;
    Ok( summarize_project_fires( &project, perimeters, albers) )
}

/// compute the [`ProjectFires`] of all projects burned by the NIFC perimeters as of the given date (latest if None),
/// annotate them with InciWeb links and store the resulting state
pub async fn calculate_project_stats (store: &dyn ObjectStore, projects: &ProjectsConfig, nifc_bucket: &str, state_prefix: &str,
                                      as_of: Option<NaiveDate>, inciweb: &InciwebIndex, albers: &AlbersEqualArea)->Result<ProjectFireState> 
{
    let perimeters = load_nifc_asof( store, nifc_bucket, as_of, albers).await?;
    let all_projects = load_all_project_geometries( store, &projects.combined_key, albers).await?;

    let hulls = project_hulls( &all_projects);
    let candidates = candidate_opr_ids( &perimeters, &hulls);
    info!("{} of {} projects are candidates for {} perimeters", candidates.len(), all_projects.len(), perimeters.len());

    let summaries: Vec<Option<ProjectFires>> = stream::iter( candidates.iter())
        .map( |id| summarize_candidate( store, &projects.raw_prefix, id, &perimeters, albers))
        .buffer_unordered( projects.max_concurrent.max(1))
        .try_collect()
        .await?;

    let mut overlapping: Vec<ProjectFires> = summaries.into_iter().flatten().collect();
    overlapping.sort_by( |a,b| a.opr_id.cmp( &b.opr_id));
    for pf in overlapping.iter_mut() {
        inciweb.annotate( pf);
    }

    let now = utc_now();
    let state = ProjectFireState::new( &now, overlapping);
    write_state( store, state_prefix, as_of, &now, &state).await?;
    Ok(state)
}

/// store state under its date and, if this is not a historic run, also as the current state
pub async fn write_state (store: &dyn ObjectStore, state_prefix: &str, as_of: Option<NaiveDate>, now: &DateTime<Utc>, state: &ProjectFireState)->Result<Vec<String>> {
    let keys = state_keys( state_prefix, as_of, now);
    for key in &keys {
        put_json( store, key, state).await?;
    }
    info!("stored state with {} burned projects to {:?}", state.overlapping_fires.len(), keys);
    Ok(keys)
}
