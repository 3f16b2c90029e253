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

//! the project records shown by the web map

use futures::{stream, StreamExt, TryStreamExt};
use tracing::{info,warn};

use ofires_common::{albers::AlbersEqualArea, store::{ObjectStore, put_json}};
use ofires_projects::{
    DisplayName, DisplayRecord, IssuanceTable, LocationLookup, ProjectsConfig,
    exclude_early_action, geometry_error, load_project_geometry, parse_display_names, parse_issuance
};
use crate::errors::Result;

async fn display_record (store: &dyn ObjectStore, projects: &ProjectsConfig, issuance: &IssuanceTable, dn: &DisplayName,
                         locations: &dyn LocationLookup, albers: &AlbersEqualArea)->Result<Option<DisplayRecord>>
{
    let Some(opr_id) = issuance.opr_id( &dn.arb_id) else {
        warn!("no OPR id for {}, ignored", dn.arb_id);
        return Ok(None)
    };
    let Some(arbocs) = issuance.arbocs_to_date( &dn.arb_id) else {
        warn!("no issuance for {}, ignored", dn.arb_id);
        return Ok(None)
    };

    let project = load_project_geometry( store, &projects.raw_prefix, opr_id, albers).await?;
    let shape = if projects.simplified_prefix.is_some() {
        load_project_geometry( store, projects.display_prefix(), opr_id, albers).await?
    } else {
        project.clone()
    };

    let centroid = shape.display_centroid( projects.buffer_distance, albers)
        .ok_or_else( || geometry_error( format!("no centroid for {opr_id}")))?;
    let location = locations.location_name( centroid[0], centroid[1]).await?;

    Ok( Some( DisplayRecord::new( &project, &dn.name, arbocs, centroid, location)) )
}

/// records for all projects with a display name, in display name order
pub async fn display_records (store: &dyn ObjectStore, projects: &ProjectsConfig, locations: &dyn LocationLookup, albers: &AlbersEqualArea)->Result<Vec<DisplayRecord>> {
    let cfg = &projects.display;
    let names = parse_display_names( &store.get( &cfg.display_names).await?)?;
    let issuance = parse_issuance( &store.get( &cfg.issuance).await?)?;

    let records: Vec<Option<DisplayRecord>> = stream::iter( names.iter())
        .map( |dn| display_record( store, projects, &issuance, dn, locations, albers))
        .buffered( projects.max_concurrent.max(1))
        .try_collect()
        .await?;

    Ok( records.into_iter().flatten().collect() )
}

/// compute display records, drop early action projects and store the result. Returns the stored records
pub async fn generate_display_data (store: &dyn ObjectStore, projects: &ProjectsConfig, locations: &dyn LocationLookup, albers: &AlbersEqualArea)->Result<Vec<DisplayRecord>> {
    let records = display_records( store, projects, locations, albers).await?;
    let records = exclude_early_action( records, &projects.display.early_action_ids);

    put_json( store, &projects.display.output_key, &records).await?;
    info!("stored {} display records to {}", records.len(), projects.display.output_key);
    Ok(records)
}
