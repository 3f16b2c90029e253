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

//! links to InciWeb incident pages, matched by fuzzy fire name comparison

use std::collections::BTreeMap;
use reqwest::Client;
use tracing::{debug,info};

use ofires_common::{net::get_json, store::{ObjectStore, get_json as get_stored_json}, strings::best_match};
use crate::{ProjectFires, errors::Result};

pub const INCIWEB_BASE_URL: &'static str = "https://inciweb.nwcg.gov";
pub const MATCH_SCORE_CUTOFF: u8 = 90;

/// incident name -> page path
#[derive(Debug,Clone,Default)]
pub struct InciwebIndex {
    paths: BTreeMap<String,String>,
}

impl InciwebIndex {
    pub fn new (paths: BTreeMap<String,String>)->Self {
        InciwebIndex { paths }
    }

    /// load from a http(s) URL or, for anything else, an object store key
    pub async fn load (client: &Client, store: &dyn ObjectStore, location: &str)->Result<Self> {
        let paths: BTreeMap<String,String> = if location.starts_with("http://") || location.starts_with("https://") {
            get_json( client, location, &[]).await?
        } else {
            get_stored_json( store, location).await?
        };
        info!("loaded {} InciWeb incidents from {}", paths.len(), location);
        Ok( InciwebIndex { paths } )
    }

    pub fn len (&self)->usize { self.paths.len() }

    pub fn is_empty (&self)->bool { self.paths.is_empty() }

    /// page URL of the best matching incident with a score of at least [`MATCH_SCORE_CUTOFF`]
    pub fn url_for (&self, fire_name: &str)->Option<String> {
        let (name,score) = best_match( fire_name, self.paths.keys().map( |k| k.as_str()), MATCH_SCORE_CUTOFF)?;
        debug!("matched fire '{}' with incident '{}' ({})", fire_name, name, score);
        self.paths.get(name).map( |path| format!("{INCIWEB_BASE_URL}{path}"))
    }

    /// set (or reset) the url of all fires of a project
    pub fn annotate (&self, project_fires: &mut ProjectFires) {
        for fire in project_fires.fires.values_mut() {
            fire.url = self.url_for( &fire.name);
        }
    }
}
