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

use thiserror::Error;
use ofires_common::{net::OfiresNetError, store::OfiresStoreError};
use ofires_firms::OfiresFirmsError;
use ofires_nifc::OfiresNifcError;
use ofires_projects::OfiresProjectsError;
use ofires_tiles::OfiresTilesError;

pub type Result<T> = std::result::Result<T, OfiresMonitorError>;

#[derive(Error, Debug)]
pub enum OfiresMonitorError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("store error {0}")]
    StoreError( #[from] OfiresStoreError),

    #[error("net error {0}")]
    NetError( #[from] OfiresNetError),

    #[error("config error {0}")]
    ConfigError( #[from] ofires_build::OfiresBuildError),

    #[error("FIRMS error {0}")]
    FirmsError( #[from] OfiresFirmsError),

    #[error("NIFC error {0}")]
    NifcError( #[from] OfiresNifcError),

    #[error("projects error {0}")]
    ProjectsError( #[from] OfiresProjectsError),

    #[error("tiles error {0}")]
    TilesError( #[from] OfiresTilesError),

    #[error("alert error {0}")]
    AlertError( String ),
}

pub fn alert_error (msg: impl ToString)->OfiresMonitorError {
    OfiresMonitorError::AlertError(msg.to_string())
}
