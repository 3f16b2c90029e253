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

pub type Result<T> = std::result::Result<T, OfiresNifcError>;

#[derive(Error, Debug)]
pub enum OfiresNifcError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("JSON error {0}")]
    JsonError( #[from] serde_json::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("net error {0}")]
    NetError( #[from] OfiresNetError),

    #[error("store error {0}")]
    StoreError( #[from] OfiresStoreError),

    #[error("config error {0}")]
    ConfigError( #[from] ofires_build::OfiresBuildError),

    #[error("{0}")]
    NotFoundError( String ),

    #[error("unexpected response {0}")]
    ResponseError( String ),
}

pub fn response_error (msg: impl ToString)->OfiresNifcError {
    OfiresNifcError::ResponseError(msg.to_string())
}
