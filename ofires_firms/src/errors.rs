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
use ofires_common::net::OfiresNetError;

pub type Result<T> = std::result::Result<T, OfiresFirmsError>;

#[derive(Error, Debug)]
pub enum OfiresFirmsError {
    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("GeoJSON error {0}")]
    GeoJsonError( #[from] geojson::Error),

    #[error("net error {0}")]
    NetError( #[from] OfiresNetError),

    #[error("config error {0}")]
    ConfigError( #[from] ofires_build::OfiresBuildError),

    #[error("Invalid source {0}; must be one of {1}")]
    InvalidSourceError( String, String ),

    #[error("Invalid query {0}")]
    InvalidQueryError( String ),

    #[error("no FIRMS map key (set map_key in config or FIRMS_MAP_KEY env var)")]
    MissingMapKeyError,

    #[error("Mask error {0}")]
    MaskError( String ),
}

pub fn invalid_query (msg: impl ToString)->OfiresFirmsError {
    OfiresFirmsError::InvalidQueryError(msg.to_string())
}

pub fn mask_error (msg: impl ToString)->OfiresFirmsError {
    OfiresFirmsError::MaskError(msg.to_string())
}
