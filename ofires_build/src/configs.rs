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

use std::path::PathBuf;
use crate::*;

pub const CONFIGS: &'static str = "configs";

pub fn find_config_file (ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    // explicit paths are used as is
    let path = PathBuf::from( filename);
    if path.is_absolute() && path.is_file() { return Some(path) }

    find_resource_file( CONFIGS, ctx, resource_crate, filename)
}

/// this is the macro that needs to be expanded at the top of crates (lib.rs) that define configs.
/// Config users call the defined `load_config(..)` function to instantiate config structs
#[macro_export]
macro_rules! define_load_config {
    () => {
        mod configs {
            /// load config using the ofires_build lookup mechanism
            pub fn load_config<C> (filename: &str) -> ofires_build::Result<C> where C: for <'a> serde::Deserialize<'a> {
                let bin_ctx = ofires_build::BIN_CONTEXT.get();
                let resource_crate = env!("CARGO_PKG_NAME");

                if let Some(path) = ofires_build::find_config_file( &bin_ctx, resource_crate, filename) {
                    let data = ofires_build::file_contents_as_bytes(&path)?;
                    return Ok( ron::de::from_bytes( data.as_slice())? )
                }

                Err( ofires_build::config_not_found( filename) )
            }
        }
        pub use configs::*; // make load_config() visible at the crate level
    }
}
