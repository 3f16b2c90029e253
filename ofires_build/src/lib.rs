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

//! runtime directory layout and config file lookup for the ofires crates.
//! 
//! Each library crate that has configs expands [`define_load_config`] at the crate level, which gives
//! it a `load_config(filename)` function. Config files are RON and are looked up (in this order) at
//! 
//! 1. `$OFIRES_HOME/configs/<crate>/<filename>`
//! 2. `<workspace-parent>/configs/<crate>/<filename>`
//! 3. `$HOME/.ofires/configs/<crate>/<filename>`
//! 4. `<workspace>/<crate>/configs/<filename>` (the defaults that are kept in the repository)
//! 
//! Bin specific overrides are checked before each of the external locations if the bin set its context
//! with [`set_bin_context`].

use std::{fs, path::{Path,PathBuf}, sync::OnceLock, env};

mod configs;
pub use configs::*;

mod utils;
pub use utils::*;

mod errors;
pub use errors::*;

pub const ROOT_ENV: &'static str = "OFIRES_ROOT";
pub const HOME_ENV: &'static str = "OFIRES_HOME";

/* #region bin globals *******************************************************************/

#[derive(Debug)]
pub struct BinContext {
    pub bin_name: String,
    pub bin_crate: String,
    pub proc_id: u32,
}

impl BinContext {
    /// returns false if the context was already set
    pub fn set (bin_crate: &str, bin_name: &str, proc_id: u32)->bool {
        BIN_CONTEXT.set( Self{ bin_name: bin_name.to_string(), bin_crate: bin_crate.to_string(), proc_id }).is_ok()
    }
}

pub static BIN_CONTEXT: OnceLock<BinContext> = OnceLock::new();

/// this has to be called (once) from the bin source
#[macro_export]
macro_rules! set_bin_context {
    () => {
        {
            ofires_build::BinContext::set( env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), std::process::id());
        }
    }
}

pub fn get_bin_context()->Option<&'static BinContext> {
    BIN_CONTEXT.get()
}

/// this is mostly for tests and tools that load configs from explicit paths
pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> serde::Deserialize<'a>, P: AsRef<Path> {
    let data = file_contents_as_bytes(path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

// the global dirs of the application, which are invariant after init
static ROOT_DIR: OnceLock<PathBuf> = OnceLock::new();

/// the global root dir: `$OFIRES_ROOT`, a workspace parent that has any of the {cache,data,configs} dirs, or `~/.ofires`
pub fn root_dir()->&'static PathBuf {
    ROOT_DIR.get_or_init( || get_root_dir())
}

/// the global data dir: `<root>/data`
pub fn data_dir()->PathBuf {
    root_dir().join("data")
}

/// the global cache dir: `<root>/cache`
pub fn cache_dir()->PathBuf {
    root_dir().join("cache")
}

/// the BinContext derived data dir: `<root>/data/<bin-crate>/<bin-name>`
pub fn bin_data_dir ()->Result<PathBuf> {
    match get_bin_context() {
        Some(ctx) => ensure_dir( data_dir().join( &ctx.bin_crate).join( &ctx.bin_name)),
        None => Err( config_not_found("bin context"))
    }
}

// those need to be compiled in the target crate hence we need macros

/// the crate cache dir of the caller: `<root>/cache/<crate>`, created if it does not exist yet
#[macro_export]
macro_rules! pkg_cache_dir {
    () => {
        ofires_build::ensure_dir( ofires_build::cache_dir().join( env!("CARGO_PKG_NAME")))
    }
}

/// the crate data dir of the caller: `<root>/data/<crate>`, created if it does not exist yet
#[macro_export]
macro_rules! pkg_data_dir {
    () => {
        ofires_build::ensure_dir( ofires_build::data_dir().join( env!("CARGO_PKG_NAME")))
    }
}

pub fn ensure_dir (dir: PathBuf)->Result<PathBuf> {
    if !dir.is_dir() { 
        fs::create_dir_all(&dir)?; 
    }
    Ok(dir)
}

/* #endregion bin globals */

/* #region resource lookup ***************************************************************/

fn find_resource_file (resource_dir: &str, ctx: &Option<&BinContext>, resource_crate: &str, filename: &str) -> Option<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV) {
        let mut path = PathBuf::from( home);
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    // the first dir outside the source repo
    if let Some(mut path) = get_workspace_parent() {
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    if let Ok(usr_home) = env::var("HOME") {
        let mut path = PathBuf::from( usr_home);
        path.push(".ofires");
        if find_external_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    if let Some(mut path) = get_workspace_dir() {
        if find_internal_resource( &mut path, resource_dir, ctx, resource_crate, filename) { return Some(path) }
    }

    None
}

fn find_external_resource (path: &mut PathBuf, resource_dir: &str, bin_ctx: &Option<&BinContext>, resource_crate: &str, filename: &str)->bool {
    if let Some(ctx) = bin_ctx {
        let bin_crate = ctx.bin_crate.as_str();
        let bin_name = ctx.bin_name.as_str();
        if path_cond!( is_file, path, resource_dir, bin_crate, bin_name, resource_crate, filename) { return true }
    }

    path_cond!( is_file, path, resource_dir, resource_crate, filename)
}

fn find_internal_resource (path: &mut PathBuf, resource_dir: &str, bin_ctx: &Option<&BinContext>, resource_crate: &str, filename: &str)->bool {
    if let Some(ctx) = bin_ctx {
        let bin_crate = ctx.bin_crate.as_str();
        let bin_name = ctx.bin_name.as_str();
        if path_cond!( is_file, path, bin_crate, resource_dir, bin_name, resource_crate, filename) { return true }
    }

    path_cond!( is_file, path, resource_crate, resource_dir, filename)
}

/* #endregion resource lookup */
