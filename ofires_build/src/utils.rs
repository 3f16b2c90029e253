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

use std::{io::Read,path::{Path,PathBuf},fs::File,env};
use crate::errors::Result;
use crate::ROOT_ENV;

pub fn file_contents_as_bytes (path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    let mut contents: Vec<u8> = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// modify path and check if path condition holds. If not revert the path to its previous state
#[macro_export]
macro_rules! path_cond {
    ( $pred:ident, $path_expr:expr, $($e:expr),* ) => {
        {
            let path: &mut PathBuf = $path_expr;
            let n0 = path.components().count();
            $( path.push($e); )*
            if path.$pred() { 
                true
            } else {
                let mut n = path.components().count();
                while n > n0 { path.pop(); n -= 1; }
                false
            }
        }
    }
}

#[macro_export]
macro_rules! has_any_path_cond {
    ($pred:ident, $path_expr:expr, $($e:expr),*) => {
        {
            let path: &mut PathBuf = $path_expr;
            let mut holds = |e| { path.push(e); let res=path.$pred(); path.pop(); res };
            $( holds($e) || )* false
        }
    }
}

/// this is the highest parent from the current dir that still has a Cargo.toml
pub fn get_workspace_dir()->Option<PathBuf> {
    if let Ok(mut path) = env::current_dir() {
        if !path.join("Cargo.toml").is_file() { return None }
        while path_cond!( is_file, &mut path, "..", "Cargo.toml") {
            path.pop(); // Cargo.toml
            path.pop(); // ".."
            if !path.pop() { return None }
        }
        return Some(path)
    }
    None
}

pub fn get_workspace_parent()->Option<PathBuf> {
    get_workspace_dir().map( |mut p| { p.pop(); p})
}

pub fn default_root()->PathBuf {
    let mut path = env::var("HOME").map( PathBuf::from).unwrap_or_else( |_| env::temp_dir());
    path.push( ".ofires");
    path
}

/// get the root dir to use. Lookup is in the following order:
/// 
/// 1. use $OFIRES_ROOT if set
/// 2. workspace parent if it has any of the {cache,data,configs} dirs
/// 3. $HOME/.ofires
pub fn get_root_dir()->PathBuf {
    if let Ok(root) = env::var(ROOT_ENV) {
        PathBuf::from( root)
    } else if let Some(mut path) = get_workspace_parent() {
        if has_any_path_cond!( is_dir, &mut path, "cache", "data", "configs") { path } else { default_root() }
    } else {
        default_root()
    }
}

pub fn is_env_enabled (key: &str)->bool {
    match env::var(key) {
        Ok(v) =>  v == "1" || v == "true" || v == "on",
        _ => false
    }
}
