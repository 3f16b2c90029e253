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

use std::fs::{self,DirEntry,File};
use std::io::{self,Write,ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn ensure_writable_dir (path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_dir(path)?;

    let md = fs::metadata(path)?;
    if md.permissions().readonly() {
        Err( io_error!(ErrorKind::PermissionDenied, "output dir {:?} not writable", path))
    } else {
        Ok(())
    }
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().to_string()
}

/// write contents to a temporary sibling file and rename it once it is complete so that readers
/// never see partial files
pub fn write_file_atomic (path: impl AsRef<Path>, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let fname = filename(&path).ok_or( io_error!(ErrorKind::InvalidInput, "not a file path {:?}", path))?;
    let tmp_path = path.with_file_name( format!(".{fname}.tmp"));

    let mut file = File::create(&tmp_path)?;
    file.write_all(contents)?;
    file.flush()?;
    fs::rename( &tmp_path, path)
}

pub fn visit_dirs (dir: &Path, recursive: bool, cb: &mut dyn FnMut(&DirEntry)) -> Result<()> {
    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                if recursive { visit_dirs(&path, recursive, cb)?; }
            } else {
                cb(&entry);
            }
        }
    }
    Ok(())
}

/// all files (recursively) below `dir`, sorted
pub fn files_in_dir (dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() { return Err( io_error!(ErrorKind::NotFound, "dir {:?}", dir)) }

    let mut list: Vec<PathBuf> = Vec::new();
    visit_dirs( dir, true, &mut |e| list.push( e.path()))?;
    list.sort();
    Ok(list)
}
