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

//! object store abstraction.
//! 
//! Objects are addressed by keys of the form `<bucket>/<path>` (e.g. `carbonplan-forest-offsets/fires/nifc-data/x.json`).
//! Stores only support whole-object get/put, prefix listing and removal, which is all our workflows need.
//! [`LocalStore`] maps keys to files below a root directory, the S3 backend lives in the (feature gated)
//! `s3` module.

use std::{path::{Path,PathBuf}, sync::Arc, io::ErrorKind};
use async_trait::async_trait;
use globset::GlobBuilder;
use serde::{Serialize,Deserialize,de::DeserializeOwned};
use tracing::{debug,info};

use crate::{define_error, fs::{files_in_dir,visit_dirs}};

define_error!{ pub OfiresStoreError = 
    IOError(#[from] std::io::Error) : "IO error: {0}",
    JsonError(#[from] serde_json::Error) : "JSON error: {0}",
    GlobError(#[from] globset::Error) : "glob pattern error: {0}",
    NotFoundError(String) : "object not found: {0}",
    InvalidKeyError(String) : "invalid object key: {0}",
    BackendError(String) : "object store backend error: {0}"
}

pub type Result<T> = std::result::Result<T, OfiresStoreError>;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// human readable store location for log output
    fn location (&self)->String;

    async fn get (&self, key: &str)->Result<Vec<u8>>;

    async fn put (&self, key: &str, data: Vec<u8>)->Result<()>;

    /// the (lexically sorted) keys of all objects that start with `prefix`
    async fn list (&self, prefix: &str)->Result<Vec<String>>;

    async fn remove (&self, key: &str)->Result<()>;
}

pub type SharedStore = Arc<dyn ObjectStore>;

/// configuration of the store backend, as it appears in RON configs
#[derive(Serialize,Deserialize,Debug,Clone)]
pub enum StoreConfig {
    /// keys are relative paths below the given root dir. Relative roots are resolved against the ofires data dir
    Local(PathBuf),
    /// keys are `<bucket>/<object-key>`
    S3 { region: Option<String> },
}

pub async fn open_store (config: &StoreConfig)->Result<SharedStore> {
    match config {
        StoreConfig::Local(root) => {
            let root = if root.is_relative() { ofires_build::data_dir().join( root) } else { root.clone() };
            Ok( Arc::new( LocalStore::new( root)?) )
        }

        #[cfg(feature="s3")]
        StoreConfig::S3{region} => Ok( Arc::new( crate::s3::S3Store::new( region.clone()).await) ),

        #[cfg(not(feature="s3"))]
        StoreConfig::S3{..} => Err( OfiresStoreError::BackendError("s3 store requested but s3 feature is not enabled".into()))
    }
}

/* #region key utilities ***************************************************************/

/// strip URL schemes and redundant separators: "s3://bucket/a//b/" -> "bucket/a/b"
pub fn normalize_key (key: &str)->String {
    let key = match key.find("://") {
        Some(idx) => &key[idx+3..],
        None => key
    };
    key.split('/').filter( |s| !s.is_empty()).collect::<Vec<&str>>().join("/")
}

/// like [`normalize_key`] but keeps a trailing separator, which restricts listings to "directory" contents
pub fn normalize_prefix (prefix: &str)->String {
    let mut p = normalize_key(prefix);
    if prefix.ends_with('/') && !p.is_empty() { p.push('/') }
    p
}

pub fn join_key (prefix: &str, name: &str)->String {
    let prefix = normalize_key(prefix);
    let name = normalize_key(name);
    if prefix.is_empty() { name } else if name.is_empty() { prefix } else { format!("{prefix}/{name}") }
}

/// last path element without extension: "bucket/raw/ACR123.json" -> "ACR123"
pub fn key_stem (key: &str)->&str {
    let name = key.rsplit('/').next().unwrap_or(key);
    match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name
    }
}

/// the literal part of a glob pattern that can be used as a listing prefix
fn glob_prefix (pattern: &str)->&str {
    match pattern.find( |c| c == '*' || c == '?' || c == '[' || c == '{') {
        Some(idx) => &pattern[..idx],
        None => pattern
    }
}

/* #endregion key utilities */

/* #region store helpers *********************************************************************/

pub async fn get_json<T> (store: &dyn ObjectStore, key: &str)->Result<T> where T: DeserializeOwned {
    let data = store.get(key).await?;
    Ok( serde_json::from_slice( &data)? )
}

pub async fn put_json<T> (store: &dyn ObjectStore, key: &str, value: &T)->Result<()> where T: Serialize {
    let data = serde_json::to_vec( value)?;
    store.put( key, data).await
}

/// keys matching a glob pattern ('*' does not match across '/'), sorted
pub async fn glob (store: &dyn ObjectStore, pattern: &str)->Result<Vec<String>> {
    let pattern = normalize_key(pattern);
    let matcher = GlobBuilder::new( &pattern).literal_separator(true).build()?.compile_matcher();
    let keys = store.list( glob_prefix(&pattern)).await?;
    Ok( keys.into_iter().filter( |k| matcher.is_match(k)).collect() )
}

/// remove all objects below `prefix` and return their number
pub async fn remove_prefix (store: &dyn ObjectStore, prefix: &str)->Result<usize> {
    let prefix = normalize_key(prefix);
    let dir_prefix = format!("{prefix}/");
    let keys = store.list( &dir_prefix).await?;
    for key in &keys {
        store.remove(key).await?;
    }
    info!("removed {} objects from {}", keys.len(), prefix);
    Ok( keys.len() )
}

/// recursively upload the contents of a local directory, mapping relative file paths to keys below `prefix`
pub async fn put_dir (store: &dyn ObjectStore, dir: impl AsRef<Path>, prefix: &str)->Result<usize> {
    let dir = dir.as_ref();
    let files = files_in_dir(dir)?;

    for path in &files {
        let rel_path = path.strip_prefix(dir).map_err( |_| OfiresStoreError::InvalidKeyError( format!("{path:?}")))?;
        let rel_key = rel_path.components()
            .map( |c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<String>>()
            .join("/");
        let data = tokio::fs::read(path).await?;
        store.put( &join_key( prefix, &rel_key), data).await?;
    }

    info!("uploaded {} files from {:?} to {}/{}", files.len(), dir, store.location(), prefix);
    Ok( files.len() )
}

/* #endregion store helpers */

/* #region local store *************************************************************************/

/// an object store that maps keys to files below a root directory
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new (root: impl AsRef<Path>)->Result<Self> {
        let root = root.as_ref().to_path_buf();
        crate::fs::ensure_dir( &root)?;
        Ok( LocalStore { root } )
    }

    fn path_of (&self, key: &str)->Result<PathBuf> {
        let key = normalize_key(key);
        if key.is_empty() || key.split('/').any( |s| s == "." || s == "..") {
            Err( OfiresStoreError::InvalidKeyError(key))
        } else {
            Ok( self.root.join( key) )
        }
    }

    fn key_of (&self, path: &Path)->Option<String> {
        let rel = path.strip_prefix( &self.root).ok()?;
        let parts: Vec<String> = rel.components().map( |c| c.as_os_str().to_string_lossy().to_string()).collect();
        Some( parts.join("/") )
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn location (&self)->String {
        format!("file://{}", self.root.to_string_lossy())
    }

    async fn get (&self, key: &str)->Result<Vec<u8>> {
        let path = self.path_of(key)?;
        match tokio::fs::read( &path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Err( OfiresStoreError::NotFoundError(key.to_string())),
            Err(e) => Err( e.into())
        }
    }

    async fn put (&self, key: &str, data: Vec<u8>)->Result<()> {
        let path = self.path_of(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all( parent).await?;
        }
        debug!("writing {} bytes to {:?}", data.len(), path);
        tokio::fs::write( &path, data).await?;
        Ok(())
    }

    async fn list (&self, prefix: &str)->Result<Vec<String>> {
        let prefix = normalize_prefix(prefix);
        // everything up to the last separator has to be a directory, the rest is a partial name
        let dir = match prefix.rfind('/') {
            Some(idx) => self.root.join( &prefix[..idx]),
            None => self.root.clone()
        };

        let mut keys: Vec<String> = Vec::new();
        visit_dirs( &dir, true, &mut |e| {
            if let Some(key) = self.key_of( &e.path()) {
                if key.starts_with( &prefix) { keys.push(key) }
            }
        })?;
        keys.sort();
        Ok(keys)
    }

    async fn remove (&self, key: &str)->Result<()> {
        let path = self.path_of(key)?;
        match tokio::fs::remove_file( &path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err( OfiresStoreError::NotFoundError(key.to_string())),
            Err(e) => Err( e.into())
        }
    }
}

/* #endregion local store */
