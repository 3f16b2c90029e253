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

//! vector tile pyramids from GeoJSON via external tools.
//!
//! `tippecanoe` turns a GeoJSON file into an mbtiles archive, `mb-util` unpacks the archive into a
//! `z/x/y.pbf` directory tree that is then uploaded below `<upload_to>/<stem>`. All intermediate
//! files live in a [`TileWorkspace`] that is removed when dropped.

use std::path::{Path,PathBuf};
use geojson::FeatureCollection;
use serde::{Serialize,Deserialize};
use tempfile::TempDir;
use tracing::{debug,info};

use ofires_common::{
    fs::{ensure_dir, path_to_lossy_string},
    process::{CommandLine, run_command},
    store::{ObjectStore, join_key, normalize_key, put_dir, remove_prefix}
};

pub mod errors;
pub use errors::*;

ofires_build::define_load_config!{}

#[derive(Deserialize,Serialize,Debug,Clone)]
pub struct TilesConfig {
    /// tippecanoe executable
    pub tippecanoe: String,
    /// mb-util executable
    pub mb_util: String,
    /// tippecanoe zoom option without leading dash (e.g. "z9")
    pub compression_factor: String,
    /// bucket prefix for tile sets
    pub upload_to: String,
    /// tile set locations that may be cleared before upload
    pub replace_targets: Vec<String>,
}

/// scratch dir with `tmp/` (mbtiles) and `processed/` (pbf trees) sub dirs
pub struct TileWorkspace {
    dir: TempDir,
}

impl TileWorkspace {
    pub fn new ()->Result<Self> {
        let dir = tempfile::Builder::new().suffix("_data").tempdir()?;
        ensure_dir( dir.path().join("tmp"))?;
        ensure_dir( dir.path().join("processed"))?;
        debug!("created tile workspace {:?}", dir.path());
        Ok( TileWorkspace { dir } )
    }

    pub fn path (&self)->&Path { self.dir.path() }

    pub fn mbtiles_path (&self, stem: &str)->PathBuf {
        self.path().join("tmp").join( format!("{stem}.mbtiles"))
    }

    pub fn processed_path (&self, stem: &str)->PathBuf {
        self.path().join("processed").join( stem)
    }

    /// write tippecanoe input file `<name>.json` and return its path
    pub fn write_geojson (&self, name: &str, fc: &FeatureCollection)->Result<PathBuf> {
        let path = self.path().join( format!("{name}.json"));
        std::fs::write( &path, serde_json::to_vec( fc)?)?;
        info!("wrote {} features to {:?}", fc.features.len(), path);
        Ok(path)
    }
}

/* #region commands *****************************************************************************/

pub fn tippecanoe_cmd (config: &TilesConfig, ws: &TileWorkspace, input: &Path, stem: &str)->CommandLine {
    CommandLine::new( &config.tippecanoe)
        .arg( format!("-{}", config.compression_factor))
        .arg("-o").arg( path_to_lossy_string( ws.mbtiles_path( stem)))
        .arg("--no-feature-limit")
        .arg("--no-tile-size-limit")
        .arg("--extend-zooms-if-still-dropping")
        .arg("--no-tile-compression")
        .arg( path_to_lossy_string( input))
}

pub fn pbf_cmd (config: &TilesConfig, ws: &TileWorkspace, stem: &str)->CommandLine {
    CommandLine::new( &config.mb_util)
        .arg("--image_format=pbf")
        .arg( path_to_lossy_string( ws.mbtiles_path( stem)))
        .arg( path_to_lossy_string( ws.processed_path( stem)))
}

/// run tippecanoe and mb-util (in this order) and return the directory of the pbf tree
pub async fn make_tiles (config: &TilesConfig, ws: &TileWorkspace, input: &Path, stem: &str)->Result<PathBuf> {
    run_command( &tippecanoe_cmd( config, ws, input, stem)).await?;
    run_command( &pbf_cmd( config, ws, stem)).await?;
    Ok( ws.processed_path( stem) )
}

/* #endregion commands */

/* #region upload *******************************************************************************/

pub fn target_path (dst_bucket: &str, stem: &str)->String {
    join_key( dst_bucket, stem)
}

/// upload the pbf tree of `stem` to `<dst_bucket>/<stem>`, keeping whatever is already there
pub async fn upload_tiles (store: &dyn ObjectStore, ws: &TileWorkspace, stem: &str, dst_bucket: &str)->Result<usize> {
    let n = put_dir( store, ws.processed_path( stem), &target_path( dst_bucket, stem)).await?;
    Ok(n)
}

/// clear `<dst_bucket>/<stem>` and upload the pbf tree of `stem`. The target has to be one of `allowed_targets`
pub async fn replace_tiles (store: &dyn ObjectStore, ws: &TileWorkspace, stem: &str, dst_bucket: &str, allowed_targets: &[String])->Result<usize> {
    let target = target_path( dst_bucket, stem);
    if !allowed_targets.iter().any( |t| normalize_key(t) == target) {
        return Err( OfiresTilesError::UnexpectedTargetPath( target))
    }

    remove_prefix( store, &target).await?;
    upload_tiles( store, ws, stem, dst_bucket).await
}

/// GeoJSON -> tiles -> upload. Returns the number of uploaded tiles
pub async fn publish_tiles (config: &TilesConfig, store: &dyn ObjectStore, fc: &FeatureCollection, stem: &str, replace: bool)->Result<usize> {
    let ws = TileWorkspace::new()?;
    let input = ws.write_geojson( stem, fc)?;
    make_tiles( config, &ws, &input, stem).await?;

    let n = if replace {
        replace_tiles( store, &ws, stem, &config.upload_to, &config.replace_targets).await?
    } else {
        upload_tiles( store, &ws, stem, &config.upload_to).await?
    };
    info!("published {} {} tiles to {}", n, stem, target_path( &config.upload_to, stem));
    Ok(n)
}

/* #endregion upload */
