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

use std::path::Path;
use ofires_common::{features::feature_collection, process::OfiresProcessError, store::{LocalStore, ObjectStore}};
use ofires_tiles::*;

// run with "cargo test test_tiles -- --nocapture"

fn config ()->TilesConfig {
    TilesConfig {
        tippecanoe: "tippecanoe".to_string(),
        mb_util: "mb-util".to_string(),
        compression_factor: "z9".to_string(),
        upload_to: "carbonplan-forest-offsets/web/tiles".to_string(),
        replace_targets: vec![ "carbonplan-forest-offsets/web/tiles/current-firms-pixels".to_string() ],
    }
}

fn write_fake_tiles (ws: &TileWorkspace, stem: &str, tiles: &[&str]) {
    for t in tiles {
        let path = ws.processed_path( stem).join( t);
        std::fs::create_dir_all( path.parent().unwrap()).unwrap();
        std::fs::write( &path, t.as_bytes()).unwrap();
    }
}

#[test]
fn test_tiles_commands() {
    let ws = TileWorkspace::new().unwrap();
    let dir = ws.path().to_string_lossy().to_string();
    assert!( ws.path().join("tmp").is_dir());
    assert!( ws.path().join("processed").is_dir());

    let input = ws.path().join("fires.json");
    let cmd = tippecanoe_cmd( &config(), &ws, &input, "current-nifc-perimeters");
    println!("{cmd}");
    assert_eq!( cmd.to_string(), format!(
        "tippecanoe -z9 -o {dir}/tmp/current-nifc-perimeters.mbtiles --no-feature-limit --no-tile-size-limit --extend-zooms-if-still-dropping --no-tile-compression {dir}/fires.json"
    ));

    let cmd = pbf_cmd( &config(), &ws, "projects");
    assert_eq!( cmd.to_string(), format!("mb-util --image_format=pbf {dir}/tmp/projects.mbtiles {dir}/processed/projects"));
}

#[test]
fn test_tiles_workspace_cleanup() {
    let ws = TileWorkspace::new().unwrap();
    let path = ws.path().to_path_buf();
    let input = ws.write_geojson( "projects", &feature_collection( Vec::new())).unwrap();
    assert!( input.is_file());
    drop(ws);
    assert!( !path.exists());
}

#[tokio::test]
async fn test_tiles_tool_failures() {
    let ws = TileWorkspace::new().unwrap();
    let input = ws.write_geojson( "fires", &feature_collection( Vec::new())).unwrap();

    let mut cfg = config();
    cfg.tippecanoe = "no-such-tippecanoe-binary".to_string();
    match make_tiles( &cfg, &ws, &input, "fires").await {
        Err(OfiresTilesError::ProcessError(OfiresProcessError::SpawnError(..))) => {}
        other => panic!("unexpected result {other:?}")
    }

    cfg.tippecanoe = "true".to_string();
    cfg.mb_util = "false".to_string();
    match make_tiles( &cfg, &ws, &input, "fires").await {
        Err(OfiresTilesError::ProcessError(OfiresProcessError::ExitError(..))) => {}
        other => panic!("unexpected result {other:?}")
    }

    cfg.mb_util = "true".to_string();
    let dir = make_tiles( &cfg, &ws, &input, "fires").await.unwrap();
    assert_eq!( dir, ws.processed_path("fires"));
}

#[tokio::test]
async fn test_tiles_upload() {
    let root = tempfile::tempdir().unwrap();
    let store = LocalStore::new( root.path()).unwrap();
    let cfg = config();

    let ws = TileWorkspace::new().unwrap();
    write_fake_tiles( &ws, "projects", &["0/0/0.pbf", "1/0/1.pbf", "1/1/1.pbf"]);
    let n = upload_tiles( &store, &ws, "projects", &cfg.upload_to).await.unwrap();
    assert_eq!( n, 3);

    let keys = store.list( "carbonplan-forest-offsets/web/tiles/projects/").await.unwrap();
    assert_eq!( keys, vec![
        "carbonplan-forest-offsets/web/tiles/projects/0/0/0.pbf",
        "carbonplan-forest-offsets/web/tiles/projects/1/0/1.pbf",
        "carbonplan-forest-offsets/web/tiles/projects/1/1/1.pbf",
    ]);
}

#[tokio::test]
async fn test_tiles_replace_guard() {
    let root = tempfile::tempdir().unwrap();
    let store = LocalStore::new( root.path()).unwrap();
    let cfg = config();
    let stale = "carbonplan-forest-offsets/web/tiles/current-firms-pixels/9/9/9.pbf";
    store.put( stale, b"stale".to_vec()).await.unwrap();

    let ws = TileWorkspace::new().unwrap();
    write_fake_tiles( &ws, "current-firms-pixels", &["0/0/0.pbf"]);
    write_fake_tiles( &ws, "projects", &["0/0/0.pbf"]);

    match replace_tiles( &store, &ws, "projects", &cfg.upload_to, &cfg.replace_targets).await {
        Err(OfiresTilesError::UnexpectedTargetPath(target)) => assert_eq!( target, "carbonplan-forest-offsets/web/tiles/projects"),
        other => panic!("unexpected result {other:?}")
    }
    assert!( store.list("carbonplan-forest-offsets/web/tiles/projects/").await.unwrap().is_empty());

    let n = replace_tiles( &store, &ws, "current-firms-pixels", &cfg.upload_to, &cfg.replace_targets).await.unwrap();
    assert_eq!( n, 1);
    let keys = store.list("carbonplan-forest-offsets/web/tiles/current-firms-pixels/").await.unwrap();
    assert_eq!( keys, vec!["carbonplan-forest-offsets/web/tiles/current-firms-pixels/0/0/0.pbf"]);
}

#[test]
fn test_tiles_config() {
    let cfg: TilesConfig = ron::de::from_str( &std::fs::read_to_string("configs/tiles.ron").unwrap()).unwrap();
    assert_eq!( cfg.compression_factor, "z9");
    assert_eq!( target_path( &cfg.upload_to, "current-firms-pixels"), cfg.replace_targets[0]);
}
