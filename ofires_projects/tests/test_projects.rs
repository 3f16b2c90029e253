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

use chrono::{NaiveDate, TimeZone, Utc};
use geo::{Area, BooleanOps, MultiPolygon, Point, polygon};
use ofires_common::{albers::AlbersEqualArea, features::{multi_polygon_value, feature, feature_collection}, store::{LocalStore, ObjectStore}};
use ofires_nifc::FirePerimeter;
use ofires_projects::*;

// run with "cargo test test_projects -- --nocapture"

fn rect (west: f64, south: f64, east: f64, north: f64)->MultiPolygon<f64> {
    MultiPolygon::new( vec![ polygon![
        (x: west, y: south), (x: east, y: south), (x: east, y: north), (x: west, y: north), (x: west, y: south)
    ]])
}

fn fire (id: &str, name: &str, mp: MultiPolygon<f64>, albers: &AlbersEqualArea)->FirePerimeter {
    FirePerimeter::new( id, name, None, mp, albers)
}

struct Scenario {
    albers: AlbersEqualArea,
    projects: Vec<ProjectGeometry>,
    fires: Vec<FirePerimeter>,
}

fn scenario ()->Scenario {
    let albers = AlbersEqualArea::conus();
    let projects = vec![
        ProjectGeometry::new( "ACR100", rect( -121.0, 39.0, -120.9, 39.1), &albers),
        ProjectGeometry::new( "CAR200", rect( -110.0, 45.0, -109.9, 45.1), &albers),
        ProjectGeometry::new( "CAR300", rect( -121.3, 39.3, -121.2, 39.4), &albers),
    ];
    let fires = vec![
        fire( "{F1}", "Creek Fire", rect( -121.05, 38.95, -120.95, 39.15), &albers),
        fire( "{F2}", "Dixie Fire", rect( -120.97, 38.90, -120.93, 39.20), &albers),
        fire( "{F3}", "Caldor Fire", rect( -121.5, 39.25, -121.25, 39.45), &albers), // half of CAR300
    ];
    Scenario { albers, projects, fires }
}

#[test]
fn test_projects_no_fires_no_record() {
    let s = scenario();
    assert!( summarize_project_fires( &s.projects[1], &s.fires, &s.albers).is_none());
    assert!( summarize_project_fires( &s.projects[0], &[], &s.albers).is_none());
}

#[test]
fn test_projects_burned_fraction() {
    let s = scenario();

    let pf = summarize_project_fires( &s.projects[0], &s.fires, &s.albers).unwrap();
    println!("{pf:#?}");
    assert_eq!( pf.opr_id, "ACR100");
    assert_eq!( pf.fires.len(), 2);
    assert!( pf.burned_fraction >= 0.0 && pf.burned_fraction <= 1.0);
    assert!( pf.burned_fraction > 0.5 && pf.burned_fraction < 0.8);
    assert_eq!( pf.burned_fraction, (pf.burned_fraction * 1000.0).round() / 1000.0);

    let pf = summarize_project_fires( &s.projects[2], &s.fires, &s.albers).unwrap();
    assert!( (pf.burned_fraction - 0.5).abs() <= 0.002, "fraction {}", pf.burned_fraction);

    // fully covered
    let big = vec![ fire( "{BIG}", "Big Fire", rect( -122.0, 38.0, -120.0, 40.0), &s.albers) ];
    let pf = summarize_project_fires( &s.projects[0], &big, &s.albers).unwrap();
    assert_eq!( pf.burned_fraction, 1.0);
    assert!( (pf.burned_area - s.projects[0].area()).abs() / s.projects[0].area() < 1e-6);
}

#[test]
fn test_projects_union_not_double_counted() {
    let s = scenario();
    let project = &s.projects[0];

    let pf = summarize_project_fires( project, &s.fires, &s.albers).unwrap();
    let sum_of_overlaps: f64 = s.fires.iter()
        .map( |f| project.projected.intersection( &f.projected).unsigned_area())
        .sum();

    println!("union overlap: {}, sum of overlaps: {}", pf.burned_area, sum_of_overlaps);
    assert!( pf.burned_area <= sum_of_overlaps);
    assert!( pf.burned_area < sum_of_overlaps * 0.99); // F1 and F2 overlap within the project
}

#[test]
fn test_projects_candidates() {
    let s = scenario();
    let hulls = project_hulls( &s.projects);
    let candidates = candidate_opr_ids( &s.fires, &hulls);
    assert_eq!( candidates, vec!["ACR100".to_string(), "CAR300".to_string()]);

    // the hull pre-filter never drops projects that have a record
    for p in &s.projects {
        if summarize_project_fires( p, &s.fires, &s.albers).is_some() {
            assert!( candidates.contains( &p.opr_id));
        }
    }
}

#[test]
fn test_projects_fire_metadata() {
    let s = scenario();
    let md = fire_metadata( &s.fires[0], &s.albers);
    assert_eq!( md.name, "Creek Fire");
    assert!( (md.centroid[0] - -121.0).abs() < 1e-3);
    assert!( (md.centroid[1] - 39.05).abs() < 1e-3);

    // northern-most hull vertex is one of the northern corners of the rectangle
    assert!( (md.label_coords[1] - 39.15).abs() < 1e-6);
    assert!( md.url.is_none());

    let poly = polygon![ (x: 0.0, y: 0.0), (x: 2.0, y: 1.0), (x: 1.0, y: 5.0), (x: -1.0, y: 2.0), (x: 0.0, y: 0.0) ];
    assert_eq!( northern_corner( &poly), Some((1.0,5.0)));
}

#[test]
fn test_projects_state() {
    let now = Utc.with_ymd_and_hms( 2024, 8, 21, 14, 30, 5).unwrap();
    let prefix = "carbonplan-forest-offsets/fires/project_fires";

    let keys = state_keys( prefix, None, &now);
    assert_eq!( keys, vec![
        format!("{prefix}/state_now.json"),
        format!("{prefix}/state_2024-08-21.json")
    ]);
    let keys = state_keys( prefix, NaiveDate::from_ymd_opt( 2021, 8, 1), &now);
    assert_eq!( keys, vec![ format!("{prefix}/state_2021-08-01.json") ]);

    let state = ProjectFireState::new( &now, Vec::new());
    assert_eq!( state.name, "project-fires");
    assert_eq!( state.created_at, "2024-08-21 14:30:05");
}

#[test]
fn test_projects_inciweb() {
    let s = scenario();
    let mut pf = summarize_project_fires( &s.projects[0], &s.fires, &s.albers).unwrap();

    let index = InciwebIndex::new( [
        ("Creek Fire".to_string(), "/incident/7147/".to_string()),
        ("Monument Fire".to_string(), "/incident/7561/".to_string()),
    ].into_iter().collect());
    index.annotate( &mut pf);

    assert_eq!( pf.fires["{F1}"].url.as_deref(), Some("https://inciweb.nwcg.gov/incident/7147/"));
    assert_eq!( pf.fires["{F2}"].url, None);
    assert_eq!( index.url_for("CREEK FIRE").as_deref(), Some("https://inciweb.nwcg.gov/incident/7147/"));
}

#[test]
fn test_projects_inciweb_short_names() {
    let albers = AlbersEqualArea::conus();
    let project = ProjectGeometry::new( "ACR100", rect( -121.0, 39.0, -120.9, 39.1), &albers);
    let fires = vec![
        fire( "{D}", "Dixie", rect( -121.05, 38.95, -120.95, 39.15), &albers),
        fire( "{C}", "CALDOR", rect( -120.93, 39.05, -120.85, 39.15), &albers),
    ];
    let mut pf = summarize_project_fires( &project, &fires, &albers).unwrap();

    let index = InciwebIndex::new( [
        ("Dixie Fire".to_string(), "/incident/7690/".to_string()),
        ("Caldor Fire".to_string(), "/incident/7801/".to_string()),
    ].into_iter().collect());
    index.annotate( &mut pf);

    assert_eq!( pf.fires["{D}"].url.as_deref(), Some("https://inciweb.nwcg.gov/incident/7690/"));
    assert_eq!( pf.fires["{C}"].url.as_deref(), Some("https://inciweb.nwcg.gov/incident/7801/"));
    assert_eq!( index.url_for("Monument"), None);
}

#[test]
fn test_projects_active_fire_counts() {
    let s = scenario();
    let points = vec![
        Point::new( -120.95, 39.05),
        Point::new( -120.91, 39.09),
        Point::new( -109.95, 45.05),
        Point::new( -100.0, 40.0),
    ];
    let counts = active_fire_counts( &s.projects, &points);
    assert_eq!( counts.len(), 2);
    assert_eq!( counts["ACR100"], 2);
    assert_eq!( counts["CAR200"], 1);
    assert!( !counts.contains_key("CAR300"));

    assert!( active_fire_counts( &s.projects, &[]).is_empty());
}

#[test]
fn test_projects_geometry() {
    let s = scenario();
    let p = &s.projects[0];
    let acres = p.area_acres();
    println!("{} acres", acres);
    assert!( acres > 20_000 && acres < 27_000);

    let buffered = p.buffered( 30.0);
    assert!( buffered.unsigned_area() > p.area());

    let c = p.display_centroid( 30.0, &s.albers).unwrap();
    assert!( (c[0] - -120.95).abs() < 1e-3);
    assert!( (c[1] - 39.05).abs() < 1e-3);
}

#[test]
fn test_projects_display_data() {
    let names = parse_display_names( br#"[ {"arb_id":"CAFR5000","name":"Alpha"}, {"arb_id":"CAFR5001","name":"Beta"} ]"#).unwrap();
    assert_eq!( names.len(), 2);
    assert_eq!( names[1].name, "Beta");

    let csv = "arb_id,opr_id,allocation\nCAFR5000,ACR100,1000\nCAFR5000,ACR100,250.0\nCAFR5001,CAR300,\n";
    let issuance = parse_issuance( csv.as_bytes()).unwrap();
    assert_eq!( issuance.arbocs_to_date("CAFR5000"), Some(1250));
    assert_eq!( issuance.arbocs_to_date("CAFR5001"), Some(0));
    assert_eq!( issuance.opr_id("CAFR5001"), Some("CAR300"));
    assert_eq!( issuance.opr_id("CAFR9999"), None);

    let response = br#"{ "result": { "input": {}, "geographies": {
        "States": [ { "NAME": "California", "STUSAB": "CA" } ],
        "Counties": [ { "NAME": "Plumas County" } ]
    }}}"#;
    assert_eq!( parse_location_name( response).unwrap(), "Plumas County, CA");
    assert!( parse_location_name( br#"{ "result": { "geographies": { "States": [], "Counties": [] }}}"#).is_err());

    assert_eq!( state_abbrev("Wyoming"), Some("WY"));
    assert_eq!( state_abbrev("District of Columbia"), Some("DC"));
    assert_eq!( state_abbrev("Atlantis"), None);

    let q = geocoder_query( -121.5, 39.5);
    assert!( q.contains( &("benchmark", "Public_AR_Current".to_string())));

    let s = scenario();
    let records = vec![
        DisplayRecord::new( &s.projects[0], "Alpha", 1250, [-120.95, 39.05], "Plumas County, CA"),
        DisplayRecord::new( &s.projects[2], "Beta", 0, [-121.25, 39.35], "Butte County, CA"),
    ];
    assert_eq!( records[0].id, "ACR100");
    let shown = exclude_early_action( records, &["CAR300".to_string()]);
    assert_eq!( shown.len(), 1);
    assert_eq!( shown[0].opr_id, "ACR100");
}

#[tokio::test]
async fn test_projects_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new( dir.path()).unwrap();
    let s = scenario();

    let raw_prefix = "carbonplan-forest-offsets/carb-geometries/raw";
    for p in &s.projects {
        let fc = feature_collection( vec![ feature( multi_polygon_value( &p.geometry), Default::default()) ]);
        store.put( &format!("{raw_prefix}/{}.json", p.opr_id), serde_json::to_vec( &fc).unwrap()).await.unwrap();
    }
    store.put( &format!("{raw_prefix}/README.md"), b"not a geometry".to_vec()).await.unwrap();

    let ids = list_all_opr_ids( &store, raw_prefix).await.unwrap();
    assert_eq!( ids, vec!["ACR100", "CAR200", "CAR300"]);

    let p = load_project_geometry( &store, raw_prefix, "CAR200", &s.albers).await.unwrap();
    assert!( (p.area() - s.projects[1].area()).abs() < 1.0);
    assert!( load_project_geometry( &store, raw_prefix, "NOPE", &s.albers).await.is_err());

    let projects = load_project_geometries( &store, raw_prefix, &ids, 2, &s.albers).await.unwrap();
    assert_eq!( projects.iter().map( |p| p.opr_id.as_str()).collect::<Vec<_>>(), vec!["ACR100", "CAR200", "CAR300"]);

    let config: ProjectsConfig = ron::de::from_str( &std::fs::read_to_string( "configs/projects.ron").unwrap()).unwrap();
    let n = package_geometries( &store, &config, &s.albers).await.unwrap();
    assert_eq!( n, 3);

    let all = load_all_project_geometries( &store, &config.combined_key, &s.albers).await.unwrap();
    assert_eq!( all.len(), 3);
    assert_eq!( all[2].opr_id, "CAR300");

    let fc = projects_feature_collection( &all, 30.0, &s.albers);
    assert_eq!( fc.features.len(), 3);
    let props = fc.features[0].properties.as_ref().unwrap();
    assert_eq!( props.get("opr_id").and_then( |v| v.as_str()), Some("ACR100"));
}
