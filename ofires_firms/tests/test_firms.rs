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

use geo::{MultiPolygon, polygon};
use ofires_common::BoundingBox;
use ofires_firms::*;

// run with "cargo test test_firms -- --nocapture"

const VIIRS_CSV: &str = "\
latitude,longitude,bright_ti4,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_ti5,frp,daynight
39.81,-121.43,331.2,0.39,0.36,2024-08-21,0812,N20,VIIRS,n,2.0NRT,290.1,5.3,N
39.82,-121.44,367.0,0.39,0.36,2024-08-21,0812,N20,VIIRS,h,2.0NRT,295.4,22.9,N
40.10,-120.90,300.4,0.41,0.37,2024-08-21,2054,N20,VIIRS,l,2.0NRT,288.0,0.9,D
";

const MODIS_CSV: &str = "\
latitude,longitude,brightness,scan,track,acq_date,acq_time,satellite,instrument,confidence,version,bright_t31,frp,daynight
39.80,-121.40,320.5,1.1,1.0,2024-08-21,1905,Aqua,MODIS,35,6.1NRT,300.2,12.5,D
39.90,-121.50,340.1,1.1,1.0,2024-08-21,1905,Aqua,MODIS,36,6.1NRT,301.0,30.1,D
41.00,-122.00,360.8,1.2,1.1,2024-08-21,1905,Terra,MODIS,90,6.1NRT,305.5,80.2,D
";

#[test]
fn test_firms_sources() {
    for src in FirmsSource::ALL {
        let parsed: FirmsSource = src.as_str().parse().unwrap();
        assert_eq!( parsed, src);
    }

    match "VIIRS_NOAA21_NRT".parse::<FirmsSource>() {
        Err(e @ OfiresFirmsError::InvalidSourceError(..)) => {
            println!("{e}");
            assert!( e.to_string().contains("MODIS_NRT"));
        }
        other => panic!("unexpected result {other:?}")
    }
}

#[test]
fn test_firms_query_url() {
    let bounds = BoundingBox::new( -180.0, 24.0, -66.0, 72.0);
    let query = FirmsQuery::new( FirmsSource::ViirsNoaa20Nrt, bounds, 3).unwrap();
    let url = query.url( "https://firms2.modaps.eosdis.nasa.gov/", "KEY");
    println!("{url}");
    assert_eq!( url, "https://firms2.modaps.eosdis.nasa.gov/usfs/api/area/csv/KEY/VIIRS_NOAA20_NRT/-180,24,-66,72/3/");

    assert!( FirmsQuery::new( FirmsSource::ModisNrt, bounds, 0).is_err());
    assert!( FirmsQuery::new( FirmsSource::ModisNrt, BoundingBox::new( -66.0, 24.0, -180.0, 72.0), 3).is_err());
}

#[test]
fn test_firms_parse_csv() {
    let viirs = parse_firms_csv( VIIRS_CSV.as_bytes(), Some(FirmsSource::ViirsNoaa20Nrt)).unwrap();
    assert_eq!( viirs.len(), 3);
    assert_eq!( viirs[1].confidence, Confidence::Level(ConfidenceLevel::High));
    assert_eq!( viirs[0].source, Some(FirmsSource::ViirsNoaa20Nrt));
    assert_eq!( viirs[0].acq_time, 812);
    let dt = viirs[0].acq_datetime().unwrap();
    assert_eq!( dt.to_rfc3339(), "2024-08-21T08:12:00+00:00");

    let modis = parse_firms_csv( MODIS_CSV.as_bytes(), Some(FirmsSource::ModisNrt)).unwrap();
    assert_eq!( modis.len(), 3);
    assert_eq!( modis[2].confidence, Confidence::Percent(90));
    assert_eq!( modis[0].bright_ti4, Some(320.5));
}

#[test]
fn test_firms_default_filter() {
    let threshold = ConfidenceThreshold::default();

    let viirs = filter_points( parse_firms_csv( VIIRS_CSV.as_bytes(), None).unwrap(), &threshold);
    assert_eq!( viirs.len(), 2); // low confidence dropped

    let modis = filter_points( parse_firms_csv( MODIS_CSV.as_bytes(), None).unwrap(), &threshold);
    assert_eq!( modis.len(), 2); // 35% is not above 35
    assert!( modis.iter().all( |p| p.confidence != Confidence::Percent(35)));
}

#[test]
fn test_firms_filter_monotonic() {
    let mut points = parse_firms_csv( VIIRS_CSV.as_bytes(), None).unwrap();
    points.extend( parse_firms_csv( MODIS_CSV.as_bytes(), None).unwrap());

    // thresholds in order of increasing strictness
    let mut thresholds: Vec<ConfidenceThreshold> = Vec::new();
    for min_level in [ConfidenceLevel::Low, ConfidenceLevel::Nominal, ConfidenceLevel::High] {
        for above_percent in [0u8, 35, 36, 89, 90, 100] {
            thresholds.push( ConfidenceThreshold { above_percent, min_level });
        }
    }

    for t1 in &thresholds {
        for t2 in &thresholds {
            if t2.is_at_least_as_strict(t1) {
                let n1 = filter_points( points.clone(), t1).len();
                let n2 = filter_points( points.clone(), t2).len();
                assert!( n2 <= n1, "{t2:?} kept {n2} points but less strict {t1:?} kept {n1}");
            }
        }
    }

    let strictest = ConfidenceThreshold { above_percent: 100, min_level: ConfidenceLevel::High };
    assert_eq!( filter_points( points.clone(), &strictest).len(), 1);
}

#[test]
fn test_firms_mask() {
    let square: MultiPolygon<f64> = MultiPolygon::new( vec![ polygon![
        (x: -122.0, y: 39.0), (x: -121.0, y: 39.0), (x: -121.0, y: 40.0), (x: -122.0, y: 40.0), (x: -122.0, y: 39.0)
    ]]);
    let mask = RegionMask::new( vec![square]).unwrap();
    assert!( mask.contains( -121.5, 39.5));
    assert!( mask.contains( -121.0, 39.5)); // boundary
    assert!( !mask.contains( -120.9, 40.1));

    let points = parse_firms_csv( VIIRS_CSV.as_bytes(), None).unwrap();
    let masked = mask_points( points, &mask);
    assert_eq!( masked.len(), 2);

    assert!( RegionMask::new( vec![]).is_err());
}

#[test]
fn test_firms_mask_from_features() {
    let data = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": { "SOVEREIGNT": "United States of America" },
          "geometry": { "type": "MultiPolygon", "coordinates": [[[[-125,30],[-100,30],[-100,49],[-125,49],[-125,30]]]] } },
        { "type": "Feature", "properties": { "SOVEREIGNT": "Canada" },
          "geometry": { "type": "Polygon", "coordinates": [[[-125,49],[-100,49],[-100,60],[-125,60],[-125,49]]] } }
    ]}"#;
    let fc = ofires_common::features::parse_feature_collection( data.as_bytes()).unwrap();

    let mask = RegionMask::from_features( &fc, "SOVEREIGNT", "United States of America").unwrap();
    assert!( mask.contains( -110.0, 40.0));
    assert!( !mask.contains( -110.0, 55.0));

    assert!( RegionMask::from_features( &fc, "SOVEREIGNT", "Mexico").is_err());
}

#[test]
fn test_firms_active_fires() {
    let data = "latitude,longitude,bright_ti4,confidence\n39.5,-121.5,330.0,n\n40.5,-120.5,310.0,l\n";
    let points = parse_active_fires( data.as_bytes()).unwrap();
    assert_eq!( points.len(), 2);
    assert_eq!( points[0].x(), -121.5);
    assert_eq!( points[0].y(), 39.5);
}

#[test]
fn test_firms_feature_collection() {
    let points = parse_firms_csv( VIIRS_CSV.as_bytes(), None).unwrap();
    let fc = points_feature_collection( &points);
    assert_eq!( fc.features.len(), 3);
    let props = fc.features[1].properties.as_ref().unwrap();
    assert_eq!( props.get("frp").and_then( |v| v.as_f64()), Some(22.9));
}
