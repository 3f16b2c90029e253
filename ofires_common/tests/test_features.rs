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

use geo::{Area, MultiPolygon, Polygon, polygon};
use geojson::{JsonObject, JsonValue};
use ofires_common::features::*;

const FC: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature",
      "properties": { "poly_IRWINID": "{ABC}", "poly_IncidentName": " Dixie ", "attr_FireDiscoveryDateTime": 1626325200000 },
      "geometry": { "type": "Polygon", "coordinates": [[[0,0],[1,0],[1,1],[0,1],[0,0]]] } },
    { "type": "Feature",
      "properties": { "name": "point" },
      "geometry": { "type": "Point", "coordinates": [0.5, 0.5] } }
  ]
}"#;

#[test]
fn test_parse_features() {
    let fc = parse_feature_collection( FC.as_bytes()).unwrap();
    assert_eq!( fc.features.len(), 2);

    let f = &fc.features[0];
    let mp = feature_multi_polygon(f).unwrap();
    assert_eq!( mp.0.len(), 1);
    assert!( (mp.unsigned_area() - 1.0).abs() < 1e-12);

    assert_eq!( str_property( f, &["poly_IRWINID"]), Some("{ABC}".to_string()));
    assert_eq!( str_property( f, &["attr_IncidentName", "poly_IncidentName"]), Some("Dixie".to_string()));
    assert_eq!( f64_property( f, &["attr_FireDiscoveryDateTime"]), Some(1626325200000.0));

    assert!( feature_multi_polygon( &fc.features[1]).is_none());
}

#[test]
fn test_write_features() {
    let poly: Polygon<f64> = polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 0.0)];
    let mp = MultiPolygon::new( vec![poly]);

    let mut props = JsonObject::new();
    props.insert( "opr_id".into(), JsonValue::from("ACR123"));
    let fc = feature_collection( vec![ feature( multi_polygon_value(&mp), props) ]);

    let text = fc.to_string();
    println!("{text}");
    let fc1 = parse_feature_collection( text.as_bytes()).unwrap();
    assert_eq!( feature_multi_polygon( &fc1.features[0]), Some(mp));
    assert_eq!( str_property( &fc1.features[0], &["opr_id"]), Some("ACR123".to_string()));
}
