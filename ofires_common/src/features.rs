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

//! conversion between GeoJSON features and `geo` geometries

use geo::{Coord, LineString, MultiPolygon, Point, Polygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, PolygonType, Value};
use tracing::trace;

/// all polygons of a GeoJSON geometry value (including nested collections) as one MultiPolygon.
/// Returns None if there are no valid polygons
pub fn multi_polygon_from_value (value: &Value)->Option<MultiPolygon<f64>> {
    let mut polys: Vec<Polygon<f64>> = Vec::new();
    collect_polygons( value, &mut polys);
    if polys.is_empty() { None } else { Some( MultiPolygon::new(polys)) }
}

fn collect_polygons (value: &Value, polys: &mut Vec<Polygon<f64>>) {
    match value {
        Value::Polygon(p) => { if let Some(poly) = polygon( p) { polys.push(poly) } }
        Value::MultiPolygon(mp) => { for p in mp { if let Some(poly) = polygon( p) { polys.push(poly) } } }
        Value::GeometryCollection(gc) => { for g in gc { collect_polygons( &g.value, polys) } }
        _ => trace!("ignoring non-polygon geometry")
    }
}

fn polygon (rings: &PolygonType)->Option<Polygon<f64>> {
    let mut it = rings.iter();
    let exterior = line_string( it.next()?)?;
    let interiors: Vec<LineString<f64>> = it.filter_map( |r| line_string(r)).collect();
    Some( Polygon::new( exterior, interiors))
}

fn line_string (positions: &Vec<Vec<f64>>)->Option<LineString<f64>> {
    if positions.len() < 3 || positions.iter().any( |p| p.len() < 2) {
        None
    } else {
        Some( LineString::new( positions.iter().map( |p| Coord{ x: p[0], y: p[1] }).collect()) )
    }
}

pub fn multi_polygon_value (mp: &MultiPolygon<f64>)->Value {
    Value::MultiPolygon( mp.0.iter().map( polygon_rings).collect() )
}

fn polygon_rings (poly: &Polygon<f64>)->PolygonType {
    let mut rings = Vec::with_capacity( 1 + poly.interiors().len());
    rings.push( ring_positions( poly.exterior()));
    for r in poly.interiors() { rings.push( ring_positions(r)) }
    rings
}

fn ring_positions (ls: &LineString<f64>)->Vec<Vec<f64>> {
    ls.coords().map( |c| vec![c.x, c.y]).collect()
}

pub fn point_value (p: &Point<f64>)->Value {
    Value::Point( vec![p.x(), p.y()])
}

pub fn feature (value: Value, properties: JsonObject)->Feature {
    Feature {
        bbox: None,
        geometry: Some( Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn feature_collection (features: Vec<Feature>)->FeatureCollection {
    FeatureCollection { bbox: None, features, foreign_members: None }
}

/// parse GeoJSON text and return it as a FeatureCollection, regardless of whether the top level object is
/// a collection, a single feature or a plain geometry
pub fn parse_feature_collection (data: &[u8])->Result<FeatureCollection,geojson::Error> {
    let geojson = GeoJson::from_reader( data)?;
    Ok( match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        GeoJson::Feature(f) => feature_collection( vec![f]),
        GeoJson::Geometry(g) => feature_collection( vec![ Feature { bbox: None, geometry: Some(g), id: None, properties: None, foreign_members: None } ])
    })
}

pub fn feature_multi_polygon (f: &Feature)->Option<MultiPolygon<f64>> {
    f.geometry.as_ref().and_then( |g| multi_polygon_from_value( &g.value))
}

/// first non-null property value of the given names
pub fn property<'a> (f: &'a Feature, names: &[&str])->Option<&'a JsonValue> {
    let props = f.properties.as_ref()?;
    names.iter().filter_map( |n| props.get(*n)).find( |v| !v.is_null())
}

/// string property. Numbers are converted to their string representation
pub fn str_property (f: &Feature, names: &[&str])->Option<String> {
    match property( f, names)? {
        JsonValue::String(s) => Some( s.trim().to_string()),
        JsonValue::Number(n) => Some( n.to_string()),
        _ => None
    }
}

pub fn f64_property (f: &Feature, names: &[&str])->Option<f64> {
    match property( f, names)? {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None
    }
}
