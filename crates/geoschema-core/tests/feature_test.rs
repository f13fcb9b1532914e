//! End-to-end parsing of Feature and FeatureCollection documents

use geoschema_core::config::ParseOptions;
use geoschema_core::error::ErrorKind;
use geoschema_core::models::{BoundingBox, FeatureId, Geometry, ObjectType};
use geoschema_core::{from_json_str, parse, parse_with, GeoJson, GeoschemaError};
use serde_json::json;

const COLLECTION: &str = r#"{
    "type": "FeatureCollection",
    "bbox": [177.0, -20.0, -178.0, -16.0],
    "features": [
        {
            "type": "Feature",
            "id": "suva",
            "geometry": {"type": "Point", "coordinates": [178.4419, -18.1416]},
            "properties": {"name": "Suva", "population": 93970}
        },
        {
            "type": "Feature",
            "id": 2,
            "geometry": {
                "type": "LineString",
                "coordinates": [[179.5, -17.0], [-179.5, -17.5]],
                "bbox": [179.0, -17.5, -179.0, -17.0]
            },
            "properties": null
        },
        {
            "type": "Feature",
            "geometry": null,
            "properties": {}
        }
    ]
}"#;

#[test]
fn test_collection_document() {
    let GeoJson::FeatureCollection(collection) = from_json_str(COLLECTION).unwrap() else {
        panic!("expected a FeatureCollection");
    };

    assert_eq!(collection.len(), 3);
    assert!(collection.bbox().is_some_and(BoundingBox::crosses_antimeridian));

    let ids: Vec<_> = collection.features().iter().map(|feature| feature.id().cloned()).collect();
    assert_eq!(ids, [Some(FeatureId::from("suva")), Some(FeatureId::Integer(2)), None]);

    let suva = &collection.features()[0];
    assert_eq!(suva.property("population"), Some(&json!(93970)));
    assert!(matches!(suva.geometry(), Some(Geometry::Point(_))));

    let line = collection.features()[1].geometry().unwrap();
    assert_eq!(line.bbox().map(BoundingBox::to_vec), Some(vec![179.0, -17.5, -179.0, -17.0]));
}

#[test]
fn test_feature_with_null_members() {
    let parsed = parse(&json!({"type": "Feature", "geometry": null, "properties": null, "id": null})).unwrap();
    let GeoJson::Feature(feature) = parsed else {
        panic!("expected a Feature");
    };
    assert!(feature.geometry().is_none());
    assert!(feature.properties().is_none());
    assert!(feature.id().is_none());
}

#[test]
fn test_antimeridian_bbox_on_geometry() {
    for bbox in [json!([177.0, -20.0, -178.0, -16.0]), json!([179.0, -10.0, -179.0, 10.0])] {
        let parsed = parse(&json!({"type": "Point", "coordinates": [178.0, -18.0], "bbox": bbox})).unwrap();
        let GeoJson::Geometry(geometry) = parsed else {
            panic!("expected a geometry");
        };
        assert!(geometry.bbox().is_some_and(BoundingBox::crosses_antimeridian));
    }
}

#[test]
fn test_collect_mode_reports_every_issue() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200, 100]}},
            {"type": "Feature", "id": false},
            {"type": "Feature", "geometry": {"type": "Polygon", "coordinates": []}}
        ]
    });

    let error = parse(&input).unwrap_err();
    assert_eq!(error.title(), "FeatureCollection");
    let locations: Vec<_> = error.issues().iter().map(|issue| issue.location()).collect();
    assert_eq!(
        locations,
        [
            "features.0.geometry.coordinates.0",
            "features.0.geometry.coordinates.1",
            "features.1.id",
            "features.2.geometry.coordinates",
        ]
    );
    assert!(error.to_string().starts_with("4 validation errors for FeatureCollection"));
}

#[test]
fn test_fail_fast_mode_stops_at_first_issue() {
    let input = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [200, 100]}},
            {"type": "Feature", "id": false}
        ]
    });

    let error = parse_with(&input, &ParseOptions::fail_fast()).unwrap_err();
    assert_eq!(error.issues().len(), 1);
    assert_eq!(error.issues()[0].location(), "features.0.geometry.coordinates.0");
    assert!(matches!(error.issues()[0].kind(), ErrorKind::CoordinateRange { .. }));
}

#[test]
fn test_serialization_field_set() {
    let parsed = parse(&json!({
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
        "properties": {"k": "v"},
        "id": 9
    }))
    .unwrap();
    assert_eq!(parsed.object_type(), ObjectType::Feature);

    let output = serde_json::to_value(&parsed).unwrap();
    assert_eq!(
        output,
        json!({
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [1.0, 2.0], "bbox": null},
            "properties": {"k": "v"},
            "id": 9,
            "bbox": null
        })
    );
    assert_eq!(parse(&output).unwrap(), parsed);
}

#[test]
fn test_decode_errors_are_distinct() {
    assert!(matches!(from_json_str("[1, 2"), Err(GeoschemaError::Json(_))));

    let error = from_json_str(r#"{"type": "Feature", "id": 1.25}"#).unwrap_err();
    let GeoschemaError::Validation(error) = error else {
        panic!("expected a validation error");
    };
    assert!(error.to_string().contains("Feature id must be a string or an integer"));
}
