//! Geoschema Core - GeoJSON (RFC 7946) validation and object model
//!
//! Parses generic JSON values into strongly typed GeoJSON objects, checking
//! coordinate ranges, line and ring rules, bounding boxes and the
//! type-mixing restrictions of RFC 7946 Section 7.1. Every issue found in
//! one parse is reported together with its location.

pub mod config;
pub mod error;
pub mod models;
mod validation;

pub use config::{ErrorMode, LayeredConfig, ParseOptions};
pub use error::{ErrorKind, GeoschemaError, Result, ValidationError, ValidationIssue};
pub use models::{
    BoundingBox, Coordinate, Feature, FeatureCollection, FeatureId, GeoJson, Geometry,
    GeometryCollection, GeometryType, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, ObjectType, Point, Polygon,
};

use serde_json::Value;

/// Validate any GeoJSON object, collecting every issue
pub fn parse(value: &Value) -> std::result::Result<GeoJson, ValidationError> {
    GeoJson::parse(value)
}

pub fn parse_with(
    value: &Value,
    options: &ParseOptions,
) -> std::result::Result<GeoJson, ValidationError> {
    GeoJson::parse_with(value, options)
}

/// Decode JSON text and validate it
pub fn from_json_str(text: &str) -> Result<GeoJson> {
    let value: Value = serde_json::from_str(text)?;
    let geojson = GeoJson::parse(&value)?;
    tracing::debug!(object = %geojson.object_type(), "parsed GeoJSON document");
    Ok(geojson)
}

/// Decode JSON text and validate it with options from a layered config
pub fn from_json_str_with(text: &str, config: &LayeredConfig) -> Result<GeoJson> {
    let value: Value = serde_json::from_str(text)?;
    let geojson = GeoJson::parse_with(&value, &config.parse_options())?;
    tracing::debug!(
        object = %geojson.object_type(),
        error_mode = ?config.error_mode.value,
        "parsed GeoJSON document"
    );
    Ok(geojson)
}
