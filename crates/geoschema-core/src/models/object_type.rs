//! GeoJSON object type literals (RFC 7946 Section 1.4).
//!
//! The nine `type` discriminators are case-sensitive; seven of them name
//! geometry types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ErrorKind;

pub const POINT: &str = "Point";
pub const MULTI_POINT: &str = "MultiPoint";
pub const LINE_STRING: &str = "LineString";
pub const MULTI_LINE_STRING: &str = "MultiLineString";
pub const POLYGON: &str = "Polygon";
pub const MULTI_POLYGON: &str = "MultiPolygon";
pub const GEOMETRY_COLLECTION: &str = "GeometryCollection";
pub const FEATURE: &str = "Feature";
pub const FEATURE_COLLECTION: &str = "FeatureCollection";

/// Geometry type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    pub const ALL: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::MultiPoint,
        GeometryType::LineString,
        GeometryType::MultiLineString,
        GeometryType::Polygon,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];

    pub fn as_str(&self) -> &'static str {
        self.object_type().as_str()
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            GeometryType::Point => ObjectType::Point,
            GeometryType::MultiPoint => ObjectType::MultiPoint,
            GeometryType::LineString => ObjectType::LineString,
            GeometryType::MultiLineString => ObjectType::MultiLineString,
            GeometryType::Polygon => ObjectType::Polygon,
            GeometryType::MultiPolygon => ObjectType::MultiPolygon,
            GeometryType::GeometryCollection => ObjectType::GeometryCollection,
        }
    }

    /// Quoted, comma-separated list of the literals, for error messages
    pub(crate) fn expected_tags() -> String {
        quoted(Self::ALL.iter().map(GeometryType::as_str))
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeometryType {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::ALL
            .into_iter()
            .find(|geometry_type| geometry_type.as_str() == s)
            .ok_or_else(|| ErrorKind::UnknownType {
                found: format!("'{}'", s),
                expected: GeometryType::expected_tags(),
            })
    }
}

/// Object family used by the type-mixing rules of RFC 7946 Section 7.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Geometry,
    Feature,
    FeatureCollection,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Geometry => f.write_str("Geometry"),
            Family::Feature => f.write_str(FEATURE),
            Family::FeatureCollection => f.write_str(FEATURE_COLLECTION),
        }
    }
}

/// Any of the nine GeoJSON object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
    Feature,
    FeatureCollection,
}

impl ObjectType {
    pub const ALL: [ObjectType; 9] = [
        ObjectType::Point,
        ObjectType::MultiPoint,
        ObjectType::LineString,
        ObjectType::MultiLineString,
        ObjectType::Polygon,
        ObjectType::MultiPolygon,
        ObjectType::GeometryCollection,
        ObjectType::Feature,
        ObjectType::FeatureCollection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Point => POINT,
            ObjectType::MultiPoint => MULTI_POINT,
            ObjectType::LineString => LINE_STRING,
            ObjectType::MultiLineString => MULTI_LINE_STRING,
            ObjectType::Polygon => POLYGON,
            ObjectType::MultiPolygon => MULTI_POLYGON,
            ObjectType::GeometryCollection => GEOMETRY_COLLECTION,
            ObjectType::Feature => FEATURE,
            ObjectType::FeatureCollection => FEATURE_COLLECTION,
        }
    }

    pub fn family(&self) -> Family {
        match self {
            ObjectType::Feature => Family::Feature,
            ObjectType::FeatureCollection => Family::FeatureCollection,
            _ => Family::Geometry,
        }
    }

    pub fn geometry_type(&self) -> Option<GeometryType> {
        GeometryType::ALL
            .into_iter()
            .find(|geometry_type| geometry_type.object_type() == *self)
    }

    /// Members that belong to another family and must not appear on this type
    pub fn forbidden_members(&self) -> &'static [(&'static str, Family)] {
        const ON_GEOMETRY: &[(&str, Family)] = &[
            ("geometry", Family::Feature),
            ("properties", Family::Feature),
            ("features", Family::FeatureCollection),
        ];
        const ON_FEATURE: &[(&str, Family)] = &[
            ("coordinates", Family::Geometry),
            ("geometries", Family::Geometry),
            ("features", Family::FeatureCollection),
        ];
        const ON_FEATURE_COLLECTION: &[(&str, Family)] = &[
            ("coordinates", Family::Geometry),
            ("geometries", Family::Geometry),
            ("geometry", Family::Feature),
            ("properties", Family::Feature),
        ];

        match self.family() {
            Family::Geometry => ON_GEOMETRY,
            Family::Feature => ON_FEATURE,
            Family::FeatureCollection => ON_FEATURE_COLLECTION,
        }
    }

    /// Members defined by RFC 7946 for this type; anything else is foreign
    pub fn recognized_members(&self) -> &'static [&'static str] {
        match self {
            ObjectType::GeometryCollection => &["type", "geometries", "bbox"],
            ObjectType::Feature => &["type", "geometry", "properties", "id", "bbox"],
            ObjectType::FeatureCollection => &["type", "features", "bbox"],
            _ => &["type", "coordinates", "bbox"],
        }
    }

    pub(crate) fn expected_tags() -> String {
        quoted(Self::ALL.iter().map(ObjectType::as_str))
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|object_type| object_type.as_str() == s)
            .ok_or_else(|| ErrorKind::UnknownType {
                found: format!("'{}'", s),
                expected: ObjectType::expected_tags(),
            })
    }
}

impl From<GeometryType> for ObjectType {
    fn from(geometry_type: GeometryType) -> Self {
        geometry_type.object_type()
    }
}

fn quoted<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.map(|name| format!("'{}'", name)).collect::<Vec<_>>().join(", ")
}
