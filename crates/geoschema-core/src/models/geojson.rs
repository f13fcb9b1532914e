//! Top-level GeoJSON object: any geometry, a feature, or a feature collection.

use serde::Serialize;
use serde_json::Value;
use std::str::FromStr;

use crate::config::ParseOptions;
use crate::error::{ErrorKind, GeoschemaError, ValidationError};
use crate::validation::{kind_of, ParseContext};

use super::feature::{Feature, FeatureCollection};
use super::geometry::Geometry;
use super::object_type::{Family, ObjectType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeoJson {
    Geometry(Geometry),
    Feature(Feature),
    FeatureCollection(FeatureCollection),
}

impl GeoJson {
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        Self::parse_with(value, &ParseOptions::default())
    }

    pub fn parse_with(value: &Value, options: &ParseOptions) -> Result<Self, ValidationError> {
        let title = value
            .get("type")
            .and_then(Value::as_str)
            .and_then(|tag| tag.parse::<ObjectType>().ok())
            .map_or("GeoJSON", |object| object.as_str());

        let mut ctx = ParseContext::new(options);
        let parsed = Self::read(&mut ctx, value);
        ctx.finish(title, parsed)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            GeoJson::Geometry(geometry) => geometry.geometry_type().object_type(),
            GeoJson::Feature(_) => ObjectType::Feature,
            GeoJson::FeatureCollection(_) => ObjectType::FeatureCollection,
        }
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.object(value)?;
        let object = ctx.required(map, "type", |ctx, tag| {
            let Some(tag) = tag.as_str() else {
                ctx.report(ErrorKind::InvalidType { expected: "string", found: kind_of(tag) });
                return None;
            };
            tag.parse::<ObjectType>().map_err(|kind| ctx.report(kind)).ok()
        })?;

        match object.family() {
            Family::Geometry => Geometry::read(ctx, value).map(GeoJson::Geometry),
            Family::Feature => Feature::read(ctx, value).map(GeoJson::Feature),
            Family::FeatureCollection => {
                FeatureCollection::read(ctx, value).map(GeoJson::FeatureCollection)
            }
        }
    }
}

impl FromStr for GeoJson {
    type Err = GeoschemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        Ok(Self::parse(&value)?)
    }
}

impl TryFrom<&Value> for GeoJson {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<Value> for GeoJson {
    type Error = ValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl<'de> serde::Deserialize<'de> for GeoJson {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Geometry> for GeoJson {
    fn from(geometry: Geometry) -> Self {
        GeoJson::Geometry(geometry)
    }
}

impl From<Feature> for GeoJson {
    fn from(feature: Feature) -> Self {
        GeoJson::Feature(feature)
    }
}

impl From<FeatureCollection> for GeoJson {
    fn from(collection: FeatureCollection) -> Self {
        GeoJson::FeatureCollection(collection)
    }
}
