//! Feature and FeatureCollection objects (RFC 7946 Sections 3.2 and 3.3).

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ErrorKind;
use crate::validation::{kind_of, ParseContext};

use super::bbox::{read_bbox, BoundingBox};
use super::geometry::Geometry;
use super::members::ForeignMembers;
use super::object_type::ObjectType;

/// Feature identifier: a string or an integer.
///
/// Integers cover the whole range JSON numbers can carry without precision
/// loss, `i64::MIN` through `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum FeatureId {
    String(String),
    Integer(i128),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::String(id) => f.write_str(id),
            FeatureId::Integer(id) => write!(f, "{}", id),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        FeatureId::String(id.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        FeatureId::String(id)
    }
}

impl From<i64> for FeatureId {
    fn from(id: i64) -> Self {
        FeatureId::Integer(id.into())
    }
}

impl From<u64> for FeatureId {
    fn from(id: u64) -> Self {
        FeatureId::Integer(id.into())
    }
}

/// Spatially bounded entity with optional geometry, properties and id
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Option<Geometry>,
    properties: Option<Map<String, Value>>,
    id: Option<FeatureId>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(Feature, ObjectType::Feature, {
    "geometry" => geometry,
    "properties" => properties,
    "id" => id,
});

impl Feature {
    pub fn new(geometry: Option<Geometry>) -> Self {
        Self {
            geometry,
            properties: None,
            id: None,
            bbox: None,
            foreign_members: ForeignMembers::default(),
        }
    }

    pub fn with_properties(mut self, properties: Map<String, Value>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_id(mut self, id: impl Into<FeatureId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.properties.as_ref()
    }

    /// Look up a single property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }

    pub fn id(&self) -> Option<&FeatureId> {
        self.id.as_ref()
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::Feature)?;
        let type_ok = ctx.expect_type(map, ObjectType::Feature);
        let bbox = read_bbox(ctx, map);
        let geometry = ctx.optional(map, "geometry", Geometry::read);
        let properties = ctx.optional(map, "properties", read_properties);
        let id = ctx.optional(map, "id", read_id);

        type_ok?;
        Some(Self {
            geometry: geometry?,
            properties: properties?,
            id: id?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::Feature),
        })
    }
}

/// Properties are stored verbatim; only the mapping shape is checked
fn read_properties(ctx: &mut ParseContext, value: &Value) -> Option<Map<String, Value>> {
    ctx.object(value).cloned()
}

fn read_id(ctx: &mut ParseContext, value: &Value) -> Option<FeatureId> {
    match value {
        Value::String(id) => Some(FeatureId::String(id.clone())),
        Value::Number(number) => {
            let integer = number.as_i64().map(i128::from).or_else(|| number.as_u64().map(i128::from));
            match integer {
                Some(id) => Some(FeatureId::Integer(id)),
                None => {
                    ctx.report(ErrorKind::IdType { found: format!("{} {}", kind_of(value), number) });
                    None
                }
            }
        }
        other => {
            ctx.report(ErrorKind::IdType { found: kind_of(other).to_string() });
            None
        }
    }
}

/// Ordered collection of features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    features: Vec<Feature>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(FeatureCollection, ObjectType::FeatureCollection, { "features" => features });

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features, bbox: None, foreign_members: ForeignMembers::default() }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::FeatureCollection)?;
        let type_ok = ctx.expect_type(map, ObjectType::FeatureCollection);
        let bbox = read_bbox(ctx, map);
        let features = ctx.required(map, "features", |ctx, value| {
            let items = ctx.array(value)?;
            ctx.each(items, Feature::read)
        });

        type_ok?;
        Some(Self {
            features: features?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::FeatureCollection),
        })
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
