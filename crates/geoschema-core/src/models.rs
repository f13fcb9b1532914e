/// Shared surface of every GeoJSON object struct: entry points, common
/// accessors, conversions from generic JSON, and serde support.
macro_rules! geojson_object {
    ($ty:ident, $object:expr, { $($key:literal => $field:ident),+ $(,)? }) => {
        impl $ty {
            /// Validate a generic JSON value, collecting every issue
            pub fn parse(value: &serde_json::Value) -> Result<Self, $crate::error::ValidationError> {
                Self::parse_with(value, &$crate::config::ParseOptions::default())
            }

            pub fn parse_with(
                value: &serde_json::Value,
                options: &$crate::config::ParseOptions,
            ) -> Result<Self, $crate::error::ValidationError> {
                let mut ctx = $crate::validation::ParseContext::new(options);
                let parsed = Self::read(&mut ctx, value);
                ctx.finish($object.as_str(), parsed)
            }

            pub fn bbox(&self) -> Option<&$crate::models::BoundingBox> {
                self.bbox.as_ref()
            }

            pub fn with_bbox(mut self, bbox: $crate::models::BoundingBox) -> Self {
                self.bbox = Some(bbox);
                self
            }

            pub fn foreign_members(&self) -> &$crate::models::ForeignMembers {
                &self.foreign_members
            }
        }

        impl TryFrom<&serde_json::Value> for $ty {
            type Error = $crate::error::ValidationError;

            fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl TryFrom<serde_json::Value> for $ty {
            type Error = $crate::error::ValidationError;

            fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use serde::ser::SerializeMap;

                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", &$object)?;
                $(map.serialize_entry($key, &self.$field)?;)+
                map.serialize_entry("bbox", &self.bbox)?;
                self.foreign_members.serialize_into(&mut map)?;
                map.end()
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                Self::parse(&value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod bbox;
pub mod coordinate;
pub mod feature;
pub mod geojson;
pub mod geometry;
pub mod members;
pub mod object_type;
pub mod ring;

pub use bbox::BoundingBox;
pub use coordinate::Coordinate;
pub use feature::{Feature, FeatureCollection, FeatureId};
pub use geojson::GeoJson;
pub use geometry::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
pub use members::ForeignMembers;
pub use object_type::{Family, GeometryType, ObjectType};
pub use ring::LinearRing;
