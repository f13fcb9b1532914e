//! Foreign members (RFC 7946 Section 6.1).

use serde::ser::SerializeMap;
use serde_json::{Map, Value};

use super::ObjectType;

/// Members not defined by RFC 7946 for the object they appear on.
///
/// They are kept verbatim and written back on serialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForeignMembers(Map<String, Value>);

impl ForeignMembers {
    /// Everything in `map` that is not a recognized member of `object`
    pub(crate) fn collect(map: &Map<String, Value>, object: ObjectType) -> Self {
        let recognized = object.recognized_members();
        Self(
            map.iter()
                .filter(|(key, _)| !recognized.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn serialize_into<M: SerializeMap>(&self, map: &mut M) -> Result<(), M::Error> {
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        Ok(())
    }
}
