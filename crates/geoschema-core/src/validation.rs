//! Parse context shared by every object reader.
//!
//! Readers walk the generic `serde_json::Value` tree and return `None` once
//! they have reported at least one issue. The context records each issue with
//! the path at which it was found, and in fail-fast mode it drops everything
//! after the first.

use serde_json::{Map, Value};

use crate::config::{ErrorMode, ParseOptions};
use crate::error::{ErrorKind, PathSegment, ValidationError, ValidationIssue};
use crate::models::ObjectType;

pub(crate) struct ParseContext {
    mode: ErrorMode,
    path: Vec<PathSegment>,
    issues: Vec<ValidationIssue>,
}

impl ParseContext {
    pub(crate) fn new(options: &ParseOptions) -> Self {
        Self { mode: options.error_mode, path: Vec::new(), issues: Vec::new() }
    }

    /// Record an issue at the current path
    pub(crate) fn report(&mut self, kind: ErrorKind) {
        if self.halted() {
            return;
        }
        self.issues.push(ValidationIssue::new(self.path.clone(), kind));
    }

    /// True once fail-fast mode has seen its first issue
    pub(crate) fn halted(&self) -> bool {
        self.mode == ErrorMode::FailFast && !self.issues.is_empty()
    }

    /// Run `read` one level deeper in the path
    pub(crate) fn at<T>(
        &mut self,
        segment: impl Into<PathSegment>,
        read: impl FnOnce(&mut Self) -> Option<T>,
    ) -> Option<T> {
        self.path.push(segment.into());
        let result = read(self);
        self.path.pop();
        result
    }

    /// Turn the outcome of a top-level read into the public result
    pub(crate) fn finish<T>(self, title: &str, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.issues.is_empty() => Ok(value),
            _ => {
                tracing::debug!(object = title, issues = self.issues.len(), "GeoJSON validation failed");
                Err(ValidationError::new(title, self.issues))
            }
        }
    }

    pub(crate) fn object<'v>(&mut self, value: &'v Value) -> Option<&'v Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.report(ErrorKind::InvalidType { expected: "object", found: kind_of(other) });
                None
            }
        }
    }

    pub(crate) fn array<'v>(&mut self, value: &'v Value) -> Option<&'v [Value]> {
        match value {
            Value::Array(items) => Some(items),
            other => {
                self.report(ErrorKind::InvalidType { expected: "array", found: kind_of(other) });
                None
            }
        }
    }

    pub(crate) fn number(&mut self, value: &Value) -> Option<f64> {
        match value.as_f64() {
            Some(number) => Some(number),
            None => {
                self.report(ErrorKind::InvalidType { expected: "number", found: kind_of(value) });
                None
            }
        }
    }

    /// Read every element, keeping going after failures unless halted
    pub(crate) fn each<T>(
        &mut self,
        items: &[Value],
        mut read: impl FnMut(&mut Self, &Value) -> Option<T>,
    ) -> Option<Vec<T>> {
        let mut values = Vec::with_capacity(items.len());
        let mut failed = false;

        for (index, item) in items.iter().enumerate() {
            match self.at(index, |ctx| read(ctx, item)) {
                Some(value) => values.push(value),
                None => failed = true,
            }
            if self.halted() {
                return None;
            }
        }

        if failed {
            None
        } else {
            Some(values)
        }
    }

    /// Read a member that must be present and non-null
    pub(crate) fn required<T>(
        &mut self,
        map: &Map<String, Value>,
        key: &'static str,
        read: impl FnOnce(&mut Self, &Value) -> Option<T>,
    ) -> Option<T> {
        self.at(key, |ctx| match map.get(key) {
            Some(Value::Null) | None => {
                ctx.report(ErrorKind::MissingField);
                None
            }
            Some(value) => read(ctx, value),
        })
    }

    /// Read a member where absence and `null` both mean "not set".
    ///
    /// The outer `Option` is the success flag, the inner one the value.
    pub(crate) fn optional<T>(
        &mut self,
        map: &Map<String, Value>,
        key: &'static str,
        read: impl FnOnce(&mut Self, &Value) -> Option<T>,
    ) -> Option<Option<T>> {
        match map.get(key) {
            Some(Value::Null) | None => Some(None),
            Some(value) => self.at(key, |ctx| read(ctx, value)).map(Some),
        }
    }

    /// Check the `type` discriminator against the expected literal
    pub(crate) fn expect_type(&mut self, map: &Map<String, Value>, expected: ObjectType) -> Option<()> {
        self.required(map, "type", |ctx, value| {
            if value.as_str() == Some(expected.as_str()) {
                Some(())
            } else {
                ctx.report(ErrorKind::TypeMismatch {
                    expected: expected.as_str(),
                    found: value.to_string(),
                });
                None
            }
        })
    }

    /// Type-mixing guard (RFC 7946 Section 7.1).
    ///
    /// Looks only at the key set; the values of forbidden members are never read.
    pub(crate) fn reject_forbidden_members(
        &mut self,
        map: &Map<String, Value>,
        object: ObjectType,
    ) -> Option<()> {
        let mut clean = true;
        for &(member, owner) in object.forbidden_members() {
            if map.contains_key(member) {
                clean = false;
                self.at(member, |ctx| {
                    ctx.report(ErrorKind::ForbiddenMember { member, object, owner });
                    None::<()>
                });
            }
        }
        clean.then_some(())
    }

    /// Common preamble for every object reader: must be an object, and must
    /// not mix families
    pub(crate) fn open<'v>(
        &mut self,
        value: &'v Value,
        object: ObjectType,
    ) -> Option<&'v Map<String, Value>> {
        let map = self.object(value)?;
        self.reject_forbidden_members(map, object)?;
        Some(map)
    }
}

/// Name of the JSON kind of a value, for messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect() -> ParseContext {
        ParseContext::new(&ParseOptions::default())
    }

    #[test]
    fn test_each_collects_all_failures() {
        let mut ctx = collect();
        let items = json!([1, "two", 3, null]);
        let items = items.as_array().unwrap();

        let result = ctx.each(items, |ctx, item| ctx.number(item));
        assert!(result.is_none());

        let error = ctx.finish("Numbers", result).unwrap_err();
        let locations: Vec<_> = error.issues().iter().map(|issue| issue.location()).collect();
        assert_eq!(locations, ["1", "3"]);
    }

    #[test]
    fn test_each_stops_in_fail_fast_mode() {
        let mut ctx = ParseContext::new(&ParseOptions::fail_fast());
        let items = json!(["a", "b", "c"]);
        let items = items.as_array().unwrap();

        let result = ctx.each(items, |ctx, item| ctx.number(item));
        let error = ctx.finish("Numbers", result).unwrap_err();
        assert_eq!(error.issues().len(), 1);
        assert_eq!(error.issues()[0].location(), "0");
    }

    #[test]
    fn test_required_reports_missing_and_null() {
        let mut ctx = collect();
        let map = json!({"a": null});
        let map = map.as_object().unwrap();

        assert!(ctx.required(map, "a", |_, v| Some(v.clone())).is_none());
        assert!(ctx.required(map, "b", |_, v| Some(v.clone())).is_none());

        let error = ctx.finish::<()>("Object", None).unwrap_err();
        assert_eq!(error.issues().len(), 2);
        assert!(error.kinds().all(|kind| *kind == ErrorKind::MissingField));
    }

    #[test]
    fn test_optional_treats_null_as_absent() {
        let mut ctx = collect();
        let map = json!({"a": null, "b": 4});
        let map = map.as_object().unwrap();

        assert_eq!(ctx.optional(map, "a", |ctx, v| ctx.number(v)), Some(None));
        assert_eq!(ctx.optional(map, "missing", |ctx, v| ctx.number(v)), Some(None));
        assert_eq!(ctx.optional(map, "b", |ctx, v| ctx.number(v)), Some(Some(4.0)));
        assert!(ctx.finish("Object", Some(())).is_ok());
    }

    #[test]
    fn test_expect_type_mismatch_names_expected_literal() {
        let mut ctx = collect();
        let map = json!({"type": "Point"});
        let map = map.as_object().unwrap();

        assert!(ctx.expect_type(map, ObjectType::Polygon).is_none());
        let error = ctx.finish::<()>("Polygon", None).unwrap_err();
        assert!(error.to_string().contains("Input should be 'Polygon'"));
        assert_eq!(error.issues()[0].location(), "type");
    }

    #[test]
    fn test_forbidden_members_reported_per_key() {
        let mut ctx = collect();
        let map = json!({"type": "Feature", "coordinates": [0, 0], "features": [], "extra": 1});
        let map = map.as_object().unwrap();

        assert!(ctx.reject_forbidden_members(map, ObjectType::Feature).is_none());
        let error = ctx.finish::<()>("Feature", None).unwrap_err();
        let locations: Vec<_> = error.issues().iter().map(|issue| issue.location()).collect();
        assert_eq!(locations, ["coordinates", "features"]);
    }

    #[test]
    fn test_open_rejects_non_objects() {
        let mut ctx = collect();
        assert!(ctx.open(&json!([0, 0]), ObjectType::Point).is_none());
        let error = ctx.finish::<()>("Point", None).unwrap_err();
        assert_eq!(
            error.issues()[0].kind(),
            &ErrorKind::InvalidType { expected: "object", found: "array" }
        );
    }
}
