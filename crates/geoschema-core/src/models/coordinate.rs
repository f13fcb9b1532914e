//! Validated positions.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

use crate::error::{Axis, ErrorKind, ValidationError, ValidationIssue};
use crate::validation::ParseContext;

const REL_TOLERANCE: f64 = 1e-9;
const ABS_TOLERANCE: f64 = 1e-9;

/// A (longitude, latitude, optional altitude) position in WGS 84 degrees.
///
/// Equality is tolerance-based: two positions are equal when longitude and
/// latitude are close and the altitudes are either both absent or both
/// present and close. `180` and `-180` longitude stay distinct, as do the
/// two poles. The relation is not transitive, so `Coordinate` is not `Eq`
/// and not `Hash`.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
    alt: Option<f64>,
}

impl Coordinate {
    /// Create a position, checking longitude against [-180, 180] and
    /// latitude against [-90, 90]. Altitude is unconstrained.
    pub fn new(lon: f64, lat: f64, alt: Option<f64>) -> Result<Self, ValidationError> {
        let issues: Vec<_> = Self::violations(lon, lat)
            .into_iter()
            .map(|(index, kind)| ValidationIssue::new(vec![index.into()], kind))
            .collect();

        if issues.is_empty() {
            Ok(Self { lon, lat, alt })
        } else {
            Err(ValidationError::new("Coordinate", issues))
        }
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn alt(&self) -> Option<f64> {
        self.alt
    }

    /// Number of components: 2 without altitude, 3 with
    pub fn dimensions(&self) -> usize {
        if self.alt.is_some() {
            3
        } else {
            2
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        let mut values = vec![self.lon, self.lat];
        values.extend(self.alt);
        values
    }

    /// Range violations keyed by the array index of the offending component
    fn violations(lon: f64, lat: f64) -> Vec<(usize, ErrorKind)> {
        let mut violations = Vec::new();
        if !in_range(lon, Axis::Longitude) {
            violations.push((0, ErrorKind::CoordinateRange { axis: Axis::Longitude, value: lon }));
        }
        if !in_range(lat, Axis::Latitude) {
            violations.push((1, ErrorKind::CoordinateRange { axis: Axis::Latitude, value: lat }));
        }
        violations
    }
}

fn in_range(value: f64, axis: Axis) -> bool {
    (-axis.limit()..=axis.limit()).contains(&value)
}

/// Closeness with both a relative and an absolute tolerance
pub(crate) fn is_close(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff <= (REL_TOLERANCE * a.abs().max(b.abs())).max(ABS_TOLERANCE)
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        let alt_equal = match (self.alt, other.alt) {
            (None, None) => true,
            (Some(a), Some(b)) => is_close(a, b),
            _ => false,
        };
        is_close(self.lon, other.lon) && is_close(self.lat, other.lat) && alt_equal
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alt {
            Some(alt) => write!(f, "[{}, {}, {}]", self.lon, self.lat, alt),
            None => write!(f, "[{}, {}]", self.lon, self.lat),
        }
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.dimensions()))?;
        seq.serialize_element(&self.lon)?;
        seq.serialize_element(&self.lat)?;
        if let Some(alt) = &self.alt {
            seq.serialize_element(alt)?;
        }
        seq.end()
    }
}

/// Read a `[lon, lat]` or `[lon, lat, alt]` array
pub(crate) fn read_position(ctx: &mut ParseContext, value: &Value) -> Option<Coordinate> {
    let items = ctx.array(value)?;
    if !(2..=3).contains(&items.len()) {
        ctx.report(ErrorKind::PositionLength { found: items.len() });
        return None;
    }

    let numbers = ctx.each(items, |ctx, item| ctx.number(item))?;
    let (lon, lat, alt) = (numbers[0], numbers[1], numbers.get(2).copied());

    let violations = Coordinate::violations(lon, lat);
    if violations.is_empty() {
        Some(Coordinate { lon, lat, alt })
    } else {
        for (index, kind) in violations {
            ctx.at(index, |ctx| {
                ctx.report(kind);
                None::<()>
            });
        }
        None
    }
}

/// Read an array of positions
pub(crate) fn read_positions(ctx: &mut ParseContext, value: &Value) -> Option<Vec<Coordinate>> {
    let items = ctx.array(value)?;
    ctx.each(items, read_position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseOptions;
    use serde_json::json;

    fn coord(lon: f64, lat: f64, alt: Option<f64>) -> Coordinate {
        Coordinate::new(lon, lat, alt).unwrap()
    }

    #[test]
    fn test_coordinate_equality() {
        let cases = [
            (coord(0.0, 0.0, None), coord(0.0, 0.0, None), true),
            (coord(0.0, 0.0, Some(0.0)), coord(0.0, 0.0, Some(0.0)), true),
            (coord(0.0, 0.0, None), coord(0.0, 0.0, Some(0.0)), false),
            (coord(1.0, 0.0, None), coord(0.0, 0.0, None), false),
            (coord(0.0, 1.0, None), coord(0.0, 0.0, None), false),
            (coord(0.0, 0.0, Some(1.0)), coord(0.0, 0.0, Some(0.0)), false),
            (coord(180.0, 0.0, None), coord(-180.0, 0.0, None), false),
            (coord(0.0, 90.0, None), coord(0.0, -90.0, None), false),
            (coord(0.1, 0.1, None), coord(0.1, 0.1, None), true),
            (coord(0.1 + 1e-10, 0.1, None), coord(0.1, 0.1, None), true),
        ];

        for (a, b, expected) in cases {
            assert_eq!(a == b, expected, "{} == {} should be {}", a, b, expected);
        }
    }

    #[test]
    fn test_boundary_values_accepted() {
        for (lon, lat) in [
            (-180.0, -90.0),
            (-180.0, 90.0),
            (180.0, -90.0),
            (180.0, 90.0),
            (0.0, -90.0),
            (0.0, 90.0),
        ] {
            let c = coord(lon, lat, None);
            assert_eq!(c.lon(), lon);
            assert_eq!(c.lat(), lat);
            assert_eq!(c.alt(), None);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        let error = Coordinate::new(181.0, 91.0, None).unwrap_err();
        assert_eq!(error.issues().len(), 2);
        assert!(error.to_string().contains("longitude must be in [-180, 180], got 181"));
        assert!(error.to_string().contains("latitude must be in [-90, 90], got 91"));

        assert!(Coordinate::new(f64::NAN, 0.0, None).is_err());
    }

    #[test]
    fn test_altitude_unconstrained() {
        let c = coord(10.5, 20.3, Some(-11034.0));
        assert_eq!(c.alt(), Some(-11034.0));
        assert_eq!(c.dimensions(), 3);
        assert_eq!(c.to_string(), "[10.5, 20.3, -11034]");
    }

    #[test]
    fn test_serialize_keeps_dimension() {
        assert_eq!(serde_json::to_value(coord(1.5, 2.0, None)).unwrap(), json!([1.5, 2.0]));
        assert_eq!(
            serde_json::to_value(coord(1.5, 2.0, Some(3.0))).unwrap(),
            json!([1.5, 2.0, 3.0])
        );
    }

    #[test]
    fn test_read_position_errors() {
        let mut ctx = ParseContext::new(&ParseOptions::default());
        assert!(read_position(&mut ctx, &json!([0, 0, 0, 0])).is_none());
        assert!(read_position(&mut ctx, &json!(["0", 0])).is_none());
        assert!(read_position(&mut ctx, &json!([0, -91])).is_none());

        let error = ctx.finish::<()>("Point", None).unwrap_err();
        let kinds: Vec<_> = error.kinds().cloned().collect();
        assert_eq!(kinds[0], ErrorKind::PositionLength { found: 4 });
        assert_eq!(kinds[1], ErrorKind::InvalidType { expected: "number", found: "string" });
        assert_eq!(kinds[2], ErrorKind::CoordinateRange { axis: Axis::Latitude, value: -91.0 });
        assert_eq!(error.issues()[2].location(), "1");
    }
}
