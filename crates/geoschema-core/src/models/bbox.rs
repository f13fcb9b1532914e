//! Bounding boxes (RFC 7946 Section 5).

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{BboxEdge, ErrorKind, ValidationError, ValidationIssue};
use crate::validation::ParseContext;

/// Validated `bbox` member.
///
/// Four and six element boxes follow the `[west, south, (depth,) east, north,
/// (height)]` layout. A box with west > east crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingBox {
    /// Two numbers. RFC 7946 gives them no axis semantics, so only their
    /// numeric type is checked.
    Pair([f64; 2]),
    Planar {
        west: f64,
        south: f64,
        east: f64,
        north: f64,
    },
    Volumetric {
        west: f64,
        south: f64,
        depth: f64,
        east: f64,
        north: f64,
        height: f64,
    },
}

impl BoundingBox {
    /// Build a box from its flat array form
    pub fn from_slice(values: &[f64]) -> Result<Self, ValidationError> {
        Self::check(values).map_err(|kinds| {
            let issues = kinds.into_iter().map(|kind| ValidationIssue::new(Vec::new(), kind)).collect();
            ValidationError::new("BoundingBox", issues)
        })
    }

    pub(crate) fn check(values: &[f64]) -> Result<Self, Vec<ErrorKind>> {
        let bbox = match *values {
            [a, b] => return Ok(BoundingBox::Pair([a, b])),
            [west, south, east, north] => BoundingBox::Planar { west, south, east, north },
            [west, south, depth, east, north, height] => {
                BoundingBox::Volumetric { west, south, depth, east, north, height }
            }
            _ => return Err(vec![ErrorKind::BboxLength { found: values.len() }]),
        };

        let violations = bbox.violations();
        if violations.is_empty() {
            Ok(bbox)
        } else {
            Err(violations)
        }
    }

    fn violations(&self) -> Vec<ErrorKind> {
        let Some((west, south, east, north)) = self.horizontal() else {
            return Vec::new();
        };

        let mut violations: Vec<_> = [
            (BboxEdge::West, west),
            (BboxEdge::South, south),
            (BboxEdge::East, east),
            (BboxEdge::North, north),
        ]
        .into_iter()
        .filter(|(edge, value)| !(-edge.limit()..=edge.limit()).contains(value))
        .map(|(edge, value)| ErrorKind::BboxRange { edge, value })
        .collect();

        if north < south {
            violations.push(ErrorKind::BboxOrder { south, north });
        }

        if west > east {
            let span = (180.0 - west) + (east + 180.0);
            if span >= 360.0 {
                violations.push(ErrorKind::BboxSpan { west, east, span });
            }
        }

        if let BoundingBox::Volumetric { depth, height, .. } = *self {
            if depth > height {
                violations.push(ErrorKind::BboxDepthOrder { depth, height });
            }
        }

        violations
    }

    /// `(west, south, east, north)` for 4 and 6 element boxes
    pub fn horizontal(&self) -> Option<(f64, f64, f64, f64)> {
        match *self {
            BoundingBox::Pair(_) => None,
            BoundingBox::Planar { west, south, east, north }
            | BoundingBox::Volumetric { west, south, east, north, .. } => {
                Some((west, south, east, north))
            }
        }
    }

    /// True for a box whose west edge lies east of its east edge
    pub fn crosses_antimeridian(&self) -> bool {
        matches!(self.horizontal(), Some((west, _, east, _)) if west > east)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        match *self {
            BoundingBox::Pair(pair) => pair.to_vec(),
            BoundingBox::Planar { west, south, east, north } => vec![west, south, east, north],
            BoundingBox::Volumetric { west, south, depth, east, north, height } => {
                vec![west, south, depth, east, north, height]
            }
        }
    }
}

impl Serialize for BoundingBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_vec().serialize(serializer)
    }
}

/// Read the optional `bbox` member of an object
pub(crate) fn read_bbox(
    ctx: &mut ParseContext,
    map: &Map<String, Value>,
) -> Option<Option<BoundingBox>> {
    ctx.optional(map, "bbox", |ctx, value| {
        let items = ctx.array(value)?;
        let numbers = ctx.each(items, |ctx, item| ctx.number(item))?;
        match BoundingBox::check(&numbers) {
            Ok(bbox) => Some(bbox),
            Err(violations) => {
                for kind in violations {
                    ctx.report(kind);
                }
                None
            }
        }
    })
}
