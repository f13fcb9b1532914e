//! Linear rings (RFC 7946 Section 3.1.6).

use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorKind, ValidationError, ValidationIssue};
use crate::validation::ParseContext;

use super::coordinate::{read_positions, Coordinate};

/// Closed sequence of at least four positions whose first and last
/// positions are equal
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LinearRing(Vec<Coordinate>);

impl LinearRing {
    pub const MIN_POSITIONS: usize = 4;

    pub fn new(positions: Vec<Coordinate>) -> Result<Self, ValidationError> {
        let violations = Self::violations(&positions);
        if violations.is_empty() {
            Ok(Self(positions))
        } else {
            let issues = violations
                .into_iter()
                .map(|kind| ValidationIssue::new(Vec::new(), kind))
                .collect();
            Err(ValidationError::new("LinearRing", issues))
        }
    }

    /// Both the length and the closure rule are checked, so a short open ring
    /// yields two violations
    fn violations(positions: &[Coordinate]) -> Vec<ErrorKind> {
        let mut violations = Vec::new();
        if positions.len() < Self::MIN_POSITIONS {
            violations.push(ErrorKind::RingLength { found: positions.len() });
        }
        if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
            if first != last {
                violations.push(ErrorKind::RingNotClosed { first: *first, last: *last });
            }
        }
        violations
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn into_positions(self) -> Vec<Coordinate> {
        self.0
    }
}

pub(crate) fn read_ring(ctx: &mut ParseContext, value: &Value) -> Option<LinearRing> {
    let positions = read_positions(ctx, value)?;
    let violations = LinearRing::violations(&positions);
    if violations.is_empty() {
        Some(LinearRing(positions))
    } else {
        for kind in violations {
            ctx.report(kind);
        }
        None
    }
}

/// Rings of one polygon; at least the exterior ring must be present
pub(crate) fn read_polygon_rings(ctx: &mut ParseContext, value: &Value) -> Option<Vec<LinearRing>> {
    let items = ctx.array(value)?;
    if items.is_empty() {
        ctx.report(ErrorKind::EmptyPolygon);
        return None;
    }
    ctx.each(items, read_ring)
}
