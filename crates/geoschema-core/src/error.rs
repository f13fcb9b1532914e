//! Error types for geoschema

use std::fmt;
use thiserror::Error;

use crate::models::{Coordinate, Family, ObjectType};

#[derive(Debug, Error)]
pub enum GeoschemaError {
    // Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Decoding errors
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, GeoschemaError>;

/// Coordinate axis checked by the position validator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    /// Absolute bound of the axis in degrees
    pub fn limit(&self) -> f64 {
        match self {
            Axis::Longitude => 180.0,
            Axis::Latitude => 90.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Longitude => write!(f, "longitude"),
            Axis::Latitude => write!(f, "latitude"),
        }
    }
}

/// Edge of a bounding box that carries a range constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BboxEdge {
    West,
    South,
    East,
    North,
}

impl BboxEdge {
    pub fn limit(&self) -> f64 {
        match self {
            BboxEdge::West | BboxEdge::East => Axis::Longitude.limit(),
            BboxEdge::South | BboxEdge::North => Axis::Latitude.limit(),
        }
    }
}

impl fmt::Display for BboxEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BboxEdge::West => write!(f, "west longitude"),
            BboxEdge::South => write!(f, "south latitude"),
            BboxEdge::East => write!(f, "east longitude"),
            BboxEdge::North => write!(f, "north latitude"),
        }
    }
}

/// A single validation failure.
///
/// The rendered messages are part of the public contract: callers match on
/// substrings such as `"Linear Ring length must be >=4"` or
/// `"RFC 7946 Section 7.1"`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErrorKind {
    #[error("Input should be '{expected}', got {found}")]
    TypeMismatch { expected: &'static str, found: String },

    #[error("Input tag {found} found using 'type' does not match any of the expected tags: {expected}")]
    UnknownType { found: String, expected: String },

    #[error("Field required")]
    MissingField,

    #[error("Input should be a valid {expected}, got {found}")]
    InvalidType { expected: &'static str, found: &'static str },

    #[error("{axis} must be in [-{limit}, {limit}], got {value}", limit = .axis.limit())]
    CoordinateRange { axis: Axis, value: f64 },

    #[error("position must have 2 or 3 elements (longitude, latitude[, altitude]), got {found}")]
    PositionLength { found: usize },

    #[error("bbox must have 2, 4, or 6 elements, got {found}")]
    BboxLength { found: usize },

    #[error("{edge} must be in [-{limit}, {limit}], got {value}", limit = .edge.limit())]
    BboxRange { edge: BboxEdge, value: f64 },

    #[error("north latitude ({north}) must be greater than or equal to south latitude ({south})")]
    BboxOrder { south: f64, north: f64 },

    #[error("depth ({depth}) must be less than or equal to height ({height})")]
    BboxDepthOrder { depth: f64, height: f64 },

    #[error(
        "antimeridian-crossing bbox (west {west} > east {east}) must span less than 360 degrees, got {span}"
    )]
    BboxSpan { west: f64, east: f64, span: f64 },

    #[error("Linear Ring length must be >=4, not {found}")]
    RingLength { found: usize },

    #[error(
        "Linear Rings must start and end at the same coordinate (RFC 7946 Section 3.1.6): first {first}, last {last}"
    )]
    RingNotClosed { first: Coordinate, last: Coordinate },

    #[error(
        "LineString must have at least {minimum} coordinates (got {found}). According to RFC 7946 Section 3.1.4, LineString coordinates must be an array of two or more positions."
    )]
    TooShort { minimum: usize, found: usize },

    #[error(
        "Polygon must have at least one linear ring (the exterior ring). According to RFC 7946 Section 3.1.6, Polygon coordinates must be an array of linear ring coordinate arrays."
    )]
    EmptyPolygon,

    #[error(
        "'{member}' member is not allowed on {object} objects: it defines {owner} objects, and RFC 7946 Section 7.1 forbids mixing GeoJSON object types"
    )]
    ForbiddenMember { member: &'static str, object: ObjectType, owner: Family },

    #[error("Feature id must be a string or an integer, got {found}")]
    IdType { found: String },
}

/// One step in the location of an issue inside the input tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathSegment {
    Key(&'static str),
    Index(usize),
}

impl From<&'static str> for PathSegment {
    fn from(key: &'static str) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// A failure together with the place it was found
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    path: Vec<PathSegment>,
    kind: ErrorKind,
}

impl ValidationIssue {
    pub fn new(path: Vec<PathSegment>, kind: ErrorKind) -> Self {
        Self { path, kind }
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Dotted location, e.g. `coordinates.0.3`; empty for the root object
    pub fn location(&self) -> String {
        self.path.iter().map(ToString::to_string).collect::<Vec<_>>().join(".")
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = self.location();
        if location.is_empty() {
            write!(f, "  {}", self.kind)
        } else {
            write!(f, "{}\n  {}", location, self.kind)
        }
    }
}

/// Failure of one parse call, listing every issue found.
///
/// `Display` is written by hand: it renders a header line followed by one
/// block per issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    title: String,
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(title: impl Into<String>, issues: Vec<ValidationIssue>) -> Self {
        Self { title: title.into(), issues }
    }

    /// Error with a single issue located at the root
    pub fn single(title: impl Into<String>, kind: ErrorKind) -> Self {
        Self::new(title, vec![ValidationIssue::new(Vec::new(), kind)])
    }

    /// Name of the object that failed, e.g. `Polygon`
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ErrorKind> {
        self.issues.iter().map(ValidationIssue::kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.title
        )?;
        for issue in &self.issues {
            write!(f, "\n{}", issue)?;
        }
        Ok(())
    }
}
