//! Geometry objects (RFC 7946 Section 3.1).
//!
//! Each struct owns a coordinate payload of increasing nesting depth. All of
//! them are built only through validation, so an instance always satisfies
//! the position, line and ring rules.

use serde::Serialize;
use serde_json::Value;

use crate::config::ParseOptions;
use crate::error::{ErrorKind, ValidationError};
use crate::validation::{kind_of, ParseContext};

use super::bbox::{read_bbox, BoundingBox};
use super::coordinate::{read_position, read_positions, Coordinate};
use super::members::ForeignMembers;
use super::object_type::{GeometryType, ObjectType};
use super::ring::{read_polygon_rings, LinearRing};

/// Minimum number of positions in a LineString
pub const LINE_MIN_POSITIONS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    coordinates: Coordinate,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(Point, ObjectType::Point, { "coordinates" => coordinates });

impl Point {
    pub fn new(coordinates: Coordinate) -> Self {
        Self { coordinates, bbox: None, foreign_members: ForeignMembers::default() }
    }

    pub fn coordinates(&self) -> &Coordinate {
        &self.coordinates
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::Point)?;
        let type_ok = ctx.expect_type(map, ObjectType::Point);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", read_position);

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::Point),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    coordinates: Vec<Coordinate>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(MultiPoint, ObjectType::MultiPoint, { "coordinates" => coordinates });

impl MultiPoint {
    pub fn new(coordinates: Vec<Coordinate>) -> Self {
        Self { coordinates, bbox: None, foreign_members: ForeignMembers::default() }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::MultiPoint)?;
        let type_ok = ctx.expect_type(map, ObjectType::MultiPoint);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", read_positions);

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::MultiPoint),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    coordinates: Vec<Coordinate>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(LineString, ObjectType::LineString, { "coordinates" => coordinates });

impl LineString {
    pub fn new(coordinates: Vec<Coordinate>) -> Result<Self, ValidationError> {
        match line_violation(coordinates.len()) {
            Some(kind) => Err(ValidationError::single(ObjectType::LineString.as_str(), kind)),
            None => Ok(Self { coordinates, bbox: None, foreign_members: ForeignMembers::default() }),
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::LineString)?;
        let type_ok = ctx.expect_type(map, ObjectType::LineString);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", read_line);

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::LineString),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    coordinates: Vec<Vec<Coordinate>>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(MultiLineString, ObjectType::MultiLineString, { "coordinates" => coordinates });

impl MultiLineString {
    pub fn new(lines: Vec<Vec<Coordinate>>) -> Result<Self, ValidationError> {
        let issues: Vec<_> = lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| {
                line_violation(line.len())
                    .map(|kind| crate::error::ValidationIssue::new(vec![index.into()], kind))
            })
            .collect();

        if issues.is_empty() {
            Ok(Self { coordinates: lines, bbox: None, foreign_members: ForeignMembers::default() })
        } else {
            Err(ValidationError::new(ObjectType::MultiLineString.as_str(), issues))
        }
    }

    pub fn coordinates(&self) -> &[Vec<Coordinate>] {
        &self.coordinates
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::MultiLineString)?;
        let type_ok = ctx.expect_type(map, ObjectType::MultiLineString);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", |ctx, value| {
            let lines = ctx.array(value)?;
            ctx.each(lines, read_line)
        });

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::MultiLineString),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    coordinates: Vec<LinearRing>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(Polygon, ObjectType::Polygon, { "coordinates" => coordinates });

impl Polygon {
    /// First ring is the exterior, the rest are holes
    pub fn new(rings: Vec<LinearRing>) -> Result<Self, ValidationError> {
        if rings.is_empty() {
            return Err(ValidationError::single(ObjectType::Polygon.as_str(), ErrorKind::EmptyPolygon));
        }
        Ok(Self { coordinates: rings, bbox: None, foreign_members: ForeignMembers::default() })
    }

    pub fn rings(&self) -> &[LinearRing] {
        &self.coordinates
    }

    pub fn exterior(&self) -> &LinearRing {
        &self.coordinates[0]
    }

    pub fn interiors(&self) -> &[LinearRing] {
        &self.coordinates[1..]
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::Polygon)?;
        let type_ok = ctx.expect_type(map, ObjectType::Polygon);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", read_polygon_rings);

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::Polygon),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    coordinates: Vec<Vec<LinearRing>>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(MultiPolygon, ObjectType::MultiPolygon, { "coordinates" => coordinates });

impl MultiPolygon {
    pub fn new(polygons: Vec<Vec<LinearRing>>) -> Result<Self, ValidationError> {
        let issues: Vec<_> = polygons
            .iter()
            .enumerate()
            .filter(|(_, rings)| rings.is_empty())
            .map(|(index, _)| {
                crate::error::ValidationIssue::new(vec![index.into()], ErrorKind::EmptyPolygon)
            })
            .collect();

        if issues.is_empty() {
            Ok(Self { coordinates: polygons, bbox: None, foreign_members: ForeignMembers::default() })
        } else {
            Err(ValidationError::new(ObjectType::MultiPolygon.as_str(), issues))
        }
    }

    pub fn polygons(&self) -> &[Vec<LinearRing>] {
        &self.coordinates
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::MultiPolygon)?;
        let type_ok = ctx.expect_type(map, ObjectType::MultiPolygon);
        let bbox = read_bbox(ctx, map);
        let coordinates = ctx.required(map, "coordinates", |ctx, value| {
            let polygons = ctx.array(value)?;
            ctx.each(polygons, read_polygon_rings)
        });

        type_ok?;
        Some(Self {
            coordinates: coordinates?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::MultiPolygon),
        })
    }
}

/// Heterogeneous collection of geometries, possibly including further
/// collections. Nesting depth is not capped; it is bounded only by the
/// call stack.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    bbox: Option<BoundingBox>,
    foreign_members: ForeignMembers,
}

geojson_object!(GeometryCollection, ObjectType::GeometryCollection, { "geometries" => geometries });

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self { geometries, bbox: None, foreign_members: ForeignMembers::default() }
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.open(value, ObjectType::GeometryCollection)?;
        let type_ok = ctx.expect_type(map, ObjectType::GeometryCollection);
        let bbox = read_bbox(ctx, map);
        let geometries = ctx.required(map, "geometries", |ctx, value| {
            let items = ctx.array(value)?;
            ctx.each(items, Geometry::read)
        });

        type_ok?;
        Some(Self {
            geometries: geometries?,
            bbox: bbox?,
            foreign_members: ForeignMembers::collect(map, ObjectType::GeometryCollection),
        })
    }
}

/// Any of the seven geometry objects, selected by `type`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Geometry {
    Point(Point),
    MultiPoint(MultiPoint),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    pub fn parse(value: &Value) -> Result<Self, ValidationError> {
        Self::parse_with(value, &ParseOptions::default())
    }

    pub fn parse_with(value: &Value, options: &ParseOptions) -> Result<Self, ValidationError> {
        let title = declared_type(value).map_or("Geometry", |geometry_type| geometry_type.as_str());
        let mut ctx = ParseContext::new(options);
        let parsed = Self::read(&mut ctx, value);
        ctx.finish(title, parsed)
    }

    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    pub fn bbox(&self) -> Option<&BoundingBox> {
        match self {
            Geometry::Point(g) => g.bbox(),
            Geometry::MultiPoint(g) => g.bbox(),
            Geometry::LineString(g) => g.bbox(),
            Geometry::MultiLineString(g) => g.bbox(),
            Geometry::Polygon(g) => g.bbox(),
            Geometry::MultiPolygon(g) => g.bbox(),
            Geometry::GeometryCollection(g) => g.bbox(),
        }
    }

    /// Dispatch on the `type` discriminator
    pub(crate) fn read(ctx: &mut ParseContext, value: &Value) -> Option<Self> {
        let map = ctx.object(value)?;
        let geometry_type = ctx.required(map, "type", |ctx, tag| {
            let Some(tag) = tag.as_str() else {
                ctx.report(ErrorKind::InvalidType { expected: "string", found: kind_of(tag) });
                return None;
            };
            tag.parse::<GeometryType>().map_err(|kind| ctx.report(kind)).ok()
        })?;

        tracing::trace!(%geometry_type, "dispatching geometry");
        match geometry_type {
            GeometryType::Point => Point::read(ctx, value).map(Geometry::Point),
            GeometryType::MultiPoint => MultiPoint::read(ctx, value).map(Geometry::MultiPoint),
            GeometryType::LineString => LineString::read(ctx, value).map(Geometry::LineString),
            GeometryType::MultiLineString => {
                MultiLineString::read(ctx, value).map(Geometry::MultiLineString)
            }
            GeometryType::Polygon => Polygon::read(ctx, value).map(Geometry::Polygon),
            GeometryType::MultiPolygon => MultiPolygon::read(ctx, value).map(Geometry::MultiPolygon),
            GeometryType::GeometryCollection => {
                GeometryCollection::read(ctx, value).map(Geometry::GeometryCollection)
            }
        }
    }
}

impl TryFrom<&Value> for Geometry {
    type Error = ValidationError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> serde::Deserialize<'de> for Geometry {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

impl From<Point> for Geometry {
    fn from(point: Point) -> Self {
        Geometry::Point(point)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(multi_point: MultiPoint) -> Self {
        Geometry::MultiPoint(multi_point)
    }
}

impl From<LineString> for Geometry {
    fn from(line: LineString) -> Self {
        Geometry::LineString(line)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(lines: MultiLineString) -> Self {
        Geometry::MultiLineString(lines)
    }
}

impl From<Polygon> for Geometry {
    fn from(polygon: Polygon) -> Self {
        Geometry::Polygon(polygon)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(polygons: MultiPolygon) -> Self {
        Geometry::MultiPolygon(polygons)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(collection: GeometryCollection) -> Self {
        Geometry::GeometryCollection(collection)
    }
}

fn declared_type(value: &Value) -> Option<GeometryType> {
    value.get("type")?.as_str()?.parse().ok()
}

fn line_violation(len: usize) -> Option<ErrorKind> {
    (len < LINE_MIN_POSITIONS).then_some(ErrorKind::TooShort { minimum: LINE_MIN_POSITIONS, found: len })
}

/// Positions of one LineString: at least two
fn read_line(ctx: &mut ParseContext, value: &Value) -> Option<Vec<Coordinate>> {
    let positions = read_positions(ctx, value)?;
    if let Some(kind) = line_violation(positions.len()) {
        ctx.report(kind);
        return None;
    }
    Some(positions)
}
