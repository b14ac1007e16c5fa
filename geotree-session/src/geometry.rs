//! Geometry types accepted at the session boundary.
//!
//! Clients ship geometry as geographic coordinates (longitude/latitude
//! degrees). The session layer extracts an envelope from the geometry,
//! validates the coordinate domain, and hands the index a projected box;
//! the index core never sees geometry documents.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use geotree::BoundingBox;

use crate::errors::{SessionError, SessionResult};

/// A 2D coordinate: x is longitude, y is latitude, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Validates that the coordinate lies in the longitude/latitude domain.
    pub fn validate(&self) -> SessionResult<()> {
        if !(-180.0..=180.0).contains(&self.x) || !(-90.0..=90.0).contains(&self.y) {
            return Err(SessionError::CoordinateOutOfRange { x: self.x, y: self.y });
        }
        Ok(())
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A geometry shipped by a client, tagged by kind.
///
/// Only the envelope of a geometry matters to the index; shapes are
/// reduced to their covering rectangle on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single position.
    Point(Coordinate),
    /// A polygon given by its exterior ring coordinates.
    Polygon(Vec<Coordinate>),
    /// A heterogeneous collection of geometries.
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Creates a point geometry.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    /// Creates a polygon from its exterior ring.
    pub fn polygon(coords: Vec<Coordinate>) -> Self {
        Geometry::Polygon(coords)
    }

    /// Computes the covering envelope of this geometry, in degrees.
    ///
    /// Fails on empty polygons/collections and on coordinates outside the
    /// longitude/latitude domain.
    pub fn bounding_box(&self) -> SessionResult<BoundingBox> {
        let mut bbox = BoundingBox::empty();
        self.extend_bbox(&mut bbox)?;
        if !bbox.is_valid() {
            return Err(SessionError::InvalidGeometry(
                "geometry has no coordinates".to_string(),
            ));
        }
        Ok(bbox)
    }

    fn extend_bbox(&self, bbox: &mut BoundingBox) -> SessionResult<()> {
        match self {
            Geometry::Point(coord) => {
                coord.validate()?;
                bbox.extend(&BoundingBox::new(coord.x, coord.y, coord.x, coord.y));
            }
            Geometry::Polygon(coords) => {
                if coords.is_empty() {
                    return Err(SessionError::InvalidGeometry("empty polygon".to_string()));
                }
                for coord in coords {
                    coord.validate()?;
                    bbox.extend(&BoundingBox::new(coord.x, coord.y, coord.x, coord.y));
                }
            }
            Geometry::GeometryCollection(members) => {
                if members.is_empty() {
                    return Err(SessionError::InvalidGeometry(
                        "empty geometry collection".to_string(),
                    ));
                }
                for member in members {
                    member.extend_bbox(bbox)?;
                }
            }
        }
        Ok(())
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(c) => write!(f, "POINT({} {})", c.x, c.y),
            Geometry::Polygon(coords) => {
                write!(f, "POLYGON((")?;
                for (i, c) in coords.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", c.x, c.y)?;
                }
                write!(f, "))")
            }
            Geometry::GeometryCollection(members) => {
                write!(f, "GEOMETRYCOLLECTION(")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, ")")
            }
        }
    }
}
