//! Fixed projection between geographic degrees and the unit square.
//!
//! Every envelope stored in a session tree lives in `[0, 1]²`:
//! `u = x/360 + 0.5`, `v = y/180 + 0.5`. Snapshots apply the inverse so
//! observers see degrees again.

use geotree::BoundingBox;

/// Width of the longitude domain in degrees.
const LON_SPAN: f64 = 360.0;
/// Width of the latitude domain in degrees.
const LAT_SPAN: f64 = 180.0;

/// Maps a longitude/latitude pair into the unit square.
pub fn project(x: f64, y: f64) -> (f64, f64) {
    (x / LON_SPAN + 0.5, y / LAT_SPAN + 0.5)
}

/// Maps a unit-square position back to longitude/latitude degrees.
pub fn unproject(u: f64, v: f64) -> (f64, f64) {
    ((u - 0.5) * LON_SPAN, (v - 0.5) * LAT_SPAN)
}

/// Projects an envelope in degrees into the unit square.
pub fn project_bbox(bbox: &BoundingBox) -> BoundingBox {
    let (min_x, min_y) = project(bbox.min_x, bbox.min_y);
    let (max_x, max_y) = project(bbox.max_x, bbox.max_y);
    BoundingBox::new(min_x, min_y, max_x, max_y)
}

/// Projects a unit-square envelope back into degrees.
pub fn unproject_bbox(bbox: &BoundingBox) -> BoundingBox {
    let (min_x, min_y) = unproject(bbox.min_x, bbox.min_y);
    let (max_x, max_y) = unproject(bbox.max_x, bbox.max_y);
    BoundingBox::new(min_x, min_y, max_x, max_y)
}
