//! Geometry module - collision tests between sprites
//!
//! All tests are pure functions over [`Sprite`] values:
//!
//! - [`overlaps`]: half-open rectangle intersection
//! - [`colliding`]: rectangle or polygon collision, whichever applies
//! - [`colliding_polygons`]: exact unit-cell intersection
//! - [`approaching_from`]: would the mover hit the target on its next step
//! - [`touching`]: adjacency on any side, optionally including corners
//!
//! Polygon collision compares cell coordinates only; every polygon cell is
//! treated as 1x1 whatever its declared size.

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::types::{PolygonCell, Rect, Sprite};

/// Side a mover approaches the target from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Mover is to the left, stepping +x.
    Left,
    /// Mover is to the right, stepping -x.
    Right,
    /// Mover is above, stepping +y.
    Above,
    /// Mover is below, stepping -y.
    Below,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Above,
        Direction::Below,
        Direction::Left,
        Direction::Right,
    ];
}

/// True iff the two rectangles intersect on both axes.
///
/// A rectangle with zero width or height never overlaps anything.
#[inline]
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Collision between two sprites.
///
/// Delegates to [`colliding_polygons`] when either side carries a polygon,
/// otherwise compares the two rectangles.
pub fn colliding(a: &Sprite, b: &Sprite) -> bool {
    if a.has_polygon() || b.has_polygon() {
        colliding_polygons(a, b)
    } else {
        overlaps(a.rect(), b.rect())
    }
}

/// Unit-cell set intersection.
///
/// A sprite without a polygon counts as the single cell at its own x/y.
pub fn colliding_polygons(a: &Sprite, b: &Sprite) -> bool {
    cells_intersect(&unit_cells(a), &unit_cells(b))
}

/// Unit-cell intersection of two raw polygons.
pub fn cells_intersect(a: &[PolygonCell], b: &[PolygonCell]) -> bool {
    let occupied: HashSet<(i32, i32)> = a.iter().map(|c| (c.x, c.y)).collect();
    b.iter().any(|c| occupied.contains(&(c.x, c.y)))
}

fn unit_cells(sprite: &Sprite) -> Vec<PolygonCell> {
    if sprite.has_polygon() {
        sprite.polygon.clone()
    } else {
        vec![PolygonCell::unit(sprite.x, sprite.y)]
    }
}

/// Predict the mover one step ahead and test overlap with `target`.
///
/// The step is `|velocity|` along the direction's axis, or one cell when that
/// velocity is zero. Only the rectangles are compared.
pub fn approaching_from(direction: Direction, mover: &Sprite, target: &Sprite) -> bool {
    approaching_rect(direction, mover, target.rect())
}

fn approaching_rect(direction: Direction, mover: &Sprite, target: Rect) -> bool {
    let step = |v: i32| if v != 0 { v.abs() } else { 1 };
    let ahead = match direction {
        Direction::Left => mover.rect().translate(step(mover.velocity_x), 0),
        Direction::Right => mover.rect().translate(-step(mover.velocity_x), 0),
        Direction::Above => mover.rect().translate(0, step(mover.velocity_y)),
        Direction::Below => mover.rect().translate(0, -step(mover.velocity_y)),
    };
    overlaps(ahead, target)
}

/// True if `a` is about to run into `b` from any side.
///
/// With `include_corners`, also probes `b` shifted one cell left and right,
/// approached from below and from above. Returns false straight away when the
/// origins are more than one cell apart on either axis.
pub fn touching(a: &Sprite, b: &Sprite, include_corners: bool) -> bool {
    if (a.x - b.x).abs() > 1 || (a.y - b.y).abs() > 1 {
        return false;
    }

    if Direction::ALL
        .iter()
        .any(|&d| approaching_rect(d, a, b.rect()))
    {
        return true;
    }

    include_corners
        && corner_probes(b.rect())
            .iter()
            .any(|&(d, probe)| approaching_rect(d, a, probe))
}

fn corner_probes(target: Rect) -> ArrayVec<(Direction, Rect), 4> {
    let mut probes = ArrayVec::new();
    probes.push((Direction::Below, target.translate(-1, 0)));
    probes.push((Direction::Below, target.translate(1, 0)));
    probes.push((Direction::Above, target.translate(-1, 0)));
    probes.push((Direction::Above, target.translate(1, 0)));
    probes
}
