//! Diamond zones and containment testing.
//!
//! Play cards describe paths and defenders in a normalized field frame:
//! x is the lateral axis, y runs downfield from the line of scrimmage. Every
//! contact question reduces to one primitive: does a defender's axis-aligned
//! zone of influence overlap a path segment's zone?
//!
//! Zones are quadrilaterals ("diamonds"):
//! - [`Quad::from_point`] builds an axis-aligned square around a point -
//!   defender zones and catch/interception zones.
//! - [`Quad::from_line`] builds a thin diamond following a segment's
//!   direction, shrunk perpendicular to travel - path contact zones.
//!
//! [`Quad::contains_square`] first rejects on bounding boxes, then (for
//! rotated diamonds only) runs four half-plane tests by interpolating along
//! the diamond's diagonal edges. No rotation normalization is performed; the
//! approximation is valid because query squares (defender and catch zones)
//! are never rotated. Degenerate segments produce quads whose edges are all
//! vertical, which skips the diagonal tests entirely - no division by zero.

use serde::{Deserialize, Serialize};

/// Radius of a defender's square zone of influence.
pub const DEFENDER_RADIUS: f64 = 0.5;
/// Printed width of a path line on a card, in field units.
pub const PATH_WIDTH: f64 = 5.0 / 14.0;
/// Half of [`PATH_WIDTH`]; the contact-zone radius along a segment.
pub const PATH_RADIUS: f64 = PATH_WIDTH / 2.0;
/// Radius of the interception zone around a pass target.
pub const CATCH_RADIUS: f64 = 0.5;

/// A point on the card plane. Serializes as a two-element array `[x, y]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord(pub f64, pub f64);

impl Coord {
    /// Lateral position.
    #[must_use]
    pub const fn x(self) -> f64 {
        self.0
    }

    /// Downfield position (yards past the line of scrimmage).
    #[must_use]
    pub const fn y(self) -> f64 {
        self.1
    }

    /// This point shifted laterally by `offset`.
    #[must_use]
    pub fn shifted(self, offset: f64) -> Coord {
        Coord(self.0 + offset, self.1)
    }
}

/// A defender's zone of influence.
#[must_use]
pub fn defender_zone(center: Coord) -> Quad {
    Quad::from_point(center, DEFENDER_RADIUS)
}

/// The interception zone around a pass or catch target.
#[must_use]
pub fn catch_zone(center: Coord) -> Quad {
    Quad::from_point(center, CATCH_RADIUS)
}

/// The contact zone along a path segment.
#[must_use]
pub fn path_zone(start: Coord, end: Coord) -> Quad {
    Quad::from_line(start, end, PATH_RADIUS)
}

/// A quadrilateral zone with its corners classified by extremity.
///
/// `left` holds the smallest x, `top` the smallest y, `right` the largest x
/// and `bottom` the largest y (first-wins on ties, matching the construction
/// order of the corner list). For axis-aligned squares the four slots walk
/// the square counter-clockwise from the min corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    left: Coord,
    top: Coord,
    right: Coord,
    bottom: Coord,
}

fn signum(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Quad {
    /// Axis-aligned square of the given radius around a center point.
    #[must_use]
    pub fn from_point(center: Coord, radius: f64) -> Self {
        let Coord(x, y) = center;
        Self::classify([
            Coord(x - radius, y - radius),
            Coord(x + radius, y - radius),
            Coord(x + radius, y + radius),
            Coord(x - radius, y + radius),
        ])
    }

    /// Thin diamond along the line from `p1` to `p2`.
    ///
    /// The diamond hugs the direction of travel: each endpoint spawns two
    /// corners offset by `radius` with the slope signs swapped, which shrinks
    /// the shape perpendicular to the line. Axis-aligned and zero-length
    /// lines collapse one or both slope signs to zero and degrade gracefully
    /// into flat or point-like quads.
    #[must_use]
    pub fn from_line(p1: Coord, p2: Coord, radius: f64) -> Self {
        let xslope = signum(p2.0 - p1.0);
        let yslope = signum(p2.1 - p1.1);

        Self::classify([
            Coord(p1.0 + xslope * radius, p1.1 - yslope * radius),
            Coord(p1.0 - xslope * radius, p1.1 + yslope * radius),
            Coord(p2.0 - xslope * radius, p2.1 + yslope * radius),
            Coord(p2.0 + xslope * radius, p2.1 - yslope * radius),
        ])
    }

    /// Assign corners to the left/top/right/bottom slots.
    ///
    /// Selection order matters for ties: leftmost first, then topmost among
    /// the rest, then rightmost among the rest, and the remaining corner is
    /// bottom. Each pick takes the first extreme encountered.
    fn classify(corners: [Coord; 4]) -> Self {
        let mut pool: Vec<Coord> = corners.to_vec();

        let left = Self::take_extreme(&mut pool, |a, b| a.0 < b.0);
        let top = Self::take_extreme(&mut pool, |a, b| a.1 < b.1);
        let right = Self::take_extreme(&mut pool, |a, b| a.0 > b.0);
        let bottom = pool[0];

        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    fn take_extreme(pool: &mut Vec<Coord>, better: impl Fn(Coord, Coord) -> bool) -> Coord {
        let mut best = 0;
        for i in 1..pool.len() {
            if better(pool[i], pool[best]) {
                best = i;
            }
        }
        pool.remove(best)
    }

    /// Corner with the smallest x.
    #[must_use]
    pub fn left(&self) -> Coord {
        self.left
    }

    /// Corner with the smallest y.
    #[must_use]
    pub fn top(&self) -> Coord {
        self.top
    }

    /// Corner with the largest x.
    #[must_use]
    pub fn right(&self) -> Coord {
        self.right
    }

    /// Corner with the largest y.
    #[must_use]
    pub fn bottom(&self) -> Coord {
        self.bottom
    }

    fn edges(&self) -> [(Coord, Coord); 4] {
        [
            self.bottom_edge(),
            self.top_edge(),
            self.left_edge(),
            self.right_edge(),
        ]
    }

    fn bottom_edge(&self) -> (Coord, Coord) {
        (self.left, self.bottom)
    }

    fn top_edge(&self) -> (Coord, Coord) {
        (self.top, self.right)
    }

    fn left_edge(&self) -> (Coord, Coord) {
        (self.left, self.top)
    }

    fn right_edge(&self) -> (Coord, Coord) {
        (self.bottom, self.right)
    }

    /// y of `edge` interpolated at `x`, or `None` for a vertical edge.
    fn intercept(edge: (Coord, Coord), x: f64) -> Option<f64> {
        let (Coord(x1, y1), Coord(x2, y2)) = edge;
        if x2 - x1 == 0.0 {
            return None;
        }
        let m = (y2 - y1) / (x2 - x1);
        Some(m * (x - x1) + y1)
    }

    fn has_vertical_edge(&self) -> bool {
        self.edges().iter().any(|(a, b)| a.0 - b.0 == 0.0)
    }

    /// Does `square` overlap this zone?
    ///
    /// `square` must be axis-aligned (a defender or catch zone); `self` may
    /// be a rotated diamond. Bounding boxes are compared first on both axes.
    /// A rotated diamond then rejects candidates whose extreme corners fall
    /// outside its diagonal edges, interpolated at the candidate's extreme x.
    #[must_use]
    pub fn contains_square(&self, square: &Quad) -> bool {
        if square.right.0 < self.left.0
            || square.left.0 > self.right.0
            || square.bottom.1 < self.top.1
            || square.top.1 > self.bottom.1
        {
            return false;
        }

        if !self.has_vertical_edge() {
            let outside = |value: f64, boundary: Option<f64>, above: bool| match boundary {
                Some(b) => {
                    if above {
                        value > b
                    } else {
                        value < b
                    }
                }
                None => false,
            };

            if outside(square.top.1, Self::intercept(self.bottom_edge(), square.right.0), true)
                || outside(square.bottom.1, Self::intercept(self.top_edge(), square.left.0), false)
                || outside(square.top.1, Self::intercept(self.right_edge(), square.left.0), true)
                || outside(square.bottom.1, Self::intercept(self.left_edge(), square.right.0), false)
            {
                return false;
            }
        }

        true
    }
}
