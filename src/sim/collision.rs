//! Collision detection primitives
//!
//! Circle-circle overlap for bodies, and circle-rectangle contact for the
//! goal frame. The field's y axis grows upward, so rectangles are anchored at
//! their top-left corner and carry a (conventionally negative) height that
//! extends downward.

use crate::Point;

/// Which face of a rectangle a circle touched
///
/// At most one flag is ever set. A corner contact is attributed to a single
/// face: the horizontal test runs first and the vertical test overwrites it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RectContact {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl RectContact {
    pub fn miss() -> Self {
        Self::default()
    }

    #[inline]
    pub fn hit(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    /// Signed; negative heights extend downward from `y`
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy)]
enum Face {
    Left,
    Right,
    Up,
    Down,
}

/// Check a circle against a rectangle and report the touched face
///
/// The circle centre is clamped to the nearest rectangle edge on each axis.
/// If the clamped distance is within the radius, the face recorded by the
/// last clamp that fired is flagged. A centre that lies inside the rectangle
/// on both axes clamps nowhere and reports no face.
pub fn circle_rect_collision(rect: Rect, center: Point, radius: f64) -> RectContact {
    let mut test_x = center.x;
    let mut test_y = center.y;
    let mut face = None;

    if center.x < rect.x {
        test_x = rect.x;
        face = Some(Face::Left);
    } else if center.x > rect.x + rect.width {
        test_x = rect.x + rect.width;
        face = Some(Face::Right);
    }

    if center.y > rect.y {
        test_y = rect.y;
        face = Some(Face::Up);
    } else if center.y < rect.y + rect.height {
        test_y = rect.y + rect.height;
        face = Some(Face::Down);
    }

    let dist_x = center.x - test_x;
    let dist_y = center.y - test_y;
    let distance = (dist_x * dist_x + dist_y * dist_y).sqrt();

    let mut contact = RectContact::miss();
    if distance <= radius {
        match face {
            Some(Face::Left) => contact.left = true,
            Some(Face::Right) => contact.right = true,
            Some(Face::Up) => contact.up = true,
            Some(Face::Down) => contact.down = true,
            None => {}
        }
    }
    contact
}

/// True if two circles touch or overlap
#[inline]
pub fn circle_circle_collision(c1: Point, r1: f64, c2: Point, r2: f64) -> bool {
    c1.distance(c2) <= r1 + r2
}
