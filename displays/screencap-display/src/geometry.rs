//! Needle geometry
//!
//! The gauge sweeps clockwise from 239 degrees at 0 to -59 degrees at 100,
//! measured counter-clockwise from the positive x axis. Screen y grows
//! downwards, hence the sign flip on the y component.

use embedded_graphics::prelude::Point;
use libm::{cosf, roundf, sinf};

/// Needle length in pixels
pub const NEEDLE_RADIUS: f32 = 80.0;

/// Angle of value 0, in degrees
pub const START_DEG: f32 = 239.0;

/// Degrees covered by the full 0-100 range
pub const SWEEP_DEG: f32 = 298.0;

/// Half the opening angle of the red arrow, in degrees
pub const ARROW_HALF_ANGLE_DEG: f32 = 4.5;

/// Values the gauge can show; anything else hides the needle
pub fn is_visible(value: f32) -> bool {
    (0.0..=100.0).contains(&value)
}

/// Needle angle for `value`, in radians
pub fn needle_angle(value: f32) -> f32 {
    (START_DEG - value / 100.0 * SWEEP_DEG).to_radians()
}

/// Rotate `(x, y)` by `angle` radians in screen orientation and round
pub fn rotate(x: f32, y: f32, angle: f32) -> Point {
    let (sin, cos) = (sinf(angle), cosf(angle));
    Point::new(
        roundf(x * cos + y * sin) as i32,
        roundf(-x * sin + y * cos) as i32,
    )
}

/// Point `radius` pixels from `center` at `angle`
pub fn polar(center: Point, radius: f32, angle: f32) -> Point {
    center + rotate(radius, 0.0, angle)
}

/// Tip of the needle for `value`
pub fn needle_tip(center: Point, value: f32) -> Point {
    polar(center, NEEDLE_RADIUS, needle_angle(value))
}

/// The two base corners of the red arrow
///
/// Found by swinging the tip-to-center vector by the half angle each way
/// around the tip, so the arrow narrows to a point at the tip.
pub fn arrow_base(center: Point, tip: Point) -> (Point, Point) {
    let back = center - tip;
    let (x, y) = (back.x as f32, back.y as f32);
    let half = ARROW_HALF_ANGLE_DEG.to_radians();
    (tip + rotate(x, y, -half), tip + rotate(x, y, half))
}
