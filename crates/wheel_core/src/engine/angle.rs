//! Wheel angle math
//!
//! All angles are radians. The wheel's accumulated angle is unbounded while
//! spinning and is only ever read modulo 2π.
//!
//! ## Frames
//!
//! **Wheel frame** (unrotated): segment `i` of `n` covers
//! `[i * 2π/n, (i + 1) * 2π/n)`.
//!
//! **Screen frame**: the wheel frame rotated by the current angle. The pointer
//! is fixed at screen angle 0, so the segment under it is found by inverting
//! the rotation (see [`pointer_relative_angle`]).

use std::f64::consts::TAU;

/// Fold any angle into `[0, 2π)`.
///
/// Non-finite input folds to `0.0`. `rem_euclid` can round up to exactly `TAU`
/// for tiny negative inputs, which is mapped back to `0.0`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let folded = angle.rem_euclid(TAU);
    if folded >= TAU {
        0.0
    } else {
        folded
    }
}

/// Angular width of one segment for `count` participants.
///
/// Returns `TAU` for `count == 0` so callers never divide by zero.
#[inline]
pub fn segment_angle(count: usize) -> f64 {
    if count == 0 {
        TAU
    } else {
        TAU / count as f64
    }
}

/// Segment index covering a wheel-frame angle.
///
/// The angle is normalized first. Rounding right below 2π can push the
/// quotient up to `count`; that belongs to the last segment.
#[inline]
pub fn segment_index(angle: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let index = (normalize_angle(angle) / segment_angle(count)).floor() as usize;
    index.min(count - 1)
}

/// Wheel angle as seen from the fixed pointer.
///
/// Segments rotate with the wheel while the pointer stays at 0, so a positive
/// rotation moves lower wheel-local angles past the pointer.
#[inline]
pub fn pointer_relative_angle(normalized: f64) -> f64 {
    (TAU - normalized) % TAU
}

/// Start and end angles of segment `index`, rotated into the screen frame.
pub fn segment_bounds(index: usize, count: usize, rotation: f64) -> (f64, f64) {
    let width = segment_angle(count);
    let start = rotation + index as f64 * width;
    (start, start + width)
}
