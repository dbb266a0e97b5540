use nalgebra::{UnitQuaternion, Vector3};

/// Fold an angle in degrees into (-180, 180]
#[inline]
pub fn normalize_angle(deg: f64) -> f64 {
    let folded = deg.rem_euclid(360.0);
    if folded > 180.0 {
        folded - 360.0
    } else {
        folded
    }
}

/// Clamp an angle in degrees to `[from, to]` using the folded signed range.
///
/// The angle is first folded into (-180, 180]. If it lies outside the limits it
/// snaps to whichever limit is closer along the circle, so an aircraft rolled
/// past 180° never jumps to the far limit. Expects `-180 < from <= to <= 180`.
pub fn clamp_angle(angle: f64, from: f64, to: f64) -> f64 {
    let angle = normalize_angle(angle);
    if angle >= from && angle <= to {
        return angle;
    }

    let to_from = normalize_angle(angle - from).abs();
    let to_to = normalize_angle(angle - to).abs();
    if to_from <= to_to {
        from
    } else {
        to
    }
}

/// Move `current` toward `target` by at most `max_delta`
#[inline]
pub fn move_towards(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Index following `index` on a cyclic sequence of `len` items
#[inline]
pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

/// Index preceding `index` on a cyclic sequence of `len` items, wrapping 0 to `len - 1`
#[inline]
pub fn previous_index(index: usize, len: usize) -> usize {
    (index % len + len - 1) % len
}

/// Rotate a world-frame vector into the body frame described by `attitude`
#[inline]
pub fn world_to_body(attitude: &UnitQuaternion<f64>, world: &Vector3<f64>) -> Vector3<f64> {
    attitude.inverse_transform_vector(world)
}
