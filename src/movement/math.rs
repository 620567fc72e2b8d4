//! Movement domain: scalar helpers shared by the resolver and the motor.

use bevy::prelude::*;

/// Smallest smoothing time accepted by [`smooth_damp`].
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Sign of `value`, treating zero (of either sign) as positive.
pub fn sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Critically damped approach of `current` toward `target`.
///
/// `rate` carries the rate of change between calls and is updated in place.
/// The result never overshoots `target`, and the call is a no-op when the
/// value is already at rest on the target.
pub fn smooth_damp(current: f32, target: f32, rate: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    if current == target && *rate == 0.0 {
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*rate + omega * change) * dt;
    *rate = (*rate - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        output = target;
        *rate = 0.0;
    }

    output
}

/// Unsigned angle in degrees between a surface normal and the body's up axis.
pub fn slope_angle(normal: Vec2, up: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec2::ZERO {
        return 0.0;
    }
    normal.dot(up).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Rounds `value` to the nearest multiple of `factor`, keeping its sign.
pub fn round_to_multiple(value: f32, factor: f32) -> f32 {
    if factor == 0.0 {
        return value;
    }
    (value / factor).round() * factor
}
