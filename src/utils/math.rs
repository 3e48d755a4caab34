//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// Below this length a separation vector has no usable direction.
pub const MIN_SEPARATION: f32 = 1e-6;

/// Unit vector of `v`, or `fallback` when `v` is too short to normalize.
pub fn direction_or(v: Vec2, length: f32, fallback: Vec2) -> Vec2 {
    if length > MIN_SEPARATION {
        v / length
    } else {
        fallback
    }
}

/// Wraps an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Converts HSV (hue in degrees, saturation and value in `[0, 1]`) to 8-bit RGB.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let hue = wrap_degrees(hue);
    let chroma = value * saturation;
    let secondary = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let offset = value - chroma;

    let (r, g, b) = match (hue / 60.0) as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };

    let to_u8 = |c: f32| ((c + offset) * 255.0).clamp(0.0, 255.0) as u8;
    [to_u8(r), to_u8(g), to_u8(b)]
}
