//! Scalar-to-color mapping
//!
//! The default gradient is a cold-to-hot lookup: the scalar range is
//! normalized linearly onto an HSV hue sweep from 240 degrees (blue, minimum)
//! down to 0 degrees (red, maximum) at full saturation and value. A field
//! with a degenerate range maps every point to the middle of the gradient.

/// Map one scalar value onto the default gradient over `[min, max]`.
///
/// Values outside the range clamp to its ends; non-finite values land on the
/// gradient midpoint.
pub fn color_for(value: f32, min: f32, max: f32) -> [f32; 3] {
    let span = max - min;
    let t = if !value.is_finite() || span <= 0.0 || !span.is_finite() {
        0.5
    } else {
        ((value - min) / span).clamp(0.0, 1.0)
    };
    let hue = (1.0 - t) * 240.0;
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Map a whole slice of scalars over its own min-max range
pub fn map_scalars(values: &[f32], range: (f32, f32)) -> Vec<[f32; 3]> {
    values
        .iter()
        .map(|&v| color_for(v, range.0, range.1))
        .collect()
}

/// Convert HSV (hue in degrees, s and v in [0,1]) to RGB in [0,1]
fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h {
        h if h < 60.0 => (c, x, 0.0),
        h if h < 120.0 => (x, c, 0.0),
        h if h < 180.0 => (0.0, c, x),
        h if h < 240.0 => (0.0, x, c),
        h if h < 300.0 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    [r + m, g + m, b + m]
}
