//! Per-frame motion of the core object

/// Uniform scale of the core at wall-clock time `t_secs`
///
/// Evaluated in f64: `t_secs` is seconds since the Unix epoch and loses all
/// sub-second precision in f32.
pub fn pulse_scale(t_secs: f64, amplitude: f32) -> f32 {
    (1.0 + f64::from(amplitude) * t_secs.sin()) as f32
}

/// Rotation increment for a frame lasting `dt` seconds
pub fn spin_step(rate: f32, dt: f32) -> f32 {
    rate * dt
}

/// Camera aspect ratio for a viewport, `None` when the viewport is degenerate
pub fn aspect_ratio(width: f32, height: f32) -> Option<f32> {
    if width > 0.0 && height > 0.0 {
        Some(width / height)
    } else {
        None
    }
}
