//! Wall-clock time for the pulse effect

/// Seconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn wall_clock_secs() -> f64 {
    js_sys::Date::now() * 0.001
}

/// Seconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn wall_clock_secs() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
