//! Site configuration
//!
//! Every value has a built-in default, so an empty document yields the stock
//! page: neon torus knot, 500/50 ms page fades, and the Formspree endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::page::TransitionTarget;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse site configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid site configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub transitions: TransitionConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SiteConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        debug!(form_id = %config.form.form_id, "Parsed site configuration");
        Ok(config)
    }

    /// Reject values that would break the scene or the form
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scene = &self.scene;
        if scene.tubular_segments == 0 || scene.radial_segments == 0 {
            return Err(ConfigError::Invalid(
                "torus knot segment counts must be non-zero".to_string(),
            ));
        }
        if scene.knot_p == 0 || scene.knot_q == 0 {
            return Err(ConfigError::Invalid("torus knot p and q must be non-zero".to_string()));
        }
        if !(scene.camera_near > 0.0 && scene.camera_far > scene.camera_near) {
            return Err(ConfigError::Invalid(format!(
                "camera clip planes must satisfy 0 < near < far (near={}, far={})",
                scene.camera_near, scene.camera_far
            )));
        }
        if !(0.0..=1.0).contains(&scene.core_opacity) {
            return Err(ConfigError::Invalid(format!(
                "core opacity must be within 0..=1, got {}",
                scene.core_opacity
            )));
        }
        if self.transitions.duration_secs < 0.0 {
            return Err(ConfigError::Invalid(
                "transition duration must not be negative".to_string(),
            ));
        }
        if self.transitions.home_page.is_empty() {
            return Err(ConfigError::Invalid("home page id must not be empty".to_string()));
        }
        if self.form.form_id.trim().is_empty() {
            return Err(ConfigError::Invalid("form id must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Static parameters of the 3D background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Vertical field of view in degrees
    pub camera_fov_degrees: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// Initial camera distance along +Z
    pub camera_distance: f32,
    /// Fog color as 0xRRGGBB
    pub fog_color: u32,
    /// Exponential-squared fog density
    pub fog_density: f32,
    pub ambient_color: u32,
    pub ambient_brightness: f32,
    pub point_light_color: u32,
    /// Point light intensity in lumens
    pub point_light_intensity: f32,
    /// Distance at which the point light stops contributing
    pub point_light_range: f32,
    pub point_light_position: [f32; 3],
    pub knot_radius: f32,
    pub knot_tube: f32,
    pub tubular_segments: u32,
    pub radial_segments: u32,
    pub knot_p: u32,
    pub knot_q: u32,
    pub core_color: u32,
    pub core_opacity: f32,
    /// Core spin around X and Y in radians per second
    pub rotation_speed: f32,
    /// Amplitude of the `1 + a·sin(t)` scale pulse
    pub pulse_amplitude: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_fov_degrees: 75.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            camera_distance: 30.0,
            fog_color: 0x050505,
            fog_density: 0.02,
            ambient_color: 0x404040,
            ambient_brightness: 80.0,
            point_light_color: 0x39ff14,
            point_light_intensity: 1_000_000.0,
            point_light_range: 50.0,
            point_light_position: [10.0, 10.0, 10.0],
            knot_radius: 10.0,
            knot_tube: 3.0,
            tubular_segments: 100,
            radial_segments: 16,
            knot_p: 2,
            knot_q: 3,
            core_color: 0x39ff14,
            core_opacity: 0.3,
            // 0.005 rad per frame at 60 Hz
            rotation_speed: 0.3,
            pulse_amplitude: 0.05,
        }
    }
}

/// Camera/object placement for one kind of page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPose {
    pub core_x: f32,
    pub camera_z: f32,
}

/// Page transition timings and scene placements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Delay between dropping `active` and adding `hidden` on the old page
    pub hide_delay_ms: f64,
    /// Delay between dropping `hidden` and adding `active` on the new page
    pub show_delay_ms: f64,
    /// Page id that centers the core
    pub home_page: String,
    pub home: TargetPose,
    pub other: TargetPose,
    pub duration_secs: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 500.0,
            show_delay_ms: 50.0,
            home_page: "home".to_string(),
            home: TargetPose {
                core_x: 0.0,
                camera_z: 30.0,
            },
            other: TargetPose {
                core_x: 20.0,
                camera_z: 25.0,
            },
            duration_secs: 1.0,
        }
    }
}

impl TransitionConfig {
    /// Scene placement for the given page
    pub fn target_for(&self, page_id: &str) -> TransitionTarget {
        let pose = if page_id == self.home_page {
            self.home
        } else {
            self.other
        };
        TransitionTarget {
            core_x: pose.core_x,
            camera_z: pose.camera_z,
            duration_secs: self.duration_secs,
        }
    }
}

/// Contact form endpoint and user-facing strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    /// Base URL of the form service
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// Form id assigned by the service
    #[serde(default = "default_form_id")]
    pub form_id: String,
    /// Submit button label while the request is in flight
    #[serde(default = "default_transmitting_label")]
    pub transmitting_label: String,
    /// Alert shown when the service answers with a non-success status
    #[serde(default = "default_rejected_message")]
    pub rejected_message: String,
    /// Prefix of the alert shown when the request never completes
    #[serde(default = "default_unreachable_prefix")]
    pub unreachable_prefix: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            form_id: default_form_id(),
            transmitting_label: default_transmitting_label(),
            rejected_message: default_rejected_message(),
            unreachable_prefix: default_unreachable_prefix(),
        }
    }
}

impl FormConfig {
    /// Full POST endpoint, `<service>/f/<id>`
    pub fn endpoint(&self) -> String {
        format!("{}/f/{}", self.service_url.trim_end_matches('/'), self.form_id)
    }
}

fn default_service_url() -> String {
    "https://formspree.io".to_string()
}

fn default_form_id() -> String {
    "xeeqddzr".to_string()
}

fn default_transmitting_label() -> String {
    "TRANSMITTING...".to_string()
}

fn default_rejected_message() -> String {
    "Transmission Error. Please check your internet or try again.".to_string()
}

fn default_unreachable_prefix() -> String {
    "System Error: ".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
