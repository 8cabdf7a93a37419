//! Corelight Core - Page state, transitions, and form submission logic
//!
//! This crate holds everything about the page that does not need a browser
//! or a GPU:
//! - Site configuration (scene constants, transition timings, form endpoint)
//! - Page router state machine driving `active`/`hidden` classes
//! - Tweens used to move the camera and the core object between pages
//! - Torus knot geometry for the "energy core" mesh
//! - Contact form submission lifecycle

pub mod config;
pub mod form;
pub mod geometry;
pub mod motion;
pub mod page;
pub mod router;
pub mod tween;

pub use config::{
    ConfigError, FormConfig, LoggingConfig, SceneConfig, SiteConfig, TransitionConfig,
};
pub use form::{
    FormSubmitter, FormView, SubmissionState, SubmitError, SubmitOutcome, SubmitRequest,
};
pub use geometry::TorusKnot;
pub use page::{PageClass, PageId, PageKey, TransitionTarget};
pub use router::{PageDom, PageRouter, RouterError, Transition, TransformTargetSink};
pub use tween::{Ease, Tween};
