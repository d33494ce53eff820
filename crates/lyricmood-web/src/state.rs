//! Shared application state for the web server.

use std::sync::Arc;

use lyricmood_model::ArtifactBundle;
use minijinja::Environment;

use crate::error::WebError;
use crate::page;

/// Read-only state injected into every Axum handler.
pub struct AppState {
    pub bundle: ArtifactBundle,
    pub templates: Environment<'static>,
    /// Surface load failure reasons on the page.
    pub debug: bool,
}

impl AppState {
    pub fn new(bundle: ArtifactBundle, debug: bool) -> Result<Self, WebError> {
        Ok(Self {
            bundle,
            templates: page::environment()?,
            debug,
        })
    }
}

pub type SharedState = Arc<AppState>;
