//! Application configuration

use frameloop_core::{AppState, FrameDimensions, DEFAULT_SERVICE_URL};
use serde::{Deserialize, Serialize};

/// Deployment-level settings seeded into the initial state
///
/// Two frame variants ship: the standard 644x644 editing frame (the default)
/// and a compact 512x512 one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Initial frame dimensions
    pub frame_dimensions: FrameDimensions,
    /// Initial service endpoint
    pub service_url: String,
}

impl AppConfig {
    /// Standard deployment variant
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact deployment variant (512x512 frame)
    pub fn compact_frame() -> Self {
        Self {
            frame_dimensions: FrameDimensions::COMPACT,
            ..Self::default()
        }
    }

    /// The state the store is seeded with
    pub fn initial_state(&self) -> AppState {
        AppState {
            frame_dimensions: self.frame_dimensions,
            frame_layers: Vec::new(),
            service_url: self.service_url.clone(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            frame_dimensions: FrameDimensions::DEFAULT,
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}
