//! Application state owned by the store

use crate::value::{Value, ValueMap};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The service endpoint seeded into every fresh state
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:3000";

/// Width and height of the editing frame, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDimensions {
    pub width: u32,
    pub height: u32,
}

impl FrameDimensions {
    /// The standard deployment variant
    pub const DEFAULT: FrameDimensions = FrameDimensions::new(644, 644);

    /// The compact deployment variant
    pub const COMPACT: FrameDimensions = FrameDimensions::new(512, 512);

    /// Create frame dimensions
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for FrameDimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FrameDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An opaque, collaborator-defined layer payload
///
/// Layers carry whatever the client widget put in them. They have no stable
/// identity; a layer is addressed only by its position in the layer sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Layer {
    /// Collaborator-defined content
    pub content: ValueMap,
}

impl Layer {
    /// Create an empty layer
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the layer content
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.content.insert(key.into(), value.into());
        self
    }
}

/// The complete application state
///
/// Exactly one live instance exists, owned by the [`Store`](crate::Store).
/// Every accepted action replaces the whole value; nothing mutates it in
/// place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Dimensions of the editing frame
    pub frame_dimensions: FrameDimensions,
    /// Ordered layer sequence; ordering is index-significant
    pub frame_layers: Vec<Layer>,
    /// Endpoint of the backing service; never empty
    pub service_url: String,
}

impl AppState {
    /// Create the seed state for the standard deployment variant
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a seed state with specific frame dimensions
    pub fn with_frame_dimensions(frame_dimensions: FrameDimensions) -> Self {
        Self {
            frame_dimensions,
            ..Self::default()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            frame_dimensions: FrameDimensions::DEFAULT,
            frame_layers: Vec::new(),
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}
