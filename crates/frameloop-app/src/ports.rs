//! Collaborator contracts consumed by the core
//!
//! Implementations live outside this repository (native shell, widget
//! bundle, schema service). Every method here settles a suspending call:
//! the process that issued the call stays parked until the method returns.

use frameloop_core::{AppState, CallError, ChannelId, ChannelRegistry};

/// The UI/client collaborator
pub trait ClientPort {
    /// Bring the client up around the initial state
    ///
    /// Returns the channel the client will produce input messages on; the
    /// channel registry is provided so the client can open it itself.
    fn launch(
        &mut self,
        initial: &AppState,
        channels: &mut ChannelRegistry,
    ) -> Result<ChannelId, CallError>;

    /// Re-render the main editing widget from a fresh snapshot
    fn hydrate_main_widget(&mut self, state: &AppState) -> Result<(), CallError>;

    /// Re-render the image viewer from a fresh snapshot
    fn hydrate_image_viewer(&mut self, state: &AppState) -> Result<(), CallError>;

    /// Export the frame described by the snapshot
    fn download_frame_image(&mut self, state: &AppState) -> Result<(), CallError>;
}

/// The schema-loading collaborator
pub trait SchemaPort {
    /// Load a frame schema from `schema_source` against `service_url`
    fn load_frame_schema(
        &mut self,
        service_url: &str,
        schema_source: &str,
    ) -> Result<(), CallError>;
}
