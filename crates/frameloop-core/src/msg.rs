//! Input events produced by the external client

use crate::state::{FrameDimensions, Layer};
use serde::{Deserialize, Serialize};

/// An externally sourced input event, consumed via a channel
///
/// Messages are produced only by the client collaborator and consumed only
/// by the input processor. [`Message::Unknown`] stands in for a kind this
/// build does not understand; reaching the input processor it is treated as
/// a protocol violation by the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// Export the current frame as an image
    DownloadFrameImage,
    /// Resize the editing frame
    UpdateFrameDimensions { next_frame_dimensions: FrameDimensions },
    /// Replace or delete the layer at an index
    UpdateFrameLayer {
        next_layer: Option<Layer>,
        next_index: usize,
    },
    /// Append a new layer
    PushFrameLayer { new_frame_layer: Layer },
    /// Reload the frame schema from a new source
    UpdateFrameSchema { next_schema_source: String },
    /// Point the editor at a different service endpoint
    UpdateServiceUrl { next_service_url: String },
    /// A kind this build does not recognize
    Unknown { kind: String },
}

impl Message {
    /// Get the kind name of this message, for diagnostics
    pub fn kind(&self) -> &str {
        match self {
            Message::DownloadFrameImage => "DownloadFrameImage",
            Message::UpdateFrameDimensions { .. } => "UpdateFrameDimensions",
            Message::UpdateFrameLayer { .. } => "UpdateFrameLayer",
            Message::PushFrameLayer { .. } => "PushFrameLayer",
            Message::UpdateFrameSchema { .. } => "UpdateFrameSchema",
            Message::UpdateServiceUrl { .. } => "UpdateServiceUrl",
            Message::Unknown { kind } => kind,
        }
    }
}
