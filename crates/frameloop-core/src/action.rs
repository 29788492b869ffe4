//! Store transition records

use crate::state::{FrameDimensions, Layer};
use serde::{Deserialize, Serialize};

/// An internal, store-only transition record
///
/// Actions are consumed only by the reducer. Collaborator-defined kinds the
/// reducer does not interpret travel as [`Action::Custom`] and leave the
/// state untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Replace the frame dimensions wholesale
    FrameDimensionsUpdated { frame_dimensions: FrameDimensions },
    /// Upsert-or-delete the layer at an index
    ///
    /// With a layer present this replaces the element at `layer_index`,
    /// appending when the index is past the end. With `None` the element at
    /// `layer_index` is removed and subsequent layers shift down.
    FrameLayerUpdated {
        layer_index: usize,
        frame_layer: Option<Layer>,
    },
    /// Append a layer as the new last element
    FrameLayerPushed { frame_layer: Layer },
    /// Replace the service endpoint wholesale
    ServiceUrlUpdated { service_url: String },
    /// A kind the reducer does not interpret (identity no-op)
    Custom(String),
}

impl Action {
    /// Get the kind tag of this action
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::FrameDimensionsUpdated { .. } => ActionKind::FrameDimensionsUpdated,
            Action::FrameLayerUpdated { .. } => ActionKind::FrameLayerUpdated,
            Action::FrameLayerPushed { .. } => ActionKind::FrameLayerPushed,
            Action::ServiceUrlUpdated { .. } => ActionKind::ServiceUrlUpdated,
            Action::Custom(_) => ActionKind::Custom,
        }
    }
}

/// The kind of an action, without its payload
///
/// Take patterns match on kinds, so waiting processes never inspect payloads
/// they are not resumed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    FrameDimensionsUpdated,
    FrameLayerUpdated,
    FrameLayerPushed,
    ServiceUrlUpdated,
    /// Collaborator-defined kind
    Custom,
}

impl ActionKind {
    /// Every kind the reducer interprets
    pub const STATE_CHANGING: [ActionKind; 4] = [
        ActionKind::FrameDimensionsUpdated,
        ActionKind::FrameLayerUpdated,
        ActionKind::FrameLayerPushed,
        ActionKind::ServiceUrlUpdated,
    ];

    /// Kinds that touch the layer sequence
    pub const LAYER_CHANGING: [ActionKind; 2] =
        [ActionKind::FrameLayerUpdated, ActionKind::FrameLayerPushed];
}
