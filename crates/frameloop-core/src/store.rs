//! The state store and its reducer

use crate::action::Action;
use crate::state::AppState;

/// Pure transition function over `(state, action)`
///
/// Total: kinds the reducer does not interpret return a structurally equal
/// state. The input is never mutated; every accepted action produces a fresh
/// state value.
pub fn reduce(state: &AppState, action: &Action) -> AppState {
    match action {
        Action::FrameDimensionsUpdated { frame_dimensions } => AppState {
            frame_dimensions: *frame_dimensions,
            ..state.clone()
        },
        Action::FrameLayerUpdated {
            layer_index,
            frame_layer,
        } => {
            let mut frame_layers = state.frame_layers.clone();
            match frame_layer {
                Some(layer) => {
                    if *layer_index < frame_layers.len() {
                        frame_layers[*layer_index] = layer.clone();
                    } else {
                        frame_layers.push(layer.clone());
                    }
                }
                None => {
                    if *layer_index < frame_layers.len() {
                        frame_layers.remove(*layer_index);
                    }
                }
            }
            AppState {
                frame_layers,
                ..state.clone()
            }
        }
        Action::FrameLayerPushed { frame_layer } => {
            let mut frame_layers = state.frame_layers.clone();
            frame_layers.push(frame_layer.clone());
            AppState {
                frame_layers,
                ..state.clone()
            }
        }
        Action::ServiceUrlUpdated { service_url } => AppState {
            service_url: service_url.clone(),
            ..state.clone()
        },
        Action::Custom(_) => state.clone(),
    }
}

/// Holds the one live application state and applies reducer transitions
///
/// A dispatch is a single, uninterruptible step from the scheduler's point of
/// view; `select` never suspends and never fails.
#[derive(Debug, Clone)]
pub struct Store {
    state: AppState,
}

impl Store {
    /// Create a store seeded with the given state
    pub fn new(initial: AppState) -> Self {
        Self { state: initial }
    }

    /// Read the current snapshot
    pub fn select(&self) -> &AppState {
        &self.state
    }

    /// Apply an action, replacing the held snapshot wholesale
    pub fn dispatch(&mut self, action: &Action) {
        self.state = reduce(&self.state, action);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}
