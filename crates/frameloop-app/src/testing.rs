//! Recording collaborator doubles shared across test modules

use crate::ports::{ClientPort, SchemaPort};
use frameloop_core::{AppState, CallError, ChannelId, ChannelRegistry};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct ClientLog {
    channel: Option<ChannelId>,
    main_widget: Vec<AppState>,
    image_viewer: Vec<AppState>,
    downloads: Vec<AppState>,
}

/// A [`ClientPort`] double recording every interaction
///
/// Clones share one log, so a test can hand a clone to the broker and keep
/// the other for assertions.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingClient {
    log: Rc<RefCell<ClientLog>>,
    refuse_launch: bool,
    fail_hydration: bool,
}

impl RecordingClient {
    /// A client whose launch fails
    pub(crate) fn offline() -> Self {
        Self {
            refuse_launch: true,
            ..Self::default()
        }
    }

    /// A client that launches fine but fails every widget hydration
    pub(crate) fn flaky_widgets() -> Self {
        Self {
            fail_hydration: true,
            ..Self::default()
        }
    }

    /// The channel handed out at launch, if launch happened
    pub(crate) fn channel(&self) -> Option<ChannelId> {
        self.log.borrow().channel
    }

    pub(crate) fn main_widget_states(&self) -> Vec<AppState> {
        self.log.borrow().main_widget.clone()
    }

    pub(crate) fn image_viewer_states(&self) -> Vec<AppState> {
        self.log.borrow().image_viewer.clone()
    }

    pub(crate) fn download_states(&self) -> Vec<AppState> {
        self.log.borrow().downloads.clone()
    }

    fn hydration_result(&self) -> Result<(), CallError> {
        if self.fail_hydration {
            Err(CallError::Failed("widget bundle rejected the state".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ClientPort for RecordingClient {
    fn launch(
        &mut self,
        _initial: &AppState,
        channels: &mut ChannelRegistry,
    ) -> Result<ChannelId, CallError> {
        if self.refuse_launch {
            return Err(CallError::Unavailable("client shell offline".to_string()));
        }
        let channel = channels.open();
        self.log.borrow_mut().channel = Some(channel);
        Ok(channel)
    }

    fn hydrate_main_widget(&mut self, state: &AppState) -> Result<(), CallError> {
        self.log.borrow_mut().main_widget.push(state.clone());
        self.hydration_result()
    }

    fn hydrate_image_viewer(&mut self, state: &AppState) -> Result<(), CallError> {
        self.log.borrow_mut().image_viewer.push(state.clone());
        self.hydration_result()
    }

    fn download_frame_image(&mut self, state: &AppState) -> Result<(), CallError> {
        self.log.borrow_mut().downloads.push(state.clone());
        Ok(())
    }
}

/// A [`SchemaPort`] double recording load requests
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingSchema {
    loads: Rc<RefCell<Vec<(String, String)>>>,
    fail: bool,
}

impl RecordingSchema {
    /// A schema service whose every load fails
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every `(service_url, schema_source)` pair requested so far
    pub(crate) fn loads(&self) -> Vec<(String, String)> {
        self.loads.borrow().clone()
    }
}

impl SchemaPort for RecordingSchema {
    fn load_frame_schema(
        &mut self,
        service_url: &str,
        schema_source: &str,
    ) -> Result<(), CallError> {
        self.loads
            .borrow_mut()
            .push((service_url.to_string(), schema_source.to_string()));
        if self.fail {
            Err(CallError::Unavailable("schema service unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}
