//! Collaborator call vocabulary

use crate::channel::ChannelRegistry;
use crate::error::CallError;
use crate::ids::{CallId, ChannelId};
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// An operation a process suspends on until a collaborator settles it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallRequest {
    /// Start the client collaborator; settles with its input channel
    LaunchClient { initial: AppState },
    /// Re-render the main editing widget from a fresh snapshot
    HydrateMainWidget { state: AppState },
    /// Re-render the image viewer from a fresh snapshot
    HydrateImageViewer { state: AppState },
    /// Export the frame described by the snapshot
    DownloadFrameImage { state: AppState },
    /// Load a frame schema from the given source against the service
    LoadFrameSchema {
        service_url: String,
        schema_source: String,
    },
}

/// What a settled call resolves to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CallReply {
    /// The client is up and will produce messages on this channel
    ClientLaunched { channel: ChannelId },
    /// The operation finished with nothing to return
    Completed,
}

/// How a broker answered a submitted call
#[derive(Debug)]
pub enum CallOutcome {
    /// The collaborator finished within the submitting turn
    Settled(Result<CallReply, CallError>),
    /// The collaborator will settle later via [`Scheduler::settle`](crate::Scheduler::settle)
    Pending,
}

/// Routes call requests to the collaborators that serve them
///
/// The channel registry is passed in so launch-style operations can open the
/// channel they hand back. A broker that returns [`CallOutcome::Pending`]
/// takes on the obligation to settle the call id eventually; until then only
/// the issuing process stays parked.
pub trait CallBroker {
    fn submit(
        &mut self,
        call: CallId,
        request: CallRequest,
        channels: &mut ChannelRegistry,
    ) -> CallOutcome;
}
