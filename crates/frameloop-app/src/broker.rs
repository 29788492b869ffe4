//! Routing collaborator calls to their ports

use crate::ports::{ClientPort, SchemaPort};
use frameloop_core::{
    CallBroker, CallId, CallOutcome, CallReply, CallRequest, ChannelRegistry,
};

/// Broker that serves every call synchronously from in-process ports
///
/// Each submitted call settles within the submitting turn; externally
/// asynchronous deployments substitute their own [`CallBroker`] and settle
/// through the scheduler instead.
pub struct ServiceBroker {
    client: Box<dyn ClientPort>,
    schema: Box<dyn SchemaPort>,
}

impl ServiceBroker {
    /// Create a broker around the two collaborator ports
    pub fn new(client: Box<dyn ClientPort>, schema: Box<dyn SchemaPort>) -> Self {
        Self { client, schema }
    }
}

impl CallBroker for ServiceBroker {
    fn submit(
        &mut self,
        _call: CallId,
        request: CallRequest,
        channels: &mut ChannelRegistry,
    ) -> CallOutcome {
        let result = match request {
            CallRequest::LaunchClient { initial } => self
                .client
                .launch(&initial, channels)
                .map(|channel| CallReply::ClientLaunched { channel }),
            CallRequest::HydrateMainWidget { state } => self
                .client
                .hydrate_main_widget(&state)
                .map(|()| CallReply::Completed),
            CallRequest::HydrateImageViewer { state } => self
                .client
                .hydrate_image_viewer(&state)
                .map(|()| CallReply::Completed),
            CallRequest::DownloadFrameImage { state } => self
                .client
                .download_frame_image(&state)
                .map(|()| CallReply::Completed),
            CallRequest::LoadFrameSchema {
                service_url,
                schema_source,
            } => self
                .schema
                .load_frame_schema(&service_url, &schema_source)
                .map(|()| CallReply::Completed),
        };
        CallOutcome::Settled(result)
    }
}
