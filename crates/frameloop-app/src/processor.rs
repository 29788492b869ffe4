//! The input processor: client messages in, state transitions out

use frameloop_core::{
    Action, CallReply, CallRequest, ChannelId, EffectCtx, Event, Interest, LogLevel, Message,
    Process, ProcessError, Step, Wake,
};

/// Where the processor is suspended between turns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProcessorState {
    /// Launch call out to the client; its input channel not yet known
    Launching,
    /// Waiting for the next message on the client channel
    Idle { channel: ChannelId },
    /// Best-effort call out (schema load or image download)
    Relaying { channel: ChannelId },
}

/// Translates client messages into store transitions or collaborator calls
///
/// On start it reads the seed state, launches the client and then loops on
/// its input channel forever. Update messages become one `put` each. Schema
/// and download messages call out and swallow failures so the loop
/// continues. An unrecognized message kind ends the process in failure, by
/// design: it signals a contract breach by whoever fills the channel.
#[derive(Debug)]
pub struct InputProcessor {
    state: ProcessorState,
}

impl InputProcessor {
    /// Create a processor ready to be spawned
    pub fn new() -> Self {
        Self {
            state: ProcessorState::Launching,
        }
    }

    fn take_next(&mut self, channel: ChannelId) -> Step {
        self.state = ProcessorState::Idle { channel };
        Step::Take(Interest::Channel(channel))
    }

    fn dispatch_message(
        &mut self,
        ctx: &mut EffectCtx<'_>,
        channel: ChannelId,
        message: Message,
    ) -> Result<Step, ProcessError> {
        match message {
            Message::UpdateFrameDimensions {
                next_frame_dimensions,
            } => {
                ctx.put(Action::FrameDimensionsUpdated {
                    frame_dimensions: next_frame_dimensions,
                });
                Ok(self.take_next(channel))
            }
            Message::UpdateFrameLayer {
                next_layer,
                next_index,
            } => {
                ctx.put(Action::FrameLayerUpdated {
                    layer_index: next_index,
                    frame_layer: next_layer,
                });
                Ok(self.take_next(channel))
            }
            Message::PushFrameLayer { new_frame_layer } => {
                ctx.put(Action::FrameLayerPushed {
                    frame_layer: new_frame_layer,
                });
                Ok(self.take_next(channel))
            }
            Message::UpdateServiceUrl { next_service_url } => {
                ctx.put(Action::ServiceUrlUpdated {
                    service_url: next_service_url,
                });
                Ok(self.take_next(channel))
            }
            Message::UpdateFrameSchema { next_schema_source } => {
                let service_url = ctx.select().service_url.clone();
                self.state = ProcessorState::Relaying { channel };
                Ok(Step::Call(CallRequest::LoadFrameSchema {
                    service_url,
                    schema_source: next_schema_source,
                }))
            }
            Message::DownloadFrameImage => {
                let state = ctx.select().clone();
                self.state = ProcessorState::Relaying { channel };
                Ok(Step::Call(CallRequest::DownloadFrameImage { state }))
            }
            Message::Unknown { kind } => {
                ctx.log(
                    LogLevel::Error,
                    format!("unrecognized client message: {kind}"),
                );
                Err(ProcessError::Protocol(format!(
                    "unrecognized client message: {kind}"
                )))
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Process for InputProcessor {
    fn name(&self) -> &'static str {
        "input-processor"
    }

    fn resume(&mut self, ctx: &mut EffectCtx<'_>, wake: Wake) -> Result<Step, ProcessError> {
        match (self.state, wake) {
            (ProcessorState::Launching, Wake::Start) => {
                let initial = ctx.select().clone();
                Ok(Step::Call(CallRequest::LaunchClient { initial }))
            }
            (
                ProcessorState::Launching,
                Wake::Settled(Ok(CallReply::ClientLaunched { channel })),
            ) => Ok(self.take_next(channel)),
            // launch is not best-effort: a failed client is fatal here
            (ProcessorState::Launching, Wake::Settled(Err(error))) => Err(error.into()),
            (ProcessorState::Idle { channel }, Wake::Taken(Event::Message(message))) => {
                self.dispatch_message(ctx, channel, message)
            }
            (ProcessorState::Relaying { channel }, Wake::Settled(result)) => {
                if let Err(error) = result {
                    ctx.log(LogLevel::Warn, format!("best-effort call failed: {error}"));
                }
                Ok(self.take_next(channel))
            }
            (state, wake) => Err(ProcessError::Protocol(format!(
                "input processor resumed out of protocol in {state:?}: {wake:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bootstrap::launch;
    use crate::config::AppConfig;
    use crate::testing::{RecordingClient, RecordingSchema};
    use frameloop_core::{Action, ChannelId, FrameDimensions, Layer, Message, Scheduler};

    fn launched(
        client: &RecordingClient,
        schema: &RecordingSchema,
    ) -> (Scheduler, crate::bootstrap::CoreProcesses, ChannelId) {
        let (mut scheduler, processes) = launch(
            &AppConfig::default(),
            Box::new(client.clone()),
            Box::new(schema.clone()),
        );
        scheduler.run_until_idle();
        let channel = client.channel().expect("client launched with a channel");
        (scheduler, processes, channel)
    }

    #[test]
    fn test_dimension_update_end_to_end() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _, channel) = launched(&client, &schema);

        scheduler
            .send_message(
                channel,
                Message::UpdateFrameDimensions {
                    next_frame_dimensions: FrameDimensions::new(800, 600),
                },
            )
            .expect("send");
        scheduler.run_until_idle();

        assert_eq!(
            scheduler.select().frame_dimensions,
            FrameDimensions::new(800, 600)
        );
        // exactly one main-widget hydration, carrying the new value
        let hydrated = client.main_widget_states();
        assert_eq!(hydrated.len(), 1);
        assert_eq!(hydrated[0].frame_dimensions, FrameDimensions::new(800, 600));
        // dimensions are not a layer change
        assert!(client.image_viewer_states().is_empty());
    }

    #[test]
    fn test_layer_messages_update_the_sequence() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _, channel) = launched(&client, &schema);

        let a = Layer::new().with_entry("tag", "a");
        let b = Layer::new().with_entry("tag", "b");

        scheduler
            .send_message(channel, Message::PushFrameLayer { new_frame_layer: a.clone() })
            .expect("send");
        scheduler
            .send_message(
                channel,
                Message::UpdateFrameLayer {
                    next_layer: Some(b.clone()),
                    next_index: 0,
                },
            )
            .expect("send");
        scheduler.run_until_idle();

        assert_eq!(scheduler.select().frame_layers, vec![b]);
        // both layer changes reached the image viewer
        assert_eq!(client.image_viewer_states().len(), 2);
    }

    #[test]
    fn test_schema_message_calls_with_current_url() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _, channel) = launched(&client, &schema);

        scheduler
            .send_message(
                channel,
                Message::UpdateServiceUrl {
                    next_service_url: "http://localhost:4000".to_string(),
                },
            )
            .expect("send");
        scheduler
            .send_message(
                channel,
                Message::UpdateFrameSchema {
                    next_schema_source: "frame.schema".to_string(),
                },
            )
            .expect("send");
        scheduler.run_until_idle();

        assert_eq!(
            schema.loads(),
            vec![("http://localhost:4000".to_string(), "frame.schema".to_string())]
        );
    }

    #[test]
    fn test_schema_failure_is_swallowed() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::failing();
        let (mut scheduler, processes, channel) = launched(&client, &schema);

        scheduler
            .send_message(
                channel,
                Message::UpdateFrameSchema {
                    next_schema_source: "frame.schema".to_string(),
                },
            )
            .expect("send");
        let report = scheduler.run_until_idle();
        assert!(report.failed.is_empty());
        assert!(scheduler.is_alive(processes.input_processor));

        // the loop keeps processing messages afterwards
        scheduler
            .send_message(
                channel,
                Message::UpdateFrameDimensions {
                    next_frame_dimensions: FrameDimensions::new(700, 700),
                },
            )
            .expect("send");
        scheduler.run_until_idle();
        assert_eq!(
            scheduler.select().frame_dimensions,
            FrameDimensions::new(700, 700)
        );
    }

    #[test]
    fn test_download_carries_the_full_snapshot() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _, channel) = launched(&client, &schema);

        scheduler
            .send_message(
                channel,
                Message::PushFrameLayer {
                    new_frame_layer: Layer::new().with_entry("tag", "a"),
                },
            )
            .expect("send");
        scheduler
            .send_message(channel, Message::DownloadFrameImage)
            .expect("send");
        scheduler.run_until_idle();

        let downloads = client.download_states();
        assert_eq!(downloads.len(), 1);
        assert_eq!(downloads[0], *scheduler.select());
        assert_eq!(downloads[0].frame_layers.len(), 1);
    }

    #[test]
    fn test_unknown_message_is_fatal_to_the_processor_only() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, processes, channel) = launched(&client, &schema);

        scheduler
            .send_message(
                channel,
                Message::Unknown {
                    kind: "REPAINT_EVERYTHING".to_string(),
                },
            )
            .expect("send");
        let report = scheduler.run_until_idle();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, processes.input_processor);
        assert!(!scheduler.is_alive(processes.input_processor));
        assert!(scheduler.is_alive(processes.main_widget_hydrator));
        assert!(scheduler.is_alive(processes.image_viewer_hydrator));

        // hydrators still react to actions dispatched by other means
        scheduler.put(Action::FrameLayerPushed {
            frame_layer: Layer::new().with_entry("tag", "late"),
        });
        scheduler.run_until_idle();
        assert_eq!(client.image_viewer_states().len(), 1);
        assert_eq!(client.main_widget_states().len(), 1);
    }

    #[test]
    fn test_launch_failure_is_fatal() {
        let client = RecordingClient::offline();
        let schema = RecordingSchema::default();
        let (mut scheduler, processes) = launch(
            &AppConfig::default(),
            Box::new(client.clone()),
            Box::new(schema),
        );
        let report = scheduler.run_until_idle();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, processes.input_processor);
        assert!(client.channel().is_none());
    }
}
