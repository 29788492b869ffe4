//! View hydrators: state changes in, widget refreshes out

use frameloop_core::{
    ActionKind, CallRequest, EffectCtx, Interest, LogLevel, Process, ProcessError, Step, Wake,
};

/// Which client view a hydrator refreshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    MainWidget,
    ImageViewer,
}

/// Refreshes one client view whenever a triggering action lands
///
/// Loops forever: take a matching action, select a fresh snapshot, call the
/// view's hydrate operation. A failed refresh is logged and the loop re-arms;
/// hydration failures never terminate the process.
#[derive(Debug)]
pub struct Hydrator {
    label: &'static str,
    trigger: Vec<ActionKind>,
    view: View,
}

impl Hydrator {
    /// Hydrator for the main editing widget; triggers on every
    /// state-changing action
    pub fn main_widget() -> Self {
        Self {
            label: "main-widget-hydrator",
            trigger: ActionKind::STATE_CHANGING.to_vec(),
            view: View::MainWidget,
        }
    }

    /// Hydrator for the image viewer; triggers on layer changes only
    pub fn image_viewer() -> Self {
        Self {
            label: "image-viewer-hydrator",
            trigger: ActionKind::LAYER_CHANGING.to_vec(),
            view: View::ImageViewer,
        }
    }

    fn rearm(&self) -> Step {
        Step::Take(Interest::kinds(self.trigger.iter().copied()))
    }
}

impl Process for Hydrator {
    fn name(&self) -> &'static str {
        self.label
    }

    fn resume(&mut self, ctx: &mut EffectCtx<'_>, wake: Wake) -> Result<Step, ProcessError> {
        match wake {
            Wake::Start => Ok(self.rearm()),
            Wake::Taken(_) => {
                let state = ctx.select().clone();
                Ok(Step::Call(match self.view {
                    View::MainWidget => CallRequest::HydrateMainWidget { state },
                    View::ImageViewer => CallRequest::HydrateImageViewer { state },
                }))
            }
            Wake::Settled(result) => {
                if let Err(error) = result {
                    ctx.log(LogLevel::Warn, format!("{} refresh failed: {error}", self.label));
                }
                Ok(self.rearm())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::bootstrap::launch;
    use crate::config::AppConfig;
    use crate::testing::{RecordingClient, RecordingSchema};
    use frameloop_core::{Action, FrameDimensions, Layer, Message};

    #[test]
    fn test_hydration_failure_keeps_the_loop_alive() {
        let client = RecordingClient::flaky_widgets();
        let schema = RecordingSchema::default();
        let (mut scheduler, processes) = launch(
            &AppConfig::default(),
            Box::new(client.clone()),
            Box::new(schema),
        );
        scheduler.run_until_idle();

        scheduler.put(Action::FrameDimensionsUpdated {
            frame_dimensions: FrameDimensions::new(800, 600),
        });
        let report = scheduler.run_until_idle();
        assert!(report.failed.is_empty());
        assert!(scheduler.is_alive(processes.main_widget_hydrator));

        // a later action still triggers another attempt
        scheduler.put(Action::FrameDimensionsUpdated {
            frame_dimensions: FrameDimensions::new(900, 900),
        });
        scheduler.run_until_idle();
        assert_eq!(client.main_widget_states().len(), 2);
        assert!(scheduler.is_alive(processes.main_widget_hydrator));
    }

    #[test]
    fn test_image_viewer_triggers_on_layer_changes_only() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _) = launch(
            &AppConfig::default(),
            Box::new(client.clone()),
            Box::new(schema),
        );
        scheduler.run_until_idle();
        let channel = client.channel().expect("client launched");

        scheduler
            .send_message(
                channel,
                Message::UpdateFrameDimensions {
                    next_frame_dimensions: FrameDimensions::new(800, 600),
                },
            )
            .expect("send");
        scheduler.run_until_idle();
        assert!(client.image_viewer_states().is_empty());
        assert_eq!(client.main_widget_states().len(), 1);

        scheduler
            .send_message(
                channel,
                Message::PushFrameLayer {
                    new_frame_layer: Layer::new().with_entry("tag", "a"),
                },
            )
            .expect("send");
        scheduler.run_until_idle();
        assert_eq!(client.image_viewer_states().len(), 1);
        assert_eq!(client.main_widget_states().len(), 2);
    }

    #[test]
    fn test_main_widget_receives_every_state_change() {
        let client = RecordingClient::default();
        let schema = RecordingSchema::default();
        let (mut scheduler, _) = launch(
            &AppConfig::default(),
            Box::new(client.clone()),
            Box::new(schema),
        );
        scheduler.run_until_idle();
        let channel = client.channel().expect("client launched");

        scheduler
            .send_message(
                channel,
                Message::UpdateServiceUrl {
                    next_service_url: "http://localhost:4000".to_string(),
                },
            )
            .expect("send");
        scheduler.run_until_idle();

        let hydrated = client.main_widget_states();
        assert_eq!(hydrated.len(), 1);
        assert_eq!(hydrated[0].service_url, "http://localhost:4000");
    }
}
