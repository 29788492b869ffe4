//! Frame Console Demo
//!
//! Drives the frame editor core with a console-printing client.
//! A scripted message sequence stands in for real widget input.

use frameloop_app::{launch, AppConfig, ClientPort, SchemaPort};
use frameloop_core::{
    AppState, CallError, ChannelId, ChannelRegistry, DiagnosticsSink, FrameDimensions, Layer,
    LogLevel, Message,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Client that renders widget refreshes as console lines
///
/// Clones share the launch channel so `main` can feed messages into the
/// channel the broker handed the processor.
#[derive(Clone, Default)]
struct ConsoleClient {
    channel: Rc<RefCell<Option<ChannelId>>>,
}

impl ConsoleClient {
    fn channel(&self) -> Option<ChannelId> {
        *self.channel.borrow()
    }
}

impl ClientPort for ConsoleClient {
    fn launch(
        &mut self,
        initial: &AppState,
        channels: &mut ChannelRegistry,
    ) -> Result<ChannelId, CallError> {
        let channel = channels.open();
        *self.channel.borrow_mut() = Some(channel);
        println!(
            "[client] launched at {} with a {} frame",
            initial.service_url, initial.frame_dimensions
        );
        Ok(channel)
    }

    fn hydrate_main_widget(&mut self, state: &AppState) -> Result<(), CallError> {
        println!(
            "[main widget] frame {} | {} layer(s) | service {}",
            state.frame_dimensions,
            state.frame_layers.len(),
            state.service_url
        );
        Ok(())
    }

    fn hydrate_image_viewer(&mut self, state: &AppState) -> Result<(), CallError> {
        println!("[image viewer] {} layer(s)", state.frame_layers.len());
        Ok(())
    }

    fn download_frame_image(&mut self, state: &AppState) -> Result<(), CallError> {
        println!(
            "[download] exporting {} frame with {} layer(s)",
            state.frame_dimensions,
            state.frame_layers.len()
        );
        Ok(())
    }
}

/// Schema service that only reports what it was asked for
struct ConsoleSchema;

impl SchemaPort for ConsoleSchema {
    fn load_frame_schema(
        &mut self,
        service_url: &str,
        schema_source: &str,
    ) -> Result<(), CallError> {
        println!("[schema] loading {schema_source} from {service_url}");
        Ok(())
    }
}

/// Diagnostics straight to stdout
struct ConsoleSink;

impl DiagnosticsSink for ConsoleSink {
    fn log(&mut self, level: LogLevel, message: &str) {
        println!("[{level:?}] {message}");
    }
}

fn main() {
    println!("=== Frame Console Demo ===\n");

    let client = ConsoleClient::default();
    let (scheduler, _processes) = launch(
        &AppConfig::default(),
        Box::new(client.clone()),
        Box::new(ConsoleSchema),
    );
    let mut scheduler = scheduler.with_sink(Box::new(ConsoleSink));
    scheduler.run_until_idle();

    let Some(channel) = client.channel() else {
        println!("client failed to launch");
        return;
    };

    let script = vec![
        Message::UpdateFrameDimensions {
            next_frame_dimensions: FrameDimensions::new(800, 600),
        },
        Message::PushFrameLayer {
            new_frame_layer: Layer::new().with_entry("kind", "background"),
        },
        Message::PushFrameLayer {
            new_frame_layer: Layer::new().with_entry("kind", "sketch"),
        },
        Message::UpdateFrameLayer {
            next_layer: Some(Layer::new().with_entry("kind", "inked sketch")),
            next_index: 1,
        },
        Message::UpdateFrameSchema {
            next_schema_source: "frame.schema".to_string(),
        },
        Message::DownloadFrameImage,
    ];

    println!("\nFeeding {} scripted messages...\n", script.len());
    for message in script {
        if let Err(error) = scheduler.send_message(channel, message) {
            println!("send failed: {error}");
            return;
        }
        scheduler.run_until_idle();
    }

    let state = scheduler.select();
    println!("\nFinal state:");
    println!("  frame:   {}", state.frame_dimensions);
    println!("  layers:  {}", state.frame_layers.len());
    println!("  service: {}", state.service_url);

    println!("\n=== Demo Complete ===");
}
