//! Wiring the standard process set onto a scheduler

use crate::broker::ServiceBroker;
use crate::config::AppConfig;
use crate::hydrator::Hydrator;
use crate::ports::{ClientPort, SchemaPort};
use crate::processor::InputProcessor;
use frameloop_core::{ProcessId, Scheduler};

/// Handles to the three long-lived application processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreProcesses {
    pub input_processor: ProcessId,
    pub main_widget_hydrator: ProcessId,
    pub image_viewer_hydrator: ProcessId,
}

/// Spawn the standard process set onto an existing scheduler
///
/// The processor is spawned first so the client launch call goes out before
/// the hydrators arm their takes; nothing observable depends on that order
/// since no action is dispatched until the client produces input.
pub fn spawn_core_processes(scheduler: &mut Scheduler) -> CoreProcesses {
    CoreProcesses {
        input_processor: scheduler.spawn(Box::new(InputProcessor::new())),
        main_widget_hydrator: scheduler.spawn(Box::new(Hydrator::main_widget())),
        image_viewer_hydrator: scheduler.spawn(Box::new(Hydrator::image_viewer())),
    }
}

/// Build a ready-to-run application scheduler
///
/// Seeds the store from `config`, routes calls through a [`ServiceBroker`]
/// over the two ports and spawns the standard processes. The caller still
/// drives it with [`Scheduler::run_until_idle`].
pub fn launch(
    config: &AppConfig,
    client: Box<dyn ClientPort>,
    schema: Box<dyn SchemaPort>,
) -> (Scheduler, CoreProcesses) {
    let mut scheduler = Scheduler::new(
        config.initial_state(),
        Box::new(ServiceBroker::new(client, schema)),
    );
    let processes = spawn_core_processes(&mut scheduler);
    (scheduler, processes)
}
