//! Frameloop App - the standard process set over the frameloop core
//!
//! Wires the three long-lived processes of the frame editor (input
//! processor, main widget hydrator, image viewer hydrator) onto a
//! [`frameloop_core::Scheduler`], with collaborator I/O abstracted behind
//! the [`ClientPort`] and [`SchemaPort`] traits. Embedders implement the two
//! ports, call [`launch`] and drive the returned scheduler.

mod bootstrap;
mod broker;
mod config;
mod hydrator;
mod ports;
mod processor;
#[cfg(test)]
pub(crate) mod testing;

pub use bootstrap::{launch, spawn_core_processes, CoreProcesses};
pub use broker::ServiceBroker;
pub use config::AppConfig;
pub use hydrator::Hydrator;
pub use ports::{ClientPort, SchemaPort};
pub use processor::InputProcessor;
