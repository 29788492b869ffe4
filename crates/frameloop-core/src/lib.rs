//! Frameloop Core - state store and cooperative effect scheduler
//!
//! This crate provides the orchestrating core of the frame editor:
//! - Dynamic value types for opaque layer payloads (`Value`, `ValueMap`)
//! - The application state, its actions, and a pure reducer (`AppState`,
//!   `Action`, `reduce`, `Store`)
//! - The client message vocabulary and the channels that carry it
//!   (`Message`, `ChannelRegistry`)
//! - A deterministic, single-threaded cooperative scheduler running
//!   suspendable processes (`Scheduler`, `Process`, `Step`, `Wake`)
//! - The collaborator call vocabulary and broker seam (`CallRequest`,
//!   `CallBroker`)
//!
//! ## Concurrency model
//!
//! Processes interleave only at their declared suspension points (`take`,
//! `call`). `select` and `put` complete within the current turn, and the
//! store is single-writer by construction: only `put`, issued from inside a
//! turn or from the embedding shell, mutates it. An uncaught failure in one
//! process terminates that process alone.

mod action;
mod call;
mod channel;
mod diag;
mod error;
mod ids;
mod msg;
mod process;
pub mod scheduler;
mod state;
mod store;
mod value;

pub use action::{Action, ActionKind};
pub use call::{CallBroker, CallOutcome, CallReply, CallRequest};
pub use channel::ChannelRegistry;
pub use diag::{DiagnosticsSink, LogLevel, NullSink};
pub use error::{CallError, Error, ProcessError, Result};
pub use ids::{CallId, ChannelId, ProcessId};
pub use msg::Message;
pub use process::{Event, Interest, Process, Step, Wake};
pub use scheduler::{EffectCtx, RunReport, Scheduler};
pub use state::{AppState, FrameDimensions, Layer, DEFAULT_SERVICE_URL};
pub use store::{reduce, Store};
pub use value::{Value, ValueMap};
