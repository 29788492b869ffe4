//! The process protocol: explicit suspension states and resume reasons

use crate::action::{Action, ActionKind};
use crate::call::{CallReply, CallRequest};
use crate::error::{CallError, ProcessError};
use crate::ids::ChannelId;
use crate::msg::Message;
use crate::scheduler::EffectCtx;

/// What a suspended `take` is waiting for
#[derive(Debug, Clone, PartialEq)]
pub enum Interest {
    /// A single store action kind
    Kind(ActionKind),
    /// Any of a set of store action kinds
    Kinds(Vec<ActionKind>),
    /// Any message on the given channel
    Channel(ChannelId),
}

impl Interest {
    /// Build an interest over a set of action kinds
    pub fn kinds(kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        Interest::Kinds(kinds.into_iter().collect())
    }

    /// Check whether an action of this kind matches
    pub fn matches_action(&self, kind: ActionKind) -> bool {
        match self {
            Interest::Kind(k) => *k == kind,
            Interest::Kinds(set) => set.contains(&kind),
            Interest::Channel(_) => false,
        }
    }

    /// The channel this interest is armed on, if any
    pub fn channel(&self) -> Option<ChannelId> {
        match self {
            Interest::Channel(id) => Some(*id),
            _ => None,
        }
    }
}

/// An event a suspended process is resumed with
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A store action delivered by a `put`
    Action(Action),
    /// A client message delivered on a channel
    Message(Message),
}

/// Why a process is being resumed
#[derive(Debug, Clone, PartialEq)]
pub enum Wake {
    /// First turn after `spawn`
    Start,
    /// A `take` matched; suspension ends exactly once per match
    Taken(Event),
    /// A `call` settled, successfully or not
    Settled(Result<CallReply, CallError>),
}

/// What a process does at the end of a turn
///
/// `Take` and `Call` are the only suspension points. Everything reachable
/// through [`EffectCtx`] (`select`, `put`, `spawn`, `log`) completes within
/// the current turn.
#[derive(Debug)]
pub enum Step {
    /// Suspend until a matching action or message is produced
    Take(Interest),
    /// Suspend until the collaborator operation settles
    Call(CallRequest),
    /// Normal completion; the process is deregistered
    Done,
}

/// A long-lived, cooperatively scheduled unit of control flow
///
/// A process alternates between running a synchronous turn and being
/// suspended in the state its last [`Step`] declared. An `Err` from `resume`
/// terminates this process only; siblings and the scheduler keep running.
pub trait Process {
    /// Stable name for diagnostics and run reports
    fn name(&self) -> &'static str;

    /// Run one synchronous turn
    fn resume(&mut self, ctx: &mut EffectCtx<'_>, wake: Wake) -> Result<Step, ProcessError>;
}
