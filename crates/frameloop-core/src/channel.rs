//! Channels bridging external messages into the scheduler

use crate::error::{Error, Result};
use crate::ids::ChannelId;
use crate::msg::Message;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Allocates and owns the unbounded FIFO queues carrying client messages
///
/// The registry is handed to the call broker during `launch`-style calls so
/// a client collaborator can open its own input channel.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    queues: IndexMap<ChannelId, VecDeque<Message>>,
    next_id: u64,
}

impl ChannelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty channel
    pub fn open(&mut self) -> ChannelId {
        self.next_id += 1;
        let id = ChannelId::new(self.next_id);
        self.queues.insert(id, VecDeque::new());
        id
    }

    /// Check whether a channel exists
    pub fn contains(&self, id: ChannelId) -> bool {
        self.queues.contains_key(&id)
    }

    /// Number of messages queued on a channel
    pub fn pending(&self, id: ChannelId) -> usize {
        self.queues.get(&id).map(VecDeque::len).unwrap_or(0)
    }

    /// Append a message to a channel queue
    pub(crate) fn push(&mut self, id: ChannelId, message: Message) -> Result<()> {
        let queue = self.queues.get_mut(&id).ok_or(Error::UnknownChannel(id))?;
        queue.push_back(message);
        Ok(())
    }

    /// Pop the oldest message off a channel queue
    pub(crate) fn pop(&mut self, id: ChannelId) -> Option<Message> {
        self.queues.get_mut(&id).and_then(VecDeque::pop_front)
    }
}
