//! Cooperative effect scheduler
//!
//! A deterministic, single-threaded runtime interleaving long-lived
//! processes. Processes suspend only at the points their [`Step`] declares
//! (`take`, `call`); `select`, `put` and `spawn` always complete within the
//! current turn. All effects of a `put` (the store transition plus the
//! resumption of matching waiters) are visible before any other process runs,
//! so no process ever observes a partially applied action.

use crate::action::Action;
use crate::call::{CallBroker, CallOutcome, CallReply, CallRequest};
use crate::channel::ChannelRegistry;
use crate::diag::{DiagnosticsSink, LogLevel, NullSink};
use crate::error::{CallError, Error, ProcessError, Result};
use crate::ids::{CallId, ChannelId, ProcessId};
use crate::msg::Message;
use crate::process::{Event, Interest, Process, Step, Wake};
use crate::state::AppState;
use crate::store::Store;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Summary of one `run_until_idle` drive
#[derive(Debug, Default)]
pub struct RunReport {
    /// Processes that ran to normal completion during the drive
    pub completed: Vec<(ProcessId, &'static str)>,
    /// Processes terminated by an uncaught failure, with the failure
    pub failed: Vec<(ProcessId, &'static str, ProcessError)>,
    /// Turns executed
    pub turns: usize,
}

/// Bookkeeping for one registered process
#[derive(Debug)]
struct Slot {
    name: &'static str,
    started: bool,
    /// Armed `take`, kept until the matching wake is consumed
    interest: Option<Interest>,
    /// When the current `take` began; waiter resumption order
    wait_seq: u64,
    /// Matched actions not yet consumed by a `take`
    inbox: VecDeque<Action>,
    /// Result of a settled `call`, not yet delivered
    settled: Option<std::result::Result<CallReply, CallError>>,
    enqueued: bool,
}

impl Slot {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            started: false,
            interest: None,
            wait_seq: 0,
            inbox: VecDeque::new(),
            settled: None,
            enqueued: false,
        }
    }
}

/// Scheduler state shared with running processes through [`EffectCtx`]
struct Inner {
    store: Store,
    slots: IndexMap<ProcessId, Slot>,
    ready: VecDeque<ProcessId>,
    channels: ChannelRegistry,
    /// In-flight calls by id, mapped to the parked issuer
    calls: IndexMap<CallId, ProcessId>,
    /// Processes registered during the current turn, adopted afterwards
    spawned: Vec<(ProcessId, Box<dyn Process>)>,
    sink: Box<dyn DiagnosticsSink>,
    next_process: u64,
    next_call: u64,
    next_wait: u64,
}

impl Inner {
    fn log(&mut self, level: LogLevel, message: &str) {
        self.sink.log(level, message);
    }

    fn spawn(&mut self, process: Box<dyn Process>) -> ProcessId {
        self.next_process += 1;
        let pid = ProcessId::new(self.next_process);
        self.slots.insert(pid, Slot::new(process.name()));
        self.spawned.push((pid, process));
        self.enqueue(pid);
        pid
    }

    fn enqueue(&mut self, pid: ProcessId) {
        if let Some(slot) = self.slots.get_mut(&pid) {
            if !slot.enqueued {
                slot.enqueued = true;
                self.ready.push_back(pid);
            }
        }
    }

    /// Dispatch an action and resume every process currently suspended on a
    /// matching `take`, in the order the waiters began waiting
    fn put(&mut self, action: Action) {
        self.store.dispatch(&action);

        let kind = action.kind();
        let mut waiters: Vec<(u64, ProcessId)> = self
            .slots
            .iter()
            .filter(|(_, slot)| {
                slot.interest
                    .as_ref()
                    .is_some_and(|interest| interest.matches_action(kind))
            })
            .map(|(pid, slot)| (slot.wait_seq, *pid))
            .collect();
        waiters.sort_unstable_by_key(|(seq, _)| *seq);

        for (_, pid) in waiters {
            if let Some(slot) = self.slots.get_mut(&pid) {
                slot.inbox.push_back(action.clone());
            }
            self.enqueue(pid);
        }
    }

    /// Arm a `take` and re-enqueue immediately if a match is already buffered
    fn arm(&mut self, pid: ProcessId, interest: Interest) {
        self.next_wait += 1;
        let wait_seq = self.next_wait;

        let channel_pending = interest
            .channel()
            .map(|channel| self.channels.pending(channel) > 0)
            .unwrap_or(false);

        let ready_now = match self.slots.get_mut(&pid) {
            Some(slot) => {
                slot.wait_seq = wait_seq;
                let buffered = slot
                    .inbox
                    .iter()
                    .any(|action| interest.matches_action(action.kind()));
                slot.interest = Some(interest);
                channel_pending || buffered
            }
            None => false,
        };

        if ready_now {
            self.enqueue(pid);
        }
    }

    fn begin_call(&mut self, pid: ProcessId) -> CallId {
        self.next_call += 1;
        let call = CallId::new(self.next_call);
        self.calls.insert(call, pid);
        call
    }

    fn finish_call(
        &mut self,
        call: CallId,
        result: std::result::Result<CallReply, CallError>,
    ) -> Result<()> {
        let pid = self.calls.shift_remove(&call).ok_or(Error::UnknownCall(call))?;
        if let Some(slot) = self.slots.get_mut(&pid) {
            slot.settled = Some(result);
            self.enqueue(pid);
        }
        Ok(())
    }

    /// Work out why a ready process is runnable and consume that reason
    ///
    /// Returns `None` for a spurious enqueue (e.g. the buffered message was
    /// consumed by someone else); the process simply stays suspended.
    fn begin_turn(&mut self, pid: ProcessId) -> Option<Wake> {
        let slot = self.slots.get_mut(&pid)?;
        slot.enqueued = false;

        if !slot.started {
            slot.started = true;
            return Some(Wake::Start);
        }
        if let Some(result) = slot.settled.take() {
            return Some(Wake::Settled(result));
        }

        let interest = slot.interest.clone()?;
        match interest {
            Interest::Channel(channel) => {
                let message = self.channels.pop(channel)?;
                let slot = self.slots.get_mut(&pid)?;
                slot.interest = None;
                Some(Wake::Taken(Event::Message(message)))
            }
            kind_interest => {
                let slot = self.slots.get_mut(&pid)?;
                let position = slot
                    .inbox
                    .iter()
                    .position(|action| kind_interest.matches_action(action.kind()))?;
                let action = slot.inbox.remove(position)?;
                slot.interest = None;
                Some(Wake::Taken(Event::Action(action)))
            }
        }
    }
}

/// Handle to the never-suspending primitives, passed into every turn
///
/// This is the explicit store/scheduler context processes receive instead of
/// any ambient global access.
pub struct EffectCtx<'a> {
    inner: &'a mut Inner,
}

impl EffectCtx<'_> {
    /// Synchronous read of the current state snapshot; never a suspension point
    pub fn select(&self) -> &AppState {
        self.inner.store.select()
    }

    /// Apply an action to the store and resume matching waiters
    ///
    /// Completes within the current turn; never a suspension point. Resumed
    /// waiters run only after the current turn yields.
    pub fn put(&mut self, action: Action) {
        self.inner.put(action);
    }

    /// Register a process for interleaved execution
    ///
    /// Returns immediately; the spawned process first runs at the next
    /// scheduling opportunity, never synchronously inline.
    pub fn spawn(&mut self, process: Box<dyn Process>) -> ProcessId {
        self.inner.spawn(process)
    }

    /// Fire-and-forget diagnostics
    pub fn log(&mut self, level: LogLevel, message: impl AsRef<str>) {
        self.inner.log(level, message.as_ref());
    }
}

/// The cooperative runtime driving processes, store and channels
pub struct Scheduler {
    inner: Inner,
    procs: IndexMap<ProcessId, Box<dyn Process>>,
    broker: Box<dyn CallBroker>,
}

impl Scheduler {
    /// Create a scheduler around a seed state and a call broker
    pub fn new(initial: AppState, broker: Box<dyn CallBroker>) -> Self {
        Self {
            inner: Inner {
                store: Store::new(initial),
                slots: IndexMap::new(),
                ready: VecDeque::new(),
                channels: ChannelRegistry::new(),
                calls: IndexMap::new(),
                spawned: Vec::new(),
                sink: Box::new(NullSink),
                next_process: 0,
                next_call: 0,
                next_wait: 0,
            },
            procs: IndexMap::new(),
            broker,
        }
    }

    /// Replace the diagnostics sink
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticsSink>) -> Self {
        self.inner.sink = sink;
        self
    }

    /// Register a process; it first runs at the next scheduling turn
    pub fn spawn(&mut self, process: Box<dyn Process>) -> ProcessId {
        let pid = self.inner.spawn(process);
        self.adopt_spawned();
        pid
    }

    /// Open a channel for bridging external messages in
    pub fn open_channel(&mut self) -> ChannelId {
        self.inner.channels.open()
    }

    /// Append a message to a channel and wake its earliest armed waiter
    pub fn send_message(&mut self, channel: ChannelId, message: Message) -> Result<()> {
        self.inner.channels.push(channel, message)?;

        let waiter = self
            .inner
            .slots
            .iter()
            .filter(|(_, slot)| {
                slot.interest
                    .as_ref()
                    .and_then(Interest::channel)
                    .is_some_and(|armed| armed == channel)
            })
            .min_by_key(|(_, slot)| slot.wait_seq)
            .map(|(pid, _)| *pid);
        if let Some(pid) = waiter {
            self.inner.enqueue(pid);
        }
        Ok(())
    }

    /// Dispatch an action from outside any process
    pub fn put(&mut self, action: Action) {
        self.inner.put(action);
    }

    /// Settle an externally asynchronous call
    pub fn settle(
        &mut self,
        call: CallId,
        result: std::result::Result<CallReply, CallError>,
    ) -> Result<()> {
        self.inner.finish_call(call, result)
    }

    /// Read the current state snapshot
    pub fn select(&self) -> &AppState {
        self.inner.store.select()
    }

    /// Check whether a process is still registered (suspended or ready)
    pub fn is_alive(&self, pid: ProcessId) -> bool {
        self.inner.slots.contains_key(&pid)
    }

    /// Run turns until no process is ready
    ///
    /// A process parked in a `call` that has not settled does not count as
    /// ready; it stays suspended across drives until [`Scheduler::settle`]
    /// wakes it.
    pub fn run_until_idle(&mut self) -> RunReport {
        let mut report = RunReport::default();
        while let Some(pid) = self.inner.ready.pop_front() {
            self.turn(pid, &mut report);
        }
        report
    }

    fn turn(&mut self, pid: ProcessId, report: &mut RunReport) {
        let Some(wake) = self.inner.begin_turn(pid) else {
            return;
        };
        let Some(mut process) = self.procs.shift_remove(&pid) else {
            return;
        };
        report.turns += 1;

        let outcome = process.resume(&mut EffectCtx { inner: &mut self.inner }, wake);
        self.adopt_spawned();

        match outcome {
            Ok(Step::Take(interest)) => {
                self.inner.arm(pid, interest);
                self.procs.insert(pid, process);
            }
            Ok(Step::Call(request)) => {
                let call = self.inner.begin_call(pid);
                self.procs.insert(pid, process);
                match self.broker.submit(call, request, &mut self.inner.channels) {
                    CallOutcome::Settled(result) => {
                        if self.inner.finish_call(call, result).is_err() {
                            self.inner
                                .log(LogLevel::Error, &format!("broker settled unknown {call}"));
                        }
                    }
                    CallOutcome::Pending => {}
                }
            }
            Ok(Step::Done) => {
                let name = process.name();
                self.inner.slots.shift_remove(&pid);
                self.inner
                    .log(LogLevel::Debug, &format!("{name} ({pid}) completed"));
                report.completed.push((pid, name));
            }
            Err(error) => {
                let name = process.name();
                self.inner.slots.shift_remove(&pid);
                self.inner
                    .log(LogLevel::Error, &format!("{name} ({pid}) terminated: {error}"));
                report.failed.push((pid, name, error));
            }
        }
    }

    fn adopt_spawned(&mut self) {
        for (pid, process) in std::mem::take(&mut self.inner.spawned) {
            self.procs.insert(pid, process);
        }
    }
}
