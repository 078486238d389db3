use crate::object::ObjectId;

use super::{Arg, Command, CommandQueue, Opcode, Priority, QueueHandle};

#[derive(Debug)]
enum ProxyState {
    /// Commands wait here until a destination is known.
    Unbound(CommandQueue),
    /// Commands go straight to the destination.
    Bound(QueueHandle),
}

/// Queue that buffers commands until it is bound to a real destination.
///
/// State machine:
/// - `Unbound`: [`command`](Self::command) buffers locally
/// - [`assign`](Self::assign) moves the backlog into the destination and
///   switches to `Bound`; this happens once
/// - `Bound`: commands are forwarded immediately, further `assign` calls are
///   ignored
#[derive(Debug)]
pub struct ProxyQueue {
    state: ProxyState,
}

impl Default for ProxyQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyQueue {
    pub fn new() -> Self {
        Self {
            state: ProxyState::Unbound(CommandQueue::new()),
        }
    }

    pub fn command(&mut self, opcode: impl Into<Opcode>, target: ObjectId, args: Vec<Arg>) {
        self.enqueue(Command::new(opcode, target, args));
    }

    pub fn enqueue(&mut self, command: Command) {
        match &mut self.state {
            ProxyState::Unbound(backlog) => backlog.enqueue(command),
            ProxyState::Bound(dest) => {
                log::trace!(target: "marduk_glir::command", "forward {command}");
                dest.enqueue(command);
            }
        }
    }

    /// Binds to `destination`, flushing the backlog ahead of anything pending
    /// there. Returns `false` if the proxy was already bound.
    pub fn assign(&mut self, destination: &QueueHandle) -> bool {
        self.assign_with_priority(destination, Priority::Head)
    }

    /// Like [`assign`](Self::assign) with an explicit insertion point for the
    /// backlog.
    pub fn assign_with_priority(&mut self, destination: &QueueHandle, priority: Priority) -> bool {
        let backlog = match &mut self.state {
            ProxyState::Bound(_) => return false,
            ProxyState::Unbound(backlog) => backlog.clear(),
        };

        log::trace!(
            target: "marduk_glir::command",
            "flush {} buffered commands ({priority:?})",
            backlog.len()
        );
        destination.push(backlog, priority);
        self.state = ProxyState::Bound(destination.clone());
        true
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        matches!(self.state, ProxyState::Bound(_))
    }

    /// The bound destination, if any.
    pub fn destination(&self) -> Option<&QueueHandle> {
        match &self.state {
            ProxyState::Bound(dest) => Some(dest),
            ProxyState::Unbound(_) => None,
        }
    }

    /// Number of commands still held locally. Always 0 once bound.
    pub fn buffered(&self) -> usize {
        match &self.state {
            ProxyState::Unbound(backlog) => backlog.len(),
            ProxyState::Bound(_) => 0,
        }
    }
}
