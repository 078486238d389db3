use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::object::ObjectId;

use super::{Arg, Command, Opcode};

/// Where [`CommandQueue::push`] inserts a batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Priority {
    /// Append after everything already pending.
    #[default]
    Tail,
    /// Insert before everything already pending.
    Head,
}

/// Ordered buffer of pending commands.
///
/// Ordering rules:
/// - commands drain in append order; nothing is reordered or deduplicated
/// - a batch inserted with [`push`](Self::push) stays contiguous and keeps its
///   internal order, wherever it lands
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    commands: VecDeque<Command>,
}

impl CommandQueue {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command built from its parts.
    pub fn command(&mut self, opcode: impl Into<Opcode>, target: ObjectId, args: Vec<Arg>) {
        self.enqueue(Command::new(opcode, target, args));
    }

    /// Appends an already-built command.
    #[inline]
    pub fn enqueue(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Returns everything pending and leaves the queue empty.
    pub fn clear(&mut self) -> Vec<Command> {
        self.commands.drain(..).collect()
    }

    /// Inserts a batch at the tail or at the head.
    pub fn push(&mut self, commands: Vec<Command>, priority: Priority) {
        match priority {
            Priority::Tail => self.commands.extend(commands),
            Priority::Head => {
                // Walk backwards so the batch lands in its original order.
                for command in commands.into_iter().rev() {
                    self.commands.push_front(command);
                }
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterates pending commands in drain order without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }
}

/// Shared handle to a [`CommandQueue`].
///
/// Contexts, shared namespaces and bound GPU objects all hold handles to the
/// same underlying queue. Cloning the handle never copies commands.
#[derive(Debug, Clone, Default)]
pub struct QueueHandle(Rc<RefCell<CommandQueue>>);

impl QueueHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&self, opcode: impl Into<Opcode>, target: ObjectId, args: Vec<Arg>) {
        self.0.borrow_mut().command(opcode, target, args);
    }

    pub fn enqueue(&self, command: Command) {
        self.0.borrow_mut().enqueue(command);
    }

    pub fn clear(&self) -> Vec<Command> {
        self.0.borrow_mut().clear()
    }

    pub fn push(&self, commands: Vec<Command>, priority: Priority) {
        self.0.borrow_mut().push(commands, priority);
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copies the pending commands without draining them.
    pub fn snapshot(&self) -> Vec<Command> {
        self.0.borrow().iter().cloned().collect()
    }

    /// Whether both handles point at the same queue.
    #[inline]
    pub fn same_queue(&self, other: &QueueHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
