use crate::canvas::current_canvas;
use crate::command::{Arg, Opcode, Priority, ProxyQueue, QueueHandle};
use crate::context::{Context, ContextError};

use super::{GlirType, IdAllocator, ObjectId};

/// A resource with a GPU-side representation.
///
/// Lifecycle:
/// - construction allocates an id and queues `CREATE` into a private proxy
/// - the first association moves everything queued so far into the
///   destination (shared namespace or context-local queue) and binds there
/// - [`delete`](Self::delete) queues `DELETE`; nothing is reclaimed here
///
/// No operation touches a native graphics resource; they only enqueue
/// intent.
#[derive(Debug)]
pub struct GpuObject {
    id: ObjectId,
    glir_type: GlirType,
    queue: ProxyQueue,
}

impl GpuObject {
    /// Creates an object with an id from the process-wide allocator.
    pub fn new(glir_type: GlirType) -> Self {
        Self::with_allocator(glir_type, IdAllocator::global())
    }

    pub fn with_allocator(glir_type: GlirType, ids: &IdAllocator) -> Self {
        let id = ids.allocate();
        let mut queue = ProxyQueue::new();
        queue.command(Opcode::Create, id, vec![Arg::Type(glir_type)]);
        log::trace!("new {glir_type} object {id}");
        Self {
            id,
            glir_type,
            queue,
        }
    }

    /// Id used to reference this object in the command stream. Unique
    /// within the process.
    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    #[inline]
    pub fn glir_type(&self) -> GlirType {
        self.glir_type
    }

    /// Whether the object has been bound to its final queue.
    #[inline]
    pub fn is_associated(&self) -> bool {
        self.queue.is_bound()
    }

    /// The final queue, once associated.
    pub fn destination(&self) -> Option<&QueueHandle> {
        self.queue.destination()
    }

    /// Queues a command targeting this object.
    pub fn command(&mut self, opcode: impl Into<Opcode>, args: Vec<Arg>) {
        self.queue.command(opcode, self.id, args);
    }

    /// Queues deletion of the GPU-side representation.
    ///
    /// Works whether or not the object was ever associated; the id is not
    /// reused afterwards.
    pub fn delete(&mut self) {
        self.queue.command(Opcode::Delete, self.id, Vec::new());
    }

    /// Binds this object to the queue it belongs to in `context`.
    ///
    /// Called at the moments objects are first used against a surface
    /// (drawing with a program, activating a frame buffer). The backlog
    /// lands ahead of anything pending in the destination. Returns
    /// `Ok(false)` when the object was already associated.
    pub fn associate_with(&mut self, context: &Context) -> Result<bool, ContextError> {
        self.associate_with_priority(context, Priority::Head)
    }

    /// Like [`associate_with`](Self::associate_with) with an explicit
    /// insertion point for the backlog.
    pub fn associate_with_priority(
        &mut self,
        context: &Context,
        priority: Priority,
    ) -> Result<bool, ContextError> {
        if self.queue.is_bound() {
            log::warn!(
                "{} object {} is already associated; ignoring",
                self.glir_type,
                self.id
            );
            return Ok(false);
        }

        let destination = if self.glir_type.is_shareable() {
            context
                .shared()
                .ok_or(ContextError::SharedNotAttached)?
                .glir()
        } else {
            context.glir()
        };

        log::debug!(
            "associating {} object {} ({} buffered commands)",
            self.glir_type,
            self.id,
            self.queue.buffered()
        );
        Ok(self.queue.assign_with_priority(destination, priority))
    }

    /// Associates with this thread's current canvas, if there is one.
    ///
    /// Returns `Ok(false)` when there is no live canvas or the object was
    /// already associated; the commands then stay buffered.
    pub fn associate_with_current(&mut self) -> Result<bool, ContextError> {
        match current_canvas() {
            Some(canvas) => self.associate_with(canvas.context()),
            None => Ok(false),
        }
    }
}
