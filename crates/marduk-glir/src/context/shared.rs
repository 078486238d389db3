use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::command::QueueHandle;

use super::ContextError;

/// Namespace of GPU objects shared between contexts.
///
/// Created by a backend once per group of contexts that share resources.
/// Two contexts share objects exactly when they hold the same namespace.
/// Buffers, programs, textures and vertex arrays are queued here; the queue
/// is separate from every context's local queue.
pub struct SharedNamespace {
    name: String,
    /// Representative surface, held weakly so the namespace never keeps it
    /// alive.
    reference: Weak<dyn Any>,
    glir: QueueHandle,
}

impl SharedNamespace {
    pub fn new<T: Any>(name: impl Into<String>, reference: &Rc<T>) -> Self {
        let strong: Rc<dyn Any> = reference.clone();
        Self {
            name: name.into(),
            reference: Rc::downgrade(&strong),
            glir: QueueHandle::new(),
        }
    }

    /// Name of the backend that created this namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queue for commands on shareable objects.
    pub fn glir(&self) -> &QueueHandle {
        &self.glir
    }

    /// Resolves the representative surface.
    pub fn reference(&self) -> Result<Rc<dyn Any>, ContextError> {
        self.reference.upgrade().ok_or(ContextError::ReferenceExpired)
    }

    /// Resolves the representative surface as a concrete type.
    pub fn reference_as<T: Any>(&self) -> Result<Rc<T>, ContextError> {
        self.reference()?
            .downcast::<T>()
            .map_err(|_| ContextError::ReferenceType(std::any::type_name::<T>()))
    }
}

impl fmt::Debug for SharedNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNamespace")
            .field("name", &self.name)
            .field("alive", &(self.reference.strong_count() > 0))
            .field("pending", &self.glir.len())
            .finish()
    }
}
