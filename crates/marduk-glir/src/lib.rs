//! Marduk GLIR crate.
//!
//! Deferred command queues for GPU objects. Objects can be created before any
//! graphics context exists; their commands are buffered and moved into the
//! right context or shared-namespace queue the first time the object is used
//! against a surface. An external [`executor::Executor`] replays the queues.

pub mod canvas;
pub mod command;
pub mod context;
pub mod executor;
pub mod logging;
pub mod object;

pub use canvas::{Canvas, CanvasRegistry, Surface};
pub use command::{Command, CommandQueue, Opcode, ProxyQueue, QueueHandle};
pub use context::{Context, ContextConfig, ContextError, SharedNamespace};
pub use object::{GlirType, GpuObject, ObjectId};
