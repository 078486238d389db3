//! GPU object identity and lifecycle.

mod gpu_object;
mod id;
mod kind;

pub use gpu_object::GpuObject;
pub use id::{IdAllocator, ObjectId};
pub use kind::GlirType;
