//! Deferred command stream types.
//!
//! Responsibilities:
//! - describe a GPU operation without executing it (`Command`)
//! - buffer commands in strict FIFO order (`CommandQueue`, `QueueHandle`)
//! - hold commands for objects that have no destination yet (`ProxyQueue`)

mod cmd;
mod proxy;
mod queue;

pub use cmd::{Arg, Command, Opcode};
pub use proxy::ProxyQueue;
pub use queue::{CommandQueue, Priority, QueueHandle};
