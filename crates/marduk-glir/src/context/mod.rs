//! Context and sharing model.
//!
//! A [`Context`] is created by a backend for each surface. Contexts that
//! were set up to share GPU resources hold the same [`SharedNamespace`],
//! which owns the queue for shareable object types.

mod config;
mod ctx;
mod error;
mod shared;

pub use config::{default_config, ConfigKey, ConfigValue, ContextConfig};
pub use ctx::Context;
pub use error::ContextError;
pub use shared::SharedNamespace;
