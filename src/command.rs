//! Commands
//!
//! A [`Command`] is a function plus its declared signature and documentation. Registering
//! it produces an immutable [`CommandDescriptor`] owned by the [`CommandRegistry`], which
//! resolves token sequences back to descriptors by name, alias, or group and name.

mod descriptor;
mod registry;
mod signature;

pub use descriptor::{AsyncFn, Callable, CommandDescriptor, ParameterDescriptor, SyncFn};
pub use registry::CommandRegistry;
pub use signature::{Command, Registration};
