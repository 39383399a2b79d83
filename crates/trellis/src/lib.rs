//! Hierarchical boolean feature flags.
//!
//! A [`FlagRegistry`] holds named on/off flags arranged in a dependency
//! graph: every flag may declare already-registered flags as parents, and
//! turning a flag off turns off everything beneath it. Turning a flag back
//! on touches only that flag, so previously disabled descendants stay off
//! until re-enabled explicitly.
//!
//! Parents must exist before their children, which makes registration
//! order a topological order and cycles unrepresentable.
//!
//! [`FlagRegistry`] is a plain single-threaded value; wrap it in a
//! [`FlagsHandle`] to share one registry across threads.

mod error;
mod handle;
mod id;
mod registry;
mod snapshot;

pub use error::FlagError;
pub use handle::FlagsHandle;
pub use id::FlagId;
pub use registry::FlagRegistry;
pub use snapshot::{FlagSnapshot, RegistrySnapshot};
