//! HTTP middleware for the device client.

mod debug;

pub(crate) use debug::DebugDumpMiddleware;
pub use debug::{DebugLog, DebugSink, TracingSink};
