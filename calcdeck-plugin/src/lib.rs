//! Calcdeck Plugin System
//!
//! Function libraries register self-describing, pure functions into a
//! shared `PluginRegistry`. Hosts call them by name through an
//! `EvalContext`.

mod traits;
mod registry;
mod context;
pub mod args;

pub use traits::{FunctionPlugin, FunctionMeta, ArgMeta};
pub use registry::PluginRegistry;
pub use context::{EvalContext, TraceStep};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{
        FunctionPlugin, FunctionMeta, ArgMeta,
        PluginRegistry, EvalContext, TraceStep,
    };
    pub use crate::args::*;
    pub use calcdeck_core::prelude::*;
}
