//! Calcdeck - Everyday calculators as self-describing functions
//!
//! Bundles the unit, grade, percentage and password libraries behind one
//! registry. Every function takes `Value` arguments and returns a `Value`;
//! failures come back as `Value::Error` rather than panics.
//!
//! ```ignore
//! let deck = Calcdeck::with_standard_library();
//! let tip = deck.call("tip", &args![50, 15]);
//! assert_eq!(tip.get("result").as_number(), Some(57.5));
//! ```

pub use calcdeck_core::{CalcError, Severity, ToolError, Value, codes};
pub use calcdeck_plugin::{EvalContext, FunctionMeta, FunctionPlugin, PluginRegistry, TraceStep};

pub use calcdeck_grades as grades;
pub use calcdeck_password as password;
pub use calcdeck_percent as percent;
pub use calcdeck_units as units;

use std::sync::Arc;
use tracing::debug;

/// Registry with every Calcdeck library loaded
pub fn standard_registry() -> PluginRegistry {
    let registry = PluginRegistry::new();
    let registry = calcdeck_units::load_units_library(registry);
    let registry = calcdeck_grades::load_grades_library(registry);
    let registry = calcdeck_percent::load_percent_library(registry);
    calcdeck_password::load_password_library(registry)
}

/// Result of a traced call
#[derive(Debug, Clone)]
pub struct CallResult {
    pub value: Value,
    pub trace: Vec<TraceStep>,
    pub errors: Vec<ToolError>,
}

/// Main Calcdeck engine
pub struct Calcdeck {
    registry: Arc<PluginRegistry>,
    seed: Option<u64>,
}

impl Calcdeck {
    pub fn new(registry: PluginRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            seed: None,
        }
    }

    pub fn with_standard_library() -> Self {
        Self::new(standard_registry())
    }

    /// Fix the seed used by functions that draw random numbers
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    fn context(&self) -> EvalContext {
        let ctx = EvalContext::new(self.registry.clone());
        match self.seed {
            Some(seed) => ctx.with_seed(seed),
            None => ctx,
        }
    }

    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        self.context().call(name, args)
    }

    /// Call and keep the recorded steps alongside the value
    pub fn call_traced(&self, name: &str, args: &[Value]) -> CallResult {
        let mut ctx = self.context().with_tracing(true);
        let value = ctx.call(name, args);
        let errors: Vec<ToolError> = ctx.errors().into_iter().cloned().collect();
        debug!(function = name, steps = ctx.trace.len(), errors = errors.len(), "traced call finished");

        CallResult {
            value,
            trace: ctx.trace,
            errors,
        }
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        self.registry.help(name)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        self.registry.list_functions(category)
    }
}

impl Default for Calcdeck {
    fn default() -> Self {
        Self::with_standard_library()
    }
}

/// Build a `Vec<Value>` argument list from plain Rust values
#[macro_export]
macro_rules! args {
    [] => { Vec::<$crate::Value>::new() };
    [ $($value:expr),+ $(,)? ] => {
        vec![ $( $crate::Value::from($value) ),+ ]
    };
}
