//! Evaluation Context

use calcdeck_core::Value;
use crate::PluginRegistry;
use std::sync::Arc;

/// Evaluation context passed to plugins
pub struct EvalContext {
    pub registry: Arc<PluginRegistry>,
    /// Fixed seed for functions that draw random numbers
    pub seed: Option<u64>,
    pub tracing: bool,
    pub trace: Vec<TraceStep>,
}

/// Single recorded function call
#[derive(Debug, Clone)]
pub struct TraceStep {
    pub function: String,
    pub args: Vec<Value>,
    pub result: Value,
}

impl EvalContext {
    pub fn new(registry: Arc<PluginRegistry>) -> Self {
        Self {
            registry,
            seed: None,
            tracing: false,
            trace: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.tracing = enabled;
        self
    }

    /// Call a registered function, recording the step when tracing is on.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Value {
        let registry = Arc::clone(&self.registry);
        let result = registry.call_function(name, args, self);
        self.record_trace(name.to_string(), args.to_vec(), result.clone());
        result
    }

    pub fn record_trace(&mut self, function: String, args: Vec<Value>, result: Value) {
        if self.tracing {
            self.trace.push(TraceStep { function, args, result });
        }
    }

    /// Errors recorded so far, in call order
    pub fn errors(&self) -> Vec<&calcdeck_core::ToolError> {
        self.trace.iter().filter_map(|s| s.result.as_error()).collect()
    }
}
