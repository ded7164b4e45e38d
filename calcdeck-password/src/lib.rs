//! Calcdeck Password - Password generation and strength rating
//!
//! `PasswordOptions` can only be built through a validating builder, so
//! `generate` never sees a length outside 4..=128 or an empty alphabet.
//! The random source is a parameter; plugins seed a `StdRng` from the
//! evaluation context when one is set.

mod options;
mod generate;
mod functions;

pub use options::{
    CharClass, PasswordOptions, PasswordOptionsBuilder,
    AMBIGUOUS, DEFAULT_LENGTH, MAX_LENGTH, MIN_LENGTH, SIMILAR,
};
pub use generate::{estimate_strength, generate, Strength, StrengthLevel};

use calcdeck_plugin::PluginRegistry;

/// Load password functions into registry
pub fn load_password_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        .with_function(functions::GeneratePassword)
        .with_function(functions::PasswordStrength)
}
