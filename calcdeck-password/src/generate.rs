//! Password generation and entropy-based strength estimate

use std::collections::HashSet;
use std::fmt;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::debug;
use crate::{CharClass, PasswordOptions};

/// Generate a password of `options.length()` characters.
///
/// One character is drawn from each enabled class first, the remainder
/// from the combined pool, and the whole sequence is shuffled so the
/// guaranteed characters do not sit at fixed positions.
pub fn generate<R: Rng>(options: &PasswordOptions, rng: &mut R) -> String {
    let mut chars = Vec::with_capacity(options.length());

    for class in options.enabled_classes() {
        let alphabet = options.alphabet(class);
        chars.push(alphabet[rng.random_range(0..alphabet.len())]);
    }

    let pool = options.pool();
    while chars.len() < options.length() {
        chars.push(pool[rng.random_range(0..pool.len())]);
    }

    chars.shuffle(rng);
    debug!(length = chars.len(), pool = pool.len(), "password generated");
    chars.into_iter().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    pub fn from_entropy(bits: f64) -> Self {
        if bits < 28.0 {
            StrengthLevel::VeryWeak
        } else if bits < 36.0 {
            StrengthLevel::Weak
        } else if bits < 60.0 {
            StrengthLevel::Reasonable
        } else if bits < 128.0 {
            StrengthLevel::Strong
        } else {
            StrengthLevel::VeryStrong
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrengthLevel::VeryWeak => "very-weak",
            StrengthLevel::Weak => "weak",
            StrengthLevel::Reasonable => "reasonable",
            StrengthLevel::Strong => "strong",
            StrengthLevel::VeryStrong => "very-strong",
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strength {
    pub length: usize,
    /// Summed nominal size of the classes present
    pub pool_size: u32,
    pub entropy_bits: f64,
    pub level: StrengthLevel,
}

/// Estimate strength as `length * log2(pool)`.
pub fn estimate_strength(password: &str) -> Strength {
    let classes: HashSet<CharClass> = password.chars().map(CharClass::of).collect();
    let pool_size: u32 = classes.iter().map(|c| c.pool_size()).sum();
    let length = password.chars().count();

    let entropy_bits = if pool_size == 0 {
        0.0
    } else {
        length as f64 * f64::from(pool_size).log2()
    };

    Strength {
        length,
        pool_size,
        entropy_bits,
        level: StrengthLevel::from_entropy(entropy_bits),
    }
}
