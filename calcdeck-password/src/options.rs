//! Character classes and validated generator options

use serde::Serialize;
use tracing::warn;
use calcdeck_core::CalcError;

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const DEFAULT_LENGTH: usize = 16;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Characters easily confused with one another in most fonts
pub const SIMILAR: &str = "il1Lo0O";
/// Characters that are awkward to type or quote
pub const AMBIGUOUS: &str = "{}[]()/\\'\"`~,;:.<>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digits,
    Symbols,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digits,
        CharClass::Symbols,
    ];

    pub fn charset(&self) -> &'static str {
        match self {
            CharClass::Lowercase => LOWERCASE,
            CharClass::Uppercase => UPPERCASE,
            CharClass::Digits => DIGITS,
            CharClass::Symbols => SYMBOLS,
        }
    }

    /// Nominal alphabet size used for entropy estimates
    pub fn pool_size(&self) -> u32 {
        match self {
            CharClass::Lowercase | CharClass::Uppercase => 26,
            CharClass::Digits => 10,
            CharClass::Symbols => 32,
        }
    }

    /// Class a character counts towards; anything not alphanumeric is a symbol
    pub fn of(c: char) -> CharClass {
        if c.is_ascii_lowercase() {
            CharClass::Lowercase
        } else if c.is_ascii_uppercase() {
            CharClass::Uppercase
        } else if c.is_ascii_digit() {
            CharClass::Digits
        } else {
            CharClass::Symbols
        }
    }
}

/// Generator configuration. Only constructible through the builder, so a
/// `PasswordOptions` value is always usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PasswordOptions {
    length: usize,
    include_uppercase: bool,
    include_lowercase: bool,
    include_numbers: bool,
    include_symbols: bool,
    exclude_similar: bool,
    exclude_ambiguous: bool,
}

impl PasswordOptions {
    pub fn builder() -> PasswordOptionsBuilder {
        PasswordOptionsBuilder::default()
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn excludes_similar(&self) -> bool {
        self.exclude_similar
    }

    pub fn excludes_ambiguous(&self) -> bool {
        self.exclude_ambiguous
    }

    pub fn is_enabled(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lowercase => self.include_lowercase,
            CharClass::Uppercase => self.include_uppercase,
            CharClass::Digits => self.include_numbers,
            CharClass::Symbols => self.include_symbols,
        }
    }

    pub fn enabled_classes(&self) -> Vec<CharClass> {
        CharClass::ALL.into_iter().filter(|c| self.is_enabled(*c)).collect()
    }

    fn is_excluded(&self, c: char) -> bool {
        (self.exclude_similar && SIMILAR.contains(c))
            || (self.exclude_ambiguous && AMBIGUOUS.contains(c))
    }

    /// Characters of `class` left after exclusions
    pub fn alphabet(&self, class: CharClass) -> Vec<char> {
        class.charset().chars().filter(|c| !self.is_excluded(*c)).collect()
    }

    /// Combined alphabet of every enabled class
    pub fn pool(&self) -> Vec<char> {
        self.enabled_classes().into_iter().flat_map(|c| self.alphabet(c)).collect()
    }
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: DEFAULT_LENGTH,
            include_uppercase: true,
            include_lowercase: true,
            include_numbers: true,
            include_symbols: true,
            exclude_similar: false,
            exclude_ambiguous: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PasswordOptionsBuilder {
    options: PasswordOptions,
}

impl PasswordOptionsBuilder {
    pub fn length(mut self, length: usize) -> Self {
        self.options.length = length;
        self
    }

    pub fn uppercase(mut self, on: bool) -> Self {
        self.options.include_uppercase = on;
        self
    }

    pub fn lowercase(mut self, on: bool) -> Self {
        self.options.include_lowercase = on;
        self
    }

    pub fn numbers(mut self, on: bool) -> Self {
        self.options.include_numbers = on;
        self
    }

    pub fn symbols(mut self, on: bool) -> Self {
        self.options.include_symbols = on;
        self
    }

    pub fn exclude_similar(mut self, on: bool) -> Self {
        self.options.exclude_similar = on;
        self
    }

    pub fn exclude_ambiguous(mut self, on: bool) -> Self {
        self.options.exclude_ambiguous = on;
        self
    }

    pub fn build(self) -> Result<PasswordOptions, CalcError> {
        let options = self.options;

        if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
            warn!(length = options.length, "password length rejected");
            return Err(CalcError::invalid(format!(
                "password length must be between {} and {}, got {}",
                MIN_LENGTH, MAX_LENGTH, options.length
            )));
        }

        let classes = options.enabled_classes();
        if classes.is_empty() {
            warn!("password options enable no character class");
            return Err(CalcError::invalid("at least one character class must be enabled"));
        }

        // Every enabled class contributes one character, so none may be emptied
        if let Some(class) = classes.iter().find(|c| options.alphabet(**c).is_empty()) {
            return Err(CalcError::invalid(format!(
                "exclusions leave no {:?} characters", class
            )));
        }

        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let options = PasswordOptions::builder().build().unwrap();
        assert_eq!(options, PasswordOptions::default());
        assert_eq!(options.enabled_classes().len(), 4);
        assert_eq!(options.pool().len(), 26 + 26 + 10 + SYMBOLS.len());
    }

    #[test]
    fn test_length_bounds() {
        assert!(PasswordOptions::builder().length(4).build().is_ok());
        assert!(PasswordOptions::builder().length(128).build().is_ok());
        assert!(matches!(
            PasswordOptions::builder().length(3).build(),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(matches!(
            PasswordOptions::builder().length(129).build(),
            Err(CalcError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_class_enabled() {
        let result = PasswordOptions::builder()
            .uppercase(false)
            .lowercase(false)
            .numbers(false)
            .symbols(false)
            .build();
        assert!(matches!(result, Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_exclusions_shrink_alphabets() {
        let options = PasswordOptions::builder()
            .exclude_similar(true)
            .exclude_ambiguous(true)
            .build()
            .unwrap();
        let pool = options.pool();
        for c in SIMILAR.chars().chain(AMBIGUOUS.chars()) {
            assert!(!pool.contains(&c), "{} should be excluded", c);
        }
        assert_eq!(options.alphabet(CharClass::Digits).len(), 8);
        assert_eq!(options.alphabet(CharClass::Symbols), "!@#$%^&*_+-=|?".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_char_class_of() {
        assert_eq!(CharClass::of('a'), CharClass::Lowercase);
        assert_eq!(CharClass::of('Z'), CharClass::Uppercase);
        assert_eq!(CharClass::of('7'), CharClass::Digits);
        assert_eq!(CharClass::of('#'), CharClass::Symbols);
        assert_eq!(CharClass::of('é'), CharClass::Symbols);
    }
}
