//! Error types for template formatting.
//!
//! Template text itself never fails: malformed placeholders degrade to
//! literal text, unresolved references render empty and bad format patterns
//! are logged and skipped. The errors in this module come from the edges of
//! the engine instead.
//!
//! ## Error Categories
//!
//! - **Serialization**: parameters whose serde shape has no [`Value`](crate::Value) equivalent
//! - **Patterns**: invalid date or decimal patterns (reported by the pattern
//!   helpers, swallowed by the formatter)
//! - **Property access**: failures raised by a custom
//!   [`PropertyAccessor`](crate::PropertyAccessor)
//! - **Delimiter tables**: tables with more channels than a mask can address
//!
//! ## Examples
//!
//! ```rust
//! use textfmt::Error;
//!
//! let err = Error::pattern("#.#.#", "multiple decimal separators");
//! assert!(err.to_string().contains("#.#.#"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all errors the formatting engine can report to a caller.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Unsupported type for conversion into a [`Value`](crate::Value)
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A date or decimal pattern that cannot be applied
    #[error("Invalid pattern '{pattern}': {msg}")]
    Pattern { pattern: String, msg: String },

    /// A property accessor refused to read a path
    #[error("Cannot read property '{path}': {msg}")]
    Property { path: String, msg: String },

    /// Delimiter table larger than a channel mask can address
    #[error("Delimiter table has {0} channels, at most {max} are supported", max = crate::delimiter::MAX_CHANNELS)]
    TooManyChannels(usize),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an error for a pattern that cannot be parsed or applied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::Error;
    ///
    /// let err = Error::pattern("%Q", "unknown specifier");
    /// assert!(err.to_string().contains("unknown specifier"));
    /// ```
    pub fn pattern(pattern: &str, msg: &str) -> Self {
        Error::Pattern {
            pattern: pattern.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates a property access error for the given dotted path.
    ///
    /// Custom [`PropertyAccessor`](crate::PropertyAccessor) implementations
    /// use this to surface their failures; the formatter propagates it as-is.
    pub fn property<T: fmt::Display>(path: &str, msg: T) -> Self {
        Error::Property {
            path: path.to_string(),
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot become a `Value`.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
