//! Configuration options for template formatting.
//!
//! This module provides types to customize how templates are read and how
//! values are written:
//!
//! - [`FormatOptions`]: Main configuration struct
//! - [`Style`]: Primary or alternate placeholder brackets
//! - [`Syntax`]: Placeholders with a leading `$` or bare brackets
//!
//! ## Examples
//!
//! ```rust
//! use textfmt::{Encoding, FormatOptions, Formatter, Value};
//!
//! let args = [Value::from("<b>")];
//!
//! // Bare `{}` placeholders with XML output
//! let options = FormatOptions::simplified().with_encoding(Encoding::Xml);
//! let out = Formatter::new(options).format_args("<p>{}</p>", &args).unwrap();
//! assert_eq!(out, "<p>&lt;b&gt;</p>");
//! ```

use crate::delimiter;
use crate::Encoding;

/// Which of the two bracket pairs opens a placeholder.
///
/// Mapping sub-templates are rendered with the other style, so a template
/// written with `${…}` carries nested placeholders as `$(…)` and vice versa.
///
/// # Examples
///
/// ```rust
/// use textfmt::Style;
///
/// assert_eq!(Style::Primary.toggle(), Style::Alternate);
/// assert_eq!(Style::Alternate.toggle(), Style::Primary);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// `${…}` (or `{…}` with [`Syntax::Bare`])
    #[default]
    Primary,
    /// `$(…)` (or `(…)` with [`Syntax::Bare`])
    Alternate,
}

impl Style {
    /// Returns the other style.
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Style::Primary => Style::Alternate,
            Style::Alternate => Style::Primary,
        }
    }
}

/// Whether placeholders carry a leading `$`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    /// `${name}` and `$(name)`
    #[default]
    Dollar,
    /// `{name}` and `(name)`
    Bare,
}

impl Syntax {
    /// The delimiter channel that opens a placeholder of `style`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::{Style, Syntax};
    /// use textfmt::delimiter;
    ///
    /// assert_eq!(Syntax::Dollar.channel(Style::Primary), delimiter::DOLLAR_BRACE);
    /// assert_eq!(Syntax::Bare.channel(Style::Alternate), delimiter::PAREN);
    /// ```
    #[must_use]
    pub const fn channel(self, style: Style) -> usize {
        match (self, style) {
            (Syntax::Dollar, Style::Primary) => delimiter::DOLLAR_BRACE,
            (Syntax::Dollar, Style::Alternate) => delimiter::DOLLAR_PAREN,
            (Syntax::Bare, Style::Primary) => delimiter::BRACE,
            (Syntax::Bare, Style::Alternate) => delimiter::PAREN,
        }
    }

    /// The character whose absence lets a pattern skip tokenizing.
    #[must_use]
    pub const fn trigger(self, style: Style) -> char {
        match (self, style) {
            (Syntax::Dollar, _) => '$',
            (Syntax::Bare, Style::Primary) => '{',
            (Syntax::Bare, Style::Alternate) => '(',
        }
    }
}

/// Configuration options for a [`Formatter`](crate::Formatter).
///
/// # Examples
///
/// ```rust
/// use textfmt::{Encoding, FormatOptions, Style};
///
/// // Default options: `${…}`, plain text, `\` escapes
/// let options = FormatOptions::new();
/// assert_eq!(options.style, Style::Primary);
///
/// // Custom configuration
/// let options = FormatOptions::alternate()
///     .with_encoding(Encoding::Json)
///     .with_separator(" | ")
///     .with_escape(None);
/// assert_eq!(options.separator, " | ");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub style: Style,
    pub syntax: Syntax,
    /// Encoding applied to values whose placeholder declares none.
    pub encoding: Encoding,
    /// Escape character, `None` disables escaping.
    pub escape: Option<char>,
    /// Joins sequence elements when the placeholder has no prefix literal.
    pub separator: String,
    /// Maximum nesting of mapping sub-templates.
    pub max_depth: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            style: Style::default(),
            syntax: Syntax::default(),
            encoding: Encoding::default(),
            escape: Some('\\'),
            separator: ",".to_string(),
            max_depth: 32,
        }
    }
}

impl FormatOptions {
    /// Creates default options (`${…}` placeholders, text encoding).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::FormatOptions;
    ///
    /// let options = FormatOptions::new();
    /// assert_eq!(options.escape, Some('\\'));
    /// assert_eq!(options.max_depth, 32);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for templates written with `$(…)` placeholders.
    #[must_use]
    pub fn alternate() -> Self {
        FormatOptions {
            style: Style::Alternate,
            ..Default::default()
        }
    }

    /// Creates options for templates written with bare `{…}` placeholders.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::{FormatOptions, Syntax};
    ///
    /// assert_eq!(FormatOptions::simplified().syntax, Syntax::Bare);
    /// ```
    #[must_use]
    pub fn simplified() -> Self {
        FormatOptions {
            syntax: Syntax::Bare,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Sets the default encoding for values.
    #[must_use]
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets or disables the escape character.
    #[must_use]
    pub fn with_escape(mut self, escape: Option<char>) -> Self {
        self.escape = escape;
        self
    }

    /// Sets the default separator between sequence elements.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets how deep mapping sub-templates may nest before rendering empty.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The delimiter channel opening placeholders under these options.
    #[must_use]
    pub const fn channel(&self) -> usize {
        self.syntax.channel(self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = FormatOptions::new();
        assert_eq!(options.style, Style::Primary);
        assert_eq!(options.syntax, Syntax::Dollar);
        assert_eq!(options.encoding, Encoding::Text);
        assert_eq!(options.separator, ",");
        assert_eq!(options.channel(), delimiter::DOLLAR_BRACE);
    }

    #[test]
    fn test_constructors() {
        assert_eq!(FormatOptions::alternate().channel(), delimiter::DOLLAR_PAREN);
        assert_eq!(FormatOptions::simplified().channel(), delimiter::BRACE);
        assert_eq!(
            FormatOptions::simplified()
                .with_style(Style::Alternate)
                .channel(),
            delimiter::PAREN
        );
    }

    #[test]
    fn test_triggers() {
        assert_eq!(Syntax::Dollar.trigger(Style::Alternate), '$');
        assert_eq!(Syntax::Bare.trigger(Style::Primary), '{');
        assert_eq!(Syntax::Bare.trigger(Style::Alternate), '(');
    }

    #[test]
    fn test_builder_chain() {
        let options = FormatOptions::new()
            .with_syntax(Syntax::Bare)
            .with_escape(Some('~'))
            .with_max_depth(4)
            .with_separator("; ");
        assert_eq!(options.escape, Some('~'));
        assert_eq!(options.max_depth, 4);
        assert_eq!(options.separator, "; ");
    }
}
