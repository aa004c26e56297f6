//! Output encodings for substituted values.
//!
//! Every placeholder value passes through exactly one [`Encoding`] before it
//! lands in the output. Literal template text is never encoded.
//!
//! | Encoding   | Escapes                                                   |
//! |------------|-----------------------------------------------------------|
//! | `Json`     | `\` `"` and control characters, as inside a JSON string   |
//! | `Xml`      | `&` `"` `<` `>` `'` as predefined entities                |
//! | `Url`      | `application/x-www-form-urlencoded` byte serialization    |
//! | `Text`     | nothing                                                   |
//! | `Extension`| nothing (reserved for caller-defined tags)                |

use std::borrow::Cow;
use std::fmt;

/// An output encoding, selected by a `#tag` modifier or a formatter default.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    Json,
    Xml,
    Url,
    #[default]
    Text,
    /// An unrecognised tag, kept verbatim. Values pass through unchanged.
    Extension(String),
}

impl Encoding {
    /// Maps a modifier tag to an encoding, ignoring ASCII case.
    ///
    /// `plain` is an alias of `text`.
    ///
    /// ```rust
    /// use textfmt::Encoding;
    ///
    /// assert_eq!(Encoding::from_tag("JSON"), Encoding::Json);
    /// assert_eq!(Encoding::from_tag("plain"), Encoding::Text);
    /// assert_eq!(Encoding::from_tag("csv"), Encoding::Extension("csv".into()));
    /// ```
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("json") {
            Encoding::Json
        } else if tag.eq_ignore_ascii_case("xml") {
            Encoding::Xml
        } else if tag.eq_ignore_ascii_case("url") {
            Encoding::Url
        } else if tag.eq_ignore_ascii_case("text") || tag.eq_ignore_ascii_case("plain") {
            Encoding::Text
        } else {
            Encoding::Extension(tag.to_string())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Encoding::Json => "json",
            Encoding::Xml => "xml",
            Encoding::Url => "url",
            Encoding::Text => "text",
            Encoding::Extension(tag) => tag,
        }
    }

    /// Encodes `text`, borrowing it when nothing needs escaping.
    #[must_use]
    pub fn encode<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match self {
            Encoding::Json => escape_json(text),
            Encoding::Xml => escape_xml(text),
            Encoding::Url => encode_url(text),
            Encoding::Text | Encoding::Extension(_) => Cow::Borrowed(text),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Escapes `text` for use inside a JSON string literal. The quotes are not added.
#[must_use]
pub fn escape_json(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| ch == '"' || ch == '\\' || ch < ' ') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            c if c < ' ' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Replaces the five XML special characters by predefined entities.
#[must_use]
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '"', '<', '>', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Form-urlencodes `text` as UTF-8. Spaces become `+`.
#[must_use]
pub fn encode_url(text: &str) -> Cow<'_, str> {
    let encoded: String = form_urlencoded::byte_serialize(text.as_bytes()).collect();
    if encoded == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(encoded)
    }
}
