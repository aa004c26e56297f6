//! # textfmt
//!
//! A placeholder template engine with nested mappings, sequence expansion and
//! output encoding for JSON, XML and URLs.
//!
//! ## Key Features
//!
//! - **Serde Parameters**: Any `T: Serialize` can be a template parameter; struct
//!   fields and map keys become addressable as `${field.sub}`
//! - **Modifiers**: Empty/non-empty guards, decimal and date patterns, value mappings
//! - **Nested Templates**: Mapping entries carry sub-templates written in the
//!   alternate `$(…)` style, to any depth
//! - **Encodings**: Values are escaped for JSON, XML or URLs, template text never is
//! - **Total**: Malformed template text degrades to literal text instead of failing
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! textfmt = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Named and Positional Parameters
//!
//! ```rust
//! use serde::Serialize;
//! use textfmt::{format, format_args, Value};
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     visits: u32,
//! }
//!
//! let user = User { name: "Alice".to_string(), visits: 3 };
//! let text = format("${name} visited ${visits} times", &user).unwrap();
//! assert_eq!(text, "Alice visited 3 times");
//!
//! let text = format_args("${}-${}", &[Value::from("a"), Value::from("b")]).unwrap();
//! assert_eq!(text, "a-b");
//! ```
//!
//! ### Modifiers and Mappings
//!
//! ```rust
//! use textfmt::{format_value, params};
//!
//! let order = params!({
//!     "total": 1234.5,
//!     "note": null,
//!     "status": 2,
//!     "items": ["pen", "ink"]
//! });
//!
//! let text = format_value(
//!     "${total[#,##0.00]} (${note[^no note]}) ${status[#1=open;2=paid;*=?]}",
//!     &order,
//! )
//! .unwrap();
//! assert_eq!(text, "1,234.50 (no note) paid");
//!
//! // Text around a sequence placeholder is repeated for every element.
//! let list = format_value("<li>${items[;]}</li>", &order).unwrap();
//! assert_eq!(list, "<li>pen</li><li>ink</li>");
//! ```
//!
//! ### Output Encoding
//!
//! ```rust
//! use textfmt::{format_with, params, Encoding};
//!
//! let config = params!({ "host": "example.org" });
//! let params = params!({ "q": "fish & chips" });
//! let url = format_with(Encoding::Url, "https://${host}/?q=${q}", &config, &params).unwrap();
//! assert_eq!(url, "https://example.org/?q=fish+%26+chips");
//! ```
//!
//! See [`syntax`] for the full template language.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Template text never produces an error; only parameter conversion and
//!   custom property accessors can fail
//! - Formatting holds no shared mutable state, a [`Formatter`] can be used
//!   from many threads at once
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Named, positional and struct parameters
//! - **`nested_templates.rs`** - Mappings with sub-templates in alternating styles
//! - **`encodings.rs`** - JSON, XML and URL output, with logging enabled
//!
//! Run any example with: `cargo run --example <name>`

pub mod cursor;
pub mod decimal;
pub mod delimiter;
pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod modifier;
pub mod options;
pub mod resolve;
pub mod ser;
pub mod syntax;
pub mod template;
pub mod value;

pub use cursor::{Cursor, Span, SpanKind};
pub use delimiter::{ChannelMask, Delimiter, DelimiterTable};
pub use encode::Encoding;
pub use error::{Error, Result};
pub use map::ValueMap;
pub use modifier::{Guard, GuardedLiteral, MappingEntry, MappingKey, Modifier, Placement, Segment};
pub use options::{FormatOptions, Style, Syntax};
pub use resolve::{resolve, PathAccessor, Placeholder, PropertyAccessor, Scope};
pub use ser::ValueSerializer;
pub use template::Formatter;
pub use value::{Number, Value};

use serde::Serialize;

/// Formats `pattern` with any `T: Serialize` as parameters.
///
/// The parameters serve as named parameters (`${field}`) and, when they
/// serialize to a sequence, as positional arguments (`${}`, `${0}`).
///
/// # Examples
///
/// ```rust
/// use textfmt::format;
/// use std::collections::BTreeMap;
///
/// let mut params = BTreeMap::new();
/// params.insert("who", "world");
/// assert_eq!(format("Hello ${who}!", &params).unwrap(), "Hello world!");
/// assert_eq!(format("${}+${}", &[1, 2]).unwrap(), "1+2");
/// ```
///
/// # Errors
///
/// Returns an error if the parameters cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format<P>(pattern: &str, params: &P) -> Result<String>
where
    P: ?Sized + Serialize,
{
    Formatter::default().format(pattern, params)
}

/// Formats `pattern` with positional arguments.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_args, Value};
///
/// let args = [Value::from("x"), Value::from(10)];
/// assert_eq!(format_args("${1}${0}${}", &args).unwrap(), "10xx");
/// ```
///
/// # Errors
///
/// This function does not fail with the default property accessor; the
/// `Result` matches the other entry points.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_args(pattern: &str, args: &[Value]) -> Result<String> {
    Formatter::default().format_args(pattern, args)
}

/// Formats `pattern` with a [`Value`] as parameters.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_value, params};
///
/// let params = params!({ "user": { "name": "Bo" } });
/// assert_eq!(format_value("Hi ${user.name}", &params).unwrap(), "Hi Bo");
/// ```
///
/// # Errors
///
/// This function does not fail with the default property accessor.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_value(pattern: &str, params: &Value) -> Result<String> {
    Formatter::default().format_value(pattern, params)
}

/// Formats `pattern` with a default encoding and configuration parameters.
///
/// `config` is searched for names that `params` does not resolve.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_with, params, Encoding};
///
/// let config = params!({ "app": "Shop" });
/// let out = format_with(Encoding::Json, "{\"title\": \"${app}: ${t}\"}", &config, &params!({ "t": "\"Deals\"" }))
///     .unwrap();
/// assert_eq!(out, r#"{"title": "Shop: \"Deals\""}"#);
/// ```
///
/// # Errors
///
/// Returns an error if either parameter cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_with<C, P>(encoding: Encoding, pattern: &str, config: &C, params: &P) -> Result<String>
where
    C: ?Sized + Serialize,
    P: ?Sized + Serialize,
{
    Formatter::default().format_with(encoding, pattern, config, params)
}

/// Formats a template written with alternate `$(…)` placeholders.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_alt, params};
///
/// let params = params!({ "total": 5 });
/// assert_eq!(format_alt("Total: $(total) (was ${total})", &params).unwrap(), "Total: 5 (was ${total})");
/// ```
///
/// # Errors
///
/// Returns an error if the parameters cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_alt<P>(pattern: &str, params: &P) -> Result<String>
where
    P: ?Sized + Serialize,
{
    Formatter::new(FormatOptions::alternate()).format(pattern, params)
}

/// Formats a template written with bare `{…}` placeholders.
///
/// # Examples
///
/// ```rust
/// use textfmt::{format_simple, params};
///
/// let params = params!({ "name": "Bo" });
/// assert_eq!(format_simple("Hi {name}, costs $5", &params).unwrap(), "Hi Bo, costs $5");
/// ```
///
/// # Errors
///
/// Returns an error if the parameters cannot be converted to a [`Value`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn format_simple<P>(pattern: &str, params: &P) -> Result<String>
where
    P: ?Sized + Serialize,
{
    Formatter::new(FormatOptions::simplified()).format(pattern, params)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use textfmt::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value has a serde shape with no [`Value`]
/// equivalent, such as a map with non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Order {
        id: u32,
        customer: Customer,
        lines: Vec<Line>,
    }

    #[derive(Serialize)]
    struct Customer {
        name: String,
        email: Option<String>,
    }

    #[derive(Serialize)]
    struct Line {
        sku: String,
        qty: u32,
    }

    fn order() -> Order {
        Order {
            id: 7,
            customer: Customer {
                name: "Alice".to_string(),
                email: None,
            },
            lines: vec![
                Line {
                    sku: "A-1".to_string(),
                    qty: 2,
                },
                Line {
                    sku: "B-2".to_string(),
                    qty: 1,
                },
            ],
        }
    }

    #[test]
    fn test_format_struct() {
        let text = format(
            "#${id} for ${customer.name} <${customer.email[^no email]}>",
            &order(),
        )
        .unwrap();
        assert_eq!(text, "#7 for Alice <no email>");
    }

    #[test]
    fn test_format_struct_sequence() {
        let text = format("${lines[ ;;#*=$(qty)x$(sku)]}", &order()).unwrap();
        assert_eq!(text, "2xA-1 1xB-2");
    }

    #[test]
    fn test_format_alt_and_simple() {
        let value = params!({ "a": 1 });
        assert_eq!(format_alt("$(a)${a}", &value).unwrap(), "1${a}");
        assert_eq!(format_simple("{a}(a)", &value).unwrap(), "1(a)");
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&order()).unwrap();
        assert_eq!(value.get_path("lines.1.sku"), Some(&Value::from("B-2")));
        assert_eq!(value.get_path("customer.email"), Some(&Value::Null));
    }
}
