//! Placeholder resolution.
//!
//! A placeholder names what it substitutes: nothing (the next positional
//! argument), a position (`${1}`), or a dotted property path (`${user.name}`).
//! [`resolve`] turns that name into a [`Value`] by looking in the
//! [`Scope`] of the current template:
//!
//! 1. an empty name takes the next positional argument
//! 2. the name as a property path of the named parameters
//! 3. for names without a `.`, a numeric position into the positional
//!    arguments, then the named parameters themselves when they are closed
//!    (anything but an object)
//! 4. the name as a property path of the configuration parameters
//!
//! Anything else resolves to [`Value::Null`], which renders empty.
//!
//! Property paths are read through a [`PropertyAccessor`]. The default
//! [`PathAccessor`] walks object keys and array indices; callers with their
//! own notion of properties can plug in another implementation.

use crate::cursor::{Cursor, SpanKind};
use crate::delimiter::{ChannelMask, BRACKET};
use crate::{Result, Value};
use std::borrow::Cow;
use std::ops::Range;

static NULL: Value = Value::Null;

/// Reads properties of parameter values.
///
/// # Examples
///
/// A case-insensitive accessor for flat objects:
///
/// ```rust
/// use std::borrow::Cow;
/// use textfmt::{params, FormatOptions, Formatter, PropertyAccessor, Result, Value};
///
/// struct IgnoreCase;
///
/// impl PropertyAccessor for IgnoreCase {
///     fn get_property<'v>(&self, target: &'v Value, path: &str) -> Result<Option<Cow<'v, Value>>> {
///         Ok(target.as_object().and_then(|map| {
///             map.iter()
///                 .find(|(key, _)| key.eq_ignore_ascii_case(path))
///                 .map(|(_, value)| Cow::Borrowed(value))
///         }))
///     }
/// }
///
/// let formatter = Formatter::new(FormatOptions::new()).with_accessor(IgnoreCase);
/// let out = formatter.format_value("Hi ${NAME}", &params!({ "name": "Bo" })).unwrap();
/// assert_eq!(out, "Hi Bo");
/// ```
pub trait PropertyAccessor {
    /// Looks up `path` on `target`. `Ok(None)` means there is no such property.
    ///
    /// # Errors
    ///
    /// Errors are passed through to the caller of the formatter untouched.
    fn get_property<'v>(&self, target: &'v Value, path: &str) -> Result<Option<Cow<'v, Value>>>;

    /// Whether `value` has no properties of its own, so that it may stand in
    /// for a property it does not have.
    fn is_closed(&self, value: &Value) -> bool {
        value.is_closed()
    }
}

impl<A: PropertyAccessor + ?Sized> PropertyAccessor for &A {
    fn get_property<'v>(&self, target: &'v Value, path: &str) -> Result<Option<Cow<'v, Value>>> {
        (**self).get_property(target, path)
    }

    fn is_closed(&self, value: &Value) -> bool {
        (**self).is_closed(value)
    }
}

/// Dotted-path accessor over [`Value`] trees, see [`Value::get_path`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathAccessor;

impl PropertyAccessor for PathAccessor {
    fn get_property<'v>(&self, target: &'v Value, path: &str) -> Result<Option<Cow<'v, Value>>> {
        Ok(target.get_path(path).map(Cow::Borrowed))
    }
}

/// The parameters visible to one template.
#[derive(Clone, Copy, Debug)]
pub struct Scope<'v> {
    /// Positional arguments. An array supplies one argument per element;
    /// any other value is the single argument at position 0.
    pub args: &'v Value,
    /// Named parameters, searched for property paths.
    pub named: &'v Value,
    /// Fallback parameters searched last.
    pub config: &'v Value,
}

impl<'v> Scope<'v> {
    /// A scope whose positional and named parameters are the same value.
    #[must_use]
    pub fn new(params: &'v Value) -> Self {
        Scope {
            args: params,
            named: params,
            config: &NULL,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: &'v Value) -> Self {
        self.config = config;
        self
    }

    fn positional(&self, index: usize) -> &'v Value {
        match self.args {
            Value::Array(items) => items.get(index).unwrap_or(&NULL),
            other if index == 0 => other,
            _ => &NULL,
        }
    }
}

/// A placeholder's interior, split into its name and modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Trimmed and unescaped. Empty for positional placeholders.
    pub name: Cow<'t, str>,
    /// Byte range of the bracketed modifier, brackets included.
    pub modifier: Option<Range<usize>>,
}

impl<'t> Placeholder<'t> {
    /// Reads the placeholder at the cursor's current span.
    ///
    /// On return the cursor is inside the placeholder, positioned on the
    /// modifier span when there is one. The caller leaves the sub-scope.
    pub fn read(cursor: &mut Cursor<'t>) -> Self {
        cursor.enter_subscope(0);
        cursor.use_channels(ChannelMask::of(BRACKET));
        let interior = cursor.span().range();

        // Start, then the name literal.
        cursor.advance();
        cursor.advance();
        let name = cursor.slice(true, true);

        if cursor.advance() {
            match cursor.span().kind {
                SpanKind::Channel { paired: true, .. } => {
                    return Placeholder {
                        name,
                        modifier: Some(cursor.span().range()),
                    };
                }
                _ => {
                    // An unclosed `[` is part of the name.
                    let whole = cursor.slice_range(interior.start..cursor.terminal(), true, true);
                    return Placeholder {
                        name: whole,
                        modifier: None,
                    };
                }
            }
        }
        Placeholder {
            name,
            modifier: None,
        }
    }

    #[must_use]
    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }
}

/// Resolves `name` in `scope`.
///
/// `auto_index` is the next positional argument for empty names; it is
/// advanced each time one is consumed.
///
/// # Errors
///
/// Only errors raised by the accessor are returned.
///
/// # Examples
///
/// ```rust
/// use textfmt::{params, resolve, PathAccessor, Scope, Value};
///
/// let params = params!({ "user": { "name": "Bo" } });
/// let scope = Scope::new(&params);
/// let mut auto = 0;
/// let name = resolve(&PathAccessor, "user.name", &scope, &mut auto).unwrap();
/// assert_eq!(*name, Value::from("Bo"));
/// ```
pub fn resolve<'v, A>(
    accessor: &A,
    name: &str,
    scope: &Scope<'v>,
    auto_index: &mut usize,
) -> Result<Cow<'v, Value>>
where
    A: PropertyAccessor + ?Sized,
{
    if name.is_empty() {
        let value = scope.positional(*auto_index);
        *auto_index += 1;
        return Ok(Cow::Borrowed(value));
    }

    if let Some(value) = accessor.get_property(scope.named, name)? {
        return Ok(value);
    }

    if !name.contains('.') {
        if let Ok(index) = name.parse::<usize>() {
            if matches!(scope.args, Value::Array(_)) || index == 0 {
                return Ok(Cow::Borrowed(scope.positional(index)));
            }
        }
        if !scope.named.is_null() && accessor.is_closed(scope.named) {
            return Ok(Cow::Borrowed(scope.named));
        }
    }

    if !scope.config.is_null() {
        if let Some(value) = accessor.get_property(scope.config, name)? {
            return Ok(value);
        }
    }

    log::trace!("unresolved placeholder '{}'", name);
    Ok(Cow::Owned(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delimiter::{ChannelMask, DelimiterTable, DOLLAR_BRACE};
    use crate::{params, Error};

    fn resolve_one(name: &str, scope: &Scope<'_>) -> Value {
        let mut auto = 0;
        resolve(&PathAccessor, name, scope, &mut auto)
            .unwrap()
            .into_owned()
    }

    #[test]
    fn test_positional_threading() {
        let args = params!(["a", "b"]);
        let scope = Scope::new(&args);
        let mut auto = 0;
        let first = resolve(&PathAccessor, "", &scope, &mut auto).unwrap();
        let second = resolve(&PathAccessor, "", &scope, &mut auto).unwrap();
        let third = resolve(&PathAccessor, "", &scope, &mut auto).unwrap();
        assert_eq!(*first, Value::from("a"));
        assert_eq!(*second, Value::from("b"));
        assert_eq!(*third, Value::Null);
        assert_eq!(auto, 3);
    }

    #[test]
    fn test_single_argument_is_position_zero() {
        let single = Value::from("only");
        let scope = Scope::new(&single);
        let mut auto = 0;
        assert_eq!(
            *resolve(&PathAccessor, "", &scope, &mut auto).unwrap(),
            single
        );
        assert_eq!(
            *resolve(&PathAccessor, "", &scope, &mut auto).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_property_paths() {
        let params = params!({ "user": { "name": "Bo", "tags": ["x", "y"] } });
        let scope = Scope::new(&params);
        assert_eq!(resolve_one("user.name", &scope), Value::from("Bo"));
        assert_eq!(resolve_one("user.tags.1", &scope), Value::from("y"));
        assert_eq!(resolve_one("user.missing", &scope), Value::Null);
    }

    #[test]
    fn test_numeric_names_index_positional_args() {
        let args = params!(["zero", "one"]);
        let scope = Scope::new(&args);
        assert_eq!(resolve_one("1", &scope), Value::from("one"));
        assert_eq!(resolve_one("7", &scope), Value::Null);
    }

    #[test]
    fn test_closed_parameter_stands_in_for_itself() {
        let named = Value::from(42);
        let scope = Scope::new(&named);
        assert_eq!(resolve_one("anything", &scope), Value::from(42));
        assert_eq!(resolve_one("a.b", &scope), Value::Null, "dotted paths never fall back");

        let open = params!({ "x": 1 });
        let scope = Scope::new(&open);
        assert_eq!(resolve_one("y", &scope), Value::Null);
    }

    #[test]
    fn test_array_parameter_stands_in_for_itself() {
        let args = params!(["a"]);
        let scope = Scope::new(&args);
        assert_eq!(resolve_one("name", &scope), args);
        assert_eq!(resolve_one("0", &scope), Value::from("a"));

        let config = params!({ "site": "example.org" });
        let scope = Scope::new(&args).with_config(&config);
        assert_eq!(resolve_one("site", &scope), args, "closed parameters shadow config");
    }

    #[test]
    fn test_config_is_searched_last() {
        let params = params!({ "name": "Bo" });
        let config = params!({ "name": "ignored", "site": "example.org" });
        let scope = Scope::new(&params).with_config(&config);
        assert_eq!(resolve_one("name", &scope), Value::from("Bo"));
        assert_eq!(resolve_one("site", &scope), Value::from("example.org"));
    }

    #[test]
    fn test_accessor_errors_propagate() {
        struct Failing;
        impl PropertyAccessor for Failing {
            fn get_property<'v>(
                &self,
                _target: &'v Value,
                path: &str,
            ) -> Result<Option<Cow<'v, Value>>> {
                Err(Error::property(path, "access denied"))
            }
        }

        let params = params!({ "secret": 1 });
        let scope = Scope::new(&params);
        let mut auto = 0;
        let err = resolve(&Failing, "secret", &scope, &mut auto).unwrap_err();
        assert!(matches!(err, Error::Property { .. }));
        assert!(
            resolve(&Failing, "", &scope, &mut auto).is_ok(),
            "positional arguments bypass the accessor"
        );
    }

    fn read(input: &str) -> (Placeholder<'_>, Option<String>) {
        let mut cursor = Cursor::new(DelimiterTable::standard()).with_escape('\\', None);
        cursor.reset(input, 0);
        cursor.use_channels(ChannelMask::of(DOLLAR_BRACE));
        cursor.advance();
        cursor.advance();
        cursor.advance();
        let placeholder = Placeholder::read(&mut cursor);
        let modifier = placeholder
            .modifier
            .clone()
            .map(|range| input[range].to_string());
        (placeholder, modifier)
    }

    #[test]
    fn test_read_placeholder() {
        let (placeholder, modifier) = read("${ user.name [#json] }");
        assert_eq!(placeholder.name, "user.name");
        assert_eq!(modifier.as_deref(), Some("[#json]"));

        let (placeholder, modifier) = read("${}");
        assert!(placeholder.is_positional());
        assert_eq!(modifier, None);

        let (placeholder, modifier) = read("${[^none]}");
        assert!(placeholder.is_positional());
        assert_eq!(modifier.as_deref(), Some("[^none]"));
    }

    #[test]
    fn test_read_placeholder_with_open_bracket() {
        let (placeholder, modifier) = read("${a[b}");
        assert_eq!(placeholder.name, "a[b");
        assert_eq!(modifier, None);
    }

    #[test]
    fn test_read_placeholder_unescapes_name() {
        let (placeholder, _) = read("${a\\[b\\]}");
        assert_eq!(placeholder.name, "a[b]");
    }
}
