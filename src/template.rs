//! The template driver.
//!
//! [`Formatter`] walks a template with a [`Cursor`], copies literal text,
//! and for every placeholder resolves its value, applies the modifier and
//! encodes the result. Mapping sub-templates are rendered by the same driver
//! with the other [`Style`], one level deeper. An array value repeats the
//! literal text around its placeholder once per element.
//!
//! Each call builds its own cursor, so a `Formatter` can be shared freely
//! between threads.

use crate::cursor::{Cursor, SpanKind};
use crate::delimiter::{ChannelMask, DelimiterTable};
use crate::modifier::{format_pattern, Guard, Modifier, Placement};
use crate::resolve::{resolve, PathAccessor, Placeholder, PropertyAccessor, Scope};
use crate::{to_value, Encoding, FormatOptions, Result, Style, Value};
use serde::Serialize;

/// Characters the escape character can escape.
pub const ESCAPABLE: &str = "\\$#{}()[];=^+!*";

/// Formats templates with fixed options and property accessor.
///
/// # Examples
///
/// ```rust
/// use textfmt::{params, FormatOptions, Formatter};
///
/// let formatter = Formatter::new(FormatOptions::new().with_separator(" / "));
/// let params = params!({ "path": ["usr", "local", "bin"] });
/// assert_eq!(formatter.format_value("${path}", &params).unwrap(), "usr / local / bin");
/// ```
#[derive(Clone, Debug)]
pub struct Formatter<A = PathAccessor> {
    options: FormatOptions,
    accessor: A,
    escapable: String,
}

impl Default for Formatter {
    fn default() -> Self {
        Formatter::new(FormatOptions::default())
    }
}

impl Formatter {
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        let escapable = escapable(&options);
        Formatter {
            options,
            accessor: PathAccessor,
            escapable,
        }
    }
}

impl<A: PropertyAccessor> Formatter<A> {
    /// Replaces the property accessor.
    #[must_use]
    pub fn with_accessor<B: PropertyAccessor>(self, accessor: B) -> Formatter<B> {
        Formatter {
            options: self.options,
            accessor,
            escapable: self.escapable,
        }
    }

    #[must_use]
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Formats `pattern` with any serializable parameters.
    ///
    /// The parameters act as positional arguments (when they serialize to a
    /// sequence) and as named parameters at the same time.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` cannot be converted to a [`Value`] or the
    /// property accessor fails.
    pub fn format<P>(&self, pattern: &str, params: &P) -> Result<String>
    where
        P: ?Sized + Serialize,
    {
        let params = to_value(params)?;
        self.format_value(pattern, &params)
    }

    /// Formats `pattern` with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns an error only if the property accessor fails.
    pub fn format_args(&self, pattern: &str, args: &[Value]) -> Result<String> {
        let args = Value::Array(args.to_vec());
        self.format_value(pattern, &args)
    }

    /// Formats `pattern` with an already converted parameter value.
    ///
    /// # Errors
    ///
    /// Returns an error only if the property accessor fails.
    pub fn format_value(&self, pattern: &str, params: &Value) -> Result<String> {
        self.format_scope(pattern, &Scope::new(params))
    }

    /// Formats `pattern` with a default encoding and configuration
    /// parameters that are searched after `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter cannot be converted to a
    /// [`Value`] or the property accessor fails.
    pub fn format_with<C, P>(
        &self,
        encoding: Encoding,
        pattern: &str,
        config: &C,
        params: &P,
    ) -> Result<String>
    where
        C: ?Sized + Serialize,
        P: ?Sized + Serialize,
    {
        let config = to_value(config)?;
        let params = to_value(params)?;
        let scope = Scope::new(&params).with_config(&config);
        self.render(pattern, self.options.style, &encoding, &scope, 0)
    }

    /// Formats `pattern` against an explicit [`Scope`].
    ///
    /// # Errors
    ///
    /// Returns an error only if the property accessor fails.
    pub fn format_scope(&self, pattern: &str, scope: &Scope<'_>) -> Result<String> {
        self.render(pattern, self.options.style, &self.options.encoding, scope, 0)
    }

    fn render(
        &self,
        pattern: &str,
        style: Style,
        encoding: &Encoding,
        scope: &Scope<'_>,
        depth: usize,
    ) -> Result<String> {
        let trigger = self.options.syntax.trigger(style);
        let escaped = self
            .options
            .escape
            .is_some_and(|escape| pattern.contains(escape));
        if !escaped && !pattern.contains(trigger) {
            return Ok(pattern.to_string());
        }

        let mut cursor = Cursor::new(DelimiterTable::standard());
        if let Some(escape) = self.options.escape {
            cursor = cursor.with_escape(escape, Some(self.escapable.as_str()));
        }
        cursor.reset(pattern, 0);
        cursor.use_channels(ChannelMask::of(self.options.syntax.channel(style)));

        let occurrence = Occurrence {
            style,
            encoding,
            scope,
            depth,
        };
        let mut out = String::with_capacity(pattern.len());
        let mut auto_index = 0;
        // Start of the text written since the last placeholder.
        let mut mark = 0;
        let mut pending: Option<Expansion> = None;
        while cursor.advance() {
            match cursor.span().kind {
                SpanKind::Start | SpanKind::End => {}
                SpanKind::Literal => out.push_str(&cursor.slice(true, false)),
                SpanKind::Channel { paired: true, .. } => {
                    if let Some(expansion) = pending.take() {
                        expansion.write(&mut out, mark);
                        mark = out.len();
                    }
                    pending = self.placeholder(
                        &mut cursor,
                        &occurrence,
                        &mut auto_index,
                        &mut out,
                        mark,
                    )?;
                    mark = out.len();
                }
                SpanKind::Channel { paired: false, .. } => {
                    out.push_str(&cursor.slice(false, false));
                }
            }
        }
        if let Some(expansion) = pending {
            expansion.write(&mut out, mark);
        }
        Ok(out)
    }

    /// Writes a scalar placeholder to `out`. A sequence takes back the text
    /// written since `mark` and is returned for the caller to expand once the
    /// text up to the next placeholder is known.
    fn placeholder(
        &self,
        cursor: &mut Cursor<'_>,
        occurrence: &Occurrence<'_, '_>,
        auto_index: &mut usize,
        out: &mut String,
        mark: usize,
    ) -> Result<Option<Expansion>> {
        let placeholder = Placeholder::read(cursor);
        let modifier = match placeholder.modifier {
            Some(_) => Modifier::read(cursor),
            None => Modifier::default(),
        };
        cursor.exit_subscope();

        let value = resolve(&self.accessor, &placeholder.name, occurrence.scope, auto_index)?;
        let encoding = modifier.encoding.as_ref().unwrap_or(occurrence.encoding);

        let Value::Array(items) = value.as_ref() else {
            push_unconditional(&modifier, out);
            let rendered = self.value(&value, &modifier, encoding, occurrence)?;
            splice(&modifier, &rendered, true, out);
            return Ok(None);
        };

        let prefix = out.split_off(mark);
        let mut expansion = Expansion {
            prefix,
            lead: String::new(),
            elements: Vec::with_capacity(items.len()),
            separator: modifier
                .separator()
                .unwrap_or_else(|| self.options.separator.clone()),
        };
        if !items.is_empty() {
            push_unconditional(&modifier, &mut expansion.lead);
        }
        for item in items {
            let rendered = self.value(item, &modifier, encoding, occurrence)?;
            let mut element = String::new();
            splice(&modifier, &rendered, false, &mut element);
            expansion.elements.push(element);
        }
        Ok(Some(expansion))
    }

    /// Renders one value through the mapping or format pattern, then encodes it.
    fn value(
        &self,
        value: &Value,
        modifier: &Modifier<'_>,
        encoding: &Encoding,
        occurrence: &Occurrence<'_, '_>,
    ) -> Result<String> {
        if modifier.mapping.is_some() {
            let Some(entry) = modifier.select(value) else {
                return Ok(String::new());
            };
            let encoding = entry.encoding.as_ref().unwrap_or(encoding);
            return match &entry.template {
                Some(template) => self.nested(template, value, encoding, occurrence),
                None => Ok(encoding.encode(&value.to_string()).into_owned()),
            };
        }

        let text = match &modifier.pattern {
            Some(pattern) => format_pattern(value, pattern).unwrap_or_else(|err| {
                log::warn!("{}", err);
                String::new()
            }),
            None => value.to_string(),
        };
        Ok(encoding.encode(&text).into_owned())
    }

    /// Renders a mapping sub-template with the other style. Its output is not
    /// encoded again.
    fn nested(
        &self,
        template: &str,
        value: &Value,
        encoding: &Encoding,
        occurrence: &Occurrence<'_, '_>,
    ) -> Result<String> {
        let depth = occurrence.depth + 1;
        if depth > self.options.max_depth {
            log::warn!(
                "sub-template nested deeper than {} levels, rendering it empty",
                self.options.max_depth
            );
            return Ok(String::new());
        }

        let args = Value::Array(vec![value.clone()]);
        let scope = Scope {
            args: &args,
            named: value,
            config: occurrence.scope.config,
        };
        self.render(template, occurrence.style.toggle(), encoding, &scope, depth)
    }
}

/// Per-call state shared by every placeholder of one template.
struct Occurrence<'e, 's> {
    style: Style,
    encoding: &'e Encoding,
    scope: &'s Scope<'s>,
    depth: usize,
}

/// A sequence placeholder waiting for the literal text that follows it.
///
/// Each element is written between the text preceding the placeholder and
/// the text following it, and the copies are joined with the separator. An
/// empty sequence keeps the surrounding text once.
struct Expansion {
    prefix: String,
    lead: String,
    elements: Vec<String>,
    separator: String,
}

impl Expansion {
    /// Replaces the text written since `mark` with the expanded copies.
    fn write(self, out: &mut String, mark: usize) {
        let suffix = out.split_off(mark);
        out.push_str(&self.lead);
        if self.elements.is_empty() {
            out.push_str(&self.prefix);
            out.push_str(&suffix);
            return;
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }
            out.push_str(&self.prefix);
            out.push_str(element);
            out.push_str(&suffix);
        }
    }
}

fn escapable(options: &FormatOptions) -> String {
    let mut escapable = ESCAPABLE.to_string();
    if let Some(escape) = options.escape {
        if !escapable.contains(escape) {
            escapable.push(escape);
        }
    }
    escapable
}

fn push_unconditional(modifier: &Modifier<'_>, out: &mut String) {
    for literal in modifier.unconditional() {
        out.push_str(&literal.text);
    }
}

/// Writes `rendered` with its guarded literals. Sequence elements skip the
/// prefix literals, which already served as the separator.
fn splice(modifier: &Modifier<'_>, rendered: &str, with_prefix: bool, out: &mut String) {
    let empty = rendered.is_empty();
    for literal in modifier.guarded(empty, Placement::Before) {
        if with_prefix || literal.guard != Guard::OnNonEmpty {
            out.push_str(&literal.text);
        }
    }
    out.push_str(rendered);
    for literal in modifier.guarded(empty, Placement::After) {
        out.push_str(&literal.text);
    }
}
