//! Placeholder modifiers.
//!
//! The bracketed part of `${name[...]}` is split on top-level `;` into
//! segments. Each segment is classified by its first character:
//!
//! | Segment        | Meaning                                              |
//! |----------------|------------------------------------------------------|
//! | `#tag`         | output encoding (`json`, `xml`, `url`, `text`)       |
//! | `#key=tmpl;…`  | mapping; this and every later segment is an entry    |
//! | `^text`        | emitted instead of an empty value                    |
//! | `+text`        | emitted after a non-empty value                      |
//! | `!text`        | always emitted, once, before the value               |
//! | `text` (last)  | format pattern for dates and numbers                 |
//! | `text` (other) | emitted before a non-empty value; separates sequence elements |
//!
//! `;` and `=` inside `{}`, `()` or `[]` groups do not split, which is what
//! lets a mapping entry carry a complete sub-template such as
//! `#1=$(name[#xml])`.

use crate::cursor::{Cursor, SpanKind};
use crate::decimal::DecimalPattern;
use crate::delimiter::{ChannelMask, DelimiterTable, BRACE, BRACKET, EQUALS, PAREN, SEMICOLON};
use crate::{Encoding, Error, Result, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::borrow::Cow;
use std::fmt::{self, Write};
use std::ops::Range;

const SEGMENT_CHANNELS: ChannelMask = ChannelMask::of(SEMICOLON)
    .with(EQUALS)
    .with(BRACE)
    .with(PAREN)
    .with(BRACKET);

/// When a guarded literal is emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Always.
    None,
    /// Only when the rendered value is empty.
    OnEmpty,
    /// Only when the rendered value is not empty.
    OnNonEmpty,
}

/// Where a guarded literal goes relative to the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    Before,
    After,
}

/// Template text spliced around a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardedLiteral<'t> {
    pub text: Cow<'t, str>,
    pub guard: Guard,
    pub placement: Placement,
}

impl GuardedLiteral<'_> {
    /// Whether this literal is emitted next to a value whose emptiness is `empty`.
    #[must_use]
    pub fn applies(&self, empty: bool) -> bool {
        match self.guard {
            Guard::None => true,
            Guard::OnEmpty => empty,
            Guard::OnNonEmpty => !empty,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MappingKey<'t> {
    /// `*`, matches every value.
    Wildcard,
    Exact(Cow<'t, str>),
}

/// One `key[#tag][=template]` entry of a mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry<'t> {
    pub key: MappingKey<'t>,
    /// Raw sub-template, still escaped. `None` emits the value itself.
    pub template: Option<Cow<'t, str>>,
    pub encoding: Option<Encoding>,
}

impl MappingEntry<'_> {
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        match &self.key {
            MappingKey::Wildcard => true,
            MappingKey::Exact(key) => key == text,
        }
    }
}

/// A classified modifier segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'t> {
    Encoding(Encoding),
    Literal(GuardedLiteral<'t>),
    Pattern(Cow<'t, str>),
    Mapping(Vec<MappingEntry<'t>>),
}

/// The parsed modifier of one placeholder occurrence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifier<'t> {
    pub encoding: Option<Encoding>,
    pub literals: Vec<GuardedLiteral<'t>>,
    pub pattern: Option<Cow<'t, str>>,
    pub mapping: Option<Vec<MappingEntry<'t>>>,
}

#[derive(Debug)]
struct RawSegment {
    range: Range<usize>,
    equals: Option<usize>,
}

impl<'t> Modifier<'t> {
    /// Parses modifier text without the surrounding brackets.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::{Encoding, Modifier, Value};
    ///
    /// let modifier = Modifier::parse("#json;#1=one;*=many", Some('\\'));
    /// assert_eq!(modifier.encoding, Some(Encoding::Json));
    /// let entry = modifier.select(&Value::from(1)).unwrap();
    /// assert_eq!(entry.template.as_deref(), Some("one"));
    /// ```
    #[must_use]
    pub fn parse(text: &'t str, escape: Option<char>) -> Self {
        let mut cursor = Cursor::new(DelimiterTable::standard());
        if let Some(escape) = escape {
            cursor = cursor.with_escape(escape, None);
        }
        cursor.reset(text, 0);
        Self::from_segments(Self::scan(&mut cursor))
    }

    /// Reads the modifier at the cursor's current span, a paired `[...]`.
    ///
    /// The cursor is left on that span.
    pub fn read(cursor: &mut Cursor<'t>) -> Self {
        cursor.enter_subscope(0);
        let segments = Self::scan(cursor);
        cursor.exit_subscope();
        Self::from_segments(segments)
    }

    /// Splits and classifies the segments of the current scope.
    pub fn scan(cursor: &mut Cursor<'t>) -> Vec<Segment<'t>> {
        let raw = split(cursor);
        let cursor: &Cursor<'t> = cursor;
        let input = cursor.input();
        let kinds: Vec<Kind> = raw
            .iter()
            .map(|segment| classify(input, cursor.escape(), segment))
            .collect();
        let mapping_start = kinds
            .iter()
            .position(|kind| matches!(kind, Kind::Mapping(_)))
            .unwrap_or(raw.len());
        let last_bare = kinds[..mapping_start]
            .iter()
            .rposition(|kind| matches!(kind, Kind::Bare));

        let literal = |body: Range<usize>, guard, placement| {
            Segment::Literal(GuardedLiteral {
                text: cursor.slice_range(body, true, false),
                guard,
                placement,
            })
        };

        let mut segments = Vec::with_capacity(mapping_start + 1);
        for (i, (segment, kind)) in raw.iter().zip(kinds).enumerate() {
            let end = segment.range.end;
            match kind {
                Kind::Tag(body) => {
                    let tag = cursor.slice_range(body..end, true, true);
                    segments.push(Segment::Encoding(Encoding::from_tag(&tag)));
                }
                Kind::Mapping(body) => {
                    let mut entries = vec![entry(cursor, body..end, segment.equals)];
                    entries.extend(
                        raw[i + 1..]
                            .iter()
                            .map(|rest| entry(cursor, rest.range.clone(), rest.equals)),
                    );
                    segments.push(Segment::Mapping(entries));
                    break;
                }
                Kind::Marked('^', body) => {
                    segments.push(literal(body..end, Guard::OnEmpty, Placement::Before));
                }
                Kind::Marked('+', body) => {
                    segments.push(literal(body..end, Guard::OnNonEmpty, Placement::After));
                }
                Kind::Marked(_, body) => {
                    segments.push(literal(body..end, Guard::None, Placement::Before));
                }
                Kind::Bare if Some(i) == last_bare => {
                    let pattern = cursor.slice_range(segment.range.clone(), true, true);
                    if !pattern.is_empty() {
                        segments.push(Segment::Pattern(pattern));
                    }
                }
                Kind::Bare => segments.push(literal(
                    segment.range.clone(),
                    Guard::OnNonEmpty,
                    Placement::Before,
                )),
            }
        }
        segments
    }

    #[must_use]
    pub fn from_segments(segments: Vec<Segment<'t>>) -> Self {
        let mut modifier = Modifier::default();
        for segment in segments {
            match segment {
                Segment::Encoding(encoding) => modifier.encoding = Some(encoding),
                Segment::Literal(literal) => modifier.literals.push(literal),
                Segment::Pattern(pattern) => modifier.pattern = Some(pattern),
                Segment::Mapping(entries) => modifier.mapping = Some(entries),
            }
        }
        modifier
    }

    /// The first mapping entry matching `value`'s text, if this is a mapping.
    #[must_use]
    pub fn select(&self, value: &Value) -> Option<&MappingEntry<'t>> {
        let text = value.to_string();
        self.mapping
            .as_ref()?
            .iter()
            .find(|entry| entry.matches(&text))
    }

    /// Text placed between sequence elements, from the unguarded-prefix literals.
    #[must_use]
    pub fn separator(&self) -> Option<String> {
        let mut prefixes = self
            .literals
            .iter()
            .filter(|literal| {
                literal.guard == Guard::OnNonEmpty && literal.placement == Placement::Before
            })
            .peekable();
        prefixes.peek()?;
        Some(prefixes.map(|literal| literal.text.as_ref()).collect())
    }

    /// Literals emitted once per occurrence, regardless of the value.
    pub fn unconditional(&self) -> impl Iterator<Item = &GuardedLiteral<'t>> {
        self.literals
            .iter()
            .filter(|literal| literal.guard == Guard::None)
    }

    /// Guarded literals for one value, in declaration order.
    pub fn guarded(
        &self,
        empty: bool,
        placement: Placement,
    ) -> impl Iterator<Item = &GuardedLiteral<'t>> {
        self.literals.iter().filter(move |literal| {
            literal.guard != Guard::None && literal.placement == placement && literal.applies(empty)
        })
    }
}

/// How a raw segment reads; offsets point just past the marker character.
enum Kind {
    Tag(usize),
    Mapping(usize),
    Marked(char, usize),
    Bare,
}

fn classify(input: &str, escape: Option<char>, segment: &RawSegment) -> Kind {
    let text = &input[segment.range.clone()];
    let head = text.trim_start();
    let at = segment.range.start + (text.len() - head.len());
    let Some(marker) = head.chars().next().filter(|ch| Some(*ch) != escape) else {
        return Kind::Bare;
    };
    let body = at + marker.len_utf8();
    match marker {
        '#' => {
            let rest = head[1..].trim();
            if segment.equals.is_some() || rest.starts_with('*') {
                Kind::Mapping(body)
            } else if rest.starts_with(|ch: char| ch.is_ascii_alphabetic())
                && rest.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
            {
                Kind::Tag(body)
            } else {
                // A decimal pattern such as `#,##0.00`.
                Kind::Bare
            }
        }
        '^' | '+' | '!' => Kind::Marked(marker, body),
        _ => Kind::Bare,
    }
}

fn split(cursor: &mut Cursor<'_>) -> Vec<RawSegment> {
    cursor.use_channels(SEGMENT_CHANNELS);
    let mut segments = Vec::new();
    let mut start = cursor.position();
    let mut equals = None;
    while cursor.advance() {
        let span = cursor.span();
        match span.kind {
            SpanKind::Start => start = span.start,
            SpanKind::Channel {
                index: SEMICOLON, ..
            } => {
                segments.push(RawSegment {
                    range: start..span.start,
                    equals: equals.take(),
                });
                start = span.end;
            }
            SpanKind::Channel { index: EQUALS, .. } => {
                equals.get_or_insert(span.start);
            }
            _ => {}
        }
    }
    segments.push(RawSegment {
        range: start..cursor.terminal(),
        equals,
    });
    segments
}

fn entry<'t>(cursor: &Cursor<'t>, range: Range<usize>, equals: Option<usize>) -> MappingEntry<'t> {
    let (key_range, template) = match equals {
        Some(at) if at >= range.start => (
            range.start..at,
            Some(cursor.slice_range(at + 1..range.end, false, false)),
        ),
        _ => (range, None),
    };

    let raw_key = &cursor.input()[key_range.clone()];
    let (key_range, encoding) = match find_unescaped(raw_key, '#', cursor.escape()) {
        Some(hash) => {
            let tag = cursor.slice_range(key_range.start + hash + 1..key_range.end, true, true);
            (
                key_range.start..key_range.start + hash,
                Some(Encoding::from_tag(&tag)),
            )
        }
        None => (key_range, None),
    };

    let key = if cursor.input()[key_range.clone()].trim() == "*" {
        MappingKey::Wildcard
    } else {
        MappingKey::Exact(cursor.slice_range(key_range, true, true))
    };
    MappingEntry {
        key,
        template,
        encoding,
    }
}

fn find_unescaped(text: &str, target: char, escape: Option<char>) -> Option<usize> {
    let mut chars = text.char_indices();
    while let Some((offset, ch)) = chars.next() {
        if Some(ch) == escape {
            chars.next();
        } else if ch == target {
            return Some(offset);
        }
    }
    None
}

/// Applies a format pattern to `value`.
///
/// Dates (and strings holding an RFC 3339 timestamp or a `YYYY-MM-DD` date)
/// use strftime syntax, numbers use [`DecimalPattern`]. Any other value is
/// rendered as plain text and the pattern is ignored.
///
/// # Errors
///
/// Returns [`Error::Pattern`] when the pattern is invalid for the value.
///
/// # Examples
///
/// ```rust
/// use textfmt::modifier::format_pattern;
/// use textfmt::Value;
///
/// let day = Value::from("2024-03-09");
/// assert_eq!(format_pattern(&day, "%d.%m.%Y").unwrap(), "09.03.2024");
/// assert_eq!(format_pattern(&Value::from(1234), "#,##0").unwrap(), "1,234");
/// ```
pub fn format_pattern(value: &Value, pattern: &str) -> Result<String> {
    match value {
        Value::Date(date) => format_date(date, pattern),
        Value::Number(number) => Ok(DecimalPattern::parse(pattern)?.format(number)),
        Value::BigInt(number) => Ok(DecimalPattern::parse(pattern)?.format_bigint(number)),
        Value::String(text) => {
            if let Ok(date) = DateTime::<FixedOffset>::parse_from_rfc3339(text) {
                format_date(&date, pattern)
            } else if let Some(midnight) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|day| day.and_hms_opt(0, 0, 0))
            {
                format_date(&Utc.from_utc_datetime(&midnight), pattern)
            } else {
                Ok(text.clone())
            }
        }
        other => Ok(other.to_string()),
    }
}

fn format_date<Tz>(date: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::pattern(pattern, "unknown date/time specifier"));
    }
    let mut out = String::new();
    write!(out, "{}", date.format_with_items(items.iter()))
        .map_err(|_| Error::pattern(pattern, "not applicable to this value"))?;
    Ok(out)
}
