//! Template Language Reference
//!
//! This module documents the placeholder language understood by
//! [`Formatter`](crate::Formatter). It contains no code.
//!
//! # Overview
//!
//! A template is plain text with placeholders. Text outside placeholders is
//! copied verbatim, placeholders are replaced by the text of a parameter.
//!
//! ```text
//! Dear ${user.name}, your order ${order.id} ships on ${order.date[%d %B %Y]}.
//! ```
//!
//! # Placeholders
//!
//! ## Brackets
//!
//! | Syntax | Primary style | Alternate style |
//! |--------|---------------|-----------------|
//! | `Dollar` (default) | `${…}` | `$(…)` |
//! | `Bare` ([`FormatOptions::simplified`](crate::FormatOptions::simplified)) | `{…}` | `(…)` |
//!
//! Only the active style is recognised; the other one is plain text. Mapping
//! sub-templates switch to the other style, so nested placeholders never
//! need escaping:
//!
//! ```text
//! ${user[#*=$(name) <$(email)>]}
//! ```
//!
//! Brackets nest: inside `${…}` every further `{` must be balanced by a `}`
//! before the placeholder closes. An opener without a closer is kept as text.
//!
//! ## Names
//!
//! | Name | Resolves to |
//! |------|-------------|
//! | empty (`${}`) | the next positional argument |
//! | digits (`${1}`) | the positional argument at that index |
//! | path (`${user.address.city}`, `${items.0}`) | a property of the named parameters |
//!
//! A name without `.` that matches nothing resolves to the parameters
//! themselves when they are closed: anything but an object, arrays
//! included. Only then are the configuration parameters of
//! [`format_with`](crate::format_with) searched. Unresolved names render
//! as empty text.
//!
//! # Modifiers
//!
//! A name can be followed by a modifier in square brackets, split on `;`:
//!
//! ```text
//! ${price[#xml;Price: ;#,##0.00;^free;+ EUR]}
//! ```
//!
//! | Segment | Effect |
//! |---------|--------|
//! | `#json` `#xml` `#url` `#text` | output encoding of the value |
//! | `^text` | emitted when the value renders empty |
//! | `+text` | emitted after the value when it is not empty |
//! | `!text` | emitted once, before the value, in every case |
//! | last plain segment | format pattern |
//! | other plain segments | emitted before a non-empty value |
//!
//! A `#` segment that is not a word, such as `#,##0.00`, is plain text, so
//! decimal patterns need no escaping. Plain segments after a mapping has
//! started are mapping entries.
//!
//! ## Format Patterns
//!
//! - dates, and strings holding an RFC 3339 timestamp or `YYYY-MM-DD` date,
//!   use strftime items: `%Y-%m-%d`, `%H:%M`, `%A`
//! - numbers use decimal patterns, see [`DecimalPattern`](crate::decimal::DecimalPattern):
//!   `#,##0.00`, `0.#%`, `000`
//! - other values ignore the pattern
//!
//! A pattern that does not fit the value renders the value empty and logs a
//! warning.
//!
//! ## Mappings
//!
//! A segment of the form `#key=template` starts a mapping. It and every
//! later segment are entries:
//!
//! ```text
//! ${status[#0=inactive;1=active;*=unknown ($())]}
//! ```
//!
//! - keys are compared with the value's text, first match wins
//! - `*` matches any value
//! - `key#xml=…` sets the default encoding of the entry's template
//! - an entry without `=` emits the value itself
//! - the template sees the value as positional argument `$()` and as named
//!   parameters `$(field)`
//! - no matching entry renders empty
//!
//! # Sequences
//!
//! An array parameter renders every element with the same modifier. The
//! template text since the previous placeholder and the text up to the next
//! one are repeated around each element, and the copies are joined by the
//! separator: a plain prefix segment of the modifier, otherwise
//! [`FormatOptions::separator`](crate::FormatOptions::separator).
//!
//! ```text
//! ${tags}           a,b,c
//! [${tags}]         [a],[b],[c]
//! ${tags[ | ;]}     a | b | c
//! <i>${tags[;]}</i> <i>a</i><i>b</i><i>c</i>
//! ${tags[;^?]}      a,?,c      (for ["a", null, "c"])
//! ```
//!
//! Text repeated by one sequence is not repeated again by the next
//! placeholder. An empty array keeps the surrounding text once and renders
//! nothing in between, not even `!` literals, which otherwise appear once
//! before the first copy.
//!
//! # Escaping
//!
//! `\` escapes the next character when it is one of
//!
//! ```text
//! \ $ # { } ( ) [ ] ; = ^ + ! *
//! ```
//!
//! Any other backslash is literal text, so Windows paths need no escaping.
//! A trailing `\` stays as it is. The escape character can be changed or
//! disabled with [`FormatOptions::with_escape`](crate::FormatOptions::with_escape).
//!
//! # Encodings
//!
//! | Tag | Escapes |
//! |-----|---------|
//! | `json` | `\` `"` and control characters, as inside a JSON string |
//! | `xml` | `&` `"` `<` `>` `'` |
//! | `url` | form-urlencoded, UTF-8 |
//! | `text`, `plain`, anything else | nothing |
//!
//! Only parameter text is encoded, never template text.
