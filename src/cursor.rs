//! Delimiter tokenizer.
//!
//! A [`Cursor`] walks an input string and splits it into [`Span`]s according
//! to the active channels of a [`DelimiterTable`]. After a reset the spans come
//! in a fixed rhythm:
//!
//! ```text
//! Start  Literal  Channel  Literal  Channel ... Literal  End
//! ```
//!
//! A literal is produced between every two channel spans, even when it is
//! empty, so callers can treat the stream uniformly. Paired channels nest on
//! their own opening character and never look past the terminal boundary; an
//! opener whose closer is missing comes back as an unpaired channel span that
//! covers only the opening sequence.
//!
//! Sub-scopes confine the scan to the interior of the current span. This is
//! how the formatter descends from a placeholder into its modifier without
//! re-reading the text around it.
//!
//! A cursor is mutable scan state. Use one per formatting call.
//!
//! ```rust
//! use textfmt::{Cursor, SpanKind};
//! use textfmt::delimiter::{self, ChannelMask, DelimiterTable};
//!
//! let mut cursor = Cursor::new(DelimiterTable::standard());
//! cursor.reset("Hi ${name}!", 0);
//! cursor.use_channels(ChannelMask::of(delimiter::DOLLAR_BRACE));
//!
//! let mut kinds = Vec::new();
//! while cursor.advance() {
//!     kinds.push((cursor.span().kind, cursor.slice(false, false).into_owned()));
//! }
//! assert_eq!(kinds[1], (SpanKind::Literal, "Hi ".to_string()));
//! assert_eq!(
//!     kinds[2],
//!     (SpanKind::Channel { index: delimiter::DOLLAR_BRACE, paired: true }, "${name}".to_string())
//! );
//! assert_eq!(kinds[3], (SpanKind::Literal, "!".to_string()));
//! ```

use crate::delimiter::{ChannelMask, DelimiterTable};
use std::borrow::Cow;
use std::ops::Range;

/// Classification of a [`Span`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanKind {
    /// Zero-width span before the first token.
    Start,
    /// Text between two channel spans; may be empty.
    Literal,
    /// The scan reached the terminal boundary.
    End,
    /// A channel opener, with its closer when `paired` is `true`.
    Channel { index: usize, paired: bool },
}

/// A classified byte range of the cursor's input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
    /// Whether escape sequences were skipped while scanning this span.
    pub has_escape: bool,
}

impl Span {
    const fn new(start: usize, end: usize, kind: SpanKind) -> Self {
        Span {
            start,
            end,
            kind,
            has_escape: false,
        }
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The channel index for channel spans.
    #[must_use]
    pub fn channel(&self) -> Option<usize> {
        match self.kind {
            SpanKind::Channel { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Returns `true` for a channel span of `index` whose closer was found.
    #[must_use]
    pub fn is_paired(&self, index: usize) -> bool {
        self.kind == SpanKind::Channel { index, paired: true }
    }
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    position: usize,
    terminal: usize,
    span: Span,
    mask: ChannelMask,
    started: bool,
}

/// Stateful scanner over one input string.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    table: &'a DelimiterTable,
    input: &'a str,
    mask: ChannelMask,
    escape: Option<char>,
    escapable: Option<&'a str>,
    position: usize,
    terminal: usize,
    span: Span,
    started: bool,
    frames: Vec<Frame>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor over an empty input with no active channels.
    #[must_use]
    pub fn new(table: &'a DelimiterTable) -> Self {
        Cursor {
            table,
            input: "",
            mask: ChannelMask::EMPTY,
            escape: None,
            escapable: None,
            position: 0,
            terminal: 0,
            span: Span::new(0, 0, SpanKind::Start),
            started: false,
            frames: Vec::new(),
        }
    }

    /// Enables `escape`. With `escapable` set, only those characters can be escaped.
    #[must_use]
    pub fn with_escape(mut self, escape: char, escapable: Option<&'a str>) -> Self {
        self.escape = Some(escape);
        self.escapable = escapable;
        self
    }

    /// Binds a new input and restarts scanning at byte offset `start`.
    ///
    /// The terminal boundary moves to the end of the input and all sub-scopes
    /// are dropped.
    pub fn reset(&mut self, input: &'a str, start: usize) {
        let mut start = start.min(input.len());
        while !input.is_char_boundary(start) {
            start -= 1;
        }
        self.input = input;
        self.position = start;
        self.terminal = input.len();
        self.span = Span::new(start, start, SpanKind::Start);
        self.started = false;
        self.frames.clear();
    }

    /// Restricts scanning to the channels in `mask`.
    pub fn use_channels(&mut self, mask: ChannelMask) {
        self.mask = mask;
    }

    #[must_use]
    pub fn channels(&self) -> ChannelMask {
        self.mask
    }

    #[must_use]
    pub fn escape(&self) -> Option<char> {
        self.escape
    }

    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn terminal(&self) -> usize {
        self.terminal
    }

    /// Moves to the next span. Returns `false` once the terminal boundary is reached.
    pub fn advance(&mut self) -> bool {
        if !self.started {
            self.started = true;
            self.span = Span::new(self.position, self.position, SpanKind::Start);
            return true;
        }

        match self.span.kind {
            SpanKind::End => false,
            SpanKind::Literal if self.position >= self.terminal => {
                self.span = Span::new(self.terminal, self.terminal, SpanKind::End);
                false
            }
            SpanKind::Literal => {
                let rest = &self.input[self.position..self.terminal];
                match self.table.opener_at(self.mask, rest) {
                    Some((index, delimiter)) => {
                        let (open, close, open_len) =
                            (delimiter.open(), delimiter.close(), delimiter.open_len());
                        self.span = self.scan_channel(index, open, close, open_len);
                    }
                    // The mask changed since the literal was scanned.
                    None => self.span = self.scan_literal(),
                }
                self.position = self.span.end;
                true
            }
            SpanKind::Start | SpanKind::Channel { .. } => {
                self.span = self.scan_literal();
                self.position = self.span.end;
                true
            }
        }
    }

    /// Confines scanning to the interior of the current span.
    ///
    /// Scanning restarts `offset` bytes into the interior; the terminal becomes
    /// the end of the interior. Pair with [`exit_subscope`](Self::exit_subscope).
    pub fn enter_subscope(&mut self, offset: usize) {
        let interior = self.interior();
        self.frames.push(Frame {
            position: self.position,
            terminal: self.terminal,
            span: self.span,
            mask: self.mask,
            started: self.started,
        });
        let mut start = (interior.start + offset).min(interior.end);
        while !self.input.is_char_boundary(start) {
            start -= 1;
        }
        self.position = start;
        self.terminal = interior.end;
        self.span = Span::new(start, start, SpanKind::Start);
        self.started = false;
    }

    /// Leaves the innermost sub-scope; the outer scan resumes just past the span
    /// the sub-scope was entered from. Returns `false` when not in a sub-scope.
    pub fn exit_subscope(&mut self) -> bool {
        match self.frames.pop() {
            Some(frame) => {
                self.position = frame.position;
                self.terminal = frame.terminal;
                self.span = frame.span;
                self.mask = frame.mask;
                self.started = frame.started;
                true
            }
            None => false,
        }
    }

    /// Byte range of the current span without its delimiters.
    #[must_use]
    pub fn interior(&self) -> Range<usize> {
        let span = self.span;
        let SpanKind::Channel { index, paired } = span.kind else {
            return span.range();
        };
        match self.table.get(index) {
            Some(delimiter) => {
                let start = (span.start + delimiter.open_len()).min(span.end);
                let end = if paired {
                    span.end - delimiter.close_len()
                } else {
                    span.end
                };
                start..end.max(start)
            }
            None => span.range(),
        }
    }

    /// Text of the current span, delimiters included.
    #[must_use]
    pub fn slice(&self, unescape: bool, trim: bool) -> Cow<'a, str> {
        if unescape && !self.span.has_escape {
            return self.slice_range(self.span.range(), false, trim);
        }
        self.slice_range(self.span.range(), unescape, trim)
    }

    /// Text of an arbitrary byte range of the input.
    #[must_use]
    pub fn slice_range(&self, range: Range<usize>, unescape: bool, trim: bool) -> Cow<'a, str> {
        let input: &'a str = self.input;
        let text = &input[range];
        let text = if trim { text.trim() } else { text };
        if unescape {
            self.unescape(text)
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Replaces every escape sequence in `text` by the escaped character.
    ///
    /// A trailing escape character with nothing after it stays as it is.
    #[must_use]
    pub fn unescape(&self, text: &'a str) -> Cow<'a, str> {
        let Some(escape) = self.escape else {
            return Cow::Borrowed(text);
        };
        if !text.contains(escape) {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len());
        let mut chars = text.char_indices();
        while let Some((offset, ch)) = chars.next() {
            if self.escapes(ch, &text[offset + ch.len_utf8()..]) {
                if let Some((_, escaped)) = chars.next() {
                    out.push(escaped);
                }
            } else {
                out.push(ch);
            }
        }
        Cow::Owned(out)
    }

    #[inline]
    fn escapes(&self, ch: char, rest: &str) -> bool {
        self.escape == Some(ch)
            && rest
                .chars()
                .next()
                .is_some_and(|next| self.escapable.map_or(true, |set| set.contains(next)))
    }

    fn scan_literal(&self) -> Span {
        let from = self.position;
        let region = &self.input[from..self.terminal];
        let mut has_escape = false;
        let mut chars = region.char_indices();
        while let Some((offset, ch)) = chars.next() {
            let rest = &region[offset..];
            if self.escapes(ch, &rest[ch.len_utf8()..]) {
                has_escape = true;
                chars.next();
                continue;
            }
            if self.table.opener_at(self.mask, rest).is_some() {
                return Span {
                    start: from,
                    end: from + offset,
                    kind: SpanKind::Literal,
                    has_escape,
                };
            }
        }
        Span {
            start: from,
            end: self.terminal,
            kind: SpanKind::Literal,
            has_escape,
        }
    }

    fn scan_channel(&self, index: usize, open: char, close: Option<char>, open_len: usize) -> Span {
        let start = self.position;
        let open_end = start + open_len;
        let unpaired = Span::new(
            start,
            open_end,
            SpanKind::Channel {
                index,
                paired: false,
            },
        );
        let Some(close) = close else {
            return unpaired;
        };

        let region = &self.input[open_end..self.terminal];
        let mut depth = 0usize;
        let mut has_escape = false;
        let mut chars = region.char_indices();
        while let Some((offset, ch)) = chars.next() {
            if self.escapes(ch, &region[offset + ch.len_utf8()..]) {
                has_escape = true;
                chars.next();
                continue;
            }
            if ch == close {
                if depth == 0 {
                    return Span {
                        start,
                        end: open_end + offset + close.len_utf8(),
                        kind: SpanKind::Channel {
                            index,
                            paired: true,
                        },
                        has_escape,
                    };
                }
                depth -= 1;
            } else if ch == open {
                depth += 1;
            }
        }

        log::trace!(
            "no closing '{}' for opener at byte {}, treating it as text",
            close,
            start
        );
        unpaired
    }
}
