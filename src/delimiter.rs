//! Delimiter channels recognised by the [`Cursor`](crate::Cursor).
//!
//! A channel is one opening character, optionally preceded by a lead
//! character (the `$` of `${`) and optionally matched by a closing character.
//! Channels without a closer are single-character markers such as `;`.
//!
//! The [`standard`](DelimiterTable::standard) table holds every channel the
//! template language uses; a [`ChannelMask`] selects which of them a scan
//! reacts to. When several active channels match at the same position, the
//! one listed first in the table wins.
//!
//! ```rust
//! use textfmt::delimiter::{self, ChannelMask, DelimiterTable};
//!
//! let table = DelimiterTable::standard();
//! let dollar_brace = table.get(delimiter::DOLLAR_BRACE).unwrap();
//! assert_eq!(dollar_brace.open_len(), 2);
//!
//! let mask = ChannelMask::of(delimiter::SEMICOLON).with(delimiter::EQUALS);
//! assert!(mask.contains(delimiter::EQUALS));
//! assert!(!mask.contains(delimiter::BRACKET));
//! ```

use crate::{Error, Result};
use std::sync::OnceLock;

/// Upper bound on the number of channels in one table.
pub const MAX_CHANNELS: usize = 29;

/// `${` … `}`
pub const DOLLAR_BRACE: usize = 0;
/// `$(` … `)`
pub const DOLLAR_PAREN: usize = 1;
/// `{` … `}`
pub const BRACE: usize = 2;
/// `(` … `)`
pub const PAREN: usize = 3;
/// `[` … `]`
pub const BRACKET: usize = 4;
/// `;`
pub const SEMICOLON: usize = 5;
/// `=`
pub const EQUALS: usize = 6;

/// One opening (and optional closing) delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiter {
    lead: Option<char>,
    open: char,
    close: Option<char>,
}

impl Delimiter {
    /// A lone marker character without a closer.
    #[must_use]
    pub const fn single(open: char) -> Self {
        Delimiter {
            lead: None,
            open,
            close: None,
        }
    }

    /// An opening/closing pair.
    #[must_use]
    pub const fn paired(open: char, close: char) -> Self {
        Delimiter {
            lead: None,
            open,
            close: Some(close),
        }
    }

    /// A pair whose opener must be preceded by `lead`, as in `${`.
    #[must_use]
    pub const fn led(lead: char, open: char, close: char) -> Self {
        Delimiter {
            lead: Some(lead),
            open,
            close: Some(close),
        }
    }

    #[must_use]
    pub const fn open(&self) -> char {
        self.open
    }

    #[must_use]
    pub const fn close(&self) -> Option<char> {
        self.close
    }

    /// Byte length of the opening sequence, lead included.
    #[must_use]
    pub fn open_len(&self) -> usize {
        self.lead.map_or(0, char::len_utf8) + self.open.len_utf8()
    }

    /// Byte length of the closer, zero for single markers.
    #[must_use]
    pub fn close_len(&self) -> usize {
        self.close.map_or(0, char::len_utf8)
    }

    /// Returns `true` if `rest` starts with this delimiter's opening sequence.
    #[must_use]
    pub fn opens(&self, rest: &str) -> bool {
        let mut chars = rest.chars();
        if let Some(lead) = self.lead {
            if chars.next() != Some(lead) {
                return false;
            }
        }
        chars.next() == Some(self.open)
    }
}

/// A set of active channels, one bit per table index.
///
/// Indices at or past [`MAX_CHANNELS`] name no channel and are never set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChannelMask(u32);

const fn bit(index: usize) -> u32 {
    if index < MAX_CHANNELS {
        1 << index
    } else {
        0
    }
}

impl ChannelMask {
    pub const EMPTY: ChannelMask = ChannelMask(0);

    /// A mask holding exactly one channel.
    #[must_use]
    pub const fn of(index: usize) -> Self {
        ChannelMask(bit(index))
    }

    /// Returns this mask with `index` added.
    #[must_use]
    pub const fn with(self, index: usize) -> Self {
        ChannelMask(self.0 | bit(index))
    }

    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        self.0 & bit(index) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Ordered, immutable list of channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelimiterTable {
    channels: Vec<Delimiter>,
}

impl DelimiterTable {
    /// Builds a table from `channels`, in priority order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyChannels`] when more than [`MAX_CHANNELS`] are given.
    pub fn new(channels: Vec<Delimiter>) -> Result<Self> {
        if channels.len() > MAX_CHANNELS {
            return Err(Error::TooManyChannels(channels.len()));
        }
        Ok(DelimiterTable { channels })
    }

    /// The shared table of template delimiters.
    ///
    /// Indices are the constants of this module ([`DOLLAR_BRACE`] … [`EQUALS`]).
    #[must_use]
    pub fn standard() -> &'static DelimiterTable {
        static STANDARD: OnceLock<DelimiterTable> = OnceLock::new();
        STANDARD.get_or_init(|| DelimiterTable {
            channels: vec![
                Delimiter::led('$', '{', '}'),
                Delimiter::led('$', '(', ')'),
                Delimiter::paired('{', '}'),
                Delimiter::paired('(', ')'),
                Delimiter::paired('[', ']'),
                Delimiter::single(';'),
                Delimiter::single('='),
            ],
        })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Delimiter> {
        self.channels.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Returns the first active channel whose opening sequence starts `rest`.
    #[must_use]
    pub fn opener_at(&self, mask: ChannelMask, rest: &str) -> Option<(usize, &Delimiter)> {
        self.channels
            .iter()
            .enumerate()
            .find(|(index, delimiter)| mask.contains(*index) && delimiter.opens(rest))
    }
}
