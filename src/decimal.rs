//! Decimal number patterns such as `#,##0.00` or `0.#%`.
//!
//! A pattern is `prefix number suffix`. The number part uses
//!
//! | Char | Meaning                                             |
//! |------|-----------------------------------------------------|
//! | `0`  | a digit that is always shown                        |
//! | `#`  | a digit that is shown only when significant         |
//! | `,`  | grouping separator; its distance to the end of the integer part is the group size |
//! | `.`  | decimal separator                                   |
//!
//! In the prefix or suffix, `%` multiplies the value by 100 and is emitted as
//! is, `'…'` quotes literal text and `''` is a single quote.
//!
//! ```rust
//! use textfmt::decimal::DecimalPattern;
//! use textfmt::Number;
//!
//! let money = DecimalPattern::parse("$#,##0.00").unwrap();
//! assert_eq!(money.format(&Number::Float(1234.5)), "$1,234.50");
//!
//! let share = DecimalPattern::parse("0.#%").unwrap();
//! assert_eq!(share.format(&Number::Float(0.125)), "12.5%");
//! ```

use crate::{Error, Number, Result};
use num_bigint::{BigInt, Sign};

/// A parsed decimal pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalPattern {
    prefix: String,
    suffix: String,
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
    grouping: Option<usize>,
    percent: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Prefix,
    Integer,
    Fraction,
    Suffix,
}

impl DecimalPattern {
    /// Parses `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] when the pattern has no digit placeholder,
    /// more than one decimal point, a grouping separator in the fraction or at
    /// the end of the integer part, or digit placeholders after the suffix
    /// has started.
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut parsed = DecimalPattern {
            prefix: String::new(),
            suffix: String::new(),
            min_int: 0,
            min_frac: 0,
            max_frac: 0,
            grouping: None,
            percent: false,
        };
        let mut phase = Phase::Prefix;
        let mut digits_since_group: Option<usize> = None;
        let mut digits = 0usize;
        let mut in_quote = false;
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    parsed.affix(phase).push('\'');
                } else {
                    in_quote = !in_quote;
                }
                if phase == Phase::Integer || phase == Phase::Fraction {
                    phase = Phase::Suffix;
                }
                continue;
            }
            if in_quote {
                parsed.affix(phase).push(ch);
                continue;
            }

            let structural = matches!(ch, '#' | '0' | ',' | '.');
            match phase {
                Phase::Prefix | Phase::Integer if structural => {
                    phase = Phase::Integer;
                    match ch {
                        '#' => {
                            digits_since_group = digits_since_group.map(|n| n + 1);
                        }
                        '0' => {
                            parsed.min_int += 1;
                            digits_since_group = digits_since_group.map(|n| n + 1);
                        }
                        ',' => digits_since_group = Some(0),
                        _ => phase = Phase::Fraction,
                    }
                    if ch == '#' || ch == '0' {
                        digits += 1;
                    }
                }
                Phase::Fraction if structural => match ch {
                    '0' => {
                        parsed.min_frac += 1;
                        parsed.max_frac += 1;
                        digits += 1;
                    }
                    '#' => {
                        parsed.max_frac += 1;
                        digits += 1;
                    }
                    '.' => return Err(Error::pattern(pattern, "multiple decimal separators")),
                    _ => return Err(Error::pattern(pattern, "grouping separator in fraction")),
                },
                Phase::Suffix if structural => {
                    return Err(Error::pattern(pattern, "digit placeholder after suffix"));
                }
                _ => {
                    if phase == Phase::Integer || phase == Phase::Fraction {
                        phase = Phase::Suffix;
                    }
                    if ch == '%' {
                        parsed.percent = true;
                    }
                    parsed.affix(phase).push(ch);
                }
            }
        }

        if digits == 0 {
            return Err(Error::pattern(pattern, "no digit placeholder"));
        }
        match digits_since_group {
            Some(0) => {
                return Err(Error::pattern(pattern, "grouping separator at end of integer part"))
            }
            size => parsed.grouping = size,
        }
        Ok(parsed)
    }

    /// Formats a number. Infinities render as `∞`, NaN as `NaN`.
    #[must_use]
    pub fn format(&self, number: &Number) -> String {
        match number {
            Number::Integer(i) => {
                let mut value = i128::from(*i);
                if self.percent {
                    value *= 100;
                }
                self.assemble(value < 0, &value.unsigned_abs().to_string(), &self.zero_fraction())
            }
            Number::Float(f) => self.format_float(*f),
            Number::Infinity => self.assemble_text(false, "∞"),
            Number::NegativeInfinity => self.assemble_text(true, "∞"),
            Number::NaN => "NaN".to_string(),
        }
    }

    /// Formats an arbitrary-precision integer.
    #[must_use]
    pub fn format_bigint(&self, number: &BigInt) -> String {
        let mut digits = number.magnitude().to_string();
        if self.percent && digits != "0" {
            digits.push_str("00");
        }
        self.assemble(number.sign() == Sign::Minus, &digits, &self.zero_fraction())
    }

    fn format_float(&self, value: f64) -> String {
        let value = if self.percent { value * 100.0 } else { value };
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return self.assemble_text(value < 0.0, "∞");
        }

        let rendered = format!("{:.*}", self.max_frac, value.abs());
        let (int, frac) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
        let keep = frac.trim_end_matches('0').len().max(self.min_frac);
        let frac = &frac[..keep.min(frac.len())];
        let negative = value < 0.0 && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0');
        self.assemble(negative, int, frac)
    }

    fn assemble(&self, negative: bool, int_digits: &str, frac: &str) -> String {
        let significant = int_digits.trim_start_matches('0');
        let mut int = String::with_capacity(self.min_int.max(significant.len()));
        if significant.is_empty() {
            if self.min_int > 0 || frac.is_empty() {
                int.push_str(&"0".repeat(self.min_int.max(1)));
            }
        } else {
            for _ in significant.len()..self.min_int {
                int.push('0');
            }
            int.push_str(significant);
        }

        let mut number = self.group(&int);
        if !frac.is_empty() {
            number.push('.');
            number.push_str(frac);
        }
        self.assemble_text(negative, &number)
    }

    fn assemble_text(&self, negative: bool, number: &str) -> String {
        let mut out =
            String::with_capacity(self.prefix.len() + number.len() + self.suffix.len() + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&self.prefix);
        out.push_str(number);
        out.push_str(&self.suffix);
        out
    }

    fn group(&self, int: &str) -> String {
        let size = match self.grouping {
            Some(size) if int.len() > size => size,
            _ => return int.to_string(),
        };
        let mut out = String::with_capacity(int.len() + int.len() / size);
        let lead = int.len() % size;
        for (i, ch) in int.chars().enumerate() {
            if i > 0 && (i + size - lead) % size == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    fn zero_fraction(&self) -> String {
        "0".repeat(self.min_frac)
    }

    fn affix(&mut self, phase: Phase) -> &mut String {
        if phase == Phase::Prefix {
            &mut self.prefix
        } else {
            &mut self.suffix
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(pattern: &str, number: Number) -> String {
        DecimalPattern::parse(pattern).unwrap().format(&number)
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(fmt("0.00", Number::Float(3.14159)), "3.14");
        assert_eq!(fmt("0.00", Number::Integer(3)), "3.00");
        assert_eq!(fmt("0.##", Number::Float(2.5)), "2.5");
        assert_eq!(fmt("0.##", Number::Float(2.0)), "2");
        assert_eq!(fmt("0.0#", Number::Float(1.5)), "1.5");
        assert_eq!(fmt("0.0#", Number::Float(1.25)), "1.25");
    }

    #[test]
    fn test_integer_digits() {
        assert_eq!(fmt("000", Number::Integer(7)), "007");
        assert_eq!(fmt("#", Number::Integer(0)), "0");
        assert_eq!(fmt("#.##", Number::Float(0.5)), ".5");
        assert_eq!(fmt("0.##", Number::Float(0.5)), "0.5");
        assert_eq!(fmt("#", Number::Float(2.6)), "3");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(fmt("#,##0", Number::Integer(1_234_567)), "1,234,567");
        assert_eq!(fmt("#,##0", Number::Integer(999)), "999");
        assert_eq!(fmt("#,##0", Number::Integer(1000)), "1,000");
        assert_eq!(fmt("#,####", Number::Integer(123_456_789)), "1,2345,6789");
    }

    #[test]
    fn test_negative_and_affixes() {
        assert_eq!(fmt("$#,##0.00", Number::Float(-1234.5)), "-$1,234.50");
        assert_eq!(fmt("0 'units'", Number::Integer(4)), "4 units");
        assert_eq!(fmt("0''", Number::Integer(4)), "4'");
        assert_eq!(fmt("0.0", Number::Float(-0.01)), "0.0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(fmt("0%", Number::Integer(3)), "300%");
        assert_eq!(fmt("#0.0%", Number::Float(0.256)), "25.6%");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(fmt("0.00", Number::Infinity), "∞");
        assert_eq!(fmt("0.00", Number::NegativeInfinity), "-∞");
        assert_eq!(fmt("0.00", Number::NaN), "NaN");
        assert_eq!(fmt("0.00", Number::Float(f64::NAN)), "NaN");
    }

    #[test]
    fn test_bigint() {
        let big: BigInt = "-123456789012345678901234567890".parse().unwrap();
        let pattern = DecimalPattern::parse("#,##0.0").unwrap();
        assert_eq!(
            pattern.format_bigint(&big),
            "-123,456,789,012,345,678,901,234,567,890.0"
        );
    }

    #[test]
    fn test_invalid_patterns() {
        for pattern in ["", "abc", "0.0.0", "0.0,0", "#,", "0 x 0", "%"] {
            assert!(
                matches!(DecimalPattern::parse(pattern), Err(Error::Pattern { .. })),
                "{pattern:?} should be rejected"
            );
        }
    }
}
