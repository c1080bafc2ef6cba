//! Locale-aware number rendering.

use std::fmt;
use std::str::FromStr;

use num_format::ToFormattedString;

use crate::types::RegionalTag;

/// Intl's hard limit on fraction digits.
const MAX_FRACTION_DIGITS: usize = 20;

const NO_BREAK_SPACE: char = '\u{a0}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Brl,
    Eur,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Brl => "BRL",
            Self::Eur => "EUR",
        }
    }

    /// Symbol as the region writes it. Brazil disambiguates the dollar.
    #[must_use]
    pub const fn symbol(self, tag: RegionalTag) -> &'static str {
        match (self, tag) {
            (Self::Usd, RegionalTag::EnUs) => "$",
            (Self::Usd, RegionalTag::PtBr) => "US$",
            (Self::Brl, _) => "R$",
            (Self::Eur, _) => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency code '{0}'. Known codes: USD, BRL, EUR")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "BRL" => Ok(Self::Brl),
            "EUR" => Ok(Self::Eur),
            _ => Err(UnknownCurrency(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    Decimal,
    /// The value is a ratio; `0.25` renders as `25%`.
    Percent,
    Currency(Currency),
}

impl NumberStyle {
    /// Intl defaults: decimal 0..3, percent 0..0, currency 2..2.
    const fn default_fraction_digits(self) -> (usize, usize) {
        match self {
            Self::Decimal => (0, 3),
            Self::Percent => (0, 0),
            Self::Currency(_) => (2, 2),
        }
    }
}

/// Options accepted by [`format_number`].
///
/// Unset fraction bounds fall back to the style's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatOptions {
    pub style: NumberStyle,
    pub minimum_fraction_digits: Option<usize>,
    pub maximum_fraction_digits: Option<usize>,
    pub use_grouping: bool,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            style: NumberStyle::Decimal,
            minimum_fraction_digits: None,
            maximum_fraction_digits: None,
            use_grouping: true,
        }
    }
}

impl NumberFormatOptions {
    #[must_use]
    pub fn percent() -> Self {
        Self { style: NumberStyle::Percent, ..Self::default() }
    }

    #[must_use]
    pub fn currency(currency: Currency) -> Self {
        Self { style: NumberStyle::Currency(currency), ..Self::default() }
    }

    #[must_use]
    pub const fn with_fraction_digits(mut self, minimum: usize, maximum: usize) -> Self {
        self.minimum_fraction_digits = Some(minimum);
        self.maximum_fraction_digits = Some(maximum);
        self
    }

    #[must_use]
    pub const fn without_grouping(mut self) -> Self {
        self.use_grouping = false;
        self
    }

    /// Effective `(min, max)` fraction digits.
    ///
    /// An explicit minimum raises the default maximum and an explicit maximum
    /// lowers the default minimum. Conflicting explicit bounds clamp the
    /// minimum down to the maximum.
    #[must_use]
    pub fn fraction_digits(&self) -> (usize, usize) {
        let (default_min, default_max) = self.style.default_fraction_digits();
        let (min, max) = match (self.minimum_fraction_digits, self.maximum_fraction_digits) {
            (None, None) => (default_min, default_max),
            (Some(min), None) => (min, default_max.max(min)),
            (None, Some(max)) => (default_min.min(max), max),
            (Some(min), Some(max)) => (min.min(max), max),
        };
        (min.min(MAX_FRACTION_DIGITS), max.min(MAX_FRACTION_DIGITS))
    }
}

/// Renders `value` under the conventions of `tag`.
///
/// Rounding is half-away-from-zero on the shortest decimal representation of
/// `value`, so `1.005` rounds to `1.01`. A value that rounds to zero is
/// printed without a sign.
#[must_use]
pub fn format_number(value: f64, tag: RegionalTag, options: &NumberFormatOptions) -> String {
    let body = if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        "∞".to_string()
    } else {
        let (digits, mut point) = decimal_digits(value.abs());
        if matches!(options.style, NumberStyle::Percent) {
            point += 2;
        }
        let (min, max) = options.fraction_digits();
        render_digits(&digits, point, tag, (min, max), options.use_grouping)
    };

    let negative = value.is_sign_negative()
        && !value.is_nan()
        && (value.is_infinite() || body.chars().any(|c| matches!(c, '1'..='9')));
    let sign = if negative { "-" } else { "" };

    match options.style {
        NumberStyle::Decimal => format!("{sign}{body}"),
        NumberStyle::Percent => format!("{sign}{body}%"),
        NumberStyle::Currency(currency) => {
            let symbol = currency.symbol(tag);
            match tag {
                RegionalTag::EnUs => format!("{sign}{symbol}{body}"),
                RegionalTag::PtBr => format!("{sign}{symbol}{NO_BREAK_SPACE}{body}"),
            }
        }
    }
}

/// Shortest round-trip digits of a finite `magnitude`, and how many of them
/// sit before the decimal point (zero or negative for values below one).
fn decimal_digits(magnitude: f64) -> (Vec<u8>, i64) {
    let scientific = format!("{magnitude:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits = mantissa.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
    (digits, exponent.parse::<i64>().unwrap_or(0) + 1)
}

/// Rounds the digits to `max` fraction places, pads to `min`, then applies
/// the regional separators.
fn render_digits(
    digits: &[u8],
    point: i64,
    tag: RegionalTag,
    (min_fraction, max_fraction): (usize, usize),
    use_grouping: bool,
) -> String {
    let (mut integer, fraction) = split_at_point(digits, point);

    let round_up = fraction.get(max_fraction).is_some_and(|&d| d >= 5);
    let mut fraction: Vec<u8> = fraction.into_iter().take(max_fraction).collect();
    if round_up && !increment(&mut fraction) && !increment(&mut integer) {
        integer.insert(0, 1);
    }

    if fraction.len() < min_fraction {
        fraction.resize(min_fraction, 0);
    }
    while fraction.len() > min_fraction && fraction.last() == Some(&0) {
        fraction.pop();
    }

    let integer = to_text(integer.iter().skip_while(|&&d| d == 0));
    let integer = if integer.is_empty() { "0".to_string() } else { integer };
    let fraction = to_text(fraction.iter());

    let locale = tag.num_locale();
    let integer = match integer.parse::<u128>() {
        Ok(n) if use_grouping => n.to_formatted_string(&locale),
        // Beyond u128: print the digits as they are.
        _ => integer,
    };

    if fraction.is_empty() {
        integer
    } else {
        format!("{integer}{}{fraction}", locale.decimal())
    }
}

/// Integer and fraction digits, zero-filled on either side of `digits`.
fn split_at_point(digits: &[u8], point: i64) -> (Vec<u8>, Vec<u8>) {
    let len = i64::try_from(digits.len()).unwrap_or(i64::MAX);
    if point <= 0 {
        let zeros = usize::try_from(-point).unwrap_or(0);
        (vec![0], std::iter::repeat_n(0, zeros).chain(digits.iter().copied()).collect())
    } else if point >= len {
        let zeros = usize::try_from(point - len).unwrap_or(0);
        (digits.iter().copied().chain(std::iter::repeat_n(0, zeros)).collect(), Vec::new())
    } else {
        let at = usize::try_from(point).unwrap_or(0);
        let (integer, fraction) = digits.split_at_checked(at).unwrap_or((digits, &[]));
        (integer.to_vec(), fraction.to_vec())
    }
}

/// Adds one unit in the last place. Returns `false` when the carry runs off the front.
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return true;
        }
    }
    false
}

/// Decimal digits as text.
fn to_text<'a>(digits: impl Iterator<Item = &'a u8>) -> String {
    digits.map(|&d| char::from(b'0' + d)).collect()
}
