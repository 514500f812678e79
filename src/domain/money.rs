use std::fmt;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// One currency unit = 100 cents, so 1,500.50 UGX = 150050 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount with thousands separators.
/// Example: 150050 -> "1,500.50", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    let units = (abs_cents / 100).to_string();
    let remainder = abs_cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{:02}", sign, grouped, remainder)
}

/// Round a fractional cent value (e.g. a regression prediction) to whole cents.
pub fn round_cents(value: f64) -> Cents {
    value.round() as Cents
}

/// Parse a non-negative decimal amount into cents.
/// Thousands separators (`,`, `_`, spaces) are ignored.
/// Example: "50.00" -> 5000, "1,250.5" -> 125050, "100" -> 10000
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let cleaned: String = input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();

    if cleaned.is_empty() {
        return Err(ParseCentsError::Empty);
    }
    if cleaned.starts_with('-') {
        return Err(ParseCentsError::Negative);
    }
    let cleaned = cleaned.trim_start_matches('+');

    let parts: Vec<&str> = cleaned.split('.').collect();
    let (units_str, decimal_str) = match parts.len() {
        1 => (parts[0], ""),
        2 => (parts[0], parts[1]),
        _ => return Err(ParseCentsError::InvalidFormat),
    };
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    // Pad or truncate the fractional part to 2 digits
    let decimal_cents: i64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str.parse::<i64>().map_err(|_| ParseCentsError::InvalidFormat)? * 10,
        _ => decimal_str[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or(ParseCentsError::Overflow)
}

/// Convert a numeric spreadsheet cell into cents.
pub fn cents_from_number(value: f64) -> Result<Cents, ParseCentsError> {
    if !value.is_finite() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if value < 0.0 {
        return Err(ParseCentsError::Negative);
    }
    let cents = (value * 100.0).round();
    if cents > i64::MAX as f64 {
        return Err(ParseCentsError::Overflow);
    }
    Ok(cents as Cents)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    Empty,
    InvalidFormat,
    Negative,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::Empty => write!(f, "amount is empty"),
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::Negative => write!(f, "amount must not be negative"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}

/// Add up amounts, failing instead of wrapping when the sum leaves the `i64` range.
pub fn checked_sum(amounts: impl IntoIterator<Item = Cents>) -> Result<Cents, AmountOverflow> {
    amounts
        .into_iter()
        .try_fold(0 as Cents, |sum, amount| sum.checked_add(amount).ok_or(AmountOverflow))
}

/// A sum of amounts that does not fit in [`Cents`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountOverflow;

impl fmt::Display for AmountOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sum of amounts is too large to represent")
    }
}

impl std::error::Error for AmountOverflow {}
