//! Amount-in-words rendering using the Indian numbering system.
//!
//! Amounts are split into rupees and paise and the rupee part is grouped as
//! crore (1,00,00,000), lakh (1,00,000), thousand and a final 0-999
//! remainder, most significant first:
//!
//! | Amount        | Words |
//! |---------------|-------|
//! | `100`         | One Hundred Rupees Only |
//! | `1000000`     | Ten Lakh Rupees Only |
//! | `10000000`    | One Crore Rupees Only |
//! | `1234567.89`  | Twelve Lakh Thirty Four Thousand Five Hundred Sixty Seven Rupees and Eighty Nine Paise Only |
//!
//! An amount whose rupee part is zero always renders as `Zero Rupees Only`,
//! even when it carries paise.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use invoice_core::calculations::to_words;
//!
//! assert_eq!(to_words(dec!(1500.75)).unwrap(),
//!     "One Thousand Five Hundred Rupees and Seventy Five Paise Only");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_half_up;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// The crore group is rendered by the 0-999 routine, capping the rupee part
/// at 999,99,99,999.
pub const MAX_RUPEES: u64 = 9_999_999_999;

/// Errors that can occur while rendering an amount in words.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WordsError {
    /// The rupee part needs a place value above crore.
    #[error("amount {0} exceeds the largest amount that can be written in words")]
    AmountOverflow(Decimal),
}

/// Renders `amount` as English words in Indian numbering.
///
/// The amount is first rounded half-up to two places; the rupee and paise
/// parts are then read from its fixed two-decimal text form.
///
/// Negative amounts (possible when a fixed discount exceeds the subtotal)
/// are rendered as their absolute value prefixed with `Minus`.
///
/// # Errors
///
/// Returns [`WordsError::AmountOverflow`] when the rupee part exceeds
/// [`MAX_RUPEES`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::calculations::to_words;
///
/// assert_eq!(to_words(dec!(0)).unwrap(), "Zero Rupees Only");
/// assert_eq!(to_words(dec!(100000)).unwrap(), "One Lakh Rupees Only");
/// ```
pub fn to_words(amount: Decimal) -> Result<String, WordsError> {
    let mut fixed = round_half_up(amount.abs());
    fixed.rescale(2);

    let text = fixed.to_string();
    let (rupee_text, paise_text) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let rupees: u64 = rupee_text
        .parse()
        .ok()
        .filter(|rupees| *rupees <= MAX_RUPEES)
        .ok_or(WordsError::AmountOverflow(amount))?;
    let paise: u64 = paise_text
        .parse()
        .map_err(|_| WordsError::AmountOverflow(amount))?;

    if rupees == 0 {
        if paise > 0 {
            warn!(amount = %amount, paise, "amount below one rupee; paise omitted from words");
        }
        return Ok("Zero Rupees Only".to_string());
    }

    let mut words = String::new();
    if amount.is_sign_negative() {
        words.push_str("Minus ");
    }
    words.push_str(&rupee_words(rupees));
    words.push_str(" Rupees");

    if paise > 0 {
        words.push_str(" and ");
        words.push_str(&collapse_whitespace(&below_thousand(paise)));
        words.push_str(" Paise");
    }

    words.push_str(" Only");
    Ok(words)
}

/// Words for a whole rupee count in `1..=9_999_999_999`.
fn rupee_words(rupees: u64) -> String {
    let groups = [
        (rupees / CRORE, "Crore"),
        ((rupees / LAKH) % 100, "Lakh"),
        ((rupees / THOUSAND) % 100, "Thousand"),
        (rupees % THOUSAND, ""),
    ];

    let mut words = String::new();
    for (count, place) in groups {
        if count == 0 {
            continue;
        }
        words.push_str(&below_thousand(count));
        words.push(' ');
        words.push_str(place);
        words.push(' ');
    }

    collapse_whitespace(&words)
}

/// Words for `0..=999`. May carry stray spaces; callers collapse them.
fn below_thousand(n: u64) -> String {
    let hundreds = (n / 100) as usize;
    let rest = (n % 100) as usize;

    let mut words = String::new();
    if hundreds > 0 {
        words.push_str(ONES[hundreds]);
        words.push_str(" Hundred ");
    }

    if (10..20).contains(&rest) {
        words.push_str(TEENS[rest - 10]);
    } else if rest >= 20 {
        words.push_str(TENS[rest / 10]);
        words.push(' ');
        words.push_str(ONES[rest % 10]);
    } else {
        words.push_str(ONES[rest]);
    }

    words
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
