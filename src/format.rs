//! Conversions between stored values and their fixed pt-BR display forms:
//! amounts with thousands `.` and decimal `,`, dates as `DD/MM/YYYY`, and the
//! title casing applied to entity names.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// How dates are shown to the operator.
const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

/// How dates are stored and submitted by the transaction form.
const DATE_ISO_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Render an amount with thousands separator `.` and decimal separator `,`,
/// always with exactly two decimal places, e.g. `1234.5` becomes `"1.234,50"`.
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };

    format!("{sign}{grouped},{fraction:02}")
}

/// Parse an amount from the fixed display convention: strip the thousands
/// separator `.`, swap the decimal separator `,` for `.`, then parse as a
/// float.
///
/// # Errors
/// Returns [Error::InvalidAmount] when the text is not a number after
/// normalization.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    let normalized = text.trim().replace('.', "").replace(',', ".");

    normalized
        .parse()
        .map_err(|_| Error::InvalidAmount(text.to_owned()))
}

/// Render a date as `DD/MM/YYYY`.
///
/// Falls back to the ISO form if formatting fails, so rendering a page never
/// dies over a date.
pub fn format_date(date: Date) -> String {
    date.format(DATE_DISPLAY_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Parse an ISO `YYYY-MM-DD` date, as submitted by the form's date input.
///
/// # Errors
/// Returns [Error::InvalidDate] when the text is not a valid calendar date.
pub fn parse_iso_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_ISO_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// Trim `text` and uppercase the first letter of each word, lowercasing the
/// rest, e.g. `" joão silva "` becomes `"João Silva"`.
pub fn title_case(text: &str) -> String {
    text.trim()
        .split_word_bounds()
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(characters.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect()
}



#[cfg(test)]
mod title_case_tests {
    use super::title_case;

    #[test]
    fn trims_and_capitalizes_each_word() {
        assert_eq!(title_case(" joão silva "), "João Silva");
        assert_eq!(title_case("ALUGUEL DO GALPÃO"), "Aluguel Do Galpão");
    }

    #[test]
    fn leaves_empty_input_empty() {
        assert_eq!(title_case("   "), "");
    }
}
