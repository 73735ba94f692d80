use regex::Regex;

use crate::model::transaction::{Counterpart, Payment, TransactionDraft, TransactionType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    InvalidFormat,
    InvalidAmount,
}

// Compact transaction grammar, by character position:
//   0     type marker, '*' = buy, '#' = sell
//   1     payment marker, '1' = cash, anything else = due
//   2-3   counterpart id (product for buys, customer for sells)
//   4..   integer amount
pub fn decode(data: &str) -> Result<TransactionDraft, DecodeError> {
    let mut markers = data.chars();

    let tx_type = match markers.next() {
        Some('*') => TransactionType::Buy,
        Some('#') => TransactionType::Sell,
        _ => return Err(DecodeError::InvalidFormat),
    };

    let payment = match markers.next() {
        Some('1') => Payment::Cash,
        Some(_) => Payment::Due,
        None => return Err(DecodeError::InvalidFormat),
    };

    // positions are characters, not bytes; split only on a char boundary so
    // multibyte input cannot panic the slice
    let rest = markers.as_str();
    let id_len = rest.chars().take(2).map(|c| c.len_utf8()).sum::<usize>();
    let (id, amount_part) = rest.split_at(id_len);

    Ok(TransactionDraft {
        counterpart: Counterpart::new(tx_type, String::from(id)),
        payment,
        amount: parse_amount(amount_part)?,
    })
}

fn parse_amount(input: &str) -> Result<i64, DecodeError> {
    // the amount is the longest leading digit run; whatever follows it is
    // ignored, but there must be at least one digit
    let digits = Regex::new(r"^[0-9]+").unwrap();
    let run = digits.find(input).ok_or(DecodeError::InvalidAmount)?;

    run.as_str()
        .parse::<i64>()
        .map_err(|_| DecodeError::InvalidAmount)
}
