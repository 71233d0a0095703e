//! Statement parsers - strategy list turning raw statement text into charges.
//!
//! Each bank export format gets one [`StatementParser`] implementation. The
//! import engine walks [`registry`] in order and uses the first parser that
//! completes without error; a parser that cannot find its expected columns
//! must fail rather than return an empty list so the next variant gets a try.

pub mod bank_csv;
pub mod card_csv;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Error, Result};

pub use bank_csv::BankCsv;
pub use card_csv::CardCsv;

/// One candidate transaction produced by a statement parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Charge {
    /// Signed amount; positive means money leaving the account
    pub amount: Decimal,
    /// Transaction date
    pub date: NaiveDate,
    /// Statement description
    pub description: String,
}

/// Capability shared by all statement parser variants.
pub trait StatementParser: Send + Sync {
    /// Stable identifier recorded on the import row.
    fn name(&self) -> &'static str;

    /// Parses the full statement text into charges, in source order.
    fn parse(&self, text: &str) -> Result<Vec<Charge>>;
}

/// The fixed, priority-ordered list of registered parsers.
#[must_use]
pub fn registry() -> Vec<Box<dyn StatementParser>> {
    vec![Box::new(BankCsv), Box::new(CardCsv)]
}

/// Finds a named column in a CSV header row, failing if it is absent.
pub(crate) fn column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| Error::Parse {
            message: format!("missing column {name:?}"),
        })
}

/// Reads one field out of a (possibly ragged) CSV record.
pub(crate) fn field<'r>(record: &'r csv::StringRecord, index: usize) -> Result<&'r str> {
    record.get(index).ok_or_else(|| Error::Parse {
        message: format!("row too short, no field {index}"),
    })
}

/// Parses a statement amount as an exact decimal.
pub(crate) fn parse_amount(raw: &str) -> Result<Decimal> {
    raw.trim().parse::<Decimal>().map_err(|e| Error::Parse {
        message: format!("bad amount {raw:?}: {e}"),
    })
}

/// Parses a statement date with the given chrono format string.
pub(crate) fn parse_date(raw: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), format).map_err(|e| Error::Parse {
        message: format!("bad date {raw:?}: {e}"),
    })
}
