//! Bank-account CSV statement parser.
//!
//! Format: `Date` (`%m/%d/%Y`), `Description`, `Amount`, with occasional
//! ragged balance rows. Running-balance rows ("Daily Ledger Bal") and
//! not-yet-posted rows ("Pending: ...") are skipped. The export reports
//! deposits as positive, so amounts are negated to match the ledger's
//! money-leaving-the-account convention.

use super::{Charge, StatementParser, column, field, parse_amount, parse_date};
use crate::errors::Result;

/// Parser for the bank-account debit export.
pub struct BankCsv;

impl StatementParser for BankCsv {
    fn name(&self) -> &'static str {
        "bank-csv"
    }

    fn parse(&self, text: &str) -> Result<Vec<Charge>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        let date_idx = column(&headers, "Date")?;
        let description_idx = column(&headers, "Description")?;
        let amount_idx = column(&headers, "Amount")?;

        let mut charges = Vec::new();
        for record in reader.records() {
            let record = record?;
            let description = field(&record, description_idx)?;
            if description == "Daily Ledger Bal" || description.starts_with("Pending:") {
                continue;
            }

            charges.push(Charge {
                amount: -parse_amount(field(&record, amount_idx)?)?,
                date: parse_date(field(&record, date_idx)?, "%m/%d/%Y")?,
                description: description.to_string(),
            });
        }

        Ok(charges)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#""Date","Description","Amount"
01/12/2021,"Pending: BOBS GAS",-20
01/11/2021,"Daily Ledger Bal",,10000.00,,
01/11/2021,"PAYFRIEND",-30
01/11/2021,"WALLSHOP",-62.57
01/10/2021,"MICKEY KING",-4.51"#;

    #[test]
    fn test_skips_pending_and_ledger_balance_rows() {
        let charges = BankCsv.parse(SAMPLE).unwrap();
        assert_eq!(charges.len(), 3);
        assert!(charges.iter().all(|c| !c.description.starts_with("Pending:")));
    }

    #[test]
    fn test_amounts_are_negated() {
        let charges = BankCsv.parse(SAMPLE).unwrap();
        assert_eq!(charges[0].description, "PAYFRIEND");
        assert_eq!(charges[0].amount, dec!(30));
        assert_eq!(charges[1].amount, dec!(62.57));
        assert_eq!(charges[2].amount, dec!(4.51));
    }

    #[test]
    fn test_unpadded_day_parses() {
        let csv = "\"Date\",\"Description\",\"Amount\"\n01/9/2021,\"PAYCHECK\",1000.00";
        let charges = BankCsv.parse(csv).unwrap();
        assert_eq!(charges[0].date, chrono::NaiveDate::from_ymd_opt(2021, 1, 9).unwrap());
        assert_eq!(charges[0].amount, dec!(-1000.00));
    }

    #[test]
    fn test_rejects_foreign_header() {
        let csv = "Transaction Date,Post Date,Transaction Detail,Amount\n2021-01-20,2021-01-20,SUPER SUSHI,10.10";
        assert!(BankCsv.parse(csv).is_err());
    }
}
