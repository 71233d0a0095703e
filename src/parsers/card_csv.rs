//! Credit-card CSV statement parser.
//!
//! Format: `Transaction Date` (`%Y-%m-%d`), `Transaction Detail`, `Amount`.
//! Card exports already report purchases as positive (money leaving), so
//! amounts are taken as-is.

use super::{Charge, StatementParser, column, field, parse_amount, parse_date};
use crate::errors::Result;

/// Parser for the credit-card export.
pub struct CardCsv;

impl StatementParser for CardCsv {
    fn name(&self) -> &'static str {
        "card-csv"
    }

    fn parse(&self, text: &str) -> Result<Vec<Charge>> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        let date_idx = column(&headers, "Transaction Date")?;
        let detail_idx = column(&headers, "Transaction Detail")?;
        let amount_idx = column(&headers, "Amount")?;

        let mut charges = Vec::new();
        for record in reader.records() {
            let record = record?;
            charges.push(Charge {
                amount: parse_amount(field(&record, amount_idx)?)?,
                date: parse_date(field(&record, date_idx)?, "%Y-%m-%d")?,
                description: field(&record, detail_idx)?.to_string(),
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

    const SAMPLE: &str = "Transaction Date,Post Date,Transaction Detail,Amount
2021-01-20,2021-01-20,SUPER SUSHI,10.10
2021-01-19,2021-01-20,WAYOUT,300.20
2021-01-19,2021-01-20,ZAXDEE,8.30
2021-01-22,2021-01-22,GROVERS GROCERY,35.50
2021-02-04,2021-02-04,PAYMENT,-354.10";

    #[test]
    fn test_parses_all_rows_in_order() {
        let charges = CardCsv.parse(SAMPLE).unwrap();
        assert_eq!(charges.len(), 5);
        assert_eq!(charges[0].description, "SUPER SUSHI");
        assert_eq!(charges[0].amount, dec!(10.10));
        assert_eq!(charges[4].amount, dec!(-354.10));
    }

    #[test]
    fn test_rejects_foreign_header() {
        let csv = "\"Date\",\"Description\",\"Amount\"\n01/10/2021,\"MICKEY KING\",-4.51";
        assert!(CardCsv.parse(csv).is_err());
    }
}
