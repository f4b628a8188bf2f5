use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Purchase date layout, e.g. `2022-01-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Purchase time layout on a 24-hour clock, e.g. `13:01`
pub const TIME_FORMAT: &str = "%H:%M";

/// A receipt exactly as it was submitted
///
/// All fields keep their submitted text; the identifier is derived from
/// that text, so nothing here is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    pub purchase_date: String,
    pub purchase_time: String,
    #[serde(default)]
    pub items: Vec<Item>,
    pub total: String,
}

/// One line entry on a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: String,
}

/// A receipt whose date, time and amounts have all been parsed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedReceipt {
    pub retailer: String,
    pub purchase_date: NaiveDate,
    pub purchase_time: NaiveTime,
    pub items: Vec<ValidatedItem>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedItem {
    pub short_description: String,
    pub price: f64,
}

impl Receipt {
    /// Parse every field the scoring rules depend on
    ///
    /// Fails on the first malformed field; the error names that field and
    /// the rejected value.
    pub fn validate(&self) -> Result<ValidatedReceipt> {
        let purchase_date = parse_purchase_date(&self.purchase_date)?;
        let purchase_time = parse_purchase_time(&self.purchase_time)?;

        let total = parse_amount("total", &self.total)?;

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Ok(ValidatedItem {
                    short_description: item.short_description.clone(),
                    price: parse_amount(&format!("items[{}].price", index), &item.price)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ValidatedReceipt {
            retailer: self.retailer.clone(),
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }

    /// Identifier this receipt is stored under
    pub fn id(&self) -> String {
        crate::id::receipt_id(self)
    }
}

fn parse_purchase_date(raw: &str) -> Result<NaiveDate> {
    let invalid = |detail: String| {
        Error::validation(
            "purchaseDate",
            format!("'{}' is not a YYYY-MM-DD date ({})", raw, detail),
        )
    };

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| invalid(e.to_string()))?;

    // chrono accepts unpadded fields, short years and a leading sign
    if date.format(DATE_FORMAT).to_string() != raw {
        return Err(invalid("expected zero-padded fields".to_string()));
    }

    Ok(date)
}

fn parse_purchase_time(raw: &str) -> Result<NaiveTime> {
    let invalid = |detail: String| {
        Error::validation(
            "purchaseTime",
            format!("'{}' is not an HH:MM time ({})", raw, detail),
        )
    };

    let time = NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|e| invalid(e.to_string()))?;

    // The hour may be a single digit, the minutes never
    if time.format("%H:%M").to_string() != raw && time.format("%-H:%M").to_string() != raw {
        return Err(invalid("expected two-digit minutes".to_string()));
    }

    Ok(time)
}

/// Parse a decimal currency string into a finite amount
///
/// Negative amounts are rejected so that every rule, and the score, stays
/// non-negative.
fn parse_amount(field: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|e| {
        Error::validation(field, format!("'{}' is not a decimal amount ({})", raw, e))
    })?;

    if !value.is_finite() {
        return Err(Error::validation(
            field,
            format!("'{}' is not a finite amount", raw),
        ));
    }

    if value < 0.0 {
        return Err(Error::validation(
            field,
            format!("'{}' must not be negative", raw),
        ));
    }

    Ok(value)
}
