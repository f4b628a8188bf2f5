//! Point scoring rules
//!
//! Seven independent rules, each contributing a non-negative number of
//! points. The score of a receipt is their sum:
//!
//! 1. One point per alphanumeric character in the retailer name
//! 2. 50 points if the total is a round dollar amount
//! 3. 25 points if the total is a multiple of 0.25
//! 4. 5 points for every two items
//! 5. `ceil(price * 0.2)` for each item whose trimmed description length is
//!    a multiple of 3
//! 6. 6 points if the day of the purchase date is odd
//! 7. 10 points if the purchase hour falls in the afternoon window

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Timelike};
use thiserror::Error;

use crate::{Receipt, Result, ValidatedReceipt};

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const DESCRIPTION_PRICE_MULTIPLIER: f64 = 0.2;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const AFTERNOON_START_HOUR: u32 = 14;
const AFTERNOON_END_HOUR: u32 = 16;

/// Upper bound of the afternoon bonus window
///
/// The window always opens at 14:00. `Inclusive` awards the bonus for any
/// time in hour 16 as well; `Exclusive` stops at 16:00.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AfternoonWindow {
    #[default]
    Inclusive,
    Exclusive,
}

impl AfternoonWindow {
    /// Whether a purchase in `hour` earns the afternoon bonus
    pub fn contains(self, hour: u32) -> bool {
        match self {
            Self::Inclusive => (AFTERNOON_START_HOUR..=AFTERNOON_END_HOUR).contains(&hour),
            Self::Exclusive => (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown afternoon window '{0}' (expected 'inclusive' or 'exclusive')")]
pub struct ParseAfternoonWindowError(String);

impl FromStr for AfternoonWindow {
    type Err = ParseAfternoonWindowError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inclusive" => Ok(Self::Inclusive),
            "exclusive" => Ok(Self::Exclusive),
            _ => Err(ParseAfternoonWindowError(s.to_string())),
        }
    }
}

impl fmt::Display for AfternoonWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive => write!(f, "inclusive"),
            Self::Exclusive => write!(f, "exclusive"),
        }
    }
}

/// Points awarded by each rule for a single receipt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    pub fn total(&self) -> u64 {
        [
            self.retailer_name,
            self.round_dollar,
            self.quarter_multiple,
            self.item_pairs,
            self.item_descriptions,
            self.odd_day,
            self.afternoon,
        ]
        .into_iter()
        .fold(0u64, u64::saturating_add)
    }
}

/// Applies the scoring rules to receipts
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    afternoon_window: AfternoonWindow,
}

impl Scorer {
    pub fn new(afternoon_window: AfternoonWindow) -> Self {
        Self { afternoon_window }
    }

    pub fn afternoon_window(&self) -> AfternoonWindow {
        self.afternoon_window
    }

    /// Validate and score a submitted receipt
    pub fn score(&self, receipt: &Receipt) -> Result<u64> {
        let validated = receipt.validate()?;
        Ok(self.breakdown(&validated).total())
    }

    /// Evaluate every rule against an already validated receipt
    pub fn breakdown(&self, receipt: &ValidatedReceipt) -> PointsBreakdown {
        PointsBreakdown {
            retailer_name: retailer_name_points(&receipt.retailer),
            round_dollar: if receipt.total.fract() == 0.0 {
                ROUND_DOLLAR_POINTS
            } else {
                0
            },
            quarter_multiple: if receipt.total % 0.25 == 0.0 {
                QUARTER_MULTIPLE_POINTS
            } else {
                0
            },
            item_pairs: (receipt.items.len() / 2) as u64 * ITEM_PAIR_POINTS,
            item_descriptions: receipt
                .items
                .iter()
                .map(|item| description_points(&item.short_description, item.price))
                .fold(0u64, u64::saturating_add),
            odd_day: if receipt.purchase_date.day() % 2 == 1 {
                ODD_DAY_POINTS
            } else {
                0
            },
            afternoon: if self.afternoon_window.contains(receipt.purchase_time.hour()) {
                AFTERNOON_POINTS
            } else {
                0
            },
        }
    }
}

/// Score a receipt with the default rule configuration
pub fn score(receipt: &Receipt) -> Result<u64> {
    Scorer::default().score(receipt)
}

fn retailer_name_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

fn description_points(description: &str, price: f64) -> u64 {
    let length = description.trim().len();
    if length > 0 && length % 3 == 0 {
        // Saturating float-to-int cast; price is finite and non-negative
        (price * DESCRIPTION_PRICE_MULTIPLIER).ceil() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Item};
    use proptest::prelude::*;

    fn item(description: &str, price: &str) -> Item {
        Item {
            short_description: description.to_string(),
            price: price.to_string(),
        }
    }

    fn receipt_at(
        retailer: &str,
        date: &str,
        time: &str,
        items: Vec<Item>,
        total: &str,
    ) -> Receipt {
        Receipt {
            retailer: retailer.to_string(),
            purchase_date: date.to_string(),
            purchase_time: time.to_string(),
            items,
            total: total.to_string(),
        }
    }

    fn target_receipt() -> Receipt {
        receipt_at(
            "Target",
            "2022-01-01",
            "13:01",
            vec![
                item("Mountain Dew 12PK", "6.49"),
                item("Emils Cheese Pizza", "12.25"),
                item("Knorr Creamy Chicken", "1.26"),
                item("Doritos Nacho Cheese", "3.35"),
                item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
            "35.35",
        )
    }

    fn corner_market_receipt() -> Receipt {
        receipt_at(
            "M&M Corner Market",
            "2022-03-20",
            "14:33",
            vec![
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
            ],
            "9.00",
        )
    }

    fn breakdown_of(receipt: &Receipt) -> PointsBreakdown {
        Scorer::default().breakdown(&receipt.validate().unwrap())
    }

    #[test]
    fn test_target_receipt_scores_28() {
        let receipt = target_receipt();
        assert_eq!(score(&receipt).unwrap(), 28);

        let breakdown = breakdown_of(&receipt);
        assert_eq!(breakdown.retailer_name, 6);
        assert_eq!(breakdown.round_dollar, 0);
        assert_eq!(breakdown.quarter_multiple, 0);
        assert_eq!(breakdown.item_pairs, 10);
        assert_eq!(breakdown.item_descriptions, 6);
        assert_eq!(breakdown.odd_day, 6);
        assert_eq!(breakdown.afternoon, 0);
    }

    #[test]
    fn test_corner_market_receipt_scores_109() {
        let receipt = corner_market_receipt();
        assert_eq!(score(&receipt).unwrap(), 109);

        let breakdown = breakdown_of(&receipt);
        assert_eq!(breakdown.retailer_name, 14);
        assert_eq!(breakdown.round_dollar, 50);
        assert_eq!(breakdown.quarter_multiple, 25);
        assert_eq!(breakdown.item_pairs, 10);
        assert_eq!(breakdown.item_descriptions, 0);
        assert_eq!(breakdown.odd_day, 0);
        assert_eq!(breakdown.afternoon, 10);
    }

    #[test]
    fn test_round_total_earns_both_total_rules() {
        let receipt = receipt_at("", "2022-01-02", "09:00", Vec::new(), "100.00");
        let breakdown = breakdown_of(&receipt);

        assert_eq!(breakdown.round_dollar + breakdown.quarter_multiple, 75);
        assert_eq!(breakdown.total(), 75);
    }

    #[test]
    fn test_quarter_total_is_not_round_dollar() {
        let breakdown = breakdown_of(&receipt_at("", "2022-01-02", "09:00", Vec::new(), "4.75"));

        assert_eq!(breakdown.round_dollar, 0);
        assert_eq!(breakdown.quarter_multiple, 25);
    }

    #[test]
    fn test_item_pairs_use_integer_division() {
        let items = |n: usize| (0..n).map(|_| item("ab", "1.00")).collect::<Vec<_>>();

        for (count, expected) in [(0, 0), (1, 0), (2, 5), (4, 10), (5, 10)] {
            let receipt = receipt_at("", "2022-01-02", "09:00", items(count), "1.10");
            assert_eq!(breakdown_of(&receipt).item_pairs, expected, "{} items", count);
        }
    }

    #[test]
    fn test_description_price_always_rounds_up() {
        assert_eq!(description_points("abc", 1.0), 1);
        assert_eq!(description_points("abc", 5.0), 1);
        assert_eq!(description_points("abc", 5.01), 2);
        assert_eq!(description_points("abc", 0.0), 0);
    }

    #[test]
    fn test_description_length_is_trimmed_and_positive() {
        assert_eq!(description_points("  abc  ", 10.0), 2);
        assert_eq!(description_points("abcd", 10.0), 0);
        assert_eq!(description_points("   ", 10.0), 0);
        assert_eq!(description_points("", 10.0), 0);
    }

    #[test]
    fn test_retailer_ignores_non_alphanumeric() {
        assert_eq!(retailer_name_points("M&M Corner Market"), 14);
        assert_eq!(retailer_name_points("7-Eleven #42"), 9);
        assert_eq!(retailer_name_points("  & - !"), 0);
    }

    #[test]
    fn test_odd_day_bonus() {
        let odd = receipt_at("", "2022-01-31", "09:00", Vec::new(), "1.10");
        let even = receipt_at("", "2022-01-30", "09:00", Vec::new(), "1.10");

        assert_eq!(breakdown_of(&odd).odd_day, 6);
        assert_eq!(breakdown_of(&even).odd_day, 0);
    }

    #[test]
    fn test_afternoon_window_inclusive_bounds() {
        let window = AfternoonWindow::Inclusive;

        assert!(!window.contains(13));
        assert!(window.contains(14));
        assert!(window.contains(15));
        assert!(window.contains(16));
        assert!(!window.contains(17));
    }

    #[test]
    fn test_afternoon_window_exclusive_bounds() {
        let window = AfternoonWindow::Exclusive;

        assert!(!window.contains(13));
        assert!(window.contains(14));
        assert!(window.contains(15));
        assert!(!window.contains(16));
    }

    #[test]
    fn test_sixteen_hundred_depends_on_window() {
        let receipt = receipt_at("", "2022-01-02", "16:00", Vec::new(), "1.10");

        let inclusive = Scorer::new(AfternoonWindow::Inclusive).score(&receipt).unwrap();
        let exclusive = Scorer::new(AfternoonWindow::Exclusive).score(&receipt).unwrap();

        assert_eq!(inclusive, 10);
        assert_eq!(exclusive, 0);
    }

    #[test]
    fn test_minutes_are_ignored_for_afternoon_bonus() {
        let receipt = receipt_at("", "2022-01-02", "15:59", Vec::new(), "1.10");
        let exclusive = Scorer::new(AfternoonWindow::Exclusive);

        assert_eq!(exclusive.score(&receipt).unwrap(), 10);
    }

    #[test]
    fn test_invalid_price_fails_instead_of_scoring_zero() {
        let mut receipt = target_receipt();
        receipt.items[1].price = "twelve".to_string();

        let err = score(&receipt).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_parse_afternoon_window() {
        assert_eq!("inclusive".parse::<AfternoonWindow>().unwrap(), AfternoonWindow::Inclusive);
        assert_eq!(" Exclusive ".parse::<AfternoonWindow>().unwrap(), AfternoonWindow::Exclusive);
        assert!("sometimes".parse::<AfternoonWindow>().is_err());
        assert_eq!(AfternoonWindow::Exclusive.to_string(), "exclusive");
    }

    fn amount(cents: u32) -> String {
        format!("{}.{:02}", cents / 100, cents % 100)
    }

    fn arb_receipt() -> impl Strategy<Value = Receipt> {
        (
            "[a-zA-Z0-9 &'-]{0,30}",
            (2000i32..2030, 1u32..=12, 1u32..=28),
            (0u32..24, 0u32..60),
            prop::collection::vec(("[ a-zA-Z0-9-]{0,24}", 0u32..1_000_000), 0..12),
            0u32..10_000_000,
        )
            .prop_map(|(retailer, (y, m, d), (hh, mm), items, total)| Receipt {
                retailer,
                purchase_date: format!("{:04}-{:02}-{:02}", y, m, d),
                purchase_time: format!("{:02}:{:02}", hh, mm),
                items: items
                    .into_iter()
                    .map(|(description, cents)| item(&description, &amount(cents)))
                    .collect(),
                total: amount(total),
            })
    }

    proptest! {
        #[test]
        fn well_formed_receipts_always_score(receipt in arb_receipt()) {
            let total = score(&receipt).unwrap();
            prop_assert_eq!(total, breakdown_of(&receipt).total());
        }

        #[test]
        fn alphabetic_retailer_scores_its_length(name in "[a-zA-Z]{1,40}") {
            let receipt = receipt_at(&name, "2022-01-02", "09:00", Vec::new(), "1.10");
            prop_assert_eq!(breakdown_of(&receipt).retailer_name, name.len() as u64);
        }

        #[test]
        fn exclusive_window_never_exceeds_inclusive(receipt in arb_receipt()) {
            let inclusive = Scorer::new(AfternoonWindow::Inclusive).score(&receipt).unwrap();
            let exclusive = Scorer::new(AfternoonWindow::Exclusive).score(&receipt).unwrap();
            prop_assert!(exclusive <= inclusive);
        }
    }
}
