//! # Swap Form
//!
//! UI-agnostic state machine behind the "Sell / Buy" token swap form.
//!
//! ## State and Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         SwapForm                                        │
//! │                                                                         │
//! │   ┌──────────────────────┐                ┌──────────────────────┐     │
//! │   │ from ("Sell")        │   price ratio  │ to ("Buy")           │     │
//! │   │ currency: ETH        │ ◄────────────► │ currency: USDC       │     │
//! │   │ amount:   "10"       │                │ amount:   "20000.000"│     │
//! │   └──────────────────────┘                └──────────────────────┘     │
//! │                                                                         │
//! │  edit_amount(From, "10")  → to.amount   = 10 × p(from) / p(to)         │
//! │  edit_amount(To, "5")     → from.amount = 5 × p(to) / p(from)          │
//! │  select_currency(..)      → no recalculation                           │
//! │  swap_sides()             → both currencies AND amounts exchanged      │
//! │  submit()                 → no side effect, returns the state          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prices
//! The feed can carry several rows per currency. Only the newest row counts;
//! a currency missing from the feed is priced at 1.0.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::format::{format_large_number, to_fixed};
use crate::types::PriceRow;
use crate::validation::{validate_amount_input, ValidationResult};
use crate::{DEFAULT_FROM_CURRENCY, DEFAULT_TO_CURRENCY};

/// Decimal places of a recalculated amount.
const RECALC_DECIMALS: usize = 3;

// =============================================================================
// Side / Slot
// =============================================================================

/// Which half of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Side {
    /// The currency being sold.
    From,
    /// The currency being bought.
    To,
}

impl Side {
    /// Label shown above the input.
    pub fn label(&self) -> &'static str {
        match self {
            Side::From => "Sell",
            Side::To => "Buy",
        }
    }

    /// The other side.
    pub fn opposite(&self) -> Side {
        match self {
            Side::From => Side::To,
            Side::To => Side::From,
        }
    }
}

/// One (currency, amount) pair.
///
/// `amount` is the raw text of the input: digits with at most one decimal
/// point, or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SwapSlot {
    pub currency: String,
    pub amount: String,
}

impl SwapSlot {
    fn new(currency: impl Into<String>) -> Self {
        SwapSlot {
            currency: currency.into(),
            amount: String::new(),
        }
    }
}

/// Both slots, as returned by [`SwapForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SwapState {
    pub from: SwapSlot,
    pub to: SwapSlot,
}

// =============================================================================
// Price Normalization
// =============================================================================

/// Keeps the newest row per currency, in order of first appearance.
///
/// On equal dates the earlier row wins.
///
/// ## Example
/// ```text
/// [ETH@09:00 1600, USDC@09:00 1, ETH@10:00 1650]
///      │
///      ▼
/// [ETH@10:00 1650, USDC@09:00 1]
/// ```
pub fn latest_prices(rows: &[PriceRow]) -> Vec<PriceRow> {
    let mut latest: Vec<PriceRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        match index.get(row.currency.as_str()) {
            Some(&i) => {
                if row.date > latest[i].date {
                    latest[i] = row.clone();
                }
            }
            None => {
                index.insert(row.currency.as_str(), latest.len());
                latest.push(row.clone());
            }
        }
    }

    latest
}

// =============================================================================
// Swap Form
// =============================================================================

/// The swap form's state machine.
///
/// ## Usage
/// ```rust
/// use chrono::Utc;
/// use swapdesk_core::{PriceRow, Side, SwapForm};
///
/// let rows = vec![
///     PriceRow { currency: "ETH".into(), date: Utc::now(), price: 2000.0 },
///     PriceRow { currency: "USDC".into(), date: Utc::now(), price: 1.0 },
/// ];
/// let mut form = SwapForm::new(&rows);
///
/// form.edit_amount(Side::From, "10").unwrap();
/// assert_eq!(form.slot(Side::To).amount, "20000.000");
/// ```
#[derive(Debug, Clone)]
pub struct SwapForm {
    currencies: Vec<PriceRow>,
    state: SwapState,
}

impl SwapForm {
    /// Creates a form preselecting ETH → USDC.
    pub fn new(rows: &[PriceRow]) -> Self {
        SwapForm::with_currencies(rows, DEFAULT_FROM_CURRENCY, DEFAULT_TO_CURRENCY)
    }

    /// Creates a form with explicit starting currencies.
    pub fn with_currencies(
        rows: &[PriceRow],
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        SwapForm {
            currencies: latest_prices(rows),
            state: SwapState {
                from: SwapSlot::new(from),
                to: SwapSlot::new(to),
            },
        }
    }

    /// Currencies offered by the pickers (newest price each).
    pub fn currencies(&self) -> &[PriceRow] {
        &self.currencies
    }

    /// Current state of one side.
    pub fn slot(&self, side: Side) -> &SwapSlot {
        match side {
            Side::From => &self.state.from,
            Side::To => &self.state.to,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut SwapSlot {
        match side {
            Side::From => &mut self.state.from,
            Side::To => &mut self.state.to,
        }
    }

    /// Price of a currency, 1.0 when the feed has none.
    pub fn price_of(&self, currency: &str) -> f64 {
        self.currencies
            .iter()
            .find(|row| row.currency == currency)
            .map(|row| row.price)
            .unwrap_or(1.0)
    }

    /// Price of the currency currently selected on `side`.
    pub fn price(&self, side: Side) -> f64 {
        self.price_of(&self.slot(side).currency)
    }

    /// Handles a keystroke in one amount input.
    ///
    /// Rejected text leaves the whole form untouched. Accepted text is stored
    /// and the opposite amount is recalculated from the price ratio.
    pub fn edit_amount(&mut self, side: Side, input: &str) -> ValidationResult<()> {
        validate_amount_input(input)?;

        self.slot_mut(side).amount = input.to_string();
        let recalculated = self.convert(side, input);
        self.slot_mut(side.opposite()).amount = recalculated;

        Ok(())
    }

    /// Converts an amount on `side` into the opposite currency.
    ///
    /// Empty or unparseable text (".") and non-finite results clear the
    /// opposite field.
    fn convert(&self, side: Side, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let value = match input.parse::<f64>() {
            Ok(value) => value,
            Err(_) => return String::new(),
        };

        let result = value * self.price(side) / self.price(side.opposite());
        if !result.is_finite() {
            return String::new();
        }

        to_fixed(result, RECALC_DECIMALS)
    }

    /// Picks a currency. Amounts stay as they are until the next edit.
    pub fn select_currency(&mut self, side: Side, currency: impl Into<String>) {
        self.slot_mut(side).currency = currency.into();
    }

    /// Exchanges both currencies and both amounts in one step.
    pub fn swap_sides(&mut self) {
        let SwapState { from, to } = &mut self.state;
        std::mem::swap(from, to);
    }

    /// USD value shown under an input, without the `$` prefix.
    pub fn usd_value(&self, side: Side) -> String {
        let amount = &self.slot(side).amount;
        if amount.is_empty() {
            return "0.00".to_string();
        }

        let value = amount.parse::<f64>().unwrap_or(f64::NAN);
        format_large_number(value * self.price(side))
    }

    /// Placeholder submit: no side effect, returns the current state.
    pub fn submit(&self) -> SwapState {
        self.state.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(currency: &str, hour: u32, price: f64) -> PriceRow {
        PriceRow {
            currency: currency.to_string(),
            date: Utc.with_ymd_and_hms(2023, 8, 29, hour, 0, 0).unwrap(),
            price,
        }
    }

    fn eth_usdc_form() -> SwapForm {
        SwapForm::new(&[row("ETH", 7, 2000.0), row("USDC", 7, 1.0)])
    }

    #[test]
    fn test_edit_from_recalculates_to() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "10").unwrap();

        assert_eq!(form.slot(Side::From).amount, "10");
        assert_eq!(form.slot(Side::To).amount, "20000.000");
    }

    #[test]
    fn test_edit_to_recalculates_from() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::To, "500").unwrap();

        assert_eq!(form.slot(Side::From).amount, "0.250");
    }

    #[test]
    fn test_halfway_amount_rounds_up() {
        let rows = [row("USDC", 7, 1.0), row("BUSD", 7, 1.0)];
        let mut form = SwapForm::with_currencies(&rows, "USDC", "BUSD");
        form.edit_amount(Side::From, "0.0625").unwrap();

        assert_eq!(form.slot(Side::To).amount, "0.063");
    }

    #[test]
    fn test_swap_sides_exchanges_everything() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "10").unwrap();
        form.swap_sides();

        let state = form.submit();
        assert_eq!(state.from.currency, "USDC");
        assert_eq!(state.from.amount, "20000.000");
        assert_eq!(state.to.currency, "ETH");
        assert_eq!(state.to.amount, "10");
    }

    #[test]
    fn test_select_currency_does_not_recalculate() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "10").unwrap();
        form.select_currency(Side::To, "BTC");

        assert_eq!(form.slot(Side::To).currency, "BTC");
        assert_eq!(form.slot(Side::To).amount, "20000.000");
    }

    #[test]
    fn test_rejected_input_leaves_state() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "10").unwrap();
        let before = form.submit();

        assert!(form.edit_amount(Side::From, "1.2.3").is_err());
        assert!(form.edit_amount(Side::From, "abc").is_err());
        assert_eq!(form.submit(), before);
    }

    #[test]
    fn test_empty_or_bare_point_clears_other_side() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "10").unwrap();

        form.edit_amount(Side::From, "").unwrap();
        assert_eq!(form.slot(Side::To).amount, "");

        form.edit_amount(Side::From, ".").unwrap();
        assert_eq!(form.slot(Side::From).amount, ".");
        assert_eq!(form.slot(Side::To).amount, "");
    }

    #[test]
    fn test_trailing_point_is_a_number() {
        let mut form = eth_usdc_form();
        form.edit_amount(Side::From, "2.").unwrap();
        assert_eq!(form.slot(Side::To).amount, "4000.000");
    }

    #[test]
    fn test_unknown_currency_priced_at_one() {
        let mut form = SwapForm::with_currencies(&[row("ETH", 7, 2000.0)], "ETH", "NOPE");
        assert_eq!(form.price(Side::To), 1.0);

        form.edit_amount(Side::From, "1").unwrap();
        assert_eq!(form.slot(Side::To).amount, "2000.000");
    }

    #[test]
    fn test_zero_price_clears_instead_of_infinity() {
        let mut form = SwapForm::new(&[row("ETH", 7, 0.0), row("USDC", 7, 1.0)]);
        form.edit_amount(Side::To, "5").unwrap();
        assert_eq!(form.slot(Side::From).amount, "");
    }

    #[test]
    fn test_latest_prices_keeps_newest_in_first_seen_order() {
        let rows = vec![
            row("ETH", 7, 1600.0),
            row("USDC", 7, 1.0),
            row("ETH", 9, 1650.0),
            row("ETH", 8, 1625.0),
        ];
        let latest = latest_prices(&rows);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest[0].currency, "ETH");
        assert_eq!(latest[0].price, 1650.0);
        assert_eq!(latest[1].currency, "USDC");
    }

    #[test]
    fn test_latest_prices_tie_keeps_first() {
        let rows = vec![row("ETH", 7, 1600.0), row("ETH", 7, 9999.0)];
        assert_eq!(latest_prices(&rows)[0].price, 1600.0);
    }

    #[test]
    fn test_usd_value() {
        let mut form = eth_usdc_form();
        assert_eq!(form.usd_value(Side::From), "0.00");

        form.edit_amount(Side::From, "750").unwrap();
        assert_eq!(form.usd_value(Side::From), "1.50M");
        assert_eq!(form.usd_value(Side::To), "1.50M");
    }

    #[test]
    fn test_side_labels() {
        assert_eq!(Side::From.label(), "Sell");
        assert_eq!(Side::To.label(), "Buy");
        assert_eq!(Side::From.opposite(), Side::To);
    }
}
