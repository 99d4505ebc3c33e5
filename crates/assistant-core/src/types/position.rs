//! Position book entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A long position in a single security, as recorded by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Symbol
    pub symbol: String,
    /// Number of shares held
    pub quantity: Decimal,
    /// Average entry price
    pub avg_price: Decimal,
    /// Time of the last fill applied to this position
    pub updated_at: DateTime<Utc>,
}

impl Position {
    /// Create a new position.
    pub fn new(
        symbol: impl Into<String>,
        quantity: Decimal,
        avg_price: Decimal,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            avg_price,
            updated_at,
        }
    }

    /// Check if the position still holds shares.
    pub fn is_open(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    /// Total cost of the shares held.
    pub fn cost_basis(&self) -> Decimal {
        self.quantity * self.avg_price
    }

    /// Apply a fill to the position.
    ///
    /// A positive `quantity_delta` is a purchase and re-averages the entry
    /// price; a negative one is a sale and keeps the average. Selling down
    /// to zero (or below) flattens the position.
    pub fn apply_fill(&mut self, quantity_delta: Decimal, price: Decimal, at: DateTime<Utc>) {
        if quantity_delta > Decimal::ZERO {
            let new_quantity = self.quantity.max(Decimal::ZERO) + quantity_delta;
            let total_cost = self.quantity.max(Decimal::ZERO) * self.avg_price + quantity_delta * price;
            self.avg_price = total_cost / new_quantity;
            self.quantity = new_quantity;
        } else {
            self.quantity += quantity_delta;
            if self.quantity <= Decimal::ZERO {
                self.quantity = Decimal::ZERO;
                self.avg_price = Decimal::ZERO;
            }
        }
        self.updated_at = at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_reaverages_entry_price() {
        let now = Utc::now();
        let mut position = Position::new("RELIANCE", dec!(10), dec!(100), now);

        position.apply_fill(dec!(10), dec!(110), now);

        assert_eq!(position.quantity, dec!(20));
        assert_eq!(position.avg_price, dec!(105));
        assert_eq!(position.cost_basis(), dec!(2100));
    }

    #[test]
    fn test_partial_sell_keeps_average() {
        let now = Utc::now();
        let mut position = Position::new("RELIANCE", dec!(10), dec!(100), now);

        position.apply_fill(dec!(-4), dec!(120), now);

        assert_eq!(position.quantity, dec!(6));
        assert_eq!(position.avg_price, dec!(100));
        assert!(position.is_open());
    }

    #[test]
    fn test_oversell_flattens() {
        let now = Utc::now();
        let mut position = Position::new("RELIANCE", dec!(10), dec!(100), now);

        position.apply_fill(dec!(-15), dec!(90), now);

        assert_eq!(position.quantity, Decimal::ZERO);
        assert_eq!(position.avg_price, Decimal::ZERO);
        assert!(!position.is_open());
    }
}
