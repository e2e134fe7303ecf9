//! Platform-fee calculation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use roost_shared::types::Money;

/// Computes the platform fee withheld from a charge.
///
/// The fee is `amount x basis_points / 10,000`, rounded to the nearest
/// minor unit with halves rounding away from zero.
#[must_use]
pub fn platform_fee(amount: Money, fee_basis_points: u32) -> Money {
    let rate = Decimal::new(i64::from(fee_basis_points), 4);
    let fee = (Decimal::from(amount.minor) * rate)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    Money::new(fee.to_i64().unwrap_or(i64::MAX), amount.currency)
}
