use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for display (prices, report amounts)
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Percent-change magnitude (in percent) at or above which the valuation
/// job raises an alert notification, for both single assets and whole
/// portfolios.
pub const CHANGE_ALERT_THRESHOLD_PCT: Decimal = dec!(5);
