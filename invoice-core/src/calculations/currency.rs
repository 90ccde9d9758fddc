use rust_decimal::Decimal;

use super::common::round_half_up;
use crate::CurrencySymbol;

/// Renders `amount` as `<symbol><amount to 2 decimals>`.
///
/// No thousands grouping and no locale rules. A value that rounds to zero
/// is always shown unsigned.
///
/// ```
/// use rust_decimal_macros::dec;
/// use invoice_core::CurrencySymbol;
/// use invoice_core::calculations::format_currency;
///
/// assert_eq!(format_currency(dec!(31), CurrencySymbol::new('$')), "$31.00");
/// assert_eq!(format_currency(dec!(1234.5), CurrencySymbol::new('৳')), "৳1234.50");
/// ```
pub fn format_currency(
    amount: Decimal,
    symbol: CurrencySymbol,
) -> String {
    let rounded = round_half_up(amount);
    // At most two fractional digits after rounding, and any 96-bit mantissa
    // times 100 fits in an i128.
    let cents = rounded.mantissa() * 10_i128.pow(2 - rounded.scale().min(2));
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{symbol}{sign}{}.{:02}", cents / 100, cents % 100)
}
