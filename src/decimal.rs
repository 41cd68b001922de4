//! Exact fixed-precision decimal arithmetic for prices and quantities.
//!
//! The matching engine never touches binary floating-point: every price and
//! quantity comparison, addition, subtraction, and minimum is performed with
//! [`rust_decimal::Decimal`], which carries a 96-bit mantissa and an exact
//! base-10 scale, comfortably covering the 18 significant digits exchange-grade
//! instruments need.

/// The decimal type used throughout the engine for prices and quantities.
pub use rust_decimal::Decimal;

/// Returns `true` if `value` is strictly greater than zero.
///
/// Used at admission boundaries: order quantity on submission, and price
/// for `LIMIT`/`IOC`/`FOK` orders (§3, §4.6).
#[must_use]
pub fn is_positive(value: Decimal) -> bool {
    value.is_sign_positive() && !value.is_zero()
}
