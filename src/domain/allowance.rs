use crate::error::{PayrollError, Result};
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places monetary allowance values are rounded to.
pub const MONEY_SCALE: u32 = 2;

/// Largest annual salary a record may carry: 1 000 000 000 000 000.
pub const MAX_ANNUAL_SALARY: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Computes the monthly allowance an employee is entitled to.
///
/// The percentage share of the annual salary is rounded half-up to two decimal
/// places first, and the monthly twelfth of that share is rounded half-up again.
/// Both rounding steps are observable: collapsing them into a single division can
/// produce a different cent value.
///
/// The result always carries a scale of two, so `300` is returned as `300.00`.
/// Amounts too large for `Decimal` are reported as `PayrollError::ValidationError`.
pub fn monthly_allowance(annual_salary: Decimal, allowance_percentage: Decimal) -> Result<Decimal> {
    let yearly = annual_salary
        .checked_mul(allowance_percentage)
        .and_then(|share| share.checked_div(HUNDRED))
        .ok_or_else(|| out_of_range(annual_salary, allowance_percentage))?;
    let monthly = round_half_up(yearly)
        .checked_div(MONTHS_PER_YEAR)
        .ok_or_else(|| out_of_range(annual_salary, allowance_percentage))?;
    Ok(round_half_up(monthly))
}

fn out_of_range(annual_salary: Decimal, allowance_percentage: Decimal) -> PayrollError {
    PayrollError::ValidationError(format!(
        "allowance of {}% on {} is out of range",
        allowance_percentage, annual_salary
    ))
}

fn round_half_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // round_dp never widens the scale; pad so every amount reads as cents.
    rounded.rescale(MONEY_SCALE);
    rounded
}
