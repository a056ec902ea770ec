pub mod cost;
pub mod energy;
pub mod percentage;
pub mod rate;
pub mod time;

use std::ops::{Div, Mul};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

pub use self::{
    cost::Cost,
    energy::{DailyConsumption, KilowattHours},
    percentage::Percentage,
    rate::KilowattHourRate,
    time::Days,
};

/// Physical quantity with its dimension encoded in the exponents of kilowatt-hours,
/// days and the billing currency.
#[derive(
    Clone,
    Copy,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[from(i32, f64, OrderedFloat<f64>)]
#[must_use]
pub struct Quantity<const ENERGY: isize, const TIME: isize, const COST: isize>(
    pub OrderedFloat<f64>,
);

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Quantity<ENERGY, TIME, COST> {
    pub const ZERO: Self = Self(OrderedFloat(0.0));

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.0.0.is_finite()
    }

    /// Strictly below zero, so neither negative zero nor NaN count.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.0 < 0.0
    }

    /// Round half away from zero to the specified number of decimal places.
    pub fn round_to(self, decimals: i32) -> Self {
        let scale = 10_f64.powi(decimals);
        Self(OrderedFloat((self.0.0 * scale).round() / scale))
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Default
    for Quantity<ENERGY, TIME, COST>
{
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Mul<f64>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Div<f64>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}

impl<const ENERGY: isize, const TIME: isize, const COST: isize> Div<Self>
    for Quantity<ENERGY, TIME, COST>
{
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.0.0 / rhs.0.0
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::{Debug, Formatter};

    use approx::assert_abs_diff_eq;

    use super::*;

    pub type Bare = Quantity<0, 0, 0>;

    impl Debug for Bare {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }

    #[test]
    fn test_min() {
        assert_eq!(Bare::from(1).min(Bare::from(2)), Bare::from(1));
        assert_eq!(Bare::from(2).min(Bare::from(1)), Bare::from(1));
    }

    #[test]
    fn test_max() {
        assert_eq!(Bare::from(-120).max(Bare::ZERO), Bare::ZERO);
        assert_eq!(Bare::from(120).max(Bare::ZERO), Bare::from(120));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(Bare::from(265.714_285).round_to(2), Bare::from(265.71));
        assert_eq!(Bare::from(8.5).round_to(0), Bare::from(9));
        assert_eq!(Bare::from(-8.5).round_to(0), Bare::from(-9));
    }

    #[test]
    fn test_ratio() {
        assert_abs_diff_eq!(Bare::from(3) / Bare::from(4), 0.75);
    }

    #[test]
    fn test_sign() {
        assert!(Bare::from(-0.1).is_negative());
        assert!(!Bare::ZERO.is_negative());
        assert!(!Bare::from(-0.0).is_negative());
        assert!(!Bare::from(f64::NAN).is_finite());
    }
}
