use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::{Percentage, Quantity};

/// Amount of money in the billing currency.
pub type Cost = Quantity<0, 0, 1>;

impl Cost {
    pub fn round_to_cents(self) -> Self {
        self.round_to(2)
    }
}

impl Mul<Percentage> for Cost {
    type Output = Self;

    fn mul(self, percentage: Percentage) -> Self::Output {
        self * percentage.to_proportion()
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R$ {:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R${:.4}", self.0)
    }
}
