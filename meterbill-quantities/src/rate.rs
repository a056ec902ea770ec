use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::{Cost, KilowattHours, Quantity};

/// Currency per kilowatt-hour.
pub type KilowattHourRate = Quantity<-1, 0, 1>;

impl Mul<KilowattHours> for KilowattHourRate {
    type Output = Cost;

    fn mul(self, rhs: KilowattHours) -> Self::Output {
        rhs * self
    }
}

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R$ {:.5}/kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "R${:.5}/kWh", self.0)
    }
}
