use std::{
    fmt::{Debug, Display, Formatter},
    ops::{Div, Mul},
};

use crate::{Cost, Days, KilowattHourRate, Quantity};

/// Energy, also used for cumulative meter values.
pub type KilowattHours = Quantity<1, 0, 0>;

/// Average energy use per day.
pub type DailyConsumption = Quantity<1, -1, 0>;

impl Mul<KilowattHourRate> for KilowattHours {
    type Output = Cost;

    fn mul(self, rhs: KilowattHourRate) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Div<Days> for KilowattHours {
    type Output = DailyConsumption;

    fn div(self, rhs: Days) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

impl Mul<Days> for DailyConsumption {
    type Output = KilowattHours;

    fn mul(self, rhs: Days) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.0)
    }
}

impl Debug for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}kWh", self.0)
    }
}

impl Display for DailyConsumption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh/day", self.0)
    }
}

impl Debug for DailyConsumption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}kWh/d", self.0)
    }
}
