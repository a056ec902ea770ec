use std::fmt::{Debug, Display, Formatter};

use chrono::TimeDelta;

use crate::Quantity;

pub type Days = Quantity<0, 1, 0>;

impl Days {
    const SECONDS_PER_DAY: f64 = 86_400.0;
}

impl From<TimeDelta> for Days {
    /// Convert keeping the fractional part of the day.
    fn from(time_delta: TimeDelta) -> Self {
        Self::from(time_delta.as_seconds_f64() / Self::SECONDS_PER_DAY)
    }
}

impl Display for Days {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} days", self.0)
    }
}

impl Debug for Days {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}d", self.0)
    }
}
