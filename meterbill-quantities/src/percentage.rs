use std::fmt::{Debug, Display, Formatter};

use serde::{Deserialize, Serialize};

#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::From,
    derive_more::FromStr,
)]
pub struct Percentage(pub f64);

impl Percentage {
    #[must_use]
    pub const fn to_proportion(self) -> f64 {
        self.0 / 100.0
    }
}

impl Display for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Debug for Percentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
