use std::iter;

use bon::Builder;
use meterbill_quantities::{Cost, KilowattHourRate, Percentage};
use serde::{Deserialize, Serialize};

/// Rate structure in effect for a billing calculation.
///
/// Rates are not validated here: negative or non-finite values simply propagate
/// through the calculations.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
pub struct TariffConfig {
    /// Distribution system usage («TUSD»).
    pub tusd: ComponentTariff,

    /// Energy («TE»).
    pub te: ComponentTariff,

    pub flag: FlagSurcharge,

    pub public_lighting: PublicLighting,
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
pub struct ComponentTariff {
    /// Billed rate, taxes included.
    #[builder(into)]
    pub rate: KilowattHourRate,

    /// Informational rate before taxes, never billed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub untaxed_rate: Option<KilowattHourRate>,
}

/// Scarcity surcharge («bandeira»), with an optional second flag for billing windows
/// where the regime changed mid-cycle.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
pub struct FlagSurcharge {
    #[builder(into)]
    pub label: String,

    #[builder(into)]
    pub rate: KilowattHourRate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<SecondaryFlag>,
}

impl FlagSurcharge {
    /// Rates of every surcharge in effect, primary first.
    ///
    /// All of them apply to the same consumption: they add up rather than being
    /// split across the sub-periods.
    pub fn active_rates(&self) -> impl Iterator<Item = KilowattHourRate> + '_ {
        iter::once(self.rate).chain(
            self.secondary.iter().filter(|secondary| secondary.active).map(|secondary| secondary.rate),
        )
    }

    pub fn total_rate(&self) -> KilowattHourRate {
        self.active_rates().sum()
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Builder)]
pub struct SecondaryFlag {
    #[builder(default)]
    pub active: bool,

    #[builder(into)]
    pub label: String,

    #[builder(into)]
    pub rate: KilowattHourRate,
}

/// Municipal public lighting charge («iluminação pública»).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PublicLighting {
    /// Flat amount per bill, regardless of consumption.
    Fixed { amount: Cost },

    /// Percentage of the TUSD, TE and flag subtotal.
    Percentage { percent: Percentage },
}

impl PublicLighting {
    pub fn fixed(amount: impl Into<Cost>) -> Self {
        Self::Fixed { amount: amount.into() }
    }

    pub fn percentage(percent: impl Into<Percentage>) -> Self {
        Self::Percentage { percent: percent.into() }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn flag(secondary_active: bool) -> FlagSurcharge {
        FlagSurcharge::builder()
            .label("Verde")
            .rate(0.01)
            .secondary(SecondaryFlag::builder().active(secondary_active).label("Amarela").rate(0.02).build())
            .build()
    }

    #[test]
    fn test_active_rates() {
        assert_eq!(flag(false).active_rates().count(), 1);
        assert_abs_diff_eq!(flag(true).total_rate().0.0, 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_public_lighting_serde() {
        let fixed = serde_json::to_value(PublicLighting::fixed(15)).unwrap();
        assert_eq!(fixed, serde_json::json!({ "mode": "fixed", "amount": 15.0 }));

        let percentage: PublicLighting =
            serde_json::from_value(serde_json::json!({ "mode": "percentage", "percent": 10.0 }))
                .unwrap();
        assert_eq!(percentage, PublicLighting::percentage(10.0));
    }
}
