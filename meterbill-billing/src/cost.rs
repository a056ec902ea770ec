use meterbill_quantities::{Cost, KilowattHours};
use serde::Serialize;

use crate::tariff::{PublicLighting, TariffConfig};

/// Itemized cost of a consumption quantity.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub tusd: Cost,
    pub te: Cost,
    pub flag: Cost,
    pub lighting: Cost,

    /// Always the sum of the four components above.
    pub total: Cost,
}

impl CostBreakdown {
    fn new(tusd: Cost, te: Cost, flag: Cost, lighting: Cost) -> Self {
        Self { tusd, te, flag, lighting, total: tusd + te + flag + lighting }
    }

    /// Labelled components in billing order, without the total.
    pub const fn components(&self) -> [(&'static str, Cost); 4] {
        [
            ("TUSD", self.tusd),
            ("TE", self.te),
            ("Flag", self.flag),
            ("Public lighting", self.lighting),
        ]
    }

    /// Round every component to cents and recompute the total from the rounded components.
    pub fn round_to_cents(self) -> Self {
        Self::new(
            self.tusd.round_to_cents(),
            self.te.round_to_cents(),
            self.flag.round_to_cents(),
            self.lighting.round_to_cents(),
        )
    }
}

/// Apply the tariffs to the consumption.
///
/// The percentage lighting charge applies to the TUSD, TE and flag subtotal, so it never
/// compounds with itself. A fixed lighting charge does not depend on the consumption at all,
/// which makes the total non-linear in the consumption.
pub fn cost_for(consumption: KilowattHours, tariffs: &TariffConfig) -> CostBreakdown {
    let tusd = consumption * tariffs.tusd.rate;
    let te = consumption * tariffs.te.rate;
    let flag = consumption * tariffs.flag.total_rate();
    let lighting = match tariffs.public_lighting {
        PublicLighting::Fixed { amount } => amount,
        PublicLighting::Percentage { percent } => (tusd + te + flag) * percent,
    };
    CostBreakdown::new(tusd, te, flag, lighting)
}

#[cfg(test)]
pub(crate) mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::tariff::{ComponentTariff, FlagSurcharge, SecondaryFlag};

    pub fn tariffs(public_lighting: PublicLighting) -> TariffConfig {
        TariffConfig::builder()
            .tusd(ComponentTariff::builder().rate(0.45).untaxed_rate(0.38).build())
            .te(ComponentTariff::builder().rate(0.35).untaxed_rate(0.29).build())
            .flag(FlagSurcharge::builder().label("Verde").rate(0.0).build())
            .public_lighting(public_lighting)
            .build()
    }

    #[test]
    fn test_fixed_lighting() {
        let breakdown = cost_for(KilowattHours::from(120), &tariffs(PublicLighting::fixed(15)));
        assert_abs_diff_eq!(breakdown.tusd.0.0, 54.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.te.0.0, 42.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.flag.0.0, 0.0);
        assert_abs_diff_eq!(breakdown.lighting.0.0, 15.0);
        assert_abs_diff_eq!(breakdown.total.0.0, 111.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_lighting_without_consumption() {
        let breakdown = cost_for(KilowattHours::ZERO, &tariffs(PublicLighting::fixed(15)));
        assert_eq!(breakdown.total, Cost::from(15));
    }

    #[test]
    fn test_percentage_lighting() {
        let breakdown = cost_for(KilowattHours::from(120), &tariffs(PublicLighting::percentage(10.0)));
        assert_abs_diff_eq!(breakdown.lighting.0.0, 9.6, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.total.0.0, 105.6, epsilon = 1e-9);
    }

    #[test]
    fn test_secondary_flag_adds_up() {
        let mut tariffs = tariffs(PublicLighting::fixed(0));
        tariffs.flag = FlagSurcharge::builder()
            .label("Verde")
            .rate(0.0)
            .secondary(SecondaryFlag::builder().active(true).label("Amarela").rate(0.02).build())
            .build();
        let breakdown = cost_for(KilowattHours::from(100), &tariffs);
        assert_abs_diff_eq!(breakdown.flag.0.0, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_inactive_secondary_flag_is_ignored() {
        let mut tariffs = tariffs(PublicLighting::fixed(0));
        tariffs.flag = FlagSurcharge::builder()
            .label("Vermelha")
            .rate(0.04)
            .secondary(SecondaryFlag::builder().label("Amarela").rate(0.02).build())
            .build();
        let breakdown = cost_for(KilowattHours::from(100), &tariffs);
        assert_abs_diff_eq!(breakdown.flag.0.0, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_percentage_lighting_includes_both_flags() {
        let mut tariffs = tariffs(PublicLighting::percentage(10.0));
        tariffs.flag = FlagSurcharge::builder()
            .label("Amarela")
            .rate(0.01)
            .secondary(SecondaryFlag::builder().active(true).label("Vermelha").rate(0.04).build())
            .build();
        let breakdown = cost_for(KilowattHours::from(100), &tariffs);
        // (45 + 35 + 1 + 4) × 10%
        assert_abs_diff_eq!(breakdown.lighting.0.0, 8.5, epsilon = 1e-9);
    }

    #[test]
    fn test_linear_with_percentage_lighting() {
        let tariffs = tariffs(PublicLighting::percentage(12.5));
        for (k1, k2) in [(0.0, 0.0), (120.0, 145.714), (1.0, 999.0), (0.333, 0.667)] {
            let combined = cost_for(KilowattHours::from(k1 + k2), &tariffs).total;
            let separate = cost_for(KilowattHours::from(k1), &tariffs).total
                + cost_for(KilowattHours::from(k2), &tariffs).total;
            assert_abs_diff_eq!(combined.0.0, separate.0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_non_linear_with_fixed_lighting() {
        let tariffs = tariffs(PublicLighting::fixed(15));
        let combined = cost_for(KilowattHours::from(120), &tariffs).total;
        let separate = cost_for(KilowattHours::from(60), &tariffs).total
            + cost_for(KilowattHours::from(60), &tariffs).total;
        assert_abs_diff_eq!((separate - combined).0.0, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_components_sum_to_total() {
        for public_lighting in [PublicLighting::fixed(15), PublicLighting::percentage(7.5)] {
            let tariffs = tariffs(public_lighting);
            for consumption in [0.0, 0.1, 120.0, 265.714_285, 10_000.0] {
                let breakdown = cost_for(KilowattHours::from(consumption), &tariffs);
                let sum: Cost = breakdown.components().into_iter().map(|(_, cost)| cost).sum();
                assert_abs_diff_eq!(sum.0.0, breakdown.total.0.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_round_to_cents_keeps_total_consistent() {
        let breakdown = cost_for(
            KilowattHours::from(265.714_285),
            &tariffs(PublicLighting::percentage(10.0)),
        )
        .round_to_cents();
        assert_abs_diff_eq!(breakdown.tusd.0.0, 119.57, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.te.0.0, 93.0, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.lighting.0.0, 21.26, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.total.0.0, 233.83, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        let breakdown = cost_for(KilowattHours::from(f64::NAN), &tariffs(PublicLighting::fixed(15)));
        assert!(breakdown.total.0.0.is_nan());
    }
}
