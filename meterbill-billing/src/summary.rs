use chrono::NaiveDate;
use meterbill_quantities::KilowattHours;

use crate::{
    consumption::sum_consumption,
    cost::{CostBreakdown, cost_for},
    projection::{Projection, project_cycle},
    reading::{Reading, sort_chronologically},
    tariff::TariffConfig,
};

/// Everything the dashboard shows at once.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Summary<'a> {
    pub latest: &'a Reading,

    /// Consumption since the earliest reading.
    pub total_consumption: KilowattHours,

    pub cost: CostBreakdown,

    /// Absent while there is not enough data to extrapolate.
    pub projection: Option<Projection>,
}

impl<'a> Summary<'a> {
    /// Returns [`None`] when there are no readings at all.
    pub fn try_new(
        readings: &'a [Reading],
        tariffs: &TariffConfig,
        reference_date: NaiveDate,
    ) -> Option<Self> {
        let sorted = sort_chronologically(readings);
        let latest = *sorted.last()?;
        let total_consumption = sum_consumption(&sorted);
        Some(Self {
            latest,
            total_consumption,
            cost: cost_for(total_consumption, tariffs),
            projection: project_cycle(readings, tariffs, reference_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{cost::tests::tariffs, tariff::PublicLighting};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, day).unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(Summary::try_new(&[], &tariffs(PublicLighting::fixed(15)), date(31)).is_none());
    }

    #[test]
    fn test_single_reading() {
        let readings = [Reading::builder().id("1").date(date(1)).value(10500).build()];
        let summary =
            Summary::try_new(&readings, &tariffs(PublicLighting::fixed(15)), date(31)).unwrap();
        assert_eq!(summary.latest.id.0, "1");
        assert_eq!(summary.total_consumption, KilowattHours::ZERO);
        assert!(summary.projection.is_none());
    }

    #[test]
    fn test_summary() {
        let readings = [
            Reading::builder().id("2").date(date(15)).value(10620).build(),
            Reading::builder().id("1").date(date(1)).value(10500).build(),
        ];
        let summary =
            Summary::try_new(&readings, &tariffs(PublicLighting::fixed(15)), date(31)).unwrap();
        assert_eq!(summary.latest.id.0, "2");
        assert_abs_diff_eq!(summary.total_consumption.0.0, 120.0);
        assert_abs_diff_eq!(summary.cost.total.0.0, 111.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            summary.projection.unwrap().projected_consumption.0.0,
            265.714_285,
            epsilon = 1e-6,
        );
    }
}
