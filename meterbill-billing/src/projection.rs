use chrono::{Datelike, NaiveDate};
use meterbill_quantities::{Cost, DailyConsumption, Days, KilowattHours};
use serde::Serialize;

use crate::{
    consumption::sum_consumption,
    cost::cost_for,
    reading::{Reading, sort_chronologically},
    tariff::TariffConfig,
};

/// Linear extrapolation of the observed daily average over a full calendar month.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Projection {
    pub daily_average: DailyConsumption,
    pub projected_consumption: KilowattHours,
    pub projected_cost: Cost,
}

/// Project the consumption and cost of the month containing the reference date.
///
/// Returns [`None`] when there is no rate of change to extrapolate: fewer than two readings,
/// or the earliest and latest readings are not strictly apart in time.
pub fn project_cycle(
    readings: &[Reading],
    tariffs: &TariffConfig,
    reference_date: NaiveDate,
) -> Option<Projection> {
    if readings.len() < 2 {
        return None;
    }
    let sorted = sort_chronologically(readings);
    let (first, last) = (sorted.first()?, sorted.last()?);

    let days_passed = Days::from(last.date - first.date);
    if days_passed <= Days::ZERO {
        return None;
    }

    let daily_average = sum_consumption(&sorted) / days_passed;
    let projected_consumption = daily_average * days_in_month(reference_date);
    Some(Projection {
        daily_average,
        projected_consumption,
        projected_cost: cost_for(projected_consumption, tariffs).total,
    })
}

/// Number of calendar days in the month of the date.
pub fn days_in_month(date: NaiveDate) -> Days {
    Days::from(i32::from(date.num_days_in_month()))
}
