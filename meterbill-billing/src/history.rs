use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::{Datelike, NaiveDate};
use meterbill_quantities::{Cost, KilowattHours};
use serde::Serialize;

use crate::{
    consumption::consumption_between,
    cost::{CostBreakdown, cost_for},
    reading::{Reading, sort_chronologically},
    tariff::TariffConfig,
};

/// Reading together with the consumption and cost of the interval it closes.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct HistoryEntry<'a> {
    pub reading: &'a Reading,

    /// Earliest reading: there is no interval to close, so consumption and cost are zero.
    pub is_baseline: bool,

    pub consumption: KilowattHours,
    pub cost: Cost,
}

/// Chronological history with per-interval consumption and cost.
#[must_use]
pub fn history<'a>(readings: &'a [Reading], tariffs: &TariffConfig) -> Vec<HistoryEntry<'a>> {
    let mut previous: Option<&Reading> = None;
    sort_chronologically(readings)
        .into_iter()
        .map(|reading| {
            let entry = match previous {
                None => HistoryEntry {
                    reading,
                    is_baseline: true,
                    consumption: KilowattHours::ZERO,
                    cost: Cost::ZERO,
                },
                Some(previous) => {
                    let consumption = consumption_between(Some(previous.value), reading.value);
                    HistoryEntry {
                        reading,
                        is_baseline: false,
                        consumption,
                        cost: cost_for(consumption, tariffs).total,
                    }
                }
            };
            previous = Some(reading);
            entry
        })
        .collect()
}

#[must_use]
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct MonthlyStatistics {
    pub consumption: KilowattHours,

    /// Breakdown of the whole month's consumption, so that a fixed charge is billed once.
    pub cost: CostBreakdown,

    pub n_readings: usize,
}

/// Group the history by calendar month.
///
/// Each interval's consumption goes to the month of the reading closing it.
/// Every reading, the baseline included, counts towards its own month.
#[must_use]
pub fn monthly_statistics(
    readings: &[Reading],
    tariffs: &TariffConfig,
) -> BTreeMap<YearMonth, MonthlyStatistics> {
    let mut months = BTreeMap::<YearMonth, (KilowattHours, usize)>::new();
    for entry in history(readings, tariffs) {
        let (consumption, n_readings) =
            months.entry(YearMonth::from(entry.reading.date.date())).or_default();
        *consumption += entry.consumption;
        *n_readings += 1;
    }
    months
        .into_iter()
        .map(|(month, (consumption, n_readings))| {
            (month, MonthlyStatistics { consumption, cost: cost_for(consumption, tariffs), n_readings })
        })
        .collect()
}
