use itertools::Itertools;
use meterbill_quantities::KilowattHours;

use crate::reading::{Reading, sort_chronologically};

/// Energy used between two consecutive meter values.
///
/// The first reading of a series has no baseline and yields zero. A meter going backwards
/// (rollback, replacement or a typo) is clamped to zero as well; see [`meter_decreases`]
/// to surface those cases.
pub fn consumption_between(
    previous: Option<KilowattHours>,
    current: KilowattHours,
) -> KilowattHours {
    previous.map_or(KilowattHours::ZERO, |previous| (current - previous).max(KilowattHours::ZERO))
}

/// Sum of the consumption over every consecutive pair of the chronologically sorted readings.
pub fn total_consumption(readings: &[Reading]) -> KilowattHours {
    sum_consumption(&sort_chronologically(readings))
}

/// Same as [`total_consumption`] for readings that are already sorted.
pub(crate) fn sum_consumption(sorted: &[&Reading]) -> KilowattHours {
    sorted
        .iter()
        .tuple_windows()
        .map(|(previous, current)| consumption_between(Some(previous.value), current.value))
        .sum()
}

/// Consecutive pair of readings where the meter went backwards.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct MeterDecrease<'a> {
    pub previous: &'a Reading,
    pub current: &'a Reading,
}

impl MeterDecrease<'_> {
    pub fn amount(&self) -> KilowattHours {
        self.previous.value - self.current.value
    }
}

/// Find the intervals that [`consumption_between`] silently clamps.
#[must_use]
pub fn meter_decreases(readings: &[Reading]) -> Vec<MeterDecrease<'_>> {
    sort_chronologically(readings)
        .into_iter()
        .tuple_windows()
        .filter(|(previous, current)| current.value < previous.value)
        .map(|(previous, current)| MeterDecrease { previous, current })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;

    fn reading(id: &str, day: u32, value: f64) -> Reading {
        Reading::builder()
            .id(id)
            .date(NaiveDate::from_ymd_opt(2023, 10, day).unwrap())
            .value(value)
            .build()
    }

    #[test]
    fn test_consumption_between() {
        assert_eq!(
            consumption_between(Some(KilowattHours::from(10500)), KilowattHours::from(10620)),
            KilowattHours::from(120),
        );
    }

    #[test]
    fn test_first_reading_has_no_consumption() {
        assert_eq!(consumption_between(None, KilowattHours::from(10500)), KilowattHours::ZERO);
        assert_eq!(consumption_between(None, KilowattHours::ZERO), KilowattHours::ZERO);
    }

    #[test]
    fn test_meter_reset_is_clamped() {
        assert_eq!(
            consumption_between(Some(KilowattHours::from(10620)), KilowattHours::from(10500)),
            KilowattHours::ZERO,
        );
    }

    #[test]
    fn test_never_negative() {
        for previous in [0.0, 0.5, 100.0, 10_620.0] {
            for current in [0.0, 0.25, 99.9, 100.0, 10_500.0, 20_000.0] {
                let consumption = consumption_between(
                    Some(KilowattHours::from(previous)),
                    KilowattHours::from(current),
                );
                assert!(consumption >= KilowattHours::ZERO, "{previous} → {current}");
            }
        }
    }

    #[test]
    fn test_total_consumption_sorts_first() {
        let readings = [
            reading("3", 15, 10620.0),
            reading("1", 1, 10500.0),
            reading("2", 8, 10555.5),
        ];
        assert_abs_diff_eq!(total_consumption(&readings).0.0, 120.0);
    }

    #[test]
    fn test_total_consumption_skips_decreases() {
        let readings = [
            reading("1", 1, 10500.0),
            reading("2", 8, 10620.0),
            reading("3", 9, 20.0),
            reading("4", 15, 80.0),
        ];
        assert_abs_diff_eq!(total_consumption(&readings).0.0, 180.0);
    }

    #[test]
    fn test_total_consumption_of_single_reading() {
        assert_eq!(total_consumption(&[reading("1", 1, 10500.0)]), KilowattHours::ZERO);
        assert_eq!(total_consumption(&[]), KilowattHours::ZERO);
    }

    #[test]
    fn test_meter_decreases() {
        let readings = [
            reading("2", 15, 10500.0),
            reading("1", 1, 10620.0),
            reading("3", 20, 10510.0),
        ];
        let decreases = meter_decreases(&readings);
        assert_eq!(decreases.len(), 1);
        assert_eq!(decreases[0].previous.id.0, "1");
        assert_eq!(decreases[0].current.id.0, "2");
        assert_abs_diff_eq!(decreases[0].amount().0.0, 120.0);
    }
}
