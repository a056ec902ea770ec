//! Billing calculator for a household electricity meter.
//!
//! Every function here is pure: it takes readings and a tariff configuration owned by the
//! caller and returns fresh value objects. Nothing is fetched, stored or validated beyond
//! clamping negative meter deltas.

pub mod consumption;
pub mod cost;
pub mod history;
pub mod projection;
pub mod reading;
pub mod summary;
pub mod tariff;

pub use meterbill_quantities as quantities;

pub use self::{
    consumption::{MeterDecrease, consumption_between, meter_decreases, total_consumption},
    cost::{CostBreakdown, cost_for},
    history::{HistoryEntry, MonthlyStatistics, YearMonth, history, monthly_statistics},
    projection::{Projection, days_in_month, project_cycle},
    reading::{Reading, ReadingId, sort_chronologically},
    summary::Summary,
    tariff::{ComponentTariff, FlagSurcharge, PublicLighting, SecondaryFlag, TariffConfig},
};
