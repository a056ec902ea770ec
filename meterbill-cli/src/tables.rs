use std::collections::BTreeMap;

use chrono::{NaiveDateTime, NaiveTime};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use meterbill_billing::{
    CostBreakdown,
    HistoryEntry,
    MonthlyStatistics,
    Projection,
    PublicLighting,
    Reading,
    TariffConfig,
    YearMonth,
};
use meterbill_quantities::{Cost, KilowattHourRate, KilowattHours};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn format_date(date: NaiveDateTime) -> String {
    if date.time() == NaiveTime::MIN {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Newest readings first.
pub fn build_history_table(entries: &[HistoryEntry]) -> Table {
    let intervals = entries.iter().filter(|entry| !entry.is_baseline).collect::<Vec<_>>();
    #[expect(clippy::cast_precision_loss)]
    let mean_consumption = if intervals.is_empty() {
        KilowattHours::ZERO
    } else {
        intervals.iter().map(|entry| entry.consumption).sum::<KilowattHours>()
            / intervals.len() as f64
    };

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Date"),
        Cell::new("Meter").set_alignment(CellAlignment::Right),
        Cell::new("Consumption").set_alignment(CellAlignment::Right),
        Cell::new("Cost").set_alignment(CellAlignment::Right),
    ]);
    for entry in entries.iter().rev() {
        let row = if entry.is_baseline {
            vec![
                Cell::new(&entry.reading.id).add_attribute(Attribute::Dim),
                Cell::new(format_date(entry.reading.date)),
                Cell::new(entry.reading.value).set_alignment(CellAlignment::Right),
                Cell::new("baseline")
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
                Cell::new("").set_alignment(CellAlignment::Right),
            ]
        } else {
            vec![
                Cell::new(&entry.reading.id).add_attribute(Attribute::Dim),
                Cell::new(format_date(entry.reading.date)),
                Cell::new(entry.reading.value).set_alignment(CellAlignment::Right),
                Cell::new(entry.consumption).set_alignment(CellAlignment::Right).fg(
                    if entry.consumption > mean_consumption { Color::Red } else { Color::Green },
                ),
                Cell::new(entry.cost).set_alignment(CellAlignment::Right),
            ]
        };
        table.add_row(row);
    }
    table
}

pub fn build_monthly_table(months: &BTreeMap<YearMonth, MonthlyStatistics>) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Month"),
        Cell::new("Readings").set_alignment(CellAlignment::Right),
        Cell::new("Consumption").set_alignment(CellAlignment::Right),
        Cell::new("TUSD").set_alignment(CellAlignment::Right),
        Cell::new("TE").set_alignment(CellAlignment::Right),
        Cell::new("Flag").set_alignment(CellAlignment::Right),
        Cell::new("Lighting").set_alignment(CellAlignment::Right),
        Cell::new("Total").set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
    ]);
    for (month, statistics) in months {
        let cost = statistics.cost.round_to_cents();
        table.add_row(vec![
            Cell::new(month),
            Cell::new(statistics.n_readings).set_alignment(CellAlignment::Right),
            Cell::new(statistics.consumption).set_alignment(CellAlignment::Right),
            Cell::new(cost.tusd).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(cost.te).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(cost.flag).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
            Cell::new(cost.lighting)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(cost.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        ]);
    }
    table
}

pub fn build_latest_reading_table(latest: &Reading, total_consumption: KilowattHours) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Latest reading"),
            Cell::new("Meter").set_alignment(CellAlignment::Right),
            Cell::new("Total consumption").set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new(format_date(latest.date)),
            Cell::new(latest.value).set_alignment(CellAlignment::Right),
            Cell::new(total_consumption)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    table
}

/// Cost composition with each component's share of the total.
pub fn build_breakdown_table(breakdown: &CostBreakdown) -> Table {
    let breakdown = breakdown.round_to_cents();
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Component"),
        Cell::new("Cost").set_alignment(CellAlignment::Right),
        Cell::new("Share").set_alignment(CellAlignment::Right),
    ]);
    for (label, cost) in breakdown.components() {
        let share = if breakdown.total > Cost::ZERO {
            format!("{:.1}%", cost / breakdown.total * 100.0)
        } else {
            "n/a".to_owned()
        };
        table.add_row(vec![
            Cell::new(label),
            Cell::new(cost).set_alignment(CellAlignment::Right),
            Cell::new(share).set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(breakdown.total).set_alignment(CellAlignment::Right).add_attribute(Attribute::Bold),
        Cell::new(""),
    ]);
    table
}

pub fn build_projection_table(projection: &Projection) -> Table {
    let mut table = new_table();
    table
        .set_header(vec![
            Cell::new("Daily average").set_alignment(CellAlignment::Right),
            Cell::new("Projected consumption").set_alignment(CellAlignment::Right),
            Cell::new("Projected cost").set_alignment(CellAlignment::Right),
        ])
        .add_row(vec![
            Cell::new(projection.daily_average).set_alignment(CellAlignment::Right),
            Cell::new(projection.projected_consumption).set_alignment(CellAlignment::Right),
            Cell::new(projection.projected_cost.round_to_cents())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
        ]);
    table
}

pub fn build_tariffs_table(tariffs: &TariffConfig) -> Table {
    fn untaxed(rate: Option<KilowattHourRate>) -> Cell {
        rate.map_or_else(|| Cell::new("n/a"), Cell::new)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Dim)
    }

    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Component"),
        Cell::new("Label"),
        Cell::new("Charge").set_alignment(CellAlignment::Right),
        Cell::new("Before taxes").set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("TUSD"),
        Cell::new(""),
        Cell::new(tariffs.tusd.rate).set_alignment(CellAlignment::Right),
        untaxed(tariffs.tusd.untaxed_rate),
    ]);
    table.add_row(vec![
        Cell::new("TE"),
        Cell::new(""),
        Cell::new(tariffs.te.rate).set_alignment(CellAlignment::Right),
        untaxed(tariffs.te.untaxed_rate),
    ]);
    table.add_row(vec![
        Cell::new("Flag"),
        Cell::new(&tariffs.flag.label),
        Cell::new(tariffs.flag.rate).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    if let Some(secondary) = &tariffs.flag.secondary {
        let label = Cell::new(&secondary.label);
        table.add_row(vec![
            Cell::new("Secondary flag"),
            if secondary.active { label } else { label.add_attribute(Attribute::CrossedOut) },
            Cell::new(secondary.rate).set_alignment(CellAlignment::Right).fg(if secondary.active {
                Color::DarkYellow
            } else {
                Color::Reset
            }),
            Cell::new(if secondary.active { "" } else { "inactive" }).add_attribute(Attribute::Dim),
        ]);
    }
    let lighting = match tariffs.public_lighting {
        PublicLighting::Fixed { amount } => format!("{amount} fixed"),
        PublicLighting::Percentage { percent } => format!("{percent} of subtotal"),
    };
    table.add_row(vec![
        Cell::new("Public lighting"),
        Cell::new(""),
        Cell::new(lighting).set_alignment(CellAlignment::Right),
        Cell::new(""),
    ]);
    table
}
