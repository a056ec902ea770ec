use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use meterbill_billing::{Reading, Summary, history, meter_decreases, monthly_statistics};

use crate::{
    cli::parse_date,
    prelude::*,
    store::Store,
    tables::{
        build_breakdown_table,
        build_history_table,
        build_latest_reading_table,
        build_monthly_table,
        build_projection_table,
    },
};

/// Meter going backwards is billed as zero, which is worth a word.
fn warn_about_decreases(readings: &[Reading]) {
    for decrease in meter_decreases(readings) {
        warn!(
            previous = %decrease.previous.id,
            current = %decrease.current.id,
            amount = %decrease.amount(),
            "meter value went down, counting the interval as zero",
        );
    }
}

pub fn show_history(store: &Store) -> Result {
    let readings = store.readings()?;
    if readings.is_empty() {
        println!("No readings yet.");
        return Ok(());
    }
    warn_about_decreases(&readings);
    println!("{}", build_history_table(&history(&readings, &store.tariffs()?)));
    Ok(())
}

pub fn show_monthly(store: &Store) -> Result {
    let readings = store.readings()?;
    if readings.len() < 2 {
        println!("At least two readings are needed to bill a month.");
        return Ok(());
    }
    warn_about_decreases(&readings);
    println!("{}", build_monthly_table(&monthly_statistics(&readings, &store.tariffs()?)));
    Ok(())
}

#[derive(Parser)]
pub struct SummaryArgs {
    /// Date to project the billing cycle from, today when omitted.
    #[clap(long, value_parser = parse_date)]
    reference_date: Option<NaiveDateTime>,
}

impl SummaryArgs {
    #[instrument(skip_all)]
    pub fn run(self, store: &Store) -> Result {
        let reference_date: NaiveDate = self
            .reference_date
            .map_or_else(|| Local::now().date_naive(), |reference_date| reference_date.date());
        let readings = store.readings()?;
        let tariffs = store.tariffs()?;
        let Some(summary) = Summary::try_new(&readings, &tariffs, reference_date) else {
            println!("No readings yet.");
            return Ok(());
        };
        warn_about_decreases(&readings);

        println!("{}", build_latest_reading_table(summary.latest, summary.total_consumption));
        println!("{}", build_breakdown_table(&summary.cost));
        match summary.projection {
            Some(projection) => {
                info!(%reference_date, "projected the billing cycle");
                println!("{}", build_projection_table(&projection));
            }
            None => println!("Not enough data to project the billing cycle yet."),
        }
        Ok(())
    }
}
