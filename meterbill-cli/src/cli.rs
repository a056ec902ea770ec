mod readings;
mod reports;
mod store;
mod tariffs;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        readings::{AddArgs, EditArgs, RemoveArgs},
        reports::{SummaryArgs, show_history, show_monthly},
        store::StoreArgs,
        tariffs::TariffsArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn run(self) -> Result {
        let store = self.store.open()?;
        match self.command {
            Command::Add(args) => args.run(&store),
            Command::Edit(args) => args.run(&store),
            Command::Remove(args) => args.run(&store),
            Command::History => show_history(&store),
            Command::Monthly => show_monthly(&store),
            Command::Summary(args) => args.run(&store),
            Command::Tariffs(args) => args.run(&store),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Record a meter reading.
    Add(AddArgs),

    /// Correct the date or value of a reading.
    Edit(EditArgs),

    /// Delete a reading.
    Remove(RemoveArgs),

    /// Readings with the consumption and cost of each interval.
    History,

    /// Consumption and cost per calendar month.
    Monthly,

    /// Latest reading, cost so far, and the projection for the current billing cycle.
    Summary(SummaryArgs),

    /// Inspect or change the tariffs.
    Tariffs(Box<TariffsArgs>),
}

/// Accepts `YYYY-MM-DD`, a naive date-time, or RFC 3339.
fn parse_date(text: &str) -> Result<chrono::NaiveDateTime, String> {
    meterbill_billing::reading::parse_meter_date(text)
        .ok_or_else(|| format!("`{text}` is not a date, expected `YYYY-MM-DD`"))
}
