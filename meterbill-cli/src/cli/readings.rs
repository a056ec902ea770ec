use chrono::{Local, NaiveDateTime};
use clap::Parser;
use meterbill_billing::ReadingId;
use meterbill_quantities::KilowattHours;

use crate::{cli::parse_date, prelude::*, store::Store};

#[derive(Parser)]
pub struct AddArgs {
    /// Reading date, today when omitted.
    #[clap(long, value_parser = parse_date)]
    date: Option<NaiveDateTime>,

    /// Cumulative meter value in kilowatt-hours.
    #[clap(long)]
    value: KilowattHours,
}

impl AddArgs {
    pub fn run(self, store: &Store) -> Result {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive().into());
        let reading = store.insert_reading(date, self.value)?;
        println!("{}", reading.id);
        Ok(())
    }
}

#[derive(Parser)]
pub struct EditArgs {
    id: ReadingId,

    #[clap(long, value_parser = parse_date)]
    date: Option<NaiveDateTime>,

    #[clap(long)]
    value: Option<KilowattHours>,
}

impl EditArgs {
    pub fn run(self, store: &Store) -> Result {
        ensure!(self.date.is_some() || self.value.is_some(), "pass `--date` and/or `--value`");
        let reading = store.update_reading(&self.id, self.date, self.value)?;
        info!(id = %reading.id, date = %reading.date, value = %reading.value, "done");
        Ok(())
    }
}

#[derive(Parser)]
pub struct RemoveArgs {
    id: ReadingId,
}

impl RemoveArgs {
    pub fn run(self, store: &Store) -> Result {
        let reading = store.delete_reading(&self.id)?;
        info!(id = %reading.id, date = %reading.date, value = %reading.value, "done");
        Ok(())
    }
}
