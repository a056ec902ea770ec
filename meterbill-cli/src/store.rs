mod tariffs;
pub mod validation;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use meterbill_billing::{Reading, ReadingId, TariffConfig};
use meterbill_quantities::KilowattHours;
use uuid::Uuid;

use crate::{
    prelude::*,
    store::validation::{check_quantity, check_tariffs},
};

const READINGS_FILE_NAME: &str = "readings.json";
const TARIFFS_FILE_NAME: &str = "tariffs.toml";

/// Directory holding the readings and the tariff configuration.
///
/// Readings are kept in insertion order, which is what breaks ties between readings
/// sharing a date.
#[must_use]
pub struct Store {
    root: PathBuf,

    /// Seed for a store which has never saved its tariffs.
    default_tariffs: TariffConfig,
}

impl Store {
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn open(root: impl AsRef<Path>, default_tariffs: TariffConfig) -> Result<Self> {
        let root = root.as_ref();
        fs::create_dir_all(root)
            .with_context(|| format!("failed to create `{}`", root.display()))?;
        Ok(Self { root: root.to_path_buf(), default_tariffs })
    }

    pub fn readings(&self) -> Result<Vec<Reading>> {
        let Some(text) = self.read_file(READINGS_FILE_NAME)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).context("malformed readings file")
    }

    #[instrument(skip_all, fields(date = %date, value = %value))]
    pub fn insert_reading(&self, date: NaiveDateTime, value: KilowattHours) -> Result<Reading> {
        check_quantity("reading value", value)?;
        let reading =
            Reading::builder().id(Uuid::now_v7().to_string()).date(date).value(value).build();
        let mut readings = self.readings()?;
        readings.push(reading.clone());
        self.write_readings(&readings)?;
        info!(id = %reading.id, "inserted");
        Ok(reading)
    }

    /// Change the date and/or value of a reading, keeping its identifier and position.
    #[instrument(skip_all, fields(id = %id))]
    pub fn update_reading(
        &self,
        id: &ReadingId,
        date: Option<NaiveDateTime>,
        value: Option<KilowattHours>,
    ) -> Result<Reading> {
        if let Some(value) = value {
            check_quantity("reading value", value)?;
        }
        let mut readings = self.readings()?;
        let reading = readings
            .iter_mut()
            .find(|reading| &reading.id == id)
            .with_context(|| format!("reading `{id}` does not exist"))?;
        if let Some(date) = date {
            reading.date = date;
        }
        if let Some(value) = value {
            reading.value = value;
        }
        let reading = reading.clone();
        self.write_readings(&readings)?;
        info!("updated");
        Ok(reading)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn delete_reading(&self, id: &ReadingId) -> Result<Reading> {
        let mut readings = self.readings()?;
        let index = readings
            .iter()
            .position(|reading| &reading.id == id)
            .with_context(|| format!("reading `{id}` does not exist"))?;
        let reading = readings.remove(index);
        self.write_readings(&readings)?;
        info!("deleted");
        Ok(reading)
    }

    /// Saved tariffs, or the defaults when nothing has been saved yet.
    pub fn tariffs(&self) -> Result<TariffConfig> {
        match self.read_file(TARIFFS_FILE_NAME)? {
            Some(text) => tariffs::from_toml(&text),
            None => {
                debug!("no tariffs saved, using the defaults");
                Ok(self.default_tariffs.clone())
            }
        }
    }

    /// Replace the whole tariff configuration.
    #[instrument(skip_all)]
    pub fn replace_tariffs(&self, tariffs: &TariffConfig) -> Result {
        check_tariffs(tariffs)?;
        self.write_file(TARIFFS_FILE_NAME, &tariffs::to_toml(tariffs)?)?;
        info!("saved the tariffs");
        Ok(())
    }

    pub fn reset_tariffs(&self) -> Result<TariffConfig> {
        self.replace_tariffs(&self.default_tariffs)?;
        Ok(self.default_tariffs.clone())
    }

    fn write_readings(&self, readings: &[Reading]) -> Result {
        self.write_file(READINGS_FILE_NAME, &serde_json::to_string_pretty(readings)?)
    }

    fn read_file(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => {
                Err(error).with_context(|| format!("failed to read `{}`", path.display()))
            }
        }
    }

    /// Write through a temporary file so that a failed write never leaves a truncated file.
    fn write_file(&self, name: &str, contents: &str) -> Result {
        let path = self.root.join(name);
        let temporary_path = path.with_extension("tmp");
        fs::write(&temporary_path, contents)
            .with_context(|| format!("failed to write `{}`", temporary_path.display()))?;
        fs::rename(&temporary_path, &path)
            .with_context(|| format!("failed to replace `{}`", path.display()))?;
        debug!(path = %path.display(), "written");
        Ok(())
    }
}
