//! Versioned tariff document.
//!
//! Version 1 stored the public lighting charge as a bare amount and knew nothing of the
//! secondary flag. Documents without a version number are version 1. Older versions are
//! upgraded on read and writes always produce [`CURRENT_VERSION`].

use meterbill_billing::{ComponentTariff, FlagSurcharge, PublicLighting, TariffConfig};
use meterbill_quantities::{Cost, KilowattHourRate};
use serde::{Deserialize, Serialize};

use crate::prelude::*;

pub const CURRENT_VERSION: i64 = 2;

#[derive(Serialize)]
struct Document<'a> {
    version: i64,
    tariffs: &'a TariffConfig,
}

pub fn to_toml(tariffs: &TariffConfig) -> Result<String> {
    Ok(toml::to_string_pretty(&Document { version: CURRENT_VERSION, tariffs })?)
}

/// Parse a tariff document of any known version into the current shape.
pub fn from_toml(text: &str) -> Result<TariffConfig> {
    let mut document: toml::Table = toml::from_str(text).context("malformed tariff document")?;
    let version = match document.remove("version") {
        None => 1,
        Some(toml::Value::Integer(version)) => version,
        Some(value) => bail!("unexpected tariff document version `{value}`"),
    };
    let tariffs = document.remove("tariffs").context("the tariff document has no tariffs")?;
    match version {
        1 => {
            let legacy: LegacyTariffs =
                tariffs.try_into().context("malformed version 1 tariffs")?;
            info!(from = version, to = CURRENT_VERSION, "upgrading the tariff document");
            Ok(legacy.into())
        }
        CURRENT_VERSION => Ok(tariffs.try_into().context("malformed tariffs")?),
        _ => bail!("unsupported tariff document version {version}"),
    }
}

#[derive(Deserialize)]
struct LegacyTariffs {
    tusd: ComponentTariff,
    te: ComponentTariff,
    flag: LegacyFlag,
    public_lighting: Cost,
}

#[derive(Deserialize)]
struct LegacyFlag {
    label: String,
    rate: KilowattHourRate,
}

impl From<LegacyTariffs> for TariffConfig {
    fn from(legacy: LegacyTariffs) -> Self {
        Self {
            tusd: legacy.tusd,
            te: legacy.te,
            flag: FlagSurcharge { label: legacy.flag.label, rate: legacy.flag.rate, secondary: None },
            public_lighting: PublicLighting::Fixed { amount: legacy.public_lighting },
        }
    }
}
