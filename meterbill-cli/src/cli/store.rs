use std::path::PathBuf;

use clap::Parser;
use meterbill_billing::{ComponentTariff, FlagSurcharge, PublicLighting, SecondaryFlag, TariffConfig};
use meterbill_quantities::{Cost, KilowattHourRate};

use crate::{prelude::*, store::Store};

#[derive(Parser)]
pub struct StoreArgs {
    /// Directory with the readings and tariffs.
    #[clap(long = "data-dir", env = "METERBILL_DATA_DIR", default_value = ".meterbill", global = true)]
    data_dir: PathBuf,

    #[clap(flatten)]
    default_tariffs: DefaultTariffArgs,
}

impl StoreArgs {
    pub fn open(self) -> Result<Store> {
        Store::open(&self.data_dir, self.default_tariffs.into())
    }
}

/// Tariffs used until the first `tariffs set`, and restored by `tariffs reset`.
#[derive(Parser)]
#[command(next_help_heading = "Default tariffs")]
struct DefaultTariffArgs {
    /// TUSD rate per kilowatt-hour, taxes included.
    #[clap(
        long = "default-tusd",
        env = "METERBILL_DEFAULT_TUSD",
        default_value = "0.45",
        global = true
    )]
    tusd: KilowattHourRate,

    #[clap(
        long = "default-tusd-untaxed",
        env = "METERBILL_DEFAULT_TUSD_UNTAXED",
        default_value = "0.38",
        global = true
    )]
    tusd_untaxed: KilowattHourRate,

    /// TE rate per kilowatt-hour, taxes included.
    #[clap(long = "default-te", env = "METERBILL_DEFAULT_TE", default_value = "0.35", global = true)]
    te: KilowattHourRate,

    #[clap(
        long = "default-te-untaxed",
        env = "METERBILL_DEFAULT_TE_UNTAXED",
        default_value = "0.29",
        global = true
    )]
    te_untaxed: KilowattHourRate,

    #[clap(
        long = "default-flag-label",
        env = "METERBILL_DEFAULT_FLAG_LABEL",
        default_value = "Verde",
        global = true
    )]
    flag_label: String,

    #[clap(
        long = "default-flag-rate",
        env = "METERBILL_DEFAULT_FLAG_RATE",
        default_value = "0.0",
        global = true
    )]
    flag_rate: KilowattHourRate,

    /// Secondary flag, stored inactive.
    #[clap(
        long = "default-secondary-flag-label",
        env = "METERBILL_DEFAULT_SECONDARY_FLAG_LABEL",
        default_value = "Amarela",
        global = true
    )]
    secondary_flag_label: String,

    #[clap(
        long = "default-secondary-flag-rate",
        env = "METERBILL_DEFAULT_SECONDARY_FLAG_RATE",
        default_value = "0.01885",
        global = true
    )]
    secondary_flag_rate: KilowattHourRate,

    /// Fixed public lighting charge per bill.
    #[clap(
        long = "default-public-lighting",
        env = "METERBILL_DEFAULT_PUBLIC_LIGHTING",
        default_value = "15.00",
        global = true
    )]
    public_lighting: Cost,
}

impl From<DefaultTariffArgs> for TariffConfig {
    fn from(args: DefaultTariffArgs) -> Self {
        Self::builder()
            .tusd(ComponentTariff::builder().rate(args.tusd).untaxed_rate(args.tusd_untaxed).build())
            .te(ComponentTariff::builder().rate(args.te).untaxed_rate(args.te_untaxed).build())
            .flag(
                FlagSurcharge::builder()
                    .label(args.flag_label)
                    .rate(args.flag_rate)
                    .secondary(
                        SecondaryFlag::builder()
                            .label(args.secondary_flag_label)
                            .rate(args.secondary_flag_rate)
                            .build(),
                    )
                    .build(),
            )
            .public_lighting(PublicLighting::Fixed { amount: args.public_lighting })
            .build()
    }
}
