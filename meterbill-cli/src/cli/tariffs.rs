use clap::{Parser, Subcommand};
use meterbill_billing::{PublicLighting, SecondaryFlag, TariffConfig};
use meterbill_quantities::{Cost, KilowattHourRate, Percentage};

use crate::{prelude::*, store::Store, tables::build_tariffs_table};

#[derive(Parser)]
pub struct TariffsArgs {
    #[command(subcommand)]
    command: TariffsCommand,
}

impl TariffsArgs {
    #[instrument(skip_all)]
    pub fn run(self, store: &Store) -> Result {
        let tariffs = match self.command {
            TariffsCommand::Show => store.tariffs()?,
            TariffsCommand::Set(args) => {
                let tariffs = args.apply(store.tariffs()?)?;
                store.replace_tariffs(&tariffs)?;
                tariffs
            }
            TariffsCommand::Reset => store.reset_tariffs()?,
        };
        println!("{}", build_tariffs_table(&tariffs));
        Ok(())
    }
}

#[derive(Subcommand)]
enum TariffsCommand {
    /// Print the current tariffs.
    Show,

    /// Change some of the tariffs and keep the rest.
    Set(SetArgs),

    /// Restore the default tariffs.
    Reset,
}

#[derive(Parser)]
struct SetArgs {
    #[clap(long)]
    tusd: Option<KilowattHourRate>,

    /// TUSD rate before taxes, for reference only.
    #[clap(long)]
    tusd_untaxed: Option<KilowattHourRate>,

    #[clap(long)]
    te: Option<KilowattHourRate>,

    /// TE rate before taxes, for reference only.
    #[clap(long)]
    te_untaxed: Option<KilowattHourRate>,

    #[clap(long)]
    flag_label: Option<String>,

    #[clap(long)]
    flag_rate: Option<KilowattHourRate>,

    #[clap(long, conflicts_with = "no_secondary_flag")]
    secondary_flag_label: Option<String>,

    #[clap(long, conflicts_with = "no_secondary_flag")]
    secondary_flag_rate: Option<KilowattHourRate>,

    /// Whether the secondary flag is charged on top of the main one.
    #[clap(long, conflicts_with = "no_secondary_flag")]
    secondary_flag_active: Option<bool>,

    /// Drop the secondary flag altogether.
    #[clap(long)]
    no_secondary_flag: bool,

    /// Flat public lighting charge per bill.
    #[clap(long, conflicts_with = "lighting_percent")]
    lighting_fixed: Option<Cost>,

    /// Public lighting as a percentage of the TUSD, TE and flag subtotal.
    #[clap(long)]
    lighting_percent: Option<Percentage>,
}

impl SetArgs {
    fn apply(self, mut tariffs: TariffConfig) -> Result<TariffConfig> {
        if let Some(rate) = self.tusd {
            tariffs.tusd.rate = rate;
        }
        if let Some(rate) = self.tusd_untaxed {
            tariffs.tusd.untaxed_rate = Some(rate);
        }
        if let Some(rate) = self.te {
            tariffs.te.rate = rate;
        }
        if let Some(rate) = self.te_untaxed {
            tariffs.te.untaxed_rate = Some(rate);
        }
        if let Some(label) = self.flag_label {
            tariffs.flag.label = label;
        }
        if let Some(rate) = self.flag_rate {
            tariffs.flag.rate = rate;
        }

        if self.no_secondary_flag {
            tariffs.flag.secondary = None;
        } else if self.secondary_flag_label.is_some()
            || self.secondary_flag_rate.is_some()
            || self.secondary_flag_active.is_some()
        {
            let secondary = match tariffs.flag.secondary.take() {
                Some(mut secondary) => {
                    if let Some(label) = self.secondary_flag_label {
                        secondary.label = label;
                    }
                    if let Some(rate) = self.secondary_flag_rate {
                        secondary.rate = rate;
                    }
                    if let Some(active) = self.secondary_flag_active {
                        secondary.active = active;
                    }
                    secondary
                }
                None => SecondaryFlag {
                    active: self.secondary_flag_active.unwrap_or(true),
                    label: self
                        .secondary_flag_label
                        .context("`--secondary-flag-label` is needed to add a secondary flag")?,
                    rate: self
                        .secondary_flag_rate
                        .context("`--secondary-flag-rate` is needed to add a secondary flag")?,
                },
            };
            tariffs.flag.secondary = Some(secondary);
        }

        if let Some(amount) = self.lighting_fixed {
            tariffs.public_lighting = PublicLighting::Fixed { amount };
        } else if let Some(percent) = self.lighting_percent {
            tariffs.public_lighting = PublicLighting::Percentage { percent };
        }

        Ok(tariffs)
    }
}

#[cfg(test)]
mod tests {
    use meterbill_billing::{ComponentTariff, FlagSurcharge};

    use super::*;

    fn tariffs() -> TariffConfig {
        TariffConfig::builder()
            .tusd(ComponentTariff::builder().rate(0.45).build())
            .te(ComponentTariff::builder().rate(0.35).build())
            .flag(FlagSurcharge::builder().label("Verde").rate(0.0).build())
            .public_lighting(PublicLighting::fixed(15))
            .build()
    }

    fn set(args: &[&str]) -> Result<TariffConfig> {
        SetArgs::try_parse_from(std::iter::once("set").chain(args.iter().copied()))?.apply(tariffs())
    }

    #[test]
    fn test_partial_update() {
        let updated = set(&["--te", "0.4", "--lighting-percent", "10"]).unwrap();
        assert_eq!(updated.tusd, tariffs().tusd);
        assert_eq!(updated.te.rate, KilowattHourRate::from(0.4));
        assert_eq!(updated.public_lighting, PublicLighting::percentage(10.0));
    }

    #[test]
    fn test_no_change() {
        assert_eq!(set(&[]).unwrap(), tariffs());
    }

    #[test]
    fn test_add_secondary_flag() {
        let updated =
            set(&["--secondary-flag-label", "Amarela", "--secondary-flag-rate", "0.01885"]).unwrap();
        let secondary = updated.flag.secondary.unwrap();
        assert!(secondary.active);
        assert_eq!(secondary.label, "Amarela");
    }

    #[test]
    fn test_secondary_flag_needs_label_and_rate() {
        assert!(set(&["--secondary-flag-active", "true"]).is_err());
    }

    #[test]
    fn test_lighting_modes_conflict() {
        assert!(set(&["--lighting-fixed", "15", "--lighting-percent", "10"]).is_err());
    }
}
