//! Numeric sanity checks applied before anything is written.
//!
//! The billing functions accept whatever they are given, so this is the only place
//! where negative or non-finite numbers are turned away.

use meterbill_billing::{ComponentTariff, PublicLighting, TariffConfig};
use meterbill_quantities::Quantity;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
}

pub fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        Err(ValidationError::NotFinite { field, value })
    } else if value < 0.0 {
        Err(ValidationError::Negative { field, value })
    } else {
        Ok(())
    }
}

pub fn check_quantity<const E: isize, const T: isize, const C: isize>(
    field: &'static str,
    quantity: Quantity<E, T, C>,
) -> Result<(), ValidationError> {
    if !quantity.is_finite() {
        Err(ValidationError::NotFinite { field, value: quantity.0.0 })
    } else if quantity.is_negative() {
        Err(ValidationError::Negative { field, value: quantity.0.0 })
    } else {
        Ok(())
    }
}

pub fn check_tariffs(tariffs: &TariffConfig) -> Result<(), ValidationError> {
    check_component(("TUSD", "TUSD before taxes"), &tariffs.tusd)?;
    check_component(("TE", "TE before taxes"), &tariffs.te)?;
    check_quantity("flag rate", tariffs.flag.rate)?;
    if let Some(secondary) = &tariffs.flag.secondary {
        check_quantity("secondary flag rate", secondary.rate)?;
    }
    match tariffs.public_lighting {
        PublicLighting::Fixed { amount } => check_quantity("public lighting amount", amount),
        PublicLighting::Percentage { percent } => {
            check_amount("public lighting percentage", percent.0)
        }
    }
}

fn check_component(
    (rate_field, untaxed_rate_field): (&'static str, &'static str),
    component: &ComponentTariff,
) -> Result<(), ValidationError> {
    check_quantity(rate_field, component.rate)?;
    if let Some(untaxed_rate) = component.untaxed_rate {
        check_quantity(untaxed_rate_field, untaxed_rate)?;
    }
    Ok(())
}
