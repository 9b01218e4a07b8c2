use super::domain::{Activity, ActivityType, LineItem, TransportationMode, Unit};
use super::error::EmissionError;
use super::taxonomy::{Intensity, TaxonomyIndex};
use super::units::resolve_unit_and_amount;
use crate::currency::CurrencyConverter;
use chrono::NaiveDate;
use std::collections::BTreeMap;

// Static coefficients in kgCO2e per 1000 EUR, from the Baltic project calculator.
const MEAL_KG_PER_KEUR: f64 = 79.64;
const CAR_KG_PER_KEUR: f64 = 1186.0;
const RAIL_KG_PER_KEUR: f64 = 335.63;
const PLANE_KG_PER_KEUR: f64 = 1121.52;

/// Coefficient for transportation activities without line items, or `None`
/// when the mode cannot be scored from a bill.
pub(crate) fn transportation_coefficient(mode: Option<TransportationMode>) -> Option<f64> {
    match mode? {
        TransportationMode::Car => Some(CAR_KG_PER_KEUR),
        TransportationMode::Train | TransportationMode::PublicTransport => Some(RAIL_KG_PER_KEUR),
        TransportationMode::Plane => Some(PLANE_KG_PER_KEUR),
        _ => None,
    }
}

/// Computes footprints against one taxonomy and one currency collaborator.
pub struct EmissionCalculator<'a, C: ?Sized> {
    taxonomy: &'a TaxonomyIndex,
    converter: &'a C,
}

impl<'a, C> EmissionCalculator<'a, C>
where
    C: CurrencyConverter + ?Sized,
{
    pub fn new(taxonomy: &'a TaxonomyIndex, converter: &'a C) -> Self {
        Self {
            taxonomy,
            converter,
        }
    }

    /// Emission of a single line item in kgCO2e.
    ///
    /// Per-country intensities fall back to the unweighted mean of all listed
    /// countries when no country is given.
    pub async fn emission_of_line_item(
        &self,
        line_item: &LineItem,
        country_code_iso2: Option<&str>,
        date: Option<NaiveDate>,
    ) -> Result<f64, EmissionError> {
        let identifier = line_item.identifier.as_str();
        let entry = self
            .taxonomy
            .entry_by_key(identifier)
            .ok_or_else(|| EmissionError::UnknownIdentifier(identifier.to_string()))?;
        let intensity = entry
            .intensity()
            .ok_or_else(|| EmissionError::MissingIntensity(identifier.to_string()))?;

        let resolved = resolve_unit_and_amount(line_item, entry, date, self.converter).await?;
        finite(identifier, resolved.unit, resolved.amount)?;
        if entry.unit() != Some(resolved.unit) {
            return Err(EmissionError::IncompatibleUnit {
                identifier: identifier.to_string(),
                unit: resolved.unit.symbol().to_string(),
                expected: entry.unit(),
            });
        }

        let per_unit = match intensity {
            Intensity::Scalar(value) => *value,
            Intensity::PerCountry(by_country) => {
                if entry.unit() != Some(Unit::MonetaryEur) {
                    return Err(EmissionError::IncompatibleUnit {
                        identifier: identifier.to_string(),
                        unit: resolved.unit.symbol().to_string(),
                        expected: Some(Unit::MonetaryEur),
                    });
                }
                country_intensity(identifier, by_country, country_code_iso2)?
            }
        };

        let emission = finite(identifier, resolved.unit, per_unit * resolved.amount)?;
        tracing::debug!(
            identifier,
            unit = resolved.unit.symbol(),
            amount = resolved.amount,
            emission,
            "scored line item"
        );
        Ok(emission)
    }

    /// Footprint of a whole activity in kgCO2e, shared among its participants.
    ///
    /// Purchases sum their line items and abort on the first failing one.
    pub async fn emission_of_activity(&self, activity: &Activity) -> Result<f64, EmissionError> {
        let footprint = match activity.activity_type {
            ActivityType::Meal => self.reference_amount(activity).await? * MEAL_KG_PER_KEUR / 1000.0,
            ActivityType::Transportation => {
                let coefficient = transportation_coefficient(activity.transportation_mode).ok_or(
                    EmissionError::UnrecognizedTransportationMode(activity.transportation_mode),
                )?;
                self.reference_amount(activity).await? * coefficient / 1000.0
            }
            ActivityType::Purchase => {
                let line_items = activity.line_items();
                if line_items.is_empty() {
                    return Err(EmissionError::MissingLineItems);
                }
                let country = activity.country_code_iso2.as_deref();
                let date = activity.date();
                let mut total = 0.0;
                for line_item in line_items {
                    total += self.emission_of_line_item(line_item, country, date).await?;
                }
                total
            }
            other => return Err(EmissionError::UnsupportedActivityType(other)),
        };

        finite(
            activity.activity_type.label(),
            Unit::MonetaryEur,
            footprint / f64::from(activity.participant_count()),
        )
    }

    async fn reference_amount(&self, activity: &Activity) -> Result<f64, EmissionError> {
        let (value, currency_code) = activity
            .monetary_amount()
            .ok_or(EmissionError::MissingCostAmount(activity.activity_type))?;
        let amount = self
            .converter
            .convert_to_amount(value, currency_code, activity.date())
            .await?;
        finite(activity.activity_type.label(), Unit::MonetaryEur, amount)
    }
}

fn finite(identifier: &str, unit: Unit, amount: f64) -> Result<f64, EmissionError> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(EmissionError::NonFiniteAmount {
            identifier: identifier.to_string(),
            unit,
            amount,
        })
    }
}

fn country_intensity(
    identifier: &str,
    by_country: &BTreeMap<String, f64>,
    country_code_iso2: Option<&str>,
) -> Result<f64, EmissionError> {
    match country_code_iso2 {
        // TODO: weight the fallback by population or GDP once stored scores
        // can be migrated under a new model version.
        None if by_country.is_empty() => {
            Err(EmissionError::MissingIntensity(identifier.to_string()))
        }
        None => Ok(by_country.values().sum::<f64>() / by_country.len() as f64),
        Some(country) => by_country.get(country).copied().ok_or_else(|| {
            EmissionError::MissingCountryIntensity {
                identifier: identifier.to_string(),
                country: country.to_string(),
            }
        }),
    }
}
