use super::domain::{LineItem, Unit};
use super::error::EmissionError;
use super::taxonomy::FootprintEntry;
use crate::currency::CurrencyConverter;
use chrono::NaiveDate;

/// A line item quantity expressed in its entry's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedQuantity {
    pub unit: Unit,
    pub amount: f64,
}

/// Finds the first interpretation of `line_item` compatible with `entry`:
///
/// 1. physical entry unit matched exactly by the item: value passes through;
/// 2. monetary entry unit and the item carries money: normalized by `converter`;
/// 3. count entry unit: always one;
/// 4. anything else is incompatible.
pub async fn resolve_unit_and_amount<C>(
    line_item: &LineItem,
    entry: &FootprintEntry,
    date: Option<NaiveDate>,
    converter: &C,
) -> Result<ResolvedQuantity, EmissionError>
where
    C: CurrencyConverter + ?Sized,
{
    let entry_unit = match entry.unit() {
        Some(unit) => unit,
        None => return Err(incompatible(line_item, entry)),
    };

    if entry_unit.is_physical() && Unit::from_symbol(&line_item.unit) == Some(entry_unit) {
        return Ok(ResolvedQuantity {
            unit: entry_unit,
            amount: line_item.value,
        });
    }

    if entry_unit.is_monetary() {
        if let Some((value, currency_code)) = monetary_amount(line_item, converter) {
            let amount = converter
                .convert_to_amount(value, currency_code, date)
                .await?;
            return Ok(ResolvedQuantity {
                unit: Unit::MonetaryEur,
                amount,
            });
        }
    }

    if entry_unit.is_count() {
        return Ok(ResolvedQuantity {
            unit: entry_unit,
            amount: 1.0,
        });
    }

    Err(incompatible(line_item, entry))
}

/// A currency-tagged unit wins over the separate cost pair.
fn monetary_amount<'a, C>(line_item: &'a LineItem, converter: &C) -> Option<(f64, &'a str)>
where
    C: CurrencyConverter + ?Sized,
{
    let unit_is_currency = converter
        .available_currencies()
        .iter()
        .any(|currency| currency.code() == line_item.unit);
    if unit_is_currency {
        return Some((line_item.value, line_item.unit.as_str()));
    }

    match (line_item.cost_amount, line_item.cost_currency.as_deref()) {
        (Some(amount), Some(currency)) => Some((amount, currency)),
        _ => None,
    }
}

fn incompatible(line_item: &LineItem, entry: &FootprintEntry) -> EmissionError {
    EmissionError::IncompatibleUnit {
        identifier: line_item.identifier.clone(),
        unit: line_item.unit.clone(),
        expected: entry.unit(),
    }
}
