use super::domain::{ActivityType, TransportationMode, Unit};
use crate::currency::CurrencyError;

/// Per-call scoring failure. Any of these means the activity cannot currently
/// be scored; none of them should bring down the host.
#[derive(Debug, thiserror::Error)]
pub enum EmissionError {
    #[error("unknown purchase type identifier: {0}")]
    UnknownIdentifier(String),
    #[error("missing carbon intensity for purchase type: {0}")]
    MissingIntensity(String),
    #[error(
        "line item {identifier} given in {unit} has no compatible purchase unit (expected {})",
        unit_label(.expected)
    )]
    IncompatibleUnit {
        identifier: String,
        unit: String,
        expected: Option<Unit>,
    },
    #[error("invalid amount {amount} in {} for purchase type {identifier}", .unit.symbol())]
    NonFiniteAmount {
        identifier: String,
        unit: Unit,
        amount: f64,
    },
    #[error("missing carbon intensity for country {country} and identifier {identifier}")]
    MissingCountryIntensity { identifier: String, country: String },
    #[error("couldn't calculate carbon intensity for transportation mode {0:?}")]
    UnrecognizedTransportationMode(Option<TransportationMode>),
    #[error("couldn't calculate carbon intensity for activity type {}", .0.label())]
    UnsupportedActivityType(ActivityType),
    #[error("{} activity carries no cost amount", .0.label())]
    MissingCostAmount(ActivityType),
    #[error("purchase activity has no line items")]
    MissingLineItems,
    #[error(transparent)]
    Currency(#[from] CurrencyError),
}

/// Fieldless discriminant of [`EmissionError`] for callers that branch on the
/// failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmissionErrorKind {
    UnknownIdentifier,
    MissingIntensity,
    IncompatibleUnit,
    NonFiniteAmount,
    MissingCountryIntensity,
    UnrecognizedMode,
    UnsupportedActivityType,
    MissingCostAmount,
    MissingLineItems,
    UnknownCurrency,
    MissingRate,
    MissingCpiData,
    CurrencyData,
}

impl EmissionError {
    pub fn kind(&self) -> EmissionErrorKind {
        match self {
            Self::UnknownIdentifier(_) => EmissionErrorKind::UnknownIdentifier,
            Self::MissingIntensity(_) => EmissionErrorKind::MissingIntensity,
            Self::IncompatibleUnit { .. } => EmissionErrorKind::IncompatibleUnit,
            Self::NonFiniteAmount { .. } => EmissionErrorKind::NonFiniteAmount,
            Self::MissingCountryIntensity { .. } => EmissionErrorKind::MissingCountryIntensity,
            Self::UnrecognizedTransportationMode(_) => EmissionErrorKind::UnrecognizedMode,
            Self::UnsupportedActivityType(_) => EmissionErrorKind::UnsupportedActivityType,
            Self::MissingCostAmount(_) => EmissionErrorKind::MissingCostAmount,
            Self::MissingLineItems => EmissionErrorKind::MissingLineItems,
            Self::Currency(CurrencyError::UnknownCurrency(_)) => EmissionErrorKind::UnknownCurrency,
            Self::Currency(CurrencyError::MissingRate { .. }) => EmissionErrorKind::MissingRate,
            Self::Currency(CurrencyError::MissingCpiData { .. }) => {
                EmissionErrorKind::MissingCpiData
            }
            Self::Currency(_) => EmissionErrorKind::CurrencyData,
        }
    }
}

fn unit_label(unit: &Option<Unit>) -> &'static str {
    unit.map(Unit::symbol).unwrap_or("no unit")
}
