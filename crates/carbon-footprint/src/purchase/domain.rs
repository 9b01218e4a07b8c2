use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Units a footprint entry may declare. The serialized symbols are persisted
/// alongside scored activities and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "L")]
    Liter,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "EUR")]
    MonetaryEur,
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "kWh")]
    Energy,
    #[serde(rename = "portion")]
    Portion,
    #[serde(rename = "glass")]
    Glass,
    #[serde(rename = "cup")]
    Cup,
}

impl Unit {
    pub const fn all() -> [Self; 8] {
        [
            Self::Liter,
            Self::Kilogram,
            Self::MonetaryEur,
            Self::Item,
            Self::Energy,
            Self::Portion,
            Self::Glass,
            Self::Cup,
        ]
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Liter => "L",
            Self::Kilogram => "kg",
            Self::MonetaryEur => "EUR",
            Self::Item => "item",
            Self::Energy => "kWh",
            Self::Portion => "portion",
            Self::Glass => "glass",
            Self::Cup => "cup",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::all().into_iter().find(|unit| unit.symbol() == symbol)
    }

    pub const fn is_monetary(self) -> bool {
        matches!(self, Self::MonetaryEur)
    }

    /// Count units score one line item as exactly one unit.
    pub const fn is_count(self) -> bool {
        matches!(self, Self::Item)
    }

    pub const fn is_physical(self) -> bool {
        !self.is_monetary() && !self.is_count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "ACTIVITY_TYPE_ELECTRICITY")]
    Electricity,
    #[serde(rename = "ACTIVITY_TYPE_ELECTRIC_VEHICLE_CHARGING")]
    ElectricVehicleCharging,
    #[serde(rename = "ACTIVITY_TYPE_ELECTRIC_HEATING")]
    ElectricHeating,
    #[serde(rename = "ACTIVITY_TYPE_NON_ELECTRIC_HEATING")]
    NonElectricHeating,
    #[serde(rename = "ACTIVITY_TYPE_TRANSPORTATION")]
    Transportation,
    #[serde(rename = "ACTIVITY_TYPE_MEAL")]
    Meal,
    #[serde(rename = "ACTIVITY_TYPE_PURCHASE")]
    Purchase,
}

impl ActivityType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electricity => "Electricity",
            Self::ElectricVehicleCharging => "Electric vehicle charging",
            Self::ElectricHeating => "Electric heating",
            Self::NonElectricHeating => "Non-electric heating",
            Self::Transportation => "Transportation",
            Self::Meal => "Meal",
            Self::Purchase => "Purchase",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportationMode {
    Plane,
    Bike,
    Ebike,
    Car,
    Bus,
    PublicTransport,
    Train,
    Ferry,
    Escooter,
    Motorbike,
    Foot,
}

/// One priced or quantified component of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Key of the footprint entry this item maps to.
    pub identifier: String,
    /// Either a [`Unit`] symbol or a currency code.
    pub unit: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_currency: Option<String>,
}

impl LineItem {
    pub fn new(identifier: impl Into<String>, unit: impl Into<String>, value: f64) -> Self {
        Self {
            identifier: identifier.into(),
            unit: unit.into(),
            value,
            cost_amount: None,
            cost_currency: None,
        }
    }
}

/// A user-reported activity as produced by integrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub activity_type: ActivityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation_mode: Option<TransportationMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,
    #[serde(
        rename = "countryCodeISO2",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub country_code_iso2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,
}

impl Activity {
    pub fn new(activity_type: ActivityType) -> Self {
        Self {
            activity_type,
            transportation_mode: None,
            cost_amount: None,
            cost_currency: None,
            line_items: None,
            participants: None,
            country_code_iso2: None,
            datetime: None,
        }
    }

    /// The cost pair, when both halves are present and the amount is non-zero.
    pub fn monetary_amount(&self) -> Option<(f64, &str)> {
        match (self.cost_amount, self.cost_currency.as_deref()) {
            (Some(amount), Some(currency)) if amount != 0.0 && !currency.is_empty() => {
                Some((amount, currency))
            }
            _ => None,
        }
    }

    pub fn line_items(&self) -> &[LineItem] {
        self.line_items.as_deref().unwrap_or_default()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.datetime.map(|datetime| datetime.date_naive())
    }

    /// Participant count used to share the footprint; never below one.
    pub fn participant_count(&self) -> u32 {
        self.participants.unwrap_or(1).max(1)
    }
}
