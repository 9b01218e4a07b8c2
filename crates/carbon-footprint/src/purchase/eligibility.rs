use super::domain::{Activity, ActivityType};
use super::emissions::transportation_coefficient;

/// Whether `activity` carries enough data to be scored by the purchase model.
///
/// Passing this check does not guarantee scoring succeeds: line items may
/// still reference unknown identifiers or incompatible units.
pub fn can_score(activity: &Activity) -> bool {
    if activity.monetary_amount().is_some() {
        match activity.activity_type {
            ActivityType::Meal => return true,
            ActivityType::Transportation => {
                return transportation_coefficient(activity.transportation_mode).is_some()
            }
            _ => {}
        }
    }

    activity.activity_type == ActivityType::Purchase && !activity.line_items().is_empty()
}
