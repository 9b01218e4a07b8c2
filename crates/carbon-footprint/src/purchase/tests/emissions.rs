use super::common::*;
use crate::purchase::domain::{ActivityType, LineItem, TransportationMode};
use crate::purchase::{EmissionError, EmissionErrorKind};

#[tokio::test]
async fn scalar_intensity_multiplies_amount() {
    let model = fixture_model();
    let activity = purchase(vec![LineItem::new("Diesel", "L", 10.0)]);

    assert!(model.model_can_run(&activity));
    let footprint = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(footprint, 31.7);
}

#[tokio::test]
async fn country_intensity_uses_the_activity_country() {
    let model = fixture_model();
    let mut activity = purchase(vec![LineItem::new("Groceries", "EUR", 15.0)]);
    activity.country_code_iso2 = Some("DK".to_string());

    let footprint = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(footprint, 15.0 * 0.8);
}

#[tokio::test]
async fn missing_country_falls_back_to_mean_of_countries() {
    let model = fixture_model();
    let activity = purchase(vec![LineItem::new("Groceries", "EUR", 15.0)]);

    let footprint = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(footprint, 15.0 * (0.8 + 0.6 + 0.4) / 3.0);
}

#[tokio::test]
async fn unlisted_country_is_an_error() {
    let model = fixture_model();
    let error = model
        .carbon_emission_of_line_item(&LineItem::new("Groceries", "EUR", 15.0), Some("NO"), None)
        .await
        .expect_err("no intensity for NO");

    match error {
        EmissionError::MissingCountryIntensity {
            identifier,
            country,
        } => {
            assert_eq!(identifier, "Groceries");
            assert_eq!(country, "NO");
        }
        other => panic!("expected missing country intensity, got {other:?}"),
    }
}

#[tokio::test]
async fn country_map_on_non_monetary_entry_is_rejected() {
    let model = fixture_model();
    let error = model
        .carbon_emission_of_line_item(&LineItem::new("Charging", "kWh", 12.0), Some("DK"), None)
        .await
        .expect_err("per-country intensity requires EUR");
    assert_eq!(error.kind(), EmissionErrorKind::IncompatibleUnit);
}

#[tokio::test]
async fn unknown_and_unrated_identifiers_fail_distinctly() {
    let model = fixture_model();

    let unknown = model
        .carbon_emission_of_line_item(&LineItem::new("Caviar", "kg", 1.0), None, None)
        .await
        .expect_err("unknown identifier");
    assert!(matches!(unknown, EmissionError::UnknownIdentifier(ref key) if key == "Caviar"));

    let unrated = model
        .carbon_emission_of_line_item(&LineItem::new("Unrated", "EUR", 1.0), None, None)
        .await
        .expect_err("no intensity");
    assert_eq!(unrated.kind(), EmissionErrorKind::MissingIntensity);

    let loose = model
        .carbon_emission_of_line_item(&LineItem::new("Loose", "kg", 1.0), None, None)
        .await
        .expect_err("no declared unit");
    assert_eq!(loose.kind(), EmissionErrorKind::IncompatibleUnit);
}

#[tokio::test]
async fn non_finite_amount_is_rejected() {
    let model = fixture_model();
    let error = model
        .carbon_emission_of_line_item(&LineItem::new("Diesel", "L", f64::INFINITY), None, None)
        .await
        .expect_err("infinite liters");
    assert_eq!(error.kind(), EmissionErrorKind::NonFiniteAmount);
}

#[tokio::test]
async fn first_failing_line_item_aborts_the_purchase() {
    let model = fixture_model();
    let activity = purchase(vec![
        LineItem::new("Diesel", "L", 10.0),
        LineItem::new("Caviar", "kg", 1.0),
        LineItem::new("Butter", "kg", 1.0),
    ]);

    assert!(model.model_can_run(&activity));
    let error = model.carbon_emissions(&activity).await.expect_err("aborts");
    assert_eq!(error.kind(), EmissionErrorKind::UnknownIdentifier);
}

#[tokio::test]
async fn line_items_are_summed() {
    let model = fixture_model();
    let activity = purchase(vec![
        LineItem::new("Diesel", "L", 10.0),
        LineItem::new("Butter", "kg", 2.0),
        LineItem::new("Phones", "item", 4.0),
    ]);

    let footprint = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(footprint, 31.7 + 18.5 + 60.0);
}

#[tokio::test]
async fn participants_share_the_footprint() {
    let model = fixture_model();
    let mut activity = billed(ActivityType::Meal, 100.0, "EUR");
    let single = model.carbon_emissions(&activity).await.expect("scores");

    activity.participants = Some(2);
    let shared = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(shared, single / 2.0);

    activity.participants = Some(0);
    let zero = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(zero, single);
}

#[tokio::test]
async fn meal_uses_static_coefficient() {
    let model = fixture_model();
    let footprint = model
        .carbon_emissions(&billed(ActivityType::Meal, 75.0, "DKK"))
        .await
        .expect("scores");
    assert_close(footprint, 10.0 * 79.64 / 1000.0);
}

#[tokio::test]
async fn transportation_coefficients_follow_the_mode() {
    let model = fixture_model();
    let cases = [
        (TransportationMode::Car, 1186.0),
        (TransportationMode::Train, 335.63),
        (TransportationMode::PublicTransport, 335.63),
        (TransportationMode::Plane, 1121.52),
    ];

    for (mode, coefficient) in cases {
        let mut activity = billed(ActivityType::Transportation, 10.0, "EUR");
        activity.transportation_mode = Some(mode);
        let footprint = model.carbon_emissions(&activity).await.expect("scores");
        assert_close(footprint, 10.0 * coefficient / 1000.0);
    }
}

#[tokio::test]
async fn unbillable_mode_and_activity_type_cannot_be_computed() {
    let model = fixture_model();

    let mut ferry = billed(ActivityType::Transportation, 10.0, "EUR");
    ferry.transportation_mode = Some(TransportationMode::Ferry);
    let error = model.carbon_emissions(&ferry).await.expect_err("ferry");
    assert!(matches!(
        error,
        EmissionError::UnrecognizedTransportationMode(Some(TransportationMode::Ferry))
    ));

    let heating = billed(ActivityType::ElectricHeating, 10.0, "EUR");
    let error = model.carbon_emissions(&heating).await.expect_err("heating");
    assert_eq!(error.kind(), EmissionErrorKind::UnsupportedActivityType);
}

#[tokio::test]
async fn ungated_activities_fail_instead_of_scoring_zero() {
    let model = fixture_model();

    let meal = crate::purchase::Activity::new(ActivityType::Meal);
    assert!(!model.model_can_run(&meal));
    let error = model.carbon_emissions(&meal).await.expect_err("no cost");
    assert_eq!(error.kind(), EmissionErrorKind::MissingCostAmount);

    let empty = purchase(Vec::new());
    assert!(!model.model_can_run(&empty));
    let error = model.carbon_emissions(&empty).await.expect_err("no items");
    assert_eq!(error.kind(), EmissionErrorKind::MissingLineItems);
}

#[tokio::test]
async fn purchase_matches_equivalent_meal() {
    let model = fixture_model();
    let mut activity = purchase(vec![LineItem::new("Restaurants", "EUR", 10.0)]);
    activity.cost_amount = Some(10.0);
    activity.cost_currency = Some("EUR".to_string());

    let as_purchase = model.carbon_emissions(&activity).await.expect("scores");
    activity.activity_type = ActivityType::Meal;
    let as_meal = model.carbon_emissions(&activity).await.expect("scores");
    assert_close(as_purchase, as_meal);
}

#[tokio::test]
async fn activity_date_reaches_the_collaborator() {
    let model = fixture_model();
    let mut activity = purchase(vec![LineItem::new("Bread", "EUR", 10.0)]);
    activity.datetime = Some(
        date(2005, 4, 11)
            .and_hms_opt(10, 20, 30)
            .expect("valid time")
            .and_utc(),
    );

    let error = model.carbon_emissions(&activity).await.expect_err("no cpi");
    match error {
        EmissionError::Currency(crate::currency::CurrencyError::MissingCpiData { date: missing }) => {
            assert_eq!(missing, date(2005, 4, 11));
        }
        other => panic!("expected missing cpi data, got {other:?}"),
    }
    assert_eq!(model.converter().calls(), 1);
}

#[tokio::test]
async fn overflowing_line_item_emission_is_rejected() {
    let model = fixture_model();
    let error = model
        .carbon_emission_of_line_item(&LineItem::new("Diesel", "L", f64::MAX), None, None)
        .await
        .expect_err("liters times intensity overflows");
    assert_eq!(error.kind(), EmissionErrorKind::NonFiniteAmount);
}

#[tokio::test]
async fn non_finite_bill_is_rejected_for_meals_and_transportation() {
    let model = fixture_model();

    let meal = billed(ActivityType::Meal, f64::INFINITY, "EUR");
    let error = model.carbon_emissions(&meal).await.expect_err("infinite bill");
    match error {
        EmissionError::NonFiniteAmount { identifier, .. } => assert_eq!(identifier, "Meal"),
        other => panic!("expected non-finite amount, got {other:?}"),
    }

    let mut ride = billed(ActivityType::Transportation, f64::MAX, "EUR");
    ride.transportation_mode = Some(TransportationMode::Car);
    let error = model.carbon_emissions(&ride).await.expect_err("footprint overflows");
    assert_eq!(error.kind(), EmissionErrorKind::NonFiniteAmount);
}
