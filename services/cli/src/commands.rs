use carbon_footprint::error::AppError;
use carbon_footprint::purchase::{explanation, FootprintEntry};
use carbon_footprint::{Activity, Intensity, PurchaseModel};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one activity or an array of activities
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EntriesArgs {
    /// Path segments from the root, e.g. --path Transport --path Diesel
    #[arg(long = "path")]
    pub(crate) path: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreLine {
    index: usize,
    model_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    carbon_emissions_kilograms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(crate) fn print_version(model: &PurchaseModel) {
    println!("{}", model.model_version());
    for link in explanation().links {
        println!("  source: {} <{}>", link.label, link.href);
    }
}

pub(crate) async fn score_activities(model: &PurchaseModel, args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let activities = parse_activities(&raw)?;

    for (index, activity) in activities.iter().enumerate() {
        let line = score_one(model, index, activity).await;
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

async fn score_one(model: &PurchaseModel, index: usize, activity: &Activity) -> ScoreLine {
    let mut line = ScoreLine {
        index,
        model_version: model.model_version().to_string(),
        carbon_emissions_kilograms: None,
        error: None,
    };

    if !model.model_can_run(activity) {
        warn!(index, activity_type = activity.activity_type.label(), "activity is not eligible");
        line.error = Some("activity is not eligible for the purchase model".to_string());
        return line;
    }

    match model.carbon_emissions(activity).await {
        Ok(kilograms) => line.carbon_emissions_kilograms = Some(kilograms),
        Err(err) => {
            warn!(index, kind = ?err.kind(), error = %err, "failed to score activity");
            line.error = Some(err.to_string());
        }
    }
    line
}

/// Accepts either a single activity object or an array of them.
fn parse_activities(raw: &str) -> Result<Vec<Activity>, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    match value {
        serde_json::Value::Array(_) => serde_json::from_value(value),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

pub(crate) fn list_entries(model: &PurchaseModel, args: EntriesArgs) -> Result<(), AppError> {
    let entry = if args.path.is_empty() {
        model.root_entry()
    } else {
        model
            .entry_by_path(args.path.as_slice())
            .ok_or_else(|| carbon_footprint::TaxonomyError::UnknownEntry(args.path.join(" / ")))?
    };

    let descendants = model.descendants(entry, |_| true, !entry.is_root())?;
    let mut rows: Vec<&FootprintEntry> = descendants.into_values().collect();
    rows.sort_by_key(|row| row.level());

    for row in rows {
        println!(
            "{:>2}  {:<6} {:<24} {}",
            row.level(),
            row.unit().map(|unit| unit.symbol()).unwrap_or("-"),
            describe_intensity(row.intensity()),
            row.key()
        );
    }
    Ok(())
}

fn describe_intensity(intensity: Option<&Intensity>) -> String {
    match intensity {
        None => "-".to_string(),
        Some(Intensity::Scalar(value)) => format!("{value}"),
        Some(Intensity::PerCountry(by_country)) => {
            let countries: Vec<&str> = by_country.keys().map(String::as_str).collect();
            format!("per country ({})", countries.join(","))
        }
    }
}
