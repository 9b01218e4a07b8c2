use crate::commands::{list_entries, print_version, score_activities, EntriesArgs, ScoreArgs};
use carbon_footprint::config::AppConfig;
use carbon_footprint::error::AppError;
use carbon_footprint::telemetry;
use carbon_footprint::PurchaseModel;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "carbon-footprint",
    about = "Score activities against the purchase footprint taxonomy",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the model version (default command)
    Version,
    /// Score one activity or an array of activities read from a JSON file
    Score(ScoreArgs),
    /// List taxonomy entries below a path
    Entries(EntriesArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let model = PurchaseModel::from_config(&config.data)?;
    info!(
        ?config.environment,
        version = model.model_version(),
        entries = model.taxonomy().len(),
        "purchase model ready"
    );

    match cli.command.unwrap_or(Command::Version) {
        Command::Version => {
            print_version(&model);
            Ok(())
        }
        Command::Score(args) => score_activities(&model, args).await,
        Command::Entries(args) => list_entries(&model, args),
    }
}
