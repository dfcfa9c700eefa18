//! Closest departures CLI
//!
//! Terminal front end for the closest-departures API: typed-in search,
//! replayed map clicks, and a configuration dump.

#![allow(clippy::print_stdout)]

mod cli;
mod terminal_view;

use std::sync::Arc;

use anyhow::{Context, anyhow};
use application::{InteractionController, MapPort, MarkerLayer, PickerStep, SubmitOutcome};
use clap::Parser;
use domain::{Field, QueryResult};
use infrastructure::{AppConfig, DeparturesAdapter, MarkerOverlay};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, PickArgs, QueryOptions, SearchArgs, log_filter_from_verbosity};
use terminal_view::TerminalView;

type Controller = InteractionController<TerminalView, MarkerOverlay>;

fn build_controller(config: &AppConfig, show_raw: bool) -> anyhow::Result<Controller> {
    let adapter = DeparturesAdapter::new(&config.transit)
        .context("Failed to create departures client")?;
    let settings = config.controller_settings()?;

    Ok(InteractionController::new(
        Arc::new(adapter),
        TerminalView::new(show_raw),
        MarkerOverlay::new(),
        settings,
    ))
}

/// Fill the time and limit fields; unset options keep the form defaults
fn apply_query_options(controller: &mut Controller, options: &QueryOptions) {
    if let Some(time) = &options.time {
        controller.set_field(Field::DepartureTime, time.as_str());
    }
    if let Some(limit) = &options.limit {
        controller.set_field(Field::Limit, limit.as_str());
    }
}

/// Submit the form and turn the outcome into the process result
async fn submit(controller: &mut Controller) -> anyhow::Result<()> {
    match controller.submit().await {
        SubmitOutcome::Completed(QueryResult::Success(_)) => {
            let map = controller.map();
            let markers = map.marker_count(MarkerLayer::Departures);
            if markers > 0 {
                println!(
                    "🗺️  {markers} stop marker(s), map centered at {} (zoom {})",
                    map.center(),
                    map.zoom()
                );
            }
            Ok(())
        },
        SubmitOutcome::Completed(QueryResult::Failure(reason)) => {
            Err(anyhow!("Query failed: {reason}"))
        },
        SubmitOutcome::Invalid(errors) => Err(anyhow!("Invalid input: {errors}")),
        SubmitOutcome::Busy => Err(anyhow!("A query is already in flight")),
    }
}

async fn run_search(config: &AppConfig, args: SearchArgs) -> anyhow::Result<()> {
    let mut controller = build_controller(config, args.query.raw)?;

    controller.set_field(Field::StartLatitude, args.start_lat);
    controller.set_field(Field::StartLongitude, args.start_lon);
    controller.set_field(Field::EndLatitude, args.end_lat);
    controller.set_field(Field::EndLongitude, args.end_lon);
    apply_query_options(&mut controller, &args.query);

    submit(&mut controller).await
}

async fn run_pick(config: &AppConfig, args: PickArgs) -> anyhow::Result<()> {
    let mut controller = build_controller(config, args.query.raw)?;

    for (latitude, longitude) in args.clicks {
        let step = controller
            .map_click(latitude, longitude)
            .with_context(|| format!("Click at {latitude},{longitude} is off the map"))?;
        if let PickerStep::Restarted(at) = step {
            info!(%at, "Picker restarted");
        }
    }
    apply_query_options(&mut controller, &args.query);

    submit(&mut controller).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = log_filter_from_verbosity(cli.verbose);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {e}"))?;

    match cli.command {
        Commands::Search(args) => run_search(&config, args).await,
        Commands::Pick(args) => run_pick(&config, args).await,
        Commands::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        },
    }
}
