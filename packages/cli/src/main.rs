#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the disaster damage choropleth.
//!
//! Loads the state outline, the county boundaries, and the disaster CSV,
//! joins them, and then either renders an SVG, prints a per-county
//! summary, or runs a terminal hover session.

mod config;
mod interactive;
mod load;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use disaster_map_choropleth::ChoroplethApp;
use disaster_map_choropleth::classify::UNCLASSIFIED_LABEL;
use disaster_map_choropleth::format::format_number;
use disaster_map_choropleth::hover::{InfoField, PointerEvent};
use disaster_map_choropleth::svg::SvgSurface;
use disaster_map_disaster_models::InvalidDamagePolicy;

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "disaster_map", about = "County disaster damage choropleth")]
struct Cli {
    /// TOML config file (defaults to the built-in Georgia config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// State outline `GeoJSON` path or URL
    #[arg(long, global = true)]
    state: Option<String>,

    /// County boundaries `GeoJSON` path or URL
    #[arg(long, global = true)]
    counties: Option<String>,

    /// Disaster CSV path or URL
    #[arg(long, global = true)]
    disasters: Option<String>,

    /// How unparseable damage amounts are aggregated (`propagate` or `skip`)
    #[arg(long, global = true, value_parser = parse_policy)]
    invalid_damage: Option<InvalidDamagePolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the choropleth to an SVG file
    Render {
        /// Output file
        #[arg(long, short, default_value = "disaster_map.svg")]
        output: PathBuf,

        /// Render with the pointer over this county
        #[arg(long)]
        hover: Option<String>,
    },
    /// Print the join report and per-county figures
    Summary,
    /// Hover over counties from a terminal menu
    Interactive,
}

fn parse_policy(value: &str) -> Result<InvalidDamagePolicy, String> {
    value
        .parse()
        .map_err(|_| format!("expected 'propagate' or 'skip', got '{value}'"))
}

impl Cli {
    /// Loads the config and applies command-line overrides.
    fn app_config(&self) -> Result<AppConfig, config::ConfigError> {
        let mut config = AppConfig::load(self.config.as_deref())?;

        if let Some(state) = &self.state {
            config.assets.state.clone_from(state);
        }
        if let Some(counties) = &self.counties {
            config.assets.counties.clone_from(counties);
        }
        if let Some(disasters) = &self.disasters {
            config.assets.disasters.clone_from(disasters);
        }
        if let Some(policy) = self.invalid_damage {
            config.stats.invalid_damage = policy;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = cli.app_config()?;

    let (geometry, dataset) = match load::load_all(&config).await {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load map inputs: {e}");
            return Err(e.into());
        }
    };

    let mut app = ChoroplethApp::new(geometry, dataset, config.choropleth_options());

    match cli.command {
        Commands::Render { output, hover } => render(&config, &mut app, &output, hover.as_deref())?,
        Commands::Summary => summary(&app),
        Commands::Interactive => interactive::run(&mut app)?,
    }

    Ok(())
}

fn render(
    config: &AppConfig,
    app: &mut ChoroplethApp,
    output: &std::path::Path,
    hover: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let projection = config.projection(&app.geometry().region)?;
    let mut surface = SvgSurface::new(config.canvas.width, config.canvas.height, projection);

    app.draw(&mut surface);

    if let Some(name) = hover {
        let id = app
            .find_county(name)
            .ok_or_else(|| format!("No county named '{name}'"))?;
        app.handle_pointer(PointerEvent::Enter(id), &mut surface);
    }

    std::fs::write(output, surface.to_document())?;

    log::info!(
        "Wrote {} shapes to {} ({})",
        surface.shape_count(),
        output.display(),
        surface.text(InfoField::Header).unwrap_or_default()
    );

    Ok(())
}

fn summary(app: &ChoroplethApp) {
    let report = app.join_report();
    let index = &app.dataset().index;
    let panel = app.info_panel();

    println!("{}", panel.title);
    println!("  Annual cost:       ${}", panel.total_cost);
    println!("  Cost per disaster: ${}", panel.average_cost);
    println!();
    println!(
        "Disasters: {} attached, {} unmatched",
        report.attached, report.unmatched
    );
    for name in &report.unmatched_names {
        println!("  unmatched: {name}");
    }
    println!(
        "County names in data: {} (min {} / max {} disasters per name), months: {}",
        index.by_county.len(),
        index.min_by_county.unwrap_or_default(),
        index.max_by_county.unwrap_or_default(),
        index.months().len()
    );
    println!();

    for county in app.county_summaries() {
        let class = county
            .class
            .map_or_else(|| UNCLASSIFIED_LABEL.to_string(), |class| class.to_string());
        println!(
            "{:>4}  {:<20} {:>4} disasters  ${:>16}  {class}",
            county.id.0,
            county.name,
            county.disasters,
            format_number(county.total_damage)
        );
    }
}
