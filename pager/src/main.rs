//! # pager
//!
//! A CLI for reporting earthquake shaking impact per country.
//!
//! ## Overview
//!
//! pager is built on top of pagerlib. Given a hazard grid and the output of the
//! exposure and loss models for that grid, it selects the population dataset
//! nearest the event year and prints per-country tables:
//!
//! - **Exposure**: population at each MMI level (always shown)
//! - **Fatalities**: empirical fatality estimate (`--fatality`)
//! - **Economic**: economic exposure and dollar losses (`--economic`)
//! - **Semi-empirical**: fatalities by building type (`--semi`)
//!
//! ## Usage
//!
//! ```bash
//! # Exposure table, reading models from grid.json next to the grid
//! pager grid.xml
//!
//! # Fatality and economic tables with thousands separators and country names
//! pager grid.xml -f -e -r
//!
//! # Totals only, one comma-separated line
//! pager grid.xml -t
//!
//! # Explicit config and model output
//! pager grid.xml --config /etc/pager.toml --model-output run/us1234.json
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use pagerlib::{
    Collaborators, ImpactReport, ModelOutput, NumberFormat, ReferenceRegistry, ReportOptions,
    TableOptions,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("pager")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Per-country earthquake exposure and loss tables")
        .arg(
            Arg::new("grid")
                .required(true)
                .help("Path to the hazard intensity grid"),
        )
        .arg(
            Arg::new("model-output")
                .short('m')
                .long("model-output")
                .help("Model output JSON (defaults to the grid path with a .json extension)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .env("PAGER_CONFIG")
                .default_value("pager.toml")
                .help("Reference dataset registry"),
        )
        .arg(
            Arg::new("fatality")
                .short('f')
                .long("fatality")
                .action(ArgAction::SetTrue)
                .help("Show empirical fatalities"),
        )
        .arg(
            Arg::new("economic")
                .short('e')
                .long("economic")
                .action(ArgAction::SetTrue)
                .help("Show economic exposure and losses"),
        )
        .arg(
            Arg::new("semi")
                .short('s')
                .long("semi")
                .action(ArgAction::SetTrue)
                .help("Show semi-empirical fatalities by building type"),
        )
        .arg(
            Arg::new("human-readable")
                .short('r')
                .long("human-readable")
                .action(ArgAction::SetTrue)
                .help("Use thousands separators and country names"),
        )
        .arg(
            Arg::new("no-event-info")
                .short('n')
                .long("no-event-info")
                .action(ArgAction::SetTrue)
                .help("Do not print the event banner"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Print debug tracing to stderr"),
        )
        .arg(
            Arg::new("totals")
                .short('t')
                .long("totals")
                .action(ArgAction::SetTrue)
                .help("Print only totals as one comma-separated line"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
}

fn init_tracing(debug: bool) {
    let default = if debug {
        "warn,pager=debug,pagerlib=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn model_output_path(matches: &ArgMatches, grid: &Path) -> PathBuf {
    matches
        .get_one::<String>("model-output")
        .map(PathBuf::from)
        .unwrap_or_else(|| grid.with_extension("json"))
}

fn report_options(matches: &ArgMatches) -> ReportOptions {
    ReportOptions {
        fatality: matches.get_flag("fatality"),
        economic: matches.get_flag("economic"),
        semi_empirical: matches.get_flag("semi"),
    }
}

/// Run the command and return what should go to stdout
fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let grid = PathBuf::from(
        matches
            .get_one::<String>("grid")
            .ok_or_else(|| anyhow!("missing grid argument"))?,
    );
    if !grid.exists() {
        bail!("grid file does not exist: {}", grid.display());
    }

    let config = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("pager.toml");
    let registry = ReferenceRegistry::load(config)
        .with_context(|| format!("invalid reference configuration '{config}'"))?;

    let model_path = model_output_path(matches, &grid);
    debug!(path = %model_path.display(), "reading model output");
    let models = ModelOutput::load(&model_path)?;
    let event = models
        .event
        .clone()
        .ok_or_else(|| anyhow!("model output '{}' has no event section", model_path.display()))?;

    let totals = matches.get_flag("totals");
    let country_names = registry.country_names();
    let mut options = TableOptions::new().resolver(&country_names);
    // Grouped digits would break the comma-separated totals line.
    if matches.get_flag("human-readable") && !totals {
        options = options.human_readable(registry.number_format(NumberFormat::from_env()));
    }

    let report = ImpactReport::generate(
        &registry,
        &event,
        &grid,
        Collaborators::from_model(&models),
        report_options(matches),
        &options,
    )?;

    if totals {
        return Ok(format!("{}\n", report.compact_line()));
    }
    match matches.get_one::<String>("output").map(String::as_str) {
        Some("json") => Ok(format!("{}\n", serde_json::to_string_pretty(&report)?)),
        _ => Ok(render::render_report(&report, !matches.get_flag("no-event-info"))),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_tracing(matches.get_flag("debug"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_report_options_from_flags() {
        let matches = build_command().get_matches_from(["pager", "grid.xml", "-f", "-s"]);
        let options = report_options(&matches);
        assert!(options.fatality);
        assert!(!options.economic);
        assert!(options.semi_empirical);
    }

    #[test]
    fn test_default_model_output_path() {
        let matches = build_command().get_matches_from(["pager", "/events/us1234/grid.xml"]);
        assert_eq!(
            model_output_path(&matches, Path::new("/events/us1234/grid.xml")),
            PathBuf::from("/events/us1234/grid.json")
        );

        let matches =
            build_command().get_matches_from(["pager", "grid.xml", "-m", "/tmp/models.json"]);
        assert_eq!(
            model_output_path(&matches, Path::new("grid.xml")),
            PathBuf::from("/tmp/models.json")
        );
    }
}
