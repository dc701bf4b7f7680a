//! Report or remove mailing lists that have been inactive for too long.
//!
//! Connection settings come from an `[omeconf]` TOML table. Reporting mode
//! prints one block per stale list and can export JSON or a histogram;
//! removal mode deletes the stale lists and exits.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use tracing::debug;

use ome::exit_codes;
use ome::io::config::{load_config, resolve_config_path};
use ome::io::export::DEFAULT_JSON_PATH;
use ome::io::mailman::MailmanClient;
use ome::io::plot::DEFAULT_PLOT_PATH;
use ome::logging;
use ome::remove::run_removal;
use ome::report::{ReportOptions, run_report};

#[derive(Parser)]
#[command(
    name = "ome",
    version,
    about = "Find mailing lists with no recent posts and report or remove them"
)]
struct Cli {
    /// Minimum number of days without a post for a list to be reported.
    #[arg(short, long)]
    days: u32,

    /// Specify an alternate config file.
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Export the report as JSON.
    #[arg(short, long, conflicts_with = "remove")]
    export: bool,

    /// Export a histogram of inactive days as PNG.
    #[arg(short, long, conflicts_with = "remove")]
    plot: bool,

    /// Remove matching mailing lists instead of reporting them.
    #[arg(short, long)]
    remove: bool,

    /// Where `--export` writes the JSON report.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_JSON_PATH)]
    json_path: PathBuf,

    /// Where `--plot` writes the histogram.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_PLOT_PATH)]
    plot_path: PathBuf,
}

impl Cli {
    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            export_path: self.export.then(|| self.json_path.clone()),
            plot_path: self.plot.then(|| self.plot_path.clone()),
        }
    }
}

fn main() {
    logging::init();
    let code = match run(Cli::parse()) {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<()> {
    let config_path = resolve_config_path(cli.file.as_deref())?;
    let config = load_config(&config_path)?;
    debug!(config = %config_path.display(), root_url = %config.root_url, "loaded config");

    let client = MailmanClient::new(&config);
    let now = Utc::now();
    let mut out = io::stdout().lock();

    if cli.remove {
        run_removal(&client, cli.days, now, &mut out)?;
        return Ok(());
    }
    run_report(&client, cli.days, now, &cli.report_options(), &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_days_with_defaults() {
        let cli = Cli::parse_from(["ome", "-d", "30"]);
        assert_eq!(cli.days, 30);
        assert!(!cli.remove);
        assert_eq!(cli.report_options(), ReportOptions::default());
    }

    #[test]
    fn parse_export_and_plot_paths() {
        let cli = Cli::parse_from([
            "ome",
            "--days",
            "7",
            "-e",
            "-p",
            "--plot-path",
            "out/chart.png",
        ]);
        assert_eq!(
            cli.report_options(),
            ReportOptions {
                export_path: Some(PathBuf::from(DEFAULT_JSON_PATH)),
                plot_path: Some(PathBuf::from("out/chart.png")),
            }
        );
    }

    #[test]
    fn days_is_required() {
        assert!(Cli::try_parse_from(["ome"]).is_err());
    }

    #[test]
    fn negative_days_are_rejected() {
        assert!(Cli::try_parse_from(["ome", "-d", "-1"]).is_err());
    }

    #[test]
    fn remove_excludes_report_artifacts() {
        assert!(Cli::try_parse_from(["ome", "-d", "1", "-r", "-e"]).is_err());
        assert!(Cli::try_parse_from(["ome", "-d", "1", "-r", "-p"]).is_err());
        let cli = Cli::parse_from(["ome", "-d", "1", "-r", "-f", "alt.toml"]);
        assert!(cli.remove);
        assert_eq!(cli.file, Some(PathBuf::from("alt.toml")));
    }
}
