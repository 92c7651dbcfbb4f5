use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use dss_exports::layout::{ExportMode, export_list_path};

fn parse_mode(s: &str) -> Result<ExportMode, String> {
    ExportMode::from_wrapper_key(s).ok_or_else(|| {
        let known: Vec<&str> = ExportMode::VARIANTS.iter().map(|m| m.as_str()).collect();
        format!("expected one of: {}", known.join(", "))
    })
}

/// Inspect and validate simulation export lists.
#[derive(Parser, Debug)]
#[command(name = "dss-exports", version, about, long_about = None)]
pub struct Cli {
    /// Export-list TOML file (current or legacy schema)
    #[arg(
        conflicts_with_all = ["project", "scenario"],
        required_unless_present = "project"
    )]
    pub path: Option<PathBuf>,

    /// Project directory; the by-class list of --scenario is loaded
    #[arg(long, requires = "scenario")]
    pub project: Option<PathBuf>,

    /// Scenario name under <project>/Scenarios
    #[arg(long, requires = "project")]
    pub scenario: Option<String>,

    /// Export mode whose list is loaded from the scenario
    #[arg(long, default_value = "ExportMode-byClass", value_parser = parse_mode)]
    pub mode: ExportMode,

    /// Show the properties of one element class
    #[arg(long)]
    pub class: Option<String>,

    /// Show the settings of one property (requires --class)
    #[arg(long, requires = "class")]
    pub property: Option<String>,

    /// Probe the property's name filter with an element name
    #[arg(long, requires = "property")]
    pub name: Option<String>,

    /// Probe the property's value filter with a value
    #[arg(long, requires = "property", allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Write a CSV summary of every configured property
    #[arg(long)]
    pub summary_out: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    /// Start the REST API after loading
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}

impl Cli {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub fn log_directive(&self) -> String {
        self.log_level.as_str().to_ascii_lowercase()
    }

    /// Export-list file selected by either the positional path or
    /// `--project`/`--scenario`.
    ///
    /// # Errors
    ///
    /// Returns a usage error if neither source was given.
    pub fn export_list_path(&self) -> Result<PathBuf, clap::Error> {
        match (&self.path, &self.project, &self.scenario) {
            (Some(path), _, _) => Ok(path.clone()),
            (None, Some(project), Some(scenario)) => {
                Ok(export_list_path(project, scenario, self.mode))
            }
            _ => Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "an export-list path or --project with --scenario is required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("dss-exports").chain(args.iter().copied()))
    }

    #[test]
    fn supports_path() {
        let cli = parse(&["exports.toml"]).expect("parse should succeed");
        assert_eq!(
            cli.export_list_path().expect("path given"),
            PathBuf::from("exports.toml")
        );
        assert_eq!(cli.log_level, tracing::Level::WARN);
    }

    #[test]
    fn supports_project_and_scenario() {
        let cli = parse(&["--project", "/proj", "--scenario", "scenario1"])
            .expect("parse should succeed");
        assert_eq!(
            cli.export_list_path().expect("project given"),
            PathBuf::from("/proj/Scenarios/scenario1/ExportLists/ExportMode-byClass.toml")
        );
    }

    #[test]
    fn mode_selects_export_list_file() {
        let cli = parse(&[
            "--project",
            "/proj",
            "--scenario",
            "scenario1",
            "--mode",
            "ExportMode-byElement",
        ])
        .expect("parse should succeed");
        assert_eq!(cli.mode, ExportMode::ByElement);
        assert!(
            cli.export_list_path()
                .expect("project given")
                .ends_with("ExportLists/ExportMode-byElement.toml")
        );
        assert!(parse(&["--project", "/proj", "--scenario", "s", "--mode", "byClass"]).is_err());
    }

    #[test]
    fn log_level_becomes_filter_directive() {
        let cli = parse(&["exports.toml", "--log-level", "debug"]).expect("parse should succeed");
        assert_eq!(cli.log_directive(), "debug");
        let filter = tracing_subscriber::EnvFilter::new(cli.log_directive());
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn missing_source_is_a_usage_error() {
        let mut cli = parse(&["exports.toml"]).expect("parse should succeed");
        cli.path = None;
        let err = cli.export_list_path().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn path_and_project_are_mutually_exclusive() {
        assert!(parse(&["exports.toml", "--project", "/proj", "--scenario", "s"]).is_err());
    }

    #[test]
    fn source_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--project", "/proj"]).is_err());
    }

    #[test]
    fn probes_require_property() {
        assert!(parse(&["exports.toml", "--name", "bus1"]).is_err());
        let cli = parse(&[
            "exports.toml",
            "--class",
            "Buses",
            "--property",
            "puVmagAngle",
            "--value",
            "-2.5",
        ])
        .expect("parse should succeed");
        assert_eq!(cli.value, Some(-2.5));
    }
}
