use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use version_floor::config::{CheckerConfig, DEFAULT_BASELINE, DEFAULT_LOG_FILTER};
use version_floor::version::checker::{PackageVersion, StaticPackage, VersionChecker};
use version_floor::version::identifier::VersionIdentifier;

#[derive(Parser)]
#[command(name = "version-floor")]
#[command(version, about = "Check that a package version is not older than a baseline")]
struct Cli {
    /// Version to check (defaults to this tool's own version)
    #[arg(id = "current_version", value_name = "VERSION")]
    version: Option<String>,

    /// Oldest acceptable version
    #[arg(long, default_value = DEFAULT_BASELINE)]
    baseline: VersionIdentifier,

    /// Package name shown in messages
    #[arg(long)]
    package: Option<String>,

    /// Print the check result as JSON
    #[arg(long)]
    json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) -> WorkerGuard {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.log_json);

    let this_crate = StaticPackage::this_crate();
    let package = StaticPackage::new(
        cli.package.as_deref().unwrap_or(this_crate.name()),
        cli.version.as_deref().unwrap_or(this_crate.version()),
    );

    let checker = VersionChecker::from_config(&CheckerConfig {
        baseline: cli.baseline,
    });
    let result = checker.ensure(&package)?;

    if cli.json {
        println!("{}", result.to_json()?);
    } else {
        println!("{}", result);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_dev_baseline() {
        let cli = Cli::try_parse_from(["version-floor"]).unwrap();

        assert_eq!(cli.version, None);
        assert_eq!(cli.baseline, DEFAULT_BASELINE.parse::<VersionIdentifier>().unwrap());
        assert!(!cli.json);
    }

    #[test]
    fn cli_parses_all_arguments() {
        let cli = Cli::try_parse_from([
            "version-floor",
            "0.2.0.post1",
            "--baseline",
            "1.0rc1",
            "--package",
            "qalgebra",
            "--json",
            "--log-json",
        ])
        .unwrap();

        assert_eq!(cli.version.as_deref(), Some("0.2.0.post1"));
        assert_eq!(cli.baseline, "1.0-rc1".parse::<VersionIdentifier>().unwrap());
        assert_eq!(cli.package.as_deref(), Some("qalgebra"));
        assert!(cli.json);
        assert!(cli.log_json);
    }

    #[test]
    fn cli_rejects_malformed_baseline() {
        assert!(Cli::try_parse_from(["version-floor", "--baseline", "not-a-version"]).is_err());
    }
}
