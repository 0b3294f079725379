use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use saskatoon_bus::config::AgencyRules;
use saskatoon_bus::feed::Feed;
use saskatoon_bus::pipeline::Pipeline;
use saskatoon_bus::sink::CollectedMetadata;

/// Canonicalize a Saskatoon Transit feed snapshot and print its display metadata.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Rule table to use instead of the built-in Saskatoon one
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Feed snapshot as JSON
    feed: PathBuf,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let rules = match &args.rules {
        Some(path) => {
            info!(path = %path.display(), "loading rules");
            AgencyRules::from_path(path)?
        }
        None => AgencyRules::saskatoon()?,
    };

    let json = std::fs::read_to_string(&args.feed)
        .map_err(|e| format!("failed to read feed {}: {e}", args.feed.display()))?;
    let feed: Feed = serde_json::from_str(&json)?;

    let mut sink = CollectedMetadata::new();
    Pipeline::new(rules).run(&feed, &mut sink)?;

    println!("{}", serde_json::to_string_pretty(&sink)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn rules_flag_is_optional() {
        let args = Args::try_parse_from(["saskatoon-bus", "feed.json"]).unwrap();
        assert_eq!(args.feed, PathBuf::from("feed.json"));
        assert!(args.rules.is_none());

        let args =
            Args::try_parse_from(["saskatoon-bus", "--rules", "r.json", "feed.json"]).unwrap();
        assert_eq!(args.rules, Some(PathBuf::from("r.json")));
        assert_eq!(args.feed, PathBuf::from("feed.json"));
    }

    #[test]
    fn feed_is_required() {
        assert!(Args::try_parse_from(["saskatoon-bus", "--rules", "r.json"]).is_err());
    }
}
