use clap::Parser;
use geo_range_containment::config::{self, EngineConfig, Strategy};
use geo_range_containment::output::{print_findings_csv, print_findings_json, print_report};
use geo_range_containment::run_file;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use std::error::Error;
use std::path::Path;

/// Find IP ranges that contain other ranges in a JSON geolocation file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON file holding an array of {ip_range, country_code, ...} records
    file: String,

    /// Detection strategy (overrides RANGE_ENGINE_STRATEGY)
    #[arg(long)]
    strategy: Option<Strategy>,

    /// Print every finding after the summary
    #[arg(long)]
    list: bool,

    /// Print findings as CSV
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Print findings as JSON
    #[arg(long)]
    json: bool,

    /// Only count findings, do not keep them
    #[arg(long, conflicts_with_all = ["list", "csv", "json"])]
    count_only: bool,
}

fn init_logging() -> Result<(), Box<dyn Error>> {
    let log_config = config::log_config_path();
    if Path::new(&log_config).exists() {
        log4rs::init_file(&log_config, Default::default())
            .map_err(|e| format!("Error initializing log4rs from {log_config}: {e}"))?;
    } else {
        let stderr = ConsoleAppender::builder()
            .target(log4rs::append::console::Target::Stderr)
            .build();
        let config = Config::builder()
            .appender(Appender::builder().build("stderr", Box::new(stderr)))
            .build(Root::builder().appender("stderr").build(LevelFilter::Info))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging()?;
    log::info!("#Start main()");

    let mut engine_config = EngineConfig::from_env();
    if let Some(strategy) = cli.strategy {
        engine_config.strategy = strategy;
    }
    if cli.count_only {
        engine_config.collect_findings = false;
    }

    let report = run_file(&cli.file, &engine_config).await?;

    print_report(&report, cli.list);
    if cli.csv {
        print_findings_csv(&report.findings);
    } else if cli.json {
        print_findings_json(&report.findings)?;
    }

    Ok(())
}
