use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use u_apportion::engine::{Apportioner, Comparison};
use u_apportion::methods::SearchConfig;
use u_apportion::models::{ApportionRequest, Method, MethodSelection};
use u_apportion::ApportionError;

#[derive(Parser, Debug)]
#[command(
    name = "u-apportion",
    about = "Apportion TA shifts across time slots and compare allocation methods",
    version
)]
struct Cli {
    /// Students per time slot, comma separated
    #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
    demand: Vec<i64>,
    /// Number of TAs
    #[arg(long, allow_negative_numbers = true)]
    tas: i64,
    /// Shifts each TA works
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    shifts_per_ta: i64,
    /// Run only these methods (hamilton, jefferson, adam, webster, huntington, huntington-arithmetic)
    #[arg(long, value_delimiter = ',')]
    only: Vec<Method>,
    /// Iteration bound for divisor search
    #[arg(long, env = "APPORTION_MAX_ITERATIONS", default_value_t = 100_000)]
    max_iterations: usize,
    /// Optional wall-clock bound for divisor search, in milliseconds
    #[arg(long, env = "APPORTION_TIME_LIMIT_MS")]
    time_limit_ms: Option<u64>,
    /// Emit the raw apportionment as JSON instead of the comparison summary
    #[arg(long)]
    json: bool,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "APPORTION_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid log level/filter '{value}': {source}")]
    Filter {
        value: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
    #[error(transparent)]
    Apportion(#[from] ApportionError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn init_tracing(log_level: &str) -> Result<(), CliError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(log_level).map_err(|source| CliError::Filter {
            value: log_level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(CliError::Subscriber)
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let selection = if cli.only.is_empty() {
        MethodSelection::all()
    } else {
        cli.only.iter().copied().collect()
    };
    let request = ApportionRequest::from_raw(&cli.demand, cli.tas, cli.shifts_per_ta)?
        .with_selection(selection);

    let mut config = SearchConfig::default().with_max_iterations(cli.max_iterations);
    if let Some(ms) = cli.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    let apportionment = Apportioner::with_search_config(config).apportion(&request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&apportionment)?);
    } else {
        println!(
            "{} slots, {} students, {} shifts to apportion (standard divisor {:.4})",
            request.slot_count(),
            apportionment.total_demand,
            apportionment.capacity,
            apportionment.standard_divisor
        );
        println!();
        println!("{}", Comparison::calculate(&apportionment));
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("u-apportion: {err}");
        std::process::exit(1);
    }
}
