use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;
use drt_routing::{
    config::{RoutingConfig, parse_timeout},
    osrm::client::OsrmClient,
    route::RouteResult,
    route_assembler::RouteAssembler,
    schedule_time::ScheduleTime,
    stop::StopRequest,
};
use jiff::Zoned;
use tracing::info;

#[derive(Args)]
pub struct RouteArgs {
    /// JSON file holding the stops in visit order
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Arrival time at the first stop, with a UTC offset (e.g., "2026-02-05T08:00:00+09:00").
    /// Defaults to now in the system time zone
    #[arg(short, long)]
    start: Option<ScheduleTime>,

    /// Fail instead of estimating the route when OSRM is unavailable
    #[arg(long)]
    no_fallback: bool,

    /// Estimate the route without contacting OSRM
    #[arg(long, conflicts_with = "no_fallback")]
    local_only: bool,

    /// Base URL of the OSRM server
    #[arg(long)]
    osrm_url: Option<String>,

    /// Timeout for the OSRM request (e.g., "10s", "PT5S", "30")
    #[arg(long, value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Where to write the route document, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn apply_overrides(config: &mut RoutingConfig, args: &RouteArgs) {
    if let Some(url) = &args.osrm_url {
        config.osrm.osrm_url = url.clone();
    }

    if let Some(timeout) = args.timeout {
        config.osrm.timeout = timeout;
    }

    if args.no_fallback {
        config.assembler.allow_fallback = false;
    }

    if args.local_only {
        config.assembler.local_only = true;
    }
}

fn read_stops(path: &Path) -> anyhow::Result<Vec<StopRequest>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let stops: Vec<StopRequest> = serde_json::from_reader(reader)?;

    Ok(stops)
}

fn write_result(result: &RouteResult, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::with_capacity(64 * 1024, file);
            serde_json::to_writer_pretty(&mut writer, result)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, result)?;
            writeln!(writer)?;
        }
    }

    Ok(())
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let mut config = RoutingConfig::from_env()?;
    apply_overrides(&mut config, &args);

    let stops = read_stops(&args.input)?;
    let start_time = args
        .start
        .unwrap_or_else(|| ScheduleTime::from(&Zoned::now()));

    info!(
        "Routing {} stops from {} starting at {}",
        stops.len(),
        args.input.display(),
        start_time
    );

    let assembler = RouteAssembler::new(OsrmClient::new(config.osrm), config.assembler);
    let result = assembler.assemble(&stops, start_time).await?;

    info!(
        source = ?result.source,
        "Route: {:.2} km, {} min",
        result.total_distance_km,
        result.estimated_duration_minutes
    );

    write_result(&result, args.output.as_deref())
}
