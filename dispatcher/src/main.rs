use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{after, select, tick};
use log::{debug, error, info, warn, LevelFilter};

use dispatcher::{debug as dashboard, Fleet};
use shared_resources::config::{BuildingConfig, DEFAULT_CONFIG_PATH};
use shared_resources::error::Result;

#[derive(Debug, Parser)]
#[command(about = "Simulates a building's passenger and freight elevators")]
struct Args {
    /// Building configuration (JSON)
    #[arg(long, short, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Overrides the configured time per floor-step
    #[arg(long, short)]
    tick_millis: Option<u64>,

    /// How long to run the simulation, in seconds
    #[arg(long, short, default_value_t = 60)]
    duration: u64,

    /// Redraw a status table instead of logging status lines
    #[arg(long, default_value_t = false)]
    dashboard: bool,
}

fn main() {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    if let Err(err) = run(args) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // READ CONFIGURATION
    let mut config = BuildingConfig::get(&args.config)?;
    if let Some(tick_millis) = args.tick_millis {
        config.tick_millis = tick_millis;
    }
    let period = config.tick_period();

    // BUILD AND ACTIVATE THE FLEET
    let fleet = Fleet::from_config(&config)?;
    let handle = fleet.activate(period)?;
    info!("Simulating {} floors for {} seconds", fleet.num_floors(), args.duration);

    let ticker = tick(period);
    let deadline = after(Duration::from_secs(args.duration));
    let mut workload = config.requests.into_iter();
    let mut table = args.dashboard.then(dashboard::Debug::new);

    loop {
        select! {
            recv(ticker) -> _ => {
                if let Some(request) = workload.next() {
                    match fleet.enqueue_request(&request) {
                        Ok(assignment) => info!(
                            "Elevator {} is on its way. Only {} will be taken.",
                            assignment.label, assignment.boarded
                        ),
                        Err(err) => warn!("Request {:?} was not served: {}", request, err),
                    }
                }

                match table.as_mut() {
                    Some(table) => table.printstatus(&fleet.snapshots())?,
                    None => {
                        if let Ok(statuses) = fleet.statuses() {
                            for status in statuses {
                                debug!("{}", status);
                            }
                        }
                    }
                }

                let finished = handle.finished();
                if !finished.is_empty() {
                    error!("Elevators {:?} stopped unexpectedly", finished);
                    break;
                }
            },
            recv(deadline) -> _ => {
                info!("Simulation time is up");
                break;
            },
        }
    }

    handle.shutdown()
}
