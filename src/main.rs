mod args;
mod dashboard;

use clap::Parser;
use log::{info, warn};
use snafu::ErrorCompat;

use crate::args::Args;
use crate::dashboard::FilterOverrides;

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    info!("args: {:?}", args);

    let overrides = FilterOverrides {
        year: args.year,
        party: args.party.clone(),
        comparison_year: args.comparison_year,
    };

    let res = dashboard::run_dashboard(
        args.config.clone(),
        &overrides,
        args.out.clone(),
        args.reference.clone(),
    );
    if let Err(e) = res {
        warn!("Error occured {:?}", e);
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
