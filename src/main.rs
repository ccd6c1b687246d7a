use clap::Parser;
use rust_transit_sim::simulation::config::{CommandLineArgs, Config};
use rust_transit_sim::simulation::controller;
use rust_transit_sim::simulation::logging::init_std_out_logging_thread_local;
use std::sync::Arc;
use tracing::info;

fn main() {
    let _guard = init_std_out_logging_thread_local();

    let args = CommandLineArgs::parse();
    info!("Started with args: {:?}", args);

    let config = Arc::new(Config::from(args));

    controller::run(config);
}
