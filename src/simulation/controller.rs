use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

use itertools::Itertools;
use tracing::info;

use crate::simulation::config::{Config, WriteEvents};
use crate::simulation::engines::transit_engine::TransitEngine;
use crate::simulation::events::{EventsLogger, EventsPublisher};
use crate::simulation::io;
use crate::simulation::io::text_events::TextEventsWriter;
use crate::simulation::scenario::Scenario;
use crate::simulation::statistics::SimulationStatistics;

/// Runs a complete simulation: load the scenario, wire the event sinks, drive
/// the engine to termination, then write the statistics.
pub fn run(config: Arc<Config>) {
    let output_path = io::resolve_path(config.context(), &config.output.output_dir);
    fs::create_dir_all(&output_path).expect("Failed to create output path");

    let _guards = crate::simulation::logging::init_logging(&config);

    let scenario =
        Scenario::load(config.clone()).unwrap_or_else(|e| panic!("Failed to load scenario: {e}"));

    let mut events = EventsPublisher::new();
    events.add_subscriber(Box::new(EventsLogger {}));
    if config.output.write_events == WriteEvents::Text {
        events.add_subscriber(Box::new(TextEventsWriter::new(
            output_path.join("events.txt"),
        )));
    }

    let mut engine = TransitEngine::new(scenario, events);
    engine.run();

    let statistics = SimulationStatistics::from_final_state(
        engine.population(),
        engine.fleet(),
        config.simulation.vehicle_capacity,
    );
    report(&statistics);

    let stats_path = output_path.join("stats.json");
    info!("Writing statistics to {stats_path:?}");
    let writer = BufWriter::new(File::create(&stats_path).expect("Failed to create stats file"));
    serde_json::to_writer_pretty(writer, &statistics).expect("Failed to write statistics");
}

fn report(statistics: &SimulationStatistics) {
    info!(
        "Satisfaction index: {:.2}",
        statistics.satisfaction_index
    );
    info!(
        "Mean relative occupancy per vehicle: {}",
        statistics
            .vehicle_occupancy
            .iter()
            .map(|o| format!("{} (line {}): {:.2}", o.vehicle, o.line, o.mean_relative_occupancy))
            .join(", ")
    );
    if statistics.stranded_passengers > 0 {
        info!(
            "{} passengers were still on board when their vehicle retired",
            statistics.stranded_passengers
        );
    }
}
