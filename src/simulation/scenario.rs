use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::simulation::config::Config;
use crate::simulation::io;
use crate::simulation::network::{Network, NetworkLoadError};
use crate::simulation::population::demand::DemandGenerator;
use crate::simulation::population::Population;
use crate::simulation::vehicles::{self, Vehicle};

/// The full input of a run: the loaded network, the fleet, and the generated
/// demand. Everything the engine needs, validated and ready.
#[derive(Debug)]
pub struct Scenario {
    pub network: Network,
    pub fleet: Vec<Vehicle>,
    pub population: Population,
    pub config: Arc<Config>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Network(#[from] NetworkLoadError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Scenario {
    pub fn load(config: Arc<Config>) -> Result<Self, ScenarioError> {
        info!("Start loading scenario.");
        Self::validate(&config)?;

        let stops_path = io::resolve_path(config.context(), &config.transit.stops_file);
        let lines_path = io::resolve_path(config.context(), &config.transit.lines_file);
        let mut network = Network::from_files(&stops_path, &lines_path)?;

        let fleet = vehicles::create_fleet(&network);
        let generator = DemandGenerator::new(
            config.demand.max_passengers_per_stop,
            config.demand.random_seed,
        );
        let population = generator.generate(&mut network);

        info!(
            "Scenario loaded: {} stops, {} lines, {} vehicles, {} passengers",
            network.stops.len(),
            network.lines.len(),
            fleet.len(),
            population.len()
        );

        Ok(Scenario {
            network,
            fleet,
            population,
            config,
        })
    }

    fn validate(config: &Config) -> Result<(), ScenarioError> {
        if config.simulation.vehicle_capacity == 0 {
            return Err(ScenarioError::InvalidConfig(String::from(
                "vehicle_capacity must be positive",
            )));
        }
        if config.simulation.max_laps == 0 {
            return Err(ScenarioError::InvalidConfig(String::from(
                "max_laps must be positive",
            )));
        }
        if config.demand.max_passengers_per_stop == 0 {
            return Err(ScenarioError::InvalidConfig(String::from(
                "max_passengers_per_stop must be positive",
            )));
        }
        Ok(())
    }
}
