use nohash_hasher::IntMap;
use tracing::info;

use crate::simulation::events::{Event, EventsPublisher};
use crate::simulation::id::Id;
use crate::simulation::network::Network;
use crate::simulation::population::Population;
use crate::simulation::scenario::Scenario;
use crate::simulation::vehicles::Vehicle;

/// Where a vehicle stands on its route and how many laps it has completed.
/// Only the engine mutates this.
#[derive(Debug, Default, Clone, Copy)]
pub struct VehicleProgress {
    pub position: usize,
    pub laps: u32,
}

/// The tick loop. Each tick every vehicle that has laps left serves one stop
/// (alight, then board, then record occupancy) or wraps up its current lap.
/// The loop ends once a whole tick passes in which no vehicle did anything.
pub struct TransitEngine {
    capacity: usize,
    max_laps: u32,
    network: Network,
    fleet: Vec<Vehicle>,
    progress: IntMap<Id<Vehicle>, VehicleProgress>,
    population: Population,
    events: EventsPublisher,
}

impl TransitEngine {
    pub fn new(scenario: Scenario, events: EventsPublisher) -> Self {
        let simulation = &scenario.config.simulation;
        Self::from_parts(
            scenario.network,
            scenario.fleet,
            scenario.population,
            simulation.vehicle_capacity,
            simulation.max_laps,
            events,
        )
    }

    pub fn from_parts(
        network: Network,
        fleet: Vec<Vehicle>,
        population: Population,
        capacity: usize,
        max_laps: u32,
        events: EventsPublisher,
    ) -> Self {
        let progress = fleet
            .iter()
            .map(|vehicle| (vehicle.id().clone(), VehicleProgress::default()))
            .collect();

        TransitEngine {
            capacity,
            max_laps,
            network,
            fleet,
            progress,
            population,
            events,
        }
    }

    pub fn run(&mut self) {
        info!(
            "Starting transit simulation: {} vehicles, {} passengers, capacity {}, {} laps",
            self.fleet.len(),
            self.population.len(),
            self.capacity,
            self.max_laps
        );

        let mut now: u32 = 1;
        loop {
            self.events.publish_event(now, &Event::TickStarted);

            let mut active = false;
            for i in 0..self.fleet.len() {
                if self.step_vehicle(now, i) {
                    active = true;
                }
            }

            if !active {
                break;
            }
            now += 1;
        }

        self.events.publish_event(now, &Event::SimulationFinished);
        info!("Simulation finished after tick {now}");
        self.events.finish();
    }

    /// Advances one vehicle by one tick. Returns whether the vehicle was
    /// active, i.e. whether it will do anything in a future tick.
    fn step_vehicle(&mut self, now: u32, index: usize) -> bool {
        let vehicle = &mut self.fleet[index];
        let progress = self.progress.get_mut(vehicle.id()).unwrap();

        if progress.laps >= self.max_laps {
            return false;
        }

        let line = self.network.lines.get(vehicle.line()).unwrap();
        if progress.position < line.stop_count() {
            let stop_id = line.stops()[progress.position].clone();
            let stop = self.network.stops.get_mut(&stop_id).unwrap();

            self.events.publish_event(
                now,
                &Event::new_vehicle_arrived(vehicle.id().clone(), stop_id.clone()),
            );

            // passengers leave first, so their seats are free for boarding
            let alighted = vehicle.alight_at(&stop_id, &mut self.population);
            for passenger in &alighted {
                self.events.publish_event(
                    now,
                    &Event::new_passenger_alighted(
                        passenger.clone(),
                        vehicle.id().clone(),
                        stop_id.clone(),
                    ),
                );
            }

            let boarded = vehicle.board_from(
                stop,
                line,
                progress.position,
                self.capacity,
                &mut self.population,
            );
            for passenger in &boarded {
                self.events.publish_event(
                    now,
                    &Event::new_passenger_boarded(
                        passenger.clone(),
                        vehicle.id().clone(),
                        stop_id.clone(),
                    ),
                );
            }

            // everybody this vehicle left behind has now been passed once more
            stop.record_skips(&mut self.population);
            vehicle.record_occupancy();

            self.events.publish_event(
                now,
                &Event::new_vehicle_departed(
                    vehicle.id().clone(),
                    stop_id.clone(),
                    alighted.len(),
                    boarded.len(),
                    vehicle.occupancy(),
                ),
            );

            if vehicle.occupancy() == self.capacity {
                let reachable = line.reachable_from(progress.position);
                let waiting = stop.count_reachable_waiting(&reachable, &self.population);
                self.events.publish_event(
                    now,
                    &Event::new_vehicle_full(vehicle.id().clone(), stop_id, waiting),
                );
            }

            progress.position += 1;
            true
        } else {
            progress.laps += 1;
            self.events.publish_event(
                now,
                &Event::new_lap_completed(
                    vehicle.id().clone(),
                    vehicle.line().clone(),
                    progress.laps,
                ),
            );
            if progress.laps < self.max_laps {
                progress.position = 0;
                true
            } else {
                false
            }
        }
    }

    pub fn events(&mut self) -> &mut EventsPublisher {
        &mut self.events
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn fleet(&self) -> &[Vehicle] {
        &self.fleet
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    #[cfg(test)]
    fn progress_of(&self, vehicle: &Id<Vehicle>) -> VehicleProgress {
        *self.progress.get(vehicle).unwrap()
    }
}
