use crate::simulation::id::Id;
use crate::simulation::network::line::TransitLine;
use crate::simulation::network::stop::Stop;
use crate::simulation::network::Network;
use crate::simulation::population::{Passenger, Population};

/// A vehicle serving exactly one line for its whole lifetime. It owns its
/// manifest (the passengers on board, in boarding order) and the occupancy
/// history with one entry per stop it served.
#[derive(Debug)]
pub struct Vehicle {
    id: Id<Vehicle>,
    line: Id<TransitLine>,
    passengers: Vec<Id<Passenger>>,
    occupancy_history: Vec<usize>,
}

impl Vehicle {
    pub fn new(id: Id<Vehicle>, line: Id<TransitLine>) -> Self {
        Vehicle {
            id,
            line,
            passengers: Vec::new(),
            occupancy_history: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id<Vehicle> {
        &self.id
    }

    pub fn line(&self) -> &Id<TransitLine> {
        &self.line
    }

    pub fn passengers(&self) -> &[Id<Passenger>] {
        &self.passengers
    }

    pub fn occupancy(&self) -> usize {
        self.passengers.len()
    }

    pub fn occupancy_history(&self) -> &[usize] {
        &self.occupancy_history
    }

    /// Lets every passenger whose destination is `stop` get off, in manifest
    /// order. Must run before boarding at the same stop, so freed seats are
    /// available again.
    pub fn alight_at(
        &mut self,
        stop: &Id<Stop>,
        population: &mut Population,
    ) -> Vec<Id<Passenger>> {
        let mut alighted = Vec::new();
        let mut i = 0;
        while i < self.passengers.len() {
            if population.passenger(&self.passengers[i]).destination() == stop {
                let passenger = self.passengers.remove(i);
                population.passenger_mut(&passenger).mark_alighted();
                alighted.push(passenger);
            } else {
                i += 1;
            }
        }
        alighted
    }

    /// Boards passengers waiting at `stop` whose destination lies further down
    /// the line, bounded by the free capacity. Each boarder is rated right
    /// here, with its position in the manifest it just joined.
    pub fn board_from(
        &mut self,
        stop: &mut Stop,
        line: &TransitLine,
        position: usize,
        capacity: usize,
        population: &mut Population,
    ) -> Vec<Id<Passenger>> {
        let slots = capacity - self.passengers.len();
        let reachable = line.reachable_from(position);
        let boarders = stop.select_boarders(&reachable, slots, population);

        for passenger in &boarders {
            population
                .passenger_mut(passenger)
                .rate_on_boarding(self.passengers.len(), capacity);
            self.passengers.push(passenger.clone());
        }
        assert!(
            self.passengers.len() <= capacity,
            "vehicle {} exceeds its capacity of {capacity}",
            self.id
        );
        boarders
    }

    pub fn record_occupancy(&mut self) {
        self.occupancy_history.push(self.passengers.len());
    }
}

/// One vehicle per line, in line order, like the original fleet roster.
pub fn create_fleet(network: &Network) -> Vec<Vehicle> {
    network
        .line_order
        .iter()
        .enumerate()
        .map(|(i, line)| Vehicle::new(Id::create(&i.to_string()), line.clone()))
        .collect()
}
