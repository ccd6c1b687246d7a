use nohash_hasher::IntSet;

use crate::simulation::id::Id;
use crate::simulation::population::{Passenger, Population};

/// A transit stop. Holds the passengers waiting at it in the order they were
/// generated, which is also the order in which they get to board.
#[derive(Debug)]
pub struct Stop {
    id: Id<Stop>,
    name: String,
    waiting: Vec<Id<Passenger>>,
}

impl Stop {
    pub fn new(id: Id<Stop>, name: String) -> Self {
        Stop {
            id,
            name,
            waiting: Vec::new(),
        }
    }

    pub fn id(&self) -> &Id<Stop> {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_waiting(&mut self, passenger: Id<Passenger>) {
        self.waiting.push(passenger);
    }

    pub fn waiting(&self) -> &[Id<Passenger>] {
        &self.waiting
    }

    /// Selects the passengers which board a vehicle with `slots` free seats
    /// whose remaining stops are `reachable`. The queue is scanned in insertion
    /// order and selected passengers are removed from it, so a passenger is
    /// either waiting here or on board, never both.
    pub fn select_boarders(
        &mut self,
        reachable: &IntSet<Id<Stop>>,
        slots: usize,
        population: &Population,
    ) -> Vec<Id<Passenger>> {
        let mut selected = Vec::new();
        let mut i = 0;
        while i < self.waiting.len() && selected.len() < slots {
            let destination = population.passenger(&self.waiting[i]).destination();
            if reachable.contains(destination) {
                selected.push(self.waiting.remove(i));
            } else {
                i += 1;
            }
        }
        selected
    }

    /// Called once a vehicle has finished boarding here. Everybody still in the
    /// queue has watched one more vehicle leave without them.
    pub fn record_skips(&self, population: &mut Population) {
        for passenger in &self.waiting {
            population.passenger_mut(passenger).note_skipped();
        }
    }

    pub fn count_reachable_waiting(
        &self,
        reachable: &IntSet<Id<Stop>>,
        population: &Population,
    ) -> usize {
        self.waiting
            .iter()
            .filter(|p| reachable.contains(population.passenger(p).destination()))
            .count()
    }
}
