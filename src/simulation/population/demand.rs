use rand::Rng;
use tracing::info;

use crate::simulation::id::Id;
use crate::simulation::network::stop::Stop;
use crate::simulation::network::Network;
use crate::simulation::population::{Passenger, Population};
use crate::simulation::random;

/// Generates the passenger demand before the first tick. Every stop of a line
/// except the last one gets between 1 and `max_per_stop` passengers, each with
/// a destination drawn from the stops further down the line, so every
/// generated trip is servable by that line.
pub struct DemandGenerator {
    max_per_stop: u32,
    base_seed: u64,
}

impl DemandGenerator {
    pub fn new(max_per_stop: u32, base_seed: u64) -> Self {
        DemandGenerator {
            max_per_stop,
            base_seed,
        }
    }

    /// Creates all passengers and queues them at their origin stops. The
    /// returned population is the registry handed to the statistics at the
    /// end of the run.
    pub fn generate(&self, network: &mut Network) -> Population {
        let mut population = Population::default();
        let mut next_id: u64 = 0;

        for line_id in &network.line_order {
            let line = network.lines.get(line_id).unwrap();
            // one generator per line, so adding a line does not reshuffle the
            // demand of the others
            let mut rng = random::get_rnd(self.base_seed, line_id.external());

            let stops: Vec<Id<Stop>> = line.stops().to_vec();
            for (origin_index, origin) in stops.iter().enumerate().take(stops.len().saturating_sub(1))
            {
                let count = rng.random_range(1..=self.max_per_stop);
                for _ in 0..count {
                    let destination_index = rng.random_range(origin_index + 1..stops.len());
                    let id = Id::<Passenger>::create(&next_id.to_string());
                    next_id += 1;

                    population.add(Passenger::new(id.clone(), stops[destination_index].clone()));
                    network.stops.get_mut(origin).unwrap().add_waiting(id);
                }
            }
        }

        info!("Generated {} passengers", population.len());
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::network::line::TransitLine;

    fn network_with_line(line_ext: &str, stop_exts: &[&str]) -> Network {
        let mut network = Network::default();
        let mut line = TransitLine::new(Id::create(line_ext));
        for ext in stop_exts {
            let id = Id::<Stop>::create(ext);
            network.add_stop(Stop::new(id.clone(), format!("stop {ext}")));
            line.add_stop(id);
        }
        network.add_line(line);
        network
    }

    #[test]
    fn destinations_lie_ahead_of_origins() {
        let mut network = network_with_line("A", &["0", "1", "2", "3"]);
        let population = DemandGenerator::new(5, 42).generate(&mut network);

        assert!(!population.is_empty());

        let line = network.line(&network.line_order[0]);
        for (position, stop_id) in line.stops().iter().enumerate() {
            for passenger in network.stop(stop_id).waiting() {
                let destination = population.passenger(passenger).destination();
                assert!(line.is_ahead_of(destination, position));
            }
        }
    }

    #[test]
    fn last_stop_gets_no_passengers() {
        let mut network = network_with_line("A", &["0", "1", "2"]);
        DemandGenerator::new(3, 42).generate(&mut network);

        let line = network.line(&network.line_order[0]);
        let last = line.stops().last().unwrap();
        assert!(network.stop(last).waiting().is_empty());
    }

    #[test]
    fn per_stop_bound_is_respected() {
        let mut network = network_with_line("A", &["0", "1", "2"]);
        DemandGenerator::new(2, 42).generate(&mut network);

        let line = network.line(&network.line_order[0]);
        for stop_id in line.stops() {
            let waiting = network.stop(stop_id).waiting().len();
            assert!(waiting <= 2, "stop {stop_id} has {waiting} waiting");
        }
    }

    #[test]
    fn same_seed_generates_same_demand() {
        let mut first = network_with_line("A", &["0", "1", "2"]);
        let first_population = DemandGenerator::new(3, 99).generate(&mut first);

        let mut second = network_with_line("A", &["0", "1", "2"]);
        let second_population = DemandGenerator::new(3, 99).generate(&mut second);

        assert_eq!(first_population.len(), second_population.len());
        let line = first.line(&first.line_order[0]);
        for stop_id in line.stops() {
            let first_waiting: Vec<&str> = first
                .stop(stop_id)
                .waiting()
                .iter()
                .map(|id| id.external())
                .collect();
            let second_waiting: Vec<&str> = second
                .stop(stop_id)
                .waiting()
                .iter()
                .map(|id| id.external())
                .collect();
            assert_eq!(first_waiting, second_waiting);
        }
    }
}
