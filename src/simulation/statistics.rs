use serde::Serialize;

use crate::simulation::population::Population;
use crate::simulation::vehicles::Vehicle;

/// Aggregates computed from the final simulation state: how happy the
/// passengers were and how well the fleet was used.
#[derive(Debug, Serialize)]
pub struct SimulationStatistics {
    /// Sum of all ratings over the best possible sum. 1.0 means everybody
    /// boarded the first vehicle and found a seat.
    pub satisfaction_index: f64,
    pub vehicle_occupancy: Vec<VehicleOccupancy>,
    /// Passengers that boarded but never reached their destination because
    /// their vehicle retired with them on board.
    pub stranded_passengers: usize,
}

#[derive(Debug, Serialize)]
pub struct VehicleOccupancy {
    pub vehicle: String,
    pub line: String,
    /// Mean of occupancy over capacity across all stops the vehicle served.
    pub mean_relative_occupancy: f64,
}

impl SimulationStatistics {
    pub fn from_final_state(
        population: &Population,
        fleet: &[Vehicle],
        capacity: usize,
    ) -> Self {
        SimulationStatistics {
            satisfaction_index: satisfaction_index(population),
            vehicle_occupancy: fleet
                .iter()
                .map(|vehicle| VehicleOccupancy {
                    vehicle: vehicle.id().external().to_string(),
                    line: vehicle.line().external().to_string(),
                    mean_relative_occupancy: mean_relative_occupancy(vehicle, capacity),
                })
                .collect(),
            stranded_passengers: fleet
                .iter()
                .map(|vehicle| vehicle.passengers().len())
                .sum(),
        }
    }
}

fn satisfaction_index(population: &Population) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let sum: u64 = population
        .passengers()
        .map(|passenger| passenger.rating() as u64)
        .sum();
    sum as f64 / (population.len() * 5) as f64
}

fn mean_relative_occupancy(vehicle: &Vehicle, capacity: usize) -> f64 {
    let history = vehicle.occupancy_history();
    if history.is_empty() {
        return 0.0;
    }
    let sum: f64 = history
        .iter()
        .map(|occupancy| *occupancy as f64 / capacity as f64)
        .sum();
    sum / history.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::id::Id;
    use crate::simulation::network::line::TransitLine;
    use crate::simulation::network::stop::Stop;
    use crate::simulation::population::Passenger;
    use assert_approx_eq::assert_approx_eq;

    fn population_with_ratings(ratings: &[u8]) -> Population {
        let mut population = Population::default();
        for (i, rating) in ratings.iter().enumerate() {
            let mut passenger =
                Passenger::new(Id::create(&i.to_string()), Id::<Stop>::create("dest"));
            // drive the rating through the public scoring path
            match rating {
                5 => passenger.rate_on_boarding(0, 10),
                4 => passenger.rate_on_boarding(9, 10),
                3 => {
                    passenger.note_skipped();
                    passenger.rate_on_boarding(0, 10);
                }
                2 => {
                    passenger.note_skipped();
                    passenger.note_skipped();
                    passenger.rate_on_boarding(0, 10);
                }
                _ => {}
            }
            population.add(passenger);
        }
        population
    }

    #[test]
    fn satisfaction_index_is_relative_to_best_case() {
        let population = population_with_ratings(&[5, 5, 5, 5]);
        assert_approx_eq!(satisfaction_index(&population), 1.0);

        let population = population_with_ratings(&[5, 3, 1, 1]);
        assert_approx_eq!(satisfaction_index(&population), 10.0 / 20.0);
    }

    #[test]
    fn satisfaction_index_of_empty_population() {
        assert_approx_eq!(satisfaction_index(&Population::default()), 0.0);
    }

    #[test]
    fn occupancy_is_averaged_over_served_stops() {
        let line = TransitLine::new(Id::create("A"));
        let mut vehicle = Vehicle::new(Id::create("v"), line.id().clone());
        vehicle.record_occupancy();
        assert_approx_eq!(mean_relative_occupancy(&vehicle, 2), 0.0);

        let stats = SimulationStatistics::from_final_state(
            &Population::default(),
            std::slice::from_ref(&vehicle),
            2,
        );
        assert_eq!(stats.vehicle_occupancy.len(), 1);
        assert_eq!(stats.vehicle_occupancy[0].vehicle, "v");
        assert_eq!(stats.stranded_passengers, 0);
    }

    #[test]
    fn vehicle_without_history_has_zero_occupancy() {
        let line = TransitLine::new(Id::create("A"));
        let vehicle = Vehicle::new(Id::create("v"), line.id().clone());
        assert_approx_eq!(mean_relative_occupancy(&vehicle, 5), 0.0);
    }

    #[test]
    fn passengers_on_board_at_the_end_count_as_stranded() {
        let mut line = TransitLine::new(Id::create("A"));
        line.add_stop(Id::create("0"));
        line.add_stop(Id::create("1"));

        let mut stop = Stop::new(Id::get_from_ext("0"), String::from("first"));
        let mut population = Population::default();
        let passenger = Id::<Passenger>::create("p");
        population.add(Passenger::new(passenger.clone(), Id::get_from_ext("1")));
        stop.add_waiting(passenger);

        let mut vehicle = Vehicle::new(Id::create("v"), line.id().clone());
        vehicle.board_from(&mut stop, &line, 0, 10, &mut population);

        let stats = SimulationStatistics::from_final_state(
            &population,
            std::slice::from_ref(&vehicle),
            10,
        );
        assert_eq!(stats.stranded_passengers, 1);
    }
}
