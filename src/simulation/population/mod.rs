use nohash_hasher::IntMap;

use crate::simulation::id::Id;
use crate::simulation::network::stop::Stop;

pub mod demand;

/// Worst rating, and the default: this passenger never got on a vehicle.
pub const RATING_NEVER_BOARDED: u8 = 1;

/// A passenger wants to get from the stop it waits at to its destination.
/// The destination never changes; the skip count and the rating do.
#[derive(Debug)]
pub struct Passenger {
    id: Id<Passenger>,
    destination: Id<Stop>,
    skips: u32,
    rating: u8,
    alighted: bool,
}

impl Passenger {
    pub fn new(id: Id<Passenger>, destination: Id<Stop>) -> Self {
        Passenger {
            id,
            destination,
            skips: 0,
            rating: RATING_NEVER_BOARDED,
            alighted: false,
        }
    }

    pub fn id(&self) -> &Id<Passenger> {
        &self.id
    }

    pub fn destination(&self) -> &Id<Stop> {
        &self.destination
    }

    pub fn skips(&self) -> u32 {
        self.skips
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn note_skipped(&mut self) {
        self.skips += 1;
    }

    /// Rates the trip at the moment of boarding. A passenger boarding the first
    /// vehicle it sees gets a 5 when it finds a seat (front half of the
    /// capacity) and a 4 when it has to stand. One skipped vehicle gives a 3,
    /// anything beyond that a 2.
    pub fn rate_on_boarding(&mut self, manifest_position: usize, capacity: usize) {
        debug_assert_eq!(
            self.rating, RATING_NEVER_BOARDED,
            "passenger {} was rated twice",
            self.id
        );
        self.rating = match self.skips {
            0 => {
                if manifest_position < capacity / 2 {
                    5
                } else {
                    4
                }
            }
            1 => 3,
            _ => 2,
        };
    }

    pub fn mark_alighted(&mut self) {
        self.alighted = true;
    }

    pub fn has_alighted(&self) -> bool {
        self.alighted
    }

    pub fn has_boarded(&self) -> bool {
        self.rating > RATING_NEVER_BOARDED
    }
}

/// Owns every passenger record of a simulation run. Stops and vehicles refer
/// to passengers by id only, so this registry is the single place to look a
/// passenger up, and it is what the statistics read after the run.
#[derive(Debug, Default)]
pub struct Population {
    passengers: IntMap<Id<Passenger>, Passenger>,
}

impl Population {
    pub fn add(&mut self, passenger: Passenger) {
        self.passengers.insert(passenger.id().clone(), passenger);
    }

    pub fn passenger(&self, id: &Id<Passenger>) -> &Passenger {
        self.passengers.get(id).unwrap()
    }

    pub fn passenger_mut(&mut self, id: &Id<Passenger>) -> &mut Passenger {
        self.passengers.get_mut(id).unwrap()
    }

    pub fn passengers(&self) -> impl Iterator<Item = &Passenger> {
        self.passengers.values()
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger() -> Passenger {
        Passenger::new(Id::create("0"), Id::create("42"))
    }

    #[test]
    fn rating_defaults_to_never_boarded() {
        let p = passenger();
        assert_eq!(p.rating(), RATING_NEVER_BOARDED);
        assert!(!p.has_boarded());
    }

    #[test]
    fn first_vehicle_seated() {
        let mut p = passenger();
        p.rate_on_boarding(4, 10);
        assert_eq!(p.rating(), 5);
        assert!(p.has_boarded());
    }

    #[test]
    fn first_vehicle_standing() {
        let mut p = passenger();
        p.rate_on_boarding(5, 10);
        assert_eq!(p.rating(), 4);
    }

    #[test]
    fn one_skip_rates_three() {
        let mut p = passenger();
        p.note_skipped();
        p.rate_on_boarding(0, 10);
        assert_eq!(p.rating(), 3);
    }

    #[test]
    fn many_skips_rate_two() {
        let mut p = passenger();
        p.note_skipped();
        p.note_skipped();
        p.note_skipped();
        p.rate_on_boarding(0, 10);
        assert_eq!(p.rating(), 2);
    }

    #[test]
    fn capacity_one_has_no_seats() {
        // capacity / 2 == 0, so even the first boarder stands
        let mut p = passenger();
        p.rate_on_boarding(0, 1);
        assert_eq!(p.rating(), 4);
    }

    #[test]
    #[should_panic(expected = "rated twice")]
    #[cfg(debug_assertions)]
    fn double_rating_panics() {
        let mut p = passenger();
        p.rate_on_boarding(0, 10);
        p.rate_on_boarding(0, 10);
    }
}
