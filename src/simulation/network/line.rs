use nohash_hasher::{IntMap, IntSet};

use crate::simulation::id::Id;
use crate::simulation::network::stop::Stop;

/// A transit line: the fixed, ordered sequence of stops a vehicle traverses.
/// Keeps a stop -> position index so reachability checks are O(1).
#[derive(Debug)]
pub struct TransitLine {
    id: Id<TransitLine>,
    stops: Vec<Id<Stop>>,
    stop_index: IntMap<Id<Stop>, usize>,
}

impl TransitLine {
    pub fn new(id: Id<TransitLine>) -> Self {
        TransitLine {
            id,
            stops: Vec::new(),
            stop_index: IntMap::default(),
        }
    }

    pub fn id(&self) -> &Id<TransitLine> {
        &self.id
    }

    /// Appends a stop to the line. Stops appear at most once, duplicates are
    /// ignored. The index map is rebuilt on every append so it never goes
    /// stale.
    pub fn add_stop(&mut self, stop: Id<Stop>) {
        if self.stop_index.contains_key(&stop) {
            return;
        }
        self.stops.push(stop);
        self.rebuild_index();
    }

    fn rebuild_index(&mut self) {
        self.stop_index.clear();
        for (i, stop) in self.stops.iter().enumerate() {
            self.stop_index.insert(stop.clone(), i);
        }
    }

    pub fn stops(&self) -> &[Id<Stop>] {
        &self.stops
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn position_of(&self, stop: &Id<Stop>) -> Option<usize> {
        self.stop_index.get(stop).copied()
    }

    /// Whether `stop` lies strictly after `position` on this line.
    pub fn is_ahead_of(&self, stop: &Id<Stop>, position: usize) -> bool {
        self.stop_index
            .get(stop)
            .is_some_and(|index| *index > position)
    }

    /// All stops strictly after `position`, i.e. the destinations a vehicle
    /// standing at `position` can still serve.
    pub fn reachable_from(&self, position: usize) -> IntSet<Id<Stop>> {
        self.stops.iter().skip(position + 1).cloned().collect()
    }
}
