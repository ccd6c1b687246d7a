use std::any::Any;
use std::fmt::Debug;

use tracing::info;

use crate::simulation::id::Id;
use crate::simulation::network::line::TransitLine;
use crate::simulation::network::stop::Stop;
use crate::simulation::population::Passenger;
use crate::simulation::vehicles::Vehicle;

/// Everything observable about a simulation run. The engine publishes these,
/// subscribers turn them into console output, files or test assertions. The
/// tick number is passed alongside, not stored in the event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TickStarted,
    VehicleArrived {
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
    },
    PassengerAlighted {
        passenger: Id<Passenger>,
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
    },
    PassengerBoarded {
        passenger: Id<Passenger>,
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
    },
    VehicleDeparted {
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
        alighted: usize,
        boarded: usize,
        occupancy: usize,
    },
    VehicleFull {
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
        waiting_reachable: usize,
    },
    LapCompleted {
        vehicle: Id<Vehicle>,
        line: Id<TransitLine>,
        lap: u32,
    },
    SimulationFinished,
}

impl Event {
    pub fn new_vehicle_arrived(vehicle: Id<Vehicle>, stop: Id<Stop>) -> Event {
        Event::VehicleArrived { vehicle, stop }
    }

    pub fn new_passenger_alighted(
        passenger: Id<Passenger>,
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
    ) -> Event {
        Event::PassengerAlighted {
            passenger,
            vehicle,
            stop,
        }
    }

    pub fn new_passenger_boarded(
        passenger: Id<Passenger>,
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
    ) -> Event {
        Event::PassengerBoarded {
            passenger,
            vehicle,
            stop,
        }
    }

    pub fn new_vehicle_departed(
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
        alighted: usize,
        boarded: usize,
        occupancy: usize,
    ) -> Event {
        Event::VehicleDeparted {
            vehicle,
            stop,
            alighted,
            boarded,
            occupancy,
        }
    }

    pub fn new_vehicle_full(
        vehicle: Id<Vehicle>,
        stop: Id<Stop>,
        waiting_reachable: usize,
    ) -> Event {
        Event::VehicleFull {
            vehicle,
            stop,
            waiting_reachable,
        }
    }

    pub fn new_lap_completed(vehicle: Id<Vehicle>, line: Id<TransitLine>, lap: u32) -> Event {
        Event::LapCompleted { vehicle, line, lap }
    }
}

pub trait EventsSubscriber {
    fn receive_event(&mut self, time: u32, event: &Event);

    fn finish(&mut self) {}

    fn as_any(&mut self) -> &mut dyn Any;
}

impl Debug for dyn EventsSubscriber + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EventsSubscriber")
    }
}

pub struct EventsLogger {}

impl EventsSubscriber for EventsLogger {
    fn receive_event(&mut self, time: u32, event: &Event) {
        info!("{time}: {event:?}");
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

/// EventsPublisher owns event handlers. Handlers are trait objects, hence they
/// have to be passed in a Box. On publish_event all handlers' receive_event
/// methods are called.
#[derive(Default, Debug)]
pub struct EventsPublisher {
    handlers: Vec<Box<dyn EventsSubscriber + Send>>,
}

impl EventsPublisher {
    pub fn new() -> Self {
        EventsPublisher {
            handlers: Vec::new(),
        }
    }

    pub fn add_subscriber(&mut self, handler: Box<dyn EventsSubscriber + Send>) {
        self.handlers.push(handler);
    }

    pub fn publish_event(&mut self, time: u32, event: &Event) {
        for handler in self.handlers.iter_mut() {
            handler.receive_event(time, event);
        }
    }

    pub fn finish(&mut self) {
        for handler in self.handlers.iter_mut() {
            handler.finish();
        }
    }

    pub fn get_subscriber<T: EventsSubscriber + 'static>(&mut self) -> Option<&mut T> {
        let mut result = None;
        for handler in self.handlers.iter_mut() {
            if let Some(subscriber) = handler.as_any().downcast_mut::<T>() {
                result = Some(subscriber)
            };
        }
        result
    }
}
