use std::any::Any;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::simulation::events::{Event, EventsSubscriber};

/// Writes the event stream as plain text, one message per event, the same
/// narrative the console log tells. Attached as an events subscriber when the
/// run is configured to keep a transcript file.
pub struct TextEventsWriter {
    writer: BufWriter<File>,
}

impl TextEventsWriter {
    pub fn new(path: PathBuf) -> Self {
        info!("Creating file: {path:?}");
        let file = File::create(&path).expect("Failed to create events file.");
        TextEventsWriter {
            writer: BufWriter::new(file),
        }
    }

    pub fn event_2_string(time: u32, event: &Event) -> String {
        match event {
            Event::TickStarted => {
                format!("=== tick {time} ===\n")
            }
            Event::VehicleArrived { vehicle, stop } => {
                format!("vehicle {vehicle} arrived at stop {stop}\n")
            }
            Event::PassengerAlighted {
                passenger,
                vehicle,
                stop,
            } => {
                format!("passenger {passenger} alighted from vehicle {vehicle} at stop {stop}\n")
            }
            Event::PassengerBoarded {
                passenger,
                vehicle,
                stop,
            } => {
                format!("passenger {passenger} boarded vehicle {vehicle} at stop {stop}\n")
            }
            Event::VehicleDeparted {
                vehicle,
                stop,
                alighted,
                boarded,
                occupancy,
            } => {
                format!(
                    "vehicle {vehicle} at stop {stop}: alighted {alighted} | boarded {boarded} | on board {occupancy}\n"
                )
            }
            Event::VehicleFull {
                vehicle,
                stop,
                waiting_reachable,
            } => {
                format!(
                    "vehicle {vehicle} is full, {waiting_reachable} reachable passengers left waiting at stop {stop}\n"
                )
            }
            Event::LapCompleted { vehicle, line, lap } => {
                format!("vehicle {vehicle} finished lap {lap} on line {line}\n")
            }
            Event::SimulationFinished => {
                format!("simulation finished after tick {time}\n")
            }
        }
    }
}

impl EventsSubscriber for TextEventsWriter {
    fn receive_event(&mut self, time: u32, event: &Event) {
        let text = Self::event_2_string(time, event);
        self.writer
            .write_all(text.as_bytes())
            .expect("Failed to write event.");
    }

    fn finish(&mut self) {
        self.writer.flush().expect("Failed to flush events file.");
    }

    fn as_any(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::id::Id;

    #[test]
    fn writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.txt");

        let mut writer = TextEventsWriter::new(path.clone());
        writer.receive_event(1, &Event::TickStarted);
        writer.receive_event(
            1,
            &Event::new_vehicle_arrived(Id::create("0"), Id::create("100")),
        );
        writer.receive_event(2, &Event::SimulationFinished);
        writer.finish();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "=== tick 1 ===",
                "vehicle 0 arrived at stop 100",
                "simulation finished after tick 2",
            ]
        );
    }
}
