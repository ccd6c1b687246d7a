use std::path::{Path, PathBuf};

use nohash_hasher::IntMap;
use thiserror::Error;
use tracing::{info, warn};

use crate::simulation::id::Id;
use crate::simulation::io;
use crate::simulation::network::line::TransitLine;
use crate::simulation::network::stop::Stop;

pub mod line;
pub mod stop;

/// The static transit topology: all stops and all lines. Read-only after
/// loading, except for the waiting queues inside the stops, which the
/// simulation mutates. Fields are public so the engine can borrow stops
/// mutably while reading lines.
#[derive(Debug, Default)]
pub struct Network {
    pub stops: IntMap<Id<Stop>, Stop>,
    pub lines: IntMap<Id<TransitLine>, TransitLine>,
    /// Line ids in file order. Map iteration order is not deterministic, this
    /// is, and fleet creation and demand generation depend on it.
    pub line_order: Vec<Id<TransitLine>>,
}

#[derive(Debug, Error)]
pub enum NetworkLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed stop record in {path} (line {line}): {reason}")]
    MalformedStop {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

impl Network {
    pub fn from_files(stops_path: &Path, lines_path: &Path) -> Result<Self, NetworkLoadError> {
        let mut network = Network::default();
        network.load_stops(stops_path)?;
        network.load_lines(lines_path)?;
        info!(
            "Loaded network with {} stops and {} lines",
            network.stops.len(),
            network.lines.len()
        );
        Ok(network)
    }

    fn load_stops(&mut self, path: &Path) -> Result<(), NetworkLoadError> {
        info!("Loading stops from {path:?}");
        let mut reader = io::delimited_reader(path).map_err(|e| NetworkLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        for record in reader.records() {
            let record = record.map_err(|e| NetworkLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let line_number = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() < 2 {
                warn!("Skipping stop record with fewer than 2 fields in {path:?} (line {line_number})");
                continue;
            }

            let external = &record[0];
            if external.parse::<u64>().is_err() {
                return Err(NetworkLoadError::MalformedStop {
                    path: path.to_path_buf(),
                    line: line_number,
                    reason: format!("stop id '{external}' is not numeric"),
                });
            }
            let id = Id::<Stop>::create(external);
            let stop = Stop::new(id.clone(), String::from(&record[1]));
            self.stops.insert(id, stop);
        }
        Ok(())
    }

    fn load_lines(&mut self, path: &Path) -> Result<(), NetworkLoadError> {
        info!("Loading lines from {path:?}");
        let mut reader = io::delimited_reader(path).map_err(|e| NetworkLoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        for record in reader.records() {
            let record = record.map_err(|e| NetworkLoadError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let line_number = record.position().map(|p| p.line()).unwrap_or_default();
            if record.len() < 2 {
                warn!("Skipping line record with fewer than 2 fields in {path:?} (line {line_number})");
                continue;
            }

            let mut line = TransitLine::new(Id::create(&record[0]));
            for field in record.iter().skip(1) {
                if field.is_empty() {
                    continue;
                }
                if field.parse::<u64>().is_err() {
                    warn!("Invalid stop id '{field}' in lines file (line {line_number})");
                    continue;
                }
                match Id::<Stop>::try_get_from_ext(field) {
                    Some(stop_id) if self.stops.contains_key(&stop_id) => {
                        line.add_stop(stop_id);
                    }
                    _ => warn!("Stop {field} not found, skipping it on line {}", line.id()),
                }
            }

            self.line_order.push(line.id().clone());
            self.lines.insert(line.id().clone(), line);
        }
        Ok(())
    }

    pub fn stop(&self, id: &Id<Stop>) -> &Stop {
        self.stops.get(id).unwrap()
    }

    pub fn line(&self, id: &Id<TransitLine>) -> &TransitLine {
        self.lines.get(id).unwrap()
    }

    pub fn add_stop(&mut self, stop: Stop) {
        self.stops.insert(stop.id().clone(), stop);
    }

    pub fn add_line(&mut self, line: TransitLine) {
        self.line_order.push(line.id().clone());
        self.lines.insert(line.id().clone(), line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_stops_and_lines() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_file(
            dir.path(),
            "stops.txt",
            "# id;name\n100;Main St\n101;Second St\n102;Harbor\n",
        );
        let lines = write_file(dir.path(), "lines.txt", "A;100;101;102\nB;102;100\n");

        let network = Network::from_files(&stops, &lines).unwrap();

        assert_eq!(network.stops.len(), 3);
        assert_eq!(network.lines.len(), 2);
        assert_eq!(network.line_order.len(), 2);
        assert_eq!(network.line_order[0].external(), "A");

        let line_a = network.line(&network.line_order[0]);
        assert_eq!(line_a.stop_count(), 3);
        assert_eq!(network.stop(&line_a.stops()[0]).name(), "Main St");

        let line_b = network.line(&network.line_order[1]);
        assert_eq!(line_b.stop_count(), 2);
        assert_eq!(line_b.stops()[0].external(), "102");
    }

    #[test]
    fn unknown_stop_reference_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_file(dir.path(), "stops.txt", "100;Main St\n");
        let lines = write_file(dir.path(), "lines.txt", "A;100;999;not-a-number\n");

        let network = Network::from_files(&stops, &lines).unwrap();

        let line = network.line(&network.line_order[0]);
        assert_eq!(line.stop_count(), 1);
    }

    #[test]
    fn non_numeric_stop_id_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let stops = write_file(dir.path(), "stops.txt", "abc;Main St\n");
        let lines = write_file(dir.path(), "lines.txt", "A;100\n");

        let result = Network::from_files(&stops, &lines);
        assert!(matches!(
            result,
            Err(NetworkLoadError::MalformedStop { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let stops = dir.path().join("does-not-exist.txt");
        let lines = write_file(dir.path(), "lines.txt", "A;100\n");

        let result = Network::from_files(&stops, &lines);
        assert!(matches!(result, Err(NetworkLoadError::Io { .. })));
    }
}
