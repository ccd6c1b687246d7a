use std::fs::File;
use std::path::{Path, PathBuf};

pub mod text_events;

/// Resolves a file path relative to the directory the config file lives in,
/// unless it is absolute or explicitly relative to the working directory.
pub fn resolve_path(config_path: &Option<PathBuf>, file_path: &PathBuf) -> PathBuf {
    if file_path.is_absolute() || file_path.starts_with("./") {
        return file_path.clone();
    }

    if let Some(path) = config_path.as_ref().and_then(|c| c.parent()) {
        path.join(file_path)
    } else {
        file_path.clone()
    }
}

/// Reader for the stop and line definition files: `;`-separated fields,
/// `#` starts a comment line, records may have any number of fields.
pub(crate) fn delimited_reader(path: &Path) -> Result<csv::Reader<File>, csv::Error> {
    csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_path(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_relative_to_config() {
        let config = Some(PathBuf::from("/etc/sim/config.yml"));
        let resolved = resolve_path(&config, &PathBuf::from("stops.txt"));
        assert_eq!(resolved, PathBuf::from("/etc/sim/stops.txt"));
    }

    #[test]
    fn absolute_paths_stay_untouched() {
        let config = Some(PathBuf::from("/etc/sim/config.yml"));
        let resolved = resolve_path(&config, &PathBuf::from("/data/stops.txt"));
        assert_eq!(resolved, PathBuf::from("/data/stops.txt"));
    }

    #[test]
    fn explicit_working_dir_paths_stay_untouched() {
        let config = Some(PathBuf::from("/etc/sim/config.yml"));
        let resolved = resolve_path(&config, &PathBuf::from("./stops.txt"));
        assert_eq!(resolved, PathBuf::from("./stops.txt"));
    }

    #[test]
    fn no_config_context() {
        let resolved = resolve_path(&None, &PathBuf::from("stops.txt"));
        assert_eq!(resolved, PathBuf::from("stops.txt"));
    }
}
