//! Locating the three source files.

use std::path::{Path, PathBuf};

use fitgrid_model::Source;

/// Resolved locations of the sleep, steps, and heart-rate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub sleep: PathBuf,
    pub steps: PathBuf,
    pub heart_rate: PathBuf,
}

impl SourcePaths {
    /// Default file names inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            sleep: dir.join(Source::Sleep.default_file_name()),
            steps: dir.join(Source::Steps.default_file_name()),
            heart_rate: dir.join(Source::HeartRate.default_file_name()),
        }
    }

    /// Override one source. Relative paths are resolved against `dir`.
    #[must_use]
    pub fn with_override(mut self, source: Source, dir: &Path, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            let resolved = if path.is_absolute() {
                path.to_path_buf()
            } else {
                dir.join(path)
            };
            *self.get_mut(source) = resolved;
        }
        self
    }

    pub fn get(&self, source: Source) -> &Path {
        match source {
            Source::Sleep => &self.sleep,
            Source::Steps => &self.steps,
            Source::HeartRate => &self.heart_rate,
        }
    }

    fn get_mut(&mut self, source: Source) -> &mut PathBuf {
        match source {
            Source::Sleep => &mut self.sleep,
            Source::Steps => &mut self.steps,
            Source::HeartRate => &mut self.heart_rate,
        }
    }

    /// Sources whose file does not exist on disk.
    pub fn missing(&self) -> Vec<Source> {
        Source::ALL
            .into_iter()
            .filter(|source| !self.get(*source).is_file())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_fitbit_export_names() {
        let paths = SourcePaths::from_dir(Path::new("/data"));
        assert_eq!(paths.sleep, PathBuf::from("/data/minuteSleep_merged.csv"));
        assert_eq!(
            paths.heart_rate,
            PathBuf::from("/data/heartrate_seconds_merged.csv")
        );
    }

    #[test]
    fn relative_override_resolves_against_dir() {
        let dir = Path::new("/data");
        let paths = SourcePaths::from_dir(dir)
            .with_override(Source::Steps, dir, Some(Path::new("steps.csv")))
            .with_override(Source::Sleep, dir, None);
        assert_eq!(paths.steps, PathBuf::from("/data/steps.csv"));
        assert_eq!(paths.sleep, PathBuf::from("/data/minuteSleep_merged.csv"));
    }

    #[test]
    fn missing_lists_absent_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("minuteSleep_merged.csv"), "Id,date,value\n").unwrap();
        let paths = SourcePaths::from_dir(dir.path());
        assert_eq!(paths.missing(), vec![Source::Steps, Source::HeartRate]);
    }
}
