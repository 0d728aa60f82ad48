use std::path::PathBuf;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::Config;
use crate::data::error::LoadResult;
use crate::data::filter::samples_for;
use crate::data::loader::load_dataset;
use crate::data::model::UnifiedDataset;
use crate::data::source::{DatasetSource, Fingerprint};
use crate::data::stats::{DatasetSummary, ResourceSummary};

// ---------------------------------------------------------------------------
// User selections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Presentation,
    Testing,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Presentation, Mode::Testing];

    pub fn label(self) -> &'static str {
        match self {
            Mode::Presentation => "Presentation",
            Mode::Testing => "Testing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visualization {
    #[default]
    TimeSeries,
    DirectComparison,
    CpuRamRelation,
}

impl Visualization {
    pub const ALL: [Visualization; 3] = [
        Visualization::TimeSeries,
        Visualization::DirectComparison,
        Visualization::CpuRamRelation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Visualization::TimeSeries => "Time series",
            Visualization::DirectComparison => "Direct comparison",
            Visualization::CpuRamRelation => "CPU-RAM relation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resource {
    #[default]
    Cpu,
    Ram,
    Both,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Cpu, Resource::Ram, Resource::Both];

    pub fn label(self) -> &'static str {
        match self {
            Resource::Cpu => "CPU",
            Resource::Ram => "RAM",
            Resource::Both => "Both",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Where the current dataset was (or will be) read from.
    pub source: DatasetSource,

    /// Built once per load and shared read-only with every view.
    pub dataset: Option<Arc<UnifiedDataset>>,

    /// Stamps of the files behind `dataset`.
    fingerprint: Fingerprint,

    /// Aggregates of `dataset`, computed when it is set.
    pub summary: Option<DatasetSummary>,

    pub color_map: ColorMap,

    pub mode: Mode,
    pub visualization: Visualization,
    pub resource: Resource,

    /// Test run shown in the detail section.
    pub selected_test: Option<String>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            source: config.source(),
            config,
            dataset: None,
            fingerprint: Fingerprint::default(),
            summary: None,
            color_map: ColorMap::default(),
            mode: Mode::default(),
            visualization: Visualization::default(),
            resource: Resource::default(),
            selected_test: None,
            status_message: None,
        }
    }

    /// Rebuild the dataset from `source`.
    ///
    /// Without `force`, nothing is read when a dataset is present and none of
    /// its files changed. A failed load keeps the previous dataset.
    pub fn reload(&mut self, force: bool) -> LoadResult<bool> {
        if !force && self.dataset.is_some() && self.source.fingerprint() == self.fingerprint {
            log::debug!("Capture files unchanged, keeping current dataset");
            return Ok(false);
        }
        self.load_from(self.source.clone())
    }

    /// Load the same file list from another directory.
    ///
    /// `source` only moves to `dir` once its files load; on failure the
    /// sidebar keeps pointing at the directory the shown data came from.
    pub fn set_data_dir(&mut self, dir: PathBuf) -> LoadResult<bool> {
        let candidate = DatasetSource::new(dir, self.source.files.clone());
        self.load_from(candidate)
    }

    fn load_from(&mut self, candidate: DatasetSource) -> LoadResult<bool> {
        let fingerprint = candidate.fingerprint();
        match load_dataset(&candidate, &self.config.schema) {
            Ok(dataset) => {
                self.source = candidate;
                self.set_dataset(dataset, fingerprint);
                Ok(true)
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.status_message = Some(format!("Error: {e}"));
                Err(e)
            }
        }
    }

    /// Ingest a newly loaded dataset and refresh everything derived from it.
    pub fn set_dataset(&mut self, dataset: UnifiedDataset, fingerprint: Fingerprint) {
        self.summary = Some(DatasetSummary::new(&dataset));
        self.color_map = ColorMap::new(&dataset.test_ids);

        // Keep the detail selection if the run still exists.
        let keep = self
            .selected_test
            .as_deref()
            .is_some_and(|t| dataset.contains_test(t));
        if !keep {
            self.selected_test = dataset.test_ids.first().cloned();
        }

        self.dataset = Some(Arc::new(dataset));
        self.fingerprint = fingerprint;
        self.status_message = None;
    }

    /// Headline metrics of the detail selection; empty for an unknown run.
    pub fn selected_summary(&self) -> ResourceSummary {
        match (&self.dataset, &self.selected_test) {
            (Some(ds), Some(test_id)) => ResourceSummary::from_samples(samples_for(ds, test_id)),
            _ => ResourceSummary::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_run(dir: &std::path::Path, name: &str, cpu: &[u32]) {
        let mut body = String::from("Data;Hora;CPU;RAM\n");
        for (i, c) in cpu.iter().enumerate() {
            body.push_str(&format!("01/01/2024;10:00:{i:02};{c};50\n"));
        }
        fs::write(dir.join(name), body).unwrap();
    }

    fn state_for(dir: &std::path::Path) -> AppState {
        let config = Config {
            data_dir: dir.to_path_buf(),
            files: vec!["a.csv".into(), "b.csv".into()],
            ..Default::default()
        };
        AppState::new(config)
    }

    #[test]
    fn test_reload_loads_and_selects_first_test() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), "a.csv", &[10, 20, 30]);
        write_run(dir.path(), "b.csv", &[5]);

        let mut state = state_for(dir.path());
        assert!(state.reload(false).unwrap());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 4);
        assert_eq!(state.selected_test.as_deref(), Some("a"));

        let summary = state.selected_summary();
        assert_eq!(summary.max_cpu, Some(30.0));
        assert_eq!(summary.mean_cpu, Some(20.0));
    }

    #[test]
    fn test_reload_skips_unchanged_files() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), "a.csv", &[10]);
        write_run(dir.path(), "b.csv", &[20]);

        let mut state = state_for(dir.path());
        assert!(state.reload(false).unwrap());
        let first = Arc::clone(state.dataset.as_ref().unwrap());

        assert!(!state.reload(false).unwrap());
        assert!(Arc::ptr_eq(&first, state.dataset.as_ref().unwrap()));

        assert!(state.reload(true).unwrap());
        assert!(!Arc::ptr_eq(&first, state.dataset.as_ref().unwrap()));
    }

    #[test]
    fn test_failed_reload_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), "a.csv", &[10]);
        write_run(dir.path(), "b.csv", &[20]);

        let mut state = state_for(dir.path());
        state.reload(false).unwrap();

        fs::remove_file(dir.path().join("b.csv")).unwrap();
        assert!(state.reload(false).is_err());
        assert!(state.status_message.is_some());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_dir_switch_keeps_source() {
        let good = tempfile::tempdir().unwrap();
        write_run(good.path(), "a.csv", &[10]);
        write_run(good.path(), "b.csv", &[20]);
        let empty = tempfile::tempdir().unwrap();

        let mut state = state_for(good.path());
        state.reload(false).unwrap();

        assert!(state.set_data_dir(empty.path().to_path_buf()).is_err());
        assert_eq!(state.source.dir, good.path());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 2);

        // Nothing changed in the original directory, so nothing is re-read.
        assert!(!state.reload(false).unwrap());
    }

    #[test]
    fn test_dir_switch_adopts_new_source() {
        let first = tempfile::tempdir().unwrap();
        write_run(first.path(), "a.csv", &[10]);
        write_run(first.path(), "b.csv", &[20]);
        let second = tempfile::tempdir().unwrap();
        write_run(second.path(), "a.csv", &[70, 80]);
        write_run(second.path(), "b.csv", &[90]);

        let mut state = state_for(first.path());
        state.reload(false).unwrap();

        assert!(state.set_data_dir(second.path().to_path_buf()).unwrap());
        assert_eq!(state.source.dir, second.path());
        assert_eq!(state.dataset.as_ref().unwrap().len(), 3);
        assert!(!state.reload(false).unwrap());
    }

    #[test]
    fn test_unknown_selection_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        write_run(dir.path(), "a.csv", &[10]);
        write_run(dir.path(), "b.csv", &[20]);

        let mut state = state_for(dir.path());
        state.reload(false).unwrap();
        state.selected_test = Some("not-a-test".into());
        assert_eq!(state.selected_summary(), ResourceSummary::default());
    }
}
