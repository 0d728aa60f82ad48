use chrono::NaiveDateTime;

// ---------------------------------------------------------------------------
// Sample – one normalized measurement row
// ---------------------------------------------------------------------------

/// A single CPU/RAM measurement taken during one test run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Date and time columns joined and parsed.
    pub timestamp: NaiveDateTime,
    pub cpu_percent: f64,
    pub ram_percent: f64,
    /// Source file name without its extension.
    pub test_id: String,
}

impl Sample {
    /// Timestamp as seconds since the epoch, the x coordinate used by plots.
    pub fn epoch_seconds(&self) -> f64 {
        self.timestamp.and_utc().timestamp_millis() as f64 / 1000.0
    }
}

// ---------------------------------------------------------------------------
// TestRun – the samples read from one CSV file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TestRun {
    pub test_id: String,
    pub samples: Vec<Sample>,
}

// ---------------------------------------------------------------------------
// UnifiedDataset – every test run concatenated in list order
// ---------------------------------------------------------------------------

/// The complete dataset shared read-only with the UI.
///
/// Rows of one run stay contiguous and keep their file order; runs appear in
/// the order they were listed. A row's index is its position in `samples`.
#[derive(Debug, Clone, Default)]
pub struct UnifiedDataset {
    pub samples: Vec<Sample>,
    /// One entry per input file, in input order (even if the file had no rows).
    pub test_ids: Vec<String>,
}

impl UnifiedDataset {
    /// Concatenate runs in the given order.
    pub fn from_runs(runs: Vec<TestRun>) -> Self {
        let total: usize = runs.iter().map(|r| r.samples.len()).sum();
        let mut samples = Vec::with_capacity(total);
        let mut test_ids = Vec::with_capacity(runs.len());
        for run in runs {
            test_ids.push(run.test_id);
            samples.extend(run.samples);
        }
        UnifiedDataset { samples, test_ids }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether `test_id` names one of the loaded runs.
    pub fn contains_test(&self, test_id: &str) -> bool {
        self.test_ids.iter().any(|t| t == test_id)
    }
}
