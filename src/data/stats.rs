use serde::Serialize;

use super::filter::samples_for;
use super::model::{Sample, UnifiedDataset};

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Max/mean figures shown above the charts. `None` for an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResourceSummary {
    pub samples: usize,
    pub max_cpu: Option<f64>,
    pub mean_cpu: Option<f64>,
    pub max_ram: Option<f64>,
    pub mean_ram: Option<f64>,
}

impl ResourceSummary {
    pub fn from_samples<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        let mut n = 0usize;
        let mut cpu_sum = 0.0;
        let mut ram_sum = 0.0;
        let mut max_cpu = f64::NEG_INFINITY;
        let mut max_ram = f64::NEG_INFINITY;
        for s in samples {
            n += 1;
            cpu_sum += s.cpu_percent;
            ram_sum += s.ram_percent;
            max_cpu = max_cpu.max(s.cpu_percent);
            max_ram = max_ram.max(s.ram_percent);
        }
        if n == 0 {
            return Self::default();
        }
        Self {
            samples: n,
            max_cpu: Some(max_cpu),
            mean_cpu: Some(cpu_sum / n as f64),
            max_ram: Some(max_ram),
            mean_ram: Some(ram_sum / n as f64),
        }
    }
}

/// Format a percentage metric the way the dashboard shows it.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.1}%"),
        None => "n/a".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestSummary {
    pub test_id: String,
    #[serde(flatten)]
    pub summary: ResourceSummary,
}

/// Global figures plus one entry per test run, in run order.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub overall: ResourceSummary,
    pub tests: Vec<TestSummary>,
}

impl DatasetSummary {
    pub fn new(dataset: &UnifiedDataset) -> Self {
        let tests = dataset
            .test_ids
            .iter()
            .map(|id| TestSummary {
                test_id: id.clone(),
                summary: ResourceSummary::from_samples(samples_for(dataset, id)),
            })
            .collect();
        Self {
            overall: ResourceSummary::from_samples(&dataset.samples),
            tests,
        }
    }
}

// ---------------------------------------------------------------------------
// Box plot statistics
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey whiskers (1.5 IQR, clipped to the data).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - fence, q3 + fence);

        let lower_whisker = sorted
            .iter()
            .copied()
            .find(|v| *v >= lo_fence)
            .unwrap_or(q1);
        let upper_whisker = sorted
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= hi_fence)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lo_fence || *v > hi_fence)
            .collect();

        Some(Self {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::TestRun;

    fn run(test_id: &str, cpu: &[f64], ram: &[f64]) -> TestRun {
        let samples = cpu
            .iter()
            .zip(ram)
            .enumerate()
            .map(|(i, (&c, &r))| Sample {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(10, 0, i as u32)
                    .unwrap(),
                cpu_percent: c,
                ram_percent: r,
                test_id: test_id.to_string(),
            })
            .collect();
        TestRun {
            test_id: test_id.to_string(),
            samples,
        }
    }

    #[test]
    fn test_summary_max_and_mean() {
        let ds = UnifiedDataset::from_runs(vec![run("a", &[10.0, 20.0, 30.0], &[40.0, 70.0, 55.0])]);
        let s = ResourceSummary::from_samples(&ds.samples);
        assert_eq!(s.samples, 3);
        assert_eq!(s.max_cpu, Some(30.0));
        assert_eq!(s.mean_cpu, Some(20.0));
        assert_eq!(s.max_ram, Some(70.0));
        assert_eq!(format_percent(s.mean_cpu), "20.0%");
    }

    #[test]
    fn test_summary_of_nothing() {
        let s = ResourceSummary::from_samples(std::iter::empty());
        assert_eq!(s, ResourceSummary::default());
        assert_eq!(format_percent(s.max_cpu), "n/a");
    }

    #[test]
    fn test_dataset_summary_per_test() {
        let ds = UnifiedDataset::from_runs(vec![
            run("a", &[10.0, 20.0], &[30.0, 40.0]),
            run("b", &[90.0], &[15.0]),
        ]);
        let summary = DatasetSummary::new(&ds);
        assert_eq!(summary.overall.max_cpu, Some(90.0));
        assert_eq!(summary.tests.len(), 2);
        assert_eq!(summary.tests[0].test_id, "a");
        assert_eq!(summary.tests[0].summary.max_ram, Some(40.0));
        assert_eq!(summary.tests[1].summary.mean_cpu, Some(90.0));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["tests"][1]["test_id"], "b");
        assert_eq!(json["tests"][1]["max_cpu"], 90.0);
    }

    #[test]
    fn test_box_stats_quartiles_and_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let b = BoxStats::from_values(&values).unwrap();
        assert_eq!(b.q1, 3.25);
        assert_eq!(b.median, 5.5);
        assert_eq!(b.q3, 7.75);
        assert_eq!(b.lower_whisker, 1.0);
        assert_eq!(b.upper_whisker, 9.0);
        assert_eq!(b.outliers, vec![100.0]);
    }

    #[test]
    fn test_box_stats_single_value() {
        let b = BoxStats::from_values(&[42.0]).unwrap();
        assert_eq!(b.median, 42.0);
        assert_eq!(b.lower_whisker, 42.0);
        assert_eq!(b.upper_whisker, 42.0);
        assert!(b.outliers.is_empty());
        assert!(BoxStats::from_values(&[]).is_none());
    }
}
