use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::model::{Sample, TestRun, UnifiedDataset};
use super::schema::{parse_percent, SchemaMapping};
use super::source::DatasetSource;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read every file of `source` in list order and concatenate the runs.
///
/// The first failure aborts the load: a missing file, a missing header or a
/// row that does not normalize all surface as [`LoadError`].
pub fn load_dataset(source: &DatasetSource, schema: &SchemaMapping) -> LoadResult<UnifiedDataset> {
    schema.validate()?;
    check_unique_test_ids(source)?;

    let mut runs = Vec::with_capacity(source.files.len());
    for path in source.paths() {
        let run = load_run(&path, schema)?;
        log::info!("{}: {} samples", path.display(), run.samples.len());
        runs.push(run);
    }

    let dataset = UnifiedDataset::from_runs(runs);
    if dataset.is_empty() {
        log::warn!("No samples in any of {} capture files", source.files.len());
    }
    log::info!(
        "Loaded {} samples from {} test runs",
        dataset.len(),
        dataset.test_ids.len()
    );
    Ok(dataset)
}

/// Every listed file must have its own stem, so runs never share a `test_id`.
fn check_unique_test_ids(source: &DatasetSource) -> LoadResult<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for file in &source.files {
        let test_id = test_id_for(Path::new(file));
        if let Some(first) = seen.insert(test_id.clone(), file) {
            return Err(LoadError::DuplicateTestId {
                test_id,
                first: first.to_string(),
                second: file.clone(),
            });
        }
    }
    Ok(())
}

/// Load a single capture file; its `test_id` is the file stem.
pub fn load_run(path: &Path, schema: &SchemaMapping) -> LoadResult<TestRun> {
    let file = File::open(path).map_err(|source| LoadError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    read_run(file, &test_id_for(path), path, schema)
}

/// The file name with its extension removed.
pub fn test_id_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// CSV normalization
// ---------------------------------------------------------------------------

/// Parse CSV rows from any reader. `path` is only used for error messages.
///
/// Layout: a header row, then one row per measurement. Only the four mapped
/// columns are read; anything else in the row is ignored.
pub fn read_run<R: Read>(
    reader: R,
    test_id: &str,
    path: &Path,
    schema: &SchemaMapping,
) -> LoadResult<TestRun> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(schema.delimiter_byte())
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(e, path))?
        .clone();
    let cols = schema.resolve(&headers, path)?;
    log::debug!("{}: columns resolved to {cols:?}", path.display());

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, path))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let parse_err = |message: String| LoadError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        };
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| parse_err(format!("row has no '{name}' field")))
        };

        let date = field(cols.date, &schema.date_column)?;
        let time = field(cols.time, &schema.time_column)?;
        let timestamp = schema
            .parse_timestamp(date, time)
            .ok_or_else(|| parse_err(format!("'{date} {time}' is not a valid date and time")))?;

        let cpu_raw = field(cols.cpu, &schema.cpu_column)?;
        let cpu_percent = parse_percent(cpu_raw)
            .ok_or_else(|| parse_err(format!("'{cpu_raw}' is not a CPU percentage")))?;

        let ram_raw = field(cols.ram, &schema.ram_column)?;
        let ram_percent = parse_percent(ram_raw)
            .ok_or_else(|| parse_err(format!("'{ram_raw}' is not a RAM percentage")))?;

        samples.push(Sample {
            timestamp,
            cpu_percent,
            ram_percent,
            test_id: test_id.to_string(),
        });
    }

    Ok(TestRun {
        test_id: test_id.to_string(),
        samples,
    })
}

fn csv_error(err: csv::Error, path: &Path) -> LoadError {
    let message = err.to_string();
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => LoadError::FileAccess {
            path: path.to_path_buf(),
            source,
        },
        _ => LoadError::Parse {
            path: path.to_path_buf(),
            line,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;
    use crate::data::filter::group_by_test;

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn rows(n: usize) -> String {
        let mut body = String::from("Data;Hora;CPU;RAM\n");
        for i in 0..n {
            body.push_str(&format!("01/01/2024;10:00:{:02};{};{}\n", i, 10 + i, 50 + i));
        }
        body
    }

    #[test]
    fn test_single_row_normalizes() {
        let csv_data = "Data;Hora;CPU;RAM\n01/01/2024;10:00:00;45;60\n";
        let run = read_run(
            csv_data.as_bytes(),
            "1aba_semPesquisa",
            Path::new("1aba_semPesquisa.csv"),
            &SchemaMapping::default(),
        )
        .unwrap();

        assert_eq!(run.samples.len(), 1);
        let s = &run.samples[0];
        assert_eq!(
            s.timestamp,
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
        assert_eq!(s.cpu_percent, 45.0);
        assert_eq!(s.ram_percent, 60.0);
        assert_eq!(s.test_id, "1aba_semPesquisa");
    }

    #[test]
    fn test_extra_columns_and_decimal_comma() {
        let csv_data = "Data;Hora;Processos;CPU;RAM\n02/01/2024;08:30:15;212;12,5;47,25\n";
        let run = read_run(
            csv_data.as_bytes(),
            "run",
            Path::new("run.csv"),
            &SchemaMapping::default(),
        )
        .unwrap();
        assert_eq!(run.samples[0].cpu_percent, 12.5);
        assert_eq!(run.samples[0].ram_percent, 47.25);
    }

    #[test]
    fn test_bad_timestamp_is_parse_error() {
        let csv_data = "Data;Hora;CPU;RAM\n01/01/2024;10:00:00;45;60\n31/02/2024;10:00:01;45;60\n";
        let err = read_run(
            csv_data.as_bytes(),
            "run",
            Path::new("run.csv"),
            &SchemaMapping::default(),
        )
        .unwrap_err();
        match err {
            LoadError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_usage_value_is_parse_error() {
        let csv_data = "Data;Hora;CPU;RAM\n01/01/2024;10:00:00;busy;60\n";
        let err = read_run(
            csv_data.as_bytes(),
            "run",
            Path::new("run.csv"),
            &SchemaMapping::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let csv_data = "Data;Hora;CPU;RAM\n01/01/2024;10:00:00;45\n";
        let err = read_run(
            csv_data.as_bytes(),
            "run",
            Path::new("run.csv"),
            &SchemaMapping::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("RAM"));
    }

    #[test]
    fn test_missing_header_is_missing_column() {
        let csv_data = "Data;Hora;CPU (%);RAM\n01/01/2024;10:00:00;45;60\n";
        let err = read_run(
            csv_data.as_bytes(),
            "run",
            Path::new("run.csv"),
            &SchemaMapping::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "CPU"));
    }

    #[test]
    fn test_custom_schema_mapping() {
        let schema = SchemaMapping {
            date_column: "date".into(),
            time_column: "time".into(),
            cpu_column: "cpu_usage".into(),
            ram_column: "mem_usage".into(),
            delimiter: ',',
            ..Default::default()
        };
        let csv_data = "date,time,cpu_usage,mem_usage\n2024-05-01,23:59:59,99.5,12\n";
        let run = read_run(csv_data.as_bytes(), "x", Path::new("x.csv"), &schema).unwrap();
        assert_eq!(run.samples[0].cpu_percent, 99.5);
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_run(&dir.path().join("absent.csv"), &SchemaMapping::default()).unwrap_err();
        assert!(matches!(err, LoadError::FileAccess { .. }));
    }

    #[test]
    fn test_dataset_concatenates_in_list_order() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "three.csv", &rows(3));
        write_file(dir.path(), "five.csv", &rows(5));

        let source = DatasetSource::new(dir.path(), vec!["three.csv".into(), "five.csv".into()]);
        let ds = load_dataset(&source, &SchemaMapping::default()).unwrap();

        assert_eq!(ds.len(), 8);
        assert_eq!(ds.test_ids, vec!["three", "five"]);

        let distinct: BTreeSet<&str> = ds.samples.iter().map(|s| s.test_id.as_str()).collect();
        assert_eq!(distinct.len(), 2);

        // Groups are contiguous and keep file order.
        let ids: Vec<&str> = ds.samples.iter().map(|s| s.test_id.as_str()).collect();
        assert_eq!(ids, vec!["three", "three", "three", "five", "five", "five", "five", "five"]);
        let five_cpu: Vec<f64> = ds.samples[3..].iter().map(|s| s.cpu_percent).collect();
        assert_eq!(five_cpu, vec![10.0, 11.0, 12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_dataset_aborts_on_any_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "ok.csv", &rows(2));

        let source = DatasetSource::new(dir.path(), vec!["ok.csv".into(), "gone.csv".into()]);
        let err = load_dataset(&source, &SchemaMapping::default()).unwrap_err();
        match err {
            LoadError::FileAccess { path, .. } => assert!(path.ends_with("gone.csv")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dataset_rejects_shared_stems() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "run.csv", &rows(2));
        write_file(dir.path(), "run.txt", &rows(3));

        let source = DatasetSource::new(dir.path(), vec!["run.csv".into(), "run.txt".into()]);
        let err = load_dataset(&source, &SchemaMapping::default()).unwrap_err();
        match err {
            LoadError::DuplicateTestId {
                test_id,
                first,
                second,
            } => {
                assert_eq!(test_id, "run");
                assert_eq!(first, "run.csv");
                assert_eq!(second, "run.txt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_distinct_stems_group_without_overlap() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "run.csv", &rows(2));
        write_file(dir.path(), "run_b.csv", &rows(3));

        let source = DatasetSource::new(dir.path(), vec!["run.csv".into(), "run_b.csv".into()]);
        let ds = load_dataset(&source, &SchemaMapping::default()).unwrap();
        let grouped: usize = group_by_test(&ds).iter().map(|(_, g)| g.len()).sum();
        assert_eq!(grouped, ds.len());
    }

    #[test]
    fn test_test_id_strips_extension() {
        assert_eq!(test_id_for(Path::new("/data/aberto_sem_nada.csv")), "aberto_sem_nada");
        assert_eq!(test_id_for(Path::new("run")), "run");
    }
}
