use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Capture files recorded for each tab-usage scenario, in display order.
pub const DEFAULT_FILES: [&str; 5] = [
    "1aba_semPesquisa.csv",
    "2_abas_abertas_duas_pesquisas.csv",
    "2_abas_uma_pesquisa.csv",
    "3abas_abertas_ao_mesmo_tempo.csv",
    "aberto_sem_nada.csv",
];

// ---------------------------------------------------------------------------
// DatasetSource – where a dataset comes from
// ---------------------------------------------------------------------------

/// A data directory plus the ordered list of file names inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub dir: PathBuf,
    pub files: Vec<String>,
}

/// Size and modification time of one file; `None` when it cannot be stat'ed.
pub type FileStamp = Option<(u64, SystemTime)>;

/// Per-file stamps, used to tell whether a reload would read anything new.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fingerprint(Vec<FileStamp>);

impl DatasetSource {
    pub fn new(dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    /// Default file list inside `dir`.
    pub fn with_default_files(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir, DEFAULT_FILES.iter().map(|f| f.to_string()).collect())
    }

    /// Full paths, in list order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.files.iter().map(|f| self.dir.join(f))
    }

    /// Stat every listed file.
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint(self.paths().map(|p| stamp(&p)).collect())
    }
}

fn stamp(path: &Path) -> FileStamp {
    let meta = fs::metadata(path).ok()?;
    let modified = meta.modified().ok()?;
    Some((meta.len(), modified))
}
