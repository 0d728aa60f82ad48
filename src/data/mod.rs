/// Data layer: core types, loading, and per-test analytics.
///
/// Architecture:
/// ```text
///  1aba_semPesquisa.csv  2_abas_….csv  …  (DatasetSource)
///        │
///        ▼
///   ┌──────────┐   SchemaMapping: Data/Hora/CPU/RAM → canonical fields
///   │  loader   │  parse each file → TestRun
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ UnifiedDataset  │  Vec<Sample>, runs concatenated in list order
///   └────────────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ filter / stats │  per-test subsets, max/mean, box statistics
///   └───────────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;
pub mod source;
pub mod stats;
