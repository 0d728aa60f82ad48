use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::Parser;

/// Write synthetic capture files in the dashboard's default schema.
#[derive(Parser, Debug)]
#[command(about = "Generate sample CPU/RAM capture CSVs")]
struct Args {
    /// Output directory
    #[arg(default_value = "sample_data")]
    out_dir: PathBuf,

    /// Samples per file
    #[arg(short, long, default_value_t = 120)]
    rows: usize,
}

/// Seeded SplitMix64 stream, so regenerated captures are identical.
struct Jitter(u64);

impl Jitter {
    fn next_unit(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        (z ^ (z >> 31)) as f64 / u64::MAX as f64
    }

    /// Roughly bell-shaped noise: the sum of four uniforms, centred and scaled.
    fn around(&mut self, mean: f64, spread: f64) -> f64 {
        let sum: f64 = (0..4).map(|_| self.next_unit()).sum();
        mean + (sum - 2.0) * spread
    }
}

/// Scenario file, baseline CPU %, baseline RAM %, CPU noise.
const SCENARIOS: [(&str, f64, f64, f64); 5] = [
    ("1aba_semPesquisa.csv", 18.0, 41.0, 4.0),
    ("2_abas_abertas_duas_pesquisas.csv", 34.0, 52.0, 9.0),
    ("2_abas_uma_pesquisa.csv", 27.0, 48.0, 7.0),
    ("3abas_abertas_ao_mesmo_tempo.csv", 46.0, 61.0, 12.0),
    ("aberto_sem_nada.csv", 9.0, 37.0, 2.5),
];

/// Decimal comma, as the capture locale writes it.
fn pt_br(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

fn main() -> Result<()> {
    let args = Args::parse();
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let mut rng = Jitter(42);
    let start = NaiveDate::from_ymd_opt(2025, 5, 20)
        .and_then(|d| d.and_hms_opt(14, 0, 0))
        .context("invalid start time")?;

    for (i, &(name, cpu_base, ram_base, cpu_noise)) in SCENARIOS.iter().enumerate() {
        let path = args.out_dir.join(name);
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_path(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_record(["Data", "Hora", "CPU", "RAM"])?;

        // Runs were captured one after another, ten minutes apart.
        let run_start = start + Duration::minutes(10 * i as i64);
        let mut ram = ram_base;
        for row in 0..args.rows {
            let ts = run_start + Duration::seconds(row as i64);
            let cpu = rng.around(cpu_base, cpu_noise).clamp(0.0, 100.0);
            ram = (ram + rng.around(0.02, 0.15)).clamp(0.0, 100.0);
            writer.write_record([
                ts.format("%d/%m/%Y").to_string(),
                ts.format("%H:%M:%S").to_string(),
                pt_br(cpu),
                pt_br(ram),
            ])?;
        }
        writer.flush()?;
        println!("Wrote {} samples to {}", args.rows, path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_is_seeded() {
        let a: Vec<f64> = {
            let mut j = Jitter(7);
            (0..5).map(|_| j.next_unit()).collect()
        };
        let mut j = Jitter(7);
        let b: Vec<f64> = (0..5).map(|_| j.next_unit()).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_around_stays_within_spread() {
        let mut j = Jitter(42);
        for _ in 0..1000 {
            let v = j.around(50.0, 3.0);
            assert!((44.0..=56.0).contains(&v));
        }
    }

    #[test]
    fn test_pt_br_decimal_comma() {
        assert_eq!(pt_br(12.5), "12,50");
        assert_eq!(pt_br(7.0), "7,00");
    }
}
