//! Writes a synthetic slope-monitoring dataset for trying out the viewer.
//!
//! Usage: `generate_sample [--pt] [output.csv]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use geoviz::analysis::thresholds::ColumnNaming;
use serde::Serialize;

/// One reading per hour from one of two instrument stations.
#[derive(Serialize)]
struct SampleRow {
    time: u32,
    displacement_mm: f64,
    pore_pressure_kpa: f64,
    sensor: &'static str,
}

/// Deterministic measurement noise: a SplitMix64 stream shaped into an
/// approximately normal distribution (sum of twelve uniforms).
struct Jitter(u64);

impl Jitter {
    fn uniform(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Zero-mean noise with the given standard deviation.
    fn noise(&mut self, std_dev: f64) -> f64 {
        let sum: f64 = (0..12).map(|_| self.uniform()).sum();
        (sum - 6.0) * std_dev
    }
}

/// Slow creep for most of the record, then an accelerating phase after a
/// rainfall event at hour 60 that pushes displacement past 30 mm.
fn generate_rows(hours: u32, jitter: &mut Jitter) -> Vec<SampleRow> {
    (0..hours)
        .map(|t| {
            let h = t as f64;
            let creep = 5.0 + 0.15 * h;
            let surge = if h > 60.0 { 0.02 * (h - 60.0).powi(2) } else { 0.0 };
            let displacement = creep + surge + jitter.noise(0.4);

            let recharge = if h > 55.0 { 12.0 * (1.0 - (-(h - 55.0) / 10.0).exp()) } else { 0.0 };
            let pore_pressure = 42.0 + recharge + jitter.noise(1.2);

            SampleRow {
                time: t,
                displacement_mm: round2(displacement.max(0.0)),
                pore_pressure_kpa: round2(pore_pressure),
                sensor: if t % 2 == 0 { "INC-01" } else { "PZ-02" },
            }
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    env_logger::init();

    let mut naming = ColumnNaming::English;
    let mut output = PathBuf::from("dados_geotecnicos.csv");
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--pt" => naming = ColumnNaming::Portuguese,
            other => output = PathBuf::from(other),
        }
    }

    let mut jitter = Jitter(42);
    let rows = generate_rows(96, &mut jitter);

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&output)
        .with_context(|| format!("creating {}", output.display()))?;

    writer
        .write_record([
            "time",
            naming.displacement_column(),
            naming.pore_pressure_column(),
            "sensor",
        ])
        .context("writing CSV header")?;
    for row in &rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV output")?;

    log::info!("Wrote {} rows with {:?} column names", rows.len(), naming);
    println!("Wrote {} readings to {}", rows.len(), output.display());
    Ok(())
}
