//! Dataset summary statistics
//!
//! Derived figures for a loaded dataset, serializable for the CLI's JSON
//! report.

use serde::Serialize;

use crate::core::CsrDataset;

/// Summary of a CSR dataset.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    /// Number of rows.
    pub n_rows: usize,
    /// Inferred feature count: max stored index + 1 (0 for no entries).
    pub n_features: usize,
    /// Stored (index, value) entries across all rows.
    pub nnz: usize,
    /// `nnz / (n_rows * n_features)`, 0 when either dimension is 0.
    pub density: f64,
    /// Rows with a label but no features.
    pub n_empty_rows: usize,
    pub label_min: f64,
    pub label_max: f64,
    pub label_mean: f64,
    /// RFC 3339 timestamp of when the summary was computed.
    pub computed_at: String,
    /// Library version that produced the summary.
    pub library_version: String,
}

impl DatasetStats {
    /// Compute summary statistics for a dataset.
    pub fn compute(dataset: &CsrDataset) -> Self {
        let n_rows = dataset.n_rows();
        let nnz = dataset.nnz();
        let n_features = dataset
            .indices()
            .iter()
            .max()
            .map(|&max| max as usize + 1)
            .unwrap_or(0);

        let density = if n_rows > 0 && n_features > 0 {
            nnz as f64 / (n_rows as f64 * n_features as f64)
        } else {
            0.0
        };

        let n_empty_rows = dataset
            .row_offsets()
            .windows(2)
            .filter(|w| w[0] == w[1])
            .count();

        let labels = dataset.labels();
        let (label_min, label_max, label_mean) = if labels.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let min = labels.iter().copied().fold(f64::INFINITY, f64::min);
            let max = labels.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = labels.iter().sum::<f64>() / labels.len() as f64;
            (min, max, mean)
        };

        DatasetStats {
            n_rows,
            n_features,
            nnz,
            density,
            n_empty_rows,
            label_min,
            label_max,
            label_mean,
            computed_at: chrono::Utc::now().to_rfc3339(),
            library_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!("=== Dataset Summary ===");
        println!("Rows:        {}", self.n_rows);
        println!("Features:    {}", self.n_features);
        println!("Stored nnz:  {}", self.nnz);
        println!("Density:     {:.6}", self.density);
        println!("Empty rows:  {}", self.n_empty_rows);
        println!(
            "Labels:      min {} / max {} / mean {:.6}",
            self.label_min, self.label_max, self.label_mean
        );
    }
}
