use std::ops::Range;

/// Dense gene × element contact matrix for one chromosome, with a per-gene
/// running total of loop weight. Row-major storage; built by range-scatter
/// accumulation, then normalized once and read immutably afterwards.
pub struct ContactMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
    totals: Vec<f64>,
    normalized: bool,
}

impl ContactMatrix {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
            totals: vec![0.0; rows],
            normalized: false,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    /// Accumulated loop weight for one gene rank, independent of where the
    /// element-side anchors landed.
    pub fn gene_total(&self, row: usize) -> Option<f64> {
        self.totals.get(row).copied()
    }

    ///
    /// Scatter one loop's weight across the rank rectangle its anchors span.
    ///
    /// Every cell in `gene_range × element_range` gains `count`, and every
    /// gene in `gene_range` gains `count` of total weight. The total update
    /// does not depend on the element range: a loop anchored at a gene
    /// counts toward that gene's contact total even when no element falls
    /// between its anchors. Empty ranges contribute nothing on their axis.
    ///
    pub fn add_range(&mut self, gene_range: Range<usize>, element_range: Range<usize>, count: f64) {
        debug_assert!(!self.normalized, "matrix is frozen after normalization");

        for gene in gene_range {
            if gene >= self.rows {
                break;
            }
            self.totals[gene] += count;
            let offset = gene * self.cols;
            for element in element_range.clone() {
                if element >= self.cols {
                    break;
                }
                self.data[offset + element] += count;
            }
        }
    }

    ///
    /// Divide each row by its gene total, turning accumulated weights into
    /// contact probabilities. Rows with zero total stay all-zero: no loop
    /// evidence means zero probability, never NaN. Idempotent.
    ///
    pub fn normalize(&mut self) {
        if self.normalized {
            return;
        }

        for (row, &total) in self.totals.iter().enumerate() {
            if total > 0.0 {
                let offset = row * self.cols;
                for value in &mut self.data[offset..offset + self.cols] {
                    *value /= total;
                }
            }
        }

        self.normalized = true;
    }
}
