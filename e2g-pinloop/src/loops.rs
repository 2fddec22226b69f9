use std::collections::HashMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use e2g_core::utils::get_dynamic_reader;

use crate::errors::PinloopError;

/// Loops with an anchor separation at or above this cutoff are excluded
/// before binning: only proximal (sub-megabase) looping is modeled.
pub const CIS_DISTANCE_CUTOFF: u64 = 1_000_000;

/// One proximity-ligation contact: two anchor midpoints on the same
/// chromosome and a non-negative contact weight.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopRecord {
    pub center1: u64,
    pub center2: u64,
    pub loop_length: u64,
    pub count: f64,
}

impl LoopRecord {
    pub fn is_proximal(&self) -> bool {
        self.loop_length < CIS_DISTANCE_CUTOFF
    }
}

///
/// LoopCatalog struct, a chromatin-loop contact catalog grouped by
/// chromosome. Loaded from a tab-delimited file with a header naming at
/// least `chr`, `center1`, `center2` and `count`; `loop_length` is read
/// from its column when present and computed as the anchor separation
/// otherwise.
///
#[derive(Debug, Clone, Default)]
pub struct LoopCatalog {
    by_chr: HashMap<String, Vec<LoopRecord>>,
}

impl TryFrom<&Path> for LoopCatalog {
    type Error = PinloopError;

    fn try_from(value: &Path) -> Result<Self, PinloopError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| PinloopError::FileReadError(e.to_string()))?;

        let mut header: Option<CatalogColumns> = None;
        let mut by_chr: HashMap<String, Vec<LoopRecord>> = HashMap::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = index + 1;

            if header.is_none() {
                header = Some(CatalogColumns::from_header(&line, value)?);
                continue;
            }
            let columns = header.as_ref().unwrap();

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < columns.min_fields() {
                return Err(PinloopError::CatalogRowWidth {
                    line: line_number,
                    expected: columns.min_fields(),
                    found: fields.len(),
                });
            }

            let record = columns.parse_record(&fields, line_number)?;
            by_chr
                .entry(fields[columns.chr].to_string())
                .or_default()
                .push(record);
        }

        Ok(LoopCatalog { by_chr })
    }
}

impl TryFrom<&str> for LoopCatalog {
    type Error = PinloopError;

    fn try_from(value: &str) -> Result<Self, PinloopError> {
        LoopCatalog::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for LoopCatalog {
    type Error = PinloopError;

    fn try_from(value: PathBuf) -> Result<Self, PinloopError> {
        LoopCatalog::try_from(value.as_path())
    }
}

impl LoopCatalog {
    /// All loop records on a chromosome; an empty slice when the catalog has
    /// no loops there.
    pub fn loops_for(&self, chr: &str) -> &[LoopRecord] {
        self.by_chr.get(chr).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_chr.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chr.is_empty()
    }

    pub fn n_chromosomes(&self) -> usize {
        self.by_chr.len()
    }
}

/// Header indices of the catalog columns, resolved once.
struct CatalogColumns {
    chr: usize,
    center1: usize,
    center2: usize,
    loop_length: Option<usize>,
    count: usize,
}

impl CatalogColumns {
    fn from_header(line: &str, path: &Path) -> Result<Self, PinloopError> {
        let names: Vec<&str> = line.split('\t').collect();
        let find = |column: &str| -> Result<usize, PinloopError> {
            names
                .iter()
                .position(|n| *n == column)
                .ok_or_else(|| PinloopError::CatalogColumn {
                    column: column.to_string(),
                    path: path.display().to_string(),
                })
        };

        Ok(CatalogColumns {
            chr: find("chr")?,
            center1: find("center1")?,
            center2: find("center2")?,
            loop_length: names.iter().position(|n| *n == "loop_length"),
            count: find("count")?,
        })
    }

    fn min_fields(&self) -> usize {
        let mut max = self.chr.max(self.center1).max(self.center2).max(self.count);
        if let Some(ll) = self.loop_length {
            max = max.max(ll);
        }
        max + 1
    }

    fn parse_record(&self, fields: &[&str], line: usize) -> Result<LoopRecord, PinloopError> {
        let parse_u64 = |index: usize, column: &str| -> Result<u64, PinloopError> {
            fields[index]
                .parse::<u64>()
                .map_err(|_| PinloopError::CatalogParse {
                    line,
                    column: column.to_string(),
                    value: fields[index].to_string(),
                })
        };

        let center1 = parse_u64(self.center1, "center1")?;
        let center2 = parse_u64(self.center2, "center2")?;

        let loop_length = match self.loop_length {
            Some(index) => parse_u64(index, "loop_length")?,
            None => center1.abs_diff(center2),
        };

        let count = fields[self.count]
            .parse::<f64>()
            .map_err(|_| PinloopError::CatalogParse {
                line,
                column: "count".to_string(),
                value: fields[self.count].to_string(),
            })?;

        Ok(LoopRecord {
            center1,
            center2,
            loop_length,
            count,
        })
    }
}
