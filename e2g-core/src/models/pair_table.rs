use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::errors::PairTableError;
use crate::utils::get_dynamic_reader;

/// Column names every E2G pair table must carry. Any further columns are
/// preserved untouched and written back in their original order.
pub mod columns {
    pub const ELEMENT_CHR: &str = "ElementChr";
    pub const ELEMENT_START: &str = "ElementStart";
    pub const ELEMENT_END: &str = "ElementEnd";
    pub const ELEMENT_NAME: &str = "ElementName";
    pub const GENE_ENSEMBL_ID: &str = "GeneEnsemblID";
    pub const GENE_SYMBOL: &str = "GeneSymbol";
    pub const GENE_TSS: &str = "GeneTSS";
}

/// Header indices of the required columns, resolved once at load time.
#[derive(Debug, Clone, Copy)]
struct RequiredColumns {
    element_chr: usize,
    element_start: usize,
    element_end: usize,
    element_name: usize,
    gene_ensembl_id: usize,
    gene_symbol: usize,
    gene_tss: usize,
}

///
/// PairTable struct, the representation of a candidate element-to-gene pair
/// file: a tab-delimited table with a header line naming at least the seven
/// required E2G columns.
///
#[derive(Clone, Debug)]
pub struct PairTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub path: Option<PathBuf>,
    required: RequiredColumns,
}

impl TryFrom<&Path> for PairTable {
    type Error = PairTableError;

    ///
    /// Create a new [PairTable] from a tsv or tsv.gz file.
    ///
    /// # Arguments:
    /// - value: path to pair file on disk.
    fn try_from(value: &Path) -> Result<Self, PairTableError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| PairTableError::FileReadError(e.to_string()))?;

        let mut header: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            // metadata/comment lines before the header pass through the linter,
            // not this loader
            if header.is_none() && line.starts_with('#') {
                continue;
            }

            let fields: Vec<String> = line.split('\t').map(|s| s.to_string()).collect();

            match &header {
                None => header = Some(fields),
                Some(h) => {
                    if fields.len() != h.len() {
                        return Err(PairTableError::RowWidth {
                            line: index + 1,
                            expected: h.len(),
                            found: fields.len(),
                        });
                    }
                    rows.push(fields);
                }
            }
        }

        let header = header.ok_or_else(|| PairTableError::EmptyTable(value.display().to_string()))?;
        if rows.is_empty() {
            return Err(PairTableError::EmptyTable(value.display().to_string()));
        }

        let required = resolve_required_columns(&header, value)?;

        Ok(PairTable {
            header,
            rows,
            path: Some(value.to_owned()),
            required,
        })
    }
}

impl TryFrom<&str> for PairTable {
    type Error = PairTableError;

    fn try_from(value: &str) -> Result<Self, PairTableError> {
        PairTable::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for PairTable {
    type Error = PairTableError;

    fn try_from(value: PathBuf) -> Result<Self, PairTableError> {
        PairTable::try_from(value.as_path())
    }
}

fn resolve_required_columns(
    header: &[String],
    path: &Path,
) -> Result<RequiredColumns, PairTableError> {
    let find = |column: &str| -> Result<usize, PairTableError> {
        header
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| PairTableError::MissingColumn {
                column: column.to_string(),
                path: path.display().to_string(),
            })
    };

    Ok(RequiredColumns {
        element_chr: find(columns::ELEMENT_CHR)?,
        element_start: find(columns::ELEMENT_START)?,
        element_end: find(columns::ELEMENT_END)?,
        element_name: find(columns::ELEMENT_NAME)?,
        gene_ensembl_id: find(columns::GENE_ENSEMBL_ID)?,
        gene_symbol: find(columns::GENE_SYMBOL)?,
        gene_tss: find(columns::GENE_TSS)?,
    })
}

impl PairTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn element_chr(&self, row: usize) -> &str {
        &self.rows[row][self.required.element_chr]
    }

    pub fn element_name(&self, row: usize) -> &str {
        &self.rows[row][self.required.element_name]
    }

    pub fn gene_ensembl_id(&self, row: usize) -> &str {
        &self.rows[row][self.required.gene_ensembl_id]
    }

    pub fn gene_symbol(&self, row: usize) -> &str {
        &self.rows[row][self.required.gene_symbol]
    }

    pub fn element_start(&self, row: usize) -> Result<u64, PairTableError> {
        self.parse_coordinate(row, self.required.element_start, columns::ELEMENT_START)
    }

    pub fn element_end(&self, row: usize) -> Result<u64, PairTableError> {
        self.parse_coordinate(row, self.required.element_end, columns::ELEMENT_END)
    }

    pub fn gene_tss(&self, row: usize) -> Result<u64, PairTableError> {
        self.parse_coordinate(row, self.required.gene_tss, columns::GENE_TSS)
    }

    fn parse_coordinate(
        &self,
        row: usize,
        index: usize,
        column: &str,
    ) -> Result<u64, PairTableError> {
        let value = &self.rows[row][index];
        value.parse::<u64>().map_err(|_| PairTableError::FieldParse {
            // +2 accounts for the header line and 1-based numbering
            line: row + 2,
            column: column.to_string(),
            value: value.clone(),
        })
    }

    ///
    /// Append one new column to the table.
    ///
    /// # Arguments:
    /// - name: header name of the new column
    /// - values: one value per existing row, in row order
    pub fn append_column(
        &mut self,
        name: &str,
        values: Vec<String>,
    ) -> Result<(), PairTableError> {
        if values.len() != self.rows.len() {
            return Err(PairTableError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }

        self.header.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }

        Ok(())
    }
}
