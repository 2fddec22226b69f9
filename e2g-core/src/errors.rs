use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairTableError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("No data rows found in the file: {0}")]
    EmptyTable(String),

    #[error("Required column '{column}' not found in header of {path}")]
    MissingColumn { column: String, path: String },

    #[error("Line {line}: expected {expected} fields, found {found}")]
    RowWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: can't parse '{value}' in column '{column}'")]
    FieldParse {
        line: usize,
        column: String,
        value: String,
    },

    #[error("Column '{column}' has {found} values but the table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
