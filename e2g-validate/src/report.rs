use serde::Serialize;

/// Everything the linter found in one file: fatal data errors, advisory
/// data warnings, and metadata-header warnings. Only data errors make a
/// file invalid.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ValidationReport {
    pub data_errors: Vec<String>,
    pub data_warnings: Vec<String>,
    pub metadata_warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.data_errors.is_empty()
    }

    /// Render the report as the human-readable feedback block printed by the
    /// CLI, ending with an overall verdict for `file_name`.
    pub fn render(&self, file_name: &str) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !self.data_errors.is_empty() {
            parts.push("\nData Errors:".to_string());
            for error in &self.data_errors {
                parts.push(format!(">> {}", error));
            }
        }

        if !self.data_warnings.is_empty() {
            parts.push("\nData Warnings:".to_string());
            for warning in &self.data_warnings {
                parts.push(format!(">> {}", warning));
            }
        }

        if !self.metadata_warnings.is_empty() {
            parts.push("\nMetadata Warnings:".to_string());
            for warning in &self.metadata_warnings {
                parts.push(format!(">> {}", warning));
            }
        }

        let has_warnings = !self.data_warnings.is_empty() || !self.metadata_warnings.is_empty();
        if self.is_valid() && !has_warnings {
            parts.push(format!("\nFILE IS CORRECTLY FORMATTED: {}", file_name));
        } else if self.is_valid() {
            parts.push(format!("\nFILE IS IN STANDARD FORMAT: {}", file_name));
            parts.push("Note: review the warnings above to improve file quality.".to_string());
        } else {
            parts.push(format!("\nFILE IS *NOT* IN STANDARD FORMAT: {}", file_name));
            parts.push(
                "Address the data errors to bring the predictions into standard format."
                    .to_string(),
            );
        }

        parts.join("\n")
    }
}
