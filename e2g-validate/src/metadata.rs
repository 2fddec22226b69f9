use std::collections::HashMap;

use regex::Regex;

/// Metadata keys every prediction file should declare in its `#` header.
pub const REQUIRED_META_KEYS: [&str; 10] = [
    "Source",
    "Version",
    "GenomeReference",
    "URL",
    "Assays",
    "SampleAgnostic",
    "SampleTermName",
    "SampleTermID",
    "SampleSummaryShort",
    "ScoreType",
];

pub const OPTIONAL_META_KEYS: [&str; 2] = ["ScoreThreshold", "Metadata"];

fn meta_description(key: &str) -> &'static str {
    match key {
        "Source" => "the predictive model used",
        "Version" => "version of predictive model",
        "GenomeReference" => "accession ID of the genome reference object",
        "URL" => "link to code repository, documentation or source of E-G links",
        "Assays" => "molecular assay(s) used to define candidate elements",
        "SampleAgnostic" => {
            "boolean value 'True' if prediction is applicable to all biosamples, 'False' if not"
        }
        "SampleTermName" => "biosample/cell type name (required if not SampleAgnostic)",
        "SampleTermID" => "UBERON or CL term for the cell type or biosample",
        "SampleSummaryShort" => "brief description of the sample, including treatments",
        "ScoreType" => {
            "one of [positive_score, negative_score, p_value, adj_p_value, divergent, boolean]"
        }
        "ScoreThreshold" => "cutoff or thresholding strategy used to select predictions",
        "Metadata" => "data portal accession ID for full metadata",
        _ => "no description available",
    }
}

fn is_known_key(key: &str) -> bool {
    REQUIRED_META_KEYS.contains(&key) || OPTIONAL_META_KEYS.contains(&key)
}

/// Collects `# key: value` lines from the top of a prediction file and turns
/// them into advisory warnings. Lines whose key is unknown are plain
/// comments and are ignored; nothing here is a hard failure.
pub struct MetadataScanner {
    found: HashMap<String, String>,
    locations: HashMap<String, usize>,
    warnings: Vec<String>,
    genome_ref: Regex,
}

impl Default for MetadataScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataScanner {
    pub fn new() -> Self {
        MetadataScanner {
            found: HashMap::new(),
            locations: HashMap::new(),
            warnings: Vec::new(),
            genome_ref: Regex::new(r"^IGVF[A-Z]{2}[0-9]{4}[A-Z]{4}$").unwrap(),
        }
    }

    /// Feed one `#`-prefixed header line.
    pub fn scan_line(&mut self, line: &str, line_number: usize) {
        let rest = line.trim_start_matches('#');
        let Some((key, value)) = rest.split_once(':') else {
            return; // comment without a ':', ignore
        };

        let key = key.trim();
        if !is_known_key(key) {
            return;
        }
        let value = value.trim();

        if let Some(first) = self.locations.get(key) {
            self.warnings.push(format!(
                "Duplicate metadata key '{}' on line {}. The first value from line {} will be used.",
                key, line_number, first
            ));
            return;
        }

        self.found.insert(key.to_string(), value.to_string());
        self.locations.insert(key.to_string(), line_number);
    }

    /// Run the post-parse checks and return all metadata warnings.
    pub fn finish(mut self) -> Vec<String> {
        let is_sample_agnostic = self
            .found
            .get("SampleAgnostic")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let mut missing: Vec<&str> = REQUIRED_META_KEYS
            .iter()
            .copied()
            .filter(|key| !self.found.contains_key(*key))
            .collect();
        missing.sort_unstable();
        for key in missing {
            if key == "SampleTermName" && is_sample_agnostic {
                continue;
            }
            self.warnings.push(format!(
                "Missing required field '{}'. This field should contain: {}",
                key,
                meta_description(key)
            ));
        }

        let mut present: Vec<(&String, &String)> = self.found.iter().collect();
        present.sort_by_key(|(key, _)| self.locations[key.as_str()]);
        for (key, value) in present {
            if value.is_empty() {
                if key == "SampleTermName" && is_sample_agnostic {
                    continue;
                }
                self.warnings.push(format!(
                    "Field '{}' is present but empty. It should be filled with: {}",
                    key,
                    meta_description(key)
                ));
                continue;
            }

            if key == "GenomeReference" && !self.genome_ref.is_match(value) {
                self.warnings.push(format!(
                    "Field 'GenomeReference' has a malformed value '{}'. It should be an accession ID like 'IGVFFI0000GXML'.",
                    value
                ));
            }

            if key == "SampleAgnostic"
                && !value.eq_ignore_ascii_case("true")
                && !value.eq_ignore_ascii_case("false")
            {
                self.warnings.push(format!(
                    "Field 'SampleAgnostic' must be 'True' or 'False' (case-insensitive), but found '{}'.",
                    value
                ));
            }
        }

        self.warnings
    }
}
