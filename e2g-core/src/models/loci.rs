use std::collections::HashMap;
use std::collections::HashSet;

use crate::errors::PairTableError;
use crate::models::PairTable;
use crate::utils::chrom_karyotype_key;

/// A gene anchored at its transcription start site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneLocus {
    pub ensembl_id: String,
    pub symbol: String,
    pub tss: u64,
}

/// A candidate element as a half-open genomic interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementLocus {
    pub name: String,
    pub start: u64,
    pub end: u64,
}

impl ElementLocus {
    /// Midpoint of the interval. Kept as `f64` so an odd-width element
    /// (center x.5) stays strictly between the two integer anchors
    /// surrounding it during binning.
    pub fn center(&self) -> f64 {
        (self.start + self.end) as f64 / 2.0
    }
}

/// One chromosome's slice of the pair table: the original row indices plus
/// the de-duplicated gene and element loci derived from them.
///
/// Genes are sorted ascending by TSS and elements ascending by center; the
/// sort is performed here so downstream binary searches always operate on
/// ordered arrays. Ties break on identifier to keep ranks deterministic.
#[derive(Debug, Clone)]
pub struct ChromosomeGroup {
    pub chr: String,
    pub row_indices: Vec<usize>,
    pub genes: Vec<GeneLocus>,
    pub elements: Vec<ElementLocus>,
}

impl ChromosomeGroup {
    ///
    /// Partition a pair table into per-chromosome groups, ordered
    /// karyotypically (chr1..chr22, chrX, chrY, chrM).
    ///
    pub fn partition(table: &PairTable) -> Result<Vec<ChromosomeGroup>, PairTableError> {
        let mut rows_by_chr: HashMap<String, Vec<usize>> = HashMap::new();
        for row in 0..table.len() {
            rows_by_chr
                .entry(table.element_chr(row).to_string())
                .or_default()
                .push(row);
        }

        let mut groups: Vec<ChromosomeGroup> = Vec::with_capacity(rows_by_chr.len());
        for (chr, row_indices) in rows_by_chr {
            let mut gene_seen: HashSet<GeneLocus> = HashSet::new();
            let mut element_seen: HashSet<ElementLocus> = HashSet::new();
            let mut genes: Vec<GeneLocus> = Vec::new();
            let mut elements: Vec<ElementLocus> = Vec::new();

            for &row in &row_indices {
                let gene = GeneLocus {
                    ensembl_id: table.gene_ensembl_id(row).to_string(),
                    symbol: table.gene_symbol(row).to_string(),
                    tss: table.gene_tss(row)?,
                };
                if gene_seen.insert(gene.clone()) {
                    genes.push(gene);
                }

                let element = ElementLocus {
                    name: table.element_name(row).to_string(),
                    start: table.element_start(row)?,
                    end: table.element_end(row)?,
                };
                if element_seen.insert(element.clone()) {
                    elements.push(element);
                }
            }

            genes.sort_by(|a, b| {
                a.tss
                    .cmp(&b.tss)
                    .then_with(|| a.ensembl_id.cmp(&b.ensembl_id))
            });
            // start + end orders identically to the f64 center and avoids
            // a float comparison
            elements.sort_by(|a, b| {
                (a.start + a.end)
                    .cmp(&(b.start + b.end))
                    .then_with(|| a.name.cmp(&b.name))
            });

            groups.push(ChromosomeGroup {
                chr,
                row_indices,
                genes,
                elements,
            });
        }

        groups.sort_by_key(|g| chrom_karyotype_key(&g.chr));

        Ok(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;

    const HEADER: &str =
        "ElementChr\tElementStart\tElementEnd\tElementName\tGeneEnsemblID\tGeneSymbol\tGeneTSS";

    fn table_from(lines: &[&str]) -> PairTable {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file.flush().unwrap();
        PairTable::try_from(file.path()).unwrap()
    }

    #[rstest]
    fn test_partition_groups_by_chromosome() {
        let table = table_from(&[
            "chr2\t10\t20\telem_c\tENSG02\tGENE2\t40",
            "chr1\t100\t300\telem_a\tENSG01\tGENE1\t500",
            "chr1\t550\t650\telem_b\tENSG01\tGENE1\t500",
        ]);

        let groups = ChromosomeGroup::partition(&table).unwrap();

        assert_eq!(groups.len(), 2);
        // karyotypic ordering puts chr1 first even though chr2 came first in the file
        assert_eq!(groups[0].chr, "chr1");
        assert_eq!(groups[0].row_indices, vec![1, 2]);
        assert_eq!(groups[1].chr, "chr2");
        assert_eq!(groups[1].row_indices, vec![0]);
    }

    #[rstest]
    fn test_genes_deduplicated_and_sorted() {
        let table = table_from(&[
            "chr1\t100\t300\telem_a\tENSG02\tGENE2\t900",
            "chr1\t550\t650\telem_b\tENSG01\tGENE1\t500",
            "chr1\t700\t800\telem_c\tENSG01\tGENE1\t500",
        ]);

        let groups = ChromosomeGroup::partition(&table).unwrap();
        let genes = &groups[0].genes;

        assert_eq!(genes.len(), 2);
        assert_eq!(genes[0].ensembl_id, "ENSG01");
        assert_eq!(genes[0].tss, 500);
        assert_eq!(genes[1].ensembl_id, "ENSG02");
        assert_eq!(genes[1].tss, 900);
    }

    #[rstest]
    fn test_gene_tss_tie_breaks_on_id() {
        let table = table_from(&[
            "chr1\t100\t300\telem_a\tENSG09\tGENE9\t500",
            "chr1\t550\t650\telem_b\tENSG01\tGENE1\t500",
        ]);

        let groups = ChromosomeGroup::partition(&table).unwrap();
        let genes = &groups[0].genes;

        assert_eq!(genes[0].ensembl_id, "ENSG01");
        assert_eq!(genes[1].ensembl_id, "ENSG09");
    }

    #[rstest]
    fn test_elements_sorted_by_center() {
        // centers: elem_a 200.0, elem_b 600.0, elem_c 15.0
        let table = table_from(&[
            "chr1\t100\t300\telem_a\tENSG01\tGENE1\t500",
            "chr1\t550\t650\telem_b\tENSG01\tGENE1\t500",
            "chr1\t10\t20\telem_c\tENSG01\tGENE1\t500",
        ]);

        let groups = ChromosomeGroup::partition(&table).unwrap();
        let names: Vec<&str> = groups[0].elements.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["elem_c", "elem_a", "elem_b"]);
    }

    #[rstest]
    fn test_element_center_is_midpoint() {
        let element = ElementLocus {
            name: "e".to_string(),
            start: 100,
            end: 301,
        };
        assert_eq!(element.center(), 200.5);
    }
}
