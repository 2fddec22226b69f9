use std::collections::HashMap;

use rayon::prelude::*;

use e2g_core::models::{ChromosomeGroup, PairTable};

use crate::errors::PinloopError;
use crate::index::lower_bound;
use crate::loops::{LoopCatalog, LoopRecord};
use crate::matrix::ContactMatrix;

/// Name of the column appended to the pair table.
pub const PINLOOP_COLUMN: &str = "Pinloop";

/// A loop whose anchors have been mapped to half-open rank ranges over the
/// chromosome's sorted gene and element arrays.
struct BinnedLoop {
    rna_start: usize,
    rna_end: usize,
    atac_start: usize,
    atac_end: usize,
    count: f64,
}

/// Map one loop's anchor midpoints to rank ranges via lower-bound search.
///
/// Anchors are normalized to `(min, max)` first: the catalog does not
/// guarantee `center1 < center2`, and a reversed pair must span the same
/// ranks as its ordered twin. An empty gene or element array leaves that
/// axis at the neutral `0..0` range.
fn bin_loop(record: &LoopRecord, gene_tss: &[u64], element_centers: &[f64]) -> BinnedLoop {
    let lo = record.center1.min(record.center2);
    let hi = record.center1.max(record.center2);

    let (rna_start, rna_end) = if gene_tss.is_empty() {
        (0, 0)
    } else {
        (lower_bound(gene_tss, &lo), lower_bound(gene_tss, &hi))
    };

    let (atac_start, atac_end) = if element_centers.is_empty() {
        (0, 0)
    } else {
        (
            lower_bound(element_centers, &(lo as f64)),
            lower_bound(element_centers, &(hi as f64)),
        )
    };

    BinnedLoop {
        rna_start,
        rna_end,
        atac_start,
        atac_end,
        count: record.count,
    }
}

///
/// Build the normalized contact matrix for one chromosome group.
///
/// Loops at or beyond the cis-distance cutoff are skipped; the rest scatter
/// their weight across the rank rectangle between their anchors. The
/// returned matrix is already normalized and is not mutated afterwards.
///
pub fn contact_matrix(group: &ChromosomeGroup, loops: &[LoopRecord]) -> ContactMatrix {
    let gene_tss: Vec<u64> = group.genes.iter().map(|g| g.tss).collect();
    let element_centers: Vec<f64> = group.elements.iter().map(|e| e.center()).collect();

    let mut matrix = ContactMatrix::new(group.genes.len(), group.elements.len());

    for record in loops.iter().filter(|l| l.is_proximal()) {
        let binned = bin_loop(record, &gene_tss, &element_centers);
        matrix.add_range(
            binned.rna_start..binned.rna_end,
            binned.atac_start..binned.atac_end,
            binned.count,
        );
    }

    matrix.normalize();
    matrix
}

/// Look up each pair row's probability from the chromosome's matrix.
///
/// Returns `(original row index, value)` assignments so the caller can merge
/// chromosome results in any order. A row whose gene or element identifier
/// is absent from the derived index signals an inconsistency between the
/// pair table and its partition and is a fatal error, never a default.
fn annotate_group(
    table: &PairTable,
    group: &ChromosomeGroup,
    matrix: &ContactMatrix,
) -> Result<Vec<(usize, f64)>, PinloopError> {
    // first occurrence wins, so a duplicate Ensembl ID at a second TSS
    // resolves to the lowest rank deterministically
    let mut gene_rank: HashMap<&str, usize> = HashMap::new();
    for (rank, gene) in group.genes.iter().enumerate() {
        gene_rank.entry(gene.ensembl_id.as_str()).or_insert(rank);
    }
    let mut element_rank: HashMap<&str, usize> = HashMap::new();
    for (rank, element) in group.elements.iter().enumerate() {
        element_rank.entry(element.name.as_str()).or_insert(rank);
    }

    let mut assignments = Vec::with_capacity(group.row_indices.len());
    for &row in &group.row_indices {
        let gene_id = table.gene_ensembl_id(row);
        let element_name = table.element_name(row);

        let gene = *gene_rank
            .get(gene_id)
            .ok_or_else(|| PinloopError::MissingLocus {
                chr: group.chr.clone(),
                kind: "gene",
                id: gene_id.to_string(),
            })?;
        let element =
            *element_rank
                .get(element_name)
                .ok_or_else(|| PinloopError::MissingLocus {
                    chr: group.chr.clone(),
                    kind: "element",
                    id: element_name.to_string(),
                })?;

        // ranks come from the arrays the matrix was sized with
        assignments.push((row, matrix.get(gene, element).unwrap_or(0.0)));
    }

    Ok(assignments)
}

///
/// Compute the contact probability for every row of the pair table.
///
/// Chromosome groups are processed independently and in parallel; results
/// are merged by original row index, so the returned vector is aligned with
/// the table's row order no matter how chromosomes were scheduled. Rows on
/// chromosomes absent from the loop catalog keep the 0.0 default.
///
pub fn score_pair_table(
    table: &PairTable,
    catalog: &LoopCatalog,
) -> Result<Vec<f64>, PinloopError> {
    let groups = ChromosomeGroup::partition(table)?;

    let per_chromosome: Vec<Vec<(usize, f64)>> = groups
        .par_iter()
        .map(|group| {
            let matrix = contact_matrix(group, catalog.loops_for(&group.chr));
            annotate_group(table, group, &matrix)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut values = vec![0.0; table.len()];
    for assignments in per_chromosome {
        for (row, value) in assignments {
            values[row] = value;
        }
    }

    Ok(values)
}

///
/// Score the table and append the result as its `Pinloop` column.
///
pub fn annotate_pair_table(
    table: &mut PairTable,
    catalog: &LoopCatalog,
) -> Result<(), PinloopError> {
    let values = score_pair_table(table, catalog)?;
    let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    table.append_column(PINLOOP_COLUMN, values)?;
    Ok(())
}
