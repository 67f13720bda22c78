use rayon::prelude::*;

use crate::EmbeddingMatrix;

/// Minimum row count for parallel scoring. Below this the per-task overhead
/// outweighs the parallelism.
const PARALLEL_THRESHOLD: usize = 4096;

/// A catalog row index paired with its similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRow {
    pub row: usize,
    pub score: f32,
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
fn norm(a: &[f32]) -> f32 {
    dot(a, a).sqrt()
}

/// Cosine similarity in `[-1, 1]`. A zero-norm vector on either side yields
/// `0.0` rather than dividing by zero; neither input is assumed normalized.
#[inline]
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let norm_a = norm(a);
    let norm_b = norm(b);
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}

/// Score the given matrix rows against `query` and return the `top_k`
/// highest, ordered by descending similarity.
///
/// The scan is exact: every row is scored. The sort is stable, so equal
/// scores keep their original row order and repeated calls over the same
/// inputs return identical rankings. When `top_k` exceeds the number of
/// rows, all rows come back; zero rows yield an empty ranking.
///
/// `query` must already be validated against `matrix.dim()` by the caller.
#[must_use]
pub fn rank(matrix: &EmbeddingMatrix, rows: &[usize], query: &[f32], top_k: usize) -> Vec<ScoredRow> {
    let score = |&row: &usize| ScoredRow {
        row,
        score: cosine_similarity(query, matrix.row(row)),
    };

    // Parallel collect preserves input order, so the stable sort below sees
    // the same sequence either way.
    let mut scored: Vec<ScoredRow> = if rows.len() >= PARALLEL_THRESHOLD {
        rows.par_iter().map(score).collect()
    } else {
        rows.iter().map(score).collect()
    };

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    scored
}
