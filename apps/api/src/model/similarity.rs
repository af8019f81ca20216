use std::cmp::Ordering;

/// Cosine similarity between two dense vectors. A zero-norm vector is
/// similar to nothing, so the result is 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    dot / denom
}

/// Indices of the `k` highest scores, best first. Equal scores keep their
/// original order, so the earlier index wins a tie. This is intentionally not
/// the order produced by taking the tail of an ascending stable argsort and
/// reversing it, which would put the later index first.
pub fn top_k_indices(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| {
        scores[b]
            .partial_cmp(&scores[a])
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(k);
    order
}
