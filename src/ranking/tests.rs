use super::*;

fn matrix(rows: &[&[f32]]) -> VectorMatrix {
    let dim = rows.first().map_or(0, |r| r.len());
    VectorMatrix::from_rows(dim, rows.iter().map(|r| r.to_vec())).expect("uniform rows")
}

fn indices(ranked: &[RankedIndex]) -> Vec<usize> {
    ranked.iter().map(|r| r.index).collect()
}

#[test]
fn test_cosine_identical_vectors() {
    let v = [1.0, 2.0, 3.0];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_orthogonal_vectors() {
    assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
}

#[test]
fn test_cosine_opposite_vectors() {
    assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_scaled_vectors() {
    let similarity = cosine_similarity(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
    assert!((similarity - 1.0).abs() < 1e-6);
}

#[test]
fn test_cosine_degenerate_inputs() {
    assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
    assert_eq!(cosine_similarity(&[], &[]), 0.0);
    assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
}

#[test]
fn test_l2_norm() {
    assert!((l2_norm(&[3.0, 4.0]) - 5.0).abs() < 1e-6);
    assert_eq!(l2_norm(&[]), 0.0);
}

#[test]
fn test_matrix_rejects_wrong_row_length() {
    let mut m = VectorMatrix::new(3);
    m.push(&[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(
        m.push(&[1.0, 2.0]),
        Err(RankingError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    );
    assert_eq!(m.rows(), 1);
}

#[test]
fn test_matrix_row_access() {
    let m = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    assert_eq!(m.rows(), 2);
    assert_eq!(m.row(1), Some(&[3.0, 4.0][..]));
    assert_eq!(m.row(2), None);
    assert_eq!(m.iter().count(), 2);
}

#[test]
fn test_rank_orders_by_descending_score() {
    let corpus = matrix(&[&[0.0, 1.0], &[1.0, 0.0], &[0.7, 0.7]]);
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.1], &corpus, 3)
        .unwrap();

    assert_eq!(indices(&ranked), vec![1, 2, 0]);
    assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_rank_does_not_assume_normalized_inputs() {
    // Row 0 has the larger dot product but the smaller angle belongs to row 1.
    let corpus = matrix(&[&[10.0, 10.0], &[1.0, 0.1]]);
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &corpus, 1)
        .unwrap();

    assert_eq!(ranked[0].index, 1);
    assert!(ranked[0].score <= 1.0);
}

#[test]
fn test_rank_ties_keep_corpus_order() {
    let corpus = matrix(&[&[1.0, 0.0], &[0.0, 1.0], &[1.0, 0.0], &[2.0, 0.0]]);
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &corpus, 4)
        .unwrap();

    assert_eq!(indices(&ranked), vec![0, 2, 3, 1]);
}

#[test]
fn test_rank_clamps_top_k() {
    let corpus = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &corpus, 5)
        .unwrap();
    assert_eq!(ranked.len(), 2);
}

#[test]
fn test_rank_truncates_to_top_k() {
    let corpus = matrix(&[&[1.0, 0.0], &[0.9, 0.1], &[0.0, 1.0]]);
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &corpus, 2)
        .unwrap();
    assert_eq!(indices(&ranked), vec![0, 1]);
}

#[test]
fn test_rank_zero_top_k_is_invalid() {
    let corpus = matrix(&[&[1.0, 0.0]]);
    let err = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &corpus, 0)
        .unwrap_err();
    assert!(matches!(err, RankingError::InvalidArgument { .. }));
}

#[test]
fn test_rank_zero_top_k_is_invalid_even_for_empty_corpus() {
    let err = SimilarityRanker::new()
        .rank(&[1.0], &VectorMatrix::new(1), 0)
        .unwrap_err();
    assert!(matches!(err, RankingError::InvalidArgument { .. }));
}

#[test]
fn test_rank_empty_corpus_is_empty() {
    let ranked = SimilarityRanker::new()
        .rank(&[1.0, 0.0], &VectorMatrix::new(2), 3)
        .unwrap();
    assert!(ranked.is_empty());
}

#[test]
fn test_rank_rejects_query_dimension_mismatch() {
    let corpus = matrix(&[&[1.0, 0.0, 0.0]]);
    assert_eq!(
        SimilarityRanker::new().rank(&[1.0, 0.0], &corpus, 1),
        Err(RankingError::DimensionMismatch {
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn test_rank_zero_query_scores_zero() {
    let corpus = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
    let ranked = SimilarityRanker::new()
        .rank(&[0.0, 0.0], &corpus, 2)
        .unwrap();
    assert_eq!(indices(&ranked), vec![0, 1]);
    assert!(ranked.iter().all(|r| r.score == 0.0));
}
