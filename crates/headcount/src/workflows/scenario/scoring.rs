use super::config::ScoreWeights;

/// Per-person feature columns ready for normalization. Column order and
/// length are the working-set input order.
#[derive(Debug, Clone, Default)]
pub(crate) struct FeatureColumns {
    pub(crate) compensation: Vec<f64>,
    pub(crate) tenure_years: Vec<f64>,
    pub(crate) level_score: Vec<f64>,
    pub(crate) direct_reports: Vec<f64>,
    pub(crate) equity_pct: Vec<f64>,
    /// False when the equity column was absent or degenerate; the equity
    /// term is then omitted from the weighted sum entirely.
    pub(crate) include_equity: bool,
}

/// Divides by the column maximum with a floor of 1.0, so an all-zero column
/// normalizes to all zeros instead of NaN.
fn normalized(values: &[f64]) -> Vec<f64> {
    let denominator = values.iter().cloned().fold(0.0_f64, f64::max).max(1.0);
    values.iter().map(|value| value / denominator).collect()
}

/// Weighted sum of the normalized feature columns.
pub(crate) fn impact_scores(features: &FeatureColumns, weights: &ScoreWeights) -> Vec<f64> {
    let compensation = normalized(&features.compensation);
    let tenure = normalized(&features.tenure_years);
    let level = normalized(&features.level_score);
    let reports = normalized(&features.direct_reports);
    let equity = normalized(&features.equity_pct);

    (0..features.compensation.len())
        .map(|i| {
            let mut score = weights.compensation * compensation[i]
                + weights.tenure * tenure[i]
                + weights.seniority * level[i]
                + weights.direct_reports * reports[i];
            if features.include_equity {
                score += weights.equity * equity[i];
            }
            score
        })
        .collect()
}
