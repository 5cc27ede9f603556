// Scenario tests for the cost estimators
//
// Distributions are shaped after real opcode logs: a tight cluster of
// per-repetition costs plus interference spikes, or a cold/warm split for
// storage-touching operations.

use super::*;

/// ADD-like series: 200 samples in [21.0, 21.5] with every 20th sample
/// replaced by a spike above 60
fn spiky_cheap_opcode() -> Vec<f64> {
    let mut values: Vec<f64> = (0..200)
        .map(|i| 21.0 + f64::from((i * 7) % 11) * 0.05)
        .collect();
    for i in (0..200).step_by(20) {
        values[i] = 60.0 + i as f64 * 0.1;
    }
    values
}

/// SLOAD-like series: 80 warm accesses near 100, 20 cold accesses near 2100
fn cold_warm_opcode() -> Vec<f64> {
    (0..80)
        .map(|i| 100.0 + f64::from((i * 3) % 7))
        .chain((0..20).map(|i| 2100.0 + f64::from((i * 5) % 9)))
        .collect()
}

#[test]
fn test_spikes_do_not_move_the_mode() {
    let values = spiky_cheap_opcode();
    let mode = agg_mode(&values, &BinRule::default()).unwrap();
    assert!(
        (21.0..=21.5).contains(&mode),
        "binned mode {mode} should stay inside the main cluster"
    );
}

#[test]
fn test_spikes_pull_the_mean() {
    let values = spiky_cheap_opcode();
    let summary = Summary::of(&values, &BinRule::default()).unwrap();
    assert!(summary.mean > 22.5, "mean {} should be dragged up", summary.mean);
    assert!((21.0..=21.5).contains(&summary.binned_mode));
}

#[test]
fn test_fd_is_finer_than_fixed_bins_on_spiky_data() {
    let values = spiky_cheap_opcode();
    let fd = agg_mode(&values, &BinRule::default()).unwrap();
    let fixed = agg_mode(&values, &BinRule::with_strategy(BinStrategy::Fixed)).unwrap();
    // With 25 bins over [21, 79.9] the modal bin is ~2.4 wide
    assert!((fd - 21.25).abs() < (fixed - 21.25).abs());
}

#[test]
fn test_trim_then_mode_pipeline() {
    let values = spiky_cheap_opcode();
    let trimmed = trim_to_quantiles(&values, 0.05, 0.95).unwrap();
    assert_eq!(trimmed.len(), 190);
    assert!(trimmed.iter().all(|v| *v < 60.0));

    let mode = agg_mode(&trimmed, &BinRule::default()).unwrap();
    assert!((21.0..=21.5).contains(&mode));
}

#[test]
fn test_cold_warm_mode_follows_majority() {
    let values = cold_warm_opcode();
    let mode = agg_mode(&values, &BinRule::default()).unwrap();
    assert!(
        (100.0..=107.0).contains(&mode),
        "binned mode {mode} should pick the warm cluster"
    );
}

#[test]
fn test_linear_cost_model_on_binned_modes() {
    // KECCAK256-like: 30 fixed + 6 per word, two noisy samples per size
    let sizes = [32u32, 64, 128, 256, 512];
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for size in sizes {
        let base = 30.0 + 6.0 * f64::from(size) / 32.0;
        let samples = [base - 0.25, base, base, base + 0.25, base + 40.0];
        xs.push(f64::from(size));
        ys.push(agg_mode(&samples, &BinRule::default()).unwrap());
    }

    let fit = LinearFit::ordinary_least_squares(&xs, &ys).unwrap();
    assert!((fit.slope - 6.0 / 32.0).abs() < 0.01, "slope {}", fit.slope);
    assert!((fit.intercept - 30.0).abs() < 3.0, "intercept {}", fit.intercept);
}
