// Robust per-operation cost estimators
//
// Benchmark samples of a single opcode are rarely normal: cache effects,
// allocator warm-up and host interference produce long right tails and
// occasional multi-modal clusters. The estimators here are chosen to be
// stable under that noise:
//
// - quantile trim: drop samples outside the 5th–95th percentile per operation
// - adaptive bin count: Freedman–Diaconis width (Sturges / sqrt / fixed as
//   alternatives)
// - binned mode: center of the fullest histogram bin, the aggregate that
//   feeds the lookup table
// - ordinary least squares: fixed cost + marginal per-unit cost of
//   size-dependent operations
//
// All functions are pure and operate on plain `f64` slices.

mod bins;
mod histogram;
mod linear;
mod quantile;
mod summary;

pub use bins::{auto_bin_count, BinRule, BinStrategy};
pub use histogram::{agg_mode, binned_mode, Histogram};
pub use linear::LinearFit;
pub use quantile::{percentile, quantile_bounds, sorted_finite, trim_to_quantiles};
pub use summary::{gaussian_kde, scott_bandwidth, MeanInterval, Summary};

#[cfg(test)]
mod tests;
