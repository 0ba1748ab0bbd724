//! 2D Ising model toolkit: Metropolis-Hastings sampling on a square
//! lattice, delimited result files, and PNG plots of the measured
//! observables.
//!
//! Pipeline:
//! ```text
//!   ising2d --temperature T ...     (one run per temperature)
//!        │  appends one row
//!        ▼
//!     data.txt       T, J, E/N, M/N, C/N, X/N, seconds
//!        │
//!        ▼
//!   plot_observables                (no arguments)
//!        │
//!        ▼
//!   Ene_vs_T.png  Mag_vs_T.png  Cap_vs_T.png  Sus_vs_T.png
//! ```

pub mod data;
pub mod exact;
pub mod lattice;
pub mod plot;
pub mod sampler;
