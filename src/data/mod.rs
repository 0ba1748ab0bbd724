//! File layer shared by the two binaries.
//!
//! ```text
//!   sampler::Measurement
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  writer  │  append one row → data.txt
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader  │  parse data.txt → ObservationTable (all or nothing)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────────┐
//!   │ ObservableSeries │  one column per figure
//!   └──────────────────┘
//! ```

pub mod loader;
pub mod model;
pub mod writer;
