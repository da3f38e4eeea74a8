//! leukodx-ranker — Diagnosis decision mapping and ranked-plot preparation.

pub mod decision;
pub mod plot;

pub use decision::decide;
pub use plot::{prepare_plot, PlotSeries, RankedPoint};
