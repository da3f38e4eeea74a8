//! Ranked scatter-series preparation for the comparison plot.
//!
//! The subject observation is merged into the background population, the
//! combined set is stable-sorted ascending by probability, and the 1-based
//! position in the sorted sequence becomes the x-axis rank. The subject is
//! appended after the population, so among exact score ties it keeps the
//! highest rank.

use serde::Serialize;

use leukodx_common::{DiagnosisLabel, PopulationRecord};

/// One plotted point: 1-based rank position and model score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedPoint {
    pub rank: usize,
    pub probability: f64,
}

/// Three disjoint series consumed by the external charting layer.
/// The subject series has exactly one member.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlotSeries {
    pub leukemoid: Vec<RankedPoint>,
    pub myeloid: Vec<RankedPoint>,
    pub subject: Vec<RankedPoint>,
}

impl PlotSeries {
    pub fn len(&self) -> usize {
        self.leukemoid.len() + self.myeloid.len() + self.subject.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Rank the subject against the background population.
///
/// Deterministic and pure: identical inputs always yield identical rank
/// assignment. O(N log N) in the population size.
pub fn prepare_plot(population: &[PopulationRecord], subject_probability: f64) -> PlotSeries {
    let mut points: Vec<(f64, Option<DiagnosisLabel>)> = population
        .iter()
        .map(|r| (r.probability, Some(r.label)))
        .collect();
    points.push((subject_probability, None));

    // slice::sort_by is stable: population order survives and the subject,
    // appended last, sorts last among exact ties.
    points.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut series = PlotSeries::default();
    for (idx, (probability, label)) in points.into_iter().enumerate() {
        let point = RankedPoint { rank: idx + 1, probability };
        match label {
            Some(DiagnosisLabel::LeukemoidReaction) => series.leukemoid.push(point),
            Some(DiagnosisLabel::MyeloidMalignancy) => series.myeloid.push(point),
            None => series.subject.push(point),
        }
    }
    series
}
