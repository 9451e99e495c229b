//! Score-to-grade mapping
//!
//! A `BandTable` is an ordered sequence of `(minimum_score, label)` pairs,
//! strictly descending by minimum and covering [0, 100] with no gaps. Two
//! standard tables ship with the engine; which one applies to a category or
//! to the overall grade is configuration, not a hard-coded global — the
//! audit tooling this engine replaced used different granularities in
//! different places.

use serde::{Deserialize, Serialize};

/// One grade band: scores at or above `min` (and below the band above) get
/// this label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min: f64,
    pub label: &'static str,
}

/// Ordered grade-band table
#[derive(Debug, Clone, PartialEq)]
pub struct BandTable {
    name: &'static str,
    bands: Vec<Band>,
}

impl BandTable {
    /// Build a table from descending `(min, label)` pairs. The last band
    /// must reach 0 so every score in [0, 100] maps to a label.
    pub fn new(name: &'static str, pairs: &[(f64, &'static str)]) -> Self {
        debug_assert!(!pairs.is_empty());
        debug_assert!(
            pairs.windows(2).all(|w| w[0].0 > w[1].0),
            "band minima must strictly descend"
        );
        debug_assert_eq!(pairs.last().map(|p| p.0), Some(0.0), "bands must cover 0");
        Self {
            name,
            bands: pairs.iter().map(|&(min, label)| Band { min, label }).collect(),
        }
    }

    /// Six-band table: A+ >=90, A >=80, B >=70, C >=60, D >=50, F below
    pub fn coarse() -> Self {
        Self::new(
            "coarse",
            &[
                (90.0, "A+"),
                (80.0, "A"),
                (70.0, "B"),
                (60.0, "C"),
                (50.0, "D"),
                (0.0, "F"),
            ],
        )
    }

    /// Thirteen half-step bands from A+ down to F
    pub fn fine() -> Self {
        Self::new(
            "fine",
            &[
                (95.0, "A+"),
                (90.0, "A"),
                (85.0, "A-"),
                (80.0, "B+"),
                (75.0, "B"),
                (70.0, "B-"),
                (65.0, "C+"),
                (60.0, "C"),
                (55.0, "C-"),
                (50.0, "D+"),
                (45.0, "D"),
                (40.0, "D-"),
                (0.0, "F"),
            ],
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Map a score to its letter grade. Scores outside [0, 100] are clamped
    /// first, so the mapping is total.
    pub fn grade(&self, score: f64) -> &'static str {
        let score = score.clamp(0.0, 100.0);
        self.bands
            .iter()
            .find(|band| score >= band.min)
            .map(|band| band.label)
            // Unreachable with a well-formed table; clamp + last min of 0
            // guarantee a match.
            .unwrap_or("F")
    }
}

/// Which standard table to use — selected per category and for the overall
/// grade through configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeScale {
    #[default]
    Coarse,
    Fine,
}

impl GradeScale {
    pub fn table(&self) -> BandTable {
        match self {
            GradeScale::Coarse => BandTable::coarse(),
            GradeScale::Fine => BandTable::fine(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coarse_table_boundaries() {
        let t = BandTable::coarse();
        assert_eq!(t.grade(100.0), "A+");
        assert_eq!(t.grade(90.0), "A+");
        assert_eq!(t.grade(89.9), "A");
        assert_eq!(t.grade(66.7), "C");
        assert_eq!(t.grade(50.0), "D");
        assert_eq!(t.grade(49.9), "F");
        assert_eq!(t.grade(0.0), "F");
    }

    #[test]
    fn test_fine_table_has_thirteen_bands() {
        let t = BandTable::fine();
        assert_eq!(t.bands.len(), 13);
        assert_eq!(t.grade(96.0), "A+");
        assert_eq!(t.grade(82.0), "B+");
        assert_eq!(t.grade(42.0), "D-");
        assert_eq!(t.grade(39.9), "F");
    }

    #[test]
    fn test_grade_monotonic_in_score() {
        // For any s1 <= s2, grade(s1) is never a better label than grade(s2).
        // Band order doubles as label quality order, so it is enough to check
        // the selected band index never decreases as the score rises.
        for table in [BandTable::coarse(), BandTable::fine()] {
            let mut last_index = usize::MAX;
            for step in 0..=1000 {
                let score = step as f64 / 10.0;
                let label = table.grade(score);
                let index = table
                    .bands
                    .iter()
                    .position(|b| b.label == label)
                    .expect("label from own table");
                assert!(
                    index <= last_index || last_index == usize::MAX,
                    "{} regressed at score {score}",
                    table.name()
                );
                last_index = index;
            }
        }
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        let t = BandTable::coarse();
        assert_eq!(t.grade(-10.0), "F");
        assert_eq!(t.grade(250.0), "A+");
    }

    #[test]
    fn test_scale_selection() {
        assert_eq!(GradeScale::default(), GradeScale::Coarse);
        assert_eq!(GradeScale::Fine.table().name(), "fine");
    }
}
