//! Execution-quality ratings and the derived letter grade.

use std::fmt;

/// Letter grade for trade execution. Variants are declared worst-first so the
/// derived ordering matches the grade scale (F < D < C < B < A < A+).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    APlus,
}

impl Grade {
    /// Grade from a pair of 1-5 ratings via the average threshold table.
    /// Total over the rating domain; out-of-range values still map to a
    /// grade because range enforcement belongs to the input layer.
    pub fn from_ratings(entry_quality: u8, exit_quality: u8) -> Self {
        let average = (f64::from(entry_quality) + f64::from(exit_quality)) / 2.0;
        if average >= 4.5 {
            Grade::APlus
        } else if average >= 4.0 {
            Grade::A
        } else if average >= 3.0 {
            Grade::B
        } else if average >= 2.0 {
            Grade::C
        } else if average >= 1.5 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        write!(f, "{s}")
    }
}

/// User-supplied ratings for one trade, 1 (poor) to 5 (perfect) each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionQuality {
    pub entry_quality: u8,
    pub exit_quality: u8,
}

impl ExecutionQuality {
    pub fn average(&self) -> f64 {
        (f64::from(self.entry_quality) + f64::from(self.exit_quality)) / 2.0
    }

    pub fn grade(&self) -> Grade {
        Grade::from_ratings(self.entry_quality, self.exit_quality)
    }
}
