//! Allocation categories and priority labels.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PRIORITY_SEQUENCE_WIDTH;

/// Priority category derived from the visit type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// First encounter with the practice.
    #[serde(rename = "NP")]
    NewPatient,
    /// Any other visit.
    #[serde(rename = "FU")]
    FollowUp,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::NewPatient, Category::FollowUp];

    pub fn code(self) -> &'static str {
        match self {
            Self::NewPatient => "NP",
            Self::FollowUp => "FU",
        }
    }

    /// Formats the priority label for the `sequence`-th row of this category.
    ///
    /// ```
    /// use hx_model::Category;
    ///
    /// assert_eq!(Category::NewPatient.priority_label(1), "NP-001");
    /// assert_eq!(Category::FollowUp.priority_label(42), "FU-042");
    /// assert_eq!(Category::FollowUp.priority_label(1234), "FU-1234");
    /// ```
    pub fn priority_label(self, sequence: usize) -> String {
        format!(
            "{}-{:0width$}",
            self.code(),
            sequence,
            width = PRIORITY_SEQUENCE_WIDTH
        )
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
