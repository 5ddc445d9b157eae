//! New-patient / follow-up classification of visit types.

use hx_model::Category;
use hx_model::columns::value_key;

/// Decides the allocation category of a row from its visit type.
///
/// Classification is total: every visit type maps to exactly one category.
pub trait Classifier {
    fn classify(&self, visit_type: &str) -> Category;
}

/// Classifies a visit type as new-patient when it contains a marker.
///
/// Matching is a case-insensitive substring test on the trimmed value.
/// An empty marker classifies everything as follow-up.
///
/// ```
/// use hx_core::classify::{Classifier, MarkerClassifier};
/// use hx_model::Category;
///
/// let classifier = MarkerClassifier::new("new");
/// assert_eq!(classifier.classify("NEW PATIENT VISIT"), Category::NewPatient);
/// assert_eq!(classifier.classify("Follow Up"), Category::FollowUp);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClassifier {
    marker: String,
}

impl MarkerClassifier {
    pub fn new(marker: &str) -> Self {
        Self {
            marker: value_key(marker),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl Classifier for MarkerClassifier {
    fn classify(&self, visit_type: &str) -> Category {
        if !self.marker.is_empty() && value_key(visit_type).contains(&self.marker) {
            Category::NewPatient
        } else {
            Category::FollowUp
        }
    }
}

impl<F> Classifier for F
where
    F: Fn(&str) -> Category,
{
    fn classify(&self, visit_type: &str) -> Category {
        self(visit_type)
    }
}
