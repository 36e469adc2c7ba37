use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Payload: the adjustments for `date` were created, overwritten, or removed.
///
/// `source` identifies the publishing view so it can ignore its own echo
/// (a timeline that just committed a drag should not reload itself).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentsChanged {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl AdjustmentsChanged {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, source: None }
    }

    pub fn with_source(date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            date,
            source: Some(source.into()),
        }
    }
}
