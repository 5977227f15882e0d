//! Event Details Models

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Event context shared by the whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[serde(default)]
    pub event_date: Option<Date>,

    #[serde(default)]
    pub event_time: Option<String>,

    /// Occasion, e.g. "wedding".
    #[serde(default)]
    pub event_type: Option<String>,

    /// Delivery area.
    #[serde(default)]
    pub area: Option<String>,
}

impl EventDetails {
    /// Returns whether at least one field is set.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.event_date.is_some()
            || self.event_time.is_some()
            || self.event_type.is_some()
            || self.area.is_some()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn empty_details_have_nothing_set() {
        assert!(!EventDetails::default().has_any());
    }

    #[test]
    fn any_single_field_counts() {
        let details = EventDetails {
            area: Some("Downtown".to_string()),
            ..EventDetails::default()
        };

        assert!(details.has_any());

        let details = EventDetails {
            event_date: Some(date(2025, 12, 1)),
            ..EventDetails::default()
        };

        assert!(details.has_any());
    }
}
