//! Quality-control summary attached to every analysis result.

use api::QcStatus;
use serde::{Deserialize, Serialize};

use super::lenient::null_as_default;

/// An absent status reads as `WARN`; an explicit `null` reads as empty and
/// therefore badges as a failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QcReport {
    #[serde(default = "default_status", deserialize_with = "null_as_default")]
    pub overall_status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: Vec<String>,
}

fn default_status() -> String {
    QcStatus::Warn.as_str().to_string()
}

impl Default for QcReport {
    fn default() -> Self {
        Self {
            overall_status: default_status(),
            notes: Vec::new(),
        }
    }
}

impl QcReport {
    /// Badge modifier for the status. Anything that is neither `GOOD` nor
    /// `WARN` is shown as a failure.
    pub fn badge_class(&self) -> &'static str {
        badge_class(&self.overall_status)
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}

pub fn badge_class(status: &str) -> &'static str {
    match status {
        "GOOD" => "qc-good",
        "WARN" => "qc-warn",
        _ => "qc-fail",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_classes_follow_status() {
        assert_eq!(badge_class("GOOD"), "qc-good");
        assert_eq!(badge_class("WARN"), "qc-warn");
        assert_eq!(badge_class("FAIL"), "qc-fail");
        assert_eq!(badge_class("UNKNOWN"), "qc-fail");
        assert_eq!(badge_class("good"), "qc-fail");
    }

    #[test]
    fn missing_fields_default_to_warn_without_notes() {
        let report: QcReport = serde_json::from_str("{}").unwrap();
        assert_eq!(report.overall_status, "WARN");
        assert!(!report.has_notes());
    }

    #[test]
    fn null_fields_are_tolerated() {
        let report: QcReport =
            serde_json::from_str(r#"{ "overall_status": null, "notes": null }"#).unwrap();
        assert_eq!(report.overall_status, "");
        assert_eq!(report.badge_class(), "qc-fail");
        assert!(!report.has_notes());
    }
}
