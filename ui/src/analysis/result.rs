//! The analysis result as received from the server.
//!
//! The page only reads a handful of fields, but the download must reproduce
//! exactly what the server sent, so the raw JSON travels alongside the
//! decoded view.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::core::lenient::null_as_default;
use crate::core::qc::QcReport;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    pub view: String,
}

/// Fields of the response the page renders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultView {
    pub meta: ResultMeta,
    pub metrics: Map<String, Value>,
    pub qc: QcReport,
    #[serde(default)]
    pub annotated_video_path: Option<String>,
}

impl ResultView {
    /// Numeric value for `key`; `None` when absent, null or not a number.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key).and_then(Value::as_f64)
    }

    pub fn annotated_video(&self) -> Option<&str> {
        self.annotated_video_path
            .as_deref()
            .filter(|path| !path.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredResult {
    raw: Value,
    view: ResultView,
}

impl StoredResult {
    pub fn from_raw(raw: Value) -> Result<Self, serde_json::Error> {
        let view = ResultView::deserialize(&raw)?;
        Ok(Self { raw, view })
    }

    #[cfg(test)]
    pub(crate) fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Two-space indented JSON of the untouched server payload.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "meta": { "fps": 30.0, "frames": 100, "view": "side" },
            "events": { "plant_frame": 60 },
            "metrics": {
                "release_angle_deg": 35.0,
                "release_height_m": null,
                "release_speed_mps": "fast"
            },
            "qc": { "overall_status": "GOOD", "notes": [] }
        })
    }

    #[test]
    fn metric_lookup_skips_null_and_non_numeric() {
        let stored = StoredResult::from_raw(sample()).unwrap();
        let view = stored.view();
        assert_eq!(view.meta.view, "side");
        assert_eq!(view.metric("release_angle_deg"), Some(35.0));
        assert_eq!(view.metric("release_height_m"), None);
        assert_eq!(view.metric("release_speed_mps"), None);
        assert_eq!(view.metric("plant_to_release_ms"), None);
    }

    #[test]
    fn raw_payload_is_kept_verbatim() {
        let stored = StoredResult::from_raw(sample()).unwrap();
        assert_eq!(stored.raw(), &sample());

        let pretty = stored.to_pretty_json().unwrap();
        assert!(pretty.starts_with("{\n  \"meta\": {"));
        let reparsed: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(reparsed, sample());
    }

    #[test]
    fn missing_qc_is_a_decode_error() {
        let raw = json!({ "meta": { "view": "side" }, "metrics": {} });
        let err = StoredResult::from_raw(raw).unwrap_err();
        assert!(err.to_string().contains("qc"));
    }

    #[test]
    fn null_view_and_qc_fields_still_decode() {
        let raw = json!({
            "meta": { "view": null },
            "metrics": { "release_angle_deg": 35.0 },
            "qc": { "overall_status": null, "notes": null }
        });
        let stored = StoredResult::from_raw(raw.clone()).unwrap();
        let view = stored.view();
        assert_eq!(view.meta.view, "");
        assert_eq!(view.qc.badge_class(), "qc-fail");
        assert!(view.qc.notes.is_empty());
        assert_eq!(stored.raw(), &raw);

        let stored = StoredResult::from_raw(json!({
            "meta": { "view": "side" },
            "metrics": { "release_angle_deg": 35.0 },
            "qc": { "overall_status": "GOOD", "notes": null }
        }))
        .unwrap();
        assert_eq!(stored.view().qc.badge_class(), "qc-good");
        assert!(!stored.view().qc.has_notes());
    }

    #[test]
    fn empty_video_path_counts_as_absent() {
        let mut raw = sample();
        raw["annotated_video_path"] = json!("");
        let stored = StoredResult::from_raw(raw).unwrap();
        assert_eq!(stored.view().annotated_video(), None);
    }
}
