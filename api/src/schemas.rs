//! Wire types for `/api/analyze`, shared by the server and the UI client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Camera position the clip was filmed from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Side,
    Rear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

/// How pixel distances are converted to metres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleMethod {
    #[default]
    Marker,
    Auto,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QcStatus {
    Good,
    #[default]
    Warn,
    Fail,
}

/// Error returned when a form value is not one of the accepted options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {value:?}")]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
}

macro_rules! form_option {
    ($ty:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = ParseOptionError;

            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                match raw.trim() {
                    $($text => Ok($ty::$variant),)+
                    other => Err(ParseOptionError {
                        field: $field,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

form_option!(ViewType, "view", { Side => "side", Rear => "rear" });
form_option!(Handedness, "handedness", { Right => "right", Left => "left" });
form_option!(ScaleMethod, "scale_method", { Marker => "marker", Auto => "auto" });
form_option!(QcStatus, "overall_status", { Good => "GOOD", Warn => "WARN", Fail => "FAIL" });

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaInfo {
    pub fps: f64,
    pub frames: u32,
    pub view: ViewType,
    pub handedness: Handedness,
    pub scale_method: ScaleMethod,
    pub m_per_px: f64,
}

/// Key frames of the throw, when they could be located.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFrames {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penultimate_frame: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_frame: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_frame: Option<u32>,
}

/// Side-view metrics come first, rear-view metrics last. A metric the view
/// cannot measure is left out of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_angle_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_height_m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_height_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_speed_mps: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_to_release_ms: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_foot_progression_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shoulder_hip_separation_deg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lane_alignment_error_cm: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityControl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_fit_r2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foot_visibility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pose_confidence: Option<f64>,
    #[serde(default)]
    pub overall_status: QcStatus,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub meta: MetaInfo,
    pub events: EventFrames,
    pub metrics: Metrics,
    pub qc: QualityControl,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotated_video_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Multipart field names posted by the client, in submission order.
pub mod fields {
    pub const FILE: &str = "file";
    pub const VIEW: &str = "view";
    pub const HANDEDNESS: &str = "handedness";
    pub const SCALE_METHOD: &str = "scale_method";
}

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const HEALTH_PATH: &str = "/api/health";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_parse_their_wire_names() {
        assert_eq!("side".parse::<ViewType>(), Ok(ViewType::Side));
        assert_eq!(" rear ".parse::<ViewType>(), Ok(ViewType::Rear));
        assert_eq!("left".parse::<Handedness>(), Ok(Handedness::Left));
        assert_eq!("auto".parse::<ScaleMethod>(), Ok(ScaleMethod::Auto));
        assert_eq!("WARN".parse::<QcStatus>(), Ok(QcStatus::Warn));

        let err = "front".parse::<ViewType>().unwrap_err();
        assert_eq!(err.field, "view");
        assert_eq!(err.to_string(), "invalid view: \"front\"");
    }

    #[test]
    fn missing_metrics_are_omitted_on_the_wire() {
        let metrics = Metrics {
            release_angle_deg: Some(35.0),
            ..Metrics::default()
        };
        assert_eq!(
            serde_json::to_value(&metrics).unwrap(),
            json!({ "release_angle_deg": 35.0 })
        );
    }

    #[test]
    fn quality_control_defaults_to_warn() {
        let qc: QualityControl = serde_json::from_value(json!({})).unwrap();
        assert_eq!(qc.overall_status, QcStatus::Warn);
        assert!(qc.notes.is_empty());
    }
}
