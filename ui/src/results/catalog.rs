use crate::analysis::ResultView;
use crate::core::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricUnit {
    Degrees,
    Metres,
    MetresPerSecond,
    Milliseconds,
    Centimetres,
}

impl MetricUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MetricUnit::Degrees => "°",
            MetricUnit::Metres => "m",
            MetricUnit::MetresPerSecond => "m/s",
            MetricUnit::Milliseconds => "ms",
            MetricUnit::Centimetres => "cm",
        }
    }

    /// Millisecond timings are whole numbers; everything else gets one decimal.
    pub fn decimals(self) -> usize {
        match self {
            MetricUnit::Milliseconds => 0,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    /// Key in the response's `metrics` object.
    pub key: &'static str,
    /// Fluent message id of the card label.
    pub label_key: &'static str,
    pub unit: MetricUnit,
}

pub const SIDE_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "release_angle_deg",
        label_key: "metric-release-angle",
        unit: MetricUnit::Degrees,
    },
    MetricSpec {
        key: "release_height_m",
        label_key: "metric-release-height",
        unit: MetricUnit::Metres,
    },
    MetricSpec {
        key: "release_speed_mps",
        label_key: "metric-release-speed",
        unit: MetricUnit::MetresPerSecond,
    },
    MetricSpec {
        key: "plant_to_release_ms",
        label_key: "metric-plant-to-release",
        unit: MetricUnit::Milliseconds,
    },
];

pub const REAR_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "plant_foot_progression_deg",
        label_key: "metric-plant-foot-progression",
        unit: MetricUnit::Degrees,
    },
    MetricSpec {
        key: "shoulder_hip_separation_deg",
        label_key: "metric-shoulder-hip-separation",
        unit: MetricUnit::Degrees,
    },
    MetricSpec {
        key: "lane_alignment_error_cm",
        label_key: "metric-lane-alignment-error",
        unit: MetricUnit::Centimetres,
    },
];

/// Metrics shown for a `meta.view` value. Only `"side"` selects the side set.
pub fn metrics_for_view(view: &str) -> &'static [MetricSpec] {
    if view == "side" {
        SIDE_METRICS
    } else {
        REAR_METRICS
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label_key: &'static str,
    pub value: String,
    pub status: String,
    pub badge_class: &'static str,
}

/// One card per catalog entry whose value is present and non-null, in
/// catalog order. Every card carries the overall QC status.
pub fn metric_cards(result: &ResultView) -> Vec<MetricCard> {
    metrics_for_view(&result.meta.view)
        .iter()
        .filter_map(|spec| {
            let value = result.metric(spec.key)?;
            Some(MetricCard {
                label_key: spec.label_key,
                value: format::format_measurement(value, spec.unit.decimals(), spec.unit.symbol()),
                status: result.qc.overall_status.clone(),
                badge_class: result.qc.badge_class(),
            })
        })
        .collect()
}
