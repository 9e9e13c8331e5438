//! Analysis entry point.
//!
//! Pose estimation and kinematics are not wired in yet; every request gets
//! the same reference measurements with the caller's options echoed back in
//! `meta`. The shape of the reply is final.

use crate::error::ApiError;
use crate::schemas::{
    AnalyzeResponse, EventFrames, Handedness, MetaInfo, Metrics, QcStatus, QualityControl,
    ScaleMethod, ViewType,
};

const REFERENCE_FPS: f64 = 30.0;
const REFERENCE_FRAMES: u32 = 100;
const REFERENCE_M_PER_PX: f64 = 0.002;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJob {
    pub filename: String,
    pub size_bytes: usize,
    pub view: ViewType,
    pub handedness: Handedness,
    pub scale_method: ScaleMethod,
}

pub fn analyze_video(job: &AnalysisJob) -> Result<AnalyzeResponse, ApiError> {
    if job.size_bytes == 0 {
        return Err(ApiError::Analysis(format!("{} is empty", job.filename)));
    }

    tracing::info!(
        filename = %job.filename,
        bytes = job.size_bytes,
        view = %job.view,
        handedness = %job.handedness,
        scale_method = %job.scale_method,
        "analyzing clip"
    );

    Ok(AnalyzeResponse {
        meta: MetaInfo {
            fps: REFERENCE_FPS,
            frames: REFERENCE_FRAMES,
            view: job.view,
            handedness: job.handedness,
            scale_method: job.scale_method,
            m_per_px: REFERENCE_M_PER_PX,
        },
        events: EventFrames {
            penultimate_frame: Some(50),
            plant_frame: Some(60),
            release_frame: Some(70),
        },
        metrics: Metrics {
            release_angle_deg: Some(35.0),
            release_height_m: Some(1.9),
            release_height_ratio: Some(1.05),
            release_speed_mps: Some(18.5),
            plant_to_release_ms: Some(333.0),
            ..Metrics::default()
        },
        qc: QualityControl {
            overall_status: QcStatus::Good,
            ..QualityControl::default()
        },
        annotated_video_path: None,
        error: None,
    })
}
