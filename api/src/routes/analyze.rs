use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use crate::config::extension_allowed;
use crate::error::ApiError;
use crate::pipeline::{analyze_video, AnalysisJob};
use crate::schemas::{fields, AnalyzeResponse, ScaleMethod};

use super::AppState;

struct UploadedVideo {
    filename: String,
    bytes: Vec<u8>,
}

pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let limit_mb = state.config.max_video_mb;
    let limit_bytes = state.config.max_video_bytes();

    let mut video: Option<UploadedVideo> = None;
    let mut view = None;
    let mut handedness = None;
    let mut scale_method = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, limit_mb))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            fields::FILE => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| multipart_error(err, limit_mb))?;
                video = Some(UploadedVideo {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            fields::VIEW | fields::HANDEDNESS | fields::SCALE_METHOD => {
                let text = field
                    .text()
                    .await
                    .map_err(|err| multipart_error(err, limit_mb))?;
                match name.as_str() {
                    fields::VIEW => view = Some(text.parse()?),
                    fields::HANDEDNESS => handedness = Some(text.parse()?),
                    _ => scale_method = Some(text.parse()?),
                }
            }
            other => tracing::debug!("ignoring unexpected form field {other:?}"),
        }
    }

    let video = video.ok_or(ApiError::MissingField(fields::FILE))?;
    let view = view.ok_or(ApiError::MissingField(fields::VIEW))?;
    let handedness = handedness.ok_or(ApiError::MissingField(fields::HANDEDNESS))?;
    let scale_method: ScaleMethod = scale_method.unwrap_or_default();

    if !extension_allowed(&video.filename) {
        return Err(ApiError::UnsupportedFormat(video.filename));
    }
    if video.bytes.len() as u64 > limit_bytes {
        return Err(ApiError::TooLarge { limit_mb });
    }

    let job = AnalysisJob {
        filename: video.filename,
        size_bytes: video.bytes.len(),
        view,
        handedness,
        scale_method,
    };
    analyze_video(&job).map(Json)
}

fn multipart_error(err: MultipartError, limit_mb: u64) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::TooLarge { limit_mb }
    } else {
        ApiError::Multipart(err.body_text())
    }
}
