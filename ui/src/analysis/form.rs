use api::schemas::fields;
use api::{Handedness, ScaleMethod, ViewType};

use super::AnalyzeError;

/// Value for the file input's `accept` attribute.
pub const ACCEPTED_VIDEO_TYPES: &str = ".mp4,.mov,.avi,.webm";

/// A clip picked in the file input, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl VideoUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for(&name);
        Self { name, bytes, mime }
    }
}

fn mime_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        _ => "application/octet-stream",
    }
}

/// Live contents of the upload form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeForm {
    pub file: Option<VideoUpload>,
    pub view: ViewType,
    pub handedness: Handedness,
    pub scale_method: ScaleMethod,
}

impl AnalyzeForm {
    /// Snapshot the form into a request. A file must have been chosen.
    pub fn ready(&self) -> Result<AnalyzeRequest, AnalyzeError> {
        let file = self.file.clone().ok_or(AnalyzeError::MissingFile)?;
        Ok(AnalyzeRequest {
            file,
            view: self.view,
            handedness: self.handedness,
            scale_method: self.scale_method,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub file: VideoUpload,
    pub view: ViewType,
    pub handedness: Handedness,
    pub scale_method: ScaleMethod,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormValue<'a> {
    File(&'a VideoUpload),
    Text(&'static str),
}

impl AnalyzeRequest {
    /// Multipart fields in the order they are appended to the body.
    pub fn fields(&self) -> [(&'static str, FormValue<'_>); 4] {
        [
            (fields::FILE, FormValue::File(&self.file)),
            (fields::VIEW, FormValue::Text(self.view.as_str())),
            (fields::HANDEDNESS, FormValue::Text(self.handedness.as_str())),
            (
                fields::SCALE_METHOD,
                FormValue::Text(self.scale_method.as_str()),
            ),
        ]
    }
}
