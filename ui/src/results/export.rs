use dioxus::prelude::*;

use crate::analysis::StoredResult;
use crate::t;

pub const RESULTS_FILENAME: &str = "javelink_results.json";
pub const RESULTS_MIME: &str = "application/json";

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Done(String),
    Error(String),
}

#[component]
pub fn ResultsExportPanel(result: StoredResult) -> Element {
    let status = use_signal(|| ExportStatus::Idle);
    let video_path = result.view().annotated_video().map(str::to_string);
    let has_video = video_path.is_some();

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Done(message) => Some((
            "results-card__meta results-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "results-card__meta results-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let json_handler = {
        let export_result = result.clone();
        let mut status_signal = status;
        move |_| match download_results(&export_result) {
            Ok(Some(path)) => status_signal.set(ExportStatus::Done(t!(
                "export-json-saved",
                path = path
            ))),
            Ok(None) => status_signal.set(ExportStatus::Done(t!("export-json-started"))),
            Err(err) => status_signal.set(ExportStatus::Error(err)),
        }
    };

    let video_handler = {
        let mut status_signal = status;
        move |_| {
            let Some(path) = video_path.as_deref() else {
                return;
            };
            match open_annotated_video(path) {
                Ok(location) => status_signal.set(ExportStatus::Done(t!(
                    "export-video-opened",
                    location = location
                ))),
                Err(err) => status_signal.set(ExportStatus::Error(err)),
            }
        }
    };

    rsx! {
        section { class: "results-card results-export",
            div { class: "results-export__actions",
                button {
                    id: "downloadJSON",
                    r#type: "button",
                    class: "button button--primary",
                    onclick: json_handler,
                    {t!("export-download-json")}
                }
                button {
                    id: "downloadVideo",
                    r#type: "button",
                    class: "button",
                    disabled: !has_video,
                    onclick: video_handler,
                    {t!("export-open-video")}
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

/// Save the stored result exactly as received, pretty-printed.
///
/// Returns the written path on native builds and `None` on the web, where the
/// browser owns the download.
pub fn download_results(result: &StoredResult) -> Result<Option<String>, String> {
    let json = result.to_pretty_json().map_err(|err| err.to_string())?;
    let delivery = download_bytes(RESULTS_FILENAME, RESULTS_MIME, json.into_bytes())?;
    tracing::info!("results exported ({RESULTS_FILENAME})");
    Ok(delivery)
}

/// Open the annotated clip in a new tab. Returns the location that was opened.
pub fn open_annotated_video(path: &str) -> Result<String, String> {
    #[cfg(target_arch = "wasm32")]
    {
        let window = web_sys::window().ok_or("window unavailable")?;
        window
            .open_with_url_and_target(path, "_blank")
            .map_err(|_| "Unable to open a new tab".to_string())?;
        Ok(path.to_string())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let location = resolve_video_location(&crate::analysis::api_base(), path);
        tracing::info!("annotated video available at {location}");
        Ok(location)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn resolve_video_location(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
fn download_bytes(filename: &str, mime: &str, bytes: Vec<u8>) -> Result<Option<String>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| "Failed to create blob".to_string())?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| "Unable to create download".to_string())?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Document unavailable")?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| "Unable to create anchor")?
            .dyn_into()
            .map_err(|_| "Anchor cast failed")?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or("Missing body")?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let dir = native_export_dir()?;
        let path = write_export(&dir, filename, &bytes)?;
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn native_export_dir() -> Result<std::path::PathBuf, String> {
    let dirs = directories::ProjectDirs::from("com", "Javelink", "Javelink")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}

#[cfg(not(target_arch = "wasm32"))]
fn write_export(
    dir: &std::path::Path,
    filename: &str,
    bytes: &[u8],
) -> Result<std::path::PathBuf, String> {
    std::fs::create_dir_all(dir).map_err(|err| err.to_string())?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).map_err(|err| err.to_string())?;
    Ok(path)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn stored() -> StoredResult {
        StoredResult::from_raw(json!({
            "meta": { "fps": 30.0, "frames": 100, "view": "side" },
            "events": { "penultimate_frame": 50, "plant_frame": 60, "release_frame": 70 },
            "metrics": { "release_angle_deg": 35.0, "plant_to_release_ms": 333 },
            "qc": { "overall_status": "GOOD", "notes": ["low light"] },
            "annotated_video_path": "/outputs/throw_annotated.mp4"
        }))
        .unwrap()
    }

    #[test]
    fn exported_file_matches_received_json() {
        let result = stored();
        let dir = std::env::temp_dir().join(format!("javelink-export-{}", std::process::id()));
        let json = result.to_pretty_json().unwrap();
        let path = write_export(&dir, RESULTS_FILENAME, json.as_bytes()).unwrap();

        assert_eq!(path.file_name().unwrap(), RESULTS_FILENAME);
        let written = std::fs::read_to_string(&path).unwrap();
        let reparsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(&reparsed, result.raw());
        assert_eq!(written, json);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn relative_video_paths_resolve_against_api_base() {
        assert_eq!(
            resolve_video_location("http://127.0.0.1:8000/", "/outputs/a.mp4"),
            "http://127.0.0.1:8000/outputs/a.mp4"
        );
        assert_eq!(
            resolve_video_location("http://127.0.0.1:8000", "https://cdn.example/a.mp4"),
            "https://cdn.example/a.mp4"
        );
    }
}
