use dioxus::prelude::*;

use api::{Handedness, ScaleMethod, ViewType};

use crate::analysis::{
    default_transport, submit_analysis, AnalyzeError, AnalyzeForm, AnalyzeState, VideoUpload,
    ACCEPTED_VIDEO_TYPES,
};
use crate::results::{ResultsExportPanel, ResultsPanel};
use crate::t;

#[component]
pub fn Analyze() -> Element {
    // Re-render when the navbar switches language.
    let _lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = _lang_code.as_ref().map(|s| s()).unwrap_or_default();

    let mut form = use_signal(AnalyzeForm::default);
    let mut state = use_signal(AnalyzeState::default);

    let on_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            form.with_mut(|f| f.file = None);
            return;
        };
        match engine.read_file(&name).await {
            Some(bytes) => {
                let upload = VideoUpload::new(display_name(&name), bytes);
                form.with_mut(|f| f.file = Some(upload));
            }
            None => {
                tracing::warn!("could not read selected file {name}");
                form.with_mut(|f| f.file = None);
                state.with_mut(|s| s.reject(t!("error-file-unreadable")));
            }
        }
    };

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();

        let request = match form.read().ready() {
            Ok(request) => request,
            Err(err) => {
                state.with_mut(|s| s.reject(error_text(&err)));
                return;
            }
        };
        if !state.with_mut(|s| s.begin()) {
            return;
        }

        spawn(async move {
            let mut state = state;
            let transport = default_transport();
            let outcome = submit_analysis(&transport, &request).await;
            if let Err(err) = &outcome {
                tracing::error!("analysis request failed: {err}");
            }
            state.with_mut(|s| s.finish(outcome.map_err(|err| error_text(&err))));
        });
    };

    let current = form();
    let snapshot = state();
    let error_message = snapshot.error_message().map(str::to_string);
    let visible_result = snapshot
        .results_visible()
        .then(|| snapshot.last_result().cloned())
        .flatten();
    let view_hint = match current.view {
        ViewType::Side => t!("form-hint-side"),
        ViewType::Rear => t!("form-hint-rear"),
    };

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-analyze",
            h1 { {t!("page-analyze-title")} }
            p { {t!("page-analyze-intro")} }

            form {
                id: "uploadForm",
                class: "upload-form",
                onsubmit: on_submit,

                div { class: "upload-form__field",
                    label { r#for: "videoFile", {t!("form-video-label")} }
                    input {
                        id: "videoFile",
                        r#type: "file",
                        accept: ACCEPTED_VIDEO_TYPES,
                        onchange: on_file,
                    }
                    if let Some(file) = current.file.as_ref() {
                        span { class: "upload-form__file",
                            {t!("form-selected-file", name = file.name.clone())}
                        }
                    }
                }

                fieldset { class: "upload-form__field",
                    legend { {t!("form-view-label")} }
                    for choice in ViewType::ALL.iter().copied() {
                        label { class: "upload-form__radio",
                            input {
                                r#type: "radio",
                                name: "view",
                                value: choice.as_str(),
                                checked: current.view == choice,
                                onchange: move |_| form.with_mut(|f| f.view = choice),
                            }
                            {view_label(choice)}
                        }
                    }
                    p { class: "upload-form__hint", "{view_hint}" }
                }

                div { class: "upload-form__field",
                    label { r#for: "handedness", {t!("form-handedness-label")} }
                    select {
                        id: "handedness",
                        value: current.handedness.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Ok(hand) = evt.value().parse::<Handedness>() {
                                form.with_mut(|f| f.handedness = hand);
                            }
                        },
                        for hand in Handedness::ALL.iter().copied() {
                            option { value: hand.as_str(), {handedness_label(hand)} }
                        }
                    }
                }

                div { class: "upload-form__field",
                    label { r#for: "scaleMethod", {t!("form-scale-label")} }
                    select {
                        id: "scaleMethod",
                        value: current.scale_method.as_str(),
                        onchange: move |evt: FormEvent| {
                            if let Ok(method) = evt.value().parse::<ScaleMethod>() {
                                form.with_mut(|f| f.scale_method = method);
                            }
                        },
                        for method in ScaleMethod::ALL.iter().copied() {
                            option { value: method.as_str(), {scale_label(method)} }
                        }
                    }
                }

                button {
                    id: "submitBtn",
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: snapshot.submit_disabled(),
                    {t!("form-submit")}
                }
            }

            if snapshot.progress_visible() {
                div { id: "progressContainer", class: "analyze-progress",
                    span { class: "analyze-progress__spinner", aria_hidden: "true" }
                    p { {t!("progress-analyzing")} }
                }
            }

            if let Some(message) = error_message {
                div { id: "errorContainer", class: "analyze-error", role: "alert",
                    h3 { {t!("error-title")} }
                    p { id: "errorMessage", "{message}" }
                }
            }

            if let Some(result) = visible_result {
                ResultsPanel { result: result.clone() }
                ResultsExportPanel { result }
            }
        }
    }
}

/// User-facing text for a failed submission.
fn error_text(err: &AnalyzeError) -> String {
    match err {
        AnalyzeError::MissingFile => t!("error-missing-file"),
        AnalyzeError::Failed => t!("error-generic"),
        other => other.to_string(),
    }
}

/// Desktop file engines report full paths; keep only the file name.
fn display_name(path: &str) -> String {
    path.rsplit(['/', '\\'])
        .next()
        .unwrap_or(path)
        .to_string()
}

fn view_label(view: ViewType) -> String {
    match view {
        ViewType::Side => t!("form-view-side"),
        ViewType::Rear => t!("form-view-rear"),
    }
}

fn handedness_label(hand: Handedness) -> String {
    match hand {
        Handedness::Right => t!("form-handedness-right"),
        Handedness::Left => t!("form-handedness-left"),
    }
}

fn scale_label(method: ScaleMethod) -> String {
    match method {
        ScaleMethod::Marker => t!("form-scale-marker"),
        ScaleMethod::Auto => t!("form-scale-auto"),
    }
}
