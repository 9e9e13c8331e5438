use super::StoredResult;

/// Visibility of the progress, results and error panels plus the last
/// successful result. One submission may be in flight at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzeState {
    submitting: bool,
    show_results: bool,
    error: Option<String>,
    last_result: Option<StoredResult>,
}

impl AnalyzeState {
    /// Enter the submitting state. Returns `false` (and changes nothing) while
    /// a previous submission has not finished.
    pub fn begin(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.show_results = false;
        self.error = None;
        true
    }

    /// Settle the in-flight submission. A failure keeps the previous result
    /// for download but hides the results panel.
    pub fn finish(&mut self, outcome: Result<StoredResult, String>) {
        match outcome {
            Ok(result) => {
                self.last_result = Some(result);
                self.show_results = true;
                self.error = None;
            }
            Err(message) => {
                self.show_results = false;
                self.error = Some(message);
            }
        }
        self.submitting = false;
    }

    /// Show `message` without contacting the server, e.g. when no file is picked.
    pub fn reject(&mut self, message: String) {
        if self.begin() {
            self.finish(Err(message));
        }
    }

    pub fn submit_disabled(&self) -> bool {
        self.submitting
    }

    pub fn progress_visible(&self) -> bool {
        self.submitting
    }

    pub fn results_visible(&self) -> bool {
        self.show_results && self.last_result.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_result(&self) -> Option<&StoredResult> {
        self.last_result.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn result(view: &str) -> StoredResult {
        StoredResult::from_raw(json!({
            "meta": { "view": view },
            "metrics": {},
            "qc": { "overall_status": "GOOD", "notes": [] }
        }))
        .unwrap()
    }

    #[test]
    fn begin_hides_panels_and_disables_submit() {
        let mut state = AnalyzeState::default();
        assert!(state.begin());
        assert!(state.submit_disabled());
        assert!(state.progress_visible());
        assert!(!state.results_visible());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn second_begin_is_refused_while_in_flight() {
        let mut state = AnalyzeState::default();
        assert!(state.begin());
        assert!(!state.begin());
        assert!(state.submit_disabled());
    }

    #[test]
    fn success_shows_results_and_hides_error() {
        let mut state = AnalyzeState::default();
        state.begin();
        state.finish(Ok(result("side")));
        assert!(state.results_visible());
        assert_eq!(state.error_message(), None);
        assert!(!state.submit_disabled());
        assert!(!state.progress_visible());
    }

    #[test]
    fn failure_shows_error_and_keeps_previous_result() {
        let mut state = AnalyzeState::default();
        state.begin();
        state.finish(Ok(result("side")));

        state.begin();
        state.finish(Err("Marker not detected".into()));
        assert!(!state.results_visible());
        assert_eq!(state.error_message(), Some("Marker not detected"));
        assert_eq!(state.last_result(), Some(&result("side")));
        assert!(!state.submit_disabled());
        assert!(!state.progress_visible());
    }

    #[test]
    fn next_success_replaces_stored_result() {
        let mut state = AnalyzeState::default();
        state.begin();
        state.finish(Ok(result("side")));
        state.begin();
        state.finish(Ok(result("rear")));
        assert_eq!(state.last_result(), Some(&result("rear")));
    }

    #[test]
    fn reject_reports_without_submitting() {
        let mut state = AnalyzeState::default();
        state.reject("pick a file".into());
        assert_eq!(state.error_message(), Some("pick a file"));
        assert!(!state.submit_disabled());
    }
}
