mod catalog;
pub use catalog::{
    metric_cards, metrics_for_view, MetricCard, MetricSpec, MetricUnit, REAR_METRICS,
    SIDE_METRICS,
};

mod detail;
pub use detail::ResultsPanel;

mod export;
pub use export::{
    download_results, open_annotated_video, ResultsExportPanel, RESULTS_FILENAME, RESULTS_MIME,
};
