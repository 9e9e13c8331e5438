//! Upload form, request/response handling and panel state for one analysis page.

mod client;
mod form;
mod result;
mod state;

pub use client::{
    default_transport, interpret_response, submit_analysis, AnalysisTransport, AnalyzeError,
    DefaultTransport, TransportResponse, GENERIC_FAILURE,
};
#[cfg(target_arch = "wasm32")]
pub use client::FetchTransport;
#[cfg(not(target_arch = "wasm32"))]
pub use client::{api_base, HttpTransport, DEFAULT_API_BASE};
pub use form::{AnalyzeForm, AnalyzeRequest, FormValue, VideoUpload, ACCEPTED_VIDEO_TYPES};
pub use result::{ResultMeta, ResultView, StoredResult};
pub use state::AnalyzeState;
