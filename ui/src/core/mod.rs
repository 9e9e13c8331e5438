pub mod format;
pub mod lenient;
pub mod qc;
