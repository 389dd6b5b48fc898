//! Upload candidate validation.

pub mod validate;

pub use validate::{FileRejection, UploadCandidate, MAX_UPLOAD_BYTES};
