//! Validation gate for files selected for upload.
//!
//! Decides whether a selected file is acceptable before spending a network
//! round-trip. Only the filename suffix and the size are checked here;
//! content-level validation (header names, row shape) is the server's
//! responsibility.

use serde::{Deserialize, Serialize};

/// Maximum accepted upload size: 10 MiB, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// A file pending validation and upload.
///
/// Exists only between selection and either a successful upload or an
/// explicit clear. At most one candidate exists at a time; selecting a new
/// file replaces the previous candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCandidate {
    pub filename: String,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn new(filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            filename: filename.into(),
            size_bytes,
        }
    }

    /// Validates the candidate against the upload rules, first failing rule
    /// wins:
    ///
    /// 1. The filename must end with `.csv` (case-sensitive).
    /// 2. The size must be at most [`MAX_UPLOAD_BYTES`].
    ///
    /// Passing validation only enables the upload action; it does not upload.
    pub fn validate(&self) -> Result<(), FileRejection> {
        if !self.filename.ends_with(".csv") {
            return Err(FileRejection::NotCsv);
        }
        if self.size_bytes > MAX_UPLOAD_BYTES {
            return Err(FileRejection::TooLarge);
        }
        Ok(())
    }
}

/// Why a selected file was rejected before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRejection {
    /// Filename does not end with `.csv`
    NotCsv,
    /// File exceeds the 10 MiB limit
    TooLarge,
}

impl std::fmt::Display for FileRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotCsv => write!(f, "not a csv file"),
            Self::TooLarge => write!(f, "file too large"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_csv_regardless_of_size() {
        for name in ["report.txt", "data.CSV", "equipment.csv.bak", "csv"] {
            let candidate = UploadCandidate::new(name, 1024);
            assert_eq!(candidate.validate(), Err(FileRejection::NotCsv), "{name}");
        }
        // Suffix rule fires before the size rule
        let candidate = UploadCandidate::new("huge.txt", MAX_UPLOAD_BYTES + 1);
        assert_eq!(candidate.validate(), Err(FileRejection::NotCsv));
    }

    #[test]
    fn test_accepts_csv_up_to_limit() {
        assert_eq!(UploadCandidate::new("equipment.csv", 0).validate(), Ok(()));
        assert_eq!(
            UploadCandidate::new("equipment.csv", 4 * 1024).validate(),
            Ok(())
        );
    }

    #[test]
    fn test_size_boundary_is_inclusive() {
        let at_limit = UploadCandidate::new("equipment.csv", MAX_UPLOAD_BYTES);
        assert_eq!(at_limit.validate(), Ok(()));

        let one_over = UploadCandidate::new("equipment.csv", MAX_UPLOAD_BYTES + 1);
        assert_eq!(one_over.validate(), Err(FileRejection::TooLarge));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(FileRejection::NotCsv.to_string(), "not a csv file");
        assert_eq!(FileRejection::TooLarge.to_string(), "file too large");
    }
}
