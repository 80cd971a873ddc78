use serde::{Deserialize, Serialize};

/// Identity of the currently submitted CV, handed from the upload surface to
/// the dashboard through the session store. Exactly one is current per
/// session; a re-upload replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Storage key under the CV bucket, e.g. `cvs/resume.pdf`.
    pub path: String,
    /// Original file name as submitted.
    pub name: String,
    pub mime_type: String,
}
