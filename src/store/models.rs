use serde::{Deserialize, Serialize};

/// Per-workspace OAuth credentials, one record per installed workspace.
///
/// `workspace_id` never changes after installation; both tokens are always
/// rotated together so the pair can never be mixed across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCredential {
    pub workspace_id: String,
    pub app_id: String,
    pub access_token: String,
    pub refresh_token: String,
}
