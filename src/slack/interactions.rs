use serde::Deserialize;

use crate::error::AppError;

/// The interactive webhook body: a url-encoded form with a single `payload`
/// field whose value is a JSON document.
#[derive(Debug, Deserialize)]
struct InteractionForm {
    #[serde(default)]
    payload: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractionCallback {
    pub team: TeamRef,
    pub user: UserRef,

    /// Short-lived handle for opening a modal from this interaction.
    #[serde(default)]
    pub trigger_id: String,

    /// Present when the interaction happened inside an open view.
    #[serde(default)]
    pub view: Option<ViewRef>,

    #[serde(default)]
    pub actions: Vec<BlockAction>,
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct ViewRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct BlockAction {
    pub action_id: String,

    /// Button value; empty for non-button elements.
    #[serde(default)]
    pub value: String,

    /// Set for select elements when the user picks an option.
    #[serde(default)]
    pub selected_option: Option<SelectedOption>,
}

#[derive(Debug, Deserialize)]
pub struct SelectedOption {
    pub value: String,
}

pub fn parse_payload(body: &[u8]) -> Result<InteractionCallback, AppError> {
    let form: InteractionForm = serde_urlencoded::from_bytes(body)
        .map_err(|e| AppError::BadRequest(format!("invalid form-urlencoded body: {e}")))?;

    if form.payload.is_empty() {
        return Err(AppError::BadRequest(
            "form must have non-empty payload field".to_string(),
        ));
    }

    serde_json::from_str(&form.payload)
        .map_err(|e| AppError::BadRequest(format!("invalid interaction json payload: {e}")))
}
