/**
 * Post Handler Types
 */

use serde::{Deserialize, Serialize};

use crate::backend::validation::{non_blank, Validator};
use crate::shared::ValidationErrors;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PostRequest {
    pub text: Option<String>,
}

impl PostRequest {
    pub fn into_text(self) -> Result<String, ValidationErrors> {
        required_text(self.text)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CommentRequest {
    pub text: Option<String>,
    /// Shown next to the comment; taken from the request, not the profile
    pub avatar: Option<String>,
}

impl CommentRequest {
    /// Validated text and optional avatar
    pub fn into_parts(self) -> Result<(String, Option<String>), ValidationErrors> {
        let text = required_text(self.text)?;
        Ok((text, non_blank(self.avatar)))
    }
}

fn required_text(text: Option<String>) -> Result<String, ValidationErrors> {
    Validator::new()
        .required("text", text.as_deref(), "Text is required")
        .finish()?;
    Ok(text.unwrap_or_default())
}
