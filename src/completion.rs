use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct CompletionRequestBody {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct CompletionApiResponse {
    pub choices: Vec<CompletionChoice>,
}
