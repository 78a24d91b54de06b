use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ImageGenerationRequestBody {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct ImageGenerationApiResponse {
    pub data: Vec<GeneratedImage>,
}
