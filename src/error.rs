use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading `config.ini` or one of its values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Every required `[API]` key that was absent, in declaration order.
    #[error("missing keys in config file: {}", .0.join(", "))]
    MissingKeys(Vec<String>),

    #[error("missing setting '{key}' in section [{section}]")]
    MissingSetting { section: String, key: String },

    #[error("invalid value '{value}' for '{key}': {source}")]
    InvalidNumber {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error)]
pub enum SizeError {
    #[error("size '{0}' is not of the form <width>x<height>")]
    Malformed(String),

    #[error("invalid dimension '{value}' in size: {source}")]
    InvalidDimension {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Failures talking to the hosted model API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid API key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed with status code {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failures of a single stage of the image recreation loop.
#[derive(Debug, Error)]
pub enum RecreateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Size(#[from] SizeError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("cannot open image '{path}': {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot read image folder '{path}': {source}")]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the completion response contained no choices")]
    NoChoices,

    #[error("the image response contained no images")]
    NoImages,
}

/// Failures of the PDF image extractor. None of them are recovered from.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),
}
