//! The image recreation loop: describe each image in a folder with the
//! text-completion API, then ask the image-generation API to draw it again.
//!
//! Every stage returns a `Result`. The folder driver decides what a failure
//! means for the rest of the run, which is always to move on to the next file.

use crate::client::ImageModelApi;
use crate::completion::CompletionRequestBody;
use crate::constants::{DESCRIBE_PROMPT_PREFIX, IMAGES_PER_REQUEST};
use crate::error::{RecreateError, SizeError};
use crate::images::ImageGenerationRequestBody;
use crate::settings::Settings;
use crate::utils::{create_spinner, has_image_extension};
use colored::Colorize;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// What happened to one image during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    DescriptionFailed,
    EmptyDescription,
    SynthesisFailed { description: String },
    Recreated { description: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedImage {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Parses a `"<width>x<height>"` size string.
pub fn parse_size(size: &str) -> Result<(u32, u32), SizeError> {
    let parts: Vec<&str> = size.split('x').collect();
    let [width, height] = parts.as_slice() else {
        return Err(SizeError::Malformed(size.to_string()));
    };

    let dimension = |value: &str| {
        value
            .trim()
            .parse::<u32>()
            .map_err(|source| SizeError::InvalidDimension {
                value: value.to_string(),
                source,
            })
    };

    Ok((dimension(*width)?, dimension(*height)?))
}

pub fn build_description_request(
    image_path: &Path,
    settings: &Settings,
) -> Result<CompletionRequestBody, RecreateError> {
    Ok(CompletionRequestBody {
        model: settings.text_model()?.to_string(),
        prompt: format!("{}{}", DESCRIBE_PROMPT_PREFIX, image_path.display()),
        max_tokens: settings.max_tokens()?,
    })
}

pub fn build_image_request(
    description: &str,
    settings: &Settings,
) -> Result<ImageGenerationRequestBody, RecreateError> {
    let (width, height) = parse_size(settings.size()?)?;
    Ok(ImageGenerationRequestBody {
        model: settings.dalle_model()?.to_string(),
        prompt: description.to_string(),
        n: IMAGES_PER_REQUEST,
        size: format!("{}x{}", width, height),
    })
}

/// Reads the image header, detecting the format from the file contents rather
/// than the extension.
fn probe_image(path: &Path) -> image::ImageResult<(u32, u32)> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .into_dimensions()
}

async fn describe<A: ImageModelApi>(
    api: &A,
    image_path: &Path,
    settings: &Settings,
) -> Result<String, RecreateError> {
    // Only the header is read; the pixels never leave the machine.
    probe_image(image_path).map_err(|source| RecreateError::ImageOpen {
        path: image_path.to_path_buf(),
        source,
    })?;

    let request = build_description_request(image_path, settings)?;
    let spinner = create_spinner("magenta", "Describing image...".to_string());
    let response = api.complete(&request).await;
    spinner.finish_and_clear();

    let choice = response?
        .choices
        .into_iter()
        .next()
        .ok_or(RecreateError::NoChoices)?;
    Ok(choice.text.trim().to_string())
}

/// Asks the text-completion API to describe the image at `image_path`.
///
/// Prints the description, or the reason none could be produced.
pub async fn generate_description_from_image<A: ImageModelApi>(
    api: &A,
    image_path: &Path,
    settings: &Settings,
) -> Result<String, RecreateError> {
    match describe(api, image_path, settings).await {
        Ok(description) => {
            println!(
                "{} {}\n{} {}",
                "Image:".bold().green(),
                image_path.display(),
                "Description:".bold().green(),
                description
            );
            Ok(description)
        }
        Err(e) => {
            println!(
                "{} {}",
                "Error while generating image description:".yellow(),
                e
            );
            Err(e)
        }
    }
}

async fn synthesize<A: ImageModelApi>(
    api: &A,
    description: &str,
    settings: &Settings,
) -> Result<String, RecreateError> {
    let request = build_image_request(description, settings)?;
    let spinner = create_spinner("red", "Generating image...".to_string());
    let response = api.generate_image(&request).await;
    spinner.finish_and_clear();

    let image = response?
        .data
        .into_iter()
        .next()
        .ok_or(RecreateError::NoImages)?;
    Ok(image.url)
}

/// Asks the image-generation API for one image drawn from `description`.
///
/// Returns the URL of the generated image, which is printed but not fetched.
pub async fn create_image_from_description<A: ImageModelApi>(
    api: &A,
    description: &str,
    settings: &Settings,
) -> Result<String, RecreateError> {
    match synthesize(api, description, settings).await {
        Ok(url) => {
            println!("{} {}", "Image created:".bold().red(), url);
            Ok(url)
        }
        Err(e) => {
            println!("{} {}", "Error while creating image:".yellow(), e);
            Err(e)
        }
    }
}

/// Lists the eligible image files of `folder` in directory order, keeping at
/// most `limit` of them.
pub fn list_image_files(folder: &Path, limit: usize) -> Result<Vec<PathBuf>, RecreateError> {
    let folder_error = |source| RecreateError::Folder {
        path: folder.to_path_buf(),
        source,
    };

    let mut images = Vec::new();
    for entry in fs::read_dir(folder).map_err(folder_error)? {
        if images.len() == limit {
            break;
        }
        let path = entry.map_err(folder_error)?.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        } else {
            debug!("skipping {}", path.display());
        }
    }
    Ok(images)
}

async fn process_image<A: ImageModelApi>(api: &A, path: &Path, settings: &Settings) -> Outcome {
    let description = match generate_description_from_image(api, path, settings).await {
        Ok(description) => description,
        Err(e) => {
            warn!("no description for {}: {}", path.display(), e);
            return Outcome::DescriptionFailed;
        }
    };

    if description.is_empty() {
        info!("empty description for {}, skipping generation", path.display());
        return Outcome::EmptyDescription;
    }

    match create_image_from_description(api, &description, settings).await {
        Ok(url) => Outcome::Recreated { description, url },
        Err(e) => {
            warn!("no image generated for {}: {}", path.display(), e);
            Outcome::SynthesisFailed { description }
        }
    }
}

/// Runs every eligible image of the configured folder through both stages,
/// one at a time. A failed file never stops the loop.
pub async fn process_images_in_folder<A: ImageModelApi>(
    api: &A,
    settings: &Settings,
) -> Result<Vec<ProcessedImage>, RecreateError> {
    let folder = settings.image_folder()?;
    let limit = settings.num_images()?;
    let images = list_image_files(&folder, limit)?;
    info!("processing {} image(s) from {}", images.len(), folder.display());

    let mut processed = Vec::with_capacity(images.len());
    for path in images {
        let outcome = process_image(api, &path, settings).await;
        processed.push(ProcessedImage { path, outcome });
    }
    Ok(processed)
}
