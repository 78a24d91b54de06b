//! Extraction of embedded raster images from a PDF document.
//!
//! Images are written in page order. JPEG and JPEG 2000 streams are already
//! image files and are copied as-is; sampled images are decoded and written
//! as PNG.

use crate::constants::{EXTRACTED_IMAGE_EXTENSION, EXTRACTED_IMAGE_PREFIX};
use crate::error::ExtractError;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};
use log::{debug, info, warn};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashSet;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// 1-based position across the whole document.
    pub index: usize,
    pub page: u32,
    pub object_id: Option<ObjectId>,
    pub path: PathBuf,
}

pub fn extracted_image_path(output_dir: &Path, index: usize) -> PathBuf {
    output_dir.join(format!(
        "{}{}.{}",
        EXTRACTED_IMAGE_PREFIX, index, EXTRACTED_IMAGE_EXTENSION
    ))
}

/// Writes every embedded image of `pdf_path` to `output_dir/image_<N>.png`.
///
/// The output folder is created before the document is opened, so a PDF that
/// fails to load still leaves an (empty) folder behind.
pub fn extract_images_from_pdf(
    pdf_path: &Path,
    output_dir: &Path,
) -> Result<Vec<ExtractedImage>, ExtractError> {
    fs::create_dir_all(output_dir)?;

    let document = Document::load(pdf_path)?;
    debug!("{} has {} page(s)", pdf_path.display(), document.get_pages().len());

    let mut extracted = Vec::new();
    for (page, page_id) in document.get_pages() {
        for (object_id, stream) in page_images(&document, page_id)? {
            let index = extracted.len() + 1;
            let path = extracted_image_path(output_dir, index);
            fs::write(&path, image_file_bytes(&document, stream)?)?;
            println!("Saved: {}", path.display());

            extracted.push(ExtractedImage {
                index,
                page,
                object_id,
                path,
            });
        }
    }

    println!("Extracted {} images from the PDF.", extracted.len());
    info!(
        "extracted {} image(s) from {} into {}",
        extracted.len(),
        pdf_path.display(),
        output_dir.display()
    );
    Ok(extracted)
}

const PASSTHROUGH_FILTERS: [&[u8]; 2] = [b"DCTDecode", b"JPXDecode"];

fn filter_names(stream: &Stream) -> Vec<Vec<u8>> {
    match stream.dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(filters)) => filters
            .iter()
            .filter_map(|filter| filter.as_name().ok())
            .map(<[u8]>::to_vec)
            .collect(),
        _ => Vec::new(),
    }
}

/// Bytes of a standalone image file for one image XObject.
///
/// Streams whose samples cannot be turned into pixels (unsupported filter,
/// color space or bit depth) are written undecoded.
pub fn image_file_bytes(document: &Document, stream: &Stream) -> Result<Vec<u8>, ExtractError> {
    let filters = filter_names(stream);
    if let Some(last) = filters.last() {
        if PASSTHROUGH_FILTERS.iter().any(|filter| *filter == last.as_slice()) {
            if filters.len() > 1 {
                warn!("chained filters ending in {}", String::from_utf8_lossy(last));
            }
            return Ok(stream.content.clone());
        }
    }

    let samples = if filters.is_empty() {
        stream.content.clone()
    } else {
        match stream.decompressed_content() {
            Ok(samples) => samples,
            Err(e) => {
                warn!("cannot decode image stream, writing it raw: {}", e);
                return Ok(stream.content.clone());
            }
        }
    };

    let Some(image) = decode_samples(document, &stream.dict, samples) else {
        warn!("unsupported image layout, writing the stream raw");
        return Ok(stream.content.clone());
    };

    let mut png = Cursor::new(Vec::new());
    image.write_to(&mut png, ImageFormat::Png)?;
    Ok(png.into_inner())
}

fn named_channels(name: &[u8]) -> Option<u8> {
    match name {
        b"DeviceGray" | b"CalGray" | b"G" => Some(1),
        b"DeviceRGB" | b"CalRGB" | b"RGB" => Some(3),
        b"DeviceCMYK" | b"CMYK" => Some(4),
        _ => None,
    }
}

fn color_channels(document: &Document, dict: &Dictionary) -> Option<u8> {
    if dict.get(b"ImageMask").and_then(Object::as_bool).unwrap_or(false) {
        return Some(1);
    }

    let (_, space) = document.dereference(dict.get(b"ColorSpace").ok()?).ok()?;
    match space {
        Object::Name(name) => named_channels(name),
        Object::Array(parts) => {
            let family = parts.first()?.as_name().ok()?;
            if family == b"ICCBased" {
                let (_, profile) = document.dereference(parts.get(1)?).ok()?;
                let n = profile.as_stream().ok()?.dict.get(b"N").and_then(Object::as_i64);
                u8::try_from(n.ok()?).ok()
            } else {
                named_channels(family)
            }
        }
        _ => None,
    }
}

fn exact_len(mut samples: Vec<u8>, len: usize) -> Option<Vec<u8>> {
    if samples.len() < len {
        return None;
    }
    samples.truncate(len);
    Some(samples)
}

fn dimension(dict: &Dictionary, key: &[u8]) -> Option<u32> {
    dict.get(key)
        .and_then(Object::as_i64)
        .ok()
        .and_then(|value| u32::try_from(value).ok())
}

fn decode_samples(document: &Document, dict: &Dictionary, samples: Vec<u8>) -> Option<DynamicImage> {
    let width = dimension(dict, b"Width")?;
    let height = dimension(dict, b"Height")?;
    let bits = dict
        .get(b"BitsPerComponent")
        .and_then(Object::as_i64)
        .unwrap_or(1);
    let pixels = width as usize * height as usize;

    match (color_channels(document, dict)?, bits) {
        (1, 8) => GrayImage::from_raw(width, height, exact_len(samples, pixels)?)
            .map(DynamicImage::ImageLuma8),
        (3, 8) => RgbImage::from_raw(width, height, exact_len(samples, pixels * 3)?)
            .map(DynamicImage::ImageRgb8),
        (4, 8) => {
            let rgb: Vec<u8> = exact_len(samples, pixels * 4)?
                .chunks_exact(4)
                .flat_map(|cmyk| {
                    let k = 255 - u32::from(cmyk[3]);
                    cmyk[..3]
                        .iter()
                        .map(move |&c| ((255 - u32::from(c)) * k / 255) as u8)
                })
                .collect();
            RgbImage::from_raw(width, height, rgb).map(DynamicImage::ImageRgb8)
        }
        (1, 1) => {
            let row_bytes = (width as usize + 7) / 8;
            let packed = exact_len(samples, row_bytes * height as usize)?;
            let gray = GrayImage::from_fn(width, height, |x, y| {
                let byte = packed[y as usize * row_bytes + x as usize / 8];
                let bit = (byte >> (7 - x % 8)) & 1;
                image::Luma([if bit == 1 { 255 } else { 0 }])
            });
            Some(DynamicImage::ImageLuma8(gray))
        }
        _ => None,
    }
}

/// Image XObjects drawn by a page, in resource-dictionary order.
pub fn page_images(
    document: &Document,
    page_id: ObjectId,
) -> Result<Vec<(Option<ObjectId>, &Stream)>, ExtractError> {
    let mut images = Vec::new();
    if let Some(resources) = page_resources(document, page_id)? {
        let mut visited_forms = HashSet::new();
        collect_images(document, resources, &mut visited_forms, &mut images)?;
    }
    Ok(images)
}

/// Resources of a page, inherited from the nearest page-tree ancestor when the
/// page has none of its own.
fn page_resources(
    document: &Document,
    page_id: ObjectId,
) -> Result<Option<&Dictionary>, ExtractError> {
    let mut visited = HashSet::new();
    let mut node_id = page_id;
    while visited.insert(node_id) {
        let node = document.get_dictionary(node_id)?;
        if let Ok(resources) = node.get(b"Resources") {
            let (_, resources) = document.dereference(resources)?;
            return Ok(Some(resources.as_dict()?));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent) => node_id = parent,
            Err(_) => break,
        }
    }
    Ok(None)
}

fn is_subtype(stream: &Stream, subtype: &[u8]) -> bool {
    stream
        .dict
        .get(b"Subtype")
        .and_then(Object::as_name)
        .map_or(false, |name| name == subtype)
}

fn collect_images<'a>(
    document: &'a Document,
    resources: &'a Dictionary,
    visited_forms: &mut HashSet<ObjectId>,
    images: &mut Vec<(Option<ObjectId>, &'a Stream)>,
) -> Result<(), ExtractError> {
    let Ok(xobjects) = resources.get(b"XObject") else {
        return Ok(());
    };
    let (_, xobjects) = document.dereference(xobjects)?;
    let Ok(xobjects) = xobjects.as_dict() else {
        return Ok(());
    };

    for (name, xobject) in xobjects.iter() {
        let (object_id, xobject) = document.dereference(xobject)?;
        let Ok(stream) = xobject.as_stream() else {
            debug!("XObject {} is not a stream", String::from_utf8_lossy(name));
            continue;
        };

        if is_subtype(stream, b"Image") {
            images.push((object_id, stream));
        } else if is_subtype(stream, b"Form") {
            let first_visit = object_id.map_or(true, |id| visited_forms.insert(id));
            if !first_visit {
                continue;
            }
            if let Ok(form_resources) = stream.dict.get(b"Resources") {
                let (_, form_resources) = document.dereference(form_resources)?;
                if let Ok(form_resources) = form_resources.as_dict() {
                    collect_images(document, form_resources, visited_forms, images)?;
                }
            }
        }
    }
    Ok(())
}
