//! Per-page PDF text and image access using lopdf and pdf-extract.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgba};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace};

use super::Result;
use crate::error::PdfError;

/// Points per inch in PDF user space.
const POINTS_PER_INCH: f32 = 72.0;

/// A loaded PDF.
pub struct PdfDocument {
    document: Document,
    raw_data: Vec<u8>,
}

impl PdfDocument {
    /// Parse a PDF from bytes. Encrypted files are retried with an empty
    /// password before giving up.
    pub fn load(data: &[u8]) -> Result<Self> {
        let mut document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let raw_data = if document.is_encrypted() {
            if document.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            document
                .save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = document.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(Self { document, raw_data })
    }

    /// Read and parse a PDF file.
    pub fn open(path: &Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::load(&data)?)
    }

    pub fn page_count(&self) -> u32 {
        self.document.get_pages().len() as u32
    }

    /// Extracted text for every page, in page order.
    ///
    /// Always returns exactly `page_count()` entries; pages the text layer
    /// does not cover come back empty.
    pub fn page_texts(&self) -> Result<Vec<String>> {
        let mut texts = pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        let page_count = self.page_count() as usize;
        if texts.len() != page_count {
            debug!(
                "Text layer covers {} of {} pages",
                texts.len().min(page_count),
                page_count
            );
        }
        texts.resize(page_count, String::new());
        Ok(texts)
    }

    /// The image to OCR for a 1-indexed page.
    ///
    /// Scanned pages carry their content as an image XObject; the largest one
    /// on the page is taken. When the image is much denser than `dpi` relative
    /// to the page's media box, it is scaled down to that density.
    pub fn page_image(&self, page: u32, dpi: u32) -> Result<DynamicImage> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page).ok_or(PdfError::InvalidPage(page))?;

        let image = self
            .page_images(page_id)
            .into_iter()
            .max_by_key(|img| u64::from(img.width()) * u64::from(img.height()))
            .ok_or_else(|| PdfError::ImageExtraction(format!("no image on page {}", page)))?;

        Ok(match self.media_width(page_id) {
            Some(width_pt) => fit_to_dpi(image, width_pt, dpi),
            None => image,
        })
    }

    fn page_images(&self, page_id: ObjectId) -> Vec<DynamicImage> {
        let doc = &self.document;
        let mut images = Vec::new();

        let Some(resources) = self.page_resources(page_id) else {
            return images;
        };
        let Ok(xobjects) = resources.get(b"XObject") else {
            return images;
        };
        if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
            for (_name, obj_ref) in xobj_dict.iter() {
                if let Ok((_, obj)) = doc.dereference(obj_ref) {
                    if let Some(img) = decode_image_object(doc, obj) {
                        images.push(img);
                    }
                }
            }
        }

        trace!("Found {} images on page object {:?}", images.len(), page_id);
        images
    }

    fn page_resources(&self, page_id: ObjectId) -> Option<Dictionary> {
        match self.inherited_attribute(page_id, b"Resources")? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Width of the page's media box in points.
    fn media_width(&self, page_id: ObjectId) -> Option<f32> {
        let Object::Array(rect) = self.inherited_attribute(page_id, b"MediaBox")? else {
            return None;
        };
        let coord = |i: usize| -> Option<f32> {
            match rect.get(i)? {
                Object::Integer(v) => Some(*v as f32),
                Object::Real(v) => Some(*v),
                _ => None,
            }
        };
        Some((coord(2)? - coord(0)?).abs())
    }

    /// Look up a page attribute, walking up the page tree for inherited ones.
    fn inherited_attribute(&self, node_id: ObjectId, key: &[u8]) -> Option<Object> {
        let doc = &self.document;
        let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
            return None;
        };

        if let Ok(value) = dict.get(key) {
            if let Ok((_, resolved)) = doc.dereference(value) {
                return Some(resolved.clone());
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => self.inherited_attribute(*parent_id, key),
            _ => None,
        }
    }
}

fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    trace!("Image object: {}x{}", width, height);

    if let Ok(filter) = dict.get(b"Filter") {
        let filter_name = match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        };

        match filter_name {
            Some(b"DCTDecode") => {
                return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                    .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                debug!("Skipping image with unsupported filter");
                return None;
            }
            _ => {}
        }
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .unwrap_or(8);

    if bits != 8 {
        trace!("Unsupported bits per component: {}", bits);
        return None;
    }

    raw_to_image(&data, width, height, color_space)
}

/// Build an RGBA image from uncompressed 8-bit samples.
fn raw_to_image(data: &[u8], width: u32, height: u32, color_space: &[u8]) -> Option<DynamicImage> {
    let pixels = usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)?;
    let rgb_len = pixels.checked_mul(3)?;
    if pixels == 0 || pixels.checked_mul(4).is_none() {
        return None;
    }

    let rgba: Vec<u8> = match color_space {
        b"DeviceRGB" | b"RGB" if data.len() >= rgb_len => data[..rgb_len]
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        b"DeviceGray" | b"G" if data.len() >= pixels => data[..pixels]
            .iter()
            .flat_map(|&g| [g, g, g, 255])
            .collect(),
        _ => {
            trace!(
                "Could not decode {} bytes as {}",
                data.len(),
                String::from_utf8_lossy(color_space)
            );
            return None;
        }
    };

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}

/// Scale `image` down when it is more than 1.5x denser than `dpi` across a
/// page `width_pt` points wide. Never scales up.
fn fit_to_dpi(image: DynamicImage, width_pt: f32, dpi: u32) -> DynamicImage {
    if width_pt <= 0.0 || dpi == 0 {
        return image;
    }

    let (width, height) = image.dimensions();
    let target = (width_pt / POINTS_PER_INCH * dpi as f32).round() as u32;
    if target == 0 || (width as f32) <= target as f32 * 1.5 {
        return image;
    }

    let target_height = ((height as f32) * target as f32 / width as f32).round().max(1.0) as u32;
    debug!("Scaling page image {}x{} -> {}x{}", width, height, target, target_height);
    image.resize_exact(target, target_height, FilterType::Triangle)
}
