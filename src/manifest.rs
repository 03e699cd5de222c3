//! JSON page manifests: declarative gallery definitions hosts can load
//! instead of constructing galleries in code.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::gallery::{Gallery, GalleryImage};
use crate::geometry::Rect;
use crate::page::Page;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    pub galleries: Vec<GalleryManifest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryManifest {
    pub id: String,
    pub container: Rect,
    /// Rows of thumbnails in document order; row membership drives the width
    /// percentages assigned at construction.
    pub rows: Vec<Vec<ImageManifest>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageManifest {
    pub id: String,
    pub src: String,
    pub highres: String,
    pub natural_width: f64,
    pub natural_height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    pub bounds: Rect,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate gallery id: {0}")]
    DuplicateGalleryId(String),
    #[error("duplicate image id {image} in gallery {gallery}")]
    DuplicateImageId { gallery: String, image: String },
    #[error("gallery {0} has no images")]
    EmptyGallery(String),
}

/// Builds a [`Page`] from parsed manifest data.
pub fn build_page(manifest: &PageManifest) -> Result<Page, ManifestError> {
    let mut gallery_ids = HashSet::new();
    let mut galleries = Vec::with_capacity(manifest.galleries.len());

    for spec in &manifest.galleries {
        if !gallery_ids.insert(spec.id.as_str()) {
            return Err(ManifestError::DuplicateGalleryId(spec.id.clone()));
        }
        if spec.rows.iter().all(|row| row.is_empty()) {
            return Err(ManifestError::EmptyGallery(spec.id.clone()));
        }

        let mut image_ids = HashSet::new();
        let mut rows = Vec::with_capacity(spec.rows.len());
        for row_spec in &spec.rows {
            let mut row = Vec::with_capacity(row_spec.len());
            for entry in row_spec {
                if !image_ids.insert(entry.id.as_str()) {
                    return Err(ManifestError::DuplicateImageId {
                        gallery: spec.id.clone(),
                        image: entry.id.clone(),
                    });
                }
                let mut image = GalleryImage::new(
                    &entry.id,
                    &entry.src,
                    &entry.highres,
                    entry.natural_width,
                    entry.natural_height,
                    entry.bounds,
                );
                if let Some(sizes) = &entry.sizes {
                    image = image.with_sizes(sizes);
                }
                row.push(image);
            }
            rows.push(row);
        }

        galleries.push(Gallery::from_rows(&spec.id, spec.container, rows));
    }

    Ok(Page::new(galleries))
}

/// Parses manifest JSON and builds the page it describes.
pub fn parse_page(json: &str) -> Result<Page, ManifestError> {
    let manifest: PageManifest = serde_json::from_str(json)?;
    build_page(&manifest)
}

/// Reads a manifest file and builds the page it describes.
pub fn load_page(path: &Path) -> Result<Page, ManifestError> {
    let json = fs::read_to_string(path)?;
    parse_page(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(id: &str, image_ids: &[&str]) -> GalleryManifest {
        GalleryManifest {
            id: id.to_string(),
            container: Rect::new(0.0, 0.0, 800.0, 400.0),
            rows: vec![
                image_ids
                    .iter()
                    .map(|img| ImageManifest {
                        id: img.to_string(),
                        src: format!("img/{img}-low.png"),
                        highres: format!("img/{img}-high.png"),
                        natural_width: 500.0,
                        natural_height: 500.0,
                        sizes: None,
                        bounds: Rect::new(100.0, 150.0, 100.0, 100.0),
                    })
                    .collect(),
            ],
        }
    }

    #[test]
    fn builds_page_with_style_widths() {
        let manifest = PageManifest {
            galleries: vec![minimal("g", &["a", "b"])],
        };
        let page = build_page(&manifest).expect("build");
        let gallery = page.gallery("g").expect("gallery");
        assert_eq!(gallery.len(), 2);
        assert_eq!(gallery.image(0).unwrap().style_width(), Some("50%"));
    }

    #[test]
    fn duplicate_gallery_id_rejected() {
        let manifest = PageManifest {
            galleries: vec![minimal("g", &["a"]), minimal("g", &["b"])],
        };
        assert!(matches!(
            build_page(&manifest),
            Err(ManifestError::DuplicateGalleryId(id)) if id == "g"
        ));
    }

    #[test]
    fn duplicate_image_id_rejected() {
        let manifest = PageManifest {
            galleries: vec![minimal("g", &["a", "a"])],
        };
        assert!(matches!(
            build_page(&manifest),
            Err(ManifestError::DuplicateImageId { gallery, image })
                if gallery == "g" && image == "a"
        ));
    }

    #[test]
    fn empty_gallery_rejected() {
        let manifest = PageManifest {
            galleries: vec![GalleryManifest {
                id: "g".to_string(),
                container: Rect::new(0.0, 0.0, 800.0, 400.0),
                rows: vec![vec![]],
            }],
        };
        assert!(matches!(
            build_page(&manifest),
            Err(ManifestError::EmptyGallery(id)) if id == "g"
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_page("{ not json"),
            Err(ManifestError::Json(_))
        ));
    }
}
