//! Gallery and image state: the data model plus the per-gallery tracker that
//! decides which image, if any, is zoomed.

use crate::geometry::{self, GeometryError, IDENTITY_TRANSFORM, Rect, ZoomTransform};
use crate::layout;
use crate::swap;

/// Responsive `sizes` metadata carried through activation untouched.
///
/// The authored value is opaque pass-through state: the swapper presents
/// `100vw` while the image is zoomed and restores the authored value on
/// deactivation, never rewriting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizesAttr {
    pub(crate) display: String,
    pub(crate) authored: String,
}

impl SizesAttr {
    pub fn new(authored: impl Into<String>) -> Self {
        let authored = authored.into();
        Self {
            display: authored.clone(),
            authored,
        }
    }

    /// Value currently presented to the rendering layer.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Value as authored in the markup.
    pub fn authored(&self) -> &str {
        &self.authored
    }
}

/// One image in a gallery.
///
/// `source` mirrors the element's display source; `low_res` is recorded by
/// the swapper on first activation so closing the lightbox restores the
/// original string byte for byte.
#[derive(Debug, Clone)]
pub struct GalleryImage {
    id: String,
    pub(crate) source: String,
    pub(crate) high_res: String,
    pub(crate) low_res: Option<String>,
    natural_width: f64,
    natural_height: f64,
    bounds: Rect,
    pub(crate) sizes: Option<SizesAttr>,
    style_width: Option<String>,
    active: bool,
    transform: Option<ZoomTransform>,
}

impl GalleryImage {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        high_res: impl Into<String>,
        natural_width: f64,
        natural_height: f64,
        bounds: Rect,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            high_res: high_res.into(),
            low_res: None,
            natural_width,
            natural_height,
            bounds,
            sizes: None,
            style_width: None,
            active: false,
            transform: None,
        }
    }

    pub fn with_sizes(mut self, authored: impl Into<String>) -> Self {
        self.sizes = Some(SizesAttr::new(authored));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Currently displayed source URL.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn high_res(&self) -> &str {
        &self.high_res
    }

    /// Recorded default source, present once the image has been activated.
    pub fn low_res(&self) -> Option<&str> {
        self.low_res.as_deref()
    }

    pub fn natural_width(&self) -> f64 {
        self.natural_width
    }

    pub fn natural_height(&self) -> f64 {
        self.natural_height
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Updates the on-screen box. Owned by the rendering layer; the next
    /// activation reads the new value.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn sizes(&self) -> Option<&SizesAttr> {
        self.sizes.as_ref()
    }

    /// Width percentage assigned at gallery construction, e.g. `25%`.
    pub fn style_width(&self) -> Option<&str> {
        self.style_width.as_deref()
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn transform(&self) -> Option<ZoomTransform> {
        self.transform
    }

    /// Style string for the element's `transform` property: the percentage
    /// form while active, the pixel-valued identity literal otherwise.
    pub fn transform_css(&self) -> String {
        match self.transform {
            Some(t) => t.to_css(),
            None => IDENTITY_TRANSFORM.to_string(),
        }
    }

    /// Class tokens present on the element.
    pub fn class_list(&self) -> Vec<&'static str> {
        if self.active { vec!["active"] } else { Vec::new() }
    }

    fn reset(&mut self) {
        swap::set_active(self, false);
        self.active = false;
        self.transform = None;
    }
}

/// Navigation outcomes for [`Gallery::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdvanceError {
    NotOpen,
    OutOfRange,
    Geometry(GeometryError),
}

/// An ordered collection of images with at most one zoomed at a time.
#[derive(Debug, Clone)]
pub struct Gallery {
    id: String,
    container: Rect,
    images: Vec<GalleryImage>,
    active: Option<usize>,
}

impl Gallery {
    pub fn new(id: impl Into<String>, container: Rect, images: Vec<GalleryImage>) -> Self {
        Self {
            id: id.into(),
            container,
            images,
            active: None,
        }
    }

    /// Builds a gallery from rows of images, assigning each image the width
    /// percentage its row layout calls for.
    pub fn from_rows(
        id: impl Into<String>,
        container: Rect,
        rows: Vec<Vec<GalleryImage>>,
    ) -> Self {
        let mut images = Vec::new();
        for mut row in rows {
            let widths: Vec<f64> = row.iter().map(|img| img.natural_width).collect();
            let percents = layout::row_width_percents(&widths);
            for (image, percent) in row.iter_mut().zip(percents) {
                image.style_width = Some(percent);
            }
            images.extend(row);
        }
        Self::new(id, container, images)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn container(&self) -> Rect {
        self.container
    }

    /// Updates the container box on host resize.
    pub fn set_container(&mut self, container: Rect) {
        self.container = container;
    }

    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    pub fn image(&self, index: usize) -> Option<&GalleryImage> {
        self.images.get(index)
    }

    pub fn image_mut(&mut self, index: usize) -> Option<&mut GalleryImage> {
        self.images.get_mut(index)
    }

    pub fn image_index(&self, id: &str) -> Option<usize> {
        self.images.iter().position(|img| img.id == id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn lightbox_open(&self) -> bool {
        self.active.is_some()
    }

    /// Class tokens present on the gallery element.
    pub fn class_list(&self) -> Vec<&'static str> {
        if self.lightbox_open() {
            vec!["lightbox"]
        } else {
            Vec::new()
        }
    }

    /// Zooms the image at `index`, deactivating any other image in this
    /// gallery. The transform is computed before any state is touched, so a
    /// geometry failure refuses the whole transition and leaves the gallery
    /// unchanged.
    pub(crate) fn activate(&mut self, index: usize) -> Result<(), GeometryError> {
        let transform = {
            let image = &self.images[index];
            geometry::compute_zoom_transform(
                image.bounds,
                self.container,
                image.natural_width,
                image.natural_height,
            )?
        };

        if let Some(current) = self.active
            && current != index
        {
            self.images[current].reset();
        }

        let image = &mut self.images[index];
        swap::set_active(image, true);
        image.active = true;
        image.transform = Some(transform);
        self.active = Some(index);
        Ok(())
    }

    /// Closes the lightbox and resets every image in the gallery to its
    /// default source and the identity transform. Returns whether anything
    /// changed; closing an already-closed gallery is a no-op.
    pub(crate) fn close(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        for image in &mut self.images {
            image.reset();
        }
        self.active = None;
        true
    }

    /// Moves the active image by `delta`, saturating at the ends: stepping
    /// past the first or last image refuses the transition.
    pub(crate) fn advance(&mut self, delta: i64) -> Result<(usize, usize), AdvanceError> {
        let Some(current) = self.active else {
            return Err(AdvanceError::NotOpen);
        };
        let target = current as i64 + delta;
        if target < 0 || target >= self.images.len() as i64 {
            return Err(AdvanceError::OutOfRange);
        }
        let target = target as usize;
        self.activate(target).map_err(AdvanceError::Geometry)?;
        Ok((current, target))
    }
}
