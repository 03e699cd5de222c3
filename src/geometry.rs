//! Computes the pan/zoom transform that grows a thumbnail to fill its gallery
//! container, and renders it in the CSS form the rendering layer consumes.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Errors that can occur while computing a zoom transform.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("image box or natural size has no area")]
    DegenerateGeometry,
}

/// Transform string rendered for images that are not zoomed.
///
/// The reset form is pixel-valued, unlike the percentage-valued active
/// transform. Hosts compare these strings verbatim, so the distinction is
/// part of the contract.
pub const IDENTITY_TRANSFORM: &str = "translate(0px, 0px) scale(1)";

/// A translate-then-scale transform, with the translation expressed as
/// percentages of the image's own on-screen box.
///
/// Percentage-based offsets keep the transform valid when the host resizes
/// the thumbnail grid: the same percentages re-center the image regardless of
/// the rendered pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub translate_x_pct: f64,
    pub translate_y_pct: f64,
    pub scale: f64,
}

impl ZoomTransform {
    /// CSS transform list for the active image, e.g.
    /// `translate(-300%, 0%) scale(4)`.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}%, {}%) scale({})",
            format_sig(self.translate_x_pct),
            format_sig(self.translate_y_pct),
            format_sig(self.scale)
        )
    }
}

/// Computes the transform that centers `image_box` in `container` and scales
/// it as large as the container allows.
///
/// The high-resolution asset renders at its natural aspect ratio fitted
/// inside the on-screen box, so the scale is taken against that fitted size:
/// `min(container.width / fit_w, container.height / fit_h)`. When the box
/// already has the natural aspect this reduces to
/// `min(container.width / box.width, container.height / box.height)`.
///
/// Pure function of its inputs; identical inputs produce identical results.
pub fn compute_zoom_transform(
    image_box: Rect,
    container: Rect,
    natural_width: f64,
    natural_height: f64,
) -> Result<ZoomTransform, GeometryError> {
    if image_box.width <= 0.0
        || image_box.height <= 0.0
        || natural_width <= 0.0
        || natural_height <= 0.0
    {
        return Err(GeometryError::DegenerateGeometry);
    }

    let natural_aspect = natural_width / natural_height;
    let box_aspect = image_box.width / image_box.height;
    let (fit_width, fit_height) = if natural_aspect > box_aspect {
        (image_box.width, image_box.width / natural_aspect)
    } else {
        (image_box.height * natural_aspect, image_box.height)
    };

    let scale = (container.width / fit_width).min(container.height / fit_height);
    let translate_x_pct = (container.center_x() - image_box.center_x()) / image_box.width * 100.0;
    let translate_y_pct = (container.center_y() - image_box.center_y()) / image_box.height * 100.0;

    Ok(ZoomTransform {
        translate_x_pct,
        translate_y_pct,
        scale,
    })
}

/// Rounds to 6 significant digits and prints without trailing zeros, matching
/// the style strings hosts expect (`-300`, `4.93333`, `10.3093`).
pub(crate) fn format_sig(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let formatted = format!("{value:.decimals$}");
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}
