//! Swaps an image's display source between its low- and high-resolution
//! variants when it enters or leaves the lightbox.

use crate::gallery::GalleryImage;

/// `sizes` value presented while an image is zoomed to span the viewport.
pub const ACTIVE_SIZES: &str = "100vw";

/// Switches `image` between its low- and high-resolution presentation.
///
/// Activation records the current source as the low-res value (only once) and
/// swaps in the high-res source; deactivation restores the recorded value.
/// Idempotent in both directions: repeated calls with the same flag change
/// nothing and never lose the recorded source or the authored `sizes` value.
pub fn set_active(image: &mut GalleryImage, is_active: bool) {
    if is_active {
        if image.low_res.is_none() {
            image.low_res = Some(image.source.clone());
        }
        image.source = image.high_res.clone();
        if let Some(sizes) = image.sizes.as_mut() {
            sizes.display = ACTIVE_SIZES.to_string();
        }
    } else {
        if let Some(low) = &image.low_res {
            image.source = low.clone();
        }
        if let Some(sizes) = image.sizes.as_mut() {
            sizes.display = sizes.authored.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn sample_image() -> GalleryImage {
        GalleryImage::new(
            "ten",
            "img/ten-low.png",
            "img/ten-high.png",
            970.0,
            600.0,
            Rect::new(500.0, 300.0, 97.0, 60.0),
        )
        .with_sizes("(max-width: 800px) 10vw, 853px")
    }

    #[test]
    fn records_low_res_once_and_restores_it() {
        let mut image = sample_image();
        set_active(&mut image, true);
        assert_eq!(image.source(), "img/ten-high.png");
        assert_eq!(image.low_res(), Some("img/ten-low.png"));

        set_active(&mut image, false);
        assert_eq!(image.source(), "img/ten-low.png");
        // The recorded value stays cached for the next activation.
        assert_eq!(image.low_res(), Some("img/ten-low.png"));
    }

    #[test]
    fn repeated_activation_does_not_clobber_low_res() {
        let mut image = sample_image();
        set_active(&mut image, true);
        set_active(&mut image, true);
        assert_eq!(image.low_res(), Some("img/ten-low.png"));
        assert_eq!(image.source(), "img/ten-high.png");
    }

    #[test]
    fn deactivating_inactive_image_is_a_no_op() {
        let mut image = sample_image();
        set_active(&mut image, false);
        assert_eq!(image.source(), "img/ten-low.png");
        assert_eq!(image.low_res(), None);
    }

    #[test]
    fn sizes_swaps_to_viewport_and_back() {
        let mut image = sample_image();
        assert_eq!(
            image.sizes().unwrap().display(),
            "(max-width: 800px) 10vw, 853px"
        );

        set_active(&mut image, true);
        assert_eq!(image.sizes().unwrap().display(), ACTIVE_SIZES);
        assert_eq!(
            image.sizes().unwrap().authored(),
            "(max-width: 800px) 10vw, 853px"
        );

        set_active(&mut image, false);
        assert_eq!(
            image.sizes().unwrap().display(),
            "(max-width: 800px) 10vw, 853px"
        );
    }
}
