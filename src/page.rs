//! Event dispatch and cross-gallery coordination.
//!
//! A [`Page`] owns every gallery instance plus the recency order of open
//! lightboxes. All transitions run synchronously inside [`Page::dispatch`];
//! there is no intermediate state observable between the close and open
//! halves of a transition.

use std::fmt;

use crate::gallery::{AdvanceError, Gallery};

/// Keyboard surface of the widget. Global key names, no modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Escape,
}

/// A user input event addressed to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Click on the image with id `image` inside the gallery with id
    /// `gallery`.
    Click { gallery: String, image: String },
    Key(Key),
}

impl Event {
    pub fn click(gallery: impl Into<String>, image: impl Into<String>) -> Self {
        Event::Click {
            gallery: gallery.into(),
            image: image.into(),
        }
    }
}

/// Why a transition was refused. Refusals leave all state untouched; the
/// widget stays interactive after any malformed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Refusal {
    #[error("no gallery or image matches the event target")]
    UnknownTarget,
    #[error("navigation would step past the first or last image")]
    OutOfRangeIndex,
    #[error("target image has a zero-area box")]
    DegenerateGeometry,
    #[error("no lightbox is open")]
    NoLightboxOpen,
}

/// An applied state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Opened { gallery: String, index: usize },
    Moved { gallery: String, from: usize, to: usize },
    Closed { gallery: String },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Opened { gallery, index } => {
                write!(f, "opened {gallery} at image {index}")
            }
            Transition::Moved { gallery, from, to } => {
                write!(f, "moved {gallery} from image {from} to {to}")
            }
            Transition::Closed { gallery } => write!(f, "closed {gallery}"),
        }
    }
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Transition),
    Refused(Refusal),
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied(t) => write!(f, "{t}"),
            Outcome::Refused(r) => write!(f, "refused: {r}"),
        }
    }
}

/// All galleries on one page and the coordinator state shared between them.
///
/// Galleries do not close each other: several lightboxes may be open at once,
/// each with exactly one active image. The coordinator tracks the order in
/// which galleries were opened or last interacted with; keyboard events route
/// to the most recent one, and `Escape` closes only that gallery.
#[derive(Debug, Default)]
pub struct Page {
    galleries: Vec<Gallery>,
    /// Indices into `galleries` for every open lightbox, most recent last.
    open_order: Vec<usize>,
}

impl Page {
    pub fn new(galleries: Vec<Gallery>) -> Self {
        Self {
            galleries,
            open_order: Vec::new(),
        }
    }

    pub fn galleries(&self) -> &[Gallery] {
        &self.galleries
    }

    pub fn gallery(&self, id: &str) -> Option<&Gallery> {
        self.galleries.iter().find(|g| g.id() == id)
    }

    pub fn gallery_mut(&mut self, id: &str) -> Option<&mut Gallery> {
        self.galleries.iter_mut().find(|g| g.id() == id)
    }

    /// Gallery currently receiving keyboard events, if any lightbox is open.
    pub fn focused_gallery(&self) -> Option<&Gallery> {
        self.open_order.last().map(|&i| &self.galleries[i])
    }

    /// Applies one input event. Every state mutation the transition implies
    /// happens before this returns.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        match event {
            Event::Click { gallery, image } => self.handle_click(&gallery, &image),
            Event::Key(key) => self.handle_key(key),
        }
    }

    fn handle_click(&mut self, gallery_id: &str, image_id: &str) -> Outcome {
        let Some(gi) = self.galleries.iter().position(|g| g.id() == gallery_id) else {
            return Outcome::Refused(Refusal::UnknownTarget);
        };
        let Some(index) = self.galleries[gi].image_index(image_id) else {
            return Outcome::Refused(Refusal::UnknownTarget);
        };

        let gallery = &mut self.galleries[gi];
        match gallery.active_index() {
            Some(current) if current == index => {
                gallery.close();
                self.open_order.retain(|&g| g != gi);
                Outcome::Applied(Transition::Closed {
                    gallery: gallery_id.to_string(),
                })
            }
            Some(current) => match gallery.activate(index) {
                Ok(()) => {
                    self.touch(gi);
                    Outcome::Applied(Transition::Moved {
                        gallery: gallery_id.to_string(),
                        from: current,
                        to: index,
                    })
                }
                Err(_) => Outcome::Refused(Refusal::DegenerateGeometry),
            },
            None => match gallery.activate(index) {
                Ok(()) => {
                    self.touch(gi);
                    Outcome::Applied(Transition::Opened {
                        gallery: gallery_id.to_string(),
                        index,
                    })
                }
                Err(_) => Outcome::Refused(Refusal::DegenerateGeometry),
            },
        }
    }

    fn handle_key(&mut self, key: Key) -> Outcome {
        let Some(&gi) = self.open_order.last() else {
            return Outcome::Refused(Refusal::NoLightboxOpen);
        };
        match key {
            Key::ArrowRight => self.advance_focused(gi, 1),
            Key::ArrowLeft => self.advance_focused(gi, -1),
            Key::Escape => {
                let id = self.galleries[gi].id().to_string();
                self.galleries[gi].close();
                self.open_order.pop();
                Outcome::Applied(Transition::Closed { gallery: id })
            }
        }
    }

    fn advance_focused(&mut self, gi: usize, delta: i64) -> Outcome {
        let gallery = &mut self.galleries[gi];
        match gallery.advance(delta) {
            Ok((from, to)) => Outcome::Applied(Transition::Moved {
                gallery: gallery.id().to_string(),
                from,
                to,
            }),
            Err(AdvanceError::OutOfRange) => Outcome::Refused(Refusal::OutOfRangeIndex),
            Err(AdvanceError::Geometry(_)) => Outcome::Refused(Refusal::DegenerateGeometry),
            Err(AdvanceError::NotOpen) => Outcome::Refused(Refusal::NoLightboxOpen),
        }
    }

    /// Marks a gallery as the most recently interacted-with open lightbox.
    fn touch(&mut self, gi: usize) {
        self.open_order.retain(|&g| g != gi);
        self.open_order.push(gi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryImage;
    use crate::geometry::Rect;

    fn one_gallery_page() -> Page {
        let container = Rect::new(0.0, 0.0, 800.0, 400.0);
        let images = vec![
            GalleryImage::new(
                "a",
                "a.png",
                "a@2x.png",
                500.0,
                500.0,
                Rect::new(200.0, 150.0, 100.0, 100.0),
            ),
            GalleryImage::new(
                "b",
                "b.png",
                "b@2x.png",
                500.0,
                500.0,
                Rect::new(650.0, 150.0, 100.0, 100.0),
            ),
        ];
        Page::new(vec![Gallery::new("g", container, images)])
    }

    #[test]
    fn unknown_targets_are_refused() {
        let mut page = one_gallery_page();
        assert_eq!(
            page.dispatch(Event::click("missing", "a")),
            Outcome::Refused(Refusal::UnknownTarget)
        );
        assert_eq!(
            page.dispatch(Event::click("g", "missing")),
            Outcome::Refused(Refusal::UnknownTarget)
        );
        assert!(!page.gallery("g").unwrap().lightbox_open());
    }

    #[test]
    fn keys_with_nothing_open_are_refused() {
        let mut page = one_gallery_page();
        for key in [Key::ArrowRight, Key::ArrowLeft, Key::Escape] {
            assert_eq!(
                page.dispatch(Event::Key(key)),
                Outcome::Refused(Refusal::NoLightboxOpen)
            );
        }
    }

    #[test]
    fn click_open_move_close() {
        let mut page = one_gallery_page();
        assert_eq!(
            page.dispatch(Event::click("g", "a")),
            Outcome::Applied(Transition::Opened {
                gallery: "g".into(),
                index: 0
            })
        );
        assert_eq!(
            page.dispatch(Event::click("g", "b")),
            Outcome::Applied(Transition::Moved {
                gallery: "g".into(),
                from: 0,
                to: 1
            })
        );
        assert_eq!(
            page.dispatch(Event::click("g", "b")),
            Outcome::Applied(Transition::Closed {
                gallery: "g".into()
            })
        );
        assert!(!page.gallery("g").unwrap().lightbox_open());
    }

    #[test]
    fn degenerate_click_leaves_gallery_closed() {
        let mut page = one_gallery_page();
        page.gallery_mut("g")
            .unwrap()
            .image_mut(0)
            .unwrap()
            .set_bounds(Rect::new(0.0, 0.0, 100.0, 0.0));
        assert_eq!(
            page.dispatch(Event::click("g", "a")),
            Outcome::Refused(Refusal::DegenerateGeometry)
        );
        assert!(!page.gallery("g").unwrap().lightbox_open());
        assert!(page.focused_gallery().is_none());
    }
}
