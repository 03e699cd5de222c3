//! Headless lightbox interaction engine for image galleries.
//!
//! Models a page of thumbnail galleries and runs the click/keyboard state
//! machine that zooms one image at a time per gallery: computing the pan/zoom
//! transform from on-screen geometry, swapping low/high resolution sources,
//! and emitting the class tokens and style strings a rendering layer applies.

pub mod gallery;
pub mod geometry;
pub mod gui_app;
pub mod layout;
pub mod manifest;
pub mod page;
pub mod swap;
