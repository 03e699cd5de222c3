pub mod app;

pub use app::run_gallery_app;
