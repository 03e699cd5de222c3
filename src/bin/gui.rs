fn main() -> iced::Result {
    println!("Lightbox Gallery - starting GUI...");
    lightbox_gallery::gui_app::run_gallery_app()
}
