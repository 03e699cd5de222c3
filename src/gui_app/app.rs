//! iced demo application: a thumbnail grid backed by the lightbox core.
//!
//! The grid renders a single gallery; clicking a thumbnail or pressing
//! ArrowLeft/ArrowRight/Escape dispatches through [`Page`], and the view
//! reflects whatever state the core reports (open lightbox, active image,
//! computed transform).

use std::fs;
use std::path::{Path, PathBuf};

use iced::keyboard::{self, key::Named};
use iced::widget::{button, column, container, mouse_area, row, stack, text};
use iced::{Color, Element, Length, Size, Subscription, Task, Theme, window};

use crate::gallery::{Gallery, GalleryImage};
use crate::geometry::Rect;
use crate::page::{Event, Key, Page};

const GALLERY_ID: &str = "main";
const CELL_WIDTH: f64 = 160.0;
const CELL_HEIGHT: f64 = 120.0;
const GRID_GAP: f64 = 16.0;
const GRID_PADDING: f64 = 20.0;
const STATUS_BAR_HEIGHT: f64 = 48.0;
const MAX_IMAGES: usize = 24;
const THUMB_DECODE_SIZE: u32 = 320;

pub fn run_gallery_app() -> iced::Result {
    iced::application("Lightbox Gallery", GalleryApp::update, GalleryApp::view)
        .subscription(GalleryApp::subscription)
        .theme(GalleryApp::theme)
        .window(window::Settings {
            size: Size::new(900.0, 620.0),
            ..Default::default()
        })
        .run_with(GalleryApp::new)
}

struct GalleryApp {
    page: Page,
    thumbs: Vec<Thumb>,
    status_text: String,
    is_loading: bool,
    window_size: Size,
}

#[derive(Debug, Clone)]
struct Thumb {
    id: String,
    low_handle: iced::widget::image::Handle,
    high_handle: iced::widget::image::Handle,
}

#[derive(Debug, Clone)]
struct LoadedThumb {
    id: String,
    path: PathBuf,
    natural_width: u32,
    natural_height: u32,
    low_handle: iced::widget::image::Handle,
    high_handle: iced::widget::image::Handle,
}

#[derive(Debug, Clone)]
enum Message {
    OpenFolderPressed,
    FolderPicked(Option<PathBuf>),
    GalleryLoaded(Result<Vec<LoadedThumb>, String>),
    ThumbClicked(usize),
    KeyPressed(Key),
    WindowResized(Size),
}

impl GalleryApp {
    fn new() -> (Self, Task<Message>) {
        (
            GalleryApp {
                page: Page::default(),
                thumbs: Vec::new(),
                status_text: "Open a folder of images to begin".to_string(),
                is_loading: false,
                window_size: Size::new(900.0, 620.0),
            },
            Task::none(),
        )
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenFolderPressed => {
                if self.is_loading {
                    return Task::none();
                }
                let dialog = rfd::AsyncFileDialog::new()
                    .set_title("Select a folder of images")
                    .pick_folder();
                Task::perform(dialog, |result| {
                    Message::FolderPicked(result.map(|dir| dir.path().to_path_buf()))
                })
            }
            Message::FolderPicked(Some(dir)) => {
                self.is_loading = true;
                self.status_text = format!("Loading {}...", dir.display());
                Task::perform(load_gallery_task(dir), Message::GalleryLoaded)
            }
            Message::FolderPicked(None) => Task::none(),
            Message::GalleryLoaded(Ok(loaded)) => {
                self.is_loading = false;
                self.status_text = format!("{} images", loaded.len());
                self.page = build_page(&loaded, self.window_size);
                self.thumbs = loaded
                    .into_iter()
                    .map(|entry| Thumb {
                        id: entry.id,
                        low_handle: entry.low_handle,
                        high_handle: entry.high_handle,
                    })
                    .collect();
                Task::none()
            }
            Message::GalleryLoaded(Err(error)) => {
                self.is_loading = false;
                self.status_text = format!("Failed to load folder: {error}");
                Task::none()
            }
            Message::ThumbClicked(index) => {
                if let Some(thumb) = self.thumbs.get(index) {
                    let event = Event::click(GALLERY_ID, thumb.id.clone());
                    let outcome = self.page.dispatch(event);
                    self.status_text = outcome.to_string();
                }
                Task::none()
            }
            Message::KeyPressed(key) => {
                let outcome = self.page.dispatch(Event::Key(key));
                self.status_text = outcome.to_string();
                Task::none()
            }
            Message::WindowResized(size) => {
                self.window_size = size;
                self.apply_layout();
                Task::none()
            }
        }
    }

    /// Re-derives every image box from the current window size. The core
    /// reads the new boxes on the next activation.
    fn apply_layout(&mut self) {
        let size = self.window_size;
        let count = self.thumbs.len();
        if let Some(gallery) = self.page.gallery_mut(GALLERY_ID) {
            gallery.set_container(container_rect(size));
            for index in 0..count {
                if let Some(image) = gallery.image_mut(index) {
                    image.set_bounds(cell_bounds(index, size));
                }
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let open_button: Element<'_, Message> = if self.is_loading {
            button(text("Loading...")).into()
        } else {
            button(text("Open Folder"))
                .on_press(Message::OpenFolderPressed)
                .into()
        };

        let transform_label = self
            .page
            .gallery(GALLERY_ID)
            .and_then(|g| g.active_index().and_then(|i| g.image(i)))
            .map(|img| img.transform_css())
            .unwrap_or_default();

        let status_bar = container(
            row![
                open_button,
                text(&self.status_text).size(14),
                text(transform_label).size(14),
            ]
            .spacing(16),
        )
        .padding(10)
        .width(Length::Fill)
        .height(Length::Fixed(STATUS_BAR_HEIGHT as f32))
        .style(|_| container::Style {
            background: Some(Color::from_rgb8(32, 32, 32).into()),
            ..Default::default()
        });

        let grid = self.grid_section();

        let body: Element<'_, Message> = match self.active_overlay() {
            Some(overlay) => stack![grid, overlay].into(),
            None => grid,
        };

        column![body, status_bar].into()
    }

    fn grid_section(&self) -> Element<'_, Message> {
        let cols = grid_columns(self.window_size);
        let mut rows = column![]
            .spacing(GRID_GAP as f32)
            .padding(GRID_PADDING as f32);

        for (row_index, chunk) in self.thumbs.chunks(cols).enumerate() {
            let mut cells = row![].spacing(GRID_GAP as f32);
            for (col_index, thumb) in chunk.iter().enumerate() {
                let index = row_index * cols + col_index;
                let cell: Element<'_, Message> = mouse_area(
                    container(
                        iced::widget::image(thumb.low_handle.clone())
                            .content_fit(iced::ContentFit::Contain)
                            .width(Length::Fill)
                            .height(Length::Fill),
                    )
                    .width(Length::Fixed(CELL_WIDTH as f32))
                    .height(Length::Fixed(CELL_HEIGHT as f32)),
                )
                .on_press(Message::ThumbClicked(index))
                .into();
                cells = cells.push(cell);
            }
            rows = rows.push(cells);
        }

        container(rows)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_| container::Style {
                background: Some(Color::from_rgb8(24, 24, 24).into()),
                ..Default::default()
            })
            .into()
    }

    /// Lightbox overlay for the active image, sized by the core's transform.
    fn active_overlay(&self) -> Option<Element<'_, Message>> {
        let gallery = self.page.gallery(GALLERY_ID)?;
        let index = gallery.active_index()?;
        let image = gallery.image(index)?;
        let transform = image.transform()?;
        let thumb = self.thumbs.get(index)?;

        let bounds = image.bounds();
        let zoomed_width = (bounds.width * transform.scale) as f32;
        let zoomed_height = (bounds.height * transform.scale) as f32;

        let zoomed = container(
            iced::widget::image(thumb.high_handle.clone())
                .content_fit(iced::ContentFit::Contain)
                .width(Length::Fixed(zoomed_width))
                .height(Length::Fixed(zoomed_height)),
        )
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| container::Style {
            background: Some(Color::from_rgba8(0, 0, 0, 0.85).into()),
            ..Default::default()
        });

        Some(
            mouse_area(zoomed)
                .on_press(Message::ThumbClicked(index))
                .into(),
        )
    }

    fn subscription(&self) -> Subscription<Message> {
        let keys = keyboard::on_key_press(|key, _modifiers| match key {
            keyboard::Key::Named(Named::ArrowRight) => Some(Message::KeyPressed(Key::ArrowRight)),
            keyboard::Key::Named(Named::ArrowLeft) => Some(Message::KeyPressed(Key::ArrowLeft)),
            keyboard::Key::Named(Named::Escape) => Some(Message::KeyPressed(Key::Escape)),
            _ => None,
        });
        let resizes = window::resize_events().map(|(_id, size)| Message::WindowResized(size));
        Subscription::batch([keys, resizes])
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn container_rect(size: Size) -> Rect {
    Rect::new(
        0.0,
        0.0,
        size.width as f64,
        (size.height as f64 - STATUS_BAR_HEIGHT).max(0.0),
    )
}

fn grid_columns(size: Size) -> usize {
    let usable = (size.width as f64 - GRID_PADDING * 2.0 + GRID_GAP).max(CELL_WIDTH + GRID_GAP);
    ((usable / (CELL_WIDTH + GRID_GAP)) as usize).max(1)
}

fn cell_bounds(index: usize, size: Size) -> Rect {
    let cols = grid_columns(size);
    let col = index % cols;
    let row = index / cols;
    Rect::new(
        GRID_PADDING + col as f64 * (CELL_WIDTH + GRID_GAP),
        GRID_PADDING + row as f64 * (CELL_HEIGHT + GRID_GAP),
        CELL_WIDTH,
        CELL_HEIGHT,
    )
}

fn build_page(loaded: &[LoadedThumb], size: Size) -> Page {
    let cols = grid_columns(size);
    let mut rows: Vec<Vec<GalleryImage>> = Vec::new();
    for (index, entry) in loaded.iter().enumerate() {
        if index % cols == 0 {
            rows.push(Vec::new());
        }
        let path = entry.path.display().to_string();
        let image = GalleryImage::new(
            &entry.id,
            format!("{path}#thumbnail"),
            path,
            entry.natural_width as f64,
            entry.natural_height as f64,
            cell_bounds(index, size),
        );
        if let Some(last) = rows.last_mut() {
            last.push(image);
        }
    }
    Page::new(vec![Gallery::from_rows(
        GALLERY_ID,
        container_rect(size),
        rows,
    )])
}

async fn load_gallery_task(dir: PathBuf) -> Result<Vec<LoadedThumb>, String> {
    tokio::task::spawn_blocking(move || load_gallery_blocking(&dir))
        .await
        .map_err(|join_error| join_error.to_string())?
}

fn load_gallery_blocking(dir: &Path) -> Result<Vec<LoadedThumb>, String> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| e.to_string())?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_image_file(path))
        .collect();
    paths.sort();
    paths.truncate(MAX_IMAGES);

    if paths.is_empty() {
        return Err("no images found in folder".to_string());
    }

    let mut thumbs = Vec::with_capacity(paths.len());
    for path in paths {
        let decoded = match image::open(&path) {
            Ok(img) => img,
            Err(error) => {
                eprintln!("Skipping {}: {error}", path.display());
                continue;
            }
        };
        let natural_width = decoded.width();
        let natural_height = decoded.height();
        let thumb = decoded
            .thumbnail(THUMB_DECODE_SIZE, THUMB_DECODE_SIZE)
            .to_rgba8();
        let low_handle = iced::widget::image::Handle::from_rgba(
            thumb.width(),
            thumb.height(),
            thumb.into_raw(),
        );
        let high_handle = iced::widget::image::Handle::from_path(&path);
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("image-{}", thumbs.len()));
        thumbs.push(LoadedThumb {
            id,
            path,
            natural_width,
            natural_height,
            low_handle,
            high_handle,
        });
    }

    if thumbs.is_empty() {
        return Err("no decodable images in folder".to_string());
    }
    Ok(thumbs)
}

fn is_image_file(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "bmp" | "gif" | "tif" | "tiff" | "webp"
    )
}
