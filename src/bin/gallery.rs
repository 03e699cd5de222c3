use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use lightbox_gallery::manifest;
use lightbox_gallery::page::{Event, Key, Page};

#[derive(Parser, Debug)]
#[command(
    name = "gallery",
    about = "Replay lightbox interaction scripts against a gallery manifest",
    version
)]
struct Cli {
    /// Page manifest JSON
    #[arg(short = 'm', long = "manifest")]
    manifest: PathBuf,

    /// Comma-separated event script, e.g. "click gallery four, right, right, esc"
    #[arg(short = 's', long = "script", default_value = "")]
    script: String,

    /// Print the computed thumbnail widths and exit
    #[arg(long = "layout")]
    layout: bool,
}

fn parse_script(script: &str) -> Result<Vec<Event>, String> {
    let mut events = Vec::new();
    for step in script.split(',') {
        let step = step.trim();
        if step.is_empty() {
            continue;
        }
        let tokens: Vec<&str> = step.split_whitespace().collect();
        let event = match tokens.as_slice() {
            ["click", gallery, image] => Event::click(*gallery, *image),
            ["right"] => Event::Key(Key::ArrowRight),
            ["left"] => Event::Key(Key::ArrowLeft),
            ["esc"] | ["escape"] => Event::Key(Key::Escape),
            _ => return Err(format!("unrecognized script step: {step:?}")),
        };
        events.push(event);
    }
    Ok(events)
}

fn print_layout(page: &Page) {
    for gallery in page.galleries() {
        println!("gallery {}", gallery.id());
        for image in gallery.images() {
            println!(
                "  {:<12} width {}",
                image.id(),
                image.style_width().unwrap_or("-")
            );
        }
    }
}

fn print_state(page: &Page) {
    for gallery in page.galleries() {
        let classes = gallery.class_list().join(" ");
        println!("gallery {} [{}]", gallery.id(), classes);
        for image in gallery.images() {
            println!(
                "  {:<12} [{}] src={} transform={}",
                image.id(),
                image.class_list().join(" "),
                image.source(),
                image.transform_css()
            );
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut page = manifest::load_page(&cli.manifest)?;

    if cli.layout {
        print_layout(&page);
        return Ok(());
    }

    let events = parse_script(&cli.script)?;
    if events.is_empty() {
        eprintln!("No script steps; printing initial state.");
        print_state(&page);
        return Ok(());
    }

    for (step, event) in events.into_iter().enumerate() {
        let outcome = page.dispatch(event);
        println!("step {step}: {outcome}");
    }

    println!();
    print_state(&page);
    Ok(())
}
