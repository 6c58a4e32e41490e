use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use zine_core::catalog::{BACKGROUND_COLORS, COVER_COLORS, entries_in, find_entry, is_hex_color};
use zine_core::constants::PREVIEW_LIMIT_SECS;
use zine_core::print::{CellContent, PrintCell};
use zine_core::{
    Artist, Category, Fill, FileStorage, Font, GrabMode, PagePosition, PrintOptions, PrintSheet,
    Surface, Track, Zine, ZineSession, ZineStore, ZineViewer, calculate_statistics,
    compose_print_sheet_with,
};

mod logger;

use logger::AppLogger;

#[derive(Parser)]
#[command(name = "zine", about = "Mixtape zine composer", version)]
struct Cli {
    /// Directory holding the saved zines
    #[arg(long, default_value = "zines", global = true)]
    store: PathBuf,

    /// Print options file (JSON)
    #[arg(long, global = true)]
    options: Option<PathBuf>,

    /// More log output on stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved zines
    List,

    /// Create a new zine
    New {
        /// Front cover title
        #[arg(short, long, default_value = "")]
        title: String,
    },

    /// Walk through a zine in reading order
    Show { id: String },

    /// Edit a saved zine
    Edit {
        id: String,

        #[command(subcommand)]
        action: EditAction,
    },

    /// Delete a saved zine
    Delete { id: String },

    /// Lay out the print sheet for a zine
    Print {
        id: String,

        #[arg(long, default_value = "text", value_enum)]
        format: OutputFormat,
    },

    /// Show statistics for a zine
    Stats { id: String },

    /// List the decorations that can be placed
    Decorations,

    /// List the suggested cover and page colors
    Palette,

    /// Write the default print options to a file
    InitOptions { path: PathBuf },
}

#[derive(Subcommand)]
enum EditAction {
    /// Set the text for the page's current position
    Text {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        page: u8,
        text: String,

        /// Set the overflow text instead (Center layout only)
        #[arg(long)]
        secondary: bool,
    },

    /// Move the song box
    Position {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        page: u8,
        #[arg(value_enum)]
        position: PositionArg,
    },

    /// Change the text font
    Font {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        page: u8,
        #[arg(value_enum)]
        font: FontArg,
    },

    /// Set a color or image background
    Background {
        /// front, back or a page number
        #[arg(value_parser = parse_surface)]
        surface: Surface,
        /// Hex color, image path or data URI
        fill: String,
    },

    /// Attach a song to a page
    Track {
        #[arg(value_parser = clap::value_parser!(u8).range(1..=6))]
        page: u8,
        title: String,
        artist: String,
    },

    /// Place a decoration
    Decorate {
        #[arg(value_parser = parse_surface)]
        surface: Surface,
        /// Catalog id, see `zine decorations`
        element: String,
    },

    /// Remove a placed decoration
    Undecorate {
        #[arg(value_parser = parse_surface)]
        surface: Surface,
        id: String,
    },

    /// Drag a decoration to a pointer position
    Move {
        #[arg(value_parser = parse_surface)]
        surface: Surface,
        id: String,
        x: f32,
        y: f32,

        /// Resize from the center instead of moving
        #[arg(long)]
        resize: bool,
    },

    /// Set a cover title
    Title {
        text: String,

        /// Set the back cover title
        #[arg(long)]
        back: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum PositionArg {
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    BottomRight,
    NoSongBox,
}

#[derive(Clone, Copy, ValueEnum)]
enum FontArg {
    ComicSans,
    Papyrus,
    BrushScript,
    LucidaHandwriting,
    BradleyHand,
    Kristen,
    Curlz,
    Jokerman,
    TempusSans,
}

impl From<PositionArg> for PagePosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::TopLeft => Self::TopLeft,
            PositionArg::TopRight => Self::TopRight,
            PositionArg::Center => Self::Center,
            PositionArg::BottomLeft => Self::BottomLeft,
            PositionArg::BottomRight => Self::BottomRight,
            PositionArg::NoSongBox => Self::NoSongBox,
        }
    }
}

impl From<FontArg> for Font {
    fn from(arg: FontArg) -> Self {
        match arg {
            FontArg::ComicSans => Self::ComicSans,
            FontArg::Papyrus => Self::Papyrus,
            FontArg::BrushScript => Self::BrushScript,
            FontArg::LucidaHandwriting => Self::LucidaHandwriting,
            FontArg::BradleyHand => Self::BradleyHand,
            FontArg::Kristen => Self::Kristen,
            FontArg::Curlz => Self::Curlz,
            FontArg::Jokerman => Self::Jokerman,
            FontArg::TempusSans => Self::TempusSans,
        }
    }
}

fn parse_surface(value: &str) -> Result<Surface, String> {
    match value.to_ascii_lowercase().as_str() {
        "front" | "front-cover" => Ok(Surface::FrontCover),
        "back" | "back-cover" => Ok(Surface::BackCover),
        other => match other.parse::<u8>() {
            Ok(n @ 1..=6) => Ok(Surface::Page(n)),
            _ => Err(format!(
                "expected front, back or a page number 1-6, got '{}'",
                value
            )),
        },
    }
}

type Store = ZineStore<FileStorage>;

fn open_session(store: &Store, id: &str) -> Result<ZineSession> {
    let zine = find_zine(store, id)?;
    let mut session = ZineSession::new();
    session.load_zine(zine);
    Ok(session)
}

fn find_zine<'a>(store: &'a Store, id: &str) -> Result<&'a Zine> {
    store
        .find(id)
        .with_context(|| format!("No saved zine with id {}", id))
}

async fn load_options(path: Option<&Path>) -> Result<PrintOptions> {
    match path {
        Some(path) => PrintOptions::load(path)
            .await
            .with_context(|| format!("Failed to load print options from {}", path.display())),
        None => Ok(PrintOptions::default()),
    }
}

/// Accepts a hex color, a data URI, or an image file that is inlined as a
/// data URI
async fn resolve_fill(value: &str) -> Result<Fill> {
    if is_hex_color(value) {
        return Ok(Fill::Color(value.to_string()));
    }
    if value.starts_with("data:") {
        return Ok(Fill::Image(value.to_string()));
    }
    let data_uri = zine_runtime::load_image_data_uri(value)
        .await
        .with_context(|| format!("'{}' is neither a hex color nor a readable image", value))?;
    Ok(Fill::Image(data_uri))
}

async fn apply_edit(session: &mut ZineSession, action: EditAction) -> Result<()> {
    match action {
        EditAction::Text {
            page,
            text,
            secondary,
        } => {
            if secondary {
                if !session.set_secondary_text(page, &text) {
                    bail!("Page {} has no overflow text; switch it to center first", page);
                }
            } else if !session.set_text(page, &text) {
                bail!("Page {} not found", page);
            }
        }
        EditAction::Position { page, position } => {
            session.set_position(page, position.into());
        }
        EditAction::Font { page, font } => {
            session.set_font(page, font.into());
        }
        EditAction::Background { surface, fill } => {
            session.set_background(surface, resolve_fill(&fill).await?);
        }
        EditAction::Track {
            page,
            title,
            artist,
        } => {
            let track = Track {
                title,
                artist: Artist {
                    name: artist,
                    ..Default::default()
                },
                ..Default::default()
            };
            session.select_track(page, track);
        }
        EditAction::Decorate { surface, element } => {
            let entry = find_entry(&element)
                .with_context(|| format!("Unknown decoration '{}'", element))?;
            if let Some(placed) = session.add_decoration(surface, entry) {
                println!("Placed {} as {}", entry.name, placed.id);
            }
        }
        EditAction::Undecorate { surface, id } => {
            if session.remove_decoration(surface, &id).is_none() {
                bail!("{} has no decoration {}", surface.label(), id);
            }
        }
        EditAction::Move {
            surface,
            id,
            x,
            y,
            resize,
        } => {
            let mode = if resize {
                GrabMode::Resize
            } else {
                GrabMode::Drag
            };
            if !session.pointer_down(surface, &id, mode) {
                bail!("{} has no decoration {}", surface.label(), id);
            }
            session.pointer_move(x, y);
            session.pointer_up();
        }
        EditAction::Title { text, back } => {
            if back {
                session.set_back_title(&text);
            } else {
                session.set_cover_title(&text);
            }
        }
    }
    Ok(())
}

fn fill_label(fill: &Fill) -> &str {
    if fill.is_image() { "image" } else { fill.as_str() }
}

fn show_zine(zine: &Zine) {
    println!("{} ({})", zine.title, zine.id);
    println!(
        "  created {}, modified {}",
        zine.date_created.format("%Y-%m-%d %H:%M"),
        zine.date_modified.format("%Y-%m-%d %H:%M")
    );

    let mut viewer = ZineViewer::new();
    loop {
        println!();
        println!("[{}] {}", viewer.indicator(), viewer.title());
        match viewer.surface() {
            Surface::Page(number) => {
                if let Some(page) = zine.page_data.get(&number) {
                    println!("  layout: {}, font: {}", page.position, page.font.family());
                    println!("  background: {}", fill_label(&page.background));
                    if !page.primary_text().is_empty() {
                        println!("  text: {}", page.primary_text());
                    }
                    if let Some(extra) = page.secondary_text().filter(|t| !t.is_empty()) {
                        println!("  more: {}", extra);
                    }
                    if let Some(title) = page.visible_song_title() {
                        println!("  song: {}", title);
                    }
                    println!("  decorations: {}", page.decorations.len());
                }
            }
            Surface::FrontCover => {
                let cover = &zine.cover_data;
                println!("  background: {}", fill_label(&cover.selected_color));
                println!("  decorations: {}", cover.front_decorations.len());
            }
            Surface::BackCover => {
                let cover = &zine.cover_data;
                println!("  title: {}", cover.back_title_text());
                println!("  background: {}", fill_label(&cover.back_fill()));
                println!("  decorations: {}", cover.back_decorations.len());
            }
        }
        if let Some(track) = viewer.track_to_preview(&zine.page_data) {
            println!(
                "  plays: {} ({}, first {}s)",
                track.display_name(),
                track.duration_string(),
                PREVIEW_LIMIT_SECS
            );
        }

        if viewer.is_last() {
            break;
        }
        viewer.next();
    }
}

fn cell_label(cell: &PrintCell) -> String {
    let name = match &cell.content {
        CellContent::Cover(cover) if !cover.title.is_empty() => {
            format!("{}: {}", cell.surface.label(), cover.title)
        }
        _ => cell.surface.label(),
    };
    match cell.rotation.degrees() {
        0 => name,
        degrees => format!("{} ({}°)", name, degrees),
    }
}

fn print_sheet_text(sheet: &PrintSheet) {
    println!(
        "Sheet {:.1} x {:.1} mm, scale {}",
        sheet.paper_mm.0, sheet.paper_mm.1, sheet.transform.scale
    );
    for row in 0..sheet.grid.rows {
        let labels: Vec<String> = sheet
            .row(row)
            .map(|cell| format!(" {:<24}", cell_label(cell)))
            .collect();
        println!("|{}|", labels.join("|"));
    }

    if !sheet.marks.is_empty() {
        println!("Marks:");
        for mark in &sheet.marks {
            println!(
                "  {:?} ({:.1}, {:.1}) -> ({:.1}, {:.1}) mm",
                mark.kind, mark.from_mm.0, mark.from_mm.1, mark.to_mm.0, mark.to_mm.1
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    AppLogger::new(cli.verbose).init()?;

    let mut store = ZineStore::open(FileStorage::new(&cli.store));
    log::debug!("Using store at {}", cli.store.display());

    match cli.command {
        Commands::List => {
            if store.list_all().is_empty() {
                println!("No saved zines");
            }
            for zine in store.list_all() {
                println!(
                    "{}  {:<30}  {}",
                    zine.id,
                    zine.title,
                    zine.date_modified.format("%Y-%m-%d %H:%M")
                );
            }
        }

        Commands::New { title } => {
            let mut session = ZineSession::new();
            session.set_cover_title(&title);
            let id = session.save_to(&mut store);
            println!("Created {}", id);
        }

        Commands::Show { id } => show_zine(find_zine(&store, &id)?),

        Commands::Edit { id, action } => {
            let mut session = open_session(&store, &id)?;
            apply_edit(&mut session, action).await?;
            let id = session.save_to(&mut store);
            println!("Updated {}", id);
        }

        Commands::Delete { id } => {
            if !store.delete(&id) {
                bail!("No saved zine with id {}", id);
            }
            println!("Deleted {}", id);
        }

        Commands::Print { id, format } => {
            let options = load_options(cli.options.as_deref()).await?;
            let zine = find_zine(&store, &id)?;
            let sheet = compose_print_sheet_with(&zine.cover_data, &zine.page_data, &options)?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sheet)?),
                OutputFormat::Text => print_sheet_text(&sheet),
            }
        }

        Commands::Stats { id } => {
            let zine = find_zine(&store, &id)?;
            let stats = calculate_statistics(&zine.cover_data, &zine.page_data);
            println!("Zine Statistics:");
            println!("  Pages customized: {}", stats.pages_customized);
            println!("  Decorations: {}", stats.decorations);
            println!("  Tracks selected: {}", stats.tracks_selected);
            println!("  Characters: {}", stats.characters);
            println!("  Image backgrounds: {}", stats.image_backgrounds);
        }

        Commands::Decorations => {
            for category in Category::ALL {
                println!("{} {}", category.emoji(), category.name());
                for entry in entries_in(category) {
                    println!("  {:<14} {}  {}", entry.id, entry.symbol, entry.name);
                }
            }
        }

        Commands::Palette => {
            println!("Cover colors: {}", COVER_COLORS.join(" "));
            println!("Page colors:  {}", BACKGROUND_COLORS.join(" "));
        }

        Commands::InitOptions { path } => {
            PrintOptions::default().save(&path).await?;
            println!("Wrote default print options to {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_surface() {
        assert_eq!(parse_surface("front"), Ok(Surface::FrontCover));
        assert_eq!(parse_surface("Back"), Ok(Surface::BackCover));
        assert_eq!(parse_surface("4"), Ok(Surface::Page(4)));
        assert!(parse_surface("7").is_err());
        assert!(parse_surface("middle").is_err());
    }

    #[test]
    fn test_cli_parses_edit() {
        let cli = Cli::try_parse_from([
            "zine", "--store", "/tmp/z", "edit", "123", "position", "2", "no-song-box",
        ])
        .unwrap();
        let Commands::Edit { id, action } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "123");
        assert!(matches!(
            action,
            EditAction::Position {
                page: 2,
                position: PositionArg::NoSongBox
            }
        ));
    }

    #[test]
    fn test_page_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["zine", "edit", "1", "font", "9", "curlz"]).is_err());
    }

    #[tokio::test]
    async fn test_edits_apply_to_session() {
        let mut session = ZineSession::new();
        apply_edit(
            &mut session,
            EditAction::Position {
                page: 1,
                position: PositionArg::Center,
            },
        )
        .await
        .unwrap();
        apply_edit(
            &mut session,
            EditAction::Text {
                page: 1,
                text: "hello".to_string(),
                secondary: true,
            },
        )
        .await
        .unwrap();
        apply_edit(
            &mut session,
            EditAction::Background {
                surface: Surface::BackCover,
                fill: "#222222".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(session.page(1).unwrap().secondary_text(), Some("hello"));
        assert_eq!(
            session.cover().back_fill(),
            Fill::Color("#222222".to_string())
        );
    }

    #[tokio::test]
    async fn test_secondary_text_needs_center() {
        let mut session = ZineSession::new();
        let result = apply_edit(
            &mut session,
            EditAction::Text {
                page: 3,
                text: "overflow".to_string(),
                secondary: true,
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unknown_decoration_rejected() {
        let mut session = ZineSession::new();
        let result = apply_edit(
            &mut session,
            EditAction::Decorate {
                surface: Surface::FrontCover,
                element: "unicorn".to_string(),
            },
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_background_rejects_unknown_values() {
        let mut session = ZineSession::new();
        for fill in ["red", "pic.png", "#12"] {
            let result = apply_edit(
                &mut session,
                EditAction::Background {
                    surface: Surface::FrontCover,
                    fill: fill.to_string(),
                },
            )
            .await;
            assert!(result.is_err(), "{} should be rejected", fill);
        }
        assert_eq!(session.cover().selected_color, Fill::white());
    }

    #[tokio::test]
    async fn test_background_image_file_is_inlined() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let fill = resolve_fill(path.to_str().unwrap()).await.unwrap();
        let Fill::Image(uri) = fill else {
            panic!("expected an image fill");
        };
        assert!(uri.starts_with("data:image/png;base64,"));

        let passthrough = resolve_fill("data:image/jpeg;base64,AAAA").await.unwrap();
        assert_eq!(passthrough, Fill::Image("data:image/jpeg;base64,AAAA".to_string()));
    }
}
