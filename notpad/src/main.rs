//! notpad - A small markdown notepad for the terminal

use anyhow::{bail, Context, Result};
use clap::Parser;
use notpad_core::{html, Config, Document, ThemeVariant};
use notpad_tui::App;
use std::path::PathBuf;

/// A small markdown notepad with live preview
#[derive(Parser, Debug)]
#[command(name = "notpad")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Markdown file to edit (created if it does not exist)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Theme for this session: light or dark
    #[arg(long, value_name = "THEME")]
    theme: Option<ThemeVariant>,

    /// Render FILE to a standalone HTML page and exit
    #[arg(long, value_name = "OUT")]
    html: Option<PathBuf>,

    /// Print the rendered spans of FILE as `tag<TAB>text` lines and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.html.is_some() || args.dump {
        return export(&args);
    }

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(theme) = args.theme {
        config.theme = theme;
    }

    let doc = match &args.file {
        Some(path) if path.exists() => Document::load(path)
            .with_context(|| format!("Failed to load document: {}", path.display()))?,
        Some(path) => Document::create(path)
            .with_context(|| format!("Failed to create document: {}", path.display()))?,
        None => Document::empty(),
    };
    log::info!("Starting with {}", doc.status_label());

    let app = App::new(config, doc);
    notpad_tui::run(app).context("TUI application error")?;

    Ok(())
}

/// Non-interactive output modes
fn export(args: &Args) -> Result<()> {
    let Some(path) = &args.file else {
        bail!("--html and --dump need a FILE");
    };
    let doc = Document::load(path)
        .with_context(|| format!("Failed to load document: {}", path.display()))?;
    let text = doc.text();
    let content = text.trim();

    if let Some(out) = &args.html {
        let page = html::to_html_document(&doc.title(), content);
        std::fs::write(out, page)
            .with_context(|| format!("Failed to write HTML: {}", out.display()))?;
        log::info!("Wrote {}", out.display());
    }

    if args.dump {
        for span in notpad_core::render(content) {
            println!("{}\t{}", span.tag, span.text.escape_debug());
        }
    }

    Ok(())
}
