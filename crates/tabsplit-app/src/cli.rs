use clap::{Parser, Subcommand};
use tabsplit_common::types::Rect;

/// Tabsplit: split a tab into side-by-side original and translated windows.
#[derive(Parser, Debug)]
#[command(name = "tabsplit", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the split layout for a window as JSON.
    Layout {
        /// Window bounds as LEFT,TOP,WIDTH,HEIGHT.
        #[arg(long, value_parser = parse_rect)]
        window: Rect,

        /// Monitor work area as LEFT,TOP,WIDTH,HEIGHT. Repeat for each display.
        #[arg(long = "monitor", value_parser = parse_rect)]
        monitors: Vec<Rect>,
    },

    /// Print the translate URL for a page.
    Url {
        url: String,

        /// Target language code. Defaults to the configured language.
        #[arg(long)]
        lang: Option<String>,
    },

    /// Run a split against an in-memory browser and print what happened.
    Simulate {
        /// URL of the page to split.
        #[arg(long, default_value = "https://example.com/")]
        url: String,

        /// Target language code. Omit to use the stored preference.
        #[arg(long)]
        lang: Option<String>,

        /// Bounds of the window holding the page.
        #[arg(long, value_parser = parse_rect, default_value = "0,0,1920,1080")]
        window: Rect,

        /// Monitor work area. Repeat for each display.
        #[arg(long = "monitor", value_parser = parse_rect)]
        monitors: Vec<Rect>,

        /// Redirect the duplicate to this URL once it loads.
        #[arg(long)]
        redirect: Option<String>,
    },

    /// Print the effective configuration as JSON.
    Config,
}

pub fn parse() -> Args {
    Args::parse()
}

/// Parse `LEFT,TOP,WIDTH,HEIGHT`.
pub fn parse_rect(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [left, top, width, height] = parts.as_slice() else {
        return Err(format!("expected LEFT,TOP,WIDTH,HEIGHT, got '{s}'"));
    };
    let num = |v: &str| {
        v.parse::<i32>()
            .map_err(|e| format!("invalid number '{v}': {e}"))
    };
    Ok(Rect::new(num(left)?, num(top)?, num(width)?, num(height)?))
}
