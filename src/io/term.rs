//! Terminal output helpers.

use ansi_term::Colour;
use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use std::fmt::Display;

/// Width of banners and centered messages.
pub const WIDTH: usize = 53;

pub const HEAVY_RULE: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
pub const LIGHT_RULE: &str =
    "─────────────────────────────────────────────────────";

/// Clear the terminal and move the cursor home.
pub fn clear_screen() -> Result<()> {
    execute!(std::io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
        .context("clearing terminal")
}

fn centered(text: impl Display) -> String {
    format!("{:^width$}", text.to_string(), width = WIDTH)
}

pub fn success(message: impl Display) {
    println!("{}", Colour::Green.paint(centered(format!("✅ {message}"))));
}

pub fn error(message: impl Display) {
    println!("{}", Colour::Red.paint(centered(format!("❌ {message}"))));
}

pub fn warning(message: impl Display) {
    println!("{}", Colour::Yellow.paint(centered(format!("⚠️ {message}"))));
}

pub fn info(message: impl Display) {
    println!("{}", Colour::Blue.paint(centered(format!("💡 {message}"))));
}

/// Print a banner with a title and optional subtitle.
pub fn header(title: impl Display, subtitle: Option<&str>) {
    println!("\n{HEAVY_RULE}");
    println!("{}", Colour::Cyan.paint(centered(format!("🚀 {title}"))));
    if let Some(subtitle) = subtitle {
        println!("{}", Colour::Yellow.paint(centered(subtitle)));
    }
    println!("{HEAVY_RULE}\n");
}

/// Print a numbered list, optionally followed by a cancel entry.
pub fn numbered<T: Display>(items: &[T], with_cancel: bool) {
    println!("{LIGHT_RULE}");
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    if with_cancel {
        println!("{}. Cancel", items.len() + 1);
    }
    println!("{LIGHT_RULE}");
}
