use aha_core::router::View;
use aha_core::{AccentColor, Preferences, Session, VERSION};

use crate::cli::{SettingsCommands, ThemeChoice};
use crate::error::CliError;

pub fn run_settings(
    session: &mut Session,
    command: Option<SettingsCommands>,
) -> Result<Preferences, CliError> {
    session.navigate(View::Settings);

    match command.unwrap_or(SettingsCommands::Show) {
        SettingsCommands::Show => print_preferences(session.preferences()),
        SettingsCommands::Theme { mode } => {
            let dark_mode = match mode {
                ThemeChoice::Dark => {
                    session.set_dark_mode(true)?;
                    true
                }
                ThemeChoice::Light => {
                    session.set_dark_mode(false)?;
                    false
                }
                ThemeChoice::Toggle => session.toggle_dark_mode()?,
            };
            println!("theme: {}", theme_label(dark_mode));
        }
        SettingsCommands::Accent { key: None } => {
            for line in format_palette(session.preferences().accent) {
                println!("{line}");
            }
        }
        SettingsCommands::Accent { key: Some(key) } => {
            let accent = session.set_accent_key(&key)?;
            println!("accent: {accent}");
        }
    }

    Ok(session.preferences())
}

fn print_preferences(preferences: Preferences) {
    println!("theme: {}", theme_label(preferences.dark_mode));
    println!(
        "accent: {} ({})",
        preferences.accent.name(),
        preferences.accent.key()
    );
    println!("version: {VERSION}");
}

pub const fn theme_label(dark_mode: bool) -> &'static str {
    if dark_mode {
        "dark"
    } else {
        "light"
    }
}

pub fn format_palette(current: AccentColor) -> Vec<String> {
    AccentColor::ALL
        .iter()
        .map(|accent| {
            let marker = if *accent == current { "*" } else { " " };
            format!(
                "{marker} {:<7} {:<7} {}",
                accent.key(),
                accent.name(),
                accent.hsl()
            )
        })
        .collect()
}
