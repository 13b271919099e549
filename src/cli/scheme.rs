//! Color scheme commands.

use crate::cli::common::{open_settings, save_settings, CliError, CliResult};
use crate::models::{Color, ColorKey};
use crate::scheme::catalog::default_scheme;
use crate::scheme::{ActiveScheme, Scheme, SchemeRegistry, SchemeSelector, ThemeType};
use clap::{Args, Subcommand};
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Color scheme commands
#[derive(Args, Debug)]
pub struct SchemeArgs {
    #[command(subcommand)]
    command: SchemeCommand,
}

#[derive(Subcommand, Debug)]
enum SchemeCommand {
    /// List the available color schemes
    List,
    /// Display the colors of a scheme
    Show(SchemeShowArgs),
    /// Select the active color scheme
    Set(SchemeSetArgs),
    /// Edit the custom color scheme
    Custom(CustomArgs),
    /// List the colors a scheme overrides relative to the default scheme
    Diff(SchemeDiffArgs),
}

/// Display the colors of a scheme
#[derive(Args, Debug)]
pub struct SchemeShowArgs {
    /// Scheme name (default, dark, color_blind, custom); the active one if omitted
    #[arg(value_name = "NAME")]
    name: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Select the active color scheme
#[derive(Args, Debug)]
pub struct SchemeSetArgs {
    /// Scheme name (default, dark, color_blind, custom)
    #[arg(value_name = "NAME")]
    name: String,
}

/// List overridden colors
#[derive(Args, Debug)]
pub struct SchemeDiffArgs {
    /// Scheme name (default, dark, color_blind, custom)
    #[arg(value_name = "NAME")]
    name: String,
}

/// Edit the custom color scheme
#[derive(Args, Debug)]
pub struct CustomArgs {
    #[command(subcommand)]
    command: CustomCommand,
}

#[derive(Subcommand, Debug)]
enum CustomCommand {
    /// Set one color of the custom scheme
    Set(CustomSetArgs),
    /// Remove the custom scheme so it falls back to the default one
    Reset,
}

/// Set one color of the custom scheme
#[derive(Args, Debug)]
pub struct CustomSetArgs {
    /// Color key (e.g. background, wire_high)
    #[arg(value_name = "KEY")]
    key: String,

    /// Color as #RRGGBB or #RRGGBBAA
    #[arg(value_name = "HEX")]
    hex: String,
}

/// JSON form of a scheme
#[derive(Serialize, Debug)]
struct SchemeOutput {
    name: &'static str,
    display_name: &'static str,
    active: bool,
    theme: String,
    #[serde(rename = "type")]
    theme_type: ThemeType,
    colors: IndexMap<&'static str, String>,
}

impl SchemeArgs {
    /// Execute scheme subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            SchemeCommand::List => execute_list(),
            SchemeCommand::Show(args) => args.execute(),
            SchemeCommand::Set(args) => args.execute(),
            SchemeCommand::Custom(args) => args.execute(),
            SchemeCommand::Diff(args) => args.execute(),
        }
    }
}

fn execute_list() -> CliResult<()> {
    let registry = SchemeRegistry::new(open_settings()?);
    let selected = registry.settings().color_scheme();

    for (selector, scheme) in registry.list() {
        let marker = if selector == selected { "*" } else { " " };
        println!(
            "{} {:<12} {:<12} {}",
            marker,
            selector.id(),
            selector.display_name(),
            type_name(scheme.theme_type())
        );
    }

    Ok(())
}

impl SchemeShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let registry = SchemeRegistry::new(open_settings()?);
        let selected = registry.settings().color_scheme();
        let selector = match &self.name {
            Some(name) => parse_selector(name)?,
            None => selected,
        };
        let scheme = registry.resolve(selector);

        if self.json {
            let output = SchemeOutput {
                name: selector.id(),
                display_name: selector.display_name(),
                active: selector == selected,
                theme: scheme.theme().to_string(),
                theme_type: scheme.theme_type(),
                colors: scheme
                    .colors()
                    .map(|(key, color)| (key.id(), color.to_hex()))
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            println!("Scheme: {}", selector.display_name());
            println!(
                "Theme:  {} ({})",
                scheme.theme(),
                type_name(scheme.theme_type())
            );
            println!();
            print_colors(scheme.colors());
        }

        Ok(())
    }
}

impl SchemeSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let selector = parse_selector(&self.name)?;
        let settings = open_settings()?;

        settings.set_color_scheme(selector);
        save_settings(&settings)?;

        println!("Color scheme set to {}.", selector.display_name());
        Ok(())
    }
}

impl SchemeDiffArgs {
    /// Execute diff command
    pub fn execute(&self) -> CliResult<()> {
        let selector = parse_selector(&self.name)?;
        let registry = SchemeRegistry::new(open_settings()?);
        let scheme = registry.resolve(selector);
        let base = default_scheme();

        let overrides = scheme.diff_from(&base);
        if overrides.is_empty() {
            println!("{} matches the default scheme.", selector.display_name());
            return Ok(());
        }

        for (key, color) in overrides {
            println!(
                "{:<12} {} -> {}",
                key.label(),
                base.color(key).to_hex(),
                color.to_hex()
            );
        }
        Ok(())
    }
}

impl CustomArgs {
    /// Execute custom subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CustomCommand::Set(args) => args.execute(),
            CustomCommand::Reset => execute_reset(),
        }
    }
}

impl CustomSetArgs {
    /// Execute custom set command
    pub fn execute(&self) -> CliResult<()> {
        let key: ColorKey = self
            .key
            .parse()
            .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))?;
        let color = Color::from_hex(&self.hex)
            .map_err(|e| CliError::validation(format!("Invalid color: {e}")))?;

        let settings = open_settings()?;
        let active = ActiveScheme::new(Arc::clone(&settings));
        let edited: Scheme = active
            .registry()
            .resolve(SchemeSelector::Custom)
            .derive()
            .set(key, color)
            .build();

        active.update_custom_scheme(edited);
        save_settings(&settings)?;

        println!("Custom {} set to {}.", key.label(), color.to_hex());
        Ok(())
    }
}

fn execute_reset() -> CliResult<()> {
    let settings = open_settings()?;
    settings.clear_custom_color_scheme();
    save_settings(&settings)?;

    println!("Custom color scheme reset.");
    Ok(())
}

fn parse_selector(name: &str) -> CliResult<SchemeSelector> {
    name.parse()
        .map_err(|e: anyhow::Error| CliError::validation(e.to_string()))
}

const fn type_name(theme_type: ThemeType) -> &'static str {
    match theme_type {
        ThemeType::Light => "light",
        ThemeType::Dark => "dark",
    }
}

fn print_colors(colors: impl Iterator<Item = (ColorKey, Color)>) {
    for (key, color) in colors {
        println!("  {:<12} {}", key.label(), color.to_hex());
    }
}
