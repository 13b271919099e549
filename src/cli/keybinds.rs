//! Key-binding commands.

use crate::cli::common::{load_keybinds, CliError, CliResult};
use crate::keybinds::{resolve_storage_path, validate_proposed_key, KeyEdit};
use crate::models::key_combo::SHIFT_PREFIX;
use clap::{Args, Subcommand};

/// Key-binding commands
#[derive(Args, Debug)]
pub struct KeybindsArgs {
    #[command(subcommand)]
    command: KeybindsCommand,
}

#[derive(Subcommand, Debug)]
enum KeybindsCommand {
    /// Display the current key bindings
    Show(KeybindsShowArgs),
    /// Bind actions to keys
    Set(KeybindsSetArgs),
    /// Check whether a key is accepted for a binding
    Validate(KeybindsValidateArgs),
    /// Print the location of the key-binding file
    Path,
}

/// Display the current key bindings
#[derive(Args, Debug)]
pub struct KeybindsShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Bind actions to keys
#[derive(Args, Debug)]
pub struct KeybindsSetArgs {
    /// Assignments such as `Delete=X` or `Redo=Shift+Z`
    #[arg(value_name = "ACTION=KEY", required = true)]
    assignments: Vec<String>,
}

/// Check whether a key is accepted for a binding
#[derive(Args, Debug)]
pub struct KeybindsValidateArgs {
    /// Key token (A-Z, 0-9, F1-F12)
    #[arg(value_name = "KEY")]
    key: String,
}

impl KeybindsArgs {
    /// Execute keybinds subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            KeybindsCommand::Show(args) => args.execute(),
            KeybindsCommand::Set(args) => args.execute(),
            KeybindsCommand::Validate(args) => args.execute(),
            KeybindsCommand::Path => {
                println!("{}", resolve_storage_path().display());
                Ok(())
            }
        }
    }
}

impl KeybindsShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let store = load_keybinds()?;

        if self.json {
            let json = serde_json::to_string_pretty(store.bindings())
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            let width = store
                .bindings()
                .keys()
                .map(String::len)
                .max()
                .unwrap_or_default();
            for (action, combo) in store.bindings() {
                println!("{action:<width$}  {combo}");
            }
        }

        Ok(())
    }
}

impl KeybindsSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        let edits = self
            .assignments
            .iter()
            .map(|assignment| parse_assignment(assignment))
            .collect::<CliResult<Vec<_>>>()?;

        let mut store = load_keybinds()?;
        let count = edits.len();
        store.apply_edits(edits)?;

        println!(
            "Updated {} key binding{}.",
            count,
            if count == 1 { "" } else { "s" }
        );
        Ok(())
    }
}

impl KeybindsValidateArgs {
    /// Execute validate command
    pub fn execute(&self) -> CliResult<()> {
        let key = self.key.trim().to_uppercase();

        if validate_proposed_key(&key) {
            println!("✓ {key} is a valid key");
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "'{}' is not a valid key. Use A-Z, 0-9 or F1-F12",
                self.key
            )))
        }
    }
}

/// Splits `ACTION=KEY` into an action and an edit; `KEY` may carry a
/// `Shift+` prefix in any case.
fn parse_assignment(assignment: &str) -> CliResult<(String, KeyEdit)> {
    let (action, key) = assignment.split_once('=').ok_or_else(|| {
        CliError::validation(format!(
            "Invalid assignment '{assignment}'. Expected ACTION=KEY"
        ))
    })?;

    let action = action.trim();
    if action.is_empty() {
        return Err(CliError::validation(format!(
            "Invalid assignment '{assignment}'. Action name is empty"
        )));
    }

    let key = key.trim();
    let edit = match key.get(..SHIFT_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(SHIFT_PREFIX) => {
            KeyEdit::new(&key[SHIFT_PREFIX.len()..], true)
        }
        _ => KeyEdit::new(key, false),
    };

    Ok((action.to_string(), edit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (action, edit) = parse_assignment("Delete=x").unwrap();
        assert_eq!(action, "Delete");
        assert_eq!(edit, KeyEdit::new("x", false));

        let (action, edit) = parse_assignment(" Redo = shift+z ").unwrap();
        assert_eq!(action, "Redo");
        assert_eq!(edit, KeyEdit::new("z", true));
    }

    #[test]
    fn test_parse_assignment_rejects_malformed() {
        assert!(matches!(
            parse_assignment("Delete"),
            Err(CliError::Validation(_))
        ));
        assert!(matches!(parse_assignment("=X"), Err(CliError::Validation(_))));
    }

    #[test]
    fn test_shift_without_key_stays_invalid() {
        // "Shift" alone is a bare token, not a prefix.
        let (_, edit) = parse_assignment("Redo=Shift").unwrap();
        assert!(!edit.shift);
        assert!(!validate_proposed_key(&edit.normalized_key()));
    }
}
