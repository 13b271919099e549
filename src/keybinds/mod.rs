//! Key-binding persistence.
//!
//! Bindings map an action name to a [`KeyCombo`] and live in a small JSON
//! file (`kb.json`). On first run the file does not exist yet; the store then
//! seeds it from a set of defaults, which are normally compiled into the
//! binary.
//!
//! Edits go through [`KeyBindStore::apply_edits`], which validates every
//! proposed key before touching anything.

pub mod error;

pub use error::KeyBindError;

use crate::constants::{HOME_ENV_VAR, KEYBINDS_DIR_NAME, KEYBINDS_FILE_NAME, UNIX_HOME_DIR_NAME};
use crate::models::KeyCombo;
use indexmap::IndexMap;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Action name to key combination, in file order.
pub type KeyBindMap = IndexMap<String, KeyCombo>;

/// Default bindings shipped with the binary.
pub const BUNDLED_DEFAULTS: &str = include_str!("../../resources/keybinds/kb.json");

static KEY_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z0-9]|F[1-9]|F1[0-2])$").unwrap());

/// Where first-run defaults come from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultsSource {
    /// [`BUNDLED_DEFAULTS`]
    #[default]
    Bundled,
    /// A JSON document given as text
    Inline(String),
    /// A JSON file on disk; a missing file counts as no defaults
    File(PathBuf),
    /// No defaults at all
    None,
}

impl DefaultsSource {
    fn read(&self) -> Result<Option<Cow<'_, str>>, KeyBindError> {
        match self {
            Self::Bundled => Ok(Some(Cow::Borrowed(BUNDLED_DEFAULTS))),
            Self::Inline(text) => Ok(Some(Cow::Borrowed(text))),
            Self::File(path) => match fs::read_to_string(path) {
                Ok(text) => Ok(Some(Cow::Owned(text))),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(KeyBindError::load_failed(path.display(), e)),
            },
            Self::None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Bundled | Self::Inline(_) => "bundled defaults".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::None => "no defaults".to_string(),
        }
    }
}

/// Where the loaded bindings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The user's `kb.json`
    LocalFile,
    /// The defaults, which were then written out as `kb.json`
    BundledDefaults,
}

/// Lifecycle of a [`KeyBindStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing loaded yet, or the last load failed
    #[default]
    Unloaded,
    /// Bindings are in memory
    Loaded(LoadOrigin),
}

/// Outcome of [`KeyBindStore::load`].
#[derive(Debug)]
pub struct LoadReport {
    /// The bindings now held by the store; empty when loading failed
    pub bindings: KeyBindMap,
    /// Source of the bindings, `None` when nothing could be loaded
    pub origin: Option<LoadOrigin>,
    /// Conditions to show the user
    pub problems: Vec<KeyBindError>,
}

impl LoadReport {
    /// True when no condition was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// One proposed change coming from the editing UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEdit {
    /// Raw key text as typed
    pub key: String,
    /// Shift modifier checkbox
    pub shift: bool,
}

impl KeyEdit {
    /// Creates an edit.
    #[must_use]
    pub fn new(key: impl Into<String>, shift: bool) -> Self {
        Self {
            key: key.into(),
            shift,
        }
    }

    /// The key token after trimming and upper-casing.
    #[must_use]
    pub fn normalized_key(&self) -> String {
        self.key.trim().to_uppercase()
    }
}

/// Loads, edits and saves the key-binding file.
#[derive(Debug)]
pub struct KeyBindStore {
    local_file: PathBuf,
    defaults: DefaultsSource,
    bindings: KeyBindMap,
    state: LoadState,
}

impl KeyBindStore {
    /// Creates an unloaded store over `local_file`.
    #[must_use]
    pub fn new(local_file: impl Into<PathBuf>, defaults: DefaultsSource) -> Self {
        Self {
            local_file: local_file.into(),
            defaults,
            bindings: KeyBindMap::new(),
            state: LoadState::Unloaded,
        }
    }

    /// Store over the platform location with the bundled defaults.
    #[must_use]
    pub fn open_default() -> Self {
        Self::new(resolve_storage_path(), DefaultsSource::Bundled)
    }

    /// Path of the local `kb.json`.
    #[must_use]
    pub fn local_file(&self) -> &Path {
        &self.local_file
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// Bindings currently in memory.
    #[must_use]
    pub const fn bindings(&self) -> &KeyBindMap {
        &self.bindings
    }

    /// Binding for one action.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&KeyCombo> {
        self.bindings.get(action)
    }

    /// Loads the bindings.
    ///
    /// The local file wins when it exists. Otherwise the defaults are parsed
    /// and written out as the local file before being returned. Failures never
    /// abort: the store falls back to an empty mapping and the report lists
    /// what went wrong.
    pub fn load(&mut self) -> LoadReport {
        let mut problems = Vec::new();

        let (bindings, origin) = match self.read_bindings(&mut problems) {
            Ok((bindings, origin)) => (bindings, Some(origin)),
            Err(e) => {
                tracing::warn!("{}", e);
                problems.push(e);
                (KeyBindMap::new(), None)
            }
        };

        self.bindings = bindings.clone();
        self.state = origin.map_or(LoadState::Unloaded, LoadState::Loaded);

        LoadReport {
            bindings,
            origin,
            problems,
        }
    }

    /// Replaces every binding and writes the file.
    ///
    /// The in-memory mapping is updated even when the write fails.
    pub fn save(&mut self, bindings: KeyBindMap) -> Result<(), KeyBindError> {
        self.bindings = bindings;
        write_bindings(&self.local_file, &self.bindings)
    }

    /// Applies a batch of edits from the editing UI.
    ///
    /// Every key is trimmed and upper-cased, then validated. If any key is
    /// rejected nothing changes and the offending actions are returned in
    /// edit order. Otherwise each action is bound (new actions are appended)
    /// and the file is saved.
    pub fn apply_edits<I, S>(&mut self, edits: I) -> Result<(), KeyBindError>
    where
        I: IntoIterator<Item = (S, KeyEdit)>,
        S: Into<String>,
    {
        let edits: Vec<(String, KeyCombo)> = edits
            .into_iter()
            .map(|(action, edit)| (action.into(), KeyCombo::new(edit.normalized_key(), edit.shift)))
            .collect();

        let invalid: Vec<String> = edits
            .iter()
            .filter(|(_, combo)| !validate_proposed_key(&combo.key))
            .map(|(action, _)| action.clone())
            .collect();
        if !invalid.is_empty() {
            let err = KeyBindError::InvalidKeys { actions: invalid };
            tracing::warn!("{}", err);
            return Err(err);
        }

        let mut bindings = self.bindings.clone();
        bindings.extend(edits);
        self.save(bindings)
    }

    fn read_bindings(
        &self,
        problems: &mut Vec<KeyBindError>,
    ) -> Result<(KeyBindMap, LoadOrigin), KeyBindError> {
        if self.local_file.exists() {
            let content = fs::read_to_string(&self.local_file)
                .map_err(|e| KeyBindError::load_failed(self.local_file.display(), e))?;
            let bindings = parse_bindings(&content)
                .map_err(|e| KeyBindError::load_failed(self.local_file.display(), e))?;
            tracing::debug!(
                "Loaded {} key bindings from {}",
                bindings.len(),
                self.local_file.display()
            );
            return Ok((bindings, LoadOrigin::LocalFile));
        }

        let content = self
            .defaults
            .read()?
            .ok_or(KeyBindError::DefaultsUnavailable)?;
        let bindings = parse_bindings(&content)
            .map_err(|e| KeyBindError::load_failed(self.defaults.describe(), e))?;
        tracing::debug!("Seeding {} from {}", self.local_file.display(), self.defaults.describe());

        if let Err(e) = write_bindings(&self.local_file, &bindings) {
            problems.push(e);
        }
        Ok((bindings, LoadOrigin::BundledDefaults))
    }
}

/// Returns true if `raw` is a single `A`-`Z`/`0`-`9` character or `F1`-`F12`.
///
/// The match is exact and case-sensitive; callers upper-case first.
///
/// ```
/// use digital_prefs::keybinds::validate_proposed_key;
///
/// assert!(validate_proposed_key("F12"));
/// assert!(!validate_proposed_key("Shift"));
/// ```
#[must_use]
pub fn validate_proposed_key(raw: &str) -> bool {
    KEY_TOKEN.is_match(raw)
}

/// Location of the local `kb.json`.
///
/// `$DIGITAL_HOME/keybinds/kb.json` when the variable is set, otherwise
/// `%APPDATA%\Digital\keybinds\kb.json` on Windows and
/// `~/.digital/keybinds/kb.json` elsewhere. The directory is created if
/// needed; failing to create it is only logged.
#[must_use]
pub fn resolve_storage_path() -> PathBuf {
    let dir = storage_root().join(KEYBINDS_DIR_NAME);
    if let Err(e) = fs::create_dir_all(&dir) {
        tracing::warn!("Could not create {}: {}", dir.display(), e);
    }
    dir.join(KEYBINDS_FILE_NAME)
}

fn storage_root() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(home);
    }
    platform_root().unwrap_or_else(|| PathBuf::from(UNIX_HOME_DIR_NAME))
}

#[cfg(windows)]
fn platform_root() -> Option<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
        .map(|dir| dir.join(crate::constants::CONFIG_DIR_NAME))
}

#[cfg(not(windows))]
fn platform_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(UNIX_HOME_DIR_NAME))
}

fn parse_bindings(content: &str) -> Result<KeyBindMap, serde_json::Error> {
    serde_json::from_str(content)
}

fn write_bindings(path: &Path, bindings: &KeyBindMap) -> Result<(), KeyBindError> {
    match try_write_bindings(path, bindings) {
        Ok(()) => {
            tracing::debug!("Saved {} key bindings to {}", bindings.len(), path.display());
            Ok(())
        }
        Err(e) => {
            tracing::warn!("{}", e);
            Err(e)
        }
    }
}

fn try_write_bindings(path: &Path, bindings: &KeyBindMap) -> Result<(), KeyBindError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| KeyBindError::io(dir, e))?;
    }

    let mut content = serde_json::to_string_pretty(bindings)?;
    content.push('\n');

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(|e| KeyBindError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        KeyBindError::io(path, e)
    })
}
