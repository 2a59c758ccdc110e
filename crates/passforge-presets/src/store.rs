//! Policy presets, stored as plain JSON in the data directory.
//!
//! Presets are not secret: they describe *how* to generate, never a
//! generated value.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use passforge_core::policy::{ClassSelection, GenerationPolicy, RequirementsPolicy, Strategy};
use passforge_core::Generator;

use crate::error::PresetError;

/// File name of the store inside the data directory.
pub const PRESETS_FILE: &str = "presets.json";

const FORMAT_VERSION: u32 = 1;
const MAX_NAME_LEN: usize = 64;

// ── Preset ─────────────────────────────────────────────────────────

/// A reusable generation policy with optional requirements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Short human description.
    #[serde(default)]
    pub description: String,

    pub generation: GenerationPolicy,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<RequirementsPolicy>,
}

impl Preset {
    /// Check that the preset can actually drive generation.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Engine`] if the policy or requirements are
    /// invalid, or the policy yields no usable alphabet.
    pub fn check(&self) -> Result<(), PresetError> {
        Generator::from_policy(&self.generation)?;
        if let Some(requirements) = &self.requirements {
            requirements.check()?;
        }
        Ok(())
    }
}

fn builtin_presets() -> BTreeMap<String, Preset> {
    let strong = Preset {
        description: "20 random characters from every class".into(),
        generation: GenerationPolicy::uniform(20),
        requirements: Some(RequirementsPolicy {
            min_length: 16,
            require_upper: true,
            require_lower: true,
            require_digit: true,
            require_symbol: true,
            ..RequirementsPolicy::default()
        }),
    };
    let pin = Preset {
        description: "6-digit PIN without repeated neighbours".into(),
        generation: GenerationPolicy {
            length: 6,
            classes: ClassSelection {
                upper: false,
                lower: false,
                digits: true,
                symbols: false,
            },
            strategy: Strategy::NoConsecutive,
            ..GenerationPolicy::default()
        },
        requirements: None,
    };
    let memorable = Preset {
        description: "Five random words joined by hyphens".into(),
        generation: GenerationPolicy::passphrase(5, '-'),
        requirements: None,
    };
    let pronounceable = Preset {
        description: "12 alternating consonants and vowels".into(),
        generation: GenerationPolicy {
            strategy: Strategy::Pronounceable,
            ..GenerationPolicy::uniform(12)
        },
        requirements: None,
    };
    let legacy = Preset {
        description: "Short, unambiguous password for systems with length caps".into(),
        generation: GenerationPolicy {
            exclude_similar: true,
            exclude_ambiguous: true,
            ..GenerationPolicy::uniform(14)
        },
        requirements: Some(RequirementsPolicy {
            min_length: 12,
            max_length: 16,
            require_upper: true,
            require_lower: true,
            require_digit: true,
            ..RequirementsPolicy::default()
        }),
    };

    [
        ("strong", strong),
        ("pin", pin),
        ("memorable", memorable),
        ("pronounceable", pronounceable),
        ("legacy-system", legacy),
    ]
    .into_iter()
    .map(|(name, preset)| (name.to_string(), preset))
    .collect()
}

// ── Store ──────────────────────────────────────────────────────────

/// Named presets, ordered by name.
///
/// Passed explicitly to whoever needs it; there is no process-wide
/// instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPresetStore {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    presets: BTreeMap<String, Preset>,
}

const fn default_version() -> u32 {
    FORMAT_VERSION
}

impl Default for PolicyPresetStore {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            presets: builtin_presets(),
        }
    }
}

fn check_name(name: &str) -> Result<(), PresetError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_NAME_LEN
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PresetError::InvalidName(name.to_string()))
    }
}

impl PolicyPresetStore {
    /// Store holding no presets at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: FORMAT_VERSION,
            presets: BTreeMap::new(),
        }
    }

    /// Load presets from `{data_dir}/presets.json`.
    ///
    /// Returns the built-in presets when the file is missing or contains
    /// invalid JSON (corrupt-file recovery). Stored presets that no longer
    /// pass [`Preset::check`] are dropped with a warning.
    #[must_use]
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(PRESETS_FILE);
        let Ok(contents) = fs::read_to_string(&path) else {
            return Self::default();
        };
        let mut store: Self = match serde_json::from_str(&contents) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring corrupt preset file: {e}");
                return Self::default();
            }
        };
        store.presets.retain(|name, preset| match preset.check() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(preset = %name, "dropping invalid preset: {e}");
                false
            }
        });
        store
    }

    /// Persist presets to `{data_dir}/presets.json`.
    ///
    /// Uses an atomic write pattern (write to `.tmp`, then rename) to
    /// prevent corruption from partial writes or crashes.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::Io`] if the directory does not exist or the
    /// file system rejects the write/rename.
    pub fn save(&self, data_dir: &Path) -> Result<(), PresetError> {
        let path = data_dir.join(PRESETS_FILE);
        let tmp = data_dir.join(".presets.json.tmp");

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&tmp, &json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp, &path)?;
        tracing::debug!(path = %path.display(), count = self.presets.len(), "presets saved");
        Ok(())
    }

    /// Look up a preset.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] for an unknown name.
    pub fn get(&self, name: &str) -> Result<&Preset, PresetError> {
        self.presets
            .get(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Insert or replace a preset, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// - [`PresetError::InvalidName`] for a malformed name.
    /// - [`PresetError::Engine`] if the preset fails [`Preset::check`].
    pub fn upsert(&mut self, name: &str, preset: Preset) -> Result<Option<Preset>, PresetError> {
        check_name(name)?;
        preset.check()?;
        Ok(self.presets.insert(name.to_string(), preset))
    }

    /// Remove a preset.
    ///
    /// # Errors
    ///
    /// Returns [`PresetError::NotFound`] for an unknown name.
    pub fn remove(&mut self, name: &str) -> Result<Preset, PresetError> {
        self.presets
            .remove(name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
