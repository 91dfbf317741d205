//! Layered session defaults for the RDM builder.
//!
//! Precedence, per kind (`ssh`, `rdp`, `web`, `credential`, `host`):
//!
//! | field                         | row            | `excel` layer          | `raw` layer            |
//! |-------------------------------|----------------|------------------------|------------------------|
//! | name                          | always         | never                  | may overwrite `Name`   |
//! | row-settable fields           | wins non-empty | fills empty/absent     | may overwrite the key  |
//! | structural blocks (`RDP`, …)  | —              | —                      | forced                 |
//!
//! The `excel` layer is merged into the row *before* the connection object
//! is built; the `raw` layer is overlaid onto the finished object.

use serde_json::{Map, Value};

use indexmap::IndexMap;

use super::error::{MakerError, MakerResult};
use super::settings::{DefaultLayers, Settings};
use super::types::DefaultsKind;

/// Row fields whose values are folder paths or path-qualified references.
pub const PATH_KEYS: &[&str] = &["folder", "rdm_credential", "rdm_host"];

/// Forward slashes become backslashes.
pub fn normalize_path(path: &str) -> String {
    path.replace('/', "\\")
}

/// Normalize every string stored under one of `keys`, at any depth.
pub fn normalize_paths(map: &mut Map<String, Value>, keys: &[&str]) {
    for (key, value) in map.iter_mut() {
        match value {
            Value::Object(inner) => normalize_paths(inner, keys),
            Value::String(s) if keys.contains(&key.as_str()) => *s = normalize_path(s),
            _ => {}
        }
    }
}

/// Fill `row` from `defaults`: a default is taken where the row has no value
/// or an empty string; nested objects merge key by key.
pub fn fill_empty(row: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, default) in defaults {
        let take_default = match row.get_mut(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Object(inner)) => {
                if let Value::Object(inner_default) = default {
                    fill_empty(inner, inner_default);
                }
                false
            }
            Some(_) => false,
        };
        if take_default {
            row.insert(key.clone(), default.clone());
        }
    }
}

/// Merge `fragment` into `target`; nested objects merge recursively, any
/// other value replaces what was there.
pub fn deep_merge(target: &mut Map<String, Value>, fragment: Map<String, Value>) {
    for (key, value) in fragment {
        match value {
            Value::Object(incoming) => match target.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, incoming),
                _ => {
                    target.insert(key, Value::Object(incoming));
                }
            },
            value => {
                target.insert(key, value);
            }
        }
    }
}

/// Text of a field, with numbers and booleans stringified and `""` for
/// anything absent or structured.
pub fn field_str(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

// ─── Default sets ───────────────────────────────────────────────────

/// All default layers, keyed by kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDefaults {
    kinds: IndexMap<String, DefaultLayers>,
}

impl SessionDefaults {
    pub fn new(kinds: IndexMap<String, DefaultLayers>) -> Self {
        let mut defaults = Self { kinds };
        for layers in defaults.kinds.values_mut() {
            normalize_paths(&mut layers.excel, PATH_KEYS);
        }
        defaults
    }

    /// Defaults from the settings: entries from `rdm.session_defaults_file`
    /// first, then the inline `rdm.session_defaults` on top, key by key.
    pub fn from_settings(settings: &Settings) -> MakerResult<Self> {
        let mut kinds: IndexMap<String, DefaultLayers> = IndexMap::new();

        if let Some(file) = &settings.rdm.session_defaults_file {
            let path = settings.resolve_path(file);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                MakerError::Config(format!(
                    "Unable to read session defaults '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            if !content.trim().is_empty() {
                kinds = serde_yaml::from_str(&content).map_err(|e| {
                    MakerError::Config(format!("'{}': {}", path.display(), e))
                })?;
            }
            log::info!("Loading session defaults '{}'.", path.display());
        }

        for (kind, inline) in &settings.rdm.session_defaults {
            let layers = kinds.entry(kind.clone()).or_default();
            layers.raw.extend(inline.raw.clone());
            layers.excel.extend(inline.excel.clone());
        }

        Ok(Self::new(kinds))
    }

    /// Layers for `kind`; empty when the kind has none.
    pub fn layers(&self, kind: DefaultsKind) -> DefaultLayers {
        self.kinds.get(kind.as_str()).cloned().unwrap_or_default()
    }

    /// Row fields merged with the `excel` layer of `kind`. Path fields are
    /// normalized before merging.
    pub fn merge(&self, kind: DefaultsKind, row: &Map<String, Value>) -> Map<String, Value> {
        let mut merged = row.clone();
        normalize_paths(&mut merged, PATH_KEYS);
        if let Some(layers) = self.kinds.get(kind.as_str()) {
            fill_empty(&mut merged, &layers.excel);
        }
        merged
    }

    /// Force the `raw` layer of `kind` onto a built object, top-level key by
    /// top-level key.
    pub fn overlay_raw(&self, kind: DefaultsKind, object: &mut Map<String, Value>) {
        if let Some(layers) = self.kinds.get(kind.as_str()) {
            for (key, value) in &layers.raw {
                object.insert(key.clone(), value.clone());
            }
        }
    }
}
