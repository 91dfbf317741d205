//! YAML configuration: sheet names, column headers, SecureCRT templates and
//! RDM session defaults. Every section has a usable default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use indexmap::IndexMap;

use super::error::{MakerError, MakerResult};
use super::types::{ColumnNames, SheetKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub excel: ExcelSettings,
    pub scrt: ScrtSettings,
    pub rdm: RdmSettings,
    /// Directory relative paths in the file are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

// ─── Excel ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcelSettings {
    pub tab_sessions: String,
    pub tab_scrt_credentials: String,
    pub tab_scrt_firewalls: String,
    pub tab_rdm_credentials: String,
    pub tab_rdm_hosts: String,
    pub col_names_sessions: ColumnNames,
    pub col_names_scrt_credentials: ColumnNames,
    pub col_names_scrt_firewalls: ColumnNames,
    pub col_names_rdm_credentials: ColumnNames,
    pub col_names_rdm_hosts: ColumnNames,
}

fn names(pairs: &[(&str, &str)]) -> ColumnNames {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

impl Default for ExcelSettings {
    fn default() -> Self {
        Self {
            tab_sessions: "sessions".into(),
            tab_scrt_credentials: "scrt-credentials".into(),
            tab_scrt_firewalls: "scrt-firewalls".into(),
            tab_rdm_credentials: "rdm-credentials".into(),
            tab_rdm_hosts: "rdm-hosts".into(),
            col_names_sessions: names(&[
                ("folder", "Folder"),
                ("session", "Session"),
                ("type", "Type"),
                ("hostname", "Hostname"),
                ("port", "Port"),
                ("username", "Username"),
                ("rdp_alternate", "RDP Alternate Shell"),
                ("credential", "SCRT Credential"),
                ("colorscheme", "SCRT Color Scheme"),
                ("keywords", "SCRT Keywords"),
                ("firewall", "SCRT Firewall"),
                ("rdm_credential", "RDM Credential"),
                ("rdm_host", "RDM Host"),
                ("rdm_script_before_open", "RDM Script Before Open"),
                ("rdm_web_form", "RDM Web Form"),
                ("rdm_web_login", "RDM Web Login"),
                ("rdm_web_passwd", "RDM Web Password"),
            ]),
            col_names_scrt_credentials: names(&[
                ("credential", "Credential"),
                ("username", "Username"),
            ]),
            col_names_scrt_firewalls: names(&[
                ("firewall", "Firewall"),
                ("address", "Address"),
                ("port", "Port"),
                ("username", "Username"),
            ]),
            col_names_rdm_credentials: names(&[
                ("folder", "Folder"),
                ("credential", "Credential"),
                ("username", "Username"),
            ]),
            col_names_rdm_hosts: names(&[
                ("folder", "Folder"),
                ("name", "Name"),
                ("host", "Host"),
                ("rdm_credential", "RDM Credential"),
            ]),
        }
    }
}

impl ExcelSettings {
    pub fn sheet_name(&self, kind: SheetKind) -> &str {
        match kind {
            SheetKind::ScrtSessions | SheetKind::RdmSessions => &self.tab_sessions,
            SheetKind::ScrtCredentials => &self.tab_scrt_credentials,
            SheetKind::ScrtFirewalls => &self.tab_scrt_firewalls,
            SheetKind::RdmCredentials => &self.tab_rdm_credentials,
            SheetKind::RdmHosts => &self.tab_rdm_hosts,
        }
    }

    pub fn column_names(&self, kind: SheetKind) -> &ColumnNames {
        match kind {
            SheetKind::ScrtSessions | SheetKind::RdmSessions => &self.col_names_sessions,
            SheetKind::ScrtCredentials => &self.col_names_scrt_credentials,
            SheetKind::ScrtFirewalls => &self.col_names_scrt_firewalls,
            SheetKind::RdmCredentials => &self.col_names_rdm_credentials,
            SheetKind::RdmHosts => &self.col_names_rdm_hosts,
        }
    }
}

// ─── SecureCRT ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrtSettings {
    pub template: ScrtTemplatePaths,
}

/// XML template files, one per entity kind. Unset entries fall back to
/// built-in skeletons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrtTemplatePaths {
    pub root: Option<PathBuf>,
    pub session: Option<PathBuf>,
    pub credential: Option<PathBuf>,
    pub firewall: Option<PathBuf>,
}

// ─── RDM ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RdmSettings {
    /// Optional YAML file with more `session_defaults` entries.
    pub session_defaults_file: Option<PathBuf>,
    /// Per kind (`ssh`, `rdp`, `web`, `credential`, `host`) default layers.
    pub session_defaults: IndexMap<String, DefaultLayers>,
}

/// The two default layers of one kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultLayers {
    /// Forced onto the built connection object, last.
    pub raw: Map<String, Value>,
    /// Fills row fields the sheet left empty.
    pub excel: Map<String, Value>,
}

// ─── Loading ────────────────────────────────────────────────────────

impl Settings {
    /// Parse settings from YAML text. An empty document gives the defaults.
    pub fn from_yaml(content: &str) -> MakerResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load the settings file; relative paths inside it resolve against
    /// the file's directory.
    pub fn load(path: &Path) -> MakerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            MakerError::Config(format!("Unable to read configuration file '{}': {}", path.display(), e))
        })?;
        let mut settings: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content)
                .map_err(|e| MakerError::Config(format!("'{}': {}", path.display(), e)))?
        };
        settings.base_dir = path.parent().map(Path::to_path_buf);
        log::info!("Loading config file '{}'.", path.display());
        Ok(settings)
    }

    /// Resolve a path named in the settings.
    pub fn resolve_path(&self, p: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }
}

/// `requested` when it names an existing file, `default` otherwise.
pub fn resolve_config_path(requested: Option<&Path>, default: &Path) -> PathBuf {
    match requested {
        Some(p) if p.is_file() => p.to_path_buf(),
        Some(p) => {
            log::info!(
                "Config file path '{}' is not valid. Reading '{}'.",
                p.display(),
                default.display()
            );
            default.to_path_buf()
        }
        None => default.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let s = Settings::from_yaml("").unwrap();
        assert_eq!(s.excel.tab_sessions, "sessions");
        assert_eq!(s.excel.col_names_sessions["hostname"], "Hostname");
        assert!(s.rdm.session_defaults.is_empty());
        assert!(s.scrt.template.root.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
excel:
  tab_sessions: devices
  col_names_rdm_hosts:
    name: Host Name
    host: Address
rdm:
  session_defaults:
    ssh:
      excel:
        port: "2222"
      raw:
        Terminal:
          FontSize: 12
"#;
        let s = Settings::from_yaml(yaml).unwrap();
        assert_eq!(s.excel.tab_sessions, "devices");
        assert_eq!(s.excel.tab_rdm_hosts, "rdm-hosts");
        let hosts = s.excel.column_names(SheetKind::RdmHosts);
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts.keys().next().map(String::as_str), Some("name"));
        let ssh = &s.rdm.session_defaults["ssh"];
        assert_eq!(ssh.excel["port"], "2222");
        assert_eq!(ssh.raw["Terminal"]["FontSize"], 12);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Settings::from_yaml("excel: [1, 2").unwrap_err();
        assert!(matches!(err, MakerError::Config(_)));
    }

    #[test]
    fn test_load_sets_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "scrt:\n  template:\n    session: tpl/session.xml\n").unwrap();

        let s = Settings::load(&path).unwrap();
        let tpl = s.scrt.template.session.clone().unwrap();
        assert_eq!(s.resolve_path(&tpl), dir.path().join("tpl/session.xml"));
    }

    #[test]
    fn test_resolve_config_path_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("mine.yaml");
        std::fs::write(&existing, "").unwrap();
        let default = Path::new("config.yaml");

        assert_eq!(resolve_config_path(Some(&existing), default), existing);
        assert_eq!(resolve_config_path(Some(Path::new("/nope/x.yaml")), default), default);
        assert_eq!(resolve_config_path(None, default), default);
    }
}
