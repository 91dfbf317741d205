//! Session maker data types: sheet kinds with their column schemas, session
//! and connection type discriminants, and the spreadsheet boundary traits.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::MakerResult;
use super::table::Table;

/// Raw sheet as read from a workbook: header → cells, in sheet order.
pub type RawSheet = IndexMap<String, Vec<String>>;

/// Semantic key → external column header, in output order.
pub type ColumnNames = IndexMap<String, String>;

// ─── Sheet kinds ────────────────────────────────────────────────────

/// Required and optional semantic keys of one sheet, plus the anchor key
/// whose column gives the row count and names each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSchema {
    pub anchor: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl SheetSchema {
    /// All keys, required first.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.required.iter().chain(self.optional.iter()).copied()
    }
}

const SESSION_REQUIRED: &[&str] = &["session", "type", "hostname"];

/// Every sheet the maker and reader know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SheetKind {
    ScrtSessions,
    RdmSessions,
    ScrtCredentials,
    ScrtFirewalls,
    RdmCredentials,
    RdmHosts,
}

impl SheetKind {
    pub fn schema(&self) -> SheetSchema {
        match self {
            Self::ScrtSessions => SheetSchema {
                anchor: "session",
                required: SESSION_REQUIRED,
                optional: &[
                    "folder", "port", "username", "rdp_alternate",
                    "credential", "colorscheme", "keywords", "firewall",
                ],
            },
            Self::RdmSessions => SheetSchema {
                anchor: "session",
                required: SESSION_REQUIRED,
                optional: &[
                    "folder", "port", "username", "rdp_alternate",
                    "rdm_credential", "rdm_host", "rdm_script_before_open",
                    "rdm_web_form", "rdm_web_login", "rdm_web_passwd",
                ],
            },
            Self::ScrtCredentials => SheetSchema {
                anchor: "credential",
                required: &["credential"],
                optional: &["username"],
            },
            Self::ScrtFirewalls => SheetSchema {
                anchor: "firewall",
                required: &["firewall"],
                optional: &["address", "port", "username"],
            },
            Self::RdmCredentials => SheetSchema {
                anchor: "credential",
                required: &["credential"],
                optional: &["folder", "username"],
            },
            Self::RdmHosts => SheetSchema {
                anchor: "name",
                required: &["name"],
                optional: &["folder", "host", "rdm_credential"],
            },
        }
    }

    /// Human label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ScrtSessions | Self::RdmSessions => "sessions",
            Self::ScrtCredentials | Self::RdmCredentials => "credentials",
            Self::ScrtFirewalls => "firewalls",
            Self::RdmHosts => "hosts",
        }
    }
}

// ─── Session types ──────────────────────────────────────────────────

/// Protocol of a session row (`type` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Ssh,
    Rdp,
    Web,
}

impl SessionKind {
    /// Case-insensitive parse of a `type` cell; `None` for anything else.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ssh" => Some(Self::Ssh),
            "rdp" => Some(Self::Rdp),
            "web" => Some(Self::Web),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssh => "ssh",
            Self::Rdp => "rdp",
            Self::Web => "web",
        }
    }

    pub fn connection_type(&self) -> ConnectionType {
        match self {
            Self::Ssh => ConnectionType::Ssh,
            Self::Rdp => ConnectionType::Rdp,
            Self::Web => ConnectionType::Web,
        }
    }
}

/// RDM `ConnectionType` discriminants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    Rdp = 1,
    Folder = 25,
    Credential = 26,
    Web = 32,
    Host = 53,
    Ssh = 77,
}

impl ConnectionType {
    pub fn code(&self) -> u64 {
        *self as u64
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Rdp),
            25 => Some(Self::Folder),
            26 => Some(Self::Credential),
            32 => Some(Self::Web),
            53 => Some(Self::Host),
            77 => Some(Self::Ssh),
            _ => None,
        }
    }

    /// Only credentials and hosts may be the target of a link.
    pub fn is_link_target(&self) -> bool {
        matches!(self, Self::Credential | Self::Host)
    }
}

/// Key of a default-values section in the settings (`ssh`, `credential`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultsKind {
    Session(SessionKind),
    Credential,
    Host,
}

impl DefaultsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session(kind) => kind.as_str(),
            Self::Credential => "credential",
            Self::Host => "host",
        }
    }
}

// ─── Spreadsheet boundary ───────────────────────────────────────────

/// Anything sheets can be read from.
pub trait SheetSource {
    /// Read a sheet by name, first row as headers. `Ok(None)` when the
    /// workbook has no such sheet.
    fn read_sheet(&mut self, name: &str) -> MakerResult<Option<RawSheet>>;
}

/// Anything sheets can be written to.
pub trait SheetSink {
    /// Write `table` under `name`, one column per entry of `columns` in order,
    /// using the external header names.
    fn write_sheet(&mut self, name: &str, columns: &ColumnNames, table: &Table) -> MakerResult<()>;
}

/// In-memory workbook, mostly for tests and piping.
impl SheetSource for IndexMap<String, RawSheet> {
    fn read_sheet(&mut self, name: &str) -> MakerResult<Option<RawSheet>> {
        Ok(self.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_parse_is_loose() {
        assert_eq!(SessionKind::parse(" SSH "), Some(SessionKind::Ssh));
        assert_eq!(SessionKind::parse("Rdp"), Some(SessionKind::Rdp));
        assert_eq!(SessionKind::parse("telnet"), None);
    }

    #[test]
    fn test_connection_type_codes() {
        assert_eq!(ConnectionType::Folder.code(), 25);
        assert_eq!(ConnectionType::Credential.code(), 26);
        assert_eq!(ConnectionType::Rdp.code(), 1);
        assert_eq!(ConnectionType::Ssh.code(), 77);
        assert_eq!(ConnectionType::Web.code(), 32);
        assert_eq!(ConnectionType::Host.code(), 53);
        assert_eq!(ConnectionType::from_code(53), Some(ConnectionType::Host));
        assert!(ConnectionType::Host.is_link_target());
        assert!(!ConnectionType::Folder.is_link_target());
    }

    #[test]
    fn test_schema_keys_required_first() {
        let keys: Vec<_> = SheetKind::RdmHosts.schema().keys().collect();
        assert_eq!(keys, vec!["name", "folder", "host", "rdm_credential"]);
    }
}
