//! Devolutions RDM connection list.
//!
//! One flat, append-only [`ConnectionList`] holds every object of the
//! export: folders (25), credentials (26), hosts (53) and sessions
//! (SSH 77, RDP 1, web 32). Builders thread the list explicitly; each call
//! appends at most one object (plus missing ancestor folders) and
//! structurally identical objects are never appended twice.
//!
//! Links between objects are folder-path + name strings resolved with
//! [`ConnectionList::lookup`] against objects appended *earlier*, so the
//! export order is credentials, then hosts, then sessions. A reference to an
//! object that is not in the list yet is reported as unresolved; it is
//! not retried later.

use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::defaults::{deep_merge, field_str, normalize_path, SessionDefaults};
use super::error::BuildWarning;
use super::table::Table;
use super::types::{ConnectionType, DefaultsKind, SessionKind};

/// Prefix of a credential reference naming a private vault entry.
pub const PRIVATE_VAULT_PREFIX: &str = "private:";

// ─── Arena ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ConnectionList {
    connections: Vec<Map<String, Value>>,
    warnings: Vec<BuildWarning>,
}

impl ConnectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn connections(&self) -> &[Map<String, Value>] {
        &self.connections
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }

    /// Objects of one connection type.
    pub fn of_type(&self, ct: ConnectionType) -> impl Iterator<Item = &Map<String, Value>> {
        self.connections
            .iter()
            .filter(move |c| c.get("ConnectionType").and_then(Value::as_u64) == Some(ct.code()))
    }

    /// Append unless an equal object is already present. Returns whether it
    /// was appended.
    pub fn push(&mut self, object: Map<String, Value>) -> bool {
        if self.connections.contains(&object) {
            return false;
        }
        self.connections.push(object);
        true
    }

    pub fn warn(&mut self, warning: BuildWarning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// Identifier of the credential or host at `path` (`folder\name`, either
    /// separator). Other object types never resolve.
    pub fn lookup(&self, path: &str) -> Option<String> {
        let path = normalize_path(path.trim());
        let (parent, leaf) = path.rsplit_once('\\').unwrap_or(("", path.as_str()));

        self.connections
            .iter()
            .filter(|c| {
                let group = c.get("Group").and_then(Value::as_str).unwrap_or("");
                let name = c.get("Name").and_then(Value::as_str).unwrap_or("");
                group.trim_end_matches('\\') == parent && name == leaf
            })
            .find(|c| {
                c.get("ConnectionType")
                    .and_then(Value::as_u64)
                    .and_then(ConnectionType::from_code)
                    .map_or(false, |ct| ct.is_link_target())
            })
            .and_then(|c| c.get("ID").and_then(Value::as_str).map(str::to_string))
    }

    /// `{"Connections": [...]}`.
    pub fn to_document(&self) -> Value {
        let list: Vec<Value> = self.connections.iter().cloned().map(Value::Object).collect();
        json!({ "Connections": list })
    }
}

// ─── Fragments ──────────────────────────────────────────────────────

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Numeric ports stay numbers, anything else is kept as text.
fn port_value(port: &str) -> Value {
    port.parse::<u64>().map_or_else(|_| Value::String(port.to_string()), Value::from)
}

fn common(ct: ConnectionType, folder: &str, name: &str) -> Map<String, Value> {
    object(json!({
        "ConnectionType": ct.code(),
        "Group": normalize_path(folder),
        "Name": name,
    }))
}

fn script_before_open(script: &str) -> Map<String, Value> {
    object(json!({
        "Events": {
            "BeforeConnectionEmbeddedPowerShellScript": script,
            "BeforeConnectionEvent": 5,
            "BeforeConnectionWaitForExit": true,
            "ConnectionPause": 10,
            "ConnectionUseDefaultWorkingDirectory": false,
        }
    }))
}

/// Merged row fields (semantic keys) for one record.
pub type RowFields = Map<String, Value>;

/// Row `row` of `table` as merge input.
pub fn row_fields(table: &Table, row: usize) -> RowFields {
    table
        .record(row)
        .into_iter()
        .map(|(k, v)| (k, Value::String(v.trim().to_string())))
        .collect()
}

// ─── Builder ────────────────────────────────────────────────────────

/// Builds RDM objects into a [`ConnectionList`], applying session defaults.
#[derive(Debug, Clone, Default)]
pub struct RdmBuilder {
    defaults: SessionDefaults,
}

impl RdmBuilder {
    pub fn new(defaults: SessionDefaults) -> Self {
        Self { defaults }
    }

    /// Ensure the folder at `path` and all its ancestors exist. An empty
    /// path creates nothing.
    pub fn folder(&self, list: &mut ConnectionList, path: &str) {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('\\').filter(|s| !s.is_empty()).collect();
        let Some((name, parents)) = segments.split_last() else {
            return;
        };
        if !parents.is_empty() {
            self.folder(list, &parents.join("\\"));
        }
        list.push(common(ConnectionType::Folder, &segments.join("\\"), name));
    }

    /// Link fields for a credential reference: a private vault search
    /// string, or the saved path plus the resolved identifier.
    fn credential_link(&self, list: &mut ConnectionList, owner: &str, reference: &str) -> Map<String, Value> {
        let mut out = Map::new();
        if reference.is_empty() {
            return out;
        }
        if let Some(search) = reference.strip_prefix(PRIVATE_VAULT_PREFIX) {
            out.insert("CredentialPrivateVaultSearchString".into(), search.trim().into());
            return out;
        }
        let reference = normalize_path(reference);
        out.insert("CredentialConnectionSavedPath".into(), reference.clone().into());
        match list.lookup(&reference) {
            Some(id) => {
                out.insert("CredentialConnectionID".into(), id.into());
            }
            None => list.warn(BuildWarning::UnresolvedReference { owner: owner.to_string(), reference }),
        }
        out
    }

    fn host_link(&self, list: &mut ConnectionList, owner: &str, reference: &str) -> Map<String, Value> {
        let reference = normalize_path(reference);
        let mut out = object(json!({
            "HostSourceMode": 1,
            "HostConnectionSavedPath": reference,
        }));
        match list.lookup(&reference) {
            Some(id) => {
                out.insert("HostConnectionID".into(), id.into());
            }
            None => list.warn(BuildWarning::UnresolvedReference { owner: owner.to_string(), reference }),
        }
        out
    }

    /// Credential object (26). `row` carries `folder`, `credential` and
    /// `username`.
    pub fn credential(&self, list: &mut ConnectionList, row: &RowFields) {
        let name = field_str(row, "credential");
        if name.is_empty() {
            list.warn(BuildWarning::EmptyName { kind: "credential".into(), row: None });
            return;
        }
        let kind = DefaultsKind::Credential;
        let sd = self.defaults.merge(kind, row);
        let folder = field_str(&sd, "folder");
        self.folder(list, &folder);

        let mut obj = common(ConnectionType::Credential, &folder, &name);
        obj.insert("CredentialConnectionID".into(), Uuid::new_v4().to_string().into());
        obj.insert("ID".into(), Uuid::new_v4().to_string().into());
        let username = field_str(&sd, "username");
        if !username.is_empty() {
            obj.insert("Credentials".into(), json!({ "UserName": username }));
        }

        self.defaults.overlay_raw(kind, &mut obj);
        list.push(obj);
    }

    /// Host object (53). `row` carries `folder`, `name`, `host` and
    /// `rdm_credential`.
    pub fn host(&self, list: &mut ConnectionList, row: &RowFields) {
        let name = field_str(row, "name");
        if name.is_empty() {
            list.warn(BuildWarning::EmptyName { kind: "host".into(), row: None });
            return;
        }
        let kind = DefaultsKind::Host;
        let sd = self.defaults.merge(kind, row);
        let folder = field_str(&sd, "folder");
        self.folder(list, &folder);

        let mut obj = common(ConnectionType::Host, &folder, &name);
        obj.insert("ID".into(), Uuid::new_v4().to_string().into());
        let mut details = Map::new();
        let address = field_str(&sd, "host");
        if !address.is_empty() {
            details.insert("Host".into(), address.into());
        }
        obj.insert("HostDetails".into(), Value::Object(details));
        let link = self.credential_link(list, &name, &field_str(&sd, "rdm_credential"));
        deep_merge(&mut obj, link);

        self.defaults.overlay_raw(kind, &mut obj);
        list.push(obj);
    }

    /// Session object of `kind`. `row` carries the session sheet's keys.
    pub fn session(&self, list: &mut ConnectionList, kind: SessionKind, row: &RowFields) {
        let name = field_str(row, "session");
        if name.is_empty() {
            list.warn(BuildWarning::EmptyName { kind: "session".into(), row: None });
            return;
        }
        let dk = DefaultsKind::Session(kind);
        let sd = self.defaults.merge(dk, row);
        let folder = field_str(&sd, "folder");
        self.folder(list, &folder);

        let hostname = field_str(&sd, "hostname");
        let port = field_str(&sd, "port");
        let username = field_str(&sd, "username");
        let credential = field_str(&sd, "rdm_credential");
        let host_ref = field_str(&sd, "rdm_host");
        let script = field_str(&sd, "rdm_script_before_open");

        let mut obj = common(kind.connection_type(), &folder, &name);
        let link = self.credential_link(list, &name, &credential);
        deep_merge(&mut obj, link);

        if !script.is_empty() {
            deep_merge(&mut obj, script_before_open(&script));
        }

        match kind {
            SessionKind::Ssh => {
                if !username.is_empty() && credential.is_empty() {
                    deep_merge(&mut obj, object(json!({ "Terminal": { "Username": username } })));
                }
                if !hostname.is_empty() && host_ref.is_empty() {
                    let mut terminal = object(json!({ "Host": hostname }));
                    if !port.is_empty() {
                        terminal.insert("HostPort".into(), port_value(&port));
                    }
                    deep_merge(&mut obj, object(json!({ "Terminal": terminal })));
                }
            }
            SessionKind::Rdp => {
                if !username.is_empty() && credential.is_empty() {
                    deep_merge(
                        &mut obj,
                        object(json!({ "RDP": { "Username": username }, "PromptCredentials": "true" })),
                    );
                }
                if !hostname.is_empty() && host_ref.is_empty() {
                    obj.insert("Url".into(), hostname.clone().into());
                    if !port.is_empty() {
                        obj.insert("Port".into(), port_value(&port));
                    }
                }
                let shell = field_str(&sd, "rdp_alternate");
                if !shell.is_empty() {
                    obj.insert("AlternateShell".into(), shell.into());
                }
                deep_merge(
                    &mut obj,
                    object(json!({
                        "RDP": {
                            "NetworkLevelAuthentication": "false",
                            "AuthentificationLevel": 2,
                            "OpenEmbedded": "true",
                        }
                    })),
                );
            }
            SessionKind::Web => {
                obj.insert("OpenEmbedded".into(), true.into());
                let mut entry = object(json!({
                    "Url": hostname,
                    "ConnectionTypeInfos": [{ "DataEntryConnectionType": 11 }],
                    "WebBrowserApplication": 3,
                    "WebBrowserExtensionMode": 1,
                    "WebFormIdHtmlElementName": field_str(&sd, "rdm_web_form"),
                    "WebUsernameHtmlElementName": field_str(&sd, "rdm_web_login"),
                    "WebPasswordHtmlElementName": field_str(&sd, "rdm_web_passwd"),
                    "WebSubmitHtmlElementName": "[ENTER]",
                }));
                if !username.is_empty() && credential.is_empty() {
                    entry.insert("WebUserName".into(), username.clone().into());
                }
                deep_merge(&mut obj, object(json!({ "DataEntry": entry })));
            }
        }

        if !host_ref.is_empty() {
            let link = self.host_link(list, &name, &host_ref);
            deep_merge(&mut obj, link);
        }

        self.defaults.overlay_raw(dk, &mut obj);
        list.push(obj);
    }

    /// Full export: credentials, then hosts, then sessions dispatched by
    /// their `type`.
    pub fn build(&self, credentials: &Table, hosts: &Table, sessions: &Table) -> ConnectionList {
        let mut list = ConnectionList::new();

        for row in 0..credentials.len() {
            self.credential(&mut list, &row_fields(credentials, row));
        }
        for row in 0..hosts.len() {
            self.host(&mut list, &row_fields(hosts, row));
        }
        for row in 0..sessions.len() {
            let fields = row_fields(sessions, row);
            let name = field_str(&fields, "session");
            if name.is_empty() {
                list.warn(BuildWarning::EmptyName { kind: "session".into(), row: Some(row) });
                continue;
            }
            let session_type = field_str(&fields, "type");
            match SessionKind::parse(&session_type) {
                Some(kind) => self.session(&mut list, kind, &fields),
                None => list.warn(BuildWarning::UnsupportedType { session: name, session_type }),
            }
        }

        log::info!(
            "Built {} connection object(s), {} warning(s).",
            list.len(),
            list.warnings().len()
        );
        list
    }
}
