//! Session maker façades.
//!
//! `ScrtSessionMaker` owns the three SecureCRT tables and runs both
//! directions (workbook → XML, XML → workbook). `RdmSessionMaker` owns the
//! RDM tables and produces the connection list. Neither touches the file
//! system except through `document` and the configured templates.

use serde_json::Value;

use super::columns::read_table;
use super::defaults::SessionDefaults;
use super::error::{BuildWarning, MakerResult};
use super::rdm::{ConnectionList, RdmBuilder};
use super::scrt::{self, ScrtTemplates, ScrtTreeBuilder};
use super::settings::Settings;
use super::table::Table;
use super::types::{SheetKind, SheetSink, SheetSource};
use super::xml_tree::XmlNode;

fn load_sheet(settings: &Settings, source: &mut dyn SheetSource, kind: SheetKind) -> MakerResult<Table> {
    let excel = &settings.excel;
    read_table(source, excel.sheet_name(kind), kind, excel.column_names(kind))
}

fn dump_rows(title: &str, table: &Table, columns: &[&str]) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    log::debug!("{} ({} row(s))", title, table.len());
    for row in 0..table.len() {
        let cells: Vec<&str> = columns.iter().map(|key| table.get(key, row)).collect();
        log::debug!(" {:>3} | {}", row + 1, cells.join(" | "));
    }
}

// ─── SecureCRT ──────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ScrtSessionMaker {
    settings: Settings,
    templates: ScrtTemplates,
    sessions: Table,
    credentials: Table,
    firewalls: Table,
    warnings: Vec<BuildWarning>,
}

impl ScrtSessionMaker {
    pub fn new(settings: Settings, templates: ScrtTemplates) -> Self {
        Self {
            settings,
            templates,
            sessions: Table::for_sheet(SheetKind::ScrtSessions),
            credentials: Table::for_sheet(SheetKind::ScrtCredentials),
            firewalls: Table::for_sheet(SheetKind::ScrtFirewalls),
            warnings: Vec::new(),
        }
    }

    /// Maker with the templates named in `settings`.
    pub fn from_settings(settings: Settings) -> MakerResult<Self> {
        let templates = ScrtTemplates::load(&settings)?;
        Ok(Self::new(settings, templates))
    }

    /// Load the sessions, credentials and firewalls sheets.
    pub fn read_workbook(&mut self, source: &mut dyn SheetSource) -> MakerResult<()> {
        self.sessions = load_sheet(&self.settings, source, SheetKind::ScrtSessions)?;
        self.credentials = load_sheet(&self.settings, source, SheetKind::ScrtCredentials)?;
        self.firewalls = load_sheet(&self.settings, source, SheetKind::ScrtFirewalls)?;
        dump_rows("Sessions", &self.sessions, &["folder", "session", "type", "hostname"]);
        dump_rows("Credentials", &self.credentials, &["credential", "username"]);
        dump_rows("Firewalls", &self.firewalls, &["firewall", "address", "port"]);
        Ok(())
    }

    /// Replace the tables with the content of a SecureCRT document.
    pub fn import_xml(&mut self, root: &XmlNode) {
        let tables = scrt::import_document(root);
        self.sessions = tables.sessions;
        self.credentials = tables.credentials;
        self.firewalls = tables.firewalls;
        log::info!(
            "Imported {} session(s), {} credential(s), {} firewall(s).",
            self.sessions.len(),
            self.credentials.len(),
            self.firewalls.len()
        );
    }

    /// Build the whole document. Warnings of this build replace earlier ones.
    pub fn build_xml(&mut self) -> XmlNode {
        let mut builder = ScrtTreeBuilder::new(&self.templates);
        let root = builder.build_document(&self.sessions, &self.credentials, &self.firewalls);
        self.warnings = builder.warnings;
        root
    }

    /// Write the three tables under their configured sheet names and headers.
    pub fn write_workbook(&self, sink: &mut dyn SheetSink) -> MakerResult<()> {
        let excel = &self.settings.excel;
        for (kind, table) in [
            (SheetKind::ScrtSessions, &self.sessions),
            (SheetKind::ScrtCredentials, &self.credentials),
            (SheetKind::ScrtFirewalls, &self.firewalls),
        ] {
            sink.write_sheet(excel.sheet_name(kind), excel.column_names(kind), table)?;
        }
        Ok(())
    }

    pub fn sessions(&self) -> &Table {
        &self.sessions
    }

    pub fn credentials(&self) -> &Table {
        &self.credentials
    }

    pub fn firewalls(&self) -> &Table {
        &self.firewalls
    }

    /// Named sessions, optionally only those of the given types.
    pub fn session_count(&self, types: &[&str]) -> usize {
        self.sessions.count(types)
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.count(&[])
    }

    pub fn firewall_count(&self) -> usize {
        self.firewalls.count(&[])
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

// ─── RDM ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RdmSessionMaker {
    settings: Settings,
    builder: RdmBuilder,
    sessions: Table,
    credentials: Table,
    hosts: Table,
    warnings: Vec<BuildWarning>,
}

impl RdmSessionMaker {
    pub fn new(settings: Settings, defaults: SessionDefaults) -> Self {
        Self {
            settings,
            builder: RdmBuilder::new(defaults),
            sessions: Table::for_sheet(SheetKind::RdmSessions),
            credentials: Table::for_sheet(SheetKind::RdmCredentials),
            hosts: Table::for_sheet(SheetKind::RdmHosts),
            warnings: Vec::new(),
        }
    }

    /// Maker with the session defaults named in `settings`.
    pub fn from_settings(settings: Settings) -> MakerResult<Self> {
        let defaults = SessionDefaults::from_settings(&settings)?;
        Ok(Self::new(settings, defaults))
    }

    /// Load the sessions, credentials and hosts sheets.
    pub fn read_workbook(&mut self, source: &mut dyn SheetSource) -> MakerResult<()> {
        self.sessions = load_sheet(&self.settings, source, SheetKind::RdmSessions)?;
        self.credentials = load_sheet(&self.settings, source, SheetKind::RdmCredentials)?;
        self.hosts = load_sheet(&self.settings, source, SheetKind::RdmHosts)?;
        dump_rows("Sessions", &self.sessions, &["folder", "session", "type", "hostname"]);
        dump_rows("Credentials", &self.credentials, &["folder", "credential", "username"]);
        dump_rows("Hosts", &self.hosts, &["folder", "name", "host"]);
        Ok(())
    }

    /// Build the connection list: credentials, hosts, then sessions.
    pub fn build_connections(&mut self) -> ConnectionList {
        let list = self.builder.build(&self.credentials, &self.hosts, &self.sessions);
        self.warnings = list.warnings().to_vec();
        list
    }

    /// `{"Connections": [...]}` for the current tables.
    pub fn build_json(&mut self) -> Value {
        self.build_connections().to_document()
    }

    pub fn sessions(&self) -> &Table {
        &self.sessions
    }

    pub fn credentials(&self) -> &Table {
        &self.credentials
    }

    pub fn hosts(&self) -> &Table {
        &self.hosts
    }

    pub fn session_count(&self, types: &[&str]) -> usize {
        self.sessions.count(types)
    }

    pub fn credential_count(&self) -> usize {
        self.credentials.count(&[])
    }

    pub fn host_count(&self) -> usize {
        self.hosts.count(&[])
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maker::error::MakerError;
    use crate::maker::types::{ColumnNames, RawSheet};
    use indexmap::IndexMap;

    fn col(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn sheet(columns: &[(&str, &[&str])]) -> RawSheet {
        columns.iter().map(|(h, v)| (h.to_string(), col(v))).collect()
    }

    fn scrt_book() -> IndexMap<String, RawSheet> {
        let mut book = IndexMap::new();
        book.insert(
            "sessions".to_string(),
            sheet(&[
                ("Folder", &["NA/Routers", "NA/Routers", "EU", ""]),
                ("Session", &["r1", "r2", "fw1", ""]),
                ("Type", &["ssh", "SSH", "rdp", "ssh"]),
                ("Hostname", &["10.0.0.1", "10.0.0.2", "10.1.0.1", "10.9.9.9"]),
                ("Port", &["22", "2222", "", ""]),
                ("Username", &["admin", "", "", ""]),
                ("SCRT Credential", &["", "ops", "", ""]),
            ]),
        );
        book.insert(
            "scrt-credentials".to_string(),
            sheet(&[("Credential", &["ops"]), ("Username", &["operator"])]),
        );
        book
    }

    #[test]
    fn test_scrt_counts_after_read() {
        let mut maker = ScrtSessionMaker::new(Settings::default(), ScrtTemplates::default());
        maker.read_workbook(&mut scrt_book()).unwrap();

        assert_eq!(maker.session_count(&[]), 3);
        assert_eq!(maker.session_count(&["ssh"]), 2);
        assert_eq!(maker.credential_count(), 1);
        assert_eq!(maker.firewall_count(), 0);
        assert_eq!(maker.firewalls().len(), 0);
    }

    fn templates() -> ScrtTemplates {
        ScrtTemplates::from_strings(
            None,
            Some(
                r#"<key name="Default"><string name="Hostname"></string><dword name="[SSH2] Port"></dword><string name="Username"></string><string name="Credential Title"></string></key>"#,
            ),
            Some(r#"<key name="Default"><string name="Username"></string></key>"#),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_scrt_build_then_import_keeps_sessions() {
        let mut maker = ScrtSessionMaker::new(Settings::default(), templates());
        maker.read_workbook(&mut scrt_book()).unwrap();
        let root = maker.build_xml();
        assert_eq!(maker.warnings().len(), 1);

        let mut back = ScrtSessionMaker::new(Settings::default(), templates());
        back.import_xml(&root);
        assert_eq!(back.sessions().get("port", 1), "2222");
        let mut names: Vec<(String, String)> = back
            .sessions()
            .records()
            .map(|r| (r["folder"].clone(), r["session"].clone()))
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                ("EU".to_string(), "fw1".to_string()),
                ("NA/Routers".to_string(), "r1".to_string()),
                ("NA/Routers".to_string(), "r2".to_string()),
            ]
        );
        assert_eq!(back.credential_count(), 1);
        assert_eq!(back.credentials().get("username", 0), "operator");
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let mut book = IndexMap::new();
        book.insert("sessions".to_string(), sheet(&[("Session", &["r1"]), ("Type", &["ssh"])]));
        let mut maker = ScrtSessionMaker::new(Settings::default(), ScrtTemplates::default());
        match maker.read_workbook(&mut book) {
            Err(MakerError::MissingRequiredColumn { column, .. }) => assert_eq!(column, "Hostname"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        sheets: Vec<(String, Vec<String>, usize)>,
    }

    impl SheetSink for RecordingSink {
        fn write_sheet(&mut self, name: &str, columns: &ColumnNames, table: &Table) -> MakerResult<()> {
            self.sheets.push((name.to_string(), columns.values().cloned().collect(), table.len()));
            Ok(())
        }
    }

    #[test]
    fn test_write_workbook_uses_configured_names() {
        let mut settings = Settings::default();
        settings.excel.tab_scrt_firewalls = "fw".to_string();
        let mut maker = ScrtSessionMaker::new(settings, ScrtTemplates::default());
        maker.read_workbook(&mut scrt_book()).unwrap();

        let mut sink = RecordingSink::default();
        maker.write_workbook(&mut sink).unwrap();
        let names: Vec<&str> = sink.sheets.iter().map(|(n, _, _)| n.as_str()).collect();
        assert_eq!(names, vec!["sessions", "scrt-credentials", "fw"]);
        assert_eq!(sink.sheets[0].1[0], "Folder");
        assert_eq!(sink.sheets[0].2, 4);
    }

    #[test]
    fn test_rdm_build_json() {
        let mut book = IndexMap::new();
        book.insert(
            "sessions".to_string(),
            sheet(&[
                ("Folder", &["NA/Routers", "Web"]),
                ("Session", &["r1", "portal"]),
                ("Type", &["ssh", "web"]),
                ("Hostname", &["10.0.0.1", "https://portal"]),
                ("RDM Credential", &["Vault/svc-acct", ""]),
            ]),
        );
        book.insert(
            "rdm-credentials".to_string(),
            sheet(&[("Folder", &["Vault"]), ("Credential", &["svc-acct"]), ("Username", &["svc"])]),
        );

        let mut maker = RdmSessionMaker::new(Settings::default(), SessionDefaults::default());
        maker.read_workbook(&mut book).unwrap();
        assert_eq!(maker.session_count(&["ssh", "rdp", "web"]), 2);
        assert_eq!(maker.credential_count(), 1);
        assert_eq!(maker.host_count(), 0);

        let doc = maker.build_json();
        let connections = doc["Connections"].as_array().unwrap();
        // Vault, credential, NA, NA\Routers, r1, Web, portal
        assert_eq!(connections.len(), 7);
        assert_eq!(connections[1]["ConnectionType"], 26);
        assert_eq!(connections[4]["CredentialConnectionID"], connections[1]["ID"]);
        assert_eq!(connections[6]["ConnectionType"], 32);
        assert!(maker.warnings().is_empty());
    }
}
