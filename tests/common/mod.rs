//! Shared fixtures for the flow tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use smk_core::maker::settings::ExcelSettings;
use smk_core::maker::{SheetKind, SheetSink, Table};
use smk_excel::excel::ExcelWriter;

pub const SESSION_TEMPLATE: &str = r#"<key name="Default">
	<string name="Hostname"></string>
	<dword name="[SSH2] Port">22</dword>
	<string name="Username"></string>
	<string name="Credential Title"></string>
	<string name="Keyword Set"></string>
	<string name="Color Scheme"></string>
	<string name="Firewall Name">None</string>
</key>"#;

pub const CREDENTIAL_TEMPLATE: &str = r#"<key name="Default">
	<string name="Username"></string>
	<string name="Password V2"></string>
</key>"#;

pub const FIREWALL_TEMPLATE: &str = r#"<key name="Default">
	<string name="Firewall Address"></string>
	<dword name="Firewall Port">1080</dword>
	<string name="Firewall User"></string>
</key>"#;

/// Config plus SecureCRT templates in `dir`, template paths relative to the
/// config file.
pub fn write_config(dir: &Path) -> PathBuf {
    let templates = dir.join("templates");
    fs::create_dir_all(&templates).unwrap();
    fs::write(templates.join("session.xml"), SESSION_TEMPLATE).unwrap();
    fs::write(templates.join("credential.xml"), CREDENTIAL_TEMPLATE).unwrap();
    fs::write(templates.join("firewall.xml"), FIREWALL_TEMPLATE).unwrap();

    let config = dir.join("config.yaml");
    fs::write(
        &config,
        "scrt:\n  template:\n    session: templates/session.xml\n    credential: templates/credential.xml\n    firewall: templates/firewall.xml\n",
    )
    .unwrap();
    config
}

pub fn table(kind: SheetKind, rows: &[&[(&str, &str)]]) -> Table {
    let mut t = Table::for_sheet(kind);
    for row in rows {
        t.push_record(row.iter().copied());
    }
    t
}

/// Inventory workbook with every sheet both targets read.
pub fn write_inventory(path: &Path) {
    let excel = ExcelSettings::default();
    let mut sessions = table(
        SheetKind::RdmSessions,
        &[
            &[
                ("folder", "NA/Routers"),
                ("session", "r1"),
                ("type", "ssh"),
                ("hostname", "10.0.0.1"),
                ("port", "22"),
                ("username", "admin"),
            ],
            &[
                ("folder", "NA/Routers"),
                ("session", "r2"),
                ("type", "ssh"),
                ("hostname", "10.0.0.2"),
                ("rdm_credential", "Vault/svc-acct"),
            ],
            &[("folder", "EU/Servers"), ("session", "dc1"), ("type", "rdp"), ("hostname", "10.2.0.10")],
            &[("session", ""), ("type", "ssh"), ("hostname", "10.9.9.9")],
        ],
    );
    sessions.set_column("credential", vec!["".into(), "ops".into(), "".into(), "".into()]);

    let scrt_credentials = table(SheetKind::ScrtCredentials, &[&[("credential", "ops"), ("username", "operator")]]);
    let rdm_credentials = table(
        SheetKind::RdmCredentials,
        &[&[("folder", "Vault"), ("credential", "svc-acct"), ("username", "svcuser")]],
    );

    let mut writer = ExcelWriter::new(path);
    writer.write_sheet(&excel.tab_sessions, &excel.col_names_sessions, &sessions).unwrap();
    writer
        .write_sheet(&excel.tab_scrt_credentials, &excel.col_names_scrt_credentials, &scrt_credentials)
        .unwrap();
    writer
        .write_sheet(&excel.tab_rdm_credentials, &excel.col_names_rdm_credentials, &rdm_credentials)
        .unwrap();
    writer.save().unwrap();
}
