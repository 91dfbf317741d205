//! SecureCRT session tree: builder (tables → XML) and walker (XML → tables).
//!
//! Folders are nested `<key name="…">` elements; a record (session,
//! credential group, firewall) is a key without child keys whose fields are
//! direct children carrying a `name` attribute. Records start from a
//! template fragment and only the text of known fields is replaced.

use std::path::Path;

use super::error::{BuildWarning, MakerResult};
use super::settings::Settings;
use super::table::Table;
use super::types::SheetKind;
use super::xml_tree::{self, XmlNode};

// ─── Field tables ───────────────────────────────────────────────────

/// Semantic key → SecureCRT field name, for session records.
pub const SESSION_FIELDS: &[(&str, &str)] = &[
    ("hostname", "Hostname"),
    ("port", "[SSH2] Port"),
    ("username", "Username"),
    ("credential", "Credential Title"),
    ("keywords", "Keyword Set"),
    ("colorscheme", "Color Scheme"),
    ("firewall", "Firewall Name"),
];

pub const CREDENTIAL_FIELDS: &[(&str, &str)] = &[("username", "Username")];

pub const FIREWALL_FIELDS: &[(&str, &str)] = &[
    ("address", "Firewall Address"),
    ("port", "Firewall Port"),
    ("username", "Firewall User"),
];

pub const SECTION_SESSIONS: &str = "Sessions";
pub const SECTION_CREDENTIALS: &str = "Credentials";
pub const SECTION_FIREWALLS: &str = "Firewalls";

/// Prefix marking a `Firewall Name` that points at another session.
pub const FIREWALL_SESSION_PREFIX: &str = "Session:";

/// A firewall value holding a session path (contains `/`) gets the
/// `Session:` prefix, once.
pub fn firewall_reference(value: &str) -> String {
    if value.contains('/') && !value.contains(FIREWALL_SESSION_PREFIX) {
        format!("{}{}", FIREWALL_SESSION_PREFIX, value)
    } else {
        value.to_string()
    }
}

/// Folder path segments; both separators accepted, blanks dropped.
pub fn split_folder(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).map(str::trim).filter(|s| !s.is_empty()).collect()
}

// ─── Templates ──────────────────────────────────────────────────────

/// Parsed template fragments. Each is cloned before use, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ScrtTemplates {
    pub root: Option<XmlNode>,
    pub session: Option<XmlNode>,
    pub credential: Option<XmlNode>,
    pub firewall: Option<XmlNode>,
}

fn load_template(settings: &Settings, path: Option<&Path>) -> MakerResult<Option<XmlNode>> {
    match path {
        Some(p) => {
            let path = settings.resolve_path(p);
            log::debug!("Reading template '{}'.", path.display());
            Ok(Some(super::document::read_xml(&path)?))
        }
        None => Ok(None),
    }
}

impl ScrtTemplates {
    /// Parse every template configured under `scrt.template`.
    pub fn load(settings: &Settings) -> MakerResult<Self> {
        let paths = &settings.scrt.template;
        Ok(Self {
            root: load_template(settings, paths.root.as_deref())?,
            session: load_template(settings, paths.session.as_deref())?,
            credential: load_template(settings, paths.credential.as_deref())?,
            firewall: load_template(settings, paths.firewall.as_deref())?,
        })
    }

    pub fn from_strings(
        root: Option<&str>,
        session: Option<&str>,
        credential: Option<&str>,
        firewall: Option<&str>,
    ) -> MakerResult<Self> {
        let parse = |s: Option<&str>| s.map(xml_tree::parse_str).transpose();
        Ok(Self {
            root: parse(root)?,
            session: parse(session)?,
            credential: parse(credential)?,
            firewall: parse(firewall)?,
        })
    }

    /// Root document to fill; a bare skeleton when none is configured.
    pub fn root_or_default(&self) -> XmlNode {
        self.root.clone().unwrap_or_else(default_root)
    }
}

/// `<VanDyke version="3.0">` with empty `Sessions`, `Credentials` and
/// `Firewalls` keys.
pub fn default_root() -> XmlNode {
    XmlNode::new("VanDyke")
        .with_attr("version", "3.0")
        .with_child(XmlNode::key(SECTION_SESSIONS))
        .with_child(XmlNode::key(SECTION_CREDENTIALS))
        .with_child(XmlNode::key(SECTION_FIREWALLS))
}

// ─── Builder primitives ─────────────────────────────────────────────

/// Chain of nested folder keys, outermost first. `None` for no segments.
pub fn build_folder_path(segments: &[&str]) -> Option<XmlNode> {
    let (first, rest) = segments.split_first()?;
    let mut folder = XmlNode::key(first);
    if let Some(child) = build_folder_path(rest) {
        folder.children.push(child);
    }
    Some(folder)
}

/// Put `leaf` inside the folder chain for `segments`; the leaf itself when
/// there are no segments.
pub fn wrap_in_folders(segments: &[&str], leaf: XmlNode) -> XmlNode {
    match segments.split_first() {
        Some((first, rest)) => XmlNode::key(first).with_child(wrap_in_folders(rest, leaf)),
        None => leaf,
    }
}

/// Record element from a template: a deep copy named `name`, with the text
/// of the first child matching each field replaced when the value is
/// non-empty. Children are never added or removed.
pub fn build_leaf(template: Option<&XmlNode>, name: &str, fields: &[(&str, String)]) -> XmlNode {
    let mut leaf = template.cloned().unwrap_or_else(|| XmlNode::key(""));
    leaf.set_attr("name", name);
    for (field, value) in fields {
        if value.is_empty() {
            continue;
        }
        match leaf.named_child_mut(field) {
            Some(child) => child.text = value.clone(),
            None => log::debug!("'{}': template has no field '{}'", name, field),
        }
    }
    leaf
}

/// Merge sibling folders that share a name: children of later duplicates
/// move into the first one, recursively. A record repeated in the same
/// folder keeps its first occurrence.
pub fn merge_duplicate_paths(mut tree: XmlNode) -> XmlNode {
    merge_children(&mut tree);
    tree
}

fn merge_children(parent: &mut XmlNode) {
    let children = std::mem::take(&mut parent.children);
    let mut retained: Vec<XmlNode> = Vec::with_capacity(children.len());

    for child in children {
        if !child.is_key() {
            retained.push(child);
            continue;
        }
        let container = child.is_container();
        let existing = retained
            .iter_mut()
            .find(|r| r.is_key() && r.name() == child.name() && r.is_container() == container);
        match existing {
            Some(first) if container => first.children.extend(child.children),
            Some(_) => {
                log::warn!("Duplicate entry '{}' in folder '{}', skipped", child.name(), parent.name());
            }
            None => retained.push(child),
        }
    }

    for child in retained.iter_mut().filter(|c| c.is_container()) {
        merge_children(child);
    }
    parent.children = retained;
}

fn row_fields(table: &Table, row: usize, fields: &[(&'static str, &'static str)]) -> Vec<(&'static str, String)> {
    fields
        .iter()
        .map(|(key, xml_name)| {
            let value = table.get(key, row).trim();
            let value = if *key == "firewall" { firewall_reference(value) } else { value.to_string() };
            (*xml_name, value)
        })
        .collect()
}

// ─── Builder ────────────────────────────────────────────────────────

/// Builds the SecureCRT document from tables, collecting row warnings.
#[derive(Debug)]
pub struct ScrtTreeBuilder<'a> {
    templates: &'a ScrtTemplates,
    pub warnings: Vec<BuildWarning>,
}

impl<'a> ScrtTreeBuilder<'a> {
    pub fn new(templates: &'a ScrtTemplates) -> Self {
        Self { templates, warnings: Vec::new() }
    }

    fn skip_empty(&mut self, kind: &str, row: usize) {
        let warning = BuildWarning::EmptyName { kind: kind.to_string(), row: Some(row) };
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// The `Sessions` key: every named session in its folder chain,
    /// duplicate folders merged.
    pub fn build_sessions(&mut self, sessions: &Table) -> XmlNode {
        let mut root = XmlNode::key(SECTION_SESSIONS);
        for row in 0..sessions.len() {
            let name = sessions.get("session", row).trim();
            if name.is_empty() {
                self.skip_empty("session", row);
                continue;
            }
            let fields = row_fields(sessions, row, SESSION_FIELDS);
            let leaf = build_leaf(self.templates.session.as_ref(), name, &fields);
            let folder = sessions.get("folder", row);
            root.children.push(wrap_in_folders(&split_folder(folder), leaf));
            log::debug!(" {:>3} | {:<30} | {:<30}", row + 1, folder, name);
        }
        merge_duplicate_paths(root)
    }

    /// Flat list of credential group records.
    pub fn build_credentials(&mut self, credentials: &Table) -> Vec<XmlNode> {
        self.build_flat(credentials, "credential", CREDENTIAL_FIELDS, self.templates.credential.as_ref())
    }

    /// Flat list of firewall records.
    pub fn build_firewalls(&mut self, firewalls: &Table) -> Vec<XmlNode> {
        self.build_flat(firewalls, "firewall", FIREWALL_FIELDS, self.templates.firewall.as_ref())
    }

    fn build_flat(
        &mut self,
        table: &Table,
        kind: &str,
        fields: &[(&'static str, &'static str)],
        template: Option<&'a XmlNode>,
    ) -> Vec<XmlNode> {
        let mut out = Vec::new();
        for row in 0..table.len() {
            let name = table.get(table.anchor(), row).trim();
            if name.is_empty() {
                self.skip_empty(kind, row);
                continue;
            }
            out.push(build_leaf(template, name, &row_fields(table, row, fields)));
        }
        out
    }

    /// Whole document: the root template with each section filled.
    pub fn build_document(&mut self, sessions: &Table, credentials: &Table, firewalls: &Table) -> XmlNode {
        let mut root = self.templates.root_or_default();

        let built_sessions = self.build_sessions(sessions);
        let built_credentials = self.build_credentials(credentials);
        let built_firewalls = self.build_firewalls(firewalls);

        match root.find_key_mut(SECTION_SESSIONS) {
            Some(section) => {
                section.children.extend(built_sessions.children);
                let merged = merge_duplicate_paths(std::mem::take(section));
                *section = merged;
            }
            None => log::warn!("Root template has no '{}' key, sessions skipped", SECTION_SESSIONS),
        }
        append_section(&mut root, SECTION_CREDENTIALS, built_credentials);
        append_section(&mut root, SECTION_FIREWALLS, built_firewalls);
        root
    }
}

fn append_section(root: &mut XmlNode, section: &str, records: Vec<XmlNode>) {
    match root.find_key_mut(section) {
        Some(key) => key.children.extend(records),
        None if records.is_empty() => {}
        None => log::warn!("Root template has no '{}' key, {} record(s) skipped", section, records.len()),
    }
}

// ─── Walker ─────────────────────────────────────────────────────────

fn field_text<'n>(leaf: &'n XmlNode, xml_name: &str) -> &'n str {
    leaf.named_child(xml_name).map_or("", |c| c.text.as_str())
}

/// Read a `Sessions` key back into a sessions table.
///
/// The folder stack holds the names of the open containers; before each
/// child it is cut back to the depth of the key being iterated.
pub fn walk(sessions: &XmlNode) -> Table {
    let mut table = Table::for_sheet(SheetKind::ScrtSessions);
    let mut stack: Vec<String> = Vec::new();
    visit(sessions, 0, &mut stack, &mut table);
    table
}

fn visit(parent: &XmlNode, depth: usize, stack: &mut Vec<String>, table: &mut Table) {
    for child in parent.keys() {
        stack.truncate(depth);

        if child.is_container() {
            stack.push(child.name().to_string());
            visit(child, depth + 1, stack, table);
            continue;
        }

        let idx = table.len();
        let folder = stack.join("/");
        log::debug!(" {:>3} | {:<30} | {:<30}", idx + 1, folder, child.name());

        let mut record: Vec<(&str, String)> = vec![
            ("folder", folder),
            ("session", child.name().to_string()),
        ];
        for (key, xml_name) in SESSION_FIELDS {
            record.push((*key, field_text(child, xml_name).to_string()));
        }
        insert_record(table, idx, &record);
    }
}

fn insert_record(table: &mut Table, idx: usize, record: &[(&str, String)]) {
    let keys: Vec<String> = table.keys().map(str::to_string).collect();
    for key in keys {
        let value = record.iter().find(|(k, _)| *k == key).map_or("", |(_, v)| v.as_str());
        table.insert_at(&key, idx, value);
    }
}

/// Read a flat section (`Credentials` or `Firewalls`) into a table.
pub fn walk_flat(section: &XmlNode, kind: SheetKind) -> Table {
    let fields = match kind {
        SheetKind::ScrtFirewalls => FIREWALL_FIELDS,
        _ => CREDENTIAL_FIELDS,
    };
    let mut table = Table::for_sheet(kind);
    let anchor = table.anchor().to_string();

    for (idx, child) in section.keys().enumerate() {
        let mut record: Vec<(&str, String)> = vec![(anchor.as_str(), child.name().to_string())];
        for (key, xml_name) in fields {
            record.push((*key, field_text(child, xml_name).to_string()));
        }
        log::debug!(" {:>3} | {:<20} | {:<33}", idx + 1, child.name(), record[1].1);
        insert_record(&mut table, idx, &record);
    }
    table
}

/// Tables read from one SecureCRT document.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrtTables {
    pub sessions: Table,
    pub credentials: Table,
    pub firewalls: Table,
}

/// Walk all three sections of a document. A missing section reads as an
/// empty table.
pub fn import_document(root: &XmlNode) -> ScrtTables {
    let section = |name: &str| {
        let found = root.find_key(name);
        if found.is_none() {
            log::info!("No '{}' key in the document, nothing to import.", name);
        }
        found
    };

    ScrtTables {
        sessions: section(SECTION_SESSIONS)
            .map(walk)
            .unwrap_or_else(|| Table::for_sheet(SheetKind::ScrtSessions)),
        credentials: section(SECTION_CREDENTIALS)
            .map(|s| walk_flat(s, SheetKind::ScrtCredentials))
            .unwrap_or_else(|| Table::for_sheet(SheetKind::ScrtCredentials)),
        firewalls: section(SECTION_FIREWALLS)
            .map(|s| walk_flat(s, SheetKind::ScrtFirewalls))
            .unwrap_or_else(|| Table::for_sheet(SheetKind::ScrtFirewalls)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    const SESSION_TPL: &str = r#"<key name="template">
	<string name="Hostname"></string>
	<dword name="[SSH2] Port">22</dword>
	<string name="Username"></string>
	<string name="Credential Title"></string>
	<string name="Keyword Set"></string>
	<string name="Color Scheme">Traditional</string>
	<string name="Firewall Name">None</string>
	<string name="Protocol Name">SSH2</string>
</key>"#;

    fn templates() -> ScrtTemplates {
        ScrtTemplates::from_strings(None, Some(SESSION_TPL), None, None).unwrap()
    }

    fn session_table(rows: &[(&str, &str, &str, &str, &str)]) -> Table {
        let mut t = Table::for_sheet(SheetKind::ScrtSessions);
        for (folder, name, host, port, user) in rows {
            t.push_record([
                ("folder", *folder),
                ("session", *name),
                ("type", "ssh"),
                ("hostname", *host),
                ("port", *port),
                ("username", *user),
            ]);
        }
        t
    }

    #[test]
    fn test_firewall_reference_prefix() {
        assert_eq!(firewall_reference("NA/jump01"), "Session:NA/jump01");
        assert_eq!(firewall_reference("Session:NA/jump01"), "Session:NA/jump01");
        assert_eq!(firewall_reference("corp-fw"), "corp-fw");
    }

    #[test]
    fn test_build_folder_path_nests_segments() {
        let chain = build_folder_path(&["A", "B", "C"]).unwrap();
        assert_eq!(chain.name(), "A");
        let b = chain.find_key("B").unwrap();
        let c = b.find_key("C").unwrap();
        assert!(c.children.is_empty());
        assert!(build_folder_path(&[]).is_none());

        let single = build_folder_path(&["only"]).unwrap();
        assert!(!single.is_container());
    }

    #[test]
    fn test_build_leaf_keeps_template_defaults() {
        let tpl = xml_tree::parse_str(SESSION_TPL).unwrap();
        let leaf = build_leaf(
            Some(&tpl),
            "r1",
            &[("Hostname", "10.0.0.1".into()), ("[SSH2] Port", "".into()), ("Nope", "x".into())],
        );

        assert_eq!(leaf.name(), "r1");
        assert_eq!(leaf.named_child("Hostname").unwrap().text, "10.0.0.1");
        assert_eq!(leaf.named_child("[SSH2] Port").unwrap().text, "22");
        assert_eq!(leaf.children.len(), tpl.children.len());
        // template itself untouched
        assert_eq!(tpl.name(), "template");
        assert_eq!(tpl.named_child("Hostname").unwrap().text, "");
    }

    #[test]
    fn test_build_leaf_without_template_is_bare_key() {
        let leaf = build_leaf(None, "c1", &[("Username", "admin".into())]);
        assert_eq!(leaf, XmlNode::key("c1"));
    }

    #[test]
    fn test_two_level_path_round_trips() {
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);
        let sessions = builder.build_sessions(&session_table(&[("A/B", "s1", "h", "", "")]));

        let a = sessions.find_key("A").unwrap();
        let b = a.find_key("B").unwrap();
        let s1 = b.find_key("s1").unwrap();
        assert!(!s1.is_container());

        let back = walk(&sessions);
        assert_eq!(back.len(), 1);
        assert_eq!(back.get("folder", 0), "A/B");
        assert_eq!(back.get("session", 0), "s1");
        assert!(back.is_rectangular());
    }

    #[test]
    fn test_shared_folders_are_merged() {
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);
        let sessions = builder.build_sessions(&session_table(&[
            ("NA/Routers", "r1", "10.0.0.1", "22", "admin"),
            ("NA/Switches", "s1", "10.0.1.1", "", ""),
            ("NA/Routers", "r2", "10.0.0.2", "2222", ""),
            ("", "jump", "10.9.9.9", "", "ops"),
        ]));

        assert_eq!(sessions.keys().count(), 2);
        let na = sessions.find_key("NA").unwrap();
        assert_eq!(na.keys().count(), 2);
        let routers = na.find_key("Routers").unwrap();
        let names: Vec<_> = routers.keys().map(|k| k.name()).collect();
        assert_eq!(names, vec!["r1", "r2"]);
        assert_eq!(routers.find_key("r2").unwrap().named_child("[SSH2] Port").unwrap().text, "2222");
        assert_eq!(routers.find_key("r1").unwrap().named_child("[SSH2] Port").unwrap().text, "22");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let tree = XmlNode::key("Sessions")
            .with_child(wrap_in_folders(&["A", "B"], XmlNode::key("s1")))
            .with_child(wrap_in_folders(&["A", "B"], XmlNode::key("s2")))
            .with_child(wrap_in_folders(&["A"], XmlNode::key("s3")))
            .with_child(wrap_in_folders(&["C"], XmlNode::key("s4")));

        let once = merge_duplicate_paths(tree);
        let twice = merge_duplicate_paths(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.keys().count(), 2);
        assert_eq!(once.find_key("A").unwrap().keys().count(), 2);
    }

    #[test]
    fn test_duplicate_record_is_dropped() {
        let tree = XmlNode::key("Sessions")
            .with_child(wrap_in_folders(&["A"], XmlNode::key("s1").with_attr("x", "1")))
            .with_child(wrap_in_folders(&["A"], XmlNode::key("s1").with_attr("x", "2")));
        let merged = merge_duplicate_paths(tree);
        let a = merged.find_key("A").unwrap();
        assert_eq!(a.keys().count(), 1);
        assert_eq!(a.find_key("s1").unwrap().attr("x"), Some("1"));
    }

    #[test]
    fn test_round_trip_preserves_tuples() {
        let rows = [
            ("NA/Routers", "r1", "10.0.0.1", "22", "admin"),
            ("NA/Routers/Core", "c1", "10.0.2.1", "22", ""),
            ("EU", "e1", "10.1.0.1", "2200", "eu"),
            ("NA", "n1", "10.0.3.1", "22", ""),
            ("", "top", "10.9.9.9", "22", "root"),
            ("EU", "", "ignored", "", ""),
        ];
        let table = session_table(&rows);
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);
        let tree = builder.build_sessions(&table);
        assert_eq!(builder.warnings.len(), 1);

        let back = walk(&tree);
        let tuple = |t: &Table, i: usize| {
            (
                t.get("folder", i).to_string(),
                t.get("session", i).to_string(),
                t.get("hostname", i).to_string(),
                t.get("port", i).to_string(),
                t.get("username", i).to_string(),
            )
        };
        let expected: BTreeSet<_> =
            (0..table.len()).filter(|&i| !table.get("session", i).is_empty()).map(|i| tuple(&table, i)).collect();
        let actual: BTreeSet<_> = (0..back.len()).map(|i| tuple(&back, i)).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_walker_resets_folder_across_siblings() {
        let tree = XmlNode::key("Sessions")
            .with_child(
                XmlNode::key("A")
                    .with_child(XmlNode::key("B").with_child(XmlNode::key("b1")))
                    .with_child(XmlNode::key("a1")),
            )
            .with_child(XmlNode::key("C").with_child(XmlNode::key("c1")))
            .with_child(XmlNode::key("root1"));

        let t = walk(&tree);
        let pairs: Vec<_> = (0..t.len()).map(|i| (t.get("folder", i), t.get("session", i))).collect();
        assert_eq!(pairs, vec![("A/B", "b1"), ("A", "a1"), ("C", "c1"), ("", "root1")]);
    }

    #[test]
    fn test_repeated_folder_name_keeps_its_depth() {
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);
        let mut table = Table::for_sheet(SheetKind::ScrtSessions);
        table.push_record([("folder", "A/A"), ("session", "inner"), ("type", "ssh")]);
        table.push_record([("folder", "A"), ("session", "outer"), ("type", "ssh")]);

        let back = walk(&builder.build_sessions(&table));
        let pairs: Vec<_> = (0..back.len()).map(|i| (back.get("folder", i), back.get("session", i))).collect();
        assert_eq!(pairs, vec![("A/A", "inner"), ("A", "outer")]);
    }

    #[test]
    fn test_document_fills_sections() {
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);

        let mut creds = Table::for_sheet(SheetKind::ScrtCredentials);
        creds.push_record([("credential", "lab"), ("username", "labuser")]);
        let mut fws = Table::for_sheet(SheetKind::ScrtFirewalls);
        fws.push_record([("firewall", "corp"), ("address", "192.0.2.1"), ("port", "1080")]);

        let doc = builder.build_document(&session_table(&[("NA", "r1", "h", "", "")]), &creds, &fws);
        assert_eq!(doc.tag, "VanDyke");
        assert_eq!(doc.find_key("Credentials").unwrap().find_key("lab").unwrap().name(), "lab");
        assert_eq!(doc.find_key("Firewalls").unwrap().keys().count(), 1);

        let tables = import_document(&doc);
        assert_eq!(tables.sessions.get("folder", 0), "NA");
        assert_eq!(tables.credentials.get("credential", 0), "lab");
        assert_eq!(tables.firewalls.get("firewall", 0), "corp");
        // bare templates carry no fields
        assert_eq!(tables.firewalls.get("address", 0), "");
    }

    #[test]
    fn test_import_missing_sections_is_empty() {
        let doc = XmlNode::new("VanDyke").with_child(XmlNode::key("Sessions"));
        let tables = import_document(&doc);
        assert!(tables.sessions.is_empty());
        assert!(tables.credentials.is_empty());
        assert!(tables.firewalls.has_column("address"));
    }

    #[test]
    fn test_firewall_written_with_session_prefix() {
        let t = templates();
        let mut builder = ScrtTreeBuilder::new(&t);
        let mut table = session_table(&[("NA", "r1", "h", "", "")]);
        table.set_column("firewall", vec!["NA/jump01".into()]);
        let tree = builder.build_sessions(&table);
        let r1 = tree.find_key("NA").unwrap().find_key("r1").unwrap();
        assert_eq!(r1.named_child("Firewall Name").unwrap().text, "Session:NA/jump01");
        assert_eq!(r1.named_child("Color Scheme").unwrap().text, "Traditional");
    }
}
