//! Generic XML element tree.
//!
//! SecureCRT session exports are nested `<key name="…">` elements with
//! typed leaf fields (`<string name="Hostname">…</string>`). The builder and
//! walker only care about tags, the `name` attribute, text and child order,
//! so documents are held as a plain owned tree and (de)serialized with
//! quick-xml. Serialization never self-closes elements.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Cursor;
use std::str;

use super::error::{MakerError, MakerResult};

/// Tag used for SecureCRT folders and records.
pub const KEY_TAG: &str = "key";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    /// A `<key name="…">` element.
    pub fn key(name: &str) -> Self {
        let mut node = Self::new(KEY_TAG);
        node.set_attr("name", name);
        node
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, attr: &str, value: &str) -> Self {
        self.set_attr(attr, value);
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, attr: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == attr).map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, attr: &str, value: &str) {
        match self.attrs.iter_mut().find(|(k, _)| k == attr) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((attr.to_string(), value.to_string())),
        }
    }

    /// Value of the `name` attribute, `""` when absent.
    pub fn name(&self) -> &str {
        self.attr("name").unwrap_or("")
    }

    pub fn is_key(&self) -> bool {
        self.tag == KEY_TAG
    }

    /// Child `<key>` elements, in document order.
    pub fn keys(&self) -> impl Iterator<Item = &XmlNode> {
        self.children.iter().filter(|c| c.is_key())
    }

    /// A key with child keys is a folder; one without is a record.
    pub fn is_container(&self) -> bool {
        self.keys().next().is_some()
    }

    /// First child `<key>` named `name`.
    pub fn find_key(&self, name: &str) -> Option<&XmlNode> {
        self.keys().find(|c| c.name() == name)
    }

    pub fn find_key_mut(&mut self, name: &str) -> Option<&mut XmlNode> {
        self.children.iter_mut().find(|c| c.is_key() && c.name() == name)
    }

    /// First direct child (any tag) whose `name` attribute is `name`.
    pub fn named_child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.attr("name") == Some(name))
    }

    pub fn named_child_mut(&mut self, name: &str) -> Option<&mut XmlNode> {
        self.children.iter_mut().find(|c| c.attr("name") == Some(name))
    }

    /// Number of elements in this subtree, self included.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(XmlNode::size).sum::<usize>()
    }
}

// ─── Parsing ────────────────────────────────────────────────────────

fn tag_name(raw: &[u8]) -> MakerResult<String> {
    str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| MakerError::XmlParse("Invalid UTF-8 in tag name".into()))
}

fn element(e: &BytesStart) -> MakerResult<XmlNode> {
    let mut node = XmlNode::new(&tag_name(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr?;
        let key = tag_name(attr.key.as_ref())?;
        let value = attr.unescape_value()?;
        node.attrs.push((key, value.into_owned()));
    }
    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> MakerResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(MakerError::MalformedDocument("More than one root element".into())),
    }
    Ok(())
}

/// Parse an XML document into its root element.
pub fn parse_str(xml: &str) -> MakerResult<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(element(e)?),
            Ok(Event::Empty(ref e)) => {
                let node = element(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::CData(ref e)) => {
                if let Some(current) = stack.last_mut() {
                    let raw = e.clone().into_inner();
                    let text = str::from_utf8(&raw)
                        .map_err(|_| MakerError::XmlParse("Invalid UTF-8 in CDATA".into()))?;
                    current.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(MakerError::XmlParse(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(MakerError::MalformedDocument(format!(
            "Unclosed element '{}'",
            stack.last().map_or("", |n| n.tag.as_str())
        )));
    }
    root.ok_or_else(|| MakerError::MalformedDocument("No root element".into()))
}

// ─── Writing ────────────────────────────────────────────────────────

/// Serialize a tree with an XML declaration, tab indentation and explicit
/// end tags for empty elements.
pub fn to_xml_string(root: &XmlNode) -> MakerResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b'\t', 1);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(|e| MakerError::Serialization(e.to_string()))?;
    write_node(&mut writer, root)?;

    let result = writer.into_inner().into_inner();
    let mut xml = String::from_utf8(result).map_err(|e| MakerError::Serialization(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn write_node<W: std::io::Write>(writer: &mut Writer<W>, node: &XmlNode) -> MakerResult<()> {
    let mut start = BytesStart::new(node.tag.as_str());
    for (k, v) in &node.attrs {
        start.push_attribute((k.as_str(), v.as_str()));
    }
    writer
        .write_event(Event::Start(start))
        .map_err(|e| MakerError::Serialization(e.to_string()))?;

    // A text event (even empty) keeps the end tag on the same line.
    if !node.text.is_empty() || node.children.is_empty() {
        writer
            .write_event(Event::Text(BytesText::new(&node.text)))
            .map_err(|e| MakerError::Serialization(e.to_string()))?;
    }
    for child in &node.children {
        write_node(writer, child)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(node.tag.as_str())))
        .map_err(|e| MakerError::Serialization(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<VanDyke version="3.0">
	<key name="Sessions">
		<key name="NA">
			<key name="r1">
				<string name="Hostname">10.0.0.1</string>
				<dword name="[SSH2] Port">22</dword>
				<string name="Username"/>
				<string name="Description"><![CDATA[core & edge]]></string>
			</key>
		</key>
	</key>
	<key name="Credentials"></key>
</VanDyke>
"#;

    #[test]
    fn test_parse_structure() {
        let root = parse_str(SAMPLE).unwrap();
        assert_eq!(root.tag, "VanDyke");
        assert_eq!(root.attr("version"), Some("3.0"));

        let sessions = root.find_key("Sessions").unwrap();
        assert!(sessions.is_container());
        let r1 = sessions.find_key("NA").unwrap().find_key("r1").unwrap();
        assert!(!r1.is_container());
        assert_eq!(r1.named_child("Hostname").unwrap().text, "10.0.0.1");
        assert_eq!(r1.named_child("[SSH2] Port").unwrap().tag, "dword");
        assert_eq!(r1.named_child("Username").unwrap().text, "");
        assert_eq!(r1.named_child("Description").unwrap().text, "core & edge");
        assert!(root.find_key("Credentials").unwrap().children.is_empty());
    }

    #[test]
    fn test_written_xml_never_self_closes() {
        let root = parse_str(SAMPLE).unwrap();
        let xml = to_xml_string(&root).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(!xml.contains("/>"));
        assert!(xml.contains("<string name=\"Username\"></string>"));
        assert!(xml.contains("<key name=\"Credentials\"></key>"));
        assert!(xml.contains("\t\t<key name=\"NA\">"));
        assert_eq!(parse_str(&xml).unwrap(), root);
    }

    #[test]
    fn test_text_is_escaped_on_write() {
        let root = XmlNode::key("a&b").with_child(
            XmlNode::new("string").with_attr("name", "Hostname").with_text("<x>"),
        );
        let xml = to_xml_string(&root).unwrap();
        assert!(xml.contains("a&amp;b"));
        assert!(xml.contains("&lt;x&gt;"));
        assert_eq!(parse_str(&xml).unwrap(), root);
    }

    #[test]
    fn test_malformed_documents_fail() {
        assert!(matches!(parse_str("<a><b></a>"), Err(MakerError::XmlParse(_))));
        assert!(parse_str("<a>").is_err());
        assert!(matches!(parse_str(""), Err(MakerError::MalformedDocument(_))));
        assert!(matches!(parse_str("<a/><b/>"), Err(MakerError::MalformedDocument(_))));
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut node = XmlNode::key("old");
        node.set_attr("name", "new");
        assert_eq!(node.name(), "new");
        assert_eq!(node.attrs.len(), 1);
    }
}
