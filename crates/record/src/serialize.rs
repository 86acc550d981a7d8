//! Writes a [`Document`] back to XML text with `quick-xml`.

use crate::document::{Document, NodeId, NodeKind};
use crate::error::RecordError;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

impl Document {
    /// Serializes the document. Prefixes and namespace declarations are
    /// written as they appeared in the parsed input; no XML declaration is
    /// emitted.
    pub fn to_xml_string(&self) -> Result<String, RecordError> {
        let mut writer = Writer::new(Vec::new());
        for child in self.children(NodeId(0)) {
            self.write_node(&mut writer, *child)?;
        }
        Ok(String::from_utf8(writer.into_inner())?)
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<(), RecordError> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
            }
            NodeKind::Element(element) => {
                let tag = element.name.qualified();
                let mut start = BytesStart::new(tag.as_str());
                for ns in &element.namespaces {
                    let key = match &ns.prefix {
                        Some(prefix) => format!("xmlns:{}", prefix),
                        None => "xmlns".to_string(),
                    };
                    start.push_attribute((key.as_str(), ns.uri.as_str()));
                }
                for attr in &element.attributes {
                    let key = attr.name.qualified();
                    start.push_attribute((key.as_str(), attr.value.as_str()));
                }

                let children = self.children(id);
                if children.is_empty() {
                    writer.write_event(Event::Empty(start))?;
                } else {
                    writer.write_event(Event::Start(start))?;
                    for child in children {
                        self.write_node(writer, *child)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
                }
            }
            NodeKind::Root => {}
        }
        Ok(())
    }
}
