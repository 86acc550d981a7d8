//! A metadata record held either as raw XML or as a parsed [`Document`].

use metacat_record::{Document, RecordError};
use once_cell::unsync::OnceCell;

/// Raw XML is parsed on first use and the parsed tree is kept from then on.
#[derive(Debug, Clone, Default)]
pub struct Record {
    raw: Option<String>,
    parsed: OnceCell<Document>,
}

impl Record {
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self {
            raw: Some(xml.into()),
            parsed: OnceCell::new(),
        }
    }

    pub fn from_document(document: Document) -> Self {
        Self {
            raw: None,
            parsed: OnceCell::with_value(document),
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// The raw text, while the record has not been modified since it was read.
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn document(&self) -> Result<&Document, RecordError> {
        self.parsed
            .get_or_try_init(|| Document::parse(self.raw.as_deref().unwrap_or_default()))
    }

    /// Mutable access to the tree. The raw text is dropped since it may no
    /// longer match.
    pub fn document_mut(&mut self) -> Result<&mut Document, RecordError> {
        self.document()?;
        self.raw = None;
        self.parsed
            .get_mut()
            .ok_or_else(|| RecordError::MissingNode("document".to_string()))
    }

    pub fn into_document(self) -> Result<Document, RecordError> {
        match self.parsed.into_inner() {
            Some(document) => Ok(document),
            None => Document::parse(self.raw.as_deref().unwrap_or_default()),
        }
    }

    /// The raw text when untouched, the serialized tree otherwise.
    pub fn to_xml_string(&self) -> Result<String, RecordError> {
        match (&self.raw, self.parsed.get()) {
            (Some(raw), _) => Ok(raw.clone()),
            (None, Some(document)) => document.to_xml_string(),
            (None, None) => Ok(String::new()),
        }
    }
}

impl From<Document> for Record {
    fn from(document: Document) -> Self {
        Self::from_document(document)
    }
}

impl From<String> for Record {
    fn from(xml: String) -> Self {
        Self::from_xml(xml)
    }
}

impl From<&str> for Record {
    fn from(xml: &str) -> Self {
        Self::from_xml(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_lazily_once() {
        let record = Record::from("<a><b>x</b></a>");
        assert!(!record.is_parsed());
        let first = record.document().unwrap() as *const Document;
        assert!(record.is_parsed());
        let second = record.document().unwrap() as *const Document;
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_error_is_not_cached() {
        let record = Record::from("<a>");
        assert!(record.document().is_err());
        assert!(!record.is_parsed());
        assert_eq!(record.raw(), Some("<a>"));
    }

    #[test]
    fn test_mutation_drops_raw_text() {
        let mut record = Record::from("<a>  <b>x</b></a>");
        assert_eq!(record.to_xml_string().unwrap(), "<a>  <b>x</b></a>");
        record.document_mut().unwrap();
        assert_eq!(record.raw(), None);
        assert_eq!(record.to_xml_string().unwrap(), "<a>  <b>x</b></a>");
    }

    #[test]
    fn test_from_document() {
        let document = Document::parse("<a/>").unwrap();
        let record = Record::from(document.clone());
        assert!(record.is_parsed());
        assert_eq!(record.into_document().unwrap(), document);
    }
}
