use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("XML writing error: {0}")]
    XmlWrite(#[from] std::io::Error),

    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Node {0} does not exist in this document")]
    MissingNode(String),
}
