pub mod fixtures;

use metacat::{Document, Record};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Installs the test logger; safe to call from every test.
pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parses a fixture, panicking with the parser's message on failure.
pub fn parse(xml: &str) -> Document {
    Document::parse(xml).unwrap_or_else(|e| panic!("fixture does not parse: {e}"))
}

pub fn dublin_core() -> Record {
    Record::from(fixtures::DUBLIN_CORE_RECORD)
}

pub fn iso() -> Record {
    Record::from(fixtures::ISO_RECORD)
}
