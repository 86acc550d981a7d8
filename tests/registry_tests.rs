//! Installs the process-wide registry, so it lives in its own test binary.

mod common;

use common::{TestResult, init};
use metacat::{
    ConfigurationError, NamespaceRegistry, Record, install_namespaces, namespace_registry,
    nspath_eval, resolve,
};

#[test]
fn test_install_once_and_resolve() -> TestResult {
    init();
    let registry = NamespaceRegistry::from_json(
        r#"{"dc": "http://purl.org/dc/elements/1.1/", "rec": "urn:example:record"}"#,
    )?;
    install_namespaces(registry.clone())?;
    assert_eq!(namespace_registry(), &registry);
    assert!(matches!(
        install_namespaces(NamespaceRegistry::default()),
        Err(ConfigurationError::AlreadyInstalled)
    ));

    let record = Record::from(
        r#"<r:entry xmlns:r="urn:example:record" xmlns:d="http://purl.org/dc/elements/1.1/"><d:title>T</d:title></r:entry>"#,
    );
    assert_eq!(resolve(&record, "dc:title")?.as_str(), Some("T"));
    assert_eq!(resolve(&record, "/rec:entry/dc:title")?.as_str(), Some("T"));
    // The default prefixes are gone once a registry is installed.
    assert!(resolve(&record, "csw:Record").is_err());

    assert_eq!(
        nspath_eval("rec:entry/dc:title", namespace_registry())?,
        "{urn:example:record}entry/{http://purl.org/dc/elements/1.1/}title"
    );
    Ok(())
}
