//! # metacat
//!
//! Query evaluation for a metadata catalogue. Given an XML metadata record,
//! this crate answers spatial, full-text and field-path queries against it and
//! updates record fields in place.
//!
//! ```
//! use metacat::{Record, ResolvedValue, resolve};
//!
//! let record = Record::from(
//!     r#"<csw:Record xmlns:csw="http://www.opengis.net/cat/csw/2.0.2"
//!                    xmlns:dc="http://purl.org/dc/elements/1.1/">
//!          <dc:title>Alpha</dc:title><dc:title>Beta</dc:title>
//!        </csw:Record>"#,
//! );
//! assert_eq!(
//!     resolve(&record, "dc:title").unwrap(),
//!     ResolvedValue::Joined("Alpha,Beta".to_string())
//! );
//! ```

pub use metacat_core::*;

pub use metacat_core::config::{global as namespace_registry, install as install_namespaces};
pub use metacat_core::fulltext::{matches as matches_text, matches_record};
pub use metacat_core::mapping::{Queryables, to_external, to_internal};
pub use metacat_core::path::{resolve_with, update_nodes};
pub use metacat_core::util::{iso_to_unix, today_and_now, version_integer, xmltag_split};

/// Installs `env_logger` once, honouring `RUST_LOG`. Repeated calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}
