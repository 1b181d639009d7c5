//! # mf2
//!
//! Microformats2 extraction from HTML.
//!
//! ## Features
//!
//! - `h-*` items with `p-*`, `u-*`, `dt-*` and `e-*` properties
//! - Nested items, implied `name`/`photo`/`url`, the value-class pattern
//! - Datetime normalization and date/time merging
//! - Legacy (microformats v1) classnames such as `vcard` and `hentry`
//! - Relative URL resolution against a base URL or `<base href>`
//!
//! ## Quick Start
//!
//! ```
//! use mf2::{parse_html, ParseOptions};
//!
//! let html = r#"<div class="h-card"><a class="p-name u-url" href="/jo">Jo</a></div>"#;
//! let options = ParseOptions::new().with_base_url("https://example.com/").unwrap();
//! let result = parse_html(html, &options);
//!
//! let card = &result.get("card")[0];
//! assert_eq!(card.first_str("name"), Some("Jo"));
//! assert_eq!(card.first_str("url"), Some("https://example.com/jo"));
//! ```
//!
//! Extraction never fails: malformed markup, unknown classes and
//! unparseable datetimes are skipped. Only option and I/O errors surface as
//! [`Error`].

pub mod backcompat;
pub mod classify;
pub mod dom;
pub mod error;
pub mod implied;
pub mod model;
pub mod options;
pub mod parser;
pub mod resolve;
pub(crate) mod util;
pub mod value;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use backcompat::Backcompat;
pub use classify::PropertyKind;
pub use dom::{Dom, NodeId};
pub use error::{Error, Result};
pub use model::{Item, Microformats};
pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::{parse_bytes, parse_dom, parse_html, parse_reader};
pub use value::{DateTimeValue, Markup, PropertyValue};
