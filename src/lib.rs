//! # Keyline
//!
//! Find the source line of a nested key in a pretty-printed JSON document.
//!
//! Configuration viewers show the raw text of a file such as
//! `tauri.conf.json` and need to scroll to the key some other component
//! selected (`tauri.bundle.identifier`, `plugins.2.name`). This crate answers
//! that question directly on the text, without building a parse tree, so the
//! line it reports is always a line of the text as written.
//!
//! ## Module Organization
//!
//! - [`path`] - Key paths: dotted, JSON Pointer and jq-style spellings
//! - [`locate`] - The line locator
//! - [`render`] - Source window rendering around a located line
//!
//! ## Quick Start
//!
//! ```
//! use keyline::{line_for_key, locate_line, LocateConfig, Locator, NOT_FOUND};
//!
//! let conf = r#"{
//!   "items": [
//!     "x",
//!     "y"
//!   ]
//! }"#;
//!
//! assert_eq!(locate_line(conf, "items.1"), Some(4));
//! assert_eq!(line_for_key(conf, Some("missing")), NOT_FOUND);
//!
//! // Documents indented with a different unit
//! let locator = Locator::new(LocateConfig::four_spaces());
//! assert_eq!(locator.locate_line("{\n    \"a\": 1\n}", "a"), Some(2));
//! ```
//!
//! ## Features
//!
//! - `std` (default) - Standard library support; disable for `no_std` + `alloc`
//! - `serde` - Serialization support for [`LocateConfig`] and [`LineMatch`]
//! - `cli` - The `keyline` command-line tool

// Use no_std unless std feature is enabled or we're in test mode
#![cfg_attr(not(any(test, feature = "std")), no_std)]

// When using no_std, we need to explicitly link the alloc crate
#[cfg(not(any(test, feature = "std")))]
extern crate alloc;

// When using std, re-export alloc types from std for compatibility
#[cfg(any(test, feature = "std"))]
extern crate std as alloc;

/// Key paths into serialized documents.
pub mod path;

/// Nested-key-to-line-number locator.
pub mod locate;

/// Rendering of located lines.
pub mod render;

pub use locate::{line_for_key, locate_line, LineMatch, LocateConfig, Locator, NOT_FOUND};
pub use path::{KeyPath, PathError, Segment};
