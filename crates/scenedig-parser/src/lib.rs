// scenedig-parser/src/lib.rs

//! # scenedig-parser
//!
//! Low-level reading of Unity text assets.
//!
//! This crate turns the raw text of scene documents and `.meta` sidecar files
//! into flat, typed pieces:
//!
//! 1. **Record splitting**: a scene document becomes a lazy sequence of
//!    [`Record`]s, one per `--- !u!<class> &<id>` header.
//! 2. **Field extraction**: [`fields`] reads scalars, single references and
//!    reference lists out of one record body.
//! 3. **Metadata**: [`meta`] reads asset identifiers from `.meta` files and
//!    collects them into an [`AssetRegistry`].
//! 4. **Discovery**: [`discovery`] walks a project for scenes and scripts.
//!
//! Parsing never fails. Text that does not match is skipped and the caller
//! gets whatever could be read; only file system access returns errors.

pub mod discovery;
pub mod fields;
pub mod kind;
pub mod meta;
pub mod records;

pub use discovery::{ProjectFiles, discover};
pub use fields::{ObjectRef, ReferenceField, ReferenceListField, ScalarField, section};
pub use kind::RecordKind;
pub use meta::{AssetRegistry, AssetRegistryEntry, read_guid};
pub use records::{Record, RecordHeader, Records, parse_header, records};
pub use scenedig_error::{Result, ScenedigError};

use log::warn;
use std::path::Path;

/// Read a scene document into memory.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD and a warning is
/// logged; only a failed read is an error.
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| ScenedigError::io_with_path(e.to_string(), path))?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "{} is not valid UTF-8 (first bad byte at offset {}), decoding lossily",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
