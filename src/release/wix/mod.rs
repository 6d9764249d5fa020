//! Installer manifest generation.
//!
//! Produces the WiX source document (`.wxs`) describing every file under the
//! frozen application folder, together with the persisted identifier record
//! that keeps component GUIDs stable from one release to the next.
//!
//! The module is split into:
//! - `harvest` - walks the payload folder into a sorted tree
//! - `ids` - GUID minting, element ids, and the identifier record
//! - `template` / `document` - renders the tree into the manifest document
//! - `generator` - the pure entry point combining the above
//!
//! Generation never touches the filesystem beyond reading the payload
//! folder; callers decide where the document and record land.

mod document;
mod generator;
mod harvest;
mod ids;
mod template;

pub use generator::{GeneratedManifest, generate};
pub use harvest::{HarvestedDir, HarvestedFile, harvest};
pub use ids::{IdentifierAllocator, IdentifierRecord, mint_guid, normalize_rel_path};
