//! Stable installer identifiers.
//!
//! Every file in the frozen tree gets a component GUID. GUIDs must stay
//! stable across rebuilds for unchanged paths (differential upgrades break
//! otherwise) and unique within one manifest. Stability comes from two
//! layers: a persisted path→GUID record carried between runs, and
//! deterministic name-based (v5) minting for paths the record has never
//! seen, namespaced by the product upgrade code.

use crate::release::error::{Error, ErrorExt, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use uuid::Uuid;

/// Normalizes a relative path for use as an identifier-record key.
///
/// Components are joined with forward slashes regardless of platform, so
/// records written on Windows and Unix agree byte-for-byte.
pub fn normalize_rel_path(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(os) => Some(os.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Mints the GUID for a previously-unseen path.
///
/// Name-based (v5) UUID of the normalized relative path under the product
/// namespace: the same path in the same product always yields the same
/// GUID, and distinct paths yield distinct GUIDs. Rendered uppercase, the
/// conventional form in installer manifests.
pub fn mint_guid(namespace: &Uuid, rel_path: &str) -> String {
    Uuid::new_v5(namespace, rel_path.as_bytes())
        .to_string()
        .to_uppercase()
}

/// Minting name for the shortcut component GUID. Contains a NUL byte,
/// which no path component can, so no payload file mints the same GUID.
const SHORTCUT_GUID_NAME: &[u8] = b"shortcut\0start-menu";

/// Derives a manifest element identifier (`cmp…`, `fil…`, `dir…`).
///
/// Element ids must start with a letter and stay unique within the
/// document; a prefix-tagged v5 hash of the path satisfies both and keeps
/// the document byte-identical across runs.
pub fn element_id(prefix: &str, namespace: &Uuid, rel_path: &str) -> String {
    let tagged = format!("{prefix}:{rel_path}");
    format!(
        "{prefix}{}",
        Uuid::new_v5(namespace, tagged.as_bytes()).simple()
    )
}

/// Persisted mapping from normalized relative paths to component GUIDs.
///
/// Stored as a flat JSON object. `BTreeMap` keeps on-disk key order
/// deterministic, and the mapping round-trips exactly: the file is the
/// cross-run memory that keeps upgrades differential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierRecord {
    entries: BTreeMap<String, String>,
}

impl IdentifierRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a record from disk.
    ///
    /// A missing file yields an empty record (first build of a product);
    /// a present-but-invalid file is an error, not silently ignored, since
    /// regenerating all GUIDs would break upgrades for every installed
    /// copy.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no identifier record at {}, starting fresh", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e).fs_context("reading identifier record", path),
        };
        serde_json::from_str(&raw).map_err(|source| Error::RecordParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes the record as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        crate::release::utils::fs::write_text_sync(path, &json)
    }

    /// Returns the GUID recorded for a normalized path, if any.
    pub fn get(&self, rel_path: &str) -> Option<&str> {
        self.entries.get(rel_path).map(String::as_str)
    }

    /// Records a path→GUID assignment.
    pub fn insert(&mut self, rel_path: String, guid: String) {
        self.entries.insert(rel_path, guid);
    }

    /// Number of recorded paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no paths are recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(path, guid)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Assigns GUIDs during a single manifest generation pass.
///
/// Wraps the prior record with uniqueness enforcement and tracks which
/// assignments were newly minted. Consumed into the new record once the
/// walk is complete, so the output record contains exactly the paths
/// present in the current tree.
pub struct IdentifierAllocator<'a> {
    namespace: Uuid,
    prior: &'a IdentifierRecord,
    assigned: IdentifierRecord,
    seen: HashMap<String, String>,
    minted: usize,
}

impl<'a> IdentifierAllocator<'a> {
    /// Creates an allocator minting under `namespace` (the product upgrade
    /// code), reusing assignments from `prior` where present.
    pub fn new(namespace: Uuid, prior: &'a IdentifierRecord) -> Self {
        Self {
            namespace,
            prior,
            assigned: IdentifierRecord::new(),
            seen: HashMap::new(),
            minted: 0,
        }
    }

    /// Returns the GUID for `rel_path`, reusing the prior record's entry or
    /// minting a new one.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentifier`] when the resulting GUID is already
    /// held by a different path in this pass (a corrupt prior record).
    pub fn assign(&mut self, rel_path: &str) -> Result<String> {
        if let Some(existing) = self.assigned.get(rel_path) {
            return Ok(existing.to_string());
        }

        let guid = match self.prior.get(rel_path) {
            Some(recorded) => recorded.to_uppercase(),
            None => {
                self.minted += 1;
                mint_guid(&self.namespace, rel_path)
            }
        };

        if let Some(holder) = self.seen.get(&guid) {
            return Err(Error::DuplicateIdentifier {
                guid,
                path: rel_path.to_string(),
                prior_path: holder.clone(),
            });
        }

        self.seen.insert(guid.clone(), rel_path.to_string());
        self.assigned.insert(rel_path.to_string(), guid.clone());
        Ok(guid)
    }

    /// Manifest element id for this allocator's namespace.
    pub fn element_id(&self, prefix: &str, rel_path: &str) -> String {
        element_id(prefix, &self.namespace, rel_path)
    }

    /// GUID for the start-menu shortcut component.
    ///
    /// Minted from a name no normalized path can equal and checked against
    /// this pass's other assignments. The shortcut is not a payload file
    /// and never appears in the identifier record.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateIdentifier`] when a prior-record entry already
    /// claimed this GUID for a payload path.
    pub fn assign_shortcut(&mut self) -> Result<String> {
        let guid = Uuid::new_v5(&self.namespace, SHORTCUT_GUID_NAME)
            .to_string()
            .to_uppercase();
        let holder = "start-menu shortcut";
        if let Some(prior_path) = self.seen.get(&guid) {
            return Err(Error::DuplicateIdentifier {
                guid,
                path: holder.to_string(),
                prior_path: prior_path.clone(),
            });
        }
        self.seen.insert(guid.clone(), holder.to_string());
        Ok(guid)
    }

    /// Number of GUIDs minted (not found in the prior record) so far.
    pub fn minted(&self) -> usize {
        self.minted
    }

    /// Finishes the pass, yielding the record of all assignments made.
    pub fn into_record(self) -> IdentifierRecord {
        self.assigned
    }
}
