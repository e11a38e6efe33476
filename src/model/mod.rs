use serde::{Deserialize, Serialize};

/// One mod declared inside an archive's embedded metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModDescriptor {
    /// Stable identifier; the primary key used for exact matching.
    pub mod_id: String,
    pub version: String,
    pub display_name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_file: Option<String>,
}

/// The structured metadata block of one archive.
///
/// `mods` keeps declaration order and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveMetadata {
    pub mod_loader: String,
    pub loader_version: String,
    pub license: String,
    #[serde(default)]
    pub mods: Vec<ModDescriptor>,
}

/// Name and version guessed from a filename alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeuristicIdentity {
    pub name: String,
    pub version: Option<String>,
}

/// One scanned archive.
///
/// A record with no descriptors and no heuristic identity is valid: it
/// represents an archive whose identity could not be extracted at all and
/// still takes part in the report as unmatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveRecord {
    pub file_name: String,
    pub full_path: String,
    pub mods: Vec<ModDescriptor>,
    pub heuristic: Option<HeuristicIdentity>,
}

impl ArchiveRecord {
    /// Creates a record carrying structured descriptors.
    pub fn with_mods(
        file_name: impl Into<String>,
        full_path: impl Into<String>,
        mods: Vec<ModDescriptor>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            full_path: full_path.into(),
            mods,
            heuristic: None,
        }
    }

    /// Creates a record whose identity comes from the filename heuristic,
    /// or from nothing at all when `heuristic` is `None`.
    pub fn with_heuristic(
        file_name: impl Into<String>,
        full_path: impl Into<String>,
        heuristic: Option<HeuristicIdentity>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            full_path: full_path.into(),
            mods: Vec::new(),
            heuristic,
        }
    }

    /// Keys registered for exact matching: every mod id in declaration
    /// order, followed by the heuristic name when present.
    pub fn identity_keys(&self) -> impl Iterator<Item = &str> {
        self.mods
            .iter()
            .map(|descriptor| descriptor.mod_id.as_str())
            .chain(self.heuristic.iter().map(|identity| identity.name.as_str()))
    }

    /// Returns `true` when neither structured nor heuristic identity exists.
    pub fn is_unidentified(&self) -> bool {
        self.mods.is_empty() && self.heuristic.is_none()
    }

    /// Human readable identity used in reports.
    pub fn display_identity(&self) -> String {
        if let Some(descriptor) = self.mods.first() {
            return descriptor.mod_id.clone();
        }
        match &self.heuristic {
            Some(HeuristicIdentity {
                name,
                version: Some(version),
            }) => format!("{name} {version}"),
            Some(HeuristicIdentity { name, version: None }) => name.clone(),
            None => "<unknown>".to_string(),
        }
    }
}

/// A local archive paired with a remote archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub local: &'a ArchiveRecord,
    pub remote: &'a ArchiveRecord,
    /// In `[0, 1]`; exactly `1.0` for exact-key matches.
    pub similarity: f64,
}

/// Outcome of reconciling a local inventory against a remote one.
///
/// The report borrows from the inventories it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciliationReport<'a> {
    pub matches: Vec<MatchResult<'a>>,
    pub unmatched_local: Vec<&'a ArchiveRecord>,
    pub unmatched_remote: Vec<&'a ArchiveRecord>,
}
