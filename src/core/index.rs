use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::utils::error::Result;

/// Sentinel organization name for OUIs with no registry entry.
pub const UNKNOWN_VENDOR: &str = "unknown";

/// On-disk value shape: a single organization name, or an ordered list when
/// the registry assigns one OUI to several organizations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrgNames {
    One(String),
    Many(Vec<String>),
}

impl From<Vec<String>> for OrgNames {
    fn from(mut names: Vec<String>) -> Self {
        if names.len() == 1 {
            OrgNames::One(names.remove(0))
        } else {
            OrgNames::Many(names)
        }
    }
}

impl From<OrgNames> for Vec<String> {
    fn from(names: OrgNames) -> Self {
        match names {
            OrgNames::One(name) => vec![name],
            OrgNames::Many(names) => names,
        }
    }
}

/// In-memory OUI -> organization-names mapping.
///
/// Built once per process from the derived cache file and read-only
/// afterwards. Values are always ordered lists, possibly of length one.
#[derive(Debug, Default)]
pub struct OuiIndex {
    entries: HashMap<String, Vec<String>>,
}

impl OuiIndex {
    /// Load the derived cache file. A missing file yields an empty index;
    /// the caller decides whether that is acceptable.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        let parsed: HashMap<String, OrgNames> = serde_json::from_str(&raw)?;
        let entries = parsed
            .into_iter()
            .map(|(oui, names)| (oui, names.into()))
            .collect();
        Ok(Self { entries })
    }

    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Look up an OUI in any case. Always returns at least one name; the
    /// `unknown` sentinel stands in for absent entries.
    pub fn lookup(&self, oui: &str) -> Vec<String> {
        self.entries
            .get(&oui.to_uppercase())
            .cloned()
            .unwrap_or_else(|| vec![UNKNOWN_VENDOR.to_string()])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialize an OUI map in the on-disk shape: sorted keys, scalar values for
/// single-organization entries, pretty-printed UTF-8.
pub fn to_index_json(entries: &HashMap<String, Vec<String>>) -> Result<String> {
    let on_disk: BTreeMap<&str, OrgNames> = entries
        .iter()
        .map(|(oui, names)| (oui.as_str(), OrgNames::from(names.clone())))
        .collect();
    Ok(serde_json::to_string_pretty(&on_disk)?)
}
