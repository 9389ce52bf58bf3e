//! The gazetteer: canonical cities, their districts, and the alias tables.
//!
//! Built once at startup and read-only afterwards. Construction validates
//! the data so the resolver can rely on three things: city names are unique,
//! a district short-name belongs to exactly one city, and every alias points
//! at something that exists. All comparisons are 台/臺-folded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::normalize::fold_variant;
use super::types::GazetteerError;

/// One top-level administrative region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    /// Canonical city name, e.g. `臺北市`.
    pub name: String,
    /// Opaque id used to query the weather source for this city.
    pub id: String,
    /// District short-name → full official name, in declared order.
    #[serde(default)]
    pub districts: IndexMap<String, String>,
}

/// On-disk shape of a gazetteer (`--gazetteer` / `--dump-gazetteer`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerFile {
    pub cities: Vec<GazetteerEntry>,
    #[serde(default)]
    pub city_aliases: IndexMap<String, String>,
    #[serde(default)]
    pub district_aliases: IndexMap<String, String>,
}

/// A match key: the folded text to search for and what it stands for.
#[derive(Debug, Clone)]
pub(crate) struct Key {
    pub folded: String,
    pub city: usize,
    pub district: Option<String>,
}

/// Validated, immutable gazetteer.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    entries: Vec<GazetteerEntry>,
    city_aliases: IndexMap<String, String>,
    district_aliases: IndexMap<String, String>,
    // Precomputed folded keys, each in declared order.
    district_keys: Vec<Key>,
    district_alias_keys: Vec<Key>,
    city_keys: Vec<Key>,
    city_alias_keys: Vec<Key>,
    district_owner: HashMap<String, usize>,
}

impl Gazetteer {
    /// Validate and index a gazetteer.
    ///
    /// City names are canonicalized to the formal 臺 variant here, so every
    /// city the resolver returns is already in formal form.
    pub fn from_file(file: GazetteerFile) -> Result<Self, GazetteerError> {
        let mut entries = file.cities;
        let mut city_index: HashMap<String, usize> = HashMap::new();
        let mut district_owner: HashMap<String, usize> = HashMap::new();
        let mut district_keys = Vec::new();
        let mut city_keys = Vec::new();

        for (idx, entry) in entries.iter_mut().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() {
                return Err(GazetteerError::EmptyCityName);
            }
            let canonical = fold_variant(name).into_owned();
            if city_index.insert(canonical.clone(), idx).is_some() {
                return Err(GazetteerError::DuplicateCity(canonical));
            }
            entry.name = canonical.clone();
            city_keys.push(Key { folded: canonical, city: idx, district: None });
        }

        for (idx, entry) in entries.iter().enumerate() {
            for district in entry.districts.keys() {
                if district.trim().is_empty() {
                    return Err(GazetteerError::EmptyDistrictName { city: entry.name.clone() });
                }
                let folded = fold_variant(district).into_owned();
                if let Some(&first) = district_owner.get(&folded) {
                    return Err(GazetteerError::DuplicateDistrict {
                        district: district.clone(),
                        first: entries[first].name.clone(),
                        second: entry.name.clone(),
                    });
                }
                district_owner.insert(folded.clone(), idx);
                district_keys.push(Key { folded, city: idx, district: Some(district.clone()) });
            }
        }

        let mut city_alias_keys = Vec::with_capacity(file.city_aliases.len());
        for (alias, target) in &file.city_aliases {
            let city = city_index
                .get(&*fold_variant(target))
                .copied()
                .ok_or_else(|| GazetteerError::UnknownCity {
                    alias: alias.clone(),
                    target: target.clone(),
                })?;
            city_alias_keys.push(Key { folded: fold_variant(alias).into_owned(), city, district: None });
        }

        let mut district_alias_keys = Vec::with_capacity(file.district_aliases.len());
        for (alias, target) in &file.district_aliases {
            let city = district_owner
                .get(&*fold_variant(target))
                .copied()
                .ok_or_else(|| GazetteerError::UnknownDistrict {
                    alias: alias.clone(),
                    target: target.clone(),
                })?;
            // Point at the declared spelling, not the alias target's spelling.
            let district = entries[city]
                .districts
                .keys()
                .find(|d| fold_variant(d) == fold_variant(target))
                .cloned();
            district_alias_keys.push(Key { folded: fold_variant(alias).into_owned(), city, district });
        }

        tracing::debug!(
            cities = entries.len(),
            districts = district_keys.len(),
            city_aliases = city_alias_keys.len(),
            district_aliases = district_alias_keys.len(),
            "gazetteer indexed"
        );

        Ok(Self {
            entries,
            city_aliases: file.city_aliases,
            district_aliases: file.district_aliases,
            district_keys,
            district_alias_keys,
            city_keys,
            city_alias_keys,
            district_owner,
        })
    }

    /// Load a gazetteer from a JSON file.
    pub fn load(path: &Path) -> Result<Self, GazetteerError> {
        let data = fs::read_to_string(path)?;
        let file: GazetteerFile = serde_json::from_str(&data)?;
        Self::from_file(file)
    }

    /// The on-disk representation of this gazetteer.
    pub fn to_file(&self) -> GazetteerFile {
        GazetteerFile {
            cities: self.entries.clone(),
            city_aliases: self.city_aliases.clone(),
            district_aliases: self.district_aliases.clone(),
        }
    }

    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    /// Look up a city by canonical name (either Tai variant).
    pub fn city(&self, name: &str) -> Option<&GazetteerEntry> {
        let folded = fold_variant(name);
        self.entries.iter().find(|e| e.name == *folded)
    }

    /// The city that owns a district short-name.
    pub fn owner_of(&self, district: &str) -> Option<&GazetteerEntry> {
        self.district_owner
            .get(&*fold_variant(district))
            .map(|&idx| &self.entries[idx])
    }

    pub fn city_aliases(&self) -> &IndexMap<String, String> {
        &self.city_aliases
    }

    pub fn district_aliases(&self) -> &IndexMap<String, String> {
        &self.district_aliases
    }

    pub(crate) fn entry_at(&self, idx: usize) -> &GazetteerEntry {
        &self.entries[idx]
    }

    pub(crate) fn district_keys(&self) -> &[Key] {
        &self.district_keys
    }

    pub(crate) fn district_alias_keys(&self) -> &[Key] {
        &self.district_alias_keys
    }

    pub(crate) fn city_keys(&self) -> &[Key] {
        &self.city_keys
    }

    pub(crate) fn city_alias_keys(&self) -> &[Key] {
        &self.city_alias_keys
    }
}
