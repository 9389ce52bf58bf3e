//! Matcher stages, tried in fixed priority order.
//!
//! Every stage answers the same question over the folded, normalized input:
//! does any of my keys occur in it? The first key that does, in the
//! gazetteer's declared order, wins. There is no ranking by match length or
//! position.

use super::gazetteer::{Gazetteer, Key};
use super::types::MatchSource;

/// A successful stage match, borrowing from the gazetteer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'g> {
    pub city: &'g str,
    pub city_id: &'g str,
    pub district: Option<&'g str>,
    pub stage: MatchStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStage {
    /// A canonical district short-name (`信義區`).
    ExactDistrict,
    /// A district alias (`中和` → `中和區`); the owning city is implied.
    DistrictAlias,
    /// A canonical city name (`高雄市`).
    CityName,
    /// A city alias (`台北` → `臺北市`).
    CityAlias,
}

impl MatchStage {
    /// District-level evidence beats city-level evidence; canonical names
    /// beat aliases.
    pub const PRIORITY: [MatchStage; 4] = [
        MatchStage::ExactDistrict,
        MatchStage::DistrictAlias,
        MatchStage::CityName,
        MatchStage::CityAlias,
    ];

    /// Try this stage against input that is already normalized and folded.
    pub fn try_match<'g>(&self, gazetteer: &'g Gazetteer, folded_input: &str) -> Option<Match<'g>> {
        let keys = match self {
            Self::ExactDistrict => gazetteer.district_keys(),
            Self::DistrictAlias => gazetteer.district_alias_keys(),
            Self::CityName => gazetteer.city_keys(),
            Self::CityAlias => gazetteer.city_alias_keys(),
        };

        let key = first_contained(keys, folded_input)?;
        let entry = gazetteer.entry_at(key.city);
        Some(Match {
            city: &entry.name,
            city_id: &entry.id,
            district: key.district.as_deref(),
            stage: *self,
        })
    }

    pub fn source(&self) -> MatchSource {
        match self {
            Self::ExactDistrict => MatchSource::ExactDistrict,
            Self::DistrictAlias => MatchSource::DistrictAlias,
            Self::CityName => MatchSource::CityName,
            Self::CityAlias => MatchSource::CityAlias,
        }
    }
}

fn first_contained<'k>(keys: &'k [Key], haystack: &str) -> Option<&'k Key> {
    keys.iter().find(|k| !k.folded.is_empty() && haystack.contains(k.folded.as_str()))
}
