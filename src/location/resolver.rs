//! Region resolver: free text in, (city, district) out.
//!
//! Flow:  normalize → fold 台/臺 → ExactDistrict → DistrictAlias → CityName → CityAlias → failure
//!
//! Pure and synchronous. Every outcome, including unusable input, comes back
//! as a `ResolvedLocation`; nothing here returns `Err` or panics.

use std::sync::Arc;

use super::gazetteer::Gazetteer;
use super::matcher::MatchStage;
use super::normalize::{fold_variant, normalize};
use super::types::{FailureKind, ResolvedLocation};

const INVALID_INPUT_MESSAGE: &str = "請傳送文字訊息，告訴我想查詢的地區喔！";

const EMPTY_QUERY_MESSAGE: &str = "請告訴我想查詢哪個地區，例如：\n\
    ・臺北\n\
    ・信義區\n\
    ・中和天氣如何？";

/// The resolver over a shared, immutable gazetteer.
#[derive(Debug, Clone)]
pub struct RegionResolver {
    gazetteer: Arc<Gazetteer>,
}

impl RegionResolver {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self { gazetteer }
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Resolve one free-text message.
    pub fn resolve(&self, input: &str) -> ResolvedLocation {
        let normalized = normalize(input);
        if normalized.is_empty() {
            tracing::debug!(input, "nothing left after normalization");
            return ResolvedLocation::failed(FailureKind::EmptyQuery, EMPTY_QUERY_MESSAGE.to_string());
        }

        let folded = fold_variant(&normalized);
        for stage in MatchStage::PRIORITY {
            if let Some(m) = stage.try_match(&self.gazetteer, &folded) {
                tracing::debug!(
                    query = %normalized,
                    stage = ?stage,
                    city = m.city,
                    district = m.district.unwrap_or("-"),
                    "resolved"
                );
                return ResolvedLocation::found(m.city, m.city_id, m.district, stage.source());
            }
        }

        tracing::debug!(query = %normalized, "no region matched");
        ResolvedLocation::failed(FailureKind::NoMatch, no_match_message(&normalized))
    }

    /// Resolve a dynamically typed value. Only JSON strings are text; any
    /// other value is an invalid-input failure.
    pub fn resolve_value(&self, input: &serde_json::Value) -> ResolvedLocation {
        match input.as_str() {
            Some(text) => self.resolve(text),
            None => {
                tracing::debug!(kind = json_kind(input), "non-text input");
                ResolvedLocation::failed(FailureKind::InvalidInput, INVALID_INPUT_MESSAGE.to_string())
            }
        }
    }
}

fn no_match_message(query: &str) -> String {
    format!(
        "抱歉，找不到「{}」對應的地區。\n\
        你可以這樣問：\n\
        ・直接輸入地名，例如「臺北」、「高雄」\n\
        ・輸入完整區名，例如「信義區」、「板橋區」\n\
        ・用聊天的方式，例如「中和天氣如何？」",
        query
    )
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::normalize::filler_tokens;
    use crate::location::types::MatchSource;
    use serde_json::json;

    fn resolver() -> RegionResolver {
        RegionResolver::new(Arc::new(Gazetteer::builtin().unwrap()))
    }

    fn assert_consistent(r: &RegionResolver, loc: &ResolvedLocation) {
        // error iff nothing resolved
        assert_eq!(loc.error().is_some(), loc.city().is_none() && loc.district().is_none());
        assert_eq!(loc.error().is_some(), loc.failure().is_some());
        if let Some(district) = loc.district() {
            let city = loc.city().expect("district without city");
            let owner = r.gazetteer().owner_of(district).unwrap();
            assert_eq!(owner.name, city);
        }
    }

    #[test]
    fn test_district_alias_with_filler() {
        let r = resolver();
        let loc = r.resolve("中和天氣如何？");
        assert_eq!(loc.city(), Some("新北市"));
        assert_eq!(loc.district(), Some("中和區"));
        assert_eq!(loc.source(), Some(MatchSource::DistrictAlias));
        assert_eq!(loc.city_id(), Some("F-D0047-069"));
    }

    #[test]
    fn test_informal_city_alias() {
        let loc = resolver().resolve("台北天氣");
        assert_eq!(loc.city(), Some("臺北市"));
        assert_eq!(loc.district(), None);
        assert_eq!(loc.source(), Some(MatchSource::CityAlias));
    }

    #[test]
    fn test_only_filler_prompts_for_region() {
        let loc = resolver().resolve("欸幫我查一下下雨嗎");
        assert_eq!(loc.failure(), Some(FailureKind::EmptyQuery));
        assert_eq!(loc.error(), Some(EMPTY_QUERY_MESSAGE));
        assert!(loc.city().is_none());
    }

    #[test]
    fn test_non_text_value() {
        let r = resolver();
        for value in [json!(42), json!(null), json!(true), json!(["台北"]), json!({"text": "台北"})] {
            let loc = r.resolve_value(&value);
            assert_eq!(loc.failure(), Some(FailureKind::InvalidInput), "{}", value);
            assert_eq!(loc.error(), Some(INVALID_INPUT_MESSAGE));
        }
    }

    #[test]
    fn test_string_value_resolves() {
        let loc = resolver().resolve_value(&json!("高雄"));
        assert_eq!(loc.city(), Some("高雄市"));
    }

    #[test]
    fn test_full_district_name() {
        let loc = resolver().resolve("信義區的天氣");
        assert_eq!(loc.city(), Some("臺北市"));
        assert_eq!(loc.district(), Some("信義區"));
        assert_eq!(loc.source(), Some(MatchSource::ExactDistrict));
    }

    #[test]
    fn test_no_match_embeds_query() {
        let loc = resolver().resolve("東京天氣如何");
        assert_eq!(loc.failure(), Some(FailureKind::NoMatch));
        let msg = loc.error().unwrap();
        assert!(msg.contains("「東京」"));
        assert!(msg.contains("信義區"));
        assert!(msg.contains("中和天氣如何？"));
    }

    #[test]
    fn test_city_name_and_city_level_only_counties() {
        let r = resolver();
        assert_eq!(r.resolve("花蓮縣").city(), Some("花蓮縣"));
        assert_eq!(r.resolve("台東明天會下雨嗎").city(), Some("臺東縣"));
        assert_eq!(r.resolve("嘉義縣").city(), Some("嘉義縣"));
        assert_eq!(r.resolve("嘉義").city(), Some("嘉義市"));
    }

    #[test]
    fn test_district_beats_city() {
        let loc = resolver().resolve("高雄市三民區");
        assert_eq!(loc.city(), Some("高雄市"));
        assert_eq!(loc.district(), Some("三民區"));
    }

    #[test]
    fn test_ascii_filler_any_case() {
        let r = resolver();
        assert_eq!(r.resolve("HELLO").failure(), Some(FailureKind::EmptyQuery));
        assert_eq!(r.resolve("Hello 台北 XD").city(), Some("臺北市"));
    }

    #[test]
    fn test_taoyuan_city_level() {
        let r = resolver();
        let loc = r.resolve("桃園天氣");
        assert_eq!(loc.city(), Some("桃園市"));
        assert_eq!(loc.district(), None);
        assert_eq!(loc.source(), Some(MatchSource::CityAlias));
        assert_eq!(r.resolve("桃園區").district(), Some("桃園區"));
    }

    #[test]
    fn test_district_outranks_named_city() {
        // First match in declared order wins even when the text names a
        // different city; the district's owner is returned.
        let r = resolver();
        for (q, district) in [("基隆市信義區", "信義區"), ("臺中市大安區", "大安區"), ("基隆中正區天氣", "中正區")] {
            let loc = r.resolve(q);
            assert_eq!(loc.city(), Some("臺北市"), "{}", q);
            assert_eq!(loc.district(), Some(district), "{}", q);
            assert_eq!(loc.source(), Some(MatchSource::ExactDistrict), "{}", q);
        }
    }

    #[test]
    fn test_emoji_and_greetings() {
        let loc = resolver().resolve("哈囉☀️ 請問板橋今天天氣怎麼樣呢？🙏");
        assert_eq!(loc.city(), Some("新北市"));
        assert_eq!(loc.district(), Some("板橋區"));
    }

    #[test]
    fn test_idempotent() {
        let r = resolver();
        for q in ["中和天氣如何？", "台北", "東京", "", "   "] {
            assert_eq!(r.resolve(q), r.resolve(q));
        }
    }

    #[test]
    fn test_variant_equivalence() {
        let r = resolver();
        for q in ["臺北", "臺北市信義區", "臺東", "臺南天氣", "臺中"] {
            let informal = q.replace('臺', "台");
            assert_eq!(r.resolve(q), r.resolve(&informal), "{}", q);
        }
    }

    #[test]
    fn test_filler_invariance() {
        let r = resolver();
        let bases = ["中和", "信義區", "台北", "高雄市", "西門町"];
        for base in bases {
            let expected = r.resolve(base);
            for filler in filler_tokens() {
                let before = r.resolve(&format!("{}{}", filler, base));
                let after = r.resolve(&format!("{}{}", base, filler));
                assert_eq!(before.city(), expected.city(), "{} + {}", filler, base);
                assert_eq!(before.district(), expected.district(), "{} + {}", filler, base);
                assert_eq!(after.city(), expected.city(), "{} + {}", base, filler);
                assert_eq!(after.district(), expected.district(), "{} + {}", base, filler);
            }
        }
    }

    #[test]
    fn test_results_are_consistent() {
        let r = resolver();
        let queries = [
            "中和天氣如何？", "台北天氣", "欸幫我查一下下雨嗎", "信義區的天氣",
            "桃園", "那瑪夏會不會冷", "101附近", "金門", "馬祖", "火星", "",
        ];
        for q in queries {
            assert_consistent(&r, &r.resolve(q));
        }
        assert_consistent(&r, &r.resolve_value(&json!(42)));
    }

    #[test]
    fn test_custom_gazetteer() {
        use crate::location::gazetteer::{GazetteerEntry, GazetteerFile};

        let file = GazetteerFile {
            cities: vec![GazetteerEntry {
                name: "台東縣".into(),
                id: "TTT".into(),
                districts: [("臺東市".to_string(), "臺東縣臺東市".to_string())].into_iter().collect(),
            }],
            city_aliases: Default::default(),
            district_aliases: Default::default(),
        };
        let r = RegionResolver::new(Arc::new(Gazetteer::from_file(file).unwrap()));

        // informal spelling of both the district and the city
        let loc = r.resolve("台東市");
        assert_eq!(loc.city(), Some("臺東縣"));
        assert_eq!(loc.district(), Some("臺東市"));
        assert_eq!(loc.city_id(), Some("TTT"));
    }
}
