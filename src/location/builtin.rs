//! Built-in gazetteer: the 22 Taiwan cities and counties.
//!
//! District lists are carried for 臺北市, 新北市, 桃園市 and 高雄市 only.
//! The remaining cities reuse short-names such as 東區, 北區 or 中正區 that
//! already belong to one of those four, and a district may only belong to
//! one city, so they resolve at city level.

use indexmap::IndexMap;

use super::gazetteer::{Gazetteer, GazetteerEntry, GazetteerFile};
use super::types::GazetteerError;

struct BuiltinCity {
    name: &'static str,
    id: &'static str, // CWA township forecast dataset
    districts: &'static [&'static str],
}

const BUILTIN_CITIES: &[BuiltinCity] = &[
    BuiltinCity {
        name: "臺北市",
        id: "F-D0047-061",
        districts: &[
            "中正區", "大同區", "中山區", "松山區", "大安區", "萬華區",
            "信義區", "士林區", "北投區", "內湖區", "南港區", "文山區",
        ],
    },
    BuiltinCity {
        name: "新北市",
        id: "F-D0047-069",
        districts: &[
            "板橋區", "三重區", "中和區", "永和區", "新莊區", "新店區",
            "樹林區", "鶯歌區", "三峽區", "淡水區", "汐止區", "瑞芳區",
            "土城區", "蘆洲區", "五股區", "泰山區", "林口區", "深坑區",
            "石碇區", "坪林區", "三芝區", "石門區", "八里區", "平溪區",
            "雙溪區", "貢寮區", "金山區", "萬里區", "烏來區",
        ],
    },
    BuiltinCity {
        name: "桃園市",
        id: "F-D0047-005",
        districts: &[
            "桃園區", "中壢區", "大溪區", "楊梅區", "蘆竹區", "大園區", "龜山區",
            "八德區", "龍潭區", "平鎮區", "新屋區", "觀音區", "復興區",
        ],
    },
    BuiltinCity { name: "臺中市", id: "F-D0047-073", districts: &[] },
    BuiltinCity { name: "臺南市", id: "F-D0047-077", districts: &[] },
    BuiltinCity {
        name: "高雄市",
        id: "F-D0047-065",
        districts: &[
            "楠梓區", "左營區", "鼓山區", "三民區", "鹽埕區", "前金區",
            "新興區", "苓雅區", "前鎮區", "旗津區", "小港區", "鳳山區",
            "林園區", "大寮區", "大樹區", "大社區", "仁武區", "鳥松區",
            "岡山區", "橋頭區", "燕巢區", "田寮區", "阿蓮區", "路竹區",
            "湖內區", "茄萣區", "永安區", "彌陀區", "梓官區", "旗山區",
            "美濃區", "六龜區", "甲仙區", "杉林區", "內門區", "茂林區",
            "桃源區", "那瑪夏區",
        ],
    },
    BuiltinCity { name: "基隆市", id: "F-D0047-049", districts: &[] },
    BuiltinCity { name: "新竹市", id: "F-D0047-053", districts: &[] },
    BuiltinCity { name: "新竹縣", id: "F-D0047-009", districts: &[] },
    BuiltinCity { name: "苗栗縣", id: "F-D0047-013", districts: &[] },
    BuiltinCity { name: "彰化縣", id: "F-D0047-017", districts: &[] },
    BuiltinCity { name: "南投縣", id: "F-D0047-021", districts: &[] },
    BuiltinCity { name: "雲林縣", id: "F-D0047-025", districts: &[] },
    BuiltinCity { name: "嘉義市", id: "F-D0047-057", districts: &[] },
    BuiltinCity { name: "嘉義縣", id: "F-D0047-029", districts: &[] },
    BuiltinCity { name: "屏東縣", id: "F-D0047-033", districts: &[] },
    BuiltinCity { name: "宜蘭縣", id: "F-D0047-001", districts: &[] },
    BuiltinCity { name: "花蓮縣", id: "F-D0047-041", districts: &[] },
    BuiltinCity { name: "臺東縣", id: "F-D0047-037", districts: &[] },
    BuiltinCity { name: "澎湖縣", id: "F-D0047-045", districts: &[] },
    BuiltinCity { name: "金門縣", id: "F-D0047-085", districts: &[] },
    BuiltinCity { name: "連江縣", id: "F-D0047-081", districts: &[] },
];

/// Colloquial city names beyond the suffix-less stems.
const EXTRA_CITY_ALIASES: &[(&str, &str)] = &[
    ("北市", "臺北市"),
    ("高市", "高雄市"),
    ("府城", "臺南市"),
    ("馬祖", "連江縣"),
];

/// Landmarks people use in place of the district name.
const EXTRA_DISTRICT_ALIASES: &[(&str, &str)] = &[
    ("西門町", "萬華區"),
    ("101", "信義區"),
    ("駁二", "鹽埕區"),
    ("夢時代", "前鎮區"),
];

/// Strip one administrative suffix, keeping stems of two or more characters.
fn stem<'a>(name: &'a str, suffixes: &[char]) -> Option<&'a str> {
    let stripped = name.strip_suffix(suffixes)?;
    (stripped.chars().count() >= 2).then_some(stripped)
}

/// The built-in data in its on-disk shape.
///
/// City aliases are each city's stem (`臺北市` → `臺北`); where two cities
/// share a stem (新竹市/新竹縣) the first declared wins. District aliases
/// are the stems of district names (`中和區` → `中和`), except stems that
/// already name a city.
pub fn builtin_file() -> GazetteerFile {
    let cities: Vec<GazetteerEntry> = BUILTIN_CITIES
        .iter()
        .map(|c| GazetteerEntry {
            name: c.name.to_string(),
            id: c.id.to_string(),
            districts: c
                .districts
                .iter()
                .map(|d| (d.to_string(), format!("{}{}", c.name, d)))
                .collect(),
        })
        .collect();

    let mut city_aliases = IndexMap::new();
    for city in BUILTIN_CITIES {
        if let Some(s) = stem(city.name, &['市', '縣']) {
            city_aliases.entry(s.to_string()).or_insert_with(|| city.name.to_string());
        }
    }
    for (alias, city) in EXTRA_CITY_ALIASES {
        city_aliases.insert(alias.to_string(), city.to_string());
    }

    // A district stem that is also a city's stem (桃園區 → 桃園) would shadow
    // the city-level stages, so it is left to the city alias.
    let mut district_aliases = IndexMap::new();
    for city in BUILTIN_CITIES {
        for district in city.districts {
            let Some(s) = stem(district, &['區', '鎮', '鄉']) else {
                continue;
            };
            let shadows_city = city_aliases.contains_key(s)
                || BUILTIN_CITIES.iter().any(|c| c.name.contains(s));
            if !shadows_city {
                district_aliases.insert(s.to_string(), district.to_string());
            }
        }
    }
    for (alias, district) in EXTRA_DISTRICT_ALIASES {
        district_aliases.insert(alias.to_string(), district.to_string());
    }

    GazetteerFile { cities, city_aliases, district_aliases }
}

impl Gazetteer {
    /// The built-in Taiwan gazetteer.
    pub fn builtin() -> Result<Self, GazetteerError> {
        Self::from_file(builtin_file())
    }
}
