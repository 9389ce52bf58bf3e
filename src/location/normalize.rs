//! Input normalization: filler removal, emoji stripping and 台/臺 folding.

use std::borrow::Cow;
use std::sync::LazyLock;

/// The informal "Tai" character used interchangeably as a place-name prefix.
pub const TAI_INFORMAL: char = '台';
/// The formal variant used by every gazetteer key.
pub const TAI_FORMAL: char = '臺';

/// Words that never name a place: greetings, politeness, question particles,
/// weather vocabulary, colloquial fillers and punctuation. ASCII entries are
/// lowercase; input is ASCII-lowercased before removal.
const FILLER_TOKENS: &[&str] = &[
    // greetings
    "你好", "您好", "哈囉", "哈摟", "嗨", "安安", "早安", "午安", "晚安", "hello",
    // politeness
    "請問", "請", "麻煩", "拜託", "謝謝", "感謝", "幫我", "幫忙", "可以",
    // asking
    "查一下", "查詢", "查", "看一下", "看看", "告訴我", "想知道", "我想", "我要",
    "一下", "目前", "現在", "今天", "明天", "後天", "這幾天", "最近", "等等",
    // weather words
    "天氣", "氣溫", "溫度", "氣象", "預報", "下雨", "降雨", "會不會", "有沒有", "冷不冷", "熱不熱",
    // question particles
    "怎麼樣", "怎樣", "如何", "好嗎", "嗎", "呢", "吧", "啊", "呀", "喔", "哦", "耶", "欸", "誒", "的",
    // internet fillers
    "哈哈", "xd", "qq",
    // punctuation
    "？", "?", "！", "!", "，", ",", "。", ".", "、", "~", "～", "…",
];

/// Longest first; equal lengths keep declared order.
static FILLERS_BY_LENGTH: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    let mut tokens = FILLER_TOKENS.to_vec();
    tokens.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    tokens
});

/// The filler vocabulary removed by [`normalize`].
pub fn filler_tokens() -> &'static [&'static str] {
    FILLER_TOKENS
}

/// Lowercases ASCII, removes every filler token, then emoji, then trims.
///
/// Tokens are removed longest-first so a phrase like `查一下` is never split
/// by the shorter `查` it contains.
pub fn normalize(input: &str) -> String {
    let mut text = input.to_ascii_lowercase();
    for token in FILLERS_BY_LENGTH.iter() {
        if text.contains(token) {
            text = text.replace(token, "");
        }
    }

    text.chars()
        .filter(|c| !is_emoji(*c))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Rewrites the informal 台 to the formal 臺. Borrows when there is nothing
/// to rewrite.
pub fn fold_variant(s: &str) -> Cow<'_, str> {
    if s.contains(TAI_INFORMAL) {
        Cow::Owned(s.replace(TAI_INFORMAL, &TAI_FORMAL.to_string()))
    } else {
        Cow::Borrowed(s)
    }
}

fn is_emoji(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1FAFF   // pictographs, emoticons, transport, flags
        | 0x2600..=0x27BF   // misc symbols, dingbats
        | 0x2B00..=0x2BFF   // arrows, stars
        | 0xFE00..=0xFE0F   // variation selectors
        | 0x200D            // zero width joiner
        | 0x20E3            // keycap
    )
}
