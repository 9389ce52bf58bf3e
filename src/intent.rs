//! Keyword intent classification.
//!
//! Decides whether a chat message is asking about the weather somewhere (and
//! so should go through the region resolver) or is ordinary conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Weather,
    Chat,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weather => write!(f, "weather"),
            Self::Chat => write!(f, "chat"),
        }
    }
}

const WEATHER_KEYWORDS: &[&str] = &[
    "天氣", "氣溫", "溫度", "氣象", "預報", "下雨", "降雨", "雨量", "颱風",
    "冷不冷", "熱不熱", "帶傘", "出太陽", "晴天", "陰天", "紫外線",
    // ASCII, matched lowercased
    "weather", "rain", "forecast", "temperature",
];

/// Classify a message by keyword.
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();
    if contains_any(&lowered, WEATHER_KEYWORDS) {
        Intent::Weather
    } else {
        Intent::Chat
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_messages() {
        assert_eq!(classify("中和天氣如何？"), Intent::Weather);
        assert_eq!(classify("明天高雄會下雨嗎"), Intent::Weather);
        assert_eq!(classify("颱風要來了嗎"), Intent::Weather);
        assert_eq!(classify("Taipei WEATHER"), Intent::Weather);
    }

    #[test]
    fn test_chat_messages() {
        assert_eq!(classify("你好"), Intent::Chat);
        assert_eq!(classify("推薦我一本書"), Intent::Chat);
        assert_eq!(classify(""), Intent::Chat);
    }

    #[test]
    fn test_display() {
        assert_eq!(Intent::Weather.to_string(), "weather");
        assert_eq!(Intent::Chat.to_string(), "chat");
    }
}
