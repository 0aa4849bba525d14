//! Cloud and present-weather classification of trailing tokens
//!
//! Cloud base heights and other three-digit tokens look identical, so the two
//! code families cannot be told apart by a grammar. Each token instead runs
//! through an ordered rule list and the first matching rule decides.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{
    CLOUD_LAYER_CODES, CLOUD_LAYER_PATTERN, MAX_CLOUD_LAYERS, MAX_TRAILING_ASTERISKS,
    SPECIAL_CLOUD_CODES, VICINITY_PREFIX, WEATHER_CODES,
};

static CLOUD_LAYER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CLOUD_LAYER_PATTERN).expect("cloud layer pattern is valid"));

/// A trailing token tagged by the rule that matched it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedToken {
    Cloud(String),
    Weather(String),
    Unclassified(String),
}

impl ClassifiedToken {
    /// Apply the fallback rule to an unclassified token
    ///
    /// Three-digit tokens become cloud heights, everything else is treated
    /// as weather. Classified tokens are returned unchanged.
    pub fn resolve(self) -> Self {
        match self {
            ClassifiedToken::Unclassified(token) => {
                if is_three_digits(&token) {
                    ClassifiedToken::Cloud(token)
                } else {
                    ClassifiedToken::Weather(token)
                }
            }
            classified => classified,
        }
    }

    /// Original token text
    pub fn text(&self) -> &str {
        match self {
            ClassifiedToken::Cloud(text)
            | ClassifiedToken::Weather(text)
            | ClassifiedToken::Unclassified(text) => text,
        }
    }

    pub fn is_cloud(&self) -> bool {
        matches!(self, ClassifiedToken::Cloud(_))
    }

    pub fn is_weather(&self) -> bool {
        matches!(self, ClassifiedToken::Weather(_))
    }
}

/// Classify one token with the ordered rule list
///
/// Returns `Unclassified` when no rule matches; call
/// [`ClassifiedToken::resolve`] to apply the fallback.
pub fn classify_token(token: &str) -> ClassifiedToken {
    if is_cloud_code(token) {
        ClassifiedToken::Cloud(token.to_string())
    } else if is_weather_code(token) {
        ClassifiedToken::Weather(token.to_string())
    } else {
        ClassifiedToken::Unclassified(token.to_string())
    }
}

/// Cloud rules, in order: layer code prefix, layer code pattern, bare
/// three-digit height, whole-token sky condition code
pub fn is_cloud_code(token: &str) -> bool {
    let upper = token.to_uppercase();

    let stripped = strip_intensity(&upper);
    let stripped = strip_trailing_asterisks(stripped);
    if CLOUD_LAYER_CODES
        .iter()
        .any(|code| stripped.starts_with(code))
    {
        return true;
    }

    if CLOUD_LAYER_REGEX.is_match(&upper) {
        return true;
    }

    if is_three_digits(token) {
        return true;
    }

    SPECIAL_CLOUD_CODES.contains(&upper.as_str())
}

/// Weather rules: exact code, intensity-prefixed code, vicinity-prefixed code
pub fn is_weather_code(token: &str) -> bool {
    let upper = token.to_uppercase();

    if WEATHER_CODES.contains(&upper.as_str()) {
        return true;
    }

    if upper.len() > 1 && (upper.starts_with('-') || upper.starts_with('+')) {
        let base = &upper[1..];
        if WEATHER_CODES.contains(&base) {
            return true;
        }
    }

    if upper.len() > VICINITY_PREFIX.len() {
        if let Some(base) = upper.strip_prefix(VICINITY_PREFIX) {
            return WEATHER_CODES
                .iter()
                .filter(|code| !code.starts_with(VICINITY_PREFIX))
                .any(|code| *code == base);
        }
    }

    false
}

/// Cloud layers and weather string from the free-form section of a line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrailingTokens {
    /// First cloud tokens in line order, at most four
    pub clouds: Vec<String>,

    /// Weather tokens joined with single spaces
    pub weather: Option<String>,
}

impl TrailingTokens {
    /// Split and classify the free-form section of a line
    pub fn classify(remainder: &str) -> Self {
        let mut clouds = Vec::new();
        let mut weather = Vec::new();

        for token in remainder.split_whitespace() {
            match classify_token(token).resolve() {
                ClassifiedToken::Cloud(text) => clouds.push(text),
                // resolve() never yields Unclassified
                ClassifiedToken::Weather(text) | ClassifiedToken::Unclassified(text) => {
                    weather.push(text)
                }
            }
        }

        clouds.truncate(MAX_CLOUD_LAYERS);

        Self {
            clouds,
            weather: (!weather.is_empty()).then(|| weather.join(" ")),
        }
    }

    /// Cloud tokens spread over the fixed cloud columns
    pub fn cloud_columns(&self) -> [Option<String>; MAX_CLOUD_LAYERS] {
        std::array::from_fn(|index| self.clouds.get(index).cloned())
    }
}

fn strip_intensity(token: &str) -> &str {
    token
        .strip_prefix('-')
        .or_else(|| token.strip_prefix('+'))
        .unwrap_or(token)
}

fn strip_trailing_asterisks(token: &str) -> &str {
    let mut stripped = token;
    for _ in 0..MAX_TRAILING_ASTERISKS {
        match stripped.strip_suffix('*') {
            Some(rest) => stripped = rest,
            None => break,
        }
    }
    stripped
}

fn is_three_digits(token: &str) -> bool {
    token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit())
}
