use serde::{Deserialize, Serialize};

/// Visual mode applied to the whole surface. Exactly one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Night,
    Rainy,
    Cloudy,
    #[default]
    Clear,
}

const PRECIPITATION: &[&str] = &["Rain", "Drizzle", "Thunderstorm", "Snow"];
const OVERCAST: &[&str] = &["Clouds", "Mist", "Fog", "Haze"];

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Night => "night",
            Theme::Rainy => "rainy",
            Theme::Cloudy => "cloudy",
            Theme::Clear => "clear",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Night wins over any condition; then precipitation, then overcast.
/// Anything unrecognised is `Clear`.
pub fn select_theme(condition_main: &str, is_night: bool) -> Theme {
    if is_night {
        Theme::Night
    } else if PRECIPITATION.contains(&condition_main) {
        Theme::Rainy
    } else if OVERCAST.contains(&condition_main) {
        Theme::Cloudy
    } else {
        Theme::Clear
    }
}
