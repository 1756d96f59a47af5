//! User profile and preferences
//!
//! Both are single instances for the whole session. Updates are shallow
//! merges: fields left as `None` keep their current value.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image reference (usually a URL)
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "1".to_string(),
            name: "John Doe".to_string(),
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=John".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn apply(&mut self, update: UserProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = avatar;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }
}

impl std::fmt::Display for FontSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FontSize {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(SessionError::UnknownFontSize(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub dark_mode: bool,
    pub font_size: FontSize,
    pub notifications_enabled: bool,
    pub autocomplete_suggestions: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: FontSize::Medium,
            notifications_enabled: true,
            autocomplete_suggestions: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete_suggestions: Option<bool>,
}

impl Preferences {
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(dark_mode) = update.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(font_size) = update.font_size {
            self.font_size = font_size;
        }
        if let Some(enabled) = update.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(enabled) = update.autocomplete_suggestions {
            self.autocomplete_suggestions = enabled;
        }
    }
}

impl From<Preferences> for PreferencesUpdate {
    fn from(p: Preferences) -> Self {
        Self {
            dark_mode: Some(p.dark_mode),
            font_size: Some(p.font_size),
            notifications_enabled: Some(p.notifications_enabled),
            autocomplete_suggestions: Some(p.autocomplete_suggestions),
        }
    }
}
