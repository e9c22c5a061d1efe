use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StudioError;

/// Kind of product shot. The derived ordering is the order prompts are built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleKind {
    Ecommerce,
    Lifestyle,
    Model,
}

impl StyleKind {
    pub const ALL: [StyleKind; 3] = [StyleKind::Ecommerce, StyleKind::Lifestyle, StyleKind::Model];

    pub fn label(&self) -> &'static str {
        match self {
            StyleKind::Ecommerce => "E-commerce",
            StyleKind::Lifestyle => "Lifestyle",
            StyleKind::Model => "Model",
        }
    }

    /// Lifestyle and model shots are placed into a scene, so they can use a
    /// background description or reference image.
    pub fn uses_background(&self) -> bool {
        matches!(self, StyleKind::Lifestyle | StyleKind::Model)
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StyleKind {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecommerce" | "e-commerce" => Ok(StyleKind::Ecommerce),
            "lifestyle" => Ok(StyleKind::Lifestyle),
            "model" => Ok(StyleKind::Model),
            other => Err(unknown_choice("photo style", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Any,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Any];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
            Gender::Any => "Any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SkinTone {
    Light,
    Fair,
    Medium,
    Olive,
    Brown,
    Dark,
    #[default]
    Any,
}

impl SkinTone {
    pub const ALL: [SkinTone; 7] = [
        SkinTone::Light,
        SkinTone::Fair,
        SkinTone::Medium,
        SkinTone::Olive,
        SkinTone::Brown,
        SkinTone::Dark,
        SkinTone::Any,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkinTone::Light => "Light",
            SkinTone::Fair => "Fair",
            SkinTone::Medium => "Medium",
            SkinTone::Olive => "Olive",
            SkinTone::Brown => "Brown",
            SkinTone::Dark => "Dark",
            SkinTone::Any => "Any",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Height {
    Short,
    Average,
    Tall,
    #[default]
    Any,
}

impl Height {
    pub const ALL: [Height; 4] = [Height::Short, Height::Average, Height::Tall, Height::Any];

    pub fn label(&self) -> &'static str {
        match self {
            Height::Short => "Short",
            Height::Average => "Average",
            Height::Tall => "Tall",
            Height::Any => "Any",
        }
    }
}

fn unknown_choice(kind: &str, value: &str) -> StudioError {
    StudioError::ValidationError(format!("unknown {}: '{}'", kind, value))
}

fn parse_label<T: Copy>(
    kind: &str,
    s: &str,
    all: &[T],
    label: fn(&T) -> &'static str,
) -> Result<T, StudioError> {
    let wanted = s.trim();
    all.iter()
        .find(|choice| label(*choice).eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| unknown_choice(kind, wanted))
}

impl FromStr for Gender {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("gender", s, &Gender::ALL, Gender::label)
    }
}

impl FromStr for SkinTone {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("skin tone", s, &SkinTone::ALL, SkinTone::label)
    }
}

impl FromStr for Height {
    type Err = StudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("height", s, &Height::ALL, Height::label)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for SkinTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Height {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Appearance of the person wearing or holding the product in model shots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    pub gender: Gender,
    pub skin_tone: SkinTone,
    pub height: Height,
    pub gesture: String,
}

impl ModelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_skin_tone(mut self, skin_tone: SkinTone) -> Self {
        self.skin_tone = skin_tone;
        self
    }

    pub fn with_height(mut self, height: Height) -> Self {
        self.height = height;
        self
    }

    pub fn with_gesture(mut self, gesture: impl Into<String>) -> Self {
        self.gesture = gesture.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_precedence_follows_ordering() {
        let mut styles = vec![StyleKind::Model, StyleKind::Ecommerce, StyleKind::Lifestyle];
        styles.sort();
        assert_eq!(styles, StyleKind::ALL.to_vec());
    }

    #[test]
    fn test_parse_style() {
        assert_eq!("E-commerce".parse::<StyleKind>().unwrap(), StyleKind::Ecommerce);
        assert_eq!(" MODEL ".parse::<StyleKind>().unwrap(), StyleKind::Model);
        assert!("portrait".parse::<StyleKind>().is_err());
    }

    #[test]
    fn test_parse_model_choices() {
        assert_eq!("female".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!("Olive".parse::<SkinTone>().unwrap(), SkinTone::Olive);
        assert_eq!("tall".parse::<Height>().unwrap(), Height::Tall);
        assert!(matches!(
            "giant".parse::<Height>(),
            Err(StudioError::ValidationError(_))
        ));
    }

    #[test]
    fn test_option_lists() {
        assert_eq!(SkinTone::ALL.len(), 7);
        assert_eq!(Gender::ALL.last(), Some(&Gender::Any));
        assert_eq!(ModelOptions::default().height, Height::Any);
    }
}
