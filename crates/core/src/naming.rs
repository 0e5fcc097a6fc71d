//! File naming conventions of the form `[Date]_[Title]_[Project]`.

use crate::error::ParseError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const NAMING_PREFERENCE_KEY: &str = "fileNamingConvention";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingConvention {
    #[default]
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
}

impl NamingConvention {
    pub const ALL: [NamingConvention; 4] = [
        NamingConvention::CamelCase,
        NamingConvention::KebabCase,
        NamingConvention::SnakeCase,
        NamingConvention::PascalCase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NamingConvention::CamelCase => "camelCase",
            NamingConvention::KebabCase => "kebab-case",
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::PascalCase => "PascalCase",
        }
    }

    /// Joins already-split words in this convention.
    pub fn join(self, words: &[&str]) -> String {
        let lower: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        match self {
            NamingConvention::KebabCase => lower.join("-"),
            NamingConvention::SnakeCase => lower.join("_"),
            NamingConvention::PascalCase => lower.iter().map(|w| capitalize(w)).collect(),
            NamingConvention::CamelCase => lower
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
                .collect(),
        }
    }
}

impl FromStr for NamingConvention {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamingConvention::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| ParseError::NamingConvention(s.to_string()))
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User preference passed explicitly to whatever formats names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NamingPreferences {
    pub convention: NamingConvention,
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect()
}

/// `YYYY-MM-DD_title[_project]`; a project without words is left off.
pub fn format_name(
    date: NaiveDate,
    title: &str,
    project: &str,
    prefs: &NamingPreferences,
) -> String {
    let mut name = format!(
        "{}_{}",
        date.format("%Y-%m-%d"),
        prefs.convention.join(&words(title))
    );
    let project = words(project);
    if !project.is_empty() {
        name.push('_');
        name.push_str(&prefs.convention.join(&project));
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn fmt(conv: NamingConvention) -> String {
        format_name(
            date(),
            "Marketing Presentation",
            "Q1 Launch",
            &NamingPreferences { convention: conv },
        )
    }

    #[test]
    fn every_convention_renders_the_sample() {
        assert_eq!(fmt(NamingConvention::CamelCase), "2024-03-01_marketingPresentation_q1Launch");
        assert_eq!(fmt(NamingConvention::KebabCase), "2024-03-01_marketing-presentation_q1-launch");
        assert_eq!(fmt(NamingConvention::SnakeCase), "2024-03-01_marketing_presentation_q1_launch");
        assert_eq!(fmt(NamingConvention::PascalCase), "2024-03-01_MarketingPresentation_Q1Launch");
    }

    #[test]
    fn punctuation_splits_words_and_empty_project_is_dropped() {
        let prefs = NamingPreferences {
            convention: NamingConvention::SnakeCase,
        };
        assert_eq!(
            format_name(date(), "budget--FINAL.v2", " ", &prefs),
            "2024-03-01_budget_final_v2"
        );
    }

    #[test]
    fn parses_exact_spellings_only() {
        assert_eq!("kebab-case".parse::<NamingConvention>(), Ok(NamingConvention::KebabCase));
        assert!("kebab".parse::<NamingConvention>().is_err());
        for c in NamingConvention::ALL {
            assert_eq!(c.to_string().parse::<NamingConvention>(), Ok(c));
        }
    }

    #[test]
    fn preferences_default_to_camel_case() {
        let prefs: NamingPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs.convention, NamingConvention::CamelCase);
        let json = serde_json::to_string(&NamingPreferences {
            convention: NamingConvention::SnakeCase,
        })
        .unwrap();
        assert_eq!(json, r#"{"convention":"snake_case"}"#);
    }
}
