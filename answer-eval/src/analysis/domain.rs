//! Answer domains and per-domain value extraction
//!
//! The gold label decides the domain once per record. Multiple-choice is tried
//! first, then yes/no; anything else is free-form and is judged by the prefix
//! fallback in the scorer.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use crate::records::Gold;

/// Standalone choice letter a-d or digit 0-3
static CHOICE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-d]|[0-3])\b").expect("Invalid choice token regex"));

/// Standalone yes/no style token
static YES_NO_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(yes|no|true|false|0|1)\b").expect("Invalid yes/no token regex")
});

/// Answer-format category of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    MultipleChoice,
    YesNo,
    FreeForm,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::MultipleChoice => "multiple-choice",
            Domain::YesNo => "yes/no",
            Domain::FreeForm => "free-form",
        }
    }

    /// Extract this domain's canonical value from raw text.
    ///
    /// Free-form text has no structured value.
    pub fn extract(&self, text: &str) -> Option<u8> {
        match self {
            Domain::MultipleChoice => extract_choice(text),
            Domain::YesNo => extract_yes_no(text),
            Domain::FreeForm => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gold label classified into its domain, carrying the canonical gold value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldClass {
    /// 0-based choice index
    MultipleChoice(u8),
    /// 1 for yes, 0 for no
    YesNo(u8),
    FreeForm,
}

impl GoldClass {
    /// Classify a gold label
    pub fn classify(gold: &Gold) -> Self {
        if let Some(index) = extract_choice(&gold.as_text()) {
            return GoldClass::MultipleChoice(index);
        }
        if let Some(value) = yes_no_from_gold(gold) {
            return GoldClass::YesNo(value);
        }
        GoldClass::FreeForm
    }

    pub fn domain(&self) -> Domain {
        match self {
            GoldClass::MultipleChoice(_) => Domain::MultipleChoice,
            GoldClass::YesNo(_) => Domain::YesNo,
            GoldClass::FreeForm => Domain::FreeForm,
        }
    }

    pub fn gold_value(&self) -> Option<u8> {
        match self {
            GoldClass::MultipleChoice(v) | GoldClass::YesNo(v) => Some(*v),
            GoldClass::FreeForm => None,
        }
    }
}

/// Last standalone choice reference in `text` as a 0-based index.
///
/// Letters map a->0 .. d->3, digits 0-3 map to themselves. The last match wins
/// because multi-step answers state the final choice at the end.
pub fn extract_choice(text: &str) -> Option<u8> {
    let normalized = normalize(text);
    let token = CHOICE_TOKEN.find_iter(&normalized).last()?;
    match token.as_str() {
        "a" | "0" => Some(0),
        "b" | "1" => Some(1),
        "c" | "2" => Some(2),
        "d" | "3" => Some(3),
        _ => None,
    }
}

/// Last standalone yes/no mention in `text` as 1 (yes) or 0 (no)
pub fn extract_yes_no(text: &str) -> Option<u8> {
    let normalized = normalize(text);
    let token = YES_NO_TOKEN.find_iter(&normalized).last()?;
    yes_no_token(token.as_str())
}

/// Interpret a gold label directly as yes/no.
///
/// Booleans always qualify, numbers only when exactly 0 or 1, strings only
/// when their whole normalized form is a yes/no token.
pub fn yes_no_from_gold(gold: &Gold) -> Option<u8> {
    match gold {
        Gold::Bool(b) => Some(u8::from(*b)),
        Gold::Integer(0) => Some(0),
        Gold::Integer(1) => Some(1),
        Gold::Integer(_) => None,
        Gold::Float(f) if *f == 0.0 => Some(0),
        Gold::Float(f) if *f == 1.0 => Some(1),
        Gold::Float(_) => None,
        Gold::Text(s) => yes_no_token(&normalize(s)),
    }
}

fn yes_no_token(token: &str) -> Option<u8> {
    match token {
        "yes" | "true" | "1" => Some(1),
        "no" | "false" | "0" => Some(0),
        _ => None,
    }
}
