//! Embedded message catalogs and typed diagnostics.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use std::sync::OnceLock;

use crate::constants::{
    MSG_NEW_ONSEN, MSG_NON_TRAINING_TURN, MSG_REPEAT_TURN, MSG_TRAIN_LEVEL_MISMATCH,
    MSG_WRONG_TURN,
};
use crate::training::Discipline;

/// Locale used when a key is missing or an unknown locale is requested.
pub const FALLBACK_LOCALE: &str = "en";

const LOCALE_TABLE: &[(&str, &str)] = &[
    ("en", include_str!("../i18n/en.json")),
    ("zh", include_str!("../i18n/zh.json")),
];

static EN: OnceLock<Value> = OnceLock::new();
static ZH: OnceLock<Value> = OnceLock::new();

/// Turns a message key plus named arguments into display text.
pub trait Localizer {
    fn tr(&self, key: &str, args: &[(&str, &str)]) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str, &[(&str, &str)]) -> String,
{
    fn tr(&self, key: &str, args: &[(&str, &str)]) -> String {
        self(key, args)
    }
}

fn parsed(slot: &'static OnceLock<Value>, code: &str) -> &'static Value {
    slot.get_or_init(|| {
        LOCALE_TABLE
            .iter()
            .find_map(|(c, data)| (*c == code).then_some(*data))
            .and_then(|data| serde_json::from_str(data).ok())
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    })
}

/// Codes of the bundled locales.
#[must_use]
pub fn locales() -> impl Iterator<Item = &'static str> {
    LOCALE_TABLE.iter().map(|(code, _)| *code)
}

/// Catalog-backed localizer for one of the bundled locales.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    lang: &'static str,
    translations: &'static Value,
    fallback: &'static Value,
}

impl Catalog {
    /// Catalog for `lang`; unknown codes fall back to English.
    #[must_use]
    pub fn new(lang: &str) -> Self {
        let fallback = parsed(&EN, FALLBACK_LOCALE);
        match lang {
            "zh" => Self {
                lang: "zh",
                translations: parsed(&ZH, "zh"),
                fallback,
            },
            _ => Self {
                lang: FALLBACK_LOCALE,
                translations: fallback,
                fallback,
            },
        }
    }

    #[must_use]
    pub const fn lang(&self) -> &'static str {
        self.lang
    }

    fn resolve(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
        get_nested_value(self.translations, key)
            .or_else(|| get_nested_value(self.fallback, key))
            .and_then(Value::as_str)
            .map(|text| render(text, args))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(FALLBACK_LOCALE)
    }
}

impl Localizer for Catalog {
    fn tr(&self, key: &str, args: &[(&str, &str)]) -> String {
        self.resolve(key, args).unwrap_or_else(|| key.to_string())
    }
}

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

fn render(text: &str, args: &[(&str, &str)]) -> String {
    let mut text = text.to_string();
    for (k, v) in args {
        text = text.replace(&format!("{{{{{k}}}}}"), v);
        text = text.replace(&format!("{{{k}}}"), v);
    }
    text
}

/// Non-fatal conditions surfaced alongside a turn's analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Turn sequence jumped; `previous` is the last accepted turn.
    WrongTurn { previous: Option<u32>, current: u32 },
    /// Same turn delivered again, or a non-training screen of a known turn.
    RepeatTurn,
    /// The game disagreed with the predicted training level.
    TrainLevelMismatch {
        discipline: Discipline,
        predicted: u8,
        reported: u8,
    },
    /// No training command is selectable this turn.
    NonTrainingTurn,
    /// A new onsen started being dug.
    NewOnsen { onsen_id: u32 },
}

pub type Diagnostics = SmallVec<[Diagnostic; 2]>;

impl Diagnostic {
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::WrongTurn { .. } => MSG_WRONG_TURN,
            Self::RepeatTurn => MSG_REPEAT_TURN,
            Self::TrainLevelMismatch { .. } => MSG_TRAIN_LEVEL_MISMATCH,
            Self::NonTrainingTurn => MSG_NON_TRAINING_TURN,
            Self::NewOnsen { .. } => MSG_NEW_ONSEN,
        }
    }

    /// Named placeholder values for the message template.
    #[must_use]
    pub fn args(&self) -> Vec<(&'static str, String)> {
        match *self {
            Self::WrongTurn { previous, current } => vec![
                (
                    "previous",
                    previous.map_or_else(|| "-".to_string(), |t| t.to_string()),
                ),
                ("current", current.to_string()),
            ],
            Self::TrainLevelMismatch {
                discipline,
                predicted,
                reported,
            } => vec![
                ("discipline", discipline.label().to_string()),
                ("predicted", predicted.to_string()),
                ("reported", reported.to_string()),
            ],
            Self::NewOnsen { onsen_id } => vec![("onsen", onsen_id.to_string())],
            Self::RepeatTurn | Self::NonTrainingTurn => Vec::new(),
        }
    }

    #[must_use]
    pub fn render(&self, localizer: &dyn Localizer) -> String {
        let mut owned = self.args();
        for (name, value) in &mut owned {
            if *name == "discipline" {
                *value = localizer.tr(&format!("discipline.{value}"), &[]);
            }
        }
        let args: Vec<(&str, &str)> = owned.iter().map(|(k, v)| (*k, v.as_str())).collect();
        localizer.tr(self.key(), &args)
    }
}
