use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

mod image;
mod validate;

pub use image::ImageFile;
pub use validate::validate;

/// Which input tab is active. The lowercase name doubles as the `input_type`
/// form field sent to the service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    Text,
    Url,
    Image,
    Guided,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Url => "url",
            InputMode::Image => "image",
            InputMode::Guided => "guided",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| format!("unknown input mode: {s}"))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Entertain,
    Educate,
    Sell,
    Inspire,
    Inform,
}

impl Objective {
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Entertain => "entertain",
            Objective::Educate => "educate",
            Objective::Sell => "sell",
            Objective::Inspire => "inspire",
            Objective::Inform => "inform",
        }
    }
}

impl FromStr for Objective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| format!("unknown objective: {s}"))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Fun,
    Professional,
    Inspiring,
    Casual,
    Educational,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Fun => "fun",
            Tone::Professional => "professional",
            Tone::Inspiring => "inspiring",
            Tone::Casual => "casual",
            Tone::Educational => "educational",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true).map_err(|_| format!("unknown tone: {s}"))
    }
}

/// Guided form while it is being filled in; the selects start unset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuidedAnswers {
    pub niche: String,
    pub objective: Option<Objective>,
    pub tone: Option<Tone>,
}

/// The single active user input. Only the variant of the active mode exists,
/// so switching modes necessarily drops whatever the previous mode held.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSelection {
    Text(String),
    Url(String),
    Image(Option<ImageFile>),
    Guided(GuidedAnswers),
}

impl Default for InputSelection {
    fn default() -> Self {
        InputSelection::Text(String::new())
    }
}

impl InputSelection {
    pub fn empty(mode: InputMode) -> Self {
        match mode {
            InputMode::Text => InputSelection::Text(String::new()),
            InputMode::Url => InputSelection::Url(String::new()),
            InputMode::Image => InputSelection::Image(None),
            InputMode::Guided => InputSelection::Guided(GuidedAnswers::default()),
        }
    }

    pub fn mode(&self) -> InputMode {
        match self {
            InputSelection::Text(_) => InputMode::Text,
            InputSelection::Url(_) => InputMode::Url,
            InputSelection::Image(_) => InputMode::Image,
            InputSelection::Guided(_) => InputMode::Guided,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            InputSelection::Text(s) | InputSelection::Url(s) => s.is_empty(),
            InputSelection::Image(file) => file.is_none(),
            InputSelection::Guided(g) => *g == GuidedAnswers::default(),
        }
    }

    /// One-line description of the draft for the input view and logs.
    pub fn summary(&self) -> String {
        match self {
            InputSelection::Text(s) | InputSelection::Url(s) => s.trim().to_string(),
            InputSelection::Image(Some(file)) => format!("{} ({}, {} bytes)", file.filename, file.media_type, file.bytes.len()),
            InputSelection::Image(None) => String::new(),
            InputSelection::Guided(g) => format!(
                "niche={} objective={} tone={}",
                g.niche.trim(),
                g.objective.map(|o| o.as_str()).unwrap_or("-"),
                g.tone.map(|t| t.as_str()).unwrap_or("-"),
            ),
        }
    }
}
