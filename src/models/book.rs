use serde::{Deserialize, Serialize};

/// The fixed emotion vocabulary attached to every book record by the
/// offline classification step. Scores are intensities in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Joy,
    Sad,
    Angry,
    Fear,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Emotion::Joy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Fear,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Fear => "fear",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }
}

/// User-facing tone labels and the emotion column each one ranks by.
/// "All" is the sentinel for "no tone preference".
pub const TONES: [(&str, Emotion); 6] = [
    ("Happy", Emotion::Joy),
    ("Sad", Emotion::Sad),
    ("Angry", Emotion::Angry),
    ("Suspensful", Emotion::Fear),
    ("Surprising", Emotion::Surprise),
    ("Neutral", Emotion::Neutral),
];

fn default_score() -> f32 {
    0.0
}

/// One row of the corpus. Emotion scores are flat columns so the CSV
/// loader maps headers directly; missing values default to 0.0, never
/// stay absent, so ranking needs no null handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(alias = "isbn13")]
    pub id: String,
    pub title: String,
    pub authors: String,
    pub description: String,
    #[serde(alias = "simplified_categories")]
    pub category: String,
    pub thumbnail: Option<String>,
    #[serde(default = "default_score")]
    pub joy: f32,
    #[serde(default = "default_score")]
    pub sad: f32,
    #[serde(default = "default_score")]
    pub angry: f32,
    #[serde(default = "default_score")]
    pub fear: f32,
    #[serde(default = "default_score")]
    pub surprise: f32,
    #[serde(default = "default_score")]
    pub neutral: f32,
}

impl BookRecord {
    pub fn emotion_score(&self, emotion: Emotion) -> f32 {
        match emotion {
            Emotion::Joy => self.joy,
            Emotion::Sad => self.sad,
            Emotion::Angry => self.angry,
            Emotion::Fear => self.fear,
            Emotion::Surprise => self.surprise,
            Emotion::Neutral => self.neutral,
        }
    }
}
