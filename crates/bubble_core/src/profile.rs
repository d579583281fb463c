use serde::{Deserialize, Serialize};

/// Tuning profile selects one of two parameter sets for the tracker and the
/// simulation. Profiles change numbers only -- never the mechanisms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuningProfile {
    /// Looser filter, bigger pop radius, no swipe hits, no bonus time.
    Classic,
    /// Responsive filter with swipe hits and level-up bonus time.
    #[default]
    Tuned,
}

impl TuningProfile {
    /// All profiles in display order.
    pub const ALL: &'static [TuningProfile] = &[TuningProfile::Classic, TuningProfile::Tuned];

    /// Short human-readable label for logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Tuned => "tuned",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for TuningProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
