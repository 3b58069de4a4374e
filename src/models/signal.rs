use serde::{Deserialize, Serialize};

/// Directional decision emitted once per bar.
///
/// Translating a signal into orders is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    #[default]
    NoSignal,
    EnterLong,
    EnterShort,
}

impl Signal {
    pub fn is_entry(&self) -> bool {
        !matches!(self, Signal::NoSignal)
    }
}
