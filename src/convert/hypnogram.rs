use crate::error::{FrameError, Result};

/// Sleep stage of one 5-minute hypnogram slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SleepStage {
    Deep,
    Light,
    Rem,
    Awake,
}

impl SleepStage {
    /// Stage for an API code: 1 deep, 2 light, 3 REM, 4 awake
    pub fn from_code(code: char) -> Result<Self> {
        match code {
            '1' => Ok(SleepStage::Deep),
            '2' => Ok(SleepStage::Light),
            '3' => Ok(SleepStage::Rem),
            '4' => Ok(SleepStage::Awake),
            _ => Err(FrameError::InvalidHypnogram { code }),
        }
    }

    pub fn letter(self) -> char {
        match self {
            SleepStage::Deep => 'D',
            SleepStage::Light => 'L',
            SleepStage::Rem => 'R',
            SleepStage::Awake => 'A',
        }
    }
}

pub fn decode_hypnogram(raw: &str) -> Result<Vec<SleepStage>> {
    raw.trim().chars().map(SleepStage::from_code).collect()
}

/// One letter per slot, e.g. "AALLDDR"
pub fn format_hypnogram(stages: &[SleepStage]) -> String {
    stages.iter().map(|s| s.letter()).collect()
}
