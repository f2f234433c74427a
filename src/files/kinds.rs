use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Per-user documents; at most one live file per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Jd,
    Resume,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Jd => "jd",
            DocumentKind::Resume => "resume",
        }
    }

    /// Stored file names of this kind start with this prefix.
    pub fn file_prefix(self) -> String {
        format!("{}_", self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jd" => Ok(DocumentKind::Jd),
            "resume" => Ok(DocumentKind::Resume),
            other => Err(AppError::invalid(format!(
                "Invalid file type {other:?}, expected jd or resume"
            ))),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media captured while answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingKind {
    Audio,
    Camera,
    Screen,
    Combined,
}

impl RecordingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingKind::Audio => "audio",
            RecordingKind::Camera => "camera",
            RecordingKind::Screen => "screen",
            RecordingKind::Combined => "combined",
        }
    }
}

impl FromStr for RecordingKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "audio" => Ok(RecordingKind::Audio),
            "camera" => Ok(RecordingKind::Camera),
            "screen" => Ok(RecordingKind::Screen),
            "combined" => Ok(RecordingKind::Combined),
            other => Err(AppError::invalid(format!(
                "Invalid recording type {other:?}, expected audio, camera, screen or combined"
            ))),
        }
    }
}

impl fmt::Display for RecordingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("jd".parse::<DocumentKind>().unwrap(), DocumentKind::Jd);
        assert_eq!("resume".parse::<DocumentKind>().unwrap(), DocumentKind::Resume);
        for k in ["audio", "camera", "screen", "combined"] {
            assert_eq!(k.parse::<RecordingKind>().unwrap().as_str(), k);
        }
    }

    #[test]
    fn rejects_unknown_kinds() {
        for bad in ["JD", "cv", "", "jd_"] {
            assert!(matches!(
                bad.parse::<DocumentKind>(),
                Err(AppError::InvalidInput(_))
            ));
        }
        assert!(matches!(
            "video".parse::<RecordingKind>(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn prefix_includes_separator() {
        assert_eq!(DocumentKind::Jd.file_prefix(), "jd_");
        assert_eq!(DocumentKind::Resume.to_string(), "resume");
    }
}
