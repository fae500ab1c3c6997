// src/library/detection.rs
//! Audio file detection using magic numbers and extension-based fallback.

use std::{fmt, path::Path};

use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

use crate::error::PlayerResult;

/// What a library entry is, as far as the player cares.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Lyrics,
    Other,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Audio => "Audio",
            FileCategory::Lyrics => "Lyrics",
            FileCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// Detected MIME type + category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect MIME type & category for a given file path.
pub fn detect_file_type(path: &Path) -> PlayerResult<FileType> {
    // 1. Magic-number sniffing
    if let Some(kind) = Infer::new().get_from_path(path)? {
        let category = match kind.matcher_type() {
            MatcherType::Audio => FileCategory::Audio,
            _ => FileCategory::Other,
        };
        return Ok(FileType {
            mime: kind.mime_type().to_string(),
            category,
        });
    }

    // 2. LRC has no magic number and no registered MIME type
    let is_lrc = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("lrc"));
    if is_lrc {
        return Ok(FileType {
            mime: "text/x-lrc".to_string(),
            category: FileCategory::Lyrics,
        });
    }

    // 3. Extension-based lookup
    let mime = MimeGuess::from_path(path).first_or_octet_stream().to_string();
    let category = match mime.split('/').next() {
        Some("audio") => FileCategory::Audio,
        _ => FileCategory::Other,
    };

    Ok(FileType { mime, category })
}

/// True when `path` looks like something the decoder can play.
pub fn is_audio(path: &Path) -> bool {
    detect_file_type(path).is_ok_and(|t| t.category == FileCategory::Audio)
}
