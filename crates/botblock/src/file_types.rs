use serde::{Deserialize, Serialize};

/// A named set of file extensions offered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeGroup {
    pub category: String,
    pub extensions: Vec<String>,
}

impl FileTypeGroup {
    pub fn new<S: Into<String>>(category: S, extensions: &[&str]) -> Self {
        Self {
            category: category.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

pub fn default_file_groups() -> Vec<FileTypeGroup> {
    vec![
        FileTypeGroup::new(
            "Documents",
            &[
                ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".rtf",
            ],
        ),
        FileTypeGroup::new(
            "Images",
            &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".tiff", ".bmp"],
        ),
        FileTypeGroup::new(
            "Audio & Video",
            &[".mp4", ".avi", ".mov", ".wmv", ".mp3", ".wav", ".ogg", ".flac"],
        ),
        FileTypeGroup::new(
            "Code & Data",
            &[".json", ".xml", ".sql", ".zip", ".tar", ".gz", ".env", ".log", ".bak"],
        ),
    ]
}

/// Trims `ext` and prefixes it with a dot, `None` when nothing is left.
pub fn normalize_extension(ext: &str) -> Option<String> {
    let ext = ext.trim();
    match ext {
        "" | "." => None,
        _ if ext.starts_with('.') => Some(ext.to_string()),
        _ => Some(format!(".{ext}")),
    }
}
