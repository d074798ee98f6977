//! Statement loading from text and PDF files.

use std::fs;
use std::path::Path;

use tracing::debug;

/// Statement file kinds the CLI can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Pdf,
}

impl InputKind {
    /// Detect the kind from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "txt" | "text" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Read a statement as raw text. Form feeds in text files mark page breaks.
pub fn load_statement(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let kind = InputKind::from_path(path)
        .ok_or_else(|| anyhow::anyhow!("Unsupported file format: {}", path.display()))?;

    let text = match kind {
        InputKind::Text => fs::read_to_string(path)?,
        InputKind::Pdf => {
            let data = fs::read(path)?;
            pdf_extract::extract_text_from_mem(&data)
                .map_err(|e| anyhow::anyhow!("Failed to extract PDF text: {}", e))?
        }
    };

    debug!("Loaded {} characters from {}", text.len(), path.display());

    if text.trim().is_empty() {
        anyhow::bail!("No text could be extracted from {}", path.display());
    }

    Ok(text)
}
