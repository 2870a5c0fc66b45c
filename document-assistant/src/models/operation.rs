use bytes::Bytes;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A text-processing action the backend runs against an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Store the file, extract its text and categorise it (`/upload/`).
    #[serde(rename = "upload")]
    ExtractText,
    Summarize,
    ExtractEntities,
}

impl Operation {
    pub const ALL: [Operation; 3] = [
        Operation::ExtractText,
        Operation::Summarize,
        Operation::ExtractEntities,
    ];

    /// Path segment of the backend endpoint, also used as the form value.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::ExtractText => "upload",
            Operation::Summarize => "summarize",
            Operation::ExtractEntities => "extract_entities",
        }
    }

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::ExtractText => "Extract Text",
            Operation::Summarize => "Summarize",
            Operation::ExtractEntities => "Extract Entities",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" | "extract_text" => Ok(Operation::ExtractText),
            "summarize" => Ok(Operation::Summarize),
            "extract_entities" => Ok(Operation::ExtractEntities),
            _ => Err(format!("Unknown operation: {}", s)),
        }
    }
}

/// The file the user picked, kept until another one replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Decoded response body of the last operation. The body is opaque: its
/// shape belongs to the backend and is shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    pub operation: Operation,
    pub status: u16,
    pub body: serde_json::Value,
}

impl OperationResult {
    /// Body as JSON with two-space indentation.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.body).unwrap_or_else(|_| self.body.to_string())
    }
}
