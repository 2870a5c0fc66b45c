use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend primary key. The backend emits integers, but any JSON string is
/// accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentId::Number(n) => write!(f, "{}", n),
            DocumentId::Text(s) => f.write_str(s),
        }
    }
}

/// A document row as listed by the backend's `/documents/` endpoint.
///
/// Unknown fields (such as the full extracted text) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    /// Nullable in the backend's table.
    #[serde(default)]
    pub filename: Option<String>,
    /// Category label assigned by the backend. `None` never matches a filter.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Comma separated entity words, as stored by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<String>,
}

impl Document {
    /// Filename for display, with a placeholder for unnamed rows.
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("(unnamed document)")
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }
}

/// The ordered sub-sequence of `documents` whose category is exactly
/// `category` (case-sensitive). Unknown categories yield an empty list.
pub fn by_category<'a>(documents: &'a [Document], category: &str) -> Vec<&'a Document> {
    documents
        .iter()
        .filter(|doc| doc.in_category(category))
        .collect()
}

/// The fixed set of categories shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Finance,
    Legal,
    Technical,
    Hr,
    General,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Finance,
        Category::Legal,
        Category::Technical,
        Category::Hr,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Finance => "Finance",
            Category::Legal => "Legal",
            Category::Technical => "Technical",
            Category::Hr => "HR",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::test_helpers::doc;
    use super::*;

    #[test]
    fn by_category_keeps_matching_documents_in_order() {
        let docs = vec![
            doc(1, "a.pdf", "Finance"),
            doc(2, "b.pdf", "HR"),
            doc(3, "c.pdf", "Finance"),
        ];

        let finance: Vec<_> = by_category(&docs, "Finance")
            .into_iter()
            .map(|d| d.display_name())
            .collect();
        assert_eq!(finance, vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn by_category_single_match() {
        let docs = vec![doc(1, "a.pdf", "Finance"), doc(2, "b.pdf", "HR")];
        assert_eq!(by_category(&docs, "Finance"), vec![&docs[0]]);
    }

    #[test]
    fn by_category_is_case_sensitive() {
        let docs = vec![doc(1, "a.pdf", "Finance")];
        assert!(by_category(&docs, "finance").is_empty());
        assert!(by_category(&docs, "Finance ").is_empty());
    }

    #[test]
    fn by_category_unknown_is_empty() {
        let docs = vec![doc(1, "a.pdf", "Finance"), doc(2, "b.pdf", "HR")];
        assert!(by_category(&docs, "Unknown").is_empty());
        assert!(by_category(&[], "Finance").is_empty());
    }

    #[test]
    fn by_category_is_idempotent_and_does_not_mutate() {
        let docs = vec![doc(1, "a.pdf", "Finance"), doc(2, "b.pdf", "HR")];
        let before = docs.clone();

        let first: Vec<Document> = by_category(&docs, "HR").into_iter().cloned().collect();
        let second: Vec<Document> = by_category(&docs, "HR").into_iter().cloned().collect();

        assert_eq!(first, second);
        assert_eq!(docs, before);
    }

    #[test]
    fn uncategorised_documents_never_match() {
        let mut uncategorised = doc(1, "a.pdf", "General");
        uncategorised.category = None;
        let docs = vec![uncategorised];

        for category in Category::ALL {
            assert!(by_category(&docs, category.as_str()).is_empty());
        }
    }

    #[test]
    fn deserializes_backend_rows() {
        let rows = serde_json::json!([
            {
                "id": 7,
                "filename": "invoice.pdf",
                "text": "Invoice for services rendered",
                "summary": null,
                "entities": "ACME, Kochi",
                "category": "Finance"
            },
            { "id": "b-2", "filename": "notes.txt", "category": null }
        ]);

        let docs: Vec<Document> = serde_json::from_value(rows).unwrap();
        assert_eq!(docs[0].id, DocumentId::Number(7));
        assert_eq!(docs[0].entities.as_deref(), Some("ACME, Kochi"));
        assert!(docs[0].summary.is_none());
        assert_eq!(docs[1].id.to_string(), "b-2");
        assert!(docs[1].category.is_none());
    }

    #[test]
    fn rows_without_filename_still_decode() {
        let rows = serde_json::json!([
            { "id": 1, "filename": "a.pdf", "category": "Finance" },
            { "id": 2, "filename": null, "category": "HR" },
            { "id": 3, "category": "HR" }
        ]);

        let docs: Vec<Document> = serde_json::from_value(rows).unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].display_name(), "a.pdf");
        assert!(docs[1].filename.is_none());
        assert_eq!(docs[1].display_name(), "(unnamed document)");
        assert_eq!(by_category(&docs, "HR").len(), 2);
    }

    #[test]
    fn category_labels() {
        let labels: Vec<_> = Category::ALL.iter().map(Category::as_str).collect();
        assert_eq!(labels, vec!["Finance", "Legal", "Technical", "HR", "General"]);
    }
}
