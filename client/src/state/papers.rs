//! View logic for the papers pages.

#[cfg(test)]
#[path = "papers_test.rs"]
mod papers_test;

use strapi::types::{PaperDetail, PaperInput, PapersPage};

/// Characters of content shown on a list card.
pub const EXCERPT_CHARS: usize = 150;

/// First `max_chars` characters of `content`, with an ellipsis when cut.
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_owned(),
    }
}

/// Footer line under the list, e.g. "Showing 3 papers of 12 total".
pub fn summary_line(page: &PapersPage) -> String {
    let shown = page.nodes.len();
    if page.page_info.total > 0 {
        format!("Showing {shown} papers of {} total", page.page_info.total)
    } else {
        format!("Showing {shown} papers")
    }
}

/// Editable copy of a paper while the detail page is in edit mode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub content: String,
}

impl EditDraft {
    pub fn from_paper(paper: &PaperDetail) -> Self {
        Self {
            title: paper.title.clone(),
            content: paper.content.clone().unwrap_or_default(),
        }
    }

    /// Only the fields that differ from `original`.
    pub fn changes(&self, original: &PaperDetail) -> PaperInput {
        let title = self.title.trim();
        PaperInput {
            title: (title != original.title).then(|| title.to_owned()),
            content: (self.content != original.content.as_deref().unwrap_or_default()).then(|| self.content.clone()),
        }
    }
}

/// Input for a brand-new paper.
pub fn new_paper_input(title: &str, content: &str) -> PaperInput {
    PaperInput {
        title: Some(title.trim().to_owned()),
        content: (!content.trim().is_empty()).then(|| content.to_owned()),
    }
}
