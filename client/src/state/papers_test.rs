use super::*;
use strapi::types::{Author, PageInfo, Paper};

fn detail() -> PaperDetail {
    PaperDetail {
        document_id: "d1".to_owned(),
        title: "Attention".to_owned(),
        content: Some("body".to_owned()),
        created_at: None,
        updated_at: None,
        published_at: None,
        author: Some(Author { username: "alice".to_owned() }),
    }
}

fn paper(title: &str) -> Paper {
    Paper {
        document_id: title.to_lowercase(),
        title: title.to_owned(),
        content: None,
        created_at: None,
        updated_at: None,
        published_at: None,
    }
}

#[test]
fn excerpt_keeps_short_content() {
    assert_eq!(excerpt("short", 150), "short");
    assert_eq!(excerpt("", 150), "");
}

#[test]
fn excerpt_cuts_on_char_boundary() {
    assert_eq!(excerpt("abcdef", 3), "abc...");
    assert_eq!(excerpt("日本語テキスト", 3), "日本語...");
    assert_eq!(excerpt("abc", 3), "abc");
}

#[test]
fn summary_line_mentions_total_when_known() {
    let page = PapersPage {
        nodes: vec![paper("A"), paper("B")],
        page_info: PageInfo { page: 1, page_size: 25, page_count: 1, total: 12 },
    };
    assert_eq!(summary_line(&page), "Showing 2 papers of 12 total");
    assert_eq!(summary_line(&PapersPage::default()), "Showing 0 papers");
}

#[test]
fn unchanged_draft_produces_empty_input() {
    let paper = detail();
    let draft = EditDraft::from_paper(&paper);
    assert!(draft.changes(&paper).is_empty());
}

#[test]
fn draft_reports_only_changed_fields() {
    let paper = detail();
    let draft = EditDraft { title: "  Attention 2 ".to_owned(), content: "body".to_owned() };
    assert_eq!(
        draft.changes(&paper),
        PaperInput { title: Some("Attention 2".to_owned()), content: None }
    );

    let draft = EditDraft { title: "Attention".to_owned(), content: "new body".to_owned() };
    assert_eq!(
        draft.changes(&paper),
        PaperInput { title: None, content: Some("new body".to_owned()) }
    );
}

#[test]
fn new_paper_omits_blank_content() {
    assert_eq!(new_paper_input(" T ", "  "), PaperInput { title: Some("T".to_owned()), content: None });
    assert_eq!(
        new_paper_input("T", "text"),
        PaperInput { title: Some("T".to_owned()), content: Some("text".to_owned()) }
    );
}
