use notepad_core::{Post, PostInput, PostKind};
use std::collections::VecDeque;
use std::io;

/// Canned console answers for populate tests.
struct ScriptedInput {
    lines: VecDeque<String>,
    body: Vec<String>,
}

impl ScriptedInput {
    fn new(lines: &[&str], body: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| s.to_string()).collect(),
            body: body.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PostInput for ScriptedInput {
    fn line(&mut self, _label: &str) -> io::Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted line left"))
    }

    fn body(&mut self) -> io::Result<Vec<String>> {
        Ok(self.body.clone())
    }
}

#[test]
fn factory_creates_each_kind_empty() {
    for kind in PostKind::ALL {
        let post = kind.create();
        assert_eq!(post.kind(), kind);
        assert!(post.state().row_id.is_none());
        assert!(post.state().text.is_empty());
    }
}

#[test]
fn tags_roundtrip_through_the_registry() {
    for kind in PostKind::ALL {
        assert_eq!(PostKind::from_tag(kind.tag()), Some(kind));
    }
    assert_eq!(PostKind::from_tag("memo"), None);
    assert_eq!(PostKind::from_tag(""), None);
}

#[test]
fn kind_serializes_as_its_stored_tag() {
    for kind in PostKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.tag()));
    }
}

#[test]
fn memo_populate_fills_only_the_body() {
    let mut memo = PostKind::Memo.create();
    let mut input = ScriptedInput::new(&[], &["line one", "line two"]);
    memo.populate(&mut input).unwrap();
    assert_eq!(memo.state().text, vec!["line one", "line two"]);
}

#[test]
fn task_populate_asks_for_the_due_date_first() {
    let mut task = PostKind::Task.create();
    let mut input = ScriptedInput::new(&["tomorrow"], &["water the plants"]);
    task.populate(&mut input).unwrap();
    assert!(task.render().iter().any(|line| line.contains("tomorrow")));
    assert_eq!(task.state().text, vec!["water the plants"]);
}

#[test]
fn link_render_shows_the_url_before_the_description() {
    let mut link = PostKind::Link.create();
    let mut input = ScriptedInput::new(&["https://example.org"], &["useful site"]);
    link.populate(&mut input).unwrap();

    let lines = link.render();
    let url_pos = lines
        .iter()
        .position(|l| l == "https://example.org")
        .unwrap();
    let desc_pos = lines.iter().position(|l| l == "useful site").unwrap();
    assert!(url_pos < desc_pos);
}

#[test]
fn render_heading_names_the_kind() {
    for kind in PostKind::ALL {
        let post = kind.create();
        let heading = &post.render()[0];
        assert!(heading.starts_with(kind.tag()), "bad heading: {heading}");
    }
}
