//! Text layout of the document tree.
//!
//! Turns the node tree into styled lines, one block per line:
//!
//! ```text
//! Meal Planner                  h1 (bold, underlined)
//! [☀️]                          button
//! [Search recipes] [🔍]         input placeholder + submit button
//! • Burger                      li > wm-recipe-preview > h2
//!   [Add]
//! ```
//!
//! Block elements start and end lines, inline content (text, inputs,
//! buttons, spans) is appended to the current line. The focused control is
//! drawn inverted.

use crate::engine::document::{self, NodeKind};
use crate::state::focus;
use crate::types::Attr;

/// Which palette color a span uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Normal,
    Accent,
    Muted,
}

/// A run of text with one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub attrs: Attr,
    pub tone: Tone,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attrs: Attr::NONE,
            tone: Tone::Normal,
        }
    }
}

/// One terminal row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub indent: usize,
    pub spans: Vec<Span>,
}

impl Line {
    /// Unstyled text of the line, indent included.
    pub fn text(&self) -> String {
        let mut out = " ".repeat(self.indent);
        for span in &self.spans {
            out.push_str(&span.text);
        }
        out
    }
}

struct LayoutState {
    lines: Vec<Line>,
    current: Line,
    indent: usize,
    /// List bullet waiting for the first span of the item, with its indent.
    bullet: Option<usize>,
    focused: Option<usize>,
}

impl LayoutState {
    fn flush(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.spans.is_empty() {
            self.lines.push(line);
        }
    }

    fn push(&mut self, span: Span) {
        if self.current.spans.is_empty() {
            self.current.indent = self.indent;
            if let Some(indent) = self.bullet.take() {
                self.current.indent = indent;
                self.current.spans.push(Span::plain("• "));
            }
        } else {
            self.current.spans.push(Span::plain(" "));
        }
        self.current.spans.push(span);
    }

    fn control(&mut self, index: usize, text: String, tone: Tone) {
        let attrs = if self.focused == Some(index) {
            Attr::INVERSE
        } else {
            Attr::NONE
        };
        self.push(Span { text, attrs, tone });
    }

    fn walk(&mut self, index: usize, attrs: Attr) {
        let tag = match document::kind(index) {
            Some(NodeKind::Text(text)) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.push_text(text, attrs);
                }
                return;
            }
            Some(NodeKind::Element(tag)) => tag,
            None => return,
        };

        match tag.as_str() {
            "br" => self.flush(),
            "input" => {
                let value = document::value(index).unwrap_or_default();
                if value.is_empty() {
                    let placeholder = document::attribute(index, "placeholder").unwrap_or_default();
                    self.control(index, format!("[{placeholder}]"), Tone::Muted);
                } else {
                    self.control(index, format!("[{value}]"), Tone::Normal);
                }
            }
            "button" => {
                let label = document::text_content(index);
                self.control(index, format!("[{}]", label.trim()), Tone::Accent);
            }
            "span" => self.walk_children(index, attrs),
            "li" => {
                self.flush();
                let saved = self.indent;
                self.bullet = Some(saved);
                self.indent = saved + 2;
                self.walk_children(index, attrs);
                self.flush();
                self.bullet = None;
                self.indent = saved;
            }
            "h1" => self.block(index, attrs | Attr::BOLD | Attr::UNDERLINE),
            "h2" | "h3" | "h4" | "h5" | "h6" => self.block(index, attrs | Attr::BOLD),
            _ => self.block(index, attrs),
        }
    }

    /// Text inside a line run: consecutive text nodes join without a gap.
    fn push_text(&mut self, text: &str, attrs: Attr) {
        let span = Span {
            text: text.to_string(),
            attrs,
            tone: Tone::Normal,
        };
        match self.current.spans.last_mut() {
            Some(last) if last.attrs == attrs && last.tone == Tone::Normal && last.text != "• " => {
                last.text.push(' ');
                last.text.push_str(text);
            }
            _ => self.push(span),
        }
    }

    fn block(&mut self, index: usize, attrs: Attr) {
        self.flush();
        self.walk_children(index, attrs);
        self.flush();
    }

    fn walk_children(&mut self, index: usize, attrs: Attr) {
        for child in document::children(index) {
            self.walk(child, attrs);
        }
    }
}

/// Lay out the subtree under `root` (excluding `root`'s own styling).
pub fn layout(root: usize) -> Vec<Line> {
    let mut state = LayoutState {
        lines: Vec::new(),
        current: Line::default(),
        indent: 0,
        bullet: None,
        focused: focus::focused(),
    };
    state.walk_children(root, Attr::NONE);
    state.flush();
    state.lines
}

/// Unstyled text of the laid out subtree, one line per row.
pub fn render_text(root: usize) -> String {
    layout(root)
        .iter()
        .map(Line::text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::document::{
        append_child, body, create_node, create_text_node, reset_document, set_attribute,
        set_value,
    };
    use crate::state::focus::{focus, reset_focus_state};

    fn el(parent: usize, tag: &str) -> usize {
        let node = create_node(tag);
        append_child(parent, node).unwrap();
        node
    }

    fn text(parent: usize, content: &str) {
        let node = create_text_node(content);
        append_child(parent, node).unwrap();
    }

    fn setup() -> usize {
        reset_document();
        reset_focus_state();
        body()
    }

    #[test]
    fn test_blocks_start_lines() {
        let root = setup();
        let h1 = el(root, "h1");
        text(h1, "Meal Planner");
        let p = el(root, "p");
        text(p, "Hello");

        let lines = layout(root);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Meal Planner");
        assert!(lines[0].spans[0].attrs.contains(Attr::BOLD | Attr::UNDERLINE));
        assert_eq!(lines[1].text(), "Hello");
    }

    #[test]
    fn test_controls_are_inline() {
        let root = setup();
        let form = el(root, "form");
        let input = el(form, "input");
        set_attribute(input, "placeholder", "Search recipes");
        let button = el(form, "button");
        text(button, "🔍");

        assert_eq!(render_text(root), "[Search recipes] [🔍]");
        assert_eq!(layout(root)[0].spans[0].tone, Tone::Muted);

        set_value(input, "bur");
        assert_eq!(render_text(root), "[bur] [🔍]");
    }

    #[test]
    fn test_list_items_get_bullets() {
        let root = setup();
        let ul = el(root, "ul");
        for name in ["Burger", "Salad"] {
            let li = el(ul, "li");
            let h2 = el(li, "h2");
            text(h2, name);
            let add = el(li, "button");
            text(add, "Add");
        }

        assert_eq!(
            render_text(root),
            "• Burger\n  [Add]\n• Salad\n  [Add]"
        );
    }

    #[test]
    fn test_br_breaks_line() {
        let root = setup();
        let div = el(root, "div");
        text(div, "Your meal plan is empty.");
        el(div, "br");
        text(div, "Add recipes to get started!");

        assert_eq!(
            render_text(root),
            "Your meal plan is empty.\nAdd recipes to get started!"
        );
    }

    #[test]
    fn test_focused_control_is_inverse() {
        let root = setup();
        let button = el(root, "button");
        text(button, "Add");
        focus(button);

        let lines = layout(root);
        assert!(lines[0].spans[0].attrs.contains(Attr::INVERSE));
    }
}
