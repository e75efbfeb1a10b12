use crate::model::Context;
use crate::models::Entry;

/// Presentation collaborator. Gets entries pushed at it; it cannot reach
/// back into the model.
pub trait Renderer {
    fn render(&mut self, entry: &Entry);
}

/// Plain renderer for the terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineRenderer;

impl Renderer for LineRenderer {
    fn render(&mut self, entry: &Entry) {
        println!("{}", details(entry));
    }
}

/// One numbered row of the displayed list.
pub fn line(pos: usize, entry: &Entry) -> String {
    let mut out = format!("{pos:>3}. {entry}  <{}>", entry.link);
    if !entry.tags.is_empty() {
        out.push_str(&format!(
            "  [{}]",
            entry.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    out
}

pub fn listing(entries: &[&Entry]) -> String {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| line(i + 1, e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Headline plus rows, the reply for a context switch.
pub fn overview(context: Context, entries: &[&Entry]) -> String {
    if entries.is_empty() {
        format!("{context}: empty")
    } else {
        format!(
            "{context}: {} {}\n{}",
            entries.len(),
            if entries.len() == 1 { "entry" } else { "entries" },
            listing(entries)
        )
    }
}

pub fn details(entry: &Entry) -> String {
    let mut out = format!("{entry}\n  {}", entry.link);
    if !entry.description.is_empty() {
        out.push_str(&format!("\n  {}", entry.description));
    }
    if !entry.tags.is_empty() {
        out.push_str(&format!(
            "\n  tags: {}",
            entry.tags.iter().cloned().collect::<Vec<_>>().join(", ")
        ));
    }
    out
}
