//! Markdown → ratatui `Text` renderer for generated paragraphs.
//!
//! Only emphasis is styled: `#`..`###` headings and `**strong**` become bold,
//! `*em*` becomes italic, and those markers are removed. Inline links show
//! their target as `text (url)`. Everything else is printed exactly as the
//! model wrote it, markers included (quotes, rules, code spans, lists, deeper
//! headings, setext underlines).
//!
//! pulldown-cmark is used only to locate the styled constructs; the output is
//! cut from the source text by byte offset.

use std::ops::Range;

use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse one paragraph of model output into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    Marks::collect(content).into_text(content, Style::default().fg(base_fg))
}

/// Edits to apply to the source: byte ranges to drop, ranges to style, and
/// strings to insert before a byte offset.
#[derive(Default)]
struct Marks {
    hidden: Vec<Range<usize>>,
    styled: Vec<(Range<usize>, Modifier)>,
    inserts: Vec<(usize, String)>,
}

impl Marks {
    fn collect(source: &str) -> Self {
        let mut marks = Marks::default();
        for (event, range) in Parser::new_ext(source, Options::empty()).into_offset_iter() {
            let Event::Start(tag) = event else {
                continue;
            };
            match tag {
                Tag::Heading { level, .. } if heading_depth(level) <= 3 => {
                    marks.atx_heading(source, range)
                }
                Tag::Strong => marks.emphasis(source, range, 2, Modifier::BOLD),
                Tag::Emphasis => marks.emphasis(source, range, 1, Modifier::ITALIC),
                Tag::Link {
                    link_type: LinkType::Inline,
                    dest_url,
                    ..
                } => marks.inline_link(source, range, &dest_url),
                _ => {}
            }
        }
        marks
    }

    fn atx_heading(&mut self, source: &str, range: Range<usize>) {
        let line = &source[range.clone()];
        let indent = line.len() - line.trim_start_matches(' ').len();
        let rest = &line[indent..];
        let hashes = rest.len() - rest.trim_start_matches('#').len();
        // Setext headings have no leading hashes; their underline stays visible
        if hashes == 0 {
            return;
        }
        let after = &rest[hashes..];
        let gap = after.len() - after.trim_start_matches([' ', '\t']).len();
        let body_start = range.start + indent + hashes + gap;
        self.hidden.push(range.start + indent..body_start);
        self.styled.push((body_start..range.end, Modifier::BOLD));
    }

    /// `*`-delimited emphasis only; `_x_` is left as written.
    fn emphasis(&mut self, source: &str, range: Range<usize>, delim: usize, modifier: Modifier) {
        let span = &source[range.clone()];
        if span.len() < delim * 2 || !span.starts_with('*') || !span.ends_with('*') {
            return;
        }
        self.hidden.push(range.start..range.start + delim);
        self.hidden.push(range.end - delim..range.end);
        self.styled
            .push((range.start + delim..range.end - delim, modifier));
    }

    fn inline_link(&mut self, source: &str, range: Range<usize>, dest: &str) {
        let span = &source[range.clone()];
        let Some(close) = span.rfind("](") else {
            return;
        };
        if !span.starts_with('[') {
            return;
        }
        let close = range.start + close;
        self.hidden.push(range.start..range.start + 1);
        self.hidden.push(close..range.end);
        self.inserts.push((close, format!(" ({dest})")));
    }

    fn into_text(mut self, source: &str, base: Style) -> Text<'static> {
        let mut cuts = vec![0, source.len()];
        cuts.extend(self.hidden.iter().flat_map(|r| [r.start, r.end]));
        cuts.extend(self.styled.iter().flat_map(|(r, _)| [r.start, r.end]));
        cuts.extend(self.inserts.iter().map(|(at, _)| *at));
        cuts.sort_unstable();
        cuts.dedup();
        self.inserts.sort_by_key(|(at, _)| *at);

        let mut out = LineBuilder::default();
        let mut inserts = self.inserts.into_iter().peekable();
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            while let Some((_, text)) = inserts.next_if(|(at, _)| *at <= start) {
                out.push(&text, base);
            }
            if self.hidden.iter().any(|r| r.start <= start && end <= r.end) {
                continue;
            }
            let style = self
                .styled
                .iter()
                .filter(|(r, _)| r.start <= start && end <= r.end)
                .fold(base, |style, (_, m)| style.add_modifier(*m));
            out.push(&source[start..end], style);
        }
        for (_, text) in inserts {
            out.push(&text, base);
        }
        out.finish()
    }
}

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
}

impl LineBuilder {
    fn push(&mut self, text: &str, style: Style) {
        // ratatui renders \t as zero-width
        let text = text.replace('\t', "    ");
        let mut parts = text.split('\n');
        if let Some(first) = parts.next() {
            self.span(first, style);
        }
        for part in parts {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
            self.span(part, style);
        }
    }

    fn span(&mut self, text: &str, style: Style) {
        if !text.is_empty() {
            self.current.push(Span::styled(text.to_owned(), style));
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.lines.push(Line::from(self.current));
        Text::from(self.lines)
    }
}

fn heading_depth(level: HeadingLevel) -> usize {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
