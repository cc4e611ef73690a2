use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::{
    app::App,
    render::{self, Glyph},
};

const HORIZONTAL_MARGIN: u16 = 5;
// spacing, progress and legend rows under the passage
const FOOTER_ROWS: u16 = 3;
const LEGEND: &str = "(tab + space) restart / (esc) quit";

pub fn glyph_style(glyph: Glyph) -> Style {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    match glyph {
        Glyph::Untyped(_) => Style::default().fg(Color::DarkGray),
        Glyph::Correct(_) => Style::default().patch(bold_style).fg(Color::White),
        Glyph::Incorrect(_) => Style::default().patch(bold_style).fg(Color::Red),
        Glyph::Cursor(_) => Style::default().fg(Color::Black).bg(Color::White),
    }
}

/// Width available to the passage inside `area`.
pub fn passage_width(area: Rect) -> usize {
    area.width.saturating_sub(HORIZONTAL_MARGIN * 2) as usize
}

fn to_line(glyphs: &[Glyph]) -> Line<'static> {
    // consecutive glyphs of the same kind share a span
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;

    for &glyph in glyphs {
        let style = glyph_style(glyph);
        if run_style != Some(style) {
            if let Some(prev) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run_style = Some(style);
        }
        run.push(glyph.char());
    }

    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }

    Line::from(spans)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = render::render(&self.session, passage_width(area));

        let rows = frame.visible_rows(area.height.saturating_sub(FOOTER_ROWS) as usize);
        let passage_lines = u16::try_from(rows.len()).unwrap_or(u16::MAX);
        let padding = area
            .height
            .saturating_sub(passage_lines.saturating_add(FOOTER_ROWS))
            / 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(padding),
                Constraint::Length(passage_lines),
                Constraint::Length(1), // spacing
                Constraint::Length(1), // progress
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ])
            .split(area);

        let lines: Vec<Line> = frame.lines[rows].iter().map(|l| to_line(l)).collect();
        Paragraph::new(lines).render(chunks[1], buf);

        let dim_style = Style::default().fg(Color::DarkGray);
        let italic_style = dim_style.add_modifier(Modifier::ITALIC);

        Paragraph::new(Span::styled(frame.progress, dim_style))
            .alignment(Alignment::Left)
            .render(chunks[3], buf);

        Paragraph::new(Span::styled(LEGEND, italic_style))
            .alignment(Alignment::Left)
            .render(chunks[4], buf);
    }
}
