//! Page rendering.
//!
//! The page is laid out as one tall document (hero, body, contact) that
//! scrolls under a fixed footer. While the loading sequence runs, the
//! overlay is drawn on top of it.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use super::ui::{centered_rect, page_and_footer};
use crate::page::{heading_id, hero_id, Page};
use crate::player::visible_fraction;
use crate::surface::{BufferSurface, Surface, SurfaceId};

const CURSOR: &str = "█";
const HERO_PREFIX: &str = "> ";

/// Row positions of the animated regions inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentLayout {
    pub hero_top: usize,
    pub hero_height: usize,
    pub body_top: usize,
    pub contact_top: usize,
    pub contact_height: usize,
    pub total: usize,
}

impl DocumentLayout {
    /// Title, blank, hero, blank, body, blank, contact header, contact lines.
    pub fn new(hero_lines: usize, body_lines: usize, contact_lines: usize) -> Self {
        let hero_top = 2;
        let body_top = hero_top + hero_lines + 1;
        let contact_top = body_top + body_lines + 1;
        let contact_height = contact_lines + 1;
        Self {
            hero_top,
            hero_height: hero_lines,
            body_top,
            contact_top,
            contact_height,
            total: contact_top + contact_height,
        }
    }

    /// Visible fraction of the contact panel for a viewport at `scroll`.
    pub fn contact_visibility(&self, scroll: usize, viewport_height: usize) -> f32 {
        visible_fraction(
            self.contact_top,
            self.contact_height,
            scroll,
            viewport_height,
        )
    }

    /// Visible fraction (0 or 1) of body row `row`.
    pub fn body_row_visibility(&self, row: usize, scroll: usize, viewport_height: usize) -> f32 {
        visible_fraction(self.body_top + row, 1, scroll, viewport_height)
    }
}

/// Scroll state of the page viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageView {
    pub scroll: usize,
    pub viewport_height: usize,
}

impl PageView {
    fn max_scroll(&self, total: usize) -> usize {
        total.saturating_sub(self.viewport_height)
    }

    pub fn scroll_by(&mut self, delta: isize, total: usize) {
        let target = self.scroll.saturating_add_signed(delta);
        self.scroll = target.min(self.max_scroll(total));
    }

    pub fn page_by(&mut self, pages: isize, total: usize) {
        let rows = self.viewport_height.max(1) as isize;
        self.scroll_by(pages * rows, total);
    }

    pub fn to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn to_bottom(&mut self, total: usize) {
        self.scroll = self.max_scroll(total);
    }

    /// Keep the scroll offset valid after a resize.
    pub fn clamp(&mut self, total: usize) {
        self.scroll = self.scroll.min(self.max_scroll(total));
    }
}

/// A surface shows the typing cursor while a task writes to it and it is
/// not marked completed.
fn shows_cursor(page: &Page, id: &SurfaceId, surface: Option<&BufferSurface>) -> bool {
    page.stage().is_busy(id) && surface.is_some_and(|s| !s.is_completed())
}

/// Build the document lines and their layout.
pub fn build_document(page: &Page, theme: &Theme) -> (Vec<Line<'static>>, DocumentLayout) {
    let body = page.body();
    let contact_lines = page.contact_surface().map_or(0, |s| s.line_count());
    let layout = DocumentLayout::new(page.hero_count(), body.len(), contact_lines);
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(layout.total);

    lines.push(Line::from(Span::styled("~/portfolio", theme.accent_bold_style())));
    lines.push(Line::default());

    for index in 0..page.hero_count() {
        let surface = page.hero_surface(index);
        let text = surface.map(|s| s.content()).unwrap_or_default();
        let typing = shows_cursor(page, &hero_id(index), surface);
        let mut spans = vec![
            Span::styled(HERO_PREFIX, theme.accent_style()),
            Span::styled(text, theme.text_style()),
        ];
        if typing {
            spans.push(Span::styled(CURSOR, theme.accent_style()));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::default());

    for (row, text) in body.iter().enumerate() {
        match page.heading_surface(row) {
            Some(surface) => {
                let mut spans = vec![Span::styled(surface.content(), theme.accent_bold_style())];
                if shows_cursor(page, &heading_id(row), Some(surface)) {
                    spans.push(Span::styled(CURSOR, theme.accent_style()));
                }
                lines.push(Line::from(spans));
            }
            None => lines.push(Line::from(Span::styled(text.clone(), theme.text_style()))),
        }
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("## contact", theme.accent_bold_style())));
    if let Some(contact) = page.contact_surface() {
        let visible = contact.visible_lines();
        for index in 0..contact.line_count() {
            match visible.get(index) {
                Some(line) => lines.push(Line::from(vec![
                    Span::styled("$ ", theme.accent_style()),
                    Span::styled(line.text.clone(), theme.text_style()),
                ])),
                None => lines.push(Line::default()),
            }
        }
    }

    (lines, layout)
}

/// Lines of the loading overlay, keeping only the last `height` so the
/// newest output stays in view.
pub fn overlay_lines(page: &Page, theme: &Theme, height: usize) -> Vec<Line<'static>> {
    let Some(surface) = page.overlay_surface() else {
        return Vec::new();
    };
    let lines = surface.lines();
    let skip = lines.len().saturating_sub(height);
    lines[skip..]
        .iter()
        .map(|line| {
            let style = line
                .kind
                .map_or_else(|| theme.text_style(), |kind| theme.step_style(kind));
            Line::from(Span::styled(line.text.clone(), style))
        })
        .collect()
}

fn footer_text(overlay_visible: bool) -> &'static str {
    if overlay_visible {
        " esc/enter: skip   q: quit"
    } else {
        " ↑/↓ j/k: scroll   pgup/pgdn: page   g/G: top/bottom   q: quit"
    }
}

/// Draw one frame. Returns the layout used so the caller can check visibility.
pub fn render(
    frame: &mut Frame,
    page: &Page,
    view: &mut PageView,
    theme: &Theme,
) -> DocumentLayout {
    let area = frame.area();
    let (page_area, footer_area) = page_and_footer(area);

    let (lines, layout) = build_document(page, theme);
    view.viewport_height = page_area.height as usize;
    view.clamp(layout.total);

    let scroll = u16::try_from(view.scroll).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), page_area);
    frame.render_widget(
        Paragraph::new(footer_text(page.overlay_visible())).style(theme.text_secondary_style()),
        footer_area,
    );

    if page.overlay_visible() {
        render_overlay(frame, page, theme, area);
    }

    layout
}

fn render_overlay(frame: &mut Frame, page: &Page, theme: &Theme, area: Rect) {
    let popup = centered_rect(70, 60, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.text_secondary_style())
        .title(Span::styled(" portfolio ", theme.accent_style()));
    let inner = block.inner(popup);
    let lines = overlay_lines(page, theme, inner.height as usize);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Cursor block right after the newest line.
    let col = page
        .overlay_surface()
        .and_then(|surface| surface.lines().last())
        .map_or(0, |line| UnicodeWidthStr::width(line.text.as_str()));
    let row = lines.len().saturating_sub(1);
    frame.render_widget(Paragraph::new(lines), inner);

    if col < inner.width as usize && row < inner.height as usize {
        let cursor = Rect::new(inner.x + col as u16, inner.y + row as u16, 1, 1);
        frame.render_widget(Paragraph::new(CURSOR).style(theme.accent_style()), cursor);
    }
}
