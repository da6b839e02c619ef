//! Add / edit form: four text fields submitted through the editor.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use shoely_core::{EditorMode, ProductDraft, Route};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

const FIELD_COUNT: usize = 4;

fn field_label(idx: usize) -> &'static str {
    match idx {
        0 => "Name",
        1 => "Code",
        2 => "Price",
        3 => "Size",
        _ => "",
    }
}

pub struct ProductFormScreen {
    screen: ScreenId,
    focused: bool,
    mode: EditorMode,
    draft: ProductDraft,
    /// Which field is currently focused (0-indexed).
    field_idx: usize,
}

impl ProductFormScreen {
    /// Form for a navigation destination, pre-filled when editing.
    pub fn for_route(route: &Route) -> Self {
        let (mode, draft) = EditorMode::from_route(route);
        Self {
            screen: ScreenId::for_route(route),
            focused: false,
            mode,
            draft,
            field_idx: 0,
        }
    }

    fn field(&self, idx: usize) -> &str {
        match idx {
            0 => &self.draft.name,
            1 => &self.draft.code,
            2 => &self.draft.price,
            3 => &self.draft.size,
            _ => "",
        }
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.field_idx {
            0 => Some(&mut self.draft.name),
            1 => Some(&mut self.draft.code),
            2 => Some(&mut self.draft.price),
            3 => Some(&mut self.draft.size),
            _ => None,
        }
    }

    fn next_field(&mut self) {
        self.field_idx = (self.field_idx + 1) % FIELD_COUNT;
    }

    fn prev_field(&mut self) {
        self.field_idx = (self.field_idx + FIELD_COUNT - 1) % FIELD_COUNT;
    }
}

impl Component for ProductFormScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => return Ok(Some(Action::GoBack)),
            KeyCode::Enter => {
                return Ok(Some(Action::SubmitForm(
                    self.mode.clone(),
                    self.draft.clone(),
                )));
            }
            KeyCode::Tab | KeyCode::Down => self.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.prev_field(),
            KeyCode::Backspace => {
                if let Some(field) = self.field_mut() {
                    field.pop();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = self.field_mut() {
                    field.push(c);
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", self.screen.label()))
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // fields
            Constraint::Length(1), // hints
        ])
        .split(inner);

        let mut lines = vec![Line::from("")];
        for idx in 0..FIELD_COUNT {
            let active = idx == self.field_idx;
            let marker = if active { "▸ " } else { "  " };
            let value = self.field(idx);
            let mut spans = vec![
                Span::styled(
                    format!("{marker}{:<8}", field_label(idx)),
                    theme::field_label(),
                ),
                Span::styled(
                    value.to_owned(),
                    theme::field_value(active),
                ),
            ];
            if active {
                spans.push(Span::styled("█", theme::cursor()));
            }
            lines.push(Line::from(spans));
        }
        frame.render_widget(Paragraph::new(lines), layout[0]);

        let hints = Line::from(vec![
            Span::styled("  Tab ", theme::key_hint_key()),
            Span::styled("next field  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("save  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        self.screen.label()
    }
}
