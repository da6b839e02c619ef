//! Shoe list screen: the product table and its key bindings.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use shoely_core::{ListState, Product, format_price};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct ProductListScreen {
    focused: bool,
    list: ListState,
    table_state: TableState,
}

impl ProductListScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            list: ListState::new(),
            table_state: TableState::default(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected(&self) -> Option<&Product> {
        self.list.items.get(self.selected_index())
    }

    fn select(&mut self, idx: usize) {
        let clamped = idx.min(self.list.items.len().saturating_sub(1));
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.list.items.is_empty() {
            return;
        }
        let next = self.selected_index().saturating_add_signed(delta);
        self.select(next);
    }

    fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
        let line = Line::from(Span::styled(format!("  {text}"), theme::muted()));
        frame.render_widget(Paragraph::new(vec![Line::from(""), line]), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from(" Name").style(theme::table_header()),
            Cell::from("Code").style(theme::table_header()),
            Cell::from("Price").style(theme::table_header()),
            Cell::from("Size").style(theme::table_header()),
        ]);

        let selected_idx = self.selected_index();
        let rows: Vec<Row> = self
            .list
            .items
            .iter()
            .enumerate()
            .map(|(i, product)| {
                let is_selected = i == selected_idx;
                let prefix = if is_selected { "▸" } else { " " };
                Row::new(vec![
                    Cell::from(format!("{prefix}{}", product.name))
                        .style(theme::product_name(is_selected)),
                    Cell::from(product.code.clone()),
                    Cell::from(format_price(product.price)).style(theme::price()),
                    Cell::from(product.size.clone()),
                ])
                .style(theme::row(is_selected))
            })
            .collect();

        let widths = [
            Constraint::Min(16),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(6),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::row(true));

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }
}

impl Component for ProductListScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.select(0);
                None
            }
            KeyCode::Char('G') => {
                self.select(usize::MAX);
                None
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                None
            }
            KeyCode::Char('r') => Some(Action::RequestRefresh),
            KeyCode::Char('a') => Some(Action::RequestAdd),
            KeyCode::Char('e') | KeyCode::Enter => {
                self.selected().cloned().map(Action::RequestEdit)
            }
            KeyCode::Char('d') => self.selected().cloned().map(Action::RequestDelete),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::ListUpdated(list) = action {
            self.list = list.clone();
            if self.list.items.is_empty() {
                self.table_state.select(None);
            } else {
                self.select(self.selected_index());
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let count = self.list.items.len();
        let mut title = vec![Span::styled(
            format!(" Shoes ({count}) "),
            theme::title(),
        )];
        if self.list.refreshing {
            title.push(Span::styled(
                "⟳ refreshing ",
                theme::refreshing(),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // table
            Constraint::Length(1), // hints
        ])
        .split(inner);

        if self.list.loading && self.list.is_empty() {
            Self::render_placeholder(frame, layout[0], "Loading products…");
        } else if self.list.is_empty() {
            Self::render_placeholder(frame, layout[0], "No products yet. Press a to add one.");
        } else {
            self.render_table(frame, layout[0]);
        }

        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("navigate  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
            Span::styled("a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "ShoeList"
    }
}
