//! Application core: the event loop and action dispatch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use shoely_core::{
    Choice, ConfirmPrompt, Notice, ProductEditor, ProductListController, ProductService, Route,
};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::host::{FormHost, TuiHost};
use crate::screen::ScreenId;
use crate::screens::{product_form::ProductFormScreen, product_list::ProductListScreen};
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays on screen.
const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App<S> {
    active_screen: ScreenId,
    /// Live screens. Forms are created on navigation and dropped on GoBack.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Bumped every time a form opens.
    form_serial: u64,
    running: bool,
    help_visible: bool,
    /// Service location shown in the status bar.
    service_label: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    controller: ProductListController<S, TuiHost>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Open confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmPrompt>,
    /// Active toast with display timestamp.
    notification: Option<(Notice, Instant)>,
}

impl<S: ProductService + 'static> App<S> {
    pub fn new(service: S, service_label: impl Into<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let controller = ProductListController::new(service, TuiHost::new(action_tx.clone()));

        let mut list: Box<dyn Component> = Box::new(ProductListScreen::new());
        list.set_focused(true);
        let screens = HashMap::from([(ScreenId::ShoeList, list)]);

        Self {
            active_screen: ScreenId::ShoeList,
            screens,
            form_serial: 0,
            running: true,
            help_visible: false,
            service_label: service_label.into(),
            action_tx,
            action_rx,
            controller,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;

        self.start_data_bridge();
        self.focus_list();

        let mut events = EventReader::spawn(Rates::default());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        drop(events);
        info!("TUI event loop ended");
        Ok(())
    }

    fn start_data_bridge(&self) {
        let state = self.controller.subscribe();
        let tx = self.action_tx.clone();
        let cancel = self.data_cancel.clone();
        tokio::spawn(crate::data_bridge::spawn_data_bridge(state, tx, cancel));
    }

    // ── Key mapping ──────────────────────────────────────────────

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        // Confirmation dialog captures all input
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Ok(Some(Action::ConfirmYes)),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Ok(Some(Action::ConfirmNo)),
                _ => Ok(None),
            };
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        // Forms capture every other key
        if !self.active_screen.is_form() {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
                (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
                (KeyModifiers::NONE, KeyCode::Esc) if self.notification.is_some() => {
                    return Ok(Some(Action::DismissNotification));
                }
                _ => {}
            }
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    // ── Action dispatch ──────────────────────────────────────────

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Resize(w, h) => {
                debug!(width = w, height = h, "terminal resized");
            }

            Action::Render => {}

            Action::Tick => {
                if let Some((_, shown)) = &self.notification {
                    if shown.elapsed() > NOTICE_TTL {
                        self.notification = None;
                    }
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            // ── Navigation ──────────────────────────────────────
            Action::Navigate(route) => self.open_form(route),

            Action::GoBack => self.close_form(),

            Action::CloseForm(serial) => {
                if *serial == self.form_serial {
                    self.close_form();
                } else {
                    debug!(serial, current = self.form_serial, "form already closed");
                }
            }

            // ── List commands → controller ──────────────────────
            Action::RequestRefresh => {
                let controller = self.controller.clone();
                tokio::spawn(async move { controller.refresh().await });
            }

            Action::RequestAdd => self.controller.navigate_to_add(),

            Action::RequestEdit(product) => self.controller.navigate_to_edit(product),

            Action::RequestDelete(product) => {
                let controller = self.controller.clone();
                let product = product.clone();
                tokio::spawn(async move {
                    let outcome = controller.request_delete(&product.id, &product.name).await;
                    debug!(id = %product.id, ?outcome, "delete request finished");
                });
            }

            Action::SubmitForm(mode, draft) => {
                let controller = self.controller.clone();
                let host = FormHost::new(controller.host().clone(), self.form_serial);
                let (mode, draft) = (mode.clone(), draft.clone());
                tokio::spawn(async move {
                    let editor = ProductEditor::new(controller.service(), &host);
                    let outcome = editor.submit(&mode, &draft).await;
                    debug!(?outcome, "form submitted");
                });
            }

            // ── Confirmation dialog ─────────────────────────────
            Action::ShowConfirm(prompt) => {
                self.pending_confirm = Some(prompt.clone());
            }

            Action::ConfirmYes => self.answer_confirm(Choice::Confirm),

            Action::ConfirmNo => self.answer_confirm(Choice::Cancel),

            // ── Notifications ───────────────────────────────────
            Action::Notify(notice) => {
                self.notification = Some((notice.clone(), Instant::now()));
            }

            Action::DismissNotification => {
                self.notification = None;
            }

            // Data updates go to the list even while a form is open
            Action::ListUpdated(_) => {
                if let Some(screen) = self.screens.get_mut(&ScreenId::ShoeList) {
                    if let Some(follow_up) = screen.update(action)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn answer_confirm(&mut self, choice: Choice) {
        if self.pending_confirm.take().is_some() {
            self.controller.host().resolve(choice);
        }
    }

    fn open_form(&mut self, route: &Route) {
        let target = ScreenId::for_route(route);
        debug!(route = route.name(), "opening form");
        self.form_serial += 1;
        self.screens.retain(|id, _| !id.is_form());
        self.screens
            .insert(target, Box::new(ProductFormScreen::for_route(route)));
        self.switch_to(target);
    }

    fn close_form(&mut self) {
        if self.active_screen.is_form() {
            self.screens.remove(&self.active_screen);
            self.switch_to(ScreenId::ShoeList);
            self.focus_list();
        }
    }

    fn switch_to(&mut self, target: ScreenId) {
        if target == self.active_screen {
            if let Some(screen) = self.screens.get_mut(&target) {
                screen.set_focused(true);
            }
            return;
        }
        debug!("switching screen: {} → {}", self.active_screen, target);
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(false);
        }
        self.active_screen = target;
        if let Some(screen) = self.screens.get_mut(&target) {
            screen.set_focused(true);
            debug!(screen = screen.id(), "focused");
        }
    }

    /// The list became visible: always refetch.
    fn focus_list(&self) {
        let controller = self.controller.clone();
        tokio::spawn(async move { controller.on_screen_focus().await });
    }

    // ── Rendering ────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_status_bar(frame, layout[1]);

        // Overlays on top (last = topmost)
        if let Some((ref notice, _)) = self.notification {
            Self::render_notification(frame, area, notice);
        }
        if let Some(ref prompt) = self.pending_confirm {
            Self::render_confirm_dialog(frame, area, prompt);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints = if self.active_screen.is_form() {
            " │ Enter save  Esc back"
        } else {
            " │ ? help  q quit"
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", self.active_screen),
                theme::screen_label(),
            ),
            Span::styled(self.service_label.as_str(), theme::text()),
            Span::styled(hints, theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let width = width.min(area.width.saturating_sub(4));
        let height = height.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        Rect::new(area.x + x, area.y + y, width, height)
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_area = Self::centered(area, 48, 14);
        frame.render_widget(Clear, help_area);

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(true))
            .style(theme::overlay());
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            entry("j/k ↑/↓", "Move up/down"),
            entry("g/G", "Top / bottom"),
            entry("r", "Refresh"),
            entry("a", "Add shoe"),
            entry("e Enter", "Edit shoe"),
            entry("d", "Delete shoe"),
            entry("Tab", "Next form field"),
            entry("Esc", "Back / close"),
            entry("q", "Quit"),
            Line::from(""),
            Line::from(Span::styled("          Esc or ? to close", theme::key_hint())),
        ];
        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, prompt: &ConfirmPrompt) {
        let dialog_area = Self::centered(area, 54, 6);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", prompt.title))
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::confirm_border(prompt.destructive))
            .style(theme::overlay());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!(" {}", prompt.message),
                theme::text(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::key_hint_key()),
                Span::styled(format!("{}    ", prompt.confirm_label), theme::confirm_border(prompt.destructive)),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled(prompt.cancel_label, theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }

    /// Render a toast in the bottom-right corner.
    fn render_notification(frame: &mut Frame, area: Rect, notice: &Notice) {
        let text = format!("{}: {}", notice.title, notice.message);
        let text_len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let width = text_len.saturating_add(6).clamp(20, 60);
        let height = 3u16;
        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 1); // above status bar
        let toast_area = Rect::new(area.x + x, area.y + y, width.min(area.width), height);

        let (accent, icon) = theme::notice(notice.level);

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .style(theme::overlay());
        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), accent),
            Span::styled(text, theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::sync::Notify;

    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use shoely_core::{CoreError, NewProduct, Product, ProductId};

    use super::*;

    #[derive(Default)]
    struct MemoryService {
        items: Mutex<Vec<Product>>,
        deleted: Mutex<Vec<ProductId>>,
        /// When set, creates wait for a permit.
        create_gate: Option<Arc<Notify>>,
    }

    impl MemoryService {
        fn with(items: Vec<Product>) -> Self {
            Self {
                items: Mutex::new(items),
                ..Self::default()
            }
        }
    }

    impl ProductService for MemoryService {
        async fn list_products(&self) -> Result<Vec<Product>, CoreError> {
            Ok(self.items.lock().unwrap().clone())
        }

        async fn delete_product(&self, id: &ProductId) -> Result<(), CoreError> {
            self.items.lock().unwrap().retain(|p| &p.id != id);
            self.deleted.lock().unwrap().push(id.clone());
            Ok(())
        }

        async fn create_product(&self, product: &NewProduct) -> Result<Product, CoreError> {
            if let Some(gate) = &self.create_gate {
                gate.notified().await;
            }
            let mut items = self.items.lock().unwrap();
            let created = Product {
                id: ProductId::new((items.len() + 1).to_string()),
                name: product.name.clone(),
                code: product.code.clone(),
                price: product.price,
                size: product.size.clone(),
            };
            items.push(created.clone());
            Ok(created)
        }

        async fn update_product(
            &self,
            id: &ProductId,
            product: &NewProduct,
        ) -> Result<Product, CoreError> {
            Err(CoreError::NotFound {
                identifier: format!("{id} ({})", product.name),
            })
        }
    }

    fn air() -> Product {
        Product {
            id: ProductId::from("1"),
            name: "Air".into(),
            code: "A1".into(),
            price: 100.0,
            size: "42".into(),
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    /// Feed a key through the app exactly as the event loop would.
    fn press(app: &mut App<MemoryService>, key: KeyEvent) {
        if let Some(action) = app.handle_key_event(key).unwrap() {
            app.process_action(&action).unwrap();
        }
    }

    /// Drain queued actions until one matches `done`.
    async fn pump_until(app: &mut App<MemoryService>, done: impl Fn(&Action) -> bool) {
        loop {
            let action = tokio::time::timeout(Duration::from_secs(2), app.action_rx.recv())
                .await
                .expect("timed out waiting for action")
                .unwrap();
            app.process_action(&action).unwrap();
            if done(&action) {
                return;
            }
        }
    }

    fn settled_with(len: usize) -> impl Fn(&Action) -> bool {
        move |a: &Action| matches!(a, Action::ListUpdated(s) if !s.is_busy() && s.items.len() == len)
    }

    fn fill_form(app: &mut App<MemoryService>, values: [&str; 4]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                press(app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
            }
            for c in value.chars() {
                press(app, key(c));
            }
        }
    }

    async fn started(items: Vec<Product>) -> App<MemoryService> {
        start_with(MemoryService::with(items)).await
    }

    async fn start_with(service: MemoryService) -> App<MemoryService> {
        let len = service.items.lock().unwrap().len();
        let mut app = App::new(service, "http://test/shoes");
        app.start_data_bridge();
        app.focus_list();
        pump_until(&mut app, settled_with(len)).await;
        app
    }

    fn screen_text(app: &App<MemoryService>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn focus_loads_and_renders_the_list() {
        let app = started(vec![air()]).await;

        let text = screen_text(&app);
        assert!(text.contains("Shoes (1)"));
        assert!(text.contains("Air"));
        assert!(text.contains("http://test/shoes"));
    }

    #[tokio::test]
    async fn confirmed_delete_removes_and_reloads() {
        let mut app = started(vec![air()]).await;

        press(&mut app, key('d'));
        pump_until(&mut app, |a| matches!(a, Action::ShowConfirm(_))).await;
        assert!(screen_text(&app).contains("Are you sure you want to delete \"Air\"?"));

        press(&mut app, key('y'));
        pump_until(&mut app, |a| matches!(a, Action::Notify(_))).await;
        let (notice, _) = app.notification.clone().unwrap();
        assert_eq!(notice, Notice::deleted());

        pump_until(&mut app, settled_with(0)).await;
        assert_eq!(
            *app.controller.service().deleted.lock().unwrap(),
            vec![ProductId::from("1")]
        );
        assert!(app.pending_confirm.is_none());
    }

    #[tokio::test]
    async fn declined_delete_keeps_the_item() {
        let mut app = started(vec![air()]).await;

        press(&mut app, key('d'));
        pump_until(&mut app, |a| matches!(a, Action::ShowConfirm(_))).await;
        press(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(app.pending_confirm.is_none());
        assert!(app.controller.service().deleted.lock().unwrap().is_empty());
        assert_eq!(app.controller.state().items.len(), 1);
    }

    #[tokio::test]
    async fn add_form_round_trip_returns_to_refreshed_list() {
        let mut app = started(Vec::new()).await;

        press(&mut app, key('a'));
        pump_until(&mut app, |a| matches!(a, Action::Navigate(Route::AddShoe))).await;
        assert_eq!(app.active_screen, ScreenId::AddShoe);

        fill_form(&mut app, ["Zoom", "Z9", "250", "41"]);
        press(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        pump_until(&mut app, |a| matches!(a, Action::CloseForm(_))).await;
        assert_eq!(app.active_screen, ScreenId::ShoeList);
        assert!(!app.screens.contains_key(&ScreenId::AddShoe));

        pump_until(&mut app, settled_with(1)).await;
        assert!(screen_text(&app).contains("Zoom"));
    }

    #[tokio::test]
    async fn late_save_leaves_a_newer_form_open() {
        let gate = Arc::new(Notify::new());
        let service = MemoryService {
            create_gate: Some(Arc::clone(&gate)),
            ..MemoryService::default()
        };
        let mut app = start_with(service).await;

        press(&mut app, key('a'));
        pump_until(&mut app, |a| matches!(a, Action::Navigate(Route::AddShoe))).await;
        fill_form(&mut app, ["Zoom", "Z9", "250", "41"]);
        press(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        // Leave while the save is in flight, then open a fresh form.
        press(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.active_screen, ScreenId::ShoeList);
        press(&mut app, key('a'));
        pump_until(&mut app, |a| matches!(a, Action::Navigate(Route::AddShoe))).await;

        gate.notify_one();
        pump_until(&mut app, |a| matches!(a, Action::CloseForm(_))).await;

        assert_eq!(app.active_screen, ScreenId::AddShoe);
        assert!(app.screens.contains_key(&ScreenId::AddShoe));
        assert_eq!(app.controller.service().items.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_update_stays_on_form() {
        let mut app = started(vec![air()]).await;

        press(&mut app, key('e'));
        pump_until(&mut app, |a| matches!(a, Action::Navigate(_))).await;
        assert_eq!(app.active_screen, ScreenId::EditShoe);

        press(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        pump_until(&mut app, |a| matches!(a, Action::Notify(_))).await;

        let (notice, _) = app.notification.clone().unwrap();
        assert_eq!(notice.message, "Could not update the product!");
        assert_eq!(app.active_screen, ScreenId::EditShoe);
    }

    #[tokio::test]
    async fn global_keys_are_typed_into_forms() {
        let mut app = started(Vec::new()).await;

        press(&mut app, key('?'));
        assert!(app.help_visible);
        press(&mut app, key('?'));
        assert!(!app.help_visible);

        press(&mut app, key('a'));
        pump_until(&mut app, |a| matches!(a, Action::Navigate(_))).await;
        press(&mut app, key('q'));
        assert!(app.running);

        press(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.active_screen, ScreenId::ShoeList);
        press(&mut app, key('q'));
        assert!(!app.running);
    }
}
