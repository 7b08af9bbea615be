use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use ratatui::widgets::TableState;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::api_client::{ApiClient, ErrorKind, FetchOutcome};
use crate::config::config::DisplayConfig;
use crate::projection::TableProjection;
use crate::ui::actions::Action;
use crate::ui::render::wrap_text;

const PAGE_SIZE: usize = 10;

/// Result of one spawned fetch, tagged with the request that produced it
#[derive(Debug)]
pub struct FetchResult {
    pub request_id: u64,
    pub path: &'static str,
    pub outcome: FetchOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Loading(&'static str),
    Loaded { path: &'static str, rows: usize },
    Failed { path: &'static str, kind: ErrorKind },
    Cancelled(&'static str),
}

pub struct App {
    client: ApiClient,
    display: DisplayConfig,
    focused: usize,
    projection: TableProjection,
    status: Status,
    table_state: TableState,
    text_scroll: u16,
    text_width: u16,
    result_tx: UnboundedSender<FetchResult>,
    result_rx: UnboundedReceiver<FetchResult>,
    cancel: Option<CancellationToken>,
    fetch_task: Option<JoinHandle<()>>,
    next_request_id: u64,
    pending_request_id: Option<u64>,
    button_areas: Vec<Rect>,
    should_quit: bool,
}

impl App {
    pub fn new(client: ApiClient, display: DisplayConfig) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            client,
            display,
            focused: 0,
            projection: TableProjection::default(),
            status: Status::Idle,
            table_state: TableState::default(),
            text_scroll: 0,
            text_width: 0,
            result_tx,
            result_rx,
            cancel: None,
            fetch_task: None,
            next_request_id: 0,
            pending_request_id: None,
            button_areas: Vec::new(),
            should_quit: false,
        }
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn projection(&self) -> &TableProjection {
        &self.projection
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn focused(&self) -> Action {
        Action::ALL[self.focused]
    }

    pub fn is_loading(&self) -> bool {
        self.pending_request_id.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn table_state_mut(&mut self) -> &mut TableState {
        &mut self.table_state
    }

    pub fn text_scroll(&self) -> u16 {
        self.text_scroll
    }

    /// Width the response text was last wrapped to, recorded while drawing
    pub fn set_text_width(&mut self, width: u16) {
        self.text_width = width;
    }

    /// Screen areas of the buttons, in `Action::ALL` order, recorded while drawing
    pub fn set_button_areas(&mut self, areas: Vec<Rect>) {
        self.button_areas = areas;
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            Status::Idle => "Ready".to_string(),
            Status::Loading(path) => format!("Loading {}...", path),
            Status::Loaded { path, .. } if self.projection.is_single_cell() => {
                format!("{}: loaded", path)
            }
            Status::Loaded { path, rows } => format!("{}: {} rows", path, rows),
            Status::Failed { path, kind } => format!("{}: {}", path, kind.label()),
            Status::Cancelled(path) => format!("{}: cancelled", path),
        }
    }

    pub fn activate(&mut self, action: Action) {
        tracing::debug!(target: "ui", "Activated {:?}", action);
        match action.endpoint() {
            Some(path) => self.queue_fetch(path),
            None => {
                self.cancel_pending();
                self.should_quit = true;
            }
        }
    }

    /// Spawn a fetch for `path`, superseding whatever is still in flight
    fn queue_fetch(&mut self, path: &'static str) {
        let request_id = self.begin_request(path);
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        let client = self.client.clone();
        let tx = self.result_tx.clone();
        self.fetch_task = Some(tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(target: "ui", "Request {} for {} cancelled", request_id, path);
                }
                outcome = client.fetch(path) => {
                    let _ = tx.send(FetchResult { request_id, path, outcome });
                }
            }
        }));
    }

    /// Stop the task in flight: the token lets it log, the abort guarantees it ends
    fn stop_fetch_task(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
    }

    fn begin_request(&mut self, path: &'static str) -> u64 {
        self.stop_fetch_task();
        self.next_request_id = self.next_request_id.wrapping_add(1);
        self.pending_request_id = Some(self.next_request_id);
        self.status = Status::Loading(path);
        self.next_request_id
    }

    pub fn cancel_pending(&mut self) {
        self.stop_fetch_task();
        if self.pending_request_id.take().is_some() {
            if let Status::Loading(path) = self.status {
                tracing::info!(target: "ui", "Cancelled request for {}", path);
                self.status = Status::Cancelled(path);
            }
        }
    }

    /// Replace the table with a fetch result. Returns false for stale results.
    pub fn apply_fetch_result(&mut self, result: FetchResult) -> bool {
        if self.pending_request_id != Some(result.request_id) {
            tracing::debug!(
                target: "ui",
                "Dropping stale result {} for {}",
                result.request_id,
                result.path
            );
            return false;
        }
        self.pending_request_id = None;
        self.cancel = None;
        self.fetch_task = None;

        self.projection = TableProjection::from_outcome(&result.outcome);
        self.status = match &result.outcome {
            Ok(_) => Status::Loaded {
                path: result.path,
                rows: self.projection.row_count(),
            },
            Err(e) => Status::Failed {
                path: result.path,
                kind: e.kind(),
            },
        };
        self.text_scroll = 0;
        self.table_state = TableState::default();
        if self.projection.row_count() > 0 && !self.projection.is_single_cell() {
            self.table_state.select(Some(0));
        }
        true
    }

    /// Apply every result that has arrived since the last frame
    pub fn drain_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            self.apply_fetch_result(result);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.activate(Action::Exit);
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.focused = (self.focused + Action::ALL.len() - 1) % Action::ALL.len();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.focused = (self.focused + 1) % Action::ALL.len();
            }
            KeyCode::Enter => self.activate(self.focused()),
            KeyCode::Esc => self.cancel_pending(),
            KeyCode::PageUp => self.scroll_up(PAGE_SIZE),
            KeyCode::PageDown => self.scroll_down(PAGE_SIZE),
            KeyCode::Home => self.scroll_up(usize::MAX),
            KeyCode::End => self.scroll_down(usize::MAX),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let position = Position::new(mouse.column, mouse.row);
        if let Some(index) = self.button_areas.iter().position(|a| a.contains(position)) {
            self.focused = index;
            self.activate(Action::ALL[index]);
        }
    }

    fn scroll_up(&mut self, amount: usize) {
        if self.projection.is_single_cell() {
            let amount = u16::try_from(amount).unwrap_or(u16::MAX);
            self.text_scroll = self.text_scroll.saturating_sub(amount);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        if self.projection.row_count() > 0 {
            self.table_state.select(Some(current.saturating_sub(amount)));
        }
    }

    fn scroll_down(&mut self, amount: usize) {
        if self.projection.is_single_cell() {
            let lines = self
                .projection
                .cell(0, 0)
                .map_or(0, |text| wrap_text(text, self.text_width).len());
            let max_scroll = u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX);
            let amount = u16::try_from(amount).unwrap_or(u16::MAX);
            self.text_scroll = self.text_scroll.saturating_add(amount).min(max_scroll);
            return;
        }
        let rows = self.projection.row_count();
        if rows > 0 {
            let current = self.table_state.selected().unwrap_or(0);
            self.table_state
                .select(Some(current.saturating_add(amount).min(rows - 1)));
        }
    }
}
