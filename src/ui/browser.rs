//! Ratatui browser frontend
//!
//! One host for the interaction engine: renders a folder-tree pane and a
//! listing table, translates crossterm mouse/key events into normalized
//! gestures, and interprets the engine's outputs. All the selection, drag
//! and menu rules live in [`crate::engine`]; this module only maps screen
//! coordinates to item ids and draws what the engine says.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table};

use crate::engine::{
    BrowserEngine, DragState, EngineConfig, Gesture, MenuAction, Modifiers as GestureModifiers,
    MoveRequest, Output, Position, SortField,
};
use crate::registry::{ItemKind, Registry};
use crate::ui::format;

/// How close together two clicks must land to count as a double click
const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Width of the folder-tree pane
const TREE_PANE_WIDTH: u16 = 28;

/// A built-in menu entry the user activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInvocation {
    pub action: MenuAction,
    pub kind: ItemKind,
    pub ids: Vec<String>,
}

/// An external menu handler invocation the engine requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerCall {
    pub kind: ItemKind,
    pub ids: Vec<String>,
}

/// Everything the session resolved to, for the host to act on after the
/// terminal is restored
#[derive(Debug, Clone, Default)]
pub struct SessionSummary {
    pub moves: Vec<MoveRequest>,
    pub invocations: Vec<ActionInvocation>,
    pub handler_calls: Vec<HandlerCall>,
}

/// Run the browser over a registry snapshot until the user quits
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or an event cannot be
/// read.
pub fn run(registry: Registry, engine_config: EngineConfig) -> Result<SessionSummary, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = BrowserApp::new(registry, engine_config);
    let result = app.event_loop(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result.map(|()| app.summary)
}

struct BrowserApp {
    engine: BrowserEngine,
    registry: Registry,
    summary: SessionSummary,
    status: String,
    tree_area: Rect,
    table_area: Rect,
    menu_rect: Option<Rect>,
    scroll: usize,
    last_click: Option<(String, Instant)>,
    should_quit: bool,
}

impl BrowserApp {
    fn new(registry: Registry, engine_config: EngineConfig) -> Self {
        Self {
            engine: BrowserEngine::new(engine_config),
            registry,
            summary: SessionSummary::default(),
            status: "left: select/drag, right: menu, double-click: open, q: quit".to_string(),
            tree_area: Rect::default(),
            table_area: Rect::default(),
            menu_rect: None,
            scroll: 0,
            last_click: None,
            should_quit: false,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<(), io::Error> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;
            match event::read()? {
                Event::Key(key) => self.on_key(key),
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Event translation
    // ------------------------------------------------------------------

    fn on_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.engine.open_menu().is_some() {
                    self.send(Gesture::CloseMenu);
                } else if matches!(self.engine.drag_state(), DragState::Dragging { .. }) {
                    self.send(Gesture::DragCancel);
                    self.status = "drag cancelled".to_string();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Backspace => {
                let parent = self
                    .engine
                    .current_folder()
                    .and_then(|id| self.registry.get(id))
                    .and_then(|folder| folder.parent_id.clone());
                if self.engine.current_folder().is_some() {
                    self.scroll = 0;
                    self.send(Gesture::Navigate { folder: parent });
                }
            }
            KeyCode::Enter => {
                // Open the sole selected folder, if that is what is selected.
                let folders = &self.engine.selection().folders;
                if self.engine.selection().len() == 1
                    && let Some(id) = folders.iter().next().cloned()
                {
                    self.scroll = 0;
                    self.send(Gesture::Navigate { folder: Some(id) });
                }
            }
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let position = Position { x: mouse.column, y: mouse.row };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_left_down(mouse, position),
            MouseEventKind::Drag(MouseButton::Left) => {
                let over = self.folder_at(position);
                self.send(Gesture::PointerMove { position, over });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let over = self.folder_at(position);
                self.send(Gesture::PointerUp { over });
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some(id) = self.item_at(position) {
                    self.send(Gesture::ContextMenu { id, position });
                }
            }
            MouseEventKind::ScrollDown => {
                let visible = self.engine.visible(&self.registry).len();
                self.scroll = (self.scroll + 1).min(visible.saturating_sub(1));
            }
            MouseEventKind::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn on_left_down(&mut self, mouse: MouseEvent, position: Position) {
        if self.on_menu_click(position) {
            return;
        }

        if let Some(field) = self.header_field_at(position) {
            self.send(Gesture::SortHeaderClick { field });
            return;
        }

        let Some(id) = self.item_at(position) else {
            // Click on empty space: nothing to select, but close any menu.
            if self.engine.open_menu().is_some() {
                self.send(Gesture::CloseMenu);
            }
            return;
        };

        if self.is_double_click(&id) {
            if self.registry.kind_of(&id) == Some(ItemKind::Folder) {
                self.scroll = 0;
                self.send(Gesture::Navigate { folder: Some(id) });
            }
            return;
        }

        let modifiers = GestureModifiers {
            toggle: mouse.modifiers.contains(KeyModifiers::CONTROL),
            range: mouse.modifiers.contains(KeyModifiers::SHIFT),
        };
        self.send(Gesture::PointerDown { id, modifiers, position });
    }

    /// Click landed on the open built-in menu; activate the entry under it
    fn on_menu_click(&mut self, position: Position) -> bool {
        let (Some(rect), Some(menu)) = (self.menu_rect, self.engine.open_menu()) else {
            return false;
        };
        if !contains(rect, position) {
            return false;
        }

        let entry = (position.y.saturating_sub(rect.y + 1)) as usize;
        if position.y > rect.y
            && let Some(action) = menu.entries.get(entry).copied()
        {
            let invocation = ActionInvocation {
                action,
                kind: menu.kind,
                ids: menu.acting_ids.clone(),
            };
            self.status = format!("{} x{}", action.label().to_lowercase(), invocation.ids.len());
            self.summary.invocations.push(invocation);
        }
        self.send(Gesture::CloseMenu);
        true
    }

    fn is_double_click(&mut self, id: &str) -> bool {
        let now = Instant::now();
        let double = self
            .last_click
            .as_ref()
            .is_some_and(|(last, at)| last == id && now.duration_since(*at) < DOUBLE_CLICK_WINDOW);
        self.last_click = if double { None } else { Some((id.to_string(), now)) };
        double
    }

    // ------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------

    fn item_at(&self, position: Position) -> Option<String> {
        if contains(self.tree_area, position) && position.y > self.tree_area.y {
            let idx = (position.y - self.tree_area.y - 1) as usize;
            return crate::engine::flatten(&self.registry)
                .get(idx)
                .map(|row| row.item.id.clone());
        }

        if contains(self.table_area, position) && position.y > self.table_area.y + 1 {
            let idx = (position.y - self.table_area.y - 2) as usize + self.scroll;
            return self
                .engine
                .visible(&self.registry)
                .get(idx)
                .map(|item| item.id.clone());
        }
        None
    }

    /// Like `item_at`, but only container ids (for drag-over and drops)
    fn folder_at(&self, position: Position) -> Option<String> {
        self.item_at(position)
            .filter(|id| self.registry.kind_of(id) == Some(ItemKind::Folder))
    }

    fn header_field_at(&self, position: Position) -> Option<SortField> {
        if position.y != self.table_area.y + 1 {
            return None;
        }
        column_spans(self.table_area)
            .into_iter()
            .find(|(rect, _)| position.x >= rect.x && position.x < rect.x + rect.width)
            .map(|(_, field)| field)
    }

    // ------------------------------------------------------------------
    // Engine plumbing
    // ------------------------------------------------------------------

    fn send(&mut self, gesture: Gesture) {
        let outputs = self.engine.apply(&self.registry, gesture);
        for output in outputs {
            self.process(output);
        }
    }

    fn process(&mut self, output: Output) {
        match output {
            Output::SelectionChanged { files, folders } => {
                self.status = format!("{} file(s), {} folder(s) selected", files.len(), folders.len());
            }
            Output::SortChanged { field, direction } => {
                self.status = format!("sorted by {} {}", field.label().to_lowercase(), direction.glyph());
            }
            Output::MoveRequested { moved_id, moved_kind, new_parent_id } => {
                let target = self
                    .registry
                    .get(&new_parent_id)
                    .map_or(new_parent_id.clone(), |item| item.name.clone());
                self.status = format!("move requested: {moved_id} -> {target}");
                self.summary.moves.push(MoveRequest {
                    moved_id,
                    moved_kind,
                    new_parent_id,
                });
            }
            Output::MenuHandlerInvoked { acting_ids, kind, .. } => {
                self.status = format!("menu handler called for {} item(s)", acting_ids.len());
                self.summary.handler_calls.push(HandlerCall { kind, ids: acting_ids });
            }
            // Menu geometry is computed at render time.
            Output::MenuOpenRequested { .. } => {}
            Output::MenuClosed => self.menu_rect = None,
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    fn render(&mut self, frame: &mut ratatui::Frame<'_>) {
        let [title_area, main_area, status_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
                .areas(frame.area());
        let [tree_area, table_area] =
            Layout::horizontal([Constraint::Length(TREE_PANE_WIDTH), Constraint::Min(0)]).areas(main_area);
        self.tree_area = tree_area;
        self.table_area = table_area;

        self.render_title(frame, title_area);
        self.render_tree(frame, tree_area);
        self.render_table(frame, table_area);
        self.render_status(frame, status_area);
        self.render_menu(frame);
    }

    fn render_title(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let folder = self
            .engine
            .current_folder()
            .and_then(|id| self.registry.get(id))
            .map_or_else(|| "/".to_string(), |item| item.name.clone());
        let title = Paragraph::new(format!(" browsr  {folder}"))
            .style(Style::default().add_modifier(Modifier::BOLD));
        frame.render_widget(title, area);
    }

    fn render_tree(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let candidate = self.engine.drop_candidate();
        let lines: Vec<Line<'_>> = crate::engine::flatten(&self.registry)
            .iter()
            .map(|row| {
                let label = format!("{}{}/", "  ".repeat(row.depth), row.item.name);
                let mut style = Style::default();
                if Some(row.item.id.as_str()) == candidate {
                    style = style.bg(Color::Green).fg(Color::Black);
                } else if Some(row.item.id.as_str()) == self.engine.current_folder() {
                    style = style.add_modifier(Modifier::BOLD).fg(Color::Cyan);
                } else if self.engine.selection().folders.contains(&row.item.id) {
                    style = style.bg(Color::Blue).fg(Color::White);
                }
                Line::styled(label, style)
            })
            .collect();

        let tree = Paragraph::new(lines).block(Block::bordered().title("Folders"));
        frame.render_widget(tree, area);
    }

    fn render_table(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let candidate = self.engine.drop_candidate();
        let dragging = self.engine.drag_state();

        let header = Row::new(
            [SortField::Name, SortField::Size, SortField::Date, SortField::Uploader]
                .iter()
                .map(|field| Cell::from(self.header_label(*field)))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().add_modifier(Modifier::UNDERLINED));

        let rows: Vec<Row<'_>> = self
            .engine
            .visible(&self.registry)
            .iter()
            .skip(self.scroll)
            .map(|item| {
                let mut style = Style::default();
                if Some(item.id.as_str()) == candidate {
                    style = style.bg(Color::Green).fg(Color::Black);
                } else if self.engine.selection().contains(&item.id) {
                    style = style.bg(Color::Blue).fg(Color::White);
                } else if item.locked {
                    style = style.fg(Color::DarkGray);
                }
                if let DragState::Dragging { id, .. } = dragging
                    && id == &item.id
                {
                    style = style.add_modifier(Modifier::DIM);
                }
                Row::new(vec![
                    Cell::from(format::name_cell(item)),
                    Cell::from(format::size_cell(item)),
                    Cell::from(format::date_cell(item)),
                    Cell::from(format::uploader_cell(item)),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(rows, column_constraints())
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .header(header)
            .block(Block::bordered().title("Files"));
        frame.render_widget(table, area);
    }

    fn header_label(&self, field: SortField) -> String {
        match self.engine.sort_state() {
            Some(state) if state.field == field => {
                format!("{} {}", field.label(), state.direction.glyph())
            }
            _ => field.label().to_string(),
        }
    }

    fn render_status(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let drag = match self.engine.drag_state() {
            DragState::Dragging { id, candidate, .. } => {
                let target = candidate.as_deref().unwrap_or("(no target)");
                format!("  [dragging {id} over {target}]")
            }
            _ => String::new(),
        };
        let status = Paragraph::new(format!(" {}{drag}", self.status))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_menu(&mut self, frame: &mut ratatui::Frame<'_>) {
        let Some(menu) = self.engine.open_menu() else {
            self.menu_rect = None;
            return;
        };

        let width = menu
            .entries
            .iter()
            .map(|entry| entry.label().len())
            .max()
            .unwrap_or(0) as u16
            + 4;
        let height = menu.entries.len() as u16 + 2;
        let frame_area = frame.area();
        let x = menu.position.x.min(frame_area.width.saturating_sub(width));
        let y = menu.position.y.min(frame_area.height.saturating_sub(height));
        let rect = Rect { x, y, width, height };

        let lines: Vec<Line<'_>> = menu
            .entries
            .iter()
            .map(|entry| Line::raw(format!(" {}", entry.label())))
            .collect();
        let title = match menu.kind {
            ItemKind::File => "File",
            ItemKind::Folder => "Folder",
        };

        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(lines).block(Block::bordered().title(title)), rect);
        self.menu_rect = Some(rect);
    }
}

const fn contains(rect: Rect, position: Position) -> bool {
    position.x >= rect.x
        && position.x < rect.x + rect.width
        && position.y >= rect.y
        && position.y < rect.y + rect.height
}

/// Fixed column widths for everything but the name column
const NAME_MIN_WIDTH: u16 = 12;
const SIZE_WIDTH: u16 = 10;
const DATE_WIDTH: u16 = 17;
const UPLOADER_WIDTH: u16 = 12;
const COLUMN_SPACING: u16 = 1;

const fn column_constraints() -> [Constraint; 4] {
    [
        Constraint::Min(NAME_MIN_WIDTH),
        Constraint::Length(SIZE_WIDTH),
        Constraint::Length(DATE_WIDTH),
        Constraint::Length(UPLOADER_WIDTH),
    ]
}

/// Header cell rects for sort-click hit tests, resolved through the same
/// constraint solving the table renders with so the two cannot disagree
fn column_spans(area: Rect) -> [(Rect, SortField); 4] {
    let inner = Block::bordered().inner(area);
    let [name, size, date, uploader] = Layout::horizontal(column_constraints())
        .flex(Flex::Start)
        .spacing(COLUMN_SPACING)
        .areas(inner);

    [
        (name, SortField::Name),
        (size, SortField::Size),
        (date, SortField::Date),
        (uploader, SortField::Uploader),
    ]
}
