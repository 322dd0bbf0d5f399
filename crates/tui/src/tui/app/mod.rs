use std::time::{Duration, Instant};

use chrono::{Datelike, Local, NaiveDate};
use ratatui::style::{Color, Style};
use ratatui::widgets::TableState;

use super::buffer::FieldBuffer;
use super::constants::*;
use super::filters::{DueWindow, FilterOverlay, FilterSelection};
use super::form::TaskForm;
use crate::config::AppConfig;
use crate::db::Database;
use crate::model::{Status, Task};
use crate::session::User;
use taskdeck_core::{calendar, BoardState, StatusFilter, ViewMode};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
    Form,
    Filter,
    DayDetail,
    Inspect,
    Help,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    database: Database,
    user: User,
    board: BoardState,
    input_mode: InputMode,
    search: FieldBuffer,
    form: Option<TaskForm>,
    filter_overlay: Option<FilterOverlay>,
    active_window: DueWindow,
    day_detail: Option<(NaiveDate, Vec<Task>)>,
    inspect_task: Option<Task>,
    selected: usize,
    table_state: TableState,
    selected_day: u32,
    status: Option<StatusMessage>,
    confirm_choice: ConfirmChoice,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(config: AppConfig, database: Database, user: User) -> Self {
        let mut app = Self {
            config,
            database,
            user,
            board: BoardState::new(),
            input_mode: InputMode::Normal,
            search: FieldBuffer::new(),
            form: None,
            filter_overlay: None,
            active_window: DueWindow::Any,
            day_detail: None,
            inspect_task: None,
            selected: 0,
            table_state: TableState::default(),
            selected_day: Local::now().day(),
            status: None,
            confirm_choice: ConfirmChoice::No,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Reload the authoritative snapshot. A failed load keeps the previous
    /// snapshot and every derived view untouched.
    pub(crate) fn refresh(&mut self) {
        let seq = self.board.begin_load();
        match self.database.list(self.user.id) {
            Ok(tasks) => {
                let count = tasks.len();
                if self.board.apply_load(seq, tasks) {
                    tracing::debug!(count, "task snapshot refreshed");
                }
                self.clamp_selection();
            }
            Err(err) => {
                tracing::debug!(error = %err, "task load failed");
                self.set_status_error(format!("Load failed: {err}"));
            }
        }
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > Duration::from_secs(5) {
                self.status = None;
            }
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_task(&self) -> Option<&Task> {
        self.board.filtered().get(self.selected)
    }

    fn clamp_selection(&mut self) {
        let len = self.board.filtered().len();
        if len == 0 {
            self.selected = 0;
            self.table_state.select(None);
        } else {
            if self.selected >= len {
                self.selected = len - 1;
            }
            self.table_state.select(Some(self.selected));
        }
        self.clamp_selected_day();
    }

    fn select_next(&mut self) {
        let len = self.board.filtered().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.table_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.board.filtered().is_empty() {
            return;
        }
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    fn select_task_by_id(&mut self, id: i64) {
        if let Some(idx) = self
            .board
            .filtered()
            .iter()
            .position(|task| task.id == id)
        {
            self.selected = idx;
            self.table_state.select(Some(idx));
        }
    }

    fn next_tab(&mut self) {
        let idx = StatusFilter::ALL_TABS
            .iter()
            .position(|tab| *tab == self.board.view().status_filter)
            .unwrap_or(0);
        let next = (idx + 1) % StatusFilter::ALL_TABS.len();
        self.board.set_status_filter(StatusFilter::ALL_TABS[next]);
        self.clamp_selection();
    }

    fn prev_tab(&mut self) {
        let idx = StatusFilter::ALL_TABS
            .iter()
            .position(|tab| *tab == self.board.view().status_filter)
            .unwrap_or(0);
        let prev = if idx == 0 {
            StatusFilter::ALL_TABS.len() - 1
        } else {
            idx - 1
        };
        self.board.set_status_filter(StatusFilter::ALL_TABS[prev]);
        self.clamp_selection();
    }

    fn toggle_view_mode(&mut self) {
        let mode = self.board.view().view_mode.toggled();
        self.board.set_view_mode(mode);
        if mode == ViewMode::Calendar {
            self.clamp_selected_day();
        }
    }

    // Calendar cursor ------------------------------------------------------

    fn days_in_visible_month(&self) -> u32 {
        self.board
            .calendar_days()
            .iter()
            .filter(|cell| !cell.is_blank())
            .count() as u32
    }

    fn clamp_selected_day(&mut self) {
        if self.board.view().view_mode != ViewMode::Calendar {
            return;
        }
        let days = self.days_in_visible_month();
        if days > 0 {
            self.selected_day = self.selected_day.clamp(1, days);
        }
    }

    fn selected_date(&self) -> Option<NaiveDate> {
        let view = self.board.view();
        calendar::first_of(view.calendar_year, view.calendar_month)
            .and_then(|first| first.with_day(self.selected_day))
    }

    fn move_day(&mut self, delta: i64) {
        let days = self.days_in_visible_month() as i64;
        if days == 0 {
            return;
        }
        let target = self.selected_day as i64 + delta;
        if target < 1 {
            self.board.prev_month();
            let prev_days = self.days_in_visible_month() as i64;
            self.selected_day = (prev_days + target).clamp(1, prev_days) as u32;
        } else if target > days {
            self.board.next_month();
            let next_days = self.days_in_visible_month() as i64;
            self.selected_day = (target - days).clamp(1, next_days) as u32;
        } else {
            self.selected_day = target as u32;
        }
    }

    fn prev_month(&mut self) {
        self.board.prev_month();
        self.clamp_selected_day();
    }

    fn next_month(&mut self) {
        self.board.next_month();
        self.clamp_selected_day();
    }

    fn go_to_today(&mut self) {
        self.board.go_to_today();
        self.selected_day = Local::now().day();
        self.clamp_selected_day();
    }

    // Overlays -------------------------------------------------------------

    fn open_add_form(&mut self) {
        self.form = Some(TaskForm::blank());
        self.input_mode = InputMode::Form;
        self.set_status_info(STATUS_FORM);
    }

    fn open_edit_form(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            self.set_status_info("Nothing to edit");
            return;
        };
        self.form = Some(TaskForm::edit(&task));
        self.input_mode = InputMode::Form;
        self.set_status_info(STATUS_FORM);
    }

    fn open_filter_overlay(&mut self) {
        let selection = FilterSelection::current(self.board.view(), self.active_window);
        self.filter_overlay = Some(FilterOverlay::new(selection));
        self.input_mode = InputMode::Filter;
        self.set_status_info(STATUS_FILTER_PICKER);
    }

    fn apply_filter_selection(&mut self, selection: FilterSelection) {
        let today = Local::now().date_naive();
        let (from, to) = selection.window.resolve(today);
        self.active_window = selection.window;
        self.board.set_priority_filter(selection.priority);
        self.board.set_show_overdue_only(selection.overdue_only);
        self.board.set_due_from(from);
        self.board.set_due_to(to);
        self.board.set_sort_by(selection.sort);
        self.clamp_selection();
    }

    fn clear_filters(&mut self) {
        self.active_window = DueWindow::Any;
        self.board.clear_filters();
        self.clamp_selection();
        self.set_status_info("Reset filters and sort");
    }

    fn enter_search(&mut self) {
        self.search.set(self.board.view().search_term.clone());
        self.input_mode = InputMode::Search;
        self.set_status_info(STATUS_ENTER_SEARCH);
    }

    fn show_selected_details(&mut self) {
        match self.board.view().view_mode {
            ViewMode::Board => {
                let Some(task) = self.selected_task().cloned() else {
                    self.set_status_info("Nothing to inspect");
                    return;
                };
                self.inspect_task = Some(task);
                self.input_mode = InputMode::Inspect;
                self.set_status_info(STATUS_VIEW_DETAILS);
            }
            ViewMode::Calendar => self.open_day_detail(),
        }
    }

    /// The drill-down answers from the raw snapshot: every task due that
    /// day is listed, whatever the grid is currently filtered down to.
    fn open_day_detail(&mut self) {
        let Some(date) = self.selected_date() else {
            return;
        };
        let tasks = self.board.day_detail(date);
        self.day_detail = Some((date, tasks));
        self.input_mode = InputMode::DayDetail;
        self.set_status_info(STATUS_DAY_DETAIL);
    }

    fn show_help_overlay(&mut self) {
        self.inspect_task = None;
        self.input_mode = InputMode::Help;
        self.set_status_info(STATUS_HELP);
    }

    fn prompt_delete(&mut self) {
        if self.selected_task().is_none() {
            self.set_status_info("Nothing to delete");
            return;
        }
        self.confirm_choice = ConfirmChoice::No;
        self.input_mode = InputMode::ConfirmDelete;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    // Mutations ------------------------------------------------------------

    /// Save the form. On failure the form stays open with the error shown;
    /// nothing is rolled back because nothing was applied locally.
    fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            self.input_mode = InputMode::Normal;
            return;
        };

        let request = match form.to_request() {
            Ok(request) => request,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };

        let result = match form.editing_id {
            Some(id) => self.database.update(self.user.id, id, &request),
            None => self.database.create(self.user.id, &request),
        };

        match result {
            Ok(task) => {
                tracing::debug!(task_id = task.id, "task saved");
                let verb = if form.editing_id.is_some() {
                    "Updated"
                } else {
                    "Added"
                };
                self.set_status_info(format!("{verb} '{}'", task.title));
                self.form = None;
                self.input_mode = InputMode::Normal;
                self.refresh();
                self.select_task_by_id(task.id);
            }
            Err(err) => {
                tracing::debug!(error = %err, "task save failed");
                form.error = Some(err.to_string());
            }
        }
    }

    fn cancel_form(&mut self) {
        self.form = None;
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    /// Advance the selected task one status column, wrapping Done → To Do.
    fn cycle_status(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to update");
            return;
        };
        let id = task.id;
        let next = task.status.next();
        match self.database.update_status(self.user.id, id, next) {
            Ok(updated) => {
                tracing::debug!(task_id = id, status = %updated.status, "status updated");
                self.set_status_info(format!(
                    "'{}' moved to {}",
                    updated.title,
                    updated.status.label()
                ));
                self.refresh();
                self.select_task_by_id(id);
            }
            Err(err) => {
                tracing::debug!(error = %err, "status update failed");
                self.set_status_error(format!("Update failed: {err}"));
            }
        }
    }

    fn perform_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            self.set_status_info("Nothing to delete");
            return;
        };
        let id = task.id;
        match self.database.delete(self.user.id, id) {
            Ok(()) => {
                tracing::debug!(task_id = id, "task deleted");
                self.set_status_info("Deleted task");
                self.refresh();
            }
            Err(err) => {
                tracing::debug!(error = %err, "delete failed");
                self.set_status_error(format!("Delete failed: {err}"));
            }
        }
    }

    // Status line ----------------------------------------------------------

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        self.status = Some(StatusMessage::new(message.into(), StatusKind::Error));
    }

    fn tab_label(&self, tab: StatusFilter) -> String {
        let stats = self.board.stats();
        let count = match tab {
            StatusFilter::All => stats.total,
            StatusFilter::Only(Status::Todo) => stats.todo,
            StatusFilter::Only(Status::InProgress) => stats.in_progress,
            StatusFilter::Only(Status::Done) => stats.done,
        };
        format!("{} ({count})", tab.label())
    }
}
