use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::constants::STATUS_REFRESHED;
use taskdeck_core::ViewMode;

use super::{App, ConfirmChoice, InputMode};

#[derive(Debug, Clone, Copy)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    EnterSearch,
    ShowDetails,
    ShowHelp,
    Refresh,
    OpenFilter,
    ClearFilters,
    ToggleViewMode,
    CycleStatus,
    Delete,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PrevTab,
    NextTab,
    PrevDay,
    NextDay,
    PrevWeek,
    NextWeek,
    PrevMonth,
    NextMonth,
    GoToday,
}

impl NormalAction {
    fn from_event(key: &KeyEvent, mode: ViewMode) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        // Shared bindings first, then the per-view movement keys.
        match key.code {
            KeyCode::Char('q') => return Some(Self::Quit),
            KeyCode::Char('a') => return Some(Self::EnterAdd),
            KeyCode::Char('e') => return Some(Self::EnterEdit),
            KeyCode::Char('/') => return Some(Self::EnterSearch),
            KeyCode::Char('f') => return Some(Self::OpenFilter),
            KeyCode::Char('C') => return Some(Self::ClearFilters),
            KeyCode::Char('v') => return Some(Self::ToggleViewMode),
            KeyCode::Char('m') => return Some(Self::CycleStatus),
            KeyCode::Char('x') | KeyCode::Delete => return Some(Self::Delete),
            KeyCode::Char('r') => return Some(Self::Refresh),
            KeyCode::Char('h') => return Some(Self::ShowHelp),
            KeyCode::Tab => return Some(Self::NextTab),
            KeyCode::BackTab => return Some(Self::PrevTab),
            KeyCode::Enter => return Some(Self::ShowDetails),
            _ => {}
        }

        match mode {
            ViewMode::Board => match key.code {
                KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
                KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
                KeyCode::Home => Some(Self::SelectFirst),
                KeyCode::End => Some(Self::SelectLast),
                _ => None,
            },
            ViewMode::Calendar => match key.code {
                KeyCode::Left => Some(Self::PrevDay),
                KeyCode::Right => Some(Self::NextDay),
                KeyCode::Char('k') | KeyCode::Up => Some(Self::PrevWeek),
                KeyCode::Char('j') | KeyCode::Down => Some(Self::NextWeek),
                KeyCode::Char('[') | KeyCode::Char('p') => Some(Self::PrevMonth),
                KeyCode::Char(']') | KeyCode::Char('n') => Some(Self::NextMonth),
                KeyCode::Char('t') => Some(Self::GoToday),
                _ => None,
            },
        }
    }
}

impl App {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Search => self.handle_search_mode(key),
            InputMode::Form => self.handle_form_mode(key),
            InputMode::Filter => self.handle_filter_mode(key),
            InputMode::DayDetail => self.handle_close_overlay(key),
            InputMode::Inspect => self.handle_close_overlay(key),
            InputMode::Help => self.handle_close_overlay(key),
            InputMode::ConfirmDelete => self.handle_confirm_delete_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        let mode = self.board.view().view_mode;
        if let Some(action) = NormalAction::from_event(&key, mode) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::EnterAdd => self.open_add_form(),
            NormalAction::EnterEdit => self.open_edit_form(),
            NormalAction::EnterSearch => self.enter_search(),
            NormalAction::ShowDetails => self.show_selected_details(),
            NormalAction::ShowHelp => self.show_help_overlay(),
            NormalAction::Refresh => {
                self.refresh();
                self.set_status_info(STATUS_REFRESHED);
            }
            NormalAction::OpenFilter => self.open_filter_overlay(),
            NormalAction::ClearFilters => self.clear_filters(),
            NormalAction::ToggleViewMode => self.toggle_view_mode(),
            NormalAction::CycleStatus => self.cycle_status(),
            NormalAction::Delete => self.prompt_delete(),
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => {
                if !self.board.filtered().is_empty() {
                    self.selected = 0;
                    self.table_state.select(Some(0));
                }
            }
            NormalAction::SelectLast => {
                let len = self.board.filtered().len();
                if len > 0 {
                    self.selected = len - 1;
                    self.table_state.select(Some(self.selected));
                }
            }
            NormalAction::PrevTab => self.prev_tab(),
            NormalAction::NextTab => self.next_tab(),
            NormalAction::PrevDay => self.move_day(-1),
            NormalAction::NextDay => self.move_day(1),
            NormalAction::PrevWeek => self.move_day(-7),
            NormalAction::NextWeek => self.move_day(7),
            NormalAction::PrevMonth => self.prev_month(),
            NormalAction::NextMonth => self.next_month(),
            NormalAction::GoToday => self.go_to_today(),
        }
    }

    /// Every keystroke re-applies the term, so the board narrows live.
    fn handle_search_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            KeyCode::Esc => {
                self.search.clear();
                self.board.set_search_term("");
                self.clamp_selection();
                self.input_mode = InputMode::Normal;
                self.set_status_info("Search cleared");
            }
            KeyCode::Backspace => {
                self.search.backspace();
                self.board.set_search_term(self.search.as_str());
                self.clamp_selection();
            }
            KeyCode::Delete => {
                self.search.delete_char();
                self.board.set_search_term(self.search.as_str());
                self.clamp_selection();
            }
            KeyCode::Char(c) => {
                self.search.insert_char(c);
                self.board.set_search_term(self.search.as_str());
                self.clamp_selection();
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            _ => {}
        }
    }

    fn handle_form_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc => self.cancel_form(),
            KeyCode::Tab | KeyCode::Down => {
                if let Some(form) = self.form.as_mut() {
                    form.next_field();
                }
            }
            KeyCode::BackTab | KeyCode::Up => {
                if let Some(form) = self.form.as_mut() {
                    form.prev_field();
                }
            }
            KeyCode::Left => {
                if let Some(form) = self.form.as_mut() {
                    if form.focus.is_text() {
                        if let Some(buffer) = form.focused_buffer() {
                            buffer.move_left();
                        }
                    } else {
                        form.cycle(false);
                    }
                }
            }
            KeyCode::Right => {
                if let Some(form) = self.form.as_mut() {
                    if form.focus.is_text() {
                        if let Some(buffer) = form.focused_buffer() {
                            buffer.move_right();
                        }
                    } else {
                        form.cycle(true);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(form) = self.form.as_mut() {
                    if let Some(buffer) = form.focused_buffer() {
                        buffer.backspace();
                    }
                }
            }
            KeyCode::Delete => {
                if let Some(form) = self.form.as_mut() {
                    if let Some(buffer) = form.focused_buffer() {
                        buffer.delete_char();
                    }
                }
            }
            KeyCode::Home => {
                if let Some(form) = self.form.as_mut() {
                    if let Some(buffer) = form.focused_buffer() {
                        buffer.move_home();
                    }
                }
            }
            KeyCode::End => {
                if let Some(form) = self.form.as_mut() {
                    if let Some(buffer) = form.focused_buffer() {
                        buffer.move_end();
                    }
                }
            }
            KeyCode::Char(c) => {
                if let Some(form) = self.form.as_mut() {
                    if let Some(buffer) = form.focused_buffer() {
                        buffer.insert_char(c);
                    } else if c == ' ' {
                        form.cycle(true);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_filter_mode(&mut self, key: KeyEvent) {
        if self.filter_overlay.is_none() {
            self.input_mode = InputMode::Normal;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if let Some(overlay) = self.filter_overlay.take() {
                    let initial = overlay.cancel();
                    self.apply_filter_selection(initial);
                    self.input_mode = InputMode::Normal;
                    self.set_status_info("Filters unchanged");
                }
            }
            KeyCode::Enter => {
                if let Some(overlay) = self.filter_overlay.take() {
                    let selection = overlay.commit();
                    self.apply_filter_selection(selection);
                    self.input_mode = InputMode::Normal;
                    let status = match self.board.view().filter_summary() {
                        Some(summary) => format!("Applied filters: {summary}"),
                        None => String::from("Cleared filters"),
                    };
                    self.set_status_info(status);
                }
            }
            KeyCode::Left => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_column();
                }
            }
            KeyCode::Right | KeyCode::Tab => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.next_column();
                }
            }
            KeyCode::BackTab => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_column();
                }
            }
            KeyCode::Up => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.prev_row();
                }
            }
            KeyCode::Down => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.next_row();
                }
            }
            KeyCode::Char(' ') => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.toggle_current();
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if let Some(overlay) = self.filter_overlay.as_mut() {
                    overlay.clear_all();
                    self.set_status_info("Reset selections — press Enter to apply");
                }
            }
            _ => {}
        }
    }

    fn handle_close_overlay(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.inspect_task = None;
                self.day_detail = None;
                self.input_mode = InputMode::Normal;
                self.status = None;
            }
            _ => {}
        }
    }

    fn handle_confirm_delete_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.set_status_info("Deletion cancelled");
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.confirm_choice = self.confirm_choice.toggle();
            }
            KeyCode::Enter => {
                if self.confirm_choice == ConfirmChoice::Yes {
                    self.perform_delete();
                } else {
                    self.set_status_info("Deletion cancelled");
                }
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }
}
