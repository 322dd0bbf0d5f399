use std::cmp::min;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Tabs, Wrap,
};
use ratatui::Frame;

use crate::model::Priority;
use crate::tui::constants::APP_VERSION;
use crate::tui::filters::{DueWindow, FilterColumn, FilterOverlay};
use crate::tui::form::FormField;
use crate::tui::helpers::{
    accent_title, build_help_lines, centered_rect, format_due, format_task_detail_entries,
    inset_rect, priority_style, progress_gauge, status_style, with_cursor, BG_ACCENT, BG_BASE,
    BG_PANEL, FG_ACCENT,
};
use taskdeck_core::{calendar, DayCell, SortMode, StatusFilter, ViewMode};

use super::{App, InputMode};

impl App {
    pub(crate) fn draw(&mut self, f: &mut Frame<'_>) {
        let size = f.size();
        f.render_widget(Clear, size);
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), size);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(size);

        self.draw_header(f, chunks[0]);
        self.draw_tabs(f, chunks[1]);
        self.draw_body(f, chunks[2]);
        self.draw_footer(f, chunks[3]);

        match self.input_mode {
            InputMode::Form => self.draw_form_overlay(f, size),
            InputMode::Filter => self.draw_filter_overlay(f, size),
            InputMode::DayDetail => self.draw_day_detail_overlay(f, size),
            InputMode::Inspect => self.draw_detail_overlay(f, size),
            InputMode::Help => self.draw_help_overlay(f, size),
            InputMode::ConfirmDelete => self.draw_confirm_overlay(f, size),
            InputMode::Normal | InputMode::Search => {}
        }
    }

    fn draw_header(&self, f: &mut Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(area);

        let mode = match self.board.view().view_mode {
            ViewMode::Board => "board",
            ViewMode::Calendar => "calendar",
        };
        let mut left_spans = vec![
            Span::styled(
                format!(" taskdeck v{APP_VERSION} "),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("— {mode} view")),
            Span::raw("  "),
            Span::styled(
                self.config.db_path().display().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        if let Some(summary) = self.board.view().filter_summary() {
            left_spans.push(Span::raw("  "));
            left_spans.push(Span::styled(
                summary,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        f.render_widget(
            Paragraph::new(Line::from(left_spans)).style(Style::default().bg(BG_BASE)),
            cols[0],
        );

        let right_line = Line::from(vec![
            Span::styled(
                self.user.name.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" <{}>", self.user.email),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        let right_para = Paragraph::new(right_line)
            .alignment(Alignment::Right)
            .style(Style::default().bg(BG_BASE));
        f.render_widget(right_para, cols[1]);
    }

    fn draw_tabs(&self, f: &mut Frame<'_>, area: Rect) {
        let selected = StatusFilter::ALL_TABS
            .iter()
            .position(|tab| *tab == self.board.view().status_filter)
            .unwrap_or(0);
        let titles: Vec<Line> = StatusFilter::ALL_TABS
            .iter()
            .map(|tab| Line::from(self.tab_label(*tab)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(selected)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(accent_title("Status"))
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Green)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn draw_body(&mut self, f: &mut Frame<'_>, area: Rect) {
        match self.board.view().view_mode {
            ViewMode::Board => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Min(40), Constraint::Length(36)])
                    .split(area);
                self.draw_task_table(f, cols[0]);
                self.draw_side_panel(f, cols[1]);
            }
            ViewMode::Calendar => self.draw_calendar(f, area),
        }
    }

    fn draw_task_table(&mut self, f: &mut Frame<'_>, area: Rect) {
        if self.board.filtered().is_empty() {
            let lines = self.empty_board_state();
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .style(Style::default().bg(BG_PANEL));
            let inner = block.inner(area);
            f.render_widget(Clear, area);
            f.render_widget(block, area);

            if inner.width == 0 || inner.height == 0 {
                return;
            }

            let width = inner.width.min(70).max(1);
            let height = (lines.len() as u16).saturating_add(2).min(inner.height);
            let content_area = centered_rect(width, height, inner);
            let paragraph = Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL));
            f.render_widget(paragraph, content_area);
            return;
        }

        let header = Row::new(vec![
            Cell::from("Title"),
            Cell::from("Status"),
            Cell::from("Pri"),
            Cell::from("Due"),
            Cell::from("Category"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .board
            .filtered()
            .iter()
            .map(|task| {
                let due_style = if task.overdue {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Cell::from(task.title.clone()),
                    Cell::from(task.status.label()).style(status_style(task.status)),
                    Cell::from(task.priority.label()).style(priority_style(task.priority)),
                    Cell::from(format_due(task)).style(due_style),
                    Cell::from(task.category.clone().unwrap_or_default()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(44),
            Constraint::Length(12),
            Constraint::Length(7),
            Constraint::Length(13),
            Constraint::Percentage(18),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .style(Style::default().bg(BG_PANEL)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .bg(BG_ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_side_panel(&self, f: &mut Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(6)])
            .split(area);

        self.draw_stats(f, rows[0]);
        self.draw_upcoming(f, rows[1]);
    }

    fn draw_stats(&self, f: &mut Frame<'_>, area: Rect) {
        let stats = self.board.stats();
        let lines = vec![
            Line::from(vec![
                Span::styled("Total       ", Style::default().fg(Color::DarkGray)),
                Span::raw(stats.total.to_string()),
            ]),
            Line::from(vec![
                Span::styled("To Do       ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.todo.to_string(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(vec![
                Span::styled("In Progress ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    stats.in_progress.to_string(),
                    Style::default().fg(Color::Yellow),
                ),
            ]),
            Line::from(vec![
                Span::styled("Done        ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.done.to_string(), Style::default().fg(Color::Green)),
            ]),
            Line::from(vec![
                Span::styled("Overdue     ", Style::default().fg(Color::DarkGray)),
                Span::styled(stats.overdue.to_string(), Style::default().fg(Color::Red)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Overview"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);
        f.render_widget(Paragraph::new(lines).style(Style::default().bg(BG_PANEL)), inner);
    }

    fn draw_upcoming(&self, f: &mut Frame<'_>, area: Rect) {
        let upcoming = self.board.upcoming();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Upcoming"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            progress_gauge(upcoming.progress, 16),
            Style::default().fg(FG_ACCENT),
        )));
        lines.push(Line::default());

        if upcoming.tasks.is_empty() {
            lines.push(Line::from(Span::styled(
                "Nothing scheduled",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            // Two columns of two, rendered as paired rows.
            let left = upcoming.left();
            let right = upcoming.right();
            for i in 0..left.len().max(right.len()) {
                let mut spans = Vec::new();
                if let Some(task) = left.get(i) {
                    spans.push(Span::styled(
                        format!("{:<16.16}", task.title),
                        priority_style(task.priority),
                    ));
                }
                if let Some(task) = right.get(i) {
                    spans.push(Span::raw(" "));
                    spans.push(Span::styled(
                        format!("{:<16.16}", task.title),
                        priority_style(task.priority),
                    ));
                }
                lines.push(Line::from(spans));
                let mut due_spans = Vec::new();
                if let Some(task) = left.get(i) {
                    due_spans.push(Span::styled(
                        format!("{:<16.16}", format_due(task)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                if let Some(task) = right.get(i) {
                    due_spans.push(Span::raw(" "));
                    due_spans.push(Span::styled(
                        format!("{:<16.16}", format_due(task)),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                lines.push(Line::from(due_spans));
            }
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_calendar(&self, f: &mut Frame<'_>, area: Rect) {
        let view = self.board.view();
        let month_title = calendar::first_of(view.calendar_year, view.calendar_month)
            .map(|first| first.format("%B %Y").to_string())
            .unwrap_or_default();

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&month_title))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let today = chrono::Local::now().date_naive();
        let cells = self.board.calendar_days();

        let header = Row::new(
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
                .into_iter()
                .map(|day| {
                    Cell::from(day).style(
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )
                })
                .collect::<Vec<_>>(),
        );

        let row_height = ((inner.height.saturating_sub(1)) / 6).clamp(2, 4);
        let mut rows: Vec<Row> = Vec::new();
        for week in cells.chunks(7) {
            let mut week_cells: Vec<Cell> = Vec::with_capacity(7);
            for cell in week {
                week_cells.push(match cell {
                    DayCell::Blank => Cell::from(""),
                    DayCell::Day { date, day, tasks } => {
                        let is_selected = *day == self.selected_day;
                        let is_today = *date == today;
                        let mut day_style = Style::default();
                        if is_today {
                            day_style = day_style.fg(Color::Green).add_modifier(Modifier::BOLD);
                        }

                        let mut cell_lines =
                            vec![Line::from(Span::styled(day.to_string(), day_style))];
                        if !tasks.is_empty() {
                            let any_overdue = tasks.iter().any(|task| task.overdue);
                            let marker_style = if any_overdue {
                                Style::default().fg(Color::Red)
                            } else {
                                Style::default().fg(FG_ACCENT)
                            };
                            cell_lines.push(Line::from(Span::styled(
                                format!("{} due", tasks.len()),
                                marker_style,
                            )));
                        }
                        let text = Text::from(cell_lines);

                        let cell_style = if is_selected {
                            Style::default().bg(BG_ACCENT).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        Cell::from(text).style(cell_style)
                    }
                });
            }
            while week_cells.len() < 7 {
                week_cells.push(Cell::from(""));
            }
            rows.push(Row::new(week_cells).height(row_height));
        }

        let widths = [Constraint::Ratio(1, 7); 7];
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(Block::default().style(Style::default().bg(BG_PANEL)));
        f.render_widget(table, inner);
    }

    fn empty_board_state(&self) -> Vec<Line<'static>> {
        let heading = if self.board.tasks().is_empty() {
            "No tasks yet"
        } else {
            "Nothing matches the current filters"
        };

        let mut lines: Vec<Line<'static>> = Vec::new();
        lines.push(Line::from(Span::styled(
            heading,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());

        let hints: &[&str] = if self.board.tasks().is_empty() {
            &[
                "Press 'a' to add your first task.",
                "Press 'v' to flip to the calendar view.",
                "Press 'h' for the full keyboard reference.",
            ]
        } else {
            &[
                "Press 'C' to reset filters and sort.",
                "Press '/' to change the search.",
                "Press 'f' to adjust the filter picker.",
            ]
        };

        let hint_style = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        for hint in hints {
            lines.push(Line::from(Span::styled(*hint, hint_style)));
        }

        lines
    }

    fn draw_footer(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let status_line = if self.input_mode == InputMode::Search {
            Line::from(vec![
                Span::styled("Search: ", Style::default().fg(Color::Yellow)),
                Span::raw(with_cursor(self.search.as_str(), self.search.cursor_col())),
            ])
        } else if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.style())])
        } else {
            Line::from(vec![Span::raw("Ready")])
        };

        f.render_widget(Paragraph::new(status_line), lines[0]);

        let help = match self.input_mode {
            InputMode::Normal => match self.board.view().view_mode {
                ViewMode::Board => {
                    "tab status | j/k move | enter details | a add | e edit | m advance | x delete | / search | f filter | C reset | v calendar | r refresh | h help | q quit"
                }
                ViewMode::Calendar => {
                    "arrows move day | [/] month | t today | enter day details | a add | v board | f filter | h help | q quit"
                }
            },
            InputMode::Search => "Type to search • Enter keep • Esc clear",
            InputMode::Form => "Tab/Shift+Tab fields • ←/→ cycle choices • Enter save • Esc cancel",
            InputMode::Filter => "←/→ column • ↑/↓ move • Space select • C reset • Enter apply • Esc cancel",
            InputMode::DayDetail | InputMode::Inspect => "Enter/Esc to close",
            InputMode::Help => "Enter/Esc to close",
            InputMode::ConfirmDelete => "←/→ choose • Space toggle • Enter confirm • Esc cancel",
        };

        let help_line = Line::from(vec![Span::styled(
            help,
            Style::default().fg(Color::DarkGray),
        )]);
        f.render_widget(Paragraph::new(help_line), lines[1]);
    }

    fn draw_form_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let width = min(area.width.saturating_sub(10), 64);
        let height = (FormField::ALL.len() as u16) * 2 + 5;
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(form.heading()))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let mut lines: Vec<Line> = Vec::new();
        for field in FormField::ALL {
            let focused = form.focus == field;
            let marker = if focused { "▶ " } else { "  " };
            let label_style = if focused {
                Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(format!("{:<18}", field.label()), label_style),
            ]));

            let buffer = match field {
                FormField::Title => Some(&form.title),
                FormField::Description => Some(&form.description),
                FormField::Due => Some(&form.due),
                FormField::Category => Some(&form.category),
                FormField::Priority | FormField::Status => None,
            };
            let value_style = if focused {
                Style::default().bg(BG_ACCENT)
            } else {
                Style::default()
            };
            let rendered = match buffer {
                Some(buffer) if focused => with_cursor(buffer.as_str(), buffer.cursor_col()),
                Some(buffer) => buffer.as_str().to_string(),
                None => format!("◂ {} ▸", form.field_text(field)),
            };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(rendered, value_style),
            ]));
        }

        if let Some(error) = &form.error {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_filter_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(overlay) = self.filter_overlay.as_ref() else {
            return;
        };

        let width = min(area.width.saturating_sub(10), 84);
        let height = min(area.height.saturating_sub(4), 14);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(popup_area);

        for (idx, column) in FilterColumn::ALL.into_iter().enumerate() {
            self.render_filter_column(f, columns[idx], overlay, column);
        }
    }

    fn render_filter_column(
        &self,
        f: &mut Frame<'_>,
        area: Rect,
        overlay: &FilterOverlay,
        column: FilterColumn,
    ) {
        use taskdeck_core::PriorityFilter;

        let badge = |checked: bool| if checked { '✓' } else { ' ' };
        let mut items: Vec<ListItem> = Vec::new();
        match column {
            FilterColumn::Priority => {
                items.push(ListItem::new(format!(
                    "[{}] All priorities",
                    badge(overlay.working.priority == PriorityFilter::All)
                )));
                for priority in Priority::ALL {
                    items.push(ListItem::new(format!(
                        "[{}] {}",
                        badge(overlay.working.priority == PriorityFilter::Only(priority)),
                        priority.label()
                    )));
                }
            }
            FilterColumn::Overdue => {
                items.push(ListItem::new(format!(
                    "[{}] All tasks",
                    badge(!overlay.working.overdue_only)
                )));
                items.push(ListItem::new(format!(
                    "[{}] Overdue only",
                    badge(overlay.working.overdue_only)
                )));
            }
            FilterColumn::DueWindow => {
                for window in DueWindow::ALL {
                    items.push(ListItem::new(format!(
                        "[{}] {}",
                        badge(overlay.working.window == window),
                        window.label()
                    )));
                }
            }
            FilterColumn::Sort => {
                for sort in SortMode::ALL {
                    items.push(ListItem::new(format!(
                        "[{}] {}",
                        badge(overlay.working.sort == sort),
                        sort.label()
                    )));
                }
            }
        }

        let is_active = overlay.column == column;
        let mut state = ListState::default();
        if is_active && !items.is_empty() {
            let row = overlay.row_positions[column.index()];
            state.select(Some(row.min(items.len().saturating_sub(1))));
        }

        let display_title = if is_active {
            format!("▶ {}", column.title())
        } else {
            column.title().to_string()
        };
        let border_style = if is_active {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list_style = if is_active {
            Style::default().bg(BG_PANEL)
        } else {
            Style::default().fg(Color::DarkGray).bg(BG_BASE)
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(display_title)
                    .border_style(border_style),
            )
            .style(list_style)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_day_detail_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some((date, tasks)) = self.day_detail.as_ref() else {
            return;
        };

        let width = min(area.width.saturating_sub(16), 80).max(40);
        let height = min((tasks.len() as u16).max(1) + 7, area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title(&format!("Due {}", date.format("%A, %B %-d"))))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        if tasks.is_empty() {
            f.render_widget(
                Paragraph::new("Nothing due this day")
                    .style(Style::default().fg(Color::DarkGray).bg(BG_PANEL))
                    .alignment(Alignment::Center),
                inset_rect(inner, 1),
            );
            return;
        }

        let rows: Vec<Row> = tasks
            .iter()
            .map(|task| {
                Row::new(vec![
                    Cell::from(task.title.clone()),
                    Cell::from(task.status.label()).style(status_style(task.status)),
                    Cell::from(task.priority.label()).style(priority_style(task.priority)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Percentage(60),
            Constraint::Length(12),
            Constraint::Length(7),
        ];
        let table = Table::new(rows, widths)
            .block(Block::default().style(Style::default().bg(BG_PANEL)))
            .column_spacing(2);
        f.render_widget(table, inset_rect(inner, 1));
    }

    fn draw_detail_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(task) = self.inspect_task.as_ref() else {
            return;
        };

        let detail_entries = format_task_detail_entries(task);
        let width = min(area.width.saturating_sub(20), 80).max(40);
        let popup_height = (detail_entries.len() as u16 + 6)
            .min(area.height.saturating_sub(2))
            .max(6);
        let popup_area = centered_rect(width, popup_height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Task Details"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let rows: Vec<Row> = detail_entries
            .into_iter()
            .map(|(key, value)| {
                Row::new(vec![
                    Cell::from(key)
                        .style(Style::default().fg(FG_ACCENT).add_modifier(Modifier::BOLD)),
                    Cell::from(value),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(13), Constraint::Min(20)])
            .block(Block::default().style(Style::default().bg(BG_PANEL)))
            .column_spacing(2);
        f.render_widget(table, inset_rect(inner, 1));
    }

    fn draw_help_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let lines = build_help_lines();
        let width = min(area.width.saturating_sub(10), 80);
        let height = min(lines.len() as u16 + 4, area.height.saturating_sub(2)).max(10);
        let popup_area = centered_rect(width, height, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Keyboard Reference"))
            .border_style(Style::default().fg(Color::DarkGray))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let help_lines: Vec<Line> = lines
            .into_iter()
            .map(|(combo, desc)| {
                Line::from(vec![
                    Span::styled(format!("{combo:<18}"), Style::default().fg(Color::Cyan)),
                    Span::raw(desc),
                ])
            })
            .collect();

        if inner.width < 3 || inner.height < 3 {
            return;
        }

        f.render_widget(
            Paragraph::new(help_lines)
                .wrap(Wrap { trim: true })
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }

    fn draw_confirm_overlay(&self, f: &mut Frame<'_>, area: Rect) {
        let width = min(area.width.saturating_sub(20), 60).max(40);
        let popup_area = centered_rect(width, 8, area);
        f.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(accent_title("Confirm Deletion"))
            .border_style(Style::default().fg(Color::Red))
            .style(Style::default().bg(BG_PANEL));
        let inner = block.inner(popup_area);
        f.render_widget(block, popup_area);

        let task_title = self
            .selected_task()
            .map(|task| task.title.as_str())
            .unwrap_or("selected task");

        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(Span::styled(
            format!("Delete '{task_title}'?"),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::default());

        let yes_style = if self.confirm_choice == super::ConfirmChoice::Yes {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red)
        };
        let no_style = if self.confirm_choice == super::ConfirmChoice::No {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        lines.push(Line::from(vec![
            Span::styled("  Yes  ", yes_style),
            Span::raw("    "),
            Span::styled("  No  ", no_style),
        ]));

        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .style(Style::default().bg(BG_PANEL)),
            inset_rect(inner, 1),
        );
    }
}
