use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate};
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Spans,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use crate::db::models::{AppointmentDetail, AppointmentStatus};

/// Monday of the week containing `date`, mirroring the week grid's anchor.
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

pub struct ScheduleState {
    week_start: NaiveDate,
    appointments: Vec<AppointmentDetail>,
    list_state: ListState,
}

impl ScheduleState {
    pub fn new(week_start: NaiveDate, appointments: Vec<AppointmentDetail>) -> Self {
        let mut list_state = ListState::default();
        if !appointments.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            week_start,
            appointments,
            list_state,
        }
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn next(&mut self) {
        if self.appointments.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.appointments.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.appointments.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.appointments.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_appointment_id(&self) -> Option<i64> {
        self.list_state
            .selected()
            .and_then(|i| self.appointments.get(i))
            .map(|a| a.id)
    }
}

pub enum ScheduleAction {
    Back,
    PrevWeek,
    NextWeek,
    CancelSelected(i64),
    DeleteSelected(i64),
}

pub fn render_schedule<B: Backend>(f: &mut Frame<B>, state: &mut ScheduleState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(9),
                Constraint::Min(5),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let week_end = state.week_start + Days::new(6);
    let grid_title = format!(
        "Week {} — {}",
        state.week_start.format("%d %b %Y"),
        week_end.format("%d %b %Y")
    );

    let rows: Vec<Row> = (0..7)
        .map(|offset| {
            let day = state.week_start + Days::new(offset);
            let entries: Vec<String> = state
                .appointments
                .iter()
                .filter(|a| a.date == day)
                .map(|a| {
                    let mut entry = format!("{} {}", a.time, a.client_name);
                    if a.status == AppointmentStatus::Cancelled {
                        entry.push_str(" [cancelled]");
                    }
                    entry
                })
                .collect();
            Row::new(vec![
                Cell::from(day.format("%a %d %b").to_string()),
                Cell::from(entries.join("  ")),
            ])
        })
        .collect();

    let widths = [Constraint::Length(12), Constraint::Percentage(100)];
    let grid = Table::new(rows)
        .block(Block::default().borders(Borders::ALL).title(grid_title))
        .widths(&widths);
    f.render_widget(grid, chunks[0]);

    let items: Vec<ListItem> = state
        .appointments
        .iter()
        .map(|a| {
            let line = format!(
                "{} {}  {} — {} / {}  [{}]",
                a.date, a.time, a.client_name, a.service_name, a.sub_service_name, a.status
            );
            let style = if a.status == AppointmentStatus::Cancelled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(Spans::from(line)).style(style)
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Appointments"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut state.list_state);

    let help =
        Paragraph::new("←/→: week | ↑/↓: select | c: cancel | d: delete | Esc: back")
            .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

pub fn handle_input(state: &mut ScheduleState) -> Result<Option<ScheduleAction>> {
    if let Event::Key(key) = event::read()? {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => state.next(),
            KeyCode::Up | KeyCode::Char('k') => state.previous(),
            KeyCode::Left | KeyCode::Char('h') => return Ok(Some(ScheduleAction::PrevWeek)),
            KeyCode::Right | KeyCode::Char('l') => return Ok(Some(ScheduleAction::NextWeek)),
            KeyCode::Char('c') => {
                return Ok(state.selected_appointment_id().map(ScheduleAction::CancelSelected));
            }
            KeyCode::Char('d') => {
                return Ok(state.selected_appointment_id().map(ScheduleAction::DeleteSelected));
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('q') => {
                return Ok(Some(ScheduleAction::Back));
            }
            _ => {}
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_monday_of_a_wednesday() {
        let wed = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        assert_eq!(week_monday(wed), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn week_monday_of_a_sunday_is_previous_monday() {
        let sun = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(week_monday(sun), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
    }

    #[test]
    fn week_monday_is_idempotent() {
        let mon = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(week_monday(mon), mon);
    }
}
