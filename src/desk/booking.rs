use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::db::models::ServiceWithSubs;
use crate::types::BookingRequest;

pub const TIME_SLOTS: &[&str] = &[
    "09:00", "10:00", "11:00", "12:00", "14:00", "15:00", "16:00", "17:00",
];

#[derive(Clone, Copy, PartialEq)]
pub enum BookingField {
    Service,
    SubService,
    Date,
    Time,
    CustomTime,
    Name,
    Email,
    Phone,
}

pub enum BookingAction {
    Cancel,
    Submit(BookingRequest),
}

pub struct BookingState {
    services: Vec<ServiceWithSubs>,
    service_idx: usize,
    sub_service_idx: usize,
    date: String,
    time_idx: usize,
    custom_time: String,
    name: String,
    email: String,
    phone: String,
    current_field: BookingField,
    editing: bool,
    error: Option<String>,
}

impl BookingState {
    pub fn new(services: Vec<ServiceWithSubs>) -> Self {
        Self {
            services,
            service_idx: 0,
            sub_service_idx: 0,
            date: String::new(),
            time_idx: 0,
            custom_time: String::new(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            current_field: BookingField::Service,
            editing: false,
            error: None,
        }
    }

    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }

    fn custom_time_selected(&self) -> bool {
        self.time_idx == TIME_SLOTS.len()
    }

    fn resolved_time(&self) -> &str {
        if self.custom_time_selected() {
            &self.custom_time
        } else {
            TIME_SLOTS[self.time_idx]
        }
    }

    fn selected_service(&self) -> Option<&ServiceWithSubs> {
        self.services.get(self.service_idx)
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            BookingField::Service => BookingField::SubService,
            BookingField::SubService => BookingField::Date,
            BookingField::Date => BookingField::Time,
            BookingField::Time => {
                if self.custom_time_selected() {
                    BookingField::CustomTime
                } else {
                    BookingField::Name
                }
            }
            BookingField::CustomTime => BookingField::Name,
            BookingField::Name => BookingField::Email,
            BookingField::Email => BookingField::Phone,
            BookingField::Phone => BookingField::Service,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            BookingField::Service => BookingField::Phone,
            BookingField::SubService => BookingField::Service,
            BookingField::Date => BookingField::SubService,
            BookingField::Time => BookingField::Date,
            BookingField::CustomTime => BookingField::Time,
            BookingField::Name => {
                if self.custom_time_selected() {
                    BookingField::CustomTime
                } else {
                    BookingField::Time
                }
            }
            BookingField::Email => BookingField::Name,
            BookingField::Phone => BookingField::Email,
        };
    }

    fn is_text_field(&self) -> bool {
        matches!(
            self.current_field,
            BookingField::Date
                | BookingField::CustomTime
                | BookingField::Name
                | BookingField::Email
                | BookingField::Phone
        )
    }

    /// Cycle the option under the cursor for the choice fields.
    fn cycle(&mut self, forward: bool) {
        match self.current_field {
            BookingField::Service => {
                if self.services.is_empty() {
                    return;
                }
                self.service_idx = step(self.service_idx, self.services.len(), forward);
                self.sub_service_idx = 0;
            }
            BookingField::SubService => {
                let len = self
                    .selected_service()
                    .map(|s| s.sub_services.len())
                    .unwrap_or(0);
                if len == 0 {
                    return;
                }
                self.sub_service_idx = step(self.sub_service_idx, len, forward);
            }
            // TIME_SLOTS plus the trailing "other" free-text slot.
            BookingField::Time => {
                self.time_idx = step(self.time_idx, TIME_SLOTS.len() + 1, forward);
            }
            _ => {}
        }
    }

    fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let field_value = match self.current_field {
            BookingField::Date => &mut self.date,
            BookingField::CustomTime => &mut self.custom_time,
            BookingField::Name => &mut self.name,
            BookingField::Email => &mut self.email,
            BookingField::Phone => &mut self.phone,
            _ => return,
        };

        match key {
            KeyCode::Char(c) => {
                field_value.push(c);
            }
            KeyCode::Backspace => {
                field_value.pop();
            }
            _ => {}
        }
    }

    /// Build the request or explain what is still missing.
    pub fn build_request(&self) -> Result<BookingRequest, String> {
        let service = self
            .selected_service()
            .ok_or_else(|| "no service selected".to_string())?;
        let sub_service = service
            .sub_services
            .get(self.sub_service_idx)
            .ok_or_else(|| "no sub-service selected".to_string())?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| "date must be YYYY-MM-DD".to_string())?;

        let time = self.resolved_time().trim().to_string();
        if time.is_empty() {
            return Err("time must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("client name must not be empty".to_string());
        }

        Ok(BookingRequest {
            client_name: self.name.trim().to_string(),
            client_email: Some(self.email.clone()),
            client_phone: Some(self.phone.clone()),
            service_id: service.id,
            sub_service_id: sub_service.id,
            date,
            time,
            notes: None,
        })
    }
}

pub fn render_booking<B: Backend>(f: &mut Frame<B>, state: &mut BookingState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = match &state.error {
        Some(message) => Paragraph::new(Spans::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )))
        .block(Block::default().borders(Borders::ALL).title("Book appointment")),
        None => Paragraph::new("Book appointment")
            .block(Block::default().borders(Borders::ALL)),
    };
    f.render_widget(title, chunks[0]);

    let service_value = state
        .selected_service()
        .map(|s| match &s.icon {
            Some(icon) => format!("{icon} {}", s.name),
            None => s.name.clone(),
        })
        .unwrap_or_else(|| "<none>".to_string());
    let sub_service_value = state
        .selected_service()
        .and_then(|s| s.sub_services.get(state.sub_service_idx))
        .map(|ss| {
            let price = ss.price.map(|p| format!(", ${p:.2}")).unwrap_or_default();
            format!("{} ({} min{price})", ss.name, ss.duration_minutes)
        })
        .unwrap_or_else(|| "<none>".to_string());
    let time_value = if state.custom_time_selected() {
        "other".to_string()
    } else {
        TIME_SLOTS[state.time_idx].to_string()
    };

    let mut fields: Vec<(BookingField, &str, String)> = vec![
        (BookingField::Service, "Service", service_value),
        (BookingField::SubService, "Sub-service", sub_service_value),
        (BookingField::Date, "Date (YYYY-MM-DD)", state.date.clone()),
        (BookingField::Time, "Time", time_value),
    ];
    if state.custom_time_selected() {
        fields.push((
            BookingField::CustomTime,
            "Custom time",
            state.custom_time.clone(),
        ));
    }
    fields.push((BookingField::Name, "Client name", state.name.clone()));
    fields.push((BookingField::Email, "Email", state.email.clone()));
    fields.push((BookingField::Phone, "Phone", state.phone.clone()));

    let items: Vec<ListItem> = fields
        .iter()
        .map(|(field, label, value)| {
            let selected = *field == state.current_field;
            let marker = if selected {
                if state.editing { "* " } else { "> " }
            } else {
                "  "
            };
            let style = if selected {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Spans::from(Span::styled(
                format!("{marker}{label}: {value}"),
                style,
            )))
        })
        .collect();
    let form = List::new(items).block(Block::default().borders(Borders::ALL).title("Details"));
    f.render_widget(form, chunks[1]);

    let help = if state.editing {
        "type to edit | Enter: done"
    } else {
        "↑/↓: field | ←/→: choose | Enter: edit | s: submit | Esc: cancel"
    };
    let help = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

pub fn handle_input(state: &mut BookingState) -> Result<Option<BookingAction>> {
    if let Event::Key(key) = event::read()? {
        if state.editing {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => state.editing = false,
                code => state.edit_current_field(code),
            }
            return Ok(None);
        }

        match key.code {
            KeyCode::Down | KeyCode::Tab => state.next_field(),
            KeyCode::Up | KeyCode::BackTab => state.previous_field(),
            KeyCode::Left => state.cycle(false),
            KeyCode::Right => state.cycle(true),
            KeyCode::Enter => {
                if state.is_text_field() {
                    state.editing = true;
                }
            }
            KeyCode::Char('s') => match state.build_request() {
                Ok(request) => return Ok(Some(BookingAction::Submit(request))),
                Err(message) => state.error = Some(message),
            },
            KeyCode::Esc | KeyCode::Char('q') => return Ok(Some(BookingAction::Cancel)),
            _ => {}
        }
    }

    Ok(None)
}

fn step(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        if current >= len - 1 { 0 } else { current + 1 }
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::SubService;

    fn catalog() -> Vec<ServiceWithSubs> {
        vec![ServiceWithSubs {
            id: 1,
            name: "Makeup".to_string(),
            icon: None,
            sub_services: vec![SubService {
                id: 2,
                service_id: 1,
                name: "Bridal Makeup".to_string(),
                duration_minutes: 90,
                price: Some(80.0),
            }],
        }]
    }

    fn filled_state() -> BookingState {
        let mut state = BookingState::new(catalog());
        state.date = "2026-03-10".to_string();
        state.name = "Ana Torres".to_string();
        state
    }

    #[test]
    fn custom_time_field_is_skipped_for_preset_slots() {
        let mut state = filled_state();
        state.current_field = BookingField::Time;
        state.next_field();
        assert!(matches!(state.current_field, BookingField::Name));
    }

    #[test]
    fn custom_time_field_appears_when_other_is_selected() {
        let mut state = filled_state();
        state.time_idx = TIME_SLOTS.len();
        state.current_field = BookingField::Time;
        state.next_field();
        assert!(matches!(state.current_field, BookingField::CustomTime));
    }

    #[test]
    fn build_request_resolves_preset_slot() {
        let state = filled_state();
        let request = state.build_request().unwrap();
        assert_eq!(request.time, TIME_SLOTS[0]);
        assert_eq!(request.service_id, 1);
        assert_eq!(request.sub_service_id, 2);
    }

    #[test]
    fn build_request_rejects_bad_date() {
        let mut state = filled_state();
        state.date = "10/03/2026".to_string();
        assert!(state.build_request().is_err());
    }

    #[test]
    fn build_request_rejects_blank_custom_time() {
        let mut state = filled_state();
        state.time_idx = TIME_SLOTS.len();
        assert!(state.build_request().is_err());
    }
}
