//! Terminal front-desk client: three views (home, weekly schedule grid,
//! booking form) switched on a single screen enum, all driven through the
//! REST API.

pub mod booking;
pub mod home;
pub mod schedule;

use crate::api::SalonApi;
use anyhow::Result;
use tui::{Terminal, backend::Backend};

use booking::{BookingAction, BookingState, handle_input as handle_booking_input, render_booking};
use home::{HomeAction, HomeState, handle_input as handle_home_input, render_home};
use schedule::{
    ScheduleAction, ScheduleState, handle_input as handle_schedule_input, render_schedule,
    week_monday,
};

// Represents the current screen in the app
enum DeskScreen {
    Home,
    Schedule,
    Booking,
}

pub struct DeskApp {
    api: SalonApi,
    screen: DeskScreen,
    home_state: HomeState,
    schedule_state: Option<ScheduleState>,
    booking_state: Option<BookingState>,
}

impl DeskApp {
    pub fn new(api: SalonApi) -> Self {
        Self {
            api,
            screen: DeskScreen::Home,
            home_state: HomeState::new(),
            schedule_state: None,
            booking_state: None,
        }
    }
}

pub async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut DeskApp) -> Result<()> {
    loop {
        terminal.draw(|f| match app.screen {
            DeskScreen::Home => render_home(f, &mut app.home_state),
            DeskScreen::Schedule => {
                if let Some(state) = &mut app.schedule_state {
                    render_schedule(f, state);
                }
            }
            DeskScreen::Booking => {
                if let Some(state) = &mut app.booking_state {
                    render_booking(f, state);
                }
            }
        })?;

        let should_quit = match app.screen {
            DeskScreen::Home => handle_home_screen(app).await?,
            DeskScreen::Schedule => handle_schedule_screen(app).await?,
            DeskScreen::Booking => handle_booking_screen(app).await?,
        };

        if should_quit {
            break;
        }
    }

    Ok(())
}

async fn load_schedule_screen(app: &mut DeskApp, week_start: chrono::NaiveDate) -> Result<()> {
    let appointments = app.api.appointments_for_week(week_start).await?;
    app.schedule_state = Some(ScheduleState::new(week_start, appointments));
    app.screen = DeskScreen::Schedule;
    Ok(())
}

async fn handle_home_screen(app: &mut DeskApp) -> Result<bool> {
    match handle_home_input(&mut app.home_state)? {
        Some(HomeAction::Exit) => {
            return Ok(true);
        }
        Some(HomeAction::OpenSchedule) => {
            let monday = week_monday(chrono::Local::now().date_naive());
            load_schedule_screen(app, monday).await?;
        }
        Some(HomeAction::OpenBooking) => {
            let services = app.api.services().await?;
            app.booking_state = Some(BookingState::new(services));
            app.screen = DeskScreen::Booking;
        }
        None => {}
    }

    Ok(false)
}

async fn handle_schedule_screen(app: &mut DeskApp) -> Result<bool> {
    if let Some(state) = &mut app.schedule_state {
        match handle_schedule_input(state)? {
            Some(ScheduleAction::Back) => {
                app.screen = DeskScreen::Home;
            }
            Some(ScheduleAction::PrevWeek) => {
                let start = state.week_start() - chrono::Days::new(7);
                load_schedule_screen(app, start).await?;
            }
            Some(ScheduleAction::NextWeek) => {
                let start = state.week_start() + chrono::Days::new(7);
                load_schedule_screen(app, start).await?;
            }
            Some(ScheduleAction::CancelSelected(id)) => {
                let start = state.week_start();
                app.api.cancel(id).await?;
                load_schedule_screen(app, start).await?;
            }
            Some(ScheduleAction::DeleteSelected(id)) => {
                let start = state.week_start();
                app.api.delete(id).await?;
                load_schedule_screen(app, start).await?;
            }
            None => {}
        }
    }

    Ok(false)
}

async fn handle_booking_screen(app: &mut DeskApp) -> Result<bool> {
    if let Some(state) = &mut app.booking_state {
        match handle_booking_input(state)? {
            Some(BookingAction::Cancel) => {
                app.booking_state = None;
                app.screen = DeskScreen::Home;
            }
            Some(BookingAction::Submit(request)) => {
                match app.api.book(&request).await {
                    Ok(_) => {
                        app.booking_state = None;
                        app.screen = DeskScreen::Home;
                    }
                    // Server-side rejections (occupied slot, validation)
                    // stay on the form so the clerk can adjust.
                    Err(crate::LacquerError::Api { message, .. }) => {
                        state.set_error(message);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            None => {}
        }
    }

    Ok(false)
}
