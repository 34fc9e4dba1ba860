//! A [`WidgetHost`] drawing dialogs in the terminal with ratatui.
//!
//! Descriptors become rows of a form followed by Back/Abort/Next buttons.
//! Keys are translated into events by [`Form::handle_key`]; everything else
//! about a widget lives in its [`Field`].

use super::{HostError, WidgetHost};
use crate::config::TerminalConfig;
use crate::widget::descriptor::WidgetDescriptor;
use crate::widget::event::Event;
use crossterm::{
    event::{self as term_event, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde_json::Value;
use std::cell::RefCell;
use std::io::Stdout;
use std::time::Duration;

pub mod form;
pub mod render;

pub use form::{Field, Form};

type Backend = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalHost {
    config: TerminalConfig,
    form: RefCell<Form>,
    terminal: RefCell<Option<Backend>>,
}

impl TerminalHost {
    pub fn new(config: TerminalConfig) -> Self {
        Self {
            config,
            form: RefCell::new(Form::default()),
            terminal: RefCell::new(None),
        }
    }

    fn draw(&self) -> Result<(), HostError> {
        let form = self.form.borrow();
        let mut terminal = self.terminal.borrow_mut();
        let terminal = terminal.as_mut().ok_or(HostError::NoDialog)?;
        terminal.draw(|f| render::render_form(f, &form))?;
        Ok(())
    }

    fn restore(terminal: &mut Backend) -> Result<(), HostError> {
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn with_field<T>(&self, id: &str, f: impl FnOnce(&mut Field) -> T) -> Result<T, HostError> {
        let mut form = self.form.borrow_mut();
        form.field_mut(id).map(f)
    }
}

impl WidgetHost for TerminalHost {
    fn open_dialog(&self, descriptors: &[WidgetDescriptor]) -> Result<(), HostError> {
        *self.form.borrow_mut() = Form::from_descriptors(&self.config.title, descriptors, self.config.show_help);

        let mut terminal = self.terminal.borrow_mut();
        if terminal.is_none() {
            enable_raw_mode()?;
            let backend = setup_or_rollback(
                || {
                    let mut stdout = std::io::stdout();
                    execute!(stdout, EnterAlternateScreen)?;
                    Terminal::new(CrosstermBackend::new(stdout))
                },
                || {
                    let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
                    let _ = disable_raw_mode();
                },
            )?;
            *terminal = Some(backend);
        }
        log::debug!("Terminal dialog opened with {} widgets", descriptors.len());
        Ok(())
    }

    fn close_dialog(&self) -> Result<(), HostError> {
        let mut terminal = self.terminal.borrow_mut().take().ok_or(HostError::NoDialog)?;
        Self::restore(&mut terminal)
    }

    fn user_input(&self) -> Result<Event, HostError> {
        let tick = Duration::from_millis(self.config.tick_rate_ms);
        loop {
            self.draw()?;
            if !term_event::poll(tick)? {
                continue;
            }
            if let TermEvent::Key(key) = term_event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(event) = self.form.borrow_mut().handle_key(key) {
                    return Ok(event);
                }
            }
        }
    }

    fn is_enabled(&self, id: &str) -> Result<bool, HostError> {
        self.form.borrow().field(id).map(|field| field.enabled)
    }

    fn set_enabled(&self, id: &str, enabled: bool) -> Result<(), HostError> {
        self.with_field(id, |field| field.enabled = enabled)?;
        let mut form = self.form.borrow_mut();
        let focused_disabled = form.focused().map(|field| !field.enabled).unwrap_or(false);
        if focused_disabled {
            form.focus_next();
        }
        Ok(())
    }

    fn set_focus(&self, id: &str) -> Result<(), HostError> {
        let mut form = self.form.borrow_mut();
        let index = form.index_of(id)?;
        form.focus = index;
        Ok(())
    }

    fn value(&self, id: &str) -> Result<Value, HostError> {
        self.form.borrow().field(id).map(|field| field.value.clone())
    }

    fn set_value(&self, id: &str, value: Value) -> Result<(), HostError> {
        self.with_field(id, |field| field.value = value)
    }

    fn set_help(&self, text: &str) -> Result<(), HostError> {
        self.form.borrow_mut().help = text.to_string();
        Ok(())
    }
}

/// Run `setup`; if it fails, undo the terminal changes made so far with
/// `rollback` before reporting the error.
fn setup_or_rollback<T>(
    setup: impl FnOnce() -> std::io::Result<T>,
    rollback: impl FnOnce(),
) -> Result<T, HostError> {
    setup().map_err(|err| {
        log::error!("Terminal setup failed: {}", err);
        rollback();
        HostError::from(err)
    })
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        if let Some(mut terminal) = self.terminal.get_mut().take() {
            if let Err(err) = Self::restore(&mut terminal) {
                log::error!("Failed to restore terminal: {}", err);
            }
        }
    }
}
