//! Account form: a small dialog exercising every kind of hook.
//!
//! - `user_name` initializes from the stored account and refuses to be empty
//! - `password` grades strength on every keystroke and refreshes its help
//! - `notify` enables or disables `email` when toggled
//! - `email` starts disabled and is only validated when enabled
//! - `activity` sees every event of the dialog and counts them

use crate::dialog::Dialog;
use crate::widget::{shared, Action, CapabilitySet, Event, Widget, WidgetBase, WidgetOption, WidgetType};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// What the form edits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Account {
    pub user_name: String,
    pub password: String,
    pub notify: bool,
    pub email: String,
}

pub type SharedAccount = Rc<RefCell<Account>>;

pub fn shared_account() -> SharedAccount {
    Rc::new(RefCell::new(Account::default()))
}

/// The account dialog, storing into `account` when accepted.
pub fn account_dialog(account: &SharedAccount) -> Dialog {
    Dialog::new(vec![
        shared(UserName::new(account.clone())),
        shared(Password::new(account.clone())),
        shared(NotifyToggle::new(account.clone())),
        shared(Email::new(account.clone())),
        shared(Activity::new()),
    ])
}

fn text_value(base: &WidgetBase) -> String {
    match base.value() {
        Ok(Value::String(text)) => text,
        Ok(_) => String::new(),
        Err(err) => {
            log::warn!("Failed to read widget value: {}", err);
            String::new()
        }
    }
}

fn reject(base: &WidgetBase, reason: &str) -> bool {
    log::info!("{}", reason);
    if let Err(err) = base.focus() {
        log::warn!("Failed to focus rejected widget: {}", err);
    }
    false
}

pub struct UserName {
    base: WidgetBase,
    account: SharedAccount,
}

impl UserName {
    pub fn new(account: SharedAccount) -> Self {
        Self {
            base: WidgetBase::with_id("user_name"),
            account,
        }
    }
}

impl Widget for UserName {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::InputField)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LABEL | CapabilitySet::HELP | CapabilitySet::INIT | CapabilitySet::VALIDATE | CapabilitySet::STORE
    }

    fn label(&self) -> String {
        "User name".to_string()
    }

    fn help(&self) -> String {
        "User name: the login name of the account. It cannot be empty.".to_string()
    }

    fn init(&mut self) {
        let stored = self.account.borrow().user_name.clone();
        let initial = if stored.is_empty() {
            std::env::var("USER").unwrap_or_default()
        } else {
            stored
        };
        if let Err(err) = self.base.set_value(initial) {
            log::warn!("Failed to initialize user name: {}", err);
        }
    }

    fn validate(&mut self) -> bool {
        if text_value(&self.base).trim().is_empty() {
            return reject(&self.base, "User name is empty");
        }
        true
    }

    fn store(&mut self) {
        self.account.borrow_mut().user_name = text_value(&self.base).trim().to_string();
    }
}

pub const PASSWORD_MIN_LEN: usize = 8;

pub struct Password {
    base: WidgetBase,
    account: SharedAccount,
    strength: &'static str,
}

impl Password {
    pub fn new(account: SharedAccount) -> Self {
        Self {
            base: WidgetBase::with_id("password"),
            account,
            strength: "empty",
        }
    }

    fn grade(password: &str) -> &'static str {
        let classes = [
            password.chars().any(|c| c.is_ascii_lowercase()),
            password.chars().any(|c| c.is_ascii_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_ascii_alphanumeric()),
        ]
        .iter()
        .filter(|present| **present)
        .count();

        match (password.chars().count(), classes) {
            (0, _) => "empty",
            (len, _) if len < PASSWORD_MIN_LEN => "too short",
            (_, 0..=2) => "weak",
            _ => "strong",
        }
    }
}

impl Widget for Password {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::Password)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LABEL
            | CapabilitySet::HELP
            | CapabilitySet::OPT
            | CapabilitySet::HANDLE_EVENT
            | CapabilitySet::VALIDATE
            | CapabilitySet::STORE
    }

    fn label(&self) -> String {
        "Password".to_string()
    }

    fn help(&self) -> String {
        format!(
            "Password: at least {} characters. Current strength: {}.",
            PASSWORD_MIN_LEN, self.strength
        )
    }

    fn opt(&self) -> Vec<WidgetOption> {
        vec![WidgetOption::Notify]
    }

    fn handle_event(&mut self, _event: &Event) -> Option<Action> {
        let strength = Self::grade(&text_value(&self.base));
        if strength != self.strength {
            self.strength = strength;
            if let Err(err) = self.base.refresh_help() {
                log::warn!("Failed to refresh password help: {}", err);
            }
        }
        None
    }

    fn validate(&mut self) -> bool {
        if text_value(&self.base).chars().count() < PASSWORD_MIN_LEN {
            return reject(&self.base, "Password is too short");
        }
        true
    }

    fn store(&mut self) {
        self.account.borrow_mut().password = text_value(&self.base);
    }
}

pub struct NotifyToggle {
    base: WidgetBase,
    account: SharedAccount,
}

impl NotifyToggle {
    pub fn new(account: SharedAccount) -> Self {
        Self {
            base: WidgetBase::with_id("notify"),
            account,
        }
    }

    fn checked(&self) -> bool {
        self.base.value().ok().and_then(|value| value.as_bool()).unwrap_or(false)
    }
}

impl Widget for NotifyToggle {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::CheckBox)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LABEL | CapabilitySet::OPT | CapabilitySet::INIT | CapabilitySet::HANDLE_SELF | CapabilitySet::STORE
    }

    fn label(&self) -> String {
        "Send notifications by e-mail".to_string()
    }

    fn opt(&self) -> Vec<WidgetOption> {
        vec![WidgetOption::Notify]
    }

    fn init(&mut self) {
        let notify = self.account.borrow().notify;
        if let Err(err) = self.base.set_value(notify) {
            log::warn!("Failed to initialize notify toggle: {}", err);
        }
        self.handle_self();
    }

    fn handle_self(&mut self) -> Option<Action> {
        let email = match self.base.state_of(EMAIL_ID) {
            Ok(email) => email,
            Err(err) => {
                log::warn!("Cannot reach e-mail field: {}", err);
                return None;
            }
        };
        let result = if self.checked() { email.enable() } else { email.disable() };
        if let Err(err) = result {
            log::warn!("Failed to toggle e-mail field: {}", err);
        }
        None
    }

    fn store(&mut self) {
        self.account.borrow_mut().notify = self.checked();
    }
}

pub const EMAIL_ID: &str = "email";

pub struct Email {
    base: WidgetBase,
    account: SharedAccount,
}

impl Email {
    pub fn new(account: SharedAccount) -> Self {
        Self {
            base: WidgetBase::with_id(EMAIL_ID),
            account,
        }
    }

    fn is_active(&self) -> bool {
        self.base.is_enabled().unwrap_or(false)
    }
}

impl Widget for Email {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::InputField)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LABEL | CapabilitySet::OPT | CapabilitySet::INIT | CapabilitySet::VALIDATE | CapabilitySet::STORE
    }

    fn label(&self) -> String {
        "E-mail".to_string()
    }

    fn opt(&self) -> Vec<WidgetOption> {
        vec![WidgetOption::Disabled]
    }

    fn init(&mut self) {
        let email = self.account.borrow().email.clone();
        if let Err(err) = self.base.set_value(email) {
            log::warn!("Failed to initialize e-mail: {}", err);
        }
    }

    fn validate(&mut self) -> bool {
        if !self.is_active() {
            return true;
        }
        let email = text_value(&self.base);
        match email.split_once('@') {
            Some((user, domain)) if !user.is_empty() && domain.contains('.') => true,
            _ => reject(&self.base, "E-mail address is not valid"),
        }
    }

    fn store(&mut self) {
        let email = if self.is_active() {
            text_value(&self.base)
        } else {
            String::new()
        };
        self.account.borrow_mut().email = email;
    }
}

/// Read-only line counting every event of the dialog.
pub struct Activity {
    base: WidgetBase,
    events: usize,
}

impl Activity {
    pub fn new() -> Self {
        let mut base = WidgetBase::new();
        base.set_handle_all_events(true);
        Self { base, events: 0 }
    }

    pub fn events(&self) -> usize {
        self.events
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Activity {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn widget_type(&self) -> Option<WidgetType> {
        Some(WidgetType::RichText)
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::LABEL | CapabilitySet::HANDLE_EVENT | CapabilitySet::CLEANUP
    }

    fn label(&self) -> String {
        "Activity".to_string()
    }

    fn handle_event(&mut self, event: &Event) -> Option<Action> {
        self.events += 1;
        if let Err(err) = self.base.set_value(format!("{} event(s), last from '{}'", self.events, event.id)) {
            log::warn!("Failed to update activity: {}", err);
        }
        None
    }

    fn cleanup(&mut self) {
        log::debug!("Dialog saw {} event(s)", self.events);
    }
}
