use anyhow::Result;
use formkit::config::Config;
use formkit::host::TerminalHost;
use formkit::report::{MessageKind, Popup, Report};
use formkit::{demo, logger, Action};
use std::rc::Rc;

/// Popups printed to the console once the dialog has released the terminal.
struct ConsolePopup;

impl Popup for ConsolePopup {
    fn show(&self, kind: MessageKind, text: &str) {
        match kind {
            MessageKind::Warning => eprintln!("⚠️  {}", text),
            MessageKind::Error => eprintln!("❌ {}", text),
            _ => println!("{}", text),
        }
    }

    fn show_timed(&self, kind: MessageKind, text: &str, timeout_secs: u32) {
        self.show(kind, text);
        std::thread::sleep(std::time::Duration::from_secs(u64::from(timeout_secs)));
    }
}

fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        return Config::generate_default_config(&path);
    }

    let config = Config::load()?;
    logger::setup(&config.logging)?;

    let account = demo::shared_account();
    let dialog = demo::account_dialog(&account);
    let host = Rc::new(TerminalHost::new(config.terminal.clone()));
    let outcome = dialog.run(host)?;

    let mut report = Report::new(config.report).with_popup(Box::new(ConsolePopup));
    match outcome.action {
        Action::Next => {
            let account = account.borrow();
            report.message(&format!("✅ Saved account '{}'", account.user_name));
            if account.notify {
                report.message(&format!("Notifications go to {}", account.email));
            }
        }
        other => report.warning(&format!("Dialog left with '{}', nothing saved", other)),
    }

    Ok(())
}
