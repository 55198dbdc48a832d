//! Roster client entry point.
//!
//! Bootstraps the engine (config, API client, template source, route table),
//! performs the initial navigation, then drives the view from a line-oriented
//! stdin shell.

use roster_ui::actions::UiEvent;
use roster_ui::api_client::EmployeeClient;
use roster_ui::config::AppConfig;
use roster_ui::engine::App;
use roster_ui::error::UiError;
use roster_ui::notifications::NotificationLevel;
use roster_ui::template::{DirTemplateSource, TemplateRef};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), UiError> {
    init_tracing();

    let config = AppConfig::load()?;
    let api = EmployeeClient::new(&config.api)?;
    let templates = DirTemplateSource::new(config.templates_dir.clone());
    let mut app = App::new(config, api, Box::new(templates));

    // Register routes
    app.register("list", TemplateRef::new("employee-list.toml"));
    app.register("form", TemplateRef::new("employee-form.toml"));
    app.register("delete", TemplateRef::new("employee-delete.toml"));

    app.start().await?;
    print_view(&app);

    let (line_tx, mut line_rx) = mpsc::channel::<String>(64);
    spawn_input_reader(line_tx);

    while let Some(line) = line_rx.recv().await {
        match parse_command(&line, &app) {
            Command::Quit => break,
            Command::Show => print_view(&app),
            Command::Help => print_help(),
            Command::Invalid(message) => eprintln!("{message}"),
            Command::Event(event) => match app.dispatch(event).await {
                Ok(()) => print_view(&app),
                Err(err) => {
                    // A failed navigation (e.g. template fetch) leaves the
                    // previous view in place.
                    tracing::error!(error = %err, "dispatch failed");
                    eprintln!("error: {err}");
                }
            },
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
    Invalid(String),
}

fn parse_command(line: &str, app: &App) -> Command {
    let mut parts = line.trim().split_whitespace();
    match parts.next() {
        None | Some("show") => Command::Show,
        Some("quit") | Some("q") => Command::Quit,
        Some("help") | Some("?") => Command::Help,
        Some("goto") => match parts.next() {
            Some(fragment) => Command::Event(UiEvent::Navigate(fragment.to_string())),
            None => Command::Invalid("usage: goto <route>[?id=<id>]".to_string()),
        },
        Some("click") => match parts.next() {
            Some(id) => Command::Event(UiEvent::ClickId(id.to_string())),
            None => Command::Invalid("usage: click <element-id>".to_string()),
        },
        Some("input") => {
            let Some(name) = parts.next() else {
                return Command::Invalid("usage: input <field-name> <value>".to_string());
            };
            let value = parts.collect::<Vec<_>>().join(" ");
            match app.node_by_name(name) {
                Some(field) => Command::Event(UiEvent::Input { field, value }),
                None => Command::Invalid(format!("no field named '{name}' in this view")),
            }
        }
        Some("check") => {
            let checked = matches!(parts.next(), Some("on") | Some("true"));
            match app.node_by_name("active") {
                Some(field) => Command::Event(UiEvent::SetChecked { field, checked }),
                None => Command::Invalid("no 'active' field in this view".to_string()),
            }
        }
        Some("submit") => Command::Event(UiEvent::Submit),
        Some(other) => Command::Invalid(format!("unknown command '{other}' (try 'help')")),
    }
}

fn print_view(app: &App) {
    print!("{}", app.render());
    if let Some(notification) = app.notifications.last() {
        let label = match notification.level {
            NotificationLevel::Info => "INFO",
            NotificationLevel::Warning => "WARN",
            NotificationLevel::Error => "ERROR",
            NotificationLevel::Success => "SUCCESS",
        };
        println!("{label}: {}", notification.message);
    }
    println!("-- {}", app.current_fragment());
}

fn print_help() {
    println!(
        "commands:\n  goto <route>[?id=<id>]   navigate (list, form, delete)\n  click <element-id>       click a wired element\n  input <field> <value>    type into a named field\n  check on|off             toggle the active flag\n  submit                   submit the form\n  show                     re-print the current view\n  quit"
    );
}

fn spawn_input_reader(sender: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {
                    if sender.blocking_send(line.trim_end().to_string()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
}
