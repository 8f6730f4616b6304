mod commands;

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

use botdesk_application::{
    DrawerState, RejectionReason, SessionEvent, SessionOptions, SessionOrchestrator, SubmitOutcome,
};
use botdesk_core::assistant::AssistantRegistry;
use botdesk_core::conversation::{Message, MessageBlock, MessageSender, render_blocks};
use botdesk_core::panel::PanelState;
use botdesk_infrastructure::{BotDeskPaths, ConfigService, SecretServiceImpl};
use botdesk_interaction::GeminiResponder;

use commands::{COMMANDS, Command, ParamAction, parse_line};

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
    assistant_ids: Vec<String>,
}

impl CliHelper {
    fn new(registry: &AssistantRegistry) -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            assistant_ids: registry
                .list_assistants()
                .iter()
                .map(|a| a.id.clone())
                .collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if let Some(prefix) = line.strip_prefix("/select ") {
            let candidates = self
                .assistant_ids
                .iter()
                .filter(|id| id.starts_with(prefix))
                .map(|id| Pair {
                    display: id.clone(),
                    replacement: id.clone(),
                })
                .collect();
            Ok(("/select ".len(), candidates))
        } else if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn display_name(registry: &AssistantRegistry, assistant_id: &str) -> String {
    registry
        .get_assistant(assistant_id)
        .map(|a| a.name.clone())
        .unwrap_or_else(|_| assistant_id.to_string())
}

fn print_message(registry: &AssistantRegistry, message: &Message) {
    match &message.sender {
        MessageSender::User => {
            println!("{}", format!("> {}", message.text).green());
            return;
        }
        MessageSender::Assistant(id) => {
            println!("{}", format!("[{}]", display_name(registry, id)).bright_magenta());
        }
    }

    for block in render_blocks(message) {
        match block {
            MessageBlock::Paragraph(text) => {
                for line in text.lines() {
                    println!("{}", line.bright_blue());
                }
            }
            MessageBlock::BulletList(items) => {
                for item in items {
                    println!("  {} {}", "•".bright_blue(), item.bright_blue());
                }
            }
            MessageBlock::Quote(text) => {
                for line in text.lines() {
                    println!("  {} {}", "│".bright_black(), line.italic());
                }
            }
        }
    }
    println!();
}

async fn print_assistants(session: &SessionOrchestrator) {
    let current = session.current_assistant().await;
    let registry = session.registry();
    for assistant in registry.list_assistants() {
        let marker = if assistant.id == current.id { "*" } else { " " };
        let mut line = format!(
            "{} {:<6} {} ({})",
            marker, assistant.id, assistant.name, assistant.role
        );
        if registry.is_reporting(&assistant.id) {
            line.push_str(" [reports]");
        }
        println!("{}", line.bright_white());
    }
}

async fn print_report(session: &SessionOrchestrator) {
    let view = session.snapshot().await;
    let Some(report) = view.report else {
        println!("{}", "Report panel is hidden.".bright_black());
        return;
    };

    println!("{}", format!("== {} ==", report.subject).bright_yellow().bold());
    let name = if report.name.is_empty() {
        "(unnamed)"
    } else {
        report.name.as_str()
    };
    println!("{}", format!("Template name: {}", name).yellow());
    for (i, parameter) in report.parameters.iter().enumerate() {
        println!(
            "{}",
            format!("  {}. {}: {}", i + 1, parameter.label, parameter.value).yellow()
        );
    }
    if let Some(applied) = &report.applied {
        println!("{}", format!("Applied: {:?}", applied).bright_black());
    }
    if view.report_expanded {
        println!("{}", "(full screen, /minimize to close)".bright_black());
    }
}

fn print_help() {
    println!("{}", "Type a message to chat with the selected assistant.".bright_black());
    for line in [
        "/assistants                list assistants",
        "/select <id>               switch assistant",
        "/menu                      toggle the assistant drawer",
        "/report                    show the report panel",
        "/save [name]               save the report template",
        "/discard                   close the report panel",
        "/param <1|2> <+|-|reset>   adjust report filters",
        "/apply                     apply report filters",
        "/layout <desktop|mobile>   switch layout",
        "/expand, /minimize         mobile report overlay",
        "quit, exit                 leave",
    ] {
        println!("{}", line.bright_black());
    }
}

/// Returns true when the report panel is open, telling the user otherwise.
async fn require_report(session: &SessionOrchestrator) -> bool {
    let open = session.panel_state().await == PanelState::Visible;
    if !open {
        println!("{}", "Report panel is not open.".bright_black());
    }
    open
}

async fn handle_command(session: &SessionOrchestrator, command: Command) -> Result<()> {
    match command {
        Command::Assistants => print_assistants(session).await,
        Command::Select(id) => {
            session.select_assistant(&id).await?;
            let assistant = session.current_assistant().await;
            println!(
                "{}",
                format!("--- {} ({}) ---", assistant.name, assistant.role)
                    .bright_magenta()
                    .bold()
            );
            for message in session.history(&assistant.id).await {
                print_message(session.registry(), &message);
            }
            if session.panel_state().await == PanelState::Visible {
                print_report(session).await;
            }
        }
        Command::Menu => match session.toggle_drawer().await {
            DrawerState::Open => {
                println!("{}", "Assistants (/select <id> to switch, /menu to close):".bright_black());
                print_assistants(session).await;
            }
            DrawerState::Closed => println!("{}", "Drawer closed.".bright_black()),
        },
        Command::Report => print_report(session).await,
        Command::Save(name) => {
            if require_report(session).await {
                if let Some(name) = name {
                    session.rename_report(&name).await;
                }
                session.save_report().await;
                println!("{}", "Template saved.".bright_green());
            }
        }
        Command::Discard => {
            session.discard_report().await;
            println!("{}", "Report panel closed.".bright_black());
        }
        Command::Param { index, action } => {
            if require_report(session).await {
                match action {
                    ParamAction::Adjust(adjustment) => {
                        session.adjust_report_parameter(index, adjustment).await?;
                    }
                    ParamAction::Reset => session.reset_report_filters().await,
                }
                print_report(session).await;
            }
        }
        Command::Apply => {
            if require_report(session).await {
                let values = session.apply_report_filters().await;
                println!("{}", format!("Filters applied: {:?}", values).bright_green());
            }
        }
        Command::Layout(mode) => {
            session.set_layout(mode).await;
            println!("{}", format!("Layout: {}", mode).bright_black());
        }
        Command::Expand => {
            if session.expand_report().await {
                print_report(session).await;
            } else {
                println!("{}", "Nothing to expand.".bright_black());
            }
        }
        Command::Minimize => {
            session.minimize_report().await;
        }
        Command::Help => print_help(),
        Command::Submit(text) => {
            if let SubmitOutcome::Rejected(RejectionReason::Busy) =
                session.submit_message(&text).await
            {
                println!("{}", "Still waiting for the previous reply.".yellow());
            }
        }
        Command::Quit => {}
    }
    Ok(())
}

/// Prints replies and panel changes as the session publishes them.
fn spawn_event_printer(
    session: &SessionOrchestrator,
    registry: Arc<AssistantRegistry>,
) -> tokio::task::JoinHandle<()> {
    let mut events = session.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::MessageAppended { message, .. }) if !message.sender.is_user() => {
                    print_message(&registry, &message);
                }
                Ok(SessionEvent::AwaitingChanged { awaiting: true }) => {
                    println!("{}", "typing...".bright_black());
                }
                Ok(SessionEvent::PanelChanged { state }) => {
                    let text = match state {
                        PanelState::Visible => "Report panel opened (/report to view).",
                        PanelState::Hidden => "Report panel closed.",
                    };
                    println!("{}", text.bright_yellow());
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "event printer lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// The main entry point for the BotDesk readline REPL.
#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let paths = BotDeskPaths::new(None);
    let config = ConfigService::new(&paths)?.get_config()?;
    init_tracing(&config.log_level);

    let registry = Arc::new(config.build_registry()?);
    let secrets = SecretServiceImpl::new(&paths)?;
    let responder = GeminiResponder::from_secrets(&secrets, &config.gemini)
        .await
        .context("Failed to set up the Gemini responder")?;
    tracing::info!(model = responder.model(), "responder ready");

    let options = SessionOptions::from_config(&config, &registry)?;
    let session = SessionOrchestrator::new(Arc::clone(&registry), Arc::new(responder), options)?;
    let printer = spawn_event_printer(&session, Arc::clone(&registry));

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new(&registry)));

    println!("{}", "=== BotDesk ===".bright_magenta().bold());
    println!(
        "{}",
        format!("{} - {}", config.profile.name, config.profile.role).bright_black()
    );
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();

    let current = session.current_assistant().await;
    for message in session.history(&current.id).await {
        print_message(&registry, &message);
    }

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match parse_line(trimmed) {
                    Ok(Command::Quit) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Ok(command) => {
                        if let Err(e) = handle_command(&session, command).await {
                            eprintln!("{}", format!("Error: {}", e).red());
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    printer.abort();
    Ok(())
}
