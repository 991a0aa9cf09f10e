//! The Vroomy terminal app: a landing page and a chat with the car-price
//! estimation assistant.

#[macro_use]
extern crate tracing;

use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::sleep;
use vroomy::commands::ChatCommand;
use vroomy::core::{App, AppBuilder, ChatMessage, Screen, SessionUnavailable};
use vroomy::{config, screens};
use vroomy_http_model::HttpProvider;

enum AppEvent {
    Message(ChatMessage),
    Idle,
}

/// What the chat screen asks the main loop to do next.
enum Next {
    Stay,
    Leave,
    Quit,
}

type Input = Lines<BufReader<Stdin>>;
type Events = mpsc::UnboundedReceiver<AppEvent>;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };
    info!("using prediction endpoint {}", config.endpoint_url());
    let provider = HttpProvider::new(config);

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut app = AppBuilder::with_prediction_provider(provider)
        .on_message({
            let event_tx = event_tx.clone();
            move |message| {
                event_tx.send(AppEvent::Message(message.clone())).ok();
            }
        })
        .on_idle(move || {
            event_tx.send(AppEvent::Idle).ok();
        })
        .build();

    let mut input = BufReader::new(io::stdin()).lines();

    loop {
        match app.active_screen() {
            Screen::Landing => {
                print!("{}", screens::landing());
                prompt("");
                let Some(line) = read_line(&mut input).await else {
                    break;
                };
                if line.trim().eq_ignore_ascii_case("q") {
                    break;
                }
                app.navigate_to(Screen::Chat);
                println!("\n{}", screens::CHAT_HINT.dimmed());
                // Wait for the greeting.
                if !print_next_event(&mut event_rx).await {
                    break;
                }
            }
            Screen::Chat => {
                prompt("> ");
                let Some(line) = read_line(&mut input).await else {
                    break;
                };
                match chat_turn(&app, &line, &mut event_rx).await {
                    Ok(Next::Stay) => {}
                    Ok(Next::Leave) => {
                        app.navigate_to(Screen::Landing);
                    }
                    Ok(Next::Quit) => break,
                    Err(err) => {
                        error!("chat screen failed: {err}");
                        break;
                    }
                }
            }
        }
    }
}

async fn chat_turn(
    app: &App,
    line: &str,
    event_rx: &mut Events,
) -> Result<Next, SessionUnavailable> {
    let chat = app.chat().ok_or(SessionUnavailable)?;
    match ChatCommand::parse(line) {
        ChatCommand::Back => return Ok(Next::Leave),
        ChatCommand::Quit => return Ok(Next::Quit),
        ChatCommand::Suggest => print!("{}", screens::suggestions()),
        ChatCommand::Use(index) => match screens::suggestion(index) {
            Some(suggestion) => {
                chat.set_pending_input(suggestion)?;
                println!("{}", suggestion.dimmed());
                println!("{}", "Entrée pour envoyer.".dimmed());
            }
            None => println!("Pas de suggestion n°{index}."),
        },
        ChatCommand::SubmitPending => {
            let snapshot = chat.snapshot().await?;
            if !snapshot.pending_input.trim().is_empty() {
                chat.submit_pending()?;
                wait_for_reply(event_rx).await;
            }
        }
        ChatCommand::Submit(text) => {
            chat.send_user_message(text)?;
            wait_for_reply(event_rx).await;
        }
        ChatCommand::Unknown(command) => {
            println!("Commande inconnue : {command}");
            println!("{}", screens::CHAT_HINT.dimmed());
        }
    }
    Ok(Next::Stay)
}

/// Prints messages as they come in, with a spinner, until the session is
/// idle again.
async fn wait_for_reply(event_rx: &mut Events) {
    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let mut progress_bar: Option<ProgressBar> = None;

    loop {
        progress_bar
            .get_or_insert_with(|| {
                let progress_bar = ProgressBar::new_spinner();
                progress_bar.set_style(progress_style.clone());
                progress_bar.set_message("🚗 Estimation en cours...");
                progress_bar
            })
            .inc(1);

        let sleep = sleep(Duration::from_millis(100));
        let event = select! {
            event = event_rx.recv() => event,
            _ = sleep => continue,
        };

        // Clear the spinner before printing anything else.
        if let Some(progress_bar) = progress_bar.take() {
            progress_bar.finish_and_clear();
        }

        match event {
            Some(AppEvent::Message(message)) => {
                println!("{}", screens::message(&message));
            }
            Some(AppEvent::Idle) | None => break,
        }
    }
}

async fn print_next_event(event_rx: &mut Events) -> bool {
    match event_rx.recv().await {
        Some(AppEvent::Message(message)) => {
            println!("{}", screens::message(&message));
            true
        }
        Some(AppEvent::Idle) => true,
        None => false,
    }
}

fn prompt(text: &str) {
    print!("{text}");
    std::io::stdout().flush().ok();
}

async fn read_line(input: &mut Input) -> Option<String> {
    match input.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
