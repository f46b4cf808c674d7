use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use devnews_core::{update, AppState, Msg, SearchPhase};
use devnews_engine::{EngineHandle, FetchSettings, ProxyClient, ReqwestFetcher};
use devnews_logging::{news_info, LogDestination};
use log::LevelFilter;

use super::cli::Cli;
use super::effects::EffectRunner;
use super::input::{parse_command, Command};
use super::ui::constants::{HELP, PROMPT};
use super::ui::render::{render, topic_list, RenderOptions};

pub enum AppEvent {
    /// Message for the core state machine.
    Core(Msg),
    /// Line typed at the prompt.
    Line(String),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let destination = if cli.log_terminal {
        LogDestination::Both(cli.log_file.clone())
    } else {
        LogDestination::File(cli.log_file.clone())
    };
    devnews_logging::initialize(destination, LevelFilter::Info);
    news_info!("Using proxy {}", cli.proxy_url);

    let fetcher = ReqwestFetcher::new(FetchSettings::default())?;
    let client = ProxyClient::new(cli.proxy_url.clone(), Arc::new(fetcher));
    let engine = EngineHandle::new(client).context("starting search engine")?;

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let mut app = App {
        state: AppState::with_recency(cli.recency()),
        effects: EffectRunner::new(engine, event_tx.clone()),
        render: RenderOptions {
            color: !cli.no_color,
        },
        interactive: cli.interactive,
        out: io::stdout(),
    };

    if let Some(topic) = cli.topic {
        app.seed(Msg::TopicSelected(topic.value.to_string()));
    }
    app.seed(Msg::KeywordChanged(cli.keyword.clone()));
    app.seed(Msg::RecentOnlyToggled(cli.recent));

    if cli.interactive {
        spawn_stdin_reader(event_tx)?;
        app.print(HELP)?;
        app.dispatch(Msg::SearchSubmitted { now: Utc::now() })?;
        run_interactive(app, event_rx)
    } else {
        drop(event_tx);
        app.dispatch(Msg::SearchSubmitted { now: Utc::now() })?;
        run_once(app, event_rx)
    }
}

fn run_once(mut app: App, events: mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
    while app.state.phase() == SearchPhase::Loading {
        match events.recv() {
            Ok(AppEvent::Core(msg)) => {
                app.dispatch(msg)?;
            }
            Ok(_) => {}
            Err(_) => bail!("search engine stopped before answering"),
        }
    }
    Ok(())
}

fn run_interactive(mut app: App, events: mpsc::Receiver<AppEvent>) -> anyhow::Result<()> {
    while let Ok(event) = events.recv() {
        match event {
            AppEvent::Core(msg) => {
                app.dispatch(msg)?;
            }
            AppEvent::Line(line) => match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => app.apply(command)?,
                Err(message) => {
                    app.print(&message)?;
                    app.prompt()?;
                }
            },
            AppEvent::InputClosed => break,
        }
    }
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("devnews-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if event_tx.send(AppEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = event_tx.send(AppEvent::InputClosed);
        })?;
    Ok(())
}

struct App {
    state: AppState,
    effects: EffectRunner,
    render: RenderOptions,
    interactive: bool,
    out: io::Stdout,
}

impl App {
    /// Apply a message without rendering.
    fn seed(&mut self, msg: Msg) {
        let (mut state, effects) = update(std::mem::take(&mut self.state), msg);
        state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);
    }

    /// Apply a message and render when the view changed. Returns whether it rendered.
    fn dispatch(&mut self, msg: Msg) -> io::Result<bool> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        let view = state.view();
        let mut state = state;
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.effects.enqueue(effects);

        // The one-shot mode only prints the outcome.
        let finished = matches!(self.state.phase(), SearchPhase::Success | SearchPhase::Error);
        if !was_dirty || !(self.interactive || finished) {
            return Ok(false);
        }
        self.present(&render(&view, self.render))?;
        Ok(true)
    }

    fn apply(&mut self, command: Command<'_>) -> io::Result<()> {
        let msg = match command {
            Command::Topic(topic) => Msg::TopicSelected(topic.value.to_string()),
            Command::Keyword(keyword) => Msg::KeywordChanged(keyword.to_string()),
            Command::Recent(on) => Msg::RecentOnlyToggled(on),
            Command::Search => Msg::SearchSubmitted { now: Utc::now() },
            Command::Topics => {
                self.print(&topic_list())?;
                return self.prompt();
            }
            Command::Help => {
                self.print(HELP)?;
                return self.prompt();
            }
            Command::Quit => return Ok(()),
        };
        if !self.dispatch(msg)? {
            self.prompt()?;
        }
        Ok(())
    }

    fn present(&mut self, screen: &str) -> io::Result<()> {
        writeln!(self.out, "{screen}")?;
        if self.interactive {
            write!(self.out, "{PROMPT}")?;
        }
        self.out.flush()
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.out, "{PROMPT}")?;
        self.out.flush()
    }
}
