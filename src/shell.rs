use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{ContentApi, ContentClient};
use crate::config::ClientConfig;
use crate::input::{GuidedAnswers, ImageFile, InputMode, InputSelection, Objective, Tone};
use crate::output::Emitter;
use crate::render::{Clipboard, Osc52Clipboard, View};
use crate::session::{Session, SubmitOutcome, ViewState};
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::shell::{Phase as ShellPhase, Shell as ShellOp};

/// cma shell — interactive input/results loop
#[derive(Args, Debug)]
pub struct ShellCmd {}

const HELP: &str = "\
commands:
  mode text|url|image|guided   switch input (clears the draft)
  text <topic>                 set text input
  url <url>                    set URL input
  image <path>                 set image input
  niche <text> | objective <o> | tone <t>   fill the guided form
  submit                       send the request
  next | prev | slide <n>      move through generated posts
  copy                         copy the shown image description
  new                          back to an empty input
  show | help | quit";

const LOCKED: &str = "input is locked; use `new` first";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Mode(InputMode),
    Text(String),
    Url(String),
    Image(PathBuf),
    Niche(String),
    Objective(Objective),
    Tone(Tone),
    Submit,
    Next,
    Prev,
    Slide(usize),
    Copy,
    New,
    Show,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let cmd = match head.to_ascii_lowercase().as_str() {
        "mode" => ShellCommand::Mode(rest.parse()?),
        "text" => ShellCommand::Text(rest.to_string()),
        "url" => ShellCommand::Url(rest.to_string()),
        "image" => {
            if rest.is_empty() {
                return Err("usage: image <path>".into());
            }
            ShellCommand::Image(PathBuf::from(rest))
        }
        "niche" => ShellCommand::Niche(rest.to_string()),
        "objective" => ShellCommand::Objective(rest.parse()?),
        "tone" => ShellCommand::Tone(rest.parse()?),
        "submit" | "go" => ShellCommand::Submit,
        "next" => ShellCommand::Next,
        "prev" => ShellCommand::Prev,
        "slide" => {
            let n: usize = rest.parse().map_err(|_| format!("not a post number: {rest}"))?;
            if n == 0 {
                return Err("posts are numbered from 1".into());
            }
            ShellCommand::Slide(n)
        }
        "copy" => ShellCommand::Copy,
        "new" | "reset" | "retry" => ShellCommand::New,
        "show" => ShellCommand::Show,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

/// Where the shell shows views and short notes.
pub trait Screen {
    fn view(&mut self, view: &View) -> io::Result<()>;
    fn note(&mut self, msg: &str) -> io::Result<()>;
}

struct TermScreen<'a> {
    out: &'a Emitter,
}

impl Screen for TermScreen<'_> {
    fn view(&mut self, view: &View) -> io::Result<()> {
        self.out.result("shell", view, None)
    }

    fn note(&mut self, msg: &str) -> io::Result<()> {
        writeln!(io::stderr(), "{msg}")
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run(cfg: &ClientConfig, out: &Emitter, _args: ShellCmd) -> Result<()> {
    let log = telemetry::shell();
    let _g = log.root_span_kv([("base_url", cfg.base_url.clone())]).entered();

    let client = ContentClient::new(cfg.clone()).context("init content client")?;
    let session = Session::new(client);
    let mut screen = TermScreen { out };
    let clipboard = Osc52Clipboard;
    let interactive = !telemetry::config::json_mode();

    if interactive {
        screen.note(HELP)?;
    }
    screen.view(&session.render(Instant::now()))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            let mut err = io::stderr();
            write!(err, "cma> ")?;
            err.flush()?;
        }
        let line = {
            let _s = log.span(&ShellPhase::Read).entered();
            lines.next_line().await.context("read command")?
        };
        let Some(line) = line else { break };

        let cmd = match parse_command(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                screen.note(&msg)?;
                continue;
            }
        };
        let _s = log.span_kv(&ShellPhase::Dispatch, [("cmd", format!("{cmd:?}"))]).entered();
        if dispatch(&session, cmd, &clipboard, &mut screen, &log).await? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

pub async fn dispatch<A: ContentApi>(
    session: &Session<A>,
    cmd: ShellCommand,
    clipboard: &dyn Clipboard,
    screen: &mut dyn Screen,
    log: &LogCtx<ShellOp>,
) -> Result<Flow> {
    match cmd {
        ShellCommand::Mode(mode) => {
            if session.select_mode(mode) {
                screen.view(&session.render(Instant::now()))?;
            } else {
                screen.note(LOCKED)?;
            }
        }
        ShellCommand::Text(text) => edit(session, screen, |d| *d = InputSelection::Text(text))?,
        ShellCommand::Url(url) => edit(session, screen, |d| *d = InputSelection::Url(url))?,
        ShellCommand::Image(path) => match ImageFile::load(&path).await {
            Ok(file) => edit(session, screen, |d| *d = InputSelection::Image(Some(file)))?,
            Err(e) => screen.note(&e.to_string())?,
        },
        ShellCommand::Niche(niche) => edit(session, screen, |d| guided(d).niche = niche)?,
        ShellCommand::Objective(o) => edit(session, screen, |d| guided(d).objective = Some(o))?,
        ShellCommand::Tone(t) => edit(session, screen, |d| guided(d).tone = Some(t))?,
        ShellCommand::Submit => submit(session, screen, log).await?,
        ShellCommand::Next => slide(session, screen, |s| s.next_slide(), "no next post")?,
        ShellCommand::Prev => slide(session, screen, |s| s.prev_slide(), "no previous post")?,
        ShellCommand::Slide(n) => slide(session, screen, |s| s.go_to_slide(n - 1) || active_slide(s) == Some(n - 1), "no such post")?,
        ShellCommand::Copy => match session.copy_active_description(clipboard, Instant::now()) {
            Ok(true) => screen.view(&session.render(Instant::now()))?,
            Ok(false) => screen.note("nothing to copy")?,
            Err(e) => screen.note(&format!("clipboard write failed: {e}"))?,
        },
        ShellCommand::New => {
            if session.is_in_progress() {
                log.info("request still running; its reply will be ignored");
            }
            session.reset();
            screen.view(&session.render(Instant::now()))?;
        }
        ShellCommand::Show => screen.view(&session.render(Instant::now()))?,
        ShellCommand::Help => screen.note(HELP)?,
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Guided answers of the draft, switching to guided mode if needed.
fn guided(draft: &mut InputSelection) -> &mut GuidedAnswers {
    if !matches!(draft, InputSelection::Guided(_)) {
        *draft = InputSelection::empty(InputMode::Guided);
    }
    match draft {
        InputSelection::Guided(g) => g,
        _ => unreachable!("draft was just set to guided"),
    }
}

fn edit<A: ContentApi>(session: &Session<A>, screen: &mut dyn Screen, f: impl FnOnce(&mut InputSelection)) -> io::Result<()> {
    if session.edit_draft(f) {
        screen.view(&session.render(Instant::now()))
    } else {
        screen.note(LOCKED)
    }
}

fn active_slide<A: ContentApi>(session: &Session<A>) -> Option<usize> {
    match session.render(Instant::now()) {
        View::Results(r) => Some(r.active_slide),
        _ => None,
    }
}

fn slide<A: ContentApi>(session: &Session<A>, screen: &mut dyn Screen, f: impl FnOnce(&Session<A>) -> bool, miss: &str) -> io::Result<()> {
    if f(session) {
        screen.view(&session.render(Instant::now()))
    } else {
        screen.note(miss)
    }
}

async fn submit<A: ContentApi>(session: &Session<A>, screen: &mut dyn Screen, log: &LogCtx<ShellOp>) -> io::Result<()> {
    let _s = log.span(&ShellPhase::Submit).entered();
    // show the loading view while the request is out
    let loading = async {
        while !session.is_in_progress() && matches!(session.view_state(), ViewState::Input) {
            tokio::task::yield_now().await;
        }
        session.is_in_progress().then(|| session.render(Instant::now()))
    };
    let (outcome, loading_view) = tokio::join!(session.submit(), loading);
    if let Some(view) = loading_view {
        screen.view(&view)?;
    }
    match outcome {
        SubmitOutcome::Ignored => screen.note("a request is already running or the input is not open"),
        SubmitOutcome::Stale => screen.note("reply arrived after reset; ignored"),
        SubmitOutcome::Rejected | SubmitOutcome::Applied => screen.view(&session.render(Instant::now())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tokio::sync::Notify;

    use crate::api::mock::MockClient;
    use crate::api::{GeneratedContent, Post, VisualPrompt};
    use crate::render::clipboard::MemoryClipboard;

    #[derive(Default)]
    struct Recorder {
        views: Vec<View>,
        notes: Vec<String>,
    }

    impl Screen for Recorder {
        fn view(&mut self, view: &View) -> io::Result<()> {
            self.views.push(view.clone());
            Ok(())
        }
        fn note(&mut self, msg: &str) -> io::Result<()> {
            self.notes.push(msg.to_string());
            Ok(())
        }
    }

    fn content() -> GeneratedContent {
        let post = Post { hook: "H".into(), body: "B".into(), cta: "C".into(), hashtags: vec![] };
        GeneratedContent {
            context_summary: "S".into(),
            ideas: vec![],
            posts: vec![post.clone(), post],
            visual_prompts: vec![VisualPrompt { description: "V1".into(), image_url: None }],
        }
    }

    async fn run_lines(session: &Session<MockClient>, lines: &[&str], clip: &MemoryClipboard) -> Recorder {
        let mut rec = Recorder::default();
        let log = telemetry::shell();
        for line in lines {
            match parse_command(line) {
                Ok(Some(cmd)) => {
                    if dispatch(session, cmd, clip, &mut rec, &log).await.unwrap() == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(msg) => rec.notes.push(msg),
            }
        }
        rec
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("  ").unwrap(), None);
        assert_eq!(parse_command("mode Guided").unwrap(), Some(ShellCommand::Mode(InputMode::Guided)));
        assert_eq!(parse_command("text  vegan  recipes ").unwrap(), Some(ShellCommand::Text("vegan  recipes".into())));
        assert_eq!(parse_command("objective sell").unwrap(), Some(ShellCommand::Objective(Objective::Sell)));
        assert_eq!(parse_command("slide 2").unwrap(), Some(ShellCommand::Slide(2)));
        assert_eq!(parse_command("retry").unwrap(), Some(ShellCommand::New));
        assert!(parse_command("slide 0").is_err());
        assert!(parse_command("tone grumpy").is_err());
        assert!(parse_command("image").is_err());
        assert!(parse_command("dance").unwrap_err().contains("unknown command"));
    }

    #[tokio::test]
    async fn guided_flow_submits_and_navigates() {
        let session = Session::new(MockClient::new());
        session.api().push_response(Ok(content()));
        let clip = MemoryClipboard::default();

        let rec = run_lines(
            &session,
            &["niche home baking", "objective inspire", "tone fun", "submit", "copy", "next", "copy", "next", "quit", "new"],
            &clip,
        )
        .await;

        let calls = session.api().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].input_type, InputMode::Guided);
        assert_eq!(clip.contents().as_deref(), Some("V1"));
        assert!(rec.notes.contains(&"nothing to copy".to_string()));
        assert!(rec.notes.contains(&"no next post".to_string()));
        // `quit` stops before `new`
        assert!(matches!(session.view_state(), ViewState::Results(_)));
    }

    #[tokio::test]
    async fn invalid_input_shows_error_then_new_clears() {
        let session = Session::new(MockClient::new());
        let clip = MemoryClipboard::default();

        let rec = run_lines(&session, &["url not-a-url", "submit", "text locked?", "new"], &clip).await;

        assert!(session.api().calls().is_empty());
        assert!(rec.views.iter().any(|v| matches!(v, View::Error(e) if e.message == "Please enter a valid URL.")));
        assert!(rec.notes.contains(&LOCKED.to_string()));
        assert!(!rec.views.iter().any(|v| matches!(v, View::Loading(_))));
        assert_eq!(session.view_state(), ViewState::Input);
        assert_eq!(session.draft(), InputSelection::default());
    }

    #[tokio::test]
    async fn submit_shows_loading_while_request_is_out() {
        let gate = Arc::new(Notify::new());
        let session = Session::new(MockClient::gated(gate.clone()));
        session.api().push_response(Ok(content()));
        session.set_draft(InputSelection::Text("coffee".into()));
        let mut rec = Recorder::default();
        let log = telemetry::shell();
        let clip = MemoryClipboard::default();

        let release = async {
            while session.api().calls().is_empty() {
                tokio::task::yield_now().await;
            }
            gate.notify_one();
        };
        let (flow, _) = tokio::join!(dispatch(&session, ShellCommand::Submit, &clip, &mut rec, &log), release);

        assert_eq!(flow.unwrap(), Flow::Continue);
        assert!(matches!(rec.views[0], View::Loading(_)));
        assert!(matches!(rec.views[1], View::Results(_)));
    }

    #[tokio::test]
    async fn mode_switch_discards_draft() {
        let session = Session::new(MockClient::new());
        let clip = MemoryClipboard::default();
        run_lines(&session, &["text hello", "mode url"], &clip).await;
        assert_eq!(session.draft(), InputSelection::Url(String::new()));
    }
}
