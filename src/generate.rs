use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::api::{ContentApi, ContentClient};
use crate::config::ClientConfig;
use crate::input::{validate, GuidedAnswers, ImageFile, InputSelection, Objective, Tone};
use crate::output::types::Meta;
use crate::output::{Emitter, TextBlock};
use crate::render::{Clipboard, ErrorView, Osc52Clipboard, View, ERROR_TITLE};
use crate::request::{build_request, FieldValue};
use crate::session::{Session, SubmitOutcome};
use crate::telemetry::{self};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::generate::{Generate as GenerateOp, Phase as GeneratePhase};

/// cma generate text|url|image|guided
#[derive(Args, Debug)]
pub struct GenerateCmd {
    #[command(subcommand)]
    pub input: GenerateInput,
    /// Validate and show the request without sending it
    #[arg(long, global = true, default_value_t = false)]
    pub dry_run: bool,
    /// Post number (1-based) whose image description is shown
    #[arg(long, global = true, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub slide: Option<usize>,
    /// Copy the shown image description to the terminal clipboard (OSC 52)
    #[arg(long, global = true, default_value_t = false)]
    pub copy: bool,
}

#[derive(Subcommand, Debug)]
pub enum GenerateInput {
    /// Free text topic or context
    Text { text: String },
    /// Profile or website URL to take the style from
    Url { url: String },
    /// Image file to analyze
    Image { path: PathBuf },
    /// Guided form
    Guided {
        #[arg(long, default_value = "")]
        niche: String,
        #[arg(long, value_enum)]
        objective: Option<Objective>,
        #[arg(long, value_enum)]
        tone: Option<Tone>,
    },
}

#[derive(Serialize)]
pub struct GeneratePlan {
    pub endpoint: String,
    pub input_type: String,
    pub fields: Vec<PlanField>,
}

#[derive(Serialize)]
pub struct PlanField {
    pub name: &'static str,
    pub value: String,
}

impl TextBlock for GeneratePlan {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "POST {}", self.endpoint)?;
        for f in &self.fields {
            writeln!(w, "  {}={}", f.name, f.value)?;
        }
        Ok(())
    }
}

/// Display options applied to the results view after the request completes.
#[derive(Debug, Default)]
struct ViewOpts {
    slide: Option<usize>,
    copy: bool,
}

pub async fn run(cfg: &ClientConfig, out: &Emitter, args: GenerateCmd) -> Result<()> {
    let log = telemetry::generate();
    let _g = log
        .root_span_kv([
            ("base_url", cfg.base_url.clone()),
            ("dry_run", args.dry_run.to_string()),
            ("slide", format!("{:?}", args.slide)),
            ("copy", args.copy.to_string()),
            ("json", telemetry::config::json_mode().to_string()),
        ])
        .entered();
    let t0 = Instant::now();

    let selection = {
        let _s = log.span(&GeneratePhase::LoadInput).entered();
        load_selection(args.input).await?
    };

    if args.dry_run {
        return dry_run(cfg, out, &log, &selection);
    }

    let client = ContentClient::new(cfg.clone()).context("init content client")?;
    let session = Session::new(client);
    session.set_draft(selection);

    let opts = ViewOpts { slide: args.slide, copy: args.copy };
    let view = execute(&session, &opts, &Osc52Clipboard, &log).await;

    let elapsed = t0.elapsed().as_millis() as u64;
    out.result("generate", &view, Some(Meta { duration_ms: Some(elapsed as u128) }))?;
    log.outcome(view_name(&view), elapsed);

    if let View::Error(e) = &view {
        bail!("generation failed: {}", e.message);
    }
    Ok(())
}

async fn load_selection(input: GenerateInput) -> Result<InputSelection> {
    Ok(match input {
        GenerateInput::Text { text } => InputSelection::Text(text),
        GenerateInput::Url { url } => InputSelection::Url(url),
        GenerateInput::Image { path } => {
            let file = ImageFile::load(&path).await.context("load image")?;
            InputSelection::Image(Some(file))
        }
        GenerateInput::Guided { niche, objective, tone } => InputSelection::Guided(GuidedAnswers { niche, objective, tone }),
    })
}

fn dry_run(cfg: &ClientConfig, out: &Emitter, log: &LogCtx<GenerateOp>, selection: &InputSelection) -> Result<()> {
    {
        let _s = log.span(&GeneratePhase::Validate).entered();
        if let Err(err) = validate(selection) {
            let view = View::Error(ErrorView { title: ERROR_TITLE.to_string(), message: err.to_string() });
            out.result("generate", &view, None)?;
            bail!("invalid input: {err}");
        }
    }
    let _s = log.span(&GeneratePhase::BuildForm).entered();
    let plan = plan_for(cfg, selection).context("build request")?;
    log.info("📝 Dry run — request not sent");
    out.plan("generate", &plan)?;
    Ok(())
}

fn plan_for(cfg: &ClientConfig, selection: &InputSelection) -> Option<GeneratePlan> {
    let request = build_request(selection)?;
    let fields = request
        .fields()
        .into_iter()
        .map(|(name, value)| PlanField {
            name,
            value: match value {
                FieldValue::Text(s) => s,
                FieldValue::File { filename, media_type, bytes } => format!("@{filename} ({media_type}, {} bytes)", bytes.len()),
            },
        })
        .collect();
    Some(GeneratePlan {
        endpoint: cfg.generate_content_url(),
        input_type: request.input_type.to_string(),
        fields,
    })
}

async fn execute<A: ContentApi>(session: &Session<A>, opts: &ViewOpts, clipboard: &dyn Clipboard, log: &LogCtx<GenerateOp>) -> View {
    let outcome = {
        let _s = log.span_kv(&GeneratePhase::Send, [("mode", session.draft().mode().to_string())]).entered();
        session.submit().await
    };
    if outcome != SubmitOutcome::Applied && outcome != SubmitOutcome::Rejected {
        log.warn(format!("unexpected submit outcome: {outcome:?}"));
    }

    let _s = log.span(&GeneratePhase::Render).entered();
    if let Some(n) = opts.slide {
        let index = n.saturating_sub(1);
        if n == 0 || (index != 0 && !session.go_to_slide(index)) {
            log.warn(format!("no post {n}; showing post 1"));
        }
    }
    if opts.copy {
        match session.copy_active_description(clipboard, Instant::now()) {
            Ok(true) => log.info("📋 Image description copied"),
            Ok(false) => log.warn("No image description to copy"),
            Err(e) => log.warn(format!("clipboard write failed: {e}")),
        }
    }
    session.render(Instant::now())
}

fn view_name(view: &View) -> &'static str {
    match view {
        View::Input(_) => "input",
        View::Loading(_) => "loading",
        View::Results(_) => "results",
        View::Error(_) => "error",
    }
}
