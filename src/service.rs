use anyhow::{Context, Result};
use clap::Args;

use crate::api::ContentClient;
use crate::config::ClientConfig;
use crate::output::Emitter;
use crate::telemetry::{self};
use crate::telemetry::ops::service::Phase as ServicePhase;

/// cma questions — guided questionnaire published by the service
#[derive(Args, Debug)]
pub struct QuestionsCmd {}

/// cma health — service liveness message
#[derive(Args, Debug)]
pub struct HealthCmd {}

pub async fn questions(cfg: &ClientConfig, out: &Emitter, _args: QuestionsCmd) -> Result<()> {
    let log = telemetry::service();
    let _g = log.root_span_kv([("endpoint", cfg.guided_questions_url())]).entered();

    let client = ContentClient::new(cfg.clone()).context("init content client")?;
    let questions = {
        let _s = log.span(&ServicePhase::Fetch).entered();
        client.guided_questions().await.context("fetch guided questions")?
    };
    log.info(format!("❓ {} guided questions", questions.questions.len()));

    let _s = log.span(&ServicePhase::Output).entered();
    out.result("questions", &questions, None)?;
    Ok(())
}

pub async fn health(cfg: &ClientConfig, out: &Emitter, _args: HealthCmd) -> Result<()> {
    let log = telemetry::service();
    let _g = log.root_span_kv([("endpoint", cfg.health_url())]).entered();

    let client = ContentClient::new(cfg.clone()).context("init content client")?;
    let status = {
        let _s = log.span(&ServicePhase::Fetch).entered();
        client.health().await.context("reach generation service")?
    };

    let _s = log.span(&ServicePhase::Output).entered();
    out.result("health", &status, None)?;
    Ok(())
}
