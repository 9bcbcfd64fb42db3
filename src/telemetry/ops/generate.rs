use tracing::{info_span, Span};

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Generate;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    LoadInput,
    Validate,
    BuildForm,
    Send,
    Render,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::LoadInput => "load_input",
            Phase::Validate => "validate",
            Phase::BuildForm => "build_form",
            Phase::Send => "send",
            Phase::Render => "render",
        }
    }

    fn span(&self) -> Span {
        match self {
            Phase::LoadInput => info_span!("load_input"),
            Phase::Validate => info_span!("validate"),
            Phase::BuildForm => info_span!("build_form"),
            Phase::Send => info_span!("send"),
            Phase::Render => info_span!("render"),
        }
    }
}

impl OpMarker for Generate {
    const NAME: &'static str = "generate";
    type Phase = Phase;

    fn root_span() -> Span {
        info_span!("generate")
    }
}
