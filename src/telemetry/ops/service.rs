use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Service;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Output }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Output => "output",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Output => info_span!("output"),
    }}
}

impl OpMarker for Service {
    const NAME: &'static str = "service";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("service") }
}
