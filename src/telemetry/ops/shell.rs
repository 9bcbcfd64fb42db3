use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Shell;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Read, Dispatch, Submit }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Read => "read",
        Phase::Dispatch => "dispatch",
        Phase::Submit => "submit",
    }}
    fn span(&self) -> Span { match self {
        Phase::Read => info_span!("read"),
        Phase::Dispatch => info_span!("dispatch"),
        Phase::Submit => info_span!("submit"),
    }}
}

impl OpMarker for Shell {
    const NAME: &'static str = "shell";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("shell") }
}
