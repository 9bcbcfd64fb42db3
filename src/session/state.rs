use crate::api::GeneratedContent;

/// The four mutually exclusive views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Input,
    Loading,
    Results(GeneratedContent),
    Error(String),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Input => "input",
            ViewState::Loading => "loading",
            ViewState::Results(_) => "results",
            ViewState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Validated input went out on the wire.
    Submitted,
    /// Input failed local validation.
    Rejected(String),
    Succeeded(GeneratedContent),
    Failed(String),
    Reset,
}

/// Pure transition function. Pairs not listed leave the state untouched.
pub fn transition(state: ViewState, event: Event) -> ViewState {
    match (state, event) {
        (ViewState::Input, Event::Submitted) => ViewState::Loading,
        (ViewState::Input, Event::Rejected(msg)) => ViewState::Error(msg),
        (ViewState::Loading, Event::Succeeded(content)) => ViewState::Results(content),
        (ViewState::Loading, Event::Failed(msg)) => ViewState::Error(msg),
        (ViewState::Loading | ViewState::Results(_) | ViewState::Error(_), Event::Reset) => ViewState::Input,
        (state, _) => state,
    }
}
