use std::io;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::api::ContentApi;
use crate::error::UNEXPECTED_ERROR_FALLBACK;
use crate::input::{validate, InputMode, InputSelection};
use crate::render::{self, Carousel, Clipboard, View};
use crate::request::build_request;

mod state;

pub use state::{transition, Event, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not in the input view, or a request is already in flight.
    Ignored,
    /// Input failed validation; nothing was sent.
    Rejected,
    /// The response (or failure) was applied to the view.
    Applied,
    /// The response arrived after a reset and was dropped.
    Stale,
}

struct Inner {
    view: ViewState,
    draft: InputSelection,
    in_progress: bool,
    /// Tag of the latest submission; bumped on reset so late replies miss.
    seq: u64,
    carousel: Carousel,
}

impl Inner {
    fn apply(&mut self, event: Event) {
        let view = std::mem::take(&mut self.view);
        self.view = transition(view, event);
    }
}

/// Owns the single `ViewState` and the draft input, and runs submissions
/// against a `ContentApi`. At most one request is in flight at a time.
pub struct Session<A> {
    api: A,
    inner: Mutex<Inner>,
}

impl<A: ContentApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            inner: Mutex::new(Inner {
                view: ViewState::Input,
                draft: InputSelection::default(),
                in_progress: false,
                seq: 0,
                carousel: Carousel::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view_state(&self) -> ViewState {
        self.lock().view.clone()
    }

    pub fn draft(&self) -> InputSelection {
        self.lock().draft.clone()
    }

    pub fn is_in_progress(&self) -> bool {
        self.lock().in_progress
    }

    /// Switch input tab. The previous draft is discarded.
    pub fn select_mode(&self, mode: InputMode) -> bool {
        self.edit_draft(|draft| *draft = InputSelection::empty(mode))
    }

    pub fn set_draft(&self, selection: InputSelection) -> bool {
        self.edit_draft(|draft| *draft = selection)
    }

    /// Edit the draft in place; only allowed in the input view.
    pub fn edit_draft(&self, f: impl FnOnce(&mut InputSelection)) -> bool {
        let mut inner = self.lock();
        if !matches!(inner.view, ViewState::Input) {
            return false;
        }
        f(&mut inner.draft);
        true
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let (seq, request) = {
            let mut inner = self.lock();
            if inner.in_progress || !matches!(inner.view, ViewState::Input) {
                debug!(view = inner.view.name(), in_progress = inner.in_progress, "submit ignored");
                return SubmitOutcome::Ignored;
            }
            if let Err(err) = validate(&inner.draft) {
                info!(mode = %inner.draft.mode(), reason = %err, "input rejected");
                inner.apply(Event::Rejected(err.to_string()));
                return SubmitOutcome::Rejected;
            }
            let Some(request) = build_request(&inner.draft) else {
                inner.apply(Event::Rejected(UNEXPECTED_ERROR_FALLBACK.to_string()));
                return SubmitOutcome::Rejected;
            };
            inner.seq += 1;
            inner.in_progress = true;
            inner.apply(Event::Submitted);
            (inner.seq, request)
        };

        let result = self.api.generate(request).await;

        let mut inner = self.lock();
        inner.in_progress = false;
        if inner.seq != seq || !matches!(inner.view, ViewState::Loading) {
            info!(seq, latest = inner.seq, "discarding stale response");
            return SubmitOutcome::Stale;
        }
        match result {
            Ok(content) => {
                if content.posts.len() != content.visual_prompts.len() {
                    warn!(
                        posts = content.posts.len(),
                        visual_prompts = content.visual_prompts.len(),
                        "posts and visual prompts differ in length; unpaired posts show a placeholder"
                    );
                }
                inner.carousel = Carousel::new(content.posts.len());
                inner.apply(Event::Succeeded(content));
            }
            Err(err) => {
                warn!(error = %err, "generation failed");
                inner.apply(Event::Failed(err.user_message()));
            }
        }
        SubmitOutcome::Applied
    }

    /// Back to an empty input view. A request still in flight keeps the
    /// in-progress guard until it resolves, and its reply is discarded.
    pub fn reset(&self) -> bool {
        let mut inner = self.lock();
        if matches!(inner.view, ViewState::Input) {
            return false;
        }
        inner.seq += 1;
        inner.apply(Event::Reset);
        inner.draft = InputSelection::default();
        inner.carousel = Carousel::default();
        true
    }

    pub fn next_slide(&self) -> bool {
        self.with_results_carousel(|c| c.next())
    }

    pub fn prev_slide(&self) -> bool {
        self.with_results_carousel(|c| c.prev())
    }

    pub fn go_to_slide(&self, index: usize) -> bool {
        self.with_results_carousel(|c| c.go_to(index))
    }

    fn with_results_carousel(&self, f: impl FnOnce(&mut Carousel) -> bool) -> bool {
        let mut inner = self.lock();
        if !matches!(inner.view, ViewState::Results(_)) {
            return false;
        }
        f(&mut inner.carousel)
    }

    pub fn copy_active_description(&self, clipboard: &dyn Clipboard, now: Instant) -> io::Result<bool> {
        let mut inner = self.lock();
        let Inner { view, carousel, .. } = &mut *inner;
        match view {
            ViewState::Results(content) => carousel.copy_active(content, clipboard, now),
            _ => Ok(false),
        }
    }

    pub fn render(&self, now: Instant) -> View {
        let inner = self.lock();
        render::render(&inner.view, &inner.draft, inner.in_progress, &inner.carousel, now)
    }
}
