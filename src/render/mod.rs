//! Declarative rendering: view state in, `View` out. Presenters in
//! `crate::output` turn a `View` into text or JSON.

use std::time::Instant;

use serde::Serialize;

use crate::api::{GeneratedContent, Post, VisualPrompt};
use crate::input::{InputMode, InputSelection};
use crate::session::ViewState;

pub mod carousel;
pub mod clipboard;

pub use carousel::Carousel;
pub use clipboard::{Clipboard, Osc52Clipboard};

pub const LOADING_MESSAGE: &str = "Generating amazing content for you...";
pub const ERROR_TITLE: &str = "Oops! Something went wrong";
pub const NO_POSTS: &str = "No posts generated";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Input(InputView),
    Loading(LoadingView),
    Results(ResultsView),
    Error(ErrorView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputView {
    pub mode: InputMode,
    pub draft: String,
    pub in_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingView {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub summary: String,
    pub ideas: Vec<IdeaCard>,
    pub posts: Vec<PostCard>,
    pub active_slide: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<String>,
    pub can_prev: bool,
    pub can_next: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_prompt: Option<ActivePrompt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaCard {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub number: usize,
    pub hook: String,
    pub body: String,
    pub cta: String,
    pub hashtags: String,
    pub image: ImageSlot,
}

/// What fills a post's picture frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSlot {
    Generated { url: String },
    /// No image, but a description the user can work from.
    Description { text: String },
    /// Nothing paired with this post yet.
    Pending,
}

/// Image description of the active slide, with its copy button state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivePrompt {
    pub post_number: usize,
    pub description: String,
    pub copied: bool,
}

pub fn render(state: &ViewState, draft: &InputSelection, in_progress: bool, carousel: &Carousel, now: Instant) -> View {
    match state {
        ViewState::Input => {
            let summary = if draft.is_empty() { String::new() } else { draft.summary() };
            View::Input(InputView { mode: draft.mode(), draft: summary, in_progress })
        }
        ViewState::Loading => View::Loading(LoadingView { message: LOADING_MESSAGE.to_string() }),
        ViewState::Error(message) => View::Error(ErrorView { title: ERROR_TITLE.to_string(), message: message.clone() }),
        ViewState::Results(content) => View::Results(render_results(content, carousel, now)),
    }
}

fn render_results(content: &GeneratedContent, carousel: &Carousel, now: Instant) -> ResultsView {
    let ideas = content
        .ideas
        .iter()
        .map(|i| IdeaCard { title: i.title.clone(), description: i.description.clone() })
        .collect();

    // posts[i] pairs with visual_prompts[i]; a missing prompt renders Pending
    let posts = content
        .posts
        .iter()
        .enumerate()
        .map(|(i, post)| post_card(i, post, content.visual_prompts.get(i)))
        .collect();

    let active = carousel.current();
    let active_prompt = content
        .visual_prompts
        .get(active)
        .filter(|v| !v.description.is_empty() && active < content.posts.len())
        .map(|v| ActivePrompt {
            post_number: active + 1,
            description: v.description.clone(),
            copied: carousel.is_copied(now),
        });

    ResultsView {
        summary: content.context_summary.clone(),
        ideas,
        posts,
        active_slide: active,
        counter: carousel.counter(),
        can_prev: !carousel.is_beginning(),
        can_next: !carousel.is_end(),
        active_prompt,
    }
}

fn post_card(index: usize, post: &Post, visual: Option<&VisualPrompt>) -> PostCard {
    let image = match visual {
        Some(VisualPrompt { image_url: Some(url), .. }) if !url.is_empty() => ImageSlot::Generated { url: url.clone() },
        Some(v) if !v.description.is_empty() => ImageSlot::Description { text: v.description.clone() },
        _ => ImageSlot::Pending,
    };
    PostCard {
        number: index + 1,
        hook: post.hook.clone(),
        body: post.body.clone(),
        cta: post.cta.clone(),
        hashtags: post.hashtags.join(" "),
        image,
    }
}
