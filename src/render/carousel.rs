use std::io;
use std::time::{Duration, Instant};

use crate::api::GeneratedContent;

use super::clipboard::Clipboard;

/// How long the "copied" acknowledgment stays up.
pub const COPY_ACK: Duration = Duration::from_secs(2);

/// Post carousel position plus the transient copy acknowledgment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    current: usize,
    copied_at: Option<Instant>,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, current: 0, copied_at: None }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_beginning(&self) -> bool {
        self.current == 0
    }

    pub fn is_end(&self) -> bool {
        self.current + 1 >= self.len
    }

    pub fn next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        if self.is_beginning() {
            return false;
        }
        self.go_to(self.current - 1)
    }

    /// Jump to a slide; changing slide drops any copy acknowledgment.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.current {
            return false;
        }
        self.current = index;
        self.copied_at = None;
        true
    }

    /// `"2 / 3"`, only when there is more than one post.
    pub fn counter(&self) -> Option<String> {
        (self.len > 1).then(|| format!("{} / {}", self.current + 1, self.len))
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .map(|at| now.saturating_duration_since(at) < COPY_ACK)
            .unwrap_or(false)
    }

    /// Copy the active slide's image description. Returns `Ok(false)` when
    /// that slide has no description to copy. Prompts without a post are
    /// never shown, so they are never copied either.
    pub fn copy_active(&mut self, content: &GeneratedContent, clipboard: &dyn Clipboard, now: Instant) -> io::Result<bool> {
        if self.current >= self.len {
            return Ok(false);
        }
        let Some(visual) = content.visual_prompts.get(self.current) else { return Ok(false) };
        if visual.description.is_empty() {
            return Ok(false);
        }
        clipboard.write_text(&visual.description)?;
        self.copied_at = Some(now);
        Ok(true)
    }
}
