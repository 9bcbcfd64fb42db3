use std::io::{self, Write};

use crate::api::{GuidedQuestions, HealthStatus};
use crate::render::{ImageSlot, PostCard, ResultsView, View, NO_POSTS};

use super::presenter::TextBlock;

impl TextBlock for View {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        match self {
            View::Input(v) => {
                writeln!(w, "Mode: {}", v.mode)?;
                if v.draft.is_empty() { writeln!(w, "Draft: (empty)")?; } else { writeln!(w, "Draft: {}", v.draft)?; }
                if v.in_progress { writeln!(w, "A previous request is still running.")?; }
                Ok(())
            }
            View::Loading(v) => writeln!(w, "⏳ {}", v.message),
            View::Error(v) => {
                writeln!(w, "❌ {}", v.title)?;
                writeln!(w, "{}", v.message)
            }
            View::Results(v) => write_results(v, w),
        }
    }
}

fn write_results(v: &ResultsView, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "🎉 Your content is ready!")?;
    writeln!(w)?;
    writeln!(w, "📋 Post Idea")?;
    writeln!(w, "{}", v.summary)?;

    if !v.ideas.is_empty() {
        writeln!(w)?;
        writeln!(w, "💡 Ideas")?;
        for (i, idea) in v.ideas.iter().enumerate() {
            writeln!(w, "  {}. {}", i + 1, idea.title)?;
            writeln!(w, "     {}", idea.description)?;
        }
    }

    writeln!(w)?;
    match &v.counter {
        Some(counter) => writeln!(w, "✍️ Generated Posts ({counter})")?,
        None => writeln!(w, "✍️ Generated Posts")?,
    }
    if v.posts.is_empty() {
        return writeln!(w, "{NO_POSTS}");
    }

    if let Some(active) = &v.active_prompt {
        writeln!(w, "🖼️ Image description for post {}", active.post_number)?;
        writeln!(w, "  {}", active.description)?;
        if active.copied { writeln!(w, "  ✅ Copied!")?; }
    }

    for post in &v.posts {
        writeln!(w)?;
        write_post(post, post.number == v.active_slide + 1, w)?;
    }
    Ok(())
}

fn write_post(post: &PostCard, active: bool, w: &mut dyn Write) -> io::Result<()> {
    let marker = if active { " ◀" } else { "" };
    writeln!(w, "── Post {}{marker}", post.number)?;
    match &post.image {
        ImageSlot::Generated { url } => writeln!(w, "[image] {url}")?,
        ImageSlot::Description { text } => {
            writeln!(w, "[📸 Image not available; use this description to create your image]")?;
            writeln!(w, "  {text}")?;
        }
        ImageSlot::Pending => writeln!(w, "[🎨 Generating image...]")?,
    }
    writeln!(w, "{}", post.hook)?;
    writeln!(w)?;
    writeln!(w, "{}", post.body)?;
    writeln!(w)?;
    writeln!(w, "{}", post.cta)?;
    if !post.hashtags.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", post.hashtags)?;
    }
    Ok(())
}

impl TextBlock for GuidedQuestions {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        for q in &self.questions {
            writeln!(w, "[{}] {} ({})", q.id, q.question, q.kind)?;
            if let Some(p) = &q.placeholder { writeln!(w, "    e.g. {p}")?; }
            if !q.options.is_empty() { writeln!(w, "    options: {}", q.options.join(", "))?; }
        }
        Ok(())
    }
}

impl TextBlock for HealthStatus {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ActivePrompt, ErrorView, IdeaCard};

    fn text(block: &dyn TextBlock) -> String {
        let mut buf = Vec::new();
        block.write_text(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn results(posts: Vec<PostCard>) -> ResultsView {
        ResultsView {
            summary: "S".into(),
            ideas: vec![IdeaCard { title: "T".into(), description: "D".into() }],
            posts,
            active_slide: 0,
            counter: None,
            can_prev: false,
            can_next: false,
            active_prompt: Some(ActivePrompt { post_number: 1, description: "V".into(), copied: true }),
        }
    }

    #[test]
    fn results_text_shows_summary_ideas_and_post() {
        let card = PostCard {
            number: 1,
            hook: "H".into(),
            body: "B".into(),
            cta: "C".into(),
            hashtags: "#x".into(),
            image: ImageSlot::Description { text: "V".into() },
        };
        let out = text(&View::Results(results(vec![card])));
        assert!(out.contains("📋 Post Idea\nS\n"));
        assert!(out.contains("  1. T\n     D\n"));
        assert!(out.contains("── Post 1 ◀\n"));
        assert!(out.contains("H\n\nB\n\nC\n\n#x\n"));
        assert!(out.contains("✅ Copied!"));
    }

    #[test]
    fn empty_posts_show_placeholder() {
        let out = text(&View::Results(results(vec![])));
        assert!(out.contains(NO_POSTS));
    }

    #[test]
    fn error_text_is_verbatim() {
        let out = text(&View::Error(ErrorView { title: "Oops! Something went wrong".into(), message: "quota exceeded".into() }));
        assert_eq!(out, "❌ Oops! Something went wrong\nquota exceeded\n");
    }
}
