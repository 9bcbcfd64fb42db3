use std::io::{self, Write};

use serde::Serialize;

use super::config::{OutputConfig, OutputFormat};
use super::types::{Envelope, Meta};

/// Human-readable form of an emitted value.
pub trait TextBlock {
    fn write_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, text: &dyn TextBlock, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, _text: &dyn TextBlock, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter;
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, text: &dyn TextBlock, w: &mut dyn Write) -> io::Result<()> {
        if !env.apply {
            writeln!(w, "Plan: {}", env.op)?;
        }
        text.write_text(w)
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter),
        };
        Emitter { presenter }
    }

    pub fn plan<T: Serialize + TextBlock>(&self, op: &'static str, plan: &T) -> io::Result<()> {
        let env = Envelope::plan(op, plan, None).map_err(to_io)?;
        self.emit(&env, plan)
    }

    pub fn result<T: Serialize + TextBlock>(&self, op: &'static str, result: &T, meta: Option<Meta>) -> io::Result<()> {
        let env = Envelope::result(op, result, meta).map_err(to_io)?;
        self.emit(&env, result)
    }

    fn emit(&self, env: &Envelope, text: &dyn TextBlock) -> io::Result<()> {
        let mut out = io::stdout();
        self.emit_to(env, text, &mut out)?;
        out.flush()
    }

    pub fn emit_to(&self, env: &Envelope, text: &dyn TextBlock, w: &mut dyn Write) -> io::Result<()> {
        self.presenter.emit(env, text, w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Hello { name: &'static str }

    impl TextBlock for Hello {
        fn write_text(&self, w: &mut dyn Write) -> io::Result<()> {
            writeln!(w, "hello {}", self.name)
        }
    }

    fn emit(format: OutputFormat, apply: bool) -> String {
        let emitter = Emitter::new(OutputConfig { format, pretty: false });
        let value = Hello { name: "world" };
        let env = if apply { Envelope::result("greet", &value, None) } else { Envelope::plan("greet", &value, None) }.unwrap();
        let mut buf = Vec::new();
        emitter.emit_to(&env, &value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_presenter_writes_block() {
        assert_eq!(emit(OutputFormat::Text, true), "hello world\n");
        assert_eq!(emit(OutputFormat::Text, false), "Plan: greet\nhello world\n");
    }

    #[test]
    fn json_presenter_writes_single_line_envelope() {
        let out = emit(OutputFormat::Json, true);
        assert_eq!(out.lines().count(), 1);
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["op"], "greet");
        assert_eq!(v["result"]["name"], "world");
    }
}
