//! The dispatch loop: raw line in, reply out. Owns the model, the
//! collaborators and the command log; one command runs to completion before
//! the next is accepted.

use chrono::{DateTime, Local};

use crate::commands::Command;
use crate::db::Storage;
use crate::model::{Context, Model};
use crate::parser;
use crate::remote::Remote;
use crate::ui::Renderer;

/// What one dispatched line produced. `exit` is the out-of-band request to
/// stop reading input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub message: String,
    pub is_error: bool,
    pub exit: bool,
}

impl Reply {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
            exit: false,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
            exit: false,
        }
    }
}

#[derive(Clone, Debug)]
struct LogLine {
    at: DateTime<Local>,
    input: String,
    ok: bool,
}

pub struct Engine {
    pub model: Model,
    remote: Box<dyn Remote>,
    storage: Box<dyn Storage>,
    renderer: Box<dyn Renderer>,
    log: Vec<LogLine>,
}

impl Engine {
    pub fn new(
        model: Model,
        remote: Box<dyn Remote>,
        storage: Box<dyn Storage>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        Self {
            model,
            remote,
            storage,
            renderer,
            log: Vec::new(),
        }
    }

    /// Parse and run one line. Never panics and never leaves the engine
    /// unresponsive; every failure comes back as an error reply.
    pub fn dispatch(&mut self, line: &str) -> Reply {
        let input = line.trim();
        if input.is_empty() {
            return Reply::ok("");
        }
        let reply = self.run(input);
        self.log.push(LogLine {
            at: Local::now(),
            input: input.to_owned(),
            ok: !reply.is_error,
        });
        reply
    }

    fn run(&mut self, input: &str) -> Reply {
        let command = match parser::parse(self.model.context, input) {
            Ok(command) => command,
            Err(err) => return Reply::error(err.to_string()),
        };
        match command {
            Command::Exit => Reply {
                message: "bye".to_owned(),
                is_error: false,
                exit: true,
            },
            Command::History => Reply::ok(self.command_log()),
            command => {
                match command.execute(&mut self.model, self.remote.as_ref(), self.renderer.as_mut())
                {
                    Ok(outcome) => {
                        for context in &outcome.persist {
                            self.persist(*context);
                        }
                        Reply::ok(outcome.message)
                    }
                    Err(err) => Reply::error(err.to_string()),
                }
            }
        }
    }

    fn persist(&self, context: Context) {
        // search results are ephemeral
        if context == Context::Search {
            return;
        }
        if let Err(err) = self
            .storage
            .persist(context.store_name(), self.model.store(context))
        {
            tracing::error!("failed to persist {context}: {err}");
        }
    }

    fn command_log(&self) -> String {
        if self.log.is_empty() {
            return "no commands yet".to_owned();
        }
        let mut out = String::new();
        for line in &self.log {
            out.push_str(&format!(
                "{}  {}  {}\n",
                line.at.format("%Y-%m-%d %H:%M:%S"),
                if line.ok { "ok " } else { "err" },
                line.input
            ));
        }
        out.trim_end().to_owned()
    }
}
