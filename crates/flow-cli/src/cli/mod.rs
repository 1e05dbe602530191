mod args;
mod commands;
mod dispatch;


pub use commands::build_cli;
pub use dispatch::{AstParams, CheckParams, InferParams};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// `Auto` colors only when stderr, where diagnostics go, is a terminal.
    pub fn should_colorize(self) -> bool {
        use std::io::IsTerminal;

        self == Self::Always || (self == Self::Auto && std::io::stderr().is_terminal())
    }
}

/// How `infer` prints contexts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
