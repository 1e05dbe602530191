//! Loading and analyzing a module, shared by every command.

use std::path::PathBuf;

use flow_lib::{Diagnostics, ModuleAnalyzed, ModuleBuilder, ModuleConfig};

use super::loader::{Input, load_source};

pub struct ModuleArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub color: bool,
    pub config: ModuleConfig,
}

impl ModuleArgs {
    /// Reads the source or exits with a message.
    pub fn load(&self) -> Input {
        load_source(self.source_path.as_deref(), self.source_text.as_deref()).unwrap_or_else(
            |e| {
                eprintln!("error: {}", e);
                std::process::exit(1);
            },
        )
    }

    /// Parses and analyzes `input`, exiting when a fuel limit runs out.
    pub fn analyze<'src>(&self, input: &'src Input) -> ModuleAnalyzed<'src> {
        let parsed = ModuleBuilder::new(&input.text)
            .with_config(self.config.clone())
            .parse()
            .unwrap_or_else(|e| {
                eprintln!("error: {}", e);
                std::process::exit(1);
            });
        let module = parsed.analyze();
        tracing::info!(valid = module.is_valid(), "analysis finished");
        module
    }

    pub fn render(&self, diagnostics: &Diagnostics, input: &Input) -> String {
        let printer = diagnostics
            .filtered_printer(&input.text)
            .colored(self.color);
        match &input.path {
            Some(path) => printer.path(path).render(),
            None => printer.render(),
        }
    }

    /// Prints diagnostics to stderr and exits with status 1.
    pub fn fail(&self, diagnostics: &Diagnostics, input: &Input) -> ! {
        eprint!("{}", self.render(diagnostics, input));
        std::process::exit(1);
    }
}
