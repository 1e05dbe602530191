//! Turns clap matches into the argument structs the commands run on.

use std::path::PathBuf;

use clap::ArgMatches;
use flow_lib::{FailurePolicy, ModuleConfig};

use super::{ColorChoice, OutputFormat};
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::infer::InferArgs;
use crate::commands::run_common::ModuleArgs;

/// Flags shared by every command.
pub struct CommonParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub color: ColorChoice,
    pub fuel: u32,
    pub fail_fast: bool,
}

impl CommonParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            color: match choice(m, "color") {
                "always" => ColorChoice::Always,
                "never" => ColorChoice::Never,
                _ => ColorChoice::Auto,
            },
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
            fail_fast: m.get_flag("fail_fast"),
        }
    }
}

impl From<CommonParams> for ModuleArgs {
    fn from(p: CommonParams) -> Self {
        let failure_policy = match p.fail_fast {
            true => FailurePolicy::StopAtFirst,
            false => FailurePolicy::CollectAll,
        };
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            color: p.color.should_colorize(),
            config: ModuleConfig {
                parse_fuel: p.fuel,
                failure_policy,
                ..ModuleConfig::default()
            },
        }
    }
}

pub struct AstParams {
    pub common: CommonParams,
    pub cst: bool,
    pub raw: bool,
    pub spans: bool,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let raw = m.get_flag("raw");
        Self {
            common: CommonParams::from_matches(m),
            cst: m.get_flag("cst") || raw,
            raw,
            spans: m.get_flag("spans"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            module: p.common.into(),
            cst: p.cst,
            raw: p.raw,
            spans: p.spans,
        }
    }
}

pub struct CheckParams {
    pub common: CommonParams,
    pub strict: bool,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            common: CommonParams::from_matches(m),
            strict: m.get_flag("strict"),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            module: p.common.into(),
            strict: p.strict,
        }
    }
}

pub struct InferParams {
    pub common: CommonParams,
    pub build: Option<String>,
    pub format: OutputFormat,
}

impl InferParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = match choice(m, "format") {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        Self {
            common: CommonParams::from_matches(m),
            build: m.get_one::<String>("build").cloned(),
            format,
        }
    }
}

impl From<InferParams> for InferArgs {
    fn from(p: InferParams) -> Self {
        Self {
            module: p.common.into(),
            build: p.build,
            format: p.format,
        }
    }
}

/// Value of an argument restricted by `value_parser([...])`; empty when absent.
fn choice<'m>(m: &'m ArgMatches, id: &str) -> &'m str {
    m.get_one::<String>(id).map_or("", String::as_str)
}
