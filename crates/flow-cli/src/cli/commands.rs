//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Input and analysis flags every command accepts.
fn with_common_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .arg(fuel_arg())
        .arg(fail_fast_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("flow")
        .about("Shape and rank inference for tensor pipelines")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(infer_command())
}

/// Show the lowered program or its syntax tree.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the lowered program or its syntax tree")
        .override_usage(
            "\
  flow ast <FILE>
  flow ast -e <TEXT> [--cst] [--raw] [--spans]",
        )
        .after_help(
            r#"EXAMPLES:
  flow ast model.flow                 # lowered program
  flow ast model.flow --cst           # concrete syntax tree
  flow ast model.flow --raw --spans   # with trivia and positions
  flow ast -e 'flow f(x) { return x.T; }'"#,
        )
        .arg(cst_arg())
        .arg(raw_arg())
        .arg(spans_arg());

    with_common_args(cmd)
}

/// Check a module.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Check flows and builds")
        .override_usage(
            "\
  flow check <FILE>
  flow check -e <TEXT> [--strict]",
        )
        .after_help(
            r#"EXAMPLES:
  flow check model.flow               # silent on success
  flow check model.flow --strict      # warnings fail too
  flow check - < model.flow           # read stdin
  flow check -e 'flow f(x) { return x; }'"#,
        )
        .arg(strict_arg());

    with_common_args(cmd)
}

/// Print inferred shapes.
pub fn infer_command() -> Command {
    let cmd = Command::new("infer")
        .about("Print inferred shapes of builds, or ranks of flows")
        .override_usage(
            "\
  flow infer <FILE> [--build <NAME>] [--format <FORMAT>]
  flow infer -e <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  flow infer model.flow               # every build
  flow infer model.flow -b main       # one build
  flow infer model.flow --format json"#,
        )
        .arg(build_arg())
        .arg(format_arg());

    with_common_args(cmd)
}
