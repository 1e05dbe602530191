mod cli;
mod commands;

use cli::{AstParams, CheckParams, InferParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();
    let (name, m) = matches
        .subcommand()
        .expect("build_cli marks the subcommand as required");
    init_logging(m.get_count("verbose"));
    tracing::debug!(command = name, "dispatching");

    match name {
        "ast" => commands::ast::run(AstParams::from_matches(m).into()),
        "check" => commands::check::run(CheckParams::from_matches(m).into()),
        "infer" => commands::infer::run(InferParams::from_matches(m).into()),
        other => unreachable!("no handler for subcommand `{other}`"),
    }
}

/// Library events go to stderr; `-v` raises the level from warn.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
