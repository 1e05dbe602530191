//! Argument definitions shared by the subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

fn switch(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id.replace('_', "-"))
        .action(ArgAction::SetTrue)
        .help(help)
}

/// Positional source file; `-` reads stdin.
pub fn source_path_arg() -> Arg {
    Arg::new("source_path")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Flow source file, or - for stdin")
}

pub fn source_text_arg() -> Arg {
    Arg::new("source_text")
        .short('e')
        .long("eval")
        .value_name("TEXT")
        .conflicts_with("source_path")
        .help("Analyze TEXT instead of a file")
}

pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .value_parser(["auto", "always", "never"])
        .default_value("auto")
        .help("When to color diagnostics")
}

/// Repeatable: `-v` info, `-vv` debug, `-vvv` trace.
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log pipeline events to stderr, repeat for more detail")
}

pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .default_value("1000000")
        .help("Maximum number of tokens the parser may consume")
}

pub fn fail_fast_arg() -> Arg {
    switch("fail_fast", "Stop at the first failing flow or build")
}

pub fn strict_arg() -> Arg {
    switch("strict", "Fail on warnings too")
}

pub fn build_arg() -> Arg {
    Arg::new("build")
        .short('b')
        .long("build")
        .value_name("NAME")
        .help("Print only the named build")
}

pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Output format for inferred contexts")
}

pub fn cst_arg() -> Arg {
    switch("cst", "Print the syntax tree rather than the lowered program")
}

pub fn raw_arg() -> Arg {
    switch("raw", "Keep whitespace and comments in the tree (implies --cst)")
}

pub fn spans_arg() -> Arg {
    switch("spans", "Annotate tree nodes with byte ranges")
}
