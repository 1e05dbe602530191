//! Print inferred contexts as text or JSON.

use flow_lib::ModuleAnalyzed;
use flow_lib::infer::{Context, ContextPrinter, ContextView};
use serde::Serialize;

use super::run_common::ModuleArgs;
use crate::cli::OutputFormat;

pub struct InferArgs {
    pub module: ModuleArgs,
    pub build: Option<String>,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct Entry<'a> {
    kind: &'static str,
    name: &'a str,
    context: ContextView<'a>,
}

pub fn run(args: InferArgs) {
    let input = args.module.load();
    let module = args.module.analyze(&input);
    let diagnostics = module.diagnostics();

    if !module.is_valid() {
        args.module.fail(&diagnostics, &input);
    }

    let selected = match select(&module, args.build.as_deref()) {
        Ok(selected) => selected,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    match args.format {
        OutputFormat::Text => {
            let dumps: Vec<_> = selected
                .iter()
                .map(|(_, _, ctx)| ContextPrinter::new(module.program(), ctx).dump())
                .collect();
            print!("{}", dumps.join("\n"));
        }
        OutputFormat::Json => {
            let entries: Vec<_> = selected
                .iter()
                .map(|&(kind, name, ctx)| Entry {
                    kind,
                    name,
                    context: ContextView::new(module.program(), ctx),
                })
                .collect();
            let json = serde_json::to_string_pretty(&entries)
                .expect("contexts serialize to JSON");
            println!("{}", json);
        }
    }

    if diagnostics.has_warnings() {
        eprint!("{}", args.module.render(&diagnostics, &input));
    }
}

type Selected<'m> = Vec<(&'static str, &'m str, &'m Context)>;

/// One named build, every build, or every flow when the module has no builds.
fn select<'m>(module: &'m ModuleAnalyzed<'_>, build: Option<&str>) -> Result<Selected<'m>, String> {
    if let Some(name) = build {
        let (build, ctx) = module
            .program()
            .find_build(name)
            .zip(module.build_context(name))
            .ok_or_else(|| format!("no build named `{}`", name))?;
        return Ok(vec![("build", build.name.name.as_str(), ctx)]);
    }

    if !module.program().builds.is_empty() {
        return Ok(module
            .build_contexts()
            .map(|(name, ctx)| ("build", name, ctx))
            .collect());
    }

    Ok(module
        .program()
        .flow_ids()
        .filter_map(|id| {
            let ctx = module.flow_context(id)?;
            Some(("flow", module.program().flow(id).name.as_str(), ctx))
        })
        .collect())
}
