use super::run_common::ModuleArgs;

pub struct CheckArgs {
    pub module: ModuleArgs,
    pub strict: bool,
}

/// Prints nothing when the module passes.
pub fn run(args: CheckArgs) {
    let input = args.module.load();
    let module = args.module.analyze(&input);
    let diagnostics = module.diagnostics();

    let warned = args.strict && diagnostics.has_warnings();
    if !module.is_valid() || warned {
        args.module.fail(&diagnostics, &input);
    }
}
