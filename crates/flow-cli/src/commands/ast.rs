//! Show the lowered program or the syntax tree of a module.

use flow_lib::parser::CstPrinter;
use flow_lib::program::ProgramPrinter;

use super::run_common::ModuleArgs;

pub struct AstArgs {
    pub module: ModuleArgs,
    pub cst: bool,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: AstArgs) {
    let input = args.module.load();
    let module = args.module.analyze(&input);

    let output = if args.cst {
        let root = module.parse_tree().syntax();
        CstPrinter::new(&root)
            .with_trivia(args.raw)
            .with_spans(args.spans)
            .dump()
    } else {
        ProgramPrinter::new(module.program()).dump()
    };
    print!("{}", output);

    // The tree is printed even when it has errors
    let diagnostics = module.diagnostics();
    if !diagnostics.is_empty() {
        eprint!("{}", args.module.render(&diagnostics, &input));
    }
}
