//! Staged pipeline over one source text.
//!
//! `ModuleBuilder` → `parse()` → `ModuleParsed` → `analyze()` → `ModuleAnalyzed`.
//! Parsing covers lexing, the CST, lowering and ironing. Analysis resolves
//! sub-flow tables, checks every flow, infers the ranks of every flow that
//! checked clean and runs the full inference of every build.

#[cfg(test)]
mod tests;

use crate::Diagnostics;
use crate::check::check_flow;
use crate::infer::{Context, infer_build, infer_flow};
use crate::parser::{Parse, Parser, lex, parse_with_parser};
use crate::program::{FlowId, Program, iron, lower};
use crate::resolve::SubflowTables;

const DEFAULT_PARSE_FUEL: u32 = 1_000_000;
const DEFAULT_PARSE_MAX_DEPTH: u32 = 4096;

/// What analysis does after the first flow or build fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Keep going and report every failing item.
    #[default]
    CollectAll,
    /// Report the first failure and skip the rest.
    StopAtFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleConfig {
    pub parse_fuel: u32,
    pub parse_max_depth: u32,
    pub failure_policy: FailurePolicy,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            parse_fuel: DEFAULT_PARSE_FUEL,
            parse_max_depth: DEFAULT_PARSE_MAX_DEPTH,
            failure_policy: FailurePolicy::default(),
        }
    }
}

pub struct ModuleBuilder<'src> {
    source: &'src str,
    config: ModuleConfig,
}

impl<'src> ModuleBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            config: ModuleConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ModuleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_parse_fuel(mut self, fuel: u32) -> Self {
        self.config.parse_fuel = fuel;
        self
    }

    pub fn with_parse_recursion_limit(mut self, limit: u32) -> Self {
        self.config.parse_max_depth = limit;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Fails only when a fuel limit runs out; syntax errors land in the diagnostics.
    #[tracing::instrument(skip_all)]
    pub fn parse(self) -> crate::Result<ModuleParsed<'src>> {
        let parser = Parser::new(self.source, lex(self.source))
            .with_exec_fuel(Some(self.config.parse_fuel))
            .with_recursion_fuel(Some(self.config.parse_max_depth));
        let (parse, mut diag) = parse_with_parser(parser)?;

        let (mut program, lowering) = lower(&parse.root());
        diag.extend(lowering);
        iron(&mut program);

        tracing::info!(
            flows = program.flows.len(),
            builds = program.builds.len(),
            fuel = parse.exec_fuel_consumed(),
            "parsed module"
        );

        Ok(ModuleParsed {
            source: self.source,
            config: self.config,
            parse,
            program,
            diag,
        })
    }
}

#[derive(Debug)]
pub struct ModuleParsed<'src> {
    source: &'src str,
    config: ModuleConfig,
    parse: Parse,
    program: Program,
    diag: Diagnostics,
}

impl<'src> ModuleParsed<'src> {
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn parse_tree(&self) -> &Parse {
        &self.parse
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diag.clone()
    }

    pub fn is_valid(&self) -> bool {
        !self.diag.has_errors()
    }

    pub fn analyze(self) -> ModuleAnalyzed<'src> {
        let mut analysis = Analysis {
            program: &self.program,
            subflows: SubflowTables::build(&self.program),
            policy: self.config.failure_policy,
            diag: self.diag.clone(),
            flows: vec![None; self.program.flows.len()],
            builds: vec![None; self.program.builds.len()],
            checked: vec![false; self.program.flows.len()],
            halted: false,
        };

        if self.diag.has_errors() {
            tracing::debug!("parse errors, skipping analysis");
        } else {
            analysis.run();
        }

        let Analysis {
            subflows,
            diag,
            flows,
            builds,
            ..
        } = analysis;
        tracing::info!(errors = diag.error_count(), "analyzed module");

        ModuleAnalyzed {
            parsed: ModuleParsed { diag, ..self },
            subflows,
            flows,
            builds,
        }
    }
}

/// Mutable state of one `analyze` call.
struct Analysis<'p> {
    program: &'p Program,
    subflows: SubflowTables,
    policy: FailurePolicy,
    diag: Diagnostics,
    flows: Vec<Option<Context>>,
    builds: Vec<Option<Context>>,
    checked: Vec<bool>,
    halted: bool,
}

impl Analysis<'_> {
    fn run(&mut self) {
        let program = self.program;

        for id in program.flow_ids() {
            if self.halted {
                return;
            }
            match check_flow(program, &self.subflows, id) {
                Ok(()) => self.checked[id.index()] = true,
                Err(err) => {
                    // Callee errors come back once per caller.
                    if !self.diag.contains(err.kind.diagnostic_kind(), err.range) {
                        err.report(&mut self.diag, program);
                    }
                    self.fail();
                }
            }
        }

        for id in program.flow_ids() {
            if self.halted {
                return;
            }
            if !self.reaches_checked_flows_only(id) {
                continue;
            }
            let flow = program.flow(id);
            match infer_flow(program, &self.subflows, id) {
                Ok(ctx) => self.flows[id.index()] = Some(ctx),
                Err(err) => {
                    if !self.diag.contains(err.kind.diagnostic_kind(), err.range) {
                        err.report(
                            &mut self.diag,
                            format_args!("flow `{}`", flow.name),
                            flow.name_range,
                        );
                    }
                    self.fail();
                }
            }
        }

        for (i, build) in program.builds.iter().enumerate() {
            if self.halted {
                return;
            }
            if let Some(target) = program.find_flow(&build.flow.name)
                && !self.reaches_checked_flows_only(target)
            {
                continue;
            }
            match infer_build(program, &self.subflows, build) {
                Ok(ctx) => self.builds[i] = Some(ctx),
                Err(err) => {
                    err.report(
                        &mut self.diag,
                        format_args!("build `{}`", build.name.name),
                        build.name.range,
                    );
                    self.fail();
                }
            }
        }
    }

    fn reaches_checked_flows_only(&self, root: FlowId) -> bool {
        self.subflows
            .reachable(root)
            .iter()
            .all(|id| self.checked[id.index()])
    }

    fn fail(&mut self) {
        if self.policy == FailurePolicy::StopAtFirst {
            tracing::debug!("stopping at first failure");
            self.halted = true;
        }
    }
}

#[derive(Debug)]
pub struct ModuleAnalyzed<'src> {
    parsed: ModuleParsed<'src>,
    subflows: SubflowTables,
    flows: Vec<Option<Context>>,
    builds: Vec<Option<Context>>,
}

impl<'src> ModuleAnalyzed<'src> {
    pub fn is_valid(&self) -> bool {
        self.parsed.is_valid()
    }

    pub fn source(&self) -> &'src str {
        self.parsed.source
    }

    pub fn program(&self) -> &Program {
        &self.parsed.program
    }

    pub fn parse_tree(&self) -> &Parse {
        &self.parsed.parse
    }

    pub fn subflows(&self) -> &SubflowTables {
        &self.subflows
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.parsed.diagnostics()
    }

    /// Rank-only context of a flow, when it checked and inferred cleanly.
    pub fn flow_context(&self, id: FlowId) -> Option<&Context> {
        self.flows.get(id.index())?.as_ref()
    }

    /// Context of the last flow declared as `name`.
    pub fn find_flow_context(&self, name: &str) -> Option<&Context> {
        self.flow_context(self.program().find_flow(name)?)
    }

    /// Baked context of the last build declared as `name`.
    pub fn build_context(&self, name: &str) -> Option<&Context> {
        let i = self
            .program()
            .builds
            .iter()
            .rposition(|b| b.name.name == name)?;
        self.builds[i].as_ref()
    }

    /// Every inferred build, in declaration order.
    pub fn build_contexts(&self) -> impl Iterator<Item = (&str, &Context)> {
        self.program()
            .builds
            .iter()
            .zip(&self.builds)
            .filter_map(|(b, ctx)| Some((b.name.name.as_str(), ctx.as_ref()?)))
    }
}
