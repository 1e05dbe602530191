//! Sub-flow tables.
//!
//! Two-phase resolution: every `let` in every flow is resolved up front,
//! before inference or checking runs. Each entry remembers the statement that
//! introduced it, so a handle is only visible to the statements after its `let`.

use rowan::TextRange;

use crate::program::{FlowId, Program, Stmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubflowEntry {
    pub handle: String,
    pub handle_range: TextRange,
    /// `None` when the named flow does not exist.
    pub flow: Option<FlowId>,
    /// Index of the introducing `let` in the flow body.
    pub stmt: usize,
}

/// Handle registrations of one flow, in textual order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubflowTable {
    entries: Vec<SubflowEntry>,
}

impl SubflowTable {
    /// The registration of `handle` visible at statement `at`. Later `let`s win.
    pub fn lookup(&self, handle: &str, at: usize) -> Option<&SubflowEntry> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.handle == handle && e.stmt < at)
    }

    pub fn entries(&self) -> &[SubflowEntry] {
        &self.entries
    }

    /// Every resolved callee, each once.
    pub fn callees(&self) -> impl Iterator<Item = FlowId> + '_ {
        let mut seen = Vec::new();
        self.entries.iter().filter_map(move |e| {
            let id = e.flow?;
            if seen.contains(&id) {
                return None;
            }
            seen.push(id);
            Some(id)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubflowTables {
    tables: Vec<SubflowTable>,
}

impl SubflowTables {
    #[tracing::instrument(skip_all)]
    pub fn build(program: &Program) -> Self {
        let tables = program
            .flows
            .iter()
            .map(|flow| {
                let mut table = SubflowTable::default();
                for (i, stmt) in flow.body.iter().enumerate() {
                    let Stmt::Let(l) = stmt else {
                        continue;
                    };
                    let target = program.find_flow(&l.flow.name);
                    for handle in &l.handles {
                        table.entries.push(SubflowEntry {
                            handle: handle.name.clone(),
                            handle_range: handle.range,
                            flow: target,
                            stmt: i,
                        });
                    }
                }
                tracing::trace!(flow = %flow.name, handles = table.entries.len(), "sub-flow table");
                table
            })
            .collect();
        Self { tables }
    }

    pub fn of(&self, flow: FlowId) -> &SubflowTable {
        &self.tables[flow.index()]
    }

    /// Flows transitively reachable from `root` through `let` bindings, `root` included.
    pub fn reachable(&self, root: FlowId) -> Vec<FlowId> {
        let mut seen = vec![root];
        let mut i = 0;
        while i < seen.len() {
            for callee in self.of(seen[i]).callees() {
                if !seen.contains(&callee) {
                    seen.push(callee);
                }
            }
            i += 1;
        }
        seen
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod resolve_tests;
