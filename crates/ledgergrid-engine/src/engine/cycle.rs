//! Circular reference detection and recompute ordering.
//!
//! Formula cells only ever read the stored value of other cells, so a cycle
//! cannot loop forever. It would however leave the cells on it with a value
//! that depends on visit order. [`recalc_plan`] splits the formula cells into
//! strongly connected groups: cells inside a cyclic group are reported, every
//! other formula cell is ordered dependencies-first. Cells that merely read a
//! cyclic cell are ordinary and are evaluated against its stored value.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{CellRef, Grid};

/// The order in which one recompute pass visits formula cells.
#[derive(Debug, Default)]
pub struct RecalcPlan {
    /// Formula cells to evaluate, each after the formula cells it reads.
    pub order: Vec<CellRef>,
    /// Formula cells that sit on a cycle, each with a cycle through it
    /// (first and last entries are the cell itself).
    pub cyclic: HashMap<CellRef, Vec<CellRef>>,
}

/// Tarjan's strongly connected components over formula-to-formula edges.
struct Components<'a> {
    formulas: &'a BTreeMap<CellRef, Vec<CellRef>>,
    next_index: usize,
    index: HashMap<CellRef, usize>,
    lowlink: HashMap<CellRef, usize>,
    stack: Vec<CellRef>,
    on_stack: HashSet<CellRef>,
    /// Emitted dependencies-first.
    groups: Vec<Vec<CellRef>>,
}

impl Components<'_> {
    fn deps(&self, node: CellRef) -> impl Iterator<Item = CellRef> + '_ {
        self.formulas
            .get(&node)
            .into_iter()
            .flatten()
            .copied()
            .filter(|dep| self.formulas.contains_key(dep))
    }

    fn connect(&mut self, node: CellRef) {
        self.index.insert(node, self.next_index);
        self.lowlink.insert(node, self.next_index);
        self.next_index += 1;
        self.stack.push(node);
        self.on_stack.insert(node);

        let deps: Vec<CellRef> = self.deps(node).collect();
        for dep in deps {
            if !self.index.contains_key(&dep) {
                self.connect(dep);
                let low = self.lowlink[&node].min(self.lowlink[&dep]);
                self.lowlink.insert(node, low);
            } else if self.on_stack.contains(&dep) {
                let low = self.lowlink[&node].min(self.index[&dep]);
                self.lowlink.insert(node, low);
            }
        }

        if self.lowlink[&node] == self.index[&node] {
            let mut group = Vec::new();
            while let Some(member) = self.stack.pop() {
                self.on_stack.remove(&member);
                group.push(member);
                if member == node {
                    break;
                }
            }
            group.sort();
            self.groups.push(group);
        }
    }
}

/// A path from `start` back to itself that stays inside `group`.
fn cycle_through(
    start: CellRef,
    group: &HashSet<CellRef>,
    formulas: &BTreeMap<CellRef, Vec<CellRef>>,
) -> Vec<CellRef> {
    fn walk(
        current: CellRef,
        start: CellRef,
        group: &HashSet<CellRef>,
        formulas: &BTreeMap<CellRef, Vec<CellRef>>,
        seen: &mut HashSet<CellRef>,
        path: &mut Vec<CellRef>,
    ) -> bool {
        let deps = formulas.get(&current).map(Vec::as_slice).unwrap_or_default();
        for dep in deps {
            if *dep == start {
                path.push(start);
                return true;
            }
            if group.contains(dep) && seen.insert(*dep) {
                path.push(*dep);
                if walk(*dep, start, group, formulas, seen, path) {
                    return true;
                }
                path.pop();
            }
        }
        false
    }

    let mut path = vec![start];
    let mut seen = HashSet::from([start]);
    walk(start, start, group, formulas, &mut seen, &mut path);
    path
}

/// Plan a full recompute pass over every formula cell in the grid.
pub fn recalc_plan(grid: &Grid) -> RecalcPlan {
    let formulas: BTreeMap<CellRef, Vec<CellRef>> = grid
        .iter()
        .filter(|entry| entry.is_formula())
        .map(|entry| (*entry.key(), entry.depends_on.clone()))
        .collect();

    let mut components = Components {
        formulas: &formulas,
        next_index: 0,
        index: HashMap::new(),
        lowlink: HashMap::new(),
        stack: Vec::new(),
        on_stack: HashSet::new(),
        groups: Vec::new(),
    };
    for node in formulas.keys() {
        if !components.index.contains_key(node) {
            components.connect(*node);
        }
    }

    let mut plan = RecalcPlan::default();
    for group in components.groups {
        let first = group[0];
        let self_loop = formulas[&first].contains(&first);
        if group.len() == 1 && !self_loop {
            plan.order.push(first);
            continue;
        }
        let members: HashSet<CellRef> = group.iter().copied().collect();
        for member in group {
            let path = cycle_through(member, &members, &formulas);
            plan.cyclic.insert(member, path);
        }
    }
    plan
}
