// file: src/tasks/graph.rs
// version: 1.0.0
// guid: e9f0a1b2-c3d4-5678-9012-345678efabcd

//! Task dependency resolution

use super::TaskId;
use crate::error::ProvisionError;
use crate::Result;
use std::collections::HashSet;

/// Resolve the execution plan for a task.
///
/// Depth-first resolution honoring the declared dependency order, each node
/// at most once. The plan always ends with the requested task itself.
pub fn plan(root: TaskId) -> Result<Vec<TaskId>> {
    let mut ordered = Vec::new();
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    visit(root, &mut ordered, &mut visited, &mut on_stack)?;
    Ok(ordered)
}

fn visit(
    task: TaskId,
    ordered: &mut Vec<TaskId>,
    visited: &mut HashSet<TaskId>,
    on_stack: &mut HashSet<TaskId>,
) -> Result<()> {
    if visited.contains(&task) {
        return Ok(());
    }
    if !on_stack.insert(task) {
        return Err(ProvisionError::task(format!(
            "dependency cycle involving task {}",
            task.name()
        )));
    }

    for dep in task.deps() {
        visit(*dep, ordered, visited, on_stack)?;
    }

    on_stack.remove(&task);
    visited.insert(task);
    ordered.push(task);
    Ok(())
}
