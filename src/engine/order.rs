//! Apply Ordering Engine
//!
//! Topologically sorts resource descriptors by their dependency edges so an
//! apply engine can act on them in a safe sequence.
//!
//! # Edge Semantics
//!
//! | Edge on `A`          | Ordering |
//! |----------------------|----------|
//! | `A before B`         | A → B |
//! | `A subscribe B`      | B → A (A refreshes when B changes) |
//!
//! # Design
//!
//! - **Pure logic**: No I/O — only computes the sequence
//! - **Deterministic**: Ready descriptors are taken in input order
//! - **Validated**: Dangling edge targets and cycles are errors

use std::collections::{BTreeSet, HashMap};

use crate::error::{DockerConfError, Result};
use crate::resource::{EdgeKind, Resource, ResourceRef};

/// An ordered apply sequence plus the refresh notifications it implies.
#[derive(Debug, Clone)]
pub struct ApplyPlan {
    /// Descriptors in apply order
    pub steps: Vec<Resource>,
    /// (changed, refreshed): when the first is changed the second is refreshed
    pub notifications: Vec<(ResourceRef, ResourceRef)>,
}

impl ApplyPlan {
    /// Position of a descriptor in the plan
    pub fn position(&self, reference: &ResourceRef) -> Option<usize> {
        self.steps.iter().position(|r| &r.reference() == reference)
    }

    /// Returns a summary of the plan for logging/display.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Apply Plan ({} steps):", self.steps.len())];
        for (i, step) in self.steps.iter().enumerate() {
            lines.push(format!("  {}. [{}] {}", i + 1, step.stage, step.reference()));
        }
        for (source, target) in &self.notifications {
            lines.push(format!("  notify: {} -> {}", source, target));
        }
        lines.join("\n")
    }
}

/// Compute the apply order for `resources`.
///
/// # Errors
///
/// Returns `Ordering` when an edge names a descriptor that is not in the
/// list, when two descriptors share a reference, or when the edges form a
/// cycle.
pub fn apply_order(resources: &[Resource]) -> Result<ApplyPlan> {
    let mut index: HashMap<ResourceRef, usize> = HashMap::with_capacity(resources.len());
    for (i, resource) in resources.iter().enumerate() {
        if index.insert(resource.reference(), i).is_some() {
            return Err(DockerConfError::ordering(format!(
                "duplicate resource {}",
                resource.reference()
            )));
        }
    }

    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); resources.len()];
    let mut in_degree = vec![0usize; resources.len()];
    let mut notifications = Vec::new();

    for (i, resource) in resources.iter().enumerate() {
        for edge in &resource.edges {
            let j = *index.get(&edge.target).ok_or_else(|| {
                DockerConfError::ordering(format!(
                    "{} references unknown resource {}",
                    resource.reference(),
                    edge.target
                ))
            })?;

            let (from, to) = match edge.kind {
                EdgeKind::Before => (i, j),
                EdgeKind::Subscribe => {
                    notifications.push((edge.target.clone(), resource.reference()));
                    (j, i)
                }
            };
            successors[from].push(to);
            in_degree[to] += 1;
        }
    }

    // Kahn's algorithm; BTreeSet keeps the lowest input index first
    let mut ready: BTreeSet<usize> = (0..resources.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(resources.len());

    while let Some(i) = ready.pop_first() {
        order.push(i);
        for &next in &successors[i] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.insert(next);
            }
        }
    }

    if order.len() != resources.len() {
        let stuck: Vec<String> = (0..resources.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| resources[i].reference().to_string())
            .collect();
        return Err(DockerConfError::ordering(format!(
            "dependency cycle between {}",
            stuck.join(", ")
        )));
    }

    Ok(ApplyPlan {
        steps: order.into_iter().map(|i| resources[i].clone()).collect(),
        notifications,
    })
}
