//! Validated, read-only view of a workspace for one pass.

use std::collections::{HashMap, HashSet};

use cabbage_types::{ErrorCode, Node, NodeId, Workspace};

use crate::error::{CodegenError, CodegenResult};

/// Index over the workspace's nodes plus its ordered root list.
///
/// Building the graph rejects duplicate ids, links to unknown blocks, blocks
/// with more than one parent and cycles, so translation can follow links
/// without ever looping.
#[derive(Debug)]
pub struct WorkspaceGraph<'w> {
    index: HashMap<&'w NodeId, &'w Node>,
    roots: Vec<&'w Node>,
}

impl<'w> WorkspaceGraph<'w> {
    pub fn build(workspace: &'w Workspace) -> CodegenResult<Self> {
        let mut index = HashMap::with_capacity(workspace.nodes.len());
        for node in &workspace.nodes {
            if index.insert(&node.id, node).is_some() {
                return Err(CodegenError::malformed(
                    ErrorCode::DUPLICATE_NODE_ID,
                    &node.id,
                    format!("block id '{}' is used more than once", node.id),
                ));
            }
        }

        let mut parent_of: HashMap<&NodeId, &NodeId> = HashMap::new();
        for node in &workspace.nodes {
            for link in node.links() {
                if !index.contains_key(link) {
                    return Err(CodegenError::malformed(
                        ErrorCode::DANGLING_LINK,
                        &node.id,
                        format!("block '{}' links to unknown block '{link}'", node.id),
                    ));
                }
                if let Some(previous) = parent_of.insert(link, &node.id) {
                    return Err(CodegenError::malformed(
                        ErrorCode::SHARED_NODE,
                        link,
                        format!(
                            "block '{link}' is attached to both '{previous}' and '{}'",
                            node.id
                        ),
                    ));
                }
            }
        }

        let mut roots: Vec<&Node> = workspace
            .nodes
            .iter()
            .filter(|node| !parent_of.contains_key(&node.id))
            .collect();

        // Every block has at most one parent, so anything a root cannot
        // reach sits on a cycle.
        let mut reached: HashSet<&NodeId> = HashSet::with_capacity(index.len());
        let mut stack = roots.clone();
        while let Some(node) = stack.pop() {
            if !reached.insert(&node.id) {
                continue;
            }
            stack.extend(node.links().filter_map(|link| index.get(link).copied()));
        }
        if let Some(node) = workspace.nodes.iter().find(|n| !reached.contains(&n.id)) {
            return Err(CodegenError::malformed(
                ErrorCode::CYCLIC_CHAIN,
                &node.id,
                format!("block '{}' is part of a cycle", node.id),
            ));
        }

        // Stable: equal positions keep insertion order.
        roots.sort_by(|a, b| a.position.reading_order(&b.position));

        Ok(Self { index, roots })
    }

    pub fn node(&self, id: &NodeId) -> Option<&'w Node> {
        self.index.get(id).copied()
    }

    /// Root blocks, top to bottom then left to right.
    pub fn roots(&self) -> &[&'w Node] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
