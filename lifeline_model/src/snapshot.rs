// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use tracing::warn;

use crate::record::{BranchRecord, NodeKind, NodeRecord};
use crate::timestamp::{Seconds, parse_timestamp};

/// A branch with resolved instants.
#[derive(Clone, Debug, PartialEq)]
pub struct Branch {
    /// Opaque identifier.
    pub id: String,
    /// Identifier of the parent branch, if any.
    pub parent_id: Option<String>,
    /// Start instant.
    pub start: Seconds,
    /// End instant; `None` while ongoing.
    pub end: Option<Seconds>,
    /// Display name.
    pub name: String,
    /// Summary text.
    pub summary: String,
}

impl Branch {
    /// Returns `true` if the branch has no end instant.
    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// Returns the instant the branch line extends to, using `now` for
    /// ongoing branches.
    #[must_use]
    pub fn end_or(&self, now: Seconds) -> Seconds {
        self.end.unwrap_or(now.max(self.start))
    }
}

/// A node with a resolved instant.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// Opaque identifier.
    pub id: String,
    /// Identifier of the owning branch.
    pub branch_id: String,
    /// Instant of the event.
    pub time: Seconds,
    /// Textual content.
    pub content: String,
    /// Display category.
    pub kind: NodeKind,
    /// Set while the collaborator is rewriting this node.
    pub is_updating: bool,
}

/// Read access to the data collaborator's current records.
///
/// The engine never mutates what it receives; it resolves a [`Snapshot`]
/// from these lists and redraws from that.
pub trait DataSource {
    /// Returns every branch record.
    fn list_branches(&self) -> Vec<BranchRecord>;
    /// Returns every node record.
    fn list_nodes(&self) -> Vec<NodeRecord>;
}

/// An immutable, resolved view of the collaborator's branches and nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    branches: Vec<Branch>,
    nodes: Vec<Node>,
    skipped: usize,
}

impl Snapshot {
    /// Creates a snapshot from already resolved branches and nodes.
    #[must_use]
    pub fn from_parts(branches: Vec<Branch>, nodes: Vec<Node>) -> Self {
        Self {
            branches,
            nodes,
            skipped: 0,
        }
    }

    /// Resolves raw records into a snapshot.
    ///
    /// Records with an unparseable timestamp are dropped and counted in
    /// [`Snapshot::skipped`]. An unparseable *end* only drops the end, leaving
    /// the branch ongoing. An end before the start is pulled up to the start.
    #[must_use]
    pub fn resolve(branches: &[BranchRecord], nodes: &[NodeRecord]) -> Self {
        let mut skipped = 0;
        let mut resolved_branches = Vec::with_capacity(branches.len());
        for record in branches {
            let start = match parse_timestamp(&record.start) {
                Ok(start) => start,
                Err(err) => {
                    warn!(branch = %record.id, %err, "skipping branch with unparseable start");
                    skipped += 1;
                    continue;
                }
            };
            let end = record.end.as_deref().and_then(|raw| match parse_timestamp(raw) {
                Ok(end) => Some(end.max(start)),
                Err(err) => {
                    warn!(branch = %record.id, %err, "ignoring unparseable branch end");
                    None
                }
            });
            resolved_branches.push(Branch {
                id: record.id.clone(),
                parent_id: record.parent_id.clone().filter(|p| !p.is_empty()),
                start,
                end,
                name: record.name.clone(),
                summary: record.summary.clone(),
            });
        }

        let mut resolved_nodes = Vec::with_capacity(nodes.len());
        for record in nodes {
            match parse_timestamp(&record.timestamp) {
                Ok(time) => resolved_nodes.push(Node {
                    id: record.id.clone(),
                    branch_id: record.branch_id.clone(),
                    time,
                    content: record.content.clone(),
                    kind: record.kind,
                    is_updating: record.is_updating,
                }),
                Err(err) => {
                    warn!(node = %record.id, %err, "skipping node with unparseable timestamp");
                    skipped += 1;
                }
            }
        }

        Self {
            branches: resolved_branches,
            nodes: resolved_nodes,
            skipped,
        }
    }

    /// Loads and resolves a snapshot from a data source.
    #[must_use]
    pub fn load(source: &impl DataSource) -> Self {
        Self::resolve(&source.list_branches(), &source.list_nodes())
    }

    /// All resolved branches in collaborator order.
    #[must_use]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// All resolved nodes in collaborator order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of records dropped during resolution.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns `true` if there are neither branches nor nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.nodes.is_empty()
    }

    /// Looks up a branch by identifier.
    #[must_use]
    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    /// Resolves the root branch.
    ///
    /// `preferred` wins when it names a branch in the snapshot. Otherwise the
    /// earliest-starting parentless branch is used, ties broken by id.
    #[must_use]
    pub fn root(&self, preferred: Option<&str>) -> Option<&Branch> {
        if let Some(root) = preferred.and_then(|id| self.branch(id)) {
            return Some(root);
        }
        self.branches
            .iter()
            .filter(|b| b.parent_id.is_none())
            .min_by(|a, b| a.start.total_cmp(&b.start).then_with(|| a.id.cmp(&b.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::DAY;

    fn records() -> (Vec<BranchRecord>, Vec<NodeRecord>) {
        let branches = vec![
            BranchRecord::new("main", "Main", "1990-05-01"),
            BranchRecord::new("school", "School", "1996-09-01")
                .with_parent("main")
                .with_end("2008-06-30"),
            BranchRecord::new("broken", "Broken", "not a date"),
        ];
        let nodes = vec![
            NodeRecord::new("n1", "school", "2000-01-01", "Y2K"),
            NodeRecord::new("n2", "main", "", "nothing"),
        ];
        (branches, nodes)
    }

    #[test]
    fn resolve_skips_unparseable_records() {
        let (branches, nodes) = records();
        let snapshot = Snapshot::resolve(&branches, &nodes);
        assert_eq!(snapshot.branches().len(), 2);
        assert_eq!(snapshot.nodes().len(), 1);
        assert_eq!(snapshot.skipped(), 2);
    }

    #[test]
    fn bad_end_leaves_branch_ongoing_and_early_end_is_clamped() {
        let branches = vec![
            BranchRecord::new("a", "A", "2000-01-10").with_end("garbage"),
            BranchRecord::new("b", "B", "2000-01-10").with_end("2000-01-01"),
        ];
        let snapshot = Snapshot::resolve(&branches, &[]);
        assert!(snapshot.branches()[0].is_ongoing());
        let b = &snapshot.branches()[1];
        assert_eq!(b.end, Some(b.start));
        assert_eq!(snapshot.skipped(), 0);
    }

    #[test]
    fn end_or_extends_ongoing_branches_to_now() {
        let (branches, nodes) = records();
        let snapshot = Snapshot::resolve(&branches, &nodes);
        let main = snapshot.branch("main").unwrap();
        let now = main.start + 10.0 * DAY;
        assert_eq!(main.end_or(now), now);
        assert_eq!(main.end_or(main.start - DAY), main.start);
        let school = snapshot.branch("school").unwrap();
        assert_eq!(school.end_or(now), school.end.unwrap());
    }

    #[test]
    fn root_prefers_configured_id_then_earliest_parentless() {
        let branches = vec![
            BranchRecord::new("later", "Later", "2001-01-01"),
            BranchRecord::new("main", "Main", "1990-01-01"),
            BranchRecord::new("child", "Child", "1980-01-01").with_parent("main"),
        ];
        let snapshot = Snapshot::resolve(&branches, &[]);
        assert_eq!(snapshot.root(None).unwrap().id, "main");
        assert_eq!(snapshot.root(Some("later")).unwrap().id, "later");
        assert_eq!(snapshot.root(Some("missing")).unwrap().id, "main");
        assert!(Snapshot::default().root(None).is_none());
    }

    #[test]
    fn load_reads_from_data_source() {
        struct Fixed;
        impl DataSource for Fixed {
            fn list_branches(&self) -> Vec<BranchRecord> {
                records().0
            }
            fn list_nodes(&self) -> Vec<NodeRecord> {
                records().1
            }
        }
        let snapshot = Snapshot::load(&Fixed);
        assert_eq!(snapshot.branches().len(), 2);
        assert!(!snapshot.is_empty());
    }
}
