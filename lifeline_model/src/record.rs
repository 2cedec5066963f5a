// Copyright 2025 the Lifeline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw records as handed over by the data collaborator.
//!
//! Records carry timestamps as strings; they are only turned into instants
//! when a [`Snapshot`](crate::Snapshot) is resolved from them.

/// Display category of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    /// A regular point-in-time event.
    #[default]
    Event,
    /// A highlighted event, drawn with a distinct marker.
    Milestone,
}

/// A branch as stored by the data collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BranchRecord {
    /// Opaque identifier.
    pub id: String,
    /// Identifier of the parent branch; `None` for top-level branches.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<String>,
    /// Start timestamp.
    pub start: String,
    /// End timestamp; `None` while the branch is ongoing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form summary shown in tooltips.
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: String,
}

impl BranchRecord {
    /// Creates an ongoing top-level branch record.
    pub fn new(id: impl Into<String>, name: impl Into<String>, start: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: start.into(),
            ..Self::default()
        }
    }

    /// Sets the parent branch identifier.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the end timestamp, closing the branch.
    #[must_use]
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Sets the summary text.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }
}

/// A node as stored by the data collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeRecord {
    /// Opaque identifier.
    pub id: String,
    /// Identifier of the owning branch.
    pub branch_id: String,
    /// Timestamp of the event.
    pub timestamp: String,
    /// Textual content.
    pub content: String,
    /// Display category.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: NodeKind,
    /// Set while the collaborator is rewriting this node.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_updating: bool,
}

impl NodeRecord {
    /// Creates a regular event record.
    pub fn new(
        id: impl Into<String>,
        branch_id: impl Into<String>,
        timestamp: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            branch_id: branch_id.into(),
            timestamp: timestamp.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the display category.
    #[must_use]
    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }
}
