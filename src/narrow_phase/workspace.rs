use crate::narrow_phase::ProximityOutcome;

/// Scratch memory reused by the narrow phase across calls.
///
/// Buffers are only lent out through [`NarrowPhaseWorkspace::scope`]. They are
/// emptied when the returned guard is dropped, including when the call using them
/// panics, so their content never leaks from one call to the next while their
/// allocation is kept.
#[derive(Clone, Debug, Default)]
pub struct NarrowPhaseWorkspace {
    outcomes: Vec<ProximityOutcome>,
}

impl NarrowPhaseWorkspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a workspace able to hold the results of `capacity` pairs without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        NarrowPhaseWorkspace {
            outcomes: Vec::with_capacity(capacity),
        }
    }

    /// Lends the buffers of this workspace until the returned guard is dropped.
    pub fn scope(&mut self) -> WorkspaceScope<'_> {
        self.outcomes.clear();
        WorkspaceScope { workspace: self }
    }

    /// The number of proximity outcomes the workspace can hold without reallocating.
    pub fn outcome_capacity(&self) -> usize {
        self.outcomes.capacity()
    }

    /// Are all the buffers of this workspace empty?
    pub fn is_released(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// Buffers borrowed from a [`NarrowPhaseWorkspace`] for the duration of one call.
pub struct WorkspaceScope<'a> {
    workspace: &'a mut NarrowPhaseWorkspace,
}

impl WorkspaceScope<'_> {
    /// The buffer receiving one proximity outcome per tested pair.
    pub fn outcomes(&mut self) -> &mut Vec<ProximityOutcome> {
        &mut self.workspace.outcomes
    }
}

impl Drop for WorkspaceScope<'_> {
    fn drop(&mut self) {
        self.workspace.outcomes.clear();
    }
}
