use std::fmt;

/// Precondition failures surfaced by the search engines and the cycle
/// subsystem built on them.
///
/// An absent result (no cycle, no qualifying cycle) is never reported
/// through this type; operations return `Ok(None)` for that.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A start or target vertex is not part of the graph.
    #[error("vertex not found in graph: {0}")]
    UnknownVertex(String),

    /// A cycle was built from an empty vertex sequence.
    #[error("a cycle must contain at least one vertex")]
    EmptyCycle,
}

impl SearchError {
    /// Build an [`SearchError::UnknownVertex`] from any debuggable vertex id.
    #[must_use]
    pub fn unknown_vertex<V: fmt::Debug>(vertex: &V) -> Self {
        Self::UnknownVertex(format!("{vertex:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::SearchError;

    #[test]
    fn unknown_vertex_renders_debug_form() {
        let err = SearchError::unknown_vertex(&42_u32);
        assert_eq!(err, SearchError::UnknownVertex("42".to_string()));
        assert_eq!(err.to_string(), "vertex not found in graph: 42");
    }

    #[test]
    fn empty_cycle_message() {
        assert_eq!(
            SearchError::EmptyCycle.to_string(),
            "a cycle must contain at least one vertex"
        );
    }
}
