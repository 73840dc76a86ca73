//! Activity containment graph
//!
//! Edges point from an activity to each activity it links. Only the subtree
//! below one root is loaded, which is all an attach needs: linking `child`
//! into `parent` closes a cycle exactly when `parent` is reachable from
//! `child`.

use crate::error::SequenceError;
use petgraph::algo::has_path_connecting;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashSet;
use syllabus_model::ResourceId;
use syllabus_store::ActivityStore;

/// Directed graph of activity-contains-activity edges
#[derive(Debug, Default)]
pub struct ContainmentGraph {
    inner: DiGraphMap<ResourceId, ()>,
}

impl ContainmentGraph {
    /// Load every activity reachable from `root`
    ///
    /// Terminates on cyclic data: each activity is expanded once. Links to
    /// missing resources are skipped.
    ///
    /// # Errors
    /// Returns error if a repository query fails
    pub fn from_subtree<S: ActivityStore + ?Sized>(
        store: &S,
        root: ResourceId,
    ) -> Result<Self, SequenceError> {
        let mut graph = DiGraphMap::new();
        graph.add_node(root);

        let mut expanded = HashSet::new();
        let mut pending = vec![root];

        while let Some(activity) = pending.pop() {
            if !expanded.insert(activity) {
                continue;
            }
            for link in store.links_of(activity)? {
                let child = link.resource();
                let is_activity = store
                    .find_resource(child)?
                    .is_some_and(|node| node.is_activity());
                if is_activity {
                    graph.add_edge(activity, child, ());
                    pending.push(child);
                }
            }
        }

        Ok(Self { inner: graph })
    }

    /// Whether `to` can be reached from `from`, including `from == to`
    #[must_use]
    pub fn reaches(&self, from: ResourceId, to: ResourceId) -> bool {
        if from == to {
            return true;
        }
        self.inner.contains_node(from)
            && self.inner.contains_node(to)
            && has_path_connecting(&self.inner, from, to, None)
    }

    /// Whether the loaded subtree already contains a cycle
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        petgraph::algo::is_cyclic_directed(&self.inner)
    }

    /// Number of activities loaded
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.inner.node_count()
    }
}

/// Refuse linking `child` into `parent` when that would close a cycle
pub(crate) fn ensure_acyclic<S: ActivityStore + ?Sized>(
    store: &S,
    parent: ResourceId,
    child: ResourceId,
) -> Result<(), SequenceError> {
    let graph = ContainmentGraph::from_subtree(store, child)?;
    if graph.reaches(child, parent) {
        return Err(SequenceError::CycleDetected {
            activity: parent,
            resource: child,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_store::LinkRepository;
    use syllabus_test_utils::CourseBuilder;

    #[test]
    fn loads_only_activity_edges() {
        let course = CourseBuilder::new()
            .activity("a")
            .activity("b")
            .leaf("x")
            .links("a", &["b", "x"])
            .build();
        let graph = ContainmentGraph::from_subtree(&course.store, course.id("a")).unwrap();
        assert_eq!(graph.activity_count(), 2);
        assert!(graph.reaches(course.id("a"), course.id("b")));
        assert!(!graph.reaches(course.id("b"), course.id("a")));
        assert!(!graph.reaches(course.id("a"), course.id("x")));
    }

    #[test]
    fn detects_transitive_cycle() {
        let course = CourseBuilder::new()
            .activity("a")
            .activity("b")
            .activity("c")
            .link("a", "b")
            .link("b", "c")
            .build();
        let store = &course.store;
        assert!(ensure_acyclic(store, course.id("a"), course.id("b")).is_ok());
        assert!(matches!(
            ensure_acyclic(store, course.id("c"), course.id("a")),
            Err(SequenceError::CycleDetected { .. })
        ));
    }

    #[test]
    fn terminates_on_existing_cycle() {
        let course = CourseBuilder::new().activity("a").activity("b").build();
        let (a, b) = (course.id("a"), course.id("b"));
        course.store.append_link(a, b).unwrap();
        course.store.append_link(b, a).unwrap();

        let graph = ContainmentGraph::from_subtree(&course.store, a).unwrap();
        assert!(graph.is_cyclic());
        assert_eq!(graph.activity_count(), 2);
    }
}
