use proptest::prelude::*;
use proptest::sample::Index;
use syllabus_tree::{ActivityTreeWalker, NavigationEntry};
use syllabus_test_utils::{Course, CourseBuilder};

/// Random tree: node `i` is attached to one of the activities created before it
fn build(shape: &[(bool, Index)]) -> (Course, usize) {
    let mut builder = CourseBuilder::new().activity("n0");
    let mut activities = vec!["n0".to_string()];
    let mut leaves = 0;

    for (i, (is_activity, parent)) in shape.iter().enumerate() {
        let key = format!("n{}", i + 1);
        let parent = parent.get(&activities).clone();
        builder = if *is_activity {
            activities.push(key.clone());
            builder.activity(&key)
        } else {
            leaves += 1;
            builder.leaf(&key)
        };
        builder = builder.link(&parent, &key);
    }

    (builder.build(), leaves)
}

fn flatten(entries: &[NavigationEntry]) -> Vec<u32> {
    entries
        .iter()
        .flat_map(|e| e.depth_first().into_iter().map(|d| d.step))
        .collect()
}

proptest! {
    #[test]
    fn prop_steps_strictly_increase(
        shape in proptest::collection::vec((any::<bool>(), any::<Index>()), 0..40),
        start in 0u32..1000,
    ) {
        let (course, _) = build(&shape);
        let walker = ActivityTreeWalker::new(&course.store);
        let (entries, last) = walker.build_navigation(course.id("n0"), start).unwrap();

        let steps = flatten(&entries);
        let expected: Vec<u32> = (1..=shape.len() as u32).map(|n| start + n).collect();
        prop_assert_eq!(steps, expected);
        prop_assert_eq!(last, start + shape.len() as u32);
    }

    #[test]
    fn prop_counts_match_shape(
        shape in proptest::collection::vec((any::<bool>(), any::<Index>()), 0..40),
    ) {
        let (course, leaves) = build(&shape);
        let walker = ActivityTreeWalker::new(&course.store);
        let root = course.id("n0");

        prop_assert_eq!(walker.count_items(root).unwrap() as usize, shape.len());
        prop_assert_eq!(walker.count_steps(root).unwrap() as usize, leaves);
    }

    #[test]
    fn prop_only_activities_carry_children(
        shape in proptest::collection::vec((any::<bool>(), any::<Index>()), 0..40),
    ) {
        let (course, _) = build(&shape);
        let walker = ActivityTreeWalker::new(&course.store);
        let entries = walker.navigation(course.id("n0")).unwrap();

        for entry in entries.iter().flat_map(NavigationEntry::depth_first) {
            prop_assert_eq!(entry.children.is_some(), entry.resource.kind.is_activity());
        }
    }
}
