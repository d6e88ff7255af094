//! Property tests for instance labels and the paths derived from them.

use proptest::prelude::*;

use deckpub::{InstanceLabel, PublishPlan};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: label validation never panics, and an accepted label is a
    /// single inert path segment.
    #[test]
    fn property_accepted_labels_are_single_segments(s in "(?s).{0,80}") {
        if let Ok(label) = InstanceLabel::new(s.clone()) {
            prop_assert!(!label.as_str().is_empty());
            prop_assert!(!label.as_str().starts_with('.'));
            prop_assert!(!label.as_str().starts_with('-'));
            prop_assert!(label
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        }
    }

    /// PROPERTY: every derived path lives under the remote root and carries the label.
    #[test]
    fn property_paths_derive_from_label(label in "[A-Za-z0-9][A-Za-z0-9._-]{0,20}") {
        prop_assume!(label != "latest");
        let instance = InstanceLabel::new(label.clone()).unwrap();
        let plan = PublishPlan::new(instance, "/srv/shelf", "/home/me/slides").unwrap();

        prop_assert_eq!(plan.versioned_folder(), format!("/srv/shelf/python-advanced-{}", label));
        prop_assert_eq!(plan.latest_alias(), "/srv/shelf/python-advanced-latest");
        prop_assert_eq!(
            plan.archive_path(),
            format!("/srv/shelf/python-advanced-{0}/python-advanced-{0}.tar.gz", label)
        );
        prop_assert_ne!(plan.versioned_folder(), plan.latest_alias());
        prop_assert_eq!(plan.synced_dir(), format!("/srv/shelf/python-advanced-{}/slides", label));
    }
}
