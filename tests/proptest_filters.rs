//! Property-based tests for listing and filtering.
//!
//! Uses proptest to verify that:
//! - Adding a criterion never grows the result
//! - Every listed issue satisfies every criterion
//! - Listing is idempotent and preserves creation order
//! - Identifiers are unique across projects

use issue_board::model::IssueField;
use issue_board::storage::{FieldMap, IssueFilter, IssueStore};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::collections::HashSet;
use tracing::info;

fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

fn body(author: &str, text: &str, open: bool) -> FieldMap {
    let Value::Object(map) = json!({
        "issue_title": "title",
        "issue_text": text,
        "created_by": author,
        "open": open,
    }) else {
        unreachable!()
    };
    map
}

fn seed() -> impl Strategy<Value = Vec<(String, String, bool)>> {
    prop::collection::vec(
        ("[ab]", "[xyz]", any::<bool>()),
        0..20,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..Default::default()
    })]

    /// Property: a second criterion never returns more issues than the first alone
    #[test]
    fn narrowing_never_grows(issues in seed(), author in "[ab]", text in "[xyz]") {
        init_test_logging();
        info!("proptest_narrowing: issues={} author={author} text={text}", issues.len());

        runtime().block_on(async {
            let store = IssueStore::new();
            for (a, t, open) in &issues {
                store.create("p", &body(a, t, *open)).await.expect("create");
            }

            let one = IssueFilter::new().with(IssueField::CreatedBy, author.clone());
            let two = one.clone().with(IssueField::IssueText, text.clone());
            let wide = store.list("p", &one).await;
            let narrow = store.list("p", &two).await;

            prop_assert!(narrow.len() <= wide.len());
            for issue in &narrow {
                prop_assert_eq!(&issue.created_by, &author);
                prop_assert_eq!(&issue.issue_text, &text);
            }
            Ok(())
        })?;
    }

    /// Property: open=true and open=false partition the project
    #[test]
    fn open_filter_partitions(issues in seed()) {
        init_test_logging();

        runtime().block_on(async {
            let store = IssueStore::new();
            for (a, t, open) in &issues {
                store.create("p", &body(a, t, *open)).await.expect("create");
            }

            let open = store.list("p", &IssueFilter::new().with(IssueField::Open, "true")).await;
            let closed = store.list("p", &IssueFilter::new().with(IssueField::Open, "false")).await;
            prop_assert_eq!(open.len() + closed.len(), issues.len());
            prop_assert!(open.iter().all(|issue| issue.open));
            prop_assert!(closed.iter().all(|issue| !issue.open));
            Ok(())
        })?;
    }

    /// Property: listing twice yields the same issues in creation order
    #[test]
    fn list_is_idempotent_and_ordered(issues in seed()) {
        init_test_logging();

        runtime().block_on(async {
            let store = IssueStore::new();
            let mut created = Vec::new();
            for (a, t, open) in &issues {
                created.push(store.create("p", &body(a, t, *open)).await.expect("create"));
            }

            let first = store.list("p", &IssueFilter::new()).await;
            let second = store.list("p", &IssueFilter::new()).await;
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(&first, &created);
            Ok(())
        })?;
    }

    /// Property: identifiers never repeat, even across projects
    #[test]
    fn identifiers_are_unique(projects in prop::collection::vec("[a-c]", 1..30)) {
        init_test_logging();

        runtime().block_on(async {
            let store = IssueStore::new();
            let mut seen = HashSet::new();
            for project in &projects {
                let issue = store.create(project, &body("a", "x", true)).await.expect("create");
                prop_assert!(seen.insert(issue.id.clone()), "duplicate id {}", issue.id);
            }
            Ok(())
        })?;
    }
}
