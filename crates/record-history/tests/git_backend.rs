mod common;

use git_cli_ops::Revision;
use record_history::{RecordHistoryError, RepositoryStatus};
use serde_json::{json, Value};

macro_rules! require_tools {
    () => {
        if !common::tools_available() {
            eprintln!("skipping: git or patch is not installed");
            return;
        }
    };
}

#[tokio::test]
async fn open_creates_git_repository() {
    require_tools!();
    let t = common::open_git_repo().await;

    assert_eq!(t.repo.status(), &RepositoryStatus::Ready);
    assert!(t.root.join(".git").is_dir());
}

#[tokio::test]
async fn store_then_read_previous_revision() {
    require_tools!();
    let t = common::open_git_repo().await;

    t.repo.store("12345", &json!({ "foo": "bar" }), None).await.unwrap();
    t.repo.store("12345", &json!({ "foo": "baz" }), None).await.unwrap();

    let revs = t.repo.list_revs("12345").await.unwrap().unwrap();
    assert_eq!(revs.len(), 2);

    let old = t.repo.get_rev("12345", &revs[1]).await.unwrap().unwrap();
    assert_eq!(serde_json::from_str::<Value>(&old).unwrap(), json!({ "foo": "bar" }));

    let current = t.repo.get_rev("12345", &revs[0]).await.unwrap().unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&current).unwrap(),
        json!({ "foo": "baz" })
    );
    assert!(t.scratch_files().is_empty(), "left: {:?}", t.scratch_files());
}

#[tokio::test]
async fn every_stored_version_round_trips() {
    require_tools!();
    let t = common::open_git_repo().await;
    let versions = [
        json!({ "name": "first" }),
        json!({ "name": "second", "tags": ["a", "b"] }),
        json!({ "name": "third", "tags": ["b"], "meta": { "n": 3 } }),
    ];

    for version in &versions {
        t.repo.store("record", version, None).await.unwrap();
    }

    let revs = t.repo.list_revs("record").await.unwrap().unwrap();
    assert_eq!(revs.len(), versions.len());
    for (rev, expected) in revs.iter().zip(versions.iter().rev()) {
        let content = t.repo.get_rev("record", rev).await.unwrap().unwrap();
        assert_eq!(&serde_json::from_str::<Value>(&content).unwrap(), expected);
    }
}

#[tokio::test]
async fn rename_via_id_field() {
    require_tools!();
    let t = common::open_git_repo().await;

    t.repo
        .store("12345", &json!({ "id": "12345", "foo": "bar" }), None)
        .await
        .unwrap();
    t.repo
        .store("12345", &json!({ "id": "23456", "foo": "bar" }), Some("id"))
        .await
        .unwrap();

    assert!(!t.record_file("12345").exists());
    assert!(t.record_file("23456").exists());
    assert_eq!(t.repo.list_revs("12345").await.unwrap(), None);
    assert!(t.repo.list_revs("23456").await.unwrap().is_some());
}

#[tokio::test]
async fn diff_reports_structural_changes() {
    require_tools!();
    let t = common::open_git_repo().await;

    t.repo
        .store(
            "12345",
            &json!({ "foo": "bar", "baz": { "qux": true, "quux": true }, "tobedeleted": true }),
            None,
        )
        .await
        .unwrap();
    t.repo
        .store(
            "12345",
            &json!({ "new": true, "foo": "updated", "baz": { "qux": "deep update" } }),
            None,
        )
        .await
        .unwrap();

    let revs = t.repo.list_revs("12345").await.unwrap().unwrap();
    let diff = t.repo.diff("12345", &revs[1], &revs[0]).await.unwrap().unwrap();

    assert_eq!(diff.added.keys().collect::<Vec<_>>(), vec!["new"]);
    assert_eq!(
        diff.removed.keys().collect::<Vec<_>>(),
        vec!["baz.quux", "tobedeleted"]
    );
    assert_eq!(diff.changed.keys().collect::<Vec<_>>(), vec!["baz.qux", "foo"]);
    assert_eq!(diff.changed["foo"].old, json!("bar"));
    assert_eq!(diff.changed["foo"].new, json!("updated"));
}

#[tokio::test]
async fn unknown_revision_is_none() {
    require_tools!();
    let t = common::open_git_repo().await;
    t.repo.store("12345", &json!({ "foo": "bar" }), None).await.unwrap();

    let missing = Revision::new("f".repeat(40));
    assert_eq!(t.repo.get_rev("12345", &missing).await.unwrap(), None);

    let garbage = Revision::new("not-a-revision");
    assert_eq!(t.repo.get_rev("12345", &garbage).await.unwrap(), None);
}

#[tokio::test]
async fn option_like_revision_is_none() {
    require_tools!();
    let t = common::open_git_repo().await;
    t.repo.store("12345", &json!({ "foo": "bar" }), None).await.unwrap();
    t.repo.store("12345", &json!({ "foo": "baz" }), None).await.unwrap();

    let outside = tempfile::tempdir().unwrap();
    let leaked = outside.path().join("leaked.patch");
    let options = [
        "--cached".to_string(),
        "--stat".to_string(),
        "-R".to_string(),
        format!("--output={}", leaked.display()),
        "--output=leaked.patch".to_string(),
    ];

    for raw in &options {
        let rev = Revision::new(raw.as_str());
        assert_eq!(t.repo.get_rev("12345", &rev).await.unwrap(), None, "{raw}");
    }
    assert!(!leaked.exists());
    assert!(!t.root.join("leaked.patch").exists());
    assert!(t.scratch_files().is_empty(), "left: {:?}", t.scratch_files());
}

#[tokio::test]
async fn renamed_record_is_none_before_the_rename() {
    require_tools!();
    let t = common::open_git_repo().await;

    let before = t
        .repo
        .store("12345", &json!({ "id": "12345", "foo": "bar" }), None)
        .await
        .unwrap();
    let after = t
        .repo
        .store("12345", &json!({ "id": "23456", "foo": "baz" }), Some("id"))
        .await
        .unwrap();

    assert_eq!(t.repo.get_rev("23456", &before).await.unwrap(), None);
    assert_eq!(t.repo.diff("23456", &before, &after).await.unwrap(), None);

    let current = t.repo.get_rev("23456", &after).await.unwrap().unwrap();
    assert_eq!(
        serde_json::from_str::<Value>(&current).unwrap(),
        json!({ "id": "23456", "foo": "baz" })
    );
}

#[tokio::test]
async fn record_created_after_revision_is_none() {
    require_tools!();
    let t = common::open_git_repo().await;

    let early = t.repo.store("aaa", &json!({ "n": 1 }), None).await.unwrap();
    t.repo.store("bbb", &json!({ "n": 2 }), None).await.unwrap();

    assert_eq!(t.repo.get_rev("bbb", &early).await.unwrap(), None);
    assert_eq!(t.repo.get_rev("aaa", &early).await.unwrap().as_deref(), Some(r#"{"n":1}"#));
}

#[tokio::test]
async fn identical_store_fails_to_commit() {
    require_tools!();
    let t = common::open_git_repo().await;
    t.repo.store("12345", &json!({ "foo": "bar" }), None).await.unwrap();

    let err = t
        .repo
        .store("12345", &json!({ "foo": "bar" }), None)
        .await
        .unwrap_err();

    assert!(matches!(err, RecordHistoryError::CommitFailed { .. }), "{err:?}");
    assert_eq!(t.repo.list_revs("12345").await.unwrap().unwrap().len(), 1);
}
