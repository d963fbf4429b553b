use notepad_core::db::open_db;
use notepad_core::{
    CodecError, Link, Memo, Post, PostKind, PostRepository, PostService, SqlitePostStore, Task,
};
use tempfile::TempDir;

fn temp_store() -> (TempDir, SqlitePostStore) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notepad.sqlite");
    // Bootstrap the schema once; the gateway itself opens raw connections.
    let conn = open_db(&path).unwrap();
    drop(conn);
    (dir, SqlitePostStore::new(path))
}

#[test]
fn save_and_find_by_id_roundtrip() {
    let (_dir, store) = temp_store();

    let mut memo = Memo::new();
    memo.state_mut().text = vec!["first line".into(), "second line".into()];
    let id = store.save(&memo).unwrap();

    let loaded = store.find_by_id(Some(id)).unwrap().unwrap();
    assert_eq!(loaded.kind(), PostKind::Memo);
    assert_eq!(loaded.state().text, memo.state().text);
    assert_eq!(loaded.state().created_at, memo.state().created_at);
    assert_eq!(loaded.state().row_id, Some(id));
}

#[test]
fn loaded_kind_matches_stored_type_column() {
    let (_dir, store) = temp_store();

    let mut task = Task::new();
    task.due_date = "next friday".into();
    task.state_mut().text = vec!["buy milk".into()];
    let task_id = store.save(&task).unwrap();

    let mut link = Link::new();
    link.url = "https://example.org".into();
    let link_id = store.save(&link).unwrap();

    let loaded_task = store.find_by_id(Some(task_id)).unwrap().unwrap();
    assert_eq!(loaded_task.kind(), PostKind::Task);
    assert!(loaded_task
        .render()
        .iter()
        .any(|line| line.contains("next friday")));

    let loaded_link = store.find_by_id(Some(link_id)).unwrap().unwrap();
    assert_eq!(loaded_link.kind(), PostKind::Link);
    assert!(loaded_link
        .render()
        .iter()
        .any(|line| line.contains("https://example.org")));
}

#[test]
fn save_assigns_strictly_increasing_identities() {
    let (_dir, store) = temp_store();

    let mut last_id = 0;
    for kind in [PostKind::Memo, PostKind::Task, PostKind::Link, PostKind::Memo] {
        let post = kind.create();
        let id = store.save(post.as_ref()).unwrap();
        assert!(id > last_id, "expected {id} > {last_id}");
        last_id = id;
    }
}

#[test]
fn absent_id_is_not_found_without_store_access() {
    // No schema bootstrap on purpose: any store access would fault, so a
    // clean None proves the lookup short-circuits.
    let dir = tempfile::tempdir().unwrap();
    let store = SqlitePostStore::new(dir.path().join("untouched.sqlite"));

    assert!(store.find_by_id(None).unwrap().is_none());
}

#[test]
fn unmatched_id_is_not_found_not_a_fault() {
    let (_dir, store) = temp_store();
    assert!(store.find_by_id(Some(999)).unwrap().is_none());
}

#[test]
fn service_drives_the_full_create_save_lookup_cycle() {
    let (_dir, store) = temp_store();
    let service = PostService::new(store);

    let mut post = service.create_post(PostKind::Memo);
    post.state_mut().text = vec!["through the service".into()];
    let id = service.save(post.as_ref()).unwrap();

    let loaded = service.find_by_id(Some(id)).unwrap().unwrap();
    assert_eq!(loaded.kind(), PostKind::Memo);
    assert_eq!(loaded.state().text, vec!["through the service"]);

    let listing = service.find_all(None, None).unwrap();
    assert_eq!(listing.len(), 1);
}

#[test]
fn service_factory_rejects_unknown_tags() {
    let (_dir, store) = temp_store();
    let service = PostService::new(store);

    let post = service.create_post_from_tag("Link").unwrap();
    assert_eq!(post.kind(), PostKind::Link);

    let err = service.create_post_from_tag("Recipe").unwrap_err();
    assert!(matches!(err, CodecError::UnknownType(tag) if tag == "Recipe"));
}
