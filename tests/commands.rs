mod common;

use common::{engine, engine_with, entry, ScriptedRemote};
use readlater::error::RemoteError;
use readlater::model::Context;

#[test]
fn second_add_of_the_same_link_fails_and_keeps_the_first() {
    let mut engine = engine();
    let reply = engine.dispatch("add https://a.test --title A");
    assert!(!reply.is_error, "{}", reply.message);

    let reply = engine.dispatch("add https://a.test --title B");
    assert!(reply.is_error);
    assert!(reply.message.contains("already exists"), "{}", reply.message);

    let list = engine.model.store(Context::List);
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0).unwrap().title, "A");
}

#[test]
fn add_enriches_missing_fields_from_the_page() {
    let remote = ScriptedRemote::default().with_page(
        "https://a.test/post",
        r#"<html><head><title>Fetched</title>
           <meta name="description" content="from the page"></head></html>"#,
    );
    let (mut engine, _) = engine_with(remote);
    engine.dispatch("add https://a.test/post");

    let added = engine.model.store(Context::List).get(0).unwrap();
    assert_eq!(added.title, "Fetched");
    assert_eq!(added.description, "from the page");
}

#[test]
fn add_without_a_page_keeps_the_entry_as_typed() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/post --desc note --tag rust");
    let added = engine.model.store(Context::List).get(0).unwrap();
    // no title anywhere, fall back to the link
    assert_eq!(added.title, "https://a.test/post");
    assert_eq!(added.description, "note");
    assert!(added.tags.contains("rust"));
}

#[test]
fn archive_moves_between_stores_and_unarchive_moves_back() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    engine.dispatch("add https://a.test/2 --title two");

    let reply = engine.dispatch("archive 1");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 1);
    assert_eq!(engine.model.store(Context::Archives).len(), 1);

    engine.dispatch("archives");
    let reply = engine.dispatch("unarchive 1");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 2);
    assert!(engine.model.store(Context::Archives).is_empty());
}

#[test]
fn archive_into_an_occupied_slot_is_an_error_and_changes_nothing() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title in-list");
    engine
        .model
        .store_mut(Context::Archives)
        .add(entry("https://a.test/1", "already archived"))
        .unwrap();

    let reply = engine.dispatch("archive 1");
    assert!(reply.is_error);
    assert_eq!(engine.model.store(Context::List).len(), 1);
    assert_eq!(engine.model.store(Context::Archives).len(), 1);
    assert_eq!(
        engine.model.store(Context::Archives).get(0).unwrap().title,
        "already archived"
    );
}

#[test]
fn indices_address_the_displayed_list_not_the_store() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title alpha");
    engine.dispatch("add https://a.test/2 --title beta");
    engine.dispatch("add https://a.test/3 --title beta-two");
    engine.dispatch("find beta");

    // displayed index 1 is `beta`, not `alpha`
    let reply = engine.dispatch("delete 1");
    assert!(!reply.is_error, "{}", reply.message);
    let titles: Vec<_> = engine
        .model
        .store(Context::List)
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["alpha", "beta-two"]);

    // the view shrank with the store
    let reply = engine.dispatch("delete 2");
    assert!(reply.is_error);
    assert!(reply.message.contains("out of range"), "{}", reply.message);
}

#[test]
fn edit_changes_only_the_supplied_fields() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title old --desc keep --tag keep-tag");
    let reply = engine.dispatch("edit 1 --title new");
    assert!(!reply.is_error, "{}", reply.message);

    let edited = engine.model.store(Context::List).get(0).unwrap();
    assert_eq!(edited.title, "new");
    assert_eq!(edited.description, "keep");
    assert!(edited.tags.contains("keep-tag"));
}

#[test]
fn edit_link_collision_with_another_entry_fails() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    engine.dispatch("add https://a.test/2 --title two");

    let reply = engine.dispatch("edit 1 --link https://a.test/2");
    assert!(reply.is_error);
    assert_eq!(engine.model.store(Context::List).get(0).unwrap().title, "one");

    // pointing an entry at its own link is a value change, legal
    let reply = engine.dispatch("edit 1 --link https://a.test/1");
    assert!(!reply.is_error, "{}", reply.message);
}

#[test]
fn select_then_view_renders_the_selection() {
    let (mut engine, rendered) = engine_with(ScriptedRemote::default());
    engine.dispatch("add https://a.test/1 --title one");
    engine.dispatch("add https://a.test/2 --title two");

    engine.dispatch("select 2");
    let reply = engine.dispatch("view");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(rendered.lock().unwrap().as_slice(), ["two"]);

    let reply = engine.dispatch("view 1");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(rendered.lock().unwrap().as_slice(), ["two", "one"]);
}

#[test]
fn view_without_a_selection_is_an_error() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    let reply = engine.dispatch("view");
    assert!(reply.is_error);
    assert!(reply.message.contains("nothing is selected"));
}

#[test]
fn words_are_rejected_with_the_context_they_were_typed_in() {
    let mut engine = engine();
    let reply = engine.dispatch("unarchive 1");
    assert!(reply.is_error);
    assert!(reply.message.contains("list view"), "{}", reply.message);

    engine.dispatch("archives");
    let reply = engine.dispatch("subscribe");
    // accepted everywhere, so the failure is about the missing url
    assert!(reply.message.contains("usage: subscribe"), "{}", reply.message);

    let reply = engine.dispatch("refresh 1");
    assert!(reply.is_error);
    assert!(reply.message.contains("archives view"), "{}", reply.message);
}

#[test]
fn switching_context_resets_the_filter() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title alpha");
    engine.dispatch("add https://a.test/2 --title beta");
    engine.dispatch("find alpha");
    assert_eq!(engine.model.visible().len(), 1);

    engine.dispatch("list");
    assert_eq!(engine.model.visible().len(), 2);
}

#[test]
fn undo_and_redo_roll_the_active_store() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    engine.dispatch("add https://a.test/2 --title two");

    let reply = engine.dispatch("undo");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 1);

    let reply = engine.dispatch("redo");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 2);

    engine.dispatch("undo");
    engine.dispatch("undo");
    let reply = engine.dispatch("undo");
    assert!(reply.is_error);
    assert!(reply.message.contains("nothing to undo"));
}

#[test]
fn subscribe_imports_articles_and_skips_known_links() {
    let remote = ScriptedRemote::default().with_feed(
        "https://blog.test/feed.xml",
        common::feed(
            "Example Blog",
            &["https://blog.test/1", "https://blog.test/2", "https://blog.test/3"],
        ),
    );
    let (mut engine, _) = engine_with(remote);
    engine.dispatch(r#"add https://blog.test/2 --title "already here""#);

    let reply = engine.dispatch("subscribe https://blog.test/feed.xml");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("imported 2"), "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 3);
    assert_eq!(engine.model.store(Context::Feeds).len(), 1);
    assert_eq!(
        engine.model.store(Context::Feeds).get(0).unwrap().title,
        "Example Blog"
    );

    let reply = engine.dispatch("subscribe https://blog.test/feed.xml");
    assert!(reply.is_error);
    assert!(reply.message.contains("already exists"), "{}", reply.message);
}

#[test]
fn malformed_feed_reads_differently_from_a_network_failure() {
    let remote = ScriptedRemote::default()
        .with_feed_error(
            "https://bad.test/feed.xml",
            RemoteError::MalformedFeed("unexpected eof".to_owned()),
        )
        .with_feed_error(
            "https://down.test/feed.xml",
            RemoteError::Network("timed out".to_owned()),
        );
    let (mut engine, _) = engine_with(remote);

    let reply = engine.dispatch("subscribe https://bad.test/feed.xml");
    assert!(reply.is_error);
    assert!(reply.message.contains("not a valid feed"), "{}", reply.message);
    assert!(!reply.message.contains("connection"), "{}", reply.message);

    let reply = engine.dispatch("subscribe https://down.test/feed.xml");
    assert!(reply.is_error);
    assert!(reply.message.contains("check your connection"), "{}", reply.message);
}

#[test]
fn refresh_a_single_feed_imports_only_new_items() {
    let remote = ScriptedRemote::default().with_feed(
        "https://blog.test/feed.xml",
        common::feed("Blog", &["https://blog.test/1"]),
    );
    let (mut engine, _) = engine_with(remote);
    engine.dispatch("subscribe https://blog.test/feed.xml");
    engine.dispatch("feeds");

    // nothing new on the second pass
    let reply = engine.dispatch("refresh 1");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("nothing new"), "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 1);
}

#[test]
fn refresh_an_article_rewrites_it_from_the_page() {
    let remote = ScriptedRemote::default()
        .with_page(
            "https://a.test/1",
            "<html><head><title>updated title</title></head></html>",
        )
        .with_failing_page("https://a.test/2");
    let (mut engine, _) = engine_with(remote);
    engine.dispatch("add https://a.test/1 --title stale");
    engine.dispatch("add https://a.test/2 --title unreachable");

    let reply = engine.dispatch("refresh 1");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(
        engine.model.store(Context::List).get(0).unwrap().title,
        "updated title"
    );

    let reply = engine.dispatch("refresh 2");
    assert!(reply.is_error);
    assert!(reply.message.contains("could not fetch"), "{}", reply.message);
}

#[test]
fn search_snapshots_matches_and_add_pulls_them_into_the_list() {
    let mut engine = engine();
    engine.dispatch(r#"add https://a.test/1 --title "rust weekly""#);
    engine
        .model
        .store_mut(Context::Archives)
        .add(entry("https://old.test/rust-post", "archived rust notes"))
        .unwrap();

    let reply = engine.dispatch("search rust");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.context, Context::Search);
    assert_eq!(engine.model.visible().len(), 2);

    // result 2 is the archived one; adding it must not disturb result 1,
    // which is already in the list
    let reply = engine.dispatch("add 2");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 2);

    let reply = engine.dispatch("add 1");
    assert!(reply.is_error);
    assert!(reply.message.contains("already exists"));
}

#[test]
fn clear_empties_the_active_store_only() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    engine
        .model
        .store_mut(Context::Feeds)
        .add(entry("https://blog.test/feed.xml", "Blog"))
        .unwrap();

    engine.dispatch("clear");
    assert!(engine.model.store(Context::List).is_empty());
    assert_eq!(engine.model.store(Context::Feeds).len(), 1);

    engine.dispatch("feeds");
    engine.dispatch("clear");
    assert!(engine.model.store(Context::Feeds).is_empty());
}

#[test]
fn the_log_keeps_inputs_and_outcomes() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title one");
    engine.dispatch("nonsense");

    let reply = engine.dispatch("history");
    assert!(!reply.is_error);
    assert!(reply.message.contains("add https://a.test/1"), "{}", reply.message);
    assert!(reply.message.contains("err"), "{}", reply.message);
}

#[test]
fn exit_sets_the_out_of_band_flag() {
    let mut engine = engine();
    let reply = engine.dispatch("exit");
    assert!(reply.exit);
    assert!(!reply.is_error);
}

#[test]
fn errors_leave_the_engine_responsive() {
    let mut engine = engine();
    engine.dispatch("delete 4");
    engine.dispatch("???");
    engine.dispatch("add not-a-url");
    let reply = engine.dispatch("add https://a.test/1 --title fine");
    assert!(!reply.is_error, "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 1);
}
