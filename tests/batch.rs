mod common;

use common::{engine, engine_with, entry, ScriptedRemote};
use readlater::error::RemoteError;
use readlater::model::Context;

#[test]
fn archiveall_skips_entries_already_archived_and_reports_the_rest() {
    let mut engine = engine();
    for i in 1..=4 {
        engine.dispatch(&format!("add https://a.test/{i} --title t{i}"));
    }
    // two of the four already live in the archives
    for i in 1..=2 {
        engine
            .model
            .store_mut(Context::Archives)
            .add(entry(&format!("https://a.test/{i}"), "old copy"))
            .unwrap();
    }

    let reply = engine.dispatch("archiveall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("archived 2"), "{}", reply.message);
    assert_eq!(engine.model.store(Context::Archives).len(), 4);
    // the skipped duplicates stay on the reading list
    assert_eq!(engine.model.store(Context::List).len(), 2);
}

#[test]
fn unarchiveall_mirrors_the_skip_policy() {
    let mut engine = engine();
    engine
        .model
        .store_mut(Context::Archives)
        .add(entry("https://a.test/1", "one"))
        .unwrap();
    engine
        .model
        .store_mut(Context::Archives)
        .add(entry("https://a.test/2", "two"))
        .unwrap();
    engine.dispatch(r#"add https://a.test/1 --title "still listed""#);

    engine.dispatch("archives");
    let reply = engine.dispatch("unarchiveall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("moved 1"), "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 2);
    assert_eq!(engine.model.store(Context::Archives).len(), 1);
}

#[test]
fn deleteall_applies_to_the_filtered_view_only() {
    let mut engine = engine();
    engine.dispatch("add https://a.test/1 --title keep me");
    engine.dispatch("add https://a.test/2 --title drop this");
    engine.dispatch("add https://a.test/3 --title drop that");
    engine.dispatch("find drop");

    let reply = engine.dispatch("deleteall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("deleted 2"), "{}", reply.message);

    let list = engine.model.store(Context::List);
    assert_eq!(list.len(), 1);
    assert_eq!(list.get(0).unwrap().title, "keep me");
}

#[test]
fn addall_pulls_search_results_in_and_counts_only_new_ones() {
    let mut engine = engine();
    engine.dispatch(r#"add https://a.test/1 --title "rust in the list""#);
    engine
        .model
        .store_mut(Context::Archives)
        .add(entry("https://old.test/1", "rust archived"))
        .unwrap();

    engine.dispatch("search rust");
    assert_eq!(engine.model.visible().len(), 2);

    let reply = engine.dispatch("addall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("added 1"), "{}", reply.message);
    assert_eq!(engine.model.store(Context::List).len(), 2);
}

#[test]
fn refreshall_reports_the_stopping_point_after_a_mid_run_failure() {
    let remote = ScriptedRemote::default()
        .with_feed("https://one.test/feed", common::feed("one", &["https://one.test/a"]))
        .with_feed("https://two.test/feed", common::feed("two", &["https://two.test/a"]))
        .with_feed_error(
            "https://bad.test/feed",
            RemoteError::Network("timed out".to_owned()),
        )
        .with_feed("https://four.test/feed", common::feed("four", &["https://four.test/a"]));
    let (mut engine, _) = engine_with(remote);
    for url in [
        "https://one.test/feed",
        "https://two.test/feed",
        "https://bad.test/feed",
        "https://four.test/feed",
    ] {
        engine
            .model
            .store_mut(Context::Feeds)
            .add(entry(url, url))
            .unwrap();
    }

    engine.dispatch("feeds");
    let reply = engine.dispatch("refreshall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(
        reply.message.contains("refreshed 2 of 4 feeds"),
        "{}",
        reply.message
    );
    assert!(reply.message.contains("bad.test"), "{}", reply.message);
    // the two feeds before the failure did their imports, the fourth never ran
    assert_eq!(engine.model.store(Context::List).len(), 2);
}

#[test]
fn refreshall_fails_outright_when_the_first_feed_fails() {
    let remote = ScriptedRemote::default()
        .with_feed_error(
            "https://bad.test/feed",
            RemoteError::Network("timed out".to_owned()),
        )
        .with_feed("https://good.test/feed", common::feed("good", &["https://good.test/a"]));
    let (mut engine, _) = engine_with(remote);
    for url in ["https://bad.test/feed", "https://good.test/feed"] {
        engine
            .model
            .store_mut(Context::Feeds)
            .add(entry(url, url))
            .unwrap();
    }

    engine.dispatch("feeds");
    let reply = engine.dispatch("refreshall");
    assert!(reply.is_error);
    assert!(reply.message.contains("check your connection"), "{}", reply.message);
    // nothing was refreshed
    assert!(engine.model.store(Context::List).is_empty());
}

#[test]
fn refreshall_over_articles_rewrites_each_from_its_page() {
    let remote = ScriptedRemote::default()
        .with_page("https://a.test/1", "<html><head><title>one</title></head></html>")
        .with_page("https://a.test/2", "<html><head><title>two</title></head></html>");
    let (mut engine, _) = engine_with(remote);
    engine.dispatch(r#"add https://a.test/1 --title "stale one""#);
    engine.dispatch(r#"add https://a.test/2 --title "stale two""#);

    let reply = engine.dispatch("refreshall");
    assert!(!reply.is_error, "{}", reply.message);
    assert!(reply.message.contains("refreshed 2 entries"), "{}", reply.message);
    let titles: Vec<_> = engine
        .model
        .store(Context::List)
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["one", "two"]);
}

#[test]
fn batches_over_an_empty_view_do_nothing() {
    let mut engine = engine();
    let reply = engine.dispatch("archiveall");
    assert!(!reply.is_error);
    assert!(reply.message.contains("nothing"), "{}", reply.message);

    let reply = engine.dispatch("refreshall");
    assert!(!reply.is_error);
    assert!(reply.message.contains("nothing to refresh"), "{}", reply.message);
}
