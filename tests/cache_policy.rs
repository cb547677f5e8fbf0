use lazy_di::{CachePolicy, ContainerOptions, Resolver, ServiceCollection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn weak() -> ContainerOptions {
    ContainerOptions::new().cache_policy(CachePolicy::Weak)
}

#[test]
fn test_weak_cache_shares_live_instance() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let sp = ServiceCollection::new()
        .add("session", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::from("session"))
        })
        .with_options(weak())
        .build();

    let first = sp.get_required::<String>("session");
    let second = sp.get_required::<String>("session");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_weak_cache_rebuilds_after_drop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let sp = ServiceCollection::new()
        .add("session", move |_| Ok(counter.fetch_add(1, Ordering::SeqCst)))
        .with_options(weak())
        .build();

    let first = sp.get_required::<usize>("session");
    assert_eq!(*first, 0);
    drop(first);

    assert!(!sp.is_built(&"session".into()));
    assert_eq!(sp.built_count(), 0);

    let second = sp.get_required::<usize>("session");
    assert_eq!(*second, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_weak_cache_keeps_dependencies_held_by_dependents() {
    struct Pool;
    struct Repo {
        _pool: Arc<Pool>,
    }

    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();

    let sp = ServiceCollection::new()
        .add("pool", move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Pool)
        })
        .add("repo", |r| Ok(Repo { _pool: r.get("pool")? }))
        .with_options(weak())
        .build();

    let repo = sp.get_required::<Repo>("repo");
    let pool = sp.get_required::<Pool>("pool");
    assert!(Arc::ptr_eq(&repo._pool, &pool));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn test_weak_cache_instances_stay_alive() {
    let sp = ServiceCollection::new()
        .add_instance("port", 8080u16)
        .with_options(weak())
        .build();

    // The registration itself holds the value
    let port = sp.get_required::<u16>("port");
    drop(port);
    assert_eq!(*sp.get_required::<u16>("port"), 8080);
}

#[test]
fn test_retain_cache_outlives_callers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let sp = ServiceCollection::new()
        .add("session", move |_| Ok(counter.fetch_add(1, Ordering::SeqCst)))
        .build();

    drop(sp.get_required::<usize>("session"));
    drop(sp.get_required::<usize>("session"));

    assert!(sp.is_built(&"session".into()));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
