//! Wires a small application graph and shows lazy construction, caching,
//! cycle reporting and the cache reset on `add`.
//!
//! Run with `RUST_LOG=lazy_di=debug cargo run --example service_graph`.

use lazy_di::{DiError, LoggingObserver, MetricsObserver, Resolver, ServiceCollection};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

struct Config {
    database_url: String,
    port: u16,
}

struct Database {
    url: String,
}

struct UserRepository {
    db: Arc<Database>,
}

struct Server {
    config: Arc<Config>,
    users: Arc<UserRepository>,
}

fn main() -> Result<(), DiError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let metrics = Arc::new(MetricsObserver::new());
    let services = ServiceCollection::new()
        .add("config", |_| {
            Ok(Config {
                database_url: "postgres://localhost/app".to_string(),
                port: 8080,
            })
        })
        .add("database", |r| {
            let config = r.get::<Config>("config")?;
            Ok(Database {
                url: config.database_url.clone(),
            })
        })
        .add("users", |r| Ok(UserRepository { db: r.get("database")? }))
        .add("server", |r| {
            Ok(Server {
                config: r.get("config")?,
                users: r.get("users")?,
            })
        })
        .with_observer(Arc::new(LoggingObserver::new()))
        .with_observer(metrics.clone());

    let provider = services.build();
    println!("registered: {} services, built: {}", provider.len(), provider.built_count());

    let server = provider.get::<Server>("server")?;
    println!(
        "server on port {} using {}",
        server.config.port, server.users.db.url
    );
    println!("built after first request: {}", provider.built_count());

    let again = provider.get::<Server>("server")?;
    println!("same server instance: {}", Arc::ptr_eq(&server, &again));

    // Adding to a built provider starts over with an empty cache
    let extended = provider.add_instance("feature_flags", vec!["beta".to_string()]);
    let rebuilt = extended.get::<Server>("server")?;
    println!("extended provider rebuilt server: {}", !Arc::ptr_eq(&server, &rebuilt));

    let cyclic = ServiceCollection::new()
        .add("a", |r| Ok(r.get::<u8>("b")?))
        .add("b", |r| Ok(r.get::<u8>("a")?))
        .build();
    if let Err(error) = cyclic.get::<u8>("a") {
        println!("{}", error);
    }

    println!(
        "builds: {}, cache hits: {}, failures: {}",
        metrics.build_count(),
        metrics.cache_hit_count(),
        metrics.failure_count()
    );
    Ok(())
}
