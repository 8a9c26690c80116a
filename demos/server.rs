//! # Example: server
//!
//! Long-lived application: a server component gated on a database's
//! readiness, stopped cooperatively from its shutdown hook.
//!
//! Demonstrates how to:
//! - Block a run operation on a dependency with [`AppHandle::ready_component`].
//! - Wire a `CancellationToken` between `run` and the shutdown hook.
//! - Bound teardown with [`Config::grace`].
//!
//! ## Flow
//! ```text
//! App::run()
//!   ├─► db: open pool, ready.notify(), park until stop
//!   ├─► server: ready_component("db") ─► listen, ready.notify()
//!   └─► Ctrl-C / SIGTERM
//!         ├─► server.shutdown(): cancel token ─► run returns
//!         ├─► db.shutdown(): close pool ─► run returns
//!         └─► all settled within grace ─► exit
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example server
//! # then press Ctrl-C
//! ```

use std::time::Duration;

use muster::{App, Config, Dependency, FnComponent};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Structured logs for the runtime's own diagnostics
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "muster=debug".into()),
        )
        .init();

    // 2. Give teardown a deadline so a wedged run cannot hang the process
    let app = App::new(Config {
        grace: Duration::from_secs(5),
    });

    // 3. Database: ready once the pool is open, parks until told to stop
    let db_stop = CancellationToken::new();
    let db_run = db_stop.clone();
    let db_hook = db_stop.clone();
    app.register(
        FnComponent::new("db", "2.3.1", move |_app, ready| {
            let stop = db_run.clone();
            async move {
                println!("[db] pool open");
                ready.notify();
                stop.cancelled().await;
                println!("[db] pool closed");
                Ok(())
            }
        })
        .with_shutdown(move || {
            let stop = db_hook.clone();
            async move {
                stop.cancel();
                Ok(())
            }
        })
        .arc(),
    )?;

    // 4. Server: waits for the db, then serves until cancelled
    let server_stop = CancellationToken::new();
    let server_run = server_stop.clone();
    let server_hook = server_stop.clone();
    app.register(
        FnComponent::new("server", "1.0.0", move |app, ready| {
            let stop = server_run.clone();
            async move {
                app.ready_component("db").await?;
                println!("[server] listening");
                ready.notify();
                stop.cancelled().await;
                println!("[server] stopped");
                Ok(())
            }
        })
        .with_dependency(Dependency::required("db"))
        .with_shutdown(move || {
            let stop = server_hook.clone();
            async move {
                stop.cancel();
                Ok(())
            }
        })
        .arc(),
    )?;

    // 5. Parks until a termination signal, then tears down in reverse order
    println!("running; press Ctrl-C to stop");
    app.run().await?;
    println!("bye");
    Ok(())
}
