//! # Example: watchers
//!
//! Observing component lifecycles from outside: status watchers, failure
//! isolation, and recorded run errors.
//!
//! Demonstrates how to:
//! - Await specific statuses with [`ComponentEntry::watch_status`].
//! - See one component fail without disturbing the others.
//! - Read the failure afterwards with [`ComponentEntry::run_error`].
//!
//! ## Flow
//! ```text
//! observers: watch(batch → Finished), watch(flaky → RunFailed)
//! App::run()
//!   ├─► batch finishes   ─► Finished watcher fires
//!   ├─► flaky fails      ─► RunFailed watcher fires, error recorded
//!   └─► all settled      ─► exit, statuses printed
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example watchers
//! ```

use muster::{App, ComponentError, Config, FnComponent, Status};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = App::new(Config::default());

    // 1. A component that completes its work and finishes
    app.register(
        FnComponent::new("batch", "1.0.0", |_app, ready| async move {
            ready.notify();
            println!("[batch] crunching");
            Ok(())
        })
        .arc(),
    )?;

    // 2. A component whose run fails; nobody else is affected
    app.register(
        FnComponent::new("flaky", "0.2.0", |_app, _ready| async {
            Err(ComponentError::failed("upstream refused connection"))
        })
        .arc(),
    )?;

    // 3. Park watchers before anything starts
    let handle = app.handle();
    let batch_done = handle
        .get_component("batch")
        .expect("registered above")
        .watch_status(Status::Finished);
    let flaky_down = handle
        .get_component("flaky")
        .expect("registered above")
        .watch_status(Status::RunFailed);

    let observers = tokio::spawn(async move {
        if batch_done.wait().await {
            println!("[observer] batch finished");
        }
        if flaky_down.wait().await {
            println!("[observer] flaky went down");
        }
    });

    // 4. Run to completion; the failure does not abort the app
    app.run().await?;
    observers.await?;

    // 5. Statuses and the recorded error survive the run
    for entry in app.registry().all()? {
        match entry.run_error() {
            Some(err) => println!("{} => {} ({err})", entry.name(), entry.status()),
            None => println!("{} => {}", entry.name(), entry.status()),
        }
    }
    Ok(())
}
