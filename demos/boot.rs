//! # Example: boot
//!
//! Minimal example of a dependency-ordered boot with short-lived components.
//!
//! Demonstrates how to:
//! - Define components with [`FnComponent`] and attach init hooks.
//! - Declare required edges with [`Dependency`] and let resolution order startup.
//! - Run the app to completion without any termination signal.
//!
//! ## Flow
//! ```text
//! register(mailer, logger, config)  (any order)
//!     └─► App::run()
//!           ├─► resolve: config → logger → mailer
//!           ├─► init hooks, sequentially in that order
//!           ├─► run operations, supervised in the background
//!           └─► all runs settle ─► exit
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example boot
//! ```

use muster::{App, Config, Dependency, FnComponent};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Build the app (defaults are fine here)
    let app = App::new(Config::default());

    // 2. Register components in arbitrary order; resolution sorts them out
    app.register(
        FnComponent::new("mailer", "1.0.0", |_app, ready| async move {
            println!("[mailer] draining outbox");
            ready.notify();
            Ok(())
        })
        .with_dependency(Dependency::required("logger"))
        .arc(),
    )?;

    app.register(
        FnComponent::new("logger", "1.0.0", |_app, ready| async move {
            println!("[logger] sink attached");
            ready.notify();
            Ok(())
        })
        .with_dependency(Dependency::required("config"))
        .arc(),
    )?;

    app.register(
        FnComponent::new("config", "1.0.0", |_app, ready| async move {
            println!("[config] values served");
            ready.notify();
            Ok(())
        })
        .with_init(|_app| async {
            println!("[config] init: loading settings");
            Ok(())
        })
        .arc(),
    )?;

    // 3. Inspect the resolved order before running
    let order: Vec<String> = app
        .registry()
        .all()?
        .iter()
        .map(|entry| entry.name().to_string())
        .collect();
    println!("resolved startup order: {order:?}");

    // 4. Run; every component terminates on its own, so this returns
    app.run().await?;

    // 5. Final statuses
    for entry in app.registry().all()? {
        println!("{} => {}", entry.name(), entry.status());
    }
    Ok(())
}
