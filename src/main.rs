//! Binary entry point: resolve configuration, start file logging, open the
//! catalog database, load both collections, and drive the Ratatui event loop
//! until the user exits.
use book_catalog_manager::{
    logging, open_store, run_app, App, Config, EntityStore, KeyValueStore, MemoryStore,
    StorageAdapter,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    if let Err(err) = logging::init(&config) {
        eprintln!("logging disabled: {err:#}");
    }

    let (store, notice): (Box<dyn KeyValueStore>, Option<String>) = match open_store(&config) {
        Ok(store) => (Box::new(store), None),
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "falling back to in-memory storage");
            (
                Box::new(MemoryStore::new()),
                Some(format!("Storage unavailable ({err}); changes will not be saved.")),
            )
        }
    };

    let catalog = EntityStore::load(StorageAdapter::new(store), config.id_policy);
    let mut app = App::new(catalog);
    if let Some(notice) = notice {
        app = app.with_notice(notice);
    }
    run_app(&mut app)
}
