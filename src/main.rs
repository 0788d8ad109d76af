#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up logging; RUST_LOG controls the level
    env_logger::init();

    // File dialogs run as tokio tasks, so keep a runtime entered for the app's lifetime
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    blueprint_editor::run_app()?;
    Ok(())
}

// The web build starts from `blueprint_editor::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
