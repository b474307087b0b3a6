use anyhow::{Context, Result};
use tolk_infrastructure::ConfigStorage;

pub fn show(storage: &ConfigStorage) -> Result<()> {
    let config = storage.load_with_env()?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config as TOML")?;
    println!("# {}", storage.path().display());
    print!("{rendered}");
    Ok(())
}

pub fn init(storage: &ConfigStorage) -> Result<()> {
    if storage.ensure_exists()? {
        println!("Created {}", storage.path().display());
    } else {
        println!("{} already exists", storage.path().display());
    }
    Ok(())
}

pub fn path(storage: &ConfigStorage) {
    println!("{}", storage.path().display());
}
