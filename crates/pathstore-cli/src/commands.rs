use std::fs;
use std::io::Write;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use pathstore_server::{PathServer, ServerConfig};
use pathstore_store::{PathStore, RedbPathStore, StoreError};
use pathstore_types::{PathKey, StoredValue, DEFAULT_BINARY_CONTENT_TYPE};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Get(args) => cmd_get(args),
        Command::Put(args) => cmd_put(args),
        Command::Delete(args) => cmd_delete(args),
    }
}

/// Resolve the effective config: file first, then flag overrides.
fn load_config(args: &StoreArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    Ok(config)
}

fn open_store(config: &ServerConfig) -> anyhow::Result<RedbPathStore> {
    RedbPathStore::open(&config.store_config())
        .with_context(|| format!("failed to open store in {}", config.data_dir.display()))
}

fn parse_key(raw: &str) -> anyhow::Result<PathKey> {
    PathKey::new(raw).context("path is required")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for Ctrl-C; serving until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = load_config(&args.store)?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let store = Arc::new(open_store(&config)?);
    println!(
        "{} Pathstore on {} (data: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        config.data_dir.display()
    );
    println!("  GET    /{{path}}  retrieve data");
    println!("  POST   /{{path}}  store JSON {{\"content\", \"content_type\"}}");
    println!("  PUT    /{{path}}  store raw body with Content-Type header");
    println!("  DELETE /{{path}}  delete data");

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let served = runtime.block_on(
        PathServer::new(config, store.clone()).serve_with_shutdown(shutdown_signal()),
    );
    // Waits for any store calls still on the blocking pool.
    drop(runtime);

    match Arc::try_unwrap(store) {
        Ok(store) => store.close(),
        Err(_) => tracing::warn!("store still referenced at shutdown; it closes when released"),
    }
    served.context("server failed")
}

fn cmd_get(args: GetArgs) -> anyhow::Result<()> {
    let config = load_config(&args.store)?;
    let store = open_store(&config)?;
    let value = get_value(&store, &args.path)?;

    eprintln!("{} {}", "content-type:".dimmed(), value.content_type);
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(value.body())?;
    stdout.flush()?;
    Ok(())
}

fn cmd_put(args: PutArgs) -> anyhow::Result<()> {
    let config = load_config(&args.store)?;
    let value = match (&args.content, &args.file) {
        (Some(text), _) => StoredValue::text(
            text.clone(),
            args.content_type.clone().unwrap_or_else(|| "text/plain".into()),
        ),
        (None, Some(file)) => {
            let data = fs::read(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            StoredValue::binary(
                data,
                args.content_type
                    .clone()
                    .unwrap_or_else(|| DEFAULT_BINARY_CONTENT_TYPE.into()),
            )
        }
        (None, None) => bail!("one of --content or --file is required"),
    };

    let store = open_store(&config)?;
    let size = put_value(&store, &args.path, &value)?;
    println!(
        "{} Data stored at path: {} ({size} bytes)",
        "✓".green().bold(),
        args.path.yellow()
    );
    store.close();
    Ok(())
}

fn cmd_delete(args: DeleteArgs) -> anyhow::Result<()> {
    let config = load_config(&args.store)?;
    let store = open_store(&config)?;
    delete_value(&store, &args.path)?;
    println!(
        "{} Data deleted at path: {}",
        "✓".green().bold(),
        args.path.yellow()
    );
    store.close();
    Ok(())
}

fn get_value(store: &dyn PathStore, raw: &str) -> anyhow::Result<StoredValue> {
    let key = parse_key(raw)?;
    match store.get(&key) {
        Ok(value) => Ok(value),
        Err(StoreError::NotFound(_)) => bail!("Path '{key}' not found"),
        Err(e) => Err(e).context("database error"),
    }
}

fn put_value(store: &dyn PathStore, raw: &str, value: &StoredValue) -> anyhow::Result<usize> {
    let key = parse_key(raw)?;
    store.put(&key, value).context("failed to store data")?;
    Ok(value.body_len())
}

/// Same rule as `DELETE /{path}`: a missing path is an error.
fn delete_value(store: &dyn PathStore, raw: &str) -> anyhow::Result<()> {
    get_value(store, raw)?;
    let key = parse_key(raw)?;
    store.delete(&key).context("failed to delete data")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathstore_store::InMemoryPathStore;

    #[test]
    fn put_get_delete_cycle() {
        let store = InMemoryPathStore::new();
        let value = StoredValue::text("# Welcome", "text/markdown");
        assert_eq!(put_value(&store, "docs/readme", &value).unwrap(), 9);
        assert_eq!(get_value(&store, "docs/readme").unwrap(), value);

        delete_value(&store, "docs/readme").unwrap();
        let err = delete_value(&store, "docs/readme").unwrap_err();
        assert_eq!(err.to_string(), "Path 'docs/readme' not found");
    }

    #[test]
    fn empty_path_is_rejected() {
        let store = InMemoryPathStore::new();
        assert!(get_value(&store, "").is_err());
    }

    #[test]
    fn data_dir_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("pathstore.toml");
        fs::write(&file, "data_dir = \"/from/file\"\nbind_addr = \"127.0.0.1:9999\"\n").unwrap();

        let args = StoreArgs {
            config: Some(file),
            data_dir: Some(dir.path().join("flag")),
        };
        let config = load_config(&args).unwrap();
        assert_eq!(config.data_dir, dir.path().join("flag"));
        assert_eq!(config.bind_addr.port(), 9999);
    }

    #[test]
    fn open_store_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let args = StoreArgs {
            config: None,
            data_dir: Some(dir.path().join("nested/data")),
        };
        let store = open_store(&load_config(&args).unwrap()).unwrap();
        put_value(&store, "k", &StoredValue::binary(vec![1, 2], "application/x-test")).unwrap();
        assert!(dir.path().join("nested/data").join(pathstore_store::DB_FILE_NAME).exists());
        store.close();
    }
}
