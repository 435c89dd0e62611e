use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pathstore",
    about = "Pathstore: path-addressed content store over HTTP",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the value stored at a path
    Get(GetArgs),
    /// Store a value at a path
    Put(PutArgs),
    /// Delete the value stored at a path
    Delete(DeleteArgs),
}

/// Where to find the data directory.
#[derive(Args, Clone, Debug, Default)]
pub struct StoreArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Data directory (overrides the config file)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[derive(Args)]
pub struct GetArgs {
    pub path: String,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["content", "file"])))]
pub struct PutArgs {
    pub path: String,
    /// Text content to store
    #[arg(long)]
    pub content: Option<String>,
    /// File whose bytes are stored as binary content
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// MIME type; defaults to text/plain for --content and
    /// application/octet-stream for --file
    #[arg(long)]
    pub content_type: Option<String>,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args)]
pub struct DeleteArgs {
    pub path: String,
    #[command(flatten)]
    pub store: StoreArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_overrides_parse() {
        let cli = Cli::try_parse_from([
            "pathstore", "serve", "--bind", "0.0.0.0:9000", "--data-dir", "/tmp/ps",
        ])
        .unwrap();
        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
        assert_eq!(args.store.data_dir, Some(PathBuf::from("/tmp/ps")));
    }

    #[test]
    fn put_requires_a_source() {
        assert!(Cli::try_parse_from(["pathstore", "put", "docs/readme"]).is_err());
        assert!(Cli::try_parse_from([
            "pathstore", "put", "docs/readme", "--content", "x", "--file", "f",
        ])
        .is_err());
    }
}
