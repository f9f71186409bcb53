use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;
use tusklist::AccountId;
use tusklist::client::MastodonClient;
use tusklist::relations::{BlockActions, FetchPhase, RelationshipKind, RelationshipList};
use tusklist::url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about = "tusklist - Mastodon relationship lists")]
struct Args {
    /// Instance base URL (e.g., https://mastodon.social)
    #[arg(short, long, env = "TUSKLIST_INSTANCE")]
    instance: Url,

    /// OAuth access token
    #[arg(short, long, env = "TUSKLIST_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a relationship list
    List {
        /// follows, followers, blocks or mutes
        kind: RelationshipKind,

        /// Account whose follows or followers to list
        #[arg(short, long)]
        account: Option<AccountId>,

        /// Stop after this many pages
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Block an account
    Block {
        /// Account id
        id: AccountId,
    },
    /// Unblock an account
    Unblock {
        /// Account id
        id: AccountId,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .build()
        .into_diagnostic()?;
    let mut client = MastodonClient::new(http, args.instance);
    if let Some(token) = args.token {
        client.set_token(token);
    }
    let client = Arc::new(client);

    match args.command {
        Command::List {
            kind,
            account,
            pages,
        } => {
            let list = RelationshipList::from_client(client, kind, account)?;
            list.refresh().await?;
            let mut fetched = 1;
            while fetched < pages && list.phase() == FetchPhase::Loading {
                list.load_more().await?;
                fetched += 1;
            }

            for entry in list.entries().iter() {
                let marker = if entry.blocked { " [blocked]" } else { "" };
                println!(
                    "{}\t@{}\t{}{}",
                    entry.account.id,
                    entry.account.acct,
                    entry.account.display_name_or_username(),
                    marker
                );
            }
            if list.phase() == FetchPhase::EndOfData {
                eprintln!("\n{} accounts (end of list)", list.entries().len());
            } else {
                eprintln!("\n{} accounts (more available)", list.entries().len());
            }
        }
        Command::Block { id } => {
            let relationship = client.set_blocked(&id, true).await?;
            println!("blocked {} (blocking: {})", relationship.id, relationship.blocking);
        }
        Command::Unblock { id } => {
            let relationship = client.set_blocked(&id, false).await?;
            println!("unblocked {} (blocking: {})", relationship.id, relationship.blocking);
        }
    }

    Ok(())
}
