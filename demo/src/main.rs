//! ADT walkthrough.
//!
//! Logs in, searches, creates a local report, edits it under a lock,
//! activates it and deletes it again. Every step logs its outcome; search
//! hits are printed to stdout as JSON.
//!
//! ```bash
//! ADT_HOST=http://vhcala4hci:50000 ADT_USER=DEVELOPER ADT_PASSWORD=... \
//!   cargo run -p adtkit-demo -- --program Z_ADTKIT_DEMO
//! ```

use std::time::Duration;

use adtkit_client::{
    AdtClient, AdtClientBuilder, HttpTransport, ObjectType, PrettyPrintSettings, PrettyPrintStyle,
    SourceVersion,
};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SOURCE: &str = "report z_adtkit_demo.\nwrite 'Hello from adtkit'.\n";

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "adtkit-demo", version, about = "Runs an ADT edit cycle against a live system")]
struct Args {
    /// Base URL of the system, e.g. http://host:50000
    #[arg(long, env = "ADT_HOST")]
    host: String,

    /// User name
    #[arg(long, env = "ADT_USER")]
    user: String,

    /// Password
    #[arg(long, env = "ADT_PASSWORD", hide_env_values = true)]
    password: String,

    /// Logon client (sap-client)
    #[arg(long, env = "ADT_CLIENT")]
    client: Option<String>,

    /// Logon language (sap-language)
    #[arg(long, env = "ADT_LANGUAGE")]
    language: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Report to create; it is deleted again at the end
    #[arg(long, default_value = "Z_ADTKIT_DEMO")]
    program: String,

    /// Search pattern
    #[arg(long, default_value = "Z*")]
    query: String,
}

fn program_uri(name: &str) -> String {
    format!(
        "{}/{}",
        ObjectType::Program.collection_uri(""),
        name.to_lowercase()
    )
}

async fn edit_cycle(client: &mut AdtClient<HttpTransport>, args: &Args) -> Result<()> {
    let uri = program_uri(&args.program);
    let source_uri = format!("{uri}/source/main");

    client
        .create(ObjectType::Program, &args.program, "$TMP", "adtkit walkthrough")
        .await
        .context("create")?;

    let current = client
        .get_object_source(&source_uri, SourceVersion::Inactive)
        .await
        .context("read source")?;
    info!(lines = current.lines().count(), "Read initial source");

    client
        .set_pretty_print_settings(&PrettyPrintSettings::new(true, PrettyPrintStyle::KeywordUpper))
        .await
        .context("pretty printer settings")?;
    let formatted = client.pretty_print(SOURCE).await.context("pretty print")?;

    let handle = client.lock(&uri).await.context("lock for edit")?;
    let written = client.set_object_source(&source_uri, &formatted, &handle).await;
    client.unlock(&uri, &handle).await.context("unlock after edit")?;
    written.context("write source")?;

    if let Err(err) = client.activate(&args.program, &uri).await {
        warn!(error = %err, "Continuing with cleanup");
    }

    let handle = client.lock(&uri).await.context("lock for delete")?;
    let deleted = client.delete(&uri, &handle).await;
    if let Err(err) = client.unlock(&uri, &handle).await {
        // the object may already be gone together with its lock
        warn!(error = %err, "Unlock after delete refused");
        client.revert_to_stateless();
    }
    deleted.context("delete")?;

    info!(program = %args.program, "Walkthrough finished");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut builder = AdtClientBuilder::new(&args.host)
        .credentials(&args.user, &args.password)
        .timeout(Duration::from_secs(args.timeout));
    if let Some(client) = &args.client {
        builder = builder.sap_client(client);
    }
    if let Some(language) = &args.language {
        builder = builder.language(language);
    }
    let mut client = builder.build().context("building client")?;

    client.login().await.context("login")?;

    let hits = client.search_object(&args.query, 10).await.context("search")?;
    info!(query = %args.query, hits = hits.len(), "Search finished");
    println!("{}", serde_json::to_string_pretty(&hits)?);

    edit_cycle(&mut client, &args).await
}
