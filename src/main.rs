use anyhow::Result;
use clap::Parser;
use gmail_digest::cli::{Cli, Commands};
use gmail_digest::client::GmailMailboxClient;
use gmail_digest::config::Config;
use gmail_digest::error::DigestError;
use gmail_digest::pipeline::DigestPipeline;
use gmail_digest::summarizer::OpenAiSummarizer;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Exit with proper code on error
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        eprintln!("\nFor help, run: gmail-digest --help");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Install default crypto provider for rustls
    // This is necessary because multiple dependencies use different crypto providers
    // On non-Windows platforms, use aws-lc-rs (better performance, FIPS support)
    // On Windows, use ring (better compatibility, no NASM/CMake required)
    #[cfg(not(windows))]
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    #[cfg(windows)]
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install default crypto provider"))?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing with level based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_digest=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("gmail_digest=info,warn,error"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    match cli.command {
        Commands::Auth { force } => {
            tracing::info!("Authenticating with Gmail API...");

            // Ensure token cache directory exists
            if let Some(parent) = cli.token_cache.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            // Delete existing token if force flag is set
            if force && cli.token_cache.exists() {
                tokio::fs::remove_file(&cli.token_cache).await?;
                tracing::info!("Removed existing token cache");
            }

            // Initialize Gmail hub (will trigger OAuth flow if needed)
            let hub =
                gmail_digest::auth::initialize_gmail_hub(&cli.credentials, &cli.token_cache)
                    .await?;

            println!("Successfully authenticated with Gmail API");
            println!("Token cached at: {:?}", cli.token_cache);

            // Test the connection - must specify scope to avoid triggering another OAuth flow
            let (_, profile) = hub
                .users()
                .get_profile("me")
                .add_scope("https://www.googleapis.com/auth/gmail.modify")
                .doit()
                .await
                .map_err(DigestError::from)?;
            println!(
                "Connected to account: {}",
                profile.email_address.unwrap_or_default()
            );

            Ok(())
        }

        Commands::Run { dry_run } => {
            tracing::info!("Starting digest run");
            if dry_run {
                println!("Running in DRY RUN mode - no changes will be made");
            }

            let config = Config::load(&cli.config).await?;

            let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
                DigestError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
            })?;

            let hub =
                gmail_digest::auth::initialize_gmail_hub(&cli.credentials, &cli.token_cache)
                    .await?;
            let client = GmailMailboxClient::new(hub);
            let summarizer = OpenAiSummarizer::new(api_key, &config.summarizer);

            let report = DigestPipeline::new(&client, &summarizer, &config, dry_run)
                .run()
                .await?;

            // Display summary
            println!("\n========================================");
            println!("Digest Run Summary");
            println!("========================================");
            println!("Run ID: {}", report.run_id);
            println!("Duration: {} seconds", report.duration_seconds);
            println!("Unread messages listed: {}", report.listed);
            println!("Messages summarized: {}", report.summarized);
            println!("Messages skipped (no text): {}", report.skipped);
            println!("Digest sent: {}", if report.digest_sent { "yes" } else { "no" });
            println!("========================================");

            // A failed send is deliberately not a process failure; the run
            // completed and the messages are already archived.
            Ok(())
        }

        Commands::InitConfig { output, force } => {
            tracing::info!("Generating example configuration file");

            if output.exists() && !force {
                return Err(DigestError::ConfigError(format!(
                    "Configuration file already exists at {:?}. Use --force to overwrite.",
                    output
                ))
                .into());
            }

            Config::create_example(&output).await?;

            println!("Created example configuration file at: {:?}", output);
            println!("\nPlease edit this file to customize your settings.");
            println!("Key settings to review:");
            println!("  - digest.recipient: Where the digest is delivered (and sent from)");
            println!("  - summarizer.model: Chat-completion model used per message");

            Ok(())
        }
    }
}
