use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::load_settings, parse_cutoff, ClientError, FieldChange, FormController, MatchmakingApi,
    MatchmakingClient, SubmitOutcome, SUCCESS_MESSAGE,
};
use shared::{
    domain::{MatchPreference, ProductArea, Role, TalkDuration},
    protocol::AddParticipantRequest,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adlib", about = "Get matched with a colleague for a spontaneous chat")]
struct Cli {
    /// Base URL of the matching service; overrides adlib.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join the matching queue.
    Submit(SubmitArgs),
    /// Leave the matching queue.
    Leave,
    /// List the accepted durations, roles, product areas and match preferences.
    Options,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    /// When you stop being free: HH:MM, h:MM AM/PM, or an RFC 3339 timestamp.
    #[arg(long)]
    until: String,
    #[arg(long, default_value = "15")]
    duration: TalkDuration,
    #[arg(long)]
    role: Option<Role>,
    #[arg(long)]
    product_area: Option<ProductArea>,
    #[arg(long)]
    match_preference: Option<MatchPreference>,
    /// Do not keep these preferences for next time.
    #[arg(long)]
    no_save_preference: bool,
    /// Print the request body instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

impl SubmitArgs {
    fn field_changes(&self) -> Vec<FieldChange> {
        let mut changes = vec![
            FieldChange::TimeAvailableUntil(parse_cutoff(&self.until, &Local::now())),
            FieldChange::Duration(self.duration),
        ];
        changes.extend(self.role.map(FieldChange::Role));
        changes.extend(self.product_area.map(FieldChange::ProductArea));
        changes.extend(self.match_preference.map(FieldChange::MatchPreference));
        changes.push(FieldChange::SavePreference(!self.no_save_preference));
        changes
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    debug!(server_url = %settings.server_url, "resolved settings");

    match cli.command {
        Command::Options => print_options(),
        Command::Leave => {
            let client = build_client(&settings)?;
            let ack = client
                .remove_participant()
                .await
                .context("failed to leave the matching queue")?;
            if ack.is_empty() {
                println!("Left the matching queue.");
            } else {
                println!("{ack}");
            }
        }
        Command::Submit(args) => submit(&settings, args).await?,
    }

    Ok(())
}

fn build_client(settings: &client_core::config::Settings) -> Result<MatchmakingClient> {
    MatchmakingClient::with_timeout(&settings.server_url, settings.request_timeout())
        .with_context(|| format!("cannot reach matching service at {}", settings.server_url))
}

async fn submit(settings: &client_core::config::Settings, args: SubmitArgs) -> Result<()> {
    let mut controller = FormController::new(Utc::now());
    for change in args.field_changes() {
        controller
            .try_change(change)
            .with_context(|| format!("cannot set {:?}", change.field()))?;
    }

    if args.dry_run {
        let details = match controller.begin_submit(Utc::now()) {
            Ok(details) => details,
            Err(err) => bail!(user_message(&controller, &err)),
        };
        let body = serde_json::to_string_pretty(&AddParticipantRequest {
            form_details: details,
        })?;
        println!("{body}");
        return Ok(());
    }

    let client = build_client(settings)?;
    match controller.submit_with(&client, Utc::now()).await {
        Ok(SubmitOutcome::Confirmed(_)) => println!("{SUCCESS_MESSAGE}"),
        Ok(SubmitOutcome::Unconfirmed) => {
            println!("Request sent; the matching service did not confirm it.")
        }
        Err(err) => bail!(user_message(&controller, &err)),
    }
    Ok(())
}

fn user_message(controller: &FormController, err: &ClientError) -> String {
    controller
        .last_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

fn print_options() {
    println!("Durations:");
    for duration in TalkDuration::ALL {
        println!("  {:<4} {duration}", duration.minutes());
    }
    println!("Roles:");
    for role in Role::ALL {
        println!("  {:<40} {role}", role.slug());
    }
    println!("Product areas:");
    for area in ProductArea::ALL {
        println!("  {:<40} {area}", area.slug());
    }
    println!("Match preferences:");
    for preference in MatchPreference::ALL {
        println!("  {:<40} {}", preference.wire_value(), preference.label());
    }
}
