use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{ContactForm, HttpContactTransport, NotificationPresenter, SubmitOutcome};
use shared::domain::{ContactField, ContactResult};
use tracing_subscriber::EnvFilter;

/// Sends one message through a running portfolio server's contact endpoint.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server_url: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let transport =
        HttpContactTransport::new(&args.server_url).context("failed to build HTTP client")?;
    let form = ContactForm::new(transport, NotificationPresenter::default());
    form.set_field(ContactField::Name, args.name);
    form.set_field(ContactField::Email, args.email);
    form.set_field(ContactField::Message, args.message);

    match form.submit().await {
        SubmitOutcome::Completed(ContactResult::Success(text)) => {
            println!("{text}");
            Ok(())
        }
        SubmitOutcome::Completed(ContactResult::Error(text)) => bail!(text),
        SubmitOutcome::Ignored => bail!("a submission is already in flight"),
    }
}
