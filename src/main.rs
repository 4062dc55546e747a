//! CLI entry point for `ses-sender`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};

use ses_sender::archive::{self, Compressor};
use ses_sender::config::{self, Overrides};
use ses_sender::logging;
use ses_sender::mail::eml::EmlTransport;
use ses_sender::mail::ses::SesTransport;
use ses_sender::mail::MailTransport;
use ses_sender::sender::Sender;

/// Send a file by email using AWS SES.
#[derive(Parser)]
#[command(name = "ses-sender", version, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to send
    #[arg(value_name = "ATTACHMENT")]
    attachment: Option<PathBuf>,

    /// Sender address (must be verified in SES)
    #[arg(value_name = "SENDER_EMAIL")]
    sender_email: Option<String>,

    /// One or more recipient addresses
    #[arg(value_name = "RECIPIENT_EMAIL")]
    recipient_email: Vec<String>,

    /// Subject prefix [default: "AWS SES Email"]
    #[arg(long)]
    subject: Option<String>,

    /// Message body [default: names the sending host]
    #[arg(long)]
    msg: Option<String>,

    /// Compress the attachment (zip, split into parts above 5 MB)
    #[arg(long)]
    compress: bool,

    /// YAML file providing any of the parameters above
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// AWS region [default: us-east-1]
    #[arg(long)]
    region: Option<String>,

    /// Write messages as .eml files into DIR instead of sending them
    #[arg(long, value_name = "DIR")]
    dry_run: Option<PathBuf>,

    /// Print the sent messages as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Reassemble split archive parts into a single zip file
    Join {
        /// Parts in any order; they are sorted by name
        #[arg(required = true)]
        parts: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => return cmd_completions(shell),
        Some(Commands::Manpage) => return cmd_manpage(),
        _ => {}
    }

    // Load configuration
    let loaded = config::load_config(cli.config.as_deref())?;
    let config = loaded.config.clone();

    // Configure logging: stderr + log file
    let log_level = match cli.verbose {
        0 => config.log_level(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    logging::init(log_level, &config.log_file());
    loaded.report();

    match cli.command {
        Some(Commands::Join { parts, output }) => cmd_join(parts, &output),
        _ => cmd_send(cli, &config),
    }
}

/// Compress (optionally) and send the attachment.
///
/// A delivery failure is logged and ends the process with exit code 1;
/// parts after the failing one are not attempted.
fn cmd_send(cli: Cli, config: &config::Config) -> anyhow::Result<()> {
    let settings = config.resolve(Overrides {
        attachment: cli.attachment,
        sender_email: cli.sender_email,
        recipient_email: cli.recipient_email,
        subject: cli.subject,
        msg: cli.msg,
        compress: cli.compress,
        region: cli.region,
    })?;

    let transport: Box<dyn MailTransport> = match &cli.dry_run {
        Some(dir) => Box::new(EmlTransport::new(dir)?),
        None => Box::new(SesTransport::new(settings.region.as_str())?),
    };
    let sender = Sender::new(transport);

    match sender.send_request(&settings.request, &Compressor::new()) {
        Ok(sent) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&sent)?);
            }
            Ok(())
        }
        Err(e) if e.is_delivery_failure() => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

/// Reassemble parts in name order.
fn cmd_join(mut parts: Vec<PathBuf>, output: &Path) -> anyhow::Result<()> {
    parts.sort();
    let bytes = archive::join_parts(&parts, output)?;

    use humansize::{format_size, BINARY};
    println!(
        "  Joined {} part(s) into {} ({})",
        parts.len(),
        output.display(),
        format_size(bytes, BINARY)
    );
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "ses-sender", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
