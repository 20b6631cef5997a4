use clap::{Parser, Subcommand, ValueEnum};
use std::fs::File;
use std::io::{self, stdin, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dns_types::protocol::types::Message;

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

// the doc comments for these types turn into the CLI help text
#[derive(Parser)]
/// Inspect DNS messages in their binary wire format.
///
/// Only the header and the first question of a message are decoded.
struct Args {
    /// Format of the diagnostic logs written to stderr.  Set `RUST_LOG`
    /// to choose which logs are written.
    #[clap(
        long,
        value_enum,
        default_value_t = LogFormat::Human,
        env = "DNSDECODE_LOG_FORMAT",
        global = true
    )]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a DNS message and output its contents
    ///
    /// Reads one message in its binary format and prints the header and
    /// question as text.  Errors are printed in place of the message.
    Decode {
        /// Read the message from stdin (the default)
        #[clap(long, action(clap::ArgAction::SetTrue), conflicts_with = "path")]
        stdin: bool,

        /// Path of the file to be decoded
        #[clap(short, long, value_parser)]
        path: Option<PathBuf>,
    },
}

fn begin_logging(format: LogFormat) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);

    match format {
        LogFormat::Human => subscriber.init(),
        LogFormat::Json => subscriber.json().init(),
    }
}

fn read_message(path: Option<&Path>) -> io::Result<Vec<u8>> {
    let mut octets = Vec::new();
    match path {
        Some(path) => File::open(path)?.read_to_end(&mut octets)?,
        None => stdin().read_to_end(&mut octets)?,
    };
    Ok(octets)
}

/// Decoding failures are reported on stdout, in place of the message,
/// and do not change the exit status.
fn decode(path: Option<&Path>) {
    let octets = match read_message(path) {
        Ok(octets) => octets,
        Err(error) => {
            tracing::warn!(?path, ?error, "could not read message");
            println!("{error}");
            return;
        }
    };

    tracing::debug!(length = %octets.len(), "read message");

    match Message::from_octets(&octets) {
        Ok(message) => println!("{message}"),
        Err(error) => {
            tracing::info!(?error, "could not decode message");
            println!("{error}");
        }
    }
}

fn main() {
    let args = Args::parse();

    begin_logging(args.log_format);

    match args.command {
        Command::Decode { stdin: _, path } => decode(path.as_deref()),
    }
}
