//! credkit - Credential research toolkit
//!
//! Turns (site code, card number) pairs into every representation needed
//! to spot credentials in dumps and Wiegand captures, reverse-decodes
//! packed RBH 50-bit values, and derives per-card DESFire keys.

mod credential;
mod diversify;
mod export;
mod formats;
mod storage;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use formats::{FormatRegistry, Section};
use storage::Storage;

#[derive(Parser)]
#[command(
    name = "credkit",
    version,
    about = "Credential research toolkit: Kantech/RBH bit-layout codecs and DESFire key diversification"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a Kantech credential (16-bit site / 16-bit card)
    Kantech(EncodeArgs),
    /// Encode an RBH 50-bit credential (16-bit site / 32-bit card)
    Rbh(EncodeArgs),
    /// Reverse-decode a packed RBH 50-bit hex value back to site/card
    Reverse {
        /// Packed hex from a card dump (spaces allowed, e.g. from a hexdump)
        hex: String,
        /// Verify both parity bits instead of ignoring them
        #[arg(long)]
        strict: bool,
    },
    /// Derive a per-card key from a master key and card UID (AES-128-ECB)
    Diversify {
        /// Master key, 32 hex characters
        #[arg(long)]
        master: String,
        /// Card UID, 1-16 bytes of hex (spaces allowed)
        #[arg(long)]
        uid: String,
    },
    /// List supported card formats
    Formats,
}

#[derive(Args)]
struct EncodeArgs {
    /// Site code (decimal)
    #[arg(long, default_value = "")]
    site: String,
    /// Card number (decimal)
    #[arg(long, default_value = "")]
    card: String,
    /// Combined SITE:CARD value (RBH also accepts '-' or a space)
    #[arg(long, default_value = "")]
    combined: String,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
    /// Also write the sheet to the configured export directory
    #[arg(long)]
    export: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "credkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = FormatRegistry::new();

    match cli.command {
        Command::Kantech(args) => run_encode(&registry, "Kantech", &args),
        Command::Rbh(args) => run_encode(&registry, "RBH50", &args),
        Command::Reverse { hex, strict } => run_reverse(&hex, strict),
        Command::Diversify { master, uid } => run_diversify(&master, &uid),
        Command::Formats => {
            for name in registry.list_formats() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn run_encode(registry: &FormatRegistry, format_name: &str, args: &EncodeArgs) -> Result<()> {
    let format = registry
        .get(format_name)
        .ok_or_else(|| anyhow!("unknown format: {format_name}"))?;

    let pair = credential::parse_pair(&args.site, &args.card, &args.combined, &format.limits())?;
    let sections = format.encode_sections(&pair);
    let title = format!(
        "{} CREDENTIAL - {}:{}",
        format.name().to_uppercase(),
        pair.site_code,
        pair.card_number
    );

    if args.json {
        println!("{}", export::render_json(&sections)?);
    } else {
        print_sections(&title, &sections);
    }

    if args.export {
        let storage = Storage::new().context("Failed to set up export storage")?;
        let stem = format!(
            "{}_{}-{}",
            format.name().to_lowercase(),
            pair.site_code,
            pair.card_number
        );
        let (content, ext) = if args.json || storage.config.default_export_format == "json" {
            (export::render_json(&sections)?, "json")
        } else {
            (export::render_text(&title, &sections), "txt")
        };
        let path = export::export_sheet(&storage, &stem, &content, ext)?;
        eprintln!("Exported to {}", path.display());
    }

    Ok(())
}

fn run_reverse(hex: &str, strict: bool) -> Result<()> {
    let pair = if strict {
        formats::rbh50::decode_strict(hex)?
    } else {
        formats::rbh50::decode(hex)?
    };
    println!("Site Code: {} (0x{:04X})", pair.site_code, pair.site_code);
    println!(
        "Card Number: {} (0x{:08X})",
        pair.card_number, pair.card_number
    );
    println!("Combined: {}:{}", pair.site_code, pair.card_number);
    Ok(())
}

fn run_diversify(master: &str, uid: &str) -> Result<()> {
    let derived = diversify::diversify(master, uid)?;
    println!("Derived Key: {derived}");
    Ok(())
}

fn print_sections(title: &str, sections: &[Section]) {
    println!("{title}");
    for section in sections {
        println!();
        println!("{}", section.name);
        for (label, value) in &section.entries {
            println!("  {label}: {value}");
        }
    }
}
