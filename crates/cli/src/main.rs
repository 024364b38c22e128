//! Chaat Cart CLI - drive the ordering cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add items and view the cart
//! chaat-cart add --id 1 --name "Pani Puri" --price 6.99
//! chaat-cart show
//!
//! # Adjust or remove lines
//! chaat-cart adjust 1 2
//! chaat-cart remove 1
//!
//! # Check out with a phone number
//! chaat-cart checkout "(416) 555-1234"
//!
//! # Phone helpers
//! chaat-cart phone check "+1 416 555 1234"
//! chaat-cart phone format 4165551234
//! ```
//!
//! # Commands
//!
//! - `show` / `add` / `remove` / `adjust` / `clear` - Cart operations
//! - `checkout` - Phone entry and submission
//! - `phone check` / `phone format` - Phone field behavior on its own
//!
//! The cart is stored as JSON under `CHAAT_CART_DIR`, in the same format the
//! ordering page keeps in local storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use chaat_cart_core::{ItemId, Price};
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod storage;
mod view;

use commands::CliError;
use commands::cart::NewItem;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "chaat-cart")]
#[command(author, version, about = "Chaat cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart and its totals
    Show,
    /// Add one portion of a menu item
    Add {
        /// Menu item id (numeric ids are stored as numbers)
        #[arg(long)]
        id: ItemId,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Unit price in dollars
        #[arg(short, long)]
        price: Price,

        /// Menu description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Image reference
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Remove a line from the cart
    Remove {
        /// Menu item id
        id: ItemId,
    },
    /// Change a line's quantity (removes it at zero)
    Adjust {
        /// Menu item id
        id: ItemId,

        /// Amount to add; negative to decrease
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Remove every line
    Clear,
    /// Enter a phone number and check out
    Checkout {
        /// Phone number as the customer would type it
        phone: String,
    },
    /// Phone number helpers
    Phone {
        #[command(subcommand)]
        action: PhoneAction,
    },
}

#[derive(Subcommand)]
enum PhoneAction {
    /// Validate and canonicalize a number
    Check {
        /// Phone number input
        input: String,
    },
    /// Pretty-print a number as (AAA) XXX-XXXX
    Format {
        /// Phone number input
        input: String,
    },
}

fn init_tracing() {
    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chaat_cart_cli=info,chaat_cart_core=warn".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_env;

    let output = match cli.command {
        Commands::Show => commands::cart::show(&config()?),
        Commands::Add {
            id,
            name,
            price,
            description,
            image,
        } => commands::cart::add(
            &config()?,
            NewItem {
                id,
                name,
                price,
                description,
                image,
            },
        ),
        Commands::Remove { id } => commands::cart::remove(&config()?, &id),
        Commands::Adjust { id, delta } => commands::cart::adjust(&config()?, &id, delta),
        Commands::Clear => commands::cart::clear(&config()?),
        Commands::Checkout { phone } => commands::cart::checkout(&config()?, &phone)?,
        Commands::Phone { action } => match action {
            PhoneAction::Check { input } => commands::phone::check(&input)?,
            PhoneAction::Format { input } => commands::phone::format(&input),
        },
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
