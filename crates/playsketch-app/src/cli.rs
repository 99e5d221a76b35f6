//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "playsketch", version, about = "Football play diagram tools")]
pub struct Cli {
    /// Editor configuration (JSON).
    #[arg(long, global = true, env = "PLAYSKETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory of the local playbook store. Defaults to the user data directory.
    #[arg(long, global = true, env = "PLAYSKETCH_STORE")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Repair a playbook and print it in canonical form.
    Normalize(IoArgs),
    /// Render one play as SVG.
    Svg {
        #[command(flatten)]
        io: IoArgs,
        /// Play number (from 1) or exact play name. Defaults to the first play.
        #[arg(long)]
        play: Option<String>,
        /// Output pixels per field pixel.
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Draw the play name above the field.
        #[arg(long)]
        title: bool,
    },
    /// Printable HTML sheet with several plays per page.
    Print {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long, default_value_t = 4)]
        per_page: usize,
    },
    /// Printable HTML wrist coach card.
    Wrist {
        #[command(flatten)]
        io: IoArgs,
        #[arg(long, default_value_t = 4)]
        columns: usize,
        #[arg(long, default_value_t = 5.0)]
        width_in: f64,
        #[arg(long, default_value_t = 3.0)]
        height_in: f64,
    },
    /// Apply a scripted editing session to a playbook.
    Replay {
        #[command(flatten)]
        io: IoArgs,
        /// JSON list of editor events.
        script: PathBuf,
    },
    /// Copy a playbook file into the local store.
    Import {
        input: PathBuf,
    },
    /// Print the playbook held in the local store.
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct IoArgs {
    /// Playbook JSON file.
    pub input: PathBuf,
    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
