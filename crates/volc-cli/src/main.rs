//! Volc - query and adjust the playback volume of an ALSA mixer control.
//!
//! Prints the resulting volume and switch state of the last channel that was
//! applied. Logs go to stderr so the output stays scriptable.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;

use volc_core::{ChannelOutcome, SwitchRequest, VolumeRequest};

#[derive(Debug, Parser)]
#[command(name = "volc", version)]
#[command(about = "Query and adjust ALSA playback volume and mute state")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// ALSA card name
    #[arg(short, long, global = true)]
    card: Option<String>,

    /// Simple control name
    #[arg(short, long, global = true)]
    selector: Option<String>,

    /// Simple control index
    #[arg(short, long, global = true)]
    index: Option<u32>,

    /// "all", a channel name (e.g. front-left), or a channel index
    #[arg(long, global = true)]
    channel: Option<String>,

    /// Print the result as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log level (overrides the config file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the current volume and switch state
    Get,
    /// Set the volume to a percentage
    Set {
        percent: f32,
        #[arg(long, value_enum)]
        switch: Option<SwitchArg>,
    },
    /// Raise the volume by a percentage
    Inc {
        percent: f32,
        #[arg(long, value_enum)]
        switch: Option<SwitchArg>,
    },
    /// Lower the volume by a percentage
    Dec {
        percent: f32,
        #[arg(long, value_enum)]
        switch: Option<SwitchArg>,
    },
    /// Turn the playback switch off
    Mute,
    /// Turn the playback switch on
    Unmute,
    /// Flip the playback switch
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SwitchArg {
    Off,
    On,
    Toggle,
}

impl From<SwitchArg> for SwitchRequest {
    fn from(arg: SwitchArg) -> Self {
        match arg {
            SwitchArg::Off => Self::Off,
            SwitchArg::On => Self::On,
            SwitchArg::Toggle => Self::Toggle,
        }
    }
}

impl Command {
    /// Volume and switch requests for this command.
    fn requests(&self) -> (VolumeRequest, SwitchRequest) {
        let switch = |arg: &Option<SwitchArg>| arg.map_or(SwitchRequest::Unchanged, Into::into);
        match self {
            Self::Get => (VolumeRequest::unchanged(), SwitchRequest::Unchanged),
            Self::Set { percent, switch: arg } => (VolumeRequest::set(*percent), switch(arg)),
            Self::Inc { percent, switch: arg } => (VolumeRequest::increase(*percent), switch(arg)),
            Self::Dec { percent, switch: arg } => (VolumeRequest::decrease(*percent), switch(arg)),
            Self::Mute => (VolumeRequest::unchanged(), SwitchRequest::Off),
            Self::Unmute => (VolumeRequest::unchanged(), SwitchRequest::On),
            Self::Toggle => (VolumeRequest::unchanged(), SwitchRequest::Toggle),
        }
    }
}

/// Human-readable form of an outcome, e.g. `50% [on]`.
fn format_outcome(outcome: &ChannelOutcome) -> String {
    format!("{:.0}% [{}]", outcome.volume_percent, outcome.switch_state)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(card) = cli.card {
        config.mixer.card = card;
    }
    if let Some(selector) = cli.selector {
        config.mixer.selector = selector;
    }
    if let Some(index) = cli.index {
        config.mixer.index = index;
    }
    if let Some(channel) = cli.channel {
        config.mixer.channel = channel;
    }

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("volc={level}").parse()?)
                .add_directive(format!("volc_core={level}").parse()?)
                .add_directive(format!("volc_alsa={level}").parse()?),
        )
        .init();

    let selection = config.mixer.channel_selection()?;
    let (volume, switch) = cli.command.requests();
    debug!(?config, ?selection, ?volume, ?switch, "Request");

    let mut ctx = volc_alsa::open(&config.mixer.selector, config.mixer.index, &config.mixer.card)
        .context("Failed to open mixer")?;

    let result = ctx.volume_ctl(selection, volume, switch);
    let message = ctx.last_error_message().map(str::to_owned);
    ctx.deinit();

    let Ok(outcome) = result else {
        bail!(
            "{} on {} ({},{})",
            message.as_deref().unwrap_or("volume control failed"),
            config.mixer.card,
            config.mixer.selector,
            config.mixer.index
        );
    };
    info!(channel = %outcome.channel, "Done");

    if cli.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", format_outcome(&outcome));
    }
    Ok(())
}
