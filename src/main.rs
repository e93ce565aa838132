use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use wrapcover::{cli, config, types::MediaType, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Handle followed artists
    Artists(ArtistsOptions),

    /// Render covers for every media item of a source
    Render(RenderOptions),

    /// Render a single cover from a local image
    Cover(CoverOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle followed artists",
    args_conflicts_with_subcommands = true // disallow mixing --search with subcommands
)]
pub struct ArtistsOptions {
    /// Search for artists
    #[clap(long)]
    pub search: Option<String>,

    /// Subcommands under `artists` (e.g., `update`)
    #[command(subcommand)]
    pub command: Option<ArtistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ArtistsSubcommand {
    /// Update the followed-artist cache from Spotify
    Update(ArtistsUpdateOpts),
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsUpdateOpts {
    /// Download even when the remote count matches the cache
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderOptions {
    /// Where media items come from
    #[clap(long, value_enum, default_value = "db")]
    pub source: cli::Source,

    /// Only render one kind of media (playlist, album, artist)
    #[clap(long = "type")]
    pub media_type: Option<MediaType>,

    /// Render at most this many covers
    #[clap(long)]
    pub limit: Option<usize>,

    /// Re-read followed artists from Spotify instead of the cache
    #[clap(long)]
    pub refresh: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CoverOptions {
    /// Name printed on the cover
    #[clap(long)]
    pub name: String,

    /// Media type (playlist, album, artist)
    #[clap(long = "type", default_value = "playlist")]
    pub media_type: MediaType,

    /// Path to the artwork image
    #[clap(long)]
    pub art: PathBuf,

    /// Comma-separated artist names for the back panel
    #[clap(long)]
    pub artists: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Artists(opt) => match opt.command {
            Some(ArtistsSubcommand::Update(u)) => cli::update_artists(u.force).await,
            None => cli::list_artists(opt.search).await,
        },
        Command::Render(opt) => {
            cli::render(opt.source, opt.media_type, opt.limit, opt.refresh).await
        }
        Command::Cover(opt) => cli::cover(opt.name, opt.media_type, opt.art, opt.artists).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
