//! Command-line interface for braincache.
//!
//! Provides commands for signing in, saving links and files, browsing
//! the card gallery, opening the enlarged detail view, and sharing the
//! collection read-only.
//!
//! Repository failures are notifications, not crashes: a failed list
//! fetch renders a sign-in or error message, a failed delete or download
//! leaves everything as it was.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::adapters::{
    BackendClient, ContentDraft, ContentRepository, RepositoryError, Session, SessionStore,
    ThumbnailCache,
};
use crate::classify::youtube_thumbnail_url;
use crate::config;
use crate::domain::{ContentItem, ContentKind, EmbedStrategy};
use crate::embed::{HeadlessHost, ScriptRegistry};
use crate::view::{Card, CardEvent, Gallery};

/// braincache - second brain for links and files
#[derive(Parser, Debug)]
#[command(name = "braincache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        /// Username
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign in to an existing account
    Signin {
        /// Username
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Sign out (forget the stored token)
    Signout,

    /// Browse the card gallery
    List {
        /// Filter by content kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Maximum number of cards to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Open the enlarged detail view of one item
    Show {
        /// Item id (prefix match)
        id: String,
    },

    /// Save a new link or file
    Add {
        /// Display title
        title: String,

        /// Source URL
        #[arg(short, long)]
        link: Option<String>,

        /// Content kind
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// File to attach (documents kind)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete an item
    Delete {
        /// Item id
        id: String,
    },

    /// Download an item's attached file
    Download {
        /// Item id (prefix match)
        id: String,

        /// Output path (defaults to the attachment's file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a public read-only share link for this brain
    Share,

    /// Browse someone else's shared brain
    Shared {
        /// Share hash from the link
        hash: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Content kind for CLI (maps to ContentKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Youtube,
    Twitter,
    Instagram,
    Linkedin,
    Pinterest,
    Documents,
    Other,
}

impl From<KindArg> for ContentKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Youtube => ContentKind::YouTube,
            KindArg::Twitter => ContentKind::Twitter,
            KindArg::Instagram => ContentKind::Instagram,
            KindArg::Linkedin => ContentKind::LinkedIn,
            KindArg::Pinterest => ContentKind::Pinterest,
            KindArg::Documents => ContentKind::Documents,
            KindArg::Other => ContentKind::Other,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Signup { username, password } => signup(&username, &password).await,
            Commands::Signin { username, password } => signin(&username, &password).await,
            Commands::Signout => signout().await,
            Commands::List { kind, limit } => list(kind.map(Into::into), limit).await,
            Commands::Show { id } => show(&id).await,
            Commands::Add {
                title,
                link,
                kind,
                description,
                file,
            } => add(title, link, kind.into(), description, file).await,
            Commands::Delete { id } => delete(&id).await,
            Commands::Download { id, output } => download(&id, output).await,
            Commands::Share => share().await,
            Commands::Shared { hash } => shared(&hash).await,
            Commands::Config => show_config().await,
        }
    }
}

/// Backend client with the stored token attached (if any)
async fn client() -> Result<BackendClient> {
    let backend = config::backend_url()?;
    let token = SessionStore::open_default()?.token().await?;
    Ok(BackendClient::new(backend, token))
}

/// Backend client with no token (signin/signup/shared)
fn anonymous_client() -> Result<BackendClient> {
    Ok(BackendClient::new(config::backend_url()?, None))
}

/// Create an account
async fn signup(username: &str, password: &str) -> Result<()> {
    let client = anonymous_client()?;
    match client.signup(username, password).await {
        Ok(token) => {
            let store = SessionStore::open_default()?;
            store.save(&Session::new(token, username)).await?;
            eprintln!("✅ Brain Cache created. You are signed in as {}.", username);
        }
        Err(err) => eprintln!("⚠️ Sign up failed: {}", err),
    }
    Ok(())
}

/// Sign in and store the token
async fn signin(username: &str, password: &str) -> Result<()> {
    let client = anonymous_client()?;
    match client.signin(username, password).await {
        Ok(token) => {
            let store = SessionStore::open_default()?;
            store.save(&Session::new(token, username)).await?;
            eprintln!("🎉 Welcome back, {}.", username);
        }
        Err(err) => eprintln!("⚠️ Sign in failed: {}", err),
    }
    Ok(())
}

/// Forget the stored token
async fn signout() -> Result<()> {
    SessionStore::open_default()?.clear().await?;
    eprintln!("Signed out.");
    Ok(())
}

/// Fetch the list, or render the degraded message a failure maps to
async fn fetch_items() -> Result<Option<Vec<ContentItem>>> {
    let client = client().await?;
    match client.list().await {
        Ok(items) => Ok(Some(items)),
        Err(RepositoryError::Unauthorized) => {
            println!("Please sign in to see your Brain Cache: braincache signin <username>");
            Ok(None)
        }
        Err(err) => {
            eprintln!("⚠️ Failed to load content: {}", err);
            Ok(None)
        }
    }
}

/// Browse the gallery
async fn list(kind: Option<ContentKind>, limit: usize) -> Result<()> {
    let Some(mut items) = fetch_items().await? else {
        return Ok(());
    };
    items.truncate(limit);

    let mut gallery = Gallery::new(items, false);
    let mut registry = ScriptRegistry::new();
    let mut host = HeadlessHost::new();
    gallery.mount(&mut registry, &mut host);

    print!("{}", gallery.render(kind));
    println!("Total: {} items", gallery.len());
    Ok(())
}

/// Find one item by id prefix
fn find_item(items: Vec<ContentItem>, id: &str) -> Result<ContentItem> {
    items
        .into_iter()
        .find(|i| i.id.starts_with(id))
        .ok_or_else(|| anyhow::anyhow!("Content not found: {}", id))
}

/// Open the enlarged detail view
async fn show(id: &str) -> Result<()> {
    let Some(items) = fetch_items().await? else {
        return Ok(());
    };
    let item = find_item(items, id)?;

    let mut card = Card::new(item, false);
    card.apply(CardEvent::OpenDetail);

    // Thumbnail cards resolve their image before the detail view renders;
    // a fetch failure degrades just this card.
    if card.effective_strategy() == EmbedStrategy::ThumbnailImage {
        if let Some(video_id) = card.descriptor().resolved_id {
            let cache = ThumbnailCache::open_default()?;
            match cache.fetch(&youtube_thumbnail_url(&video_id)).await {
                Ok(path) => eprintln!("🖼  thumbnail cached at {}", path.display()),
                Err(err) => {
                    eprintln!("⚠️ Thumbnail failed to load: {}", err);
                    card.apply(CardEvent::EmbedFailed);
                }
            }
        }
    }

    for line in card.render_detail() {
        println!("{}", line);
    }
    Ok(())
}

/// Save a new item
async fn add(
    title: String,
    link: Option<String>,
    kind: ContentKind,
    description: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    // Creation-time validation; classification stays independent of it.
    if kind == ContentKind::Documents {
        if link.is_none() && file.is_none() {
            anyhow::bail!("A documents item needs --link and/or --file");
        }
    } else if link.is_none() {
        anyhow::bail!("--link is required for kind '{}'", kind);
    }

    if let Some(path) = &file {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
    }

    let client = client().await?;
    let draft = ContentDraft {
        title,
        kind,
        link,
        description,
        file_path: file,
    };

    match client.create(draft).await {
        Ok(item) => {
            eprintln!("✅ Saved '{}'", item.title);
            eprintln!("   ID: {}", item.id);
            eprintln!("   Kind: {}", item.kind);
        }
        Err(err) => eprintln!("⚠️ Could not save content: {}", err),
    }
    Ok(())
}

/// Delete an item. Failures (including an already-deleted id) are
/// reported and leave everything in place.
async fn delete(id: &str) -> Result<()> {
    let client = client().await?;
    match client.delete(id).await {
        Ok(()) => eprintln!("🗑  Deleted {}", id),
        Err(err) => eprintln!("⚠️ Delete failed, nothing removed: {}", err),
    }
    Ok(())
}

/// Download an item's file
async fn download(id: &str, output: Option<PathBuf>) -> Result<()> {
    use crate::view::DownloadAction;

    let Some(items) = fetch_items().await? else {
        return Ok(());
    };
    let item = find_item(items, id)?;
    let card = Card::new(item, false);

    let Some(action) = card.download_action() else {
        eprintln!("⚠️ '{}' has no downloadable file", card.item().title);
        return Ok(());
    };

    let bytes = match action {
        DownloadAction::Direct(url) => {
            let response = reqwest::get(&url).await.context("Download request failed")?;
            if !response.status().is_success() {
                eprintln!("⚠️ Download failed: HTTP {}", response.status());
                return Ok(());
            }
            response.bytes().await?.to_vec()
        }
        DownloadAction::Stream(item_id) => {
            let client = client().await?;
            match client.download_stream(&item_id).await {
                Ok(bytes) => bytes,
                Err(err) => {
                    eprintln!("⚠️ Download failed: {}", err);
                    return Ok(());
                }
            }
        }
    };

    let output = output.unwrap_or_else(|| {
        card.item()
            .file
            .as_ref()
            .map(|f| PathBuf::from(&f.name))
            .unwrap_or_else(|| PathBuf::from(format!("{}.bin", card.item().id)))
    });

    // Write through a temp file so a failed download never leaves a
    // truncated target behind.
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let temp = tempfile::NamedTempFile::new_in(&dir).context("Failed to create temp file")?;
    std::fs::write(temp.path(), &bytes).context("Failed to write download")?;
    temp.persist(&output).map_err(|e| {
        anyhow::anyhow!("Failed to persist download to {}: {}", output.display(), e.error)
    })?;

    eprintln!("💾 Saved {} bytes to {}", bytes.len(), output.display());
    Ok(())
}

/// Create a public share link
async fn share() -> Result<()> {
    let client = client().await?;
    match client.create_share_link().await {
        Ok(url) => {
            eprintln!("🔗 Your brain is shared:");
            println!("{}", url);
        }
        Err(err) => eprintln!("⚠️ Could not create share link: {}", err),
    }
    Ok(())
}

/// Browse someone else's shared brain, read-only
async fn shared(hash: &str) -> Result<()> {
    let client = anonymous_client()?;
    let brain = match client.shared_brain(hash).await {
        Ok(brain) => brain,
        Err(err) => {
            eprintln!("⚠️ Failed to load shared brain: {}", err);
            return Ok(());
        }
    };

    println!("Shared by {}\n", brain.username);

    let mut gallery = Gallery::new(brain.content, true);
    let mut registry = ScriptRegistry::new();
    let mut host = HeadlessHost::new();
    gallery.mount(&mut registry, &mut host);

    print!("{}", gallery.render(None));
    println!("Total: {} items", gallery.len());
    Ok(())
}

/// Show the resolved configuration (for debugging)
async fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("BrainCache configuration");
    println!("{}", "-".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Backend:     {}", cfg.backend_url);
    println!("Home:        {}", cfg.home.display());
    println!("Session:     {}", cfg.token_path().display());
    println!("Thumbnails:  {}", cfg.thumbnails_dir().display());

    let signed_in = SessionStore::open_default()?
        .load()
        .await?
        .map(|s| format!("{} (since {})", s.username, s.issued_at))
        .unwrap_or_else(|| "(not signed in)".to_string());
    println!("Signed in:   {}", signed_in);

    Ok(())
}
