use clap::Parser;
use std::str::FromStr;
use std::sync::Arc;
use travelog::application::manage_config::ConfigService;
use travelog::application::{
    init::init, list_tags, open_repositories, CaptureFlow, CaptureServices, DeleteOutcome,
    FeedViewModel, FirstLaunchService, LocationOutcome,
};
use travelog::cli::{format_entry, format_feed, format_tag_list, Cli, Commands};
use travelog::domain::{Coordinates, OverlayKind, TravelEntry};
use travelog::error::TravelogError;
use travelog::infrastructure::{
    CameraSession, CliMediaPicker, Config, Confirmer, FileSystemJournal, FixedLocation,
    JournalRepository, KeyValueStore, MediaSelection, MediaSource, PlaceGeocoder, StdinConfirmer,
    TerminalNotifier, TerminalPermissions,
};
use travelog::logging::{init_logging, Verbosity};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    match run(cli).await {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// An opened journal: its config and its store
struct Journal {
    root: FileSystemJournal,
    config: Config,
    store: Arc<dyn KeyValueStore>,
}

impl Journal {
    async fn open() -> Result<Self, TravelogError> {
        let root = FileSystemJournal::discover()?;
        let config = root.load_config()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(root.open_store());

        let first_launch = FirstLaunchService::new(Arc::clone(&store));
        if first_launch.is_first_launch().await? {
            eprintln!("Welcome to travelog! Here is what this journal can use:");
            let prompter = TerminalPermissions::new(
                config.get_camera_command().is_some(),
                config.notifications,
            );
            first_launch.run_if_needed(&prompter).await?;
        }

        Ok(Journal {
            root,
            config,
            store,
        })
    }

    async fn feed(&self) -> Result<FeedViewModel, TravelogError> {
        let (entries, interactions) = open_repositories(Arc::clone(&self.store));
        let mut feed = FeedViewModel::new(entries, interactions);
        feed.refresh().await?;
        Ok(feed)
    }
}

async fn run(cli: Cli) -> Result<(), TravelogError> {
    let Some(command) = cli.command else {
        println!("travelog - Photo travel journal");
        println!("Use --help for usage information");
        return Ok(());
    };

    match command {
        Commands::Init { path } => init(&path).map(|_| ()),
        Commands::Config { key, value, list } => {
            let service = ConfigService::new(FileSystemJournal::discover()?);

            if list {
                let config = service.list()?;
                println!("notifications = {}", config.notifications);
                println!("confirm_delete = {}", config.confirm_delete);
                println!(
                    "camera_command = {}",
                    config.camera_command.unwrap_or_default()
                );
                println!("places = {}", config.places.len());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: travelog config [--list | <key> [<value>]]");
                println!("Valid keys: notifications, confirm_delete, camera_command");
                Ok(())
            }
        }
        Commands::Add {
            image,
            camera,
            title,
            description,
            lat,
            lon,
        } => {
            let journal = Journal::open().await?;
            let position = match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    Some(Coordinates::new(lat, lon).map_err(TravelogError::Capture)?)
                }
                _ => None,
            };
            add_entry(&journal, image, camera, &title, &description, position).await
        }
        Commands::Feed { tag, only } => {
            let journal = Journal::open().await?;
            let only = only
                .map(|kind| OverlayKind::from_str(&kind).map_err(TravelogError::Config))
                .transpose()?;
            let feed = journal.feed().await?;

            let mut entries: Vec<&TravelEntry> = match tag.as_deref() {
                Some(tag) => feed.entries_tagged(tag),
                None => feed.snapshot().entries.iter().collect(),
            };
            if let Some(kind) = only {
                let flagged = feed.snapshot().overlay(kind);
                entries.retain(|entry| flagged.is_set(&entry.id));
            }

            println!("{}", format_feed(&entries, feed.snapshot()).trim_end());
            Ok(())
        }
        Commands::Show { id } => {
            let journal = Journal::open().await?;
            let feed = journal.feed().await?;
            let entry = feed
                .entry(&id)
                .ok_or_else(|| TravelogError::EntryNotFound(id.clone()))?;
            print!("{}", format_entry(entry, feed.snapshot()));
            Ok(())
        }
        Commands::Delete { id, yes } => {
            let journal = Journal::open().await?;
            let mut feed = journal.feed().await?;
            let confirmer = StdinConfirmer::new(yes || !journal.config.confirm_delete);

            match feed.delete(&id, &confirmer).await? {
                DeleteOutcome::Deleted => println!("Deleted entry {}", id),
                DeleteOutcome::Cancelled => println!("Cancelled"),
            }
            Ok(())
        }
        Commands::Like { id } => toggle(OverlayKind::Liked, &id).await,
        Commands::Comment { id } => toggle(OverlayKind::Commented, &id).await,
        Commands::Share { id } => toggle(OverlayKind::Shared, &id).await,
        Commands::Save { id } => toggle(OverlayKind::Saved, &id).await,
        Commands::Tags => {
            let journal = Journal::open().await?;
            let feed = journal.feed().await?;
            let tags = list_tags(&feed.snapshot().entries);
            println!("{}", format_tag_list(&tags).trim_end());
            Ok(())
        }
        Commands::Reset { yes } => {
            let journal = Journal::open().await?;
            let confirmer = StdinConfirmer::new(yes);
            if confirmer
                .confirm("Delete all entries and interaction flags? This cannot be undone.")
                .await?
            {
                journal.store.clear().await?;
                println!("Journal reset");
            } else {
                println!("Cancelled");
            }
            Ok(())
        }
    }
}

async fn add_entry(
    journal: &Journal,
    image: Option<std::path::PathBuf>,
    camera: bool,
    title: &str,
    description: &str,
    position: Option<Coordinates>,
) -> Result<(), TravelogError> {
    let (entries, _) = open_repositories(Arc::clone(&journal.store));
    let camera_session = journal.config.get_camera_command().map(CameraSession::new);
    let services = CaptureServices {
        picker: Arc::new(CliMediaPicker::new(
            image,
            camera_session,
            journal.root.media_dir(),
        )),
        location: Arc::new(FixedLocation::new(position)),
        geocoder: Arc::new(PlaceGeocoder::new(journal.config.places.clone())),
        notifier: Arc::new(TerminalNotifier::new(journal.config.notifications)),
    };
    let mut flow = CaptureFlow::new(entries, services);

    let source = if camera {
        MediaSource::Camera
    } else {
        MediaSource::Gallery
    };
    if flow.pick(source).await? == MediaSelection::Cancelled {
        println!("No photo selected, nothing saved");
        return Ok(());
    }

    match flow.resolve_location().await? {
        LocationOutcome::Resolved {
            address: Some(address),
            ..
        } => println!("Location: {}", address),
        LocationOutcome::Resolved { coordinates, .. } => println!("Location: {}", coordinates),
        LocationOutcome::Unavailable(reason) => {
            eprintln!("Warning: {}; saving without location", reason)
        }
    }

    flow.edit(title, description)?;
    let entry = flow.save().await?;
    println!("Saved entry {} \"{}\"", entry.id, entry.title);
    Ok(())
}

async fn toggle(kind: OverlayKind, id: &str) -> Result<(), TravelogError> {
    let journal = Journal::open().await?;
    let mut feed = journal.feed().await?;

    if feed.toggle(kind, id).await? {
        println!("Entry {} {}", id, kind);
    } else {
        println!("Entry {} no longer {}", id, kind);
    }
    Ok(())
}
