//! Command-line driver for the portfolio project store.
//!
//! # Responsibility
//! - Bind terminal commands to store, catalog and engagement operations.
//! - Persist through a SQLite-backed key-value file instead of browser storage.

mod output;

use clap::{Parser, Subcommand};
use log::warn;
use portfolio_core::{
    default_log_level, filter_projects, init_logging, project_slug_from_path, AddProjectForm,
    CardView, CatalogQuery, CategoryFilter, ContactForm, EngagementTracker, LoadMorePager,
    MemoryRenderer, MutationOutcome, PortfolioConfig, ProjectDraft, ProjectId, ProjectPatch,
    ProjectRecordStore, SqliteKeyValueStore,
};
use std::path::{Path, PathBuf};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;
type CliStore = ProjectRecordStore<SqliteKeyValueStore, MemoryRenderer>;

#[derive(Parser, Debug)]
#[command(name = "portfolio", version, about = "Manage admin-added portfolio projects")]
struct Cli {
    /// SQLite file holding the key-value slots.
    #[arg(long, default_value = "portfolio.db")]
    db: PathBuf,
    /// Optional JSON config overriding keys, export prefix and paging.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when absent.
    #[arg(long)]
    log_dir: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// List projects, optionally filtered.
    List {
        /// Category tag or `all`.
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long, default_value = "")]
        search: String,
        /// Number of "load more" pages to reveal (1 = initial page).
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Add a project.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        /// Comma separated.
        #[arg(long, default_value = "")]
        technologies: String,
        /// Repeat the flag for several features.
        #[arg(long)]
        feature: Vec<String>,
        #[arg(long, default_value = "")]
        icon: String,
    },
    /// Update fields of an existing project.
    Update {
        id: ProjectId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Comma separated; replaces the whole list.
        #[arg(long)]
        technologies: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Remove a project.
    Remove { id: ProjectId },
    /// Write a pretty JSON snapshot of all projects.
    Export {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Count a view of a project detail page (slug or `/projects/<slug>.html`).
    View { page: String },
    /// Rate a project from 1 to 5 stars.
    Rate { page: String, stars: u8 },
    /// Check a contact message before it is sent.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let config = match cli.config.as_ref() {
        Some(path) => PortfolioConfig::load(path)?,
        None => PortfolioConfig::default(),
    };

    match cli.command {
        Command::List {
            category,
            search,
            page,
        } => {
            let store = open_store(&cli.db, config)?;
            list(&store, category, search, page);
        }
        Command::Add {
            title,
            category,
            description,
            technologies,
            feature,
            icon,
        } => {
            let draft = ProjectDraft::from_form(&AddProjectForm {
                title,
                category,
                description,
                technologies,
                features: feature.join("\n"),
                icon,
            })?;
            let mut store = open_store(&cli.db, config)?;
            let outcome = store.add(draft)?;
            report(&store, &outcome, "added");
        }
        Command::Update {
            id,
            title,
            category,
            description,
            technologies,
            icon,
        } => {
            let patch = ProjectPatch {
                title,
                category,
                description,
                technologies: technologies
                    .as_deref()
                    .map(portfolio_core::parse_technologies),
                features: None,
                icon,
            };
            if patch.is_empty() {
                return Err("nothing to update; pass at least one field flag".into());
            }
            let mut store = open_store(&cli.db, config)?;
            let outcome = store.update(id, &patch)?;
            report(&store, &outcome, "updated");
        }
        Command::Remove { id } => {
            let mut store = open_store(&cli.db, config)?;
            let outcome = store.remove(id)?;
            warn_if_not_persisted(&outcome);
            println!("removed project {}", outcome.value.id);
        }
        Command::Export { out_dir } => {
            let store = open_store(&cli.db, config)?;
            let export = store.export()?;
            let path = export.write_to_dir(&out_dir)?;
            println!("exported {} projects to {}", store.len(), path.display());
        }
        Command::View { page } => {
            let slug = slug_for(&page);
            let mut tracker = EngagementTracker::new(SqliteKeyValueStore::open(&cli.db)?, &config);
            let views = tracker.record_view(&slug)?;
            println!("{slug}: {views} views");
        }
        Command::Rate { page, stars } => {
            let slug = slug_for(&page);
            let mut tracker = EngagementTracker::new(SqliteKeyValueStore::open(&cli.db)?, &config);
            tracker.rate(&slug, stars)?;
            println!("Thanks! You rated {slug} {stars}/5");
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            ContactForm {
                name,
                email,
                subject,
                message,
            }
            .validate()?;
            println!("message is valid and ready to send");
        }
    }

    Ok(())
}

fn open_store(db: &Path, config: PortfolioConfig) -> CliResult<CliStore> {
    let kv = SqliteKeyValueStore::open(db)?;
    let mut store = ProjectRecordStore::new(kv, MemoryRenderer::new(), config);
    let hydration = store.initialize();
    if let Some(warning) = hydration.warning {
        eprintln!("warning: {warning}; starting with an empty project list");
    }
    Ok(store)
}

fn list(store: &CliStore, category: String, search: String, page: usize) {
    let query = CatalogQuery {
        category: CategoryFilter::parse(&category),
        search,
    };
    let matches = filter_projects(store.records(), &query);
    let mut pager = LoadMorePager::new(
        matches.len(),
        store.config().initial_visible,
        store.config().load_more_step,
    );
    for _ in 1..page {
        pager.load_more();
    }

    if matches.is_empty() {
        println!("no projects match");
        return;
    }
    for record in pager.page(&matches) {
        println!("{}\n", output::format_card(&CardView::from_record(record)));
    }
    if !pager.is_exhausted() {
        println!("{}", pager.label());
    }
}

fn report(store: &CliStore, outcome: &MutationOutcome<portfolio_core::ProjectRecord>, verb: &str) {
    warn_if_not_persisted(outcome);
    match store.renderer().card(outcome.value.id) {
        Some(card) => println!("{verb}:\n{}", output::format_card(card)),
        None => println!("{verb} project {}", outcome.value.id),
    }
}

fn warn_if_not_persisted<T>(outcome: &MutationOutcome<T>) {
    if let Some(warning) = outcome.warning() {
        warn!("event=cli_persist module=cli status=warn error={}", warning);
        eprintln!("warning: {warning}; change kept for this run only");
    }
}

fn slug_for(page: &str) -> String {
    project_slug_from_path(page).unwrap_or_else(|| page.trim().to_string())
}
