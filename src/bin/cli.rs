use clap::{Parser, Subcommand, ValueEnum};
use compactgui_catalog::{
    config::PAGE_SIZE_CHOICES,
    view::{Debouncer, UrlState},
    CatalogApp, CatalogConfig, LoadOutcome, RenderFormat, ViewEvent, ViewMode,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "compactgui-catalog")]
#[command(about = "Browse the CompactGUI compression database", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Local store path (overrides COMPACTGUI_DB)
    #[arg(short, long)]
    db: Option<String>,

    /// Primary database URL
    #[arg(long)]
    primary_url: Option<String>,

    /// Fallback database URL
    #[arg(long)]
    fallback_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog
    Browse {
        /// Name filter
        #[arg(short, long)]
        search: Option<String>,

        /// Sort key, e.g. name_asc, size_desc, lzx_ratio_desc
        #[arg(long, default_value = "name_asc")]
        sort: String,

        /// Games per page
        #[arg(long)]
        page_size: Option<usize>,

        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Query string to restore, e.g. "?search=doom&page=2"
        #[arg(long)]
        url: Option<String>,

        /// Layout (defaults to the saved view mode)
        #[arg(short, long, value_enum)]
        view: Option<ViewArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<std::path::PathBuf>,
    },

    /// Refetch the database, ignoring cache age
    Refresh,

    /// Save the default view mode
    View {
        #[arg(value_enum)]
        mode: ViewArg,
    },

    /// Show cache status
    CacheInfo,

    /// Delete the cached database
    ClearCache,

    /// Interactive session; plain lines are search input
    Interactive {
        /// Query string to start from, e.g. "?search=doom&page=2"
        #[arg(long)]
        url: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    Grid,
    List,
    Compact,
}

impl From<ViewArg> for ViewMode {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::Grid => ViewMode::Grid,
            ViewArg::List => ViewMode::List,
            ViewArg::Compact => ViewMode::Compact,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Html,
}

impl From<FormatArg> for RenderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => RenderFormat::Text,
            FormatArg::Html => RenderFormat::Html,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "compactgui_catalog=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = CatalogConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(url) = cli.primary_url {
        config.primary_url = url;
    }
    if let Some(url) = cli.fallback_url {
        config.fallback_url = url;
    }
    tracing::debug!("Config: {}", config);

    let mut app = CatalogApp::new(&config).await?;

    match cli.command {
        Commands::Browse { search, sort, page_size, page, url, view, format, out } => {
            report(app.load().await?, &app);

            app.handle(ViewEvent::Sort(sort)).await?;
            if let Some(size) = page_size {
                app.handle(ViewEvent::PageSize(size)).await?;
            }
            if let Some(url) = url {
                app.apply_url(&UrlState::parse(&url));
            }
            if let Some(search) = search {
                app.handle(ViewEvent::SearchInput(search)).await?;
                app.handle(ViewEvent::SearchCommit).await?;
            }
            if let Some(page) = page {
                app.handle(ViewEvent::GoToPage(page)).await?;
            }
            if let Some(view) = view {
                app.preview_mode(view.into());
            }

            let rendered = app.render(format.into());
            match out {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("✅ Wrote {}", path.display());
                }
                None => print!("{}", rendered),
            }
            eprintln!("🔗 {}", display_url(&app.url()));
        }

        Commands::Refresh => {
            println!("🔄 Fetching latest data...");
            report(app.refresh().await?, &app);
            println!("✅ {} games available", app.state().dataset.len());
        }

        Commands::View { mode } => {
            app.handle(ViewEvent::SetView(mode.into())).await?;
            println!("✅ View mode set to {}", app.view().mode);
        }

        Commands::CacheInfo => {
            let info = app.cache_info().await?;

            println!("📊 Cache:");
            if !info.present {
                println!("   (empty)");
            }
            if let Some(cached_at) = info.cached_at {
                println!("   Stored: {}", cached_at.format("%Y-%m-%d %H:%M:%S"));
            }
            if let Some(age) = info.age {
                println!("   Age: {}h {}m", age.num_hours(), age.num_minutes() % 60);
            }
            if info.present {
                println!("   Fresh: {}", info.fresh);
                println!("   Games: {}", info.records);
            }
        }

        Commands::ClearCache => {
            app.clear_cache().await?;
            println!("🧹 Cache cleared");
        }

        Commands::Interactive { url } => {
            if let Some(url) = url {
                app.apply_url(&UrlState::parse(&url));
            }
            interactive(app, &config).await?
        }
    }

    Ok(())
}

fn display_url(query: &str) -> &str {
    if query.is_empty() { "(no filters)" } else { query }
}

fn report(outcome: LoadOutcome, app: &CatalogApp) {
    match outcome {
        LoadOutcome::Cache => tracing::info!("Using cached data"),
        LoadOutcome::Fetched(origin) => tracing::info!("Fetched data from {:?} source", origin),
        LoadOutcome::Discarded => {}
        LoadOutcome::StaleCache | LoadOutcome::Failed => {
            if let Some(status) = &app.state().status {
                eprintln!("⚠️ {}", status);
            }
        }
    }
}

const HELP: &str = "Commands: /sort <key>  /show <n>  /page <n>  /next  /prev  /view grid|list|compact  /refresh  /quit\nAny other line filters by name.";

async fn interactive(mut app: CatalogApp, config: &CatalogConfig) -> anyhow::Result<()> {
    report(app.load().await?, &app);
    println!("{}", HELP);
    println!("{}", app.render(RenderFormat::Text));

    let mut debouncer = Debouncer::new(config.debounce());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let event = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(line.trim_end(), app.view().page) {
                    Ok(Some(event)) => event,
                    Ok(None) => break,
                    Err(message) => {
                        eprintln!("{}", message);
                        continue;
                    }
                }
            }
            _ = debouncer.wait() => {
                debouncer.cancel();
                ViewEvent::SearchCommit
            }
        };

        let reaction = match app.handle(event).await {
            Ok(reaction) => reaction,
            Err(e) => {
                eprintln!("⚠️ {}", e);
                continue;
            }
        };
        if reaction.schedule_debounce {
            debouncer.schedule(tokio::time::Instant::now());
        }
        if reaction.cancel_debounce {
            debouncer.cancel();
        }
        if reaction.rerender || reaction.refresh {
            println!("{}", app.render(RenderFormat::Text));
            if let Some(status) = &app.state().status {
                eprintln!("⚠️ {}", status);
            }
        }
        if reaction.sync_url {
            println!("🔗 {}", display_url(&app.url()));
        }
    }

    Ok(())
}

/// `Ok(None)` means quit
fn parse_command(line: &str, page: u32) -> Result<Option<ViewEvent>, String> {
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Some(ViewEvent::SearchInput(line.to_string())));
    };

    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or("");
    let arg = parts.next().unwrap_or("").trim();

    let event = match name {
        "quit" | "q" => return Ok(None),
        "sort" => ViewEvent::Sort(arg.to_string()),
        "show" => {
            let size = arg.parse::<usize>().map_err(|_| format!("Page size must be one of {:?}", PAGE_SIZE_CHOICES))?;
            ViewEvent::PageSize(size)
        }
        "page" => ViewEvent::GoToPage(arg.parse::<u32>().map_err(|_| "Page must be a number".to_string())?),
        "next" => ViewEvent::GoToPage(page + 1),
        "prev" => ViewEvent::GoToPage(page.saturating_sub(1).max(1)),
        "view" => ViewEvent::SetView(arg.parse::<ViewMode>().map_err(|e| format!("{}", e))?),
        "refresh" => ViewEvent::Refresh,
        _ => return Err(HELP.to_string()),
    };
    Ok(Some(event))
}
