mod config;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::LinkstatConfig;
use linkstat_core::{
    paginate, AffiliateMode, DataSource, FilterOptions, JoinPolicy, MediumFilter, Session,
    SortOrder, TimeWindow, ViewConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "linkstat")]
#[command(author, version, about = "Short link click analytics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Clickstream CSV (file path or http(s) URL)")]
    clicks: Option<String>,

    #[arg(long, global = true, help = "Short link registry CSV (file path or http(s) URL)")]
    links: Option<String>,

    #[arg(long, global = true, help = "Enable debug logging")]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Show traffic across all registered links")]
    Dashboard {
        #[arg(long, help = "Time window: 'all' or a number of days")]
        window: Option<TimeWindow>,
        #[arg(long, default_value = "all", help = "Only count this UTM medium")]
        medium: MediumFilter,
        #[arg(
            long,
            default_value = "all",
            help = "Affiliate filter: all, affiliate or non-affiliate"
        )]
        affiliate: AffiliateMode,
        #[arg(long, help = "Case-insensitive search over name and URLs")]
        search: Option<String>,
        #[arg(long, help = "Keep clicks whose short link is not registered")]
        include_unmatched: bool,
        #[arg(long, help = "Number of links in the table")]
        top: Option<usize>,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    #[command(about = "List registered links with per-link stats")]
    Links {
        #[arg(long, help = "Time window: 'all' or a number of days")]
        window: Option<TimeWindow>,
        #[arg(long, default_value = "all", help = "Only count this UTM medium")]
        medium: MediumFilter,
        #[arg(
            long,
            default_value = "all",
            help = "Affiliate filter: all, affiliate or non-affiliate"
        )]
        affiliate: AffiliateMode,
        #[arg(long, help = "Case-insensitive search over name and short URL")]
        search: Option<String>,
        #[arg(
            long,
            default_value = "clicks-desc",
            help = "Sort: clicks-desc, clicks-asc, name-asc, name-desc or recent"
        )]
        sort: SortOrder,
        #[arg(long, default_value = "1", help = "Page number (1-based)")]
        page: usize,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    #[command(about = "Drill into a single short link")]
    Link {
        #[arg(help = "Short URL as it appears in the clickstream")]
        short_url: String,
        #[arg(long, help = "Time window: 'all' or a number of days")]
        window: Option<TimeWindow>,
        #[arg(long, default_value = "1", help = "Page of recent clicks (1-based)")]
        page: usize,
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = LinkstatConfig::load();
    let clicks = DataSource::parse(cli.clicks.as_deref().unwrap_or(&config.clicks));
    let links = DataSource::parse(cli.links.as_deref().unwrap_or(&config.links));

    let session = load_session(&clicks, &links)?;
    let now = linkstat_core::now();

    match cli.command {
        Commands::Dashboard {
            window,
            medium,
            affiliate,
            search,
            include_unmatched,
            top,
            json,
        } => {
            let window = window.unwrap_or_else(|| config.default_window());
            let mut view = ViewConfig::dashboard();
            view.top_links = top.unwrap_or(config.top_links);
            if include_unmatched {
                view.join_policy = JoinPolicy::Permissive;
            }
            let options = FilterOptions {
                window,
                medium,
                affiliate,
                search,
            };

            let report = session.dashboard_with(&view, &options, now);
            if json {
                render::print_json(&report)?;
            } else {
                render::print_dashboard(&report, window);
            }
        }
        Commands::Links {
            window,
            medium,
            affiliate,
            search,
            sort,
            page,
            json,
        } => {
            let window = window.unwrap_or_else(|| config.default_window());
            let options = FilterOptions {
                window,
                medium,
                affiliate,
                search,
            };

            let cards = session.explorer(&options, sort, now);
            let page = paginate(cards, config.page_size, page);
            if json {
                render::print_json(&page)?;
            } else {
                render::print_cards(&page, window);
            }
        }
        Commands::Link {
            short_url,
            window,
            page,
            json,
        } => {
            let window = window.unwrap_or_else(|| config.default_window());
            let mut view = ViewConfig::explorer();
            view.page_size = config.page_size;

            let detail = session.detail_with(&view, &short_url, window, page, now);
            if json {
                render::print_json(&detail)?;
            } else {
                render::print_detail(&detail, window);
            }
        }
    }

    Ok(())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(clicks: &DataSource, links: &DataSource) -> Result<Session> {
    use tokio::runtime::Runtime;

    let rt = Runtime::new()?;
    rt.block_on(Session::load(clicks, links))
        .with_context(|| format!("Failed to load data from {} and {}", clicks, links))
}
