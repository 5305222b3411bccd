//! hansearch CLI entry point
//!
//! Narrows the static taxonomies by the code selections given on the
//! command line, runs the search, and prints the merged results as JSON.

use anyhow::Result;
use hansearch::category::{self, Category};
use hansearch::config::Settings;
use hansearch::search::{Search, SearchQuery};
use hansearch::sources::heritage;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Default)]
struct CliArgs {
    keyword: String,
    kinds: Vec<String>,
    regions: Vec<String>,
    subareas: Vec<String>,
    areas: Vec<String>,
    no_heritage: bool,
    no_tourism: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = match parse_args()? {
        Some(args) => args,
        None => return Ok(ExitCode::SUCCESS),
    };

    // Load configuration
    let settings = load_settings()?;

    // Initialize logging
    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    info!("Starting hansearch v{}", hansearch::VERSION);

    let search = Search::from_settings(settings)?;

    // Build the query from the narrowed taxonomies
    let mut query = SearchQuery::new(args.keyword.clone());
    if !args.no_heritage {
        query = query.with_heritage(heritage_filter(&args)?);
    }
    if !args.no_tourism {
        query = query.with_tourism(tourism_filter(&args));
    }

    // Ctrl-C stops awaiting in-flight requests and keeps the partial result
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let outcome = search.execute_with_cancel(&query, &cancel).await?;

    for failure in &outcome.failures {
        warn!("{} source degraded: {}", failure.source, failure.detail);
    }
    info!("search returned {} items", outcome.items.len());

    println!("{}", serde_json::to_string_pretty(&outcome.items)?);

    Ok(ExitCode::SUCCESS)
}

/// Parse command-line arguments. `None` means help/version was printed.
fn parse_args() -> Result<Option<CliArgs>> {
    let mut args = CliArgs::default();
    let mut keyword_parts: Vec<String> = Vec::new();

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("hansearch v{}", hansearch::VERSION);
                return Ok(None);
            }
            "--kind" => args.kinds.push(expect_value(&mut iter, "--kind")?),
            "--region" => args.regions.push(expect_value(&mut iter, "--region")?),
            "--subarea" => args.subareas.push(expect_value(&mut iter, "--subarea")?),
            "--area" => args.areas.push(expect_value(&mut iter, "--area")?),
            "--no-heritage" => args.no_heritage = true,
            "--no-tourism" => args.no_tourism = true,
            flag if flag.starts_with('-') => {
                print_usage();
                anyhow::bail!("unknown option: {flag}");
            }
            word => keyword_parts.push(word.to_string()),
        }
    }

    args.keyword = keyword_parts.join(" ");
    Ok(Some(args))
}

fn expect_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    iter.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

/// Narrow a filter group to the selected leaf codes; an empty selection
/// keeps the whole group.
fn narrow_group(group: &Category, codes: &[String]) -> Category {
    if codes.is_empty() {
        return group.clone();
    }
    let item = group
        .item
        .iter()
        .filter(|leaf| codes.iter().any(|code| code == &leaf.code))
        .cloned()
        .collect();
    Category::with_items(group.code.clone(), group.name.clone(), item)
}

/// Heritage filter node with its three groups narrowed by the CLI codes.
fn heritage_filter(args: &CliArgs) -> Result<Category> {
    let root = &category::heritage_categories()[0];
    let item = vec![
        narrow_group(root.child_group(heritage::KIND_GROUP)?, &args.kinds),
        narrow_group(root.child_group(heritage::REGION_GROUP)?, &args.regions),
        narrow_group(root.child_group(heritage::SUBAREA_GROUP)?, &args.subareas),
    ];
    Ok(Category::with_items(
        root.code.clone(),
        root.name.clone(),
        item,
    ))
}

/// Tourism filter node. With `--area` selections only the areaCode grouping
/// is kept, narrowed to those codes; otherwise all groupings are queried.
fn tourism_filter(args: &CliArgs) -> Category {
    let root = &category::tourism_area_codes()[0];
    if args.areas.is_empty() {
        return root.clone();
    }
    let item = root
        .item
        .iter()
        .filter(|group| group.code == "areaCode")
        .map(|group| narrow_group(group, &args.areas))
        .collect();
    Category::with_items(root.code.clone(), root.name.clone(), item)
}

/// Load settings from file or use defaults.
fn load_settings() -> Result<Settings> {
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/hansearch/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("hansearch/settings.yml"))
            .unwrap_or_default(),
    ];

    // Check environment variable first
    if let Ok(path) = std::env::var("HANSEARCH_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    for path in paths.iter() {
        if path.exists() {
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

/// Print usage information.
fn print_usage() {
    println!(
        r#"
hansearch v{}
A metasearch aggregator for Korean heritage and tourism open APIs

USAGE:
    hansearch [OPTIONS] [KEYWORD]

OPTIONS:
    --kind <CODE>       Heritage designation kind code (repeatable)
    --region <CODE>     Heritage region code (repeatable)
    --subarea <CODE>    Heritage palace/sub-area code (repeatable)
    --area <CODE>       Tourism area code (repeatable)
    --no-heritage       Skip the heritage registry
    --no-tourism        Skip the tourism service
    -h, --help          Print help information
    -V, --version       Print version information

ENVIRONMENT VARIABLES:
    HANSEARCH_SETTINGS_PATH   Path to settings.yml
    HANSEARCH_DEBUG           Enable debug mode (true/false)
    HANSEARCH_SERVICE_KEY     VisitKorea API credential (OPEN_API_KEY also accepted)
"#,
        hansearch::VERSION
    );
}
