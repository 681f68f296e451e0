use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use skitter_engine::{CrawlResult, Crawler, StaticFetcher};
use std::path::PathBuf;
use std::time::Duration;

/// Load the page graph backing the crawl: a JSON file when one is given,
/// the built-in sample otherwise.
pub fn load_fetcher(graph: Option<&PathBuf>) -> anyhow::Result<StaticFetcher> {
    match graph {
        Some(path) => StaticFetcher::from_json_file(path)
            .with_context(|| format!("Failed to load page graph from {}", path.display())),
        None => Ok(StaticFetcher::sample()),
    }
}

/// Build the post-crawl summary as a string
pub fn generate_crawl_report(results: &[CrawlResult]) -> String {
    let mut report = String::new();

    report.push_str("Summary:\n");
    report.push_str(&format!("  Pages crawled: {}\n", results.len()));

    let total_links: usize = results.iter().map(|r| r.links.len()).sum();
    report.push_str(&format!("  Total links found: {}\n", total_links));

    report
}

fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "✗".red().bold(), err);
    std::process::exit(1);
}

pub async fn handle_crawl(args: &ArgMatches) {
    // Initialize tracing for logging; fetch failures surface here as WARNs
    tracing_subscriber::fmt::init();

    let seed = args.get_one::<String>("seed").unwrap();
    let depth = *args.get_one::<usize>("depth").unwrap();
    let buffer = *args.get_one::<usize>("buffer").unwrap();
    let graph = args.get_one::<PathBuf>("graph");
    let format = args.get_one::<String>("format").unwrap();
    let quiet = args.get_flag("quiet");

    let fetcher = match load_fetcher(graph) {
        Ok(fetcher) => fetcher,
        Err(err) => fail(format!("{:#}", err)),
    };

    let spinner = if !quiet && format == "text" {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(pb)
    } else {
        None
    };

    let mut rx = Crawler::new()
        .with_max_depth(depth)
        .with_buffer(buffer)
        .crawl(seed, fetcher);

    // Drain until the engine closes the stream.
    let mut results = Vec::new();
    while let Some(found) = rx.recv().await {
        if let Some(pb) = &spinner {
            pb.set_message(format!("Crawling... {} pages found", results.len() + 1));
            pb.println(format!(
                "{} {} {:?}",
                "found:".green().bold(),
                found.url.bright_white(),
                found.body
            ));
        }
        results.push(found);
    }

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    match format.as_str() {
        "json" => match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("{}", json),
            Err(err) => fail(err),
        },
        _ => {
            if !quiet {
                println!("\n{} Crawl complete!\n", "✓".green().bold());
            }
            print!("{}", generate_crawl_report(&results));
        }
    }
}

pub fn handle_dataset_show(args: &ArgMatches) {
    let graph = args.get_one::<PathBuf>("graph");

    let fetcher = match load_fetcher(graph) {
        Ok(fetcher) => fetcher,
        Err(err) => fail(format!("{:#}", err)),
    };

    match serde_json::to_string_pretty(fetcher.pages()) {
        Ok(json) => println!("{}", json),
        Err(err) => fail(err),
    }
}
