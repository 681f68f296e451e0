use crate::CLAP_STYLING;
use clap::{arg, command};

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("skitter")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("skitter")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl the link graph reachable from a seed URL, printing each page \
                found exactly once.",
                )
                .arg(
                    arg!(-s --"seed" <URL>)
                        .required(false)
                        .help("The URL to start crawling from")
                        .default_value("https://example.org/"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum crawl depth; 0 visits nothing")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("3"),
                )
                .arg(
                    arg!(-g --"graph" <PATH>)
                        .required(false)
                        .help("Path to a JSON page graph (default: the built-in sample)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-b --"buffer" <CAPACITY>)
                        .required(false)
                        .help("Result channel capacity; publishers block when it is full")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("32"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Output format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-q --"quiet" "Suppress the progress spinner and per-page output")
                        .required(false),
                ),
        )
        .subcommand(
            command!("dataset")
                .about("Inspect page graph datasets")
                .subcommand_required(true)
                .subcommand(
                    command!("show")
                        .about("Print the effective page graph as JSON")
                        .arg(
                            arg!(-g --"graph" <PATH>)
                                .required(false)
                                .help("Path to a JSON page graph (default: the built-in sample)")
                                .value_parser(clap::value_parser!(std::path::PathBuf)),
                        ),
                ),
        )
}
