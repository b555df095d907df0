use crate::CLAP_STYLING;
use clap::{arg, command};
use std::path::PathBuf;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("waymark")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("waymark")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and per-request progress")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" ... "Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-c --"config" <PATH>)
                .required(false)
                .global(true)
                .help("Path to a waymark.toml config file (default: ./waymark.toml if present)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Writes a default configuration file")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Where to write the config file")
                        .default_value("waymark.toml"),
                )
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite an existing config file without asking")
                        .required(false),
                ),
        )
        .subcommand(probe_args(command!("run").about(
            "Explore the domain for working endpoints, retest the legacy URLs, then \
            classify failures and print recommendations.",
        )))
        .subcommand(probe_args(
            command!("explore").about("Probe the candidate path catalog against the domain"),
        ))
        .subcommand(probe_args(
            command!("retest").about("Retest the legacy URL list over HTTPS and classify failures"),
        ))
}

fn probe_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-d --"domain" <HOST>)
            .required(false)
            .help("Bare host name to explore, e.g. www.example.com"),
    )
    .arg(
        arg!(-w --"wordlist" <PATH>)
            .required(false)
            .help("Newline-delimited file of candidate path suffixes")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        arg!(-u --"urls-file" <PATH>)
            .required(false)
            .help("Newline-delimited file of legacy URLs to retest")
            .value_parser(clap::value_parser!(PathBuf)),
    )
    .arg(
        arg!(--"timeout" <SECONDS>)
            .required(false)
            .help("Per-request timeout in seconds")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"delay" <MILLIS>)
            .required(false)
            .help("Pause between consecutive requests in milliseconds (0 disables)")
            .value_parser(clap::value_parser!(u64)),
    )
    .arg(
        arg!(--"insecure")
            .required(false)
            .help("Skip TLS certificate validation. Only for targets with a broken certificate")
            .action(clap::ArgAction::SetTrue),
    )
    .arg(
        arg!(-o --"output" <PATH>)
            .required(false)
            .help("Where to write the JSON report (default: scraping_output/detailed_analysis.json)")
            .value_parser(clap::value_parser!(PathBuf))
            .conflicts_with("no-save"),
    )
    .arg(
        arg!(--"no-save")
            .required(false)
            .help("Print results only, do not write the JSON report")
            .action(clap::ArgAction::SetTrue),
    )
}
