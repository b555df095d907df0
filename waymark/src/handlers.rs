use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;
use url::Url;
use waymark_core::config::load_wordlist;
use waymark_core::explore::{ExploreOptions, ProbeProgressCallback, explore};
use waymark_core::pipeline::{PhaseCallback, RunHooks, explore_and_retest};
use waymark_core::report::{AnalysisReport, generate_json_report, generate_text_summary, save_report};
use waymark_core::retest::retest;
use waymark_core::WaymarkConfig;
use waymark_scanner::{ProbeResult, Prober};

// Helper functions for loading target lists

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &Path) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read URLs file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok_and(|u| u.has_host()) {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    warn!("Skipping invalid URL '{}'", line);
    None
}

/// Expand a leading `~` the way a shell would
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).as_ref())
}

/// Load the config file (if any) and apply command line overrides on top
pub fn resolve_config(config_path: Option<&PathBuf>, args: &ArgMatches) -> Result<WaymarkConfig> {
    let config_path = config_path.map(|p| expand_path(p));
    let mut config = WaymarkConfig::load(config_path.as_deref())?;

    if let Some(domain) = args.get_one::<String>("domain") {
        config.domain = domain.trim().to_string();
    }
    if let Some(wordlist) = args.get_one::<PathBuf>("wordlist") {
        config.candidate_suffixes = load_wordlist(&expand_path(wordlist))?;
    }
    if let Some(urls_file) = args.get_one::<PathBuf>("urls-file") {
        config.legacy_urls =
            load_urls_from_file(&expand_path(urls_file)).map_err(anyhow::Error::msg)?;
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        config.timeout_secs = *timeout;
    }
    if let Some(delay) = args.get_one::<u64>("delay") {
        config.inter_request_delay_ms = *delay;
    }
    if args.get_flag("insecure") {
        config.skip_certificate_validation = true;
    }
    if let Some(output) = args.get_one::<PathBuf>("output") {
        config.output_path = output.clone();
    }

    config.validate()?;
    Ok(config)
}

fn build_prober(config: &WaymarkConfig) -> Result<Prober> {
    config.prober().context("Could not set up the HTTP client")
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> io::Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

/// One line per probe, e.g. `✓ 200 https://host/ (1234 bytes)`
pub fn format_probe_line(result: &ProbeResult) -> String {
    let status = result
        .status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "ERR".to_string());

    if result.is_working() {
        format!(
            "{} {} {} ({} bytes)",
            "✓".green().bold(),
            status.green(),
            result.url,
            result.content_length.unwrap_or_default()
        )
    } else {
        let status = match result.status_code {
            Some(400..=499) => status.yellow(),
            Some(_) => status.red(),
            None => status.red().bold(),
        };
        let mut line = format!("{} {} {}", "✗".red().bold(), status, result.url);
        if result.status_code.is_none()
            && let Some(ref error) = result.error
        {
            line.push_str(&format!(" {}", error.bright_black()));
        }
        line
    }
}

fn probe_progress(quiet: bool, label: &'static str) -> (ProgressBar, ProbeProgressCallback) {
    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{bar:40.cyan/blue}] {msg} {pos}/{len}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb.set_message(label);
        pb
    };

    let pb_clone = pb.clone();
    let callback: ProbeProgressCallback = Arc::new(move |idx, total, result| {
        pb_clone.set_length(total as u64);
        pb_clone.set_position(idx as u64);
        if quiet {
            return;
        }
        let line = format!("  [{:>2}/{}] {}", idx, total, format_probe_line(result));
        // A hidden bar swallows println, e.g. when stderr is not a terminal
        if pb_clone.is_hidden() {
            println!("{}", line);
        } else {
            pb_clone.println(line);
        }
    });

    (pb, callback)
}

fn persist(report: &AnalysisReport, config: &WaymarkConfig, args: &ArgMatches) {
    if args.get_flag("no-save") {
        return;
    }

    let path = expand_path(&config.output_path);
    let outcome = generate_json_report(report).and_then(|json| save_report(&json, &path));

    match outcome {
        Ok(()) => println!(
            "{} Detailed results saved to: {}",
            "✓".green().bold(),
            path.display().to_string().bright_white()
        ),
        Err(e) => {
            warn!("Could not save report to {}: {}", path.display(), e);
            println!(
                "{} Could not save results to file: {}",
                "⚠".yellow().bold(),
                e
            );
            println!("   Results are still displayed above.");
        }
    }
}

fn print_target(config: &WaymarkConfig) {
    println!("{} Domain:  {}", "→".blue(), config.domain.bright_white());
    println!(
        "{} Timeout: {}s  Delay: {}ms",
        "→".blue(),
        config.timeout_secs,
        config.inter_request_delay_ms
    );
    if config.skip_certificate_validation {
        println!(
            "{} {}",
            "⚠".yellow().bold(),
            "TLS certificate validation is disabled".yellow()
        );
    }
    println!();
}

pub async fn handle_run(config_path: Option<&PathBuf>, args: &ArgMatches, quiet: bool) -> Result<()> {
    let config = resolve_config(config_path, args)?;
    let prober = build_prober(&config)?;
    print_target(&config);

    println!("🔍 Exploring {}...", config.domain.bright_white());
    let (explore_pb, explore_progress) = probe_progress(quiet, "exploring");
    let (retest_pb, retest_progress) = probe_progress(quiet, "retesting");
    let on_retest_start: PhaseCallback = Arc::new(move |total| {
        explore_pb.finish_and_clear();
        println!("\n🔄 Testing original URLs ({} total)...", total);
    });

    let options = ExploreOptions {
        domain: config.domain.clone(),
        candidate_suffixes: config.candidate_suffixes.clone(),
        pacing: config.pacing(),
    };
    let hooks = RunHooks {
        explore_progress: Some(explore_progress),
        retest_progress: Some(retest_progress),
        on_retest_start: Some(on_retest_start),
    };
    let report = explore_and_retest(&prober, &options, &config.legacy_urls, hooks).await?;
    retest_pb.finish_and_clear();

    println!("\n{}", generate_text_summary(&report));
    persist(&report, &config, args);
    Ok(())
}

pub async fn handle_explore(
    config_path: Option<&PathBuf>,
    args: &ArgMatches,
    quiet: bool,
) -> Result<()> {
    let config = resolve_config(config_path, args)?;
    let prober = build_prober(&config)?;
    print_target(&config);

    let (pb, callback) = probe_progress(quiet, "exploring");
    let options = ExploreOptions {
        domain: config.domain.clone(),
        candidate_suffixes: config.candidate_suffixes.clone(),
        pacing: config.pacing(),
    };
    let exploration = explore(&prober, &options, Some(callback)).await?;
    pb.finish_and_clear();

    let report = AnalysisReport::exploration_only(exploration);
    println!("\n{}", generate_text_summary(&report));
    persist(&report, &config, args);
    Ok(())
}

pub async fn handle_retest(
    config_path: Option<&PathBuf>,
    args: &ArgMatches,
    quiet: bool,
) -> Result<()> {
    let config = resolve_config(config_path, args)?;
    let prober = build_prober(&config)?;

    println!("{} Retesting {} legacy URLs over HTTPS\n", "→".blue(), config.legacy_urls.len());
    let (pb, callback) = probe_progress(quiet, "retesting");
    let retest_report = retest(&prober, &config.legacy_urls, config.pacing(), Some(callback)).await;
    pb.finish_and_clear();

    let report = AnalysisReport::retest_only(retest_report);
    println!("\n{}", generate_text_summary(&report));
    persist(&report, &config, args);
    Ok(())
}

pub fn handle_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  WAYMARK INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let raw_path = args
        .get_one::<String>("PATH")
        .map(String::as_str)
        .unwrap_or(waymark_core::config::DEFAULT_CONFIG_FILE);
    let force = args.get_flag("force");
    let path = expand_path(Path::new(raw_path));

    if path.exists() && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!(
            "Config file already exists: {}",
            path.display().to_string().bright_white()
        );
        let response = print_prompt("Overwrite it? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let defaults = WaymarkConfig::default();
    let rendered = defaults.to_toml_string()?;
    fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Config written: {}",
        "✓".green().bold(),
        path.display().to_string().bright_white()
    );
    println!(
        "  {} {} candidate paths, {} legacy URLs",
        "ℹ".blue(),
        defaults.candidate_suffixes.len().to_string().cyan(),
        defaults.legacy_urls.len().to_string().cyan()
    );
    println!();
    Ok(())
}
