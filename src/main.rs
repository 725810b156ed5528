use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use web_harvest::config::ScraperConfig;
use web_harvest::fetchers::{HttpSource, PageSource, WebDriverSource};
use web_harvest::output::{self, Summary};
use web_harvest::{ExtractionResult, Session};

mod args;
use args::{Args, Command};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("An error occurred: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let invalid = args.command.invalid_urls();
    if !invalid.is_empty() {
        return Err(format!("invalid URL(s): {}", invalid.join(", ")).into());
    }

    let config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    let config = args.apply_to(config.apply_env());

    if config.use_webdriver {
        println!("Note: browser scraping requires a WebDriver server (e.g., ChromeDriver).");
        println!(
            "Set WEBDRIVER_URL environment variable if not using the default {}",
            config.webdriver_url
        );

        match WebDriverSource::from_config(&config).await {
            Ok(source) => {
                let session = Session::from_config(source, &config);
                return execute(session, &args.command, &config).await;
            }
            Err(e) => {
                ::log::warn!("WebDriver setup failed: {}. Falling back to HTTP scraping.", e);
            }
        }
    }

    let session = Session::from_config(HttpSource::from_config(&config)?, &config);
    execute(session, &args.command, &config).await
}

/// Runs `command`, stopping early on Ctrl-C, and always closes the session
async fn execute<S: PageSource>(
    mut session: Session<S>,
    command: &Command,
    config: &ScraperConfig,
) -> Result<(), Box<dyn Error>> {
    let outcome = tokio::select! {
        outcome = run_command(&mut session, command, config) => outcome,
        _ = tokio::signal::ctrl_c() => {
            println!("\nScraping interrupted by user");
            Ok(())
        }
    };

    session.close().await;
    outcome
}

async fn run_command<S: PageSource>(
    session: &mut Session<S>,
    command: &Command,
    config: &ScraperConfig,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Search { query, num_results } => {
            let num_results = num_results.unwrap_or(config.num_results);
            let results = session.search_and_scrape(query, num_results).await?;
            let path = output::save_results(&results, None, &config.output_dir)?;
            print_summary(&results, &path);
        }
        Command::Scrape { urls, output: target } if urls.len() == 1 => {
            let url = &urls[0];
            println!("Scraping {}...", url);

            let result = session.scrape_page(url).await;
            let path = target
                .clone()
                .unwrap_or_else(|| PathBuf::from("output.json"));
            output::save_result(&result, &path)?;

            println!("Scraping completed. Results saved to {}", path.display());
            match &result {
                ExtractionResult::Success(page) => {
                    println!("Title: {}", page.title);
                    println!("Content length: {} characters", page.content.chars().count());
                }
                ExtractionResult::Failure(failed) => println!("Error: {}", failed.error),
            }
        }
        Command::Scrape { urls, output: target } => {
            let results = session.scrape_multiple(urls).await;
            let path = output::save_results(&results, target.as_deref(), &config.output_dir)?;
            print_summary(&results, &path);
        }
    }

    Ok(())
}

fn print_summary(results: &[ExtractionResult], path: &std::path::Path) {
    let summary = Summary::of(results);

    println!("\nScraping completed!");
    println!("Total URLs processed: {}", summary.total);
    println!("Successful scrapes: {}", summary.successful);
    println!("Results saved to: {}", path.display());

    println!("\nFirst few results:");
    for (i, result) in results.iter().take(3).enumerate() {
        match result {
            ExtractionResult::Success(page) => {
                let title = page.title.chars().take(100).collect::<String>();
                println!("{}. {}...", i + 1, title);
            }
            ExtractionResult::Failure(failed) => println!("{}. Error: {}", i + 1, failed.error),
        }
    }
}
