use chrono::NaiveDate;
use clap::Parser;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::info;

use crate::date::{parse_date, resolve};
use crate::error::{Result, SaintError};
use crate::oca::{OcaScraper, OcaScraperBuilder, DEFAULT_BASE_URL, DEFAULT_IMAGE_HOST};
use crate::select::Pick;

/// Fetch the saint of the day from oca.org as a markdown post.
#[derive(Debug, Parser)]
#[command(name = "saint-of-the-day", version)]
pub struct Args {
    /// Date to fetch (YYYY-MM-DD). Defaults to today.
    #[arg(value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Pick a random non-top saint for the day. Falls back to the top saint
    /// if only one is listed.
    #[arg(long)]
    pub random: bool,

    /// Save output to this file instead of printing to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, env = "OCA_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    #[arg(long, env = "OCA_IMAGE_HOST", default_value = DEFAULT_IMAGE_HOST, hide = true)]
    pub image_host: String,
}

impl Args {
    pub fn pick(&self) -> Pick {
        if self.random {
            Pick::Random
        } else {
            Pick::Top
        }
    }

    pub fn scraper(&self) -> Result<OcaScraper> {
        Ok(OcaScraperBuilder::default()
            .base_url(self.base_url.as_str())
            .image_host(self.image_host.as_str())
            .timeout(Duration::from_secs(self.timeout))
            .build()?)
    }

    pub async fn run(&self) -> Result<()> {
        let date = resolve(self.date);
        let day = self.scraper()?.scrape(date, self.pick()).await?;
        let markdown = day.to_markdown()?;
        write_output(&markdown, self.output.as_deref())
    }
}

/// Writes the post to `path`, or to stdout when no path is given.
pub fn write_output(markdown: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{markdown}\n")).map_err(|source| SaintError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Saved to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{markdown}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}
