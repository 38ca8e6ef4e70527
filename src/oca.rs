//! Scraper for the saints pages of oca.org.

use chrono::{Datelike, NaiveDate};
use derive_builder::Builder;
use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::chant::{parse_chants, Chants};
use crate::error::{Result, SaintError};
use crate::select::{choose, Pick};

pub const DEFAULT_BASE_URL: &str = "https://www.oca.org";
pub const DEFAULT_IMAGE_HOST: &str = "https://images.oca.org";

static LIFE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/saints/lives/\d{4}/\d{2}/\d{2}/(\d+-[^/?#\s]+)").unwrap());
static ICON_SIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/icons/(xsm|sm|md)/").unwrap());

#[derive(Debug, Clone, Builder)]
pub struct OcaScraper {
    #[builder(setter(into), default = "DEFAULT_BASE_URL.to_string()")]
    base_url: String,
    #[builder(setter(into), default = "DEFAULT_IMAGE_HOST.to_string()")]
    image_host: String,
    #[builder(default = "Duration::from_secs(10)")]
    timeout: Duration,
}

/// One commemoration listed for a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Saint {
    pub name: String,
    pub slug: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SaintOfTheDay {
    pub date: NaiveDate,
    pub saint: Saint,
    pub life_url: String,
    pub chants: Chants,
}

impl Saint {
    /// The thumbnail rewritten to the large icon variant.
    pub fn large_image_url(&self) -> Option<String> {
        self.thumbnail_url
            .as_deref()
            .map(|url| ICON_SIZE.replace(url, "/icons/lg/").into_owned())
    }
}

impl OcaScraper {
    pub async fn scrape(&self, date: NaiveDate, pick: Pick) -> Result<SaintOfTheDay> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.scrape_with_rng(date, pick, &mut rng).await
    }

    /// Fetches the listing for `date`, picks one saint and fetches its chants.
    #[instrument(level = "debug", skip(self, rng))]
    pub async fn scrape_with_rng<R: Rng + ?Sized>(
        &self,
        date: NaiveDate,
        pick: Pick,
        rng: &mut R,
    ) -> Result<SaintOfTheDay> {
        info!("Fetching saint for {}...", date.format("%B %d, %Y"));

        let client = self.client()?;
        let listing_url = self.listing_url(date);
        let saints = self.fetch_saints(&client, &listing_url).await?;

        let saint = choose(&saints, pick, rng)
            .cloned()
            .ok_or_else(|| SaintError::NoSaints(listing_url.clone()))?;
        match pick {
            Pick::Random if saints.len() > 1 => info!("Random saint: {}", saint.name),
            Pick::Random => info!("Only one saint today, using: {}", saint.name),
            Pick::Top => info!("Top saint: {}", saint.name),
        }

        let troparia_url = self.troparia_url(date, &saint);
        let chants = self.fetch_chants(&client, &troparia_url).await?;

        Ok(SaintOfTheDay {
            date,
            life_url: self.life_url(date, &saint),
            saint,
            chants,
        })
    }

    pub fn listing_url(&self, date: NaiveDate) -> String {
        format!("{}/saints/lives/{}", self.base(), date_path(date))
    }

    pub fn life_url(&self, date: NaiveDate, saint: &Saint) -> String {
        format!("{}/{}", self.listing_url(date), saint.slug)
    }

    pub fn troparia_url(&self, date: NaiveDate, saint: &Saint) -> String {
        format!(
            "{}/saints/troparia/{}/{}",
            self.base(),
            date_path(date),
            saint.slug
        )
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(SaintError::Client)
    }

    async fn fetch_saints(&self, client: &reqwest::Client, url: &str) -> Result<Vec<Saint>> {
        let html = fetch_page(client, url).await?;
        let saints = parse_saints(&html, &self.image_host);
        if saints.is_empty() {
            return Err(SaintError::NoSaints(url.to_string()));
        }

        debug!(count = saints.len(), "parsed saints");
        Ok(saints)
    }

    async fn fetch_chants(&self, client: &reqwest::Client, url: &str) -> Result<Chants> {
        let html = fetch_page(client, url).await?;
        let chants = parse_chants(&html);
        if chants.is_empty() {
            return Err(SaintError::NoChants(url.to_string()));
        }
        if chants.troparion.is_none() {
            warn!(%url, "no troparion found");
        }
        if chants.kontakion.is_none() {
            warn!(%url, "no kontakion found");
        }

        Ok(chants)
    }
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    debug!(%url, "fetching page");
    let fetch_error = |source| SaintError::Fetch {
        url: url.to_string(),
        source,
    };

    client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(fetch_error)?
        .text()
        .await
        .map_err(fetch_error)
}

fn date_path(date: NaiveDate) -> String {
    format!("{:04}/{:02}/{:02}", date.year(), date.month(), date.day())
}

/// Parses every `article.saint` of a listing page, in page order.
pub fn parse_saints(html: &str, image_host: &str) -> Vec<Saint> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("article.saint").unwrap();

    document
        .select(&selector)
        .filter_map(|article| parse_saint(article, image_host))
        .collect()
}

fn parse_saint(article: ElementRef, image_host: &str) -> Option<Saint> {
    let name = article
        .select(&Selector::parse("h2.name").unwrap())
        .next()
        .map(|node| {
            node.text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let Some(slug) = article
        .select(&Selector::parse("a[href]").unwrap())
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| LIFE_PATH.captures(href).map(|caps| caps[1].to_string()))
    else {
        debug!(%name, "skipping saint without a life page");
        return None;
    };

    let thumbnail_url = article
        .select(&Selector::parse("figure.thumbnail img").unwrap())
        .next()
        .and_then(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(|src| absolute_image_url(src, image_host));

    Some(Saint {
        name,
        slug,
        thumbnail_url,
    })
}

fn absolute_image_url(src: &str, image_host: &str) -> String {
    if src.starts_with("http") {
        src.to_string()
    } else if src.starts_with("//") {
        format!("https:{}", src)
    } else {
        format!("{}{}", image_host.trim_end_matches('/'), src)
    }
}
