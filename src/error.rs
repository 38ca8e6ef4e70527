use std::path::PathBuf;
use thiserror::Error;

use crate::oca::OcaScraperBuilderError;

#[derive(Error, Debug)]
pub enum SaintError {
    #[error("could not parse date '{0}', use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not find any saint on {0}")]
    NoSaints(String),

    #[error("no troparion or kontakion found on {0}")]
    NoChants(String),

    #[error("failed to render post: {0}")]
    Render(#[from] askama::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scraper configuration: {0}")]
    Builder(#[from] OcaScraperBuilderError),
}

pub type Result<T> = std::result::Result<T, SaintError>;
