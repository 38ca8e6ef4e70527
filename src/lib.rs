pub mod chant;
pub mod cli;
pub mod date;
pub mod error;
pub mod logger;
pub mod oca;
pub mod render;
pub mod select;

pub use chant::{ChantKind, Chants};
pub use error::{Result, SaintError};
pub use oca::{OcaScraper, OcaScraperBuilder, Saint, SaintOfTheDay};
pub use select::Pick;
