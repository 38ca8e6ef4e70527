use askama::Template;

use crate::chant::ChantKind;
use crate::error::Result;
use crate::oca::SaintOfTheDay;

pub const TAGS: &str = "#Christian #OrthodoxChristian #Orthodox #Orthostr #Saint";

#[derive(Debug, Template)]
#[template(path = "saint.md.j2", escape = "none")]
struct SaintPost<'a> {
    name: &'a str,
    day_label: String,
    life_url: &'a str,
    image_url: String,
    sections: Vec<ChantSection<'a>>,
    tags: &'a str,
}

#[derive(Debug)]
struct ChantSection<'a> {
    kind: ChantKind,
    text: &'a str,
}

impl SaintOfTheDay {
    /// Renders the markdown post, without a trailing newline.
    pub fn to_markdown(&self) -> Result<String> {
        let post = SaintPost {
            name: &self.saint.name,
            day_label: self.date.format("%d %B").to_string(),
            life_url: &self.life_url,
            image_url: self.saint.large_image_url().unwrap_or_default(),
            sections: self
                .chants
                .sections()
                .map(|(kind, text)| ChantSection { kind, text })
                .collect(),
            tags: TAGS,
        };

        Ok(post.render()?.trim_end().to_string())
    }
}
