use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use strum::Display;

/// `/` marks a line break in the site's chant notation.
static LINE_BREAK_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*/\s*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChantKind {
    Troparion,
    Kontakion,
}

/// The first troparion and kontakion found on a troparia page.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Chants {
    pub troparion: Option<String>,
    pub kontakion: Option<String>,
}

impl ChantKind {
    /// Classifies an article heading such as "Troparion &mdash; Tone 4".
    pub fn from_heading(heading: &str) -> Option<Self> {
        let heading = heading.to_lowercase();
        [Self::Troparion, Self::Kontakion]
            .into_iter()
            .find(|kind| heading.contains(&kind.to_string()))
    }
}

impl Chants {
    pub fn is_empty(&self) -> bool {
        self.troparion.is_none() && self.kontakion.is_none()
    }

    pub fn get(&self, kind: ChantKind) -> Option<&str> {
        match kind {
            ChantKind::Troparion => self.troparion.as_deref(),
            ChantKind::Kontakion => self.kontakion.as_deref(),
        }
    }

    /// Present chants in rendering order.
    pub fn sections(&self) -> impl Iterator<Item = (ChantKind, &str)> {
        [ChantKind::Troparion, ChantKind::Kontakion]
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|text| (kind, text)))
    }

    fn slot(&mut self, kind: ChantKind) -> &mut Option<String> {
        match kind {
            ChantKind::Troparion => &mut self.troparion,
            ChantKind::Kontakion => &mut self.kontakion,
        }
    }
}

/// Extracts the first troparion and kontakion from a troparia page.
///
/// Every `<article>` carrying an `<h2>` is a candidate; the heading picks the
/// kind and the first `<p>` holds the text. Later chants of a kind already
/// seen are ignored.
pub fn parse_chants(html: &str) -> Chants {
    let document = Html::parse_document(html);
    let article_selector = Selector::parse("article").unwrap();
    let heading_selector = Selector::parse("h2").unwrap();
    let body_selector = Selector::parse("p").unwrap();

    let mut chants = Chants::default();
    for article in document.select(&article_selector) {
        let Some(heading) = article.select(&heading_selector).next() else {
            continue;
        };
        let Some(kind) = ChantKind::from_heading(&heading.text().collect::<String>()) else {
            continue;
        };

        let slot = chants.slot(kind);
        if slot.is_some() {
            continue;
        }

        let text = article
            .select(&body_selector)
            .next()
            .map(|body| clean_chant_text(&body.text().collect::<String>()))
            .unwrap_or_default();
        if !text.is_empty() {
            *slot = Some(text);
        }
    }

    chants
}

/// Turns `/` line-break markers into newlines.
pub fn clean_chant_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    LINE_BREAK_MARKER
        .replace_all(&collapsed, "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn parse_chants_should_work() {
        let content = fs::read_to_string("fixtures/troparia.html").unwrap();
        let chants = parse_chants(&content);

        insta::assert_json_snapshot!(chants, @r###"
        {
          "troparion": "We celebrate the memory of Your Prophet Joel, O Lord;\nthrough him we beseech You:\n\"Save our souls!\"",
          "kontakion": "Illumined by the Spirit, O Prophet,\nyour heart became the dwelling place of shining prophecy;\nyou saw far-off things as if they were near.\nTherefore we honor you, blessed and glorious Joel."
        }
        "###);
    }

    #[test]
    fn parse_chants_should_skip_empty_and_unknown_articles() {
        let html = r#"
            <article><h2>Reading</h2><p>not a chant</p></article>
            <article><p>no heading / here</p></article>
            <article><h2>Kontakion</h2><p>   </p></article>
            <article><h2>Kontakion &mdash; Tone 8</h2><p>first / kontakion</p></article>
            <article><h2>Kontakion &mdash; Tone 2</h2><p>second kontakion</p></article>
        "#;
        let chants = parse_chants(html);

        assert_eq!(chants.troparion, None);
        assert_eq!(chants.kontakion.as_deref(), Some("first\nkontakion"));
        assert!(!chants.is_empty());
    }

    #[test]
    fn parse_chants_should_return_empty_without_articles() {
        let chants = parse_chants("<html><body><p>Page not found</p></body></html>");
        assert!(chants.is_empty());
        assert_eq!(chants.sections().count(), 0);
    }

    #[test]
    fn clean_chant_text_should_leave_no_marker() {
        let text = "O holy one,/ pray for us   /\n  sinners //  and  save\n our souls! /";
        let cleaned = clean_chant_text(text);

        assert_eq!(cleaned, "O holy one,\npray for us\nsinners\nand save our souls!");
        assert!(!cleaned.contains('/'));
        assert!(cleaned.lines().all(|line| line == line.trim()));
    }

    #[test]
    fn chant_kind_should_classify_headings() {
        assert_eq!(
            ChantKind::from_heading("Troparion \u{2014} Tone 4"),
            Some(ChantKind::Troparion)
        );
        assert_eq!(
            ChantKind::from_heading("KONTAKION"),
            Some(ChantKind::Kontakion)
        );
        assert_eq!(ChantKind::from_heading("Life"), None);
        assert_eq!(ChantKind::Kontakion.to_string(), "kontakion");
    }

    #[test]
    fn sections_should_follow_rendering_order() {
        let chants = Chants {
            troparion: None,
            kontakion: Some("k".to_string()),
        };
        let sections = chants.sections().collect::<Vec<_>>();
        assert_eq!(sections, vec![(ChantKind::Kontakion, "k")]);
    }
}
