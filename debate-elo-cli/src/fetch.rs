//! Round results scraped from tabroom.com.

use std::{thread, time::Duration};

use debate_elo::Winner;
use reqwest::{blocking::Client, header::CONTENT_TYPE, StatusCode};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::{
    config::FetchConfig,
    document::{RawRound, RawTournament, TournamentDescriptor},
    Error,
};

/// Source of the rounds of a tournament.
pub trait RoundSource {
    fn fetch(&self, descriptor: &TournamentDescriptor) -> Result<RawTournament, Error>;
}

pub struct Tabroom {
    client: Client,
    selectors: Selectors,
    base_url: String,
    retries: u32,
    retry_delay: Duration,
}

impl Tabroom {
    pub fn new(config: &FetchConfig) -> Result<Tabroom, Error> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(Error::Client)?;

        Ok(Tabroom {
            client,
            selectors: Selectors::new()?,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            retries: config.retries,
            retry_delay: config.retry_delay(),
        })
    }

    pub fn results_url(&self, descriptor: &TournamentDescriptor) -> String {
        format!(
            "{}/index/tourn/results/round_results.mhtml?tourn_id={}&round_id={}",
            self.base_url, descriptor.tourn_id, descriptor.round_id
        )
    }

    fn get_html(&self, url: &str) -> Result<Html, Error> {
        let mut attempt = 0;
        loop {
            match self.get_once(url) {
                Ok(body) => return Ok(Html::parse_document(&body)),
                Err(err) if attempt < self.retries => {
                    attempt += 1;
                    warn!("Retry {attempt}/{}: {err}", self.retries);
                    thread::sleep(self.retry_delay * attempt);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn get_once(&self, url: &str) -> Result<String, Error> {
        debug!("GET {url}");

        let response = self.client.get(url).send().map_err(|source| Error::Http {
            url: url.to_owned(),
            source,
        })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_ascii_lowercase);

        let is_html = content_type.as_deref().is_some_and(|ct| ct.contains("html"));
        if response.status() != StatusCode::OK || !is_html {
            return Err(Error::BadResponse {
                url: url.to_owned(),
                status: response.status().as_u16(),
                content_type,
            });
        }

        response.text().map_err(|source| Error::Http {
            url: url.to_owned(),
            source,
        })
    }
}

impl RoundSource for Tabroom {
    fn fetch(&self, descriptor: &TournamentDescriptor) -> Result<RawTournament, Error> {
        let url = self.results_url(descriptor);
        let index = self.get_html(&url)?;

        let mut rounds = Vec::new();
        for round_url in self.selectors.round_result_urls(&index, &self.base_url, &url)? {
            let page = self.get_html(&round_url)?;
            let parsed = self.selectors.parse_rounds(&page, &round_url)?;
            debug!("{} rounds at {round_url}", parsed.len());
            rounds.extend(parsed);
        }

        Ok(RawTournament {
            name: descriptor.name.clone(),
            rounds,
        })
    }
}

fn text(element: ElementRef) -> String {
    element.text().collect()
}

/// CSS selectors for the results pages, parsed once.
pub struct Selectors {
    heading: Selector,
    link: Selector,
    table: Selector,
    row: Selector,
    cell: Selector,
    decision: Selector,
}

impl Selectors {
    pub fn new() -> Result<Selectors, Error> {
        let parse = |css: &'static str| {
            Selector::parse(css).map_err(|err| Error::Selector {
                css,
                message: err.to_string(),
            })
        };

        Ok(Selectors {
            heading: parse("h4")?,
            link: parse("a")?,
            table: parse("tbody")?,
            row: parse("tr")?,
            cell: parse("td")?,
            decision: parse("div")?,
        })
    }

    /// Links to every round result page of the event, earliest round first.
    pub fn round_result_urls(
        &self,
        html: &Html,
        base_url: &str,
        page_url: &str,
    ) -> Result<Vec<String>, Error> {
        let sidebar = html
            .select(&self.heading)
            .find(|h4| {
                let heading = text(*h4);
                heading.contains("Results") && !heading.contains("Event Results")
            })
            .and_then(|h4| h4.parent())
            .and_then(ElementRef::wrap)
            .ok_or_else(|| Error::MissingElement {
                url: page_url.to_owned(),
                what: "results sidebar",
            })?;

        let mut urls: Vec<String> = sidebar
            .select(&self.link)
            .filter(|a| {
                a.text()
                    .any(|fragment| fragment.trim().eq_ignore_ascii_case("round results"))
            })
            .filter_map(|a| a.value().attr("href"))
            .map(|href| format!("{base_url}{href}"))
            .collect();

        // The sidebar lists the latest round first.
        urls.reverse();
        Ok(urls)
    }

    /// All rounds listed in the results table of a round page.
    pub fn parse_rounds(&self, html: &Html, page_url: &str) -> Result<Vec<RawRound>, Error> {
        let table = html
            .select(&self.table)
            .next()
            .ok_or_else(|| Error::MissingElement {
                url: page_url.to_owned(),
                what: "results table",
            })?;

        Ok(table
            .select(&self.row)
            .filter_map(|row| self.parse_round(row))
            .collect())
    }

    fn parse_round(&self, row: ElementRef) -> Option<RawRound> {
        let mut cells = row
            .select(&self.cell)
            .filter(|cell| cell.value().classes().eq(["smallish"]));

        let aff = self.debater_name(cells.next()?);
        let neg = self.debater_name(cells.next()?);

        let winners = match cells.next() {
            Some(cell) => cell
                .select(&self.decision)
                .map(|div| text(div).trim().to_uppercase())
                .map(|tag| tag.parse::<Winner>().unwrap_or_else(|never| match never {}))
                .collect(),
            None => Vec::new(),
        };

        Some(RawRound { aff, neg, winners })
    }

    /// Reconstructs a competitor's name from a results cell. The `title`
    /// attribute holds the debater's name and the link text holds the school
    /// followed by the name, often abbreviated to initials.
    fn debater_name(&self, cell: ElementRef) -> Option<String> {
        let title = cell.value().attr("title")?;
        let link = cell.select(&self.link).next()?;

        let link_text = text(link);
        let words: Vec<&str> = link_text.split_whitespace().collect();
        let title_words: Vec<&str> = title.split_whitespace().collect();

        if words[words.len().saturating_sub(2)..] == title_words[..] {
            Some(words.join(" "))
        } else {
            Some(format!(
                "{} {}",
                words[..words.len().saturating_sub(1)].join(" "),
                title
            ))
        }
    }
}
