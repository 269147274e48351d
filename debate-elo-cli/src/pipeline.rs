//! The three steps of the pipeline, each reading one document and writing
//! the next.

use std::path::Path;

use debate_elo::{format_rankings, merge_tournaments, Leaderboard, RatingSystem, ReplaySummary, Tournament};
use tracing::{info, warn};

use crate::{
    document::{RawTournament, TournamentDescriptor, TournamentsDocument},
    fetch::RoundSource,
    store::{read_document, read_prior, write_document, write_text},
    Error,
};

/// Fetches the rounds of every tournament listed in `infile`.
///
/// With `append`, tournaments already in `outfile` are kept and not fetched
/// again. Returns the number of tournaments fetched.
pub fn download<S: RoundSource>(
    source: &S,
    infile: &Path,
    outfile: &Path,
    append: bool,
) -> Result<usize, Error> {
    let fresh: TournamentsDocument<TournamentDescriptor> = read_document(infile)?;
    let persisted: TournamentsDocument<RawTournament> = if append {
        read_prior(outfile)
    } else {
        TournamentsDocument::default()
    };
    let kept = persisted.tournaments.len();

    let mut progress = |index: usize, total: usize, name: &str| {
        info!("Downloading tournament {index}/{total}: {name}");
    };
    let tournaments = merge_tournaments(
        fresh.tournaments,
        persisted.tournaments,
        &mut progress,
        |descriptor| source.fetch(&descriptor),
    )?;

    let fetched = tournaments.len() - kept;
    info!("Saving {} tournaments ({fetched} new)", tournaments.len());
    write_document(outfile, &TournamentsDocument { tournaments })?;
    Ok(fetched)
}

/// Folds the processed tournaments in `infile` into ratings.
///
/// With `append`, the ratings already in `outfile` are the starting point.
pub fn calculate(
    system: &RatingSystem,
    infile: &Path,
    outfile: &Path,
    append: bool,
) -> Result<ReplaySummary, Error> {
    let document: TournamentsDocument<RawTournament> = read_document(infile)?;
    let tournaments: Vec<Tournament> = document
        .tournaments
        .into_iter()
        .map(Tournament::from)
        .collect();

    let seed = if append {
        read_prior(outfile)
    } else {
        Leaderboard::new()
    };

    let mut progress = |index: usize, total: usize, name: &str| {
        info!("Calculating tournament {index}/{total}: {name}");
    };
    let (leaderboard, summary) = system.resume(seed, &tournaments, &mut progress);

    for (tag, count) in &summary.ignored_tags {
        warn!("Ignored winner tag {tag:?} ({count} times)");
    }
    info!(
        "Applied {} rounds with {} decisions, skipped {} undecided rounds",
        summary.rounds_applied, summary.decisions, summary.rounds_skipped
    );

    info!("Saving ratings of {} competitors", leaderboard.len());
    write_document(outfile, &leaderboard.sorted())?;
    Ok(summary)
}

/// Renders the ratings in `infile` as a ranking list.
pub fn rank(infile: &Path, outfile: &Path) -> Result<(), Error> {
    let leaderboard: Leaderboard = read_document(infile)?;
    info!("Saving rankings");
    write_text(outfile, &format_rankings(&leaderboard))
}
