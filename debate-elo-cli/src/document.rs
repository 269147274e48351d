//! JSON documents passed between the download, calculate and rank steps.

use debate_elo::{Identity, Round, Tournament, Winner};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull, DisplayFromStr, PickFirst};

/// `{"Tournaments": [...]}` wrapper shared by the raw and processed
/// tournament documents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TournamentsDocument<T> {
    #[serde(rename = "Tournaments")]
    pub tournaments: Vec<T>,
}

impl<T> Default for TournamentsDocument<T> {
    fn default() -> Self {
        TournamentsDocument {
            tournaments: Vec::new(),
        }
    }
}

/// Where to find a tournament's results on tabroom.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TournamentDescriptor {
    #[serde(rename = "Tournament")]
    pub name: String,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub tourn_id: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub round_id: u64,
}

impl Identity for TournamentDescriptor {
    fn identity(&self) -> &str {
        &self.name
    }
}

/// A downloaded tournament with its rounds in the order they were held.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawTournament {
    #[serde(rename = "Tournament")]
    pub name: String,
    #[serde(rename = "Rounds", default)]
    pub rounds: Vec<RawRound>,
}

impl Identity for RawTournament {
    fn identity(&self) -> &str {
        &self.name
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct RawRound {
    #[serde(rename = "Aff", default)]
    pub aff: Option<String>,
    #[serde(rename = "Neg", default)]
    pub neg: Option<String>,
    #[serde(rename = "Winners", default)]
    #[serde_as(as = "DefaultOnNull<Vec<DisplayFromStr>>")]
    pub winners: Vec<Winner>,
}

impl From<RawRound> for Round {
    fn from(raw: RawRound) -> Round {
        Round {
            affirmative: raw.aff.unwrap_or_default(),
            negative: raw.neg.unwrap_or_default(),
            winners: raw.winners,
        }
    }
}

impl From<RawTournament> for Tournament {
    fn from(raw: RawTournament) -> Tournament {
        Tournament {
            name: raw.name,
            rounds: raw.rounds.into_iter().map(Round::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_ids_accept_numbers_and_strings() {
        let document: TournamentsDocument<TournamentDescriptor> = serde_json::from_str(
            r#"{"Tournaments": [
                {"Tournament": "Districts2020", "tourn_id": 15500, "round_id": "512345", "season": 2020}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            document.tournaments,
            [TournamentDescriptor {
                name: "Districts2020".to_owned(),
                tourn_id: 15500,
                round_id: 512345,
            }]
        );
    }

    #[test]
    fn test_missing_fields_make_undecided_rounds() {
        let raw: RawTournament = serde_json::from_str(
            r#"{"Tournament": "T", "Rounds": [
                {"Aff": "A", "Neg": "B", "Winners": ["AFF", "low point win"]},
                {"Aff": null, "Neg": "B", "Winners": ["NEG"]},
                {"Aff": "A", "Neg": "B", "Winners": null},
                {"Neg": "B"}
            ]}"#,
        )
        .unwrap();

        let tournament = Tournament::from(raw);
        assert_eq!(
            tournament.rounds[0],
            Round::new("A", "B", [Winner::Aff, Winner::Other("low point win".to_owned())])
        );
        assert!(tournament.rounds[0].is_decided());
        assert!(tournament.rounds[1..].iter().all(|round| !round.is_decided()));
    }

    #[test]
    fn test_processed_document_keeps_wire_names() {
        let document = TournamentsDocument {
            tournaments: vec![RawTournament {
                name: "T".to_owned(),
                rounds: vec![RawRound {
                    aff: Some("A".to_owned()),
                    neg: Some("B".to_owned()),
                    winners: vec![Winner::Neg],
                }],
            }],
        };

        assert_eq!(
            serde_json::to_string(&document).unwrap(),
            r#"{"Tournaments":[{"Tournament":"T","Rounds":[{"Aff":"A","Neg":"B","Winners":["NEG"]}]}]}"#
        );
    }
}
