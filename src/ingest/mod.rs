//! Input parsing: Retrosheet-style game logs for the season projector, and
//! team pitching tables for rotation strengths.
//!
//! Both readers are strict about the fields they use and indifferent to
//! the many they don't. Errors carry the 1-based line number of the
//! offending row.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::elo::ScheduledGame;
use crate::league::Strength;

/// Field positions in a Retrosheet game-log row (0-indexed).
const VISITING_TEAM: usize = 3;
const HOME_TEAM: usize = 6;
const VISITING_SCORE: usize = 9;
const HOME_SCORE: usize = 10;

/// Starters per rotation taken from a pitching table.
const ROTATION_ARMS: usize = 3;

/// Errors from parsing input files.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: row has {fields} fields, need at least {needed}")]
    ShortRow {
        line: usize,
        fields: usize,
        needed: usize,
    },

    #[error("line {line}: invalid score {value:?}")]
    BadScore { line: usize, value: String },

    #[error("line {line}: no WAR value in cell {cell:?}")]
    MissingWar { line: usize, cell: String },

    #[error("line {line}: fewer than {needed} starter columns")]
    ShortRotation { line: usize, needed: usize },
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Read a Retrosheet-style game log into a schedule.
///
/// Rows are headerless comma-separated values with quoted team codes; only
/// the visiting/home team and score fields are consumed.
pub fn read_game_log<R: Read>(reader: R) -> Result<Vec<ScheduledGame>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut games = Vec::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let line = idx + 1;
        let record = record?;
        if record.len() <= HOME_SCORE {
            return Err(IngestError::ShortRow {
                line,
                fields: record.len(),
                needed: HOME_SCORE + 1,
            });
        }
        let parse_score = |raw: &str| -> Result<u32> {
            raw.trim().parse().map_err(|_| IngestError::BadScore {
                line,
                value: raw.to_string(),
            })
        };
        games.push(ScheduledGame {
            home: record[HOME_TEAM].trim().to_string(),
            away: record[VISITING_TEAM].trim().to_string(),
            home_score: parse_score(&record[HOME_SCORE])?,
            away_score: parse_score(&record[VISITING_SCORE])?,
        });
    }
    Ok(games)
}

/// Read a game log from a file path.
pub fn read_game_log_file<P: AsRef<Path>>(path: P) -> Result<Vec<ScheduledGame>> {
    read_game_log(File::open(path)?)
}

/// Extract the parenthesized WAR value from a pitching cell like
/// `"J. Verlander (6.06)"`. A bare numeric cell is accepted as-is.
fn extract_war(cell: &str, line: usize) -> Result<f64> {
    let missing = || IngestError::MissingWar {
        line,
        cell: cell.to_string(),
    };
    if let Some(open) = cell.rfind('(') {
        let rest = &cell[open + 1..];
        let close = rest.find(')').ok_or_else(|| missing())?;
        return rest[..close].trim().parse().map_err(|_| missing());
    }
    cell.trim().parse().map_err(|_| missing())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Read a team pitching table into per-team strength rotations.
///
/// Each row holds a team name followed by starter cells and then bullpen
/// cells, every cell carrying a parenthesized WAR. The rotation strength
/// is each of the top three starter WARs plus the bullpen average, rounded
/// to 2 decimals, so game 1 of a series is priced at the ace's strength
/// and later games work down the rotation.
///
/// `starters` and `bullpen` give how many cells of each kind follow the
/// team name.
pub fn read_pitching_strength<R: Read>(
    reader: R,
    starters: usize,
    bullpen: usize,
) -> Result<BTreeMap<String, Strength>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut strengths = BTreeMap::new();
    for (idx, record) in csv_reader.records().enumerate() {
        let line = idx + 2; // 1-based, after the header row
        let record = record?;
        let needed = 1 + starters + bullpen;
        if record.len() < needed {
            return Err(IngestError::ShortRow {
                line,
                fields: record.len(),
                needed,
            });
        }

        let team = record[0].trim().to_string();
        let mut starter_wars: Vec<f64> = (1..=starters)
            .map(|i| extract_war(&record[i], line))
            .collect::<Result<_>>()?;
        starter_wars.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        if starter_wars.len() < ROTATION_ARMS {
            return Err(IngestError::ShortRotation {
                line,
                needed: ROTATION_ARMS,
            });
        }
        starter_wars.truncate(ROTATION_ARMS);

        let bullpen_wars: Vec<f64> = (starters + 1..=starters + bullpen)
            .map(|i| extract_war(&record[i], line))
            .collect::<Result<_>>()?;
        let bullpen_avg = if bullpen_wars.is_empty() {
            0.0
        } else {
            bullpen_wars.iter().sum::<f64>() / bullpen_wars.len() as f64
        };

        let rotation = starter_wars
            .into_iter()
            .map(|war| round2(war + bullpen_avg))
            .collect();
        strengths.insert(team, Strength::rotation(rotation));
    }
    Ok(strengths)
}

/// Read a pitching table from a file path.
pub fn read_pitching_strength_file<P: AsRef<Path>>(
    path: P,
    starters: usize,
    bullpen: usize,
) -> Result<BTreeMap<String, Strength>> {
    read_pitching_strength(File::open(path)?, starters, bullpen)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_LOG: &str = concat!(
        "\"20220407\",\"0\",\"Thu\",\"MIL\",\"NL\",\"1\",\"CHN\",\"NL\",\"1\",\"5\",\"4\",\"54\"\n",
        "\"20220407\",\"0\",\"Thu\",\"CLE\",\"AL\",\"1\",\"KCA\",\"AL\",\"1\",\"1\",\"3\",\"51\"\n",
    );

    #[test]
    fn test_game_log_parses_teams_and_scores() {
        let games = read_game_log(GAME_LOG.as_bytes()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].away, "MIL");
        assert_eq!(games[0].home, "CHN");
        assert_eq!(games[0].away_score, 5);
        assert_eq!(games[0].home_score, 4);
        assert_eq!(games[1].home, "KCA");
        assert_eq!(games[1].home_score, 3);
    }

    #[test]
    fn test_game_log_rejects_short_rows() {
        let err = read_game_log("\"20220407\",\"0\",\"Thu\",\"MIL\"\n".as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::ShortRow { line: 1, .. }));
    }

    #[test]
    fn test_game_log_rejects_bad_scores() {
        let row = "\"20220407\",\"0\",\"Thu\",\"MIL\",\"NL\",\"1\",\"CHN\",\"NL\",\"1\",\"five\",\"4\",\"54\"\n";
        let err = read_game_log(row.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IngestError::BadScore { line: 1, ref value } if value == "five"
        ));
    }

    #[test]
    fn test_extract_war_variants() {
        assert_eq!(extract_war("J. Verlander (6.06)", 1).unwrap(), 6.06);
        assert_eq!(extract_war("A. Pitcher (-0.42)", 1).unwrap(), -0.42);
        assert_eq!(extract_war("3.5", 1).unwrap(), 3.5);
        assert!(extract_war("no war here", 1).is_err());
        assert!(extract_war("Broken (paren", 1).is_err());
    }

    const PITCHING: &str = concat!(
        "Team,S1,S2,S3,S4,S5,B1,B2\n",
        "Houston Astros,A (6.0),B (4.0),C (5.0),D (1.0),E (0.5),F (1.0),G (3.0)\n",
        "Seattle Mariners,H (3.0),I (2.0),J (2.5),K (0.0),L (1.5),M (2.0),N (2.0)\n",
    );

    #[test]
    fn test_pitching_rotation_is_top_three_plus_bullpen() {
        let strengths = read_pitching_strength(PITCHING.as_bytes(), 5, 2).unwrap();
        let hou = strengths.get("Houston Astros").unwrap();
        // Top three starters 6.0, 5.0, 4.0; bullpen average (1 + 3) / 2 = 2.
        assert_eq!(hou.for_game(0), 8.0);
        assert_eq!(hou.for_game(1), 7.0);
        assert_eq!(hou.for_game(2), 6.0);
        // Rotation wraps for a long series.
        assert_eq!(hou.for_game(3), 8.0);

        let sea = strengths.get("Seattle Mariners").unwrap();
        assert_eq!(sea.for_game(0), 5.0);
        assert_eq!(sea.for_game(1), 4.5);
        assert_eq!(sea.for_game(2), 4.0);
    }

    #[test]
    fn test_pitching_rejects_short_rows() {
        let short = "Team,S1,S2,S3,S4,S5,B1,B2\nHouston,A (6.0),B (4.0)\n";
        let err = read_pitching_strength(short.as_bytes(), 5, 2).unwrap_err();
        assert!(matches!(err, IngestError::ShortRow { line: 2, .. }));
    }

    #[test]
    fn test_pitching_rejects_malformed_cells() {
        let bad = "Team,S1,S2,S3,S4,S5,B1,B2\nHouston,A,B (4.0),C (5.0),D (1.0),E (0.5),F (1.0),G (3.0)\n";
        let err = read_pitching_strength(bad.as_bytes(), 5, 2).unwrap_err();
        assert!(matches!(err, IngestError::MissingWar { line: 2, .. }));
    }
}
