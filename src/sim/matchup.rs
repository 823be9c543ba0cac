//! The single-game outcome model.
//!
//! One game is decided by a single uniform draw against the home side's win
//! ratio. Home field is an explicit label on the call, never inferred from
//! argument position conventions or collection ordering.

use rand::Rng;

use super::errors::SimulationError;

/// Which side won a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameWinner {
    Home,
    Away,
}

impl GameWinner {
    pub fn other(self) -> GameWinner {
        match self {
            GameWinner::Home => GameWinner::Away,
            GameWinner::Away => GameWinner::Home,
        }
    }
}

/// The probability that the home side wins a single game.
///
/// The host is credited `home_advantage_pct` percent of the combined
/// strength in the game; the visitor is debited the same amount, so the
/// denominator stays `home + away`:
///
/// ```text
/// adv   = (home + away) / 100 * home_advantage_pct
/// ratio = (home + adv) / (home + away)
/// ```
///
/// With `home_advantage_pct = 0` this reduces to the plain
/// `home / (home + away)` strength ratio.
///
/// Fails when the combined strength is not a positive finite number, which
/// would otherwise turn the ratio into a silent NaN or division by zero.
pub fn home_win_ratio(
    home: f64,
    away: f64,
    home_advantage_pct: f64,
) -> Result<f64, SimulationError> {
    let combined = home + away;
    if !combined.is_finite() || combined <= 0.0 {
        return Err(SimulationError::InvalidStrength { home, away });
    }
    let adv = combined / 100.0 * home_advantage_pct;
    Ok((home + adv) / combined)
}

/// Play one game: draw `r` uniformly from `[0, 1)`; the home side loses iff
/// `r` exceeds its win ratio.
///
/// Deterministic given a seeded RNG, which is what every statistical test
/// in this crate relies on.
pub fn play_game<R: Rng>(
    rng: &mut R,
    home: f64,
    away: f64,
    home_advantage_pct: f64,
) -> Result<GameWinner, SimulationError> {
    let ratio = home_win_ratio(home, away, home_advantage_pct)?;
    let r: f64 = rng.random();
    if r > ratio {
        Ok(GameWinner::Away)
    } else {
        Ok(GameWinner::Home)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_ratio_without_advantage_is_plain_share() {
        let ratio = home_win_ratio(0.91, 0.66, 0.0).unwrap();
        assert_relative_eq!(ratio, 0.91 / (0.91 + 0.66), epsilon = 1e-12);
    }

    #[test]
    fn test_ratio_with_advantage_shifts_toward_home() {
        let flat = home_win_ratio(100.0, 100.0, 0.0).unwrap();
        let tilted = home_win_ratio(100.0, 100.0, 5.0).unwrap();
        assert_relative_eq!(flat, 0.5, epsilon = 1e-12);
        // 5% of the combined 200 strength is 10; (100 + 10) / 200.
        assert_relative_eq!(tilted, 0.55, epsilon = 1e-12);
    }

    #[test]
    fn test_home_swap_inverts_bias_symmetrically() {
        // P(a wins | a home) + P(a wins | b home) must equal 2a / (a + b):
        // the venue bias cancels when both orientations are played.
        let a = 83.0;
        let b = 61.0;
        let pct = 5.0;
        let p_a_home = home_win_ratio(a, b, pct).unwrap();
        let p_a_away = 1.0 - home_win_ratio(b, a, pct).unwrap();
        assert_relative_eq!(p_a_home + p_a_away, 2.0 * a / (a + b), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_combined_strength_fails_fast() {
        assert_eq!(
            home_win_ratio(0.0, 0.0, 5.0),
            Err(SimulationError::InvalidStrength {
                home: 0.0,
                away: 0.0
            })
        );
        assert!(home_win_ratio(f64::NAN, 1.0, 0.0).is_err());
        assert!(home_win_ratio(-2.0, 1.0, 0.0).is_err());
        // One zero side is fine as long as the sum is positive.
        assert!(home_win_ratio(0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_play_game_is_deterministic_under_a_seed() {
        let run = || -> Vec<GameWinner> {
            let mut rng = StdRng::seed_from_u64(42);
            (0..32)
                .map(|_| play_game(&mut rng, 80.0, 70.0, 5.0).unwrap())
                .collect()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_equal_strengths_converge_to_even_odds() {
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 200_000;
        let mut home_wins = 0usize;
        for _ in 0..trials {
            if play_game(&mut rng, 50.0, 50.0, 0.0).unwrap() == GameWinner::Home {
                home_wins += 1;
            }
        }
        let share = home_wins as f64 / trials as f64;
        // ~9 standard deviations of slack at this trial count.
        assert!(
            (share - 0.5).abs() < 0.01,
            "expected ~50% home share, got {share}"
        );
    }

    #[test]
    fn test_uneven_strengths_converge_to_strength_share() {
        // 0.91 vs 0.66 with no home advantage: the stronger side should win
        // about 0.91 / (0.91 + 0.66) = 57.96% of games.
        let mut rng = StdRng::seed_from_u64(11);
        let trials = 200_000;
        let mut strong_wins = 0usize;
        for _ in 0..trials {
            if play_game(&mut rng, 0.91, 0.66, 0.0).unwrap() == GameWinner::Home {
                strong_wins += 1;
            }
        }
        let share = strong_wins as f64 / trials as f64;
        assert!(
            (share - 0.5796).abs() < 0.01,
            "expected ~57.96% share, got {share}"
        );
    }
}
