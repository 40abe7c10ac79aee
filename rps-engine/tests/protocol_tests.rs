//! End-to-end checks of the rule engine and the commit-reveal protocol.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rps_engine::{
    build_rules, verify_reveal, FairnessProtocol, GameError, MoveList, Outcome, RuleTable,
    SecretKey, Verdict,
};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Three moves where each one beats the move that follows it.
#[test]
fn test_three_move_scenario() {
    let rules = build_rules(names(&["rock", "scissors", "paper"])).unwrap();

    assert_eq!(rules.beaten_by("rock").unwrap(), vec!["scissors"]);
    assert_eq!(rules.beaten_by("scissors").unwrap(), vec!["paper"]);
    assert_eq!(rules.beaten_by("paper").unwrap(), vec!["rock"]);

    assert_eq!(rules.outcome("rock", "scissors").unwrap(), Outcome::HumanWins);
    assert_eq!(rules.outcome("rock", "paper").unwrap(), Outcome::ComputerWins);
    assert_eq!(rules.outcome("rock", "rock").unwrap(), Outcome::Draw);
}

/// Five moves: each beats the two immediately following in list order.
#[test]
fn test_five_move_scenario() {
    let rules = build_rules(names(&["rock", "Spock", "paper", "lizard", "scissors"])).unwrap();

    assert_eq!(rules.beaten_by("rock").unwrap(), vec!["Spock", "paper"]);
    assert_eq!(rules.verdict("rock", "lizard").unwrap(), Verdict::Lose);
    assert_eq!(rules.verdict("rock", "scissors").unwrap(), Verdict::Lose);
    assert_eq!(rules.beaten_by("scissors").unwrap(), vec!["rock", "Spock"]);

    for mv in rules.moves().iter() {
        assert_eq!(rules.beaten_by(mv).unwrap().len(), 2);
    }
}

#[test]
fn test_build_rejects_invalid_lists() {
    for list in [
        vec![],
        names(&["rock"]),
        names(&["rock", "paper", "scissors", "lizard"]),
        names(&["rock", "paper", "paper"]),
    ] {
        assert!(matches!(
            build_rules(list),
            Err(GameError::InvalidMoveList(_))
        ));
    }
}

#[test]
fn test_table_is_mirrored_across_diagonal() {
    let rules = build_rules(names(&["rock", "paper", "scissors"])).unwrap();
    let table = RuleTable::from_rules(&rules);
    let grid = table.grid();

    assert_eq!(grid.len(), 4);
    assert_eq!(grid[0], vec!["", "rock", "paper", "scissors"]);

    for i in 1..4 {
        assert_eq!(grid[i][i], "Draw");
        for j in 1..4 {
            let mirrored = match grid[i][j].as_str() {
                "Win" => "Lose",
                "Lose" => "Win",
                _ => "Draw",
            };
            assert_eq!(grid[j][i], mirrored);
        }
    }
}

/// Chi-square goodness of fit, df = 2, critical value 13.816 at p = 0.001.
#[test]
fn test_computer_moves_are_uniform() {
    const ROUNDS: usize = 10_000;

    let rules = build_rules(names(&["rock", "paper", "scissors"])).unwrap();
    let mut game = FairnessProtocol::with_rng(rules.clone(), ChaCha20Rng::seed_from_u64(2024));
    let mut counts = [0usize; 3];

    for _ in 0..ROUNDS {
        game.start_round().unwrap();
        game.submit_human_move("rock").unwrap();
        let report = game.reveal().unwrap();
        counts[rules.moves().index_of(&report.computer_move).unwrap()] += 1;
    }

    let expected = ROUNDS as f64 / 3.0;
    let chi_square: f64 = counts
        .iter()
        .map(|&c| (c as f64 - expected).powi(2) / expected)
        .sum();

    assert!(chi_square < 13.816, "chi-square {} for {:?}", chi_square, counts);
}

#[test]
fn test_honest_rounds_always_verify() {
    let rules = build_rules(names(&["rock", "Spock", "paper", "lizard", "scissors"])).unwrap();
    let mut game = FairnessProtocol::with_rng(rules, ChaCha20Rng::seed_from_u64(99));

    for i in 0..500 {
        let issued = game.start_round().unwrap();
        let human = game.rules().moves().get(i % 5).unwrap().to_string();
        game.submit_human_move(&human).unwrap();
        let report = game.reveal().unwrap();

        assert_eq!(report.commitment, issued.commitment);
        verify_reveal(
            &report.key.to_hex(),
            &report.computer_move,
            &issued.commitment.to_hex(),
        )
        .unwrap();

        let wrong_move = game
            .rules()
            .moves()
            .iter()
            .find(|m| *m != report.computer_move)
            .unwrap();
        assert!(matches!(
            verify_reveal(&report.key.to_hex(), wrong_move, &issued.commitment.to_hex()),
            Err(GameError::CommitmentMismatch)
        ));

        let mut rng = ChaCha20Rng::seed_from_u64(i as u64);
        let wrong_key = SecretKey::generate(&mut rng);
        assert!(!report.commitment.verify(&wrong_key, &report.computer_move).unwrap());
    }
}

fn odd_move_list() -> impl Strategy<Value = MoveList> {
    (1usize..8).prop_map(|k| {
        let n = 2 * k + 1;
        MoveList::new((0..n).map(|i| format!("move{}", i)).collect()).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_every_move_wins_and_loses_half(moves in odd_move_list()) {
        let rules = build_rules(moves.as_slice().to_vec()).unwrap();
        let n = moves.len();

        for a in moves.iter() {
            let wins = moves.iter().filter(|b| rules.verdict(a, b).unwrap() == Verdict::Win).count();
            let losses = moves.iter().filter(|b| rules.verdict(a, b).unwrap() == Verdict::Lose).count();
            prop_assert_eq!(wins, (n - 1) / 2);
            prop_assert_eq!(losses, (n - 1) / 2);
            prop_assert_eq!(rules.beaten_by(a).unwrap().len(), (n - 1) / 2);
        }
    }

    #[test]
    fn prop_verdicts_are_antisymmetric(moves in odd_move_list()) {
        let rules = build_rules(moves.as_slice().to_vec()).unwrap();

        for a in moves.iter() {
            prop_assert_eq!(rules.verdict(a, a).unwrap(), Verdict::Draw);
            for b in moves.iter().filter(|b| *b != a) {
                let forward = rules.verdict(a, b).unwrap();
                prop_assert_ne!(forward, Verdict::Draw);
                prop_assert_eq!(rules.verdict(b, a).unwrap(), forward.flip());
                let beaten = rules.beaten_by(a).unwrap().contains(&b);
                prop_assert_eq!(beaten, forward == Verdict::Win);
            }
        }
    }
}
