use rps_engine::{new_game, verify_reveal, RuleTable};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let moves = ["rock", "Spock", "paper", "lizard", "scissors"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut game = new_game(moves)?;

    println!("{}", RuleTable::from_rules(game.rules()));

    // The computer commits before we choose
    let issued = game.start_round()?;
    println!("HMAC: {}", issued.commitment);

    game.submit_human_move("lizard")?;
    let report = game.reveal()?;

    println!("Your move: {}", report.human_move);
    println!("Computer move: {}", report.computer_move);
    println!("{}", report.outcome);
    println!("HMAC key: {}", report.key.to_hex());

    // Anyone holding the HMAC from before can check the reveal
    verify_reveal(
        &report.key.to_hex(),
        &report.computer_move,
        &issued.commitment.to_hex(),
    )?;
    println!("\nCommitment verified.");

    Ok(())
}
