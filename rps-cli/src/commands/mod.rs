use anyhow::{anyhow, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Input;
use rps_engine::{
    build_rules, render_menu, verify_reveal, FairnessProtocol, MenuChoice, RoundReport, RuleMap,
    RuleTable,
};
use std::io::{BufRead, IsTerminal};

/// Interactive session: one committed round per prompt until the human exits.
pub fn play(moves: Vec<String>, json: bool) -> Result<()> {
    let rules = build_rules(moves)?;
    let mut game = FairnessProtocol::new(rules);

    print!("{}", render_menu(game.rules().moves()));

    loop {
        // Commit before the human sees the prompt
        let issued = game.start_round()?;
        println!();
        println!("HMAC: {}", issued.commitment);

        let index = match prompt_move(game.rules())? {
            Some(index) => index,
            None => {
                game.abandon_round();
                println!("Goodbye!");
                return Ok(());
            }
        };

        let mv = game
            .rules()
            .moves()
            .get(index)
            .ok_or_else(|| anyhow!("menu index {} out of range", index))?
            .to_string();
        game.submit_human_move(&mv)?;

        let report = game.reveal()?;
        print_report(&report, json)?;
    }
}

/// `None` means the human chose to exit (or input ended).
fn prompt_move(rules: &RuleMap) -> Result<Option<usize>> {
    let n = rules.moves().len();

    loop {
        let input = match read_choice()? {
            Some(input) => input,
            None => return Ok(None),
        };

        match MenuChoice::parse(&input, n) {
            Ok(MenuChoice::Exit) => return Ok(None),
            Ok(MenuChoice::Play(index)) => return Ok(Some(index)),
            Ok(MenuChoice::Help) => println!("{}", rules_table(rules)),
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Rejected menu input: {}", e);
                println!("Invalid choice. Please select a valid option.");
                print!("{}", render_menu(rules.moves()));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn read_choice() -> Result<Option<String>> {
    if std::io::stdin().is_terminal() {
        let input = Input::<String>::new()
            .with_prompt("Select your move")
            .allow_empty(true)
            .interact_text()?;
        return Ok(Some(input));
    }

    // piped input, one choice per line
    println!("Select your move: ");
    let mut line = String::new();
    if std::io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn print_report(report: &RoundReport, json: bool) -> Result<()> {
    println!("Your move: {}", report.human_move);
    println!("Computer move: {}", report.computer_move);
    println!("{}", report.outcome);
    println!("HMAC key: {}", report.key.to_hex());

    if json {
        println!("{}", report.to_json()?);
    }
    Ok(())
}

fn rules_table(rules: &RuleMap) -> Table {
    let mut grid = RuleTable::from_rules(rules).grid().into_iter();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if let Some(header) = grid.next() {
        table.set_header(header);
    }
    for row in grid {
        table.add_row(row);
    }
    table
}

pub fn show_rules(moves: Vec<String>) -> Result<()> {
    let rules = build_rules(moves)?;
    println!("Rows: your move. Columns: computer move.");
    println!("{}", rules_table(&rules));
    Ok(())
}

pub fn verify(key: &str, mv: &str, hmac: &str) -> Result<()> {
    verify_reveal(key, mv, hmac)?;
    println!("Commitment verified: HMAC-SHA256(key, \"{}\") matches.", mv);
    Ok(())
}
