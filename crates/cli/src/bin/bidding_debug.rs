use clap::Parser;
use engine::{Bidder, Decision, EngineConfig};
use log::info;
use sayc_cli::*;
use std::path::PathBuf;
use std::process::ExitCode;
use types::{Auction, Hand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Explain the SAYC call for a hand", long_about = None)]
struct Args {
    /// The hand to bid, clubs first (e.g. 86.KJ74.AQ63.975)
    #[arg(long)]
    hand: Option<String>,

    /// Calls so far, space or comma separated (e.g. "1N P")
    #[arg(long, default_value = "")]
    history: String,

    /// Seat of the dealer
    #[arg(long, default_value = "N")]
    dealer: String,

    /// Engine configuration file (YAML)
    #[arg(long, env = "SAYC_CONFIG")]
    config: Option<PathBuf>,

    /// Print the full evaluation as JSON
    #[arg(long)]
    json: bool,

    /// A test case string in JSON format: '["Hand", "ExpectedBid", "Auction"?]'
    #[arg(short, long)]
    test_case: Option<String>,
}

/// Shown when no rule licenses any call, so it never reads as a real pass.
const NO_RULE: &str = "none";

fn resolve_inputs(args: &Args) -> Result<TestCase, String> {
    if let Some(test_case_json) = &args.test_case {
        return parse_test_case(test_case_json);
    }
    let hand_str = args
        .hand
        .as_deref()
        .ok_or("Error: Must provide either --hand or --test-case.")?;
    let hand = Hand::parse(hand_str).ok_or_else(|| format!("invalid hand {hand_str:?}"))?;
    Ok(TestCase {
        hand,
        auction: Auction {
            dealer: parse_seat(&args.dealer)?,
            calls: parse_calls(&args.history)?,
        },
        expected: None,
    })
}

fn run(args: &Args) -> Result<bool, String> {
    let case = resolve_inputs(args)?;
    let config = match &args.config {
        Some(path) => EngineConfig::load(path).map_err(|e| e.to_string())?,
        None => EngineConfig::default(),
    };
    info!("config: {config:?}");
    let bidder = Bidder::sayc(config).map_err(|e| e.to_string())?;

    let history = bidder.history(&case.auction);
    let evaluation = bidder
        .evaluate_hand(&case.hand, &case.auction)
        .map_err(|e| e.to_string())?;

    let actual = match &evaluation.decision {
        Decision::Call { call, .. } => call.to_string(),
        Decision::NoRuleApplies => NO_RULE.to_string(),
        _ => "?".to_string(),
    };
    let matched = case.expected.as_ref().map_or(true, |e| *e == actual);

    if args.json {
        let json = serde_json::to_string_pretty(&evaluation).map_err(|e| e.to_string())?;
        println!("{json}");
        return Ok(matched);
    }

    println!("Hand ({}, {} hcp):", history.seat_on_turn(), case.hand.hcp());
    for suit in get_hand_suits(&case.hand) {
        println!("        {suit}");
    }
    println!();
    print!("{}", format_history(&history));
    println!();
    println!("Candidates:");
    print!("{}", format_candidates(&evaluation.candidates));
    println!();
    println!("Decision: {}", evaluation.decision);
    if let Some(expected) = &case.expected {
        println!("EXPECTED: {expected}");
        println!("RESULT: {}", if matched { "MATCH" } else { "MISMATCH" });
    }
    Ok(matched)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
