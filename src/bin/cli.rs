use std::io::{self, BufRead, Write};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use pontoon::{
    BetDecision, Card, GameEvent, HandValue, PlayerAction, RoundOutcome, Seat, Session,
    SessionEnd, Ui,
};

#[derive(Parser)]
#[command(name = "pontoon", about = "Single-player blackjack against the dealer")]
struct Args {
    /// Starting chip balance
    #[arg(long, default_value = "100")]
    chips: u64,

    /// Seed for the shuffle, for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!("Pontoon — blackjack against the house.");
    println!("Type 'q' at the bet prompt to quit.\n");

    let mut console = Console::new();
    let mut session = Session::new(args.chips);
    let result = match args.seed {
        Some(seed) => session.run(&mut ChaCha8Rng::seed_from_u64(seed), &mut console),
        None => session.run(&mut rand::thread_rng(), &mut console),
    };

    if let Err(err) = result {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

struct Console {
    stdin: io::Stdin,
}

impl Console {
    fn new() -> Self {
        Self { stdin: io::stdin() }
    }

    /// Prompts and reads one trimmed, lowercased line. None on EOF or a
    /// broken stdin, which the callers treat as quitting.
    fn prompt(&mut self, text: &str) -> Option<String> {
        print!("{text}");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_lowercase()),
        }
    }
}

fn format_hand(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_hand(label: &str, cards: &[Card], value: HandValue) {
    println!("{label}: {} (value: {})", format_hand(cards), value.total);
}

impl Ui for Console {
    fn request_bet(&mut self, chips: u64) -> BetDecision {
        loop {
            let Some(line) = self.prompt(&format!(
                "You have {chips} chips. Enter bet (minimum 1), or 'q' to quit: "
            )) else {
                return BetDecision::Quit;
            };
            if line == "q" || line == "quit" {
                return BetDecision::Quit;
            }
            match line.parse::<u64>() {
                Ok(bet) if bet >= 1 && bet <= chips => return BetDecision::Bet(bet),
                _ => println!("Invalid bet. Enter an integer between 1 and your chip count."),
            }
        }
    }

    fn request_action(&mut self, can_double: bool) -> PlayerAction {
        let options = if can_double {
            "(h)it / (s)tand / (d)ouble: "
        } else {
            "(h)it / (s)tand: "
        };
        loop {
            let Some(line) = self.prompt(options) else {
                return PlayerAction::Stand;
            };
            match line.as_str() {
                "h" | "hit" => return PlayerAction::Hit,
                "s" | "stand" => return PlayerAction::Stand,
                "d" | "double" if can_double => return PlayerAction::Double,
                _ => println!("Invalid choice. Enter h, s, or d (if available)."),
            }
        }
    }

    fn request_continue(&mut self) -> bool {
        match self.prompt("Press Enter to play next hand, or 'q' to quit: ") {
            Some(line) => line != "q" && line != "quit",
            None => false,
        }
    }

    fn event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::InitialDeal {
                player,
                player_value,
                dealer_upcard,
            } => {
                println!();
                println!("Dealer: {dealer_upcard} [hidden]");
                print_hand("Your hand", player, *player_value);
            }
            GameEvent::HandUpdated { seat, cards, value } => {
                let label = match seat {
                    Seat::Player => "Your hand",
                    Seat::Dealer => "Dealer (final)",
                };
                print_hand(label, cards, *value);
            }
            GameEvent::Natural { seat } => match seat {
                Seat::Player => println!("Blackjack!"),
                Seat::Dealer => println!("Dealer has blackjack."),
            },
            GameEvent::Bust { seat, total } => match seat {
                Seat::Player => println!("You busted at {total}!"),
                Seat::Dealer => println!("Dealer busted at {total}!"),
            },
            GameEvent::DealerReveal { cards, value } => {
                print_hand("Dealer (revealed)", cards, *value);
            }
            GameEvent::RoundResult {
                outcome,
                delta,
                chips,
            } => {
                let line = match outcome {
                    RoundOutcome::Blackjack => "Blackjack pays 3:2. You win!",
                    RoundOutcome::DealerBlackjack => "Dealer has blackjack. You lose.",
                    RoundOutcome::Bust => "You lose your bet.",
                    RoundOutcome::DealerBust => "Dealer busted. You win!",
                    RoundOutcome::Win => "You win!",
                    RoundOutcome::Loss => "Dealer wins. You lose your bet.",
                    RoundOutcome::Push => "Push. Your bet is returned.",
                };
                println!("{line} ({delta:+})");
                println!("\nChips: {chips}");
            }
            GameEvent::SessionEnded { reason } => match reason {
                SessionEnd::OutOfChips => println!("You're out of chips. Game over."),
                SessionEnd::Quit => println!("Goodbye!"),
            },
        }
    }
}
