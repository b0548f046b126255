//! Line-prompt collaborators for playing at a terminal.
//!
//! A [`Console`] wraps one reader and one writer. The strategy, the table
//! input, and the status channel it hands out all share them, so prompts
//! interleave in the order the controller asks.

use core::cell::RefCell;

use alloc::borrow::ToOwned;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use std::io::{BufRead, Write};

use tracing::warn;

use crate::card::{Card, Rank, Suit};
use crate::error::InputError;
use crate::hand::GamblerHand;
use crate::input::{Checkpoint, StatusSource, StatusToken, TableInput};
use crate::money::Money;
use crate::strategy::{Action, ActionOptions, Strategy};

const ATTEMPTS: u8 = 3;

fn yes_no(response: &str) -> Option<bool> {
    match response.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
struct Prompt<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    fn say(&mut self, text: &str) {
        if let Err(error) = write!(self.writer, "{text}").and_then(|()| self.writer.flush()) {
            warn!(%error, "failed to write prompt");
        }
    }

    /// Reads one trimmed line. `None` at end of input.
    fn line(&mut self, prompt: &str) -> Option<String> {
        self.say(prompt);
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_owned()),
            Err(error) => {
                warn!(%error, "failed to read from console");
                None
            }
        }
    }

    /// Asks until `parse` accepts the response, at most `attempts` times
    /// when given.
    fn ask<T>(
        &mut self,
        prompt: &str,
        attempts: Option<u8>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let mut attempt: u8 = 0;
        loop {
            if attempt > 0 {
                self.say("Invalid response. Please try again.\n");
            }
            let line = self.line(prompt)?;
            if let Some(value) = parse(&line) {
                return Some(value);
            }
            attempt = attempt.saturating_add(1);
            if attempts.is_some_and(|attempts| attempt >= attempts) {
                warn!(prompt, attempts = attempt, "maximum retries reached");
                return None;
            }
        }
    }
}

/// A shared terminal handle.
#[derive(Debug)]
pub struct Console<R, W> {
    prompt: Rc<RefCell<Prompt<R, W>>>,
}

impl<R, W> Clone for Console<R, W> {
    fn clone(&self) -> Self {
        Self {
            prompt: Rc::clone(&self.prompt),
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console reading responses from `reader` and writing prompts
    /// to `writer`.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            prompt: Rc::new(RefCell::new(Prompt { reader, writer })),
        }
    }

    /// An interactive strategy on this console.
    #[must_use]
    pub fn strategy(&self) -> ConsoleStrategy<R, W> {
        ConsoleStrategy {
            console: self.clone(),
        }
    }

    /// A table input source on this console.
    #[must_use]
    pub fn input(&self) -> ConsoleInput<R, W> {
        ConsoleInput {
            console: self.clone(),
        }
    }

    /// A status channel on this console, asked at every checkpoint.
    #[must_use]
    pub fn status(&self) -> ConsoleStatus<R, W> {
        ConsoleStatus {
            console: self.clone(),
            checkpoints: None,
        }
    }

    /// Asks a yes/no or choice question, giving up after [`ATTEMPTS`].
    fn ask<T>(&self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        self.prompt.borrow_mut().ask(prompt, Some(ATTEMPTS), parse)
    }

    /// Asks for a dealt value until one parses or input ends.
    fn ask_value<T>(&self, prompt: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        self.prompt.borrow_mut().ask(prompt, None, parse)
    }

    fn say(&self, text: &str) {
        self.prompt.borrow_mut().say(text);
    }
}

/// Asks a person at the terminal for every decision.
///
/// End of input or repeated invalid answers decline, stand, or cash out.
#[derive(Debug, Clone)]
pub struct ConsoleStrategy<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Strategy for ConsoleStrategy<R, W> {
    fn wants_to_change_wager(&mut self) -> bool {
        self.console
            .ask("Change your auto-wager or cash out? (y/n) => ", yes_no)
            .unwrap_or(false)
    }

    fn get_new_auto_wager(&mut self) -> Money {
        self.console
            .ask(
                "Please enter an auto-wager amount (Enter $0 to cash out): $",
                |response| response.parse().ok(),
            )
            .unwrap_or_else(|| {
                warn!("no auto-wager entered, cashing out");
                Money::ZERO
            })
    }

    fn wants_even_money(&mut self) -> bool {
        self.console
            .ask("Take even money? (y/n) => ", yes_no)
            .unwrap_or(false)
    }

    fn wants_insurance(&mut self) -> bool {
        self.console.ask("Insurance? (y/n) => ", yes_no).unwrap_or(false)
    }

    fn get_hand_action(
        &mut self,
        hand: &GamblerHand,
        options: &ActionOptions,
        _dealer_up_card: &Card,
    ) -> Action {
        let prompt = format!(
            "[ Hand {} ] What would you like to do? [ {options} ] => ",
            hand.hand_number()
        );
        self.console
            .ask(&prompt, |response| {
                let mut chars = response.chars();
                match (chars.next(), chars.next()) {
                    (Some(code), None) => options.by_code(code),
                    _ => None,
                }
            })
            .unwrap_or_else(|| {
                warn!(hand = hand.hand_number(), "no action entered, standing");
                Action::Stand
            })
    }
}

/// Asks a person at the terminal for the dealt values.
#[derive(Debug, Clone)]
pub struct ConsoleInput<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    fn total(&self, prompt: &str) -> Option<u8> {
        self.console.ask_value(prompt, |response| response.parse().ok())
    }
}

impl<R: BufRead, W: Write> TableInput for ConsoleInput<R, W> {
    fn dealer_up_card(&mut self) -> Option<Card> {
        self.console
            .ask_value("Enter the dealer's upcard: ", |response| {
                response.parse::<Rank>().ok()
            })
            .map(|rank| Card::new(Suit::Spades, rank))
    }

    fn initial_total(&mut self) -> Option<u8> {
        self.total("Enter the gambler's initial total: ")
    }

    fn hit_total(&mut self) -> Option<u8> {
        self.total("Enter the new total after hit: ")
    }

    fn double_total(&mut self) -> Option<u8> {
        self.total("Enter the new total after doubling: ")
    }

    fn dealer_final_total(&mut self, _up_card: &Card) -> Option<u8> {
        self.total("Enter the dealer's final total: ")
    }

    fn rejected(&mut self, error: &InputError) {
        self.console.say(&format!("Invalid value: {error}. Please try again.\n"));
    }
}

/// Asks whether the table has shown a status text.
#[derive(Debug, Clone)]
pub struct ConsoleStatus<R, W> {
    console: Console<R, W>,
    checkpoints: Option<Vec<Checkpoint>>,
}

impl<R, W> ConsoleStatus<R, W> {
    /// Only asks at the given checkpoints.
    #[must_use]
    pub fn only_at(mut self, checkpoints: &[Checkpoint]) -> Self {
        self.checkpoints = Some(checkpoints.to_vec());
        self
    }
}

impl<R: BufRead, W: Write> StatusSource for ConsoleStatus<R, W> {
    fn poll(&mut self, _turn: u32, checkpoint: Checkpoint) -> Option<StatusToken> {
        if self
            .checkpoints
            .as_ref()
            .is_some_and(|checkpoints| !checkpoints.contains(&checkpoint))
        {
            return None;
        }

        let appeared = self
            .console
            .ask(
                "Has a status text appeared? (BLACKJACK/PUSH/WIN/BUST/SURRENDER) (y/n): ",
                yes_no,
            )
            .unwrap_or(false);
        if !appeared {
            return None;
        }
        // Unknown text is not an override.
        self.console.ask(
            "What status appeared? (BLACKJACK/PUSH/WIN/BUST/SURRENDER): ",
            |response| Some(StatusToken::parse(response)),
        )?
    }
}
