use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use bjauto::{
    Action, ActionOptions, Card, Checkpoint, Dealer, EndReason, GameController, GameError,
    GameOptions, Gambler, GamblerHand, HandOutcome, HandStatus, InputError, Money, Rank, Render,
    ScriptedStatus, StatusToken, Strategy, Suit, TableInput, TableView, TurnOutcome, TurnPhase,
};

fn dollars(amount: u64) -> Money {
    Money::from_dollars(amount)
}

fn card(rank: Rank) -> Card {
    Card::new(Suit::Hearts, rank)
}

/// Hands out pre-arranged values; `None` once a queue runs dry.
#[derive(Default)]
struct Table {
    up_cards: VecDeque<Card>,
    hole_cards: VecDeque<Card>,
    pairs: VecDeque<[Card; 2]>,
    initial: VecDeque<u8>,
    hits: VecDeque<u8>,
    doubles: VecDeque<u8>,
    dealer: VecDeque<u8>,
    rejected: Vec<InputError>,
}

impl Table {
    fn deal(up: Rank, initial: u8) -> Self {
        Self::default().turn(up, initial)
    }

    fn turn(mut self, up: Rank, initial: u8) -> Self {
        self.up_cards.push_back(card(up));
        self.initial.push_back(initial);
        self
    }

    fn hole(mut self, rank: Rank) -> Self {
        self.hole_cards.push_back(card(rank));
        self
    }

    fn hits(mut self, totals: &[u8]) -> Self {
        self.hits.extend(totals);
        self
    }

    fn doubles(mut self, totals: &[u8]) -> Self {
        self.doubles.extend(totals);
        self
    }

    fn dealer(mut self, totals: &[u8]) -> Self {
        self.dealer.extend(totals);
        self
    }
}

impl TableInput for Table {
    fn dealer_up_card(&mut self) -> Option<Card> {
        self.up_cards.pop_front()
    }

    fn dealer_hole_card(&mut self) -> Option<Card> {
        self.hole_cards.pop_front()
    }

    fn initial_cards(&mut self) -> Option<[Card; 2]> {
        self.pairs.pop_front()
    }

    fn initial_total(&mut self) -> Option<u8> {
        self.initial.pop_front()
    }

    fn hit_total(&mut self) -> Option<u8> {
        self.hits.pop_front()
    }

    fn double_total(&mut self) -> Option<u8> {
        self.doubles.pop_front()
    }

    fn dealer_final_total(&mut self, _up_card: &Card) -> Option<u8> {
        self.dealer.pop_front()
    }

    fn rejected(&mut self, error: &InputError) {
        self.rejected.push(*error);
    }
}

/// Answers from scripts and records the options it was offered.
#[derive(Default)]
struct Scripted {
    change_wager: VecDeque<bool>,
    wagers: VecDeque<Money>,
    even_money: bool,
    insurance: bool,
    actions: VecDeque<Action>,
    offered: Vec<ActionOptions>,
}

impl Scripted {
    fn actions(actions: &[Action]) -> Self {
        Self {
            actions: actions.iter().copied().collect(),
            ..Self::default()
        }
    }
}

impl Strategy for Scripted {
    fn wants_to_change_wager(&mut self) -> bool {
        self.change_wager.pop_front().unwrap_or(false)
    }

    fn get_new_auto_wager(&mut self) -> Money {
        self.wagers.pop_front().unwrap_or(Money::ZERO)
    }

    fn wants_even_money(&mut self) -> bool {
        self.even_money
    }

    fn wants_insurance(&mut self) -> bool {
        self.insurance
    }

    fn get_hand_action(
        &mut self,
        _hand: &GamblerHand,
        options: &ActionOptions,
        _dealer_up_card: &Card,
    ) -> Action {
        self.offered.push(options.clone());
        self.actions.pop_front().unwrap_or(Action::Stand)
    }
}

fn game(bankroll: u64, wager: u64, strategy: Scripted, table: Table) -> GameController<Scripted, Table> {
    game_with(GameOptions::default(), bankroll, wager, strategy, table)
}

fn game_with(
    options: GameOptions,
    bankroll: u64,
    wager: u64,
    strategy: Scripted,
    table: Table,
) -> GameController<Scripted, Table> {
    GameController::new(
        Gambler::new("Tester", dollars(bankroll), dollars(wager)),
        Dealer::new(),
        strategy,
        table,
        options,
    )
}

#[test]
fn blackjack_against_ace_without_even_money_pays_three_to_two() {
    let mut game = game(100, 10, Scripted::default(), Table::deal(Rank::Ace, 21));

    let outcome = game.play_turn().unwrap();
    assert_eq!(
        outcome,
        TurnOutcome::Settled {
            turn: 1,
            bankroll: dollars(115)
        }
    );

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Blackjack);
    assert_eq!(hand.outcome, Some(HandOutcome::Win));
    assert_eq!(hand.earnings, dollars(25));
    assert!(game.strategy().offered.is_empty());
}

#[test]
fn dealer_bust_pays_even_money_on_a_stood_hand() {
    let table = Table::deal(Rank::King, 18).dealer(&[22]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Stand]), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(110));

    let dealer = game.metrics().dealer_hands()[0];
    assert_eq!(dealer.status, Some(HandStatus::Busted));
    assert_eq!(dealer.total, 22);
    assert_eq!(game.metrics().hands()[0].earnings, dollars(20));
}

#[test]
fn surrender_costs_half_the_wager() {
    let table = Table::deal(Rank::Nine, 12);
    let mut game = game(100, 10, Scripted::actions(&[Action::Surrender]), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(95));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Surrendered);
    assert_eq!(hand.outcome, Some(HandOutcome::Surrender));
    assert_eq!(hand.earnings, dollars(5));
    assert!(game.strategy().offered[0].contains(Action::Surrender));
}

#[test]
fn surrender_is_not_offered_when_disabled() {
    let mut game = GameController::new(
        Gambler::new("Tester", dollars(100), dollars(10)),
        Dealer::new(),
        Scripted::actions(&[Action::Stand]),
        Table::deal(Rank::Nine, 12).dealer(&[19]),
        GameOptions::default().with_surrender(false),
    );

    game.play_turn().unwrap();
    assert!(!game.strategy().offered[0].contains(Action::Surrender));
}

#[test]
fn bust_override_before_the_deal_synthesizes_hands() {
    let status = ScriptedStatus::new().on(1, Checkpoint::TurnStart, StatusToken::Bust);
    let mut game = game(100, 10, Scripted::default(), Table::default()).with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Busted);
    assert_eq!(hand.outcome, Some(HandOutcome::Loss));
    assert_eq!(hand.wager, dollars(10));
    assert_eq!(hand.earnings, Money::ZERO);
    assert!(game.metrics().dealer_hands()[0].status.is_some());
}

#[test]
fn surrender_override_mid_hand_refunds_half() {
    let status = ScriptedStatus::new().on(1, Checkpoint::AfterAction, StatusToken::Surrender);
    let table = Table::deal(Rank::Ten, 12).hits(&[14]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Hit, Action::Stand]), table)
        .with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(95));
    assert_eq!(game.strategy().offered.len(), 1);
    assert_eq!(
        game.metrics().hands()[0].outcome,
        Some(HandOutcome::Surrender)
    );
}

#[test]
fn override_does_not_replace_a_recorded_outcome() {
    let status = ScriptedStatus::new().on(1, Checkpoint::AfterPreTurn, StatusToken::Win);
    let table = Table::deal(Rank::King, 17).hole(Rank::Ace);
    let mut game = game(100, 10, Scripted::default(), table).with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));
    assert_eq!(game.metrics().hands()[0].outcome, Some(HandOutcome::Loss));
    assert!(game.activity().iter().any(|entry| entry.contains("ignored")));
}

#[test]
fn blackjack_override_before_the_deal_pays_three_to_two() {
    let status = ScriptedStatus::new().on(1, Checkpoint::TurnStart, StatusToken::Blackjack);
    let mut game = game(100, 10, Scripted::default(), Table::default()).with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(115));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Blackjack);
    assert_eq!(hand.outcome, Some(HandOutcome::Win));
    assert_eq!(hand.earnings, dollars(25));
}

#[test]
fn win_override_after_the_deal_pays_even_money() {
    let status = ScriptedStatus::new().on(1, Checkpoint::AfterDeal, StatusToken::Win);
    let mut game = game(100, 10, Scripted::default(), Table::deal(Rank::Six, 12))
        .with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(110));
    assert!(game.strategy().offered.is_empty());

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Stood);
    assert_eq!(hand.outcome, Some(HandOutcome::Win));
    assert_eq!(hand.total, 12);
}

#[test]
fn push_override_after_the_gambler_turn_returns_the_wager() {
    let status = ScriptedStatus::new().on(1, Checkpoint::AfterGamblerTurn, StatusToken::Push);
    // No dealer total is queued: the dealer must not be asked.
    let table = Table::deal(Rank::Six, 18);
    let mut game = game(100, 10, Scripted::actions(&[Action::Stand]), table)
        .with_status_source(status);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(100));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Stood);
    assert_eq!(hand.outcome, Some(HandOutcome::Push));
    assert_eq!(hand.earnings, dollars(10));
    assert_eq!(game.strategy().offered.len(), 1);
}

#[test]
fn even_money_pays_one_to_one() {
    let strategy = Scripted {
        even_money: true,
        ..Scripted::default()
    };
    let mut game = game(100, 10, strategy, Table::deal(Rank::Ace, 21));

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(110));
    assert_eq!(
        game.metrics().hands()[0].outcome,
        Some(HandOutcome::EvenMoney)
    );
}

#[test]
fn insurance_pays_two_to_one_against_dealer_blackjack() {
    let strategy = Scripted {
        insurance: true,
        ..Scripted::default()
    };
    let table = Table::deal(Rank::Ace, 15).hole(Rank::King);
    let mut game = game(100, 10, strategy, table);

    game.play_turn().unwrap();
    // Main wager lost, insurance stake returned with 2:1 winnings.
    assert_eq!(game.gambler().bankroll(), dollars(100));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.insurance, dollars(5));
    assert_eq!(hand.outcome, Some(HandOutcome::InsuranceWin));
    assert_eq!(hand.earnings, dollars(15));
    assert_eq!(game.metrics().summary().dealer_blackjacks, 1);
}

#[test]
fn lost_insurance_leaves_the_hand_open() {
    let strategy = Scripted {
        insurance: true,
        actions: VecDeque::from([Action::Stand]),
        ..Scripted::default()
    };
    let table = Table::deal(Rank::Ace, 15).dealer(&[20]);
    let mut game = game(100, 10, strategy, table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(85));

    let hand = game.metrics().hands()[0];
    assert!(hand.lost_insurance);
    assert_eq!(hand.outcome, Some(HandOutcome::Loss));
    assert_eq!(game.metrics().summary().insurance_losses, 1);
}

#[test]
fn declined_insurance_against_blackjack_loses() {
    let table = Table::deal(Rank::Ace, 15).hole(Rank::Queen);
    let mut game = game(100, 10, Scripted::default(), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));
    assert_eq!(game.metrics().hands()[0].outcome, Some(HandOutcome::Loss));
}

#[test]
fn face_card_dealer_blackjack_pushes_a_blackjack() {
    let table = Table::deal(Rank::King, 21).hole(Rank::Ace);
    let mut game = game(100, 10, Scripted::default(), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(100));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Blackjack);
    assert_eq!(hand.outcome, Some(HandOutcome::Push));
}

#[test]
fn face_card_dealer_blackjack_beats_other_hands_without_play() {
    let table = Table::deal(Rank::Queen, 17).hole(Rank::Ace);
    let mut game = game(100, 10, Scripted::default(), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));
    assert!(game.strategy().offered.is_empty());
    assert!(game.metrics().dealer_hands()[0].blackjack);
}

#[test]
fn double_down_doubles_the_stake() {
    let table = Table::deal(Rank::Six, 11).doubles(&[19]).dealer(&[18]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Double]), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(120));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Doubled);
    assert_eq!(hand.wager, dollars(20));
    assert_eq!(hand.earnings, dollars(40));
    assert!(game.strategy().offered[0].contains(Action::Double));
}

#[test]
fn doubling_to_21_stands_the_hand() {
    let table = Table::deal(Rank::Six, 11).doubles(&[21]).dealer(&[18]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Double]), table);

    game.play_turn().unwrap();
    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Stood);
    assert_eq!(hand.outcome, Some(HandOutcome::Win));
    assert_eq!(hand.wager, dollars(20));
    assert_eq!(hand.earnings, dollars(50));
    assert_eq!(game.gambler().bankroll(), dollars(130));
}

#[test]
fn double_is_not_offered_when_unaffordable() {
    let table = Table::deal(Rank::Six, 11).dealer(&[18]);
    let mut game = game(15, 10, Scripted::actions(&[Action::Stand]), table);

    game.play_turn().unwrap();
    assert!(!game.strategy().offered[0].contains(Action::Double));
}

#[test]
fn busted_hand_skips_the_dealer() {
    // No dealer total is scripted; asking for one would close the input.
    let table = Table::deal(Rank::Ten, 16).hits(&[26]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Hit]), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));

    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Busted);
    assert_eq!(hand.outcome, Some(HandOutcome::Loss));
    assert_eq!(hand.total, 26);
}

#[test]
fn later_decisions_only_offer_hit_and_stand() {
    let table = Table::deal(Rank::Seven, 10).hits(&[15]).dealer(&[17]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Hit, Action::Stand]), table);

    game.play_turn().unwrap();
    let offered = &game.strategy().offered;
    assert_eq!(offered.len(), 2);
    assert!(offered[0].contains(Action::Double));
    assert_eq!(offered[1], ActionOptions::basic());
    assert_eq!(game.gambler().bankroll(), dollars(90));
}

#[test]
fn hitting_to_21_stands_and_pays_the_blackjack_rate() {
    let table = Table::deal(Rank::Seven, 12).hits(&[21]).dealer(&[19]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Hit]), table);

    game.play_turn().unwrap();
    let hand = game.metrics().hands()[0];
    assert_eq!(hand.status, HandStatus::Stood);
    assert_eq!(hand.earnings, dollars(25));
    assert_eq!(game.strategy().offered.len(), 1);
}

#[test]
fn split_is_reported_unsupported_and_withdrawn() {
    let mut table = Table::default().dealer(&[17]);
    table.up_cards.push_back(card(Rank::Six));
    table.pairs.push_back([card(Rank::Eight), card(Rank::Eight)]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Split, Action::Stand]), table);

    game.play_turn().unwrap();
    let offered = &game.strategy().offered;
    assert!(offered[0].contains(Action::Split));
    assert!(!offered[1].contains(Action::Split));
    assert!(offered[1].contains(Action::Double));
    assert!(
        game.activity()
            .iter()
            .any(|entry| entry.contains("Split is not supported"))
    );
    assert_eq!(game.gambler().bankroll(), dollars(90));
}

#[test]
fn unoffered_action_is_fatal() {
    let table = Table::deal(Rank::Six, 12);
    let mut game = game(100, 10, Scripted::actions(&[Action::Split]), table);

    assert_eq!(
        game.play_turn(),
        Err(GameError::InvalidAction {
            action: Action::Split,
            hand_number: 1
        })
    );
}

#[test]
fn invalid_totals_are_requested_again() {
    let mut table = Table::default().dealer(&[17]);
    table.up_cards.push_back(card(Rank::Six));
    table.initial.extend([3, 25, 18]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Stand]), table);

    game.play_turn().unwrap();
    assert_eq!(game.input().rejected.len(), 2);
    assert_eq!(game.gambler().bankroll(), dollars(110));
}

#[test]
fn dealer_total_below_up_card_is_rejected() {
    let table = Table::deal(Rank::King, 18).dealer(&[8, 20]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Stand]), table);

    game.play_turn().unwrap();
    assert_eq!(
        game.input().rejected,
        vec![InputError::DealerTotalBelowUpCard {
            total: 8,
            up_card: 10
        }]
    );
    assert_eq!(game.gambler().bankroll(), dollars(90));
}

#[test]
fn invalid_totals_are_requested_until_one_is_valid() {
    let mut table = Table::default().dealer(&[17]);
    table.up_cards.push_back(card(Rank::Six));
    table.initial.extend([2, 2, 2, 2, 2, 18]);
    let mut game = game(100, 10, Scripted::actions(&[Action::Stand]), table);

    game.play_turn().unwrap();
    assert_eq!(game.input().rejected.len(), 5);
    assert_eq!(game.metrics().hands()[0].total, 18);
    assert_eq!(game.gambler().bankroll(), dollars(110));
}

#[test]
fn capped_retries_make_invalid_totals_fatal() {
    let mut table = Table::default();
    table.up_cards.push_back(card(Rank::Six));
    table.initial.extend([2, 2, 2, 18]);
    let options = GameOptions::default().with_input_retries(Some(3));
    let mut game = game_with(options, 100, 10, Scripted::default(), table);

    assert_eq!(
        game.play_turn(),
        Err(GameError::InputRetriesExhausted {
            request: "initial total",
            attempts: 3
        })
    );
}

#[test]
fn closed_input_is_fatal() {
    let mut game = game(100, 10, Scripted::default(), Table::default());
    assert_eq!(
        game.play_turn(),
        Err(GameError::InputClosed {
            request: "dealer up card"
        })
    );
}

#[test]
fn turn_cap_ends_the_game() {
    let table = Table::deal(Rank::Six, 18)
        .turn(Rank::Six, 18)
        .turn(Rank::Six, 18)
        .dealer(&[17, 17, 17]);
    let mut game = GameController::new(
        Gambler::new("Tester", dollars(100), dollars(10)),
        Dealer::new(),
        Scripted::default(),
        table,
        GameOptions::default().with_max_turns(Some(3)),
    );

    let summary = game.play().unwrap();
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.end, EndReason::TurnCapReached);
    assert!(summary.end.is_cashed_out());
    assert_eq!(summary.bankroll, dollars(130));
    assert_eq!(
        game.metrics().bankroll_progression(),
        &[dollars(100), dollars(110), dollars(120), dollars(130)]
    );
}

#[test]
fn cashing_out_ends_the_game_before_the_deal() {
    let strategy = Scripted {
        change_wager: VecDeque::from([false, true]),
        wagers: VecDeque::from([Money::ZERO]),
        ..Scripted::default()
    };
    let table = Table::deal(Rank::Six, 18).dealer(&[17]);
    let mut game = game(100, 10, strategy, table);

    let summary = game.play().unwrap();
    assert_eq!(summary.end, EndReason::CashedOut);
    assert_eq!(summary.turns, 2);
    assert_eq!(summary.bankroll, dollars(110));
    assert_eq!(game.metrics().hands().len(), 1);
    assert_eq!(game.phase(), TurnPhase::Idle);
}

#[test]
fn running_out_of_money_ends_the_game() {
    let table = Table::deal(Rank::Ten, 15)
        .turn(Rank::Ten, 15)
        .dealer(&[20, 20]);
    let mut game = game(20, 10, Scripted::default(), table);

    let summary = game.play().unwrap();
    assert_eq!(summary.end, EndReason::OutOfMoney);
    assert!(!summary.end.is_cashed_out());
    assert_eq!(summary.turns, 2);
    assert_eq!(summary.bankroll, Money::ZERO);
}

#[test]
fn auto_wager_is_clamped_to_the_bankroll() {
    let table = Table::deal(Rank::Ten, 15)
        .turn(Rank::Six, 18)
        .dealer(&[20, 17]);
    let mut game = game(15, 10, Scripted::default(), table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(5));

    game.play_turn().unwrap();
    assert_eq!(game.gambler().auto_wager(), dollars(5));
    assert_eq!(game.gambler().bankroll(), dollars(10));
    assert_eq!(game.metrics().hands()[1].wager, dollars(5));
}

#[test]
fn unaffordable_wager_is_asked_again() {
    let strategy = Scripted {
        change_wager: VecDeque::from([true]),
        wagers: VecDeque::from([dollars(500), dollars(20)]),
        ..Scripted::default()
    };
    let table = Table::deal(Rank::Six, 18).dealer(&[17]);
    let mut game = game(100, 10, strategy, table);

    game.play_turn().unwrap();
    assert_eq!(game.gambler().auto_wager(), dollars(20));
    assert_eq!(game.gambler().bankroll(), dollars(120));
}

#[test]
fn capped_retries_make_unaffordable_wagers_fatal() {
    let strategy = Scripted {
        change_wager: VecDeque::from([true]),
        wagers: VecDeque::from([dollars(500), dollars(500), dollars(500)]),
        ..Scripted::default()
    };
    let options = GameOptions::default().with_input_retries(Some(3));
    let mut game = game_with(options, 100, 10, strategy, Table::default());

    assert_eq!(
        game.play_turn(),
        Err(GameError::WagerRetriesExhausted { attempts: 3 })
    );
    assert_eq!(game.gambler().auto_wager(), dollars(10));
}

#[test]
fn hands_are_discarded_between_turns() {
    let table = Table::deal(Rank::Six, 18)
        .turn(Rank::Nine, 20)
        .dealer(&[17, 19]);
    let mut game = game(100, 10, Scripted::default(), table);

    game.play_turn().unwrap();
    assert!(game.gambler().hands().is_empty());
    assert!(game.dealer().hand().is_none());

    game.play_turn().unwrap();
    let hands = game.metrics().hands();
    assert_eq!(hands.len(), 2);
    assert!(hands.iter().all(|hand| hand.hand_number == 1));
    assert_eq!(hands[1].turn, 2);
    assert_eq!(hands[1].wager, dollars(10));
    assert_eq!(hands[1].total, 20);
}

#[derive(Default)]
struct Recorder {
    views: usize,
    last_phase: Option<TurnPhase>,
    games_over: usize,
}

impl Render for Recorder {
    fn render(&mut self, view: &TableView<'_>) {
        self.views += 1;
        self.last_phase = Some(view.phase);
    }

    fn game_over(&mut self, _summary: &bjauto::GameSummary) {
        self.games_over += 1;
    }
}

#[test]
fn verbose_games_render_after_each_change() {
    let mut recorder = Recorder::default();
    let mut game = GameController::new(
        Gambler::new("Tester", dollars(100), dollars(10)),
        Dealer::new(),
        Scripted::default(),
        Table::deal(Rank::Six, 18).dealer(&[17]),
        GameOptions::default().with_verbose(true).with_max_turns(Some(1)),
    )
    .with_renderer(&mut recorder);

    game.play().unwrap();
    drop(game);
    assert!(recorder.views >= 4);
    assert_eq!(recorder.last_phase, Some(TurnPhase::Settlement));
    assert_eq!(recorder.games_over, 1);
}

#[test]
fn quiet_games_never_render() {
    let mut recorder = Recorder::default();
    let mut game = game(100, 10, Scripted::default(), Table::deal(Rank::Six, 18).dealer(&[17]))
        .with_renderer(&mut recorder);

    game.play_turn().unwrap();
    drop(game);
    assert_eq!(recorder.views, 0);
}

/// Shared record of renders and decisions, in order.
type Events = Rc<RefCell<Vec<String>>>;

struct Watcher(Events);

impl Render for Watcher {
    fn render(&mut self, view: &TableView<'_>) {
        let hand = view.gambler.first_hand().map(GamblerHand::status);
        let dealer = if view.hide_dealer { "hidden" } else { "shown" };
        self.0
            .borrow_mut()
            .push(format!("render {:?} {hand:?} {dealer}", view.phase));
    }
}

struct Decider(Events);

impl Strategy for Decider {
    fn wants_to_change_wager(&mut self) -> bool {
        false
    }

    fn get_new_auto_wager(&mut self) -> Money {
        Money::ZERO
    }

    fn wants_even_money(&mut self) -> bool {
        false
    }

    fn wants_insurance(&mut self) -> bool {
        false
    }

    fn get_hand_action(
        &mut self,
        _hand: &GamblerHand,
        _options: &ActionOptions,
        _dealer_up_card: &Card,
    ) -> Action {
        self.0.borrow_mut().push(String::from("decide"));
        Action::Stand
    }
}

#[test]
fn table_is_shown_in_play_before_each_decision() {
    let events = Events::default();
    let mut game = GameController::new(
        Gambler::new("Tester", dollars(100), dollars(10)),
        Dealer::new(),
        Decider(Rc::clone(&events)),
        Table::deal(Rank::Six, 15).dealer(&[17]),
        GameOptions::default().with_verbose(true),
    )
    .with_renderer(Watcher(Rc::clone(&events)));

    game.play_turn().unwrap();

    let events = events.borrow();
    let decide = events.iter().position(|event| event == "decide").unwrap();
    assert_eq!(events[decide - 1], "render GamblerTurn Some(Playing) hidden");
    for phase in ["Wagering", "Dealing", "PreTurn", "DealerTurn", "Settlement"] {
        let prefix = format!("render {phase} ");
        assert!(
            events.iter().any(|event| event.starts_with(&prefix)),
            "no render in {phase}"
        );
    }
}

#[test]
fn dealer_is_revealed_even_when_it_does_not_play() {
    let events = Events::default();
    let mut game = GameController::new(
        Gambler::new("Tester", dollars(100), dollars(10)),
        Dealer::new(),
        Scripted::actions(&[Action::Hit]),
        Table::deal(Rank::Ten, 12).hits(&[25]),
        GameOptions::default().with_verbose(true),
    )
    .with_renderer(Watcher(Rc::clone(&events)));

    game.play_turn().unwrap();
    assert_eq!(game.gambler().bankroll(), dollars(90));
    assert!(
        events
            .borrow()
            .iter()
            .any(|event| event == "render DealerTurn Some(Busted) shown")
    );
}
