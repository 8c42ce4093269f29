use clap::Subcommand;
use serde_json::json;

use bacflix_core::{Database, Planner};

use super::{open_planner, print_json, CmdResult};

#[derive(Subcommand)]
pub enum CardsAction {
    /// List subjects that have flashcards
    List,
    /// Open a subject's deck
    Select {
        /// Subject name
        subject: String,
    },
    /// Close the deck
    Clear,
    /// Next card
    Next,
    /// Previous card
    Prev,
    /// Turn the current card over
    Flip,
    /// Show the current card
    Show,
}

fn card_view(planner: &Planner<Database>) -> serde_json::Value {
    let viewer = planner.viewer();
    let card = planner.current_card();
    json!({
        "subject": viewer.selected_subject(),
        "index": viewer.index(),
        "count": viewer.card_count(),
        "flipped": viewer.is_flipped(),
        "category": card.map(|c| c.category.as_str()),
        "question": card.map(|c| c.q.as_str()),
        "answer": card.filter(|_| viewer.is_flipped()).map(|c| c.a.as_str()),
    })
}

pub fn run(action: CardsAction) -> CmdResult {
    let mut planner = open_planner()?;

    match action {
        CardsAction::List => {
            let decks: Vec<_> = planner
                .catalog()
                .decks()
                .iter()
                .map(|d| json!({ "subject": d.subject, "cards": d.cards.len() }))
                .collect();
            return print_json(&decks);
        }
        CardsAction::Select { subject } => {
            planner.select_flashcards(Some(&subject))?;
        }
        CardsAction::Clear => {
            planner.select_flashcards(None)?;
        }
        CardsAction::Next => {
            planner.next_card()?;
        }
        CardsAction::Prev => {
            planner.prev_card()?;
        }
        CardsAction::Flip => {
            planner.flip_card()?;
        }
        CardsAction::Show => {}
    }

    print_json(&card_view(&planner))
}
