//! Plain-text summary report

use crate::question::ChoiceSlot;
use crate::session::{Player, TurnRecord};
use crate::Result;
use std::fmt::Write;
use std::path::Path;

pub const REPORT_TITLE: &str = "Multi-Player Jeopardy - Summary Report";

/// Render final scores followed by every turn in play order
pub fn render_report(players: &[Player], turns: &[TurnRecord]) -> String {
    let mut out = String::new();
    write_summary(&mut out, players, turns).map(|()| out).unwrap_or_default()
}

fn write_summary(out: &mut impl Write, players: &[Player], turns: &[TurnRecord]) -> std::fmt::Result {
    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "{}\n", "=".repeat(30))?;

    writeln!(out, "Final Scores:")?;
    for player in players {
        writeln!(out, "{}: {}", player.name, player.score)?;
    }

    writeln!(out, "\nTurn-by-turn:")?;
    for turn in turns {
        writeln!(
            out,
            "Player: {} ({}) | Category: {} | Value: {}",
            turn.player_name, turn.player_id, turn.category, turn.value
        )?;
        writeln!(out, "Question: {}", turn.question_text)?;
        writeln!(out, "Options: {}", options_line(turn))?;
        writeln!(
            out,
            "Answer Given: {} | Correct: {} | Points Earned: {} | Running Total: {}\n",
            turn.answer_given,
            if turn.correct { "YES" } else { "NO" },
            turn.points_earned,
            turn.running_total
        )?;
    }
    Ok(())
}

/// Render and write the report to `path`
pub fn write_report(path: &Path, players: &[Player], turns: &[TurnRecord]) -> Result<()> {
    std::fs::write(path, render_report(players, turns))?;
    tracing::info!("Wrote report for {} turns to {}", turns.len(), path.display());
    Ok(())
}

fn options_line(turn: &TurnRecord) -> String {
    ChoiceSlot::all()
        .iter()
        .zip(turn.choices.iter())
        .filter_map(|(slot, choice)| {
            choice
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("({}) {}", slot, c))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriviaConfig;
    use crate::question::Question;
    use crate::session::GameSession;

    fn played_session() -> GameSession {
        let mut session = GameSession::new(&TriviaConfig::default());
        session.load_questions(vec![
            Question::new("Geography", 200, "Capital of France?")
                .with_answer("Paris")
                .with_choice(ChoiceSlot::A, "London")
                .with_choice(ChoiceSlot::C, "Paris"),
            Question::new("Math", 100, "2+2?").with_answer("4"),
        ]);
        session.add_player("Ada").unwrap();
        session.add_player("Grace").unwrap();
        session.play_turn(0, "Geography", 200, "C").unwrap();
        session.play_turn(1, "Math", 100, "5").unwrap();
        session
    }

    #[test]
    fn test_render_report() {
        let session = played_session();
        let report = render_report(session.players(), session.turns());

        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Final Scores:\nAda: 200\nGrace: -100\n"));
        assert!(report.contains("Player: Ada (P1) | Category: Geography | Value: 200\n"));
        assert!(report.contains("Options: (A) London | (C) Paris\n"));
        assert!(report.contains(
            "Answer Given: 5 | Correct: NO | Points Earned: -100 | Running Total: -100"
        ));
    }

    #[test]
    fn test_turns_in_play_order() {
        let session = played_session();
        let report = render_report(session.players(), session.turns());
        let first = report.find("Category: Geography").unwrap();
        let second = report.find("Category: Math").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&[], &[]);
        assert!(report.ends_with("Final Scores:\n\nTurn-by-turn:\n"));
    }

    #[test]
    fn test_write_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let session = played_session();

        write_report(&path, session.players(), session.turns()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Turn-by-turn:"));
    }
}
