//! Turn-taking console game over any reader/writer pair

use crate::events::{Activity, SYSTEM_ACTOR};
use crate::question::ChoiceSlot;
use crate::session::GameSession;
use crate::{Error, Result};
use std::io::{BufRead, Write};

/// How a console game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    /// Every question on the board was played
    BoardCleared,
    /// A player typed `q`
    Quit,
    /// Input ran out
    InputClosed,
}

/// Play the session's board, rotating through its players.
///
/// Invalid category or value input re-prompts the same player.
pub fn run_console<R: BufRead, W: Write>(session: &mut GameSession, mut input: R, mut output: W) -> Result<GameEnd> {
    if session.players().is_empty() {
        return Err(Error::Session("No players added".to_string()));
    }

    let start = session.event(SYSTEM_ACTOR, Activity::StartGame).with_score(session.total_score());
    session.log(start);

    let mut current = 0;
    let end = loop {
        if session.all_answered() {
            break GameEnd::BoardCleared;
        }

        let player = &session.players()[current];
        let (player_id, player_score) = (player.id.clone(), player.score);
        writeln!(output, "\nPlayer: {} (Score: {})", player.name, player.score)?;
        writeln!(output, "Categories:")?;
        let categories: Vec<String> = session.categories().iter().map(|c| c.to_string()).collect();
        for (i, category) in categories.iter().enumerate() {
            writeln!(output, "{}. {}", i + 1, category)?;
        }

        write!(output, "Choose category number or 'q' to quit: ")?;
        let Some(choice) = prompt(&mut input, &mut output)? else {
            break GameEnd::InputClosed;
        };
        if choice.eq_ignore_ascii_case("q") {
            break GameEnd::Quit;
        }
        let Some(category) = choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| categories.get(i))
        else {
            writeln!(output, "Invalid")?;
            continue;
        };

        let event = session
            .event(&player_id, Activity::SelectCategory)
            .with_category(category.clone())
            .with_score(player_score);
        session.log(event);

        let open = session.open_values(category);
        if open.is_empty() {
            writeln!(output, "No remaining questions in this category.")?;
            continue;
        }
        let listed: Vec<String> = open.iter().map(|v| v.to_string()).collect();
        writeln!(output, "Available values: {}", listed.join(", "))?;

        write!(output, "Choose value: ")?;
        let Some(choice) = prompt(&mut input, &mut output)? else {
            break GameEnd::InputClosed;
        };
        let Some(value) = choice.parse::<i32>().ok().filter(|v| open.contains(v)) else {
            writeln!(output, "Invalid")?;
            continue;
        };

        let event = session
            .event(&player_id, Activity::SelectQuestion)
            .with_category(category.clone())
            .with_value(value)
            .with_score(player_score);
        session.log(event);

        if let Some(question) = session.question(category, value) {
            writeln!(output, "Question: {}", question.text)?;
            for slot in ChoiceSlot::all() {
                if let Some(choice) = question.choice(*slot) {
                    writeln!(output, "({}) {}", slot, choice)?;
                }
            }
        }

        write!(output, "Your answer: ")?;
        let Some(answer) = prompt(&mut input, &mut output)? else {
            break GameEnd::InputClosed;
        };

        let turn = session.play_turn(current, category, value, &answer)?;
        writeln!(
            output,
            "{} Points: {} New total: {}",
            if turn.correct { "Correct!" } else { "Wrong." },
            turn.points_earned,
            turn.running_total
        )?;

        current = (current + 1) % session.players().len();
    };

    let finish = session.event(SYSTEM_ACTOR, Activity::EndGame).with_score(session.total_score());
    session.log(finish);

    writeln!(output, "\nGame over.")?;
    writeln!(output, "Final Scores:")?;
    for player in session.players() {
        writeln!(output, "{}: {}", player.name, player.score)?;
    }
    output.flush()?;

    tracing::info!("Game {} ended ({:?}) after {} turns", session.case_id(), end, session.turns().len());
    Ok(end)
}

/// Flush the prompt and read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<String>> {
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TriviaConfig;
    use crate::question::Question;
    use std::io::Cursor;

    fn session(players: &[&str]) -> GameSession {
        let mut session = GameSession::new(&TriviaConfig::default());
        session.load_questions(vec![
            Question::new("Geography", 200, "Capital of France?")
                .with_answer("Paris")
                .with_choice(ChoiceSlot::A, "London")
                .with_choice(ChoiceSlot::B, "Paris"),
            Question::new("Math", 100, "2+2?").with_answer("4"),
        ]);
        for name in players {
            session.add_player(*name).unwrap();
        }
        session
    }

    fn play(session: &mut GameSession, script: &str) -> (GameEnd, String) {
        let mut out = Vec::new();
        let end = run_console(session, Cursor::new(script.to_string()), &mut out).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_full_game_rotates_players() {
        let mut session = session(&["Ada", "Grace"]);
        let (end, out) = play(&mut session, "1\n200\nB\n2\n100\n5\n");

        assert_eq!(end, GameEnd::BoardCleared);
        assert!(out.contains("(A) London\n(B) Paris\n"));
        assert!(out.contains("Correct! Points: 200 New total: 200"));
        assert!(out.contains("Wrong. Points: -100 New total: -100"));
        assert_eq!(session.turns()[1].player_name, "Grace");
        assert!(out.ends_with("Final Scores:\nAda: 200\nGrace: -100\n"));
    }

    #[test]
    fn test_invalid_input_reprompts_same_player() {
        let mut session = session(&["Ada", "Grace"]);
        let (end, out) = play(&mut session, "7\nhistory\n2\n300\n2\n100\n4\nq\n");

        assert_eq!(end, GameEnd::Quit);
        assert_eq!(out.matches("Invalid").count(), 3);
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].player_name, "Ada");
    }

    #[test]
    fn test_exhausted_category_reprompts() {
        let mut session = session(&["Ada"]);
        let (end, out) = play(&mut session, "2\n100\n4\n2\n");

        assert_eq!(end, GameEnd::InputClosed);
        assert!(out.contains("No remaining questions in this category."));
    }

    #[test]
    fn test_end_of_input_stops_game() {
        let mut session = session(&["Ada"]);
        let (end, _) = play(&mut session, "1\n");
        assert_eq!(end, GameEnd::InputClosed);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_requires_players() {
        let mut session = session(&[]);
        let result = run_console(&mut session, Cursor::new(String::new()), Vec::new());
        assert!(matches!(result, Err(Error::Session(_))));
    }
}
