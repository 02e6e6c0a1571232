use crate::{OutputMode, emit_success};
use owo_colors::OwoColorize;
use std::path::Path;
use trivia::config::{TriviaConfig, write_config};
use trivia::console::run_console;
use trivia::events::{Activity, CsvEventLog, SYSTEM_ACTOR};
use trivia::loader::registry_with_delimiter;
use trivia::report::write_report;
use trivia::scoring::ScoringStrategy;
use trivia::ui::{self, Icons, board_table, header, scores_table, section, status, success};
use trivia::{AnswerResolver, GameSession};

pub fn run_load(output_mode: OutputMode, config: &TriviaConfig, file: &Path) -> anyhow::Result<()> {
    let questions = registry_with_delimiter(config.csv_delimiter()).load_file(file)?;

    if output_mode.is_human() {
        header(&format!("Loaded {} questions", questions.len()));
        status(Icons::FILE, "File", &file.display().to_string());
        if questions.is_empty() {
            ui::warn("No questions found");
        } else {
            println!("{}", board_table(&questions));
        }
    } else {
        let data = serde_json::json!({
            "file": file.display().to_string(),
            "count": questions.len(),
            "questions": questions,
        });
        emit_success(output_mode, "load", data)?;
    }
    Ok(())
}

pub fn run_check(
    output_mode: OutputMode,
    config: &TriviaConfig,
    file: &Path,
    category: &str,
    value: i32,
    answer: &str,
    no_penalty: bool,
) -> anyhow::Result<()> {
    let questions = registry_with_delimiter(config.csv_delimiter()).load_file(file)?;
    let Some(question) = questions
        .iter()
        .rev()
        .find(|q| q.category.eq_ignore_ascii_case(category) && q.value == value)
    else {
        anyhow::bail!("No question for {} / {} in {}", category, value, file.display());
    };

    let resolver = AnswerResolver::new(config.negative_on_wrong() && !no_penalty);
    let judgement = resolver.judge(question, Some(answer));
    let outcome = resolver.evaluate(question, Some(answer));

    if output_mode.is_human() {
        header(&question.text);
        for (slot, choice) in question.choices() {
            println!("  ({}) {}", slot, choice);
        }
        status(Icons::INFO, "Answer", answer);
        println!("{}", ui::verdict(outcome.correct, outcome.delta));
        println!("{}", ui::dim(&format!("matched by {:?}", judgement.rule)));
    } else {
        let data = serde_json::json!({
            "question": question,
            "answer": answer,
            "correct": outcome.correct,
            "delta": outcome.delta,
            "rule": format!("{:?}", judgement.rule),
        });
        emit_success(output_mode, "check", data)?;
    }
    Ok(())
}

pub fn run_play(
    output_mode: OutputMode,
    config: &TriviaConfig,
    file: &Path,
    players: &[String],
    event_log: &Path,
    report: &Path,
) -> anyhow::Result<()> {
    let mut session = GameSession::new(config).with_events(CsvEventLog::new(event_log));
    let launch = session.event(SYSTEM_ACTOR, Activity::Launch).with_given("CLI started");
    session.log(launch);

    let loaded = session.load_file(file)?;
    if loaded == 0 {
        anyhow::bail!("No questions found in {}", file.display());
    }
    for name in players {
        session.add_player(name.as_str())?;
    }

    if output_mode.is_human() {
        header(&format!("Trivia - {} questions in {} categories", loaded, session.categories().len()));
        for player in session.players() {
            status(Icons::PLAYER, &player.id, &player.name);
        }
    }

    let stdin = std::io::stdin();
    let end = run_console(&mut session, stdin.lock(), std::io::stdout())?;

    let report_name = report.display().to_string();
    let started = session
        .event(SYSTEM_ACTOR, Activity::GenerateReport)
        .with_given(report_name.clone())
        .with_result("START");
    session.log(started);
    write_report(report, session.players(), session.turns())?;
    let finished = session.event(SYSTEM_ACTOR, Activity::GenerateReport).with_given(report_name);
    session.log(finished);

    let exit = session
        .event(SYSTEM_ACTOR, Activity::ExitGame)
        .with_given("User exit")
        .with_score(session.total_score());
    session.log(exit);

    if output_mode.is_human() {
        section(&format!(" {} Final Scores ", Icons::TROPHY));
        println!("{}", scores_table(session.players()));
        success(&format!("Report written to {}", report.display().bold()));
        status(Icons::FILE, "Event log", &event_log.display().to_string());
    } else {
        let data = serde_json::json!({
            "case_id": session.case_id(),
            "end": format!("{:?}", end),
            "players": session.players(),
            "turns": session.turns(),
            "report": report.display().to_string(),
            "event_log": event_log.display().to_string(),
        });
        emit_success(output_mode, "play", data)?;
    }
    Ok(())
}

pub fn run_init(output_mode: OutputMode, path: &Path, force: bool) -> anyhow::Result<()> {
    write_config(path, &TriviaConfig::with_defaults(), force)?;

    if output_mode.is_human() {
        success(&format!("Wrote {}", path.display()));
    } else {
        let data = serde_json::json!({
            "path": path.display().to_string(),
        });
        emit_success(output_mode, "init", data)?;
    }
    Ok(())
}

pub fn run_version(output_mode: OutputMode) -> anyhow::Result<()> {
    if output_mode.is_human() {
        println!(
            "{} {}",
            "Trivia".bold().style(trivia::ui::theme().info.clone()),
            format!("Version {}", env!("CARGO_PKG_VERSION")).bold()
        );
    } else {
        let data = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
        });
        emit_success(output_mode, "version", data)?;
    }
    Ok(())
}
