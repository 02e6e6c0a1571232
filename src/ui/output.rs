//! Human-facing CLI output. Decorative lines respect `TRIVIA_QUIET`;
//! errors and warnings always print.

use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::QUESTION, text.style(theme().header.clone()));
}

pub fn status(icon: &str, label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}: {}", icon, label.style(theme().dim.clone()), value);
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().correct.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

/// Correct/wrong verdict with the signed delta, e.g. `✅ Correct (+200)`
pub fn verdict(correct: bool, delta: i32) -> String {
    let (icon, word) = if correct {
        (Icons::CHECK, "Correct")
    } else {
        (Icons::CROSS, "Wrong")
    };
    format!("{} {} ({})", icon, word, format!("{:+}", delta).style(theme().delta(delta)))
}
