//! Spoken arithmetic
//!
//! Pulls the first two decimal numbers out of the command and picks the
//! operator from keywords. Division by zero is not guarded; IEEE-754
//! semantics propagate and the result renders as `Infinity`/`NaN`.

use std::sync::LazyLock;

use regex::Regex;

use super::Response;

static NUMBERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid regex"));

const HELP: &str =
    "I couldn't understand that calculation. Try saying something like 'calculate 15 plus 25'";

pub fn respond(command: &str) -> Response {
    match evaluate(command) {
        Some(text) => Response::success(text, "Calculation completed"),
        None => Response::failure(HELP, "Calculation failed"),
    }
}

/// Evaluate the command, or `None` when numbers or operator are missing
fn evaluate(command: &str) -> Option<String> {
    let mut numbers = NUMBERS.find_iter(command);
    let first: f64 = numbers.next()?.as_str().parse().ok()?;
    let second: f64 = numbers.next()?.as_str().parse().ok()?;

    let (result, operation) = if command.contains("plus") || command.contains("add") {
        (first + second, "plus")
    } else if command.contains("minus") || command.contains("subtract") {
        (first - second, "minus")
    } else if command.contains("multiply") || command.contains("times") {
        (first * second, "times")
    } else if command.contains("divide") {
        (first / second, "divided by")
    } else {
        return None;
    };

    Some(format!(
        "{} {operation} {} equals {}",
        format_number(first),
        format_number(second),
        format_number(result)
    ))
}

/// Render a result the way it would be spoken
///
/// Finite values use the default shortest form (`40`, `2.5`); infinities
/// spell out `Infinity` so the divide-by-zero result stays speakable.
fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        let response = respond("calculate 15 plus 25");
        assert_eq!(response.text, "15 plus 25 equals 40");
    }

    #[test]
    fn test_subtraction_and_multiplication() {
        assert_eq!(respond("what is 10 minus 4").text, "10 minus 4 equals 6");
        assert_eq!(respond("3 times 7 please").text, "3 times 7 equals 21");
        assert_eq!(respond("multiply 2.5 and 4").text, "2.5 times 4 equals 10");
    }

    #[test]
    fn test_division() {
        assert_eq!(respond("divide 9 by 2").text, "9 divided by 2 equals 4.5");
    }

    #[test]
    fn test_divide_by_zero_is_infinity() {
        let response = respond("calculate 10 divide 0");
        assert_eq!(response.text, "10 divided by 0 equals Infinity");
        assert_eq!(response.outcome, super::super::Outcome::Success);
    }

    #[test]
    fn test_zero_divided_by_zero_is_nan() {
        assert_eq!(respond("calculate 0 divide 0").text, "0 divided by 0 equals NaN");
    }

    #[test]
    fn test_missing_numbers_fails() {
        let response = respond("calculate the meaning of life");
        assert_eq!(response.outcome, super::super::Outcome::Failure);
        assert_eq!(response.text, HELP);
    }

    #[test]
    fn test_missing_operator_fails() {
        let response = respond("calculate 4 and 5");
        assert_eq!(response.outcome, super::super::Outcome::Failure);
    }
}
