//! Time and date responses

use super::{HandlerContext, Response};

/// Answer a time or date command from the local wall clock
///
/// "date" anywhere in the command selects the full weekday/date form,
/// otherwise the clock time is reported as HH:MM.
pub fn respond(command: &str, ctx: &HandlerContext<'_>) -> Response {
    let text = if command.contains("date") {
        format!("Today is {}", ctx.now.format("%A, %B %-d, %Y"))
    } else {
        format!("The current time is {}", ctx.now.format("%H:%M"))
    };

    Response::success(text, "Time/Date provided")
}
