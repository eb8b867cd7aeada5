//! Fallback responses for unrecognized commands

use rand::Rng;

use super::{HandlerContext, Notice, NoticeLevel, Outcome, Response};

const RESPONSES: &[&str] = &[
    "I'm not sure about that. You can ask me about time, weather, music, smart home controls, or general questions.",
    "I didn't understand that command. Try asking me to play music, check the weather, or control your devices.",
    "Sorry, I can't help with that right now. I can tell you the time, weather forecast, or control your smart home.",
    "I'm still learning. You can ask me about time, weather, news, calculations, or smart home controls.",
];

pub fn respond(_command: &str, ctx: &mut HandlerContext<'_>) -> Response {
    let text = RESPONSES[ctx.rng.gen_range(0..RESPONSES.len())];
    Response {
        text: text.to_string(),
        outcome: Outcome::Success,
        notice: Notice::new(NoticeLevel::Warning, "Command not recognized"),
        effects: Vec::new(),
    }
}
