//! Canned news headlines

use rand::Rng;

use super::{HandlerContext, Response};

const HEADLINES: &[&str] = &[
    "Breaking: New AI breakthrough announced by tech companies",
    "Weather update: Clear skies expected this weekend across the region",
    "Technology: Major software update improves device performance",
    "Science: Researchers discover new sustainable energy solution",
    "Health: New study shows benefits of regular exercise and healthy diet",
];

pub fn respond(_command: &str, ctx: &mut HandlerContext<'_>) -> Response {
    let headline = HEADLINES[ctx.rng.gen_range(0..HEADLINES.len())];
    Response::success(
        format!("Here's a top headline: {headline}"),
        "News headline provided",
    )
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;

    #[test]
    fn test_headline_from_fixed_list() {
        let mut rng = testing::rng();
        for _ in 0..10 {
            let mut ctx = testing::context(&mut rng);
            let response = respond("what's the news", &mut ctx);
            let headline = response.text.strip_prefix("Here's a top headline: ").unwrap();
            assert!(HEADLINES.contains(&headline));
        }
    }
}
