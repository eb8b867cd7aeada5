//! Simulated weather report
//!
//! There is no weather provider behind this; conditions and readings are
//! drawn from the context RNG within fixed ranges.

use rand::Rng;

use super::{HandlerContext, Response};

const CONDITIONS: &[&str] = &["sunny", "cloudy", "rainy", "partly cloudy", "clear", "overcast"];

/// Temperature range in °C
const TEMPERATURE: std::ops::Range<i32> = 15..45;
/// Relative humidity range in percent
const HUMIDITY: std::ops::Range<i32> = 30..70;
/// Wind speed range in km/h
const WIND_SPEED: std::ops::Range<i32> = 5..25;

pub fn respond(_command: &str, ctx: &mut HandlerContext<'_>) -> Response {
    let condition = CONDITIONS[ctx.rng.gen_range(0..CONDITIONS.len())];
    let temperature = ctx.rng.gen_range(TEMPERATURE);
    let humidity = ctx.rng.gen_range(HUMIDITY);
    let wind_speed = ctx.rng.gen_range(WIND_SPEED);

    let text = format!(
        "Current weather: {condition} with {temperature}\u{b0}C. \
         Humidity is {humidity}% and wind speed is {wind_speed} km/h."
    );

    Response::success(text, "Weather information provided")
}

#[cfg(test)]
mod tests {
    use super::super::testing;
    use super::*;

    #[test]
    fn test_readings_stay_in_range() {
        let numbers = regex::Regex::new(r"\d+").unwrap();
        let mut rng = testing::rng();
        for _ in 0..50 {
            let mut ctx = testing::context(&mut rng);
            let response = respond("what's the weather", &mut ctx);
            assert!(CONDITIONS.iter().any(|c| response.text.contains(c)));

            let values: Vec<i32> = numbers
                .find_iter(&response.text)
                .map(|m| m.as_str().parse().unwrap())
                .collect();
            assert_eq!(values.len(), 3);
            assert!(TEMPERATURE.contains(&values[0]), "temperature {}", values[0]);
            assert!(HUMIDITY.contains(&values[1]), "humidity {}", values[1]);
            assert!(WIND_SPEED.contains(&values[2]), "wind {}", values[2]);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut rng_a = testing::rng();
        let mut ctx_a = testing::context(&mut rng_a);
        let first = respond("weather", &mut ctx_a);

        let mut rng_b = testing::rng();
        let mut ctx_b = testing::context(&mut rng_b);
        let second = respond("weather", &mut ctx_b);

        assert_eq!(first.text, second.text);
    }
}
