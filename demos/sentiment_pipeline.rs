use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    review_sentiment::example_apps::run_sentiment_pipeline(std::env::args().skip(1))
}
