use log::debug;
use std::env;

use moodflix::{images, ImageSource, PipelineInput, Recommendation, Recommender, RunOutcome};

const USAGE: &str = "Usage:\n  moodflix mood <how you feel...>\n  moodflix style <image-path>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (command, rest) = args.split_first().ok_or(USAGE)?;

    let input = match command.as_str() {
        "mood" => PipelineInput::Mood(rest.join(" ")),
        "style" => {
            let path = rest.first().ok_or(USAGE)?;
            PipelineInput::Style(images::load(&ImageSource::Path(path.clone())).await?)
        }
        _ => return Err(USAGE.into()),
    };

    let mut builder = Recommender::builder();
    if let Ok(language) = env::var("MOODFLIX_LANGUAGE") {
        builder = builder.language(language);
    }
    let pipeline = builder.build()?;
    debug!("Using provider {}", pipeline.provider_name());

    match pipeline.start(input).await {
        RunOutcome::Ignored => {
            eprintln!("Nothing to analyse: tell me how you feel.");
            Ok(())
        }
        RunOutcome::Succeeded(recommendation) => {
            print_recommendation(&recommendation);
            Ok(())
        }
        RunOutcome::Failed(message) => Err(message.into()),
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    println!("AI analysis: {}", recommendation.result.analysis);
    println!("Tip: {}", recommendation.result.recommendation);
    println!();
    println!("Recommended films:");
    for movie in &recommendation.movies {
        println!("  {}", movie.title);
        match &movie.poster_url {
            Some(url) => println!("    poster:  {}", url),
            None => println!("    poster:  none"),
        }
        if let Some(trailer) = movie.trailer_search_url() {
            println!("    trailer: {}", trailer);
        }
    }
}
