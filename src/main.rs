use std::path::PathBuf;

use clap::Parser;
use gridquiz::{JsonQuizSource, LogCompletion, QuizApp, QuizSource, SessionController};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Quiz id to load (resolves to `<id>.json` in the quiz directory)
    quiz_id: String,

    /// Directory containing quiz definition files
    #[arg(short, long, default_value = "quizzes")]
    dir: PathBuf,

    /// Seed for the board grid generator (random when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init();
    let args = Args::parse();

    let source = JsonQuizSource::new(&args.dir);
    let sink = Box::new(LogCompletion);
    let mut controller = match args.seed {
        Some(seed) => SessionController::with_rng(sink, StdRng::seed_from_u64(seed)),
        None => SessionController::new(sink),
    };
    controller.on_quiz_loaded(source.load_quiz(&args.quiz_id));

    if let Err(e) = QuizApp::new(controller).run().await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
