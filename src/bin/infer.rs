//! Command line tool to run predictions with a previously trained model

use anyhow::Result;
use pico_args::Arguments;
use sentiment_pipeline::{
    pipelines::{
        sentiment::{ModelArtifact, Predictor},
        Pipeline,
    },
    utils::files,
};

const HELP: &str = "\
Usage: infer PIPELINE [OPTIONS]

Arguments:
  PIPELINE             The pipeline to use (e.g., 'sentiment-analysis')

Options:
  -h, --help           Print help
  -a, --artifact       The trained model to load (defaults to 'data/model.json')
  -i, --input          A file of texts to score, one per line
";

#[derive(Debug)]
struct Args {
    /// Prints the usage menu
    help: bool,

    /// The pipeline to use
    pipeline: String,

    /// The trained model to load
    artifact: Option<String>,

    /// An optional file of texts to score
    input: Option<String>,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut pargs = Arguments::from_env();

    let args = Args {
        help: pargs.contains(["-h", "--help"]),
        artifact: pargs.opt_value_from_str(["-a", "--artifact"])?,
        input: pargs.opt_value_from_str(["-i", "--input"])?,
        pipeline: pargs.free_from_str()?,
    };

    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = parse_args()?;

    if args.help {
        println!("{}", HELP);
        return Ok(());
    }

    Pipeline::try_from(args.pipeline.as_str())?;

    let artifact_path = args
        .artifact
        .clone()
        .unwrap_or_else(|| "data/model.json".to_string());

    let samples = match &args.input {
        Some(path) => files::read_lines(path).await?,
        None => [
            "This was a horrible meal",
            "I love this spaghetti.",
            "The pizza was amazing.",
            "I will not eat here again.",
        ]
        .map(str::to_string)
        .to_vec(),
    };

    let artifact = ModelArtifact::load(&artifact_path).await?;
    let predictor = Predictor::new(artifact);

    for prediction in predictor.predict_batch(&samples) {
        println!(
            "Sentiment: {} | Prediction: {} | Probability: {} ",
            prediction.text,
            if prediction.label {
                "Positive"
            } else {
                "Negative"
            },
            prediction.probability,
        );
    }

    Ok(())
}
