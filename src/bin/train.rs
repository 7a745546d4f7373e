//! Command line tool to train, persist, and evaluate a sentiment model

use std::time::Instant;

use anyhow::anyhow;
use log::info;
use pico_args::Arguments;
use sentiment_pipeline::{
    datasets::{self, yelp, Dataset, LoadableDataset},
    pipelines::sentiment::{self, Prediction, Predictor},
};

const HELP: &str = "\
Usage: train DATASET [OPTIONS]

Arguments:
  DATASET              The dataset to use (e.g., 'yelp')

Options:
  -h, --help           Print help
  -d, --data-dir       The path to the top-level data directory (defaults to 'data')
  -a, --artifact       Where to write the trained model (defaults to '<data-dir>/model.json')
  -n, --max-iterations Maximum number of training passes
  -t, --test-fraction  Share of the dataset held out for evaluation
  --l2                 L2 regularization strength
  --tolerance          Duality-gap threshold that ends training early
  --seed               Seed for the split and the example ordering
";

#[derive(Debug)]
struct Args {
    dataset: String,
    data_dir: Option<String>,
    artifact: Option<String>,
    max_iterations: Option<usize>,
    test_fraction: Option<f64>,
    l2: Option<f32>,
    tolerance: Option<f32>,
    seed: Option<u64>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data_dir: pargs.opt_value_from_str(["-d", "--data-dir"])?,
            artifact: pargs.opt_value_from_str(["-a", "--artifact"])?,
            max_iterations: pargs.opt_value_from_str(["-n", "--max-iterations"])?,
            test_fraction: pargs.opt_value_from_str(["-t", "--test-fraction"])?,
            l2: pargs.opt_value_from_str("--l2")?,
            tolerance: pargs.opt_value_from_str("--tolerance")?,
            seed: pargs.opt_value_from_str("--seed")?,
            dataset: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: DATASET"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let output = Args::parse()?;

    if output.is_none() {
        print!("{}", HELP);

        return Ok(());
    }
    let args = output.unwrap();

    let dataset = Dataset::try_from(args.dataset.as_str())?;

    match dataset {
        Dataset::Yelp => handle_yelp(&args).await,
    }
}

async fn handle_yelp(args: &Args) -> anyhow::Result<()> {
    let started = Instant::now();

    let data_dir = args.data_dir.clone().unwrap_or_else(|| "data".to_string());
    let artifact_path = args
        .artifact
        .clone()
        .unwrap_or_else(|| format!("{}/model.json", data_dir));

    let mut config = sentiment::Config::default();

    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }

    if let Some(test_fraction) = args.test_fraction {
        config.test_fraction = test_fraction;
    }

    if let Some(l2) = args.l2 {
        config.l2_regularization = l2;
    }

    if let Some(tolerance) = args.tolerance {
        config.convergence_tolerance = tolerance;
    }

    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let dataset = yelp::Dataset::load(&data_dir).await?;
    info!("loaded {} records", dataset.len());

    let (train_records, test_records) =
        datasets::train_test_split(dataset.records(), config.test_fraction, config.seed);

    let artifact = sentiment::train(&train_records, &config)?;
    artifact.save(&artifact_path).await?;

    let metrics = sentiment::evaluate(&artifact, &test_records);

    println!();
    println!("Model quality metrics evaluation");
    println!("--------------------------------");
    println!("Accuracy: {:.2}%", metrics.accuracy * 100.0);
    println!("Auc: {:.2}%", metrics.auc * 100.0);
    println!("F1Score: {:.2}%", metrics.f1 * 100.0);
    println!();

    let predictor = Predictor::new(artifact);

    print_prediction(&predictor.predict_one("A carne estava ruim"));

    let batch = predictor.predict_batch(&[
        "This was a horrible meal",
        "I love this spaghetti.",
        "The pizza was amazing.",
        "I will not eat here again.",
    ]);

    for prediction in &batch {
        print_prediction(prediction);
    }

    for item in dataset.get_samples(3) {
        let prediction = predictor.predict_one(&item.text);

        println!(
            "Sentiment: {} | Prediction: {} | Expected: {} ",
            prediction.text,
            if prediction.label {
                "Positive"
            } else {
                "Negative"
            },
            if item.label { "Positive" } else { "Negative" },
        );
    }

    info!("training run finished in {:?}", started.elapsed());

    Ok(())
}

fn print_prediction(prediction: &Prediction) {
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
