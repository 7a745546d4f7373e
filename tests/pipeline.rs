//! End-to-end coverage of the train -> persist -> evaluate -> predict flow

use pretty_assertions::assert_eq;
use sentiment_pipeline::{
    datasets::{train_test_split, yelp},
    pipelines::sentiment::{self, Config, ModelArtifact, Predictor},
};

fn corpus() -> Vec<yelp::Item> {
    vec![
        yelp::Item::new("good food".to_string(), true),
        yelp::Item::new("the pizza was amazing".to_string(), true),
        yelp::Item::new("i love this spaghetti".to_string(), true),
        yelp::Item::new("great service and good prices".to_string(), true),
        yelp::Item::new("bad food".to_string(), false),
        yelp::Item::new("this was a horrible meal".to_string(), false),
        yelp::Item::new("i will not eat here again".to_string(), false),
        yelp::Item::new("terrible service and bad prices".to_string(), false),
    ]
}

#[test]
fn learns_sentiment_from_a_toy_corpus() {
    let records = vec![
        yelp::Item::new("good food".to_string(), true),
        yelp::Item::new("bad food".to_string(), false),
    ];

    let artifact = sentiment::train(&records, &Config::default()).unwrap();
    let predictor = Predictor::new(artifact);

    assert!(predictor.predict_one("good food").probability > 0.5);
    assert!(predictor.predict_one("bad food").probability < 0.5);
}

#[tokio::test]
async fn a_restored_artifact_reproduces_scores() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.json");

    let artifact = sentiment::train(&corpus(), &Config::default()).unwrap();
    artifact.save(&path).await.unwrap();

    let restored = ModelArtifact::load(&path).await.unwrap();

    for record in corpus() {
        assert!((artifact.score(&record.text) - restored.score(&record.text)).abs() < 1e-6);
    }
}

#[test]
fn the_full_pipeline_evaluates_its_holdout() {
    let records = corpus();
    let (train_records, test_records) = train_test_split(&records, 0.5, 42);

    let artifact = sentiment::train(&train_records, &Config::default()).unwrap();
    let metrics = sentiment::evaluate(&artifact, &test_records);

    for value in [metrics.accuracy, metrics.auc, metrics.f1] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn batch_predictions_line_up_with_single_predictions() {
    let artifact = sentiment::train(&corpus(), &Config::default()).unwrap();
    let predictor = Predictor::new(artifact);

    let texts = ["good food", "this was a horrible meal", ""];
    let batch = predictor.predict_batch(&texts);

    assert_eq!(batch.len(), texts.len());
    for (text, prediction) in texts.iter().zip(&batch) {
        assert_eq!(&predictor.predict_one(text), prediction);
    }
}
