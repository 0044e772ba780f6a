use async_trait::async_trait;
use lifetea::{
    Emotion, EmotionClassifier, LabelMap, SentimentError, SentimentModel, SentimentScore,
    StaticModel,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

const LONG: &str = "I spent the whole afternoon walking by the sea.";

fn scores(pairs: &[(&str, f64)]) -> Vec<SentimentScore> {
    pairs.iter().map(|(l, s)| SentimentScore::new(*l, *s)).collect()
}

#[tokio::test]
async fn short_text_is_neutral_without_calling_model() {
    let model = Arc::new(StaticModel::new(scores(&[("joy", 0.99)])));
    let classifier = EmotionClassifier::new(model.clone());
    for text in ["", "hi", "nineteen characters"] {
        assert!(text.chars().count() < 20);
        assert_eq!(classifier.classify(text).await, Emotion::Neutral);
    }
    assert_eq!(model.calls(), 0);

    assert_eq!(classifier.classify("exactly twenty chars").await, Emotion::Happy);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn model_failure_falls_back_to_neutral() {
    let model = Arc::new(StaticModel::failing());
    let classifier = EmotionClassifier::new(model.clone());
    assert_eq!(classifier.classify(LONG).await, Emotion::Neutral);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn empty_scores_fall_back_to_neutral() {
    let classifier = EmotionClassifier::new(StaticModel::new(Vec::new()));
    assert_eq!(classifier.classify(LONG).await, Emotion::Neutral);
}

#[tokio::test]
async fn unmapped_label_falls_back_to_neutral() {
    let classifier = EmotionClassifier::new(StaticModel::new(scores(&[
        ("love", 0.8),
        ("joy", 0.2),
    ])));
    assert_eq!(classifier.classify(LONG).await, Emotion::Neutral);
}

#[tokio::test]
async fn every_base_sentiment_is_remapped() {
    let cases = [
        ("joy", Emotion::Happy),
        ("sadness", Emotion::Sad),
        ("anger", Emotion::Frustrated),
        ("fear", Emotion::Anxious),
        ("surprise", Emotion::Hopeful),
        ("disgust", Emotion::Overwhelmed),
        ("neutral", Emotion::Calm),
    ];
    for (label, expected) in cases {
        let classifier = EmotionClassifier::new(StaticModel::new(scores(&[
            ("other", 0.1),
            (label, 0.7),
            ("noise", 0.2),
        ])));
        assert_eq!(classifier.classify(LONG).await, expected, "label {label}");
    }
}

#[tokio::test]
async fn ties_keep_first_reported_label() {
    let classifier = EmotionClassifier::new(StaticModel::new(scores(&[
        ("anger", 0.45),
        ("joy", 0.45),
        ("fear", 0.10),
    ])));
    assert_eq!(classifier.classify(LONG).await, Emotion::Frustrated);
}

#[tokio::test]
async fn sadness_can_map_to_melancholy() {
    let labels = LabelMap::default()
        .with("sadness", Emotion::Melancholy)
        .unwrap();
    let classifier =
        EmotionClassifier::with_labels(StaticModel::new(scores(&[("sadness", 0.9)])), labels);
    assert_eq!(classifier.classify(LONG).await, Emotion::Melancholy);
}

struct Rotating {
    calls: AtomicUsize,
}

#[async_trait]
impl SentimentModel for Rotating {
    async fn score(&self, _text: &str) -> Result<Vec<SentimentScore>, SentimentError> {
        match self.calls.fetch_add(1, Ordering::SeqCst) % 4 {
            0 => Ok(vec![SentimentScore::new("joy", 0.9)]),
            1 => Err(SentimentError::Status(503)),
            2 => Err(SentimentError::Malformed("not json".into())),
            _ => Ok(vec![SentimentScore::new("unknown", 1.0)]),
        }
    }
}

#[tokio::test]
async fn never_returns_default() {
    let classifier = EmotionClassifier::new(Rotating {
        calls: AtomicUsize::new(0),
    });
    for i in 0..12 {
        let text = format!("{LONG} take {i}");
        assert_ne!(classifier.classify(&text).await, Emotion::Default);
    }
}

#[tokio::test]
async fn classify_all_keeps_input_order() {
    let classifier = EmotionClassifier::new(StaticModel::new(scores(&[("fear", 0.6)])));
    let texts = ["short", LONG, "tiny"];
    assert_eq!(
        classifier.classify_all(&texts).await,
        vec![Emotion::Neutral, Emotion::Anxious, Emotion::Neutral]
    );
    assert_eq!(classifier.model().calls(), 1);
}
