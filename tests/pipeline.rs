use fogscore::{Lexicon, Scorer};

fn lexicon() -> Lexicon {
    Lexicon::from_words(
        &["wonderful", "great"],
        &["terrible"],
        &["is", "this", "and", "a"],
    )
}

#[test]
fn score_document_end_to_end() {
    let scorer = Scorer::builder(lexicon()).build().unwrap();
    let record = scorer.score_text("Great news.\nThis is a wonderful and terrible day.");

    assert_eq!(record.positive_score, 2);
    assert_eq!(record.negative_score, 1);
    assert_eq!(record.words_count, 5);
    assert_eq!(record.complex_words_count, 2);
    assert!((record.average_sentence_length - 2.5).abs() < f64::EPSILON);

    // scoring twice yields the identical record
    let again = scorer.score_text("Great news.\nThis is a wonderful and terrible day.");
    assert_eq!(record, again);
}

#[test]
fn pronoun_heavy_document() {
    let scorer = Scorer::builder(lexicon()).build().unwrap();
    let record = scorer.score_text("I went to the US with us.\nWe took ours.");

    assert_eq!(record.personal_pronouns_count, 4);
}

#[tokio::test]
#[ignore = "requires network access"]
async fn score_live_article() -> Result<(), Box<dyn std::error::Error>> {
    let scorer = Scorer::builder(lexicon()).build()?;
    let record = scorer
        .score_url("https://insights.blackcoffer.com/rising-it-cities-and-its-impact-on-the-economy-environment-infrastructure-and-city-life-by-the-year-2040-2/")
        .await?;
    assert!(record.words_count > 0);
    Ok(())
}
