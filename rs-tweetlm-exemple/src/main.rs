use rs_tweetlm_core::model::corpus_model::CorpusModel;
use rs_tweetlm_core::model::segmentation::Segmentation;
use rs_tweetlm_core::model::smoothing::InterpolationWeights;
use rs_tweetlm_core::tokenizer::TweetTokenizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The tokenizer collapses special token classes into canonical
    // placeholders unless case preservation is requested
    let tokenizer = TweetTokenizer::new(false);
    for text in [
        "RT @alice check http://example.com #cool :)",
        "I paid &pound;7 &amp; got 2 for 1",
    ] {
        println!("{:?}", tokenizer.tokenize(text));
    }

    // Train frequency tables over an ordered sequence of samples,
    // sharded across threads and merged by summing counts per key
    let corpus: Vec<String> = [
        "good morning everyone :)",
        "good morning @team",
        "good night all",
        "the weather is great today",
        "check out http://example.com for details",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let segmentation = Segmentation::Tokenize { preserve_case: false };
    let model = CorpusModel::train_parallel(&corpus, segmentation)?;
    println!(
        "trained: {} unigrams, {} bigrams, {} trigrams, {} words total",
        model.unigrams().len(),
        model.bigrams().len(),
        model.trigrams().len(),
        model.total_words()
    );

    // Persist the three tables as flat JSON objects, then reload them
    // verbatim; a missing or corrupt table would be fatal here
    model.save_tables("./data/forum_model")?;
    let loaded = CorpusModel::load_tables("./data/forum_model")?;

    // The weights must form a convex combination; the recommended
    // defaults are 0.85 / 0.10 / 0.04 / 0.01
    let weights = InterpolationWeights::default();
    match InterpolationWeights::new(0.5, 0.5, 0.5, 0.5) {
        Ok(_) => println!("Should not happen"),
        Err(_) => println!("Weights not summing to 1.0 are rejected"),
    }

    // Score novel sentences; each probability is strictly positive
    // thanks to the smoothing floor
    let test_set: Vec<String> = [
        "good morning @bob",
        "good night everyone :)",
        "completely unrelated zebra quantum flux",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for (sentence, probability) in loaded.score_samples(&test_set, segmentation, &weights)? {
        println!("{}\t{:e}", sentence, probability);
    }

    Ok(())
}
