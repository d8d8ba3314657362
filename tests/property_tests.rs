//! Property-based tests using proptest

use proptest::prelude::*;
use text_synopsis::summarize::similarity::dice;
use text_synopsis::summarize::text::{normalize, segment};
use text_synopsis::summarize::{
    summarize, CompressionRatio, EngineOptions, Method, Selection, SummaryEngine,
    FALLBACK_MESSAGE,
};

const VOCAB: &[&str] = &[
    "river", "valley", "engine", "market", "signal", "garden", "theory", "planet", "harbor",
    "forest", "report", "council", "important", "therefore", "growing", "moved", "which",
    "that", "Paris", "2024",
];

fn sentence() -> impl Strategy<Value = String> {
    (prop::collection::vec(prop::sample::select(VOCAB), 2..14), 0usize..3).prop_map(
        |(words, end)| {
            let mut s = words.join(" ");
            // vocabulary is ASCII, so byte 0 is a whole char
            let upper = s[..1].to_uppercase();
            s.replace_range(0..1, &upper);
            s.push(['.', '!', '?'][end]);
            s
        },
    )
}

fn document(min: usize, max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(sentence(), min..max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn extractive_count_matches_budget(doc in document(4, 20), ratio in 0.01f64..0.99) {
        let text = doc.join(" ");
        let n = segment(&normalize(&text)).len();
        prop_assume!(n >= 4);
        let out = summarize(&text, ratio, Method::Extractive);
        let expected = ((n as f64 * ratio).floor() as usize).max(1);
        prop_assert_eq!(segment(&out).len(), expected);
    }

    #[test]
    fn extractive_preserves_order(doc in document(4, 20), ratio in 0.01f64..0.99) {
        let text = doc.join(" ");
        let out = summarize(&text, ratio, Method::Extractive);
        // every selected sentence appears, in order, among the originals
        let originals: Vec<String> = segment(&normalize(&text)).into_iter().map(|s| s.text).collect();
        let mut cursor = 0;
        for picked in segment(&out) {
            let pos = originals[cursor..].iter().position(|o| *o == picked.text);
            prop_assert!(pos.is_some(), "{:?} out of order", picked.text);
            cursor += pos.unwrap_or(0) + 1;
        }
    }

    #[test]
    fn extractive_count_is_monotone_in_ratio(doc in document(4, 20), a in 0.01f64..0.99, b in 0.01f64..0.99) {
        let text = doc.join(" ");
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let small = segment(&summarize(&text, lo, Method::Extractive)).len();
        let large = segment(&summarize(&text, hi, Method::Extractive)).len();
        prop_assert!(small <= large);
    }

    #[test]
    fn abstractive_sentences_are_pairwise_distinct(
        doc in document(1, 20),
        ratio in 0.01f64..0.99,
        seed in any::<u64>(),
    ) {
        let text = doc.join(" ");
        let engine = SummaryEngine::new(EngineOptions {
            selection: Selection::Seeded(seed),
            ..EngineOptions::default()
        });
        let composition = engine.compose(&text, CompressionRatio::clamped(ratio), Method::Abstractive);
        let sentences = &composition.sentences;
        for (i, a) in sentences.iter().enumerate() {
            for b in &sentences[i + 1..] {
                prop_assert!(dice(a, b) <= 0.7, "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn single_sentence_is_kept_or_framed(s in sentence(), ratio in 0.01f64..0.99) {
        prop_assume!(segment(&s).len() == 1);
        for method in [Method::Extractive, Method::Abstractive] {
            let out = summarize(&s, ratio, method);
            let clause = format!("{}{}", s[..1].to_lowercase(), &s[1..]);
            prop_assert!(out == s || out.ends_with(&clause) || out.ends_with(&s), "{:?} -> {:?}", s, out);
        }
    }

    #[test]
    fn output_never_echoes_multi_sentence_input(doc in document(2, 12), ratio in 0.01f64..0.99) {
        let text = doc.join(" ");
        let normalized = normalize(&text);
        prop_assume!(segment(&normalized).len() >= 2);
        for method in [Method::Extractive, Method::Abstractive] {
            let out = summarize(&text, ratio, method);
            prop_assert!(out != normalized);
            prop_assert!(!out.is_empty());
        }
    }
}

#[test]
fn empty_input_yields_empty_output() {
    assert_eq!(summarize("", 0.5, Method::Extractive), "");
    assert_eq!(summarize("   \n\t", 0.5, Method::Abstractive), "");
}

#[test]
fn ten_sentences_at_point_three_keep_three_in_order() {
    let text: String = (0..10)
        .map(|i| format!("Paragraph {i} describes another part of the long story."))
        .collect::<Vec<_>>()
        .join(" ");
    let out = summarize(&text, 0.3, Method::Extractive);
    let picked = segment(&out);
    assert_eq!(picked.len(), 3);
    let positions: Vec<usize> = picked
        .iter()
        .map(|s| text.find(&s.text).expect("sentence from input"))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn three_sentences_extractive_is_first_and_last() {
    assert_eq!(summarize("A. B. C.", 0.5, Method::Extractive), "A. C.");
}

#[test]
fn single_sentence_scenario() {
    let out = summarize("Cats are mammals.", 0.4, Method::Abstractive);
    assert!(out == "Cats are mammals." || out.to_lowercase().contains("cats are mammals."));
    assert_eq!(out, "In summary, cats are mammals.");
}

#[test]
fn degenerate_text_returns_fallback_not_input() {
    let text = "Short one.\nShort two.";
    assert_eq!(summarize(text, 0.3, Method::Extractive), FALLBACK_MESSAGE);
}
