use detox_core::{ClassFilter, Record, Strategy as RewriteStrategy};
use detox_engine::Sanitizer;
use detox_security::{ArtifactDenylist, Rewriter};
use detox_tokens::{SubwordTokenizer, WhitespaceTokenizer};
use proptest::prelude::*;

fn sanitizer(strategy: RewriteStrategy, artifacts: &[String]) -> Sanitizer<WhitespaceTokenizer> {
    let rewriter = Rewriter::new(ArtifactDenylist::new(artifacts.iter().cloned()), strategy)
        .with_placeholder("[X]");
    Sanitizer::new(WhitespaceTokenizer::new(), rewriter, ClassFilter::All)
}

/// Words from a small alphabet so generated denylists actually hit
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(("[abc]{1,3}", " {1,3}"), 1..12).prop_map(|parts| {
        let mut text = String::new();
        let last = parts.len() - 1;
        for (i, (word, spaces)) in parts.into_iter().enumerate() {
            text.push_str(&word);
            if i < last {
                text.push_str(&spaces);
            }
        }
        text
    })
}

// ── Gap correctness: empty denylist rebuilds the text exactly ─────────────

proptest! {
    #[test]
    fn rebuild_without_artifacts_is_identity(text in text_strategy()) {
        let sanitizer = sanitizer(RewriteStrategy::Delete, &[]);
        let cleaned = sanitizer.clean_text(&text).unwrap();
        prop_assert_eq!(&cleaned.text, &text);
        prop_assert_eq!(cleaned.replaced, 0);
    }
}

// ── Idempotence under delete ──────────────────────────────────────────────

proptest! {
    #[test]
    fn delete_twice_keeps_surviving_tokens(
        text in text_strategy(),
        artifacts in prop::collection::vec("[abc]{1,2}", 0..4)
    ) {
        let sanitizer = sanitizer(RewriteStrategy::Delete, &artifacts);
        let tokenizer = WhitespaceTokenizer::new();

        let first = sanitizer.clean_text(&text).unwrap();
        let second = sanitizer.clean_text(&first.text).unwrap();

        let first_tokens = tokenizer.tokenize(&first.text).unwrap();
        let second_tokens = tokenizer.tokenize(&second.text).unwrap();

        prop_assert_eq!(&first_tokens, &second_tokens);
        prop_assert_eq!(second.replaced, 0);
        prop_assert!(first_tokens.iter().all(|t| !artifacts.contains(t)));
    }
}

// ── Label passthrough and count preservation ──────────────────────────────

proptest! {
    #[test]
    fn non_target_records_are_byte_identical(text in text_strategy()) {
        let rewriter = Rewriter::new(ArtifactDenylist::new(["a", "b", "c"]), RewriteStrategy::Mask);
        let sanitizer = Sanitizer::new(WhitespaceTokenizer::new(), rewriter, ClassFilter::HatefulOnly);

        let input = format!("0\t{text}\n");
        let mut output = Vec::new();
        sanitizer.run(input.as_bytes(), &mut output).unwrap();

        prop_assert_eq!(String::from_utf8(output).unwrap(), input);
    }

    #[test]
    fn output_has_one_line_per_input_line(
        texts in prop::collection::vec(text_strategy(), 0..20)
    ) {
        let sanitizer = sanitizer(RewriteStrategy::Mask, &["a".to_string()]);
        let input: String = texts
            .iter()
            .enumerate()
            .map(|(i, text)| format!("{}\t{text}\n", i % 2))
            .collect();

        let mut output = Vec::new();
        let summary = sanitizer.run(input.as_bytes(), &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let labels: Vec<_> = output
            .lines()
            .map(|line| Record::parse(line, 0).unwrap().label)
            .collect();
        let expected: Vec<_> = (0..texts.len()).map(|i| (i % 2).to_string()).collect();

        prop_assert_eq!(summary.records, texts.len());
        prop_assert_eq!(labels, expected);
    }
}
