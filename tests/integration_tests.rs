use kotoba_highlight::*;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn highlighter(kanji: Vec<KanjiItem>, vocab: Vec<VocabItem>) -> Highlighter {
    Highlighter::new(ItemSnapshot::new(kanji, vocab)).expect("Failed to build highlighter")
}

fn annotated(tree: &TextTree) -> Vec<(AnnotationKind, String, Option<String>)> {
    tree.annotations()
        .into_iter()
        .map(|(_, annotation)| {
            (
                annotation.kind,
                annotation.text.clone(),
                annotation.level.clone(),
            )
        })
        .collect()
}

#[test]
fn running_verb_is_tagged_as_vocabulary_not_kanji() {
    let highlighter = highlighter(
        vec![KanjiItem::new("走", "apprentice", 2)],
        vec![VocabItem::with_word_class(
            "走る",
            strings(&["はしる"]),
            WordClass::VerbGodan('る'),
            "guru",
            5,
        )],
    );

    let spans = highlighter.highlight_text("彼は走る。");
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (2, 4));
    assert_eq!(spans[0].kind(), AnnotationKind::Vocab);

    let output = highlighter
        .highlight(&TextTree::from_text("彼は走る。"))
        .expect("highlight");
    assert_eq!(
        annotated(&output),
        vec![(
            AnnotationKind::Vocab,
            "走る".to_string(),
            Some("guru".to_string())
        )]
    );
    assert_eq!(output.text_content(), "彼は走る。");
}

#[test]
fn negative_form_matches_as_one_span() {
    let highlighter = highlighter(
        vec![],
        vec![VocabItem::new(
            "食べる",
            strings(&["たべる"]),
            strings(&["to eat"]),
            "master",
            6,
        )],
    );
    let spans = highlighter.highlight_text("食べない");
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, 4));
    assert_eq!(spans[0].matched_text, "食べない");
}

#[test]
fn vocabulary_beats_the_kanji_it_contains() {
    let highlighter = highlighter(
        vec![KanjiItem::new("食", "guru", 5)],
        vec![VocabItem::new(
            "食べる",
            strings(&["たべる"]),
            strings(&["to eat"]),
            "master",
            6,
        )],
    );
    let spans = highlighter.highlight_text("食べる");
    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, 3));
    assert_eq!(spans[0].kind(), AnnotationKind::Vocab);
}

#[test]
fn suru_verbs_only_match_their_dictionary_form() {
    let item = VocabItem::new(
        "勉強する",
        strings(&["べんきょうする"]),
        strings(&["to study"]),
        "guru",
        5,
    );
    assert_eq!(item.word_class, WordClass::VerbSuru);
    assert!(item.inflections.is_empty());

    let highlighter = highlighter(vec![], vec![item]);
    assert!(highlighter.highlight_text("勉強した").is_empty());
    assert_eq!(highlighter.highlight_text("勉強する").len(), 1);
}

#[test]
fn godan_stem_tables_follow_the_sound_rows() {
    let expected = [
        ('う', 'わ', 'い', 'え', "った"),
        ('つ', 'た', 'ち', 'て', "った"),
        ('く', 'か', 'き', 'け', "いた"),
        ('ぐ', 'が', 'ぎ', 'げ', "いだ"),
        ('ぶ', 'ば', 'び', 'べ', "んだ"),
        ('む', 'ま', 'み', 'め', "んだ"),
        ('ぬ', 'な', 'に', 'ね', "んだ"),
        ('る', 'ら', 'り', 'れ', "った"),
        ('す', 'さ', 'し', 'せ', "した"),
    ];
    for (terminal, a, i, e, past) in expected {
        let surface = format!("か{terminal}");
        let forms = inflected_forms(&surface, WordClass::VerbGodan(terminal));
        assert!(forms.contains(&format!("か{a}ない")), "{surface}: {forms:?}");
        assert!(forms.contains(&format!("か{i}ます")), "{surface}: {forms:?}");
        assert!(forms.contains(&format!("か{e}る")), "{surface}: {forms:?}");
        assert!(forms.contains(&format!("か{past}")), "{surface}: {forms:?}");
    }
}

#[test]
fn iku_uses_a_geminated_past() {
    let forms = inflected_forms("行く", WordClass::VerbGodan('く'));
    assert!(forms.contains(&"行った".to_string()));
    assert!(forms.contains(&"行って".to_string()));
    assert!(!forms.contains(&"行いた".to_string()));
}

#[test]
fn classification_and_inflection_are_idempotent() {
    let reading = strings(&["かえる"]);
    let glosses = strings(&["to return"]);
    let first = classify("帰る", &reading, &glosses);
    let second = classify("帰る", &reading, &glosses);
    assert_eq!(first, second);
    assert_eq!(first, WordClass::VerbGodan('る'));
    assert_eq!(inflect("帰る", first), inflect("帰る", second));
}

#[test]
fn nested_elements_are_tagged_and_skipped_elements_are_not() {
    let highlighter = highlighter(
        vec![KanjiItem::new("水", "master", 7)],
        vec![VocabItem::new(
            "飲む",
            strings(&["のむ"]),
            strings(&["to drink"]),
            "guru",
            5,
        )],
    );
    let mut tree = TextTree::new("body");
    let root = tree.root();
    let paragraph = tree.add_element(root, "p").expect("p");
    tree.add_text(paragraph, "水を飲んだ").expect("text");
    let style = tree.add_element(root, "style").expect("style");
    tree.add_text(style, "水").expect("text");

    let output = highlighter.highlight(&tree).expect("highlight");
    assert_eq!(
        annotated(&output),
        vec![
            (
                AnnotationKind::Kanji,
                "水".to_string(),
                Some("master".to_string())
            ),
            (
                AnnotationKind::Vocab,
                "飲んだ".to_string(),
                Some("guru".to_string())
            ),
        ]
    );
    assert_eq!(output.text_content(), "水を飲んだ水");
}

#[test]
fn empty_collections_make_a_no_op_pass() {
    let highlighter = highlighter(vec![], vec![]);
    assert!(highlighter.index().is_empty());
    let tree = TextTree::from_text("何もない");
    assert_eq!(highlighter.highlight(&tree).expect("highlight"), tree);
}

#[test]
fn mismatched_snapshot_aborts_level_resolution() {
    let index = build_index(&[KanjiItem::new("水", "master", 7)], &[]).expect("index");
    let mut tagged = tag(&index, &TextTree::from_text("水")).expect("tag");
    let error = resolve_levels(&mut tagged, &[], &[]).expect_err("no kanji to resolve against");
    match error {
        HighlightError::InconsistentSnapshot { kind, text } => {
            assert_eq!(kind, AnnotationKind::Kanji);
            assert_eq!(text, "水");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn snapshot_from_api_payload_highlights_inflections() {
    let kanji = parse_kanji_response(
        r#"{"requested_information": [
            {"character": "書", "user_specific": {"srs": "guru", "srs_numeric": 5}}
        ]}"#,
    )
    .expect("kanji");
    let vocab = parse_vocab_response(
        r#"{"requested_information": {"general": [
            {"character": "書く", "meaning": "to write", "kana": "かく",
             "user_specific": {"srs": "apprentice", "srs_numeric": 3, "user_synonyms": null}}
        ]}}"#,
    )
    .expect("vocab");
    let highlighter =
        Highlighter::new(ItemSnapshot::from_records(kanji, vocab)).expect("highlighter");

    let output = highlighter
        .highlight(&TextTree::from_text("手紙を書きました。書"))
        .expect("highlight");
    assert_eq!(
        output.render_markup(highlighter.config()),
        "<body>手紙を<kotoba-vocab data-level=\"apprentice\" style=\"color:#a000f1\">書きました</kotoba-vocab>。\
<kotoba-kanji data-level=\"guru\" style=\"color:#f100a0\">書</kotoba-kanji></body>"
    );
}

#[test]
fn snapshot_cache_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.json");
    let snapshot = ItemSnapshot::new(
        vec![KanjiItem::new("水", "master", 7)],
        vec![VocabItem::new(
            "飲む",
            strings(&["のむ"]),
            strings(&["to drink"]),
            "guru",
            5,
        )],
    );

    let config = HighlightConfig::default()
        .with_cache_path(&path)
        .with_retry(RetryPolicy::no_retry());
    let first = Highlighter::from_repository(&snapshot, config.clone()).expect("fetch");
    assert!(path.exists());

    let cached = SnapshotCache::new(&path)
        .load()
        .expect("load")
        .expect("cache hit");
    assert_eq!(&cached, first.snapshot());
    assert_eq!(cached.vocab()[0].word_class, WordClass::VerbGodan('む'));
}

#[test]
fn leftmost_vocabulary_match_wins_over_an_overlapping_later_one() {
    let highlighter = highlighter(
        vec![],
        vec![
            VocabItem::with_word_class("BC", vec![], WordClass::Noun, "guru", 5),
            VocabItem::with_word_class("AB", vec![], WordClass::Noun, "master", 6),
        ],
    );
    let output = highlighter
        .highlight(&TextTree::from_text("ABC"))
        .expect("highlight");
    assert_eq!(
        annotated(&output),
        vec![(
            AnnotationKind::Vocab,
            "AB".to_string(),
            Some("master".to_string())
        )]
    );
    assert_eq!(output.text_content(), "ABC");
}

#[test]
fn scanning_stays_fast_with_a_realistic_item_set() {
    use std::time::{Duration, Instant};

    let mut vocab: Vec<VocabItem> = (0..6000u32)
        .map(|i| {
            let first = char::from_u32(0x4E00 + i / 100).expect("cjk");
            let second = char::from_u32(0x5E00 + i % 100).expect("cjk");
            VocabItem::with_word_class(
                format!("{first}{second}む"),
                vec![],
                WordClass::VerbGodan('む'),
                "guru",
                5,
            )
        })
        .collect();
    vocab.push(VocabItem::with_word_class(
        "読む",
        strings(&["よむ"]),
        WordClass::VerbGodan('む'),
        "master",
        6,
    ));
    let kanji: Vec<KanjiItem> = (0..2000u32)
        .map(|i| KanjiItem::new(char::from_u32(0x4E00 + i).expect("cjk").to_string(), "guru", 5))
        .collect();
    let index = build_index(&kanji, &vocab).expect("index");
    assert!(index.vocab_form_count() > 6000 * 10);

    let repetitions = 200;
    let text = "彼は一二三四五六七八九十を読んだ。".repeat(repetitions);
    let started = Instant::now();
    let spans = index.find_spans(&text);
    let elapsed = started.elapsed();

    let vocab_spans: Vec<&MatchSpan> = spans
        .iter()
        .filter(|span| span.kind() == AnnotationKind::Vocab)
        .collect();
    assert_eq!(vocab_spans.len(), repetitions);
    assert!(vocab_spans.iter().all(|span| span.matched_text == "読んだ"));
    assert!(spans.windows(2).all(|pair| pair[0].end <= pair[1].start));
    assert!(
        elapsed < Duration::from_secs(2),
        "scanning {} characters took {elapsed:?}",
        text.chars().count()
    );
}
