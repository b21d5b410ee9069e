use kotoba_highlight::{
    parse_kanji_response, parse_vocab_response, HighlightConfig, Highlighter, ItemSnapshot,
    RetryPolicy, TextTree,
};
use tracing_subscriber::EnvFilter;

const KANJI_JSON: &str = r#"{"requested_information": [
    {"character": "水", "user_specific": {"srs": "master", "srs_numeric": 7}},
    {"character": "飲", "user_specific": {"srs": "guru", "srs_numeric": 5}},
    {"character": "駅", "user_specific": null}
]}"#;

const VOCAB_JSON: &str = r#"{"requested_information": {"general": [
    {"character": "飲む", "meaning": "to drink", "kana": "のむ",
     "user_specific": {"srs": "apprentice", "srs_numeric": 3, "user_synonyms": ["to gulp"]}},
    {"character": "走る", "meaning": "to run", "kana": "はしる",
     "user_specific": {"srs": "enlightened", "srs_numeric": 8}},
    {"character": "食べる", "meaning": "to eat", "kana": "たべる",
     "user_specific": {"srs": "guru", "srs_numeric": 5}}
]}}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let snapshot = ItemSnapshot::from_records(
        parse_kanji_response(KANJI_JSON)?,
        parse_vocab_response(VOCAB_JSON)?,
    );
    let config = HighlightConfig::default().with_retry(RetryPolicy::no_retry());
    let highlighter = Highlighter::from_repository(&snapshot, config)?;

    let mut tree = TextTree::new("body");
    let root = tree.root();
    let paragraph = tree.add_element(root, "p")?;
    tree.add_text(paragraph, "駅まで走って、水を飲みました。")?;
    let script = tree.add_element(root, "script")?;
    tree.add_text(script, "水を飲む")?;
    tree.add_text(root, "何も食べなかった。")?;

    for span in highlighter.highlight_text("走らない水") {
        println!(
            "{:?} {}..{} {}",
            span.kind(),
            span.start,
            span.end,
            span.matched_text
        );
    }

    let highlighted = highlighter.highlight(&tree)?;
    println!("{}", highlighted.render_markup(highlighter.config()));

    Ok(())
}
