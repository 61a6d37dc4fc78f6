//! Integration tests: normalization feeding the intent classifier.

use serde_json::json;
use shopsense_classifier::{normalizer, IntentClassifier};
use shopsense_domain::{Classification, ParsedInteraction, SessionContext};

fn parse(url: &str, text: &str, tag: &str, index: usize) -> ParsedInteraction {
    let record = json!({
        "type": "click",
        "timestamp": 1000.0 * index as f64,
        "context": {"url": url},
        "element": {"text": text, "tag": tag},
        "selectors": {"primary": "#el"}
    });
    normalizer::normalize_interaction(&record, index).unwrap()
}

#[test]
fn test_cart_action_beats_ui_filtering() {
    let interaction = parse(
        "https://www2.hm.com/en_us/productpage.1265337002.html",
        "Add to Bag",
        "button",
        0,
    );
    let classifier = IntentClassifier::default_tables();
    let result = classifier.classify(&interaction, &SessionContext::default(), &[]);

    match result {
        Classification::ProductAttribute { value, confidence, .. } => {
            assert_eq!(value, "Add to Bag");
            assert!(confidence >= 0.8);
        }
        other => panic!("expected product attribute, got {:?}", other),
    }
}

#[test]
fn test_control_label_is_ui() {
    let interaction = parse("https://www.gap.com/browse/women", "Back", "button", 0);
    let classifier = IntentClassifier::default_tables();
    let result = classifier.classify(&interaction, &SessionContext::default(), &[]);
    assert!(matches!(result, Classification::Ui { confidence, .. } if confidence == 0.9));
}

#[test]
fn test_promo_link_without_category_url_falls_back_to_slug_path() {
    // Clicked from the homepage: no category path in the URL, so the path
    // comes from the link text
    let interaction = parse("https://www.gap.com/", "New Arrivals", "a", 0);
    let classifier = IntentClassifier::default_tables();
    let result = classifier.classify(&interaction, &SessionContext::default(), &[]);

    match result {
        Classification::Category { path, confidence, .. } => {
            assert_eq!(path, "new-arrivals");
            assert_eq!(confidence, 0.8);
        }
        other => panic!("expected category, got {:?}", other),
    }
}

#[test]
fn test_lookahead_promotes_product_link_on_category_page() {
    let link = parse(
        "https://www.gap.com/browse/women",
        "Organic Cotton Crew Tee",
        "span",
        0,
    );
    let landing = parse(
        "https://www.gap.com/p/organic-cotton-crew-tee/443211",
        "Organic Cotton Crew Tee",
        "h1",
        1,
    );
    let classifier = IntentClassifier::default_tables();
    let result = classifier.classify(
        &link,
        &SessionContext::default(),
        std::slice::from_ref(&landing),
    );

    match result {
        Classification::Product { name, confidence, .. } => {
            assert_eq!(name, "Organic Cotton Crew Tee");
            assert!(confidence >= 0.75);
        }
        other => panic!("expected product, got {:?}", other),
    }
}

#[test]
fn test_browsing_hint_raises_default_ignore_confidence() {
    let interaction = parse("https://www.gap.com/about-us", "our heritage story", "div", 0);
    let classifier = IntentClassifier::default_tables();

    let plain = classifier.classify(&interaction, &SessionContext::default(), &[]);
    assert!(matches!(plain, Classification::Ignore { confidence, .. } if confidence == 0.3));

    let browsing = SessionContext {
        behavior_type: Some("casual_browsing".to_string()),
        ..Default::default()
    };
    let hinted = classifier.classify(&interaction, &browsing, &[]);
    assert!(matches!(hinted, Classification::Ignore { confidence, .. } if confidence == 0.5));
}

#[test]
fn test_payload_normalization_feeds_classification() {
    let payload = json!([
        {
            "type": "click",
            "timestamp": 1000.0,
            "context": {"url": "https://www.gap.com/browse/women"},
            "element": {
                "text": "Women",
                "tag": "a",
                "siblings": [{"text": "Slim Jeans"}]
            }
        }
    ]);
    let batch = normalizer::normalize_payload(&payload);
    assert_eq!(batch.interactions.len(), 1);
    assert_eq!(batch.dropped, 0);

    let classifier = IntentClassifier::default_tables();
    let result = classifier.classify(
        &batch.interactions[0],
        &SessionContext::default(),
        &[],
    );
    // The sibling dump never reaches the classifier; only the element text
    // is considered
    assert!(matches!(result, Classification::Category { .. }));
}
