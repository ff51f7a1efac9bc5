use quotedb_core::{NewQuote, Quote, QuoteValidationError};

#[test]
fn quote_serialization_uses_expected_wire_fields() {
    let quote = Quote {
        id: 42,
        author: "ann".to_string(),
        text: "the quick fox".to_string(),
        created_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["id"], 42);
    assert_eq!(json["author"], "ann");
    assert_eq!(json["text"], "the quick fox");
    assert_eq!(json["created_at"], 1_700_000_000_000_i64);

    let decoded: Quote = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, quote);
}

#[test]
fn new_quote_validation_reports_first_problem() {
    assert_eq!(
        NewQuote::new("", "text").validate(),
        Err(QuoteValidationError::EmptyAuthor)
    );
    assert_eq!(
        NewQuote::new("ann", "").validate(),
        Err(QuoteValidationError::EmptyText)
    );
    assert_eq!(NewQuote::new("ann", "hi").validate(), Ok(()));
}
