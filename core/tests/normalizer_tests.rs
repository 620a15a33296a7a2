use cinematch_core::tokenizer::normalize;

#[test]
fn it_lowercases_and_strips_non_letters() {
    let clean = normalize(Some("The THIEF's 2nd heist, in Paris!"));
    assert_eq!(clean, "thief heist paris");
}

#[test]
fn it_filters_stopwords_and_short_tokens() {
    let clean = normalize(Some("She and an ox go to the ocean"));
    let words: Vec<&str> = clean.split(' ').collect();
    assert!(!words.contains(&"she"));
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"ox"));
    assert_eq!(words, vec!["ocean"]);
}

#[test]
fn it_returns_empty_for_absent_or_blank_input() {
    assert_eq!(normalize(None), "");
    assert_eq!(normalize(Some("")), "");
    assert_eq!(normalize(Some("   \t\n")), "");
    assert_eq!(normalize(Some("42 !!! ?")), "");
}

#[test]
fn it_is_idempotent_on_clean_text() {
    for text in ["thief steals corporate secrets", "Amélie wanders Montmartre", "rocket crew lands mars"] {
        let once = normalize(Some(text));
        assert_eq!(normalize(Some(&once)), once);
    }
}

#[test]
fn it_drops_non_latin_letters() {
    assert_eq!(normalize(Some("café crème")), "caf");
}
