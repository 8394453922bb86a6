use crate::locale::{Detector, Grouper, LocaleError, Scorer, SignalKind, DEFAULT_LOCALE};
use std::sync::{Arc, Mutex};

fn priority(codes: &[&str]) -> Vec<String> {
    codes.iter().map(|code| code.to_string()).collect()
}

fn assert_detected(url: &str, locale: &str, signal: SignalKind) {
    let token = Detector::default()
        .detect(url)
        .unwrap_or_else(|e| panic!("detect({}) failed: {}", url, e));
    assert_eq!(token.locale, locale, "locale for {}", url);
    assert_eq!(token.signal, signal, "signal for {}", url);
}

fn assert_base(url: &str, expected: &str) {
    let token = Detector::default().detect(url).unwrap();
    assert_eq!(token.base_url, expected, "base URL for {}", url);
}

// Detector

#[test]
fn test_detect_path_prefix() {
    assert_detected("https://example.com/en/about", "en", SignalKind::Path);
    assert_detected("https://example.com/es/productos", "es", SignalKind::Path);
    assert_detected("https://example.com/it/chi-siamo", "it", SignalKind::Path);
    assert_detected("https://example.com/zh/about", "zh", SignalKind::Path);
    assert_detected("https://example.com/en", "en", SignalKind::Path);
    assert_detected("https://example.com/en/", "en", SignalKind::Path);
    assert_detected("https://example.com/EN/about", "en", SignalKind::Path);
    assert_detected("https://example.com:8080/en/about", "en", SignalKind::Path);
    assert_detected("https://example.com/en/about#section", "en", SignalKind::Path);
    assert_detected("http://192.168.1.1/de/start", "de", SignalKind::Path);
}

#[test]
fn test_detect_extended_locale() {
    assert_detected("https://example.com/en-US/about", "en-us", SignalKind::Path);
    assert_detected("https://example.com/pt-br/produtos", "pt-br", SignalKind::Path);
    assert_detected("https://en-gb.example.com/about", "en-gb", SignalKind::Subdomain);
}

#[test]
fn test_detect_second_segment() {
    let token = Detector::default()
        .detect("https://example.com/content/de/page")
        .unwrap();
    assert_eq!(token.locale, "de");
    assert_eq!(token.position, Some(1));
    assert_eq!(token.base_url, "https://example.com/content/page");

    assert_detected("https://example.com/graphql/en", "en", SignalKind::Path);
    // Only the first two segments are probed
    assert_detected("https://example.com/a/b/en/page", "", SignalKind::None);
}

#[test]
fn test_percent_encoded_path_locale() {
    let token = Detector::default()
        .detect("https://example.com/%65n/about")
        .unwrap();
    assert_eq!(token.locale, "en");
    assert_eq!(token.signal, SignalKind::Path);
    assert_eq!(token.position, Some(0));
    assert_eq!(token.base_url, "https://example.com/about");

    // Remaining segments keep their encoding in the base URL
    assert_base("https://example.com/%65s/caf%C3%A9", "https://example.com/caf%C3%A9");
    // Guards see the decoded segment too
    assert_detected("https://example.com/%69s/about", "", SignalKind::None);
}

#[test]
fn test_detect_first_locale_segment_wins() {
    let token = Detector::default()
        .detect("https://example.com/en/fr/about")
        .unwrap();
    assert_eq!(token.locale, "en");
    assert_eq!(token.position, Some(0));
    assert_eq!(token.base_url, "https://example.com/fr/about");
}

#[test]
fn test_detect_subdomain() {
    assert_detected("https://en.example.com/about", "en", SignalKind::Subdomain);
    assert_detected("https://es.example.com/productos", "es", SignalKind::Subdomain);
    assert_detected("https://www.example.com/about", "", SignalKind::None);
    assert_detected("https://store.example.com/about", "", SignalKind::None);
    // A single-label host has no subdomain
    assert_detected("http://de/about", "", SignalKind::None);
}

#[test]
fn test_detect_query_param() {
    assert_detected("https://example.com/about?lang=en", "en", SignalKind::Query);
    assert_detected("https://example.com/about?locale=es", "es", SignalKind::Query);
    assert_detected("https://example.com/about?hl=FR", "fr", SignalKind::Query);
    assert_detected("https://example.com/about?l=pt-BR", "pt-br", SignalKind::Query);
    assert_detected("https://example.com/about?foo=bar", "", SignalKind::None);
    assert_detected("https://example.com/about?lang=english", "", SignalKind::None);
}

#[test]
fn test_query_param_names_are_case_sensitive() {
    assert_detected("https://example.com/page?LANG=en", "", SignalKind::None);
    assert_detected("https://example.com/page?Locale=en", "", SignalKind::None);
}

#[test]
fn test_query_param_lookup_order() {
    assert_detected("https://example.com/page?locale=es&lang=en", "en", SignalKind::Query);
    // An unusable value falls through to the next candidate name
    assert_detected("https://example.com/page?lang=xyz&hl=de", "de", SignalKind::Query);
    assert_detected("https://example.com/page?lang=&hl=de", "de", SignalKind::Query);
}

#[test]
fn test_signal_precedence() {
    assert_detected("https://en.example.com/es/about?lang=fr", "en", SignalKind::Subdomain);
    assert_detected("https://example.com/es/about?lang=fr", "es", SignalKind::Path);

    let token = Detector::default()
        .detect("https://en.example.com/es/about?lang=fr")
        .unwrap();
    // Lower-priority markers stay in the base URL
    assert_eq!(token.base_url, "https://example.com/es/about?lang=fr");
}

#[test]
fn test_english_word_codes_never_detected() {
    let detector = Detector::default();
    for code in ["id", "in", "is", "or", "to", "ad", "as", "at", "by", "go", "no"] {
        for url in [
            format!("https://example.com/{}/users", code),
            format!("https://example.com/item/{}/12345", code),
            format!("https://example.com/{}", code),
        ] {
            let token = detector.detect(&url).unwrap();
            assert_eq!(token.signal, SignalKind::None, "{} detected as locale", url);
            assert_eq!(token.locale, "");
        }
    }
}

#[test]
fn test_false_positive_paths() {
    assert_detected("https://example.com/endpoint/users", "", SignalKind::None);
    assert_detected("https://example.com/send/notification", "", SignalKind::None);
    assert_detected("https://example.com/broken/page", "", SignalKind::None);
    assert_detected("https://example.com/api/v1/en/users", "", SignalKind::None);
    assert_detected("https://example.com/api/en", "", SignalKind::None);
    assert_detected("https://example.com/tech/it/jobs", "", SignalKind::None);
    assert_detected("https://example.com/technology/it", "", SignalKind::None);
}

#[test]
fn test_api_path_with_enough_depth() {
    assert_detected("https://example.com/api/en/users", "en", SignalKind::Path);
    assert_detected("https://example.com/it/api", "it", SignalKind::Path);
}

#[test]
fn test_base_url_generation() {
    assert_base("https://example.com/en/about", "https://example.com/about");
    assert_base("https://es.example.com/about", "https://example.com/about");
    assert_base("https://example.com/about?lang=en", "https://example.com/about");
    assert_base("https://example.com/about?lang=en&foo=bar", "https://example.com/about?foo=bar");
    assert_base("https://example.com/en/category/product", "https://example.com/category/product");
    assert_base("https://example.com/en-US/about", "https://example.com/about");
    assert_base("https://example.com/en/search?q=test&page=1", "https://example.com/search?q=test&page=1");
    assert_base("https://example.com/en", "https://example.com/");
    assert_base("https://example.com/en/about#section", "https://example.com/about#section");
    assert_base("https://example.com:8080/en/about", "https://example.com:8080/about");
    assert_base("https://en.example.com:8443/x", "https://example.com:8443/x");
}

#[test]
fn test_query_base_strips_every_matching_param() {
    assert_base(
        "https://example.com/page?lang=en&id=7&hl=EN&locale=es",
        "https://example.com/page?id=7&locale=es",
    );
    assert_base(
        "https://example.com/page?lang=en&locale=es",
        "https://example.com/page?locale=es",
    );
}

#[test]
fn test_no_signal_keeps_input_verbatim() {
    let detector = Detector::default();
    for url in [
        "https://example.com",
        "https://example.com/",
        "https://Example.com/About?b=2&a=1",
        "https://example.com/about",
        "https://github.com/user/repo/pull/123",
    ] {
        let token = detector.detect(url).unwrap();
        assert_eq!(token.signal, SignalKind::None);
        assert_eq!(token.locale, "");
        assert_eq!(token.position, None);
        assert_eq!(token.base_url, url);
        assert_eq!(token.original_url, url);
        assert_eq!(token.locale_key(), DEFAULT_LOCALE);
    }
}

#[test]
fn test_stripping_is_idempotent() {
    let detector = Detector::default();
    for url in [
        "https://example.com/en/about",
        "https://es.example.com/about",
        "https://example.com/about?lang=en",
        "https://example.com/content/de/page",
        "https://example.com/about?lang=en&hl=en&q=1",
    ] {
        let first = detector.detect(url).unwrap();
        assert!(first.has_locale(), "{} has no locale", url);

        let second = detector.detect(&first.base_url).unwrap();
        assert_eq!(second.signal, SignalKind::None, "{} re-detected", first.base_url);
        assert_eq!(second.base_url, first.base_url);
    }
}

#[test]
fn test_malformed_urls() {
    let detector = Detector::default();
    for url in ["not-a-url", "", "   ", "://no-scheme.com", "https://"] {
        match detector.detect(url) {
            Err(LocaleError::InvalidUrl { url: reported, .. }) => assert_eq!(reported, url),
            Ok(token) => panic!("{:?} unexpectedly parsed: {:?}", url, token),
        }
    }
}

#[test]
fn test_detector_shared_across_threads() {
    let detector = Detector::default();
    let urls = [
        "https://example.com/en/about",
        "https://example.com/es/sobre-nosotros",
        "https://example.com/it/chi-siamo",
        "https://example.com/fr/a-propos",
    ];

    std::thread::scope(|scope| {
        for url in urls {
            let detector = &detector;
            scope.spawn(move || {
                let token = detector.detect(url).unwrap();
                assert_eq!(token.signal, SignalKind::Path);
            });
        }
    });
}

// Grouper

#[test]
fn test_grouper_matches_percent_encoded_segments() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/en/%61bout").unwrap();
    grouper.add("https://example.com/es/sobre-nosotros").unwrap();

    assert_eq!(grouper.len(), 1);
    assert_eq!(grouper.groups()[0].key(), "example.com/about");
    assert_eq!(grouper.best_urls()[0].locale, "en");
    assert!(grouper
        .should_group("https://example.com/en/%61bout", "https://example.com/es/sobre-nosotros")
        .unwrap());
}

#[test]
fn test_grouper_collapses_translated_variants() {
    let mut grouper = Grouper::new(priority(&["en"]));
    for url in [
        "https://example.com/about",
        "https://example.com/en/about",
        "https://example.com/es/sobre-nosotros",
        "https://example.com/it/chi-siamo",
    ] {
        grouper.add(url).unwrap();
    }

    assert_eq!(grouper.len(), 1);
    let best = grouper.best_urls();
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].locale, "en");
    assert_eq!(best[0].original_url, "https://example.com/en/about");

    let group = &grouper.groups()[0];
    assert_eq!(group.key(), "example.com/about");
    assert_eq!(
        group.locales().collect::<Vec<_>>(),
        vec![DEFAULT_LOCALE, "en", "es", "it"]
    );
}

#[test]
fn test_grouper_keeps_unrelated_paths_apart() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/endpoint/users").unwrap();
    grouper.add("https://example.com/send/email").unwrap();

    assert_eq!(grouper.len(), 2);
    assert!(grouper.best_urls().iter().all(|token| token.locale.is_empty()));
}

#[test]
fn test_grouper_add_is_idempotent() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/es/productos").unwrap();
    grouper.add("https://example.com/en/products").unwrap();

    let before = grouper.best_urls().into_iter().cloned().collect::<Vec<_>>();
    grouper.add("https://example.com/en/products").unwrap();
    grouper.add("https://example.com/es/productos").unwrap();

    assert_eq!(grouper.len(), 1);
    assert_eq!(
        grouper.best_urls().into_iter().cloned().collect::<Vec<_>>(),
        before
    );
    assert_eq!(grouper.groups()[0].entries().len(), 2);
    assert_eq!(grouper.groups()[0].url_count(), 4);
}

#[test]
fn test_first_url_per_locale_is_kept() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/en/about").unwrap();
    grouper.add("https://en.example.com/about").unwrap();

    let group = &grouper.groups()[0];
    assert_eq!(group.entries().len(), 1);
    assert_eq!(
        group.get("en").map(|token| token.original_url.as_str()),
        Some("https://example.com/en/about")
    );
}

#[test]
fn test_best_url_priority_order() {
    let mut grouper = Grouper::new(priority(&["fr", "de"]));
    grouper.add("https://example.com/es/about").unwrap();
    assert_eq!(grouper.best_urls()[0].locale, "es");

    grouper.add("https://example.com/about").unwrap();
    assert_eq!(grouper.best_urls()[0].locale_key(), DEFAULT_LOCALE);

    grouper.add("https://example.com/de/uber-uns").unwrap();
    assert_eq!(grouper.best_urls()[0].locale, "de");

    grouper.add("https://example.com/fr/a-propos").unwrap();
    assert_eq!(grouper.best_urls()[0].locale, "fr");

    assert_eq!(grouper.len(), 1);
}

#[test]
fn test_best_url_falls_back_to_first_seen() {
    let mut grouper = Grouper::new(priority(&["ja"]));
    grouper.add("https://example.com/pt/contato").unwrap();
    grouper.add("https://example.com/de/kontakt").unwrap();
    grouper.add("https://example.com/es/contacto").unwrap();

    assert_eq!(grouper.len(), 1);
    assert_eq!(grouper.best_urls()[0].locale, "pt");
}

#[test]
fn test_empty_priority_defaults_to_english() {
    let mut grouper = Grouper::new(Vec::new());
    assert_eq!(grouper.priority().to_vec(), vec!["en".to_string()]);

    grouper.add("https://example.com/de/hilfe").unwrap();
    grouper.add("https://example.com/en/help").unwrap();
    assert_eq!(grouper.best_urls()[0].locale, "en");
    assert_eq!(grouper.groups()[0].priority(), grouper.priority());
}

#[test]
fn test_group_key_shape() {
    let grouper = Grouper::new(priority(&["en"]));

    assert_eq!(
        grouper.group_key("https://WWW.Example.com/es/Productos?Sort=asc&page=2&sort=desc").unwrap(),
        "example.com/product?page&sort"
    );
    assert_eq!(grouper.group_key("https://example.com").unwrap(), "example.com/");
    assert_eq!(grouper.group_key("https://fr.example.com/").unwrap(), "example.com/");
    assert_eq!(
        grouper.group_key("https://example.com:8080/en/Unknown_Word").unwrap(),
        "example.com:8080/unknown_word"
    );
}

#[test]
fn test_query_locale_variants_group_together() {
    let mut grouper = Grouper::new(priority(&["en"]));
    for url in [
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&hl=en",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&hl=es",
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&hl=fr",
    ] {
        grouper.add(url).unwrap();
    }

    assert_eq!(grouper.len(), 1);
    assert_eq!(grouper.best_urls()[0].locale, "en");
}

#[test]
fn test_parse_failure_leaves_state_untouched() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/en/about").unwrap();

    assert!(grouper.add("not-a-url").is_err());
    assert!(grouper.group_key("").is_err());

    assert_eq!(grouper.len(), 1);
    assert_eq!(grouper.groups()[0].url_count(), 1);
}

#[test]
fn test_best_urls_in_creation_order() {
    let mut grouper = Grouper::new(priority(&["en"]));
    for url in [
        "https://example.com/contact",
        "https://example.com/about",
        "https://example.com/es/contacto",
        "https://example.com/cart",
    ] {
        grouper.add(url).unwrap();
    }

    let keys: Vec<&str> = grouper.groups().iter().map(|group| group.key()).collect();
    assert_eq!(keys, vec!["example.com/contact", "example.com/about", "example.com/cart"]);
}

#[test]
fn test_should_group() {
    let grouper = Grouper::new(priority(&["en"]));

    assert!(!grouper
        .should_group("https://example.com/en/about", "https://example.com/en/products")
        .unwrap());
    assert!(grouper
        .should_group("https://example.com/en/about", "https://example.com/es/sobre-nosotros")
        .unwrap());
    assert!(grouper
        .should_group("https://example.com/about", "https://it.example.com/chi-siamo")
        .unwrap());
    assert!(grouper
        .should_group("https://example.com/en/shop/cart", "https://example.com/de/shop/warenkorb")
        .unwrap());
    assert!(!grouper
        .should_group("https://example.com/en/about", "https://other.com/en/about")
        .unwrap());
}

#[test]
fn test_should_group_propagates_parse_failure() {
    let grouper = Grouper::new(priority(&["en"]));
    assert!(grouper.should_group("https://example.com/en/about", "not-a-url").is_err());
    assert!(grouper.should_group("::", "https://example.com/en/about").is_err());
}

#[test]
fn test_grouper_behind_mutex() {
    let grouper = Arc::new(Mutex::new(Grouper::new(priority(&["en"]))));
    let urls = [
        "https://example.com/en/about",
        "https://example.com/es/sobre-nosotros",
        "https://example.com/it/chi-siamo",
        "https://example.com/fr/a-propos",
    ];

    std::thread::scope(|scope| {
        for url in urls {
            let grouper = Arc::clone(&grouper);
            scope.spawn(move || {
                grouper.lock().unwrap().add(url).unwrap();
            });
        }
    });

    let grouper = grouper.lock().unwrap();
    assert_eq!(grouper.len(), 1);
    assert_eq!(grouper.best_urls()[0].locale, "en");
}

// Scorer over groups

#[test]
fn test_scorer_picks_highest_total() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/es/about?ref=1").unwrap();
    grouper.add("https://example.com/about?ref=1").unwrap();
    grouper.add("https://example.com/en/about?ref=1").unwrap();
    assert_eq!(grouper.len(), 1);

    let scorer = Scorer::new(grouper.priority());
    let group = &grouper.groups()[0];

    let scores: Vec<u32> = group
        .entries()
        .iter()
        .enumerate()
        .map(|(index, token)| scorer.score(token, index == 0).total)
        .collect();
    // es: 25 + (2 + 2) + 10, default: 50 + (2 + 1), en: 110 + (2 + 2)
    assert_eq!(scores, vec![39, 53, 114]);

    assert_eq!(scorer.best_from_group(group).map(|t| t.locale.as_str()), Some("en"));
    assert_eq!(grouper.best_urls_scored(&scorer).len(), 1);
}

#[test]
fn test_scorer_first_seen_bonus_breaks_close_calls() {
    let mut grouper = Grouper::new(priority(&["en"]));
    grouper.add("https://example.com/fr/about").unwrap();
    grouper.add("https://example.com/de/about").unwrap();

    let scorer = Scorer::new(grouper.priority());
    let best = scorer.best_from_group(&grouper.groups()[0]).unwrap();
    assert_eq!(best.locale, "fr");
}
