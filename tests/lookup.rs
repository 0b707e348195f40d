mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{dictionary, seeded_service, test_config, FakeService};
use sozluk::{Category, DictionaryError, LookupOptions, SubDictionary};

const STANDARD_PATHS: [&str; 7] = [
    "/gts", "/atasozu", "/derleme", "/terim", "/bati", "/kilavuz", "/etms",
];

#[tokio::test]
async fn healthy_lookup_is_complete() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());

    let record = dict.lookup("Merhaba", &LookupOptions::default()).await.unwrap();

    assert!(record.complete);
    assert_eq!(record.term, "merhaba");
    assert_eq!(record.headword.as_deref(), Some("merhaba"));
    assert_eq!(record.senses.len(), 1);
    assert_eq!(record.senses[0].category, Some(Category::Interjection));
    assert!(record.proverbs.is_empty());
    assert!(record.idioms.is_empty());
    assert!(record.failed.is_empty());
    assert_eq!(record.dictionaries_queried, SubDictionary::STANDARD.to_vec());
    for path in STANDARD_PATHS {
        assert_eq!(service.calls_to(path), 1, "{path}");
    }
}

#[tokio::test]
async fn partial_failure_keeps_successful_fields() {
    let service = seeded_service();
    for path in ["/derleme", "/bati", "/etms"] {
        service.take_down(path);
    }
    let config = test_config();
    let dict = dictionary(&service, &config);

    let record = dict.lookup("kalem", &LookupOptions::default()).await.unwrap();

    assert!(!record.complete);
    assert_eq!(record.senses.len(), 2);
    assert_eq!(record.compounds, vec!["kurşun kalem", "dolma kalem"]);
    assert_eq!(record.proverbs.len(), 1);
    assert_eq!(record.idioms.len(), 1);
    assert_eq!(record.terminology.len(), 1);
    assert_eq!(record.guide.len(), 1);
    assert!(record.compiled.is_empty());
    assert!(record.foreign.is_empty());
    assert!(record.etymology.is_empty());

    let failed: Vec<_> = record.failed.iter().map(|f| f.source).collect();
    assert_eq!(
        failed,
        vec![SubDictionary::Derleme, SubDictionary::Bati, SubDictionary::Etms]
    );
    assert!(record.failed.iter().all(|f| f.kind == "transport"));

    let attempts = config.retry.max_attempts() as usize;
    assert_eq!(service.calls_to("/derleme"), attempts);
    assert_eq!(service.calls_to("/gts"), 1);

    let value = serde_json::to_value(&*record).unwrap();
    assert_eq!(value["foreign"], serde_json::json!([]));
    assert_eq!(value["complete"], false);
}

#[tokio::test]
async fn invalid_term_is_rejected_before_any_call() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());

    let err = dict.lookup("  ?!. ", &LookupOptions::default()).await.unwrap_err();

    assert!(matches!(err, DictionaryError::Validation(_)));
    assert!(err.is_validation());
    assert_eq!(service.total_calls(), 0);
}

#[tokio::test]
async fn second_lookup_is_served_from_cache() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());

    let first = dict.lookup("kalem", &LookupOptions::default()).await.unwrap();
    let second = dict.lookup("  KALEM ", &LookupOptions::default()).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(service.calls_to("/gts"), 1);
    let stats = dict.cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.live_entries, 1);
}

#[tokio::test]
async fn option_variants_are_cached_separately() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());

    dict.lookup("kalem", &LookupOptions::default()).await.unwrap();
    let only_gts = LookupOptions::default().with_sources([SubDictionary::Gts]);
    let narrow = dict.lookup("kalem", &only_gts).await.unwrap();

    assert_eq!(narrow.dictionaries_queried, vec![SubDictionary::Gts]);
    assert!(narrow.proverbs.is_empty());
    assert_eq!(service.calls_to("/gts"), 2);
    assert_eq!(dict.cache_stats().live_entries, 2);
}

#[tokio::test]
async fn disabling_cache_changes_latency_not_content() {
    let cached_service = seeded_service();
    let cached = dictionary(&cached_service, &test_config());

    let mut uncached_config = test_config();
    uncached_config.cache.enabled = false;
    let uncached_service = seeded_service();
    let uncached = dictionary(&uncached_service, &uncached_config);

    let options = LookupOptions::default();
    let a = cached.lookup("kalem", &options).await.unwrap();
    let a_again = cached.lookup("kalem", &options).await.unwrap();
    let b = uncached.lookup("kalem", &options).await.unwrap();
    let b_again = uncached.lookup("kalem", &options).await.unwrap();

    assert!(a.same_content(&b));
    assert!(a_again.same_content(&b_again));
    assert_eq!(cached_service.calls_to("/gts"), 1);
    assert_eq!(uncached_service.calls_to("/gts"), 2);
    assert_eq!(uncached.cache_stats().live_entries, 0);
}

#[tokio::test]
async fn incomplete_records_are_not_cached() {
    let service = seeded_service();
    service.take_down("/etms");
    let dict = dictionary(&service, &test_config());

    let first = dict.lookup("kalem", &LookupOptions::default()).await.unwrap();
    assert!(!first.complete);

    service.bring_up("/etms");
    let second = dict.lookup("kalem", &LookupOptions::default()).await.unwrap();
    assert!(second.complete);
    assert_eq!(service.calls_to("/gts"), 2);
}

#[tokio::test]
async fn concurrent_identical_lookups_share_one_fan_out() {
    let service = seeded_service();
    service.set_delay(Duration::from_millis(50));
    let dict = dictionary(&service, &test_config());
    let options = LookupOptions::default();

    let (a, b) = tokio::join!(dict.lookup("kalem", &options), dict.lookup("Kalem", &options));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(service.calls_to("/gts"), 1);
    assert_eq!(service.total_calls(), 7);
}

#[tokio::test]
async fn coalescing_can_be_turned_off() {
    let service = seeded_service();
    service.set_delay(Duration::from_millis(30));
    let mut config = test_config();
    config.coalesce_requests = false;
    let dict = dictionary(&service, &config);
    let options = LookupOptions::default().with_sources([SubDictionary::Gts]);

    let (a, b) = tokio::join!(dict.lookup("kalem", &options), dict.lookup("kalem", &options));

    assert!(a.unwrap().same_content(&b.unwrap()));
    assert_eq!(service.calls_to("/gts"), 2);
}

#[tokio::test]
async fn pronunciation_leg_adds_audio() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());
    let options = LookupOptions::default()
        .with_sources([SubDictionary::Gts])
        .with_pronunciation(true);

    let record = dict.lookup("kalem", &options).await.unwrap();

    assert!(record.complete);
    let audio = record.pronunciation.as_ref().unwrap();
    assert_eq!(audio.code, "k0412");
    assert_eq!(audio.audio_url, "http://dictionary.test/ses/k0412.wav");
    assert_eq!(service.calls_to("/yazim"), 1);
}

#[tokio::test]
async fn per_lookup_ttl_override_expires() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());
    let options = LookupOptions::default()
        .with_sources([SubDictionary::Gts])
        .with_cache_ttl(Duration::from_millis(50));

    dict.lookup("kalem", &options).await.unwrap();
    dict.lookup("kalem", &options).await.unwrap();
    assert_eq!(service.calls_to("/gts"), 1);

    tokio::time::sleep(Duration::from_millis(80)).await;
    dict.lookup("kalem", &options).await.unwrap();
    assert_eq!(service.calls_to("/gts"), 2);
}

#[tokio::test]
async fn invalidation_by_term_prefix_and_key() {
    let service = seeded_service();
    let dict = dictionary(&service, &test_config());
    let only_gts = LookupOptions::default().with_sources([SubDictionary::Gts]);

    dict.lookup("kalem", &LookupOptions::default()).await.unwrap();
    dict.lookup("kalem", &only_gts).await.unwrap();
    dict.lookup("merhaba", &only_gts).await.unwrap();
    assert_eq!(dict.cache_stats().live_entries, 3);

    assert_eq!(dict.invalidate_term("KALEM").unwrap(), 2);
    assert_eq!(dict.cache_stats().live_entries, 1);

    assert_eq!(dict.invalidate_cache(Some("lookup:merhaba|gts|p0")), 1);
    assert_eq!(dict.cache_stats().live_entries, 0);

    dict.lookup("kalem", &only_gts).await.unwrap();
    assert_eq!(service.calls_to("/gts"), 4);
    assert_eq!(dict.invalidate_cache(Some("lookup:*")), 1);
    assert_eq!(dict.invalidate_cache(None), 0);
}

#[tokio::test]
async fn slow_leg_times_out_without_blocking_siblings() {
    let service = FakeService::new();
    service.set_delay(Duration::from_millis(200));
    let mut config = test_config();
    config.transport.timeout = Duration::from_millis(50);
    config.retry = config.retry.with_max_retries(0);
    let dict = dictionary(&service, &config);

    let record = dict.lookup("kalem", &LookupOptions::default()).await.unwrap();

    assert!(!record.complete);
    assert_eq!(record.failed.len(), 7);
    assert!(record.failed.iter().all(|f| f.kind == "timeout"));
    assert!(record.elapsed_ms < 190);
}

#[tokio::test]
async fn cancelled_lookup_is_not_resumed_later() {
    let service = seeded_service();
    service.set_delay(Duration::from_millis(100));
    let dict = dictionary(&service, &test_config());
    let options = LookupOptions::default().with_sources([SubDictionary::Gts]);

    let cancelled =
        tokio::time::timeout(Duration::from_millis(20), dict.lookup("kalem", &options)).await;
    assert!(cancelled.is_err());

    let record = dict.lookup("kalem", &options).await.unwrap();
    assert!(record.complete);
    assert_eq!(service.calls_to("/gts"), 2);
}

#[tokio::test]
async fn cancelled_lookup_does_not_keep_the_client_alive() {
    let service = seeded_service();
    service.set_delay(Duration::from_millis(100));
    let mut config = test_config();
    config.cache.sweep_interval_secs = 1;
    let dict = dictionary(&service, &config);
    let sweeper = dict.start_sweeper().unwrap();

    let cancelled = tokio::time::timeout(
        Duration::from_millis(20),
        dict.lookup("kalem", &LookupOptions::default()),
    )
    .await;
    assert!(cancelled.is_err());
    drop(dict);

    let stopped = tokio::time::timeout(Duration::from_secs(3), sweeper).await;
    assert!(stopped.is_ok(), "sweeper outlived the client");
}

#[tokio::test]
async fn lookup_and_find_proverbs_classify_phrases_alike() {
    let service = seeded_service();
    service.route(
        "/gts?ağız",
        serde_json::json!([{"madde": "ağız", "atasozu": [{"madde": "ağzı kulaklarında"}]}]),
    );
    service.route(
        "/atasozu?ağız",
        serde_json::json!([{"sozum": "ağzı kulaklarında", "turu2": "Deyim"}]),
    );
    let dict = dictionary(&service, &test_config());
    let options = LookupOptions::default()
        .with_sources([SubDictionary::Gts, SubDictionary::Atasozu]);

    let record = dict.lookup("ağız", &options).await.unwrap();
    let found = dict.find_proverbs("ağız").await.unwrap();

    assert!(record.proverbs.is_empty());
    assert_eq!(record.idioms, found.idioms);
    assert_eq!(record.idioms[0].text, "ağzı kulaklarında");
}
