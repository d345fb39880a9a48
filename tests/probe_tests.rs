//! Library-level probe tests against gzip-compressed corpora and a fake server.

use std::cell::Cell;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use flate2::write::GzEncoder;
use flate2::Compression;

use oeis_probe::catalog::cache::{DiskCache, ResponseCache};
use oeis_probe::catalog::client::{Transport, TransportError};
use oeis_probe::{
    MismatchDiagnosis, OeisClient, OfflineCorpus, ProbeConfig, ProbeEngine, Query, RankPolicy,
};

fn write_gz(path: &Path, text: &str) {
    let mut encoder = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap();
}

fn gz_corpus(dir: &Path) -> OfflineCorpus {
    let stripped = dir.join("stripped.gz");
    let names = dir.join("names.gz");
    write_gz(
        &stripped,
        "A000045 ,0,1,1,2,3,5,8,13,21,34,55,89,144,233,\n\
         A000108 ,1,1,2,5,14,42,132,429,1430,4862,\n\
         A006577 ,0,1,3,6,2,7,13,20,12,21,11,22,\n",
    );
    write_gz(
        &names,
        "A000045 Fibonacci numbers\nA006577 Number of halving and tripling steps to reach 1\n",
    );
    OfflineCorpus {
        stripped,
        names: Some(names),
    }
}

/// Serves one fixed body and counts requests
struct CountingTransport {
    body: String,
    calls: Rc<Cell<usize>>,
}

impl Transport for CountingTransport {
    fn get(&self, _url: &str) -> Result<String, TransportError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.body.clone())
    }
}

#[test]
fn test_gzip_corpus_probe_with_names() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = gz_corpus(dir.path());

    let query = Query::parse("1, 1, 2, 5, 14, 42").unwrap();
    let report = ProbeEngine::new(ProbeConfig::default())
        .with_offline(&corpus)
        .probe(&query)
        .unwrap();

    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].identifier(), "A000108");
    assert_eq!(report.hits[0].name(), "");
    assert_eq!(report.hits[0].match_at(), Some(0));

    let query = Query::parse("2, 3, 5, 8, 13").unwrap();
    let report = ProbeEngine::new(ProbeConfig::default())
        .with_offline(&corpus)
        .probe(&query)
        .unwrap();

    assert_eq!(report.hits.len(), 1);
    assert_eq!(report.hits[0].identifier(), "A000045");
    assert_eq!(report.hits[0].name(), "Fibonacci numbers");
    assert_eq!(report.hits[0].match_at(), Some(3));
}

#[test]
fn test_explain_first_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = gz_corpus(dir.path());

    // The wrong last term keeps the offline scan from finding a candidate
    let transport = CountingTransport {
        body: r#"{"results": [{"number": 6577, "name": "Collatz steps",
                  "data": "0,1,3,6,2,7,13,20,12,21,11,22"}]}"#
            .to_string(),
        calls: Rc::new(Cell::new(0)),
    };
    let client = OeisClient::new("http://oeis.test", Box::new(transport));

    let query = Query::parse("0,1,3,6,2,7,13,20,12,21,11,99").unwrap();
    let report = ProbeEngine::new(ProbeConfig::default())
        .with_client(&client)
        .with_offline(&corpus)
        .probe(&query)
        .unwrap();

    assert_eq!(report.hits[0].identifier(), "A006577");
    let diagnosis = report.explain_top(&query).unwrap();
    assert_eq!(
        diagnosis.to_string(),
        "top A006577: first mismatch at query[11] (#12) -> got 99; expected 22 (hit data index 11)"
    );
    assert!(matches!(
        diagnosis,
        MismatchDiagnosis::Mismatch {
            query_index: 11,
            hay_index: 11,
            ..
        }
    ));
}

#[test]
fn test_cached_client_skips_transport() {
    let dir = tempfile::tempdir().unwrap();
    let calls = Rc::new(Cell::new(0));
    let transport = CountingTransport {
        body: r#"[{"number": 45, "name": "Fibonacci numbers", "data": "0,1,1,2,3,5,8,13"}]"#
            .to_string(),
        calls: Rc::clone(&calls),
    };
    let cache = DiskCache::open(dir.path().join("cache"), 30).unwrap();
    let client = OeisClient::new("http://oeis.test", Box::new(transport)).with_cache(Box::new(cache));

    let query = Query::parse("0 1 1 2 3 5").unwrap();
    let engine = ProbeEngine::new(ProbeConfig::default()).with_client(&client);
    let first = engine.probe(&query).unwrap();
    let second = engine.probe(&query).unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(first.hits, second.hits);
    assert_eq!(first.hits[0].identifier(), "A000045");
}

#[test]
fn test_cache_round_trip_and_expiry() {
    let dir = tempfile::tempdir().unwrap();
    let fresh = DiskCache::open(dir.path(), 30).unwrap();
    fresh.put("k", r#"{"a": 1}"#).unwrap();
    assert_eq!(fresh.get("k").as_deref(), Some(r#"{"a": 1}"#));

    std::thread::sleep(std::time::Duration::from_millis(20));
    let expired = DiskCache::open(dir.path(), 0).unwrap();
    assert!(expired.get("k").is_none());
}

#[test]
fn test_prefer_early_with_big_terms() {
    let dir = tempfile::tempdir().unwrap();
    let stripped: PathBuf = dir.path().join("stripped");
    std::fs::write(
        &stripped,
        "A000002 ,7,123456789012345678901234567890,2,\n\
         A000001 ,123456789012345678901234567890,2,\n",
    )
    .unwrap();
    let corpus = OfflineCorpus {
        stripped,
        names: None,
    };
    let query = Query::parse("123456789012345678901234567890, 2").unwrap();

    let config = ProbeConfig {
        rank: RankPolicy::PreferEarly,
        ..ProbeConfig::default()
    };
    let report = ProbeEngine::new(config)
        .with_offline(&corpus)
        .probe(&query)
        .unwrap();

    let ids: Vec<&str> = report.hits.iter().map(|h| h.identifier()).collect();
    assert_eq!(ids, ["A000001", "A000002"]);
    assert_eq!(report.hits[0].match_len(), 2);
}
