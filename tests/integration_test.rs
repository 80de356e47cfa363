//! Integration tests for subnet-calc
//!
//! These tests verify the complete workflow from parsing to history and suggestion.

use chrono::{Duration, TimeZone, Utc};
use subnet_calc::{
    analyze_batch, commands, parse_and_classify, suggest::SizeModel, AddressCount,
    Classification, Config, HistoryStore, IpVersion, ParseErrorKind,
};

fn temp_config(dir: &std::path::Path) -> Config {
    Config {
        history_file: dir.join("ip_history.jsonl"),
        model_file: dir.join("subnet_predictor.json"),
        ..Config::default()
    }
}

#[test]
fn test_documented_examples() {
    let d = parse_and_classify("192.168.1.5/24").expect("valid host in subnet");
    assert_eq!(d.network_address.to_string(), "192.168.1.0");
    assert_eq!(d.broadcast_address.unwrap().to_string(), "192.168.1.255");
    assert_eq!(d.usable_hosts.count, AddressCount::Exact(254));
    assert_eq!(d.usable_hosts.first.to_string(), "192.168.1.1");
    assert_eq!(d.usable_hosts.last.to_string(), "192.168.1.254");

    let d = parse_and_classify("10.0.0.0/31").unwrap();
    assert_eq!(d.usable_hosts.count, AddressCount::Exact(2));

    let d = parse_and_classify("2001:db8::/32").unwrap();
    assert_eq!(d.ip_version, IpVersion::V6);
    assert!(d.broadcast_address.is_none());
    assert!(d.wildcard_mask.is_none());
    assert_eq!(d.classification, Classification::Ipv6);
    assert_eq!(d.total_addresses, AddressCount::Exact(1u128 << 96));

    let err = parse_and_classify("300.1.1.1/24").unwrap_err();
    assert_eq!(err.reason, ParseErrorKind::OctetOutOfRange("300".to_string()));

    assert_eq!(
        parse_and_classify("224.0.0.1/32").unwrap().classification,
        Classification::Multicast
    );
    let d = parse_and_classify("10.0.0.0/8").unwrap();
    assert_eq!(d.classification, Classification::ClassA);
    assert!(d.is_private);
}

#[test]
fn test_batch_one_valid_one_invalid() {
    let report = analyze_batch("192.168.1.0/24\n300.1.1.1/24");
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_full_workflow_with_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::open(dir.path().join("h.jsonl")).expect("open store");
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let report = analyze_batch(
        "10.0.0.0/30\n10.0.0.0/29\n10.0.0.0/28\n10.0.0.0/27\n10.0.0.0/26\n\
         10.0.0.0/25\n10.0.0.0/24\n10.0.0.0/23\n10.0.0.0/22\n10.0.0.0/21\nbad line\n",
    );
    assert_eq!(report.errors.len(), 1);
    for (i, d) in report.results.iter().enumerate() {
        store
            .append(d, start + Duration::seconds(i as i64))
            .expect("append");
    }

    let recent = store.list_recent(3).unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].input_text, "10.0.0.0/21");
    assert!(recent
        .windows(2)
        .all(|w| w[0].created_at >= w[1].created_at));

    let model = SizeModel::train(&store.all().unwrap(), Utc::now()).expect("train");
    assert_eq!(model.sample_count, 10);
    let model_path = dir.path().join("model.json");
    model.save(&model_path).unwrap();
    let loaded = SizeModel::load(&model_path).unwrap().expect("saved model");
    let prefix = loaded.predict_prefix(200).expect("prediction");
    assert!(prefix <= 32);

    assert_eq!(store.clear().unwrap(), 10);
    assert_eq!(store.clear().unwrap(), 0);
    assert!(store.list_recent(10).unwrap().is_empty());
}

#[test]
fn test_commands_end_to_end() {
    colored::control::set_override(false);
    let dir = tempfile::tempdir().unwrap();
    let config = temp_config(dir.path());

    let mut out = Vec::new();
    assert!(commands::run_calc(&config, "172.16.4.9/22", true, &mut out).unwrap());
    let mut out = Vec::new();
    assert!(!commands::run_batch(&config, "8.8.8.8\n::1/129\nfe80::1/64\n", true, &mut out).unwrap());
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Processed 2 IPs:"));
    assert!(text.contains("exceeds 128 bits"));

    let mut out = Vec::new();
    commands::run_history(&config, None, true, &mut out).unwrap();
    let csv = String::from_utf8(out).unwrap();
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.contains("172.16.4.0/22"));
    assert!(csv.contains("fe80::/64"));
}
