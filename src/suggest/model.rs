//! Subnet size suggestion from stored history.
//!
//! The regression maps usable host count to prefix length. The exact relationship is
//! `32 - ceil(log2(hosts + 2))`, exposed as [`closed_form_prefix`] and printed next to
//! the model's answer.

use super::regression::PolynomialFit;
use crate::error::SuggestError;
use crate::models::{ipv4, AddressCount, HistoryRecord, IpVersion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Fewest history rows accepted for training.
pub const MIN_TRAINING_ROWS: usize = 10;

/// Newest history rows considered for training.
pub const TRAINING_WINDOW: usize = 1000;

const IPV4_WIDTH: u8 = 32;

/// A prefix length together with the block size it gives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub prefix_length: u8,
    pub total_addresses: u64,
    pub usable_hosts: u64,
}

impl Suggestion {
    /// `None` when `prefix_length` is wider than IPv4.
    pub fn for_prefix(prefix_length: u8) -> Option<Suggestion> {
        if prefix_length > IPV4_WIDTH {
            return None;
        }
        let total_addresses = 1u64 << (IPV4_WIDTH - prefix_length);
        let usable_hosts = if ipv4::has_reserved_ends(prefix_length) {
            total_addresses - 2
        } else {
            total_addresses
        };
        Some(Suggestion {
            prefix_length,
            total_addresses,
            usable_hosts,
        })
    }
}

/// Smallest IPv4 prefix with room for `hosts` plus network and broadcast.
///
/// # Examples
/// ```
/// use subnet_calc::suggest::closed_form_prefix;
/// assert_eq!(closed_form_prefix(254), Some(24));
/// assert_eq!(closed_form_prefix(255), Some(23));
/// ```
pub fn closed_form_prefix(hosts: u64) -> Option<u8> {
    let needed = hosts.checked_add(2)?;
    // ceil(log2(needed)) for needed >= 2
    let bits = (u64::BITS - (needed - 1).leading_zeros()) as u8;
    IPV4_WIDTH.checked_sub(bits)
}

/// Fitted host-count to prefix-length model with an explicit train/save/load lifecycle.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SizeModel {
    pub fit: PolynomialFit,
    /// Rows used for the fit.
    pub sample_count: usize,
    pub trained_at: DateTime<Utc>,
}

impl SizeModel {
    /// Fit on IPv4 history rows that have at least one usable host.
    pub fn train(
        records: &[HistoryRecord],
        trained_at: DateTime<Utc>,
    ) -> Result<SizeModel, SuggestError> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = records
            .iter()
            .filter(|r| r.ip_version == IpVersion::V4)
            .filter(|r| r.usable_host_count > AddressCount::Exact(0))
            .map(|r| (r.usable_host_count.as_f64(), r.prefix_length as f64))
            .unzip();

        if xs.len() < MIN_TRAINING_ROWS {
            return Err(SuggestError::NotEnoughData {
                found: xs.len(),
                needed: MIN_TRAINING_ROWS,
            });
        }
        let fit = PolynomialFit::fit(&xs, &ys)?;
        log::info!(
            "Trained size model on {} rows: coefficients={:?}",
            xs.len(),
            fit.coefficients
        );
        Ok(SizeModel {
            fit,
            sample_count: xs.len(),
            trained_at,
        })
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn Error>> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Error serializing model: {e}"))?;
        fs::write(path, json)
            .map_err(|e| format!("Error writing model file {}: {e}", path.display()))?;
        log::info!("Wrote model to {}", path.display());
        Ok(())
    }

    /// Read a saved model. A missing file is `Ok(None)`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<SizeModel>, Box<dyn Error>> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No model file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let mut deserializer = serde_json::Deserializer::from_str(&json);
        let model: SizeModel = serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            format!(
                "Error parsing model file {}: ErrPath:{} e:{}",
                path.display(),
                e.path(),
                e.inner()
            )
        })?;
        Ok(Some(model))
    }

    /// Rounded model output clamped to 0..=32. `None` if the model produces NaN.
    pub fn predict_prefix(&self, hosts: u64) -> Option<u8> {
        let raw = self.fit.predict(hosts as f64);
        if raw.is_nan() {
            return None;
        }
        Some(raw.round_ties_even().clamp(0.0, IPV4_WIDTH as f64) as u8)
    }

    pub fn suggest(&self, hosts: u64) -> Option<Suggestion> {
        self.predict_prefix(hosts).and_then(Suggestion::for_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::parse_and_classify;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn records(inputs: &[&str]) -> Vec<HistoryRecord> {
        inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                let d = parse_and_classify(input).unwrap();
                HistoryRecord::from_descriptor(i as u64 + 1, &d, now())
            })
            .collect()
    }

    fn training_set() -> Vec<HistoryRecord> {
        records(&[
            "10.0.0.0/30",
            "10.0.0.0/29",
            "10.0.0.0/28",
            "10.0.0.0/27",
            "10.0.0.0/26",
            "10.0.0.0/25",
            "10.0.0.0/24",
            "10.0.0.0/23",
            "10.0.0.0/22",
            "10.0.0.0/21",
            "10.0.0.0/20",
            "2001:db8::/64",
        ])
    }

    #[test]
    fn test_closed_form_prefix() {
        assert_eq!(closed_form_prefix(0), Some(31));
        assert_eq!(closed_form_prefix(1), Some(30));
        assert_eq!(closed_form_prefix(2), Some(30));
        assert_eq!(closed_form_prefix(3), Some(29));
        assert_eq!(closed_form_prefix(254), Some(24));
        assert_eq!(closed_form_prefix(255), Some(23));
        assert_eq!(closed_form_prefix(65534), Some(16));
        assert_eq!(closed_form_prefix((1u64 << 32) - 2), Some(0));
        assert_eq!(closed_form_prefix((1u64 << 32) - 1), None);
        assert_eq!(closed_form_prefix(u64::MAX), None);
    }

    #[test]
    fn test_suggestion_for_prefix() {
        let s = Suggestion::for_prefix(24).unwrap();
        assert_eq!(s.total_addresses, 256);
        assert_eq!(s.usable_hosts, 254);
        assert_eq!(Suggestion::for_prefix(31).unwrap().usable_hosts, 2);
        assert_eq!(Suggestion::for_prefix(0).unwrap().total_addresses, 1 << 32);
        assert!(Suggestion::for_prefix(33).is_none());
    }

    #[test]
    fn test_train_needs_ten_rows() {
        let few = records(&["10.0.0.0/24", "10.0.0.0/25", "10.0.0.0/26"]);
        assert!(matches!(
            SizeModel::train(&few, now()),
            Err(SuggestError::NotEnoughData { found: 3, needed: 10 })
        ));
    }

    #[test]
    fn test_train_skips_ipv6_and_empty_blocks() {
        let model = SizeModel::train(&training_set(), now()).unwrap();
        assert_eq!(model.sample_count, 11);
    }

    #[test]
    fn test_train_on_one_subnet_size() {
        let model = SizeModel::train(&records(&["192.168.1.0/24"; 12]), now()).unwrap();
        assert_eq!(model.predict_prefix(254), Some(24));
        assert_eq!(model.predict_prefix(10), Some(24));
    }

    #[test]
    fn test_train_on_two_subnet_sizes() {
        let mut inputs = vec!["192.168.1.0/24"; 12];
        inputs.extend(["10.0.0.0/16"; 5]);
        let model = SizeModel::train(&records(&inputs), now()).unwrap();
        assert_eq!(model.predict_prefix(254), Some(24));
        assert_eq!(model.predict_prefix(65534), Some(16));
    }

    #[test]
    fn test_prediction_is_clamped() {
        let model = SizeModel::train(&training_set(), now()).unwrap();
        for hosts in [1u64, 50, 254, 3000, 1 << 20, u32::MAX as u64] {
            let prefix = model.predict_prefix(hosts).unwrap();
            assert!(prefix <= 32, "hosts={hosts} prefix={prefix}");
        }
        let s = model.suggest(100).unwrap();
        assert_eq!(Suggestion::for_prefix(s.prefix_length), Some(s));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        assert_eq!(SizeModel::load(&path).unwrap(), None);

        let model = SizeModel::train(&training_set(), now()).unwrap();
        model.save(&path).unwrap();
        let loaded = SizeModel::load(&path).unwrap().unwrap();
        assert_eq!(loaded, model);
        assert_eq!(loaded.predict_prefix(254), model.predict_prefix(254));
    }

    #[test]
    fn test_load_corrupt_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{\"fit\": 1}").unwrap();
        let err = SizeModel::load(&path).unwrap_err().to_string();
        assert!(err.contains("fit"), "{err}");
    }
}
