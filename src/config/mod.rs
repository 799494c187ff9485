use std::fs;
use std::path::{Path, PathBuf};
use log::info;
use serde::Deserialize;
use crate::common::{Error, Result};
use crate::trip::TripRecord;

const TOKYO_DISTRICTS: [&str; 23] = [
    "千代田区", "中央区", "港区", "新宿区", "文京区", "台東区", "墨田区", "江東区", "品川区",
    "目黒区", "大田区", "世田谷区", "渋谷区", "中野区", "杉並区", "豊島区", "北区", "荒川区",
    "板橋区", "練馬区", "足立区", "葛飾区", "江戸川区",
];

const PAYMENT_METHODS: [&str; 4] = ["現金", "クレジットカード", "電子マネー", "QRコード決済"];

/// Choices offered for district and payment method. Districts accept free text unless
/// `strict_districts` is set.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub districts: Vec<String>,
    pub payment_methods: Vec<String>,
    pub strict_districts: bool,
    pub strict_payment_methods: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            districts: TOKYO_DISTRICTS.iter().map(|s| s.to_string()).collect(),
            payment_methods: PAYMENT_METHODS.iter().map(|s| s.to_string()).collect(),
            strict_districts: false,
            strict_payment_methods: true,
        }
    }
}

impl Config {
    /// Falls back to the defaults if the file does not exist.
    pub fn load_from_file<P: AsRef<Path>>(file_path: P) -> Result<Config> {
        let path = file_path.as_ref();
        if !path.is_file() {
            info!("No config at {}, using default districts and payment methods", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str::<Config>(&content).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// `<config dir>/taxilog/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("taxilog").join("config.toml"))
    }

    /// Check district and payment method against the allow-lists that are enforced.
    pub fn check(&self, record: &TripRecord) -> Result<()> {
        if self.strict_districts && !self.districts.contains(&record.district) {
            return Err(Error::Validation(format!("unknown district '{}'", record.district)));
        }
        if self.strict_payment_methods && !self.payment_methods.contains(&record.payment_method) {
            return Err(Error::Validation(format!(
                "unknown payment method '{}', expected one of {}",
                record.payment_method,
                self.payment_methods.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use super::*;

    fn trip(district: &str, payment_method: &str) -> TripRecord {
        TripRecord::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(), district, "10:00", 1000, payment_method)
    }

    #[test]
    fn test_load() {
        let dir = TempDir::new().unwrap();

        let config = Config::load_from_file(dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.districts.len(), 23);

        let path = dir.path().join("config.toml");
        fs::write(&path, "districts = [\"梅田\", \"難波\"]\nstrict_districts = true\n").unwrap();
        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.districts, vec!["梅田".to_string(), "難波".to_string()]);
        assert!(config.strict_districts);
        assert_eq!(config.payment_methods.len(), 4);

        fs::write(&path, "districts = 12").unwrap();
        assert!(matches!(Config::load_from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_check() {
        let config = Config::default();
        assert!(config.check(&trip("港区", "現金")).is_ok());
        assert!(config.check(&trip("羽田空港", "現金")).is_ok());
        assert!(matches!(config.check(&trip("港区", "小切手")), Err(Error::Validation(_))));

        let config = Config { strict_districts: true, strict_payment_methods: false, ..Config::default() };
        assert!(matches!(config.check(&trip("羽田空港", "現金")), Err(Error::Validation(_))));
        assert!(config.check(&trip("港区", "小切手")).is_ok());
    }
}
