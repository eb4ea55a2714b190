use crate::config::atomic_rename;
use crate::model::{SaveFile, Stats, SAVE_VERSION};
use anyhow::Result;
use chrono::Utc;
use std::{fs, path::Path};

/// Missing or malformed save files are silently absorbed: the pet simply
/// starts fresh.
pub(crate) fn load_or_init_save(path: &Path) -> Stats {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(save) = serde_json::from_str::<SaveFile>(&s) {
            return save.stats;
        }
    }
    Stats::new_default()
}

pub(crate) fn save_atomic(path: &Path, stats: &Stats) -> Result<()> {
    let save = SaveFile {
        version: SAVE_VERSION,
        last_seen_utc: Utc::now(),
        stats: stats.clone(),
    };
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(&save)?;
    fs::write(&tmp, data)?;
    atomic_rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("deskpet-{tag}-{}.json", std::process::id()))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let stats = load_or_init_save(Path::new("/nonexistent/deskpet/save.json"));
        assert_eq!(stats.level, 1);
        assert_eq!(stats.exp, 0);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let path = scratch_path("malformed");
        fs::write(&path, b"{ not json ").unwrap();
        let stats = load_or_init_save(&path);
        assert_eq!(stats.level, 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_round_trips_the_record() {
        let path = scratch_path("roundtrip");
        let mut stats = Stats::new_default();
        stats.name = "Pixel".to_string();
        stats.level = 4;
        stats.exp = 33;
        stats.hunger = 61.5;
        save_atomic(&path, &stats).unwrap();

        let loaded = load_or_init_save(&path);
        assert_eq!(loaded.name, "Pixel");
        assert_eq!(loaded.level, 4);
        assert_eq!(loaded.exp, 33);
        assert_eq!(loaded.hunger, 61.5);
        assert_eq!(loaded.birth_date, stats.birth_date);
        let _ = fs::remove_file(&path);
    }
}
