//! The last applied ratings and fill color, kept between runs.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use standkit::{Argb, Ratings};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedState {
    pub ratings: Ratings,
    /// `None` until a color is picked; the config default applies meanwhile.
    pub fill_color: Option<Argb>,
}

impl SavedState {
    pub fn new(ratings: Ratings, fill_color: Option<Argb>) -> Self {
        Self {
            ratings,
            fill_color,
        }
    }

    pub fn fill_color_or(&self, default_color: Argb) -> Argb {
        self.fill_color.unwrap_or(default_color)
    }
}

impl Default for SavedState {
    fn default() -> Self {
        Self::new(Ratings::UNKNOWN, None)
    }
}

/// On-disk form. Ratings stay a plain digit string so a hand-edited or
/// truncated file still loads.
#[derive(Debug, Default, Deserialize, Serialize)]
struct StateFile {
    #[serde(default)]
    ratings: String,
    #[serde(default)]
    fill_color: Option<Argb>,
}

pub fn get_state_path() -> anyhow::Result<PathBuf> {
    let dirs = crate::config::project_dirs().context("Failed to determine data directory")?;
    Ok(dirs.data_dir().join("state.toml"))
}

fn decode(contents: &str) -> anyhow::Result<SavedState> {
    let file: StateFile = toml::from_str(contents).context("Malformed state file")?;
    Ok(SavedState::new(
        Ratings::from_compact_lossy(&file.ratings),
        file.fill_color,
    ))
}

fn encode(state: &SavedState) -> anyhow::Result<String> {
    let file = StateFile {
        ratings: state.ratings.to_string(),
        fill_color: state.fill_color,
    };
    Ok(toml::to_string(&file)?)
}

pub fn load_from(path: &Path) -> anyhow::Result<SavedState> {
    if !path.exists() {
        return Ok(SavedState::default());
    }
    let contents = fs_err::read_to_string(path)?;
    decode(&contents)
}

pub fn save_to(path: &Path, state: &SavedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, encode(state)?)?;
    Ok(())
}

/// Falls back to unknown ratings and no color when nothing usable is stored.
pub fn load() -> SavedState {
    match get_state_path().and_then(|path| load_from(&path)) {
        Ok(state) => state,
        Err(e) => {
            log::warn!("Ignoring saved state: {:#}", e);
            SavedState::default()
        }
    }
}

pub fn save(state: &SavedState) -> anyhow::Result<()> {
    let path = get_state_path()?;
    save_to(&path, state)?;
    log::info!("Saved {} / {:?} to {}", state.ratings, state.fill_color, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use standkit::{CategoryName, RatingLevel};

    #[test]
    fn test_missing_fields_fall_back() {
        let state = decode("").unwrap();
        assert_eq!(state, SavedState::default());
        assert_eq!(state.fill_color_or(Argb::MAGENTA), Argb::MAGENTA);
    }

    #[test]
    fn test_short_ratings_are_padded() {
        let state = decode("ratings = \"54\"\nfill_color = \"#FF00FF00\"").unwrap();
        assert_eq!(state.ratings.get(CategoryName::Potential), RatingLevel::A);
        assert_eq!(state.ratings.get(CategoryName::Power), RatingLevel::B);
        assert_eq!(state.ratings.get(CategoryName::Speed), RatingLevel::Unknown);
        assert_eq!(state.fill_color_or(Argb::MAGENTA), Argb::new(0xFF00_FF00));
    }

    #[test]
    fn test_bad_color_is_an_error() {
        assert!(decode("fill_color = \"teal\"").is_err());
    }

    #[test]
    fn test_encoded_form() {
        let state = SavedState::new("123456".parse().unwrap(), Some(Argb::new(0x40FF_0000)));
        let text = encode(&state).unwrap();
        assert!(text.contains("ratings = \"123456\""));
        assert!(text.contains("fill_color = \"#40FF0000\""));
        assert_eq!(decode(&text).unwrap(), state);
    }

    #[test]
    fn test_unpicked_color_is_not_written() {
        let state = SavedState::new("555555".parse().unwrap(), None);
        let text = encode(&state).unwrap();
        assert!(!text.contains("fill_color"));
        assert_eq!(decode(&text).unwrap().fill_color, None);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = std::env::temp_dir().join(format!("standstats-test-{}", std::process::id()));
        let path = dir.join("nested").join("state.toml");
        let state = SavedState::new("555555".parse().unwrap(), Some(Argb::BLACK));

        assert_eq!(load_from(&path).unwrap(), SavedState::default());
        save_to(&path, &state).unwrap();
        assert_eq!(load_from(&path).unwrap(), state);

        let _ = fs_err::remove_dir_all(&dir);
    }
}
