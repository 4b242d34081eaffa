//! Player frame tables: the built-in sheet layout and a JSON loader.
//!
//! The animation system never loads image bytes; a frame table only names
//! source rectangles inside a sheet the backend has already loaded. The
//! built-in table mirrors the shipped player sheet. The JSON form exists so
//! art iterations do not require a recompile:
//!
//! ```json
//! {
//!   "version": "0.1",
//!   "states": {
//!     "walk": { "looping": true, "frames": [{ "x": 0, "y": 0, "w": 32, "h": 32 }] }
//!   }
//! }
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use bramble_core::animation::{FrameSet, FrameTable, SpriteRect};

use crate::player::PlayerState;

pub const FRAME_W: i32 = 32;
pub const FRAME_H: i32 = 32;

fn strip(row: i32, columns: &[i32]) -> Vec<SpriteRect> {
    columns
        .iter()
        .map(|&col| SpriteRect::new(col * FRAME_W, row * FRAME_H, FRAME_W, FRAME_H))
        .collect()
}

/// The player sheet layout: walk cycle on row 0, single idle/jump/fall poses
/// on row 1, the attack swing on row 2. Only the walk cycle loops.
pub fn player_frame_table() -> FrameTable<PlayerState> {
    let mut table = FrameTable::new();
    table.insert(
        PlayerState::Walk,
        FrameSet::new(strip(0, &[0, 1, 2, 3, 4, 5]), true),
    );
    table.insert(PlayerState::Idle, FrameSet::new(strip(1, &[0]), false));
    table.insert(PlayerState::Jump, FrameSet::new(strip(1, &[1]), false));
    table.insert(PlayerState::Fall, FrameSet::new(strip(1, &[2]), false));
    table.insert(
        PlayerState::Attack,
        FrameSet::new(strip(2, &[0, 1, 2, 3]), false),
    );
    table
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct FrameTableJson {
    version: String,
    states: HashMap<String, FrameSetJson>,
}

#[derive(Debug, Deserialize)]
struct FrameSetJson {
    frames: Vec<SpriteRect>,
    #[serde(default)]
    looping: bool,
}

fn parse_state_name(name: &str) -> Option<PlayerState> {
    match name {
        "idle" => Some(PlayerState::Idle),
        "walk" => Some(PlayerState::Walk),
        "jump" => Some(PlayerState::Jump),
        "fall" => Some(PlayerState::Fall),
        "attack" => Some(PlayerState::Attack),
        _ => None,
    }
}

/// Load a player frame table from a JSON file.
pub fn load_frame_table(path: &Path) -> Result<FrameTable<PlayerState>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("failed to read frame table {}: {e}", path.display()))?;
    let json: FrameTableJson = serde_json::from_str(&raw)
        .map_err(|e| format!("failed to parse frame table {}: {e}", path.display()))?;
    validate_frame_table_json(&json)?;

    let mut table = FrameTable::new();
    for (name, set) in json.states {
        let state = parse_state_name(&name).ok_or_else(|| {
            format!("frame table validation failed: unknown state '{name}'")
        })?;
        table.insert(state, FrameSet::new(set.frames, set.looping));
    }
    Ok(table)
}

fn validate_frame_table_json(json: &FrameTableJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "frame table validation failed: unsupported version '{}'",
            json.version
        ));
    }
    for (name, set) in &json.states {
        if set.frames.is_empty() {
            return Err(format!(
                "frame table validation failed: state '{name}' has no frames"
            ));
        }
        for (i, frame) in set.frames.iter().enumerate() {
            if frame.w <= 0 || frame.h <= 0 {
                return Err(format!(
                    "frame table validation failed: state '{name}' frame {i} has non-positive size"
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "bramble_frames_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn builtin_table_covers_every_state() {
        let table = player_frame_table();
        for state in [
            PlayerState::Idle,
            PlayerState::Walk,
            PlayerState::Jump,
            PlayerState::Fall,
            PlayerState::Attack,
        ] {
            assert!(table.contains_key(&state), "missing state {state:?}");
        }
        assert!(table[&PlayerState::Walk].looping);
        assert_eq!(table[&PlayerState::Walk].frames.len(), 6);
        assert!(!table[&PlayerState::Idle].looping);
    }

    #[test]
    fn load_frame_table_parses_valid_json() {
        let path = temp_file_path("valid");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "states": {
                "walk": {
                  "looping": true,
                  "frames": [
                    { "x": 0, "y": 0, "w": 32, "h": 32 },
                    { "x": 32, "y": 0, "w": 32, "h": 32 }
                  ]
                },
                "idle": {
                  "frames": [{ "x": 0, "y": 32, "w": 32, "h": 32 }]
                }
              }
            }"#,
        )
        .expect("write temp file");

        let table = load_frame_table(&path).expect("valid table should load");
        assert_eq!(table[&PlayerState::Walk].frames.len(), 2);
        assert!(table[&PlayerState::Walk].looping);
        assert!(!table[&PlayerState::Idle].looping);
        assert_eq!(
            table[&PlayerState::Idle].frames[0],
            SpriteRect::new(0, 32, 32, 32)
        );

        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_frame_table_rejects_unknown_state() {
        let path = temp_file_path("unknown_state");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "states": {
                "moonwalk": { "frames": [{ "x": 0, "y": 0, "w": 32, "h": 32 }] }
              }
            }"#,
        )
        .expect("write temp file");

        let err = load_frame_table(&path).expect_err("unknown state should fail");
        assert!(err.contains("unknown state 'moonwalk'"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_frame_table_rejects_empty_frames() {
        let path = temp_file_path("empty_frames");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "states": {
                "idle": { "frames": [] }
              }
            }"#,
        )
        .expect("write temp file");

        let err = load_frame_table(&path).expect_err("empty frames should fail");
        assert!(err.contains("has no frames"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_frame_table_rejects_non_positive_frame_size() {
        let path = temp_file_path("bad_size");
        fs::write(
            &path,
            r#"{
              "version": "0.1",
              "states": {
                "idle": { "frames": [{ "x": 0, "y": 0, "w": 0, "h": 32 }] }
              }
            }"#,
        )
        .expect("write temp file");

        let err = load_frame_table(&path).expect_err("zero-width frame should fail");
        assert!(err.contains("non-positive size"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn load_frame_table_rejects_bad_version() {
        let path = temp_file_path("bad_version");
        fs::write(
            &path,
            r#"{ "version": "9.9", "states": {} }"#,
        )
        .expect("write temp file");

        let err = load_frame_table(&path).expect_err("bad version should fail");
        assert!(err.contains("unsupported version"));
        let _ = fs::remove_file(path);
    }
}
