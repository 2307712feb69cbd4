// Copyright 2025 the Splash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::{fs, fs::File, io::Read, path::Path};

use splash::QuarterTurn;

/// Where the kernel exposes the flattened device tree.
pub const DEVICE_TREE_ROOT: &str = "/proc/device-tree";

/// Find the display rotation in a device tree.
///
/// Searches `root` depth first for a property file named `rotation` holding a
/// 4-byte big-endian integer, and rounds it down to a quarter turn. Entries
/// starting with `.` are skipped. A rotation found directly in a directory
/// wins; one found in a subdirectory only counts when it isn't zero.
///
/// Anything unreadable, including a missing tree, means no rotation.
#[tracing::instrument(skip_all)]
pub fn display_rotation(root: impl AsRef<Path>) -> QuarterTurn {
    let degrees = search(root.as_ref());
    tracing::debug!(degrees, "display rotation");
    QuarterTurn::from_degrees(degrees)
}

fn search(dir: &Path) -> i32 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.as_encoded_bytes().first() == Some(&b'.') {
            continue;
        }
        let Ok(kind) = entry.file_type() else {
            continue;
        };
        let path = entry.path();
        if kind.is_dir() {
            let found = search(&path);
            if found != 0 {
                return found;
            }
        } else if name == "rotation" {
            if let Some(degrees) = read_rotation(&path) {
                tracing::trace!(path = %path.display(), degrees, "found rotation property");
                return degrees;
            }
        }
    }
    0
}

fn read_rotation(path: &Path) -> Option<i32> {
    let mut bytes = [0_u8; 4];
    File::open(path)
        .and_then(|mut f| f.read_exact(&mut bytes))
        .ok()?;
    Some(normalize(i32::from_be_bytes(bytes)))
}

/// Reduce to `[0, 360)` and round down to a multiple of 90.
fn normalize(raw: i32) -> i32 {
    raw.rem_euclid(360) / 90 * 90
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(root: &Path, rel: &str, value: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, value).unwrap();
    }

    #[test]
    fn finds_nested_rotation() {
        let dir = tempfile::tempdir().unwrap();
        property(dir.path(), "soc/dsi@ff450000/panel@0/rotation", &270_i32.to_be_bytes());
        assert_eq!(display_rotation(dir.path()), QuarterTurn::Deg270);
    }

    #[test]
    fn zero_in_subtree_keeps_searching() {
        let dir = tempfile::tempdir().unwrap();
        property(dir.path(), "panel0/rotation", &0_i32.to_be_bytes());
        property(dir.path(), "panel1/rotation", &90_i32.to_be_bytes());
        assert_eq!(display_rotation(dir.path()), QuarterTurn::Deg90);
    }

    #[test]
    fn hidden_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        property(dir.path(), ".cache/rotation", &180_i32.to_be_bytes());
        property(dir.path(), "panel/.rotation", &180_i32.to_be_bytes());
        assert_eq!(display_rotation(dir.path()), QuarterTurn::Deg0);
    }

    #[test]
    fn short_property_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        property(dir.path(), "panel/rotation", &[0, 90]);
        assert_eq!(display_rotation(dir.path()), QuarterTurn::Deg0);
    }

    #[test]
    fn missing_tree_means_no_rotation() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            display_rotation(dir.path().join("absent")),
            QuarterTurn::Deg0
        );
    }

    #[test]
    fn normalizes_odd_values() {
        assert_eq!(normalize(-90), 270);
        assert_eq!(normalize(100), 90);
        assert_eq!(normalize(720), 0);
        assert_eq!(normalize(359), 270);
    }
}
