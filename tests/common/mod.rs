#![allow(dead_code)]

use camino::{Utf8Path, Utf8PathBuf};
use mod_switch_lib::models::mod_dto::{Mod, ModType};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Temp sandbox with an empty game root and a folder for archives.
pub fn setup_test_env() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();

    let game_root = root.join("game");
    let archives = root.join("archives");

    fs::create_dir_all(&game_root).unwrap();
    fs::create_dir_all(&archives).unwrap();

    (tmp, game_root, archives)
}

/// Writes a zip at `path`. Names ending in `/` become directory entries.
pub fn build_zip(path: &Utf8Path, entries: &[(&str, &str)]) {
    write_zip(path, entries, SimpleFileOptions::default());
}

/// Like [`build_zip`] but uncompressed, so entry bytes appear verbatim in the file.
pub fn build_stored_zip(path: &Utf8Path, entries: &[(&str, &str)]) {
    write_zip(
        path,
        entries,
        SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
    );
}

fn write_zip(path: &Utf8Path, entries: &[(&str, &str)], options: SimpleFileOptions) {
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());

    for (name, content) in entries {
        if name.ends_with('/') {
            zip.add_directory(*name, options).unwrap();
        } else {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
    }

    zip.finish().unwrap();
}

/// Flips one byte inside the first occurrence of `needle` in the file.
pub fn corrupt_bytes(path: &Utf8Path, needle: &str) {
    let mut bytes = fs::read(path).unwrap();
    let at = bytes
        .windows(needle.len())
        .position(|w| w == needle.as_bytes())
        .expect("needle not found in archive");
    bytes[at + needle.len() / 2] ^= 0xff;
    fs::write(path, bytes).unwrap();
}

/// Writes a 7z at `path` from the given files. Names ending in `/` become empty directories.
pub fn build_7z(path: &Utf8Path, entries: &[(&str, &str)]) {
    let staging = tempfile::tempdir().unwrap();
    let root = Utf8Path::from_path(staging.path()).unwrap();

    for (name, content) in entries {
        if name.ends_with('/') {
            fs::create_dir_all(root.join(name)).unwrap();
        } else {
            write_file(&root.join(name), content);
        }
    }

    sevenz_rust::compress_to_path(root, path).unwrap();
}

pub fn test_mod(name: &str, archive: &Utf8Path, mod_type: ModType, enabled: bool) -> Mod {
    Mod {
        name: name.to_string(),
        archive_path: archive.to_owned(),
        mod_type,
        enabled,
    }
}

/// Every file and directory below `root`, relative and `/`-separated.
pub fn snapshot(root: &Utf8Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let path = Utf8PathBuf::from_path_buf(e.path().to_path_buf()).ok()?;
            let rel = path.strip_prefix(root).ok()?;
            Some(rel.components().map(|c| c.as_str()).collect::<Vec<_>>().join("/"))
        })
        .collect()
}

pub fn write_file(path: &Utf8Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
