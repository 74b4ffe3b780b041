use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::Path;

const STATIC_DIR: &str = "static";

fn main() {
    println!("cargo:rerun-if-changed={STATIC_DIR}/");

    let mut hasher = DefaultHasher::new();

    let mut files: Vec<_> = fs::read_dir(STATIC_DIR)
        .map(|dir| dir.filter_map(|e| e.ok()).map(|e| e.path()).collect())
        .unwrap_or_default();
    files.sort();

    for path in files.iter().filter(|p| p.is_file()) {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        name.hash(&mut hasher);
        fs::read(Path::new(path)).unwrap_or_default().hash(&mut hasher);
    }

    let hash = format!("{:016x}", hasher.finish());
    println!("cargo:rustc-env=STATIC_HASH={}", &hash[..8]);
}
