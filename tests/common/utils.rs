use element_picker::catalog::catalog_model::{Catalog, Element};

pub fn fixture(name: &str) -> String {
    let base = std::env::current_dir().unwrap();
    let path = base.join("tests").join("fixtures").join(name);

    path.display().to_string()
}

/// Build a catalog from `(id, name, group)` triples.
pub fn catalog_of(entries: &[(&str, &str, &str)]) -> Catalog {
    let elements = entries
        .iter()
        .map(|(id, name, group)| Element::new(id, name, group));
    Catalog::from_elements(elements).0
}

/// `knowledge: k1/A, k2/B, k3/C`
pub fn three_knowledge() -> Catalog {
    catalog_of(&[
        ("k1", "A", "knowledge"),
        ("k2", "B", "knowledge"),
        ("k3", "C", "knowledge"),
    ])
}

/// Several groups of different sizes, ids unique across groups.
pub fn mixed_catalog() -> Catalog {
    let mut entries: Vec<(String, String, String)> = Vec::new();
    for i in 0..13 {
        entries.push((format!("k{}", i), format!("Knowledge {}", i), "knowledge".into()));
    }
    for i in 0..5 {
        entries.push((format!("s{}", i), format!("Skill {}", i), "skills".into()));
    }
    entries.push(("u0".into(), String::new(), "unknown".into()));

    let elements = entries
        .iter()
        .map(|(id, name, group)| Element::new(id, name, group));
    Catalog::from_elements(elements).0
}

/// A unique file path under the system temp dir.
pub fn temp_path(name: &str) -> String {
    let dir = std::env::temp_dir().join(format!("element-picker-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path.display().to_string()
}
