//! Loading composition sheets from disk.

use std::io::Write;

use horizon_lattice_classed::{ClassedSheet, Error, Props};

fn write_sheet(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_toml_file() {
    let file = write_sheet(
        ".toml",
        r#"
[card]
base = "section"
class = "rounded shadow"

[card.variants.padded]
true = "p-4"
false = "p-0"

[card.defaultVariants]
padded = true
"#,
    );

    let sheet = ClassedSheet::from_file(file.path()).unwrap();
    assert_eq!(sheet.source_path.as_deref(), Some(file.path()));

    let card = sheet.build("card").unwrap();
    let element = card.render(Props::new(), None);
    assert_eq!(element.tag, "section");
    assert_eq!(element.class_name, "rounded shadow p-4");

    let element = card.render(Props::new().with("padded", false), None);
    assert_eq!(element.class_name, "rounded shadow p-0");
}

#[test]
fn load_json_file() {
    let file = write_sheet(
        ".json",
        r#"{
            "pill": {
                "base": "span",
                "class": ["rounded-full", "px-2"],
                "variants": { "size": { "1": "text-xs", "2": "text-sm" } },
                "defaultVariants": { "size": 1 },
                "compoundVariants": [{ "size": 2, "className": "px-3" }]
            }
        }"#,
    );

    let sheet = ClassedSheet::from_file(file.path()).unwrap();
    let pill = sheet.build("pill").unwrap();

    assert_eq!(pill.class_name(&Props::new()), "rounded-full px-2 text-xs");
    assert_eq!(pill.class_name(&Props::new().with("size", 2)), "rounded-full px-2 text-sm px-3");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    match ClassedSheet::from_file(&missing) {
        Err(Error::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected io error, got {other:?}"),
    }
}
