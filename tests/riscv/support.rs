use std::path::PathBuf;

use decodegen::table::DecodeTable;

pub const EXCLUDED: &[&str] = &[
    "fence", "ecall", "ebreak", "csrrw", "csrrs", "csrrc", "csrrwi", "csrrsi", "csrrci",
];

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/rv32i.json")
}

pub fn fixture() -> String {
    std::fs::read_to_string(fixture_path()).expect("read rv32i fixture")
}

/// Reference consumer: first group whose masked word hits its sorted match list wins.
pub fn decode<'t>(table: &'t DecodeTable, word: u32) -> Option<&'t str> {
    table
        .groups()
        .iter()
        .find_map(|group| group.find(word & group.mask))
        .map(|entry| entry.name.as_str())
}
