use pretty_assertions::assert_eq;

use decodegen::isa::IsaBuilder;
use decodegen::{CompilerConfig, Layout, TableCompiler, TableError, TargetKind};

use crate::support::{EXCLUDED, decode, fixture};

const ADD_ADDI: &str = r#"{"add":{"mask":"0xfe00707f","match":"0x33","variable_fields":["rd","rs1","rs2"]},"addi":{"mask":"0x707f","match":"0x13","variable_fields":["rd","rs1","imm12"]},"ecall":{"mask":"0xffffffff","match":"0x73","variable_fields":[]}}"#;

#[test]
fn renders_add_and_addi_for_zig() {
    let compiled = TableCompiler::default()
        .compile_str(ADD_ADDI)
        .expect("compile");
    let expected = "\
// Generated by decodegen. Do not edit.
// input sha256: e36e7b54534edbb7f9a13d6e2d91ba5ec2e2423b965c2a76a9e7ef18ab3083ef

const encodings: []const DecodingTable([]const InstructionEncoding) = &.{
    .{
        .mask = 0xfe00707f,
        .layout = .R,
        .table = &.{
            .{ .match = 0x00000033, .instruction = .add },
        },
    },
    .{
        .mask = 0x0000707f,
        .layout = .I,
        .table = &.{
            .{ .match = 0x00000013, .instruction = .addi },
        },
    },
};

const Instruction = enum {
    add,
    addi,
};
";
    assert_eq!(compiled.source, expected);
}

#[test]
fn renders_add_and_addi_for_rust() {
    let compiled = TableCompiler::new(CompilerConfig::new().with_target(TargetKind::Rust))
        .compile_str(ADD_ADDI)
        .expect("compile");
    let expected = "\
// Generated by decodegen. Do not edit.
// input sha256: e36e7b54534edbb7f9a13d6e2d91ba5ec2e2423b965c2a76a9e7ef18ab3083ef

pub const ENCODINGS: &[DecodingTable] = &[
    DecodingTable {
        mask: 0xfe00707f,
        layout: Layout::R,
        table: &[
            InstructionEncoding { match_value: 0x00000033, instruction: Instruction::add },
        ],
    },
    DecodingTable {
        mask: 0x0000707f,
        layout: Layout::I,
        table: &[
            InstructionEncoding { match_value: 0x00000013, instruction: Instruction::addi },
        ],
    },
];

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Instruction {
    add = 1,
    addi = 2,
}
";
    assert_eq!(compiled.source, expected);
}

#[test]
fn rv32i_groups_follow_first_seen_order() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    let keys: Vec<(u32, Layout)> = compiled
        .table
        .groups()
        .iter()
        .map(|group| (group.mask, group.layout))
        .collect();
    assert_eq!(
        keys,
        vec![
            (0x0000_007f, Layout::U),
            (0x0000_007f, Layout::J),
            (0x0000_707f, Layout::I),
            (0x0000_707f, Layout::B),
            (0x0000_707f, Layout::S),
            (0xfe00_707f, Layout::Unknown),
            (0xfe00_707f, Layout::R),
        ]
    );

    let r_group = compiled
        .table
        .group(0xfe00_707f, Layout::R)
        .expect("R group");
    let names: Vec<&str> = r_group.entries().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        ["add", "sll", "slt", "sltu", "xor", "srl", "or", "and", "sub", "sra"]
    );
}

#[test]
fn rv32i_groups_are_strictly_sorted() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    for group in compiled.table.groups() {
        assert!(
            group
                .entries()
                .windows(2)
                .all(|pair| pair[0].match_value < pair[1].match_value),
            "group mask 0x{:08x} layout {} is not strictly ascending",
            group.mask,
            group.layout
        );
    }
}

#[test]
fn rv32i_excludes_system_instructions() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    assert_eq!(compiled.enumeration.len(), 37);
    for name in EXCLUDED {
        assert!(!compiled.enumeration.contains(name), "{name} enumerated");
        assert!(!compiled.table.contains(name), "{name} in table");
    }
}

#[test]
fn rv32i_shift_immediates_are_unknown_with_diagnostics() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    let flagged: Vec<&str> = compiled
        .diagnostics
        .iter()
        .filter(|diag| diag.code == "classify.unknown-layout")
        .filter_map(|diag| diag.instruction.as_deref())
        .collect();
    assert_eq!(flagged, ["slli", "srli", "srai"]);
    assert_eq!(compiled.layout_of("srai"), Some(Layout::Unknown));
}

#[test]
fn rv32i_table_satisfies_decoder_contract() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    let table = &compiled.table;
    assert_eq!(decode(table, 0x00a5_0533), Some("add"));
    assert_eq!(decode(table, 0x40a5_0533), Some("sub"));
    assert_eq!(decode(table, 0x0000_0013), Some("addi"));
    assert_eq!(decode(table, 0xffdf_f06f), Some("jal"));
    assert_eq!(decode(table, 0x00a5_2023), Some("sw"));
    assert_eq!(decode(table, 0xfe00_0ee3), Some("beq"));
    assert_eq!(decode(table, 0x4055_5513), Some("srai"));
    assert_eq!(decode(table, 0x0000_0073), None, "ecall is filtered");
    assert_eq!(decode(table, 0x0000_007f), None);
}

#[test]
fn rv32i_zig_output_escapes_keywords() {
    let compiled = TableCompiler::default()
        .compile_str(&fixture())
        .expect("compile fixture");
    assert!(compiled.source.contains(".{ .match = 0x00007033, .instruction = .@\"and\" },"));
    assert!(compiled.source.contains("    @\"or\",\n"));
    assert!(compiled.source.contains("    xor,\n"));
}

#[test]
fn regenerating_is_byte_identical() {
    let src = fixture();
    for target in [TargetKind::Zig, TargetKind::Rust] {
        let compiler = TableCompiler::new(CompilerConfig::new().with_target(target));
        let first = compiler.compile_str(&src).expect("first run");
        let second = compiler.compile_str(&src).expect("second run");
        assert_eq!(first.source, second.source);
    }
}

#[test]
fn enumeration_ignores_document_order() {
    let forward = TableCompiler::default()
        .compile_str(ADD_ADDI)
        .expect("forward");
    let reversed = r#"{"ecall":{"mask":"0xffffffff","match":"0x73","variable_fields":[]},"addi":{"mask":"0x707f","match":"0x13","variable_fields":["rd","rs1","imm12"]},"add":{"mask":"0xfe00707f","match":"0x33","variable_fields":["rd","rs1","rs2"]}}"#;
    let backward = TableCompiler::default()
        .compile_str(reversed)
        .expect("backward");
    assert_eq!(forward.enumeration.names(), backward.enumeration.names());
}

#[test]
fn equal_mask_layout_and_match_fails_to_compile() {
    let mut builder = IsaBuilder::new();
    builder
        .instruction("add")
        .mask(0xfe00_707f)
        .match_value(0x33)
        .fields(["rd", "rs1", "rs2"])
        .finish();
    builder
        .instruction("add_alias")
        .mask(0xfe00_707f)
        .match_value(0x33)
        .fields(["rs2", "rs1", "rd"])
        .finish();
    let set = builder.build().expect("distinct names");
    match TableCompiler::default().compile_set(set, None) {
        Err(TableError::Ambiguity { conflicts }) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].instructions, ["add", "add_alias"]);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("duplicate match must not compile"),
    }
}

#[test]
fn builder_sets_compile_without_provenance() {
    let mut builder = IsaBuilder::new();
    builder
        .instruction("lui")
        .mask(0x7f)
        .match_value(0x37)
        .fields(["rd", "imm20"])
        .finish();
    let compiled = TableCompiler::default()
        .compile_set(builder.build().expect("set"), None)
        .expect("compile");
    assert!(!compiled.source.contains("sha256"));
    assert_eq!(compiled.layout_of("lui"), Some(Layout::U));
}

#[test]
fn compressed_entries_with_16_bit_encodings_compile() {
    let src = r#"{
        "c_addi": {
            "encoding": "000-----------01",
            "variable_fields": ["rd_rs1_n0", "c_nzimm6lo", "c_nzimm6hi"],
            "extension": ["rv_c"],
            "match": "0x1",
            "mask": "0xe003"
        },
        "addi": {
            "encoding": "-----------------000-----0010011",
            "variable_fields": ["rd", "rs1", "imm12"],
            "extension": ["rv_i"],
            "match": "0x13",
            "mask": "0x707f"
        }
    }"#;
    let compiled = TableCompiler::default().compile_str(src).expect("compile");
    assert_eq!(compiled.layout_of("c_addi"), Some(Layout::Unknown));
    let group = compiled
        .table
        .group(0x0000_e003, Layout::Unknown)
        .expect("c_addi group");
    assert_eq!(group.find(0x0001).map(|entry| entry.name.as_str()), Some("c_addi"));
    assert!(compiled.source.contains(".{ .match = 0x00000001, .instruction = .c_addi },"));
    assert!(compiled.source.contains("    c_addi,\n"));
}
