//! Instruction records and the stages that inspect them before grouping: filtering,
//! validation, and layout classification.

pub mod builder;
pub mod diagnostic;
pub mod error;
pub mod filter;
pub mod layout;
pub mod spec;
pub mod validator;

pub use builder::IsaBuilder;
pub use diagnostic::{DiagnosticLevel, DiagnosticPhase, TableDiagnostic};
pub use error::{MatchConflict, TableError};
pub use filter::MnemonicFilter;
pub use layout::{Layout, LayoutClassifier};
pub use spec::{FieldSet, InstructionSet, InstructionSpec};
pub use validator::Validator;
