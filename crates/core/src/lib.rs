pub mod contract;
pub mod normalize;
pub mod render;
pub mod rule_set;
pub mod types;

// Re-export commonly used types
pub use contract::ThemeContract;
pub use render::{render_stylesheet, Stylesheet, DEFAULT_INDENT};
pub use rule_set::RuleSet;
pub use types::{Declaration, DeclarationKind, Diagnostic, DiagnosticLevel};
