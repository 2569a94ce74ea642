//! Configuration types deserialized from `regscan.toml`.

use serde::{Deserialize, Serialize};

/// The top-level configuration parsed from `regscan.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    /// How the external syntax tool is invoked.
    #[serde(default)]
    pub tool: ToolConfig,
    /// File discovery and parallelism settings.
    #[serde(default)]
    pub scan: ScanSettings,
    /// Result cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Tree vocabulary used when walking the tool's dump.
    #[serde(default)]
    pub tags: TagConfig,
}

/// Invocation of the external tree-printing tool.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable name or path.
    pub program: String,
    /// Flags passed before the file path.
    pub args: Vec<String>,
    /// Seconds to wait for the tool before killing it.
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "verible-verilog-syntax".to_string(),
            args: vec!["--printtree".to_string()],
            timeout_secs: 30,
        }
    }
}

/// Source discovery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// File extensions (without the dot) that are analyzed.
    pub extensions: Vec<String>,
    /// Whether directories are descended into by default.
    pub recursive: bool,
    /// Worker threads for the file loop; `0` lets rayon decide.
    pub jobs: usize,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            extensions: ["v", "sv", "vh", "svh"].map(String::from).to_vec(),
            recursive: true,
            jobs: 0,
        }
    }
}

impl ScanSettings {
    /// Returns `true` if `ext` is one of the configured source extensions.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Result cache settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether cached per-file results are consulted and stored.
    pub enabled: bool,
    /// Cache directory, relative to the configuration file's directory.
    pub dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: ".regscan-cache".to_string(),
        }
    }
}

/// Grammar tags recognized in the tool's tree dump.
///
/// Defaults follow the `verible-verilog-syntax` concrete syntax tree. Fields
/// holding a list accept any of the listed tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Module declaration nodes.
    pub module_declaration: Vec<String>,
    /// The module header node holding the name and ANSI port list.
    pub module_header: String,
    /// Text of the module keyword leaf, never taken as a module name.
    pub module_keyword: String,
    /// Leaf tags of identifiers.
    pub identifier: Vec<String>,
    /// Leaf tags of plain numeric literals.
    pub numeric_literal: Vec<String>,
    /// Data (net and variable) declaration nodes.
    pub data_declaration: Vec<String>,
    /// Port declaration nodes, in the header or the module body.
    pub port_declaration: Vec<String>,
    /// Packed dimension nodes (`[7:0]` before the name).
    pub packed_dimensions: String,
    /// Unpacked dimension nodes (`[0:255]` after the name).
    pub unpacked_dimensions: String,
    /// Variable declarator nodes inside a data declaration.
    pub variable_declarator: Vec<String>,
    /// Procedural (always-style) block nodes.
    pub procedural_block: Vec<String>,
    /// Event control nodes (`@(...)`).
    pub event_control: Vec<String>,
    /// Blocking and non-blocking assignment statement nodes.
    pub assignment: Vec<String>,
    /// Left-hand side node of an assignment.
    pub assignment_lhs: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        fn tags(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            module_declaration: tags(&["kModuleDeclaration"]),
            module_header: "kModuleHeader".to_string(),
            module_keyword: "module".to_string(),
            identifier: tags(&["SymbolIdentifier", "EscapedIdentifier"]),
            numeric_literal: tags(&["TK_DecNumber"]),
            data_declaration: tags(&["kDataDeclaration"]),
            port_declaration: tags(&["kPortDeclaration", "kModulePortDeclaration"]),
            packed_dimensions: "kPackedDimensions".to_string(),
            unpacked_dimensions: "kUnpackedDimensions".to_string(),
            variable_declarator: tags(&["kRegisterVariable", "kVariableDeclarationAssignment"]),
            procedural_block: tags(&["kAlwaysStatement"]),
            event_control: tags(&["kEventControl"]),
            assignment: tags(&[
                "kNonblockingAssignmentStatement",
                "kBlockingAssignmentStatement",
                "kNetVariableAssignment",
            ]),
            assignment_lhs: "kLPValue".to_string(),
        }
    }
}

impl TagConfig {
    /// Returns `true` if `tag` names an identifier leaf.
    pub fn is_identifier(&self, tag: &str) -> bool {
        self.identifier.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a numeric literal leaf.
    pub fn is_numeric_literal(&self, tag: &str) -> bool {
        self.numeric_literal.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a dimension node (packed or unpacked).
    pub fn is_dimension(&self, tag: &str) -> bool {
        tag == self.packed_dimensions || tag == self.unpacked_dimensions
    }

    /// Returns `true` if `tag` names a module declaration node.
    pub fn is_module_declaration(&self, tag: &str) -> bool {
        self.module_declaration.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a data declaration node.
    pub fn is_data_declaration(&self, tag: &str) -> bool {
        self.data_declaration.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a port declaration node.
    pub fn is_port_declaration(&self, tag: &str) -> bool {
        self.port_declaration.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a variable declarator node.
    pub fn is_variable_declarator(&self, tag: &str) -> bool {
        self.variable_declarator.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names a procedural block node.
    pub fn is_procedural_block(&self, tag: &str) -> bool {
        self.procedural_block.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names an event control node.
    pub fn is_event_control(&self, tag: &str) -> bool {
        self.event_control.iter().any(|t| t == tag)
    }

    /// Returns `true` if `tag` names an assignment statement node.
    pub fn is_assignment(&self, tag: &str) -> bool {
        self.assignment.iter().any(|t| t == tag)
    }

    /// Lists every required tag field with its name, for validation.
    pub(crate) fn named_fields(&self) -> Vec<(&'static str, Vec<&str>)> {
        fn all(v: &[String]) -> Vec<&str> {
            v.iter().map(String::as_str).collect()
        }
        vec![
            ("tags.module_declaration", all(&self.module_declaration)),
            ("tags.module_header", vec![self.module_header.as_str()]),
            ("tags.module_keyword", vec![self.module_keyword.as_str()]),
            ("tags.identifier", all(&self.identifier)),
            ("tags.numeric_literal", all(&self.numeric_literal)),
            ("tags.data_declaration", all(&self.data_declaration)),
            ("tags.port_declaration", all(&self.port_declaration)),
            ("tags.packed_dimensions", vec![self.packed_dimensions.as_str()]),
            ("tags.variable_declarator", all(&self.variable_declarator)),
            ("tags.procedural_block", all(&self.procedural_block)),
            ("tags.event_control", all(&self.event_control)),
            ("tags.assignment", all(&self.assignment)),
            ("tags.assignment_lhs", vec![self.assignment_lhs.as_str()]),
        ]
    }
}
