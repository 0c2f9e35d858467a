//! Syntax dump model consumed from an external syntax provider.
//!
//! A [`SyntaxDump`] describes one source file: its text, the classified token
//! spans of that text, and the declarations found in it. The engine never
//! tokenizes or parses source text itself.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Classification of a token span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenClass {
    /// Language keyword.
    Keyword,
    /// Plain identifier.
    Identifier,
    /// Identifier naming a type.
    TypeIdentifier,
    /// Numeric literal.
    Number,
    /// String literal.
    String,
    /// Attribute such as `@objc`.
    Attribute,
    /// Function parameter label.
    Parameter,
    /// Editor placeholder.
    Placeholder,
    /// Line or block comment.
    Comment,
    /// `MARK:`-style comment.
    CommentMark,
    /// URL inside a comment.
    CommentUrl,
    /// Documentation comment.
    DocComment,
    /// Field inside a documentation comment.
    DocCommentField,
    /// Anything else the provider reports.
    Other,
}

impl TokenClass {
    /// Returns true for every comment classification.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::Comment
                | Self::CommentMark
                | Self::CommentUrl
                | Self::DocComment
                | Self::DocCommentField
        )
    }
}

/// A classified byte span of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxToken {
    /// Byte offset of the token start.
    pub offset: usize,
    /// Length in bytes.
    pub length: usize,
    /// Token classification.
    pub kind: TokenClass,
}

impl SyntaxToken {
    /// Creates a new token.
    #[must_use]
    pub const fn new(offset: usize, length: usize, kind: TokenClass) -> Self {
        Self {
            offset,
            length,
            kind,
        }
    }
}

/// Function-like declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionKind {
    /// `unsafeAddress` accessor.
    AccessorAddress,
    /// `didSet` observer.
    AccessorDidSet,
    /// `get` accessor.
    AccessorGetter,
    /// `unsafeMutableAddress` accessor.
    AccessorMutableAddress,
    /// `set` accessor.
    AccessorSetter,
    /// `willSet` observer.
    AccessorWillSet,
    /// Initializer.
    Constructor,
    /// Deinitializer.
    Destructor,
    /// Free function.
    Free,
    /// `class func`.
    MethodClass,
    /// Instance method.
    MethodInstance,
    /// `static func`.
    MethodStatic,
    /// Operator function.
    Operator,
    /// Subscript.
    Subscript,
}

/// Type-like declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeKind {
    /// Class.
    Class,
    /// Struct.
    Struct,
    /// Enum.
    Enum,
    /// Single enum case.
    EnumElement,
    /// Type alias.
    Typealias,
    /// Protocol.
    Protocol,
    /// Extension.
    Extension,
    /// Associated type inside a protocol.
    AssociatedType,
}

/// Variable-like declaration kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariableKind {
    /// Local binding inside a body.
    Local,
    /// Top-level binding.
    Global,
    /// Instance property.
    Instance,
    /// `class var` property.
    Class,
    /// `static` property.
    Static,
    /// Function parameter.
    Parameter,
}

/// Category and subkind of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclarationKind {
    /// Function-like declaration.
    Function(FunctionKind),
    /// Type-like declaration.
    Type(TypeKind),
    /// Variable-like declaration.
    Variable(VariableKind),
}

/// One declaration reported by the syntax provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationRecord {
    /// Declaration category.
    pub kind: DeclarationKind,
    /// Declared name, absent for anonymous declarations.
    #[serde(default)]
    pub name: Option<String>,
    /// Byte offset of the declaration start.
    pub offset: usize,
    /// Byte offset of the body start.
    #[serde(default)]
    pub body_offset: Option<usize>,
    /// Body length in bytes.
    #[serde(default)]
    pub body_length: Option<usize>,
    /// Declared with private or fileprivate access.
    #[serde(default)]
    pub is_private: bool,
    /// Immutable binding (`let`).
    #[serde(default)]
    pub is_immutable: bool,
}

impl DeclarationRecord {
    /// Creates a record with only a kind and offset.
    #[must_use]
    pub fn new(kind: DeclarationKind, offset: usize) -> Self {
        Self {
            kind,
            name: None,
            offset,
            body_offset: None,
            body_length: None,
            is_private: false,
            is_immutable: false,
        }
    }

    /// Sets the declared name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the body byte span.
    #[must_use]
    pub fn with_body(mut self, offset: usize, length: usize) -> Self {
        self.body_offset = Some(offset);
        self.body_length = Some(length);
        self
    }

    /// Marks the declaration as private.
    #[must_use]
    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Marks the declaration as an immutable binding.
    #[must_use]
    pub fn immutable(mut self) -> Self {
        self.is_immutable = true;
        self
    }

    /// Returns the body span as `(offset, length)` when both are present.
    #[must_use]
    pub fn body(&self) -> Option<(usize, usize)> {
        self.body_offset.zip(self.body_length)
    }
}

/// Everything the syntax provider knows about one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyntaxDump {
    /// Path of the source file, used in reported locations.
    pub path: PathBuf,
    /// Full source text.
    pub contents: String,
    /// Classified token spans.
    #[serde(default)]
    pub tokens: Vec<SyntaxToken>,
    /// Declarations found in the file.
    #[serde(default)]
    pub declarations: Vec<DeclarationRecord>,
}

impl SyntaxDump {
    /// Parses a dump from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a dump.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Loads a dump from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, crate::analyzer::AnalyzerError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| crate::analyzer::AnalyzerError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
