use serde::Serialize;

use crate::ErrorKind;

/// The lexical context, which decides what the next characters mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Mode {
    /// Outside any object.
    #[default]
    FreeText,
    /// Inside an object, between the `@` and the field values.
    Header,
    /// Inside a double-quoted value.
    StringLiteral,
    /// Inside a brace-delimited value or a comment body.
    Content,
}

/// The kind of object currently being lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ObjectKind {
    #[default]
    None,
    Comment,
    StringDef,
    Preamble,
    Entry,
}

/// The complete state of the lexer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LexerState {
    pub mode: Mode,
    pub object: ObjectKind,
    /// Brace depth within the current object.
    pub depth: i32,
}

impl LexerState {
    /// The state immediately after the name of a new object.
    pub fn enter(object: ObjectKind) -> Self {
        Self {
            mode: Mode::Header,
            object,
            depth: 0,
        }
    }

    /// Whether the lexer is outside of any object.
    pub fn is_idle(&self) -> bool {
        self.mode == Mode::FreeText
    }

    pub fn with_mode(self, mode: Mode) -> Self {
        Self { mode, ..self }
    }

    /// The state after an opening brace.
    pub fn open(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }

    /// The state after a closing brace. The depth may become negative.
    pub fn close(self) -> Self {
        Self {
            depth: self.depth - 1,
            ..self
        }
    }
}

/// A lexical error detected by a mode handler, before recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub kind: ErrorKind,
    pub fragment: String,
    pub offset: usize,
    /// The fault is the `@` of the next object, which is left unconsumed.
    pub at_object: bool,
}

impl Fault {
    pub fn new(kind: ErrorKind, fragment: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            fragment: fragment.into(),
            offset,
            at_object: false,
        }
    }

    /// A fault detected at the end of input, which has no fragment.
    pub fn at_end(kind: ErrorKind, offset: usize) -> Self {
        Self::new(kind, String::new(), offset)
    }

    /// An object interrupted by the `@` at `offset`, which starts the next object.
    pub fn at_object(offset: usize) -> Self {
        Self {
            at_object: true,
            ..Self::new(ErrorKind::UnexpectedToken, "@", offset)
        }
    }
}
