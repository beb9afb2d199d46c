//! Opcode Definitions
//!
//! The static set of built-in operations, keyed by mnemonic.
//! This file contains no execution semantics. Any mnemonic not listed here
//! is offered to the loaded keyword extensions.

/// Built-in opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCode {
    // Stack
    Push,
    Clear,
    Print,

    // Symbols
    Store,
    Load,
    LoadArg,

    // Arithmetic
    Add,
    Sub,
    Mult,
    Div,

    // Conversion
    Str,
    Float,
    Bool,
    StrCat,

    // Comparison
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,

    // Logic
    Not,
    And,
    Or,

    // Arrays
    MakeArray,
    Split,
    Join,
    Append,
    Len,
    Remove,

    // Random
    RandInt,
    RandFloat,

    // Functions
    Func,
    EndFunc,
    Run,

    // Modules
    Import,
    ModStore,
    ModGet,
    ModRun,

    // Keyword extensions
    KeyPort,

    // Comments
    Comment,
    CommentStart,
    CommentEnd,

    // System
    DelaySt,
    Exit,
}

impl OpCode {
    /// Convert a mnemonic to an opcode
    pub fn from_mnemonic(op: &str) -> Option<Self> {
        match op {
            "PUSH" => Some(OpCode::Push),
            "CLEAR" => Some(OpCode::Clear),
            "PRINT" => Some(OpCode::Print),

            "STORE" => Some(OpCode::Store),
            "LOAD" => Some(OpCode::Load),
            "LOADARG" => Some(OpCode::LoadArg),

            "ADD" => Some(OpCode::Add),
            "SUB" => Some(OpCode::Sub),
            "MULT" => Some(OpCode::Mult),
            "DIV" => Some(OpCode::Div),

            "STR" => Some(OpCode::Str),
            "FLOAT" => Some(OpCode::Float),
            "BOOL" => Some(OpCode::Bool),
            "STRCAT" => Some(OpCode::StrCat),

            "EQ" => Some(OpCode::Eq),
            "NEQ" => Some(OpCode::Neq),
            "GT" => Some(OpCode::Gt),
            "GTE" => Some(OpCode::Gte),
            "LT" => Some(OpCode::Lt),
            "LTE" => Some(OpCode::Lte),

            "NOT" => Some(OpCode::Not),
            "AND" => Some(OpCode::And),
            "OR" => Some(OpCode::Or),

            "MAKEARRAY" => Some(OpCode::MakeArray),
            "SPLIT" => Some(OpCode::Split),
            "JOIN" => Some(OpCode::Join),
            "APPEND" => Some(OpCode::Append),
            "LEN" => Some(OpCode::Len),
            "REMOVE" => Some(OpCode::Remove),

            "RANDINT" => Some(OpCode::RandInt),
            "RANDFLOAT" => Some(OpCode::RandFloat),

            "FUNC" => Some(OpCode::Func),
            "ENDFUNC" => Some(OpCode::EndFunc),
            "RUN" => Some(OpCode::Run),

            "IMPORT" => Some(OpCode::Import),
            "MODSTORE" => Some(OpCode::ModStore),
            "MODGET" => Some(OpCode::ModGet),
            "MODRUN" => Some(OpCode::ModRun),

            "KEYPORT" => Some(OpCode::KeyPort),

            "COMM" | "//" => Some(OpCode::Comment),
            "MCOMM" | "/*" => Some(OpCode::CommentStart),
            "ENDCOMM" | "*/" => Some(OpCode::CommentEnd),

            "DELAYST" => Some(OpCode::DelaySt),
            "EXIT" => Some(OpCode::Exit),

            _ => None,
        }
    }
}
