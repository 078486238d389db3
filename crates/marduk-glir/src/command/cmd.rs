use std::fmt;
use std::str::FromStr;

use crate::object::{GlirType, ObjectId};

/// Operation tag of a deferred GPU command.
///
/// Only `Create`, `Delete` and `Current` carry meaning inside this crate.
/// The remaining tags are passed through untouched for the executor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    Create,
    Delete,
    /// Context switch marker emitted when a canvas becomes current.
    Current,
    Func,
    Size,
    Data,
    Wrapping,
    Interpolation,
    Attribute,
    Uniform,
    Texture,
    Shaders,
    Draw,
    Attach,
    Framebuffer,
    Other(String),
}

impl Opcode {
    /// Canonical upper-case tag used in the replay stream.
    pub fn as_str(&self) -> &str {
        match self {
            Opcode::Create => "CREATE",
            Opcode::Delete => "DELETE",
            Opcode::Current => "CURRENT",
            Opcode::Func => "FUNC",
            Opcode::Size => "SIZE",
            Opcode::Data => "DATA",
            Opcode::Wrapping => "WRAPPING",
            Opcode::Interpolation => "INTERPOLATION",
            Opcode::Attribute => "ATTRIBUTE",
            Opcode::Uniform => "UNIFORM",
            Opcode::Texture => "TEXTURE",
            Opcode::Shaders => "SHADERS",
            Opcode::Draw => "DRAW",
            Opcode::Attach => "ATTACH",
            Opcode::Framebuffer => "FRAMEBUFFER",
            Opcode::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Opcode {
    type Err = std::convert::Infallible;

    /// Parses a tag. Unrecognized tags become [`Opcode::Other`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CREATE" => Opcode::Create,
            "DELETE" => Opcode::Delete,
            "CURRENT" => Opcode::Current,
            "FUNC" => Opcode::Func,
            "SIZE" => Opcode::Size,
            "DATA" => Opcode::Data,
            "WRAPPING" => Opcode::Wrapping,
            "INTERPOLATION" => Opcode::Interpolation,
            "ATTRIBUTE" => Opcode::Attribute,
            "UNIFORM" => Opcode::Uniform,
            "TEXTURE" => Opcode::Texture,
            "SHADERS" => Opcode::Shaders,
            "DRAW" => Opcode::Draw,
            "ATTACH" => Opcode::Attach,
            "FRAMEBUFFER" => Opcode::Framebuffer,
            other => Opcode::Other(other.to_string()),
        })
    }
}

impl From<&str> for Opcode {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

/// Opaque payload value. This crate never interprets these.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Type(GlirType),
    Bytes(Vec<u8>),
}

impl From<i64> for Arg {
    fn from(v: i64) -> Self {
        Arg::Int(v)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl From<bool> for Arg {
    fn from(v: bool) -> Self {
        Arg::Bool(v)
    }
}

impl From<&str> for Arg {
    fn from(v: &str) -> Self {
        Arg::Str(v.to_string())
    }
}

impl From<String> for Arg {
    fn from(v: String) -> Self {
        Arg::Str(v)
    }
}

impl From<GlirType> for Arg {
    fn from(v: GlirType) -> Self {
        Arg::Type(v)
    }
}

impl From<Vec<u8>> for Arg {
    fn from(v: Vec<u8>) -> Self {
        Arg::Bytes(v)
    }
}

/// A single deferred instruction: opcode + target object + payload.
///
/// Fields are private; a command is immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    opcode: Opcode,
    target: ObjectId,
    args: Vec<Arg>,
}

impl Command {
    pub fn new(opcode: impl Into<Opcode>, target: ObjectId, args: Vec<Arg>) -> Self {
        Self {
            opcode: opcode.into(),
            target,
            args,
        }
    }

    #[inline]
    pub fn opcode(&self) -> &Opcode {
        &self.opcode
    }

    #[inline]
    pub fn target(&self) -> ObjectId {
        self.target
    }

    #[inline]
    pub fn args(&self) -> &[Arg] {
        &self.args
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.opcode, self.target)?;
        for arg in &self.args {
            match arg {
                Arg::Int(v) => write!(f, " {v}")?,
                Arg::Float(v) => write!(f, " {v}")?,
                Arg::Bool(v) => write!(f, " {v}")?,
                Arg::Str(v) => write!(f, " {v:?}")?,
                Arg::Type(v) => write!(f, " {v}")?,
                Arg::Bytes(v) => write!(f, " <{} bytes>", v.len())?,
            }
        }
        Ok(())
    }
}
