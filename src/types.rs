use std::fmt::{self, Display};
use std::str::FromStr;

/// Type of information stored by an item (`value_type` on the wire).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueType {
    Float,
    Character,
    Log,
    Unsigned,
    Text,
}

impl ValueType {
    pub const fn from_zabbix(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Float),
            1 => Some(Self::Character),
            2 => Some(Self::Log),
            3 => Some(Self::Unsigned),
            4 => Some(Self::Text),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Character => "character",
            Self::Log => "log",
            Self::Unsigned => "unsigned",
            Self::Text => "text",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float" | "0" => Ok(Self::Float),
            "character" | "char" | "1" => Ok(Self::Character),
            "log" | "2" => Ok(Self::Log),
            "unsigned" | "uint" | "3" => Ok(Self::Unsigned),
            "text" | "4" => Ok(Self::Text),
            other => Err(format!("unknown value type: {other}")),
        }
    }
}
