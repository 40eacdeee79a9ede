//! Command names and the operations they run

use crate::error::ClientError;

/// Something the CLI can ask the backend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Reduce the token count of free text
    Optimize,
    /// Structured text to the compact representation
    EncodeStructured,
    /// Compact representation back to JSON
    DecodeStructured,
}

/// Every accepted command name, legacy aliases included
pub const COMMANDS: &[(&str, Operation)] = &[
    ("optimize", Operation::Optimize),
    ("optimize-structured", Operation::EncodeStructured),
    ("convert-to-toon", Operation::EncodeStructured),
    ("convert-to-compressed", Operation::EncodeStructured),
    ("decode-structured", Operation::DecodeStructured),
    ("convert-from-toon", Operation::DecodeStructured),
    ("convert-from-compressed", Operation::DecodeStructured),
];

impl Operation {
    /// Look up a command name
    pub fn from_name(name: &str) -> Result<Operation, ClientError> {
        COMMANDS
            .iter()
            .find(|(command, _)| *command == name)
            .map(|(_, op)| *op)
            .ok_or_else(|| ClientError::validation(format!("Unknown command: {}", name)))
    }

    /// Primary command name
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Optimize => "optimize",
            Operation::EncodeStructured => "optimize-structured",
            Operation::DecodeStructured => "decode-structured",
        }
    }

    /// Legacy names that also select this operation
    pub fn aliases(&self) -> impl Iterator<Item = &'static str> + '_ {
        COMMANDS
            .iter()
            .filter(move |(name, op)| op == self && *name != self.name())
            .map(|(name, _)| *name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Optimize => "Optimize text to reduce token usage",
            Operation::EncodeStructured => "Convert JSON/YAML/CSV into the compact format",
            Operation::DecodeStructured => "Convert the compact format back to JSON",
        }
    }
}

/// Help text listing every operation and its aliases
pub fn render_help() -> String {
    let mut help = String::from("Commands:\n");
    for op in [
        Operation::Optimize,
        Operation::EncodeStructured,
        Operation::DecodeStructured,
    ] {
        help.push_str(&format!("  {:<22} {}\n", op.name(), op.description()));
        let aliases: Vec<_> = op.aliases().collect();
        if !aliases.is_empty() {
            help.push_str(&format!("  {:<22} aliases: {}\n", "", aliases.join(", ")));
        }
    }
    help
}
