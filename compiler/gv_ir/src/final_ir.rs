//! Final IR: assembly-mnemonic lines plus the bytes they encode to.

use std::fmt;

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct FinalProgram {
    pub source_file: String,
    /// One mnemonic, label (`name:`) or comment (`; …`) per line.
    pub lines: Vec<String>,
    /// Encoded instruction bytes. Empty until the program is assembled.
    pub bytes: Vec<u8>,
}

impl FinalProgram {
    pub fn new(source_file: impl Into<String>, lines: Vec<String>) -> Self {
        FinalProgram {
            source_file: source_file.into(),
            lines,
            bytes: Vec::new(),
        }
    }

    /// Same program with its encoded bytes attached.
    #[must_use]
    pub fn with_bytes(&self, bytes: Vec<u8>) -> FinalProgram {
        FinalProgram {
            source_file: self.source_file.clone(),
            lines: self.lines.clone(),
            bytes,
        }
    }
}

impl fmt::Display for FinalProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            if line.ends_with(':') || line.starts_with(';') {
                writeln!(f, "{line}")?;
            } else {
                writeln!(f, "    {line}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_indents_instructions() {
        let program = FinalProgram::new(
            "demo.pas",
            vec!["main:".to_string(), "LDA #5".to_string(), "; JMP main".to_string()],
        );
        assert_eq!(program.to_string(), "main:\n    LDA #5\n; JMP main\n");
    }

    #[test]
    fn with_bytes_leaves_original_empty() {
        let program = FinalProgram::new("demo.pas", vec!["LDA #5".to_string()]);
        let assembled = program.with_bytes(vec![0xA9, 0x05]);
        assert!(program.bytes.is_empty());
        assert_eq!(assembled.bytes, [0xA9, 0x05]);
        assert_eq!(assembled.lines, program.lines);
    }
}
