use std::fmt;

/// The eight instructions of the tape language.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Increment = 0,
    Decrement = 1,
    MoveRight = 2,
    MoveLeft = 3,
    Read = 4,
    Write = 5,
    LoopOpen = 6,
    LoopClose = 7,
}

impl Opcode {
    pub const COUNT: usize = 8;

    /// All opcodes in discriminant order.
    pub const ALL: [Opcode; Opcode::COUNT] = [
        Opcode::Increment,
        Opcode::Decrement,
        Opcode::MoveRight,
        Opcode::MoveLeft,
        Opcode::Read,
        Opcode::Write,
        Opcode::LoopOpen,
        Opcode::LoopClose,
    ];

    /// The classic one-character spelling (`+ - > < , . [ ]`).
    pub const fn symbol(self) -> char {
        match self {
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::MoveRight => '>',
            Opcode::MoveLeft => '<',
            Opcode::Read => ',',
            Opcode::Write => '.',
            Opcode::LoopOpen => '[',
            Opcode::LoopClose => ']',
        }
    }

    pub const fn is_loop(self) -> bool {
        matches!(self, Opcode::LoopOpen | Opcode::LoopClose)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_discriminant_order() {
        for (i, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(*op as usize, i);
        }
    }

    #[test]
    fn display_uses_symbols() {
        let rendered: String = Opcode::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, "+-><,.[]");
    }
}
