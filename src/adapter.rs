use braintwist_gen::Generator;
use braintwist_tape::Opcode;

/// Opcode for each value of the low three bits of a generated number.
///
/// Existing programs were found by searching for seeds under this exact order; changing it
/// changes what every program does.
pub const OPCODE_TABLE: [Opcode; 8] = [
    Opcode::Increment,
    Opcode::Decrement,
    Opcode::MoveRight,
    Opcode::MoveLeft,
    Opcode::Read,
    Opcode::Write,
    Opcode::LoopOpen,
    Opcode::LoopClose,
];

#[inline]
pub fn decode(value: u64) -> Opcode {
    OPCODE_TABLE[(value & 0b111) as usize]
}

#[inline]
pub fn next_opcode(generator: &mut Generator) -> Opcode {
    decode(generator.generate())
}

/// Endless opcode stream drawn from a generator, one value per opcode.
#[derive(Debug, Clone)]
pub struct Opcodes {
    generator: Generator,
}

impl Opcodes {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn into_generator(self) -> Generator {
        self.generator
    }
}

impl Iterator for Opcodes {
    type Item = Opcode;

    #[inline]
    fn next(&mut self) -> Option<Opcode> {
        Some(next_opcode(&mut self.generator))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
