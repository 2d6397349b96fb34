use crate::halt;
use crate::vga_buffer::{Color, ColorCode, DisplayMemory, TextBuffer, BUFFER_CELLS};
use log::{debug, info};

/// Zero terminated. Everything from the first zero on is never displayed.
pub const MESSAGE: &[u8] = b"Hello, World!\0";

pub const ATTRIBUTE: ColorCode = ColorCode::new(Color::LightGray, Color::Black);

/// Number of bytes in `message` before its terminator.
pub const fn message_len(message: &[u8]) -> usize {
    let mut len = 0;
    while len < message.len() && message[len] != 0 {
        len += 1;
    }
    len
}

// The write loop itself never checks the buffer size.
const _: () = assert!(message_len(MESSAGE) <= BUFFER_CELLS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Writing,
    Halted,
}

/// Writes a terminated message into display memory one cell per step.
///
/// `Halted` is absorbing: once reached, `step` returns without touching memory.
pub struct Greeter<'m, M: DisplayMemory> {
    memory: M,
    message: &'m [u8],
    attribute: ColorCode,
    position: usize,
    state: State,
}

impl<'m, M: DisplayMemory> Greeter<'m, M> {
    pub fn new(memory: M, message: &'m [u8], attribute: ColorCode) -> Self {
        Self {
            memory,
            message,
            attribute,
            position: 0,
            state: State::Writing,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Cells written so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn step(&mut self) -> State {
        if self.state == State::Halted {
            return State::Halted;
        }

        match self.message.get(self.position) {
            Some(&character) if character != 0 => {
                self.memory
                    .write_cell(self.position, character, self.attribute.as_u8());
                self.position += 1;
            }
            _ => self.state = State::Halted,
        }

        self.state
    }

    /// Steps until the message is exhausted and returns the number of cells
    /// written.
    pub fn write_all(&mut self) -> usize {
        while self.step() == State::Writing {}
        self.position
    }

    pub fn into_memory(self) -> M {
        self.memory
    }
}

/// Runs the write phase of the greeting against `memory`.
pub fn write_greeting<M: DisplayMemory>(memory: M) -> usize {
    Greeter::new(memory, MESSAGE, ATTRIBUTE).write_all()
}

/// Shows the greeting on the VGA text buffer and parks the CPU.
pub fn run() -> ! {
    // Only view of the buffer for the rest of the kernel's life
    let vga = unsafe { TextBuffer::vga() };
    debug!("writing {} cells to {:?}", message_len(MESSAGE), vga);

    let written = write_greeting(vga);
    info!("wrote {} cells, halting", written);

    halt::park()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vga_buffer::BUFFER_WIDTH;

    /// Records every byte write as `(byte offset, value)`.
    pub struct RecordingMemory<const N: usize> {
        writes: [(usize, u8); N],
        len: usize,
    }

    impl<const N: usize> RecordingMemory<N> {
        pub fn new() -> Self {
            Self {
                writes: [(0, 0); N],
                len: 0,
            }
        }

        pub fn writes(&self) -> &[(usize, u8)] {
            &self.writes[..self.len]
        }

        fn record(&mut self, offset: usize, value: u8) {
            self.writes[self.len] = (offset, value);
            self.len += 1;
        }
    }

    impl<const N: usize> DisplayMemory for &mut RecordingMemory<N> {
        fn write_cell(&mut self, cell: usize, character: u8, attribute: u8) {
            self.record(cell * 2, character);
            self.record(cell * 2 + 1, attribute);
        }
    }

    const L: usize = 13;

    #[test_case]
    fn message_is_hello_world() {
        assert_eq!(message_len(MESSAGE), L);
        assert_eq!(&MESSAGE[..L], b"Hello, World!");
    }

    #[test_case]
    fn message_len_stops_at_first_zero() {
        assert_eq!(message_len(b"ab\0cd\0"), 2);
        assert_eq!(message_len(b"\0"), 0);
        assert_eq!(message_len(b""), 0);
        assert_eq!(message_len(b"abc"), 3);
    }

    #[test_case]
    fn characters_and_attributes_in_address_order() {
        let mut memory = RecordingMemory::<64>::new();
        assert_eq!(write_greeting(&mut memory), L);

        let writes = memory.writes();
        assert_eq!(writes.len(), 2 * L);
        for (i, &(offset, value)) in writes.iter().enumerate() {
            assert_eq!(offset, i);
            if i % 2 == 0 {
                assert_eq!(value, MESSAGE[i / 2]);
            } else {
                assert_eq!(value, 0x07);
            }
        }
    }

    #[test_case]
    fn terminator_is_not_written() {
        let mut memory = RecordingMemory::<64>::new();
        write_greeting(&mut memory);
        assert!(memory.writes().iter().all(|&(offset, _)| offset < 2 * L));
    }

    #[test_case]
    fn halted_state_is_absorbing() {
        let mut memory = RecordingMemory::<64>::new();
        let mut greeter = Greeter::new(&mut memory, MESSAGE, ATTRIBUTE);

        for _ in 0..L {
            assert_eq!(greeter.step(), State::Writing);
        }
        assert_eq!(greeter.position(), L);
        assert_eq!(greeter.step(), State::Halted);

        for _ in 0..1000 {
            assert_eq!(greeter.step(), State::Halted);
        }
        assert_eq!(greeter.position(), L);
        drop(greeter);
        assert_eq!(memory.writes().len(), 2 * L);
    }

    #[test_case]
    fn empty_message_halts_without_writing() {
        let mut memory = RecordingMemory::<4>::new();
        let mut greeter = Greeter::new(&mut memory, b"\0", ATTRIBUTE);
        assert_eq!(greeter.state(), State::Writing);
        assert_eq!(greeter.write_all(), 0);
        assert_eq!(greeter.state(), State::Halted);
        drop(greeter);
        assert!(memory.writes().is_empty());
    }

    #[test_case]
    fn unterminated_message_ends_at_slice_end() {
        let mut memory = RecordingMemory::<8>::new();
        let mut greeter = Greeter::new(&mut memory, b"ok", ATTRIBUTE);
        assert_eq!(greeter.write_all(), 2);
        drop(greeter);
        assert_eq!(memory.writes(), &[(0, b'o'), (1, 0x07), (2, b'k'), (3, 0x07)]);
    }

    #[test_case]
    fn greeting_fits_on_first_row() {
        let mut memory = RecordingMemory::<64>::new();
        write_greeting(&mut memory);
        let last_cell = memory.writes().last().map(|&(offset, _)| offset / 2);
        assert_eq!(last_cell, Some(L - 1));
        assert!(L <= BUFFER_WIDTH);
    }
}
