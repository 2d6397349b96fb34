use core::fmt;
use volatile::Volatile;

pub const VGA_BUFFER_ADDR: usize = 0xb8000;
pub const BUFFER_HEIGHT: usize = 25;
pub const BUFFER_WIDTH: usize = 80;
pub const BUFFER_CELLS: usize = BUFFER_WIDTH * BUFFER_HEIGHT;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGray = 7,
    DarkGray = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    Pink = 13,
    Yellow = 14,
    White = 15,
}

/// The attribute byte of a character cell: background in the high nibble,
/// foreground in the low nibble.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct ColorCode(u8);

impl ColorCode {
    pub const fn new(foreground: Color, background: Color) -> Self {
        Self((background as u8) << 4 | (foreground as u8))
    }

    #[inline]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ColorCode({:#04x})", self.0)
    }
}

/// Something that owns text-mode character cells.
///
/// `write_cell` must write the character byte and then the attribute byte of
/// the given cell, in that order.
pub trait DisplayMemory {
    fn write_cell(&mut self, cell: usize, character: u8, attribute: u8);
}

#[repr(C)]
struct ScreenChar {
    character: Volatile<u8>,
    attribute: Volatile<u8>,
}

/// A view over a memory mapped text-mode buffer.
///
/// Every access goes through `Volatile`, so the compiler can neither elide nor
/// reorder writes to the device. Cell indices are not checked against the
/// buffer geometry.
pub struct TextBuffer {
    base: *mut ScreenChar,
}

impl TextBuffer {
    /// Binds a view to the text buffer starting at `addr`.
    ///
    /// # Safety
    ///
    /// `addr` must be mapped, writable and not aliased by any other live view
    /// for as long as the returned value is used. Every cell index later
    /// passed to this view must lie inside that mapping.
    pub unsafe fn at(addr: usize) -> Self {
        Self {
            base: addr as *mut ScreenChar,
        }
    }

    /// The VGA text buffer at `0xb8000`.
    ///
    /// # Safety
    ///
    /// See [`TextBuffer::at`]. The bootloader identity maps the VGA region, so
    /// this holds for the kernel as long as only one view exists.
    pub unsafe fn vga() -> Self {
        Self::at(VGA_BUFFER_ADDR)
    }

    #[inline]
    fn cell(&mut self, cell: usize) -> &mut ScreenChar {
        unsafe { &mut *self.base.add(cell) }
    }

    /// Volatile read of `(character, attribute)` for a cell.
    pub fn read_cell(&mut self, cell: usize) -> (u8, u8) {
        let cell = self.cell(cell);
        (cell.character.read(), cell.attribute.read())
    }
}

impl DisplayMemory for TextBuffer {
    #[inline]
    fn write_cell(&mut self, cell: usize, character: u8, attribute: u8) {
        let cell = self.cell(cell);
        cell.character.write(character);
        cell.attribute.write(attribute);
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "TextBuffer({:#x})", self.base as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[repr(align(2))]
    struct Scratch([u8; 2 * 4]);

    #[test_case]
    fn light_grey_on_black_is_0x07() {
        assert_eq!(ColorCode::new(Color::LightGray, Color::Black).as_u8(), 0x07);
    }

    #[test_case]
    fn background_takes_high_nibble() {
        assert_eq!(ColorCode::new(Color::Yellow, Color::Blue).as_u8(), 0x1e);
        assert_eq!(ColorCode::new(Color::White, Color::Red).as_u8(), 0x4f);
    }

    #[test_case]
    fn cells_are_two_bytes() {
        assert_eq!(core::mem::size_of::<ScreenChar>(), 2);
    }

    #[test_case]
    fn write_cell_puts_character_then_attribute() {
        let mut scratch = Scratch([0; 8]);
        let mut buffer = unsafe { TextBuffer::at(scratch.0.as_mut_ptr() as usize) };

        buffer.write_cell(1, b'A', 0x07);
        assert_eq!(buffer.read_cell(1), (b'A', 0x07));
        assert_eq!(buffer.read_cell(0), (0, 0));

        drop(buffer);
        assert_eq!(scratch.0, [0, 0, b'A', 0x07, 0, 0, 0, 0]);
    }
}
