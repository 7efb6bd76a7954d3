use crate::display::DisplayPort;
use crate::error::{Error, Result};

/// Index into the 256-entry background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorIndex(pub u8);

/// 15-bit color as stored in palette memory: `0bbbbbgggggrrrrr`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(transparent)]
pub struct Rgb15(pub u16);

impl Rgb15 {
    /// Pack 5-bit channels (0-31); higher bits are discarded
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        let r = (r & 0x1f) as u16;
        let g = (g & 0x1f) as u16;
        let b = (b & 0x1f) as u16;
        Rgb15((b << 10) | (g << 5) | r)
    }

    pub const fn r(self) -> u8 {
        (self.0 & 0x1f) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 5) & 0x1f) as u8
    }

    pub const fn b(self) -> u8 {
        ((self.0 >> 10) & 0x1f) as u8
    }

    /// Expand to 8 bits per channel for true-color outputs
    pub const fn to_rgb8(self) -> (u8, u8, u8) {
        (expand5(self.r()), expand5(self.g()), expand5(self.b()))
    }
}

const fn expand5(c: u8) -> u8 {
    (c << 3) | (c >> 2)
}

/// Palette builder: hands out indices in allocation order starting at 0
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: Vec<Rgb15>,
}

impl Palette {
    pub const CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a color, write it to palette memory and return its index
    pub fn add_color<P: DisplayPort + ?Sized>(
        &mut self,
        port: &mut P,
        color: Rgb15,
    ) -> Result<ColorIndex> {
        if self.entries.len() >= Self::CAPACITY {
            return Err(Error::PaletteFull {
                capacity: Self::CAPACITY,
            });
        }
        let index = ColorIndex(self.entries.len() as u8);
        self.entries.push(color);
        port.set_palette_entry(index, color);
        Ok(index)
    }

    pub fn get(&self, index: ColorIndex) -> Option<Rgb15> {
        self.entries.get(usize::from(index.0)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayControl, DisplayPort};
    use crate::surface::Surface;

    #[derive(Default)]
    struct PaletteRam {
        writes: Vec<(ColorIndex, Rgb15)>,
    }

    impl DisplayPort for PaletteRam {
        fn set_display_control(&mut self, _control: DisplayControl) {}

        fn set_palette_entry(&mut self, index: ColorIndex, color: Rgb15) {
            self.writes.push((index, color));
        }

        fn wait_vblank(&mut self) {}

        fn present(&mut self, _surface: &Surface) {}
    }

    #[test]
    fn test_rgb15_packing() {
        assert_eq!(Rgb15::new(20, 0, 0).0, 20);
        assert_eq!(Rgb15::new(0, 20, 0).0, 20 << 5);
        assert_eq!(Rgb15::new(0, 10, 20).0, (20 << 10) | (10 << 5));
        assert_eq!(Rgb15::new(31, 31, 31).0, 0x7fff);
    }

    #[test]
    fn test_rgb15_channels_round_trip() {
        let color = Rgb15::new(3, 17, 29);
        assert_eq!((color.r(), color.g(), color.b()), (3, 17, 29));
        assert_eq!(Rgb15::new(31, 0, 0).to_rgb8(), (255, 0, 0));
    }

    #[test]
    fn test_indices_are_sequential_from_zero() {
        let mut ram = PaletteRam::default();
        let mut palette = Palette::new();
        let a = palette.add_color(&mut ram, Rgb15::new(20, 20, 20)).unwrap();
        let b = palette.add_color(&mut ram, Rgb15::new(20, 20, 20)).unwrap();
        let c = palette.add_color(&mut ram, Rgb15::new(0, 10, 20)).unwrap();
        assert_eq!((a, b, c), (ColorIndex(0), ColorIndex(1), ColorIndex(2)));
        assert_eq!(ram.writes.len(), 3, "Every color is written through");
        assert_eq!(palette.get(c), Some(Rgb15::new(0, 10, 20)));
    }

    #[test]
    fn test_palette_full() {
        let mut ram = PaletteRam::default();
        let mut palette = Palette::new();
        for _ in 0..Palette::CAPACITY {
            palette.add_color(&mut ram, Rgb15::default()).unwrap();
        }
        assert_eq!(
            palette.add_color(&mut ram, Rgb15::default()),
            Err(Error::PaletteFull { capacity: 256 })
        );
        assert_eq!(palette.len(), 256);
    }
}
