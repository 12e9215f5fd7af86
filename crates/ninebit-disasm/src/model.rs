use anyhow::Result;
use std::path::Path;

use ninebit_asm::decoder::parse_bits;

/// One word of a machine-code listing, or the raw text if it did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Word(u16),
    Invalid { line: usize, text: String },
}

#[derive(Debug, Clone, Default)]
pub struct Image {
    pub slots: Vec<Slot>,
}

impl Image {
    /// Parse newline-separated 9-bit strings. Blank lines are skipped and do not take a PC.
    pub fn parse(text: &str) -> Image {
        let slots = text
            .lines()
            .enumerate()
            .filter_map(|(i, l)| {
                let t = l.trim();
                if t.is_empty() {
                    return None;
                }
                Some(match parse_bits(t) {
                    Some(w) => Slot::Word(w),
                    None => Slot::Invalid { line: i + 1, text: t.to_string() },
                })
            })
            .collect();
        Image { slots }
    }

    pub fn invalid_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Invalid { .. })).count()
    }
}

pub fn load_machine_code(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)?;
    let img = Image::parse(&text);
    anyhow::ensure!(!img.slots.is_empty(), "{} contains no instructions", path.display());
    Ok(img)
}
