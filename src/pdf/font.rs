//! Standard PDF fonts and their metrics
//!
//! The 14 standard fonts need no embedding, so a watermark only needs the
//! advance widths to measure its text.

use lopdf::{Dictionary, Object};

/// Standard Type1 fonts used for drawn text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name used as `/BaseFont`
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Ascender in 1/1000 em
    pub fn ascent(self) -> f32 {
        718.0
    }

    /// Descender in 1/1000 em (negative)
    pub fn descent(self) -> f32 {
        -207.0
    }

    /// Height of one line of text at the given size
    pub fn line_height(self, font_size: f32) -> f32 {
        (self.ascent() - self.descent()) * font_size / 1000.0
    }

    /// Advance width of a character in 1/1000 em
    pub fn char_width(self, c: char) -> f32 {
        let widths = match self {
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = c as u32;
        if (32..=126).contains(&code) {
            widths[(code - 32) as usize] as f32
        } else {
            // Characters outside ASCII are drawn as '?' by the WinAnsi encoder
            widths[('?' as u32 - 32) as usize] as f32
        }
    }

    /// Advance width of a string in points
    pub fn text_width(self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|c| self.char_width(c)).sum::<f32>() * font_size / 1000.0
    }

    /// Font dictionary for a standard Type1 font
    pub fn to_dictionary(self) -> Dictionary {
        let mut font = Dictionary::new();
        font.set("Type", Object::Name(b"Font".to_vec()));
        font.set("Subtype", Object::Name(b"Type1".to_vec()));
        font.set("BaseFont", Object::Name(self.base_font().as_bytes().to_vec()));
        font.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        font
    }
}

/// Encode text as WinAnsi bytes, replacing anything unmappable with '?'
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (32..=126).contains(&(c as u32)) { c as u8 } else { b'?' })
        .collect()
}

/// Helvetica-Bold widths for chars 32-126
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // space - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0 - ?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @ - O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P - _
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // ` - o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,      // p - ~
];
