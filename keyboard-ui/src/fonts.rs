//! Loading of the typeface used for key labels.

use std::sync::Arc;

use egui;
use thiserror::Error;

/// File name the front ends look for.
pub const NOTE_FONT_FILE: &str = "Inter_600SemiBold.ttf";
pub const NOTE_FONT_NAME: &str = "note-name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FontError {
    #[error("font data is too short ({0} bytes)")]
    Truncated(usize),

    #[error("not a TrueType or OpenType font (header {0:02X?})")]
    UnknownFormat([u8; 4]),
}

/// TrueType, OpenType (CFF), Apple TrueType and font collection tags.
const SFNT_TAGS: [[u8; 4]; 4] = [[0x00, 0x01, 0x00, 0x00], *b"OTTO", *b"true", *b"ttcf"];

/// Check the sfnt header so a bad download is rejected before egui tries to
/// lay out text with it.
pub fn check_font_data(bytes: &[u8]) -> Result<(), FontError> {
    let header: [u8; 4] = match bytes.get(..4) {
        Some(h) => [h[0], h[1], h[2], h[3]],
        None => return Err(FontError::Truncated(bytes.len())),
    };
    if SFNT_TAGS.contains(&header) {
        Ok(())
    } else {
        Err(FontError::UnknownFormat(header))
    }
}

/// Register `bytes` as the note label font and return the family to draw
/// with. The built-in proportional fonts stay in the family as fallback for
/// missing glyphs.
pub fn install_note_font(ctx: &egui::Context, bytes: Vec<u8>) -> Result<egui::FontFamily, FontError> {
    check_font_data(&bytes)?;
    let size = bytes.len();

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        NOTE_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );

    let mut chain = vec![NOTE_FONT_NAME.to_owned()];
    chain.extend(
        fonts
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default(),
    );
    let family = egui::FontFamily::Name(NOTE_FONT_NAME.into());
    fonts.families.insert(family.clone(), chain);
    ctx.set_fonts(fonts);

    log::info!("installed note font ({} bytes)", size);
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_sfnt_headers() {
        assert_eq!(check_font_data(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x0A]), Ok(()));
        assert_eq!(check_font_data(b"OTTO\x00\x0A"), Ok(()));
        assert_eq!(check_font_data(b"ttcf\x00\x01"), Ok(()));
        assert_eq!(check_font_data(b"true"), Ok(()));
    }

    #[test]
    fn rejects_short_data() {
        assert_eq!(check_font_data(&[]), Err(FontError::Truncated(0)));
        assert_eq!(check_font_data(b"OTT"), Err(FontError::Truncated(3)));
    }

    #[test]
    fn rejects_html_error_pages() {
        assert_eq!(
            check_font_data(b"<!DOCTYPE html>"),
            Err(FontError::UnknownFormat(*b"<!DO"))
        );
    }

    #[test]
    fn install_rejects_bad_data_without_touching_fonts() {
        let ctx = egui::Context::default();
        let err = install_note_font(&ctx, b"nope".to_vec());
        assert_eq!(err, Err(FontError::UnknownFormat(*b"nope")));
    }
}
