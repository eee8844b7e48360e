use std::sync::Arc;

use eframe::egui::{self, FontData, FontDefinitions, FontFamily};

/// Environment variable naming a font file to use for Japanese text.
pub const FONT_ENV: &str = "HYAKUMEITEN_FONT";

/// Well-known locations of a font with Japanese glyphs, per platform.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\YuGothM.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
];

/// egui's bundled fonts have no kana or kanji. Append the first font found
/// as a fallback so restaurant names and categories render.
pub fn install_cjk_font(ctx: &egui::Context) {
    let env_path = std::env::var(FONT_ENV).ok();
    let found = env_path
        .iter()
        .map(String::as_str)
        .chain(CJK_FONT_CANDIDATES.iter().copied())
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (path.to_string(), bytes)));

    let Some((path, bytes)) = found else {
        log::warn!("No Japanese font found; set {FONT_ENV} to a .ttf/.ttc/.otf file");
        return;
    };

    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk".to_owned(), Arc::new(FontData::from_owned(bytes)));
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("cjk".to_owned());
    }
    ctx.set_fonts(fonts);
    log::info!("Using {path} for Japanese text");
}
