//! Grid card rendering
//!
//! Draws one grid row: up to `columns` cards laid out left to right with the
//! configured card width and gap. Cards show a square cover placeholder with
//! a title and a subtitle underneath.

use eframe::egui;
use rshelf::{Album, Artist, Library, ListConfig};

use crate::rendering::text_utils::paint_clipped_text;

const TEXT_LINE_HEIGHT: f32 = 18.0;

/// Stable placeholder color for an entity without cover art.
fn cover_color(id: u64) -> egui::Color32 {
    let h = id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    egui::Color32::from_rgb(
        60 + (h >> 8) as u8 % 140,
        60 + (h >> 24) as u8 % 140,
        60 + (h >> 40) as u8 % 140,
    )
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

struct Card<'a> {
    id: u64,
    title: &'a str,
    subtitle: String,
    starred: bool,
    cover_text: String,
}

/// Paints one card; returns true if it was clicked.
fn render_card(ui: &mut egui::Ui, rect: egui::Rect, card: &Card<'_>, is_selected: bool) -> bool {
    let response = ui.interact(rect, ui.id().with(card.id), egui::Sense::click());
    let painter = ui.painter();
    let visuals = ui.visuals();

    if is_selected {
        painter.rect_filled(rect.expand(3.0), 6.0, visuals.selection.bg_fill);
    } else if response.hovered() {
        painter.rect_filled(rect.expand(3.0), 6.0, visuals.widgets.hovered.weak_bg_fill);
    }

    let cover_side = rect.width().min(rect.height() - 2.0 * TEXT_LINE_HEIGHT).max(0.0);
    let cover = egui::Rect::from_min_size(rect.min, egui::vec2(cover_side, cover_side));
    painter.rect_filled(cover, 4.0, cover_color(card.id));
    painter.text(
        cover.center(),
        egui::Align2::CENTER_CENTER,
        &card.cover_text,
        egui::FontId::proportional(cover_side * 0.25),
        egui::Color32::from_white_alpha(200),
    );
    if card.starred {
        painter.text(
            cover.right_top() + egui::vec2(-6.0, 6.0),
            egui::Align2::RIGHT_TOP,
            "★",
            egui::FontId::proportional(16.0),
            egui::Color32::GOLD,
        );
    }

    paint_clipped_text(
        painter,
        egui::pos2(rect.left(), cover.bottom() + 2.0),
        egui::Align2::LEFT_TOP,
        card.title,
        rect.width(),
        egui::FontId::proportional(14.0),
        visuals.strong_text_color(),
    );
    paint_clipped_text(
        painter,
        egui::pos2(rect.left(), cover.bottom() + 2.0 + TEXT_LINE_HEIGHT),
        egui::Align2::LEFT_TOP,
        &card.subtitle,
        rect.width(),
        egui::FontId::proportional(12.0),
        visuals.weak_text_color(),
    );

    response.clicked()
}

/// Renders a row of cards into the current UI's rect.
///
/// Returns the id of the clicked card, if any.
fn render_card_row<'a>(
    ui: &mut egui::Ui,
    cards: impl Iterator<Item = Card<'a>>,
    config: &ListConfig,
    selected: Option<u64>,
) -> Option<u64> {
    let row = ui.max_rect();
    let card_size = egui::vec2(config.card_width, (config.heights.row - config.gap).max(0.0));
    let mut clicked = None;

    for (column, card) in cards.enumerate() {
        let x = row.left() + column as f32 * (config.card_width + config.gap);
        let rect = egui::Rect::from_min_size(egui::pos2(x, row.top()), card_size);
        if render_card(ui, rect, &card, selected == Some(card.id)) {
            clicked = Some(card.id);
        }
    }

    clicked
}

pub fn render_album_row(
    ui: &mut egui::Ui,
    albums: &[Album],
    library: &Library,
    config: &ListConfig,
    selected: Option<u64>,
) -> Option<u64> {
    let cards = albums.iter().map(|album| {
        let artist = library.album_artist_name(album);
        Card {
            id: album.id,
            title: &album.title,
            subtitle: match album.year {
                Some(year) => format!("{} · {}", artist, year),
                None => artist.to_string(),
            },
            starred: album.starred,
            cover_text: initials(&album.title),
        }
    });
    render_card_row(ui, cards, config, selected)
}

pub fn render_artist_row(
    ui: &mut egui::Ui,
    artists: &[Artist],
    album_counts: impl Fn(u64) -> usize,
    config: &ListConfig,
    selected: Option<u64>,
) -> Option<u64> {
    let cards = artists.iter().map(|artist| {
        let albums = album_counts(artist.id);
        Card {
            id: artist.id,
            title: &artist.name,
            subtitle: if albums == 1 {
                "1 album".to_string()
            } else {
                format!("{} albums", albums)
            },
            starred: artist.starred,
            cover_text: initials(&artist.name),
        }
    });
    render_card_row(ui, cards, config, selected)
}
