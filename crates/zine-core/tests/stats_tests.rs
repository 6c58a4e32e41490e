use zine_core::catalog::find_entry;
use zine_core::*;

#[test]
fn test_stats_blank_zine() {
    let stats = calculate_statistics(&CoverData::default(), &default_pages());
    assert_eq!(stats, ZineStatistics::default());
}

#[test]
fn test_stats_counts() {
    let mut session = ZineSession::new();
    session.set_cover_title("Mix");
    session.set_text(1, "hello");
    session.set_position(2, PagePosition::Center);
    session.set_text(2, "ab");
    session.set_secondary_text(2, "cd");
    session.select_track(3, Track::default());
    session.set_background(Surface::Page(4), Fill::parse("/backgrounds/paper.png"));
    session.set_background(Surface::BackCover, Fill::parse("data:image/png;base64,AA"));
    session.add_decoration(Surface::Page(1), find_entry("star").unwrap());
    session.add_decoration(Surface::Page(1), find_entry("star").unwrap());
    session.add_decoration(Surface::FrontCover, find_entry("crown").unwrap());

    let stats = calculate_statistics(session.cover(), session.pages());
    assert_eq!(stats.pages_customized, 4);
    assert_eq!(stats.decorations, 3);
    assert_eq!(stats.tracks_selected, 1);
    assert_eq!(stats.characters, 3 + 5 + 4);
    assert_eq!(stats.image_backgrounds, 2);
}
