//! Serialization tests for complete documents
//!
//! The text layout is consumed by ffmpeg's `ass` filter, so these tests pin
//! exact bytes rather than structure.

use karaoke_ass::{
    document::{Ass, Dialogue, Insertion, Resolution, Style},
    tags::{karaoke_tag, OverrideBlock},
    utils::{escape_text, format_player_time, Color},
};
use pretty_assertions::assert_eq;

fn karaoke_document() -> Ass {
    let mut ass = Ass::new(Resolution::FULL_HD);
    ass.styles.add(Style {
        name: "Singer0".to_string(),
        fontsize: 64.0,
        primary_colour: Color::parse("#FFFF00").unwrap(),
        secondary_colour: Color::WHITE,
        ..Style::default()
    });
    let text = format!(
        "{}{}la{} la",
        karaoke_tag(0, false),
        karaoke_tag(50, false),
        karaoke_tag(10, false)
    );
    ass.events.push(
        Dialogue::new(1.0, 2.0, "Singer0", text)
            .with_tag("karaoke")
            .with_singer(0),
    );
    ass
}

#[test]
fn full_document_layout() {
    let expected = "[Script Info]
ScriptType: v4.00+
WrapStyle: 0
ScaledBorderAndShadow: yes
YCbCr Matrix: None
PlayResX: 1920
PlayResY: 1080

[V4+ Styles]
Format: Name, Fontname, Fontsize, PrimaryColour, SecondaryColour, OutlineColour, BackColour, Bold, Italic, Underline, StrikeOut, ScaleX, ScaleY, Spacing, Angle, BorderStyle, Outline, Shadow, Alignment, MarginL, MarginR, MarginV, Encoding
Style: Singer0,Arial,64,&H0000FFFF,&H00FFFFFF,&H00000000,&H00000000,0,0,0,0,100,100,0,0,1,2,0,2,10,10,10,1

[Events]
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text
Dialogue: 0,0:00:01.00,0:00:02.00,Singer0,,0,0,0,,{\\K0}{\\K50}la{\\K10} la
";
    assert_eq!(karaoke_document().to_string(), expected);
}

#[test]
fn decorations_insert_before_karaoke_event() {
    let mut ass = karaoke_document();
    ass.styles.add(Style {
        name: "Countdown".to_string(),
        ..Style::default()
    });
    let block = OverrideBlock::new().an(8).fad(100, 100).build();
    ass.events.apply_insertions(vec![Insertion::new(
        0,
        Dialogue::new(0.0, 1.0, "Countdown", format!("{block}3")).with_tag("countdown"),
    )]);

    ass.validate().unwrap();
    let styles: Vec<&str> = ass.events.iter().map(|d| d.style.as_str()).collect();
    assert_eq!(styles, vec!["Countdown", "Singer0"]);
    assert_eq!(ass.events.tagged("karaoke").count(), 1);
}

#[test]
fn literal_braces_never_open_override_blocks() {
    let mut ass = karaoke_document();
    let text = escape_text("{not a tag}");
    ass.events.push(Dialogue::new(3.0, 4.0, "Singer0", text));
    assert!(ass
        .to_string()
        .contains(r"Dialogue: 0,0:00:03.00,0:00:04.00,Singer0,,0,0,0,,\{not a tag\}"));
}

#[test]
fn dialogue_and_player_formatters_differ() {
    let ass = karaoke_document();
    let event = ass.events.iter().next().unwrap();
    assert!(event.to_string().contains("0:00:01.00"));
    assert_eq!(format_player_time(event.start), "00:01.00");
}
