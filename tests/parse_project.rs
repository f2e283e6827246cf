mod fixture;

use fixture::*;
use flpx::{file::Context, prelude::*};
use pretty_assertions::assert_eq;

#[test]
fn demo_project_metadata() {
    let project = flpx::parse(&demo_project().build()).unwrap();

    assert_eq!(project.header().channel_count(), 2);
    assert_eq!(project.header().ppq(), 96);
    assert_eq!(project.version().map(ToString::to_string).as_deref(), Some("20.8.4.2576"));
    assert_eq!(project.tempo(), Some(Tempo::from_bpm(128)));
    assert_eq!(project.title(), Some("Demo song"));
    assert_eq!(project.time_signature(), Some((4, 4)));
    assert_eq!(project.genre(), None);
    assert!(project.diagnostics().is_empty(), "{:?}", project.diagnostics());
}

#[test]
fn demo_project_channels() {
    let project = flpx::parse(&demo_project().build()).unwrap();

    let kick = project.channel_by_name("Kick").unwrap();
    assert_eq!(kick.index(), 0);
    assert_eq!(kick.kind(), ChannelKind::Sampler);
    assert_eq!(kick.sample_path(), Some("%FLStudioFactoryData%/Kick.wav"));
    assert_eq!(kick.routed_to(), Some(1));

    let lead = project.channel(1).unwrap();
    assert_eq!(lead.name(), Some("Lead"));
    assert_eq!(lead.kind(), ChannelKind::Instrument);
    assert_eq!(lead.plugin(), Some("3x Osc"));
    assert_eq!(lead.enabled(), Some(true));
}

#[test]
fn demo_project_patterns_and_playlist() {
    let project = flpx::parse(&demo_project().build()).unwrap();

    let intro = project.pattern(1).unwrap();
    assert_eq!(intro.name(), Some("Intro"));
    let keys = intro.notes().map(|n| (n.position, n.key, n.velocity)).collect::<Vec<_>>();
    assert_eq!(keys, [(0, 60, 100), (96, 67, 90)]);

    let track = project.playlist().track_by_name("Arrangement").unwrap();
    assert_eq!(
        track.items(),
        [
            PlaylistItem {
                position: 0,
                item: ItemRef::Pattern(1),
                length: Some(384),
                track: Some(0),
            },
            PlaylistItem {
                position: 384,
                item: ItemRef::Pattern(1),
                length: Some(384),
                track: Some(1),
            },
        ]
    );
}

#[test]
fn demo_project_mixer() {
    let project = flpx::parse(&demo_project().build()).unwrap();

    let names = project.mixer().iter().map(MixerSlot::name).collect::<Vec<_>>();
    assert_eq!(names, [Some("Master"), Some("Drums")]);
    assert_eq!(project.mixer_slot(0).unwrap().output(), Some(-1));

    let drums = project.mixer_slot_by_name("Drums").unwrap();
    assert_eq!(drums.index(), 1);
    assert_eq!(drums.output(), Some(0));
    assert_eq!(drums.effects().len(), 1);
    assert_eq!(drums.effects()[0].plugin(), Some("Fruity Limiter"));
    assert_eq!(drums.effects()[0].slot(), Some(0));
}

#[test]
fn channel_marker_then_name() {
    let bytes = ProjectWriter::new(MODERN)
        .word(64, 0)
        .data(203, &[0x41, 0x00, 0x42, 0x00])
        .build();
    let project = flpx::parse(&bytes).unwrap();

    assert_eq!(project.channels().len(), 1);
    assert_eq!(project.channels()[0].index(), 0);
    assert_eq!(project.channels()[0].name(), Some("AB"));
}

#[test]
fn legacy_text_and_tempo() {
    let bytes = ProjectWriter::new(LEGACY)
        .word(66, 140)
        .word(64, 0)
        .data(192, &[0x43, 0x61, 0x66, 0xE9, 0x00, 0x7A])
        .word(99, 0)
        .dword(129, 0x0002_0060)
        .build();
    let project = flpx::parse(&bytes).unwrap();

    assert_eq!(project.version(), None);
    assert_eq!(project.tempo(), Some(Tempo::from_bpm(140)));
    assert_eq!(project.channels()[0].name(), Some("Café"));
    assert_eq!(
        project.playlist().items().collect::<Vec<_>>(),
        [&PlaylistItem {
            position: 0x60,
            item: ItemRef::Pattern(2),
            length: None,
            track: None,
        }]
    );
}

#[test]
fn orphaned_record_is_reported_and_parsing_goes_on() {
    let bytes = ProjectWriter::new(MODERN)
        .text(196, "lost.wav")
        .word(64, 0)
        .text(203, "Kick")
        .build();
    let project = flpx::parse(&bytes).unwrap();

    assert_eq!(
        project.diagnostics(),
        [Diagnostic::new(
            22,
            196,
            ContextError::Orphaned {
                expected: Target::Channel
            }
        )]
    );
    assert!(project.diagnostics()[0].is_context_error());
    assert_eq!(project.channels()[0].name(), Some("Kick"));
    assert_eq!(project.channels()[0].sample_path(), None);
}

fn song(insert: impl FnOnce(ProjectWriter) -> ProjectWriter) -> Project {
    let writer = ProjectWriter::new(MODERN)
        .word(64, 0)
        .text(203, "Kick");
    let writer = insert(writer)
        .word(64, 1)
        .text(203, "Snare")
        .word(65, 1)
        .data(224, &note(0, 1, 48, 60, 100))
        .data(236, &[0; 4])
        .text(204, "Master");
    flpx::parse(&writer.build()).unwrap()
}

#[test]
fn unknown_tag_stays_with_context_entity() {
    let clean = song(|w| w);
    let noisy = song(|w| w.data(250, &[1, 2, 3]));

    assert_eq!(noisy.patterns(), clean.patterns());
    assert_eq!(noisy.playlist(), clean.playlist());
    assert_eq!(noisy.mixer(), clean.mixer());
    assert_eq!(noisy.channels()[1], clean.channels()[1]);
    assert_eq!(noisy.channels()[0].name(), Some("Kick"));
    assert_eq!(noisy.channels()[0].unknown().get(250), [vec![1u8, 2, 3]]);
    assert!(clean.channels()[0].unknown().is_empty());

    assert_eq!(noisy.diagnostics().len(), 1);
    assert_eq!(
        noisy.diagnostics()[0].kind(),
        &DiagnosticKind::UnknownAttribute(Context::Channel(0))
    );
}

#[test]
fn unknown_fixed_width_tag() {
    let project = song(|w| w.byte(63, 7));
    assert_eq!(project.channels()[0].unknown().get(63), [vec![7u8]]);
    assert_eq!(project.channels()[1].name(), Some("Snare"));
}

#[test]
fn reentered_pattern_collects_both_sections() {
    let mut automation = vec![0u8; 12];
    automation[8..12].copy_from_slice(&0.25f32.to_le_bytes());

    let bytes = ProjectWriter::new(MODERN)
        .word(65, 1)
        .text(193, "Hook")
        .data(224, &note(0, 0, 96, 72, 110))
        .word(65, 1)
        .data(223, &automation)
        .build();
    let project = flpx::parse(&bytes).unwrap();

    assert_eq!(project.patterns().len(), 1);
    let hook = project.pattern_by_name("Hook").unwrap();
    assert_eq!(hook.notes().count(), 1);
    assert_eq!(hook.automation().map(|a| a.value).collect::<Vec<_>>(), [0.25]);
}

#[test]
fn descending_index_is_reported() {
    let bytes = ProjectWriter::new(MODERN)
        .word(64, 3)
        .word(64, 1)
        .build();
    let project = flpx::parse(&bytes).unwrap();

    let indices = project.channels().iter().map(Channel::index).collect::<Vec<_>>();
    assert_eq!(indices, [3, 1]);
    assert_eq!(
        project.diagnostics()[0].kind(),
        &DiagnosticKind::IndexOrder {
            previous: 3,
            found: 1
        }
    );
}

#[test]
fn from_reader_matches_parse() {
    let bytes = demo_project().build();
    let read = Project::from_reader(std::io::Cursor::new(&bytes)).unwrap();
    assert_eq!(read, flpx::parse(&bytes).unwrap());
}

#[test]
fn playlist_without_arrangements() {
    let bytes = ProjectWriter::new(LEGACY)
        .version("12.3.0")
        .word(65, 1)
        .word(64, 0)
        .text(203, "Kick")
        .data(233, &pattern_item(96, 1, 192, 2))
        .dword(129, 0x0001_0060)
        .build();
    let project = flpx::parse(&bytes).unwrap();

    assert!(project.diagnostics().is_empty(), "{:?}", project.diagnostics());
    assert_eq!(project.channels()[0].name(), Some("Kick"));
    assert_eq!(project.playlist().tracks().len(), 1);
    assert_eq!(
        project.playlist().items().collect::<Vec<_>>(),
        [
            &PlaylistItem {
                position: 96,
                item: ItemRef::Pattern(1),
                length: Some(192),
                track: Some(2),
            },
            &PlaylistItem {
                position: 0x60,
                item: ItemRef::Pattern(1),
                length: None,
                track: None,
            },
        ]
    );
}
