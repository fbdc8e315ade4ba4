// Host-side tests wiring the audio session into the equalizer, frame by frame.

#![allow(dead_code)]
#[path = "../src/core/mod.rs"]
mod core;
mod common;

use crate::core::*;
use common::{FakeSource, RecordingScene};
use std::cell::Cell;
use std::rc::Rc;

struct Rig {
    manager: Manager<RecordingScene>,
    equalizer: Equalizer<RecordingScene>,
    session: AudioSession<FakeSource, EqualizerHandle<RecordingScene>>,
    closed: Rc<Cell<u32>>,
}

fn rig(snapshot: Vec<u8>) -> Rig {
    let manager = Manager::new(RecordingScene::default(), Viewport::new(800.0, 600.0));
    let equalizer = Equalizer::new(&manager);
    let mut session = AudioSession::new(equalizer.handle());
    session.attach_media();
    let (source, closed) = FakeSource::new(snapshot);
    assert!(session.handle_play(move || Ok(source)));
    Rig {
        manager,
        equalizer,
        session,
        closed,
    }
}

fn frames(rig: &mut Rig, n: usize) {
    for _ in 0..n {
        rig.session.handle_time_update();
        rig.manager.render_frame();
    }
}

fn material(rig: &Rig) -> EqualizerUniforms {
    let id = rig.equalizer.mesh().expect("mesh");
    rig.manager
        .scene()
        .borrow()
        .plane(id)
        .expect("plane")
        .uniforms
}

#[test]
fn playing_audio_drives_the_material() {
    let mut rig = rig(vec![128; 32]);
    frames(&mut rig, 200);
    let u = material(&rig);
    assert!((u.bass_intensity - 0.502).abs() < 1e-3);
    assert!((u.high_intensity - 0.502).abs() < 1e-3);
    assert!((u.active_progress - 1.0).abs() < 1e-4);
    assert!(rig.equalizer.state().is_active());
}

#[test]
fn pause_decays_back_to_rest() {
    let mut rig = rig(vec![255; 32]);
    frames(&mut rig, 100);
    assert!(material(&rig).bass_intensity > 0.9);

    rig.session.handle_pause();
    for _ in 0..300 {
        rig.manager.render_frame();
    }
    let u = material(&rig);
    assert!(u.bass_intensity < 1e-4);
    assert!(u.high_intensity < 1e-4);
    assert!(u.active_progress < 1e-4);
    assert!(!rig.equalizer.state().is_active());
}

#[test]
fn intensity_moves_gradually_between_frames() {
    let mut rig = rig(vec![255; 32]);
    frames(&mut rig, 1);
    let first = material(&rig).bass_intensity;
    frames(&mut rig, 1);
    let second = material(&rig).bass_intensity;
    assert!((first - 0.05).abs() < 1e-5);
    assert!(second > first && second < 0.1);
}

#[test]
fn destroying_both_sides_leaves_nothing_behind() {
    let mut rig = rig(vec![128; 32]);
    frames(&mut rig, 5);

    rig.equalizer.destroy();
    rig.session.close();
    rig.equalizer.destroy();
    rig.session.close();

    assert_eq!(rig.manager.callbacks().active_count(), 0);
    assert_eq!(rig.manager.scene().borrow().child_count(), 0);
    assert_eq!(rig.closed.get(), 1);

    // Late media events after teardown are inert
    let writes = rig.manager.scene().borrow().uniform_writes;
    rig.session.handle_pause();
    rig.manager.render_frame();
    assert_eq!(rig.manager.scene().borrow().uniform_writes, writes);
}
