// Host-side fakes for the scene graph, the analysis graph and the player sink.

use crate::core::{
    EqualizerUniforms, IntensitySample, MeshId, PlayerSink, Scene, TimeDomainSource,
};
use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

pub struct RecordedPlane {
    pub id: MeshId,
    pub size: Vec2,
    pub scale: Vec2,
    pub uniforms: EqualizerUniforms,
}

#[derive(Default)]
pub struct RecordingScene {
    next_id: u32,
    pub planes: Vec<RecordedPlane>,
    pub removed: Vec<MeshId>,
    pub uniform_writes: usize,
}

impl RecordingScene {
    pub fn plane(&self, id: MeshId) -> Option<&RecordedPlane> {
        self.planes.iter().find(|p| p.id == id)
    }

    fn plane_mut(&mut self, id: MeshId) -> Option<&mut RecordedPlane> {
        self.planes.iter_mut().find(|p| p.id == id)
    }
}

impl Scene for RecordingScene {
    fn add_plane(&mut self, size: Vec2, uniforms: &EqualizerUniforms) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.planes.push(RecordedPlane {
            id,
            size,
            scale: Vec2::ONE,
            uniforms: *uniforms,
        });
        id
    }

    fn set_scale(&mut self, id: MeshId, scale: Vec2) {
        if let Some(p) = self.plane_mut(id) {
            p.scale = scale;
        }
    }

    fn write_uniforms(&mut self, id: MeshId, uniforms: &EqualizerUniforms) {
        if let Some(p) = self.plane_mut(id) {
            p.uniforms = *uniforms;
            self.uniform_writes += 1;
        }
    }

    fn remove(&mut self, id: MeshId) {
        let before = self.planes.len();
        self.planes.retain(|p| p.id != id);
        if self.planes.len() < before {
            self.removed.push(id);
        }
    }

    fn child_count(&self) -> usize {
        self.planes.len()
    }
}

/// Analysis graph returning a fixed snapshot.
pub struct FakeSource {
    pub data: Vec<u8>,
    pub closed: Rc<Cell<u32>>,
}

impl FakeSource {
    pub fn new(data: Vec<u8>) -> (Self, Rc<Cell<u32>>) {
        let closed = Rc::new(Cell::new(0));
        (
            Self {
                data,
                closed: closed.clone(),
            },
            closed,
        )
    }
}

impl TimeDomainSource for FakeSource {
    fn bin_count(&self) -> usize {
        self.data.len()
    }

    fn read_time_domain(&self, out: &mut [u8]) {
        let n = out.len().min(self.data.len());
        out[..n].copy_from_slice(&self.data[..n]);
    }

    fn close(&mut self) {
        self.closed.set(self.closed.get() + 1);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerEvent {
    Update(IntensitySample),
    Play,
    Pause,
}

// Records sink calls in emission order
impl PlayerSink for Vec<PlayerEvent> {
    fn on_update(&mut self, sample: IntensitySample) {
        self.push(PlayerEvent::Update(sample));
    }

    fn on_play(&mut self) {
        self.push(PlayerEvent::Play);
    }

    fn on_pause(&mut self) {
        self.push(PlayerEvent::Pause);
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}
