use knotty::{
    AnchorId, NoOpStepObserver, RopeConfig, RopeHandle, RopeLength, RopeWorld, Vec3, WinCheck,
    WinStatus,
};
use wasm_bindgen::prelude::*;

// ---- Tangle Demo ----
//
// Top-down view: the canvas shows the x/z plane, y is height above the board.

#[wasm_bindgen]
pub struct TangleDemo {
    world: RopeWorld<f32>,
    pins: Vec<AnchorId>,
    ropes: Vec<RopeHandle>,
    win: WinCheck<f32>,
}

#[wasm_bindgen]
impl TangleDemo {
    /// `rope_count` ropes strung across a ring of pins so that every rope
    /// crosses its neighbours.
    #[wasm_bindgen(constructor)]
    pub fn new(rope_count: usize, radius: f32) -> Self {
        let rope_count = rope_count.max(2);
        let mut world = RopeWorld::new();
        let pin_count = rope_count * 2;
        let pins: Vec<AnchorId> = (0..pin_count)
            .map(|i| {
                let angle = i as f32 * core::f32::consts::TAU / pin_count as f32;
                world.add_anchor(Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin()))
            })
            .collect();

        let config = RopeConfig::new()
            .with_segments(24)
            .with_length(RopeLength::Slack(1.05))
            .with_collision_radius(radius * 0.04);
        let ropes = (0..rope_count)
            .filter_map(|i| {
                let start = pins[i];
                let end = pins[(i + rope_count) % pin_count];
                world.create_simulation(start, end, config).ok()
            })
            .collect();

        world.warm_start(150, 0.02, &mut NoOpStepObserver);

        TangleDemo { world, pins, ropes, win: WinCheck::default() }
    }

    /// Advance one frame. Returns true once the level is solved.
    pub fn update(&mut self, dt: f32) -> bool {
        self.world.step(dt, &mut NoOpStepObserver);
        self.win.poll_world(dt, &self.world) == WinStatus::Won
    }

    pub fn move_pin(&mut self, index: usize, x: f32, z: f32) {
        if let Some(&pin) = self.pins.get(index) {
            let _ = self.world.move_anchor(pin, Vec3::new(x, 0.0, z));
        }
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Returns flat [x0, z0, x1, z1, ...] pin positions
    pub fn pin_positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.pins.len() * 2);
        for &pin in &self.pins {
            if let Some(p) = self.world.anchor(pin) {
                out.push(p.x);
                out.push(p.z);
            }
        }
        out
    }

    pub fn rope_count(&self) -> usize {
        self.ropes.len()
    }

    /// Returns flat [x0, z0, x1, z1, ...] positions for the rope at index
    pub fn rope_positions(&self, index: usize) -> Vec<f32> {
        let pos = match self.ropes.get(index).map(|&h| self.world.positions(h)) {
            Some(Ok(pos)) => pos,
            _ => return Vec::new(),
        };
        let mut out = Vec::with_capacity(pos.len() * 2);
        for p in &pos {
            out.push(p.x);
            out.push(p.z);
        }
        out
    }

    /// Indices of ropes currently touching another rope, for highlighting.
    pub fn colliding_ropes(&self) -> Vec<u32> {
        let mut out = Vec::new();
        for (a, b) in self.world.colliding_pairs() {
            for handle in [a, b] {
                if let Some(i) = self.ropes.iter().position(|&h| h == handle) {
                    let i = i as u32;
                    if !out.contains(&i) {
                        out.push(i);
                    }
                }
            }
        }
        out
    }

    pub fn is_solved(&self) -> bool {
        self.win.status() == WinStatus::Won
    }

    /// Abandon the current attempt: stop checking for a win.
    pub fn give_up(&mut self) {
        self.win.cancel();
    }
}
