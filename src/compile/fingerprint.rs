use std::fmt;

use serde_json::Value;
use xxhash_rust::xxh3::Xxh3;

use crate::scene::model::{Action, Props, Scene, VisualObject};

const XXH3_SEED: u64 = 0x5ce7_a1c0_91d3_e2b7;

/// Stable 128-bit fingerprint of a scene, for caching and change detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SceneFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Fingerprint of every field that reaches the JSON output.
pub fn fingerprint_scene(scene: &Scene) -> SceneFingerprint {
    let mut h = StableHasher::new();
    h.write_str(&scene.scene_id);
    h.write_u32(scene.width);
    h.write_u32(scene.height);
    h.write_f64(scene.duration);
    h.write_str(&scene.code);
    h.write_u32(scene.objects.len() as u32);
    for obj in &scene.objects {
        write_object(&mut h, obj);
    }
    h.write_u32(scene.actions.len() as u32);
    for action in &scene.actions {
        write_action(&mut h, action);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    // Length-prefixed so that adjacent strings cannot alias.
    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> SceneFingerprint {
        let v = self.inner.digest128();
        SceneFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_object(h: &mut StableHasher, obj: &VisualObject) {
    h.write_str(&obj.id);
    h.write_u8(obj.kind as u8);
    write_props(h, &obj.props);
}

fn write_action(h: &mut StableHasher, action: &Action) {
    h.write_str(&action.id);
    h.write_str(&action.object_id);
    h.write_u8(action.kind as u8);
    h.write_f64(action.start);
    h.write_f64(action.end);
    write_props(h, &action.params);
    match &action.narrative {
        Some(text) => {
            h.write_u8(1);
            h.write_str(text);
        }
        None => h.write_u8(0),
    }
    match action.code_line {
        Some(line) => {
            h.write_u8(1);
            h.write_u32(line);
        }
        None => h.write_u8(0),
    }
}

fn write_props(h: &mut StableHasher, props: &Props) {
    h.write_u32(props.len() as u32);
    for (key, value) in props {
        h.write_str(key);
        write_value(h, value);
    }
}

fn write_value(h: &mut StableHasher, v: &Value) {
    match v {
        Value::Null => h.write_u8(0),
        Value::Bool(b) => {
            h.write_u8(1);
            h.write_u8(u8::from(*b));
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                h.write_u8(2);
                h.write_u64(i as u64);
            } else if let Some(u) = n.as_u64() {
                h.write_u8(3);
                h.write_u64(u);
            } else {
                h.write_u8(4);
                h.write_f64(n.as_f64().unwrap_or(f64::NAN));
            }
        }
        Value::String(s) => {
            h.write_u8(5);
            h.write_str(s);
        }
        Value::Array(items) => {
            h.write_u8(6);
            h.write_u32(items.len() as u32);
            for item in items {
                write_value(h, item);
            }
        }
        Value::Object(map) => {
            h.write_u8(7);
            h.write_u32(map.len() as u32);
            for (key, item) in map {
                h.write_str(key);
                write_value(h, item);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/fingerprint.rs"]
mod tests;
