use std::collections::BTreeMap;

/// A single shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    /// Scalar.
    Float(f32),
    /// Integer, used for sample counts and enum codes.
    Int(i32),
    /// Two-component vector.
    Vec2([f32; 2]),
    /// Three-component vector, usually a color.
    Vec3([f32; 3]),
}

/// Named uniforms owned by one pass.
///
/// Lookups return `Option` so callers can skip values that a partially configured pass lacks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Uniforms {
    values: BTreeMap<&'static str, UniformValue>,
}

impl Uniforms {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &'static str, value: UniformValue) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Insert or replace; returns the previous value.
    pub fn set(&mut self, name: &'static str, value: UniformValue) -> Option<UniformValue> {
        self.values.insert(name, value)
    }

    /// Remove a uniform.
    pub fn remove(&mut self, name: &str) -> Option<UniformValue> {
        self.values.remove(name)
    }

    /// Raw lookup.
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    /// `true` if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of uniforms.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, UniformValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Scalar lookup; `None` when absent or of another type.
    pub fn float(&self, name: &str) -> Option<f32> {
        match self.get(name)? {
            UniformValue::Float(v) => Some(v),
            _ => None,
        }
    }

    /// Integer lookup.
    pub fn int(&self, name: &str) -> Option<i32> {
        match self.get(name)? {
            UniformValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Vec2 lookup.
    pub fn vec2(&self, name: &str) -> Option<[f32; 2]> {
        match self.get(name)? {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    /// Vec3 lookup.
    pub fn vec3(&self, name: &str) -> Option<[f32; 3]> {
        match self.get(name)? {
            UniformValue::Vec3(v) => Some(v),
            _ => None,
        }
    }

    /// Scalar lookup with a fallback.
    pub fn float_or(&self, name: &str, default: f32) -> f32 {
        self.float(name).unwrap_or(default)
    }

    /// Integer lookup with a fallback.
    pub fn int_or(&self, name: &str, default: i32) -> i32 {
        self.int(name).unwrap_or(default)
    }

    /// Vec2 lookup with a fallback.
    pub fn vec2_or(&self, name: &str, default: [f32; 2]) -> [f32; 2] {
        self.vec2(name).unwrap_or(default)
    }

    /// Vec3 lookup with a fallback.
    pub fn vec3_or(&self, name: &str, default: [f32; 3]) -> [f32; 3] {
        self.vec3(name).unwrap_or(default)
    }

    /// Add `delta` to a scalar uniform if it exists. Returns whether anything changed.
    pub fn add_float(&mut self, name: &str, delta: f32) -> bool {
        match self.values.get_mut(name) {
            Some(UniformValue::Float(v)) => {
                *v += delta;
                true
            }
            _ => false,
        }
    }

    /// Advance the `time` uniform by `dt` seconds; a no-op when the pass has none.
    pub fn advance_time(&mut self, dt: f32) -> bool {
        self.add_float("time", dt)
    }
}
