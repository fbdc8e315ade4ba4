#[inline]
pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// A displayed value chasing its target by exponential smoothing.
///
/// `target` is overwritten whenever new input arrives; `current` only moves in
/// [`Smoothed::step`], once per render frame. After `n` steps the remaining
/// error is `(1 - factor)^n` times the initial error.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Smoothed {
    pub current: f32,
    pub target: f32,
}

impl Smoothed {
    pub fn new(value: f32) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    #[inline]
    pub fn step(&mut self, factor: f32) -> f32 {
        self.current = lerp(self.current, self.target, factor);
        self.current
    }

    pub fn is_settled(&self, epsilon: f32) -> bool {
        (self.target - self.current).abs() <= epsilon
    }
}
