/// Inclusive bounds and slider increment for a numeric setting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl NumberRange {
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingKind {
    Toggle,
    Number(NumberRange),
    Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f32),
    Color(u32),
}

/// Every tunable visual parameter exposed on the debug panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    IsFull,
    Radius,
    Step,
    Color1,
    Color2,
    TimeAcceleration,
    RadiusAcceleration,
    RadiusDistortion,
}

const UNIT_RANGE: NumberRange = NumberRange {
    min: 0.0,
    max: 1.0,
    step: 0.0001,
};

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::IsFull,
        SettingKey::Radius,
        SettingKey::Step,
        SettingKey::Color1,
        SettingKey::Color2,
        SettingKey::TimeAcceleration,
        SettingKey::RadiusAcceleration,
        SettingKey::RadiusDistortion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::IsFull => "isFull",
            SettingKey::Radius => "radius",
            SettingKey::Step => "step",
            SettingKey::Color1 => "color1",
            SettingKey::Color2 => "color2",
            SettingKey::TimeAcceleration => "timeAcceleration",
            SettingKey::RadiusAcceleration => "radiusAcceleration",
            SettingKey::RadiusDistortion => "radiusDistortion",
        }
    }

    pub fn kind(self) -> SettingKind {
        match self {
            SettingKey::IsFull => SettingKind::Toggle,
            SettingKey::Radius => SettingKind::Number(NumberRange {
                min: 0.35,
                max: 1.0,
                step: 0.0001,
            }),
            SettingKey::Step => SettingKind::Number(NumberRange {
                min: 0.1,
                max: 0.75,
                step: 0.0001,
            }),
            SettingKey::Color1 | SettingKey::Color2 => SettingKind::Color,
            SettingKey::TimeAcceleration
            | SettingKey::RadiusAcceleration
            | SettingKey::RadiusDistortion => SettingKind::Number(UNIT_RANGE),
        }
    }

    /// Parse raw control state into a typed value.
    ///
    /// `raw` is the input's string value, `checked` its checkbox state. Returns
    /// `None` for malformed numbers or colors.
    pub fn parse(self, raw: &str, checked: bool) -> Option<SettingValue> {
        match self.kind() {
            SettingKind::Toggle => Some(SettingValue::Bool(checked)),
            SettingKind::Number(_) => raw
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .map(SettingValue::Number),
            SettingKind::Color => parse_hex_color(raw).map(SettingValue::Color),
        }
    }
}

/// Runtime-tunable shader parameters. Lives as long as the equalizer; never
/// persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualSettings {
    pub is_full: bool,
    pub radius: f32,
    pub step: f32,
    pub color1: u32,
    pub color2: u32,
    pub time_acceleration: f32,
    pub radius_acceleration: f32,
    pub radius_distortion: f32,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            is_full: false,
            radius: 0.4,
            step: 0.6,
            color1: 0xff0000,
            color2: 0x00ff00,
            time_acceleration: 0.15,
            radius_acceleration: 0.7,
            radius_distortion: 0.25,
        }
    }
}

impl VisualSettings {
    pub fn get(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::IsFull => SettingValue::Bool(self.is_full),
            SettingKey::Radius => SettingValue::Number(self.radius),
            SettingKey::Step => SettingValue::Number(self.step),
            SettingKey::Color1 => SettingValue::Color(self.color1),
            SettingKey::Color2 => SettingValue::Color(self.color2),
            SettingKey::TimeAcceleration => SettingValue::Number(self.time_acceleration),
            SettingKey::RadiusAcceleration => SettingValue::Number(self.radius_acceleration),
            SettingKey::RadiusDistortion => SettingValue::Number(self.radius_distortion),
        }
    }

    /// Assign a value, clamping numbers into the key's range.
    ///
    /// Returns `false` (and changes nothing) when the value type does not
    /// match the key.
    pub fn set(&mut self, key: SettingKey, value: SettingValue) -> bool {
        let value = match (key.kind(), value) {
            (SettingKind::Number(range), SettingValue::Number(v)) => {
                SettingValue::Number(range.clamp(v))
            }
            (SettingKind::Toggle, v @ SettingValue::Bool(_)) => v,
            (SettingKind::Color, SettingValue::Color(c)) => SettingValue::Color(c & 0xff_ffff),
            _ => return false,
        };
        match (key, value) {
            (SettingKey::IsFull, SettingValue::Bool(b)) => self.is_full = b,
            (SettingKey::Radius, SettingValue::Number(v)) => self.radius = v,
            (SettingKey::Step, SettingValue::Number(v)) => self.step = v,
            (SettingKey::Color1, SettingValue::Color(c)) => self.color1 = c,
            (SettingKey::Color2, SettingValue::Color(c)) => self.color2 = c,
            (SettingKey::TimeAcceleration, SettingValue::Number(v)) => self.time_acceleration = v,
            (SettingKey::RadiusAcceleration, SettingValue::Number(v)) => {
                self.radius_acceleration = v
            }
            (SettingKey::RadiusDistortion, SettingValue::Number(v)) => self.radius_distortion = v,
            _ => return false,
        }
        true
    }
}

/// `0xRRGGBB` to normalized RGB.
pub fn hex_to_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xff) as f32 / 255.0,
        ((color >> 8) & 0xff) as f32 / 255.0,
        (color & 0xff) as f32 / 255.0,
    ]
}

/// Accepts `#rrggbb`, `rrggbb` and `0xrrggbb`.
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let s = raw.trim();
    let digits = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .unwrap_or(s);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

pub fn format_hex_color(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}
