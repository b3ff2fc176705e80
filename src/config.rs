use std::{
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};

use anyhow::Context;
use egui::Color32;

use crate::spin::SpinRules;

pub const PRESET_KEY: &str = "NAMEWHEEL_PRESET";
pub const CONFIG_KEY: &str = "NAMEWHEEL_CONFIG";
pub const DIAMETER_KEY: &str = "NAMEWHEEL_DIAMETER";
pub const SPIN_SECS_KEY: &str = "NAMEWHEEL_SPIN_SECS";
pub const SEED_KEY: &str = "NAMEWHEEL_SEED";

/// Upper bound for a single spin, in seconds.
pub const MAX_SPIN_SECS: f64 = 3600.0;
/// Upper bound for `min_extra_turns + extra_turn_choices`.
pub const MAX_EXTRA_TURNS: u32 = 1000;

pub const DEFAULT_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0xff, 0xe2, 0x7a),
    Color32::from_rgb(0x89, 0xc2, 0xff),
    Color32::from_rgb(0xff, 0xb3, 0x8a),
    Color32::from_rgb(0x9f, 0xf4, 0xd1),
    Color32::from_rgb(0xff, 0x9a, 0x9a),
    Color32::from_rgb(0xc8, 0xb6, 0xff),
];

/// The three looks the wheel ships with.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Just the wheel.
    #[default]
    Classic,
    /// A bigger wheel with a header and a footer.
    Branded,
    /// The wheel over a background picture.
    Backdrop,
}

impl FromStr for Preset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &*s.trim().to_ascii_lowercase() {
            "classic" => Ok(Self::Classic),
            "branded" => Ok(Self::Branded),
            "backdrop" => Ok(Self::Backdrop),
            s => anyhow::bail!("unknown preset: `{s}` (expected classic, branded or backdrop)"),
        }
    }
}

/// Every piece of text the ui shows.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Strings {
    pub result_title: String,
    pub confirm: String,
    pub spin: String,
    pub spinning: String,
    pub add: String,
    pub placeholder: String,
    pub names_heading: String,
}

impl Default for Strings {
    fn default() -> Self {
        Self {
            result_title: "الاسم المختار".into(),
            confirm: "تمام".into(),
            spin: "أدر".into(),
            spinning: "تدور...".into(),
            add: "إضافة".into(),
            placeholder: "إضافة إسم".into(),
            names_heading: "الأسماء".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelConfig {
    pub preset: Preset,
    pub diameter: f32,
    pub palette: Vec<Color32>,
    pub label_radius_ratio: f32,
    pub label_font_size: f32,
    pub hub_radius: f32,
    pub hub_dot_radius: f32,
    pub spin_duration: Duration,
    pub min_extra_turns: u32,
    pub extra_turn_choices: u32,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub background_image: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub svg_path: PathBuf,
    pub seed: Option<u64>,
    pub strings: Strings,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self::preset(Preset::Classic)
    }
}

impl WheelConfig {
    pub fn preset(preset: Preset) -> Self {
        let base = Self {
            preset,
            diameter: 260.0,
            palette: DEFAULT_PALETTE.to_vec(),
            label_radius_ratio: 0.65,
            label_font_size: 12.0,
            hub_radius: 36.0,
            hub_dot_radius: 5.0,
            spin_duration: Duration::from_secs(15),
            min_extra_turns: 15,
            extra_turn_choices: 5,
            header: None,
            footer: None,
            background_image: None,
            font: None,
            svg_path: PathBuf::from("wheel.svg"),
            seed: None,
            strings: Strings::default(),
        };

        match preset {
            Preset::Classic => base,
            Preset::Branded => Self {
                diameter: 360.0,
                header: Some("عجلة الأسماء".into()),
                footer: Some(format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))),
                ..base
            },
            Preset::Backdrop => Self {
                diameter: 320.0,
                background_image: Some(PathBuf::from("background.png")),
                ..base
            },
        }
    }

    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    pub fn spin_rules(&self) -> SpinRules {
        SpinRules {
            duration: self.spin_duration,
            min_extra_turns: self.min_extra_turns,
            extra_turn_choices: self.extra_turn_choices,
        }
    }

    /// Preset, then the yaml file named by `NAMEWHEEL_CONFIG`, then single
    /// value overrides from the env.
    pub fn load() -> anyhow::Result<Self> {
        simple_env_load::load_env_from([".env", ".dev.env"]);
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let preset = lookup(PRESET_KEY)
            .as_deref()
            .map(Preset::from_str)
            .transpose()?
            .unwrap_or_default();

        let mut this = Self::preset(preset);

        if let Some(path) = lookup(CONFIG_KEY) {
            let file = ConfigFile::load_from(&path)?;
            this.apply_file(file)
                .with_context(|| anyhow::anyhow!("invalid config in `{path}`"))?;
        }

        this.apply_env(lookup)?;
        this.validate()?;

        log::info!(
            "using the {:?} preset, {}px wide, {:.1}s spins",
            this.preset,
            this.diameter,
            this.spin_duration.as_secs_f32()
        );
        Ok(this)
    }

    fn apply_file(&mut self, file: ConfigFile) -> anyhow::Result<()> {
        let ConfigFile {
            preset,
            diameter,
            palette,
            label_radius_ratio,
            label_font_size,
            hub_radius,
            hub_dot_radius,
            spin_secs,
            min_extra_turns,
            extra_turn_choices,
            header,
            footer,
            background_image,
            font,
            svg_path,
            seed,
            strings,
        } = file;

        // a preset in the file swaps the base before anything else lands
        if let Some(preset) = preset.filter(|&p| p != self.preset) {
            *self = Self::preset(preset);
        }

        if let Some(palette) = palette {
            self.palette = palette
                .iter()
                .map(|hex| parse_hex(hex))
                .collect::<anyhow::Result<_>>()?;
        }

        if let Some(diameter) = diameter {
            self.diameter = diameter;
        }
        if let Some(ratio) = label_radius_ratio {
            self.label_radius_ratio = ratio;
        }
        if let Some(size) = label_font_size {
            self.label_font_size = size;
        }
        if let Some(radius) = hub_radius {
            self.hub_radius = radius;
        }
        if let Some(radius) = hub_dot_radius {
            self.hub_dot_radius = radius;
        }
        if let Some(turns) = min_extra_turns {
            self.min_extra_turns = turns;
        }
        if let Some(choices) = extra_turn_choices {
            self.extra_turn_choices = choices;
        }
        if let Some(path) = svg_path {
            self.svg_path = path;
        }
        if let Some(strings) = strings {
            self.strings = strings;
        }

        if let Some(secs) = spin_secs {
            self.spin_duration = secs_to_duration(secs)?;
        }

        for (slot, value) in [
            (&mut self.header, header),
            (&mut self.footer, footer),
        ] {
            if let Some(value) = value {
                *slot = Some(value).filter(|s| !s.trim().is_empty());
            }
        }

        if background_image.is_some() {
            self.background_image = background_image;
        }
        if font.is_some() {
            self.font = font;
        }
        if seed.is_some() {
            self.seed = seed;
        }

        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        fn parse<T>(key: &str, value: String) -> anyhow::Result<T>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            value
                .trim()
                .parse()
                .with_context(|| anyhow::anyhow!("invalid value for `{key}`: `{value}`"))
        }

        if let Some(value) = lookup(DIAMETER_KEY) {
            self.diameter = parse(DIAMETER_KEY, value)?;
        }
        if let Some(value) = lookup(SPIN_SECS_KEY) {
            self.spin_duration = secs_to_duration(parse(SPIN_SECS_KEY, value)?)?;
        }
        if let Some(value) = lookup(SEED_KEY) {
            self.seed.replace(parse(SEED_KEY, value)?);
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.diameter.is_finite() && self.diameter > 0.0,
            "diameter must be positive, got {}",
            self.diameter
        );
        anyhow::ensure!(!self.palette.is_empty(), "the palette needs at least one color");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.label_radius_ratio),
            "label_radius_ratio must be within 0..=1, got {}",
            self.label_radius_ratio
        );
        anyhow::ensure!(
            self.extra_turn_choices > 0,
            "extra_turn_choices must be at least 1"
        );
        anyhow::ensure!(
            self.min_extra_turns
                .checked_add(self.extra_turn_choices)
                .filter(|&total| total <= MAX_EXTRA_TURNS)
                .is_some(),
            "min_extra_turns + extra_turn_choices must be at most {MAX_EXTRA_TURNS}, got {} + {}",
            self.min_extra_turns,
            self.extra_turn_choices
        );
        Ok(())
    }
}

fn secs_to_duration(secs: f64) -> anyhow::Result<Duration> {
    anyhow::ensure!(
        secs.is_finite() && (0.0..=MAX_SPIN_SECS).contains(&secs),
        "spin duration must be within 0..={MAX_SPIN_SECS} seconds, got {secs}"
    );
    Ok(Duration::from_secs_f64(secs))
}

/// Parses `#rrggbb` or `#rgb`, with or without the `#`.
pub fn parse_hex(input: &str) -> anyhow::Result<Color32> {
    let hex = input.trim().trim_start_matches('#');
    let digit = |i: usize| {
        u8::from_str_radix(&hex[i..i + 1], 16)
            .with_context(|| anyhow::anyhow!("invalid hex color: `{input}`"))
    };

    match hex.len() {
        6 if hex.is_ascii() => {
            let channel = |i| Ok::<_, anyhow::Error>(digit(i)? << 4 | digit(i + 1)?);
            Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
        }
        3 if hex.is_ascii() => {
            let channel = |i| Ok::<_, anyhow::Error>(digit(i)? * 0x11);
            Ok(Color32::from_rgb(channel(0)?, channel(1)?, channel(2)?))
        }
        _ => anyhow::bail!("invalid hex color: `{input}`"),
    }
}

pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// The yaml config file. Everything is optional and lands on top of the
/// preset.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    preset: Option<Preset>,
    diameter: Option<f32>,
    palette: Option<Vec<String>>,
    label_radius_ratio: Option<f32>,
    label_font_size: Option<f32>,
    hub_radius: Option<f32>,
    hub_dot_radius: Option<f32>,
    spin_secs: Option<f64>,
    min_extra_turns: Option<u32>,
    extra_turn_choices: Option<u32>,
    header: Option<String>,
    footer: Option<String>,
    background_image: Option<PathBuf>,
    font: Option<PathBuf>,
    svg_path: Option<PathBuf>,
    seed: Option<u64>,
    strings: Option<Strings>,
}

impl ConfigFile {
    fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| anyhow::anyhow!("cannot read `{}`", path.display()))?;
        Self::parse(&data).with_context(|| anyhow::anyhow!("cannot parse `{}`", path.display()))
    }

    fn parse(data: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }
}
