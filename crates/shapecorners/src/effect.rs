//! The effect object a host loads.

use crate::classify::{Verdict, WindowClassifier};
use crate::compositor::{FrameCompositor, PaintOutcome};
use crate::config::{ConfigGroup, ConfigState};
use crate::coords::Region;
use crate::host::{CornerGpu, EffectsHost, MaskTextures};
use crate::mask::CornerMaskSet;
use crate::shader::{ShaderError, ShaderLocator};
use crate::window::{EffectWindow, WindowPaintData};

/// Position in the host's effect chain. Runs after most content effects.
pub const CHAIN_POSITION: i32 = 100;

/// Shapes window corners.
///
/// Owns the sanitized configuration, the CPU masks, their GPU uploads and the
/// corner program. All of them are replaced wholesale by [`ShapeCorners::reconfigure`].
pub struct ShapeCorners<G: CornerGpu> {
    gpu: G,
    config: ConfigState,
    masks: CornerMaskSet,
    textures: MaskTextures<G::Mask>,
    program: Option<G::Program>,
}

impl<G: CornerGpu> ShapeCorners<G> {
    /// Builds the corner program and applies `config`.
    ///
    /// A missing or broken shader does not fail construction; the effect stays
    /// inert and every window is painted unshaped.
    pub fn new(gpu: G, config: &dyn ConfigGroup, shaders: &ShaderLocator) -> Self {
        let program = match load_program(&gpu, shaders) {
            Ok(program) => Some(program),
            Err(err) => {
                log::error!("shapecorners disabled: {err}");
                None
            }
        };

        let mut effect = Self {
            gpu,
            config: ConfigState::default(),
            masks: CornerMaskSet::empty(),
            textures: MaskTextures::default(),
            program,
        };
        effect.reconfigure(config);
        effect
    }

    /// Re-reads every key and regenerates the masks.
    pub fn reconfigure(&mut self, group: &dyn ConfigGroup) {
        let config = ConfigState::load(group);
        let masks = CornerMaskSet::generate(config.radii, config.style);
        let textures = MaskTextures::upload(&self.gpu, &masks);

        log::info!(
            "shapecorners configured: style={:?} radii={:?} square_at_edge={} filter_shadow={} whitelist={:?} blacklist={:?}",
            config.style,
            config.radii.to_array(),
            config.square_at_edge,
            config.filter_shadow,
            config.whitelist.as_slice(),
            config.blacklist.as_slice(),
        );

        self.textures = textures;
        self.masks = masks;
        self.config = config;
    }

    /// Paints one window, shaping its corners when eligible.
    pub fn paint_window<H>(
        &self,
        host: &mut H,
        window: &H::Window,
        region: &Region,
        data: &mut WindowPaintData,
    ) -> PaintOutcome
    where
        H: EffectsHost<Program = G::Program, Mask = G::Mask> + ?Sized,
    {
        FrameCompositor::new(&self.config, &self.masks, &self.textures, self.program.as_ref())
            .paint(host, window, region, data)
    }

    pub fn verdict<W: EffectWindow + ?Sized>(&self, window: &W) -> Verdict {
        WindowClassifier::new(&self.config, self.program.is_some()).classify(window)
    }

    #[inline]
    pub fn is_valid<W: EffectWindow + ?Sized>(&self, window: &W) -> bool {
        self.verdict(window).is_eligible()
    }

    /// False once the corner program failed to build.
    #[inline]
    pub fn is_shader_valid(&self) -> bool {
        self.program.is_some()
    }

    #[inline]
    pub fn supported(&self) -> bool {
        self.gpu.supported()
    }

    #[inline]
    pub fn enabled_by_default(&self) -> bool {
        self.supported()
    }

    #[inline]
    pub fn chain_position(&self) -> i32 {
        CHAIN_POSITION
    }

    #[inline]
    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    #[inline]
    pub fn masks(&self) -> &CornerMaskSet {
        &self.masks
    }

    #[inline]
    pub fn gpu(&self) -> &G {
        &self.gpu
    }
}

fn load_program<G: CornerGpu>(gpu: &G, shaders: &ShaderLocator) -> Result<G::Program, ShaderError> {
    if !gpu.supported() {
        return Err(ShaderError::Unsupported("cannot copy from the frame target"));
    }
    let version = gpu.shader_version();
    let shader = shaders.load(version)?;
    log::info!(
        "using {:?} corner shader for version {version}: {}",
        shader.variant,
        shader.path.display(),
    );
    gpu.build_program(&shader.source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CornerStyle, GENERAL_GROUP, KConfig};
    use crate::coords::{Corner, CornerRadius, Rect};
    use crate::mask::CornerMask;
    use crate::shader::{ShaderVariant, ShaderVersion};
    use std::cell::{Cell, RefCell};
    use std::path::{Path, PathBuf};

    struct FakeGpu {
        supported: bool,
        version: ShaderVersion,
        reject: bool,
        built: RefCell<Vec<String>>,
        uploads: Cell<usize>,
    }

    impl FakeGpu {
        fn new(version: ShaderVersion) -> Self {
            Self {
                supported: true,
                version,
                reject: false,
                built: RefCell::new(Vec::new()),
                uploads: Cell::new(0),
            }
        }
    }

    impl CornerGpu for FakeGpu {
        type Program = String;
        type Mask = u32;

        fn supported(&self) -> bool {
            self.supported
        }

        fn shader_version(&self) -> ShaderVersion {
            self.version
        }

        fn build_program(&self, source: &str) -> Result<String, ShaderError> {
            self.built.borrow_mut().push(source.to_string());
            if self.reject {
                Err(ShaderError::Build("rejected".into()))
            } else {
                Ok(source.to_string())
            }
        }

        fn upload_mask(&self, mask: &CornerMask) -> u32 {
            self.uploads.set(self.uploads.get() + 1);
            mask.side()
        }
    }

    struct Win(&'static str);

    impl EffectWindow for Win {
        fn geometry(&self) -> Rect { Rect::new(50, 50, 300, 200) }
        fn window_class(&self) -> &str { self.0 }
        fn is_normal_window(&self) -> bool { true }
        fn is_dialog(&self) -> bool { false }
        fn is_modal(&self) -> bool { false }
        fn is_desktop(&self) -> bool { false }
        fn is_popup_menu(&self) -> bool { false }
        fn is_painting_enabled(&self) -> bool { true }
    }

    fn shader_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shapecorners-effect-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        for variant in [ShaderVariant::Legacy, ShaderVariant::Modern] {
            let path = dir.join(variant.relative_path());
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, variant.dir_name()).unwrap();
        }
        dir
    }

    fn locator(dir: &Path) -> ShaderLocator {
        ShaderLocator::new(vec![dir.to_path_buf()])
    }

    fn config(text: &str) -> KConfig {
        KConfig::parse(text).unwrap()
    }

    #[test]
    fn picks_shader_variant_from_version() {
        let dir = shader_dir("variant");
        let cfg = config("");

        let modern = ShapeCorners::new(FakeGpu::new(ShaderVersion::new(4, 30)), &cfg.group(GENERAL_GROUP), &locator(&dir));
        assert_eq!(modern.gpu().built.borrow().as_slice(), ["1.40"]);

        let legacy = ShapeCorners::new(FakeGpu::new(ShaderVersion::new(1, 10)), &cfg.group(GENERAL_GROUP), &locator(&dir));
        assert_eq!(legacy.gpu().built.borrow().as_slice(), ["1.10"]);
        assert!(legacy.is_shader_valid());
    }

    #[test]
    fn missing_shader_makes_effect_inert() {
        let empty = std::env::temp_dir().join(format!("shapecorners-effect-none-{}", std::process::id()));
        let cfg = config("[General]\nWhitelist=firefox\n");
        let effect = ShapeCorners::new(FakeGpu::new(ShaderVersion::new(1, 40)), &cfg.group(GENERAL_GROUP), &locator(&empty));

        assert!(!effect.is_shader_valid());
        assert!(effect.gpu().built.borrow().is_empty());
        assert_eq!(effect.verdict(&Win("firefox")), Verdict::ShaderUnavailable);
        assert!(!effect.is_valid(&Win("kate")));
    }

    #[test]
    fn rejected_shader_makes_effect_inert() {
        let dir = shader_dir("reject");
        let gpu = FakeGpu { reject: true, ..FakeGpu::new(ShaderVersion::new(1, 40)) };
        let effect = ShapeCorners::new(gpu, &config("").group(GENERAL_GROUP), &locator(&dir));
        assert!(!effect.is_shader_valid());
        assert!(!effect.is_valid(&Win("kate")));
    }

    #[test]
    fn unsupported_backend_never_builds() {
        let dir = shader_dir("unsupported");
        let gpu = FakeGpu { supported: false, ..FakeGpu::new(ShaderVersion::new(1, 40)) };
        let effect = ShapeCorners::new(gpu, &config("").group(GENERAL_GROUP), &locator(&dir));
        assert!(!effect.supported());
        assert!(!effect.enabled_by_default());
        assert!(!effect.is_shader_valid());
        assert!(effect.gpu().built.borrow().is_empty());
    }

    #[test]
    fn unsupported_backend_reports_the_capability() {
        let dir = shader_dir("unsupported-reason");
        let gpu = FakeGpu { supported: false, ..FakeGpu::new(ShaderVersion::new(1, 40)) };
        let err = load_program(&gpu, &locator(&dir)).err();
        assert!(matches!(err, Some(ShaderError::Unsupported(_))), "{err:?}");
    }

    #[test]
    fn construction_applies_config() {
        let dir = shader_dir("construct");
        let cfg = config("[General]\nRadius=6,3\nType=Chiseled\n");
        let effect = ShapeCorners::new(FakeGpu::new(ShaderVersion::new(1, 40)), &cfg.group(GENERAL_GROUP), &locator(&dir));

        assert_eq!(effect.config().style, CornerStyle::Chiseled);
        assert_eq!(effect.config().radii, CornerRadius::new(6, 3, 6, 3));
        assert_eq!(effect.masks().sides(), [6, 3, 6, 3]);
        assert_eq!(effect.gpu().uploads.get(), 4);
        assert_eq!(effect.chain_position(), 100);
    }

    #[test]
    fn reconfigure_replaces_everything() {
        let dir = shader_dir("reconfigure");
        let mut effect = ShapeCorners::new(
            FakeGpu::new(ShaderVersion::new(1, 40)),
            &config("").group(GENERAL_GROUP),
            &locator(&dir),
        );
        assert_eq!(effect.masks().sides(), [10; 4]);

        effect.reconfigure(&config("[General]\nRadius=0\n").group(GENERAL_GROUP));
        assert_eq!(effect.config().style, CornerStyle::None);
        assert!(effect.masks().is_empty());
        assert!(effect.textures.get(Corner::TopLeft).is_none());

        effect.reconfigure(&config("[General]\nRadius=16\nBlacklist=kate\n").group(GENERAL_GROUP));
        assert_eq!(effect.masks().sides(), [16; 4]);
        assert_eq!(effect.textures.get(Corner::BottomLeft), Some(&16));
        assert!(!effect.is_valid(&Win("kate")));
        assert!(effect.is_valid(&Win("dolphin")));
    }
}
