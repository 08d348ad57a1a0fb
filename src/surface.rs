//! Binding the drawable surface to the device and keeping it sized to the display.

use winit::dpi::PhysicalSize;

/// Backing resolution for a drawable whose CSS/logical size is `client_width`
/// by `client_height`, on a display with `pixel_ratio` device pixels per unit.
///
/// Fractions are dropped, the same as assigning a float to a canvas' integer
/// `width`. A ratio that is zero, negative or not finite counts as 1.
pub fn backing_size(client_width: f64, client_height: f64, pixel_ratio: f64) -> PhysicalSize<u32> {
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };
    // `as` saturates: NaN and negatives become 0
    PhysicalSize::new(
        (client_width * ratio) as u32,
        (client_height * ratio) as u32,
    )
}

/// The host's preferred format with vertex colours written as-is: the first
/// non-sRGB format offered, else whatever comes first.
pub fn preferred_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Premultiplied alpha like the browser canvas, if the surface can do it.
pub fn preferred_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    if modes.contains(&wgpu::CompositeAlphaMode::PreMultiplied) {
        wgpu::CompositeAlphaMode::PreMultiplied
    } else {
        modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
    }
}

/// The size a surface at `current` should switch to when `requested` comes in,
/// or `None` to leave it alone: a zero dimension (minimised window, hidden
/// canvas) or no change at all.
pub fn next_size(
    current: PhysicalSize<u32>,
    requested: PhysicalSize<u32>,
) -> Option<PhysicalSize<u32>> {
    if requested.width == 0 || requested.height == 0 || requested == current {
        None
    } else {
        Some(requested)
    }
}

/// Writes `requested` into `config` if [`next_size`] accepts it. Returns whether
/// the configuration changed.
pub fn resize_config(config: &mut wgpu::SurfaceConfiguration, requested: PhysicalSize<u32>) -> bool {
    let current = PhysicalSize::new(config.width, config.height);
    match next_size(current, requested) {
        Some(size) => {
            config.width = size.width;
            config.height = size.height;
            true
        }
        None => false,
    }
}

/// A surface together with the configuration last applied to it.
pub struct SurfaceState {
    pub surface: wgpu::Surface,
    pub config: wgpu::SurfaceConfiguration,
}

impl SurfaceState {
    /// Returns `None` when the surface offers no format at all for this adapter.
    pub fn new(
        surface: wgpu::Surface,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        size: PhysicalSize<u32>,
    ) -> Option<SurfaceState> {
        let caps = surface.get_capabilities(adapter);
        let format = preferred_format(&caps.formats)?;
        log::info!("surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            // Fifo is always available and paces us to the display refresh
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: preferred_alpha_mode(&caps.alpha_modes),
            view_formats: vec![],
        };
        surface.configure(device, &config);

        Some(SurfaceState { surface, config })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Reconfigures for `new_size`. Returns `false`, touching nothing, when the
    /// size is zero or unchanged.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: PhysicalSize<u32>) -> bool {
        if !resize_config(&mut self.config, new_size) {
            return false;
        }
        self.surface.configure(device, &self.config);
        true
    }

    /// Applies the current configuration again, after the surface was lost.
    pub fn reconfigure(&self, device: &wgpu::Device) {
        self.surface.configure(device, &self.config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn backing_size_scales_by_pixel_ratio() {
        assert_eq!(backing_size(800.0, 600.0, 2.0), PhysicalSize::new(1600, 1200));
        assert_eq!(backing_size(800.0, 600.0, 1.0), PhysicalSize::new(800, 600));
    }

    #[test]
    fn backing_size_truncates_fractions() {
        assert_eq!(backing_size(333.0, 101.0, 1.5), PhysicalSize::new(499, 151));
        assert_eq!(backing_size(10.0, 10.0, 1.25), PhysicalSize::new(12, 12));
    }

    #[test]
    fn bad_pixel_ratio_counts_as_one() {
        for ratio in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert_eq!(backing_size(640.0, 480.0, ratio), PhysicalSize::new(640, 480));
        }
    }

    #[test]
    fn hidden_canvas_has_zero_backing_size() {
        assert_eq!(backing_size(0.0, 0.0, 2.0), PhysicalSize::new(0, 0));
    }

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: TextureFormat::Bgra8Unorm,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::PreMultiplied,
            view_formats: vec![],
        }
    }

    #[test]
    fn zero_size_is_ignored() {
        let current = PhysicalSize::new(800, 600);
        assert_eq!(next_size(current, PhysicalSize::new(0, 600)), None);
        assert_eq!(next_size(current, PhysicalSize::new(800, 0)), None);
        assert_eq!(next_size(current, PhysicalSize::new(0, 0)), None);
    }

    #[test]
    fn same_size_is_a_no_op() {
        let current = PhysicalSize::new(800, 600);
        assert_eq!(next_size(current, current), None);
    }

    #[test]
    fn new_size_is_taken() {
        let current = PhysicalSize::new(800, 600);
        assert_eq!(
            next_size(current, PhysicalSize::new(1600, 1200)),
            Some(PhysicalSize::new(1600, 1200))
        );
    }

    #[test]
    fn rejected_resize_keeps_old_config() {
        let mut config = config(800, 600);
        assert!(!resize_config(&mut config, PhysicalSize::new(0, 0)));
        assert!(!resize_config(&mut config, PhysicalSize::new(800, 600)));
        assert_eq!((config.width, config.height), (800, 600));

        assert!(resize_config(&mut config, PhysicalSize::new(1024, 768)));
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.format, TextureFormat::Bgra8Unorm);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut config = config(800, 600);
        let size = backing_size(500.0, 400.0, 2.0);
        assert!(resize_config(&mut config, size));
        assert!(!resize_config(&mut config, size));
        assert_eq!((config.width, config.height), (1000, 800));
    }

    #[test]
    fn prefers_non_srgb_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(preferred_format(&formats), Some(TextureFormat::Rgba8UnormSrgb));
        assert_eq!(preferred_format(&[]), None);
    }

    #[test]
    fn alpha_mode_prefers_premultiplied() {
        use wgpu::CompositeAlphaMode::*;
        assert_eq!(preferred_alpha_mode(&[Opaque, PreMultiplied]), PreMultiplied);
        assert_eq!(preferred_alpha_mode(&[Opaque, Inherit]), Opaque);
        assert_eq!(preferred_alpha_mode(&[]), Auto);
    }
}
