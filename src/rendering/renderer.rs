use crate::{
    core::{geo::Point, viewport::Viewport},
    layers::marker::{Marker, MarkerKind},
    rendering::{context::RenderContext, style::MapStyle, surface::Surface},
};

/// Paints background, grid and markers. Holds only its style; every call
/// reads the viewport and markers it is handed and keeps nothing.
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    style: MapStyle,
}

impl MapRenderer {
    pub fn new(style: MapStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    /// Renders a full frame. Identical inputs always produce identical pixels.
    pub fn render(&self, surface: &mut Surface, viewport: &Viewport, markers: &[Marker]) {
        self.build_frame(viewport, markers).rasterize(surface);
    }

    /// Records the display list for a frame without touching a surface
    pub fn build_frame(&self, viewport: &Viewport, markers: &[Marker]) -> RenderContext {
        let mut ctx = RenderContext::new(viewport.width, viewport.height);
        ctx.begin_frame();
        ctx.clear(self.style.background_color);
        ctx.render_grid(self.style.grid_spacing, self.style.grid_color);

        let mut culled = 0usize;
        for marker in markers {
            let position = viewport.lat_lng_to_pixel(&marker.position());
            if self.is_offscreen(position, viewport) {
                culled += 1;
                continue;
            }
            self.render_marker(&mut ctx, marker, position);
        }
        if culled > 0 {
            log::trace!("culled {culled} offscreen markers");
        }

        ctx
    }

    fn render_marker(&self, ctx: &mut RenderContext, marker: &Marker, position: Point) {
        let markers = &self.style.markers;
        let labels = &self.style.labels;

        let (dx, dy) = markers.shadow_offset;
        ctx.render_circle(
            Point::new(position.x + dx, position.y + dy),
            markers.radius,
            markers.shadow_color,
        );

        let fill = match marker.kind() {
            MarkerKind::Facility(_) => markers.facility_color,
            MarkerKind::UserLocation => markers.user_color,
        };
        ctx.render_circle(position, markers.radius, fill);
        ctx.render_ring(position, markers.radius, markers.outline_width, markers.outline_color);
        ctx.render_icon(position, marker.icon(), markers.icon_color);

        if let Some(label) = marker.label() {
            let plate_top = position.y + labels.offset_y;
            ctx.render_rect(
                Point::new(position.x - f64::from(labels.plate_width) / 2.0, plate_top),
                labels.plate_width,
                labels.plate_height,
                labels.plate_color,
            );
            ctx.render_text(
                Point::new(position.x, plate_top + f64::from(labels.plate_height) / 2.0),
                label,
                labels.plate_width,
                labels.text_color,
            );
        }
    }

    /// True when nothing a marker draws (shadow, outline, label plate) can
    /// land on the surface
    fn is_offscreen(&self, position: Point, viewport: &Viewport) -> bool {
        let markers = &self.style.markers;
        let labels = &self.style.labels;
        let reach = markers.radius + markers.outline_width;
        let (dx, dy) = markers.shadow_offset;
        let half_plate = f64::from(labels.plate_width) / 2.0;

        let left = position.x - reach.max(half_plate) - dx.abs();
        let right = position.x + reach.max(half_plate) + dx.abs();
        let top = position.y - reach - dy.abs();
        let bottom =
            position.y + (reach + dy.abs()).max(labels.offset_y + f64::from(labels.plate_height));

        right < 0.0
            || bottom < 0.0
            || left > f64::from(viewport.width)
            || top > f64::from(viewport.height)
    }
}
