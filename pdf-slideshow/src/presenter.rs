use chrono::{DateTime, TimeZone};

use crate::input::{InputEvent, NavAction, SliderGuard};
use crate::layout::{PlacedFrame, RenderRequestAdapter, ViewportBox};
use crate::navigation::{Navigation, PositionChanged};
use crate::renderer::PageSource;

/// Display the slideshow draws on.
pub trait Surface {
    fn clear(&mut self);

    fn draw_image(&mut self, frame: PlacedFrame);

    fn set_slider_range(&mut self, min: usize, max: usize);

    /// Moves the slider. Returns the value passed to the slider's change
    /// callback if the widget fires it for programmatic updates.
    fn set_slider_value(&mut self, value: usize) -> Option<usize>;

    fn set_label(&mut self, text: String);
}

/// Drives the surface from navigation changes.
pub struct Presenter<S, F> {
    source: S,
    surface: F,
    navigation: Navigation,
    guard: SliderGuard,
    adapter: RenderRequestAdapter,
    viewport: Option<ViewportBox>,
    clock_format: String,
}

impl<S: PageSource, F: Surface> Presenter<S, F> {
    pub fn new(source: S, mut surface: F, adapter: RenderRequestAdapter, clock_format: &str) -> Self {
        let navigation = Navigation::new(source.page_count(), adapter.mode);
        if !navigation.is_empty() {
            surface.set_slider_range(0, navigation.position_count() - 1);
        }

        Self {
            source,
            surface,
            navigation,
            guard: SliderGuard::default(),
            adapter,
            viewport: None,
            clock_format: clock_format.to_string(),
        }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn surface(&self) -> &F {
        &self.surface
    }

    pub fn viewport(&self) -> Option<ViewportBox> {
        self.viewport
    }

    /// Sets the measured viewport and draws the current position into it.
    pub fn set_viewport(&mut self, viewport: ViewportBox) {
        tracing::info!(width = viewport.width, height = viewport.height, "viewport measured");
        self.viewport = Some(viewport);
        self.show_current();
    }

    /// Handles one raw input event. Returns the transition it caused, if any.
    pub fn handle(&mut self, event: InputEvent) -> Option<PositionChanged> {
        let change = match self.guard.map(event) {
            NavAction::Advance => self.navigation.advance(),
            NavAction::Retreat => self.navigation.retreat(),
            NavAction::JumpTo(position) => self.navigation.jump_to(position),
            NavAction::None => None,
        };

        if change.is_some() {
            self.show_current();
        }
        change
    }

    /// Redraws the current position and writes it back to the slider.
    pub fn show_current(&mut self) {
        self.surface.clear();

        if self.navigation.is_empty() {
            tracing::info!("document has no pages, nothing to show");
            return;
        }

        if let Some(viewport) = self.viewport {
            let frames = self
                .adapter
                .render(&self.source, viewport, self.navigation.position());
            for frame in frames {
                self.surface.draw_image(frame);
            }
        }

        let position = self.navigation.position();
        let surface = &mut self.surface;
        let echo = self.guard.write_back(|| surface.set_slider_value(position));
        debug_assert_eq!(echo, NavAction::None);

        tracing::debug!(page = %self.navigation.caption(), "showing");
    }

    pub fn tick_clock<Tz>(&mut self, now: DateTime<Tz>)
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.surface
            .set_label(now.format(&self.clock_format).to_string());
    }
}
