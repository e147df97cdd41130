use chrono::Local;
use iced::{
    event,
    keyboard::{self, key::Named, Key},
    mouse::{self, ScrollDelta},
    time,
    widget::{column, container, image as img, slider, stack, text, Space, Stack},
    window, Alignment, Color, Element, Event, Length, Padding, Size, Subscription, Task, Theme,
};
use std::time::Instant;

use crate::config::Config;
use crate::input::{InputEvent, WheelButton};
use crate::layout::{PlacedFrame, RenderRequestAdapter, ViewportBox};
use crate::presenter::{Presenter, Surface};
use crate::renderer::PdfiumSource;

pub fn run(config: Config, source: PdfiumSource) -> iced::Result {
    iced::application(Slideshow::title, Slideshow::update, Slideshow::view)
        .theme(|_| Theme::Dark)
        .subscription(Slideshow::subscription)
        .run_with(move || Slideshow::new(config, source))
}

#[derive(Debug, Clone)]
pub enum Message {
    WindowOpened(Option<window::Id>),
    Settled,
    Measured(Size),
    Input(InputEvent),
    Tick(Instant),
    Exit,
}

#[derive(Debug, Clone)]
struct DrawnPage {
    handle: img::Handle,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Retained drawing state read back by `view`.
#[derive(Debug, Default)]
pub struct FrameSurface {
    pages: Vec<DrawnPage>,
    slider_max: Option<usize>,
    slider_value: usize,
    label: String,
}

impl Surface for FrameSurface {
    fn clear(&mut self) {
        self.pages.clear();
    }

    fn draw_image(&mut self, frame: PlacedFrame) {
        let (x, y) = frame.placement.top_left();
        let (width, height) = frame.image.dimensions();
        self.pages.push(DrawnPage {
            handle: img::Handle::from_rgba(width, height, frame.image.into_raw()),
            x: x.max(0) as f32,
            y: y.max(0) as f32,
            width: width as f32,
            height: height as f32,
        });
    }

    fn set_slider_range(&mut self, min: usize, max: usize) {
        debug_assert_eq!(min, 0);
        self.slider_max = Some(max);
    }

    // The iced slider only reports user drags, so writes never echo.
    fn set_slider_value(&mut self, value: usize) -> Option<usize> {
        self.slider_value = value;
        None
    }

    fn set_label(&mut self, text: String) {
        self.label = text;
    }
}

struct Slideshow {
    config: Config,
    presenter: Presenter<PdfiumSource, FrameSurface>,
    window: Option<window::Id>,
}

impl Slideshow {
    fn new(config: Config, source: PdfiumSource) -> (Self, Task<Message>) {
        let adapter = RenderRequestAdapter::new(config.mode, config.zoom, config.margin);
        let mut presenter =
            Presenter::new(source, FrameSurface::default(), adapter, &config.clock_format);
        presenter.tick_clock(Local::now());

        (
            Self {
                config,
                presenter,
                window: None,
            },
            window::get_oldest().map(Message::WindowOpened),
        )
    }

    fn title(&self) -> String {
        self.config.title().to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(Some(id)) => {
                self.window = Some(id);
                let delay = self.config.settle_delay;
                return Task::batch([
                    window::change_mode(id, window::Mode::Fullscreen),
                    Task::perform(tokio::time::sleep(delay), |_| Message::Settled),
                ]);
            }
            Message::WindowOpened(None) => {
                tracing::error!("no window available for the presentation");
            }
            Message::Settled => {
                if let Some(id) = self.window {
                    return window::get_size(id).map(Message::Measured);
                }
            }
            Message::Measured(size) => {
                let viewport = ViewportBox::from_screen(size.width, size.height, self.config.scale);
                self.presenter.set_viewport(viewport);
            }
            Message::Input(event) => {
                self.presenter.handle(event);
            }
            Message::Tick(_) => {
                self.presenter.tick_clock(Local::now());
            }
            Message::Exit => {
                tracing::info!("closing presentation");
                return match self.window {
                    Some(id) => window::close(id),
                    None => iced::exit(),
                };
            }
        }
        Task::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            event::listen_with(raw_input),
            time::every(self.config.clock_period).map(Message::Tick),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        let surface = self.presenter.surface();
        let (width, height) = self
            .presenter
            .viewport()
            .map(|viewport| (viewport.width as f32, viewport.height as f32))
            .unwrap_or((0.0, 0.0));

        let canvas_background = self.config.canvas_background;
        let canvas = container(
            Stack::with_children(surface.pages.iter().map(page_view))
                .width(Length::Fixed(width))
                .height(Length::Fixed(height)),
        )
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(move |_| container::Style {
            background: Some(canvas_background.into()),
            ..container::Style::default()
        });

        let bar_background = self.config.bar_background;
        let bar_style = move |_: &Theme| container::Style {
            background: Some(bar_background.into()),
            text_color: Some(Color::WHITE),
            ..container::Style::default()
        };

        let mut content = column![Space::with_height(40), canvas].align_x(Alignment::Center);
        if let Some(max) = surface.slider_max {
            let position = slider(0..=max as u32, surface.slider_value as u32, |value| {
                Message::Input(InputEvent::SliderChanged(value as usize))
            })
            .width(Length::Fixed(width));
            content = content.push(container(position).style(bar_style));
        }

        let background = self.config.background;
        let main = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .style(move |_| container::Style {
                background: Some(background.into()),
                ..container::Style::default()
            });

        let clock = container(text(&surface.label).size(10))
            .padding([2, 6])
            .style(bar_style);
        let overlay = container(clock)
            .align_right(Length::Fill)
            .align_bottom(Length::Fill)
            .padding(10);

        stack![main, overlay].into()
    }
}

fn page_view(page: &DrawnPage) -> Element<'_, Message> {
    container(
        img(page.handle.clone())
            .width(Length::Fixed(page.width))
            .height(Length::Fixed(page.height)),
    )
    .padding(Padding {
        top: page.y,
        left: page.x,
        right: 0.0,
        bottom: 0.0,
    })
    .into()
}

/// Maps window events to slideshow messages.
///
/// Clicks captured by a widget (the slider) are not navigation input.
fn raw_input(event: Event, status: event::Status, _window: window::Id) -> Option<Message> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match key {
            Key::Named(Named::Space) => Some(Message::Input(InputEvent::Space)),
            Key::Named(Named::Escape) => Some(Message::Exit),
            _ => None,
        },
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            let (ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. }) = delta;
            Some(Message::Input(InputEvent::Wheel(y)))
        }
        Event::Mouse(mouse::Event::ButtonPressed(button)) if status == event::Status::Ignored => {
            let input = match button {
                mouse::Button::Left => InputEvent::PrimaryClick,
                mouse::Button::Right => InputEvent::SecondaryClick,
                mouse::Button::Other(4) => InputEvent::WheelButton(WheelButton::Up),
                mouse::Button::Other(5) => InputEvent::WheelButton(WheelButton::Down),
                _ => return None,
            };
            Some(Message::Input(input))
        }
        _ => None,
    }
}
