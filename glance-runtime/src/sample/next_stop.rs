//! Next-stop arrivals app

use std::time::Duration;

use glance_core::config::RuntimeConfig;
use glance_core::{App, AppContext};
use glance_display::embedded_graphics::{
    mono_font::{
        ascii::{FONT_5X8, FONT_6X10},
        MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use glance_display::Surface;
use glance_protocol::{ActivationMode, AppCapability, ButtonMask};

use super::predictions::PredictionSet;
use crate::actor::EventApp;

/// How often predictions should be fetched while the app is visible
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2 * 60);

pub const DEFAULT_STOP_NAME: &str = "3rd St & Howard St";

const APP_NAME: &str = "next-stop";

/// Left margin for all text
const MARGIN_X: i32 = 2;

/// Spacing between prediction lines in app mode
const LINE_SPACING: i32 = 9;

/// Events delivered back to the app
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStopEvent {
    /// A fetch finished; `None` when it failed
    FetchCompleted(Option<PredictionSet>),
}

/// What the last fetch produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing has come back yet
    #[default]
    Initial,
    /// The last fetch failed
    Failed,
    Ready(PredictionSet),
}

/// Shows upcoming arrivals at one stop
#[derive(Debug)]
pub struct NextStop {
    name: String,
    capability: AppCapability,
    stop_name: String,
    mode: Option<ActivationMode>,
    fetch: FetchState,
    refresh_due: bool,
}

impl NextStop {
    pub fn new(stop_name: impl Into<String>) -> Self {
        Self {
            name: APP_NAME.to_string(),
            capability: AppCapability::WidgetAndApp,
            stop_name: stop_name.into(),
            mode: None,
            fetch: FetchState::Initial,
            refresh_due: false,
        }
    }

    /// Default stop, named and scoped by `config`
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            name: config.app_name.as_str().to_string(),
            capability: config.capability,
            ..Self::default()
        }
    }

    pub fn stop_name(&self) -> &str {
        &self.stop_name
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Take the pending refresh request, if any
    ///
    /// Set on activation and after each completed fetch; the host should
    /// start a fetch now, or `REFRESH_INTERVAL` after the previous one.
    pub fn take_refresh(&mut self) -> bool {
        core::mem::take(&mut self.refresh_due)
    }

    /// Detail text below the stop name
    pub fn detail_lines(&self) -> Vec<String> {
        match &self.fetch {
            FetchState::Initial => vec!["Fetching...".to_string()],
            FetchState::Failed => vec!["Network Error".to_string()],
            FetchState::Ready(predictions) => match self.mode {
                Some(ActivationMode::Widget) => vec![predictions.summary_line()],
                _ => predictions
                    .routes()
                    .into_iter()
                    .map(|route| predictions.route_line(route))
                    .collect(),
            },
        }
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let height = target.bounding_box().size.height as i32;
        let title = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        let detail = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

        let (title_at, title_baseline, mut y) = match self.mode {
            Some(ActivationMode::Widget) => {
                let middle = height / 2;
                (Point::new(MARGIN_X, middle - 1), Baseline::Bottom, middle + 1)
            }
            _ => (Point::new(MARGIN_X, 2), Baseline::Top, 14),
        };

        Text::with_baseline(&self.stop_name, title_at, title, title_baseline).draw(target)?;

        for line in self.detail_lines() {
            Text::with_baseline(&line, Point::new(MARGIN_X, y), detail, Baseline::Top)
                .draw(target)?;
            y += LINE_SPACING;
        }
        Ok(())
    }
}

impl Default for NextStop {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_NAME)
    }
}

impl App for NextStop {
    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> AppCapability {
        self.capability
    }

    fn on_activate(&mut self, mode: ActivationMode, _ctx: &mut AppContext) {
        log::info!("Next stop activated in {} mode", mode.name());
        self.mode = Some(mode);
        self.refresh_due = true;
    }

    fn on_deactivate(&mut self) {
        self.mode = None;
        self.refresh_due = false;
    }

    fn on_button_press(&mut self, _buttons: ButtonMask, _ctx: &mut AppContext) {}

    fn on_draw(&mut self, surface: &mut Surface) {
        self.draw(surface).unwrap_or_else(|never| match never {});
    }
}

impl EventApp for NextStop {
    type Event = NextStopEvent;

    fn on_event(&mut self, event: NextStopEvent, ctx: &mut AppContext) {
        match event {
            NextStopEvent::FetchCompleted(result) => {
                // A fetch that outlived the activation
                if !ctx.is_running() {
                    log::debug!("Dropping fetch result while inactive");
                    return;
                }

                self.fetch = match result {
                    Some(predictions) => FetchState::Ready(predictions),
                    None => FetchState::Failed,
                };
                self.refresh_due = true;

                if let Err(e) = ctx.render() {
                    log::warn!("Render request failed: {}", e);
                }
            }
        }
    }
}
