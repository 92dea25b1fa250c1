use std::str::FromStr;

use spark_signals::{effect, signal, Signal};

use crate::context::AppContext;
use crate::engine::{document, CustomElement};
use crate::state::events::{self, ColorSchemeToggleChange, EventKind};
use crate::types::ColorScheme;

use super::element;

/// Light/dark switch.
///
/// State is backed by the host's `color-scheme` attribute (default `light`).
/// Clicking the button flips it and dispatches one `mode-change` carrying
/// the new value. Setting the attribute or [`ColorSchemeToggle::set_color_scheme`]
/// changes the state silently.
#[derive(Clone)]
pub struct ColorSchemeToggle {
    host: usize,
    button: usize,
    scheme: Signal<ColorScheme>,
}

fn parse_scheme(value: Option<&str>) -> ColorScheme {
    value
        .and_then(|v| ColorScheme::from_str(v).ok())
        .unwrap_or_default()
}

impl CustomElement for ColorSchemeToggle {
    const TAG: &'static str = "wm-color-scheme-toggle";
    const OBSERVED_ATTRIBUTES: &'static [&'static str] = &["color-scheme"];

    fn create(host: usize, _ctx: &AppContext) -> Self {
        let initial = parse_scheme(document::attribute(host, "color-scheme").as_deref());
        let scheme = signal(initial);

        let slider = element("span").build();
        let button = element("button")
            .class("toggle")
            .attr("aria-label", "Toggle color scheme")
            .child(slider)
            .append_to(host);

        let toggle = Self {
            host,
            button,
            scheme: scheme.clone(),
        };

        let t = toggle.clone();
        let _ = events::add_event_listener(button, "click", move |_| {
            t.toggle();
        });

        let stop = effect(move || {
            let current = scheme.get();
            let class = if current.is_dark() {
                "toggle-slider dark"
            } else {
                "toggle-slider"
            };
            document::set_attribute(slider, "class", class);
            document::set_text(slider, current.icon());
        });
        document::on_destroy(host, stop);

        toggle
    }

    fn attribute_changed(&self, _name: &str, value: Option<&str>) {
        let next = parse_scheme(value);
        if self.scheme.get() != next {
            self.scheme.set(next);
        }
    }
}

impl ColorSchemeToggle {
    pub fn host(&self) -> usize {
        self.host
    }

    /// The button users activate.
    pub fn button(&self) -> usize {
        self.button
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.scheme.get()
    }

    /// Set the state and reflect it to the attribute, without an event.
    pub fn set_color_scheme(&self, scheme: ColorScheme) {
        if self.scheme.get() != scheme {
            self.scheme.set(scheme);
        }
        document::set_attribute(self.host, "color-scheme", scheme.as_ref());
    }

    /// Flip the scheme and dispatch `mode-change`. Returns the new scheme.
    pub fn toggle(&self) -> ColorScheme {
        let next = self.color_scheme().toggled();
        self.set_color_scheme(next);
        events::dispatch_event(
            self.host,
            EventKind::ModeChange(ColorSchemeToggleChange { color_scheme: next }),
        );
        next
    }

    /// Listen for `mode-change` on this toggle. Returns cleanup function.
    pub fn on_change<F>(&self, handler: F) -> impl FnOnce()
    where
        F: Fn(ColorScheme) + 'static,
    {
        events::on_mode_change(self.host, handler)
    }
}
