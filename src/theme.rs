//! Light/dark theme detection and the colors each theme paints with.
//!
//! The OS query is fallible; [`probe_theme`] collapses every failure to
//! [`Theme::Light`]. Callers probe on every repaint so a theme switch shows
//! up on the next frame.

use thiserror::Error;

use crate::gauge::GaugeColor;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ThemeQueryError {
    #[error("theme detection failed: {0}")]
    Detect(String),
    #[error("system did not report a light or dark preference")]
    Unspecified,
}

/// A place the current theme can be read from.
pub trait ThemeSource {
    fn query(&self) -> Result<Theme, ThemeQueryError>;
}

/// Reads the desktop's dark-mode setting.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTheme;

impl ThemeSource for SystemTheme {
    fn query(&self) -> Result<Theme, ThemeQueryError> {
        match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => Ok(Theme::Dark),
            Ok(dark_light::Mode::Light) => Ok(Theme::Light),
            Ok(dark_light::Mode::Unspecified) => Err(ThemeQueryError::Unspecified),
            Err(e) => Err(ThemeQueryError::Detect(e.to_string())),
        }
    }
}

pub fn probe_theme(source: &dyn ThemeSource) -> Theme {
    match source.query() {
        Ok(theme) => theme,
        Err(e) => {
            tracing::debug!(error = %e, "theme query failed, using light");
            Theme::Light
        }
    }
}

/// Colors that depend on the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: GaugeColor,
    pub text: GaugeColor,
    pub track: GaugeColor,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: GaugeColor::opaque(35, 39, 43),
                text: GaugeColor::opaque(255, 255, 255),
                track: GaugeColor::opaque(70, 75, 80),
            },
            Theme::Light => Palette {
                background: GaugeColor::opaque(255, 255, 255),
                text: GaugeColor::opaque(0, 0, 0),
                track: GaugeColor::opaque(220, 220, 220),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<Theme, ThemeQueryError>);

    impl ThemeSource for Fixed {
        fn query(&self) -> Result<Theme, ThemeQueryError> {
            self.0.clone()
        }
    }

    #[test]
    fn successful_query_passes_through() {
        assert_eq!(probe_theme(&Fixed(Ok(Theme::Dark))), Theme::Dark);
        assert_eq!(probe_theme(&Fixed(Ok(Theme::Light))), Theme::Light);
    }

    #[test]
    fn missing_key_defaults_to_light() {
        let source = Fixed(Err(ThemeQueryError::Detect("key not found".into())));
        assert_eq!(probe_theme(&source), Theme::Light);
    }

    #[test]
    fn unspecified_defaults_to_light() {
        assert_eq!(probe_theme(&Fixed(Err(ThemeQueryError::Unspecified))), Theme::Light);
    }

    #[test]
    fn palettes() {
        let dark = Theme::Dark.palette();
        assert_eq!(dark.background, GaugeColor::opaque(35, 39, 43));
        assert_eq!(dark.text, GaugeColor::opaque(255, 255, 255));

        let light = Theme::Light.palette();
        assert_eq!(light.background, GaugeColor::opaque(255, 255, 255));
        assert_eq!(light.text, GaugeColor::opaque(0, 0, 0));
    }
}
