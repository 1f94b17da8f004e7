use masterror::Error;

use super::{Config, ImageConfig};

/// Errors returned when validating a [`Config`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// An image was configured with a zero width or height.
    #[error("image '{name}' must have a non-zero size")]
    EmptyImage { name: String },

    /// The analog clock tick interval is zero.
    #[error("analog clock tick interval must be greater than zero")]
    ZeroTickInterval,

    /// The jewel radius is negative or not finite.
    #[error("jewel radius must be a finite, non-negative number")]
    InvalidJewelRadius,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigValidationError`] if an image has an empty size, the
    /// tick interval is zero or the jewel radius is unusable.
    ///
    /// # Examples
    ///
    /// ```
    /// use deskclock_proto::config::Config;
    ///
    /// let config = Config::default();
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let clock = &self.analog_clock;

        if clock.tick_interval_ms == 0 {
            return Err(ConfigValidationError::ZeroTickInterval);
        }

        if !clock.jewel.radius.is_finite() || clock.jewel.radius < 0.0 {
            return Err(ConfigValidationError::InvalidJewelRadius);
        }

        let images = [&clock.dial, &clock.hour_hand, &clock.minute_hand]
            .into_iter()
            .chain(clock.second_hand.as_ref());

        for image in images {
            ensure_non_empty(image)?;
        }

        Ok(())
    }
}

fn ensure_non_empty(image: &ImageConfig) -> Result<(), ConfigValidationError> {
    if image.width == 0 || image.height == 0 {
        return Err(ConfigValidationError::EmptyImage {
            name: image.name.clone(),
        });
    }

    Ok(())
}
