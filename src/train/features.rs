use serde::{Deserialize, Serialize};

/// Input features the network can be fed, in their fixed declaration order.
///
/// Both the input vector built by `construct_input` and the input-layer ids
/// follow this order, so the two always line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    X,
    Y,
    XSquared,
    YSquared,
    XTimesY,
    SinX,
    SinY,
}

impl Feature {
    pub const ALL: [Feature; 7] = [
        Feature::X,
        Feature::Y,
        Feature::XSquared,
        Feature::YSquared,
        Feature::XTimesY,
        Feature::SinX,
        Feature::SinY,
    ];

    /// Node id used for the feature's input node.
    pub fn id(&self) -> &'static str {
        match self {
            Feature::X => "x",
            Feature::Y => "y",
            Feature::XSquared => "xSquared",
            Feature::YSquared => "ySquared",
            Feature::XTimesY => "xTimesY",
            Feature::SinX => "sinX",
            Feature::SinY => "sinY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Feature::X => "X_1",
            Feature::Y => "X_2",
            Feature::XSquared => "X_1^2",
            Feature::YSquared => "X_2^2",
            Feature::XTimesY => "X_1X_2",
            Feature::SinX => "sin(X_1)",
            Feature::SinY => "sin(X_2)",
        }
    }

    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        match self {
            Feature::X => x,
            Feature::Y => y,
            Feature::XSquared => x * x,
            Feature::YSquared => y * y,
            Feature::XTimesY => x * y,
            Feature::SinX => x.sin(),
            Feature::SinY => y.sin(),
        }
    }
}

/// Which features are enabled. Serialized with the feature ids as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureMask {
    pub x: bool,
    pub y: bool,
    pub x_squared: bool,
    pub y_squared: bool,
    pub x_times_y: bool,
    pub sin_x: bool,
    pub sin_y: bool,
}

impl Default for FeatureMask {
    fn default() -> Self {
        FeatureMask {
            x: true,
            y: true,
            x_squared: false,
            y_squared: false,
            x_times_y: false,
            sin_x: false,
            sin_y: false,
        }
    }
}

impl FeatureMask {
    /// A mask with nothing enabled.
    pub fn none() -> FeatureMask {
        FeatureMask {
            x: false,
            y: false,
            x_squared: false,
            y_squared: false,
            x_times_y: false,
            sin_x: false,
            sin_y: false,
        }
    }

    pub fn with(mut self, feature: Feature) -> FeatureMask {
        self.set(feature, true);
        self
    }

    pub fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::X => self.x,
            Feature::Y => self.y,
            Feature::XSquared => self.x_squared,
            Feature::YSquared => self.y_squared,
            Feature::XTimesY => self.x_times_y,
            Feature::SinX => self.sin_x,
            Feature::SinY => self.sin_y,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let slot = match feature {
            Feature::X => &mut self.x,
            Feature::Y => &mut self.y,
            Feature::XSquared => &mut self.x_squared,
            Feature::YSquared => &mut self.y_squared,
            Feature::XTimesY => &mut self.x_times_y,
            Feature::SinX => &mut self.sin_x,
            Feature::SinY => &mut self.sin_y,
        };
        *slot = enabled;
    }

    /// Enabled features in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(move |f| self.is_enabled(*f))
    }

    pub fn count(&self) -> usize {
        self.enabled().count()
    }
}

/// Builds the network input for the point `(x, y)`.
pub fn construct_input(mask: &FeatureMask, x: f64, y: f64) -> Vec<f64> {
    mask.enabled().map(|f| f.evaluate(x, y)).collect()
}

/// Input-layer node ids for `mask`, matching `construct_input`'s order.
pub fn input_ids(mask: &FeatureMask) -> Vec<&'static str> {
    mask.enabled().map(|f| f.id()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mask_is_raw_coordinates() {
        let mask = FeatureMask::default();
        assert_eq!(construct_input(&mask, 2.0, -3.0), vec![2.0, -3.0]);
        assert_eq!(input_ids(&mask), vec!["x", "y"]);
    }

    #[test]
    fn features_keep_declaration_order() {
        let mask = FeatureMask::none()
            .with(Feature::SinY)
            .with(Feature::XTimesY)
            .with(Feature::X);
        assert_eq!(input_ids(&mask), vec!["x", "xTimesY", "sinY"]);
        assert_eq!(construct_input(&mask, 2.0, 3.0), vec![2.0, 6.0, 3.0_f64.sin()]);
    }

    #[test]
    fn all_features() {
        let mut mask = FeatureMask::none();
        for f in Feature::ALL {
            mask.set(f, true);
        }
        assert_eq!(mask.count(), 7);
        assert_eq!(
            construct_input(&mask, 2.0, 3.0),
            vec![2.0, 3.0, 4.0, 9.0, 6.0, 2.0_f64.sin(), 3.0_f64.sin()]
        );
    }

    #[test]
    fn mask_serializes_with_feature_ids() {
        let json = serde_json::to_value(FeatureMask::default().with(Feature::XSquared)).unwrap();
        assert_eq!(json["xSquared"], true);
        assert_eq!(json["sinX"], false);
        let parsed: FeatureMask = serde_json::from_str(r#"{"x": false}"#).unwrap();
        assert!(!parsed.x && parsed.y);
    }
}
